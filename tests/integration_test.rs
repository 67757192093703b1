use quizbot::models::{Letter, Options, Question};
use quizbot::parsing::split_generated_text;
use quizbot::{check_answer, format_question, logger, parse_question, parse_quiz_text, validate, QuizSession};

fn capitals() -> Options {
    Options::new("Berlin", "Madrid", "Paris", None)
}

#[test]
fn test_marker_layout_option_sets() {
    let three = parse_question("Q: Capital? $$ A. Berlin $$ B. Madrid $$ C. Paris $$ Answer: C")
        .expect("三个选项应能解析");
    let letters: Vec<Letter> = three.options.iter().map(|(l, _)| l).collect();
    assert_eq!(letters, vec![Letter::A, Letter::B, Letter::C]);

    let four = parse_question(
        "Q: Capital? $$ A. Berlin $$ B. Madrid $$ C. Paris $$ D. Rome $$ Answer: d",
    )
    .expect("四个选项应能解析");
    let letters: Vec<Letter> = four.options.iter().map(|(l, _)| l).collect();
    assert_eq!(letters, Letter::ALL.to_vec());
    assert_eq!(four.answer_text, "Rome");
}

#[test]
fn test_pipe_layout_answer_text_is_option_text() {
    let lines = [
        "Q: a? || A) one || B) two || C) three || Answer: A",
        "Q: b? || A) one || B) two || C) three || D) four || Answer: D",
        "q: c? || a) one || b) two || c) three || answer: b",
    ];
    for line in lines {
        let q = parse_question(line).expect("应能解析");
        assert_eq!(Some(q.answer_text.as_str()), q.options.get(q.answer_letter));
    }
}

#[test]
fn test_well_formed_lines_validate() {
    logger::init();

    let lines = [
        "Q: Capital? $$ A. Berlin $$ B. Madrid $$ C. Paris $$ Answer: C",
        "Capital? $$ A. Berlin $$ B. Madrid $$ C. Paris $$ D. Rome $$ Answer: A $$ Berlin, Germany",
        "Capital? $$ A. Berlin $$ B. Madrid $$ C. Paris $$ Answer: C Paris",
        "Capital? $$ A. Berlin $$ B. Madrid $$ C. Paris $$ Answer: C (Paris)",
        "2.5 + 2.5 = ? $$ A. 4 $$ B. 5 $$ C. 6 $$ Answer: B",
        "Q.E.D. stands for? $$ A. a $$ B. b $$ C. c $$ Answer: A",
        "Q: Capital? || A) Berlin || B) Madrid || C) Paris || Answer: B",
        "Q: Capital? || A) Berlin || B) Madrid || C) Paris || D) Rome || Answer: D",
    ];
    for line in lines {
        assert!(validate(parse_question(line).as_ref()), "应通过校验: {}", line);
    }
}

#[test]
fn test_validate_rejects_answer_without_option() {
    let q = parse_question("Q: x || A) 1 || B) 2 || C) 3 || Answer: D");
    assert!(q.is_some());
    assert!(!validate(q.as_ref()));
    assert!(!validate(parse_question("nothing to see here").as_ref()));
}

#[test]
fn test_check_answer_examples() {
    assert!(check_answer("c", "C", "Paris", &capitals()));
    assert!(check_answer("paris", "C", "Paris", &capitals()));
    assert!(!check_answer("Berlin", "C", "Paris", &capitals()));
    assert!(!check_answer("Z", "C", "Paris", &capitals()));
}

#[test]
fn test_format_lists_each_letter_once() {
    let q = Question::from_option_answer("Capital?".to_string(), capitals(), Letter::C);
    let text = format_question(&q, 1);

    for letter in ["A) ", "B) ", "C) "] {
        let count = text.lines().filter(|l| l.starts_with(letter)).count();
        assert_eq!(count, 1, "{}", letter);
    }
    assert!(!text.lines().any(|l| l.starts_with("D) ")));
    assert!(text.contains("(A/B/C)"));
}

#[test]
fn test_marker_layout_keeps_question_text_and_trailing_answer() {
    let q = parse_question("2.5 + 2.5 = ? $$ A. 4 $$ B. 5 $$ C. 6 $$ Answer: B").unwrap();
    assert_eq!(q.text, "2.5 + 2.5 = ?");
    assert_eq!(q.answer_text, "5");

    let q = parse_question("Q.E.D. stands for? $$ A. a $$ B. b $$ C. c $$ Answer: A").unwrap();
    assert_eq!(q.text, "Q.E.D. stands for?");

    let q = parse_question("Capital? $$ A. Berlin $$ B. Madrid $$ C. Paris $$ Answer: C (Paris)").unwrap();
    assert_eq!(q.answer_letter, Letter::C);
    assert_eq!(q.answer_text, "Paris");
    assert!(q.is_correct("paris"));
}

#[test]
fn test_parse_is_idempotent() {
    let line = "Q: Capital? $$ A. Berlin $$ B. Madrid $$ C. Paris $$ Answer: C";
    assert_eq!(parse_question(line), parse_question(line));
}

#[test]
fn test_generated_text_to_session() {
    let generated = "Here are your questions:

Q1) What is the capital of France?
A. Berlin
B. Madrid
C. Paris
D. Rome
Answer: C

Q2) Which planet is known as the red planet?
A. Venus
B. Mars
C. Jupiter
D. Saturn
Answer: B
";
    assert_eq!(split_generated_text(generated).len(), 2);

    let report = parse_quiz_text(generated);
    assert_eq!(report.accepted.len(), 2);

    let mut session = QuizSession::new("generated", report.accepted);
    assert!(session.current_prompt().unwrap().contains("(A/B/C/D)"));
    assert!(session.submit("Paris").unwrap().is_correct);
    assert!(!session.submit("venus").unwrap().is_correct);

    let summary = session.summary();
    assert_eq!((summary.correct, summary.wrong, summary.total), (1, 1, 2));
}
