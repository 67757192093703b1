use crate::models::question::Question;

/// 生成展示给用户的题目文本
///
/// `number` 从 1 开始。只应对通过校验的题目调用。
pub fn format_question(question: &Question, number: usize) -> String {
    let mut text = format!("Q{}: {}\n", number, question.text);
    for (letter, option) in question.options.iter() {
        text.push_str(&format!("{}) {}\n", letter, option));
    }
    text.push_str(&format!(
        "\nSend your answer ({}) or type the full answer text:",
        question.options.letters_label()
    ));
    text
}
