//! 答案判定 - 业务能力层
//!
//! 用户既可以回复选项字母，也可以回复完整的选项文本，均不区分大小写。

use crate::models::question::{Letter, Options};

/// 判断用户回复是否正确
///
/// 按顺序尝试：
/// 1. 单个字符且是已有选项的字母：按字母比较
/// 2. 与正确答案文本相同：正确
/// 3. 与某个选项文本相同：该选项是正确字母时才算对
/// 4. 以上都不满足：错误
pub fn check_answer(
    user_input: &str,
    correct_letter: &str,
    correct_text: &str,
    options: &Options,
) -> bool {
    let input = user_input.trim();
    let correct_letter = correct_letter.to_uppercase();

    if let Some(letter) = single_letter(input, options) {
        return letter.as_str() == correct_letter;
    }

    let input_lower = input.to_lowercase();
    if input_lower == correct_text.to_lowercase() {
        return true;
    }

    options
        .iter()
        .find(|(_, text)| text.to_lowercase() == input_lower)
        .is_some_and(|(letter, _)| letter.as_str() == correct_letter)
}

/// 解析用户选择的是哪一个选项，用于记录作答
pub fn selected_letter(user_input: &str, options: &Options) -> Option<Letter> {
    let input = user_input.trim();
    if let Some(letter) = single_letter(input, options) {
        return Some(letter);
    }

    let input_lower = input.to_lowercase();
    options
        .iter()
        .find(|(_, text)| text.to_lowercase() == input_lower)
        .map(|(letter, _)| letter)
}

/// 一个字符且对应已有选项时视为字母选择
fn single_letter(input: &str, options: &Options) -> Option<Letter> {
    Letter::from_input(input).filter(|letter| options.contains(*letter))
}
