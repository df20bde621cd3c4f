/// Marks after which the next word starts a new sentence.
pub const SENTENCE_TERMINATORS: &[char] = &['.', '?', '!', '。', '।'];

pub fn starts_sentence(previous_last: Option<char>) -> bool {
    previous_last.is_some_and(|ch| SENTENCE_TERMINATORS.contains(&ch))
}

/// Uppercases a leading ASCII letter; other scripts are left alone.
pub fn capitalize_first_letter(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => {
            let mut out = String::with_capacity(word.len());
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
            out
        }
        _ => word.to_string(),
    }
}
