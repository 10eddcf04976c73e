pub const WRAP_CHARS_PER_LINE: usize = 30;
pub const WRAP_MAX_LINES: usize = 3;

/// Break a comment into at most three 30-character display lines, appending
/// an ellipsis when text is cut off. Operates on characters, not bytes, so
/// multi-byte comments never split mid-character.
pub fn wrap_comment(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut lines: Vec<String> = Vec::new();

    for start in (0..chars.len()).step_by(WRAP_CHARS_PER_LINE) {
        if lines.len() == WRAP_MAX_LINES {
            if let Some(last) = lines.last_mut() {
                last.push_str("...");
            }
            break;
        }
        let end = (start + WRAP_CHARS_PER_LINE).min(chars.len());
        lines.push(chars[start..end].iter().collect());
    }

    lines
}
