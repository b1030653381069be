/*!
 * Line wrapping for translated text.
 *
 * Subtitle lines are re-wrapped after translation so no display line exceeds
 * the configured width. Words are never split: a word longer than the width
 * occupies its own line, unexpanded.
 */

/// Greedy word wrapper for subtitle display lines
pub struct LineWrapper;

impl LineWrapper {
    /// Wrap text into lines not exceeding `max_line_length` characters.
    ///
    /// Packing is greedy: a word joins the current line when it fits together
    /// with a separating space, otherwise it starts a new line. Joining the
    /// returned lines with single spaces reproduces the original word
    /// sequence. A width of 0 passes the text through unchanged.
    pub fn wrap(text: &str, max_line_length: usize) -> Vec<String> {
        if max_line_length == 0 {
            return vec![text.to_string()];
        }

        let mut lines = Vec::new();
        let mut current_line = String::new();
        let mut current_len = 0;

        for word in text.split_whitespace() {
            let word_len = word.chars().count();

            if current_line.is_empty() {
                current_line.push_str(word);
                current_len = word_len;
            } else if current_len + 1 + word_len <= max_line_length {
                current_line.push(' ');
                current_line.push_str(word);
                current_len += 1 + word_len;
            } else {
                lines.push(std::mem::take(&mut current_line));
                current_line.push_str(word);
                current_len = word_len;
            }
        }

        if !current_line.is_empty() {
            lines.push(current_line);
        }

        lines
    }

    /// Wrap text and rejoin the lines with '\n' for storage in an entry.
    pub fn wrap_to_text(text: &str, max_line_length: usize) -> String {
        Self::wrap(text, max_line_length).join("\n")
    }
}
