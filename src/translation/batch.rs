/*!
 * Block encoding and response reassembly.
 *
 * Subtitle entries are grouped into fixed-size blocks, rendered into a single
 * prompt body with `[<index>]` markers, and the model's free-text reply is
 * sliced back into per-entry translations using those markers.
 */

use log::warn;

use crate::subtitle_processor::SubtitleEntry;
use super::formatting::LineWrapper;

/// Fallback text applied to an entry when its block's response yields fewer
/// translations than entries.
pub const TRANSLATION_ERROR_PLACEHOLDER: &str = "Translation Error";

/// Partition entries into contiguous blocks of `block_size`; the last block
/// holds the remainder. The blocks cover every entry exactly once, in order.
pub fn split_into_blocks(entries: &[SubtitleEntry], block_size: usize) -> Vec<&[SubtitleEntry]> {
    entries.chunks(block_size.max(1)).collect()
}

/// Number of blocks a document of `entry_count` entries yields at `block_size`.
pub fn total_blocks(entry_count: usize, block_size: usize) -> usize {
    entry_count.div_ceil(block_size.max(1))
}

/// Render one block as a prompt body: one line per entry, each line the
/// literal pattern `[<index>] <text>` with internal newlines replaced by
/// spaces. The index is the entry's own stable sequence number.
pub fn encode_block(block: &[SubtitleEntry]) -> String {
    block
        .iter()
        .map(|entry| format!("[{}] {}", entry.seq_num, entry.text.replace('\n', " ")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Slice a raw model response into per-entry translated strings.
///
/// Lines are taken in response order, blank lines dropped. Each line loses
/// its leading `[<index>] ` marker: everything after the first `]` and one
/// separating space. A line that carries no `]` at all is passed through
/// whole rather than discarded — the positional pairing in
/// [`apply_translations`] still lines it up with an entry.
pub fn parse_block_response(response: &str) -> Vec<String> {
    response
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| match line.find(']') {
            Some(pos) => {
                let after = &line[pos + 1..];
                after.strip_prefix(' ').unwrap_or(after).to_string()
            }
            None => line.trim().to_string(),
        })
        .collect()
}

/// Write parsed translations back into a block's entries, positionally.
///
/// Each translation replaces the paired entry's text, re-wrapped when
/// `max_line_length` is greater than zero. Entries beyond the parsed list
/// receive [`TRANSLATION_ERROR_PLACEHOLDER`] and the run continues. Returns
/// how many entries fell back to the placeholder.
pub fn apply_translations(
    block: &mut [SubtitleEntry],
    translations: &[String],
    max_line_length: usize,
) -> usize {
    let mut shortfall = 0;

    for (i, entry) in block.iter_mut().enumerate() {
        match translations.get(i) {
            Some(translated) => {
                entry.text = if max_line_length > 0 {
                    LineWrapper::wrap_to_text(translated, max_line_length)
                } else {
                    translated.clone()
                };
            }
            None => {
                warn!(
                    "No translation returned for entry {}, using placeholder",
                    entry.seq_num
                );
                entry.text = TRANSLATION_ERROR_PLACEHOLDER.to_string();
                shortfall += 1;
            }
        }
    }

    shortfall
}
