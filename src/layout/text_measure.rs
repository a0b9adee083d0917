//! Text Measurement
//!
//! Utilities for measuring text dimensions in terminal cells.
//!
//! Widths come from `unicode-width`:
//! - ASCII characters: 1 cell
//! - CJK characters and most emoji: 2 cells
//! - Control and zero-width characters: 0 cells

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Display width of a string in terminal cells.
pub fn string_width(s: &str) -> usize {
    s.width()
}

/// Width of the widest whitespace-separated word.
///
/// This is the narrowest a text block can get without breaking words.
pub fn longest_word_width(s: &str) -> usize {
    s.split_whitespace().map(string_width).max().unwrap_or(0)
}

/// Word-wrap text to a given width.
///
/// Breaks at spaces when possible and hard-breaks words wider than `width`.
/// Explicit newlines always start a new line.
///
/// # Arguments
///
/// * `text` - The text to wrap
/// * `width` - Maximum width per line (in cells)
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if text.is_empty() {
        return vec![];
    }

    if width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0usize;

        for word in paragraph.split(' ') {
            let word_width = string_width(word);
            let sep = usize::from(!current.is_empty());

            if current_width + sep + word_width <= width {
                if sep == 1 {
                    current.push(' ');
                }
                current.push_str(word);
                current_width += sep + word_width;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }

            // Hard-break words that cannot fit on a line of their own.
            for c in word.chars() {
                let w = char_width(c);
                if current_width + w > width && !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(c);
                current_width += w;
            }
        }

        lines.push(current);
    }

    lines
}

/// Number of lines `text` occupies when wrapped to `available_width`.
///
/// Returns 0 for empty text.
pub fn measure_text_height(text: &str, available_width: usize) -> usize {
    if text.is_empty() {
        return 0;
    }
    wrap_text(text, available_width).len().max(1)
}

/// Truncate text to fit within a given width, adding an ellipsis.
pub fn truncate_text(text: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }

    if string_width(text) <= width {
        return text.to_string();
    }

    let target_width = width.saturating_sub(1);
    let mut result = String::new();
    let mut current_width = 0usize;

    for c in text.chars() {
        let w = char_width(c);
        if current_width + w > target_width {
            break;
        }
        result.push(c);
        current_width += w;
    }

    result.push('…');
    result
}
