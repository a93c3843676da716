//! Display width measurement
//!
//! Terminal columns are counted per grapheme cluster, not per byte or per
//! `char`: a family emoji made of several code points joined with ZWJ still
//! occupies two columns. ANSI escape sequences are stripped before measuring
//! so already-colorized text pads correctly.

use console::strip_ansi_codes;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

const ZERO_WIDTH_JOINER: char = '\u{200D}';
const EMOJI_PRESENTATION: char = '\u{FE0F}';

/// Number of terminal columns `text` occupies once rendered.
///
/// ```
/// use termkit_core::width::display_width;
///
/// assert_eq!(display_width("hello"), 5);
/// assert_eq!(display_width("日本"), 4);
/// assert_eq!(display_width("\u{1b}[34mhi\u{1b}[0m"), 2);
/// ```
pub fn display_width(text: &str) -> usize {
    let plain = strip_ansi_codes(text);
    if plain.is_ascii() {
        return plain.chars().filter(|c| !c.is_ascii_control()).count();
    }

    plain.graphemes(true).map(grapheme_width).sum()
}

/// Number of code points in `text`, ignoring ANSI escape sequences.
///
/// Used next to [`display_width`] to tell apart glyphs that are visually
/// narrow but encoded as several code points.
pub fn codepoint_count(text: &str) -> usize {
    strip_ansi_codes(text).chars().count()
}

/// Number of grapheme clusters in `text`, ignoring ANSI escape sequences.
pub fn grapheme_count(text: &str) -> usize {
    strip_ansi_codes(text).graphemes(true).count()
}

/// Width of a single grapheme cluster.
pub fn grapheme_width(grapheme: &str) -> usize {
    if grapheme.is_empty() || grapheme.chars().all(|c| c.is_control()) {
        return 0;
    }

    // ZWJ sequences and emoji-presentation selectors render as one wide glyph
    if grapheme.chars().count() > 1
        && grapheme
            .chars()
            .any(|c| c == ZERO_WIDTH_JOINER || c == EMOJI_PRESENTATION)
    {
        return 2;
    }

    // Regional indicator pairs (flags)
    if grapheme.chars().count() == 2 && grapheme.chars().all(is_regional_indicator) {
        return 2;
    }

    // The base character decides; combining marks contribute nothing
    grapheme
        .chars()
        .filter_map(UnicodeWidthChar::width)
        .max()
        .unwrap_or(0)
}

fn is_regional_indicator(c: char) -> bool {
    ('\u{1F1E6}'..='\u{1F1FF}').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_width_equals_char_count() {
        for text in ["", "a", "hello world", "  padded  ", "#!$%&()*+,-./"] {
            assert_eq!(display_width(text), text.chars().count(), "{text:?}");
        }
    }

    #[test]
    fn wide_and_emoji_glyphs() {
        assert_eq!(display_width("中文"), 4);
        assert_eq!(display_width("🦊"), 2);
        assert_eq!(display_width("👨\u{200D}👩\u{200D}👧"), 2);
        assert_eq!(display_width("🇨🇦"), 2);
        assert_eq!(display_width("e\u{301}"), 1);
    }

    #[test]
    fn ansi_sequences_do_not_count() {
        let colored = "\u{1b}[38;2;255;0;0mred\u{1b}[0m";
        assert_eq!(display_width(colored), 3);
        assert_eq!(codepoint_count(colored), 3);
    }

    #[test]
    fn codepoints_differ_from_graphemes() {
        let family = "👨\u{200D}👩\u{200D}👧";
        assert_eq!(codepoint_count(family), 5);
        assert_eq!(grapheme_count(family), 1);

        assert_eq!(codepoint_count("•"), 1);
        assert_eq!(display_width("•"), 1);

        assert_eq!(codepoint_count("🦊"), 1);
        assert_eq!(display_width("🦊"), 2);
    }
}
