//! Boxed text layout
//!
//! Two flavours of boxes:
//! - filled boxes ([`render_box`]): every line is right-padded to a shared
//!   width and colorized, so a background color draws a solid banner;
//! - bordered boxes ([`bordered_box`]): content centered inside Unicode
//!   box-drawing borders.
//!
//! Widths are measured with [`display_width`], so wide glyphs, emoji and
//! embedded ANSI sequences pad correctly.

use crate::color::Colorizer;
use crate::width::display_width;
use once_cell::sync::Lazy;
use regex::Regex;

/// Banner width used whenever content is narrow enough.
pub const MIN_BOX_WIDTH: usize = 80;

/// Margin kept to the right of the widest line once content outgrows the
/// minimum width.
pub const BOX_MARGIN: usize = 2;

/// Line that receives the logo compensation space (see [`BoxOptions`]).
pub const EXTRA_PADDING_LINE: usize = 2;

const BORDER_PADDING_COLUMNS: usize = 3;
const BORDER_MARGIN_COLUMNS: usize = 3;

static LEADING_NEWLINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A\n+").expect("Leading newline regex should be valid"));
static TRAILING_BLANK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n+\s*\z").expect("Trailing blank regex should be valid"));

/// Layout switches for a filled box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxOptions {
    /// Surround the content with one blank line above and below
    pub padding: bool,
    /// Append a single space to line index 2 only.
    ///
    /// Title boxes set this for logos that measure two columns and two code
    /// points, which some terminals draw one column short.
    pub extra_padding: bool,
}

impl Default for BoxOptions {
    fn default() -> Self {
        Self {
            padding: true,
            extra_padding: false,
        }
    }
}

/// Target width for a box whose widest line is `max` columns.
pub fn pad_width(max: usize) -> usize {
    if max < MIN_BOX_WIDTH - 1 {
        MIN_BOX_WIDTH
    } else {
        max + BOX_MARGIN
    }
}

/// Right-pad `line` with spaces up to `width` display columns.
///
/// Lines already at or past `width` are returned unchanged.
pub fn pad_end(line: &str, width: usize) -> String {
    let current = display_width(line);
    let mut padded = String::with_capacity(line.len() + width.saturating_sub(current));
    padded.push_str(line);
    padded.push_str(&" ".repeat(width.saturating_sub(current)));
    padded
}

/// Drop leading newlines and a trailing run of blank lines.
pub fn trim_blank_edges(content: &str) -> String {
    let content = LEADING_NEWLINES.replace(content, "");
    TRAILING_BLANK.replace(&content, "").into_owned()
}

/// Compute the padded, uncolored lines of a filled box.
///
/// `content` is expected to be cleaned already (dedented and indented).
///
/// ```
/// use termkit_core::text::boxing::{layout_box, BoxOptions};
///
/// let lines = layout_box("  hello", BoxOptions::default());
/// assert_eq!(lines.len(), 3);
/// assert!(lines.iter().all(|line| line.len() == 80));
/// ```
pub fn layout_box(content: &str, options: BoxOptions) -> Vec<String> {
    let trimmed = trim_blank_edges(content);
    let lines: Vec<&str> = trimmed.split('\n').collect();
    layout_lines(&lines, options)
}

/// Pad prepared lines to a shared width, without any trimming.
pub fn layout_lines<S: AsRef<str>>(lines: &[S], options: BoxOptions) -> Vec<String> {
    let mut rows: Vec<&str> = Vec::with_capacity(lines.len() + 2);
    if options.padding {
        rows.push("");
    }
    rows.extend(lines.iter().map(AsRef::as_ref));
    if options.padding {
        rows.push("");
    }

    let max = rows.iter().map(|line| display_width(line)).max().unwrap_or(0);
    let width = pad_width(max);

    rows.iter()
        .enumerate()
        .map(|(index, line)| {
            let mut padded = pad_end(line, width);
            if options.extra_padding && index == EXTRA_PADDING_LINE {
                padded.push(' ');
            }
            padded
        })
        .collect()
}

/// Lay out and colorize a filled box, one colorizer call per line.
pub fn render_box(content: &str, colorizer: &dyn Colorizer, options: BoxOptions) -> String {
    render_lines(&layout_box(content, options), colorizer)
}

/// Colorize laid-out lines one by one and join them.
pub fn render_lines<S: AsRef<str>>(lines: &[S], colorizer: &dyn Colorizer) -> String {
    lines
        .iter()
        .map(|line| colorizer.colorize(line.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Center `text` in a bordered box.
///
/// Each content line is colorized with `text`, borders with `border`. The
/// box has one blank row and three columns of inner padding, and one blank
/// line above and below plus three columns of left margin.
pub fn bordered_box(content: &str, text: &dyn Colorizer, border: &dyn Colorizer) -> String {
    let lines: Vec<&str> = if content.is_empty() {
        vec![""]
    } else {
        content.lines().collect()
    };
    let content_width = lines.iter().map(|line| display_width(line)).max().unwrap_or(0);
    let inner_width = content_width + BORDER_PADDING_COLUMNS * 2;

    let margin = " ".repeat(BORDER_MARGIN_COLUMNS);
    let side_padding = " ".repeat(BORDER_PADDING_COLUMNS);
    let horizontal = "─".repeat(inner_width);
    let blank_row = format!(
        "{margin}{}{}{}",
        border.colorize("│"),
        " ".repeat(inner_width),
        border.colorize("│")
    );

    let mut result = vec![
        String::new(),
        format!("{margin}{}", border.colorize(&format!("┌{horizontal}┐"))),
        blank_row.clone(),
    ];

    for line in lines {
        let free = content_width - display_width(line);
        let left = free / 2;
        let right = free - left;
        result.push(format!(
            "{margin}{}{side_padding}{}{}{}{side_padding}{}",
            border.colorize("│"),
            " ".repeat(left),
            text.colorize(line),
            " ".repeat(right),
            border.colorize("│")
        ));
    }

    result.push(blank_row);
    result.push(format!("{margin}{}", border.colorize(&format!("└{horizontal}┘"))));
    result.push(String::new());
    result.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Plain;

    #[test]
    fn pad_width_has_a_stable_minimum() {
        assert_eq!(pad_width(0), 80);
        assert_eq!(pad_width(5), 80);
        assert_eq!(pad_width(78), 80);
        assert_eq!(pad_width(79), 81);
        assert_eq!(pad_width(120), 122);
    }

    #[test]
    fn pad_end_never_truncates() {
        assert_eq!(pad_end("abc", 5), "abc  ");
        assert_eq!(pad_end("abcdef", 3), "abcdef");
        assert_eq!(display_width(&pad_end("🦊", 4)), 4);
    }

    #[test]
    fn trims_blank_edges() {
        assert_eq!(trim_blank_edges("\n\nhello\n\n  \n"), "hello");
        assert_eq!(trim_blank_edges("hello  \n  "), "hello  ");
        assert_eq!(trim_blank_edges("a\n\nb"), "a\n\nb");
    }

    #[test]
    fn padded_box_has_blank_first_and_last_lines() {
        let lines = layout_box("  hello", BoxOptions::default());
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], " ".repeat(80));
        assert_eq!(lines[1], format!("  hello{}", " ".repeat(73)));
        assert_eq!(lines[2], " ".repeat(80));
    }

    #[test]
    fn unpadded_box_keeps_only_content() {
        let options = BoxOptions {
            padding: false,
            extra_padding: false,
        };
        let lines = layout_box("one\ntwo", options);
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|line| display_width(line) == 80));
    }

    #[test]
    fn wide_content_grows_the_box() {
        let long = "x".repeat(100);
        let lines = layout_box(&long, BoxOptions::default());
        assert!(lines.iter().all(|line| display_width(line) == 102));
    }

    #[test]
    fn extra_padding_only_touches_line_two() {
        let options = BoxOptions {
            padding: true,
            extra_padding: true,
        };
        let lines = layout_box("a\nb\nc", options);
        let widths: Vec<usize> = lines.iter().map(|line| display_width(line)).collect();
        assert_eq!(widths, vec![80, 80, 81, 80, 80]);
    }

    #[test]
    fn prepared_lines_keep_blank_edges() {
        let lines = layout_lines(&["   ", "body", "   "], BoxOptions::default());
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn render_colorizes_each_line() {
        let bracket = |line: &str| format!("[{line}]");
        let rendered = render_box("hi", &bracket, BoxOptions::default());
        let lines: Vec<&str> = rendered.split('\n').collect();
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|line| line.starts_with('[') && line.ends_with(']')));
    }

    #[test]
    fn bordered_box_centers_content() {
        let result = bordered_box("Hi\nHello", &Plain, &Plain);
        let lines: Vec<&str> = result.split('\n').collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "   ┌───────────┐");
        assert_eq!(lines[2], "   │           │");
        assert_eq!(lines[3], "   │    Hi     │");
        assert_eq!(lines[4], "   │   Hello   │");
        assert_eq!(lines[6], "   └───────────┘");
        assert_eq!(lines[7], "");
    }

    #[test]
    fn bordered_box_handles_empty_content() {
        let result = bordered_box("", &Plain, &Plain);
        assert!(result.contains("┌──────┐"));
        assert_eq!(result.split('\n').count(), 7);
    }
}
