//! Block dedent and re-indent
//!
//! Text blocks written inline in source code usually carry the indentation of
//! the code around them. [`clean_up`] strips the indentation common to every
//! non-blank line, re-indents with the theme's indent and expands tabs.

/// Dedent `text`, indent each non-blank line by `indent` spaces, and turn
/// tabs into two spaces.
///
/// Blank lines stay blank: lines made only of whitespace come out empty.
///
/// ```
/// use termkit_core::text::clean::clean_up;
///
/// let block = "\n\t\tfirst\n\t\t\tsecond\n";
/// assert_eq!(clean_up(block, 2), "\n  first\n    second\n");
/// ```
pub fn clean_up(text: &str, indent: usize) -> String {
    let dedented = dedent(text);
    let prefix = " ".repeat(indent);

    dedented
        .split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
        .replace('\t', "  ")
}

/// Remove the leading whitespace shared by every non-blank line.
///
/// Spaces and tabs both count as one column of indentation here.
pub fn dedent(text: &str) -> String {
    let common = text
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(leading_whitespace)
        .min()
        .unwrap_or(0);

    text.split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                ""
            } else {
                // leading whitespace is ASCII, so byte and char offsets agree
                &line[common..]
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn leading_whitespace(line: &str) -> usize {
    line.bytes().take_while(|b| *b == b' ' || *b == b'\t').count()
}
