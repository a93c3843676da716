//! Rendering tests for the terminal facility: boxes, title/completion
//! pairs and theme isolation.

mod common;

use common::capture_terminal;
use termkit_core::color::Plain;
use termkit_core::text::boxing::BoxOptions;
use termkit_core::width::display_width;
use termkit_core::ThemeUpdate;

#[test]
fn box_with_identity_colorizer_is_three_lines_of_eighty() {
    let (mut term, buffer) = capture_terminal();
    term.boxed("hello", &Plain, BoxOptions::default()).unwrap();

    let lines = buffer.lines();
    // spacer, three box lines, spacer, end of output
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "");
    assert_eq!(lines[1], " ".repeat(80));
    assert_eq!(lines[2], format!("  hello{}", " ".repeat(73)));
    assert_eq!(lines[3], " ".repeat(80));
    assert_eq!(lines[4], "");
}

#[test]
fn box_strips_blank_edges_and_dedents() {
    let (mut term, buffer) = capture_terminal();
    term.boxed(
        "\n\n\t\t\tfirst\n\t\t\t\tsecond\n\n\t\t",
        &Plain,
        BoxOptions {
            padding: false,
            extra_padding: false,
        },
    )
    .unwrap();

    let lines = buffer.lines();
    assert_eq!(lines[1].trim_end(), "  first");
    assert_eq!(lines[2].trim_end(), "    second");
    assert_eq!(lines[3], "");
}

#[test]
fn wide_content_grows_every_line() {
    let (mut term, buffer) = capture_terminal();
    let long = "y".repeat(90);
    term.info_box(&format!("short\n{long}")).unwrap();

    let lines = buffer.lines();
    for line in &lines[1..5] {
        assert_eq!(display_width(line), 94);
    }
}

#[test]
fn status_boxes_share_the_layout() {
    let (mut term, buffer) = capture_terminal();
    term.confirmation_box("ok")
        .unwrap()
        .warning_box("careful")
        .unwrap()
        .error_box("broken")
        .unwrap();

    let text = buffer.text();
    for word in ["ok", "careful", "broken"] {
        assert!(text.contains(&format!("  {word}")), "{word}");
    }
    let box_lines = buffer
        .lines()
        .into_iter()
        .filter(|line| !line.is_empty())
        .count();
    assert_eq!(box_lines, 9);
}

#[test]
fn title_box_places_the_logo_in_a_plain_gutter() {
    let (mut term, buffer) = capture_terminal();
    term.title_box("Deploy").unwrap();

    let lines = buffer.lines();
    assert_eq!(lines.len(), 8);
    assert_eq!(lines[3].trim_end(), "     •      Deploy");
    for line in &lines[1..6] {
        assert_eq!(display_width(line), 80);
    }
}

#[test]
fn multi_line_title_pads_every_row() {
    let (mut term, buffer) = capture_terminal();
    term.title_box("Deploy\nsecond\tstep").unwrap();

    let lines = buffer.lines();
    // spacer, padding, gutter, logo line, continuation, gutter, padding, spacer, end
    assert_eq!(lines.len(), 9);
    assert_eq!(lines[3].trim_end(), "     •      Deploy");
    assert_eq!(lines[4].trim_end(), format!("{}second  step", " ".repeat(12)));
    for line in &lines[1..7] {
        assert_eq!(display_width(line), 80);
    }
}

#[test]
fn wide_single_codepoint_logo_needs_no_compensation() {
    let (mut term, buffer) = capture_terminal();
    term.set_theme(&ThemeUpdate::new().logo("🦊")).unwrap();
    term.title_box("Fox").unwrap();

    let lines = buffer.lines();
    assert_eq!(lines[3].trim_end(), "     🦊     Fox");
    let widths: Vec<usize> = lines[1..6].iter().map(|l| display_width(l)).collect();
    assert_eq!(widths, vec![80; 5]);
}

#[test]
fn two_codepoint_logo_gets_the_extra_column() {
    let (mut term, buffer) = capture_terminal();
    term.set_theme(&ThemeUpdate::new().logo("❤\u{FE0F}")).unwrap();
    term.title_box("Love").unwrap();

    let lines = buffer.lines();
    let widths: Vec<usize> = lines[1..6].iter().map(|l| display_width(l)).collect();
    assert_eq!(widths, vec![80, 80, 81, 80, 80]);
}

#[test]
fn completion_box_reports_elapsed_time_after_a_title() {
    let (mut term, buffer) = capture_terminal();
    term.title_box("Build").unwrap();
    std::thread::sleep(std::time::Duration::from_millis(10));
    term.completion_box(true).unwrap();

    let text = buffer.text();
    assert!(text.contains("✔  Completed after "));
    assert!(text.contains("ms"));
}

#[test]
fn bordered_box_uses_theme_colors_only_for_paint() {
    let (mut term, buffer) = capture_terminal();
    term.set_theme(&ThemeUpdate::new().border_color("#00ff00"))
        .unwrap()
        .bordered_box("Hi")
        .unwrap();

    let lines = buffer.lines();
    assert_eq!(lines[1], "   ┌────────┐");
    assert_eq!(lines[3], "   │   Hi   │");
    assert_eq!(lines[5], "   └────────┘");
}

#[test]
fn terminals_do_not_share_themes() {
    let (mut first, _) = capture_terminal();
    let (second, _) = capture_terminal();

    first
        .set_theme(&ThemeUpdate::new().indent(6).language("fr"))
        .unwrap();
    assert_eq!(first.theme().indent, 6);
    assert_eq!(second.theme().indent, 2);
    assert_eq!(second.translate("completed"), "Completed");
}

#[test]
fn theme_snapshot_is_detached() {
    let (mut term, _) = capture_terminal();
    let mut snapshot = term.theme();
    snapshot.indent = 10;
    assert_eq!(term.theme().indent, 2);

    term.set_theme(&ThemeUpdate::new().indent(3)).unwrap();
    assert_eq!(snapshot.indent, 10);
}

#[test]
fn invalid_theme_values_name_their_field() {
    let (mut term, _) = capture_terminal();
    let cases = [
        (ThemeUpdate::new().indent(-1), "indent"),
        (ThemeUpdate::new().text_color("blu"), "textColor"),
        (ThemeUpdate::new().background_color("#12345"), "backgroundColor"),
        (ThemeUpdate::new().spinner_color("#ffffff"), "spinnerColor"),
        (ThemeUpdate::new().language("de"), "language"),
    ];
    for (update, field) in cases {
        let err = term.set_theme(&update).unwrap_err();
        assert!(err.to_string().contains(field), "{err}");
    }
}

#[test]
fn hex_text_color_renders_as_truecolor() {
    let (mut term, _) = capture_terminal();
    term.set_theme(&ThemeUpdate::new().text_color("#ff8800"))
        .unwrap();
    let painted = term.text_paint().render("x");
    assert!(painted.contains("38;2;255;136;0"));
}
