//! Logging setup exercised alongside rendering: diagnostics never reach the
//! terminal's output sink.

mod common;

use common::capture_terminal;
use termkit_core::logging;
use termkit_core::ThemeUpdate;

#[test]
fn debug_logging_does_not_leak_into_output() {
    logging::init(Some("json"), Some("debug")).expect("Logging should initialize");
    assert!(logging::is_initialized());

    let (mut term, buffer) = capture_terminal();
    term.set_theme(&ThemeUpdate::new().indent(0)).unwrap();
    term.echo("only this").unwrap();

    assert_eq!(buffer.text(), "only this\n");
}
