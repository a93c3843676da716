//! Shared test helpers for core integration tests.

#![allow(dead_code)]

use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use termkit_core::io::Output;
use termkit_core::Terminal;

/// In-memory writer whose contents stay readable after the terminal took it.
#[derive(Clone, Default)]
pub struct SharedBuffer {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    /// Everything written so far, as written
    pub fn raw(&self) -> String {
        String::from_utf8(self.buffer.lock().unwrap().clone()).unwrap()
    }

    /// Everything written so far, with ANSI sequences removed
    pub fn text(&self) -> String {
        console::strip_ansi_codes(&self.raw()).into_owned()
    }

    /// Output lines, with ANSI sequences removed
    pub fn lines(&self) -> Vec<String> {
        self.text().split('\n').map(str::to_string).collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Terminal writing into a fresh [`SharedBuffer`]
pub fn capture_terminal() -> (Terminal, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let terminal = Terminal::with_output(Output::from_writer(buffer.clone()));
    (terminal, buffer)
}
