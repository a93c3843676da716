//! Text layout helpers for terminal output
//!
//! Dedent/re-indent of text blocks and the layout of filled and bordered
//! boxes. Everything here is pure string manipulation; writing happens in
//! [`crate::terminal`].

pub mod boxing;
pub mod clean;
