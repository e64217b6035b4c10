//! Side-by-side language feature comparison documents.
//!
//! A document is front matter plus an ordered list of topic entries, each
//! pairing a "new syntax" sample with its "old syntax" equivalent. The crate
//! keeps the usual split:
//!
//! - **[`core`]**: Pure logic (entry store, structural invariants, errors).
//!   No I/O, fully testable in isolation.
//! - **[`io`]**: Filesystem-facing parts (markdown parser, JSON loader,
//!   config, output writing).
//!
//! Command modules ([`check`], [`lookup`], [`publish`]) combine the two for
//! the CLI; [`render`] turns a [`document::Document`] into markdown, HTML or
//! JSON.

pub mod check;
pub mod core;
pub mod document;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod lookup;
pub mod publish;
pub mod render;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
