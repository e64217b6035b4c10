//! I/O helpers for document commands.

pub mod config;
pub mod document_store;
pub mod output;
pub mod parse;
