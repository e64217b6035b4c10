//! Deterministic, pure logic over in-memory documents.
//!
//! Core modules must be free of I/O side effects.

pub mod error;
pub mod invariants;
pub mod store;
