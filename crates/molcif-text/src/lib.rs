//! Streaming text tokenizer for columnar scientific file formats (CIF-like).
//!
//! This crate provides the low-level scanning layer a grammar parser sits on
//! top of:
//! - [`Tokenizer`]: a mutable scan cursor over an in-memory buffer with exact
//!   whitespace, quoting-padding, and line-accounting semantics.
//! - [`TokenBuilder`] / [`Tokens`]: amortized-growth recording of
//!   `(start, end)` token boundary pairs without per-token allocation.
//! - [`number`]: best-effort ASCII number parsing for the tokenizer hot path.
//! - [`columns`]: construction of `molcif-columnar` columns directly from
//!   token boundaries.
//!
//! All scanning is synchronous and allocation-free; malformed *syntax* is
//! never an error at this layer — interpreting token streams is the grammar
//! layer's job.

#![forbid(unsafe_code)]

pub mod columns;
pub mod number;
mod tokenizer;

pub use crate::tokenizer::{trim_str, TokenBuilder, Tokenizer, Tokens};
