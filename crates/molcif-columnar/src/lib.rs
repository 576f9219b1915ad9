//! Columnar data representation for molecular-structure toolkits.
//!
//! This crate focuses on:
//! - A typed, read-only `Column` abstraction over several storage strategies
//!   (constant, array-backed, windowed sub-ranges, permuted views).
//! - Zero-copy slicing: windows and views share the parent column's storage.
//! - Lazy value coercion between numeric and string representations, so a
//!   column parsed from text can be read as numbers without an up-front
//!   conversion pass.
//! - `Table`: a named, ordered collection of equal-length columns with schema
//!   projection and stable row sorting.
//!
//! Columns and tables are immutable value objects after construction and are
//! freely shareable across threads for concurrent reads.

#![forbid(unsafe_code)]

mod column;
mod table;
mod value;

pub use crate::column::Column;
pub use crate::table::{Schema, Table, TableError};
pub use crate::value::{ArrayData, ScalarType, Value};
