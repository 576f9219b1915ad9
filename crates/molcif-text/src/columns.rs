#![forbid(unsafe_code)]

//! Columns built directly from token boundaries.
//!
//! This is the bridge between the tokenizer and the columnar layer: a grammar
//! parser records one token per field row, then materializes the whole field
//! as a typed column in a single pass through the shared text buffer.

use crate::number;
use crate::tokenizer::Tokens;
use molcif_columnar::Column;
use std::sync::Arc;

/// An int column with one row per token, parsed with the best-effort decimal
/// scanner (placeholders like `.` and `?` become zero).
pub fn token_column_int(tokens: &Tokens) -> Column {
    let bytes = tokens.data().as_bytes();
    let values = (0..tokens.count())
        .map(|i| {
            let (start, end) = tokens.range(i);
            number::parse_int(bytes, start, end)
        })
        .collect();
    Column::of_int_array(values)
}

/// A float column with one row per token; same best-effort policy as
/// [`token_column_int`].
pub fn token_column_float(tokens: &Tokens) -> Column {
    let bytes = tokens.data().as_bytes();
    let values = (0..tokens.count())
        .map(|i| {
            let (start, end) = tokens.range(i);
            number::parse_float(bytes, start, end)
        })
        .collect();
    Column::of_float_array(values)
}

/// A string column with one row per token, sharing no storage with the text
/// buffer beyond the copy into each row's slice.
pub fn token_column_str(tokens: &Tokens) -> Column {
    let values: Vec<Arc<str>> = (0..tokens.count())
        .map(|i| Arc::from(tokens.text(i)))
        .collect();
    Column::of_str_array(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::{TokenBuilder, Tokenizer};
    use molcif_columnar::ScalarType;

    fn tokenize_values(input: &str) -> Tokens {
        let mut t = Tokenizer::new(input);
        let mut b = TokenBuilder::with_capacity(8);
        loop {
            t.skip_whitespace();
            if t.at_end() {
                break;
            }
            t.mark_start();
            t.eat_value();
            b.add(t.token_start() as u32, t.token_end() as u32);
        }
        b.build(t.data().clone())
    }

    #[test]
    fn token_columns_parse_each_token_slice() {
        let tokens = tokenize_values("1 -2.5 ?\n42");
        assert_eq!(tokens.count(), 4);

        let ints = token_column_int(&tokens);
        assert_eq!(*ints.to_int_array(), vec![1, -2, 0, 42]);

        let floats = token_column_float(&tokens);
        assert_eq!(*floats.to_float_array(), vec![1.0, -2.5, 0.0, 42.0]);

        let strs = token_column_str(&tokens);
        assert_eq!(strs.ty(), ScalarType::Str);
        assert_eq!(&*strs.str(1), "-2.5");
        assert_eq!(&*strs.str(2), "?");
    }
}
