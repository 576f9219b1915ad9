#![forbid(unsafe_code)]

use std::sync::Arc;

/// A mutable scan cursor over an in-memory text buffer.
///
/// The tokenizer is a single concrete state record, mutated in place by every
/// primitive; it is created once per input buffer and discarded after the
/// owning parse completes. It is not safe for concurrent mutation — callers
/// needing parallelism partition the input and run one tokenizer per region.
///
/// After any primitive completes the state satisfies
/// `token_start <= token_end <= position <= len`.
///
/// Scanning is byte-wise: every delimiter this layer cares about (space, tab,
/// `\r`, `\n`) is ASCII, so token boundaries always fall on character
/// boundaries even in buffers containing multi-byte text.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    data: Arc<str>,
    position: usize,
    length: usize,
    current_line_number: usize,
    current_token_start: usize,
    current_token_end: usize,
}

impl Tokenizer {
    pub fn new(data: impl Into<Arc<str>>) -> Tokenizer {
        let data = data.into();
        let length = data.len();
        Tokenizer {
            data,
            position: 0,
            length,
            current_line_number: 1,
            current_token_start: 0,
            current_token_end: 0,
        }
    }

    /// The full input buffer, shared with any [`Tokens`] produced from it.
    pub fn data(&self) -> &Arc<str> {
        &self.data
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn at_end(&self) -> bool {
        self.position >= self.length
    }

    /// 1-based line number of the current position.
    pub fn line_number(&self) -> usize {
        self.current_line_number
    }

    /// Start offset of the most recently marked token.
    pub fn token_start(&self) -> usize {
        self.current_token_start
    }

    /// End offset (exclusive) of the most recently marked token.
    pub fn token_end(&self) -> usize {
        self.current_token_end
    }

    /// The substring of the most recently marked token.
    pub fn token_str(&self) -> &str {
        &self.data[self.current_token_start..self.current_token_end]
    }

    /// Set the current token start to the current position.
    pub fn mark_start(&mut self) {
        self.current_token_start = self.position;
    }

    /// Eat everything until a line terminator occurs, consuming the
    /// terminator (`\r\n` counts as one) and incrementing the line number
    /// exactly once. The token end is set to the offset before the
    /// terminator; at end of buffer with no terminator it is set to the
    /// buffer end.
    pub fn eat_line(&mut self) {
        let bytes = self.data.as_bytes();
        while self.position < self.length {
            match bytes[self.position] {
                b'\n' => {
                    self.current_token_end = self.position;
                    self.position += 1;
                    self.current_line_number += 1;
                    return;
                }
                b'\r' => {
                    self.current_token_end = self.position;
                    self.position += 1;
                    self.current_line_number += 1;
                    if self.position < self.length && bytes[self.position] == b'\n' {
                        self.position += 1;
                    }
                    return;
                }
                _ => self.position += 1,
            }
        }
        self.current_token_end = self.position;
    }

    /// Mark the token start at the current position, then eat the line.
    pub fn mark_line(&mut self) {
        self.current_token_start = self.position;
        self.eat_line();
    }

    /// Mark a full-line token and return its text.
    pub fn read_line(&mut self) -> &str {
        self.mark_line();
        self.token_str()
    }

    /// Advance by `count` lines, recording each line's boundaries.
    ///
    /// The builder is sized exactly (`2 * count` slots), so the hot loop uses
    /// the unchecked append. Lines past the end of the buffer come back as
    /// empty tokens at the buffer end.
    pub fn read_lines(&mut self, count: usize) -> Tokens {
        let mut lines = TokenBuilder::with_capacity(2 * count);
        for _ in 0..count {
            self.mark_line();
            lines.add_unchecked(self.current_token_start as u32, self.current_token_end as u32);
        }
        lines.build(self.data.clone())
    }

    /// Eat everything until whitespace (space, tab, `\r`, `\n`) or end of
    /// buffer; the delimiter itself is not consumed.
    pub fn eat_value(&mut self) {
        let bytes = self.data.as_bytes();
        while self.position < self.length {
            match bytes[self.position] {
                b'\t' | b'\n' | b'\r' | b' ' => {
                    self.current_token_end = self.position;
                    return;
                }
                _ => self.position += 1,
            }
        }
        self.current_token_end = self.position;
    }

    /// Skip any run of space/tab/newline characters, counting lines (`\r\n`
    /// increments once — the previous byte is tracked across the run).
    ///
    /// Returns the last whitespace byte seen, or `b'\n'` if none was
    /// consumed; callers use this to detect that a token sits at the start of
    /// a line.
    pub fn skip_whitespace(&mut self) -> u8 {
        let bytes = self.data.as_bytes();
        let mut prev = b'\n';
        while self.position < self.length {
            let c = bytes[self.position];
            match c {
                b'\t' | b' ' => {
                    prev = c;
                    self.position += 1;
                }
                b'\n' => {
                    if prev != b'\r' {
                        self.current_line_number += 1;
                    }
                    prev = c;
                    self.position += 1;
                }
                b'\r' => {
                    prev = c;
                    self.position += 1;
                    self.current_line_number += 1;
                }
                _ => return prev,
            }
        }
        prev
    }

    /// Narrow the raw range `[start, end)` by skipping leading and trailing
    /// spaces/tabs (never newlines), store the narrowed bounds as the current
    /// token, and advance the position to the original, un-narrowed `end`.
    ///
    /// This consumes a fixed-width or delimited field while discarding
    /// incidental padding.
    pub fn trim(&mut self, start: usize, end: usize) {
        let (s, e) = trim_range(self.data.as_bytes(), start, end);
        self.current_token_start = s;
        self.current_token_end = e;
        self.position = end;
    }
}

/// Trim spaces and tabs off `[start, end)` and return the narrowed substring.
///
/// Same narrowing as [`Tokenizer::trim`], but pure — no position tracking.
pub fn trim_str(data: &str, start: usize, end: usize) -> &str {
    let (s, e) = trim_range(data.as_bytes(), start, end);
    &data[s..e]
}

fn trim_range(bytes: &[u8], start: usize, end: usize) -> (usize, usize) {
    let mut s = start;
    let mut e = end;
    while s < e && matches!(bytes[s], b' ' | b'\t') {
        s += 1;
    }
    while e > s && matches!(bytes[e - 1], b' ' | b'\t') {
        e -= 1;
    }
    (s, e)
}

/// Token boundaries produced in bulk: `count` half-open `(start, end)` byte
/// ranges into a shared text buffer.
///
/// The indices buffer is the builder's own backing store, finalized without a
/// copy; clones of `Tokens` share both the text and the indices.
#[derive(Debug, Clone)]
pub struct Tokens {
    data: Arc<str>,
    count: usize,
    indices: Arc<Vec<u32>>,
}

impl Tokens {
    pub fn data(&self) -> &Arc<str> {
        &self.data
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The flat `(start, end)` pair sequence, `2 * count` entries.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Byte range of token `index`.
    pub fn range(&self, index: usize) -> (usize, usize) {
        (
            self.indices[2 * index] as usize,
            self.indices[2 * index + 1] as usize,
        )
    }

    /// Text of token `index`.
    pub fn text(&self, index: usize) -> &str {
        let (start, end) = self.range(index);
        &self.data[start..end]
    }
}

/// Records `(start, end)` token pairs into a flat integer buffer with
/// amortized growth — no per-token allocation.
///
/// Capacity is in index slots; one token costs two. The builder exclusively
/// owns the buffer until [`TokenBuilder::build`] moves it into a read-only
/// [`Tokens`] value.
#[derive(Debug)]
pub struct TokenBuilder {
    indices: Vec<u32>,
    count: usize,
}

impl TokenBuilder {
    /// Allocate `slots` index slots up front (typically `2 * expected
    /// tokens`).
    pub fn with_capacity(slots: usize) -> TokenBuilder {
        TokenBuilder {
            indices: Vec::with_capacity(slots),
            count: 0,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Checked append: grows the backing buffer by the golden-ratio factor
    /// when the next pair would overflow, preserving all recorded pairs.
    pub fn add(&mut self, start: u32, end: u32) {
        if self.indices.len() + 2 > self.indices.capacity() {
            self.grow();
        }
        self.indices.push(start);
        self.indices.push(end);
        self.count += 1;
    }

    /// Unchecked append: the caller must have proven sufficient pre-allocated
    /// capacity (e.g. an exactly sized builder in [`Tokenizer::read_lines`]).
    ///
    /// Appending past capacity is a contract violation; it panics in debug
    /// builds and degrades to an unplanned reallocation in release builds.
    pub fn add_unchecked(&mut self, start: u32, end: u32) {
        debug_assert!(
            self.indices.len() + 2 <= self.indices.capacity(),
            "token builder capacity exhausted; caller must pre-size"
        );
        self.indices.push(start);
        self.indices.push(end);
        self.count += 1;
    }

    /// Finalize into a read-only [`Tokens`] over `data`. The index buffer is
    /// moved, not copied.
    pub fn build(self, data: Arc<str>) -> Tokens {
        Tokens {
            data,
            count: self.count,
            indices: Arc::new(self.indices),
        }
    }

    fn grow(&mut self) {
        // Golden-ratio factor, floored.
        let cap = self.indices.capacity().max(8);
        let new_cap = (cap as f64 * 1.61) as usize;
        self.indices
            .reserve_exact(new_cap.saturating_sub(self.indices.len()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_growth_preserves_all_pairs() {
        let mut b = TokenBuilder::with_capacity(4);
        for i in 0..100u32 {
            b.add(i, i + 1);
        }
        assert_eq!(b.count(), 100);
        let tokens = b.build(Arc::from(""));
        for i in 0..100usize {
            assert_eq!(tokens.range(i), (i, i + 1));
        }
    }

    #[test]
    fn zero_capacity_builder_still_grows() {
        let mut b = TokenBuilder::with_capacity(0);
        b.add(1, 2);
        b.add(3, 4);
        assert_eq!(b.count(), 2);
    }

    #[test]
    fn trim_str_narrows_spaces_and_tabs_only() {
        let data = " \t abc \t ";
        assert_eq!(trim_str(data, 0, data.len()), "abc");
        assert_eq!(trim_str(data, 0, 2), "");
        // Newlines are not trimmed by this helper.
        let nl = " x\n";
        assert_eq!(trim_str(nl, 0, nl.len()), "x\n");
    }

    #[test]
    fn cursor_invariant_holds_after_every_primitive() {
        let mut t = Tokenizer::new("ab cd\r\nef\n");
        let check = |t: &Tokenizer| {
            assert!(t.token_start() <= t.token_end());
            assert!(t.token_end() <= t.position());
            assert!(t.position() <= t.len());
        };
        t.mark_start();
        t.eat_value();
        check(&t);
        t.skip_whitespace();
        check(&t);
        t.mark_line();
        check(&t);
        t.trim(0, 5);
        check(&t);
        t.read_line();
        check(&t);
    }
}
