//! Indexing of token boundaries.
//!
//! The [`Indexer`] owns the input buffer of a file. It reads text from the
//! [`Source`] in windows, runs the classifier over each complete block and
//! records every token boundary on a [`Tape`]. The tape has a fixed
//! capacity. Indexing stops once less than one block’s worth of entries is
//! free and only resumes after the scanner has drained the tape.
//!
//! All offsets on the tape are absolute offsets into the file. Since the
//! buffer is compacted whenever it is refilled, the indexer keeps track of
//! the absolute offset of the first octet still in the buffer.

use super::alloc::Allocator;
use super::classify::{Block, State, BLOCK_SIZE};
use super::error::{Code, Error};
use super::source::Source;
use std::sync::Arc;
use std::{cmp, mem};
use tracing::trace;

//------------ Constants -----------------------------------------------------

/// The maximum number of tape entries a single block can produce.
///
/// Every octet can end a contiguous token and at the same time be a quote,
/// line feed, or parenthesis.
pub const MAX_BLOCK_ENTRIES: usize = 2 * BLOCK_SIZE;

/// The capacity of the tape.
pub const TAPE_CAPACITY: usize = 4 * MAX_BLOCK_ENTRIES;

//------------ Kind ----------------------------------------------------------

/// The kind of a token boundary.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Kind {
    /// The first octet of a contiguous token.
    Start,

    /// The first octet after a contiguous token.
    End,

    /// A quote opening or closing a quoted string.
    Quote,

    /// A line feed outside of quoted strings.
    LineFeed,

    /// An opening parenthesis.
    Open,

    /// A closing parenthesis.
    Close,
}

//------------ Entry ---------------------------------------------------------

/// A token boundary recorded on the tape.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Entry {
    pub kind: Kind,

    /// The absolute offset of the octet.
    pub offset: usize,
}

//------------ Tape ----------------------------------------------------------

/// A bounded queue of token boundaries.
#[derive(Clone, Debug)]
pub struct Tape {
    entries: Vec<Entry>,

    /// The index of the next entry to be read.
    head: usize,
}

impl Tape {
    fn new() -> Self {
        Tape {
            entries: Vec::with_capacity(TAPE_CAPACITY),
            head: 0,
        }
    }

    /// Takes the next entry off the tape.
    pub fn pop(&mut self) -> Option<Entry> {
        let entry = self.entries.get(self.head).copied()?;
        self.head += 1;
        Some(entry)
    }

    /// Returns the number of entries not yet read.
    pub fn len(&self) -> usize {
        self.entries.len() - self.head
    }

    /// Returns whether all entries have been read.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns whether there is room for the entries of another block.
    fn has_room(&self) -> bool {
        TAPE_CAPACITY - self.entries.len() >= MAX_BLOCK_ENTRIES
    }

    /// Moves the unread entries to the front.
    fn compact(&mut self) {
        if self.head > 0 {
            self.entries.drain(..self.head);
            self.head = 0;
        }
    }

    /// Records the boundaries of a block starting at `offset`.
    ///
    /// Only positions in `valid` are considered.
    fn record(&mut self, block: &Block, offset: usize, valid: u64) {
        debug_assert!(self.has_room());
        let mut bits = block.boundaries() & valid;
        while bits != 0 {
            let pos = bits.trailing_zeros();
            let bit = 1u64 << pos;
            bits &= bits - 1;
            let offset = offset + pos as usize;

            // A token ending here comes before the delimiter ending it.
            if block.ends & bit != 0 {
                self.push(Kind::End, offset);
            }
            if block.starts & bit != 0 {
                self.push(Kind::Start, offset);
            }
            if block.quotes & bit != 0 {
                self.push(Kind::Quote, offset);
            }
            if block.line_feeds & bit != 0 {
                self.push(Kind::LineFeed, offset);
            }
            if block.open & bit != 0 {
                self.push(Kind::Open, offset);
            }
            if block.close & bit != 0 {
                self.push(Kind::Close, offset);
            }
        }
    }

    fn push(&mut self, kind: Kind, offset: usize) {
        self.entries.push(Entry { kind, offset })
    }
}

//------------ Indexer -------------------------------------------------------

/// Reads a source and indexes its token boundaries.
pub struct Indexer<'a> {
    source: Box<dyn Source + 'a>,
    allocator: Arc<dyn Allocator>,

    /// The input buffer.
    buf: Vec<u8>,

    /// The absolute offset of the first octet in `buf`.
    base: usize,

    /// The absolute offset of the first octet not yet classified.
    indexed: usize,

    /// The number of octets requested from the source at a time.
    window: usize,

    /// The classifier state at `indexed`.
    state: State,

    tape: Tape,

    /// The source has signalled its end.
    eof: bool,

    /// The final block has been classified.
    finished: bool,

    /// An error to report once the tape has been drained.
    pending: Option<Error>,
}

impl<'a> Indexer<'a> {
    /// Creates a new indexer.
    ///
    /// The `block_size` is both the initial buffer size and the amount of
    /// data requested from the source in one go.
    pub fn new(
        source: Box<dyn Source + 'a>,
        allocator: Arc<dyn Allocator>,
        block_size: usize,
    ) -> Result<Self, Error> {
        let mut buf = Vec::new();
        allocator
            .grow(&mut buf, block_size)
            .map_err(|_| out_of_memory(block_size))?;
        Ok(Indexer {
            source,
            allocator,
            buf,
            base: 0,
            indexed: 0,
            window: block_size,
            state: State::default(),
            tape: Tape::new(),
            eof: false,
            finished: false,
            pending: None,
        })
    }

    /// Returns the data between two absolute offsets.
    ///
    /// The data must still be in the buffer, i.e., `start` must not be
    /// before the offset last passed to [`next_entry`][Self::next_entry] as
    /// the one to keep.
    pub fn data(&self, start: usize, end: usize) -> &[u8] {
        &self.buf[start - self.base..end - self.base]
    }

    /// Returns the next token boundary.
    ///
    /// If more data needs to be read, everything before the absolute offset
    /// `keep` may be discarded. Returns `Ok(None)` once the end of the
    /// source has been reached and all boundaries have been returned.
    ///
    /// Structural errors at the end of the source are only reported after
    /// all boundaries before them have been returned.
    pub fn next_entry(&mut self, keep: usize) -> Result<Option<Entry>, Error> {
        loop {
            if let Some(entry) = self.tape.pop() {
                return Ok(Some(entry));
            }
            if self.finished {
                return match self.pending.take() {
                    Some(err) => Err(err),
                    None => Ok(None),
                };
            }
            self.advance(keep)?;
        }
    }

    /// Puts more entries on the empty tape.
    fn advance(&mut self, keep: usize) -> Result<(), Error> {
        self.tape.compact();
        if self.index_blocks() > 0 {
            return Ok(());
        }
        if !self.eof {
            return self.refill(keep);
        }
        self.finish()
    }

    /// Classifies complete blocks while there is room on the tape.
    fn index_blocks(&mut self) -> usize {
        let mut count = 0;
        let filled = self.base + self.buf.len();
        while self.tape.has_room() && filled - self.indexed >= BLOCK_SIZE {
            let start = self.indexed - self.base;
            let mut input = [0u8; BLOCK_SIZE];
            input.copy_from_slice(&self.buf[start..start + BLOCK_SIZE]);
            let block = Block::classify(&input, &mut self.state);
            self.tape.record(&block, self.indexed, u64::MAX);
            self.indexed += BLOCK_SIZE;
            count += 1;
        }
        if count > 0 {
            trace!(
                blocks = count,
                entries = self.tape.len(),
                offset = self.indexed,
                "indexed"
            );
        }
        count
    }

    /// Classifies the incomplete block at the end of the source.
    fn finish(&mut self) -> Result<(), Error> {
        self.finished = true;
        let start = self.indexed - self.base;
        let remaining = self.buf.len() - start;
        debug_assert!(remaining < BLOCK_SIZE);

        // Blanks end a pending token without adding any boundaries.
        let mut input = [b' '; BLOCK_SIZE];
        input[..remaining].copy_from_slice(&self.buf[start..]);
        let block = Block::classify(&input, &mut self.state);

        let valid = u64::MAX >> (BLOCK_SIZE - 1 - remaining);
        self.tape.record(&block, self.indexed, valid);
        self.indexed += remaining;
        trace!(entries = self.tape.len(), offset = self.indexed, "finished");

        if block.escaped & (1 << remaining) != 0 {
            self.pending = Some(Error::syntax("escape sequence at end of file"));
        } else if self.state.in_quoted {
            self.pending = Some(Error::syntax("unterminated quoted string"));
        }
        Ok(())
    }

    /// Reads more data from the source.
    ///
    /// Everything before `keep` and all classified data not needed anymore
    /// is dropped from the buffer first. If that doesn’t free enough space,
    /// the buffer is grown.
    fn refill(&mut self, keep: usize) -> Result<(), Error> {
        let keep = cmp::min(keep, self.indexed);
        if keep > self.base {
            self.buf.drain(..keep - self.base);
            self.base = keep;
        }
        if self.buf.capacity() - self.buf.len() < BLOCK_SIZE {
            let capacity = cmp::max(
                self.buf.capacity() * 2,
                self.buf.len() + self.window,
            );
            self.allocator
                .grow(&mut self.buf, capacity)
                .map_err(|_| out_of_memory(capacity))?;
            trace!(capacity, "grew input buffer");
        }

        let len = self.buf.len();
        let end = cmp::min(self.buf.capacity(), len + self.window);
        self.buf.resize(end, 0);
        let res = self.source.fill(&mut self.buf[len..end]);
        let read = match res {
            Ok(read) => read,
            Err(err) => {
                self.buf.truncate(len);
                self.finished = true;
                return Err(err.into());
            }
        };
        self.buf.truncate(len + read);
        if read == 0 {
            self.eof = true;
        }
        Ok(())
    }
}

impl<'a> Drop for Indexer<'a> {
    fn drop(&mut self) {
        self.allocator.release(mem::take(&mut self.buf));
    }
}

fn out_of_memory(capacity: usize) -> Error {
    Error::new(
        Code::OutOfMemory,
        format!("cannot allocate input buffer of {} octets", capacity),
    )
}

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::zonefile::alloc::{Bounded, Global};

    fn entries(text: &[u8], block_size: usize) -> Result<Vec<Entry>, Error> {
        let mut indexer =
            Indexer::new(Box::new(text), Arc::new(Global), block_size)?;
        let mut res = Vec::new();
        while let Some(entry) = indexer.next_entry(usize::MAX)? {
            res.push(entry);
        }
        Ok(res)
    }

    fn entry(kind: Kind, offset: usize) -> Entry {
        Entry { kind, offset }
    }

    #[test]
    fn simple_line() {
        assert_eq!(
            entries(b"a \"b\"(\n", 64).unwrap(),
            [
                entry(Kind::Start, 0),
                entry(Kind::End, 1),
                entry(Kind::Quote, 2),
                entry(Kind::Quote, 4),
                entry(Kind::Open, 5),
                entry(Kind::LineFeed, 6),
            ]
        );
    }

    #[test]
    fn token_at_end_of_file() {
        assert_eq!(
            entries(b"ab", 64).unwrap(),
            [entry(Kind::Start, 0), entry(Kind::End, 2)]
        );
        let mut text = vec![b' '; 63];
        text.push(b'x');
        assert_eq!(
            entries(&text, 64).unwrap(),
            [entry(Kind::Start, 63), entry(Kind::End, 64)]
        );
    }

    #[test]
    fn errors_at_end_of_file() {
        assert_eq!(
            entries(b"a \"bc", 64).unwrap_err().code(),
            Code::SyntaxError
        );
        assert_eq!(entries(b"a\\", 64).unwrap_err().code(), Code::SyntaxError);
        let mut text = vec![b' '; 63];
        text.push(b'\\');
        assert_eq!(entries(&text, 64).unwrap_err().code(), Code::SyntaxError);
    }

    #[test]
    fn independent_of_block_size() {
        let mut text = Vec::new();
        for i in 0..200 {
            text.extend_from_slice(
                format!("name{} 3600 IN TXT \"a;b\" ; note {}\n", i, i)
                    .as_bytes(),
            );
        }
        let reference = entries(&text, 64 * 1024).unwrap();
        for size in [64, 128, 192, 4096] {
            assert_eq!(entries(&text, size).unwrap(), reference);
        }
    }

    #[test]
    fn backpressure_keeps_tape_bounded() {
        // Every octet is a boundary.
        let text = b"(\n)".repeat(1000);
        let mut indexer =
            Indexer::new(Box::new(text.as_slice()), Arc::new(Global), 1024)
                .unwrap();
        let mut count = 0;
        while indexer.next_entry(usize::MAX).unwrap().is_some() {
            assert!(indexer.tape.entries.len() <= TAPE_CAPACITY);
            count += 1;
        }
        assert_eq!(count, 3000);
    }

    #[test]
    fn long_token_grows_buffer() {
        let mut text = vec![b'a'; 1000];
        text.push(b'\n');
        let mut indexer =
            Indexer::new(Box::new(text.as_slice()), Arc::new(Global), 64)
                .unwrap();
        let start = indexer.next_entry(usize::MAX).unwrap().unwrap();
        assert_eq!(start, entry(Kind::Start, 0));
        let end = indexer.next_entry(start.offset).unwrap().unwrap();
        assert_eq!(end, entry(Kind::End, 1000));
        assert_eq!(indexer.data(start.offset, end.offset), &text[..1000]);
    }

    #[test]
    fn bounded_allocator_fails() {
        let text = vec![b'a'; 1000];
        let mut indexer = Indexer::new(
            Box::new(text.as_slice()),
            Arc::new(Bounded::new(256)),
            64,
        )
        .unwrap();
        let start = indexer.next_entry(usize::MAX).unwrap().unwrap();
        let err = indexer.next_entry(start.offset).unwrap_err();
        assert_eq!(err.code(), Code::OutOfMemory);
    }
}
