//! Turning token boundaries into tokens.
//!
//! The [`Scanner`] reads the tape produced by the [`Indexer`] and yields
//! [`Token`]s. It joins lines continued by parentheses into one logical
//! line, drops blank and comment-only lines, and keeps track of line
//! numbers.
//!
//! The text of a token is borrowed from the input buffer. Because the
//! buffer may be compacted when more data is read, a token has to be dealt
//! with before the next one is requested.

use super::error::Error;
use super::index::{Indexer, Kind};

//------------ TokenKind -----------------------------------------------------

/// The kind of a token.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TokenKind {
    /// A sequence of octets without unescaped delimiters.
    Contiguous,

    /// The content of a quoted string.
    Quoted,

    /// The end of a logical line.
    LineFeed,

    /// The end of the file.
    EndOfFile,
}

//------------ Token ---------------------------------------------------------

/// A token of a zone file.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,

    /// The raw text of the token.
    ///
    /// Escape sequences are not yet resolved. For quoted strings, the
    /// quotes are not included.
    pub text: &'a [u8],

    /// The line the token starts on.
    pub line: usize,

    /// The token is the first of its logical line and starts in the first
    /// column.
    pub at_line_start: bool,
}

impl<'a> Token<'a> {
    /// Returns whether the token ends a logical line.
    pub fn is_line_end(&self) -> bool {
        matches!(self.kind, TokenKind::LineFeed | TokenKind::EndOfFile)
    }

    /// Returns whether this is an unquoted token with exactly this text.
    pub fn is_word(&self, word: &[u8]) -> bool {
        self.kind == TokenKind::Contiguous && self.text == word
    }
}

//------------ Scanner -------------------------------------------------------

/// Produces the tokens of a file.
pub struct Scanner<'a> {
    indexer: Indexer<'a>,

    /// The current line number.
    line: usize,

    /// The line of the most recently returned token.
    token_line: usize,

    /// The absolute offset of the start of the current physical line.
    line_start: usize,

    /// No token has been returned for the current logical line yet.
    line_empty: bool,

    /// The last returned token ended a logical line.
    at_line_end: bool,

    /// A parenthesized group is open.
    in_group: bool,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner reading from the given indexer.
    pub fn new(indexer: Indexer<'a>) -> Self {
        Scanner {
            indexer,
            line: 1,
            token_line: 1,
            line_start: 0,
            line_empty: true,
            at_line_end: true,
            in_group: false,
        }
    }

    /// Returns the line of the most recently returned token.
    pub fn token_line(&self) -> usize {
        self.token_line
    }

    /// Returns the next token.
    ///
    /// Empty logical lines are skipped, so a [`TokenKind::LineFeed`] is
    /// always preceded by at least one other token.
    pub fn next_token(&mut self) -> Result<Token<'_>, Error> {
        loop {
            let entry = match self.indexer.next_entry(usize::MAX)? {
                Some(entry) => entry,
                None => return self.end_of_file(),
            };
            match entry.kind {
                Kind::Start => {
                    let end = self.expect(entry.offset, Kind::End)?;
                    return Ok(self.token(
                        TokenKind::Contiguous,
                        entry.offset,
                        entry.offset,
                        end,
                    ));
                }
                Kind::Quote => {
                    let end = self.expect(entry.offset, Kind::Quote)?;
                    return Ok(self.token(
                        TokenKind::Quoted,
                        entry.offset,
                        entry.offset + 1,
                        end,
                    ));
                }
                Kind::LineFeed => {
                    let line = self.line;
                    self.line += 1;
                    self.line_start = entry.offset + 1;
                    if self.in_group || self.line_empty {
                        continue;
                    }
                    self.line_empty = true;
                    return Ok(self.marker(TokenKind::LineFeed, line));
                }
                Kind::Open => {
                    if self.in_group {
                        self.token_line = self.line;
                        return Err(Error::syntax("nested parentheses"));
                    }
                    self.in_group = true;
                }
                Kind::Close => {
                    if !self.in_group {
                        self.token_line = self.line;
                        return Err(Error::syntax(
                            "closing parenthesis without opening one",
                        ));
                    }
                    self.in_group = false;
                }
                Kind::End => {
                    // Only ever follows a start which is consumed with it.
                    return Err(Error::syntax("malformed token"));
                }
            }
        }
    }

    /// Skips the rest of the current logical line.
    ///
    /// Does nothing if the last token returned already ended the line.
    pub fn skip_line(&mut self) -> Result<(), Error> {
        while !self.at_line_end {
            self.next_token()?;
        }
        Ok(())
    }

    fn end_of_file(&mut self) -> Result<Token<'_>, Error> {
        if self.in_group {
            self.in_group = false;
            self.token_line = self.line;
            return Err(Error::syntax("unbalanced parentheses at end of file"));
        }
        self.line_empty = true;
        Ok(self.marker(TokenKind::EndOfFile, self.line))
    }

    /// Waits for the closing boundary of a token.
    fn expect(&mut self, start: usize, kind: Kind) -> Result<usize, Error> {
        match self.indexer.next_entry(start)? {
            Some(entry) if entry.kind == kind => Ok(entry.offset),
            _ => Err(Error::syntax("malformed token")),
        }
    }

    fn token(
        &mut self,
        kind: TokenKind,
        offset: usize,
        start: usize,
        end: usize,
    ) -> Token<'_> {
        let at_line_start = self.line_empty && offset == self.line_start;
        let line = self.line;
        self.line_empty = false;
        self.at_line_end = false;
        self.token_line = line;
        let text = self.indexer.data(start, end);
        self.line += text.iter().filter(|&&ch| ch == b'\n').count();
        Token {
            kind,
            text,
            line,
            at_line_start,
        }
    }

    fn marker(&mut self, kind: TokenKind, line: usize) -> Token<'static> {
        self.at_line_end = true;
        self.token_line = line;
        Token {
            kind,
            text: b"",
            line,
            at_line_start: false,
        }
    }
}

//============ Tests =========================================================
