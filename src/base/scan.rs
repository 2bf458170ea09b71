//! Escape sequences inside tokens.
//!
//! The scanner only knows which octets follow a backslash. It leaves the
//! escapes in place and the decoders for names and character strings turn
//! them into octets through [`Symbol`].

use core::fmt;

//------------ Symbol --------------------------------------------------------

/// One octet as written in a zone file.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Symbol {
    /// An unescaped octet.
    Char(u8),

    /// A backslash followed by the octet itself, which must not be a
    /// control character or a digit.
    SimpleEscape(u8),

    /// A backslash followed by exactly three decimal digits.
    DecimalEscape(u8),
}

impl Symbol {
    /// Reads the symbol starting at `pos`.
    ///
    /// Returns the symbol and the index just past it, or `Ok(None)` when
    /// `pos` is the end of `octets`.
    pub fn from_slice_index(
        octets: &[u8],
        pos: usize,
    ) -> Result<Option<(Symbol, usize)>, SymbolError> {
        let rest = match octets.get(pos..) {
            Some(rest) if !rest.is_empty() => rest,
            _ => return Ok(None),
        };
        if rest[0] != b'\\' {
            return Ok(Some((Symbol::Char(rest[0]), pos + 1)));
        }
        match rest.get(1) {
            None => Err(SymbolError::ShortInput),
            Some(ch) if ch.is_ascii_control() => Err(SymbolError::BadEscape),
            Some(&ch) if !ch.is_ascii_digit() => {
                Ok(Some((Symbol::SimpleEscape(ch), pos + 2)))
            }
            Some(_) => {
                let mut value = 0u16;
                for i in 1..4 {
                    match rest.get(i) {
                        None => return Err(SymbolError::ShortInput),
                        Some(ch) if ch.is_ascii_digit() => {
                            value = value * 10 + u16::from(ch - b'0');
                        }
                        Some(_) => return Err(SymbolError::BadEscape),
                    }
                }
                u8::try_from(value)
                    .map(|value| Some((Symbol::DecimalEscape(value), pos + 4)))
                    .map_err(|_| SymbolError::BadEscape)
            }
        }
    }

    /// Returns how to write `ch` inside a quoted string.
    ///
    /// Quotes and backslashes get a backslash, anything not printable ASCII
    /// the decimal form.
    pub fn from_octet(ch: u8) -> Self {
        if ch == b'"' || ch == b'\\' {
            Symbol::SimpleEscape(ch)
        } else if !(0x20..0x7F).contains(&ch) {
            Symbol::DecimalEscape(ch)
        } else {
            Symbol::Char(ch)
        }
    }

    /// Returns how to write `ch` inside a label.
    ///
    /// On top of [`from_octet`][Self::from_octet], octets with a meaning
    /// in unquoted tokens are escaped.
    pub fn from_label_octet(ch: u8) -> Self {
        match ch {
            b'.' | b'(' | b')' | b';' | b' ' | b'@' | b'$' => {
                Symbol::SimpleEscape(ch)
            }
            _ => Self::from_octet(ch),
        }
    }

    /// Returns the octet represented by the symbol.
    pub fn into_octet(self) -> u8 {
        match self {
            Symbol::Char(ch)
            | Symbol::SimpleEscape(ch)
            | Symbol::DecimalEscape(ch) => ch,
        }
    }

    /// Returns whether the symbol is an unescaped version of `ch`.
    pub fn is_char(self, ch: u8) -> bool {
        self == Symbol::Char(ch)
    }
}

//--- Display

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Symbol::Char(ch) => write!(f, "{}", ch as char),
            Symbol::SimpleEscape(ch) => write!(f, "\\{}", ch as char),
            Symbol::DecimalEscape(ch) => write!(f, "\\{:03}", ch),
        }
    }
}

//------------ Symbols -------------------------------------------------------

/// The symbols of a token, stopping after the first error.
#[derive(Clone, Debug)]
pub struct Symbols<'a> {
    octets: &'a [u8],
    pos: usize,
}

impl<'a> Symbols<'a> {
    pub fn new(octets: &'a [u8]) -> Self {
        Symbols { octets, pos: 0 }
    }
}

impl<'a> Iterator for Symbols<'a> {
    type Item = Result<Symbol, SymbolError>;

    fn next(&mut self) -> Option<Self::Item> {
        match Symbol::from_slice_index(self.octets, self.pos) {
            Ok(Some((sym, pos))) => {
                self.pos = pos;
                Some(Ok(sym))
            }
            Ok(None) => None,
            Err(err) => {
                self.pos = self.octets.len();
                Some(Err(err))
            }
        }
    }
}

//============ Error Types ===================================================

//------------ SymbolError ---------------------------------------------------

/// A malformed escape sequence.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SymbolError {
    /// The escape is not allowed.
    BadEscape,

    /// The token ended inside the escape.
    ShortInput,
}

//--- Display and Error

impl fmt::Display for SymbolError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SymbolError::BadEscape => f.write_str("illegal escape sequence"),
            SymbolError::ShortInput => {
                f.write_str("unexpected end of escape sequence")
            }
        }
    }
}

impl std::error::Error for SymbolError {}

//============ Testing =======================================================
