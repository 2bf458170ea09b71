//! Base 64 text for record data.
//!
//! Only the original alphabet of [RFC 4648] is used in DNS, never the URL
//! safe one. Like its Base 16 sibling, the [`Decoder`] is fed one character
//! at a time since zone files may break encoded data into several tokens.
//!
//! [RFC 4648]: https://tools.ietf.org/html/rfc4648

use bytes::BufMut;
use core::fmt;

/// Decodes a complete string.
pub fn decode_vec(s: &str) -> Result<Vec<u8>, DecodeError> {
    let mut decoder = Decoder::new();
    let mut res = Vec::with_capacity(s.len() / 4 * 3);
    s.bytes().try_for_each(|ch| decoder.push(ch, &mut res))?;
    decoder.finalize()?;
    Ok(res)
}

/// Writes `bytes` as padded Base 64.
pub fn display<B, W>(bytes: &B, f: &mut W) -> fmt::Result
where
    B: AsRef<[u8]> + ?Sized,
    W: fmt::Write,
{
    for chunk in bytes.as_ref().chunks(3) {
        let group = chunk.iter().enumerate().fold(0u32, |acc, (i, &octet)| {
            acc | u32::from(octet) << (16 - 8 * i)
        });
        for i in 0..4 {
            if i <= chunk.len() {
                let index = (group >> (18 - 6 * i)) & 0x3F;
                f.write_char(char::from(ALPHABET[index as usize]))?;
            } else {
                f.write_char(PAD)?;
            }
        }
    }
    Ok(())
}

/// Returns `bytes` as a padded Base 64 string.
pub fn encode_string<B: AsRef<[u8]> + ?Sized>(bytes: &B) -> String {
    let mut res = String::with_capacity((bytes.as_ref().len() + 2) / 3 * 4);
    // Writing to a string never fails.
    let _ = display(bytes, &mut res);
    res
}

//------------ Decoder -------------------------------------------------------

/// Incremental Base 64 decoder.
///
/// Characters are collected into groups of four. Each complete group is
/// written to the target handed to [`push`][Self::push]. Padding ends the
/// data; anything after it is an error.
#[derive(Clone, Debug, Default)]
pub struct Decoder {
    /// The bits of the current group so far.
    bits: u32,

    /// Characters in the current group, padding included.
    len: u8,

    /// Padding characters in the current group.
    pad: u8,

    /// Whether a padded group has been completed.
    done: bool,
}

impl Decoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ends decoding, failing on an incomplete group.
    pub fn finalize(self) -> Result<(), DecodeError> {
        if self.len != 0 {
            Err(DecodeError::ShortInput)
        } else {
            Ok(())
        }
    }

    /// Takes the next character.
    pub fn push(
        &mut self,
        ch: u8,
        target: &mut impl BufMut,
    ) -> Result<(), DecodeError> {
        if self.done {
            return Err(DecodeError::TrailingInput);
        }
        if ch == PAD as u8 {
            // A group carries at least two characters of data.
            if self.len < 2 {
                return Err(DecodeError::IllegalChar(PAD));
            }
            self.pad += 1;
        } else {
            if self.pad > 0 {
                return Err(DecodeError::TrailingInput);
            }
            let value =
                sextet(ch).ok_or(DecodeError::IllegalChar(char::from(ch)))?;
            self.bits = self.bits << 6 | u32::from(value);
        }
        self.len += 1;
        if self.len == 4 {
            self.flush(target)?;
        }
        Ok(())
    }

    fn flush(&mut self, target: &mut impl BufMut) -> Result<(), DecodeError> {
        let octets = usize::from(3 - self.pad);
        if target.remaining_mut() < octets {
            return Err(DecodeError::ShortBuf);
        }
        // The filler bits of the last data character must be zero.
        let filler = 2 * u32::from(self.pad);
        if self.bits & ((1 << filler) - 1) != 0 {
            return Err(DecodeError::NonZeroFiller);
        }
        let group = self.bits >> filler;
        let group = group.to_be_bytes();
        target.put_slice(&group[4 - octets..]);
        self.done = self.pad > 0;
        self.bits = 0;
        self.len = 0;
        self.pad = 0;
        Ok(())
    }
}

fn sextet(ch: u8) -> Option<u8> {
    match ch {
        b'A'..=b'Z' => Some(ch - b'A'),
        b'a'..=b'z' => Some(ch - b'a' + 26),
        b'0'..=b'9' => Some(ch - b'0' + 52),
        b'+' => Some(62),
        b'/' => Some(63),
        _ => None,
    }
}

//============ Error Types ===================================================

//------------ DecodeError ---------------------------------------------------

/// Decoding Base 64 or Base 16 text failed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DecodeError {
    /// The character is not part of the alphabet.
    IllegalChar(char),

    /// Something followed the padding.
    TrailingInput,

    /// The bits left over before the padding are not zero.
    NonZeroFiller,

    /// The input stopped in the middle of a group.
    ShortInput,

    /// The target has no room left.
    ShortBuf,
}

//--- Display and Error

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            DecodeError::TrailingInput => f.write_str("trailing input"),
            DecodeError::IllegalChar(ch) => {
                write!(f, "illegal character '{}'", ch.escape_default())
            }
            DecodeError::NonZeroFiller => {
                f.write_str("non-zero bits before padding")
            }
            DecodeError::ShortInput => f.write_str("incomplete input"),
            DecodeError::ShortBuf => f.write_str("buffer size exceeded"),
        }
    }
}

impl std::error::Error for DecodeError {}

const ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

const PAD: char = '=';

//============ Test ==========================================================
