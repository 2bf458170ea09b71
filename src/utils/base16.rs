//! Hex digits as used for record data.
//!
//! Base 16 is defined in [RFC 4648]. Decoding accepts both cases, encoding
//! produces upper case. Zone files may split hex data over several tokens,
//! so [`Decoder`] takes one character at a time and only checks for a
//! missing half octet in [`Decoder::finalize`].
//!
//! [RFC 4648]: https://tools.ietf.org/html/rfc4648

pub use super::base64::DecodeError;
use bytes::BufMut;
use core::fmt;

/// Decodes a complete string.
pub fn decode_vec(s: &str) -> Result<Vec<u8>, DecodeError> {
    let mut decoder = Decoder::new();
    let mut res = Vec::with_capacity(s.len() / 2);
    s.bytes().try_for_each(|ch| decoder.push(ch, &mut res))?;
    decoder.finalize()?;
    Ok(res)
}

/// Writes `octets` as hex digits.
///
/// ```
/// use zonescan::utils::base16;
///
/// let mut s = String::new();
/// base16::display(b"\x12\xab", &mut s).unwrap();
/// assert_eq!(s, "12AB");
/// ```
pub fn display<Octets, Target>(octets: &Octets, f: &mut Target) -> fmt::Result
where
    Octets: AsRef<[u8]> + ?Sized,
    Target: fmt::Write,
{
    octets.as_ref().iter().try_for_each(|&octet| {
        f.write_char(digit(octet >> 4))?;
        f.write_char(digit(octet & 0x0F))
    })
}

/// Returns `bytes` as a string of hex digits.
pub fn encode_string<B: AsRef<[u8]> + ?Sized>(bytes: &B) -> String {
    let mut res = String::with_capacity(bytes.as_ref().len() * 2);
    for &octet in bytes.as_ref() {
        res.push(digit(octet >> 4));
        res.push(digit(octet & 0x0F));
    }
    res
}

fn digit(nibble: u8) -> char {
    char::from(DIGITS[usize::from(nibble)])
}

const DIGITS: &[u8; 16] = b"0123456789ABCDEF";

//------------ Decoder -------------------------------------------------------

/// Incremental hex decoder.
///
/// Decoded octets go to the target handed to [`push`][Self::push].
#[derive(Clone, Debug, Default)]
pub struct Decoder {
    /// The upper half of a pending octet.
    high: Option<u8>,
}

impl Decoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ends decoding, failing on an odd number of digits.
    pub fn finalize(self) -> Result<(), DecodeError> {
        match self.high {
            Some(_) => Err(DecodeError::ShortInput),
            None => Ok(()),
        }
    }

    /// Takes the next digit.
    pub fn push(
        &mut self,
        ch: u8,
        target: &mut impl BufMut,
    ) -> Result<(), DecodeError> {
        let nibble = char::from(ch)
            .to_digit(16)
            .ok_or(DecodeError::IllegalChar(char::from(ch)))?
            as u8;
        match self.high.take() {
            None => self.high = Some(nibble << 4),
            Some(high) => {
                if !target.has_remaining_mut() {
                    return Err(DecodeError::ShortBuf);
                }
                target.put_u8(high | nibble);
            }
        }
        Ok(())
    }
}

//============ Test ==========================================================
