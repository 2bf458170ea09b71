//! Domain names.
//!
//! This module provides [`Name`], an owned, absolute domain name in its
//! uncompressed wire format. Names are stored inline in a fixed-size array,
//! so creating and copying them never allocates. This matters because the
//! zone file parser keeps copies of the current origin and owner around for
//! as long as they are in use, while all other token data is only borrowed
//! from the input buffer.

use super::scan::{Symbol, SymbolError, Symbols};
use core::{cmp, fmt, hash, str};

//------------ Constants -----------------------------------------------------

/// The maximum length of a domain name in wire format.
pub const MAX_NAME_LEN: usize = 255;

/// The maximum length of a label.
pub const MAX_LABEL_LEN: usize = 63;

//------------ Name ----------------------------------------------------------

/// An absolute domain name.
///
/// The name is kept as a sequence of labels each preceded by a length
/// octet and terminated by the empty root label. The total length is never
/// more than 255 octets and no label is longer than 63 octets.
///
/// Comparison and hashing ignore ASCII case.
#[derive(Clone)]
pub struct Name {
    octets: [u8; MAX_NAME_LEN],
    len: usize,
}

impl Name {
    /// Returns the root name.
    pub const fn root() -> Self {
        Name {
            octets: [0; MAX_NAME_LEN],
            len: 1,
        }
    }

    /// Creates a name from its uncompressed wire format.
    ///
    /// The slice must contain exactly one name ending in the root label.
    pub fn from_slice(slice: &[u8]) -> Result<Self, NameError> {
        let len = Self::check_slice(slice)?;
        if len != slice.len() {
            return Err(NameError::TrailingData);
        }
        let mut res = Name::root();
        res.octets[..len].copy_from_slice(slice);
        res.len = len;
        Ok(res)
    }

    /// Checks the name at the start of `slice`, returning its length.
    ///
    /// The slice may contain data after the name.
    pub fn check_slice(slice: &[u8]) -> Result<usize, NameError> {
        let mut pos = 0;
        loop {
            let label_len = match slice.get(pos) {
                Some(len) => usize::from(*len),
                None => return Err(NameError::ShortInput),
            };
            if label_len > MAX_LABEL_LEN {
                return Err(NameError::LongLabel);
            }
            pos += label_len + 1;
            if pos > MAX_NAME_LEN {
                return Err(NameError::LongName);
            }
            if pos > slice.len() {
                return Err(NameError::ShortInput);
            }
            if label_len == 0 {
                return Ok(pos);
            }
        }
    }

    /// Scans a name from its presentation format.
    ///
    /// The text may contain escape sequences. If it ends in an unescaped
    /// dot, it is an absolute name. Otherwise it is relative and `origin` is
    /// appended. A text consisting of a single `@` means the origin itself.
    pub fn scan(text: &[u8], origin: &Name) -> Result<Self, NameError> {
        if text == b"@" {
            return Ok(origin.clone());
        }
        if text == b"." {
            return Ok(Name::root());
        }

        let mut res = Name::root();
        let mut label_start = 0;
        let mut pos = 1;
        let mut absolute = false;

        for sym in Symbols::new(text) {
            let sym = sym?;
            if absolute {
                // Something followed the dot, so it wasn’t the last one.
                absolute = false;
            }
            if sym.is_char(b'.') {
                let label_len = pos - label_start - 1;
                if label_len == 0 {
                    return Err(NameError::EmptyLabel);
                }
                res.octets[label_start] = label_len as u8;
                label_start = pos;
                pos += 1;
                absolute = true;
            } else {
                if pos - label_start > MAX_LABEL_LEN {
                    return Err(NameError::LongLabel);
                }
                if pos >= MAX_NAME_LEN {
                    return Err(NameError::LongName);
                }
                res.octets[pos] = sym.into_octet();
                pos += 1;
            }
            if pos > MAX_NAME_LEN {
                return Err(NameError::LongName);
            }
        }

        if absolute {
            // The root label is already in place at label_start.
            res.octets[label_start] = 0;
            res.len = pos;
            return Ok(res);
        }

        let label_len = pos - label_start - 1;
        if label_len == 0 {
            return Err(NameError::EmptyLabel);
        }
        res.octets[label_start] = label_len as u8;
        let total = pos + origin.len;
        if total > MAX_NAME_LEN {
            return Err(NameError::LongName);
        }
        res.octets[pos..total].copy_from_slice(origin.as_slice());
        res.len = total;
        Ok(res)
    }

    /// Returns the wire format of the name.
    pub fn as_slice(&self) -> &[u8] {
        &self.octets[..self.len]
    }

    /// Returns the length of the wire format of the name.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns whether this is the root name.
    pub fn is_root(&self) -> bool {
        self.len == 1
    }

    /// Returns an iterator over the labels of the name.
    ///
    /// The final empty root label is included.
    pub fn labels(&self) -> Labels<'_> {
        Labels {
            slice: self.as_slice(),
        }
    }

    /// Returns the number of labels, including the root label.
    pub fn label_count(&self) -> usize {
        self.labels().count()
    }
}

//--- Default

impl Default for Name {
    fn default() -> Self {
        Name::root()
    }
}

//--- FromStr

impl str::FromStr for Name {
    type Err = NameError;

    /// Parses a name relative to the root.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Name::scan(s.as_bytes(), &Name::root())
    }
}

//--- PartialEq, Eq, and Hash

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice().eq_ignore_ascii_case(other.as_slice())
    }
}

impl Eq for Name {}

impl hash::Hash for Name {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        for ch in self.as_slice() {
            ch.to_ascii_lowercase().hash(state)
        }
    }
}

//--- PartialOrd and Ord

impl PartialOrd for Name {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Name {
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.as_slice()
            .iter()
            .map(u8::to_ascii_lowercase)
            .cmp(other.as_slice().iter().map(u8::to_ascii_lowercase))
    }
}

//--- AsRef

impl AsRef<[u8]> for Name {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

//--- Display and Debug

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_root() {
            return f.write_str(".");
        }
        for label in self.labels() {
            if label.is_empty() {
                break;
            }
            for &ch in label {
                write!(f, "{}", Symbol::from_label_octet(ch))?;
            }
            f.write_str(".")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Name({})", self)
    }
}

//--- Serialize and Deserialize

#[cfg(feature = "serde")]
impl serde::Serialize for Name {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Name {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        struct Visitor;

        impl<'de> serde::de::Visitor<'de> for Visitor {
            type Value = Name;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a domain name")
            }

            fn visit_str<E: serde::de::Error>(
                self,
                v: &str,
            ) -> Result<Self::Value, E> {
                str::FromStr::from_str(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(Visitor)
    }
}

//------------ Labels --------------------------------------------------------

/// An iterator over the labels of a name.
#[derive(Clone, Debug)]
pub struct Labels<'a> {
    slice: &'a [u8],
}

impl<'a> Iterator for Labels<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let (&len, tail) = self.slice.split_first()?;
        let len = usize::from(len);
        let label = &tail[..len];
        self.slice = if len == 0 { &[] } else { &tail[len..] };
        Some(label)
    }
}

//------------ NameError -----------------------------------------------------

/// A domain name could not be created.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NameError {
    /// The name contained an illegal escape sequence.
    BadEscape,

    /// The name contained an empty label in a position other than the end.
    EmptyLabel,

    /// A label was longer than 63 octets.
    LongLabel,

    /// The name was longer than 255 octets.
    LongName,

    /// The wire data ended in the middle of a name.
    ShortInput,

    /// There was data after the root label.
    TrailingData,
}

impl NameError {
    /// Returns whether the error is about a well-formed but too long value.
    ///
    /// All other errors are about malformed input.
    pub fn is_semantic(self) -> bool {
        matches!(self, NameError::LongLabel | NameError::LongName)
    }
}

impl From<SymbolError> for NameError {
    fn from(err: SymbolError) -> Self {
        match err {
            SymbolError::BadEscape => NameError::BadEscape,
            SymbolError::ShortInput => NameError::ShortInput,
        }
    }
}

//--- Display and Error

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            NameError::BadEscape => "illegal escape sequence in domain name",
            NameError::EmptyLabel => "empty label in domain name",
            NameError::LongLabel => "label exceeds 63 octets",
            NameError::LongName => "domain name exceeds 255 octets",
            NameError::ShortInput => "unexpected end of domain name",
            NameError::TrailingData => "trailing data after domain name",
        })
    }
}

impl std::error::Error for NameError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use core::str::FromStr;

    fn origin() -> Name {
        Name::from_str("example.com.").unwrap()
    }

    #[test]
    fn scan_absolute_and_relative() {
        let name = Name::scan(b"www.example.com.", &Name::root()).unwrap();
        assert_eq!(name.as_slice(), b"\x03www\x07example\x03com\x00");

        let name = Name::scan(b"www", &origin()).unwrap();
        assert_eq!(name.as_slice(), b"\x03www\x07example\x03com\x00");

        assert_eq!(Name::scan(b"@", &origin()).unwrap(), origin());
        assert!(Name::scan(b".", &origin()).unwrap().is_root());
    }

    #[test]
    fn scan_escapes() {
        let name = Name::scan(b"a\\.b.c.", &Name::root()).unwrap();
        assert_eq!(name.as_slice(), b"\x03a.b\x01c\x00");
        let name = Name::scan(b"\\065\\066.", &Name::root()).unwrap();
        assert_eq!(name.as_slice(), b"\x02AB\x00");
        assert_eq!(
            Name::scan(b"a\\25.", &Name::root()),
            Err(NameError::BadEscape)
        );
    }

    #[test]
    fn scan_empty_labels() {
        assert_eq!(
            Name::scan(b"a..b.", &Name::root()),
            Err(NameError::EmptyLabel)
        );
        assert_eq!(
            Name::scan(b".a.", &Name::root()),
            Err(NameError::EmptyLabel)
        );
        assert_eq!(Name::scan(b"", &Name::root()), Err(NameError::EmptyLabel));
    }

    #[test]
    fn label_limit() {
        let label = "a".repeat(63);
        assert!(Name::scan(format!("{}.", label).as_bytes(), &Name::root())
            .is_ok());
        let label = "a".repeat(64);
        assert_eq!(
            Name::scan(format!("{}.", label).as_bytes(), &Name::root()),
            Err(NameError::LongLabel)
        );
    }

    #[test]
    fn name_limit() {
        // 4 labels of 63 octets plus their length octets is 256 octets.
        let label = "a".repeat(63);
        let long = format!("{0}.{0}.{0}.{0}.", label);
        assert_eq!(
            Name::scan(long.as_bytes(), &Name::root()),
            Err(NameError::LongName)
        );

        // Three labels of 63 and one of 61 is exactly 255 octets.
        let max = format!("{0}.{0}.{0}.{1}.", label, "b".repeat(61));
        let name = Name::scan(max.as_bytes(), &Name::root()).unwrap();
        assert_eq!(name.len(), 255);

        // The same relative to an origin that pushes it over.
        let rel = format!("{0}.{0}.{0}.{1}", label, "b".repeat(61));
        assert_eq!(
            Name::scan(rel.as_bytes(), &origin()),
            Err(NameError::LongName)
        );
        assert!(NameError::LongName.is_semantic());
        assert!(!NameError::EmptyLabel.is_semantic());
    }

    #[test]
    fn from_slice() {
        let name = Name::from_slice(b"\x03www\x00").unwrap();
        assert_eq!(name.label_count(), 2);
        assert_eq!(Name::from_slice(b"\x03ww"), Err(NameError::ShortInput));
        assert_eq!(
            Name::from_slice(b"\x00\x00"),
            Err(NameError::TrailingData)
        );
        assert_eq!(Name::check_slice(b"\x01a\x00rest"), Ok(3));
    }

    #[test]
    fn display_and_compare() {
        let name = Name::scan(b"A\\.b\\032c.Example.", &Name::root()).unwrap();
        assert_eq!(format!("{}", name), "A\\.b\\ c.Example.");
        assert_eq!(
            Name::from_str(&format!("{}", name)).unwrap().as_slice(),
            name.as_slice()
        );
        assert_eq!(format!("{}", Name::root()), ".");
        assert_eq!(
            Name::from_str("EXAMPLE.com.").unwrap(),
            Name::from_str("example.COM.").unwrap()
        );
    }
}
