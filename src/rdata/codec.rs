//! Converting record data from presentation format into wire format.
//!
//! An [`RdataDecoder`] is created for a record type and then fed the
//! tokens of the record data one by one. It checks each token against the
//! grammar of the field it belongs to and appends the wire format to its
//! buffer. Once the logical line ends, [`RdataDecoder::finish`] checks that
//! all required fields were present and returns the data.
//!
//! If the first token is `\#`, the data is read in the generic format of
//! RFC 3597 instead, which works for every record type.

use super::{descriptor, Encoding, Field, FieldKind, Int16Kind, Int32Kind};
use super::{Presence, TypeDescriptor};
use crate::base::iana::Rtype;
use crate::base::name::Name;
use crate::base::scan::Symbols;
use crate::base::ttl::Ttl;
use crate::utils::{base16, base64};
use crate::zonefile::error::Error;
use crate::zonefile::scanner::{Token, TokenKind};
use bytes::{BufMut, Bytes, BytesMut};
use std::mem;
use std::net::Ipv6Addr;
use std::str;
use time::{Date, Month, PrimitiveDateTime, Time};

//------------ Constants -----------------------------------------------------

/// The maximum length of record data in wire format.
pub const MAX_RDATA_LEN: usize = 0xFFFF;

/// The maximum length of a character string.
pub const MAX_STRING_LEN: usize = 0xFF;

//------------ RdataDecoder --------------------------------------------------

/// Assembles the wire format of record data from tokens.
#[derive(Debug)]
pub struct RdataDecoder<'o> {
    rtype: Rtype,
    origin: &'o Name,
    target: BytesMut,
    mode: Mode,
}

#[derive(Debug)]
enum Mode {
    /// No token has been seen yet.
    Start,

    /// Reading the fields of a descriptor.
    Fields {
        fields: &'static [Field],

        /// The index of the current field.
        index: usize,

        /// The state of a field that takes more than one token.
        progress: Progress,
    },

    /// Reading generic record data.
    Generic {
        len: Option<usize>,
        decoder: base16::Decoder,
    },
}

/// The state of a field spanning several tokens.
#[derive(Debug)]
enum Progress {
    /// No token has been consumed for the current field.
    Fresh,

    /// Character strings have been read.
    Strings,

    Base16(base16::Decoder),
    Base64(base64::Decoder),

    /// The WKS protocol and the ports read so far.
    Wks { protocol: u8, bitmap: Vec<u8> },

    /// The record types read so far.
    Types(Vec<u16>),
}

impl<'o> RdataDecoder<'o> {
    /// Creates a decoder for record data of the given type.
    ///
    /// Relative domain names are completed with `origin`.
    pub fn new(rtype: Rtype, origin: &'o Name) -> Self {
        RdataDecoder {
            rtype,
            origin,
            target: BytesMut::with_capacity(64),
            mode: Mode::Start,
        }
    }

    /// Returns the record type.
    pub fn rtype(&self) -> Rtype {
        self.rtype
    }

    /// Decodes the next token.
    pub fn push(&mut self, token: &Token) -> Result<(), Error> {
        if let Mode::Start = self.mode {
            self.mode = if token.is_word(b"\\#") {
                Mode::Generic {
                    len: None,
                    decoder: base16::Decoder::new(),
                }
            } else {
                Mode::Fields {
                    fields: self.descriptor()?.fields,
                    index: 0,
                    progress: Progress::Fresh,
                }
            };
            if let Mode::Generic { .. } = self.mode {
                return Ok(());
            }
        }

        match self.mode {
            Mode::Start => Ok(()),
            Mode::Generic {
                ref mut len,
                ref mut decoder,
            } => {
                if token.kind != TokenKind::Contiguous {
                    return Err(Error::syntax("quoted string in generic record data"));
                }
                match *len {
                    None => {
                        let value = decode_int(token, MAX_RDATA_LEN as u64)?;
                        *len = Some(value as usize);
                        Ok(())
                    }
                    Some(_) => {
                        for &ch in token.text {
                            decoder.push(ch, &mut self.target)?;
                        }
                        Ok(())
                    }
                }
            }
            Mode::Fields {
                fields,
                ref mut index,
                ref mut progress,
            } => {
                let field = fields
                    .get(*index)
                    .ok_or_else(|| Error::syntax("trailing data in record"))?;
                push_field(field, token, self.origin, progress, &mut self.target)?;
                if !field.is_open_ended() {
                    *index += 1;
                    *progress = Progress::Fresh;
                }
                Ok(())
            }
        }
    }

    /// Finishes decoding and returns the wire format.
    pub fn finish(mut self) -> Result<Bytes, Error> {
        match mem::replace(&mut self.mode, Mode::Start) {
            Mode::Start => {
                let fields = self.descriptor()?.fields;
                finish_fields(fields, 0, Progress::Fresh, &mut self.target)?
            }
            Mode::Generic { len, decoder } => {
                let len = len.ok_or_else(|| {
                    Error::syntax("missing length of generic record data")
                })?;
                decoder.finalize()?;
                if len != self.target.len() {
                    return Err(Error::semantic(format!(
                        "generic record data has {} octets instead of {}",
                        self.target.len(),
                        len
                    )));
                }
            }
            Mode::Fields {
                fields,
                index,
                progress,
            } => finish_fields(fields, index, progress, &mut self.target)?,
        }
        if self.target.len() > MAX_RDATA_LEN {
            return Err(Error::semantic("record data exceeds 65535 octets"));
        }
        Ok(self.target.freeze())
    }

    fn descriptor(&self) -> Result<&'static TypeDescriptor, Error> {
        descriptor(self.rtype).ok_or_else(|| {
            Error::not_implemented(format!(
                "record data of type {} only supported in generic format",
                self.rtype
            ))
        })
    }
}

//------------ Field Decoding ------------------------------------------------

fn push_field(
    field: &Field,
    token: &Token,
    origin: &Name,
    progress: &mut Progress,
    target: &mut BytesMut,
) -> Result<(), Error> {
    // Only character strings may be quoted.
    if token.kind != TokenKind::Contiguous && !matches!(field.kind, FieldKind::String) {
        return Err(Error::syntax(format!(
            "quoted string in place of {}",
            field.name
        )));
    }
    match field.kind {
        FieldKind::Int8 => target.put_u8(decode_int(token, 0xFF)? as u8),
        FieldKind::Int16(Int16Kind::Plain) => {
            target.put_u16(decode_int(token, 0xFFFF)? as u16)
        }
        FieldKind::Int16(Int16Kind::Type) => {
            decode_rtype(token)?.compose(target)
        }
        FieldKind::Int32(Int32Kind::Plain) => {
            target.put_u32(decode_int(token, 0xFFFF_FFFF)? as u32)
        }
        FieldKind::Int32(Int32Kind::Ttl) => {
            target.put_u32(Ttl::scan(token.text)?.as_secs())
        }
        FieldKind::Int32(Int32Kind::Time) => {
            target.put_u32(decode_time(token.text)?)
        }
        FieldKind::Ip4 => target.put_slice(&decode_ip4(token.text)?),
        FieldKind::Ip6 => target.put_slice(&decode_ip6(token.text)?),
        FieldKind::Name => {
            target.put_slice(Name::scan(token.text, origin)?.as_slice())
        }
        FieldKind::String => {
            decode_string(token.text, target)?;
            *progress = Progress::Strings;
        }
        FieldKind::Blob(encoding) => {
            push_blob(encoding, token, progress, target)?
        }
        FieldKind::Wks => push_wks(token, progress)?,
        FieldKind::NsecTypes => {
            let rtype = decode_rtype(token)?.to_int();
            match *progress {
                Progress::Types(ref mut types) => types.push(rtype),
                _ => *progress = Progress::Types(vec![rtype]),
            }
        }
    }
    Ok(())
}

fn finish_fields(
    fields: &[Field],
    mut index: usize,
    progress: Progress,
    target: &mut BytesMut,
) -> Result<(), Error> {
    match progress {
        Progress::Fresh => {}
        Progress::Strings => index += 1,
        Progress::Base16(decoder) => {
            decoder.finalize()?;
            index += 1;
        }
        Progress::Base64(decoder) => {
            decoder.finalize()?;
            index += 1;
        }
        Progress::Wks { protocol, bitmap } => {
            target.put_u8(protocol);
            target.put_slice(&bitmap);
            index += 1;
        }
        Progress::Types(types) => {
            encode_types(types, target);
            index += 1;
        }
    }
    for field in fields.get(index..).unwrap_or_default() {
        match (field.kind, field.presence) {
            // An empty type bitmap is fine.
            (FieldKind::NsecTypes, _) => {}
            (_, Presence::Optional) => {}
            _ => {
                return Err(Error::syntax(format!(
                    "missing {} in record data",
                    field.name
                )))
            }
        }
    }
    Ok(())
}

fn push_blob(
    encoding: Encoding,
    token: &Token,
    progress: &mut Progress,
    target: &mut BytesMut,
) -> Result<(), Error> {
    match (encoding, &mut *progress) {
        (Encoding::Base16, Progress::Fresh) => {
            *progress = Progress::Base16(base16::Decoder::new())
        }
        (Encoding::Base64, Progress::Fresh) => {
            *progress = Progress::Base64(base64::Decoder::new())
        }
        _ => {}
    }
    match *progress {
        Progress::Base16(ref mut decoder) => {
            for &ch in token.text {
                decoder.push(ch, target)?;
            }
        }
        Progress::Base64(ref mut decoder) => {
            for &ch in token.text {
                decoder.push(ch, target)?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn push_wks(token: &Token, progress: &mut Progress) -> Result<(), Error> {
    match *progress {
        Progress::Wks { ref mut bitmap, .. } => {
            let port = decode_service(token.text)?;
            let byte = usize::from(port / 8);
            if bitmap.len() <= byte {
                bitmap.resize(byte + 1, 0);
            }
            bitmap[byte] |= 0x80 >> (port % 8);
        }
        _ => {
            *progress = Progress::Wks {
                protocol: decode_protocol(token.text)?,
                bitmap: Vec::new(),
            }
        }
    }
    Ok(())
}

//------------ Token Grammars ------------------------------------------------

/// Decodes a decimal integer no larger than `max`.
pub fn decode_int(token: &Token, max: u64) -> Result<u64, Error> {
    let text = token.text;
    if text.is_empty() || !text.iter().all(u8::is_ascii_digit) {
        return Err(Error::syntax(format!(
            "invalid integer '{}'",
            String::from_utf8_lossy(text)
        )));
    }
    let mut value = 0u64;
    for &ch in text {
        value = value * 10 + u64::from(ch - b'0');
        if value > max {
            return Err(Error::semantic(format!(
                "integer '{}' out of range",
                String::from_utf8_lossy(text)
            )));
        }
    }
    Ok(value)
}

/// Decodes a record type mnemonic.
fn decode_rtype(token: &Token) -> Result<Rtype, Error> {
    Rtype::from_bytes(token.text).ok_or_else(|| {
        Error::semantic(format!(
            "unknown record type '{}'",
            String::from_utf8_lossy(token.text)
        ))
    })
}

/// Decodes an IPv4 address in dotted decimal notation.
///
/// Each of the four groups has one to three digits. A group with a leading
/// zero is rejected, so two-digit groups must be at least 10 and three-digit
/// groups at least 100.
pub fn decode_ip4(text: &[u8]) -> Result<[u8; 4], Error> {
    let err = || {
        Error::syntax(format!(
            "invalid IPv4 address '{}'",
            String::from_utf8_lossy(text)
        ))
    };
    let mut res = [0u8; 4];
    let mut pos = 0;
    for (i, octet) in res.iter_mut().enumerate() {
        let start = pos;
        let mut value = 0u32;
        while pos < text.len() && pos - start < 3 && text[pos].is_ascii_digit() {
            value = value * 10 + u32::from(text[pos] - b'0');
            pos += 1;
        }
        let digits = pos - start;
        let min = match digits {
            1 => 0,
            2 => 10,
            3 => 100,
            _ => return Err(err()),
        };
        if value < min || value > 255 {
            return Err(err());
        }
        *octet = value as u8;
        if i < 3 {
            if text.get(pos) != Some(&b'.') {
                return Err(err());
            }
            pos += 1;
        }
    }
    if pos != text.len() {
        return Err(err());
    }
    Ok(res)
}

/// Decodes an IPv6 address.
pub fn decode_ip6(text: &[u8]) -> Result<[u8; 16], Error> {
    str::from_utf8(text)
        .ok()
        .and_then(|text| text.parse::<Ipv6Addr>().ok())
        .map(|addr| addr.octets())
        .ok_or_else(|| {
            Error::syntax(format!(
                "invalid IPv6 address '{}'",
                String::from_utf8_lossy(text)
            ))
        })
}

/// Decodes a character string and appends it with its length.
pub fn decode_string(text: &[u8], target: &mut BytesMut) -> Result<(), Error> {
    let start = target.len();
    target.put_u8(0);
    for sym in Symbols::new(text) {
        target.put_u8(sym?.into_octet());
    }
    let len = target.len() - start - 1;
    if len > MAX_STRING_LEN {
        return Err(Error::semantic(
            "character string with more than 255 octets",
        ));
    }
    target[start] = len as u8;
    Ok(())
}

/// Decodes a point in time.
///
/// The time is either given as `YYYYMMDDHHmmSS` in UTC or as the number of
/// seconds since the epoch. Times are stored modulo 2^32.
pub fn decode_time(text: &[u8]) -> Result<u32, Error> {
    let bad = || {
        Error::syntax(format!(
            "invalid time '{}'",
            String::from_utf8_lossy(text)
        ))
    };
    if !text.iter().all(u8::is_ascii_digit) || text.is_empty() {
        return Err(bad());
    }
    if text.len() != 14 {
        if text.len() > 10 {
            return Err(bad());
        }
        let value = text
            .iter()
            .fold(0u64, |value, ch| value * 10 + u64::from(ch - b'0'));
        return u32::try_from(value)
            .map_err(|_| Error::semantic("time value out of range"));
    }

    let num = |range: std::ops::Range<usize>| {
        text[range]
            .iter()
            .fold(0u32, |value, ch| value * 10 + u32::from(ch - b'0'))
    };
    let range_err = |err: time::error::ComponentRange| {
        Error::semantic(format!("invalid time: {}", err))
    };
    let month = Month::try_from(num(4..6) as u8).map_err(range_err)?;
    let date = Date::from_calendar_date(num(0..4) as i32, month, num(6..8) as u8)
        .map_err(range_err)?;
    let time = Time::from_hms(num(8..10) as u8, num(10..12) as u8, num(12..14) as u8)
        .map_err(range_err)?;
    let stamp = PrimitiveDateTime::new(date, time).assume_utc().unix_timestamp();
    Ok(stamp.rem_euclid(1 << 32) as u32)
}

/// Decodes a WKS protocol.
fn decode_protocol(text: &[u8]) -> Result<u8, Error> {
    if text.eq_ignore_ascii_case(b"tcp") {
        return Ok(6);
    }
    if text.eq_ignore_ascii_case(b"udp") {
        return Ok(17);
    }
    parse_decimal(text, 0xFF)
        .map(|value| value as u8)
        .ok_or_else(|| {
            Error::syntax(format!(
                "invalid protocol '{}'",
                String::from_utf8_lossy(text)
            ))
        })
}

/// Decodes a WKS service as a port number.
fn decode_service(text: &[u8]) -> Result<u16, Error> {
    if let Some(&(_, port)) = SERVICES
        .iter()
        .find(|(name, _)| text.eq_ignore_ascii_case(name.as_bytes()))
    {
        return Ok(port);
    }
    parse_decimal(text, 0xFFFF)
        .map(|value| value as u16)
        .ok_or_else(|| {
            Error::syntax(format!(
                "unknown service '{}'",
                String::from_utf8_lossy(text)
            ))
        })
}

fn parse_decimal(text: &[u8], max: u64) -> Option<u64> {
    if text.is_empty() || text.len() > 5 || !text.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let value = text
        .iter()
        .fold(0u64, |value, ch| value * 10 + u64::from(ch - b'0'));
    (value <= max).then_some(value)
}

/// Encodes a list of record types as NSEC window blocks.
fn encode_types(mut types: Vec<u16>, target: &mut BytesMut) {
    types.sort_unstable();
    types.dedup();
    let mut iter = types.into_iter().peekable();
    while let Some(&first) = iter.peek() {
        let window = (first >> 8) as u8;
        let mut bitmap = [0u8; 32];
        let mut len = 0;
        while let Some(rtype) = iter.next_if(|rtype| (rtype >> 8) as u8 == window) {
            let low = usize::from(rtype & 0xFF);
            bitmap[low / 8] |= 0x80 >> (low % 8);
            len = low / 8 + 1;
        }
        target.put_u8(window);
        target.put_u8(len as u8);
        target.put_slice(&bitmap[..len]);
    }
}

/// Well known services accepted by name in WKS records.
pub const SERVICES: &[(&str, u16)] = &[
    ("ftp-data", 20),
    ("ftp", 21),
    ("ssh", 22),
    ("telnet", 23),
    ("smtp", 25),
    ("domain", 53),
    ("tftp", 69),
    ("http", 80),
    ("pop3", 110),
    ("ntp", 123),
    ("imap", 143),
    ("snmp", 161),
    ("https", 443),
];

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::zonefile::error::Code;
    use core::str::FromStr;
    use rstest::rstest;

    fn word(text: &str) -> Token<'_> {
        Token {
            kind: TokenKind::Contiguous,
            text: text.as_bytes(),
            line: 1,
            at_line_start: false,
        }
    }

    fn quoted(text: &str) -> Token<'_> {
        Token {
            kind: TokenKind::Quoted,
            ..word(text)
        }
    }

    fn decode(rtype: Rtype, tokens: &[Token]) -> Result<Bytes, Error> {
        let origin = Name::from_str("example.com.").unwrap();
        let mut decoder = RdataDecoder::new(rtype, &origin);
        for token in tokens {
            decoder.push(token)?;
        }
        decoder.finish()
    }

    fn decode_words(rtype: Rtype, text: &str) -> Result<Bytes, Error> {
        let tokens: Vec<_> = text.split_whitespace().map(word).collect();
        decode(rtype, &tokens)
    }

    #[rstest]
    #[case("1.2.3.4", [1, 2, 3, 4])]
    #[case("0.0.0.0", [0, 0, 0, 0])]
    #[case("255.255.255.255", [255, 255, 255, 255])]
    #[case("192.0.2.10", [192, 0, 2, 10])]
    #[case("10.100.1.0", [10, 100, 1, 0])]
    fn ip4_good(#[case] text: &str, #[case] octets: [u8; 4]) {
        assert_eq!(decode_ip4(text.as_bytes()).unwrap(), octets);
    }

    #[rstest]
    #[case("256.1.1.1")]
    #[case("1.2.3")]
    #[case("1.2.3.4.5")]
    #[case("01.2.3.4")]
    #[case("1.2.3.004")]
    #[case("1.2.3.4 ")]
    #[case("1..3.4")]
    #[case("1234.1.1.1")]
    #[case("1.2.3.a")]
    #[case("")]
    fn ip4_bad(#[case] text: &str) {
        assert_eq!(
            decode_ip4(text.as_bytes()).unwrap_err().code(),
            Code::SyntaxError
        );
    }

    #[test]
    fn ip6() {
        assert_eq!(
            decode_ip6(b"2001:db8::1").unwrap(),
            [0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1]
        );
        assert_eq!(decode_ip6(b"::ffff:192.0.2.1").unwrap()[12..], [192, 0, 2, 1]);
        assert!(decode_ip6(b"1::2::3").is_err());
        assert!(decode_ip6(b"1.2.3.4").is_err());
    }

    #[test]
    fn integers() {
        assert_eq!(decode_int(&word("65535"), 0xFFFF).unwrap(), 65535);
        assert_eq!(
            decode_int(&word("65536"), 0xFFFF).unwrap_err().code(),
            Code::SemanticError
        );
        assert_eq!(
            decode_int(&word("+1"), 0xFF).unwrap_err().code(),
            Code::SyntaxError
        );
        assert_eq!(
            decode_int(&word("0x10"), 0xFF).unwrap_err().code(),
            Code::SyntaxError
        );
    }

    #[test]
    fn strings() {
        let mut target = BytesMut::new();
        decode_string(b"a\\\"b\\065", &mut target).unwrap();
        assert_eq!(target.as_ref(), b"\x04a\"bA");

        let long = "a".repeat(256);
        assert_eq!(
            decode_string(long.as_bytes(), &mut BytesMut::new())
                .unwrap_err()
                .code(),
            Code::SemanticError
        );
    }

    #[test]
    fn times() {
        assert_eq!(decode_time(b"20240101000000").unwrap(), 1704067200);
        assert_eq!(decode_time(b"1704067200").unwrap(), 1704067200);
        assert_eq!(
            decode_time(b"20241301000000").unwrap_err().code(),
            Code::SemanticError
        );
        assert_eq!(decode_time(b"2024").unwrap(), 2024);
        assert!(decode_time(b"20240101").is_ok());
        assert!(decode_time(b"99999999999").is_err());
    }

    #[test]
    fn records() {
        assert_eq!(
            decode_words(Rtype::MX, "10 mail").unwrap().as_ref(),
            b"\x00\x0a\x04mail\x07example\x03com\x00"
        );
        assert_eq!(
            decode(Rtype::TXT, &[quoted("a b"), word("c")]).unwrap().as_ref(),
            b"\x03a b\x01c"
        );
        assert_eq!(
            decode_words(Rtype::SOA, "ns. host. 1 1h 15m 1w 300")
                .unwrap()
                .as_ref(),
            b"\x02ns\x00\x04host\x00\
              \x00\x00\x00\x01\x00\x00\x0e\x10\x00\x00\x03\x84\
              \x00\x09\x3a\x80\x00\x00\x01\x2c"
        );
        assert_eq!(
            decode_words(Rtype::DS, "60485 5 1 2BB183AF5F22588179A5 3CF6BE76")
                .unwrap()
                .as_ref(),
            b"\xec\x45\x05\x01\x2b\xb1\x83\xaf\x5f\x22\x58\x81\x79\xa5\x3c\xf6\xbe\x76"
        );
    }

    #[test]
    fn optional_and_missing_fields() {
        assert_eq!(
            decode(Rtype::ISDN, &[quoted("150862028003217")])
                .unwrap()
                .as_ref(),
            b"\x0f150862028003217"
        );
        assert_eq!(
            decode(Rtype::ISDN, &[quoted("1"), quoted("2")]).unwrap().as_ref(),
            b"\x011\x012"
        );
        assert_eq!(
            decode_words(Rtype::MX, "10").unwrap_err().code(),
            Code::SyntaxError
        );
        assert_eq!(
            decode_words(Rtype::A, "").unwrap_err().code(),
            Code::SyntaxError
        );
        assert_eq!(
            decode_words(Rtype::A, "1.2.3.4 5.6.7.8").unwrap_err().code(),
            Code::SyntaxError
        );
        assert_eq!(
            decode_words(Rtype::DS, "1 2 3").unwrap_err().code(),
            Code::SyntaxError
        );
    }

    #[rstest]
    #[case(Rtype::A, &[quoted("1.2.3.4")])]
    #[case(Rtype::AAAA, &[quoted("::1")])]
    #[case(Rtype::MX, &[quoted("10"), word("mail")])]
    #[case(Rtype::MX, &[word("10"), quoted("mail")])]
    #[case(Rtype::DS, &[word("1"), word("2"), word("3"), quoted("0A")])]
    #[case(Rtype::DNSKEY, &[word("256"), word("3"), word("8"), quoted("AQ==")])]
    #[case(Rtype::NSEC, &[word("host"), quoted("A")])]
    #[case(Rtype::A, &[word("\\#"), quoted("4"), word("0A000001")])]
    #[case(Rtype::A, &[word("\\#"), word("4"), quoted("0A000001")])]
    fn quoted_non_strings(#[case] rtype: Rtype, #[case] tokens: &[Token]) {
        assert_eq!(
            decode(rtype, tokens).unwrap_err().code(),
            Code::SyntaxError
        );
    }

    #[test]
    fn wks() {
        assert_eq!(
            decode_words(Rtype::WKS, "10.0.0.1 tcp ftp 25 SMTP")
                .unwrap()
                .as_ref(),
            b"\x0a\x00\x00\x01\x06\x00\x00\x04\x40"
        );
        assert_eq!(
            decode_words(Rtype::WKS, "10.0.0.1 udp").unwrap().as_ref(),
            b"\x0a\x00\x00\x01\x11"
        );
        assert!(decode_words(Rtype::WKS, "10.0.0.1 tcp gopherish").is_err());
    }

    #[test]
    fn nsec() {
        assert_eq!(
            decode_words(
                Rtype::NSEC,
                "host.example.com. A MX RRSIG NSEC TYPE1234"
            )
            .unwrap()
            .as_ref(),
            b"\x04host\x07example\x03com\x00\
              \x00\x06\x40\x01\x00\x00\x00\x03\
              \x04\x1b\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\
              \x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\
              \x00\x20"
        );
        assert_eq!(
            decode_words(Rtype::NSEC, "host A FOO").unwrap_err().code(),
            Code::SemanticError
        );
    }

    #[test]
    fn generic() {
        assert_eq!(
            decode_words(Rtype::A, "\\# 4 0A000001").unwrap().as_ref(),
            b"\x0a\x00\x00\x01"
        );
        assert_eq!(
            decode_words(Rtype::from_int(65280), "\\# 3 01 0203")
                .unwrap()
                .as_ref(),
            b"\x01\x02\x03"
        );
        assert!(decode_words(Rtype::LOC, "\\# 0").unwrap().is_empty());
        assert_eq!(
            decode_words(Rtype::A, "\\# 5 0A000001").unwrap_err().code(),
            Code::SemanticError
        );
        assert_eq!(
            decode_words(Rtype::LOC, "52 22 23.000 N").unwrap_err().code(),
            Code::NotImplemented
        );
    }
}
