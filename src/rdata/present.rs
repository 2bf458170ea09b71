//! Writing record data in presentation format.
//!
//! Record data of a type with a descriptor is written field by field in
//! the same format the [`codec`][super::codec] reads. Everything else,
//! including data that doesn't match its descriptor, is written in the
//! generic format of RFC 3597.

use super::{descriptor, Encoding, Field, FieldKind, Int16Kind, Int32Kind};
use super::Presence;
use crate::base::iana::Rtype;
use crate::base::name::Name;
use crate::base::scan::Symbol;
use crate::utils::{base16, base64};
use core::fmt;
use octseq::parse::{Parser, ShortInput};
use std::fmt::Write as _;
use std::net::{Ipv4Addr, Ipv6Addr};
use time::OffsetDateTime;

//------------ write_rdata ---------------------------------------------------

/// Writes the presentation format of record data of the given type.
pub fn write_rdata<Target: fmt::Write>(
    rtype: Rtype,
    data: &[u8],
    target: &mut Target,
) -> fmt::Result {
    if let Some(desc) = descriptor(rtype) {
        let mut text = String::new();
        if present_fields(desc.fields, data, &mut text).is_ok() {
            return target.write_str(&text);
        }
    }
    write_generic(data, target)
}

/// Writes record data in the generic format.
pub fn write_generic<Target: fmt::Write>(
    data: &[u8],
    target: &mut Target,
) -> fmt::Result {
    write!(target, "\\# {}", data.len())?;
    if !data.is_empty() {
        target.write_char(' ')?;
        base16::display(data, target)?;
    }
    Ok(())
}

//------------ RdataDisplay --------------------------------------------------

/// Record data that displays in presentation format.
#[derive(Clone, Copy, Debug)]
pub struct RdataDisplay<'a> {
    rtype: Rtype,
    data: &'a [u8],
}

impl<'a> RdataDisplay<'a> {
    pub fn new(rtype: Rtype, data: &'a [u8]) -> Self {
        RdataDisplay { rtype, data }
    }
}

impl<'a> fmt::Display for RdataDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_rdata(self.rtype, self.data, f)
    }
}

//------------ Field Presentation --------------------------------------------

/// The data doesn't match the descriptor.
#[derive(Clone, Copy, Debug)]
struct Malformed;

impl From<ShortInput> for Malformed {
    fn from(_: ShortInput) -> Self {
        Malformed
    }
}

impl From<fmt::Error> for Malformed {
    fn from(_: fmt::Error) -> Self {
        Malformed
    }
}

fn present_fields(
    fields: &[Field],
    data: &[u8],
    target: &mut String,
) -> Result<(), Malformed> {
    let mut parser = Parser::from_ref(data);
    for field in fields {
        if field.presence == Presence::Optional && parser.remaining() == 0 {
            break;
        }
        if !target.is_empty() {
            target.push(' ');
        }
        present_field(field, &mut parser, target)?;
    }
    if parser.remaining() != 0 {
        return Err(Malformed);
    }
    Ok(())
}

fn present_field(
    field: &Field,
    parser: &mut Parser<[u8]>,
    target: &mut String,
) -> Result<(), Malformed> {
    match field.kind {
        FieldKind::Int8 => write!(target, "{}", parser.parse_u8()?)?,
        FieldKind::Int16(Int16Kind::Plain) => {
            write!(target, "{}", parser.parse_u16_be()?)?
        }
        FieldKind::Int16(Int16Kind::Type) => {
            write!(target, "{}", Rtype::from_int(parser.parse_u16_be()?))?
        }
        FieldKind::Int32(Int32Kind::Plain | Int32Kind::Ttl) => {
            write!(target, "{}", parser.parse_u32_be()?)?
        }
        FieldKind::Int32(Int32Kind::Time) => {
            write_time(parser.parse_u32_be()?, target)?
        }
        FieldKind::Ip4 => {
            let mut buf = [0u8; 4];
            parser.parse_buf(&mut buf)?;
            write!(target, "{}", Ipv4Addr::from(buf))?
        }
        FieldKind::Ip6 => {
            let mut buf = [0u8; 16];
            parser.parse_buf(&mut buf)?;
            write!(target, "{}", Ipv6Addr::from(buf))?
        }
        FieldKind::Name => {
            let len = Name::check_slice(parser.peek_all())
                .map_err(|_| Malformed)?;
            let name = Name::from_slice(&parser.peek_all()[..len])
                .map_err(|_| Malformed)?;
            parser.advance(len)?;
            write!(target, "{}", name)?
        }
        FieldKind::String => {
            write_string(parser, target)?;
            if field.presence == Presence::Remaining {
                while parser.remaining() > 0 {
                    target.push(' ');
                    write_string(parser, target)?;
                }
            }
        }
        FieldKind::Blob(encoding) => {
            let data = parser.peek_all();
            if data.is_empty() {
                return Err(Malformed);
            }
            match encoding {
                Encoding::Base16 => base16::display(data, target)?,
                Encoding::Base64 => base64::display(data, target)?,
            }
            parser.advance_to_end();
        }
        FieldKind::Wks => {
            match parser.parse_u8()? {
                6 => target.push_str("tcp"),
                17 => target.push_str("udp"),
                protocol => write!(target, "{}", protocol)?,
            }
            for (i, &octet) in parser.peek_all().iter().enumerate() {
                for bit in 0..8 {
                    if octet & (0x80 >> bit) != 0 {
                        write!(target, " {}", i * 8 + bit)?;
                    }
                }
            }
            parser.advance_to_end();
        }
        FieldKind::NsecTypes => {
            let mut first = true;
            while parser.remaining() > 0 {
                let window = u16::from(parser.parse_u8()?) << 8;
                let len = usize::from(parser.parse_u8()?);
                if len == 0 || len > 32 {
                    return Err(Malformed);
                }
                let mut bitmap = [0u8; 32];
                parser.parse_buf(&mut bitmap[..len])?;
                for (i, &octet) in bitmap[..len].iter().enumerate() {
                    for bit in 0..8 {
                        if octet & (0x80 >> bit) == 0 {
                            continue;
                        }
                        if !first {
                            target.push(' ');
                        }
                        first = false;
                        let rtype = window | (i * 8 + bit) as u16;
                        write!(target, "{}", Rtype::from_int(rtype))?;
                    }
                }
            }
            // Nothing was written for an empty bitmap, drop the separator.
            if first && target.ends_with(' ') {
                target.pop();
            }
        }
    }
    Ok(())
}

/// Writes a character string in quotes.
fn write_string(
    parser: &mut Parser<[u8]>,
    target: &mut String,
) -> Result<(), Malformed> {
    let len = usize::from(parser.parse_u8()?);
    let mut buf = [0u8; 255];
    parser.parse_buf(&mut buf[..len])?;
    target.push('"');
    for &ch in &buf[..len] {
        write!(target, "{}", Symbol::from_octet(ch))?;
    }
    target.push('"');
    Ok(())
}

/// Writes a point in time as `YYYYMMDDHHmmSS`.
fn write_time(value: u32, target: &mut String) -> Result<(), Malformed> {
    let time = OffsetDateTime::from_unix_timestamp(i64::from(value))
        .map_err(|_| Malformed)?;
    write!(
        target,
        "{:04}{:02}{:02}{:02}{:02}{:02}",
        time.year(),
        u8::from(time.month()),
        time.day(),
        time.hour(),
        time.minute(),
        time.second()
    )?;
    Ok(())
}

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    fn present(rtype: Rtype, data: &[u8]) -> String {
        RdataDisplay::new(rtype, data).to_string()
    }

    #[rstest]
    #[case(Rtype::A, b"\xc0\x00\x02\x01", "192.0.2.1")]
    #[case(Rtype::MX, b"\x00\x0a\x04mail\x00", "10 mail.")]
    #[case(Rtype::TXT, b"\x03a b\x02\"\x01", "\"a b\" \"\\\"\\001\"")]
    #[case(Rtype::ISDN, b"\x011", "\"1\"")]
    #[case(Rtype::DS, b"\xec\x45\x05\x01\x2b\xb1", "60485 5 1 2BB1")]
    #[case(Rtype::DHCID, b"\x00\x01", "AAE=")]
    #[case(Rtype::WKS, b"\x0a\x00\x00\x01\x06\x00\x00\x04\x40", "10.0.0.1 tcp 21 25")]
    #[case(Rtype::NSEC, b"\x01a\x00\x00\x06\x40\x01\x00\x00\x00\x03", "a. A MX RRSIG NSEC")]
    #[case(Rtype::NSEC, b"\x01a\x00", "a.")]
    #[case(Rtype::RRSIG,
        b"\x00\x01\x05\x02\x00\x00\x0e\x10\x65\x92\x00\x80\x65\x92\x00\x80\
          \x00\x01\x00\x00\x01",
        "A 5 2 3600 20240101000000 20240101000000 1 . AAE=")]
    fn known_types(
        #[case] rtype: Rtype,
        #[case] data: &[u8],
        #[case] text: &str,
    ) {
        assert_eq!(present(rtype, data), text);
    }

    #[rstest]
    #[case(Rtype::A, b"\x01\x02\x03", "\\# 3 010203")]
    #[case(Rtype::A, b"\x01\x02\x03\x04\x05", "\\# 5 0102030405")]
    #[case(Rtype::LOC, b"", "\\# 0")]
    #[case(Rtype::from_int(65280), b"\xff", "\\# 1 FF")]
    #[case(Rtype::DS, b"\x00\x01\x02\x03", "\\# 4 00010203")]
    fn generic(#[case] rtype: Rtype, #[case] data: &[u8], #[case] text: &str) {
        assert_eq!(present(rtype, data), text);
    }
}
