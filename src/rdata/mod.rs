//! Record data.
//!
//! The record data of each supported record type is described by a
//! [`TypeDescriptor`]: the list of its fields, each with a [`FieldKind`]
//! that determines both how the field is written in a zone file and how it
//! is encoded in wire format.
//!
//! The [`codec`] module uses the descriptors to turn the tokens of a record
//! into wire format, the [`present`] module turns wire format back into
//! text.

use crate::base::iana::Rtype;

pub mod codec;
pub mod present;

//------------ FieldKind -----------------------------------------------------

/// The semantic type of a record data field.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldKind {
    /// An 8 bit unsigned integer.
    Int8,

    /// A 16 bit unsigned integer.
    Int16(Int16Kind),

    /// A 32 bit unsigned integer.
    Int32(Int32Kind),

    /// An IPv4 address.
    Ip4,

    /// An IPv6 address.
    Ip6,

    /// An uncompressed domain name.
    Name,

    /// A character string preceded by its length.
    String,

    /// Binary data without a length.
    Blob(Encoding),

    /// A protocol number followed by a bitmap of ports as used by WKS.
    Wks,

    /// A bitmap of record types in window blocks as used by NSEC.
    NsecTypes,
}

/// How a 16 bit integer field is written.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Int16Kind {
    /// As a decimal number.
    Plain,

    /// As a record type mnemonic.
    Type,
}

/// How a 32 bit integer field is written.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Int32Kind {
    /// As a decimal number.
    Plain,

    /// As a TTL, possibly with time units.
    Ttl,

    /// As a point in time, `YYYYMMDDHHmmSS` or seconds since the epoch.
    Time,
}

/// The text encoding of binary data.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Encoding {
    Base16,
    Base64,
}

//------------ Presence ------------------------------------------------------

/// How many tokens a field consumes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Presence {
    /// The field must be present.
    Required,

    /// The field may be left out. Only allowed at the end.
    Optional,

    /// The field takes all remaining tokens of the record.
    ///
    /// For strings, this means a sequence of character strings. For all
    /// other kinds, the tokens are concatenated. Only allowed for the last
    /// field.
    Remaining,
}

//------------ Field ---------------------------------------------------------

/// A field of the record data.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Field {
    /// The name of the field used in error messages.
    pub name: &'static str,

    pub kind: FieldKind,
    pub presence: Presence,
}

impl Field {
    const fn new(name: &'static str, kind: FieldKind) -> Self {
        Field {
            name,
            kind,
            presence: Presence::Required,
        }
    }

    const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Field {
            name,
            kind,
            presence: Presence::Optional,
        }
    }

    const fn remaining(name: &'static str, kind: FieldKind) -> Self {
        Field {
            name,
            kind,
            presence: Presence::Remaining,
        }
    }

    /// Returns whether the field can take more than one token.
    pub fn is_open_ended(&self) -> bool {
        self.presence == Presence::Remaining
            || matches!(self.kind, FieldKind::Wks | FieldKind::NsecTypes)
    }
}

//------------ TypeDescriptor ------------------------------------------------

/// The description of the record data of a record type.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TypeDescriptor {
    pub rtype: Rtype,
    pub fields: &'static [Field],
}

/// Returns the descriptor for a record type if the type is supported.
pub fn descriptor(rtype: Rtype) -> Option<&'static TypeDescriptor> {
    DESCRIPTORS.iter().find(|desc| desc.rtype == rtype)
}

//------------ The Descriptor Table ------------------------------------------

use self::FieldKind::{Blob, Int16, Int32, Int8, Ip4, Ip6, NsecTypes, Wks};

const INT16: FieldKind = Int16(Int16Kind::Plain);
const INT32: FieldKind = Int32(Int32Kind::Plain);
const NAME: FieldKind = FieldKind::Name;
const STRING: FieldKind = FieldKind::String;

const NAME_ONLY: &[Field] = &[Field::new("host", NAME)];
const PREF_NAME: &[Field] =
    &[Field::new("preference", INT16), Field::new("exchange", NAME)];
const TEXT: &[Field] = &[Field::remaining("text", STRING)];
const DS: &[Field] = &[
    Field::new("key tag", INT16),
    Field::new("algorithm", Int8),
    Field::new("digest type", Int8),
    Field::remaining("digest", Blob(Encoding::Base16)),
];
const DNSKEY: &[Field] = &[
    Field::new("flags", INT16),
    Field::new("protocol", Int8),
    Field::new("algorithm", Int8),
    Field::remaining("public key", Blob(Encoding::Base64)),
];

macro_rules! descriptors {
    ( $( $rtype:ident => $fields:expr, )* ) => {
        static DESCRIPTORS: &[TypeDescriptor] = &[
            $(
                TypeDescriptor { rtype: Rtype::$rtype, fields: $fields },
            )*
        ];
    }
}

descriptors! {
    A => &[Field::new("address", Ip4)],
    NS => NAME_ONLY,
    MD => NAME_ONLY,
    MF => NAME_ONLY,
    CNAME => NAME_ONLY,
    SOA => &[
        Field::new("primary", NAME),
        Field::new("mailbox", NAME),
        Field::new("serial", INT32),
        Field::new("refresh", Int32(Int32Kind::Ttl)),
        Field::new("retry", Int32(Int32Kind::Ttl)),
        Field::new("expire", Int32(Int32Kind::Ttl)),
        Field::new("minimum", Int32(Int32Kind::Ttl)),
    ],
    MB => NAME_ONLY,
    MG => NAME_ONLY,
    MR => NAME_ONLY,
    WKS => &[Field::new("address", Ip4), Field::new("services", Wks)],
    PTR => NAME_ONLY,
    HINFO => &[Field::new("cpu", STRING), Field::new("os", STRING)],
    MINFO => &[Field::new("rmailbx", NAME), Field::new("emailbx", NAME)],
    MX => PREF_NAME,
    TXT => TEXT,
    RP => &[Field::new("mailbox", NAME), Field::new("text", NAME)],
    AFSDB => &[Field::new("subtype", INT16), Field::new("hostname", NAME)],
    X25 => &[Field::new("address", STRING)],
    ISDN => &[
        Field::new("address", STRING),
        Field::optional("subaddress", STRING),
    ],
    RT => PREF_NAME,
    NSAPPTR => NAME_ONLY,
    PX => &[
        Field::new("preference", INT16),
        Field::new("map822", NAME),
        Field::new("mapx400", NAME),
    ],
    AAAA => &[Field::new("address", Ip6)],
    SRV => &[
        Field::new("priority", INT16),
        Field::new("weight", INT16),
        Field::new("port", INT16),
        Field::new("target", NAME),
    ],
    NAPTR => &[
        Field::new("order", INT16),
        Field::new("preference", INT16),
        Field::new("flags", STRING),
        Field::new("services", STRING),
        Field::new("regexp", STRING),
        Field::new("replacement", NAME),
    ],
    KX => PREF_NAME,
    CERT => &[
        Field::new("type", INT16),
        Field::new("key tag", INT16),
        Field::new("algorithm", Int8),
        Field::remaining("certificate", Blob(Encoding::Base64)),
    ],
    DNAME => NAME_ONLY,
    DS => DS,
    SSHFP => &[
        Field::new("algorithm", Int8),
        Field::new("fingerprint type", Int8),
        Field::remaining("fingerprint", Blob(Encoding::Base16)),
    ],
    RRSIG => &[
        Field::new("type covered", Int16(Int16Kind::Type)),
        Field::new("algorithm", Int8),
        Field::new("labels", Int8),
        Field::new("original ttl", Int32(Int32Kind::Ttl)),
        Field::new("expiration", Int32(Int32Kind::Time)),
        Field::new("inception", Int32(Int32Kind::Time)),
        Field::new("key tag", INT16),
        Field::new("signer", NAME),
        Field::remaining("signature", Blob(Encoding::Base64)),
    ],
    NSEC => &[Field::new("next", NAME), Field::new("types", NsecTypes)],
    DNSKEY => DNSKEY,
    DHCID => &[Field::remaining("digest", Blob(Encoding::Base64))],
    CDS => DS,
    CDNSKEY => DNSKEY,
    SPF => TEXT,
}

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn table_is_consistent() {
        for desc in DESCRIPTORS {
            assert_eq!(descriptor(desc.rtype), Some(desc));
            let (last, init) = desc.fields.split_last().unwrap();
            for field in init {
                assert_eq!(
                    field.presence,
                    Presence::Required,
                    "{} {}",
                    desc.rtype,
                    field.name
                );
                assert!(!field.is_open_ended());
            }
            if matches!(last.kind, FieldKind::Blob(_)) {
                assert_eq!(last.presence, Presence::Remaining);
            }
        }
    }

    #[test]
    fn lookup() {
        assert_eq!(descriptor(Rtype::A).unwrap().fields.len(), 1);
        assert_eq!(descriptor(Rtype::RRSIG).unwrap().fields.len(), 9);
        assert!(descriptor(Rtype::LOC).is_none());
        assert!(descriptor(Rtype::from_int(65280)).is_none());
    }
}
