//! Record types.

//------------ Rtype ---------------------------------------------------------

int_enum! {
    /// A record type.
    ///
    /// Zone files name a type by its mnemonic or by the generic `TYPEn` form
    /// of RFC 3597. Having a mnemonic here says nothing about whether the
    /// presentation format of the record data can be read; that is up to
    /// the descriptors in [`rdata`][crate::rdata].
    ///
    /// Values come from the [IANA registry].
    ///
    /// [IANA registry]: https://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-4
    =>
    Rtype, u16;

    // Original types from RFC 1035.
    /// IPv4 host address.
    (A => 1, "A")
    /// Name server for the zone.
    (NS => 2, "NS")
    /// Mail destination, replaced by MX.
    (MD => 3, "MD")
    /// Mail forwarder, replaced by MX.
    (MF => 4, "MF")
    /// Alias target.
    (CNAME => 5, "CNAME")
    /// Start of the zone's authority.
    (SOA => 6, "SOA")
    /// Mailbox host, experimental.
    (MB => 7, "MB")
    /// Mail group member, experimental.
    (MG => 8, "MG")
    /// Mailbox rename, experimental.
    (MR => 9, "MR")
    /// Opaque data.
    (NULL => 10, "NULL")
    /// Services offered at an address.
    (WKS => 11, "WKS")
    /// Reverse pointer.
    (PTR => 12, "PTR")
    /// CPU and operating system strings.
    (HINFO => 13, "HINFO")
    /// Mailing list contacts.
    (MINFO => 14, "MINFO")
    /// Mail exchanger with preference.
    (MX => 15, "MX")
    /// Free form character strings.
    (TXT => 16, "TXT")

    // Assorted later additions.
    /// Responsible person (RFC 1183).
    (RP => 17, "RP")
    /// AFS database location (RFC 1183).
    (AFSDB => 18, "AFSDB")
    /// X.25 address (RFC 1183).
    (X25 => 19, "X25")
    /// ISDN address (RFC 1183).
    (ISDN => 20, "ISDN")
    /// Route through (RFC 1183).
    (RT => 21, "RT")
    /// OSI network service address (RFC 1706).
    (NSAP => 22, "NSAP")
    /// NSAP reverse pointer, historic.
    (NSAPPTR => 23, "NSAP-PTR")
    /// Original DNSSEC signature (RFC 2535).
    (SIG => 24, "SIG")
    /// Original DNSSEC key (RFC 2535).
    (KEY => 25, "KEY")
    /// X.400 mail mapping (RFC 2163).
    (PX => 26, "PX")
    /// Geographical position (RFC 1712).
    (GPOS => 27, "GPOS")
    /// IPv6 host address (RFC 3596).
    (AAAA => 28, "AAAA")
    /// Location (RFC 1876).
    (LOC => 29, "LOC")
    /// Next domain, replaced by NSEC.
    (NXT => 30, "NXT")
    /// Nimrod endpoint identifier.
    (EID => 31, "EID")
    /// Nimrod locator.
    (NIMLOC => 32, "NIMLOC")
    /// Service location (RFC 2782).
    (SRV => 33, "SRV")
    /// ATM address.
    (ATMA => 34, "ATMA")
    /// Naming authority pointer (RFC 3403).
    (NAPTR => 35, "NAPTR")
    /// Key exchanger (RFC 2230).
    (KX => 36, "KX")
    /// Certificate (RFC 4398).
    (CERT => 37, "CERT")
    /// Chained IPv6 address, historic.
    (A6 => 38, "A6")
    /// Subtree redirection (RFC 6672).
    (DNAME => 39, "DNAME")
    /// Kitchen sink, never standardized.
    (SINK => 40, "SINK")
    /// EDNS pseudo record (RFC 6891).
    (OPT => 41, "OPT")
    /// Address prefix list (RFC 3123).
    (APL => 42, "APL")

    // DNSSEC and friends.
    /// Delegation signer (RFC 4034).
    (DS => 43, "DS")
    /// SSH key fingerprint (RFC 4255).
    (SSHFP => 44, "SSHFP")
    /// IPsec keying material (RFC 4025).
    (IPSECKEY => 45, "IPSECKEY")
    /// Record set signature (RFC 4034).
    (RRSIG => 46, "RRSIG")
    /// Authenticated denial (RFC 4034).
    (NSEC => 47, "NSEC")
    /// Zone key (RFC 4034).
    (DNSKEY => 48, "DNSKEY")
    /// DHCP client identifier (RFC 4701).
    (DHCID => 49, "DHCID")
    /// Hashed authenticated denial (RFC 5155).
    (NSEC3 => 50, "NSEC3")
    /// NSEC3 parameters (RFC 5155).
    (NSEC3PARAM => 51, "NSEC3PARAM")
    /// TLS certificate association (RFC 6698).
    (TLSA => 52, "TLSA")
    /// S/MIME certificate association (RFC 8162).
    (SMIMEA => 53, "SMIMEA")
    /// Host identity protocol (RFC 8005).
    (HIP => 55, "HIP")
    /// Zone status information.
    (NINFO => 56, "NINFO")
    /// Resource key.
    (RKEY => 57, "RKEY")
    /// Trust anchor link.
    (TALINK => 58, "TALINK")
    /// Child copy of DS (RFC 7344).
    (CDS => 59, "CDS")
    /// Child copy of DNSKEY (RFC 7344).
    (CDNSKEY => 60, "CDNSKEY")
    /// OpenPGP key (RFC 7929).
    (OPENPGPKEY => 61, "OPENPGPKEY")
    /// Child to parent sync (RFC 7477).
    (CSYNC => 62, "CSYNC")
    /// Zone digest (RFC 8976).
    (ZONEMD => 63, "ZONEMD")
    /// Service binding (RFC 9460).
    (SVCB => 64, "SVCB")
    /// HTTPS service binding (RFC 9460).
    (HTTPS => 65, "HTTPS")

    // Reserved or rarely seen types.
    /// Sender policy, use TXT instead (RFC 7208).
    (SPF => 99, "SPF")
    /// Reserved.
    (UINFO => 100, "UINFO")
    /// Reserved.
    (UID => 101, "UID")
    /// Reserved.
    (GID => 102, "GID")
    /// Reserved.
    (UNSPEC => 103, "UNSPEC")
    /// ILNP node identifier (RFC 6742).
    (NID => 104, "NID")
    /// ILNP 32 bit locator (RFC 6742).
    (L32 => 105, "L32")
    /// ILNP 64 bit locator (RFC 6742).
    (L64 => 106, "L64")
    /// ILNP locator pointer (RFC 6742).
    (LP => 107, "LP")
    /// 48 bit MAC address (RFC 7043).
    (EUI48 => 108, "EUI48")
    /// 64 bit MAC address (RFC 7043).
    (EUI64 => 109, "EUI64")

    // Meta and query types. These never carry zone data.
    /// Transaction key (RFC 2930).
    (TKEY => 249, "TKEY")
    /// Transaction signature (RFC 8945).
    (TSIG => 250, "TSIG")
    /// Incremental zone transfer (RFC 1995).
    (IXFR => 251, "IXFR")
    /// Full zone transfer (RFC 5936).
    (AXFR => 252, "AXFR")
    /// Any mailbox record.
    (MAILB => 253, "MAILB")
    /// Mail agent records, historic.
    (MAILA => 254, "MAILA")
    /// Everything there is (RFC 8482).
    (ANY => 255, "ANY")

    // Later assignments above the meta range.
    /// Uniform resource identifier (RFC 7553).
    (URI => 256, "URI")
    /// CA authorization (RFC 8659).
    (CAA => 257, "CAA")
    /// Application visibility and control.
    (AVC => 258, "AVC")
    /// Digital object architecture.
    (DOA => 259, "DOA")
    /// DNSSEC trust authority.
    (TA => 32768, "TA")
    /// Lookaside validation, historic (RFC 4431).
    (DLV => 32769, "DLV")
}

int_enum_str_with_prefix!(Rtype, "TYPE", b"TYPE", u16, "unknown record type");

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::Rtype;

    #[test]
    fn from_bytes() {
        assert_eq!(Rtype::from_bytes(b"A"), Some(Rtype::A));
        assert_eq!(Rtype::from_bytes(b"aaaa"), Some(Rtype::AAAA));
        assert_eq!(Rtype::from_bytes(b"TYPE1"), Some(Rtype::A));
        assert_eq!(Rtype::from_bytes(b"type65534"), Some(Rtype(65534)));
        assert_eq!(Rtype::from_bytes(b"TYPE"), None);
        assert_eq!(Rtype::from_bytes(b"TYPEA"), None);
        assert_eq!(Rtype::from_bytes(b"1"), None);
        assert_eq!(Rtype::from_bytes(b"IN"), None);
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Rtype::NSEC), "NSEC");
        assert_eq!(format!("{}", Rtype(65280)), "TYPE65280");
        assert_eq!(format!("{:?}", Rtype::MX), "Rtype::MX");
    }
}
