//! Record classes.

//------------ Class ---------------------------------------------------------

int_enum! {
    /// A record class.
    ///
    /// Classes split the name space by network type. Today only IN matters
    /// but the others still turn up in zone files, CH in particular for
    /// server information zones.
    ///
    /// The query classes NONE and ANY are left out on purpose. A zone file
    /// cannot use them, so a record that tries is read as having an unknown
    /// type instead.
    ///
    /// Values come from the [IANA registry].
    ///
    /// [IANA registry]: https://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-2
    =>
    Class, u16;

    /// The Internet.
    (IN => 1, "IN")

    /// CSNET, long gone.
    (CS => 2, "CS")

    /// Chaosnet.
    (CH => 3, "CH")

    /// Hesiod.
    (HS => 4, "HS")
}

int_enum_str_with_prefix!(Class, "CLASS", b"CLASS", u16, "unknown class");

impl Default for Class {
    fn default() -> Self {
        Class::IN
    }
}

//============ Tests =========================================================
