//! Resource records read from a zone file.

use crate::base::{Class, Name, Rtype, Ttl};
use crate::rdata::present::RdataDisplay;
use bytes::Bytes;
use core::fmt;

//------------ Record --------------------------------------------------------

/// A resource record with its data in wire format.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    owner: Name,
    ttl: Ttl,
    class: Class,
    rtype: Rtype,
    data: Bytes,
}

impl Record {
    /// Creates a new record from its parts.
    pub fn new(
        owner: Name,
        ttl: Ttl,
        class: Class,
        rtype: Rtype,
        data: Bytes,
    ) -> Self {
        Record {
            owner,
            ttl,
            class,
            rtype,
            data,
        }
    }

    /// Returns the owner name of the record.
    pub fn owner(&self) -> &Name {
        &self.owner
    }

    pub fn ttl(&self) -> Ttl {
        self.ttl
    }

    pub fn class(&self) -> Class {
        self.class
    }

    pub fn rtype(&self) -> Rtype {
        self.rtype
    }

    /// Returns the record data in wire format.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Converts the record into its data.
    pub fn into_data(self) -> Bytes {
        self.data
    }

    /// Returns a value that displays the record data in presentation format.
    pub fn display_data(&self) -> RdataDisplay<'_> {
        RdataDisplay::new(self.rtype, &self.data)
    }
}

//--- Display

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.owner,
            self.ttl,
            self.class,
            self.rtype,
            self.display_data()
        )
    }
}

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn display() {
        let record = Record::new(
            Name::from_str("www.example.com.").unwrap(),
            Ttl::from_secs(3600),
            Class::IN,
            Rtype::A,
            Bytes::from_static(b"\xc0\x00\x02\x02"),
        );
        assert_eq!(
            record.to_string(),
            "www.example.com. 3600 IN A 192.0.2.2"
        );

        let record = Record::new(
            Name::root(),
            Ttl::from_secs(0),
            Class::CH,
            Rtype::from_int(65280),
            Bytes::new(),
        );
        assert_eq!(record.to_string(), ". 0 CH TYPE65280 \\# 0");
    }
}
