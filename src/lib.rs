//! A streaming DNS zone file loader.
//!
//! This crate reads zone files as defined in [RFC 1035] and turns them into
//! resource records with their data in wire format. Input is processed in
//! blocks of 64 octets which are classified with bit-parallel operations,
//! so large zones can be loaded quickly and with a bounded amount of
//! memory.
//!
//! # Modules
//!
//! * [base] contains the fundamental types: domain names, record types and
//!   classes, and TTLs,
//! * [rdata] describes the record data of the supported record types and
//!   converts it between presentation and wire format,
//! * [zonefile] contains the loader itself, and
//! * [utils] provides the Base 16 and Base 64 encodings used by record
//!   data.
//!
//! # Example
//!
//! ```
//! use zonescan::zonefile::{Flow, Options, Parser};
//!
//! let zone = "example.com. 3600 IN A 192.0.2.1\n\
//!             www.example.com. A 192.0.2.2\n";
//! let mut parser =
//!     Parser::new("example.zone", zone.as_bytes(), Options::default())
//!         .unwrap();
//! let summary = parser
//!     .process(|record| {
//!         println!("{}", record);
//!         Flow::Continue
//!     })
//!     .unwrap();
//! assert_eq!(summary.records, 2);
//! ```
//!
//! # Reference of Feature Flags
//!
//! * `serde`: Enables serialization of names, TTLs, and IANA types and
//!   reading [`Options`][zonefile::Options] from configuration files.
//! * `demo`: Pulls in `tracing-subscriber` for the `read-zone` demo.
//!
//! [RFC 1035]: https://tools.ietf.org/html/rfc1035

#![allow(renamed_and_removed_lints)]
#![allow(clippy::unknown_clippy_lints)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod base;
pub mod rdata;
pub mod utils;
pub mod zonefile;
