//! Basics.
//!
//! This module provides the fundamental types for DNS data as it appears in
//! zone files:
//!
//! * [iana] for the IANA registries of record types and classes,
//! * [name] for absolute domain names in wire format,
//! * [scan] for the symbols that make up the content of a token, and
//! * [ttl] for time-to-live values.

pub use self::iana::{Class, Rtype};
pub use self::name::Name;
pub use self::ttl::Ttl;

pub mod iana;
pub mod name;
pub mod scan;
pub mod ttl;
