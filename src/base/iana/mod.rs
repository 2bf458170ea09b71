//! Registry values used in zone files.
//!
//! Each type wraps the raw integer and has constants for the values that
//! have a mnemonic. Text conversion accepts the mnemonic or the generic
//! form, such as `TYPE65280`, and prints the mnemonic where there is one.

pub use self::class::Class;
pub use self::rtype::Rtype;

#[macro_use]
mod macros;

pub mod class;
pub mod rtype;
