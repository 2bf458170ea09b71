//! Text encodings for binary record data.

pub mod base16;
pub mod base64;
