//! Reading zone files.
//!
//! Loading a zone file happens in layers. The [`classify`] module looks at
//! 64 octet blocks of input at a time and determines for each octet whether
//! it is part of a comment, a quoted string, or an unquoted token. The
//! [`index`] module drives the classifier over the input read from a
//! [`Source`] and records where tokens start and end. The [`scanner`] turns
//! these boundaries into tokens and logical lines, and finally the
//! [`parser`] assembles the tokens into [`Record`]s, following directives
//! and `$INCLUDE`s along the way.

pub use self::alloc::{AllocError, Allocator, Bounded, Global};
pub use self::config::{ErrorPolicy, Options};
pub use self::error::{Code, Error};
pub use self::parser::{Flow, Parser, Summary};
pub use self::record::Record;
pub use self::source::{FsIncluder, Includer, Source};

pub mod alloc;
pub mod classify;
pub mod config;
pub mod error;
pub mod index;
pub mod parser;
pub mod record;
pub mod scanner;
pub mod source;
