//! Options for loading a zone.

use super::classify::BLOCK_SIZE;
use super::error::Error;
use crate::base::{Class, Name, Ttl};

//------------ Options -------------------------------------------------------

/// The options for loading a zone.
///
/// All fields have sensible defaults, so usually only a few of them need to
/// be set:
///
/// ```
/// use zonescan::zonefile::Options;
///
/// let options = Options {
///     origin: "example.com.".parse().unwrap(),
///     ..Default::default()
/// };
/// assert!(options.validate().is_ok());
/// ```
///
/// With the `serde` feature enabled, options can be read from configuration
/// files. Field names use kebab case and missing fields take their default.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(rename_all = "kebab-case", default)
)]
pub struct Options {
    /// The origin used for relative names until a `$ORIGIN` directive.
    pub origin: Name,

    /// The TTL for records without one until a `$TTL` directive.
    pub default_ttl: Ttl,

    /// The class for records without one until the first explicit class.
    pub default_class: Class,

    /// The number of octets requested from the source at a time.
    ///
    /// This is also the initial size of the input buffer. It must be a
    /// positive multiple of the classifier's 64 octet block.
    pub block_size: usize,

    /// What to do when a record fails to parse.
    pub error_policy: ErrorPolicy,

    /// How deeply `$INCLUDE` directives may nest.
    pub max_include_depth: usize,
}

impl Options {
    /// The default block size.
    pub const DEFAULT_BLOCK_SIZE: usize = 16 * 1024;

    /// The default include depth.
    pub const DEFAULT_MAX_INCLUDE_DEPTH: usize = 10;

    /// Sets the initial origin.
    #[must_use]
    pub fn with_origin(mut self, origin: Name) -> Self {
        self.origin = origin;
        self
    }

    /// Sets the TTL used before the first `$TTL` directive.
    #[must_use]
    pub fn with_default_ttl(mut self, ttl: Ttl) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Sets the class used before the first record with a class.
    #[must_use]
    pub fn with_default_class(mut self, class: Class) -> Self {
        self.default_class = class;
        self
    }

    /// Sets the block size.
    #[must_use]
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    /// Sets the error policy.
    #[must_use]
    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    /// Sets the maximum include depth.
    #[must_use]
    pub fn with_max_include_depth(mut self, depth: usize) -> Self {
        self.max_include_depth = depth;
        self
    }

    /// Checks that the options can be used.
    pub fn validate(&self) -> Result<(), Error> {
        if self.block_size == 0 || self.block_size % BLOCK_SIZE != 0 {
            return Err(Error::bad_parameter(format!(
                "block size {} is not a positive multiple of {}",
                self.block_size, BLOCK_SIZE
            )));
        }
        if self.max_include_depth == 0 {
            return Err(Error::bad_parameter(
                "maximum include depth must be at least 1",
            ));
        }
        Ok(())
    }
}

impl Default for Options {
    fn default() -> Self {
        Options {
            origin: Name::root(),
            default_ttl: Ttl::HOUR,
            default_class: Class::IN,
            block_size: Self::DEFAULT_BLOCK_SIZE,
            error_policy: ErrorPolicy::Stop,
            max_include_depth: Self::DEFAULT_MAX_INCLUDE_DEPTH,
        }
    }
}

//------------ ErrorPolicy ---------------------------------------------------

/// What to do when a record contains an error.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum ErrorPolicy {
    /// Stop loading at the first error.
    #[default]
    Stop,

    /// Skip the record, remember the error, and carry on with the next
    /// logical line.
    ///
    /// Read and allocation errors still end loading.
    Continue,
}

//============ Tests =========================================================
