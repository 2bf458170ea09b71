//! Error reporting for zone file loading.
//!
//! Every failure carries a [`Code`] that classifies it. Errors raised while
//! reading a record additionally carry the name of the file and the line
//! the offending token started on.

use crate::base::name::NameError;
use crate::base::scan::SymbolError;
use crate::base::ttl::TtlError;
use crate::utils::base64::DecodeError;
use std::borrow::Cow;
use std::{fmt, io};

//------------ Code ----------------------------------------------------------

/// The status of a loading operation.
///
/// The numeric values are stable and distinct so they can be handed to
/// callers that only deal in integers.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[repr(i32)]
pub enum Code {
    /// The operation succeeded.
    Success = 0,

    /// A token does not follow the grammar of its field.
    SyntaxError = -1,

    /// A lexically valid token has a value outside its domain.
    SemanticError = -2,

    /// Memory could not be allocated or a capacity was exceeded.
    OutOfMemory = -3,

    /// The options are invalid.
    BadParameter = -4,

    /// Reading from the byte source failed.
    ReadError = -5,

    /// The input uses a feature that is not available.
    NotImplemented = -6,
}

impl Code {
    /// Returns the integer value of the code.
    #[must_use]
    pub const fn to_int(self) -> i32 {
        self as i32
    }

    /// Returns whether the error allows parsing to resume at the next line.
    ///
    /// Resource and I/O errors invalidate the buffer state and always end
    /// loading.
    #[must_use]
    pub const fn is_recoverable(self) -> bool {
        !matches!(self, Code::OutOfMemory | Code::ReadError)
    }
}

impl From<Code> for i32 {
    fn from(code: Code) -> i32 {
        code.to_int()
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            Code::Success => "success",
            Code::SyntaxError => "syntax error",
            Code::SemanticError => "semantic error",
            Code::OutOfMemory => "out of memory",
            Code::BadParameter => "bad parameter",
            Code::ReadError => "read error",
            Code::NotImplemented => "not implemented",
        })
    }
}

//------------ Error ---------------------------------------------------------

/// An error happened while loading a zone.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Error {
    code: Code,
    file: Option<String>,
    line: usize,
    message: Cow<'static, str>,
}

impl Error {
    /// Creates a new error without a location.
    pub fn new(code: Code, message: impl Into<Cow<'static, str>>) -> Self {
        Error {
            code,
            file: None,
            line: 0,
            message: message.into(),
        }
    }

    pub(crate) fn syntax(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(Code::SyntaxError, message)
    }

    pub(crate) fn semantic(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(Code::SemanticError, message)
    }

    pub(crate) fn not_implemented(
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(Code::NotImplemented, message)
    }

    pub(crate) fn bad_parameter(
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(Code::BadParameter, message)
    }

    /// Attaches a location unless the error already has one.
    pub(crate) fn at(mut self, file: &str, line: usize) -> Self {
        if self.file.is_none() {
            self.file = Some(file.into());
            self.line = line;
        }
        self
    }

    /// Returns the code classifying the error.
    pub fn code(&self) -> Code {
        self.code
    }

    /// Returns the name of the file the error happened in, if known.
    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    /// Returns the 1-based line number, or zero if there is no location.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Returns the human readable description.
    pub fn message(&self) -> &str {
        &self.message
    }
}

//--- From

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::new(Code::ReadError, err.to_string())
    }
}

impl From<SymbolError> for Error {
    fn from(err: SymbolError) -> Self {
        Error::syntax(err.to_string())
    }
}

impl From<NameError> for Error {
    fn from(err: NameError) -> Self {
        if err.is_semantic() {
            Error::semantic(err.to_string())
        } else {
            Error::syntax(err.to_string())
        }
    }
}

impl From<TtlError> for Error {
    fn from(err: TtlError) -> Self {
        match err {
            TtlError::Syntax => Error::syntax(err.to_string()),
            TtlError::Overflow => Error::semantic(err.to_string()),
        }
    }
}

impl From<DecodeError> for Error {
    fn from(err: DecodeError) -> Self {
        Error::syntax(err.to_string())
    }
}

//--- Display and Error

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.file {
            Some(ref file) => {
                write!(f, "{}:{}: {}: {}", file, self.line, self.code, self.message)
            }
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}

impl std::error::Error for Error {}

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let codes = [
            Code::Success,
            Code::SyntaxError,
            Code::SemanticError,
            Code::OutOfMemory,
            Code::BadParameter,
            Code::ReadError,
            Code::NotImplemented,
        ];
        for (i, code) in codes.iter().enumerate() {
            assert_eq!(code.to_int(), -(i as i32));
        }
    }

    #[test]
    fn location_is_kept() {
        let err = Error::syntax("bad").at("a.zone", 3).at("b.zone", 7);
        assert_eq!(err.file(), Some("a.zone"));
        assert_eq!(err.line(), 3);
        assert_eq!(err.to_string(), "a.zone:3: syntax error: bad");
        assert_eq!(
            Error::semantic("worse").to_string(),
            "semantic error: worse"
        );
    }

    #[test]
    fn conversions() {
        assert_eq!(
            Error::from(TtlError::Overflow).code(),
            Code::SemanticError
        );
        assert_eq!(Error::from(NameError::LongLabel).code(), Code::SemanticError);
        assert_eq!(Error::from(NameError::EmptyLabel).code(), Code::SyntaxError);
        let io = io::Error::new(io::ErrorKind::Other, "gone");
        assert_eq!(Error::from(io).code(), Code::ReadError);
        assert!(!Code::ReadError.is_recoverable());
        assert!(Code::SemanticError.is_recoverable());
    }
}
