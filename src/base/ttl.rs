//! Time-to-live values.

use core::fmt;

//------------ Ttl -----------------------------------------------------------

/// A time-to-live value in seconds.
///
/// In a zone file, a TTL is either given as a plain decimal number of
/// seconds or as a sequence of decimal numbers each followed by a unit:
/// `s` for seconds, `m` for minutes, `h` for hours, `d` for days, and `w`
/// for weeks. Units are case-insensitive, so `1h30m` and `1H30M` are both
/// 5400 seconds.
///
/// Values are limited to 2^31 - 1 as required by RFC 2181.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u32", into = "u32")
)]
pub struct Ttl(u32);

impl Ttl {
    /// The largest allowed TTL value.
    pub const MAX: Ttl = Ttl(0x7FFF_FFFF);

    /// A TTL of one hour.
    pub const HOUR: Ttl = Ttl(3600);

    /// Creates a TTL from seconds.
    ///
    /// Values larger than [`Ttl::MAX`] are capped.
    pub const fn from_secs(secs: u32) -> Self {
        if secs > Self::MAX.0 {
            Self::MAX
        } else {
            Ttl(secs)
        }
    }

    /// Returns the TTL in seconds.
    pub const fn as_secs(self) -> u32 {
        self.0
    }

    /// Scans a TTL from its presentation format.
    pub fn scan(text: &[u8]) -> Result<Self, TtlError> {
        if text.is_empty() {
            return Err(TtlError::Syntax);
        }

        // Plain seconds.
        if text.iter().all(u8::is_ascii_digit) {
            let mut value = 0u64;
            for &ch in text {
                value = value * 10 + u64::from(ch - b'0');
                if value > u64::from(Self::MAX.0) {
                    return Err(TtlError::Overflow);
                }
            }
            return Ok(Ttl(value as u32));
        }

        let mut total = 0u64;
        let mut value = 0u64;
        let mut digits = 0;
        for &ch in text {
            if ch.is_ascii_digit() {
                value = value * 10 + u64::from(ch - b'0');
                digits += 1;
                if value > u64::from(Self::MAX.0) {
                    return Err(TtlError::Overflow);
                }
                continue;
            }
            if digits == 0 {
                return Err(TtlError::Syntax);
            }
            let unit = match ch.to_ascii_lowercase() {
                b's' => 1,
                b'm' => 60,
                b'h' => 3600,
                b'd' => 86400,
                b'w' => 604800,
                _ => return Err(TtlError::Syntax),
            };
            total += value * unit;
            if total > u64::from(Self::MAX.0) {
                return Err(TtlError::Overflow);
            }
            value = 0;
            digits = 0;
        }
        if digits != 0 {
            // Trailing number without a unit.
            return Err(TtlError::Syntax);
        }
        Ok(Ttl(total as u32))
    }
}

//--- From and TryFrom

impl From<Ttl> for u32 {
    fn from(ttl: Ttl) -> u32 {
        ttl.0
    }
}

impl TryFrom<u32> for Ttl {
    type Error = TtlError;

    fn try_from(secs: u32) -> Result<Self, Self::Error> {
        if secs > Self::MAX.0 {
            Err(TtlError::Overflow)
        } else {
            Ok(Ttl(secs))
        }
    }
}

//--- Display

impl fmt::Display for Ttl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//------------ TtlError ------------------------------------------------------

/// A TTL could not be scanned.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TtlError {
    /// The text is not a valid TTL.
    Syntax,

    /// The value exceeds 2^31 - 1 seconds.
    Overflow,
}

impl fmt::Display for TtlError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            TtlError::Syntax => "invalid time-to-live",
            TtlError::Overflow => "time-to-live exceeds 2147483647 seconds",
        })
    }
}

impl std::error::Error for TtlError {}

//============ Testing =======================================================
