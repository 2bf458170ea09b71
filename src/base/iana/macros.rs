//! Macros for the IANA registry types.

/// Defines a registry type as a newtype around an integer.
///
/// Every listed value becomes an associated constant and an entry in the
/// `MNEMONICS` table, which drives the textual conversions.
macro_rules! int_enum {
    ( $(#[$attr:meta])* =>
      $ianatype:ident, $inttype:path;
      $( $(#[$variant_attr:meta])* ( $variant:ident =>
                                        $value:expr, $mnemonic:expr) )* ) => {
        $(#[$attr])*
        #[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
        pub struct $ianatype($inttype);

        impl $ianatype {
            $(
                $(#[$variant_attr])*
                pub const $variant: $ianatype = $ianatype($value);
            )*

            /// All values with a mnemonic, in registry order.
            pub const MNEMONICS: &'static [($ianatype, &'static str)] = &[
                $( ($ianatype::$variant, $mnemonic), )*
            ];

            #[must_use]
            pub const fn from_int(value: $inttype) -> Self {
                $ianatype(value)
            }

            #[must_use]
            pub const fn to_int(self) -> $inttype {
                self.0
            }

            /// Looks up a mnemonic, ignoring ASCII case.
            #[must_use]
            pub fn from_mnemonic(m: &[u8]) -> Option<Self> {
                Self::MNEMONICS
                    .iter()
                    .find(|(_, name)| name.as_bytes().eq_ignore_ascii_case(m))
                    .map(|(value, _)| *value)
            }

            /// Returns the mnemonic of the value if it has one.
            #[must_use]
            pub fn to_mnemonic_str(self) -> Option<&'static str> {
                Self::MNEMONICS
                    .iter()
                    .find(|(value, _)| *value == self)
                    .map(|(_, name)| *name)
            }

            /// Appends the value in network byte order.
            pub fn compose<B: bytes::BufMut>(&self, target: &mut B) {
                target.put_slice(&self.0.to_be_bytes())
            }
        }

        impl From<$inttype> for $ianatype {
            fn from(value: $inttype) -> Self {
                $ianatype(value)
            }
        }

        impl From<$ianatype> for $inttype {
            fn from(value: $ianatype) -> Self {
                value.0
            }
        }

        impl core::fmt::Debug for $ianatype {
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                if let Some(name) = self.to_mnemonic_str() {
                    write!(f, concat!(stringify!($ianatype), "::{}"), name)
                } else {
                    write!(f, concat!(stringify!($ianatype), "({})"), self.0)
                }
            }
        }
    }
}

/// Adds the textual conversions of a registry type.
///
/// Text is either a mnemonic or the prefix followed by a decimal value, both
/// compared without regard to ASCII case. With the `serde` feature, human
/// readable formats see the text and all others the integer.
macro_rules! int_enum_str_with_prefix {
    ($ianatype:ident, $str_prefix:expr, $u8_prefix:expr, $inttype:ident,
     $error:expr) => {
        impl $ianatype {
            /// Parses a mnemonic or the generic prefixed form.
            #[must_use]
            pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
                if let Some(value) = $ianatype::from_mnemonic(bytes) {
                    return Some(value);
                }
                let prefix: &[u8] = $u8_prefix;
                if bytes.len() <= prefix.len()
                    || !bytes[..prefix.len()].eq_ignore_ascii_case(prefix)
                {
                    return None;
                }
                let mut value: $inttype = 0;
                for &ch in &bytes[prefix.len()..] {
                    if !ch.is_ascii_digit() {
                        return None;
                    }
                    value = value
                        .checked_mul(10)?
                        .checked_add($inttype::from(ch - b'0'))?;
                }
                Some($ianatype(value))
            }
        }

        impl core::str::FromStr for $ianatype {
            type Err = FromStrError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $ianatype::from_bytes(s.as_bytes()).ok_or(FromStrError(()))
            }
        }

        impl core::fmt::Display for $ianatype {
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                match self.to_mnemonic_str() {
                    Some(name) => f.write_str(name),
                    None => write!(f, "{}{}", $str_prefix, self.0),
                }
            }
        }

        #[cfg(feature = "serde")]
        impl serde::Serialize for $ianatype {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> Result<S::Ok, S::Error> {
                if serializer.is_human_readable() {
                    serializer.collect_str(self)
                } else {
                    serde::Serialize::serialize(&self.0, serializer)
                }
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> serde::Deserialize<'de> for $ianatype {
            fn deserialize<D: serde::Deserializer<'de>>(
                deserializer: D,
            ) -> Result<Self, D::Error> {
                struct TextOrInt;

                impl<'de> serde::de::Visitor<'de> for TextOrInt {
                    type Value = $ianatype;

                    fn expecting(
                        &self,
                        f: &mut core::fmt::Formatter,
                    ) -> core::fmt::Result {
                        write!(f, "a {} mnemonic or number", $str_prefix)
                    }

                    fn visit_str<E: serde::de::Error>(
                        self,
                        v: &str,
                    ) -> Result<Self::Value, E> {
                        v.parse().map_err(E::custom)
                    }

                    fn visit_u64<E: serde::de::Error>(
                        self,
                        v: u64,
                    ) -> Result<Self::Value, E> {
                        $inttype::try_from(v)
                            .map($ianatype)
                            .map_err(E::custom)
                    }
                }

                if deserializer.is_human_readable() {
                    deserializer.deserialize_any(TextOrInt)
                } else {
                    <$inttype as serde::Deserialize>::deserialize(deserializer)
                        .map($ianatype)
                }
            }
        }

        /// A string did not name a known value.
        #[derive(Clone, Debug)]
        pub struct FromStrError(());

        impl std::error::Error for FromStrError {}

        impl core::fmt::Display for FromStrError {
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                f.write_str($error)
            }
        }
    };
}
