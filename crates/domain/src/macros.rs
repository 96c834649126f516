//! Macro for implementing Display and FromStr for keyword enums
//!
//! Several domain values (`DisplayType`, `ImageLayout`, `UploadKind`) are
//! stored as lowercase keywords. This macro gives each of them one mapping
//! used for both directions, with case-insensitive parsing.
//!
//! # Example
//!
//! ```rust
//! use linkpage_domain::impl_keyword_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Alignment {
//!     Left,
//!     Center,
//! }
//!
//! impl_keyword_conversions!(Alignment {
//!     Left => "left",
//!     Center => "center",
//! });
//!
//! assert_eq!("CENTER".parse::<Alignment>(), Ok(Alignment::Center));
//! ```

/// Implements Display, FromStr and `as_str` for keyword enums
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their lowercase keyword
#[macro_export]
macro_rules! impl_keyword_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Stored keyword for this value
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl ::std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $enum_name {
            type Err = ::std::string::String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => ::std::result::Result::Ok(Self::$variant),)+
                    _ => ::std::result::Result::Err(::std::format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
