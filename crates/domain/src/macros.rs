//! Macro for implementing Display and FromStr for status enums
//!
//! Gives state and error-cause enums a stable snake_case string form that is
//! used in log fields, metrics labels and configuration.
//!
//! # Example
//!
//! ```rust
//! use credwatch_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum LookupPhase {
//!     Token,
//!     Hashing,
//!     Network,
//! }
//!
//! impl_domain_status_conversions!(LookupPhase {
//!     Token => "token",
//!     Hashing => "hashing",
//!     Network => "network",
//! });
//!
//! assert_eq!(LookupPhase::Hashing.to_string(), "hashing");
//! ```

/// Implements Display and FromStr traits for status enums
///
/// - Display: writes the lowercase string for the variant
/// - FromStr: case-insensitive parse, error message names the enum
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => write!(f, $str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
