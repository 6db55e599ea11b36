/// Implements `FromStr`, `Display` and `TryFrom<String>` for a label enum,
/// matching labels case-insensitively.
macro_rules! label_enum {
    ($enum:ident, $error:ident, { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $enum {
            /// Every variant, in declaration order
            pub const ALL: &'static [$enum] = &[$($enum::$variant),+];

            /// The canonical label for this variant
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($enum::$variant => $label),+
                }
            }
        }

        impl std::str::FromStr for $enum {
            type Err = crate::ConfigurationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($label) {
                        return Ok($enum::$variant);
                    }
                )+
                Err(crate::ConfigurationError::$error(s.to_owned()))
            }
        }

        impl TryFrom<String> for $enum {
            type Error = crate::ConfigurationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl std::fmt::Display for $enum {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

mod block;
mod frequency;
mod iso;
mod map;
mod price;
mod request;
mod volume;

pub use block::Block;
pub use frequency::Frequency;
pub use iso::{Iso, PeakWindow, get_iso_details};
pub use map::Map;
pub use price::{PriceRow, RequiredHour, Special};
pub use request::{
    BlockPrices, CreatePricesRequest, MergeRequest, MergedPrices, PriceResponse,
    ScrubPricesRequest, TranslateRequest,
};
pub use volume::{BlockRow, BlockTable, VolumeUnit};

// Dates travel as `YYYY-MM-DD` and date-hours as `YYYY-MM-DD HH:MM`, which is
// what upstream price feeds emit.
#[cfg(feature = "serde")]
time::serde::format_description!(ymd, Date, "[year]-[month]-[day]");

#[cfg(feature = "serde")]
time::serde::format_description!(
    ymd_hm,
    PrimitiveDateTime,
    "[year]-[month]-[day] [hour]:[minute]"
);
