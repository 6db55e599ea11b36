use crate::ConfigurationError;

/// An electricity market administrator (ISO/RTO).
///
/// The market determines which hour-endings make up its peak window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String")
)]
pub enum Iso {
    /// Midcontinent ISO
    #[cfg_attr(feature = "serde", serde(rename = "miso"))]
    Miso,
    /// ISO New England
    #[cfg_attr(feature = "serde", serde(rename = "isone"))]
    Isone,
    /// Electric Reliability Council of Texas
    #[cfg_attr(feature = "serde", serde(rename = "ercot"))]
    Ercot,
    /// PJM Interconnection
    #[cfg_attr(feature = "serde", serde(rename = "pjm"))]
    Pjm,
    /// Southwest Power Pool
    #[cfg_attr(feature = "serde", serde(rename = "spp"))]
    Spp,
    /// Alberta Electric System Operator
    #[cfg_attr(feature = "serde", serde(rename = "aeso"))]
    Aeso,
    /// New York ISO
    #[cfg_attr(feature = "serde", serde(rename = "nyiso"))]
    Nyiso,
    /// California ISO
    #[cfg_attr(feature = "serde", serde(rename = "caiso"))]
    Caiso,
}

label_enum!(Iso, UnknownIso, {
    Miso => "miso",
    Isone => "isone",
    Ercot => "ercot",
    Pjm => "pjm",
    Spp => "spp",
    Aeso => "aeso",
    Nyiso => "nyiso",
    Caiso => "caiso",
});

/// An inclusive range of hour-endings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PeakWindow {
    /// The first peak hour-ending
    pub first: u8,
    /// The last peak hour-ending
    pub last: u8,
}

impl PeakWindow {
    /// Whether `hour` falls inside the window (both ends inclusive)
    pub fn contains(&self, hour: u8) -> bool {
        self.first <= hour && hour <= self.last
    }
}

impl Iso {
    /// The market's peak window, in hour-ending numbering.
    ///
    /// CAISO has no window on record and is rejected.
    pub fn peak_window(self) -> Result<PeakWindow, ConfigurationError> {
        match self {
            Self::Aeso | Self::Isone | Self::Nyiso | Self::Pjm | Self::Miso => Ok(PeakWindow {
                first: 8,
                last: 23,
            }),
            Self::Ercot | Self::Spp => Ok(PeakWindow { first: 7, last: 22 }),
            Self::Caiso => Err(ConfigurationError::InvalidIso(self)),
        }
    }
}

/// Returns `(first_peak_he, last_peak_he)` for the market.
pub fn get_iso_details(iso: Iso) -> Result<(u8, u8), ConfigurationError> {
    let PeakWindow { first, last } = iso.peak_window()?;
    Ok((first, last))
}
