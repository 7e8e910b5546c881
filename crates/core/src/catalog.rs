//! Package catalog and payment methods offered by the booking form.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Packages
// ---------------------------------------------------------------------------

/// The three bookable packages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageKey {
    Basic,
    #[default]
    Professional,
    Cinematic,
}

/// All packages in display order.
pub const PACKAGES: &[PackageKey] = &[
    PackageKey::Basic,
    PackageKey::Professional,
    PackageKey::Cinematic,
];

impl PackageKey {
    /// Parse the `data-package` style key, ignoring case.
    pub fn from_key(s: &str) -> Result<Self, CoreError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "professional" => Ok(Self::Professional),
            "cinematic" => Ok(Self::Cinematic),
            _ => Err(CoreError::Validation(format!(
                "Unknown package '{s}'. Must be one of: basic, professional, cinematic"
            ))),
        }
    }

    pub fn as_key(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Professional => "professional",
            Self::Cinematic => "cinematic",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Professional => "Professional",
            Self::Cinematic => "Cinematic",
        }
    }

    /// Currency-prefixed price literal as shown on the pricing cards.
    pub fn price(self) -> &'static str {
        match self {
            Self::Basic => "$499",
            Self::Professional => "$899",
            Self::Cinematic => "$1,499",
        }
    }

    /// The `"name - price"` composite stored on a booking.
    pub fn display(self) -> String {
        format!("{} - {}", self.name(), self.price())
    }

    /// Find the package whose name appears in free-form package text.
    pub fn find_in(text: &str) -> Option<Self> {
        PACKAGES
            .iter()
            .copied()
            .find(|p| text.contains(p.name()))
    }
}

// ---------------------------------------------------------------------------
// Payment methods
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Bank,
    Qris,
    Dana,
    Gopay,
}

impl PaymentMethod {
    pub fn from_key(s: &str) -> Result<Self, CoreError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bank" => Ok(Self::Bank),
            "qris" => Ok(Self::Qris),
            "dana" => Ok(Self::Dana),
            "gopay" => Ok(Self::Gopay),
            _ => Err(CoreError::Validation(format!(
                "Unknown payment method '{s}'. Must be one of: bank, qris, dana, gopay"
            ))),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Bank => "Bank Transfer",
            Self::Qris => "QRIS",
            Self::Dana => "DANA",
            Self::Gopay => "GoPay",
        }
    }
}
