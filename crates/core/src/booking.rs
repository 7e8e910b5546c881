//! Booking records, status values, and price handling.
//!
//! A booking is created by the wizard (or by an admin by hand), mutated only
//! through status edits, and removed only by an admin delete.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::catalog::PackageKey;
use crate::error::CoreError;
use crate::types::{RecordId, Timestamp};

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle of a booking as seen by the studio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Done,
}

/// All valid status strings.
pub const VALID_STATUSES: &[&str] = &["pending", "confirmed", "done"];

impl BookingStatus {
    /// Parse a status string, e.g. from the admin edit prompt.
    ///
    /// Surrounding whitespace is ignored; anything outside
    /// [`VALID_STATUSES`] is rejected rather than coerced.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s.trim() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "done" => Ok(Self::Done),
            _ => Err(CoreError::Validation(format!(
                "Invalid booking status '{s}'. Must be one of: {}",
                VALID_STATUSES.join(", ")
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Done => "done",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Done => "Done",
        }
    }
}

// ---------------------------------------------------------------------------
// Booking record
// ---------------------------------------------------------------------------

/// A persisted booking, as stored in the `bookings` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: RecordId,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    /// `"Name - $price"` composite.
    pub package: String,
    /// Currency-prefixed literal, e.g. `"$1,499"`.
    pub price: String,
    pub event_type: String,
    pub event_date: String,
    #[serde(default)]
    pub event_time: String,
    #[serde(default)]
    pub event_location: String,
    #[serde(default)]
    pub event_notes: String,
    pub status: BookingStatus,
    pub timestamp: Timestamp,
}

impl Booking {
    /// Numeric value of [`Booking::price`], if it parses.
    pub fn price_value(&self) -> Option<u64> {
        parse_price(&self.price)
    }

    /// Multi-line summary shown by the admin "view" action.
    pub fn details_text(&self) -> String {
        format!(
            "Booking Details:\n\n\
             Client: {}\n\
             Email: {}\n\
             Phone: {}\n\
             Package: {}\n\
             Event Type: {}\n\
             Date: {}\n\
             Status: {}\n\
             Booked on: {}",
            self.client_name,
            self.client_email,
            self.client_phone,
            self.package,
            self.event_type,
            self.event_date,
            self.status.as_str(),
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
        )
    }
}

// ---------------------------------------------------------------------------
// Admin-entered bookings
// ---------------------------------------------------------------------------

/// Input for a booking added by hand from the admin dashboard.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    #[validate(length(min = 1, message = "Client name is required"))]
    pub client_name: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub client_email: String,
    #[validate(length(min = 1, message = "Client phone is required"))]
    pub client_phone: String,
    #[validate(length(min = 1, message = "Package is required"))]
    pub package: String,
    #[validate(length(min = 1, message = "Event date is required"))]
    pub event_date: String,
    #[serde(default)]
    pub status: BookingStatus,
}

impl NewBooking {
    /// Price inferred from the package text; `$0` for unknown packages.
    pub fn derived_price(&self) -> &'static str {
        PackageKey::find_in(&self.package).map_or("$0", PackageKey::price)
    }

    /// Event type inferred from the package text (the part before `" - "`).
    pub fn derived_event_type(&self) -> String {
        self.package
            .split(" - ")
            .next()
            .unwrap_or_default()
            .to_string()
    }

    /// Validate and turn the input into a record.
    pub fn into_booking(self, id: RecordId, timestamp: Timestamp) -> Result<Booking, CoreError> {
        self.validate()?;
        let price = self.derived_price().to_string();
        let event_type = self.derived_event_type();
        Ok(Booking {
            id,
            client_name: self.client_name,
            client_email: self.client_email,
            client_phone: self.client_phone,
            package: self.package,
            price,
            event_type,
            event_date: self.event_date,
            event_time: String::new(),
            event_location: String::new(),
            event_notes: String::new(),
            status: self.status,
            timestamp,
        })
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// The admin bookings table filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookingFilter {
    #[default]
    All,
    Status(BookingStatus),
}

impl BookingFilter {
    /// Parse `"all"` or a status string.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        if s.trim() == "all" {
            return Ok(Self::All);
        }
        BookingStatus::from_str_db(s).map(Self::Status)
    }

    pub fn matches(&self, booking: &Booking) -> bool {
        match self {
            Self::All => true,
            Self::Status(status) => booking.status == *status,
        }
    }
}

// ---------------------------------------------------------------------------
// Prices
// ---------------------------------------------------------------------------

/// Parse a currency-prefixed price literal back to a whole number.
///
/// Leading currency symbols and whitespace are dropped, thousands
/// separators are ignored, and parsing stops at the first other character
/// (so `"$899.50"` reads as 899). Returns `None` if no digits remain.
pub fn parse_price(price: &str) -> Option<u64> {
    let digits: String = price
        .trim()
        .trim_start_matches(|c: char| !c.is_ascii_digit())
        .chars()
        .filter(|c| *c != ',')
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// Format a whole amount as `"$1,499"`.
pub fn format_price(amount: u64) -> String {
    let raw = amount.to_string();
    let mut grouped = String::with_capacity(raw.len() + raw.len() / 3);
    for (i, ch) in raw.chars().enumerate() {
        if i > 0 && (raw.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${grouped}")
}
