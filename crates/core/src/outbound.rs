//! Outbound booking confirmation message.
//!
//! On submission the booking is rendered into a plain-text template and
//! handed to an external messaging app through a `wa.me` deep link. The
//! only contract with the receiving app is the URL-encoded text.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::catalog::PackageKey;
use crate::wizard::BookingForm;

/// Placeholder for an empty field.
const NOT_FILLED: &str = "Tidak diisi";

/// Placeholder for empty notes.
const NO_NOTES: &str = "Tidak ada catatan";

/// Deep-link base of the messaging app.
pub const DEEP_LINK_BASE: &str = "https://wa.me/";

/// Human-facing booking reference: `YV-` plus the last six digits of the
/// epoch-millisecond id.
pub fn booking_reference(id_millis: i64) -> String {
    let digits = id_millis.unsigned_abs().to_string();
    let tail = &digits[digits.len().saturating_sub(6)..];
    format!("YV-{tail}")
}

/// `id-ID` style local timestamp, e.g. `14/10/2026, 13.45.12`.
pub fn format_local_timestamp(at: &DateTime<FixedOffset>) -> String {
    at.format("%-d/%-m/%Y, %H.%M.%S").to_string()
}

fn filled(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

/// The values embedded in the confirmation template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingMessage {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub package: String,
    pub event_type: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub notes: String,
    pub payment_method: String,
    pub booking_reference: String,
    pub booked_at: String,
}

impl BookingMessage {
    pub fn from_form(form: &BookingForm, reference: String, booked_at: &DateTime<FixedOffset>) -> Self {
        Self {
            name: filled(&form.client_name, NOT_FILLED),
            email: filled(&form.client_email, NOT_FILLED),
            phone: filled(&form.client_phone, NOT_FILLED),
            package: form
                .package
                .map_or_else(|| NOT_FILLED.to_string(), PackageKey::display),
            event_type: filled(&form.event_type, NOT_FILLED),
            date: filled(&form.event_date, NOT_FILLED),
            time: filled(&form.event_time, NOT_FILLED),
            location: filled(&form.event_location, NOT_FILLED),
            notes: filled(&form.event_notes, NO_NOTES),
            payment_method: form.payment_method.label().to_string(),
            booking_reference: reference,
            booked_at: format_local_timestamp(booked_at),
        }
    }

    /// Render the plain-text template.
    pub fn render(&self) -> String {
        format!(
            "*BOOKING CONFIRMATION - YV STUDIO*\n\
             \n\
             *Detail Booking:*\n\
             ====================\n\
             *Nama:* {name}\n\
             *Email:* {email}\n\
             *No. Telepon:* {phone}\n\
             \n\
             *Paket yang Dipilih:* {package}\n\
             *Jenis Event:* {event_type}\n\
             \n\
             *Tanggal:* {date}\n\
             *Waktu:* {time}\n\
             *Lokasi:* {location}\n\
             \n\
             *Catatan Tambahan:*\n\
             {notes}\n\
             \n\
             *Metode Pembayaran:* {payment_method}\n\
             *Status Pembayaran:* Menunggu Konfirmasi Admin\n\
             \n\
             *Booking ID:* {reference}\n\
             *Waktu Booking:* {booked_at}\n\
             ==========================\n\
             \n\
             _Pesanan ini dikirim melalui website YV STUDIO_",
            name = self.name,
            email = self.email,
            phone = self.phone,
            package = self.package,
            event_type = self.event_type,
            date = self.date,
            time = self.time,
            location = self.location,
            notes = self.notes,
            payment_method = self.payment_method,
            reference = self.booking_reference,
            booked_at = self.booked_at,
        )
    }

    /// Deep link that opens the messaging app with the rendered text.
    pub fn deep_link(&self, phone_number: &str) -> String {
        format!(
            "{DEEP_LINK_BASE}{phone_number}?text={}",
            urlencoding::encode(&self.render())
        )
    }
}
