//! Booking wizard state machine.
//!
//! Five linear steps: package, client details, schedule, payment method,
//! confirmation. Moving forward is gated on the validator of every step
//! being left behind; moving back is always allowed. A failed transition
//! leaves the wizard exactly as it was.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::booking::{Booking, BookingStatus};
use crate::catalog::{PackageKey, PaymentMethod};
use crate::error::CoreError;
use crate::types::{RecordId, Timestamp};

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// The five wizard steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStep {
    Package,
    Details,
    Schedule,
    Payment,
    Confirm,
}

/// Minimum step number (1-based).
pub const MIN_STEP: u8 = 1;

/// Maximum step number (1-based).
pub const MAX_STEP: u8 = 5;

impl BookingStep {
    /// Convert a 1-based step number to a `BookingStep`.
    pub fn from_number(n: u8) -> Result<Self, CoreError> {
        match n {
            1 => Ok(Self::Package),
            2 => Ok(Self::Details),
            3 => Ok(Self::Schedule),
            4 => Ok(Self::Payment),
            5 => Ok(Self::Confirm),
            _ => Err(CoreError::Validation(format!(
                "Invalid step number {n}. Must be between {MIN_STEP} and {MAX_STEP}"
            ))),
        }
    }

    /// Convert to a 1-based step number.
    pub fn to_number(self) -> u8 {
        match self {
            Self::Package => 1,
            Self::Details => 2,
            Self::Schedule => 3,
            Self::Payment => 4,
            Self::Confirm => 5,
        }
    }

    /// Title shown above the active form panel.
    pub fn label(self) -> &'static str {
        match self {
            Self::Package => "Select Package",
            Self::Details => "Client Details",
            Self::Schedule => "Event Schedule",
            Self::Payment => "Payment",
            Self::Confirm => "Confirmation",
        }
    }
}

// ---------------------------------------------------------------------------
// Form
// ---------------------------------------------------------------------------

/// Everything the visitor has entered so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingForm {
    pub package: Option<PackageKey>,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub event_type: String,
    pub event_date: String,
    pub event_time: String,
    pub event_location: String,
    pub event_notes: String,
    pub payment_method: PaymentMethod,
    pub payment_confirmed: bool,
}

impl Default for BookingForm {
    /// A cleared form with the default package and payment method selected.
    fn default() -> Self {
        Self {
            package: Some(PackageKey::default()),
            client_name: String::new(),
            client_email: String::new(),
            client_phone: String::new(),
            event_type: String::new(),
            event_date: String::new(),
            event_time: String::new(),
            event_location: String::new(),
            event_notes: String::new(),
            payment_method: PaymentMethod::default(),
            payment_confirmed: false,
        }
    }
}

impl BookingForm {
    /// The stored record for a submitted form. Status starts at pending
    /// and the price comes from the selected package.
    pub fn to_booking(&self, id: RecordId, timestamp: Timestamp) -> Booking {
        let package = self.package.unwrap_or_default();
        Booking {
            id,
            client_name: self.client_name.trim().to_string(),
            client_email: self.client_email.trim().to_string(),
            client_phone: self.client_phone.trim().to_string(),
            package: package.display(),
            price: package.price().to_string(),
            event_type: self.event_type.trim().to_string(),
            event_date: self.event_date.trim().to_string(),
            event_time: self.event_time.trim().to_string(),
            event_location: self.event_location.trim().to_string(),
            event_notes: self.event_notes.trim().to_string(),
            status: BookingStatus::Pending,
            timestamp,
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Message shown when a step's required fields are missing.
pub const MSG_REQUIRED_FIELDS: &str = "Please fill in all required fields.";

/// Message shown when no package is selected.
pub const MSG_SELECT_PACKAGE: &str = "Please select a package before proceeding.";

/// Message shown when the email does not look like an address.
pub const MSG_INVALID_EMAIL: &str = "Please enter a valid email address.";

/// Message shown when entering confirmation without the payment checkbox.
pub const MSG_CONFIRM_PAYMENT: &str = "Please confirm that you have made the payment";

/// Message shown when the submission re-check fails.
pub const MSG_INCOMPLETE_BOOKING: &str = "Please complete all required fields correctly.";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Basic `local@domain.tld` shape check.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Run the validator of a single step against the form.
pub fn validate_step(step: BookingStep, form: &BookingForm) -> Result<(), CoreError> {
    match step {
        BookingStep::Package => {
            if form.package.is_none() {
                return Err(CoreError::Validation(MSG_SELECT_PACKAGE.to_string()));
            }
        }
        BookingStep::Details => {
            if [
                &form.client_name,
                &form.client_email,
                &form.client_phone,
                &form.event_type,
            ]
            .iter()
            .any(|v| is_blank(v))
            {
                return Err(CoreError::Validation(MSG_REQUIRED_FIELDS.to_string()));
            }
            if !is_valid_email(form.client_email.trim()) {
                return Err(CoreError::Validation(MSG_INVALID_EMAIL.to_string()));
            }
        }
        BookingStep::Schedule => {
            if [&form.event_date, &form.event_time, &form.event_location]
                .iter()
                .any(|v| is_blank(v))
            {
                return Err(CoreError::Validation(MSG_REQUIRED_FIELDS.to_string()));
            }
        }
        // The payment method always has a selection.
        BookingStep::Payment | BookingStep::Confirm => {}
    }
    Ok(())
}

/// Extra conditions for entering a step, independent of where the wizard
/// is coming from.
pub fn validate_entry(target: BookingStep, form: &BookingForm) -> Result<(), CoreError> {
    if target == BookingStep::Confirm && !form.payment_confirmed {
        return Err(CoreError::Validation(MSG_CONFIRM_PAYMENT.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Summaries
// ---------------------------------------------------------------------------

const NOT_PROVIDED: &str = "Not provided";
const NOT_SELECTED: &str = "Not selected";

fn or_fallback(value: &str, fallback: &str) -> String {
    if is_blank(value) {
        fallback.to_string()
    } else {
        value.trim().to_string()
    }
}

/// Long US-style date (`Wednesday, October 14, 2026`) for an ISO
/// `YYYY-MM-DD` input. Unparseable input is shown as typed.
pub fn format_event_date(date: &str) -> String {
    if is_blank(date) {
        return NOT_SELECTED.to_string();
    }
    match NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d") {
        Ok(d) => d.format("%A, %B %-d, %Y").to_string(),
        Err(_) => date.trim().to_string(),
    }
}

/// Amounts shown on the payment step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentSummary {
    pub package: String,
    pub total: String,
    pub payment_method: String,
}

impl PaymentSummary {
    pub fn from_form(form: &BookingForm) -> Self {
        Self {
            package: form
                .package
                .map_or_else(|| NOT_SELECTED.to_string(), PackageKey::display),
            total: form
                .package
                .map_or_else(|| NOT_SELECTED.to_string(), |p| p.price().to_string()),
            payment_method: form.payment_method.label().to_string(),
        }
    }
}

/// The read-back shown on the confirmation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingSummary {
    pub package: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub payment_method: String,
}

impl BookingSummary {
    pub fn from_form(form: &BookingForm) -> Self {
        Self {
            package: form
                .package
                .map_or_else(|| NOT_SELECTED.to_string(), PackageKey::display),
            name: or_fallback(&form.client_name, NOT_PROVIDED),
            email: or_fallback(&form.client_email, NOT_PROVIDED),
            phone: or_fallback(&form.client_phone, NOT_PROVIDED),
            date: format_event_date(&form.event_date),
            time: or_fallback(&form.event_time, NOT_SELECTED),
            location: or_fallback(&form.event_location, NOT_PROVIDED),
            payment_method: form.payment_method.label().to_string(),
        }
    }
}

/// Projection recomputed when entering the payment or confirmation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepSummary {
    Payment(PaymentSummary),
    Booking(BookingSummary),
}

/// What the UI needs to draw after a successful transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepView {
    pub step: BookingStep,
    pub title: &'static str,
    pub completed: Vec<BookingStep>,
    pub summary: Option<StepSummary>,
}

// ---------------------------------------------------------------------------
// Wizard
// ---------------------------------------------------------------------------

/// The booking wizard: current step plus form state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingWizard {
    current: BookingStep,
    form: BookingForm,
}

impl Default for BookingWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingWizard {
    pub fn new() -> Self {
        Self {
            current: BookingStep::Package,
            form: BookingForm::default(),
        }
    }

    pub fn current(&self) -> BookingStep {
        self.current
    }

    pub fn form(&self) -> &BookingForm {
        &self.form
    }

    /// Mutable access for field edits. Edits never move the wizard.
    pub fn form_mut(&mut self) -> &mut BookingForm {
        &mut self.form
    }

    /// Steps before the current one.
    pub fn completed(&self) -> Vec<BookingStep> {
        (MIN_STEP..self.current.to_number())
            .filter_map(|n| BookingStep::from_number(n).ok())
            .collect()
    }

    pub fn select_package(&mut self, package: PackageKey) {
        self.form.package = Some(package);
    }

    /// Pick a package from a pricing card and jump back to the first step.
    pub fn choose_package(&mut self, package: PackageKey) -> StepView {
        self.select_package(package);
        self.current = BookingStep::Package;
        self.view()
    }

    pub fn select_payment_method(&mut self, method: PaymentMethod) {
        self.form.payment_method = method;
    }

    pub fn set_payment_confirmed(&mut self, confirmed: bool) {
        self.form.payment_confirmed = confirmed;
    }

    /// Move to `target`.
    ///
    /// Going forward runs the validator of every step from the current one
    /// up to (not including) the target, so a jump cannot skip a step with
    /// missing data. Entry rules for the target apply in either direction.
    pub fn go_to_step(&mut self, target: BookingStep) -> Result<StepView, CoreError> {
        if target > self.current {
            for n in self.current.to_number()..target.to_number() {
                validate_step(BookingStep::from_number(n)?, &self.form)?;
            }
        }
        validate_entry(target, &self.form)?;

        self.current = target;
        Ok(self.view())
    }

    /// [`go_to_step`](Self::go_to_step) by 1-based number.
    pub fn go_to_step_number(&mut self, n: u8) -> Result<StepView, CoreError> {
        self.go_to_step(BookingStep::from_number(n)?)
    }

    /// Re-check everything a booking record needs.
    pub fn validate_for_submission(&self) -> Result<(), CoreError> {
        if self.current != BookingStep::Confirm {
            return Err(CoreError::Validation(format!(
                "Bookings can only be submitted from step {MAX_STEP} ({}), currently on step {}",
                BookingStep::Confirm.label(),
                self.current.to_number()
            )));
        }
        for step in [
            BookingStep::Package,
            BookingStep::Details,
            BookingStep::Schedule,
        ] {
            if validate_step(step, &self.form).is_err() {
                return Err(CoreError::Validation(MSG_INCOMPLETE_BOOKING.to_string()));
            }
        }
        Ok(())
    }

    /// Back to step 1 with a cleared form and default selections.
    pub fn reset(&mut self) {
        self.current = BookingStep::Package;
        self.form = BookingForm::default();
    }

    /// Current view, including the summary for steps 4 and 5.
    pub fn view(&self) -> StepView {
        let summary = match self.current {
            BookingStep::Payment => Some(StepSummary::Payment(PaymentSummary::from_form(
                &self.form,
            ))),
            BookingStep::Confirm => Some(StepSummary::Booking(BookingSummary::from_form(
                &self.form,
            ))),
            _ => None,
        };
        StepView {
            step: self.current,
            title: self.current.label(),
            completed: self.completed(),
            summary,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> BookingForm {
        BookingForm {
            package: Some(PackageKey::Professional),
            client_name: "Ayu Lestari".to_string(),
            client_email: "ayu@example.com".to_string(),
            client_phone: "+62 812 0000 0000".to_string(),
            event_type: "Wedding".to_string(),
            event_date: "2026-11-21".to_string(),
            event_time: "10:00 AM".to_string(),
            event_location: "Ubud, Bali".to_string(),
            event_notes: String::new(),
            payment_method: PaymentMethod::Bank,
            payment_confirmed: true,
        }
    }

    fn wizard_with(form: BookingForm) -> BookingWizard {
        let mut wizard = BookingWizard::new();
        *wizard.form_mut() = form;
        wizard
    }

    // -- BookingStep --

    #[test]
    fn step_numbers_roundtrip() {
        for n in MIN_STEP..=MAX_STEP {
            assert_eq!(BookingStep::from_number(n).unwrap().to_number(), n);
        }
        assert!(BookingStep::from_number(0).is_err());
        assert!(BookingStep::from_number(6).is_err());
    }

    #[test]
    fn steps_are_ordered() {
        assert!(BookingStep::Package < BookingStep::Details);
        assert!(BookingStep::Payment < BookingStep::Confirm);
    }

    // -- validate_step --

    #[test]
    fn package_step_requires_selection() {
        let mut form = filled_form();
        assert!(validate_step(BookingStep::Package, &form).is_ok());
        form.package = None;
        let err = validate_step(BookingStep::Package, &form).unwrap_err();
        assert!(err.to_string().contains(MSG_SELECT_PACKAGE));
    }

    #[test]
    fn details_step_requires_all_fields() {
        for clear in 0..4 {
            let mut form = filled_form();
            match clear {
                0 => form.client_name.clear(),
                1 => form.client_email.clear(),
                2 => form.client_phone = "   ".to_string(),
                _ => form.event_type.clear(),
            }
            let err = validate_step(BookingStep::Details, &form).unwrap_err();
            assert!(err.to_string().contains(MSG_REQUIRED_FIELDS));
        }
    }

    #[test]
    fn details_step_checks_email_shape() {
        let mut form = filled_form();
        for bad in ["ayu", "ayu@example", "ayu @example.com", "@example.com"] {
            form.client_email = bad.to_string();
            let err = validate_step(BookingStep::Details, &form).unwrap_err();
            assert!(err.to_string().contains(MSG_INVALID_EMAIL), "{bad}");
        }
        form.client_email = "a.b@studio.co.id".to_string();
        assert!(validate_step(BookingStep::Details, &form).is_ok());
    }

    #[test]
    fn schedule_step_requires_date_time_location() {
        let mut form = filled_form();
        form.event_location.clear();
        assert!(validate_step(BookingStep::Schedule, &form).is_err());
        form = filled_form();
        form.event_time.clear();
        assert!(validate_step(BookingStep::Schedule, &form).is_err());
        assert!(validate_step(BookingStep::Schedule, &filled_form()).is_ok());
    }

    #[test]
    fn notes_are_optional() {
        let mut form = filled_form();
        form.event_notes.clear();
        assert!(validate_step(BookingStep::Schedule, &form).is_ok());
    }

    // -- go_to_step --

    #[test]
    fn forward_by_one_succeeds_iff_source_validates() {
        let mut form = BookingForm::default();
        form.package = None;
        let mut wizard = wizard_with(form);

        assert!(wizard.go_to_step(BookingStep::Details).is_err());
        assert_eq!(wizard.current(), BookingStep::Package);

        wizard.select_package(PackageKey::Basic);
        let view = wizard.go_to_step(BookingStep::Details).unwrap();
        assert_eq!(view.step, BookingStep::Details);
        assert_eq!(view.completed, vec![BookingStep::Package]);
        assert_eq!(view.title, "Client Details");
    }

    #[test]
    fn failed_transition_changes_nothing() {
        let mut form = filled_form();
        form.client_email = "broken".to_string();
        let mut wizard = wizard_with(form);
        wizard.go_to_step(BookingStep::Details).unwrap();
        let before = wizard.clone();

        assert!(wizard.go_to_step(BookingStep::Schedule).is_err());
        assert_eq!(wizard, before);
    }

    #[test]
    fn jump_cannot_skip_an_invalid_step() {
        let mut form = filled_form();
        form.client_phone.clear();
        let mut wizard = wizard_with(form);

        assert!(wizard.go_to_step(BookingStep::Payment).is_err());
        assert_eq!(wizard.current(), BookingStep::Package);
    }

    #[test]
    fn backward_is_unconditional() {
        let mut wizard = wizard_with(filled_form());
        wizard.go_to_step(BookingStep::Payment).unwrap();

        wizard.form_mut().client_name.clear();
        wizard.form_mut().package = None;
        let view = wizard.go_to_step(BookingStep::Details).unwrap();
        assert_eq!(view.step, BookingStep::Details);
        assert_eq!(view.completed, vec![BookingStep::Package]);
    }

    #[test]
    fn confirmation_requires_payment_checkbox() {
        let mut form = filled_form();
        form.payment_confirmed = false;
        let mut wizard = wizard_with(form);
        wizard.go_to_step(BookingStep::Payment).unwrap();

        let err = wizard.go_to_step(BookingStep::Confirm).unwrap_err();
        assert!(err.to_string().contains(MSG_CONFIRM_PAYMENT));
        assert_eq!(wizard.current(), BookingStep::Payment);

        wizard.set_payment_confirmed(true);
        let view = wizard.go_to_step(BookingStep::Confirm).unwrap();
        assert_eq!(view.completed.len(), 4);
    }

    #[test]
    fn payment_step_carries_payment_summary() {
        let mut wizard = wizard_with(filled_form());
        wizard.select_payment_method(PaymentMethod::Gopay);
        let view = wizard.go_to_step(BookingStep::Payment).unwrap();
        assert_eq!(
            view.summary,
            Some(StepSummary::Payment(PaymentSummary {
                package: "Professional - $899".to_string(),
                total: "$899".to_string(),
                payment_method: "GoPay".to_string(),
            }))
        );
    }

    #[test]
    fn confirm_step_carries_booking_summary() {
        let mut wizard = wizard_with(filled_form());
        let view = wizard.go_to_step(BookingStep::Confirm).unwrap();
        let Some(StepSummary::Booking(summary)) = view.summary else {
            panic!("expected booking summary");
        };
        assert_eq!(summary.name, "Ayu Lestari");
        assert_eq!(summary.date, "Saturday, November 21, 2026");
        assert_eq!(summary.payment_method, "Bank Transfer");
    }

    #[test]
    fn early_steps_have_no_summary() {
        let wizard = BookingWizard::new();
        assert!(wizard.view().summary.is_none());
        assert!(wizard.view().completed.is_empty());
    }

    #[test]
    fn go_to_step_number_rejects_out_of_range() {
        let mut wizard = BookingWizard::new();
        assert!(wizard.go_to_step_number(0).is_err());
        assert!(wizard.go_to_step_number(9).is_err());
    }

    #[test]
    fn choose_package_returns_to_first_step() {
        let mut wizard = wizard_with(filled_form());
        wizard.go_to_step(BookingStep::Schedule).unwrap();
        let view = wizard.choose_package(PackageKey::Cinematic);
        assert_eq!(view.step, BookingStep::Package);
        assert_eq!(wizard.form().package, Some(PackageKey::Cinematic));
    }

    // -- summaries --

    #[test]
    fn booking_summary_falls_back_when_blank() {
        let summary = BookingSummary::from_form(&BookingForm::default());
        assert_eq!(summary.name, "Not provided");
        assert_eq!(summary.date, "Not selected");
        assert_eq!(summary.time, "Not selected");
        assert_eq!(summary.package, "Professional - $899");
    }

    #[test]
    fn event_date_shown_raw_when_unparseable() {
        assert_eq!(format_event_date("next friday"), "next friday");
    }

    // -- submission & reset --

    #[test]
    fn submitted_form_becomes_pending_booking() {
        let at = chrono::DateTime::from_timestamp_millis(1_760_424_312_345).unwrap();
        let booking = filled_form().to_booking(1_760_424_312_345, at);
        assert_eq!(booking.package, "Professional - $899");
        assert_eq!(booking.price, "$899");
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.event_location, "Ubud, Bali");
        assert_eq!(booking.timestamp, at);
    }

    #[test]
    fn submission_requires_confirm_step() {
        let wizard = wizard_with(filled_form());
        assert!(wizard.validate_for_submission().is_err());
    }

    #[test]
    fn submission_rechecks_earlier_steps() {
        let mut wizard = wizard_with(filled_form());
        wizard.go_to_step(BookingStep::Confirm).unwrap();
        assert!(wizard.validate_for_submission().is_ok());

        wizard.form_mut().event_location.clear();
        let err = wizard.validate_for_submission().unwrap_err();
        assert!(err.to_string().contains(MSG_INCOMPLETE_BOOKING));
    }

    #[test]
    fn reset_restores_defaults() {
        let mut wizard = wizard_with(filled_form());
        wizard.select_payment_method(PaymentMethod::Dana);
        wizard.go_to_step(BookingStep::Confirm).unwrap();

        wizard.reset();
        assert_eq!(wizard.current(), BookingStep::Package);
        assert_eq!(wizard.form(), &BookingForm::default());
        assert_eq!(wizard.form().package, Some(PackageKey::Professional));
        assert_eq!(wizard.form().payment_method, PaymentMethod::Bank);
    }
}
