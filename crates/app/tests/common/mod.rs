#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};
use studio_app::channel::{ChannelError, MessageChannel};
use studio_app::config::AppConfig;
use studio_app::state::AppState;
use studio_core::catalog::PackageKey;
use studio_core::clock::FixedClock;
use studio_core::outbound::BookingMessage;
use studio_core::wizard::{BookingStep, BookingWizard};
use studio_events::EventBus;
use studio_store::MemoryStore;

/// Records every dispatched message; optionally fails each dispatch.
#[derive(Default)]
pub struct RecordingChannel {
    pub sent: Mutex<Vec<(String, BookingMessage)>>,
    pub fail: bool,
}

impl RecordingChannel {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn last(&self) -> Option<(String, BookingMessage)> {
        self.sent.lock().unwrap().last().cloned()
    }
}

impl MessageChannel for RecordingChannel {
    fn dispatch(&self, deep_link: &str, message: &BookingMessage) -> Result<(), ChannelError> {
        self.sent
            .lock()
            .unwrap()
            .push((deep_link.to_string(), message.clone()));
        if self.fail {
            return Err(ChannelError::Unavailable("offline".into()));
        }
        Ok(())
    }
}

pub struct TestContext {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub clock: Arc<FixedClock>,
    pub channel: Arc<RecordingChannel>,
    pub bus: Arc<EventBus>,
}

/// 2026-10-14 06:45:12 UTC, 13.45.12 at the default UTC+7 offset.
pub fn start_instant() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 14, 6, 45, 12).unwrap()
}

/// Build state over an in-memory store, a fixed clock and a recording
/// channel. Reply delays are zeroed so background tests run fast.
pub fn build_test_state() -> TestContext {
    build_test_state_with(RecordingChannel::default())
}

pub fn build_test_state_with(channel: RecordingChannel) -> TestContext {
    let config = AppConfig {
        admin_reply_delay_ms: 0,
        auto_reply_delay_ms: 0,
        ..AppConfig::default()
    };
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(FixedClock::new(start_instant()));
    let channel = Arc::new(channel);
    let bus = Arc::new(EventBus::default());
    let state = AppState::new(
        store.clone(),
        Arc::new(config),
        bus.clone(),
        clock.clone(),
        channel.clone(),
    );
    TestContext {
        state,
        store,
        clock,
        channel,
        bus,
    }
}

/// A wizard walked all the way to the confirmation step.
pub fn wizard_at_confirm(package: PackageKey) -> BookingWizard {
    let mut wizard = BookingWizard::new();
    wizard.select_package(package);
    {
        let form = wizard.form_mut();
        form.client_name = "Ayu Lestari".into();
        form.client_email = "ayu@example.com".into();
        form.client_phone = "+62 812 0000 0000".into();
        form.event_type = "Wedding".into();
        form.event_date = "2026-11-21".into();
        form.event_time = "10:00 AM".into();
        form.event_location = "Ubud, Bali".into();
    }
    wizard.set_payment_confirmed(true);
    wizard.go_to_step(BookingStep::Confirm).unwrap();
    wizard
}
