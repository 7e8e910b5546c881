/// Booking and testimonial ids are epoch-millisecond derived integers.
pub type RecordId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
