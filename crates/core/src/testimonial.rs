//! Client testimonials and the review gate in front of publication.

use serde::{Deserialize, Serialize};

use crate::types::RecordId;

/// Highest rating a testimonial can carry.
pub const MAX_RATING: u8 = 5;

/// A testimonial as stored in the `testimonials` collection. Only
/// `verified` testimonials are shown publicly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub avatar: String,
    pub rating: u8,
    pub text: String,
    #[serde(default)]
    pub service: Option<String>,
    pub date: String,
    #[serde(default)]
    pub verified: bool,
}

impl Testimonial {
    /// Filled and empty stars, e.g. `★★★★☆`. Ratings above five are capped.
    pub fn stars(&self) -> String {
        let filled = self.rating.min(MAX_RATING) as usize;
        format!(
            "{}{}",
            "★".repeat(filled),
            "☆".repeat(MAX_RATING as usize - filled)
        )
    }

    pub fn details_text(&self) -> String {
        format!(
            "Testimonial Details:\n\n\
             Name: {}\n\
             Email: {}\n\
             Rating: {}/{MAX_RATING}\n\
             Service: {}\n\
             Date: {}\n\n\
             Testimonial:\n\"{}\"",
            self.name,
            self.email,
            self.rating,
            self.service.as_deref().unwrap_or("Not specified"),
            self.date,
            self.text,
        )
    }
}

/// Testimonials waiting for admin review.
pub fn pending(testimonials: &[Testimonial]) -> Vec<&Testimonial> {
    testimonials.iter().filter(|t| !t.verified).collect()
}

/// Testimonials visible on the public site.
pub fn published(testimonials: &[Testimonial]) -> Vec<&Testimonial> {
    testimonials.iter().filter(|t| t.verified).collect()
}
