use bizscout_store::Review;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Business model - the star of the show
///
/// Transient: sourced from the external API on every request, never owned
/// locally. Only bookmarks cache a snapshot of the display fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Business {
    pub id: String,
    pub name: String,
    pub category: String,
    pub location: String,
    pub rating: f64,
    pub review_count: u32,
    pub deals: Vec<String>,
}

/// How we want results sorted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Rating,
    Reviews,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Rating => "rating",
            SortBy::Reviews => "reviews",
        }
    }
}

/// Search request as the handler receives it
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub term: String,
    pub location: String,
    pub sort: SortBy,
}

/// One row in a search result list: external record plus local state
#[derive(Debug, Clone)]
pub struct BusinessSummary {
    pub business: Business,
    pub is_bookmarked: bool,
    pub local_review_count: u32,
    pub combined_rating: f64,
}

impl BusinessSummary {
    /// External reviews plus ours
    pub fn total_review_count(&self) -> u32 {
        self.business.review_count + self.local_review_count
    }
}

/// Detail page payload: external record merged with everything we know locally
#[derive(Debug, Clone)]
pub struct BusinessDetail {
    pub business: Business,
    pub is_bookmarked: bool,
    pub reviews: Vec<Review>,
    pub combined_rating: f64,
    pub total_reviews: u32,
}

/// Blend the external rating with the local average, one-decimal rounding.
/// With no local reviews the external rating stands as-is.
pub fn combined_rating(external: f64, local_average: Option<f64>) -> f64 {
    match local_average {
        Some(avg) => ((external + avg) / 2.0 * 10.0).round() / 10.0,
        None => external,
    }
}

/// Ratings are 1-5 stars, nothing else
pub fn validate_rating(rating: u8) -> Result<()> {
    if !(1..=5).contains(&rating) {
        return Err(Error::Validation(format!(
            "rating must be between 1 and 5, got {}",
            rating
        )));
    }
    Ok(())
}
