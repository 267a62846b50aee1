use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::ServerError;

/// A property record as exposed to API clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    pub id: i64,
    pub title: String,
    pub price: f64,
    pub property_type: String,
    pub bedrooms: i64,
    pub bathrooms: f64,
    pub area_sqft: f64,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub description: Option<String>,
    pub owner_id: Option<i64>,
    pub created_at: NaiveDateTime,
}

impl Listing {
    /// Price rendered as currency for prompts, e.g. `$1,250,000.00`.
    pub fn price_display(&self) -> String {
        format_usd(self.price)
    }
}

/// Client-supplied fields for create/update.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingInput {
    pub title: String,
    pub price: f64,
    pub property_type: String,
    pub bedrooms: i64,
    pub bathrooms: f64,
    pub area_sqft: f64,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl ListingInput {
    pub fn validate(&self) -> Result<(), ServerError> {
        if self.title.trim().is_empty() {
            return Err(ServerError::BadRequest("Title is required.".into()));
        }
        if self.price < 0.0 {
            return Err(ServerError::BadRequest("Price must not be negative.".into()));
        }
        Ok(())
    }
}

/// Read-side contract of the listing store. The AI handlers depend on
/// this trait rather than on the SQLite handle directly.
pub trait ListingStore {
    fn get_by_id(&self, id: i64) -> Result<Option<Listing>, ServerError>;
    fn get_all(&self) -> Result<Vec<Listing>, ServerError>;
}

/// Format a dollar amount with thousands separators and two decimals.
pub fn format_usd(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = (cents / 100).to_string();
    let rem = cents % 100;

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, ch) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{rem:02}")
}
