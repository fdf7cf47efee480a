//! Record types owned by the cache and retry engines, and their on-disk shapes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A food record as handed over by the food provider
///
/// All nutrient values are per 100 units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodRecord {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    pub net_carbs: f64,
    pub carbs: f64,
    pub fat: f64,
    pub protein: f64,
    pub kcal: f64,
    #[serde(default)]
    pub serving_size: Option<f64>,
}

impl FoodRecord {
    /// Minimal record with zeroed nutrients
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            brand: None,
            net_carbs: 0.0,
            carbs: 0.0,
            fat: 0.0,
            protein: 0.0,
            kcal: 0.0,
            serving_size: None,
        }
    }

    #[must_use]
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    #[must_use]
    pub fn with_macros(mut self, net_carbs: f64, carbs: f64, fat: f64, protein: f64) -> Self {
        self.net_carbs = net_carbs;
        self.carbs = carbs;
        self.fat = fat;
        self.protein = protein;
        self
    }

    #[must_use]
    pub fn with_kcal(mut self, kcal: f64) -> Self {
        self.kcal = kcal;
        self
    }

    #[must_use]
    pub fn with_serving_size(mut self, serving_size: f64) -> Self {
        self.serving_size = Some(serving_size);
        self
    }
}

/// Denormalized snapshot of a food record, keyed by barcode
///
/// Field names match the cache document: `upc`, `foodId`, `netCarbs`, ...
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedRecord {
    #[serde(rename = "upc")]
    pub barcode: String,
    pub food_id: Uuid,
    pub name: String,
    pub net_carbs: f64,
    pub carbs: f64,
    pub fat: f64,
    pub protein: f64,
    pub kcal: f64,
    pub serving_size: Option<f64>,
    pub brand: Option<String>,
    pub last_updated: DateTime<Utc>,
}

impl CachedRecord {
    /// Copy the provider record's fields by value
    ///
    /// JSON cannot carry NaN or infinities, so non-finite nutrients become 0.
    #[must_use]
    pub fn snapshot(barcode: impl Into<String>, food: &FoodRecord, at: DateTime<Utc>) -> Self {
        Self {
            barcode: barcode.into(),
            food_id: food.id,
            name: food.name.clone(),
            net_carbs: finite_or_zero(food.net_carbs),
            carbs: finite_or_zero(food.carbs),
            fat: finite_or_zero(food.fat),
            protein: finite_or_zero(food.protein),
            kcal: finite_or_zero(food.kcal),
            serving_size: food.serving_size.map(finite_or_zero),
            brand: food.brand.clone(),
            last_updated: at,
        }
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// A barcode whose lookup failed and is waiting to be retried
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetryRecord {
    pub id: Uuid,
    #[serde(rename = "upc")]
    pub barcode: String,
    pub attempts: u32,
    pub first_attempt: DateTime<Utc>,
    pub last_attempt: DateTime<Utc>,
    pub next_retry_time: DateTime<Utc>,
}

impl RetryRecord {
    /// First registration of a failed barcode; eligible immediately
    #[must_use]
    pub fn first_failure(barcode: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            barcode: barcode.into(),
            attempts: 0,
            first_attempt: at,
            last_attempt: at,
            next_retry_time: at,
        }
    }

    /// Whether this record has used up its retries
    #[must_use]
    pub fn is_expired(&self, max_attempts: u32) -> bool {
        self.attempts >= max_attempts
    }

    /// Whether this record should be handed out for another attempt at `now`
    #[must_use]
    pub fn is_ready(&self, now: DateTime<Utc>, max_attempts: u32) -> bool {
        now >= self.next_retry_time && !self.is_expired(max_attempts)
    }
}

/// Aggregate view over the UPC cache
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub total_entries: usize,
    pub oldest_entry: Option<DateTime<Utc>>,
    pub newest_entry: Option<DateTime<Utc>>,
    pub file_size_bytes: u64,
}

/// Aggregate view over the retry queue
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetryStats {
    pub total: usize,
    pub ready_count: usize,
    pub pending_count: usize,
    pub expired_count: usize,
    pub file_size_bytes: u64,
}
