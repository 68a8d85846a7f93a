// Plant record model - the wire shape matches the persisted JSON exactly

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// The fixed set of categories a plant can belong to.
/// `Indoor` is the fallback when coercing unrecognized persisted values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    Succulents,
    Tropical,
    Flowering,
    Herbs,
    Cacti,
    Ferns,
    Vines,
    Trees,
    #[default]
    Indoor,
    Outdoor,
    Semidoor,
    #[serde(rename = "Air-Purifying")]
    AirPurifying,
    #[serde(rename = "Low Light")]
    LowLight,
}

impl Category {
    /// Every category, in pick-list order.
    pub const ALL: [Category; 13] = [
        Category::Succulents,
        Category::Tropical,
        Category::Flowering,
        Category::Herbs,
        Category::Cacti,
        Category::Ferns,
        Category::Vines,
        Category::Trees,
        Category::Indoor,
        Category::Outdoor,
        Category::Semidoor,
        Category::AirPurifying,
        Category::LowLight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Succulents => "Succulents",
            Category::Tropical => "Tropical",
            Category::Flowering => "Flowering",
            Category::Herbs => "Herbs",
            Category::Cacti => "Cacti",
            Category::Ferns => "Ferns",
            Category::Vines => "Vines",
            Category::Trees => "Trees",
            Category::Indoor => "Indoor",
            Category::Outdoor => "Outdoor",
            Category::Semidoor => "Semidoor",
            Category::AirPurifying => "Air-Purifying",
            Category::LowLight => "Low Light",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown category: '{s}'"))
    }
}

/// Whether a plant is owned or only wished for. Records persisted before
/// the wishlist existed have no status field; serde's default keeps them
/// behaving as owned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Owned,
    Wishlist,
}

/// One collection item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variety: Option<String>,
    pub category: Category,
    pub image_url: String,
    pub watering_frequency: String,
    pub sunlight_requirement: String,
    pub description: String,
    pub date_added: DateTime<Utc>,
    #[serde(default)]
    pub status: Status,
}

impl Plant {
    /// Create a fresh record: new UUID, current timestamp, owned status,
    /// remaining fields empty.
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        Plant {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            species: None,
            variety: None,
            category,
            image_url: String::new(),
            watering_frequency: String::new(),
            sunlight_requirement: String::new(),
            description: String::new(),
            date_added: Utc::now(),
            status: Status::default(),
        }
    }

    /// Grouping key for species views: `species` falling back to `name`,
    /// trimmed but otherwise as entered.
    pub fn species_key(&self) -> &str {
        match &self.species {
            Some(s) if !s.trim().is_empty() => s.trim(),
            _ => self.name.trim(),
        }
    }
}

/// Normalized `(species-or-name, variety)` pair used to detect duplicate
/// plants. Normalization is trim + Unicode lowercase; a missing variety
/// normalizes to the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityKey {
    species: String,
    variety: String,
}

impl IdentityKey {
    pub fn of(plant: &Plant) -> Self {
        IdentityKey {
            species: plant.species_key().to_lowercase(),
            variety: plant
                .variety
                .as_deref()
                .map(|v| v.trim().to_lowercase())
                .unwrap_or_default(),
        }
    }
}
