//! Hotel and province models.

use serde::{Deserialize, Serialize};

/// Hotel as listed by the catalogue endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, rename = "imageURL", alias = "imageUrl", alias = "image")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub province_name: Option<String>,
    #[serde(default)]
    pub star_rating: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub available_rooms_count: Option<i64>,
    #[serde(default)]
    pub starting_price: Option<f64>,
}

/// Province (administrative region) hotels are grouped by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Province {
    pub id: i64,
    pub province_name: String,
    #[serde(default, rename = "imageURL", alias = "imageUrl")]
    pub image_url: Option<String>,
}
