//! Room models and the room search query.

use serde::{Deserialize, Serialize};

/// Room as listed in search results and hotel room lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummary {
    pub id: i64,
    #[serde(default)]
    pub hotel_id: Option<i64>,
    #[serde(default, alias = "roomNumber")]
    pub title: String,
    #[serde(default, alias = "imageURL")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub hotel_name: Option<String>,
    #[serde(default)]
    pub price: f64,
}

/// Full room details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDetail {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub guest_count: u32,
    #[serde(default)]
    pub bedroom_count: u32,
    #[serde(default)]
    pub bed_count: u32,
    #[serde(default)]
    pub bath_room_count: u32,
    #[serde(default)]
    pub hotel_name: Option<String>,
    #[serde(default)]
    pub images: Vec<RoomImage>,
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomImage {
    pub id: i64,
    #[serde(rename = "imageURL", alias = "imageUrl")]
    pub image_url: String,
    #[serde(default)]
    pub size: Option<String>,
}

/// Amenity attached to a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub icon_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Optional price bounds for a hotel's room list.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PriceRange {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Filters for `GET /rooms/search`. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomSearchQuery {
    pub keyword: Option<String>,
    pub hotel_id: Option<i64>,
    pub room_type: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub max_adults: Option<u32>,
    pub max_children: Option<u32>,
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<SortDirection>,
}

impl RoomSearchQuery {
    /// Query parameters in wire order.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        let mut push = |key: &str, value: Option<String>| {
            if let Some(v) = value {
                query.push((key.to_string(), v));
            }
        };
        push("keyword", self.keyword.clone().filter(|k| !k.trim().is_empty()));
        push("hotelId", self.hotel_id.map(|v| v.to_string()));
        push("roomType", self.room_type.clone());
        push("minPrice", self.min_price.map(|v| v.to_string()));
        push("maxPrice", self.max_price.map(|v| v.to_string()));
        push("maxAdults", self.max_adults.map(|v| v.to_string()));
        push("maxChildren", self.max_children.map(|v| v.to_string()));
        push("page", self.page.map(|v| v.to_string()));
        push("size", self.size.map(|v| v.to_string()));
        push("sortBy", self.sort_by.clone());
        push("sortDirection", self.sort_direction.map(|d| d.as_str().to_string()));
        query
    }
}

/// One page of a paginated result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub first: bool,
    #[serde(default)]
    pub last: bool,
}
