//! Booking and payment method models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "CONFIRMED" => Ok(Self::Confirmed),
            "CANCELLED" | "CANCELED" => Ok(Self::Cancelled),
            other => Err(format!("unknown booking status: {other}")),
        }
    }
}

/// Booking as returned by the booking endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub booking_id: i64,
    pub room_id: i64,
    pub hotel_id: i64,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    #[serde(default)]
    pub room_name: Option<String>,
    #[serde(default)]
    pub hotel_name: Option<String>,
    #[serde(default, rename = "imageURL", alias = "imageUrl")]
    pub image_url: Option<String>,
    pub status: BookingStatus,
}

/// Body of `POST /bookings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub user_id: i64,
    pub room_id: i64,
    pub hotel_id: i64,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub adults: u32,
    pub children: u32,
    pub infants: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_option: Option<String>,
    pub payment_method_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    pub id: i64,
    #[serde(default)]
    pub code: Option<String>,
    pub name: String,
    #[serde(default, rename = "imageURL", alias = "imageUrl")]
    pub image_url: Option<String>,
}
