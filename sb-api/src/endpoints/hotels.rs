//! Hotel endpoints.

use sb_models::{Hotel, PriceRange, RoomSummary};

use crate::client::{ApiClient, RequestOptions};
use crate::error::ApiResult;

impl ApiClient {
    /// All hotels.
    pub async fn list_hotels(&self) -> ApiResult<Vec<Hotel>> {
        let resp = self.get_json("/hotels").await?;
        Ok(super::list(resp))
    }

    /// Top rated hotels.
    pub async fn best_hotels(&self, limit: u32) -> ApiResult<Vec<Hotel>> {
        let options = RequestOptions::default().with_query("limit", limit);
        let resp = self.get_json_with("/hotels/best", &options).await?;
        Ok(super::list(resp))
    }

    pub async fn get_hotel(&self, id: i64) -> ApiResult<Hotel> {
        let resp = self.get_json(&format!("/hotels/{id}")).await?;
        super::single(resp, "hotel")
    }

    /// Hotels of one province, optionally sorted (e.g. "price", "rating").
    pub async fn hotels_by_province(
        &self,
        province_id: i64,
        sort_by: Option<&str>,
    ) -> ApiResult<Vec<Hotel>> {
        let mut options = RequestOptions::default();
        if let Some(sort) = sort_by {
            options = options.with_query("sortBy", sort);
        }
        let resp = self
            .get_json_with(&format!("/{province_id}/hotels"), &options)
            .await?;
        Ok(super::list(resp))
    }

    /// Rooms of one hotel within an optional price range.
    pub async fn hotel_rooms(
        &self,
        hotel_id: i64,
        range: PriceRange,
        sort_by: Option<&str>,
    ) -> ApiResult<Vec<RoomSummary>> {
        let mut options = RequestOptions::default();
        if let Some(min) = range.min_price {
            options = options.with_query("minPrice", min);
        }
        if let Some(max) = range.max_price {
            options = options.with_query("maxPrice", max);
        }
        if let Some(sort) = sort_by {
            options = options.with_query("sortBy", sort);
        }
        let resp = self
            .get_json_with(&format!("/hotels/{hotel_id}/rooms"), &options)
            .await?;
        Ok(super::list(resp))
    }
}
