//! Room endpoints.

use sb_models::{Page, RoomDetail, RoomImage, RoomSearchQuery, RoomSummary};

use crate::client::{ApiClient, RequestOptions};
use crate::error::ApiResult;

impl ApiClient {
    /// Rooms, optionally filtered by title.
    pub async fn list_rooms(&self, title: Option<&str>) -> ApiResult<Vec<RoomSummary>> {
        let mut options = RequestOptions::default();
        if let Some(t) = title.map(str::trim).filter(|t| !t.is_empty()) {
            options = options.with_query("title", t);
        }
        let resp = self.get_json_with("/rooms", &options).await?;
        Ok(super::list(resp))
    }

    /// Paginated room search. A search without data is an empty page.
    pub async fn search_rooms(&self, query: &RoomSearchQuery) -> ApiResult<Page<RoomSummary>> {
        let options = RequestOptions {
            query: query.to_query(),
            ..RequestOptions::default()
        };
        let resp = self.get_json_with("/rooms/search", &options).await?;
        Ok(resp.into_data().unwrap_or_else(|| Page {
            content: Vec::new(),
            page: query.page.unwrap_or(0),
            size: query.size.unwrap_or(0),
            total_elements: 0,
            total_pages: 0,
            first: true,
            last: true,
        }))
    }

    pub async fn get_room(&self, id: i64) -> ApiResult<RoomDetail> {
        let resp = self.get_json(&format!("/rooms/{id}")).await?;
        super::single(resp, "room")
    }

    pub async fn room_image(&self, room_id: i64, image_id: i64) -> ApiResult<RoomImage> {
        let resp = self
            .get_json(&format!("/rooms/{room_id}/images/{image_id}"))
            .await?;
        super::single(resp, "room image")
    }
}
