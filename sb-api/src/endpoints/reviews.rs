//! Review endpoints.

use sb_models::{Review, ReviewRequest};

use crate::client::{ApiClient, RequestOptions};
use crate::error::ApiResult;

impl ApiClient {
    /// Reviews of a hotel and/or room.
    pub async fn list_reviews(
        &self,
        hotel_id: Option<i64>,
        room_id: Option<i64>,
    ) -> ApiResult<Vec<Review>> {
        let mut options = RequestOptions::default();
        if let Some(id) = hotel_id {
            options = options.with_query("hotelId", id);
        }
        if let Some(id) = room_id {
            options = options.with_query("roomId", id);
        }
        let resp = self.get_json_with("/reviews", &options).await?;
        Ok(super::list(resp))
    }

    pub async fn create_review(&self, review: &ReviewRequest) -> ApiResult<Review> {
        let resp = self
            .post_json("/reviews", review, &RequestOptions::default())
            .await?;
        super::single(resp, "review")
    }
}
