//! Booking endpoints.

use sb_models::{Booking, BookingRequest, BookingStatus};

use crate::client::{ApiClient, RequestOptions};
use crate::error::ApiResult;

impl ApiClient {
    pub async fn create_booking(&self, booking: &BookingRequest) -> ApiResult<Booking> {
        let resp = self
            .post_json("/bookings", booking, &RequestOptions::default())
            .await?;
        super::single(resp, "booking")
    }

    /// Bookings of a user, optionally filtered by status.
    pub async fn list_bookings(
        &self,
        user_id: i64,
        status: Option<BookingStatus>,
    ) -> ApiResult<Vec<Booking>> {
        let mut options = RequestOptions::default().with_query("userId", user_id);
        if let Some(s) = status {
            options = options.with_query("status", s.as_str());
        }
        let resp = self.get_json_with("/bookings", &options).await?;
        Ok(super::list(resp))
    }
}
