//! Payment method endpoints.

use sb_models::PaymentMethod;

use crate::client::ApiClient;
use crate::error::ApiResult;

impl ApiClient {
    pub async fn list_payment_methods(&self) -> ApiResult<Vec<PaymentMethod>> {
        let resp = self.get_json("/payment-methods").await?;
        Ok(super::list(resp))
    }
}
