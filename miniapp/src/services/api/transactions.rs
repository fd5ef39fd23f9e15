//! # Transaction History Endpoint

use shared::dto::Transaction;

use super::client::ApiClient;
use super::error::ApiError;

impl ApiClient {
    /// Ledger entries where `user_id` is payer or payee, newest first
    pub async fn transactions(&self, token: &str, user_id: i64) -> Result<Vec<Transaction>, ApiError> {
        let path = format!("/transactions/{}", user_id);
        let request = self.client.get(self.url(&path)).bearer_auth(token);
        self.send_json("transactions", request).await
    }
}
