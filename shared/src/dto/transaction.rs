use serde::{Deserialize, Serialize};

use super::user::UserProfile;

/// Kind of hour transfer recorded by the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// 33% deposit paid when work starts
    Prepayment,
    /// Settlement paid on confirmed completion
    Payment,
    Refund,
}

/// A ledger entry involving the current user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: i64,
    pub from_user_id: i64,
    pub to_user_id: i64,
    pub hours: f64,
    pub description: String,
    pub transaction_type: TransactionType,
    pub created_at: String,
    #[serde(default)]
    pub from_user: Option<UserProfile>,
    #[serde(default)]
    pub to_user: Option<UserProfile>,
}
