//! Credit ledger models
//!
//! Transactions are an append-only read projection; the client never
//! edits them.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Direction of a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Credit,
    Debit,
}

/// Owning-user projection embedded in ledger rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionUser {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// A single credit ledger entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(rename = "_id")]
    pub id: String,
    /// Signed by `kind`; display uses the absolute value
    pub amount: i64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[serde(default)]
    pub description: String,
    /// Absent when the owning account was deleted
    #[serde(default)]
    pub user: Option<TransactionUser>,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Magnitude of the entry for display
    pub fn display_amount(&self) -> u64 {
        self.amount.unsigned_abs()
    }

    /// Short reference id shown in tables, e.g. last six characters uppercased
    pub fn reference(&self) -> String {
        let tail: String = self
            .id
            .chars()
            .rev()
            .take(6)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        tail.to_uppercase()
    }
}

/// Paginated transaction listing envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    #[serde(default)]
    pub history: Vec<Transaction>,
    pub total_pages: u32,
    pub total_transactions: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_parses_backend_shape() {
        let raw = serde_json::json!({
            "_id": "65f9ab12cd34ef56789a0bcd",
            "amount": -15,
            "type": "debit",
            "description": "Campaign launch: Summer Sale",
            "user": {"_id": "u42", "email": "priya@example.com"},
            "createdAt": "2024-06-02T09:15:00Z"
        });
        let tx: Transaction = serde_json::from_value(raw).unwrap();
        assert_eq!(tx.kind, TransactionType::Debit);
        assert_eq!(tx.display_amount(), 15);
        assert_eq!(tx.reference(), "9A0BCD");
    }

    #[test]
    fn missing_user_means_deleted_account() {
        let raw = serde_json::json!({
            "_id": "t1",
            "amount": 50,
            "type": "credit",
            "createdAt": "2024-06-02T09:15:00Z"
        });
        let tx: Transaction = serde_json::from_value(raw).unwrap();
        assert!(tx.user.is_none());
        assert_eq!(tx.description, "");
    }
}
