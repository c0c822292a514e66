use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row from the records table. Rows are written once per completed form
/// and never updated or deleted by the bot.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Record {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub phone: String,
    pub date: String,
    pub created_at: DateTime<Utc>,
}

/// A completed form ready for insert. All fields are collected before this
/// type can be constructed; `date` stays free text, exactly as entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
    pub user_id: i64,
    pub name: String,
    pub phone: String,
    pub date: String,
}
