//! Row types and request bodies for customers and addresses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Customer {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Address {
    pub id: i64,
    pub customer_id: i64,
    pub address_details: String,
    pub city: String,
    pub state: String,
    pub pin_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Customer row plus the addresses created alongside it.
#[derive(Debug, Serialize)]
pub struct CustomerWithAddresses {
    #[serde(flatten)]
    pub customer: Customer,
    pub addresses: Vec<Address>,
}

/// Body of POST /customers and PUT /customers/:id. Fields stay optional so a
/// missing field becomes a validation error rather than a decode error.
#[derive(Debug, Default, Deserialize)]
pub struct CustomerInput {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Only read on create.
    #[serde(default)]
    pub addresses: Vec<AddressInput>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct AddressInput {
    #[serde(default)]
    pub address_details: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub pin_code: Option<String>,
}

/// Validated customer fields, all non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerFields {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
}

/// Validated address fields, all non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressFields {
    pub address_details: String,
    pub city: String,
    pub state: String,
    pub pin_code: String,
}
