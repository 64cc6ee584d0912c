//! Response envelopes. Each endpoint keeps the shape the browser UI already reads.

use serde::Serialize;

/// GET /customers.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageBody<T> {
    pub message: &'static str,
    pub data: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub total_pages: i64,
}

/// `{data: [...]}` without paging fields.
#[derive(Serialize)]
pub struct DataBody<T> {
    pub data: Vec<T>,
}

/// A message next to the flattened row it concerns (update responses).
#[derive(Serialize)]
pub struct MessageWith<T> {
    pub message: &'static str,
    #[serde(flatten)]
    pub row: T,
}

/// A message and the id of the removed row.
#[derive(Serialize)]
pub struct Deleted {
    pub message: &'static str,
    pub id: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedCount {
    pub message: &'static str,
    pub deleted_count: u64,
}
