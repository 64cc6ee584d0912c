//! Address reads and writes against PostgreSQL.

use crate::error::AppError;
use crate::model::{Address, AddressFields};
use crate::service::query::{rows, scalar};
use crate::sql::{
    customer_exists, delete_address, insert_address, select_address_by_id,
    select_addresses_for_customer, update_address, Tables,
};
use sqlx::PgPool;

pub struct AddressService;

impl AddressService {
    /// Insert an address for an existing customer. `None` when the customer does not exist.
    pub async fn create(
        pool: &PgPool,
        tables: &Tables,
        customer_id: i64,
        fields: &AddressFields,
    ) -> Result<Option<Address>, AppError> {
        let q = insert_address(tables, customer_id, fields);
        Ok(rows(&q).fetch_optional(pool).await?)
    }

    /// Addresses of a customer, oldest first. `None` only when there are no rows and
    /// the customer does not exist; an existing customer without addresses yields an empty list.
    pub async fn list_for_customer(
        pool: &PgPool,
        tables: &Tables,
        customer_id: i64,
    ) -> Result<Option<Vec<Address>>, AppError> {
        let q = select_addresses_for_customer(tables, customer_id);
        let addresses: Vec<Address> = rows(&q).fetch_all(pool).await?;
        if !addresses.is_empty() {
            return Ok(Some(addresses));
        }
        let q = customer_exists(tables, customer_id);
        let exists: bool = scalar(&q).fetch_one(pool).await?;
        Ok(exists.then_some(addresses))
    }

    pub async fn read(pool: &PgPool, tables: &Tables, id: i64) -> Result<Option<Address>, AppError> {
        let q = select_address_by_id(tables, id);
        Ok(rows(&q).fetch_optional(pool).await?)
    }

    pub async fn update(
        pool: &PgPool,
        tables: &Tables,
        id: i64,
        fields: &AddressFields,
    ) -> Result<Option<Address>, AppError> {
        let q = update_address(tables, id, fields);
        Ok(rows(&q).fetch_optional(pool).await?)
    }

    pub async fn delete(pool: &PgPool, tables: &Tables, id: i64) -> Result<Option<i64>, AppError> {
        let q = delete_address(tables, id);
        Ok(scalar(&q).fetch_optional(pool).await?)
    }
}
