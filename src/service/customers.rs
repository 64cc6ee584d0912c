//! Customer reads and writes against PostgreSQL.

use crate::error::AppError;
use crate::model::{Address, AddressFields, Customer, CustomerFields, CustomerWithAddresses};
use crate::service::query::{rows, scalar, statement};
use crate::service::Pagination;
use crate::sql::{
    count_customers, delete_all_customers, delete_customer, insert_address, insert_customer,
    select_customer_by_id, select_customers_page, update_customer, CustomerFilter, Tables,
};
use sqlx::PgPool;

/// One page of the filtered customer list together with the filter-wide total.
#[derive(Debug)]
pub struct CustomerPage {
    pub rows: Vec<Customer>,
    pub total: i64,
    pub pagination: Pagination,
}

impl CustomerPage {
    pub fn total_pages(&self) -> i64 {
        self.pagination.total_pages(self.total)
    }
}

pub struct CustomerService;

impl CustomerService {
    /// Count, then fetch one page, with the same filter inside one read-only snapshot.
    pub async fn list(
        pool: &PgPool,
        tables: &Tables,
        filter: &CustomerFilter,
        pagination: Pagination,
    ) -> Result<CustomerPage, AppError> {
        let mut tx = pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;
        let count = count_customers(tables, filter);
        let total: i64 = scalar(&count).fetch_one(&mut *tx).await?;
        let page = select_customers_page(tables, filter, pagination.limit(), pagination.offset());
        let customers: Vec<Customer> = rows(&page).fetch_all(&mut *tx).await?;
        tx.commit().await?;
        Ok(CustomerPage {
            rows: customers,
            total,
            pagination,
        })
    }

    /// Insert the customer and its addresses in one transaction.
    pub async fn create(
        pool: &PgPool,
        tables: &Tables,
        customer: &CustomerFields,
        addresses: &[AddressFields],
    ) -> Result<CustomerWithAddresses, AppError> {
        let mut tx = pool.begin().await?;
        let q = insert_customer(tables, customer);
        let created: Customer = rows(&q).fetch_one(&mut *tx).await?;
        let mut created_addresses = Vec::with_capacity(addresses.len());
        for fields in addresses {
            let q = insert_address(tables, created.id, fields);
            let row: Address = rows(&q).fetch_one(&mut *tx).await?;
            created_addresses.push(row);
        }
        tx.commit().await?;
        tracing::info!(customer_id = created.id, addresses = created_addresses.len(), "customer created");
        Ok(CustomerWithAddresses {
            customer: created,
            addresses: created_addresses,
        })
    }

    pub async fn read(pool: &PgPool, tables: &Tables, id: i64) -> Result<Option<Customer>, AppError> {
        let q = select_customer_by_id(tables, id);
        Ok(rows(&q).fetch_optional(pool).await?)
    }

    /// Full replace of the text fields. `None` when no row has this id.
    pub async fn update(
        pool: &PgPool,
        tables: &Tables,
        id: i64,
        fields: &CustomerFields,
    ) -> Result<Option<Customer>, AppError> {
        let q = update_customer(tables, id, fields);
        Ok(rows(&q).fetch_optional(pool).await?)
    }

    /// Returns the deleted id, or `None` when no row matched. Addresses stay behind.
    pub async fn delete(pool: &PgPool, tables: &Tables, id: i64) -> Result<Option<i64>, AppError> {
        let q = delete_customer(tables, id);
        let deleted: Option<i64> = scalar(&q).fetch_optional(pool).await?;
        if deleted.is_some() {
            tracing::info!(customer_id = id, "customer deleted");
        }
        Ok(deleted)
    }

    /// Removes every customer row; returns how many were removed.
    pub async fn delete_all(pool: &PgPool, tables: &Tables) -> Result<u64, AppError> {
        let q = delete_all_customers(tables);
        let removed = statement(&q).execute(pool).await?.rows_affected();
        tracing::info!(removed, "all customers deleted");
        Ok(removed)
    }
}
