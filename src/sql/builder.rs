//! Builds parameterized SELECT, INSERT, UPDATE, DELETE for the customer and address tables.
//! Identifiers come from configuration only; every user-supplied value is a `$n` parameter.

use crate::model::{AddressFields, CustomerFields};
use crate::sql::BindValue;

const CUSTOMER_COLUMNS: &str = "id, first_name, last_name, phone_number, created_at, updated_at";
const ADDRESS_COLUMNS: &str =
    "id, customer_id, address_details, city, state, pin_code, created_at, updated_at";

/// Quote identifier for PostgreSQL (safe: only from config).
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified table name.
fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(table))
}

/// Schema-qualified names of the two tables.
#[derive(Clone, Debug)]
pub struct Tables {
    pub schema: String,
    pub customers: String,
    pub addresses: String,
}

impl Tables {
    pub fn new(schema: &str) -> Self {
        Tables {
            schema: quoted(schema),
            customers: qualified_table(schema, "customers"),
            addresses: qualified_table(schema, "addresses"),
        }
    }
}

#[derive(Debug, Default)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf::default()
    }

    fn push_param(&mut self, v: impl Into<BindValue>) -> u32 {
        self.params.push(v.into());
        self.params.len() as u32
    }
}

/// Optional filters of the customer list. `None` means "no restriction".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CustomerFilter {
    /// Case-insensitive substring of first name, last name or phone number.
    pub search: Option<String>,
    /// Case-insensitive substring of the city of any of the customer's addresses.
    pub city: Option<String>,
}

impl CustomerFilter {
    /// AND of all present predicates; empty string when none apply.
    fn where_clause(&self, tables: &Tables, q: &mut QueryBuf) -> String {
        let mut where_parts = Vec::new();
        if let Some(search) = &self.search {
            let n = q.push_param(contains_pattern(search));
            where_parts.push(format!(
                "(first_name ILIKE ${0} ESCAPE '\\' OR last_name ILIKE ${0} ESCAPE '\\' OR phone_number ILIKE ${0} ESCAPE '\\')",
                n
            ));
        }
        if let Some(city) = &self.city {
            let n = q.push_param(contains_pattern(city));
            where_parts.push(format!(
                "id IN (SELECT customer_id FROM {} WHERE city ILIKE ${} ESCAPE '\\')",
                tables.addresses, n
            ));
        }
        if where_parts.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", where_parts.join(" AND "))
        }
    }
}

/// `%term%` with LIKE metacharacters escaped so they match literally.
fn contains_pattern(term: &str) -> String {
    let mut out = String::with_capacity(term.len() + 2);
    out.push('%');
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('%');
    out
}

/// COUNT(*) of customers matching the filter.
pub fn count_customers(tables: &Tables, filter: &CustomerFilter) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_clause = filter.where_clause(tables, &mut q);
    q.sql = format!("SELECT COUNT(*) FROM {}{}", tables.customers, where_clause);
    q
}

/// One page of customers matching the filter, ordered by id.
pub fn select_customers_page(tables: &Tables, filter: &CustomerFilter, limit: i64, offset: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_clause = filter.where_clause(tables, &mut q);
    let limit_param = q.push_param(limit);
    let offset_param = q.push_param(offset);
    q.sql = format!(
        "SELECT {} FROM {}{} ORDER BY id LIMIT ${} OFFSET ${}",
        CUSTOMER_COLUMNS, tables.customers, where_clause, limit_param, offset_param
    );
    q
}

pub fn select_customer_by_id(tables: &Tables, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(id);
    q.sql = format!("SELECT {} FROM {} WHERE id = ${}", CUSTOMER_COLUMNS, tables.customers, n);
    q
}

pub fn customer_exists(tables: &Tables, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(id);
    q.sql = format!("SELECT EXISTS (SELECT 1 FROM {} WHERE id = ${})", tables.customers, n);
    q
}

pub fn insert_customer(tables: &Tables, fields: &CustomerFields) -> QueryBuf {
    let mut q = QueryBuf::new();
    let f = q.push_param(fields.first_name.as_str());
    let l = q.push_param(fields.last_name.as_str());
    let p = q.push_param(fields.phone_number.as_str());
    q.sql = format!(
        "INSERT INTO {} (first_name, last_name, phone_number) VALUES (${}, ${}, ${}) RETURNING {}",
        tables.customers, f, l, p, CUSTOMER_COLUMNS
    );
    q
}

/// Full replace of the three text fields; refreshes updated_at.
pub fn update_customer(tables: &Tables, id: i64, fields: &CustomerFields) -> QueryBuf {
    let mut q = QueryBuf::new();
    let f = q.push_param(fields.first_name.as_str());
    let l = q.push_param(fields.last_name.as_str());
    let p = q.push_param(fields.phone_number.as_str());
    let id_param = q.push_param(id);
    q.sql = format!(
        "UPDATE {} SET first_name = ${}, last_name = ${}, phone_number = ${}, updated_at = NOW() WHERE id = ${} RETURNING {}",
        tables.customers, f, l, p, id_param, CUSTOMER_COLUMNS
    );
    q
}

/// Addresses of the customer are left in place.
pub fn delete_customer(tables: &Tables, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(id);
    q.sql = format!("DELETE FROM {} WHERE id = ${} RETURNING id", tables.customers, n);
    q
}

pub fn delete_all_customers(tables: &Tables) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("DELETE FROM {}", tables.customers);
    q
}

/// INSERT guarded by the customer's existence: returns no row when the customer is missing.
pub fn insert_address(tables: &Tables, customer_id: i64, fields: &AddressFields) -> QueryBuf {
    let mut q = QueryBuf::new();
    let c = q.push_param(customer_id);
    let d = q.push_param(fields.address_details.as_str());
    let city = q.push_param(fields.city.as_str());
    let s = q.push_param(fields.state.as_str());
    let p = q.push_param(fields.pin_code.as_str());
    q.sql = format!(
        "INSERT INTO {} (customer_id, address_details, city, state, pin_code) \
         SELECT ${}, ${}, ${}, ${}, ${} WHERE EXISTS (SELECT 1 FROM {} WHERE id = ${}) RETURNING {}",
        tables.addresses, c, d, city, s, p, tables.customers, c, ADDRESS_COLUMNS
    );
    q
}

pub fn select_addresses_for_customer(tables: &Tables, customer_id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(customer_id);
    q.sql = format!(
        "SELECT {} FROM {} WHERE customer_id = ${} ORDER BY id",
        ADDRESS_COLUMNS, tables.addresses, n
    );
    q
}

pub fn select_address_by_id(tables: &Tables, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(id);
    q.sql = format!("SELECT {} FROM {} WHERE id = ${}", ADDRESS_COLUMNS, tables.addresses, n);
    q
}

/// Replaces the four text fields; customer_id is never reassigned.
pub fn update_address(tables: &Tables, id: i64, fields: &AddressFields) -> QueryBuf {
    let mut q = QueryBuf::new();
    let d = q.push_param(fields.address_details.as_str());
    let city = q.push_param(fields.city.as_str());
    let s = q.push_param(fields.state.as_str());
    let p = q.push_param(fields.pin_code.as_str());
    let id_param = q.push_param(id);
    q.sql = format!(
        "UPDATE {} SET address_details = ${}, city = ${}, state = ${}, pin_code = ${}, updated_at = NOW() WHERE id = ${} RETURNING {}",
        tables.addresses, d, city, s, p, id_param, ADDRESS_COLUMNS
    );
    q
}

pub fn delete_address(tables: &Tables, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(id);
    q.sql = format!("DELETE FROM {} WHERE id = ${} RETURNING id", tables.addresses, n);
    q
}
