//! Request validation: every text field of a customer or address is required and non-blank.

use crate::error::AppError;
use crate::model::{AddressFields, AddressInput, CustomerFields, CustomerInput};

/// Maximum number of addresses accepted alongside a new customer.
pub(crate) const MAX_ADDRESSES_PER_CREATE: usize = 100;

pub struct RequestValidator;

impl RequestValidator {
    /// Validate the three customer fields (create and update).
    pub fn customer(input: &CustomerInput) -> Result<CustomerFields, AppError> {
        reject_nul(
            None,
            &[
                ("first_name", input.first_name.as_deref()),
                ("last_name", input.last_name.as_deref()),
                ("phone_number", input.phone_number.as_deref()),
            ],
        )?;
        let first_name = present(input.first_name.as_deref());
        let last_name = present(input.last_name.as_deref());
        let phone_number = present(input.phone_number.as_deref());
        match (first_name, last_name, phone_number) {
            (Some(f), Some(l), Some(p)) => Ok(CustomerFields {
                first_name: f.to_string(),
                last_name: l.to_string(),
                phone_number: p.to_string(),
            }),
            (f, l, p) => Err(required_error(
                None,
                &[("first_name", f), ("last_name", l), ("phone_number", p)],
            )),
        }
    }

    pub fn address(input: &AddressInput) -> Result<AddressFields, AppError> {
        Self::address_at(input, None)
    }

    /// Validate a create-customer body: the customer fields and every nested address.
    pub fn new_customer(input: &CustomerInput) -> Result<(CustomerFields, Vec<AddressFields>), AppError> {
        let customer = Self::customer(input)?;
        if input.addresses.len() > MAX_ADDRESSES_PER_CREATE {
            return Err(AppError::BadRequest(format!(
                "at most {} addresses per customer create",
                MAX_ADDRESSES_PER_CREATE
            )));
        }
        let addresses = input
            .addresses
            .iter()
            .enumerate()
            .map(|(i, a)| Self::address_at(a, Some(i)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok((customer, addresses))
    }

    fn address_at(input: &AddressInput, index: Option<usize>) -> Result<AddressFields, AppError> {
        reject_nul(
            index,
            &[
                ("address_details", input.address_details.as_deref()),
                ("city", input.city.as_deref()),
                ("state", input.state.as_deref()),
                ("pin_code", input.pin_code.as_deref()),
            ],
        )?;
        let details = present(input.address_details.as_deref());
        let city = present(input.city.as_deref());
        let state = present(input.state.as_deref());
        let pin = present(input.pin_code.as_deref());
        match (details, city, state, pin) {
            (Some(d), Some(c), Some(s), Some(p)) => Ok(AddressFields {
                address_details: d.to_string(),
                city: c.to_string(),
                state: s.to_string(),
                pin_code: p.to_string(),
            }),
            (d, c, s, p) => Err(required_error(
                index,
                &[("address_details", d), ("city", c), ("state", s), ("pin_code", p)],
            )),
        }
    }
}

/// Value as given when it has non-whitespace content.
fn present(v: Option<&str>) -> Option<&str> {
    v.filter(|s| !s.trim().is_empty())
}

/// PostgreSQL text cannot hold NUL.
fn reject_nul(index: Option<usize>, fields: &[(&str, Option<&str>)]) -> Result<(), AppError> {
    match fields.iter().find(|(_, v)| v.is_some_and(|s| s.contains('\0'))) {
        Some((name, _)) => Err(AppError::Validation(format!(
            "{}{} must not contain NUL characters",
            prefix(index),
            name
        ))),
        None => Ok(()),
    }
}

fn prefix(index: Option<usize>) -> String {
    index.map(|i| format!("addresses[{}]: ", i)).unwrap_or_default()
}

fn required_error(index: Option<usize>, fields: &[(&str, Option<&str>)]) -> AppError {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, v)| v.is_none())
        .map(|(name, _)| *name)
        .collect();
    AppError::Validation(format!(
        "{}All fields are required (missing: {})",
        prefix(index),
        missing.join(", ")
    ))
}
