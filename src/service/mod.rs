//! Customer and address operations over the safe SQL builder.

mod addresses;
mod customers;
mod pagination;
mod query;
mod validation;
pub use addresses::AddressService;
pub use customers::{CustomerPage, CustomerService};
pub use pagination::Pagination;
pub use validation::RequestValidator;
