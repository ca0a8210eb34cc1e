//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod athlete;
pub mod pagination;
pub mod validation;

pub use athlete::{AthleteName, IdentityNumber, NewAthlete};
pub use pagination::{Paginated, Pagination, PaginationParams};
pub use validation::{FieldError, ValidationError, ValidationErrors};
