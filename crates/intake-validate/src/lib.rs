//! Record cleaning and validation.
//!
//! Validators never fail: every problem becomes a message in
//! [`Validation::errors`] and the offending field falls back to an empty or
//! zero value. Only a record without its required key is dropped.

pub mod batch;
pub mod clean;
pub mod dates;
pub mod entity;

pub use batch::{Batch, validate_batch};
pub use clean::{
    clean_numeric, clean_string, is_valid_cpf, is_valid_email, is_valid_phone,
    is_valid_postal_code,
};
pub use dates::parse_timestamp;
pub use entity::{Record, Validate, Validation, validate};
