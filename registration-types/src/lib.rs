//! Core types for the registration form.
//!
//! This crate provides the foundational, presentation-agnostic types:
//! - `Field`, `Gender` and `Vehicle` - The fields and closed option sets
//! - `Draft` and `DraftValue` - The raw, unvalidated form value
//! - `Schema` and `FieldSchema` - The declarative field rules
//! - `validate`, `Registration` and `FieldErrors` - Validation and its outcomes
//! - `SubmissionSink` - The trait for delivering validated registrations

mod field;
pub use field::Field;

pub mod options;
pub use options::{DODGEM_CAR, Gender, OptionSet, Vehicle};

mod draft_value;
pub use draft_value::DraftValue;

mod draft;
pub use draft::{Draft, DraftError};

mod schema;
pub use schema::{FieldKind, FieldSchema, MINIMUM_AGE, Messages, Schema};

mod validate;
pub use validate::{ValidValue, ValidValues, is_valid_email, validate};

mod field_errors;
pub use field_errors::FieldErrors;

mod registration;
pub use registration::{Age, Registration, RegistrationError};

mod error;
pub use error::SubmitError;

mod traits;
pub use traits::SubmissionSink;
