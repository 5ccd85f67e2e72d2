//! # registration-form
//!
//! A registration form: bind controls to a draft, validate it against the
//! registration schema on submit, and deliver valid registrations to a
//! submission sink.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use registration_form::{Field, FormController, HttpSink, Submission};
//!
//! let mut form = FormController::new(HttpSink::new("http://localhost:3000"));
//!
//! form.bind(Field::Name).set("Jane Doe");
//! form.bind(Field::Email).set("j.doe@example.com");
//! form.bind(Field::Age).set("30");
//! form.bind(Field::Gender).set("Female");
//! form.bind(Field::Vehicle).toggle("Car", true);
//!
//! match form.submit().await? {
//!     Submission::Sent(registration) => println!("registered {}", registration.name),
//!     Submission::Invalid(errors) => println!("fix these: {errors}"),
//! }
//! ```
//!
//! ## Fields
//!
//! - `name` - required text
//! - `email` - required, must be a valid email address
//! - `age` - required number, at least 13
//! - `gender` - one of `Male`, `Female`, `Nun ya business`
//! - `vehicle` - optional, any of `Car`, `Bike`, `Boat`, `Tractor`
//!
//! ## Sinks
//!
//! - `HttpSink` - POSTs JSON to `/api/register`
//! - `RecordingSink` - keeps registrations in memory, for tests

// Re-export all types from registration-types
pub use registration_types::*;

mod controller;
pub use controller::{FieldBinding, FormController, FormState, Submission};

mod http_sink;
pub use http_sink::{HttpSink, HttpSinkError, REGISTER_PATH};

// Recording sink for testing forms without a network
mod recording_sink;
pub use recording_sink::{RecordingSink, RecordingSinkError};
