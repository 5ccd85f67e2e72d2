//! # registration-html
//!
//! Renders the registration form as HTML: one control per schema field,
//! an error span after each field, and the submit button.
//!
//! ```rust,ignore
//! use registration_html::{HtmlOptions, render_form, to_html};
//!
//! // The empty form as a complete document
//! let page = to_html(Some("Register"));
//!
//! // A fragment showing a draft and the errors of the last submit
//! let fragment = render_form(
//!     form.schema(),
//!     form.draft(),
//!     form.errors(),
//!     &HtmlOptions::new().full_document(false),
//! );
//! ```

mod generator;

pub use generator::{DEFAULT_ACTION, HtmlOptions, render_form, to_html};
