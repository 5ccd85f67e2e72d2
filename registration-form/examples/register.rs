//! Fill in the registration form, submit it twice, and print the rendered form.
//!
//! The first submit fails validation (age below the minimum), the second
//! one reaches the sink. Pass a base URL to post to a real endpoint instead
//! of recording in memory.
//!
//! Run with: RUST_LOG=registration=debug cargo run -p registration-form --example register [base-url]

use std::io;

use registration_form::{
    Field, FormController, HttpSink, RecordingSink, Submission, SubmissionSink,
};
use registration_html::{HtmlOptions, render_form};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "registration=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match std::env::args().nth(1) {
        Some(base_url) => run(HttpSink::new(base_url)).await,
        None => run(RecordingSink::new()).await,
    }
}

async fn run<S: SubmissionSink>(sink: S) -> anyhow::Result<()> {
    let mut form = FormController::new(sink);

    form.bind(Field::Name).set("Jane Doe");
    form.bind(Field::Email).set("j.doe@example.com");
    form.bind(Field::Age).set("10");
    form.bind(Field::Vehicle)
        .toggle("Car", true)
        .toggle("Boat", true);

    if let Submission::Invalid(errors) = form.submit().await? {
        println!("Validation failed: {errors}");
        println!(
            "{}",
            render_form(
                form.schema(),
                form.draft(),
                form.errors(),
                &HtmlOptions::new().full_document(false),
            )
        );
    }

    form.bind(Field::Age).set("30");
    match form.submit().await? {
        Submission::Sent(registration) => {
            println!("Submitted: {}", serde_json::to_string_pretty(&registration)?);
        }
        Submission::Invalid(errors) => println!("Still invalid: {errors}"),
    }

    Ok(())
}
