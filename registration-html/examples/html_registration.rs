//! Generate the empty registration form as an HTML page.
//!
//! Run with: cargo run -p registration-html --example html_registration

use registration_html::to_html;

fn main() {
    let html = to_html(Some("Register"));

    // Write to file
    std::fs::write("registration.html", &html).expect("Failed to write HTML file");

    println!("Generated registration.html");
}
