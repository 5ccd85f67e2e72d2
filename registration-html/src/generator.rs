//! Renders a schema, the current draft and its field errors as an HTML form.

use registration_types::{Draft, DraftValue, FieldErrors, FieldKind, FieldSchema, Schema};

/// The endpoint the rendered form posts to by default.
pub const DEFAULT_ACTION: &str = "/api/register";

/// How the registration page is wrapped and where it posts.
///
/// The defaults give a standalone page with inline styles that posts to
/// `/api/register`.
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// Page `<title>`. The schema title is used when unset.
    pub title: Option<String>,
    /// Emit the inline `<style>` block in the page head.
    pub include_styles: bool,
    /// Wrap the form in a page; otherwise only the `<form>` element is emitted
    /// so it can be embedded.
    pub full_document: bool,
    /// Prefix of every CSS class on the form (`<prefix>-form`, `<prefix>-error`, ...).
    pub class_prefix: String,
    /// Where the browser posts the form.
    pub action: String,
}

impl HtmlOptions {
    /// Standalone page, styled, posting to `DEFAULT_ACTION`.
    pub fn new() -> Self {
        Self {
            title: None,
            include_styles: true,
            full_document: true,
            class_prefix: "registration".to_string(),
            action: DEFAULT_ACTION.to_string(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_styles(mut self, include: bool) -> Self {
        self.include_styles = include;
        self
    }

    /// `false` renders just the form, e.g. to re-render it after a submit.
    pub fn full_document(mut self, full: bool) -> Self {
        self.full_document = full;
        self
    }

    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = prefix.into();
        self
    }

    /// Post somewhere other than the registration endpoint.
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Render the registration form with no values and no errors, as a full page.
pub fn to_html(title: Option<&str>) -> String {
    let mut options = HtmlOptions::new();
    if let Some(t) = title {
        options.title = Some(t.to_string());
    }
    render_form(
        &Schema::registration(),
        &Draft::new(),
        &FieldErrors::new(),
        &options,
    )
}

/// Render a form with the current draft values and field errors.
///
/// Every field is followed by an error span, empty when the field has no error.
pub fn render_form(
    schema: &Schema,
    draft: &Draft,
    errors: &FieldErrors,
    options: &HtmlOptions,
) -> String {
    let mut html = String::new();
    let prefix = &options.class_prefix;
    let title = options.title.as_ref().or(schema.title.as_ref());

    if options.full_document {
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("  <meta charset=\"UTF-8\">\n");
        html.push_str(
            "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );

        if let Some(title) = title {
            html.push_str(&format!("  <title>{}</title>\n", escape_html(title)));
        }

        if options.include_styles {
            html.push_str(&generate_styles(prefix));
        }

        html.push_str("</head>\n<body>\n");
    }

    html.push_str(&format!(
        "<form class=\"{prefix}-form\" method=\"post\" action=\"{}\">\n",
        escape_html(&options.action)
    ));

    if let Some(heading) = &schema.title {
        html.push_str(&format!("  <h2>{}</h2>\n", escape_html(heading)));
    }

    for field in schema.fields() {
        html.push_str(&generate_field(field, draft.get(field.field), prefix));
        html.push_str(&format!(
            "  <span class=\"{prefix}-error\">{}</span>\n",
            errors.get(field.field).map(escape_html).unwrap_or_default()
        ));
    }

    html.push_str(&format!(
        "  <button type=\"submit\" class=\"{prefix}-cta\">{}</button>\n",
        escape_html(&schema.submit_label)
    ));

    html.push_str("</form>\n");

    if options.full_document {
        html.push_str("</body>\n</html>\n");
    }

    html
}

/// Generate HTML for a single field.
fn generate_field(field: &FieldSchema, value: Option<&DraftValue>, prefix: &str) -> String {
    let name = field.name();
    let label = escape_html(&field.label);
    let required = if field.required { " required" } else { "" };
    let placeholder = field
        .placeholder
        .as_deref()
        .map(|p| format!(" placeholder=\"{}\"", escape_html(p)))
        .unwrap_or_default();
    let value_attr = value
        .and_then(display_value)
        .map(|v| format!(" value=\"{}\"", escape_html(&v)))
        .unwrap_or_default();

    let mut html = String::new();

    match &field.kind {
        FieldKind::Text | FieldKind::Email | FieldKind::Number { .. } => {
            let (input_type, min_attr) = match &field.kind {
                FieldKind::Email => ("email", String::new()),
                FieldKind::Number { min } => (
                    "number",
                    min.map(|m| format!(" min=\"{m}\"")).unwrap_or_default(),
                ),
                _ => ("text", String::new()),
            };

            html.push_str(&format!(
                "  <label class=\"{prefix}-label {prefix}-column\" for=\"{name}\">\n"
            ));
            html.push_str(&format!("    <span>{label}</span>\n"));
            html.push_str(&format!(
                "    <input type=\"{input_type}\" id=\"{name}\" name=\"{name}\"{placeholder}{min_attr}{required}{value_attr}>\n"
            ));
            html.push_str("  </label>\n");
        }

        FieldKind::Select { options } => {
            let selected = value.and_then(DraftValue::as_text);

            html.push_str(&format!(
                "  <label class=\"{prefix}-label {prefix}-column\" for=\"{name}\">\n"
            ));
            html.push_str(&format!("    <span>{label}</span>\n"));
            html.push_str(&format!(
                "    <select id=\"{name}\" name=\"{name}\"{required}>\n"
            ));
            for option in options {
                let selected_attr = if selected == Some(*option) {
                    " selected"
                } else {
                    ""
                };
                let option = escape_html(option);
                html.push_str(&format!(
                    "      <option value=\"{option}\"{selected_attr}>{option}</option>\n"
                ));
            }
            html.push_str("    </select>\n");
            html.push_str("  </label>\n");
        }

        FieldKind::Checkboxes { .. } => {
            html.push_str(&format!(
                "  <fieldset class=\"{prefix}-fieldset\">\n    <legend>{label}</legend>\n"
            ));

            for option in field.kind.rendered_options() {
                let option_id = format!("{name}-{}", slug(option));
                let checked = if is_checked(value, option) {
                    " checked"
                } else {
                    ""
                };
                let option = escape_html(option);

                html.push_str(&format!(
                    "    <label class=\"{prefix}-label {prefix}-row\" for=\"{option_id}\">\n"
                ));
                html.push_str(&format!(
                    "      <input type=\"checkbox\" id=\"{option_id}\" name=\"{name}\" value=\"{option}\"{checked}>\n"
                ));
                html.push_str(&format!("      <span>{option}</span>\n"));
                html.push_str("    </label>\n");
            }

            html.push_str("  </fieldset>\n");
        }
    }

    html
}

/// The text a single-value control shows for a draft value.
fn display_value(value: &DraftValue) -> Option<String> {
    match value {
        DraftValue::Text(s) => Some(s.clone()),
        DraftValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
            Some(format!("{}", *n as i64))
        }
        DraftValue::Number(n) => Some(n.to_string()),
        DraftValue::Null | DraftValue::List(_) => None,
    }
}

fn is_checked(value: Option<&DraftValue>, option: &str) -> bool {
    match value {
        Some(DraftValue::List(items)) => items.iter().any(|item| item == option),
        Some(DraftValue::Text(s)) => s == option,
        _ => false,
    }
}

/// Lowercase, hyphen-separated form of an option label, for element ids.
fn slug(label: &str) -> String {
    label
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Escape HTML special characters.
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Generate default CSS styles.
fn generate_styles(prefix: &str) -> String {
    format!(
        r#"  <style>
    .{prefix}-form {{
      display: flex;
      flex-direction: column;
      max-width: 400px;
      margin: 2rem auto;
      font-family: sans-serif;
    }}
    .{prefix}-label {{
      display: flex;
      margin: 0.5rem 0;
      gap: 0.25rem;
    }}
    .{prefix}-column {{
      flex-direction: column;
    }}
    .{prefix}-row {{
      flex-direction: row;
      align-items: center;
    }}
    .{prefix}-fieldset {{
      border: none;
      padding: 0;
    }}
    .{prefix}-error {{
      color: #c00;
      min-height: 1rem;
    }}
    .{prefix}-cta {{
      margin-top: 1rem;
      padding: 0.5rem 1rem;
    }}
  </style>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_options_chaining() {
        let options = HtmlOptions::new()
            .with_title("Sign up")
            .with_styles(false)
            .full_document(false)
            .with_class_prefix("my-form")
            .with_action("/signup");

        assert_eq!(options.title, Some("Sign up".to_string()));
        assert!(!options.include_styles);
        assert!(!options.full_document);
        assert_eq!(options.class_prefix, "my-form");
        assert_eq!(options.action, "/signup");
    }

    #[test]
    fn default_options() {
        for options in [HtmlOptions::new(), HtmlOptions::default()] {
            assert!(options.include_styles);
            assert!(options.full_document);
            assert_eq!(options.class_prefix, "registration");
            assert_eq!(options.action, DEFAULT_ACTION);
        }
    }

    #[test]
    fn slugs() {
        assert_eq!(slug("Dodgem car"), "dodgem-car");
        assert_eq!(slug("Car"), "car");
        assert_eq!(slug("Nun ya business"), "nun-ya-business");
    }

    #[test]
    fn escapes() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn number_values_render_like_inputs() {
        assert_eq!(display_value(&DraftValue::Number(30.0)).as_deref(), Some("30"));
        assert_eq!(display_value(&DraftValue::Number(13.5)).as_deref(), Some("13.5"));
        assert_eq!(display_value(&DraftValue::Null), None);
    }

    #[test]
    fn single_text_vehicle_is_checked() {
        let value = DraftValue::from("Boat");
        assert!(is_checked(Some(&value), "Boat"));
        assert!(!is_checked(Some(&value), "Car"));
        assert!(!is_checked(None, "Car"));
    }
}
