//! Project-name normalization
//!
//! Names go through `humanize -> slugify -> camelize`, so `"My Cool App"`,
//! `"my-cool-app"` and `"myCoolApp"` all normalize to `myCoolApp`. Only ASCII
//! word characters survive.

/// Suffix used for the root module when no `--app-suffix` is given
pub const DEFAULT_MODULE_SUFFIX: &str = "App";

/// Fallback project name when the raw input normalizes to nothing
pub const FALLBACK_PROJECT_NAME: &str = "app";

/// Normalize a raw project name into a single camelized identifier
pub fn project_name(raw: &str) -> String {
    camelize(&slugify(&humanize(raw)))
}

/// Root-module suffix for an optional `--app-suffix` value
pub fn module_suffix(suffix: Option<&str>) -> String {
    match suffix {
        None => DEFAULT_MODULE_SUFFIX.to_string(),
        Some(s) => classify(s),
    }
}

/// `"fooBar-baz qux"` -> `"foo_bar_baz_qux"`
fn underscored(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut after_lower_or_digit = false;
    let mut in_separator = false;

    for c in s.trim().chars() {
        if c == '-' || c.is_whitespace() {
            if !in_separator {
                out.push('_');
                in_separator = true;
            }
            after_lower_or_digit = false;
            continue;
        }
        in_separator = false;
        if c.is_ascii_uppercase() && after_lower_or_digit {
            out.push('_');
        }
        after_lower_or_digit = c.is_ascii_lowercase() || c.is_ascii_digit();
        out.extend(c.to_lowercase());
    }
    out
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `"myCoolApp"` -> `"My cool app"`
pub fn humanize(s: &str) -> String {
    let underscored = underscored(s);
    let stripped = underscored.strip_suffix("_id").unwrap_or(&underscored);
    capitalize(stripped.replace('_', " ").trim())
}

/// `"My cool app!"` -> `"my-cool-app"`
pub fn slugify(s: &str) -> String {
    let kept: String = s
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();

    let mut out = String::with_capacity(kept.len());
    let mut pending_dash = false;
    for c in kept.trim().chars() {
        if c == '-' || c == '_' || c.is_whitespace() {
            pending_dash = true;
            continue;
        }
        if pending_dash && !out.is_empty() {
            out.push('-');
        }
        pending_dash = false;
        out.push(c);
    }
    out
}

/// `"my-cool_app"` -> `"myCoolApp"`
pub fn camelize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut upper_next = false;
    for c in s.trim().chars() {
        if c == '-' || c == '_' || c.is_whitespace() {
            upper_next = true;
            continue;
        }
        if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// `"my-suffix"` -> `"MySuffix"`
pub fn classify(s: &str) -> String {
    let spaced: String = s
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect();
    capitalize(&camelize(&spaced))
}
