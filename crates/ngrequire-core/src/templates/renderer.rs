//! Template rendering through handlebars

use super::markup::escape_markup;
use super::source::TemplateSource;
use crate::error::{Error, Result};
use handlebars::{handlebars_helper, no_escape, Handlebars};
use serde_json::Value;
use tracing::debug;

// `{{json value}}` writes a complete JSON literal, quotes included
handlebars_helper!(json_literal: |value: Json| serde_json::to_string(value).unwrap_or_default());

// `{{js value}}` escapes a value for a single-quoted script string
handlebars_helper!(js_escape: |value: str| js_string(value));

/// Escape `\` and `'` so `value` can sit between single quotes
pub fn js_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

/// Markup templates get entity escaping; everything else is written raw
fn is_markup(template: &str) -> bool {
    template.ends_with(".html")
}

/// Template collaborator used by the generator and the generation units
pub trait Renderer: Send + Sync {
    /// Render the named template with `context`
    fn render(&self, template: &str, context: &Value) -> Result<String>;

    /// Load the named template verbatim, for plain copies
    fn raw(&self, template: &str) -> Result<String>;
}

/// Loads and renders templates
pub struct HandlebarsRenderer {
    /// Engine for `.html` templates, escaping values as entities
    markup: Handlebars<'static>,
    /// Engine for manifests and scripts, which use the `json` and `js` helpers
    code: Handlebars<'static>,
    source: TemplateSource,
}

impl HandlebarsRenderer {
    pub fn new(source: TemplateSource) -> Self {
        let mut markup = Handlebars::new();
        markup.register_escape_fn(escape_markup);

        let mut code = Handlebars::new();
        code.register_escape_fn(no_escape);
        code.register_helper("json", Box::new(json_literal));
        code.register_helper("js", Box::new(js_escape));

        Self {
            markup,
            code,
            source,
        }
    }

    pub fn embedded() -> Self {
        Self::new(TemplateSource::Embedded)
    }
}

impl std::fmt::Debug for HandlebarsRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlebarsRenderer")
            .field("source", &self.source)
            .finish()
    }
}

impl Renderer for HandlebarsRenderer {
    fn render(&self, template: &str, context: &Value) -> Result<String> {
        debug!(%template, "rendering template");
        let text = self.source.load(template)?;
        let engine = if is_markup(template) {
            &self.markup
        } else {
            &self.code
        };
        engine
            .render_template(&text, context)
            .map_err(|source| Error::Render {
                name: template.to_string(),
                source: Box::new(source),
            })
    }

    fn raw(&self, template: &str) -> Result<String> {
        self.source.load(template)
    }
}
