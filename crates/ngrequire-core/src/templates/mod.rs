//! Template loading, rendering, and markup post-processing
//!
//! This module provides:
//! - Embedded templates with an optional local override directory
//! - A handlebars-backed [`Renderer`]
//! - The [`RenderContext`] every project template reads from
//! - Markup escaping and the escaped-quote correction

pub mod context;
pub mod markup;
pub mod renderer;
pub mod source;

pub use context::{components_prefix, LoaderPath, RenderContext, COMPONENTS_DIR};
pub use markup::{normalize_quotes, ESCAPED_QUOTE};
pub use renderer::{HandlebarsRenderer, Renderer};
pub use source::TemplateSource;
