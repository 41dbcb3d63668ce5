//! Dependency injection into the markup entry file
//!
//! Rewrites the `<!-- bower:css -->` and `<!-- bower:js -->` blocks of a
//! markup file with references to the main files of every installed package.
//! Block bodies are replaced wholesale, so running twice gives the same file.

use crate::components::{relative_path, Components};
use crate::error::{Error, Result};
use regex::Regex;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info, warn};

/// Opening marker of an injection block, capturing its kind
const BLOCK_START: &str = r"<!--\s*bower:(\w+)\s*-->";
const BLOCK_END: &str = r"<!--\s*endbower\s*-->";

/// Leading whitespace of the line holding byte offset `at`
fn line_indent(text: &str, at: usize) -> &str {
    let line_start = text[..at].rfind('\n').map_or(0, |i| i + 1);
    let line = &text[line_start..at];
    &line[..line.len() - line.trim_start().len()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Css,
    Js,
}

impl BlockKind {
    fn parse(kind: &str) -> Option<Self> {
        match kind {
            "css" => Some(Self::Css),
            "js" => Some(Self::Js),
            _ => None,
        }
    }

    fn tag(self, path: &str) -> String {
        match self {
            Self::Css => format!(r#"<link rel="stylesheet" href="{path}">"#),
            Self::Js => format!(r#"<script src="{path}"></script>"#),
        }
    }
}

/// References to inject, by block kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetRefs {
    pub css: Vec<String>,
    pub js: Vec<String>,
}

impl AssetRefs {
    fn for_kind(&self, kind: BlockKind) -> &[String] {
        match kind {
            BlockKind::Css => &self.css,
            BlockKind::Js => &self.js,
        }
    }
}

/// Prefix stripped from injected paths: the app path itself, or `..`
pub fn ignore_pattern(app_path: &str) -> Result<Regex> {
    let app = app_path.trim_start_matches("./").trim_end_matches('/');
    Ok(Regex::new(&format!(r"^({}|\.\.)/", regex::escape(app)))?)
}

/// Inject the packages of `manifest_path` into the blocks of `markup_path`
///
/// Fails when the manifest is missing or is not valid JSON.
pub fn inject(manifest_path: &Path, markup_path: &Path, ignore_path: &Regex) -> Result<()> {
    let content =
        std::fs::read_to_string(manifest_path).map_err(Error::io("read", manifest_path))?;
    let manifest: Value = serde_json::from_str(&content).map_err(|source| Error::Manifest {
        path: manifest_path.to_path_buf(),
        source,
    })?;

    let root = manifest_path.parent().unwrap_or(Path::new("."));
    let markup_dir = markup_path.parent().unwrap_or(Path::new("."));
    let packages = Components::for_project(root).resolve(&manifest);

    let mut refs = AssetRefs::default();
    for file in packages.iter().flat_map(|p| &p.files) {
        let relative = relative_path(markup_dir, file);
        let stripped = ignore_path.replace(&relative, "").into_owned();
        match file.extension().and_then(|e| e.to_str()) {
            Some("css") => refs.css.push(stripped),
            Some("js") => refs.js.push(stripped),
            _ => debug!(file = %file.display(), "not injectable"),
        }
    }

    let markup = std::fs::read_to_string(markup_path).map_err(Error::io("read", markup_path))?;
    let updated = inject_blocks(&markup, &refs)?;
    if updated != markup {
        std::fs::write(markup_path, updated).map_err(Error::io("write", markup_path))?;
    }

    info!(
        css = refs.css.len(),
        js = refs.js.len(),
        markup = %markup_path.display(),
        "injected dependencies"
    );
    Ok(())
}

/// Replace the body of every recognized block in `markup`
///
/// A block runs from its opening marker to the nearest `endbower`. Blocks
/// with an unknown kind, and openers reaching another opener before any end
/// marker, are left as they are.
pub fn inject_blocks(markup: &str, refs: &AssetRefs) -> Result<String> {
    let start = Regex::new(BLOCK_START)?;
    let end = Regex::new(BLOCK_END)?;
    let newline = if markup.contains("\r\n") { "\r\n" } else { "\n" };

    let mut out = String::with_capacity(markup.len());
    let mut copied = 0;
    let mut pos = 0;

    while let Some(caps) = start.captures_at(markup, pos) {
        let (Some(open), Some(kind)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        let Some(close) = end.find_at(markup, open.end()) else {
            warn!(kind = kind.as_str(), "unterminated injection block left untouched");
            break;
        };
        if let Some(next) = start.find_at(markup, open.end()) {
            if next.start() < close.start() {
                warn!(kind = kind.as_str(), "unterminated injection block left untouched");
                pos = next.start();
                continue;
            }
        }
        pos = close.end();

        let Some(kind) = BlockKind::parse(kind.as_str()) else {
            debug!(kind = kind.as_str(), "unknown injection block");
            continue;
        };

        let indent = line_indent(markup, open.start());
        out.push_str(&markup[copied..open.end()]);
        out.push_str(newline);
        for path in refs.for_kind(kind) {
            out.push_str(indent);
            out.push_str(&kind.tag(path));
            out.push_str(newline);
        }
        out.push_str(indent);
        copied = close.start();
    }

    out.push_str(&markup[copied..]);
    Ok(out)
}
