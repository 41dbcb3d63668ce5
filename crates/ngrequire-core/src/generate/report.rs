use super::fs::Emitted;
use std::path::PathBuf;

/// What one run wrote, kept, and skipped, plus messages for the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub written: Vec<PathBuf>,
    /// Existing files left alone under the keep policy
    pub kept: Vec<PathBuf>,
    pub skipped: Vec<(PathBuf, &'static str)>,
    pub notices: Vec<String>,
}

impl GenerationReport {
    pub fn record(&mut self, path: PathBuf, emitted: Emitted) {
        match emitted {
            Emitted::Written => self.written.push(path),
            Emitted::Kept => self.kept.push(path),
        }
    }

    pub fn merge(&mut self, other: GenerationReport) {
        self.written.extend(other.written);
        self.kept.extend(other.kept);
        self.skipped.extend(other.skipped);
        self.notices.extend(other.notices);
    }
}
