use serde::{Deserialize, Serialize};

/// Outcome of one CSV import run. Row-level problems are accumulated here
/// and never abort the batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
    pub errors: Vec<String>,
}

impl ImportReport {
    pub fn record_error(&mut self, line: u64, message: impl AsRef<str>) {
        self.errors
            .push(format!("line {}: {}", line, message.as_ref()));
        self.skipped += 1;
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
