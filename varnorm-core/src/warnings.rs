use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::validate::ValidationIssue;

/// Ordered, append-only collection of non-fatal diagnostics for one request.
///
/// Messages are kept in the order they were raised and are never deduplicated.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WarningSink(Vec<String>);

impl WarningSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<S: Into<String>>(&mut self, warning: S) {
        let warning = warning.into();
        log::debug!("warning: {}", warning);
        self.0.push(warning);
    }

    /// Turn a validation issue into a warning. Unavailable authorities are not data
    /// problems and come back as errors instead.
    pub fn record(&mut self, issue: ValidationIssue) -> Result<()> {
        let warning = issue.into_warning()?;
        self.push(warning);
        Ok(())
    }

    pub fn extend<I: IntoIterator<Item = String>>(&mut self, warnings: I) {
        for warning in warnings {
            self.push(warning);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn keeps_order_and_duplicates() {
        let mut sink = WarningSink::new();
        sink.push("first");
        sink.push("second".to_string());
        sink.push("first");

        assert_eq!(sink.len(), 3);
        assert_eq!(sink.into_vec(), vec!["first", "second", "first"]);
    }

    #[test]
    fn serializes_as_plain_list() {
        let mut sink = WarningSink::new();
        sink.push("a");
        assert_eq!(serde_json::to_string(&sink).unwrap(), r#"["a"]"#);
    }
}
