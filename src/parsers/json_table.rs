use anyhow::{Context, Result};

use crate::types::GeneDefinition;

/// JSON gene tables: an array of `{ "id", "name", "type" }` objects
pub struct JsonTableParser;

impl JsonTableParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_str(&self, content: &str) -> Result<Vec<GeneDefinition>> {
        serde_json::from_str(content).context("Invalid JSON gene table")
    }
}

impl super::GeneTableParser for JsonTableParser {
    fn parse_str(&self, content: &str) -> Result<Vec<GeneDefinition>> {
        self.parse_str(content)
    }
}
