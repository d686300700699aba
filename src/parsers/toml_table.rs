use anyhow::{Context, Result};
use serde::Deserialize;

use crate::types::GeneDefinition;

#[derive(Debug, Deserialize)]
struct GeneTable {
    #[serde(rename = "gene", default)]
    genes: Vec<GeneDefinition>,
}

/// TOML gene tables, one `[[gene]]` block per gene
pub struct TomlTableParser;

impl TomlTableParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_str(&self, content: &str) -> Result<Vec<GeneDefinition>> {
        let table: GeneTable = toml::from_str(content).context("Invalid TOML gene table")?;
        Ok(table.genes)
    }
}

impl super::GeneTableParser for TomlTableParser {
    fn parse_str(&self, content: &str) -> Result<Vec<GeneDefinition>> {
        self.parse_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::InheritanceType;

    #[test]
    fn parses_gene_blocks() {
        let content = r#"
[[gene]]
id = "tremper"
name = "Tremper Albino"
type = "recessive"

[[gene]]
id = "mack_snow"
name = "Mack Snow"
type = "codominant"
"#;
        let genes = TomlTableParser::new().parse_str(content).unwrap();
        assert_eq!(genes.len(), 2);
        assert_eq!(genes[1].id, "mack_snow");
        assert_eq!(genes[1].inheritance, InheritanceType::Codominant);
    }

    #[test]
    fn rejects_unknown_inheritance() {
        let content = "[[gene]]\nid = \"x\"\nname = \"X\"\ntype = \"sex-linked\"\n";
        assert!(TomlTableParser::new().parse_str(content).is_err());
    }
}
