use anyhow::{anyhow, Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim};

use crate::parsers::detect_delimiter;
use crate::types::GeneDefinition;

const REQUIRED_COLUMNS: [&str; 3] = ["id", "name", "type"];

/// Generic CSV/TSV parser for gene tables
pub struct DelimitedTableParser;

impl DelimitedTableParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_str(&self, content: &str) -> Result<Vec<GeneDefinition>> {
        // Determine delimiter from the header line
        let header_line = content.lines().next().unwrap_or_default();
        let mut reader = ReaderBuilder::new()
            .delimiter(detect_delimiter(header_line))
            .trim(Trim::All)
            .from_reader(content.as_bytes());

        let headers = self.map_columns(reader.headers()?)?;
        reader.set_headers(headers);

        let mut genes = Vec::new();
        for (index, row) in reader.deserialize::<GeneDefinition>().enumerate() {
            // +2: one for the header, one for 1-based numbering
            let gene = row.with_context(|| format!("Invalid gene table row {}", index + 2))?;
            genes.push(gene);
        }

        Ok(genes)
    }

    /// Normalise header names to the canonical column set
    fn map_columns(&self, headers: &StringRecord) -> Result<StringRecord> {
        let mapped: StringRecord = headers
            .iter()
            .map(|header| match header.trim().to_lowercase().as_str() {
                "id" | "gene" | "gene_id" => "id".to_string(),
                "name" | "display_name" | "label" => "name".to_string(),
                "type" | "inheritance" | "mode" => "type".to_string(),
                other => other.to_string(),
            })
            .collect();

        for column in REQUIRED_COLUMNS {
            if !mapped.iter().any(|header| header == column) {
                return Err(anyhow!("Gene table is missing the '{}' column", column));
            }
        }

        Ok(mapped)
    }
}

impl super::GeneTableParser for DelimitedTableParser {
    fn parse_str(&self, content: &str) -> Result<Vec<GeneDefinition>> {
        self.parse_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::InheritanceType;

    #[test]
    fn parses_csv_in_any_column_order() {
        let content = "type,id,name\nrecessive,eclipse,Eclipse\ndominant,enigma,Enigma\n";
        let genes = DelimitedTableParser::new().parse_str(content).unwrap();
        assert_eq!(genes.len(), 2);
        assert_eq!(genes[0].id, "eclipse");
        assert_eq!(genes[1].inheritance, InheritanceType::Dominant);
    }

    #[test]
    fn parses_tsv_with_header_aliases() {
        let content = "Gene\tDisplay_Name\tInheritance\nmurphy\tMurphy Patternless\trecessive\n";
        let genes = DelimitedTableParser::new().parse_str(content).unwrap();
        assert_eq!(genes[0].name, "Murphy Patternless");
    }

    #[test]
    fn reports_missing_columns_and_bad_rows() {
        let err = DelimitedTableParser::new()
            .parse_str("id,name\nbell,Bell Albino\n")
            .unwrap_err();
        assert!(err.to_string().contains("'type'"));

        let err = DelimitedTableParser::new()
            .parse_str("id,name,type\nbell,Bell Albino,recessive\nx,X,polygenic\n")
            .unwrap_err();
        assert!(err.to_string().contains("row 3"));
    }
}
