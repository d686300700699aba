use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::registry::GeneRegistry;
use crate::types::GeneDefinition;

mod delimited;
mod json_table;
mod toml_table;

pub use delimited::DelimitedTableParser;
pub use json_table::JsonTableParser;
pub use toml_table::TomlTableParser;

/// Gene table file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Toml,
    Json,
    Csv,
    Tsv,
    Unknown,
}

impl TableFormat {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "toml" => TableFormat::Toml,
            "json" => TableFormat::Json,
            "csv" => TableFormat::Csv,
            "tsv" | "tab" => TableFormat::Tsv,
            _ => TableFormat::Unknown,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(TableFormat::Unknown)
    }
}

/// Common interface for gene table parsers
pub trait GeneTableParser {
    fn parse_str(&self, content: &str) -> Result<Vec<GeneDefinition>>;
}

/// Loads gene definitions from table files, picking the parser by extension
pub struct FileParser {
    toml: TomlTableParser,
    json: JsonTableParser,
    delimited: DelimitedTableParser,
}

impl FileParser {
    pub fn new() -> Self {
        Self {
            toml: TomlTableParser::new(),
            json: JsonTableParser::new(),
            delimited: DelimitedTableParser::new(),
        }
    }

    /// Parse the gene definitions in `path` without validating them
    pub fn parse(&self, path: &Path) -> Result<Vec<GeneDefinition>> {
        let format = TableFormat::from_path(path);
        debug!("Parsing {} as {:?}", path.display(), format);

        let parser: &dyn GeneTableParser = match format {
            TableFormat::Toml => &self.toml,
            TableFormat::Json => &self.json,
            TableFormat::Csv | TableFormat::Tsv => &self.delimited,
            TableFormat::Unknown => bail!("Unsupported gene table format: {}", path.display()),
        };

        let content = read_table(path)?;
        parser
            .parse_str(&content)
            .with_context(|| format!("Failed to parse gene table {}", path.display()))
    }

    /// Parse and validate a gene table into a registry
    pub fn load_registry(&self, path: &Path) -> Result<GeneRegistry> {
        let definitions = self.parse(path)?;
        validate_definitions(&definitions)
            .with_context(|| format!("Invalid gene table {}", path.display()))?;

        info!("Loaded {} genes from {}", definitions.len(), path.display());
        Ok(definitions.into_iter().collect())
    }
}

impl Default for FileParser {
    fn default() -> Self {
        Self::new()
    }
}

fn read_table(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Tab if the header line has one, comma otherwise
pub(crate) fn detect_delimiter(header: &str) -> u8 {
    if header.contains('\t') {
        b'\t'
    } else {
        b','
    }
}

fn validate_definitions(definitions: &[GeneDefinition]) -> Result<()> {
    if definitions.is_empty() {
        bail!("Gene table is empty");
    }

    let mut seen = HashSet::new();
    for definition in definitions {
        if definition.id.trim().is_empty() {
            bail!("Gene '{}' has an empty id", definition.name);
        }
        if definition.name.trim().is_empty() {
            bail!("Gene '{}' has an empty name", definition.id);
        }
        if !seen.insert(definition.id.as_str()) {
            bail!("Duplicate gene id: {}", definition.id);
        }
    }

    Ok(())
}
