use anyhow::{anyhow, Context, Result};
use chrono::Local;
use console::style;
use csv::WriterBuilder;
use serde::Serialize;
use serde_json::to_string_pretty;
use std::fmt::Write as _;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::analysis::GeneMatrix;
use crate::registry::GeneRegistry;
use crate::types::*;

/// Supported report formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Table,
    Json,
    Csv,
    Tsv,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Table => "txt",
            ReportFormat::Json => "json",
            ReportFormat::Csv => "csv",
            ReportFormat::Tsv => "tsv",
        }
    }
}

#[derive(Serialize)]
struct ReportRow<'a> {
    gene: &'a str,
    #[serde(rename = "AA")]
    homozygous_dominant: u32,
    #[serde(rename = "Aa")]
    heterozygous: u32,
    #[serde(rename = "aa")]
    homozygous_recessive: u32,
    normal: u32,
    het: u32,
    visual: u32,
    #[serde(rename = "super")]
    super_form: u32,
}

impl<'a> ReportRow<'a> {
    fn new(report: &'a GeneReport) -> Self {
        let combinations = &report.combinations;
        let outcome = &report.outcome;
        Self {
            gene: &report.gene,
            homozygous_dominant: combinations.get(Genotype::HomozygousDominant),
            heterozygous: combinations.get(Genotype::Heterozygous),
            homozygous_recessive: combinations.get(Genotype::HomozygousRecessive),
            normal: outcome.normal,
            het: outcome.het,
            visual: outcome.visual,
            super_form: outcome.super_form,
        }
    }
}

#[derive(Serialize)]
struct MatrixRow<'a> {
    gene_id: &'a str,
    sire: &'static str,
    dam: &'static str,
    #[serde(rename = "AA")]
    homozygous_dominant: u32,
    #[serde(rename = "Aa")]
    heterozygous: u32,
    #[serde(rename = "aa")]
    homozygous_recessive: u32,
    normal: u32,
    het: u32,
    visual: u32,
    #[serde(rename = "super")]
    super_form: u32,
}

#[derive(Serialize)]
struct HetRow {
    sire: f64,
    dam: f64,
    het: f64,
}

/// Report generator for calculation results
pub struct ReportGenerator {
    output_dir: Option<PathBuf>,
}

impl ReportGenerator {
    /// Reports go to stdout when `output_dir` is `None`
    pub fn new(output_dir: Option<&Path>) -> Self {
        Self {
            output_dir: output_dir.map(Path::to_path_buf),
        }
    }

    pub fn generate_report(&self, report: &GeneReport, format: ReportFormat) -> Result<Option<PathBuf>> {
        let content = self.render_report(report, format)?;
        self.emit("cross", format, &content)
    }

    pub fn generate_matrices(
        &self,
        matrices: &[GeneMatrix],
        registry: &GeneRegistry,
        format: ReportFormat,
    ) -> Result<Option<PathBuf>> {
        let content = self.render_matrices(matrices, registry, format)?;
        self.emit("matrix", format, &content)
    }

    pub fn generate_registry(&self, genes: &[&GeneDefinition], format: ReportFormat) -> Result<Option<PathBuf>> {
        let content = self.render_registry(genes, format)?;
        self.emit("genes", format, &content)
    }

    pub fn generate_het(
        &self,
        sire: Option<f64>,
        dam: Option<f64>,
        estimate: f64,
        format: ReportFormat,
    ) -> Result<Option<PathBuf>> {
        let content = self.render_het(sire, dam, estimate, format)?;
        self.emit("het", format, &content)
    }

    pub fn render_report(&self, report: &GeneReport, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Table => Ok(self.create_report_table(report)),
            ReportFormat::Json => Ok(to_string_pretty(report)?),
            ReportFormat::Csv => to_delimited([ReportRow::new(report)], b','),
            ReportFormat::Tsv => to_delimited([ReportRow::new(report)], b'\t'),
        }
    }

    pub fn render_matrices(
        &self,
        matrices: &[GeneMatrix],
        registry: &GeneRegistry,
        format: ReportFormat,
    ) -> Result<String> {
        match format {
            ReportFormat::Table => Ok(self.create_matrix_table(matrices, registry)),
            ReportFormat::Json => Ok(to_string_pretty(matrices)?),
            ReportFormat::Csv => to_delimited(matrix_rows(matrices), b','),
            ReportFormat::Tsv => to_delimited(matrix_rows(matrices), b'\t'),
        }
    }

    pub fn render_registry(&self, genes: &[&GeneDefinition], format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Table => Ok(self.create_registry_table(genes)),
            ReportFormat::Json => Ok(to_string_pretty(genes)?),
            ReportFormat::Csv => to_delimited(genes.iter().copied(), b','),
            ReportFormat::Tsv => to_delimited(genes.iter().copied(), b'\t'),
        }
    }

    pub fn render_het(
        &self,
        sire: Option<f64>,
        dam: Option<f64>,
        estimate: f64,
        format: ReportFormat,
    ) -> Result<String> {
        let row = HetRow {
            sire: sire.unwrap_or(0.0),
            dam: dam.unwrap_or(0.0),
            het: estimate,
        };

        match format {
            ReportFormat::Table => Ok(format!(
                "{} {}% (sire {}%, dam {}%)\n",
                style("Probable het:").bold(),
                style(row.het).green().bold(),
                row.sire,
                row.dam
            )),
            ReportFormat::Json => Ok(to_string_pretty(&row)?),
            ReportFormat::Csv => to_delimited([row], b','),
            ReportFormat::Tsv => to_delimited([row], b'\t'),
        }
    }

    fn emit(&self, kind: &str, format: ReportFormat, content: &str) -> Result<Option<PathBuf>> {
        let Some(output_dir) = &self.output_dir else {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .context("Failed to write report to stdout")?;
            if !content.ends_with('\n') {
                writeln!(stdout)?;
            }
            return Ok(None);
        };

        fs::create_dir_all(output_dir).with_context(|| {
            format!("Failed to create output directory {}", output_dir.display())
        })?;

        let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S").to_string();
        let filename = output_dir.join(format!("{}_{}.{}", kind, timestamp, format.extension()));
        fs::write(&filename, content)
            .with_context(|| format!("Failed to write report to {}", filename.display()))?;

        info!("Wrote {} report to {}", kind, filename.display());
        Ok(Some(filename))
    }

    fn create_report_table(&self, report: &GeneReport) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", style(&report.gene).bold().cyan());
        let _ = writeln!(out, "  Genotypes:  {}", genotype_line(&report.combinations));
        let _ = writeln!(out, "  Phenotypes: {}", phenotype_line(&report.outcome));
        out
    }

    fn create_matrix_table(&self, matrices: &[GeneMatrix], registry: &GeneRegistry) -> String {
        let mut out = String::new();

        for matrix in matrices {
            let name = registry
                .get(&matrix.gene_id)
                .map(|gene| gene.name.as_str())
                .unwrap_or(matrix.gene_id.as_str());
            let _ = writeln!(
                out,
                "{} {}",
                style(name).bold().cyan(),
                style(format!("({}, {})", matrix.gene_id, matrix.inheritance)).dim()
            );

            for entry in &matrix.entries {
                let _ = writeln!(
                    out,
                    "  {:>6} x {:<6}  {}",
                    entry.sire.as_str(),
                    entry.dam.as_str(),
                    phenotype_line(&entry.report.outcome)
                );
            }
            out.push('\n');
        }

        out
    }

    fn create_registry_table(&self, genes: &[&GeneDefinition]) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", style("Available Genes:").bold().cyan());

        for gene in genes {
            let _ = writeln!(
                out,
                "  {} - {} {}",
                style(&gene.id).green().bold(),
                gene.name,
                style(format!("[{}]", gene.inheritance)).yellow()
            );
        }

        out
    }
}

fn genotype_line(distribution: &GenotypeDistribution) -> String {
    distribution
        .iter()
        .map(|(genotype, weight)| format!("{} {}%", genotype, weight))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Non-zero phenotype buckets, e.g. `normal 25%  visual 75%`
fn phenotype_line(outcome: &PhenotypeOutcome) -> String {
    [
        BiologicalState::Normal,
        BiologicalState::Het,
        BiologicalState::Visual,
        BiologicalState::Super,
    ]
    .into_iter()
    .filter(|state| outcome.get(*state) > 0)
    .map(|state| format!("{} {}%", state, outcome.get(state)))
    .collect::<Vec<_>>()
    .join("  ")
}

fn matrix_rows(matrices: &[GeneMatrix]) -> impl Iterator<Item = MatrixRow<'_>> {
    matrices.iter().flat_map(|matrix| {
        matrix.entries.iter().map(move |entry| {
            let row = ReportRow::new(&entry.report);
            MatrixRow {
                gene_id: &matrix.gene_id,
                sire: entry.sire.as_str(),
                dam: entry.dam.as_str(),
                homozygous_dominant: row.homozygous_dominant,
                heterozygous: row.heterozygous,
                homozygous_recessive: row.homozygous_recessive,
                normal: row.normal,
                het: row.het,
                visual: row.visual,
                super_form: row.super_form,
            }
        })
    })
}

fn to_delimited<T, I>(rows: I, delimiter: u8) -> Result<String>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    for row in rows {
        writer.serialize(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow!("Failed to flush delimited output: {}", e.error()))?;
    Ok(String::from_utf8(bytes)?)
}
