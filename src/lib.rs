//! # Morph Genetics
//!
//! Offspring morph probability calculator for reptile breeding crosses.
//!
//! ## Features
//!
//! - Single-gene Punnett crosses for recessive, codominant and dominant genes
//! - Phenotype breakdown (normal / het / visual / super) for every cross
//! - Probable-het estimation for possible-het parents
//! - Builtin gene registry, replaceable or extendable from TOML, JSON, CSV or TSV tables
//! - Cross matrices over every legal parent pairing, computed in parallel
//! - Multiple output formats (table, JSON, CSV, TSV)
//!
//! ```
//! use morph_genetics::{GeneCalculator, GeneRegistry, Genotype};
//!
//! let registry = GeneRegistry::builtin();
//! let calculator = GeneCalculator::new(&registry);
//! let report = calculator.calculate("tremper", "het", "het").unwrap();
//!
//! assert_eq!(report.combinations.get(Genotype::Heterozygous), 50);
//! assert_eq!(report.outcome.visual, 25);
//! ```

pub mod analysis;
pub mod encoder;
pub mod error;
pub mod output;
pub mod parsers;
pub mod phenotype;
pub mod punnett;
pub mod registry;
pub mod types;

// Re-export key types
pub use analysis::{estimate_het, GeneCalculator, GeneMatrix, MatrixEntry};
pub use encoder::encode;
pub use error::{GeneticsError, GeneticsResult};
pub use output::{ReportFormat, ReportGenerator};
pub use parsers::{FileParser, TableFormat};
pub use phenotype::interpret;
pub use punnett::cross;
pub use registry::GeneRegistry;
pub use types::*;
