use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::encoder::{encode, encode_tag};
use crate::error::GeneticsResult;
use crate::phenotype::interpret;
use crate::punnett::cross;
use crate::registry::GeneRegistry;
use crate::types::*;

/// Chance that a parent passes a possible-het allele to one offspring
pub const TRANSMISSION_RATE: f64 = 0.5;

/// One (sire, dam) pairing of a cross matrix
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatrixEntry {
    pub sire: BiologicalState,
    pub dam: BiologicalState,
    pub report: GeneReport,
}

/// Reports for every legal pairing of one gene
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneMatrix {
    pub gene_id: String,
    pub inheritance: InheritanceType,
    pub entries: Vec<MatrixEntry>,
}

/// Single-gene cross calculator over a gene registry
pub struct GeneCalculator<'r> {
    registry: &'r GeneRegistry,
}

impl<'r> GeneCalculator<'r> {
    pub fn new(registry: &'r GeneRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r GeneRegistry {
        self.registry
    }

    /// Cross a sire and a dam for one gene, both given as state tags
    pub fn calculate(
        &self,
        gene_id: &str,
        sire_state: &str,
        dam_state: &str,
    ) -> GeneticsResult<GeneReport> {
        let gene = self.registry.get(gene_id)?;
        let sire = encode_tag(gene.inheritance, sire_state)?;
        let dam = encode_tag(gene.inheritance, dam_state)?;

        Ok(self.build_report(gene, sire, dam))
    }

    pub fn calculate_states(
        &self,
        gene_id: &str,
        sire_state: BiologicalState,
        dam_state: BiologicalState,
    ) -> GeneticsResult<GeneReport> {
        let gene = self.registry.get(gene_id)?;
        let sire = encode(gene.inheritance, sire_state)?;
        let dam = encode(gene.inheritance, dam_state)?;

        Ok(self.build_report(gene, sire, dam))
    }

    /// Every ordered pairing of legal states for one gene
    pub fn cross_matrix(&self, gene_id: &str) -> GeneticsResult<GeneMatrix> {
        let gene = self.registry.get(gene_id)?;
        self.matrix_for(gene)
    }

    /// Cross matrices for the whole registry, in id order
    pub fn cross_matrix_all(&self) -> GeneticsResult<Vec<GeneMatrix>> {
        self.cross_matrix_all_with(|_| {})
    }

    /// Like [`cross_matrix_all`](Self::cross_matrix_all), calling `on_gene`
    /// as each gene finishes (from a worker thread, in no particular order)
    pub fn cross_matrix_all_with<F>(&self, on_gene: F) -> GeneticsResult<Vec<GeneMatrix>>
    where
        F: Fn(&GeneMatrix) + Sync + Send,
    {
        let genes: Vec<&GeneDefinition> = self.registry.iter().collect();
        debug!("Computing cross matrices for {} genes", genes.len());

        genes
            .par_iter()
            .map(|gene| -> GeneticsResult<GeneMatrix> {
                let matrix = self.matrix_for(gene)?;
                on_gene(&matrix);
                Ok(matrix)
            })
            .collect()
    }

    fn matrix_for(&self, gene: &GeneDefinition) -> GeneticsResult<GeneMatrix> {
        let states = gene.inheritance.valid_states();
        let mut entries = Vec::with_capacity(states.len() * states.len());

        for &sire in states {
            for &dam in states {
                let report = self.build_report(
                    gene,
                    encode(gene.inheritance, sire)?,
                    encode(gene.inheritance, dam)?,
                );
                entries.push(MatrixEntry { sire, dam, report });
            }
        }

        Ok(GeneMatrix {
            gene_id: gene.id.clone(),
            inheritance: gene.inheritance,
            entries,
        })
    }

    fn build_report(&self, gene: &GeneDefinition, sire: AllelePair, dam: AllelePair) -> GeneReport {
        let combinations = cross(sire, dam);
        let outcome = interpret(gene.inheritance, &combinations);

        GeneReport {
            gene: gene.name.clone(),
            combinations,
            outcome,
        }
    }
}

/// Probability (in percent) that an offspring is het, given each parent's
/// probable-het percentage. A missing, zero or NaN figure contributes nothing.
pub fn estimate_het(sire_probability: Option<f64>, dam_probability: Option<f64>) -> f64 {
    transmitted(sire_probability) + transmitted(dam_probability)
}

fn transmitted(probability: Option<f64>) -> f64 {
    match probability {
        Some(p) if p != 0.0 && !p.is_nan() => p * TRANSMISSION_RATE,
        _ => 0.0,
    }
}
