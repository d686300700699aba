use std::collections::BTreeMap;

use crate::error::{GeneticsError, GeneticsResult};
use crate::types::{GeneDefinition, InheritanceType};

/// Reference gene set shipped with the crate: (id, display name, inheritance)
const BUILTIN_GENES: &[(&str, &str, InheritanceType)] = &[
    ("tremper", "Tremper Albino", InheritanceType::Recessive),
    ("bell", "Bell Albino", InheritanceType::Recessive),
    ("rainwater", "Rainwater Albino", InheritanceType::Recessive),
    ("eclipse", "Eclipse", InheritanceType::Recessive),
    ("blizzard", "Blizzard", InheritanceType::Recessive),
    ("murphy", "Murphy Patternless", InheritanceType::Recessive),
    ("mack_snow", "Mack Snow", InheritanceType::Codominant),
    ("giant", "Giant / Super Giant", InheritanceType::Codominant),
    ("white_yellow", "White & Yellow", InheritanceType::Dominant),
    ("enigma", "Enigma", InheritanceType::Dominant),
];

/// Lookup table from gene id to its definition.
///
/// Built once and then only read; share it by reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneRegistry {
    genes: BTreeMap<String, GeneDefinition>,
}

impl GeneRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the reference gene set
    pub fn builtin() -> Self {
        BUILTIN_GENES
            .iter()
            .map(|(id, name, inheritance)| GeneDefinition::new(*id, *name, *inheritance))
            .collect()
    }

    /// Add or replace a gene, returning the definition it replaced
    pub fn insert(&mut self, definition: GeneDefinition) -> Option<GeneDefinition> {
        self.genes.insert(definition.id.clone(), definition)
    }

    /// Overlay `other` on top of this registry; entries in `other` win
    pub fn merge(mut self, other: GeneRegistry) -> Self {
        self.genes.extend(other.genes);
        self
    }

    pub fn get(&self, gene_id: &str) -> GeneticsResult<&GeneDefinition> {
        self.genes
            .get(gene_id)
            .ok_or_else(|| GeneticsError::UnknownGene {
                gene_id: gene_id.to_string(),
            })
    }

    pub fn contains(&self, gene_id: &str) -> bool {
        self.genes.contains_key(gene_id)
    }

    /// Definitions in id order
    pub fn iter(&self) -> impl Iterator<Item = &GeneDefinition> {
        self.genes.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.genes.keys().map(String::as_str)
    }

    pub fn by_type(&self, inheritance: InheritanceType) -> impl Iterator<Item = &GeneDefinition> {
        self.iter().filter(move |gene| gene.inheritance == inheritance)
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }
}

impl FromIterator<GeneDefinition> for GeneRegistry {
    fn from_iter<I: IntoIterator<Item = GeneDefinition>>(iter: I) -> Self {
        let mut registry = GeneRegistry::new();
        for definition in iter {
            registry.insert(definition);
        }
        registry
    }
}
