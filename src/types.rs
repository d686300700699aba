use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Mode of inheritance of a gene
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum InheritanceType {
    Recessive,
    Codominant,
    Dominant,
}

impl InheritanceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InheritanceType::Recessive => "recessive",
            InheritanceType::Codominant => "codominant",
            InheritanceType::Dominant => "dominant",
        }
    }

    /// Legal biological states for this mode of inheritance, in declaration order
    pub fn valid_states(&self) -> &'static [BiologicalState] {
        match self {
            InheritanceType::Recessive => &[
                BiologicalState::Normal,
                BiologicalState::Het,
                BiologicalState::Visual,
            ],
            InheritanceType::Codominant => &[
                BiologicalState::Normal,
                BiologicalState::Het,
                BiologicalState::Super,
            ],
            InheritanceType::Dominant => &[BiologicalState::Normal, BiologicalState::Visual],
        }
    }

    pub fn accepts(&self, state: BiologicalState) -> bool {
        self.valid_states().contains(&state)
    }
}

impl fmt::Display for InheritanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expressed or carried form of a gene in one animal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum BiologicalState {
    Normal,
    Het,
    Visual,
    Super,
}

impl BiologicalState {
    /// Exact, case-sensitive match on the state tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "normal" => Some(BiologicalState::Normal),
            "het" => Some(BiologicalState::Het),
            "visual" => Some(BiologicalState::Visual),
            "super" => Some(BiologicalState::Super),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BiologicalState::Normal => "normal",
            BiologicalState::Het => "het",
            BiologicalState::Visual => "visual",
            BiologicalState::Super => "super",
        }
    }
}

impl fmt::Display for BiologicalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One allele at a locus
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Allele {
    #[serde(rename = "A")]
    Dominant,
    #[serde(rename = "a")]
    Recessive,
}

impl Allele {
    pub fn symbol(&self) -> char {
        match self {
            Allele::Dominant => 'A',
            Allele::Recessive => 'a',
        }
    }
}

/// Ordered pair of alleles carried by one parent
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct AllelePair(pub Allele, pub Allele);

impl AllelePair {
    pub fn alleles(&self) -> [Allele; 2] {
        [self.0, self.1]
    }
}

impl fmt::Display for AllelePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0.symbol(), self.1.symbol())
    }
}

/// Unordered genotype at a locus, keyed by its sorted allele symbols
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Genotype {
    #[serde(rename = "AA")]
    HomozygousDominant,
    #[serde(rename = "Aa")]
    Heterozygous,
    #[serde(rename = "aa")]
    HomozygousRecessive,
}

impl Genotype {
    pub const ALL: [Genotype; 3] = [
        Genotype::HomozygousDominant,
        Genotype::Heterozygous,
        Genotype::HomozygousRecessive,
    ];

    /// Combine one allele from each parent. Order does not matter: `A` sorts
    /// before `a`, so a mixed pair always keys as `Aa`.
    pub fn from_alleles(first: Allele, second: Allele) -> Self {
        match (first, second) {
            (Allele::Dominant, Allele::Dominant) => Genotype::HomozygousDominant,
            (Allele::Recessive, Allele::Recessive) => Genotype::HomozygousRecessive,
            _ => Genotype::Heterozygous,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Genotype::HomozygousDominant => "AA",
            Genotype::Heterozygous => "Aa",
            Genotype::HomozygousRecessive => "aa",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Genotype::ALL.into_iter().find(|g| g.key() == key)
    }
}

impl fmt::Display for Genotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Percentage weight per genotype produced by one cross.
///
/// Only genotypes that occurred are present; weights are integer multiples of 25.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct GenotypeDistribution {
    weights: BTreeMap<Genotype, u32>,
}

impl GenotypeDistribution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, genotype: Genotype, weight: u32) {
        *self.weights.entry(genotype).or_insert(0) += weight;
    }

    /// Weight of a genotype, 0 when it never occurred
    pub fn get(&self, genotype: Genotype) -> u32 {
        self.weights.get(&genotype).copied().unwrap_or(0)
    }

    pub fn contains(&self, genotype: Genotype) -> bool {
        self.weights.contains_key(&genotype)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Genotype, u32)> + '_ {
        self.weights.iter().map(|(genotype, weight)| (*genotype, *weight))
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn total(&self) -> u32 {
        self.weights.values().sum()
    }
}

impl FromIterator<(Genotype, u32)> for GenotypeDistribution {
    fn from_iter<I: IntoIterator<Item = (Genotype, u32)>>(iter: I) -> Self {
        let mut distribution = GenotypeDistribution::new();
        for (genotype, weight) in iter {
            distribution.add(genotype, weight);
        }
        distribution
    }
}

/// Offspring phenotype percentages
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhenotypeOutcome {
    pub normal: u32,
    pub het: u32,
    pub visual: u32,
    #[serde(rename = "super")]
    pub super_form: u32,
}

impl PhenotypeOutcome {
    pub fn get(&self, state: BiologicalState) -> u32 {
        match state {
            BiologicalState::Normal => self.normal,
            BiologicalState::Het => self.het,
            BiologicalState::Visual => self.visual,
            BiologicalState::Super => self.super_form,
        }
    }

    pub fn total(&self) -> u32 {
        self.normal + self.het + self.visual + self.super_form
    }
}

/// Static description of a gene
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneDefinition {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub inheritance: InheritanceType,
}

impl GeneDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>, inheritance: InheritanceType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            inheritance,
        }
    }
}

/// Result of one single-gene cross
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneReport {
    #[serde(rename = "gen")]
    pub gene: String,
    #[serde(rename = "combinaciones")]
    pub combinations: GenotypeDistribution,
    #[serde(rename = "resultado")]
    pub outcome: PhenotypeOutcome,
}
