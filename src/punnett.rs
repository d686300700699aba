use crate::types::{AllelePair, Genotype, GenotypeDistribution};

/// Weight of one cell of the 2x2 square, in percent
pub const CELL_WEIGHT: u32 = 25;

/// Punnett cross of two parents' allele pairs.
///
/// Each of the four (sire allele, dam allele) cells adds [`CELL_WEIGHT`] to its
/// genotype; genotypes that never occur are left out of the result.
pub fn cross(sire: AllelePair, dam: AllelePair) -> GenotypeDistribution {
    let mut distribution = GenotypeDistribution::new();

    for from_sire in sire.alleles() {
        for from_dam in dam.alleles() {
            distribution.add(Genotype::from_alleles(from_sire, from_dam), CELL_WEIGHT);
        }
    }

    distribution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Allele::{Dominant, Recessive};

    #[test]
    fn het_by_het_splits_one_two_one() {
        let distribution = cross(AllelePair(Dominant, Recessive), AllelePair(Dominant, Recessive));
        assert_eq!(distribution.get(Genotype::HomozygousDominant), 25);
        assert_eq!(distribution.get(Genotype::Heterozygous), 50);
        assert_eq!(distribution.get(Genotype::HomozygousRecessive), 25);
        assert_eq!(distribution.len(), 3);
    }

    #[test]
    fn homozygous_parents_give_a_single_genotype() {
        let distribution = cross(AllelePair(Dominant, Dominant), AllelePair(Recessive, Recessive));
        assert_eq!(distribution.len(), 1);
        assert_eq!(distribution.get(Genotype::Heterozygous), 100);

        let distribution = cross(AllelePair(Recessive, Recessive), AllelePair(Recessive, Recessive));
        assert_eq!(distribution.get(Genotype::HomozygousRecessive), 100);
    }

    #[test]
    fn omits_genotypes_that_never_occur() {
        let distribution = cross(AllelePair(Dominant, Recessive), AllelePair(Recessive, Recessive));
        assert!(!distribution.contains(Genotype::HomozygousDominant));
        assert_eq!(distribution.get(Genotype::Heterozygous), 50);
        assert_eq!(distribution.get(Genotype::HomozygousRecessive), 50);
        assert_eq!(distribution.total(), 100);
    }
}
