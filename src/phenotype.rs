use crate::types::{Genotype, GenotypeDistribution, InheritanceType, PhenotypeOutcome};

/// Fold a genotype distribution into phenotype percentages for `gene_type`.
pub fn interpret(gene_type: InheritanceType, distribution: &GenotypeDistribution) -> PhenotypeOutcome {
    let mut outcome = PhenotypeOutcome::default();

    for (genotype, weight) in distribution.iter() {
        let bucket = match (gene_type, genotype) {
            (_, Genotype::HomozygousDominant) => &mut outcome.normal,
            (InheritanceType::Recessive, Genotype::Heterozygous)
            | (InheritanceType::Codominant, Genotype::Heterozygous) => &mut outcome.het,
            (InheritanceType::Recessive, Genotype::HomozygousRecessive) => &mut outcome.visual,
            (InheritanceType::Codominant, Genotype::HomozygousRecessive) => &mut outcome.super_form,
            // aa is never encoded for a dominant gene but still counts as visual
            (InheritanceType::Dominant, Genotype::Heterozygous)
            | (InheritanceType::Dominant, Genotype::HomozygousRecessive) => &mut outcome.visual,
        };
        *bucket += weight;
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_two_one() -> GenotypeDistribution {
        [
            (Genotype::HomozygousDominant, 25),
            (Genotype::Heterozygous, 50),
            (Genotype::HomozygousRecessive, 25),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn recessive_maps_to_normal_het_visual() {
        let outcome = interpret(InheritanceType::Recessive, &one_two_one());
        assert_eq!(
            outcome,
            PhenotypeOutcome {
                normal: 25,
                het: 50,
                visual: 25,
                super_form: 0,
            }
        );
    }

    #[test]
    fn codominant_maps_aa_to_super() {
        let outcome = interpret(InheritanceType::Codominant, &one_two_one());
        assert_eq!(outcome.het, 50);
        assert_eq!(outcome.super_form, 25);
        assert_eq!(outcome.visual, 0);
    }

    #[test]
    fn dominant_folds_aa_and_het_into_visual() {
        let outcome = interpret(InheritanceType::Dominant, &one_two_one());
        assert_eq!(outcome.normal, 25);
        assert_eq!(outcome.visual, 75);
        assert_eq!(outcome.het, 0);
        assert_eq!(outcome.total(), 100);
    }

    #[test]
    fn empty_distribution_is_all_zero() {
        let outcome = interpret(InheritanceType::Codominant, &GenotypeDistribution::new());
        assert_eq!(outcome, PhenotypeOutcome::default());
    }
}
