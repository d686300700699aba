use morph_genetics::{
    analysis::*, output::*, parsers::*, registry::GeneRegistry, types::*, GeneticsError,
};
use proptest::prelude::*;
use std::fs;

fn all_valid_pairings(registry: &GeneRegistry) -> Vec<(String, BiologicalState, BiologicalState)> {
    let mut pairings = Vec::new();
    for gene in registry.iter() {
        for &sire in gene.inheritance.valid_states() {
            for &dam in gene.inheritance.valid_states() {
                pairings.push((gene.id.clone(), sire, dam));
            }
        }
    }
    pairings
}

#[test]
fn test_public_api_is_exported() {
    let registry = GeneRegistry::builtin();
    let _calculator = GeneCalculator::new(&registry);
    let _parser = FileParser::new();
    let _generator = ReportGenerator::new(None);

    let _format = ReportFormat::Json;
    let _genotype = Genotype::Heterozygous;
    let _inheritance = InheritanceType::Codominant;
}

#[test]
fn test_every_valid_cross_sums_to_one_hundred() {
    let registry = GeneRegistry::builtin();
    let calculator = GeneCalculator::new(&registry);

    for (gene_id, sire, dam) in all_valid_pairings(&registry) {
        let report = calculator.calculate(&gene_id, sire.as_str(), dam.as_str()).unwrap();
        assert_eq!(report.combinations.total(), 100, "{gene_id} {sire} x {dam}");
        assert_eq!(report.outcome.total(), 100, "{gene_id} {sire} x {dam}");

        for (_, weight) in report.combinations.iter() {
            assert_eq!(weight % 25, 0);
        }
    }
}

#[test]
fn test_phenotypes_stay_within_the_gene_type() {
    let registry = GeneRegistry::builtin();
    let calculator = GeneCalculator::new(&registry);

    for (gene_id, sire, dam) in all_valid_pairings(&registry) {
        let report = calculator.calculate(&gene_id, sire.as_str(), dam.as_str()).unwrap();
        match registry.get(&gene_id).unwrap().inheritance {
            InheritanceType::Recessive => assert_eq!(report.outcome.super_form, 0),
            InheritanceType::Codominant => assert_eq!(report.outcome.visual, 0),
            InheritanceType::Dominant => {
                assert_eq!(report.outcome.het, 0);
                assert_eq!(report.outcome.super_form, 0);
            }
        }
    }
}

#[test]
fn test_reference_crosses() {
    let registry = GeneRegistry::builtin();
    let calculator = GeneCalculator::new(&registry);

    let report = calculator.calculate("tremper", "het", "het").unwrap();
    assert_eq!(
        serde_json::to_value(&report).unwrap(),
        serde_json::json!({
            "gen": "Tremper Albino",
            "combinaciones": {"AA": 25, "Aa": 50, "aa": 25},
            "resultado": {"normal": 25, "het": 50, "visual": 25, "super": 0}
        })
    );

    let report = calculator.calculate("tremper", "normal", "visual").unwrap();
    assert_eq!(
        serde_json::to_value(&report.combinations).unwrap(),
        serde_json::json!({"Aa": 100})
    );
    assert_eq!(report.outcome.het, 100);

    let report = calculator.calculate("mack_snow", "het", "super").unwrap();
    assert_eq!(
        serde_json::to_value(&report.combinations).unwrap(),
        serde_json::json!({"Aa": 50, "aa": 50})
    );
    assert_eq!(report.outcome.het, 50);
    assert_eq!(report.outcome.super_form, 50);

    let report = calculator.calculate("enigma", "visual", "visual").unwrap();
    assert_eq!(report.outcome.normal, 25);
    assert_eq!(report.outcome.visual, 75);
}

#[test]
fn test_errors_are_surfaced() {
    let registry = GeneRegistry::builtin();
    let calculator = GeneCalculator::new(&registry);

    assert!(matches!(
        calculator.calculate("ghost", "normal", "normal"),
        Err(GeneticsError::UnknownGene { .. })
    ));
    assert!(matches!(
        calculator.calculate("tremper", "super", "normal"),
        Err(GeneticsError::InvalidState { .. })
    ));
}

#[test]
fn test_repeated_calls_are_identical() {
    let registry = GeneRegistry::builtin();
    let calculator = GeneCalculator::new(&registry);

    let first = calculator.calculate("giant", "het", "het").unwrap();
    let second = calculator.calculate("giant", "het", "het").unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_het_estimates() {
    assert_eq!(estimate_het(Some(66.0), Some(0.0)), 33.0);
    assert_eq!(estimate_het(Some(0.0), Some(0.0)), 0.0);
    assert_eq!(estimate_het(Some(100.0), Some(50.0)), 75.0);
    assert_eq!(estimate_het(None, None), 0.0);
}

#[test]
fn test_registry_file_merges_over_builtin() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("genes.toml");
    fs::write(
        &path,
        r#"
[[gene]]
id = "tangerine"
name = "Tangerine"
type = "recessive"

[[gene]]
id = "enigma"
name = "Enigma (proven)"
type = "dominant"
"#,
    )
    .unwrap();

    let loaded = FileParser::new().load_registry(&path).unwrap();
    assert_eq!(loaded.len(), 2);

    let registry = GeneRegistry::builtin().merge(loaded);
    assert_eq!(registry.len(), 11);

    let report = GeneCalculator::new(&registry)
        .calculate("tangerine", "het", "visual")
        .unwrap();
    assert_eq!(report.gene, "Tangerine");
    assert_eq!(report.outcome.het, 50);
    assert_eq!(report.outcome.visual, 50);
    assert_eq!(registry.get("enigma").unwrap().name, "Enigma (proven)");
}

#[test]
fn test_registry_file_formats() {
    let dir = tempfile::tempdir().unwrap();
    let parser = FileParser::new();

    let json = dir.path().join("genes.json");
    fs::write(&json, r#"[{"id": "bell", "name": "Bell Albino", "type": "recessive"}]"#).unwrap();
    assert!(parser.load_registry(&json).unwrap().contains("bell"));

    let tsv = dir.path().join("genes.tsv");
    fs::write(&tsv, "id\tname\ttype\ngiant\tGiant / Super Giant\tcodominant\n").unwrap();
    assert_eq!(
        parser.load_registry(&tsv).unwrap().get("giant").unwrap().inheritance,
        InheritanceType::Codominant
    );

    let duplicated = dir.path().join("dupes.csv");
    fs::write(&duplicated, "id,name,type\nbell,Bell,recessive\nbell,Bell 2,recessive\n").unwrap();
    let err = parser.load_registry(&duplicated).unwrap_err();
    assert!(format!("{err:#}").contains("Duplicate gene id: bell"));

    let missing = dir.path().join("missing.toml");
    assert!(parser.load_registry(&missing).is_err());
}

proptest! {
    #[test]
    fn unrecognized_states_are_invalid(state in "\\PC*") {
        let registry = GeneRegistry::builtin();
        let calculator = GeneCalculator::new(&registry);
        let result = calculator.calculate("tremper", &state, "normal");

        if matches!(state.as_str(), "normal" | "het" | "visual") {
            prop_assert!(result.is_ok());
        } else {
            prop_assert_eq!(
                result,
                Err(GeneticsError::InvalidState {
                    gene_type: InheritanceType::Recessive,
                    state: state.clone(),
                })
            );
        }
    }

    #[test]
    fn unknown_gene_ids_are_rejected(gene_id in "[a-z_]{1,16}") {
        let registry = GeneRegistry::builtin();
        let result = GeneCalculator::new(&registry).calculate(&gene_id, "normal", "normal");

        if registry.contains(&gene_id) {
            prop_assert!(result.is_ok());
        } else {
            prop_assert_eq!(result, Err(GeneticsError::UnknownGene { gene_id: gene_id.clone() }));
        }
    }

    #[test]
    fn het_estimate_is_half_the_sum(sire in 0.0f64..=100.0, dam in 0.0f64..=100.0) {
        let estimate = estimate_het(Some(sire), Some(dam));
        prop_assert!((estimate - (sire + dam) / 2.0).abs() < 1e-9);
    }
}
