//! Tests for the motif configuration system.

use std::sync::Mutex;

use motif_core::config::{
    ConfigOverrides, ExtractionDependentMetricConfig, ExtractionMetricConfig, MinerConfig,
    SimpleMetricConfig,
};
use motif_core::errors::ConfigError;
use motif_core::types::{AnchorStrategy, RepresentationScheme, ScoreKind};

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn clear_motif_env_vars() {
    for key in [
        "MOTIF_MAXIMAL_EPOCHS",
        "MOTIF_ITEMSET_COMPARATOR",
        "MOTIF_SIGNIFICANCE_SAMPLE_SIZE",
        "MOTIF_SIGNIFICANCE_SEED",
    ] {
        std::env::remove_var(key);
    }
}

const FULL_CONFIG: &str = r#"
maximal_epochs = 4
itemset_comparator = "cohesion"

[[simple_metrics]]
type = "support"
minimal_support = 0.6

[extraction_metric]
type = "cohesion"
maximal_cohesion = 6.5
anchor_strategy = "vertex_all"
representation_scheme = "beta_carbon"
level_of_parallelism = 2

[[extraction_dependent_metrics]]
type = "separation"
maximal_separation = -50.0

[significance]
metric = "cohesion"
sample_size = 12
seed = 7
"#;

/// Parses every metric tier from TOML.
#[test]
fn test_parse_full_config() {
    let config = MinerConfig::from_toml(FULL_CONFIG).unwrap();
    assert_eq!(config.maximal_epochs, Some(4));
    assert_eq!(config.effective_itemset_comparator(), ScoreKind::Cohesion);

    let SimpleMetricConfig::Support(ref support) = config.simple_metrics[0];
    assert_eq!(support.effective_minimal_support(), 0.6);

    match config.extraction_metric {
        Some(ExtractionMetricConfig::Cohesion(ref cohesion)) => {
            assert_eq!(cohesion.effective_maximal_cohesion(), 6.5);
            assert_eq!(cohesion.anchor_strategy, Some(AnchorStrategy::VertexAll));
            assert_eq!(
                cohesion.representation_scheme,
                Some(RepresentationScheme::BetaCarbon)
            );
        }
        ref other => panic!("unexpected extraction metric {other:?}"),
    }

    match config.extraction_dependent_metrics[0] {
        ExtractionDependentMetricConfig::Separation(ref separation) => {
            assert_eq!(separation.effective_maximal_separation(), -50.0);
            assert_eq!(separation.effective_optimal_separation(), 5.0);
        }
        ref other => panic!("unexpected dependent metric {other:?}"),
    }

    let significance = config.significance.as_ref().unwrap();
    assert_eq!(significance.effective_sample_size(), 12);
    assert_eq!(significance.effective_ks_cutoff(), 0.1);
    assert_eq!(significance.effective_significance_cutoff(), 1e-3);
    assert!(MinerConfig::validate(&config).is_ok());
}

/// File, environment and overrides resolve in priority order.
#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_motif_env_vars();

    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("motif.toml");
    std::fs::write(&path, FULL_CONFIG).unwrap();

    std::env::set_var("MOTIF_MAXIMAL_EPOCHS", "9");
    std::env::set_var("MOTIF_SIGNIFICANCE_SAMPLE_SIZE", "40");
    let overrides = ConfigOverrides {
        significance_seed: Some(99),
        ..Default::default()
    };
    let config = MinerConfig::load(&path, Some(&overrides)).unwrap();
    clear_motif_env_vars();

    assert_eq!(config.maximal_epochs, Some(9));
    let significance = config.significance.unwrap();
    assert_eq!(significance.sample_size, Some(40));
    assert_eq!(significance.seed, Some(99));
}

/// An invalid comparator in the environment is a config error.
#[test]
fn test_invalid_env_comparator() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_motif_env_vars();

    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("motif.toml");
    std::fs::write(&path, FULL_CONFIG).unwrap();

    std::env::set_var("MOTIF_ITEMSET_COMPARATOR", "rmsd");
    let result = MinerConfig::load(&path, None);
    clear_motif_env_vars();

    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}

/// A missing file is reported with its path.
#[test]
fn test_missing_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    match MinerConfig::load(&path, None) {
        Err(ConfigError::FileNotFound { path: reported }) => {
            assert!(reported.ends_with("absent.toml"))
        }
        other => panic!("expected FileNotFound, got {other:?}"),
    }
}

/// Malformed TOML is a parse error.
#[test]
fn test_parse_error() {
    let result = MinerConfig::from_toml("maximal_epochs = [");
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

/// Validation rejects malformed epoch limits and conflicting metrics.
#[test]
fn test_validation_failures() {
    let cases = [
        (
            "maximal_epochs = 0\n[[simple_metrics]]\ntype = \"support\"\n",
            "maximal_epochs",
        ),
        ("maximal_epochs = 2\n", "metrics"),
        (
            "[[simple_metrics]]\ntype = \"support\"\nminimal_support = 1.5\n",
            "simple_metrics[0].minimal_support",
        ),
        (
            "[[extraction_dependent_metrics]]\ntype = \"separation\"\n",
            "extraction_dependent_metrics",
        ),
        (
            "[[simple_metrics]]\ntype = \"support\"\n[[simple_metrics]]\ntype = \"support\"\n",
            "metrics",
        ),
        (
            "[extraction_metric]\ntype = \"adherence\"\nminimal_observations = 1\n",
            "extraction_metric.minimal_observations",
        ),
        (
            "[extraction_metric]\ntype = \"cohesion\"\nlevel_of_parallelism = 0\n",
            "extraction_metric.level_of_parallelism",
        ),
        (
            "[extraction_metric]\ntype = \"cohesion\"\n[significance]\nmetric = \"consensus\"\n",
            "significance.metric",
        ),
        (
            "[extraction_metric]\ntype = \"cohesion\"\n[significance]\nmetric = \"cohesion\"\nsample_size = 1\n",
            "significance.sample_size",
        ),
    ];

    for (toml, expected_field) in cases {
        let config = MinerConfig::from_toml(toml).unwrap();
        match MinerConfig::validate(&config) {
            Err(ConfigError::ValidationFailed { field, .. }) => {
                assert_eq!(field, expected_field, "for config:\n{toml}")
            }
            other => panic!("expected validation failure for:\n{toml}\ngot {other:?}"),
        }
    }
}

/// Serializing and re-parsing keeps the configuration intact.
#[test]
fn test_to_toml_preserves_config() {
    let config = MinerConfig::from_toml(FULL_CONFIG).unwrap();
    let rendered = config.to_toml().unwrap();
    let reparsed = MinerConfig::from_toml(&rendered).unwrap();
    assert_eq!(config, reparsed);
}
