//! Builds configured metrics from a [`MinerConfig`].
//!
//! Every config variant maps to exactly one constructor. Metrics come back
//! in evaluation order: simple, extraction, extraction-dependent.

use std::sync::Arc;

use motif_core::config::{
    ExtractionDependentMetricConfig, ExtractionMetricConfig, MinerConfig, SimpleMetricConfig,
};
use motif_core::errors::{ConfigError, MiningError};
use tracing::debug;

use super::{
    AdherenceMetric, AffinityMetric, CohesionMetric, ConsensusMetric, Metric, SeparationMetric,
    StructureAligner, SupportMetric,
};
use crate::matching::MatchingSettings;
use crate::model::{DataPoint, Label};

pub struct MetricFactory<L: Label> {
    data_points: Arc<[DataPoint<L>]>,
    aligner: Option<Arc<dyn StructureAligner>>,
}

impl<L: Label> MetricFactory<L> {
    pub fn new(data_points: Arc<[DataPoint<L>]>) -> Self {
        Self {
            data_points,
            aligner: None,
        }
    }

    /// Supply the collaborator consensus and affinity align with.
    pub fn with_aligner(mut self, aligner: Arc<dyn StructureAligner>) -> Self {
        self.aligner = Some(aligner);
        self
    }

    pub fn build(&self, config: &MinerConfig) -> Result<Vec<Metric<L>>, MiningError> {
        MinerConfig::validate(config)?;

        let mut metrics = Vec::with_capacity(config.metric_kinds().len());
        for simple in &config.simple_metrics {
            metrics.push(self.simple(simple));
        }
        if let Some(ref extraction) = config.extraction_metric {
            metrics.push(self.extraction(extraction)?);
        }
        for (i, dependent) in config.extraction_dependent_metrics.iter().enumerate() {
            metrics.push(self.extraction_dependent(i, dependent)?);
        }

        debug!(
            metrics = ?metrics.iter().map(Metric::kind).collect::<Vec<_>>(),
            "metrics built"
        );
        Ok(metrics)
    }

    fn simple(&self, config: &SimpleMetricConfig) -> Metric<L> {
        match config {
            SimpleMetricConfig::Support(c) => Metric::Simple(Box::new(SupportMetric::new(
                &self.data_points,
                c.effective_minimal_support(),
            ))),
        }
    }

    fn extraction(&self, config: &ExtractionMetricConfig) -> Result<Metric<L>, MiningError> {
        let metric: Metric<L> = match config {
            ExtractionMetricConfig::Cohesion(c) => {
                Metric::Extraction(Box::new(CohesionMetric::new(
                    Arc::clone(&self.data_points),
                    c.effective_maximal_cohesion(),
                    MatchingSettings {
                        strategy: c.anchor_strategy.unwrap_or_default(),
                        order: c.anchor_order.unwrap_or_default(),
                    },
                    c.representation_scheme,
                    c.level_of_parallelism,
                )?))
            }
            ExtractionMetricConfig::Adherence(c) => Metric::Extraction(Box::new(
                AdherenceMetric::new(Arc::clone(&self.data_points), c)?,
            )),
        };
        Ok(metric)
    }

    fn extraction_dependent(
        &self,
        index: usize,
        config: &ExtractionDependentMetricConfig,
    ) -> Result<Metric<L>, MiningError> {
        let metric: Metric<L> = match config {
            ExtractionDependentMetricConfig::Consensus(c) => Metric::ExtractionDependent(
                Box::new(ConsensusMetric::<L>::new(c, self.aligner(index)?)?),
            ),
            ExtractionDependentMetricConfig::Affinity(c) => Metric::ExtractionDependent(
                Box::new(AffinityMetric::<L>::new(c, self.aligner(index)?)?),
            ),
            ExtractionDependentMetricConfig::Separation(c) => {
                Metric::ExtractionDependent(Box::new(SeparationMetric::<L>::new(c)))
            }
        };
        Ok(metric)
    }

    fn aligner(&self, index: usize) -> Result<Arc<dyn StructureAligner>, ConfigError> {
        self.aligner
            .clone()
            .ok_or_else(|| ConfigError::MissingCollaborator {
                field: format!("extraction_dependent_metrics[{index}]"),
                collaborator: "structure aligner".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use motif_core::config::{AlignmentMetricConfig, CohesionConfig, SeparationConfig, SupportConfig};
    use motif_core::errors::MotifErrorCode;
    use motif_core::types::ScoreKind;

    use super::*;
    use crate::metrics::{AlignmentRequest, ClusteringResult};
    use crate::model::{DataPointId, Item};
    use motif_core::errors::AlignmentError;

    struct NoopAligner;

    impl StructureAligner for NoopAligner {
        fn align(&self, _: &AlignmentRequest<'_>) -> Result<ClusteringResult, AlignmentError> {
            Err(AlignmentError::Failed("unused".to_string()))
        }
    }

    fn factory() -> MetricFactory<&'static str> {
        MetricFactory::new(Arc::from(vec![DataPoint::new(
            DataPointId::new("1abc", None),
            vec![Item::new("A")],
        )]))
    }

    fn config() -> MinerConfig {
        MinerConfig {
            simple_metrics: vec![SimpleMetricConfig::Support(SupportConfig::default())],
            extraction_metric: Some(ExtractionMetricConfig::Cohesion(CohesionConfig {
                level_of_parallelism: Some(1),
                ..Default::default()
            })),
            extraction_dependent_metrics: vec![
                ExtractionDependentMetricConfig::Separation(SeparationConfig::default()),
                ExtractionDependentMetricConfig::Consensus(AlignmentMetricConfig {
                    level_of_parallelism: Some(1),
                    ..Default::default()
                }),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn metrics_come_back_in_tier_order() {
        let metrics = factory()
            .with_aligner(Arc::new(NoopAligner))
            .build(&config())
            .unwrap();
        let kinds: Vec<_> = metrics.iter().map(Metric::kind).collect();
        assert_eq!(
            kinds,
            vec![
                ScoreKind::Support,
                ScoreKind::Cohesion,
                ScoreKind::Separation,
                ScoreKind::Consensus
            ]
        );
        assert!(metrics.windows(2).all(|w| w[0].tier() <= w[1].tier()));
    }

    #[test]
    fn alignment_metrics_need_an_aligner() {
        let err = factory().build(&config()).unwrap_err();
        assert_eq!(err.error_code(), "MISSING_COLLABORATOR");
        assert!(err.to_string().contains("extraction_dependent_metrics[1]"));
    }

    #[test]
    fn invalid_config_is_rejected_before_building() {
        let config = MinerConfig {
            maximal_epochs: Some(0),
            ..config()
        };
        assert!(matches!(
            factory().build(&config),
            Err(MiningError::Config(ConfigError::ValidationFailed { .. }))
        ));
    }
}
