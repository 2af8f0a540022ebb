//! Sequences the processing stages over an in-memory table and hands the
//! two outputs to their sinks. The core stays format-agnostic: sinks are
//! the only place an output format is decided.

use anyhow::{Context, Result};
use tracing::info;

use crate::domain::{Entity, QualitySummary, RawRecord};
use crate::pipeline::processing::{enrich, grouping, quality};

/// Output port for the consolidated dataset.
pub trait DatasetSink {
    fn write_entities(&mut self, entities: &[Entity]) -> crate::common::Result<()>;
}

/// Output port for the quality summary.
pub trait SummarySink {
    fn write_summary(&mut self, summary: &QualitySummary) -> crate::common::Result<()>;
}

/// Result of one full pipeline run.
#[derive(Debug)]
pub struct PipelineOutcome {
    pub entities: Vec<Entity>,
    pub summary: QualitySummary,
}

/// Runs enrich → group → assess over the raw rows. Pure with respect to
/// the outside world; all I/O happens in the sinks.
pub fn run_pipeline(rows: Vec<RawRecord>) -> PipelineOutcome {
    info!("🔧 Enriching {} raw rows", rows.len());
    let enriched = enrich::enrich_all(rows);

    info!("🧩 Grouping rows by group id");
    let grouping::GroupingOutcome {
        entities,
        rows_without_group_id,
    } = grouping::group_entities(&enriched);

    let raw_rows: Vec<RawRecord> = enriched.into_iter().map(|record| record.raw).collect();
    let processed_entries = raw_rows.len() - rows_without_group_id;

    info!("🛡️ Assessing data quality");
    let summary = quality::summarize(&raw_rows, &entities, processed_entries);

    info!(
        "✅ Pipeline produced {} entities from {} rows ({} processed)",
        entities.len(),
        summary.record_count,
        summary.processed_entries
    );

    PipelineOutcome { entities, summary }
}

/// Orchestrator wiring the core pipeline to its output sinks.
pub struct PipelineOrchestrator {
    dataset_sink: Box<dyn DatasetSink>,
    summary_sink: Box<dyn SummarySink>,
}

impl PipelineOrchestrator {
    pub fn new(dataset_sink: Box<dyn DatasetSink>, summary_sink: Box<dyn SummarySink>) -> Self {
        Self {
            dataset_sink,
            summary_sink,
        }
    }

    /// Runs the pipeline and emits both artifacts. A sink failure is
    /// structural and aborts the run.
    pub fn run(&mut self, rows: Vec<RawRecord>) -> Result<PipelineOutcome> {
        let outcome = run_pipeline(rows);

        self.dataset_sink
            .write_entities(&outcome.entities)
            .context("Failed to write consolidated dataset")?;
        self.summary_sink
            .write_summary(&outcome.summary)
            .context("Failed to write quality summary")?;

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct CapturedOutput {
        entities: Vec<Entity>,
        summaries: Vec<QualitySummary>,
    }

    struct MockDatasetSink(Rc<RefCell<CapturedOutput>>);
    struct MockSummarySink(Rc<RefCell<CapturedOutput>>);

    impl DatasetSink for MockDatasetSink {
        fn write_entities(&mut self, entities: &[Entity]) -> crate::common::Result<()> {
            self.0.borrow_mut().entities = entities.to_vec();
            Ok(())
        }
    }

    impl SummarySink for MockSummarySink {
        fn write_summary(&mut self, summary: &QualitySummary) -> crate::common::Result<()> {
            self.0.borrow_mut().summaries.push(summary.clone());
            Ok(())
        }
    }

    fn raw_row(group_id: &str, name: &str, alias_type: &str) -> RawRecord {
        RawRecord {
            name_parts: [
                Some(name.to_string()),
                None,
                None,
                None,
                None,
                None,
            ],
            alias_type: Some(alias_type.to_string()),
            group_id: Some(group_id.to_string()),
            ..RawRecord::default()
        }
    }

    #[test]
    fn orchestrator_emits_entities_and_summary_to_sinks() {
        let captured = Rc::new(RefCell::new(CapturedOutput::default()));
        let mut orchestrator = PipelineOrchestrator::new(
            Box::new(MockDatasetSink(captured.clone())),
            Box::new(MockSummarySink(captured.clone())),
        );

        let rows = vec![
            raw_row("1", "jane doe", "Primary name"),
            raw_row("1", "j doe", "a.k.a."),
            raw_row("2", "john smith", "Primary name"),
        ];
        let outcome = orchestrator.run(rows).unwrap();

        assert_eq!(outcome.entities.len(), 2);
        let output = captured.borrow();
        assert_eq!(output.entities.len(), 2);
        assert_eq!(output.summaries.len(), 1);
        assert_eq!(output.summaries[0].record_count, 3);
        assert_eq!(output.summaries[0].processed_entries, 3);
    }
}
