use std::time::{Duration, Instant};

use crate::assemble::assemble;
use crate::config::ExtractConfig;
use crate::error::TableError;
use crate::extraction::PageSource;
use crate::model::{ExtractionResult, TableCandidate};
use crate::strategy::{Strategy, StrategyKind};

/// Time budget for one document, checked between (strategy, page) steps.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    limit: Option<Duration>,
}

impl Deadline {
    pub fn new(limit: Option<Duration>) -> Self {
        Deadline {
            started: Instant::now(),
            limit,
        }
    }

    pub fn unbounded() -> Self {
        Deadline::new(None)
    }

    pub fn check(&self) -> Result<(), TableError> {
        let elapsed = self.started.elapsed();
        match self.limit {
            Some(limit) if elapsed > limit => Err(TableError::DeadlineExceeded {
                elapsed_ms: elapsed.as_millis(),
            }),
            _ => Ok(()),
        }
    }
}

/// Runs the strategy cascade over a document's pages.
///
/// Standard strategies run in order until one finds a table. If none does
/// and aggressive mode is on, the aggressive strategies run the same way.
pub struct Extractor {
    standard: Vec<Box<dyn Strategy>>,
    aggressive: Vec<Box<dyn Strategy>>,
    run_aggressive: bool,
    deadline: Option<Duration>,
}

impl Extractor {
    pub fn new(config: &ExtractConfig) -> Self {
        let build = |kinds: &[StrategyKind]| {
            kinds.iter().map(|k| k.build(config)).collect::<Vec<_>>()
        };
        Extractor {
            standard: build(config.standard.as_slice()),
            aggressive: build(config.aggressive.as_slice()),
            run_aggressive: config.run_aggressive,
            deadline: config.deadline(),
        }
    }

    /// An extractor over custom strategies, with aggressive mode on and no deadline.
    pub fn with_strategies(
        standard: Vec<Box<dyn Strategy>>,
        aggressive: Vec<Box<dyn Strategy>>,
    ) -> Self {
        Extractor {
            standard,
            aggressive,
            run_aggressive: true,
            deadline: None,
        }
    }

    pub fn with_aggressive(mut self, enabled: bool) -> Self {
        self.run_aggressive = enabled;
        self
    }

    pub fn with_deadline(mut self, limit: Option<Duration>) -> Self {
        self.deadline = limit;
        self
    }

    pub fn extract<P: PageSource>(&self, pages: &[P]) -> Result<ExtractionResult, TableError> {
        let sources: Vec<&dyn PageSource> = pages.iter().map(|p| p as &dyn PageSource).collect();
        self.extract_sources(&sources)
    }

    pub fn extract_sources(
        &self,
        pages: &[&dyn PageSource],
    ) -> Result<ExtractionResult, TableError> {
        let deadline = Deadline::new(self.deadline);

        if let Some(result) = run_cascade(&self.standard, pages, &deadline)? {
            return Ok(result);
        }

        if !self.run_aggressive {
            log::info!("No tables found; aggressive strategies disabled");
            return Ok(ExtractionResult::default());
        }

        log::info!("No tables found with standard strategies, trying aggressive ones");
        if let Some(result) = run_cascade(&self.aggressive, pages, &deadline)? {
            return Ok(result);
        }

        log::warn!("No tables were detected in the document");
        Ok(ExtractionResult::default())
    }
}

fn run_cascade(
    strategies: &[Box<dyn Strategy>],
    pages: &[&dyn PageSource],
    deadline: &Deadline,
) -> Result<Option<ExtractionResult>, TableError> {
    for strategy in strategies {
        log::info!("Trying {} strategy", strategy.name());
        let found = strategy.extract(pages, deadline)?;
        if found.is_empty() {
            continue;
        }

        log::info!("Found {} tables with {} strategy", found.len(), strategy.name());
        let tables: Vec<TableCandidate> = found.into_iter().map(assemble).collect();
        return Ok(Some(ExtractionResult {
            strategy: Some(strategy.name().to_string()),
            tables,
        }));
    }
    Ok(None)
}
