//! # Spacing Dataset
//!
//! Ties a [`DatasetConfig`] to its three partitions and produces the
//! record stream of each one.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::{DatasetConfig, Partition};
use crate::error::Result;
use crate::record::{Examples, PartitionStats, Record};
use crate::source::PartitionSource;

/// A partition together with the file its lines come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitGenerator {
    pub partition: Partition,
    pub path: PathBuf,
}

/// The Korean spacing recognition dataset.
#[derive(Debug, Clone, Default)]
pub struct SpacingDataset {
    config: DatasetConfig,
}

impl SpacingDataset {
    /// Create a dataset for the given configuration.
    pub fn new(config: DatasetConfig) -> Self {
        Self { config }
    }

    /// Get the dataset configuration.
    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    /// The three partitions and their source files, in train, validation, test order.
    pub fn split_generators(&self) -> Vec<SplitGenerator> {
        Partition::ALL
            .iter()
            .map(|&partition| SplitGenerator {
                partition,
                path: self.config.partition_path(partition),
            })
            .collect()
    }

    /// Open `partition` and return its lazy record stream.
    ///
    /// The source is opened eagerly, so a missing file fails here before any
    /// record is produced.
    pub fn generate(&self, partition: Partition) -> Result<Examples<PartitionSource>> {
        let path = self.config.partition_path(partition);
        let source = PartitionSource::open(partition, path)?;
        Ok(Examples::new(source))
    }

    /// Read a whole partition into memory.
    pub fn load(&self, partition: Partition) -> Result<(Vec<(usize, Record)>, PartitionStats)> {
        let mut examples = self.generate(partition)?;
        let records = examples.by_ref().collect::<Result<Vec<_>>>()?;
        let stats = examples.stats();
        log_stats(partition, &stats);
        Ok((records, stats))
    }
}

/// Log the counters of a finished partition.
pub fn log_stats(partition: Partition, stats: &PartitionStats) {
    if stats.records == 0 {
        warn!(%partition, lines = stats.lines, "partition produced no records");
    } else {
        info!(
            %partition,
            lines = stats.lines,
            records = stats.records,
            skipped = stats.skipped,
            characters = stats.characters,
            "partition complete"
        );
    }
}
