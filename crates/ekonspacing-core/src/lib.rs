//! # eKonSpacing Core
//!
//! Builds the character-level Korean spacing recognition dataset. Every
//! non-blank line of a partition becomes a record of its characters and
//! their BIES spacing tags.
//!
//! ## Quick Start
//!
//! ```rust
//! use ekonspacing_core::generate_examples;
//!
//! let lines = ["안녕 하세요", "", "가 나"].map(|l| Ok(l.to_string()));
//! let records: Vec<_> = generate_examples(lines)
//!     .collect::<ekonspacing_core::Result<_>>()
//!     .unwrap();
//!
//! assert_eq!(records[0].1.spacing_tags, vec![2, 3, 2, 0, 3]);
//! assert_eq!(records[1].0, 2);
//! ```
pub mod config;
pub mod dataset;
pub mod error;
pub mod record;
pub mod source;
pub mod tags;

// Re-export primary API
pub use config::{DataFiles, DatasetConfig, Partition, Variant, DATASET_VERSION};
pub use dataset::{SpacingDataset, SplitGenerator};
pub use error::{Result, SpacingError};
pub use record::{generate_examples, is_space, Examples, PartitionStats, Record};
pub use source::{PartitionSource, UniversalLines};
pub use tags::{derive_tags, restore_spacing, validate_tags, Label, TAGS, TAG_NAMES};
