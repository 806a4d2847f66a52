//! # Dataset Configuration
//!
//! Variant selection and partition file resolution for the spacing dataset.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpacingError};

/// Version tag shared by every dataset variant.
pub const DATASET_VERSION: &str = "1.0.0";

/// One of the three disjoint example subsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Partition {
    Train,
    Validation,
    Test,
}

impl Partition {
    /// All partitions in generation order.
    pub const ALL: [Partition; 3] = [Partition::Train, Partition::Validation, Partition::Test];

    /// Canonical partition name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Train => "train",
            Self::Validation => "validation",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Size variant of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// The full dataset.
    #[default]
    Default,
    /// A reduced sample of the same three partitions.
    Small,
}

impl Variant {
    /// Configuration name of the variant.
    pub fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Small => "small",
        }
    }

    /// Human readable description of the variant.
    pub fn description(self) -> &'static str {
        match self {
            Self::Default => "Korean spacing recognition dataset",
            Self::Small => "Korean spacing recognition small dataset",
        }
    }

    /// File name holding `partition` for this variant.
    pub fn file_name(self, partition: Partition) -> &'static str {
        match (self, partition) {
            (Self::Default, Partition::Train) => "train.txt",
            (Self::Default, Partition::Validation) => "val.txt",
            (Self::Default, Partition::Test) => "test.txt",
            (Self::Small, Partition::Train) => "train_small.txt",
            (Self::Small, Partition::Validation) => "val_small.txt",
            (Self::Small, Partition::Test) => "test_small.txt",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = SpacingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "small" => Ok(Self::Small),
            _ => Err(SpacingError::UnknownVariant(s.to_string())),
        }
    }
}

/// Explicit per-partition source files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFiles {
    pub train: PathBuf,
    pub validation: PathBuf,
    pub test: PathBuf,
}

impl DataFiles {
    /// Build from optional paths, requiring all three.
    pub fn from_parts(
        train: Option<PathBuf>,
        validation: Option<PathBuf>,
        test: Option<PathBuf>,
    ) -> Result<Self> {
        Ok(Self {
            train: train.ok_or(SpacingError::IncompleteDataFiles(Partition::Train))?,
            validation: validation.ok_or(SpacingError::IncompleteDataFiles(Partition::Validation))?,
            test: test.ok_or(SpacingError::IncompleteDataFiles(Partition::Test))?,
        })
    }

    /// Source file of a partition.
    pub fn get(&self, partition: Partition) -> &Path {
        match partition {
            Partition::Train => &self.train,
            Partition::Validation => &self.validation,
            Partition::Test => &self.test,
        }
    }
}

/// Configuration for the spacing dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetConfig {
    /// Which size variant to load
    pub variant: Variant,
    /// Version tag of the dataset
    pub version: String,
    /// Directory holding the variant's partition files
    pub data_dir: PathBuf,
    /// Explicit partition files; take precedence over `data_dir`
    pub data_files: Option<DataFiles>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Default,
            version: DATASET_VERSION.to_string(),
            data_dir: PathBuf::from("."),
            data_files: None,
        }
    }
}

impl DatasetConfig {
    /// Create a new dataset configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the size variant.
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the directory the partition files are read from.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Use explicit partition files instead of the data directory.
    pub fn with_data_files(mut self, files: DataFiles) -> Self {
        self.data_files = Some(files);
        self
    }

    /// Description of the selected variant.
    pub fn description(&self) -> &'static str {
        self.variant.description()
    }

    /// Resolve the source file of `partition`.
    pub fn partition_path(&self, partition: Partition) -> PathBuf {
        match &self.data_files {
            Some(files) => files.get(partition).to_path_buf(),
            None => self.data_dir.join(self.variant.file_name(partition)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_parse() {
        assert_eq!("default".parse::<Variant>().unwrap(), Variant::Default);
        assert_eq!("Small".parse::<Variant>().unwrap(), Variant::Small);
        assert!(matches!(
            "large".parse::<Variant>(),
            Err(SpacingError::UnknownVariant(_))
        ));
    }

    #[test]
    fn test_variant_serde() {
        let json = serde_json::to_string(&Variant::Small).unwrap();
        assert_eq!(json, "\"small\"");
        let back: Variant = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Variant::Small);
    }

    #[test]
    fn test_default_config() {
        let config = DatasetConfig::new();
        assert_eq!(config.variant, Variant::Default);
        assert_eq!(config.version, "1.0.0");
        assert_eq!(config.description(), "Korean spacing recognition dataset");
        assert!(config.data_files.is_none());
    }

    #[test]
    fn test_partition_paths_from_data_dir() {
        let config = DatasetConfig::new().with_data_dir("/data");
        assert_eq!(
            config.partition_path(Partition::Validation),
            PathBuf::from("/data/val.txt")
        );

        let config = config.with_variant(Variant::Small);
        assert_eq!(
            config.partition_path(Partition::Train),
            PathBuf::from("/data/train_small.txt")
        );
        assert_eq!(
            config.partition_path(Partition::Test),
            PathBuf::from("/data/test_small.txt")
        );
    }

    #[test]
    fn test_data_files_override() {
        let files = DataFiles {
            train: "a.txt".into(),
            validation: "b.txt".into(),
            test: "c.txt.gz".into(),
        };
        let config = DatasetConfig::new()
            .with_data_dir("/ignored")
            .with_variant(Variant::Small)
            .with_data_files(files);

        assert_eq!(config.partition_path(Partition::Train), PathBuf::from("a.txt"));
        assert_eq!(config.partition_path(Partition::Test), PathBuf::from("c.txt.gz"));
    }

    #[test]
    fn test_data_files_from_parts() {
        let files = DataFiles::from_parts(Some("a".into()), Some("b".into()), Some("c".into()));
        assert!(files.is_ok());

        let err = DataFiles::from_parts(Some("a".into()), None, Some("c".into())).unwrap_err();
        assert!(matches!(
            err,
            SpacingError::IncompleteDataFiles(Partition::Validation)
        ));
    }

    #[test]
    fn test_partition_names() {
        let names: Vec<_> = Partition::ALL.iter().map(|p| p.to_string()).collect();
        assert_eq!(names, ["train", "validation", "test"]);
    }
}
