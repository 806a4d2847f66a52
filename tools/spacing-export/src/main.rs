//! eKonSpacing Export Tool
//!
//! Writes the spacing dataset partitions as JSON lines, tags ad-hoc text
//! from stdin, and reports where partition files are looked up.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ekonspacing_core::{
    dataset::log_stats, generate_examples, DataFiles, DatasetConfig, Examples, PartitionStats,
    Record, SpacingDataset, UniversalLines, Variant,
};
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::info;

/// Default data directory
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ekonspacing")
}

/// CLI arguments
#[derive(Parser)]
#[command(name = "spacing-export")]
#[command(about = "Build the Korean spacing recognition dataset")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Dataset variant ("default" or "small")
    #[arg(short, long, env = "EKONSPACING_VARIANT", default_value = "default")]
    variant: Variant,

    /// Directory holding the partition files
    #[arg(short = 'D', long, env = "EKONSPACING_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Explicit train file (requires --validation and --test)
    #[arg(long, requires_all = ["validation", "test"])]
    train: Option<PathBuf>,

    /// Explicit validation file
    #[arg(long, requires_all = ["train", "test"])]
    validation: Option<PathBuf>,

    /// Explicit test file
    #[arg(long, requires_all = ["train", "validation"])]
    test: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write every partition as <partition>.jsonl
    Export {
        /// Output directory
        #[arg(short, long)]
        out: PathBuf,

        /// Write tag symbols instead of indices
        #[arg(long)]
        tag_names: bool,
    },
    /// Tag lines read from stdin
    Tag {
        /// Write tag symbols instead of indices
        #[arg(long)]
        tag_names: bool,
    },
    /// Show the resolved configuration
    Info,
}

impl Cli {
    fn dataset_config(&self) -> Result<DatasetConfig> {
        let mut config = DatasetConfig::new()
            .with_variant(self.variant)
            .with_data_dir(self.data_dir.clone().unwrap_or_else(default_data_dir));

        if self.train.is_some() || self.validation.is_some() || self.test.is_some() {
            let files = DataFiles::from_parts(
                self.train.clone(),
                self.validation.clone(),
                self.test.clone(),
            )?;
            config = config.with_data_files(files);
        }
        Ok(config)
    }
}

/// Tags as written to the output.
#[derive(Serialize)]
#[serde(untagged)]
enum Tags<'a> {
    Indices(&'a [u8]),
    Names(Vec<&'static str>),
}

/// One output line.
#[derive(Serialize)]
struct ExportRecord<'a> {
    id: usize,
    text: &'a str,
    tokens: &'a [char],
    spacing_tags: Tags<'a>,
}

fn write_record<W: Write>(out: &mut W, id: usize, record: &Record, tag_names: bool) -> Result<()> {
    let spacing_tags = if tag_names {
        Tags::Names(record.tag_names())
    } else {
        Tags::Indices(&record.spacing_tags)
    };
    let line = ExportRecord {
        id,
        text: &record.text,
        tokens: &record.tokens,
        spacing_tags,
    };
    serde_json::to_writer(&mut *out, &line)?;
    writeln!(out)?;
    Ok(())
}

/// Drain a record stream into `out`, one JSON object per line.
fn write_examples<L, W>(
    mut examples: Examples<L>,
    out: &mut W,
    tag_names: bool,
) -> Result<PartitionStats>
where
    L: Iterator<Item = io::Result<String>>,
    W: Write,
{
    for example in examples.by_ref() {
        let (id, record) = example?;
        write_record(out, id, &record, tag_names)?;
    }
    Ok(examples.stats())
}

fn export(dataset: &SpacingDataset, out_dir: &Path, tag_names: bool) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;

    for split in dataset.split_generators() {
        let examples = dataset.generate(split.partition)?;
        let out_path = out_dir.join(format!("{}.jsonl", split.partition));

        // a failed partition leaves no output behind
        let tmp = NamedTempFile::new_in(out_dir)
            .with_context(|| format!("Failed to create a temporary file in {}", out_dir.display()))?;
        let mut writer = BufWriter::new(tmp);

        let stats = write_examples(examples, &mut writer, tag_names)
            .with_context(|| format!("Failed to export {} partition", split.partition))?;
        let tmp = writer.into_inner().map_err(|e| e.into_error())?;
        tmp.persist(&out_path)
            .with_context(|| format!("Failed to write {}", out_path.display()))?;

        log_stats(split.partition, &stats);
        info!(path = %out_path.display(), "wrote {} records", stats.records);
    }
    Ok(())
}

fn print_info(dataset: &SpacingDataset) {
    let config = dataset.config();
    println!("variant:     {}", config.variant);
    println!("version:     {}", config.version);
    println!("description: {}", config.description());
    for split in dataset.split_generators() {
        let status = if split.path.exists() { "found" } else { "missing" };
        println!("{:<12} {} ({status})", format!("{}:", split.partition), split.path.display());
    }
}

fn main() -> Result<()> {
    // stdout carries the records
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    let dataset = SpacingDataset::new(cli.dataset_config()?);

    match cli.command {
        Commands::Export { ref out, tag_names } => {
            info!(variant = %cli.variant, "Exporting dataset to {}", out.display());
            export(&dataset, out, tag_names)?;
        }
        Commands::Tag { tag_names } => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            let mut out = stdout.lock();
            let examples = generate_examples(UniversalLines::new(stdin.lock()));
            let stats =
                write_examples(examples, &mut out, tag_names).context("Failed to tag stdin")?;
            info!(
                lines = stats.lines,
                records = stats.records,
                skipped = stats.skipped,
                "tagged stdin"
            );
        }
        Commands::Info => print_info(&dataset),
    }

    Ok(())
}
