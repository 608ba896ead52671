//! nerc - prepare NER training data from annotated HTML documents.
//!
//! Loads an annotations file, fetches the documents it names, runs the
//! lossless HTML tokenizer over each one, and resolves every
//! annotation to a raw-source span (falling back to entity
//! realignment when the annotation tool measured an unescaped view).
//! The resolved spans can be written out as JSON training records.

mod project;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use nerc_core::{NercError, ProjectConfig, ResolvedSpan, TrainingRecord};
use nerc_tokenizer::{resolve_annotation, HtmlTokenizer};
use project::{basename, Project};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "nerc",
    version,
    about = "Prepare NER training data from annotated HTML documents"
)]
struct Cli {
    /// Annotations file describing the project and its documents
    #[arg(short = 'a', long)]
    annotations_file: PathBuf,

    /// Override the configuration root (defaults to the user config directory)
    #[arg(long)]
    config_dir: Option<PathBuf>,

    /// Write resolved training records to this JSON file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Only print errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .init();
    let cli = Cli::parse();

    let config = ProjectConfig::load(&cli.annotations_file).with_context(|| {
        format!(
            "failed to load annotations file {}",
            cli.annotations_file.display()
        )
    })?;

    if !cli.quiet {
        println!(
            "{} {}/{} ({} documents)",
            "[*] Project:".bold(),
            config.user_name,
            config.project_name,
            config.documents.len()
        );
    }

    let project = Project::prepare(config, cli.config_dir.clone())?;
    let tokenizer = HtmlTokenizer::new();

    let mut records = Vec::new();
    let mut resolved_total = 0usize;
    let mut skipped_total = 0usize;

    for document in &project.config.documents {
        let name = basename(&document.file);
        let path = project.document_path(&document.file);
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read document {}", path.display()))?;

        let doc = tokenizer
            .tokenize(&raw)
            .with_context(|| format!("failed to tokenize {name}"))?;

        let mut entities: Vec<ResolvedSpan> = Vec::new();
        for annotation in &document.annotations {
            match resolve_annotation(&tokenizer, &doc, &raw, annotation) {
                Ok(span) => {
                    entities.push(span);
                    resolved_total += 1;
                }
                // incomplete annotation data: report it and keep going
                Err(NercError::Config(reason)) => {
                    skipped_total += 1;
                    eprintln!("{} {name}: {reason}", "warning:".yellow().bold());
                }
                // anything else means the document and its annotations
                // disagree structurally; partial output would poison
                // the training set
                Err(err) => {
                    return Err(err)
                        .with_context(|| format!("failed to resolve annotations for {name}"));
                }
            }
        }

        if !cli.quiet {
            println!(
                "    {} {name}: {} tokens, {} spans",
                "ok".green(),
                doc.len(),
                entities.len()
            );
        }
        records.push(TrainingRecord {
            document: name.to_string(),
            text: raw,
            entities,
        });
    }

    if !cli.quiet {
        let resolved = format!("{resolved_total} resolved").green();
        let skipped = if skipped_total > 0 {
            format!(", {skipped_total} skipped").yellow()
        } else {
            "".normal()
        };
        println!("{} {resolved}{skipped}", "[*] Annotations:".bold());
    }

    if let Some(output) = &cli.output {
        let file = fs::File::create(output)
            .with_context(|| format!("failed to create {}", output.display()))?;
        serde_json::to_writer_pretty(file, &records)
            .with_context(|| format!("failed to write {}", output.display()))?;
        if !cli.quiet {
            println!("{} {}", "[*] Wrote".bold(), output.display());
        }
    }

    Ok(())
}
