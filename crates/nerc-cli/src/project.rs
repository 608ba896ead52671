//! Project bootstrap: config directory layout and document fetching.
//!
//! A project's documents live under
//! `<config root>/ner-classifier/<user>/<project>/documents/`, keyed by
//! the basename of their source URL. Documents already on disk are
//! never fetched again.

use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use nerc_core::ProjectConfig;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// A prepared project: parsed configuration plus a populated documents
/// directory.
pub struct Project {
    /// The parsed annotations file.
    pub config: ProjectConfig,
    /// Directory holding the fetched documents.
    pub documents_dir: PathBuf,
}

impl Project {
    /// Materialize the project directory and fetch missing documents.
    ///
    /// `config_root` overrides the user configuration directory; used
    /// by tests and scripted runs.
    pub fn prepare(config: ProjectConfig, config_root: Option<PathBuf>) -> Result<Self> {
        let root = match config_root {
            Some(dir) => dir,
            None => dirs::config_dir()
                .context("cannot determine the user configuration directory")?,
        };
        let documents_dir = root
            .join("ner-classifier")
            .join(&config.user_name)
            .join(&config.project_name)
            .join("documents");
        fs::create_dir_all(&documents_dir).with_context(|| {
            format!("failed to create documents directory {}", documents_dir.display())
        })?;
        fetch_missing_documents(&config, &documents_dir)?;
        Ok(Self {
            config,
            documents_dir,
        })
    }

    /// Local path of a document, derived from its URL basename.
    #[must_use]
    pub fn document_path(&self, url: &str) -> PathBuf {
        self.documents_dir.join(basename(url))
    }
}

/// Final path segment of a URL.
pub fn basename(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

fn fetch_missing_documents(config: &ProjectConfig, documents_dir: &Path) -> Result<()> {
    let pending: Vec<&str> = config
        .documents
        .iter()
        .map(|d| d.file.as_str())
        .filter(|url| !documents_dir.join(basename(url)).exists())
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .context("failed to build HTTP client")?;

    let bar = ProgressBar::new(pending.len() as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("template is compile-time constant")
            .progress_chars("█▓▒░  "),
    );

    for url in pending {
        let name = basename(url);
        bar.set_message(name.to_string());
        let response = client
            .get(url)
            .send()
            .with_context(|| format!("failed to fetch {url}"))?;
        if !response.status().is_success() {
            bail!("HTTP error {} fetching {url}", response.status());
        }
        let bytes = response
            .bytes()
            .with_context(|| format!("failed to read response body from {url}"))?;
        fs::write(documents_dir.join(name), &bytes)
            .with_context(|| format!("failed to write {name}"))?;
        log::debug!("fetched {url} ({} bytes)", bytes.len());
        bar.inc(1);
    }
    bar.finish_and_clear();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(documents: Vec<nerc_core::DocumentRef>) -> ProjectConfig {
        ProjectConfig {
            user_name: "user".to_string(),
            project_name: "proj".to_string(),
            documents,
        }
    }

    #[test]
    fn basename_takes_the_last_segment() {
        assert_eq!(
            basename("https://example.com/a/b/Statement_1.html"),
            "Statement_1.html"
        );
        assert_eq!(basename("plain"), "plain");
    }

    #[test]
    fn prepare_creates_the_project_layout() {
        let root = tempfile::tempdir().unwrap();
        let project =
            Project::prepare(config(vec![]), Some(root.path().to_path_buf())).unwrap();
        assert!(project.documents_dir.is_dir());
        assert!(project
            .documents_dir
            .ends_with("ner-classifier/user/proj/documents"));
    }

    #[test]
    fn existing_documents_are_not_refetched() {
        let root = tempfile::tempdir().unwrap();
        let documents_dir = root
            .path()
            .join("ner-classifier/user/proj/documents");
        fs::create_dir_all(&documents_dir).unwrap();
        // pre-seed the file; prepare must not touch the network for it
        fs::write(documents_dir.join("doc.html"), "<p>x</p>").unwrap();

        let config = config(vec![nerc_core::DocumentRef {
            file: "https://unreachable.invalid/doc.html".to_string(),
            annotations: vec![],
        }]);
        let project = Project::prepare(config, Some(root.path().to_path_buf())).unwrap();
        assert_eq!(
            fs::read_to_string(project.document_path("https://unreachable.invalid/doc.html"))
                .unwrap(),
            "<p>x</p>"
        );
    }
}
