//! Partial loader.
//!
//! The page is assembled from a shell with empty container elements and a
//! fixed list of HTML fragments. Each fragment is fetched in order and
//! injected into its container. A failure for one entry is logged and
//! recorded in the [`LoadReport`]; the remaining entries are still attempted.

use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};

use askama::Template;
use thiserror::Error;
use url::Url;

use crate::dom::Document;

/// A fragment and the container it is injected into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartialDescriptor {
    /// Id of the container element in the shell.
    pub container_id: &'static str,
    /// File name relative to the partials root.
    pub file: &'static str,
}

impl PartialDescriptor {
    const fn new(container_id: &'static str, file: &'static str) -> Self {
        Self { container_id, file }
    }
}

impl fmt::Display for PartialDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "partials/{} -> #{}", self.file, self.container_id)
    }
}

/// The fragments that make up the site, in load order.
pub const PARTIALS: [PartialDescriptor; 11] = [
    PartialDescriptor::new("age-gate-container", "age-gate.html"),
    PartialDescriptor::new("header-container", "header.html"),
    PartialDescriptor::new("hero-container", "hero.html"),
    PartialDescriptor::new("explore-collection-container", "explore-collection.html"),
    PartialDescriptor::new("flower-container", "flower.html"),
    PartialDescriptor::new("pre-rolls-container", "pre-rolls.html"),
    PartialDescriptor::new("vapes-container", "vapes.html"),
    PartialDescriptor::new("featured-container", "featured.html"),
    PartialDescriptor::new("about-story-container", "about-story.html"),
    PartialDescriptor::new("find-us-container", "find-us.html"),
    PartialDescriptor::new("footer-container", "footer.html"),
];

/// Errors for a single partial.
#[derive(Debug, Error)]
pub enum PartialError {
    /// Reading a fragment file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    /// The fragment URL could not be built.
    #[error("invalid fragment URL: {0}")]
    Url(#[from] url::ParseError),

    /// The shell has no element with the container id.
    #[error("container #{0} not found")]
    MissingContainer(String),
}

/// Where fragment text comes from.
pub trait FragmentSource {
    /// Human-readable location, for logs.
    fn describe(&self) -> String;

    /// Fetch the text of `file`.
    fn fetch(&self, file: &str) -> impl Future<Output = Result<String, PartialError>> + Send;
}

/// Fragments read from a local directory.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    /// Read fragments from `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory fragments are read from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FragmentSource for DirSource {
    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    async fn fetch(&self, file: &str) -> Result<String, PartialError> {
        let path = self.root.join(file);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| PartialError::Io {
                path: path.display().to_string(),
                source,
            })
    }
}

/// Fragments fetched with plain GET requests below a base URL.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base: Url,
}

impl HttpSource {
    /// Fetch fragments relative to `base`.
    ///
    /// A trailing slash is added to the base path so that relative file
    /// names resolve inside it.
    #[must_use]
    pub fn new(client: reqwest::Client, mut base: Url) -> Self {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Self { client, base }
    }
}

impl FragmentSource for HttpSource {
    fn describe(&self) -> String {
        self.base.to_string()
    }

    async fn fetch(&self, file: &str) -> Result<String, PartialError> {
        let url = self.base.join(file)?;
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PartialError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}

/// Outcome of one partial.
#[derive(Debug)]
pub struct LoadEntry {
    pub partial: PartialDescriptor,
    /// Bytes injected, or why the entry was skipped.
    pub result: Result<usize, PartialError>,
}

/// Per-entry outcomes of a load, in load order.
#[derive(Debug, Default)]
pub struct LoadReport {
    entries: Vec<LoadEntry>,
}

impl LoadReport {
    /// All entries.
    #[must_use]
    pub fn entries(&self) -> &[LoadEntry] {
        &self.entries
    }

    /// Number of partials injected.
    #[must_use]
    pub fn loaded(&self) -> usize {
        self.entries.iter().filter(|e| e.result.is_ok()).count()
    }

    /// Entries that failed.
    pub fn failures(&self) -> impl Iterator<Item = (&PartialDescriptor, &PartialError)> {
        self.entries
            .iter()
            .filter_map(|e| e.result.as_ref().err().map(|err| (&e.partial, err)))
    }

    /// Whether every partial was injected.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.entries.iter().all(|e| e.result.is_ok())
    }
}

/// Fetches partials and injects them into a document.
#[derive(Debug, Clone)]
pub struct PartialLoader<S> {
    source: S,
    partials: Vec<PartialDescriptor>,
}

impl<S: FragmentSource> PartialLoader<S> {
    /// Loader for the standard partial list.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self::with_partials(source, PARTIALS.to_vec())
    }

    /// Loader for a custom partial list.
    #[must_use]
    pub const fn with_partials(source: S, partials: Vec<PartialDescriptor>) -> Self {
        Self { source, partials }
    }

    /// Fetch every partial in order and inject it into `document`.
    ///
    /// Each fetch completes before the next starts. Returns once every entry
    /// has been attempted.
    #[tracing::instrument(skip_all, fields(source = %self.source.describe()))]
    pub async fn load(&self, document: &mut Document) -> LoadReport {
        let mut report = LoadReport::default();

        for partial in &self.partials {
            let result = self.load_one(partial, document).await;
            match &result {
                Ok(bytes) => {
                    tracing::debug!(partial = %partial, bytes, "Loaded partial");
                }
                Err(e) => {
                    tracing::error!(partial = %partial, error = %e, "Error loading partial");
                }
            }
            report.entries.push(LoadEntry {
                partial: *partial,
                result,
            });
        }

        tracing::info!(
            loaded = report.loaded(),
            total = report.entries.len(),
            "Partials loaded"
        );
        report
    }

    async fn load_one(
        &self,
        partial: &PartialDescriptor,
        document: &mut Document,
    ) -> Result<usize, PartialError> {
        let text = self.source.fetch(partial.file).await?;
        document
            .set_inner_html(partial.container_id, &text)
            .map_err(|_| PartialError::MissingContainer(partial.container_id.to_string()))?;
        Ok(text.len())
    }
}

/// The page shell holding one empty container per partial.
#[derive(Template)]
#[template(path = "shell.html")]
pub struct ShellTemplate<'a> {
    pub title: &'a str,
    pub paypal_client_id: &'a str,
}

impl ShellTemplate<'_> {
    /// The PayPal JS SDK script URL.
    #[must_use]
    pub fn paypal_sdk_url(&self) -> String {
        format!(
            "https://www.paypal.com/sdk/js?client-id={}&currency=USD",
            self.paypal_client_id
        )
    }
}
