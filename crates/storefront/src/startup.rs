//! Two-phase startup: load the partials, then wire the site.

use askama::Template;
use thiserror::Error;

use crate::catalog::{CatalogError, CatalogResource};
use crate::config::{PartialsLocation, StorefrontConfig};
use crate::dom::Document;
use crate::partials::{DirSource, FragmentSource, HttpSource, LoadReport, PartialLoader, ShellTemplate};
use crate::site::{InitError, Site};

/// Page title used by the shell.
pub const SITE_TITLE: &str = "Lowell Farms | Sun-Grown Cannabis";

/// Errors that stop the storefront from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("failed to render page shell: {0}")]
    Shell(#[from] askama::Error),

    #[error(transparent)]
    Init(#[from] InitError),
}

/// Result of the load phase.
#[derive(Debug)]
pub struct LoadedPage {
    pub page: Document,
    pub report: LoadReport,
}

/// Render the shell and inject every partial from `source`.
///
/// # Errors
///
/// Returns `StartupError::Shell` if the shell template fails. Per-partial
/// failures are reported in the returned [`LoadReport`], not as errors.
pub async fn load_page<S: FragmentSource>(
    source: S,
    paypal_client_id: &str,
) -> Result<LoadedPage, StartupError> {
    let shell = ShellTemplate {
        title: SITE_TITLE,
        paypal_client_id,
    }
    .render()?;

    let mut page = Document::new(shell);
    let report = PartialLoader::new(source).load(&mut page).await;
    Ok(LoadedPage { page, report })
}

/// Load the page from the configured location.
///
/// # Errors
///
/// See [`load_page`].
pub async fn load_configured_page(
    location: &PartialsLocation,
    paypal_client_id: &str,
) -> Result<LoadedPage, StartupError> {
    match location {
        PartialsLocation::Directory(dir) => {
            load_page(DirSource::new(dir.clone()), paypal_client_id).await
        }
        PartialsLocation::Remote(url) => {
            load_page(
                HttpSource::new(reqwest::Client::new(), url.clone()),
                paypal_client_id,
            )
            .await
        }
    }
}

/// Run both phases: load the partials, then wire the site.
///
/// Wiring starts only after every partial has been attempted.
///
/// # Errors
///
/// Returns `StartupError` if the catalog is invalid, the shell fails to
/// render, or a required element is missing after loading.
pub async fn bootstrap(config: &StorefrontConfig) -> Result<(Site, LoadReport), StartupError> {
    let resource = CatalogResource::load_or_builtin(config.catalog_path.as_deref()).await?;
    let (catalog, stores) = resource.into_parts()?;

    let LoadedPage { page, report } =
        load_configured_page(&config.partials, &config.paypal.client_id).await?;

    for (partial, error) in report.failures() {
        tracing::warn!(partial = %partial, error = %error, "Partial missing from assembled page");
    }

    let site = Site::wire(page, catalog, stores)?;
    Ok((site, report))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn partials_dir() -> std::path::PathBuf {
        std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("partials")
    }

    #[tokio::test]
    async fn test_bundled_partials_load_and_wire() {
        let loaded = load_page(DirSource::new(partials_dir()), "test-client")
            .await
            .unwrap();
        assert!(loaded.report.is_complete());
        assert_eq!(loaded.report.loaded(), 11);

        let (catalog, stores) = CatalogResource::builtin().into_parts().unwrap();
        let site = Site::wire(loaded.page, catalog, stores).unwrap();
        assert_eq!(site.page().elements_with_class("view-product-btn").len(), 20);
    }

    #[tokio::test]
    async fn test_missing_partials_fail_wiring_with_element_name() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_page(DirSource::new(dir.path()), "test-client")
            .await
            .unwrap();
        assert_eq!(loaded.report.loaded(), 0);

        let (catalog, stores) = CatalogResource::builtin().into_parts().unwrap();
        let result = Site::wire(loaded.page, catalog, stores);
        assert_eq!(
            result.unwrap_err(),
            InitError::MissingElement("#age-gate".to_string())
        );
    }
}
