//! Chart renderer collaborator boundary
//!
//! Rasterization is a pure data→image function living outside the core: the
//! renderer receives the dataset shapes from `tally_core::report` and
//! returns paths to generated image files. The caller sends the files and
//! deletes them afterwards; nothing persists.

use std::path::PathBuf;

use async_trait::async_trait;

use tally_core::{BarChartPage, PieChart};

#[async_trait]
pub trait ChartRenderer: Send + Sync {
    /// Render one image per bar-chart page
    async fn render_bar_pages(&self, pages: &[BarChartPage]) -> anyhow::Result<Vec<PathBuf>>;

    /// Render the top-expenses pie
    async fn render_pie(&self, chart: &PieChart) -> anyhow::Result<PathBuf>;
}

/// Remove rendered chart files after sending, warning on leftovers
pub(crate) fn discard_rendered_files(paths: &[PathBuf]) {
    for path in paths {
        if let Err(e) = std::fs::remove_file(path) {
            tracing::warn!(path = %path.display(), error = %e, "failed to remove rendered chart");
        }
    }
}
