//! Index module - the precomputed proposal index and its list view

pub mod builder;
mod entry;
mod filter;
pub mod loader;

use anyhow::Result;

pub use builder::{write_index, IndexBuilder};
pub use entry::{IndexEntry, LpIndex};
pub use filter::{apply_filters, Controls, SortKey};
pub use loader::{load_index, read_index};

use crate::config::SiteConfig;
use crate::templates::TemplateRenderer;

/// Filter, sort and render the list view from scratch for one set of controls
pub fn render_view(
    renderer: &TemplateRenderer,
    config: &SiteConfig,
    index: &LpIndex,
    controls: &Controls,
) -> Result<String> {
    let list = apply_filters(&index.lps, controls);
    tracing::debug!("{} of {} entries match", list.len(), index.lps.len());
    renderer.render_list(config, index, &list, controls)
}
