//! Generate static files

use anyhow::Result;

use crate::generator::Generator;
use crate::LpDocs;

/// Generate the static site
pub fn run(app: &LpDocs) -> Result<()> {
    let start = std::time::Instant::now();

    let stats = Generator::new(app)?.generate()?;
    if !stats.list_view {
        tracing::info!("Run `lp-docs index` to include the proposal list view");
    }

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}
