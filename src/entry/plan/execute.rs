use tracing::{debug, info};

use crate::charts::write_chart;
use crate::error::AppResult;
use crate::fetch::fetch_first_row;

use super::types::RunPlan;

pub(crate) async fn execute_plan(plan: RunPlan) -> AppResult<()> {
    let RunPlan {
        page,
        source,
        metrics,
        renderer,
        out,
        format,
    } = plan;

    debug!(
        page = page.name(),
        source = %source.describe(),
        metrics = metrics.len(),
        "Fetching percentiles"
    );
    let row = fetch_first_row(source.as_ref()).await?;

    let drawing = renderer.render(&metrics, &row)?;
    let written = write_chart(&drawing, &out, format).await?;

    info!(
        page = page.name(),
        metrics = drawing.points().len(),
        format = format.extension(),
        "Chart ready"
    );
    println!("{}", written.display());
    Ok(())
}
