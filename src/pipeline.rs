use crate::engine::{ChartEngine, ChartHandle};
use crate::error::{ExtractError, PipelineError};
use crate::page::{Element, Page, PageLayout};
use crate::render::{price_chart, volume_chart};
use crate::series::extract;

/// Handles of the two charts created by a successful pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Charts {
    pub price: ChartHandle,
    pub volume: ChartHandle,
}

/// Runs the chart pass once for a loaded page.
///
/// Failures are logged and swallowed; `None` means no charts (or only the
/// price chart, if the engine refused the volume surface) were drawn.
pub fn initialize_charts<P, E>(page: &P, engine: &mut E, layout: &PageLayout) -> Option<Charts>
where
    P: Page + ?Sized,
    E: ChartEngine + ?Sized,
{
    let err = match try_initialize(page, engine, layout) {
        Ok(charts) => return Some(charts),
        Err(err) => err,
    };
    match &err {
        PipelineError::Extract(ExtractError::MissingContainer(id)) if *id != layout.holder_id => {
            log::warn!("chart surface `{id}` not found, skipping charts");
        }
        PipelineError::Extract(ExtractError::IncompleteData(_)) => {
            log::warn!("stock data incomplete, skipping charts: {err}");
        }
        _ => log::error!("failed to load charts: {err}"),
    }
    None
}

/// Same pass as [`initialize_charts`], reporting the failure instead of logging it.
pub fn try_initialize<P, E>(page: &P, engine: &mut E, layout: &PageLayout) -> Result<Charts, PipelineError>
where
    P: Page + ?Sized,
    E: ChartEngine + ?Sized,
{
    let price_surface = surface(page, &layout.price_surface)?;
    let volume_surface = surface(page, &layout.volume_surface)?;

    let series = extract(page, layout)?;

    let price = engine.render(price_chart(&series), price_surface)?;
    let volume = engine.render(volume_chart(&series), volume_surface)?;

    log::info!("{}: rendered {} sessions", series.symbol, series.len());
    Ok(Charts { price, volume })
}

fn surface<'p, P: Page + ?Sized>(page: &'p P, id: &str) -> Result<&'p Element, ExtractError> {
    page.element(id)
        .ok_or_else(|| ExtractError::MissingContainer(id.to_string()))
}
