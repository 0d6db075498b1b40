use std::collections::HashSet;

use crate::chart::ChartConfig;
use crate::error::EngineError;
use crate::page::Element;

/// Opaque handle to a chart bound to a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChartHandle(pub(crate) u32);

/// Something that can draw a chart configuration into a page surface.
///
/// A surface belongs to the first chart bound to it for the rest of the page's life.
pub trait ChartEngine {
    fn render(&mut self, config: ChartConfig, surface: &Element) -> Result<ChartHandle, EngineError>;
}

/// A chart as held by an engine.
#[derive(Debug, Clone, PartialEq)]
pub struct MountedChart {
    pub handle: ChartHandle,
    pub surface: String,
    pub config: ChartConfig,
}

/// Bookkeeping shared by the engines: one chart per surface, handles in mount order.
#[derive(Debug, Default)]
pub(crate) struct Mounts {
    charts: Vec<MountedChart>,
    surfaces: HashSet<String>,
}

impl Mounts {
    pub(crate) fn mount(&mut self, config: ChartConfig, surface: &Element) -> Result<ChartHandle, EngineError> {
        if !self.surfaces.insert(surface.id.clone()) {
            return Err(EngineError::SurfaceInUse(surface.id.clone()));
        }
        let handle = ChartHandle(self.charts.len() as u32);
        self.charts.push(MountedChart {
            handle,
            surface: surface.id.clone(),
            config,
        });
        log::debug!("mounted chart {:?} on `{}`", handle, surface.id);
        Ok(handle)
    }

    pub(crate) fn charts(&self) -> &[MountedChart] {
        &self.charts
    }
}

/// Engine that only keeps the submitted configurations.
///
/// Backs `stock-chart dump` and serves as a test double.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    mounts: Mounts,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn charts(&self) -> &[MountedChart] {
        self.mounts.charts()
    }

    pub fn chart(&self, handle: ChartHandle) -> Option<&MountedChart> {
        self.mounts.charts().iter().find(|c| c.handle == handle)
    }

    pub fn on_surface(&self, surface: &str) -> Option<&MountedChart> {
        self.mounts.charts().iter().find(|c| c.surface == surface)
    }
}

impl ChartEngine for RecordingEngine {
    fn render(&mut self, config: ChartConfig, surface: &Element) -> Result<ChartHandle, EngineError> {
        self.mounts.mount(config, surface)
    }
}
