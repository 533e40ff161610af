//! Canvas plus exporter, fed one snapshot per frame

use std::path::PathBuf;

use bevy::prelude::Resource;

use crate::configuration::config::ScenarioConfig;
use crate::error::ConfigError;
use crate::render::canvas::Canvas;
use crate::render::export::FrameExporter;
use crate::simulation::color::Rgba;
use crate::simulation::snapshot::FrameSnapshot;

#[derive(Resource)]
pub struct FrameRecorder {
    pub canvas: Canvas,
    pub exporter: FrameExporter,
    pub exported: Vec<PathBuf>, // every file written so far
}

impl FrameRecorder {
    pub fn new(canvas: Canvas, exporter: FrameExporter) -> Self {
        Self {
            canvas,
            exporter,
            exported: Vec::new(),
        }
    }

    pub fn from_config(cfg: &ScenarioConfig) -> Result<Self, ConfigError> {
        let background = Rgba::try_from(&cfg.render.background)?;
        let (width, height) = cfg.world.size();
        let canvas = Canvas::for_world([width, height].into(), background);
        Ok(Self::new(canvas, FrameExporter::from_config(&cfg.export)))
    }

    /// Paint the frame, then export if it is due
    pub fn record(&mut self, snapshot: &FrameSnapshot) -> Option<PathBuf> {
        self.canvas.paint(snapshot);
        let path = self.exporter.maybe_export(snapshot.frame, &self.canvas)?;
        self.exported.push(path.clone());
        Some(path)
    }
}
