//! Periodic PNG export of the canvas

use std::fs;
use std::path::{Path, PathBuf};

use crate::configuration::config::ExportConfig;
use crate::error::ExportError;
use crate::render::canvas::Canvas;

#[derive(Debug, Clone)]
pub struct FrameExporter {
    pub enabled: bool,
    pub every: u64, // frames between exports, at least 1
    pub output_dir: PathBuf,
    pub prefix: String,
}

impl FrameExporter {
    pub fn from_config(cfg: &ExportConfig) -> Self {
        Self {
            enabled: cfg.enabled,
            every: cfg.every.max(1),
            output_dir: PathBuf::from(&cfg.output_dir),
            prefix: cfg.prefix.clone(),
        }
    }

    /// Same settings, files written under `dir`
    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn is_due(&self, frame: u64) -> bool {
        self.enabled && frame > 0 && frame % self.every == 0
    }

    pub fn path_for(&self, frame: u64) -> PathBuf {
        self.output_dir.join(format!("{}_{:06}.png", self.prefix, frame))
    }

    /// Write the canvas as a PNG for `frame`
    pub fn export(&self, frame: u64, canvas: &Canvas) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(&self.output_dir).map_err(|source| ExportError::Io {
            path: self.output_dir.clone(),
            source,
        })?;

        let path = self.path_for(frame);
        canvas
            .image()
            .save_with_format(&path, image::ImageFormat::Png)
            .map_err(|source| ExportError::Image {
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }

    /// Export when `frame` is due; failures are logged and swallowed
    pub fn maybe_export(&self, frame: u64, canvas: &Canvas) -> Option<PathBuf> {
        if !self.is_due(frame) {
            return None;
        }
        match self.export(frame, canvas) {
            Ok(path) => {
                log::info!("frame {} exported to {}", frame, path.display());
                Some(path)
            }
            Err(e) => {
                log::warn!("frame {} not exported: {}", frame, e);
                None
            }
        }
    }
}
