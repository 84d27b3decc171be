use std::path::PathBuf;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::error::{GapminderError, GapminderResult};
use crate::render::raster::FrameRGBA;

/// Writes `frame_00000.png`, `frame_00001.png`, ... into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    started: bool,
    written: u64,
}

impl PngSequenceSink {
    /// Sink writing into `dir` (created on `begin`).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            started: false,
            written: 0,
        }
    }

    /// Path of frame `idx`.
    pub fn frame_path(&self, idx: u64) -> PathBuf {
        self.dir.join(format!("frame_{idx:05}.png"))
    }

    /// Files written so far.
    pub fn written(&self) -> u64 {
        self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, _cfg: SinkConfig) -> GapminderResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            GapminderError::encode(format!(
                "failed to create output directory '{}': {e}",
                self.dir.display()
            ))
        })?;
        self.started = true;
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> GapminderResult<()> {
        if !self.started {
            return Err(GapminderError::encode("png sink not started"));
        }
        frame.save_png(&self.frame_path(idx))?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> GapminderResult<()> {
        self.started = false;
        tracing::info!(frames = self.written, dir = %self.dir.display(), "png sequence written");
        Ok(())
    }
}
