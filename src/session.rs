use std::collections::HashMap;

use rayon::prelude::*;

use crate::control::app::App;
use crate::control::script::Script;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, Millis};
use crate::foundation::error::{GapminderError, GapminderResult};
use crate::render::raster::{FrameRGBA, Rasterizer};

/// Rasterization threading and chunking.
#[derive(Clone, Debug)]
pub struct RenderThreading {
    /// Rasterize each chunk on a rayon pool.
    pub parallel: bool,
    /// Output frames per chunk (0 is treated as 1).
    pub chunk_size: usize,
    /// Worker count for the pool; `None` uses rayon's default.
    pub threads: Option<usize>,
    /// Rasterize identical documents within a chunk only once.
    pub static_frame_elision: bool,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
            static_frame_elision: true,
        }
    }
}

/// Options for [`ExportSession`].
#[derive(Clone, Debug)]
pub struct ExportOpts {
    /// Output frame rate.
    pub fps: Fps,
    /// Length of the recorded session in virtual milliseconds.
    pub duration_ms: u64,
    /// Rasterization threading.
    pub threading: RenderThreading,
}

/// Frame counters reported by [`ExportSession::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct ExportStats {
    /// Frames pushed to the sink.
    pub frames_total: u64,
    /// Frames actually rasterized.
    pub frames_rendered: u64,
    /// Frames reused from an identical document in the same chunk.
    pub frames_elided: u64,
    /// Script events applied.
    pub events_applied: u64,
}

/// Records an [`App`] driven by a [`Script`] into a [`FrameSink`].
///
/// The app is advanced on a virtual clock at the output frame rate; script times are relative to
/// the app's time when the session starts. SVG documents are built sequentially, because each
/// depends on app state, and then rasterized per chunk.
#[derive(Debug)]
pub struct ExportSession<'r> {
    rasterizer: &'r Rasterizer,
    opts: ExportOpts,
}

impl<'r> ExportSession<'r> {
    /// Validate `opts` and build a session.
    pub fn new(rasterizer: &'r Rasterizer, opts: ExportOpts) -> GapminderResult<Self> {
        if opts.duration_ms == 0 {
            return Err(GapminderError::validation("export duration must be > 0"));
        }
        if let Some(0) = opts.threading.threads {
            return Err(GapminderError::validation(
                "render threading 'threads' must be >= 1 when set",
            ));
        }
        Ok(Self { rasterizer, opts })
    }

    /// Number of frames a run produces.
    pub fn frame_count(&self) -> u64 {
        self.opts.fps.frames_for_millis(self.opts.duration_ms).max(1)
    }

    /// Drive `app` through `script` and push every frame to `sink`.
    pub fn run(
        &self,
        app: &mut App,
        script: &Script,
        sink: &mut dyn FrameSink,
    ) -> GapminderResult<ExportStats> {
        let canvas = app.config().canvas;
        tracing::debug!(
            fps = self.opts.fps.as_f64(),
            duration_ms = self.opts.duration_ms,
            frames = self.frame_count(),
            "export started"
        );
        sink.begin(SinkConfig {
            width: canvas.width,
            height: canvas.height,
            fps: self.opts.fps,
            background: app.config().background,
        })?;

        let pool = if self.opts.threading.parallel {
            Some(build_thread_pool(self.opts.threading.threads)?)
        } else {
            None
        };

        let start = app.now();
        let total = self.frame_count();
        let chunk_size = normalized_chunk_size(self.opts.threading.chunk_size);
        let mut cursor = script.cursor();
        let mut stats = ExportStats::default();

        let mut chunk_start = 0u64;
        while chunk_start < total {
            let chunk_end = (chunk_start + chunk_size).min(total);

            let mut docs = Vec::with_capacity((chunk_end - chunk_start) as usize);
            for f in chunk_start..chunk_end {
                let now = Millis(start.0.saturating_add(self.opts.fps.frame_to_millis(f).0));
                while let Some(entry) = cursor.next_due(Millis(now.0.saturating_sub(start.0))) {
                    app.handle(&entry.event, start.saturating_add(entry.at_ms));
                    stats.events_applied += 1;
                }
                app.advance_to(now);
                docs.push(app.frame_document(now));
            }

            let (frames, frame_to_unique) = self.rasterize_chunk(&docs, pool.as_ref())?;
            for (offset, &u) in frame_to_unique.iter().enumerate() {
                sink.push_frame(chunk_start + offset as u64, &frames[u])?;
            }

            stats.frames_total += docs.len() as u64;
            stats.frames_rendered += frames.len() as u64;
            stats.frames_elided += (docs.len() - frames.len()) as u64;
            chunk_start = chunk_end;
        }

        sink.end()?;
        tracing::info!(
            frames = stats.frames_total,
            rendered = stats.frames_rendered,
            elided = stats.frames_elided,
            events = stats.events_applied,
            "export finished"
        );
        Ok(stats)
    }

    /// Rasterize the distinct documents of a chunk; returns the frames and, per document, the
    /// index of the frame that shows it.
    fn rasterize_chunk(
        &self,
        docs: &[String],
        pool: Option<&rayon::ThreadPool>,
    ) -> GapminderResult<(Vec<FrameRGBA>, Vec<usize>)> {
        let mut unique = Vec::<usize>::with_capacity(docs.len());
        let mut frame_to_unique = Vec::<usize>::with_capacity(docs.len());
        if self.opts.threading.static_frame_elision {
            let mut first = HashMap::<&str, usize>::new();
            for (idx, doc) in docs.iter().enumerate() {
                let slot = *first.entry(doc.as_str()).or_insert_with(|| {
                    unique.push(idx);
                    unique.len() - 1
                });
                frame_to_unique.push(slot);
            }
        } else {
            unique.extend(0..docs.len());
            frame_to_unique.extend(0..docs.len());
        }

        let rendered: Vec<GapminderResult<FrameRGBA>> = match pool {
            Some(pool) => pool.install(|| {
                unique
                    .par_iter()
                    .map(|&i| self.rasterizer.rasterize(&docs[i]))
                    .collect()
            }),
            None => unique
                .iter()
                .map(|&i| self.rasterizer.rasterize(&docs[i]))
                .collect(),
        };
        let frames = rendered.into_iter().collect::<GapminderResult<Vec<_>>>()?;
        Ok((frames, frame_to_unique))
    }
}

fn build_thread_pool(threads: Option<usize>) -> GapminderResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| GapminderError::render(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    chunk_size.max(1) as u64
}
