use std::ffi::OsString;
use std::io::{Read as _, Write as _};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::JoinHandle;

use crate::encode::ensure_parent_dir;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::error::{GapminderError, GapminderResult};
use crate::render::raster::FrameRGBA;

/// Options for [`FfmpegSink`].
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Output `.mp4` path.
    pub out_path: PathBuf,
    /// Replace an existing file at `out_path`.
    pub overwrite: bool,
}

impl FfmpegSinkOpts {
    /// Write to `out_path`, replacing any existing file.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
        }
    }
}

/// Records the chart as H.264 MP4 through the system `ffmpeg`.
///
/// The encoder has no alpha channel, so every frame is flattened onto the chart background
/// carried in [`SinkConfig`] before it is piped to `ffmpeg` as raw RGBA.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,
    encoder: Option<Encoder>,
    cfg: Option<SinkConfig>,
    flat: Vec<u8>,
    next_idx: u64,
}

/// A running `ffmpeg` process. Stderr is drained on its own thread so the pipe never fills
/// while frames are written.
struct Encoder {
    child: Child,
    stdin: ChildStdin,
    stderr: JoinHandle<std::io::Result<Vec<u8>>>,
}

impl Encoder {
    fn spawn(args: Vec<OsString>) -> GapminderResult<Self> {
        let mut child = Command::new("ffmpeg")
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| GapminderError::encode(format!("failed to spawn ffmpeg: {e}")))?;

        let (Some(stdin), Some(mut stderr)) = (child.stdin.take(), child.stderr.take()) else {
            let _ = child.kill();
            return Err(GapminderError::encode("ffmpeg pipes were not opened"));
        };
        let stderr = std::thread::spawn(move || {
            let mut buf = Vec::new();
            stderr.read_to_end(&mut buf)?;
            Ok(buf)
        });
        Ok(Self {
            child,
            stdin,
            stderr,
        })
    }

    /// Close stdin, wait for the encoder and surface its stderr on failure.
    fn finish(self) -> GapminderResult<()> {
        let Self {
            mut child,
            stdin,
            stderr,
        } = self;
        drop(stdin);

        let status = child
            .wait()
            .map_err(|e| GapminderError::encode(format!("failed to wait for ffmpeg: {e}")))?;
        let log = stderr
            .join()
            .map_err(|_| GapminderError::encode("ffmpeg stderr reader panicked"))?
            .map_err(|e| GapminderError::encode(format!("failed to read ffmpeg stderr: {e}")))?;

        if status.success() {
            Ok(())
        } else {
            Err(GapminderError::encode(format!(
                "ffmpeg exited with {status}: {}",
                String::from_utf8_lossy(&log).trim()
            )))
        }
    }
}

impl FfmpegSink {
    /// Create a sink; `ffmpeg` is spawned by [`FrameSink::begin`].
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            encoder: None,
            cfg: None,
            flat: Vec::new(),
            next_idx: 0,
        }
    }
}

/// Command line for a raw RGBA stream of the chart canvas at the export frame rate.
fn encoder_args(cfg: &SinkConfig, opts: &FfmpegSinkOpts) -> Vec<OsString> {
    let mut args: Vec<OsString> = Vec::with_capacity(24);
    let exists = if opts.overwrite { "-y" } else { "-n" };
    args.push(exists.into());
    args.extend(["-loglevel", "error", "-f", "rawvideo", "-pix_fmt", "rgba"].map(OsString::from));
    args.push("-s".into());
    args.push(format!("{}x{}", cfg.width, cfg.height).into());
    // `-r` before `-i` sets the input rate of the raw stream.
    args.push("-r".into());
    args.push(format!("{}/{}", cfg.fps.num, cfg.fps.den).into());
    args.extend(["-i", "pipe:0", "-an", "-c:v", "libx264"].map(OsString::from));
    args.extend(["-pix_fmt", "yuv420p", "-movflags", "+faststart"].map(OsString::from));
    args.push(opts.out_path.clone().into_os_string());
    args
}

fn check_canvas(cfg: &SinkConfig) -> GapminderResult<()> {
    if cfg.width == 0 || cfg.height == 0 {
        return Err(GapminderError::validation("mp4 canvas must not be empty"));
    }
    if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
        return Err(GapminderError::validation(format!(
            "mp4 output needs an even canvas (yuv420p), got {}x{}",
            cfg.width, cfg.height
        )));
    }
    Ok(())
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> GapminderResult<()> {
        if self.encoder.is_some() {
            return Err(GapminderError::encode("ffmpeg sink already started"));
        }
        check_canvas(&cfg)?;

        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(GapminderError::validation(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }
        if !is_ffmpeg_on_path() {
            return Err(GapminderError::encode(
                "mp4 output requires ffmpeg, which was not found on PATH",
            ));
        }

        self.encoder = Some(Encoder::spawn(encoder_args(&cfg, &self.opts))?);
        tracing::debug!(
            out = %self.opts.out_path.display(),
            width = cfg.width,
            height = cfg.height,
            background = %cfg.background.to_hex_rgb(),
            "ffmpeg started"
        );
        self.flat = vec![0; cfg.width as usize * cfg.height as usize * 4];
        self.cfg = Some(cfg);
        self.next_idx = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> GapminderResult<()> {
        let (Some(cfg), Some(encoder)) = (self.cfg.as_ref(), self.encoder.as_mut()) else {
            return Err(GapminderError::encode("ffmpeg sink not started"));
        };
        if idx < self.next_idx {
            return Err(GapminderError::encode(format!(
                "frame {idx} arrived after frame {}",
                self.next_idx - 1
            )));
        }
        if (frame.width, frame.height) != (cfg.width, cfg.height) {
            return Err(GapminderError::validation(format!(
                "frame is {}x{}, canvas is {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }

        frame.flatten_onto(cfg.background, &mut self.flat)?;
        encoder
            .stdin
            .write_all(&self.flat)
            .map_err(|e| GapminderError::encode(format!("failed to pipe frame {idx}: {e}")))?;
        self.next_idx = idx + 1;
        Ok(())
    }

    fn end(&mut self) -> GapminderResult<()> {
        let encoder = self
            .encoder
            .take()
            .ok_or_else(|| GapminderError::encode("ffmpeg sink not started"))?;
        self.cfg = None;
        encoder.finish()?;
        tracing::info!(out = %self.opts.out_path.display(), frames = self.next_idx, "mp4 written");
        Ok(())
    }
}

impl Drop for FfmpegSink {
    fn drop(&mut self) {
        // An export that failed part way leaves the encoder running.
        if let Some(mut encoder) = self.encoder.take() {
            let _ = encoder.child.kill();
            let _ = encoder.child.wait();
        }
    }
}

/// Whether `ffmpeg -version` runs successfully.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}
