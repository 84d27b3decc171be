use std::path::Path;
use std::sync::Arc;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{GapminderError, GapminderResult};
use crate::foundation::math::mul_div255_u16;

/// A rendered frame as RGBA8 pixels.
///
/// Frames produced by [`Rasterizer`] are **premultiplied alpha**; the flag keeps this explicit at
/// API boundaries.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Copy of the pixels with straight (non-premultiplied) alpha.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }

    /// Composite the frame over an opaque `background` into `out`, which must hold exactly
    /// `width * height * 4` bytes. Every output pixel has alpha 255.
    pub fn flatten_onto(&self, background: Rgba8, out: &mut [u8]) -> GapminderResult<()> {
        let expected = self.width as usize * self.height as usize * 4;
        if self.data.len() != expected || out.len() != expected {
            return Err(GapminderError::encode(format!(
                "cannot flatten {}x{} frame: {} source bytes, {} output bytes, expected {expected}",
                self.width,
                self.height,
                self.data.len(),
                out.len()
            )));
        }

        let bg = [background.r, background.g, background.b];
        for (dst, px) in out.chunks_exact_mut(4).zip(self.data.chunks_exact(4)) {
            let a = u16::from(px[3]);
            for ((d, &c), &b) in dst.iter_mut().zip(&px[..3]).zip(&bg) {
                let c = if self.premultiplied {
                    u16::from(c)
                } else {
                    mul_div255_u16(u16::from(c), a)
                };
                *d = (c + mul_div255_u16(u16::from(b), 255 - a)).min(255) as u8;
            }
            dst[3] = 255;
        }
        Ok(())
    }

    /// Write the frame as a PNG file.
    pub fn save_png(&self, path: &Path) -> GapminderResult<()> {
        crate::encode::ensure_parent_dir(path)?;
        image::save_buffer_with_format(
            path,
            &self.to_straight_rgba8(),
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| GapminderError::encode(format!("write png '{}': {e}", path.display())))
    }
}

/// SVG-to-pixels renderer backed by `usvg` + `resvg`.
///
/// The font database is loaded once and shared, so a `Rasterizer` is cheap to clone and can be
/// used from worker threads.
#[derive(Clone)]
pub struct Rasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl std::fmt::Debug for Rasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rasterizer")
            .field("font_faces", &self.fontdb.len())
            .finish()
    }
}

impl Rasterizer {
    /// Rasterizer using the fonts installed on this system.
    pub fn with_system_fonts() -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "loaded system fonts");
        Self {
            fontdb: Arc::new(db),
        }
    }

    /// Rasterizer without any fonts; text elements are skipped.
    pub fn without_fonts() -> Self {
        Self {
            fontdb: Arc::new(usvg::fontdb::Database::new()),
        }
    }

    /// Number of loaded font faces.
    pub fn font_faces(&self) -> usize {
        self.fontdb.len()
    }

    /// Parse and render an SVG document at its intrinsic size.
    pub fn rasterize(&self, svg: &str) -> GapminderResult<FrameRGBA> {
        let opts = usvg::Options {
            fontdb: self.fontdb.clone(),
            ..usvg::Options::default()
        };
        let tree = usvg::Tree::from_str(svg, &opts)
            .map_err(|e| GapminderError::render(format!("parse svg: {e}")))?;

        let size = tree.size();
        let (w, h) = (size.width().ceil() as u32, size.height().ceil() as u32);
        const MAX_DIM: u32 = 16_384;
        if w == 0 || h == 0 || w > MAX_DIM || h > MAX_DIM {
            return Err(GapminderError::render(format!(
                "svg raster size out of bounds: {w}x{h} (max {MAX_DIM}x{MAX_DIM})"
            )));
        }

        let mut pixmap = resvg::tiny_skia::Pixmap::new(w, h)
            .ok_or_else(|| GapminderError::render("failed to allocate pixmap"))?;
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::identity(),
            &mut pixmap.as_mut(),
        );

        Ok(FrameRGBA {
            width: w,
            height: h,
            data: pixmap.take(),
            premultiplied: true,
        })
    }
}
