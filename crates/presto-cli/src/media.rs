//! Image decoding and frame-sequence output.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use presto_core::{FrameBuffer, PrestoError, PrestoResult};
use presto_render::component::fit_within;
use presto_render::surface::{Canvas, Surface};

/// Decode an image file into an RGBA frame.
pub fn load_image(path: &Path) -> PrestoResult<FrameBuffer> {
    let img = image::open(path)
        .map_err(|e| PrestoError::image(format!("failed to load image: {}", e), path))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    FrameBuffer::from_rgba8(width, height, rgba.into_raw())
}

/// Letterbox `frame` onto a transparent `width` x `height` frame.
pub fn fit_to(frame: &FrameBuffer, width: u32, height: u32) -> FrameBuffer {
    if frame.dimensions() == (width, height) {
        return frame.clone();
    }
    let mut canvas = Canvas::new(width, height);
    let placement = fit_within(canvas.bounds(), frame.width, frame.height);
    canvas.draw_image(frame, placement);
    canvas.into_frame()
}

/// Write each frame as `frame_NNNN.png` into `dir`. Returns the written paths.
pub fn write_png_sequence(frames: &[FrameBuffer], dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory: {}", dir.display()))?;
    let mut written = Vec::with_capacity(frames.len());
    for (i, frame) in frames.iter().enumerate() {
        let path = dir.join(format!("frame_{:04}.png", i));
        let img = image::RgbaImage::from_raw(frame.width, frame.height, frame.data.clone())
            .with_context(|| format!("invalid frame data at frame {}", i))?;
        img.save(&path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

/// Encode frames as an infinitely looping animated GIF at `fps`.
pub fn write_gif(frames: &[FrameBuffer], fps: u32, path: &Path) -> Result<()> {
    if frames.is_empty() {
        anyhow::bail!("no frames to encode for GIF");
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory: {}", parent.display()))?;
    }

    let file = File::create(path).with_context(|| format!("failed to create GIF file: {}", path.display()))?;
    let mut encoder = image::codecs::gif::GifEncoder::new_with_speed(BufWriter::new(file), 10);
    encoder
        .set_repeat(image::codecs::gif::Repeat::Infinite)
        .context("failed to set GIF repeat")?;

    // GIF delays are in centiseconds; below 2cs most viewers clamp anyway.
    let delay_cs = ((100.0 / fps.max(1) as f64).round() as u32).max(2);
    let (width, height) = frames[0].dimensions();
    for (i, frame) in frames.iter().enumerate() {
        if frame.dimensions() != (width, height) {
            anyhow::bail!(
                "frame {} has dimensions {}x{}, expected {}x{}",
                i,
                frame.width,
                frame.height,
                width,
                height
            );
        }
        let img = image::RgbaImage::from_raw(width, height, frame.data.clone())
            .with_context(|| format!("invalid frame data at frame {}", i))?;
        let gif_frame = image::Frame::from_parts(img, 0, 0, image::Delay::from_numer_denom_ms(delay_cs * 10, 1));
        encoder
            .encode_frame(gif_frame)
            .with_context(|| format!("failed to encode GIF frame {}", i))?;
    }

    tracing::info!(
        "Encoded {} frames to GIF at {} ({}x{}, delay={}cs)",
        frames.len(),
        path.display(),
        width,
        height,
        delay_cs
    );
    Ok(())
}

/// Number of frames for a transition of `duration_ms` at `fps`, both ends included.
pub fn frame_count(duration_ms: u32, fps: u32) -> usize {
    if duration_ms == 0 {
        return 1;
    }
    let intervals = (duration_ms as u64 * fps.max(1) as u64).div_ceil(1000) as usize;
    intervals.max(1) + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use presto_core::Color;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("presto-media-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_load_image_missing_file() {
        let result = load_image(Path::new("/nonexistent/slide.png"));
        assert!(matches!(result, Err(PrestoError::Image { .. })));
    }

    #[test]
    fn test_frame_count() {
        assert_eq!(frame_count(0, 50), 1);
        assert_eq!(frame_count(500, 50), 26);
        assert_eq!(frame_count(10, 50), 2);
    }

    #[test]
    fn test_fit_to_letterboxes() {
        let src = FrameBuffer::solid(2, 1, &Color::RED);
        let out = fit_to(&src, 4, 4);
        assert_eq!(out.dimensions(), (4, 4));
        assert_eq!(out.get_pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(out.get_pixel(0, 1), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_png_sequence_round_trip() {
        let dir = scratch_dir("png");
        let frames = vec![
            FrameBuffer::solid(3, 2, &Color::RED),
            FrameBuffer::solid(3, 2, &Color::BLUE),
        ];
        let paths = write_png_sequence(&frames, &dir).unwrap();
        assert_eq!(paths.len(), 2);
        assert_eq!(load_image(&paths[1]).unwrap(), frames[1]);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_gif_written() {
        let dir = scratch_dir("gif");
        let path = dir.join("out.gif");
        let frames = vec![FrameBuffer::solid(4, 4, &Color::GREEN); 3];
        write_gif(&frames, 25, &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
        assert!(write_gif(&[], 25, &path).is_err());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
