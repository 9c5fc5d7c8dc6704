use crate::error::{PrestoError, PrestoResult};
use crate::math::Size2D;
use crate::Color;

/// One fully composed slide as a straight-alpha RGBA8 pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    /// Raw pixel data, row-major, 4 bytes per pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameBuffer {
    /// Bytes per pixel.
    pub const BPP: usize = 4;

    /// Create a new frame buffer filled with transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; (width as usize) * (height as usize) * Self::BPP],
            width,
            height,
        }
    }

    /// Create a frame buffer filled with a solid color.
    pub fn solid(width: u32, height: u32, color: &Color) -> Self {
        let mut fb = Self::new(width, height);
        fb.fill(color);
        fb
    }

    /// Wrap existing RGBA8 bytes. The length must be exactly `width * height * 4`.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> PrestoResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(Self::BPP))
            .ok_or_else(|| PrestoError::InvalidArgument("frame size overflow".into()))?;
        if data.len() != expected {
            return Err(PrestoError::InvalidArgument(format!(
                "frame {}x{} needs {} bytes, got {}",
                width,
                height,
                expected,
                data.len()
            )));
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn size(&self) -> Size2D {
        Size2D::new(self.width as f64, self.height as f64)
    }

    /// Total number of pixels.
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Total byte size of the pixel data.
    pub fn byte_size(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * Self::BPP
    }

    /// RGBA value at a pixel coordinate, `None` if out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let o = self.offset(x, y);
        Some([self.data[o], self.data[o + 1], self.data[o + 2], self.data[o + 3]])
    }

    /// Overwrite one pixel. No-op if out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let o = self.offset(x, y);
        self.data[o..o + Self::BPP].copy_from_slice(&rgba);
    }

    /// Blend `rgba` over one pixel at the given opacity. No-op if out of bounds.
    pub fn blend_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4], opacity: f64) {
        if x >= self.width || y >= self.height {
            return;
        }
        let o = self.offset(x, y);
        blend_over(&mut self.data[o..o + Self::BPP], &rgba, opacity);
    }

    pub fn fill(&mut self, color: &Color) {
        let pixel = color.to_rgba8();
        for px in self.data.chunks_exact_mut(Self::BPP) {
            px.copy_from_slice(&pixel);
        }
    }

    /// Alpha-composite `src` on top of `self` with its top-left corner at (dx, dy).
    pub fn composite_over(&mut self, src: &FrameBuffer, dx: i32, dy: i32, opacity: f64) {
        let start_x = (-dx).max(0);
        let start_y = (-dy).max(0);
        let end_x = (src.width as i32).min(self.width as i32 - dx);
        let end_y = (src.height as i32).min(self.height as i32 - dy);
        if start_x >= end_x || start_y >= end_y {
            return;
        }

        let len = (end_x - start_x) as usize * Self::BPP;
        for sy in start_y..end_y {
            let src_row = src.offset(start_x as u32, sy as u32);
            let dst_row = self.offset((dx + start_x) as u32, (dy + sy) as u32);
            let src_slice = &src.data[src_row..src_row + len];
            let dst_slice = &mut self.data[dst_row..dst_row + len];
            for (s, d) in src_slice
                .chunks_exact(Self::BPP)
                .zip(dst_slice.chunks_exact_mut(Self::BPP))
            {
                blend_over(d, s, opacity);
            }
        }
    }
}

/// Porter-Duff "over" for one straight-alpha RGBA8 pixel, with the source
/// alpha scaled by `opacity`. Opaque sources at full opacity copy exactly.
#[inline]
pub fn blend_over(dst: &mut [u8], src: &[u8], opacity: f64) {
    let opacity = if opacity.is_nan() { 0.0 } else { opacity.clamp(0.0, 1.0) };
    let sa = (src[3] as f64 * opacity).round() as u32;
    if sa == 0 {
        return;
    }
    if sa == 255 {
        dst[..3].copy_from_slice(&src[..3]);
        dst[3] = 255;
        return;
    }

    let da = dst[3] as u32;
    let inv_sa = 255 - sa;
    let out_a = sa + (da * inv_sa + 127) / 255;
    if out_a == 0 {
        return;
    }

    let denom = out_a * 255;
    for i in 0..3 {
        let s = src[i] as u32;
        let d = dst[i] as u32;
        dst[i] = ((s * sa * 255 + d * da * inv_sa + denom / 2) / denom).min(255) as u8;
    }
    dst[3] = out_a.min(255) as u8;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_buffer_new_is_transparent() {
        let fb = FrameBuffer::new(16, 9);
        assert_eq!(fb.byte_size(), 16 * 9 * 4);
        assert_eq!(fb.pixel_count(), 144);
        assert!(fb.data.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_from_rgba8_rejects_wrong_length() {
        assert!(FrameBuffer::from_rgba8(2, 2, vec![0; 15]).is_err());
        assert!(FrameBuffer::from_rgba8(2, 2, vec![0; 16]).is_ok());
    }

    #[test]
    fn test_get_set_pixel_and_bounds() {
        let mut fb = FrameBuffer::new(10, 10);
        fb.set_pixel(5, 5, [128, 64, 32, 255]);
        assert_eq!(fb.get_pixel(5, 5), Some([128, 64, 32, 255]));
        assert_eq!(fb.get_pixel(10, 0), None);
        fb.set_pixel(99, 99, [1, 2, 3, 4]);
    }

    #[test]
    fn test_composite_over_opaque_with_negative_offset() {
        let mut dst = FrameBuffer::solid(4, 4, &Color::BLUE);
        let src = FrameBuffer::solid(3, 3, &Color::RED);
        dst.composite_over(&src, -1, -1, 1.0);
        assert_eq!(dst.get_pixel(0, 0), Some([255, 0, 0, 255]));
        assert_eq!(dst.get_pixel(1, 1), Some([255, 0, 0, 255]));
        assert_eq!(dst.get_pixel(2, 2), Some([0, 0, 255, 255]));
    }

    #[test]
    fn test_blend_transparent_source_is_noop() {
        let mut dst = [10, 20, 30, 255];
        blend_over(&mut dst, &[255, 255, 255, 0], 1.0);
        assert_eq!(dst, [10, 20, 30, 255]);
        blend_over(&mut dst, &[255, 255, 255, 255], 0.0);
        assert_eq!(dst, [10, 20, 30, 255]);
    }

    #[test]
    fn test_blend_half_opacity_mixes() {
        let mut dst = [0, 0, 0, 255];
        blend_over(&mut dst, &[255, 255, 255, 255], 0.5);
        assert_eq!(dst[3], 255);
        assert!(dst[0] > 120 && dst[0] < 135, "got {}", dst[0]);
    }

    #[test]
    fn test_blend_over_transparent_keeps_source_color() {
        let mut dst = [0, 0, 0, 0];
        blend_over(&mut dst, &[100, 110, 120, 200], 1.0);
        assert_eq!(dst, [100, 110, 120, 200]);
    }
}
