//! Drawing surfaces.
//!
//! Transitions and components draw through the [`Surface`] trait. [`Canvas`]
//! rasterizes into a [`FrameBuffer`]; [`CommandRecorder`] records the calls so
//! tests can inspect draw order and clip discipline.

use std::ops::{Deref, DerefMut};

use presto_core::{Color, FrameBuffer, Point2D, Rect, Size2D};

use crate::region::{Mask, Region};

/// Where and how an image is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Top-left corner of the drawn image in surface coordinates.
    pub x: f64,
    pub y: f64,
    /// Uniform scale factor. Non-positive scales draw nothing.
    pub scale: f64,
    /// Opacity multiplier in `[0, 1]`.
    pub opacity: f64,
}

impl Placement {
    pub const ORIGIN: Placement = Placement {
        x: 0.0,
        y: 0.0,
        scale: 1.0,
        opacity: 1.0,
    };

    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::ORIGIN
        }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Destination rectangle of a `width` x `height` image.
    pub fn destination(&self, width: u32, height: u32) -> Rect {
        Rect::new(
            self.x,
            self.y,
            width as f64 * self.scale,
            height as f64 * self.scale,
        )
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::ORIGIN
    }
}

/// A render target with a clip stack.
///
/// Every `push_clip` must be matched by a `pop_clip` before control returns
/// to the caller that owns the surface; prefer [`clip`], which pops on drop.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    fn size(&self) -> Size2D {
        Size2D::new(self.width() as f64, self.height() as f64)
    }

    fn bounds(&self) -> Rect {
        Rect::from_size(self.size())
    }

    /// Whether the surface can still be drawn to. Detached surfaces ignore draws.
    fn is_alive(&self) -> bool {
        true
    }

    /// Intersect the current clip with `region`.
    fn push_clip(&mut self, region: &Region);
    fn pop_clip(&mut self);
    fn clip_depth(&self) -> usize;

    /// Draw `image` through the current clip.
    fn draw_image(&mut self, image: &FrameBuffer, placement: Placement);

    /// Fill `region` through the current clip.
    fn fill_region(&mut self, region: &Region, color: &Color);

    /// Overwrite the whole surface with `image`, ignoring the clip.
    fn replace(&mut self, image: &FrameBuffer);

    /// Fill the whole surface with `color`, ignoring the clip.
    fn clear(&mut self, color: &Color);
}

/// Clip scope: the clip pushed by [`clip`] is popped when the guard drops.
pub struct ClipGuard<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
}

/// Push `region` onto the surface's clip stack for the lifetime of the guard.
pub fn clip<'a, S: Surface + ?Sized>(surface: &'a mut S, region: &Region) -> ClipGuard<'a, S> {
    surface.push_clip(region);
    ClipGuard { surface }
}

impl<S: Surface + ?Sized> Deref for ClipGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: Surface + ?Sized> DerefMut for ClipGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: Surface + ?Sized> Drop for ClipGuard<'_, S> {
    fn drop(&mut self) {
        self.surface.pop_clip();
    }
}

/// CPU raster surface backed by a [`FrameBuffer`].
#[derive(Debug, Clone)]
pub struct Canvas {
    frame: FrameBuffer,
    clips: Vec<Mask>,
    alive: bool,
}

impl Canvas {
    /// Transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self::from_frame(FrameBuffer::new(width, height))
    }

    pub fn from_frame(frame: FrameBuffer) -> Self {
        Self {
            frame,
            clips: Vec::new(),
            alive: true,
        }
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn into_frame(self) -> FrameBuffer {
        self.frame
    }

    /// Mark the canvas as torn down. Later draws are ignored.
    pub fn detach(&mut self) {
        self.alive = false;
    }

    fn clip_contains(&self, x: u32, y: u32) -> bool {
        self.clips.last().map_or(true, |m| m.contains(x, y))
    }

    /// Integer pixel span `[start, end)` whose centres fall in `[lo, hi)`.
    fn span(lo: f64, hi: f64, limit: u32) -> (u32, u32) {
        let start = (lo - 0.5).ceil().max(0.0);
        let end = (hi - 0.5).ceil().max(0.0);
        (
            (start as u32).min(limit),
            (end as u32).min(limit),
        )
    }
}

impl Surface for Canvas {
    fn width(&self) -> u32 {
        self.frame.width
    }

    fn height(&self) -> u32 {
        self.frame.height
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn push_clip(&mut self, region: &Region) {
        let mut mask = region.rasterize(self.frame.width, self.frame.height);
        if let Some(top) = self.clips.last() {
            mask.intersect_with(top);
        }
        self.clips.push(mask);
    }

    fn pop_clip(&mut self) {
        if self.clips.pop().is_none() {
            tracing::warn!("pop_clip on a canvas with an empty clip stack");
        }
    }

    fn clip_depth(&self) -> usize {
        self.clips.len()
    }

    fn draw_image(&mut self, image: &FrameBuffer, placement: Placement) {
        if !self.alive || image.is_empty() || !(placement.scale > 0.0) || !(placement.opacity > 0.0) {
            return;
        }
        let dest = placement.destination(image.width, image.height);
        let (x0, x1) = Self::span(dest.x, dest.right(), self.frame.width);
        let (y0, y1) = Self::span(dest.y, dest.bottom(), self.frame.height);

        for y in y0..y1 {
            let sy = ((y as f64 + 0.5 - placement.y) / placement.scale).floor();
            if sy < 0.0 || sy >= image.height as f64 {
                continue;
            }
            for x in x0..x1 {
                if !self.clip_contains(x, y) {
                    continue;
                }
                let sx = ((x as f64 + 0.5 - placement.x) / placement.scale).floor();
                if sx < 0.0 || sx >= image.width as f64 {
                    continue;
                }
                if let Some(px) = image.get_pixel(sx as u32, sy as u32) {
                    self.frame.blend_pixel(x, y, px, placement.opacity);
                }
            }
        }
    }

    fn fill_region(&mut self, region: &Region, color: &Color) {
        if !self.alive {
            return;
        }
        let Some(bounds) = region.bounds() else {
            return;
        };
        let rgba = color.to_rgba8();
        let (x0, x1) = Self::span(bounds.x, bounds.right(), self.frame.width);
        let (y0, y1) = Self::span(bounds.y, bounds.bottom(), self.frame.height);
        for y in y0..y1 {
            for x in x0..x1 {
                if self.clip_contains(x, y) && region.contains(Point2D::new(x as f64 + 0.5, y as f64 + 0.5)) {
                    self.frame.blend_pixel(x, y, rgba, 1.0);
                }
            }
        }
    }

    fn replace(&mut self, image: &FrameBuffer) {
        if !self.alive {
            return;
        }
        if image.dimensions() == self.frame.dimensions() {
            self.frame.data.copy_from_slice(&image.data);
        } else {
            tracing::debug!(
                from = ?image.dimensions(),
                to = ?self.frame.dimensions(),
                "replacing canvas with a frame of different size"
            );
            self.frame.fill(&Color::TRANSPARENT);
            for y in 0..image.height.min(self.frame.height) {
                for x in 0..image.width.min(self.frame.width) {
                    if let Some(px) = image.get_pixel(x, y) {
                        self.frame.set_pixel(x, y, px);
                    }
                }
            }
        }
    }

    fn clear(&mut self, color: &Color) {
        if self.alive {
            self.frame.fill(color);
        }
    }
}

/// A call recorded by [`CommandRecorder`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    PushClip(Region),
    PopClip,
    DrawImage {
        width: u32,
        height: u32,
        placement: Placement,
        /// Clip depth at the time of the draw.
        depth: usize,
    },
    FillRegion(Region, Color),
    Replace {
        width: u32,
        height: u32,
    },
    Clear(Color),
}

/// Surface that records draw calls instead of rasterizing them.
#[derive(Debug, Clone, Default)]
pub struct CommandRecorder {
    width: u32,
    height: u32,
    depth: usize,
    max_depth: usize,
    commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Deepest clip nesting seen so far.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn draw_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::DrawImage { .. }))
            .count()
    }

    /// Whether every push has a matching pop and no pop underflowed.
    pub fn is_balanced(&self) -> bool {
        let mut depth: isize = 0;
        for c in &self.commands {
            match c {
                DrawCommand::PushClip(_) => depth += 1,
                DrawCommand::PopClip => {
                    depth -= 1;
                    if depth < 0 {
                        return false;
                    }
                }
                _ => {}
            }
        }
        depth == 0
    }
}

impl Surface for CommandRecorder {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn push_clip(&mut self, region: &Region) {
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
        self.commands.push(DrawCommand::PushClip(region.clone()));
    }

    fn pop_clip(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.commands.push(DrawCommand::PopClip);
    }

    fn clip_depth(&self) -> usize {
        self.depth
    }

    fn draw_image(&mut self, image: &FrameBuffer, placement: Placement) {
        self.commands.push(DrawCommand::DrawImage {
            width: image.width,
            height: image.height,
            placement,
            depth: self.depth,
        });
    }

    fn fill_region(&mut self, region: &Region, color: &Color) {
        self.commands.push(DrawCommand::FillRegion(region.clone(), *color));
    }

    fn replace(&mut self, image: &FrameBuffer) {
        self.commands.push(DrawCommand::Replace {
            width: image.width,
            height: image.height,
        });
    }

    fn clear(&mut self, color: &Color) {
        self.commands.push(DrawCommand::Clear(*color));
    }
}
