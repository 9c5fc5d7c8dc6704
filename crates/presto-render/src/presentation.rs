//! Slides and the per-slide renderer.

use std::fmt;
use std::sync::Arc;

use presto_core::{Color, FrameBuffer};

use crate::component::Component;
use crate::layer::{partition_layers, RenderLayer};
use crate::region::Region;
use crate::surface::{Placement, Surface};

#[derive(Clone, Default)]
pub enum Background {
    #[default]
    None,
    Color(Color),
    /// Scaled to cover the surface, centred.
    Image(Arc<FrameBuffer>),
}

impl fmt::Debug for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Background::None => f.write_str("None"),
            Background::Color(c) => f.debug_tuple("Color").field(c).finish(),
            Background::Image(img) => f.debug_tuple("Image").field(&img.dimensions()).finish(),
        }
    }
}

/// A slide as handed to the renderer: background plus z-ordered components.
#[derive(Clone, Default)]
pub struct Slide {
    pub id: String,
    pub background: Background,
    pub components: Vec<Arc<dyn Component>>,
}

impl Slide {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }

    pub fn with_component(mut self, component: impl Component + 'static) -> Self {
        self.components.push(Arc::new(component));
        self
    }

    pub fn push(&mut self, component: Arc<dyn Component>) {
        self.components.push(component);
    }
}

impl fmt::Debug for Slide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<&str> = self.components.iter().map(|c| c.id()).collect();
        f.debug_struct("Slide")
            .field("id", &self.id)
            .field("background", &self.background)
            .field("components", &ids)
            .finish()
    }
}

/// Renders one slide. Layers are partitioned once, when the renderer is built.
#[derive(Debug)]
pub struct PresentationRenderer {
    slide_id: String,
    background: Background,
    layers: Vec<RenderLayer>,
}

impl PresentationRenderer {
    pub fn new(slide: &Slide) -> Self {
        let layers = partition_layers(&slide.components);
        tracing::debug!(
            slide = %slide.id,
            components = slide.components.len(),
            layers = layers.len(),
            "partitioned slide"
        );
        Self {
            slide_id: slide.id.clone(),
            background: slide.background.clone(),
            layers,
        }
    }

    pub fn slide_id(&self) -> &str {
        &self.slide_id
    }

    pub fn layers(&self) -> &[RenderLayer] {
        &self.layers
    }

    /// Whether any layer changes from frame to frame.
    pub fn has_dynamic_content(&self) -> bool {
        self.layers.iter().any(RenderLayer::is_item)
    }

    pub fn invalidate(&mut self) {
        self.layers.iter_mut().for_each(RenderLayer::invalidate);
    }

    /// Background (if requested), then every layer in order.
    pub fn render_frame(&mut self, surface: &mut dyn Surface, render_background: bool) {
        if render_background {
            self.render_background(surface);
        }
        for layer in &mut self.layers {
            layer.render(surface);
        }
    }

    fn render_background(&self, surface: &mut dyn Surface) {
        match &self.background {
            Background::None => {}
            Background::Color(color) => surface.fill_region(&Region::rect(surface.bounds()), color),
            Background::Image(image) => {
                if image.is_empty() {
                    return;
                }
                let size = surface.size();
                let scale = (size.width / image.width as f64).max(size.height / image.height as f64);
                let x = (size.width - image.width as f64 * scale) / 2.0;
                let y = (size.height - image.height as f64 * scale) / 2.0;
                surface.draw_image(image, Placement::at(x, y).with_scale(scale));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::SolidFill;
    use crate::surface::Canvas;
    use presto_core::Rect;

    #[test]
    fn test_background_toggle() {
        let slide = Slide::new("s1").with_background(Background::Color(Color::BLUE));
        let mut renderer = PresentationRenderer::new(&slide);

        let mut with_bg = Canvas::new(2, 2);
        renderer.render_frame(&mut with_bg, true);
        assert_eq!(with_bg.frame().get_pixel(0, 0), Some([0, 0, 255, 255]));

        let mut without_bg = Canvas::new(2, 2);
        renderer.render_frame(&mut without_bg, false);
        assert_eq!(without_bg.frame().get_pixel(0, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_layers_draw_in_z_order() {
        let slide = Slide::new("s")
            .with_component(SolidFill::rect("under", Rect::new(0.0, 0.0, 4.0, 4.0), Color::RED))
            .with_component(SolidFill::rect("over", Rect::new(2.0, 0.0, 2.0, 4.0), Color::GREEN));
        let mut renderer = PresentationRenderer::new(&slide);
        assert!(!renderer.has_dynamic_content());
        let mut canvas = Canvas::new(4, 4);
        renderer.render_frame(&mut canvas, true);
        assert_eq!(canvas.frame().get_pixel(0, 0), Some([255, 0, 0, 255]));
        assert_eq!(canvas.frame().get_pixel(3, 0), Some([0, 255, 0, 255]));
    }

    #[test]
    fn test_image_background_covers() {
        let bg = Arc::new(FrameBuffer::solid(2, 1, &Color::WHITE));
        let slide = Slide::new("s").with_background(Background::Image(bg));
        let mut renderer = PresentationRenderer::new(&slide);
        let mut canvas = Canvas::new(4, 4);
        renderer.render_frame(&mut canvas, true);
        for (x, y) in [(0, 0), (3, 0), (0, 3), (3, 3)] {
            assert_eq!(canvas.frame().get_pixel(x, y), Some([255, 255, 255, 255]));
        }
    }
}
