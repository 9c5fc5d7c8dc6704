//! Render layers: runs of static components grouped behind one cached
//! bitmap, with each continuously dynamic component in a layer of its own.

use std::fmt;
use std::sync::Arc;

use presto_core::FrameBuffer;

use crate::component::Component;
use crate::surface::{Canvas, Placement, Surface};

/// Static components rendered once into a cached frame.
pub struct LayerGroup {
    components: Vec<Arc<dyn Component>>,
    cache: Option<FrameBuffer>,
}

impl LayerGroup {
    pub fn new(components: Vec<Arc<dyn Component>>) -> Self {
        Self {
            components,
            cache: None,
        }
    }

    pub fn components(&self) -> &[Arc<dyn Component>] {
        &self.components
    }

    pub fn is_cached(&self) -> bool {
        self.cache.is_some()
    }

    /// Drop the cached pixels; the next render redraws every component.
    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    pub fn render(&mut self, surface: &mut dyn Surface) {
        let (width, height) = (surface.width(), surface.height());
        let stale = self
            .cache
            .as_ref()
            .map_or(true, |c| c.dimensions() != (width, height));
        if stale {
            let mut canvas = Canvas::new(width, height);
            for component in &self.components {
                component.render(&mut canvas);
            }
            tracing::trace!(components = self.components.len(), width, height, "cached layer group");
            self.cache = Some(canvas.into_frame());
        }
        if let Some(cache) = &self.cache {
            surface.draw_image(cache, Placement::ORIGIN);
        }
    }
}

pub enum RenderLayer {
    /// A single continuously dynamic component, rendered fresh every frame.
    Item(Arc<dyn Component>),
    Group(LayerGroup),
}

impl RenderLayer {
    pub fn components(&self) -> &[Arc<dyn Component>] {
        match self {
            RenderLayer::Item(component) => std::slice::from_ref(component),
            RenderLayer::Group(group) => group.components(),
        }
    }

    pub fn is_item(&self) -> bool {
        matches!(self, RenderLayer::Item(_))
    }

    pub fn is_group(&self) -> bool {
        matches!(self, RenderLayer::Group(_))
    }

    pub fn invalidate(&mut self) {
        if let RenderLayer::Group(group) = self {
            group.invalidate();
        }
    }

    pub fn render(&mut self, surface: &mut dyn Surface) {
        match self {
            RenderLayer::Item(component) => component.render(surface),
            RenderLayer::Group(group) => group.render(surface),
        }
    }
}

impl fmt::Debug for RenderLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<&str> = self.components().iter().map(|c| c.id()).collect();
        match self {
            RenderLayer::Item(_) => f.debug_tuple("Item").field(&ids[0]).finish(),
            RenderLayer::Group(_) => f.debug_tuple("Group").field(&ids).finish(),
        }
    }
}

/// Split z-ordered components into layers.
///
/// Static components accumulate into a pending group; a continuously
/// dynamic component flushes the pending group and gets an `Item` of its
/// own. Concatenating the layers' components gives back the input order.
pub fn partition_layers(components: &[Arc<dyn Component>]) -> Vec<RenderLayer> {
    let mut layers = Vec::new();
    let mut pending: Vec<Arc<dyn Component>> = Vec::new();

    for component in components {
        if component.is_continuously_dynamic() {
            if !pending.is_empty() {
                layers.push(RenderLayer::Group(LayerGroup::new(std::mem::take(&mut pending))));
            }
            layers.push(RenderLayer::Item(Arc::clone(component)));
        } else {
            pending.push(Arc::clone(component));
        }
    }
    if !pending.is_empty() {
        layers.push(RenderLayer::Group(LayerGroup::new(pending)));
    }
    layers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::SolidFill;
    use presto_core::{Color, Rect};

    #[test]
    fn test_empty_slide_has_no_layers() {
        assert!(partition_layers(&[]).is_empty());
    }

    #[test]
    fn test_group_caches_until_invalidated() {
        let fill: Arc<dyn Component> = Arc::new(SolidFill::rect("bg", Rect::new(0.0, 0.0, 2.0, 2.0), Color::RED));
        let mut layers = partition_layers(&[fill]);
        assert_eq!(layers.len(), 1);
        let mut canvas = Canvas::new(2, 2);
        layers[0].render(&mut canvas);
        let RenderLayer::Group(group) = &mut layers[0] else {
            panic!("expected a group");
        };
        assert!(group.is_cached());
        group.invalidate();
        assert!(!group.is_cached());
        assert_eq!(canvas.frame().get_pixel(1, 1), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_cache_rebuilds_on_resize() {
        let fill: Arc<dyn Component> = Arc::new(SolidFill::rect("bg", Rect::new(0.0, 0.0, 8.0, 8.0), Color::BLUE));
        let mut group = LayerGroup::new(vec![fill]);
        group.render(&mut Canvas::new(2, 2));
        let mut big = Canvas::new(4, 4);
        group.render(&mut big);
        assert_eq!(big.frame().get_pixel(3, 3), Some([0, 0, 255, 255]));
    }
}
