//! Renderable slide components.
//!
//! Components are immutable once built and shared across threads as
//! `Arc<dyn Component>`. Video and live clocks are continuously dynamic and
//! get their own layer so static content can be cached around them.

use std::f64::consts::TAU;
use std::sync::Arc;

use chrono::Timelike;
use presto_core::{Color, FrameBuffer, Point2D, Rect};

use crate::feed::LatestFrame;
use crate::region::Region;
use crate::surface::{clip, Placement, Surface};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Shape,
    Image,
    Video,
    Clock,
}

impl ComponentKind {
    /// Whether the component's pixels change on every tick.
    pub fn is_continuously_dynamic(self) -> bool {
        matches!(self, ComponentKind::Video | ComponentKind::Clock)
    }
}

pub trait Component: Send + Sync {
    fn id(&self) -> &str;
    fn kind(&self) -> ComponentKind;

    fn is_continuously_dynamic(&self) -> bool {
        self.kind().is_continuously_dynamic()
    }

    fn render(&self, surface: &mut dyn Surface);
}

/// A region filled with a flat colour.
#[derive(Debug, Clone)]
pub struct SolidFill {
    id: String,
    region: Region,
    color: Color,
}

impl SolidFill {
    pub fn new(id: impl Into<String>, region: Region, color: Color) -> Self {
        Self {
            id: id.into(),
            region,
            color,
        }
    }

    pub fn rect(id: impl Into<String>, rect: Rect, color: Color) -> Self {
        Self::new(id, Region::rect(rect), color)
    }
}

impl Component for SolidFill {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> ComponentKind {
        ComponentKind::Shape
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.fill_region(&self.region, &self.color);
    }
}

/// A still image, decoded ahead of time.
#[derive(Debug, Clone)]
pub struct Picture {
    id: String,
    image: Arc<FrameBuffer>,
    placement: Placement,
}

impl Picture {
    pub fn new(id: impl Into<String>, image: Arc<FrameBuffer>, placement: Placement) -> Self {
        Self {
            id: id.into(),
            image,
            placement,
        }
    }
}

impl Component for Picture {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> ComponentKind {
        ComponentKind::Image
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.draw_image(&self.image, self.placement);
    }
}

/// Scale that fits a `width` x `height` image inside `bounds`, and the
/// top-left that centres it.
pub fn fit_within(bounds: Rect, width: u32, height: u32) -> Placement {
    if width == 0 || height == 0 {
        return Placement::at(bounds.x, bounds.y).with_scale(0.0);
    }
    let scale = (bounds.width / width as f64).min(bounds.height / height as f64);
    let x = bounds.x + (bounds.width - width as f64 * scale) / 2.0;
    let y = bounds.y + (bounds.height - height as f64 * scale) / 2.0;
    Placement::at(x, y).with_scale(scale)
}

/// Video playback: draws whatever frame the decoder published last,
/// letterboxed into its bounds. Draws nothing until the first frame arrives.
#[derive(Debug, Clone)]
pub struct VideoFeed {
    id: String,
    feed: LatestFrame,
    bounds: Rect,
}

impl VideoFeed {
    pub fn new(id: impl Into<String>, feed: LatestFrame, bounds: Rect) -> Self {
        Self {
            id: id.into(),
            feed,
            bounds,
        }
    }

    pub fn feed(&self) -> &LatestFrame {
        &self.feed
    }
}

impl Component for VideoFeed {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> ComponentKind {
        ComponentKind::Video
    }

    fn render(&self, surface: &mut dyn Surface) {
        let Some(frame) = self.feed.latest() else {
            return;
        };
        let placement = fit_within(self.bounds, frame.width, frame.height);
        let mut clipped = clip(surface, &Region::rect(self.bounds));
        clipped.draw_image(&frame, placement);
    }
}

/// Wall-clock time of day shown by a [`LiveClock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl ClockTime {
    pub fn new(hour: u32, minute: u32, second: u32) -> Self {
        Self {
            hour: hour % 24,
            minute: minute % 60,
            second: second % 60,
        }
    }

    /// Local time of day.
    pub fn now() -> Self {
        let now = chrono::Local::now();
        Self::new(now.hour(), now.minute(), now.second())
    }

    /// Hour, minute and second hand angles in radians, clockwise from twelve.
    pub fn hand_angles(&self) -> [f64; 3] {
        let s = self.second as f64;
        let m = self.minute as f64 + s / 60.0;
        let h = (self.hour % 12) as f64 + m / 60.0;
        [h / 12.0 * TAU, m / 60.0 * TAU, s / 60.0 * TAU]
    }
}

pub type TimeSource = Arc<dyn Fn() -> ClockTime + Send + Sync>;

/// Analog clock face with hour, minute and second hands.
#[derive(Clone)]
pub struct LiveClock {
    id: String,
    center: Point2D,
    radius: f64,
    face: Color,
    hands: Color,
    time: TimeSource,
}

impl LiveClock {
    pub fn new(id: impl Into<String>, center: Point2D, radius: f64) -> Self {
        Self {
            id: id.into(),
            center,
            radius,
            face: Color::WHITE,
            hands: Color::BLACK,
            time: Arc::new(ClockTime::now),
        }
    }

    pub fn with_colors(mut self, face: Color, hands: Color) -> Self {
        self.face = face;
        self.hands = hands;
        self
    }

    /// Replace the local-time source, e.g. with a fixed time.
    pub fn with_time_source(mut self, time: TimeSource) -> Self {
        self.time = time;
        self
    }

    /// Polygon for one hand: `length` and `width` are fractions of the radius.
    pub fn hand(&self, angle: f64, length: f64, width: f64) -> Region {
        let half = self.radius * width / 2.0;
        let reach = self.radius * length;
        let c = self.center;
        let points = [
            Point2D::new(c.x - half, c.y + half),
            Point2D::new(c.x + half, c.y + half),
            Point2D::new(c.x + half, c.y - reach),
            Point2D::new(c.x - half, c.y - reach),
        ];
        Region::polygon(points.iter().map(|p| p.rotate_about(&c, angle)).collect())
    }
}

impl std::fmt::Debug for LiveClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveClock")
            .field("id", &self.id)
            .field("center", &self.center)
            .field("radius", &self.radius)
            .finish_non_exhaustive()
    }
}

impl Component for LiveClock {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> ComponentKind {
        ComponentKind::Clock
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.fill_region(&Region::circle(self.center, self.radius), &self.face);
        let [hour, minute, second] = (self.time)().hand_angles();
        surface.fill_region(&self.hand(hour, 0.5, 0.08), &self.hands);
        surface.fill_region(&self.hand(minute, 0.8, 0.06), &self.hands);
        surface.fill_region(&self.hand(second, 0.9, 0.02), &self.hands);
    }
}
