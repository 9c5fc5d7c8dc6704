//! Region algebra for clip masks.
//!
//! A [`Region`] is a boolean combination of primitive shapes. It is evaluated
//! by sampling pixel centres: pixel `(x, y)` is inside when the point
//! `(x + 0.5, y + 0.5)` is inside. Rectangles are half-open and circles are
//! strict (`d < r`), so complementary shapes never both claim a pixel.

use presto_core::{Point2D, Rect};

#[derive(Debug, Clone, PartialEq)]
pub enum Region {
    Empty,
    Rect(Rect),
    Ellipse {
        center: Point2D,
        radius_x: f64,
        radius_y: f64,
    },
    /// Closed polygon, even-odd fill.
    Polygon(Vec<Point2D>),
    /// `count` equal strips across `area`, each covering the band from
    /// `inset` to `1 - inset` of its own depth. Strips stack top to bottom,
    /// or left to right when `vertical`.
    Bands {
        area: Rect,
        count: u32,
        vertical: bool,
        inset: f64,
    },
    Union(Box<Region>, Box<Region>),
    Intersect(Box<Region>, Box<Region>),
    Difference(Box<Region>, Box<Region>),
}

impl Region {
    pub fn rect(rect: Rect) -> Self {
        if rect.is_empty() {
            Region::Empty
        } else {
            Region::Rect(rect)
        }
    }

    pub fn circle(center: Point2D, radius: f64) -> Self {
        Self::ellipse(center, radius, radius)
    }

    pub fn ellipse(center: Point2D, radius_x: f64, radius_y: f64) -> Self {
        if radius_x <= 0.0 || radius_y <= 0.0 {
            Region::Empty
        } else {
            Region::Ellipse {
                center,
                radius_x,
                radius_y,
            }
        }
    }

    pub fn polygon(points: Vec<Point2D>) -> Self {
        if points.len() < 3 {
            Region::Empty
        } else {
            Region::Polygon(points)
        }
    }

    pub fn bands(area: Rect, count: u32, vertical: bool, inset: f64) -> Self {
        let inset = if inset.is_nan() { 0.0 } else { inset.max(0.0) };
        if area.is_empty() || inset >= 0.5 {
            Region::Empty
        } else if inset == 0.0 {
            Region::Rect(area)
        } else {
            Region::Bands {
                area,
                count: count.max(1),
                vertical,
                inset,
            }
        }
    }

    pub fn union(self, other: Region) -> Region {
        match (self, other) {
            (Region::Empty, r) | (r, Region::Empty) => r,
            (a, b) => Region::Union(Box::new(a), Box::new(b)),
        }
    }

    pub fn intersect(self, other: Region) -> Region {
        match (self, other) {
            (Region::Empty, _) | (_, Region::Empty) => Region::Empty,
            (a, b) => Region::Intersect(Box::new(a), Box::new(b)),
        }
    }

    pub fn difference(self, other: Region) -> Region {
        match (self, other) {
            (Region::Empty, _) => Region::Empty,
            (a, Region::Empty) => a,
            (a, b) => Region::Difference(Box::new(a), Box::new(b)),
        }
    }

    /// Union of every region in `regions`.
    pub fn union_all(regions: impl IntoIterator<Item = Region>) -> Region {
        regions.into_iter().fold(Region::Empty, Region::union)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Region::Empty)
    }

    pub fn contains(&self, p: Point2D) -> bool {
        match self {
            Region::Empty => false,
            Region::Rect(r) => r.contains(p),
            Region::Ellipse {
                center,
                radius_x,
                radius_y,
            } => {
                let nx = (p.x - center.x) / radius_x;
                let ny = (p.y - center.y) / radius_y;
                nx * nx + ny * ny < 1.0
            }
            Region::Polygon(points) => polygon_contains(points, p),
            Region::Bands {
                area,
                count,
                vertical,
                inset,
            } => area.contains(p) && bands_contain(area, *count, *vertical, *inset, p),
            Region::Union(a, b) => a.contains(p) || b.contains(p),
            Region::Intersect(a, b) => a.contains(p) && b.contains(p),
            Region::Difference(a, b) => a.contains(p) && !b.contains(p),
        }
    }

    /// Conservative bounding box, `None` for the empty region.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Region::Empty => None,
            Region::Rect(r) => Some(*r),
            Region::Ellipse {
                center,
                radius_x,
                radius_y,
            } => Some(Rect::new(
                center.x - radius_x,
                center.y - radius_y,
                radius_x * 2.0,
                radius_y * 2.0,
            )),
            Region::Polygon(points) => {
                let (mut x0, mut y0) = (f64::INFINITY, f64::INFINITY);
                let (mut x1, mut y1) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
                for p in points {
                    x0 = x0.min(p.x);
                    y0 = y0.min(p.y);
                    x1 = x1.max(p.x);
                    y1 = y1.max(p.y);
                }
                Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
            }
            Region::Bands { area, .. } => Some(*area),
            Region::Union(a, b) => match (a.bounds(), b.bounds()) {
                (Some(a), Some(b)) => {
                    let x0 = a.x.min(b.x);
                    let y0 = a.y.min(b.y);
                    Some(Rect::new(x0, y0, a.right().max(b.right()) - x0, a.bottom().max(b.bottom()) - y0))
                }
                (a, b) => a.or(b),
            },
            Region::Intersect(a, b) => match (a.bounds(), b.bounds()) {
                (Some(a), Some(b)) => Some(a.intersect(&b)),
                _ => None,
            },
            Region::Difference(a, _) => a.bounds(),
        }
    }

    /// Sample the region on a `width` x `height` pixel grid.
    pub fn rasterize(&self, width: u32, height: u32) -> Mask {
        let mut mask = Mask::empty(width, height);
        let Some(bounds) = self.bounds() else {
            return mask;
        };
        let x0 = bounds.x.floor().max(0.0) as u32;
        let y0 = bounds.y.floor().max(0.0) as u32;
        let x1 = (bounds.right().ceil().max(0.0) as u32).min(width);
        let y1 = (bounds.bottom().ceil().max(0.0) as u32).min(height);
        for y in y0..y1 {
            for x in x0..x1 {
                if self.contains(Point2D::new(x as f64 + 0.5, y as f64 + 0.5)) {
                    mask.set(x, y, true);
                }
            }
        }
        mask
    }
}

/// Strip membership is arithmetic, so the cost per point does not grow with
/// the strip count.
fn bands_contain(area: &Rect, count: u32, vertical: bool, inset: f64, p: Point2D) -> bool {
    let (offset, extent) = if vertical {
        (p.x - area.x, area.width)
    } else {
        (p.y - area.y, area.height)
    };
    let n = count as f64;
    let edge = |strip: f64| extent * strip / n;
    let strip = (offset * n / extent).floor().clamp(0.0, n - 1.0);
    // Rounding can put the point one strip off; neighbours settle it.
    [strip - 1.0, strip, strip + 1.0]
        .into_iter()
        .filter(|s| *s >= 0.0 && *s < n)
        .any(|s| offset >= edge(s + inset) && offset < edge(s + 1.0 - inset))
}

fn polygon_contains(points: &[Point2D], p: Point2D) -> bool {
    if points.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (a, b) = (points[i], points[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Per-pixel coverage produced by rasterizing a [`Region`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Mask {
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; (width as usize) * (height as usize)],
        }
    }

    pub fn full(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![true; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.bits[(y as usize) * (self.width as usize) + x as usize]
    }

    pub fn set(&mut self, x: u32, y: u32, value: bool) {
        if x < self.width && y < self.height {
            self.bits[(y as usize) * (self.width as usize) + x as usize] = value;
        }
    }

    /// Keep only pixels covered by both masks.
    pub fn intersect_with(&mut self, other: &Mask) {
        for y in 0..self.height {
            for x in 0..self.width {
                if !other.contains(x, y) {
                    self.set(x, y, false);
                }
            }
        }
    }

    /// Number of covered pixels.
    pub fn coverage(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Number of covered pixels in row `y`.
    pub fn row_coverage(&self, y: u32) -> usize {
        (0..self.width).filter(|&x| self.contains(x, y)).count()
    }

    /// Number of covered pixels in column `x`.
    pub fn column_coverage(&self, x: u32) -> usize {
        (0..self.height).filter(|&y| self.contains(x, y)).count()
    }
}
