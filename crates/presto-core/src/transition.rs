use serde::{Deserialize, Serialize};
use std::fmt;

use crate::easing::{Easing, EasingMode};

/// Blind strips used when a transition does not configure its own count.
pub const DEFAULT_BLIND_COUNT: u32 = 12;

/// Edge-relative motion for push and swipe transitions.
/// Names the direction the content travels: `Left` moves right-to-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideDirection {
    Up,
    Down,
    Left,
    Right,
}

impl SlideDirection {
    pub const ALL: [SlideDirection; 4] = [
        SlideDirection::Up,
        SlideDirection::Down,
        SlideDirection::Left,
        SlideDirection::Right,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            SlideDirection::Up => "up",
            SlideDirection::Down => "down",
            SlideDirection::Left => "left",
            SlideDirection::Right => "right",
        }
    }

    /// Whether motion runs along the x axis.
    pub fn is_horizontal(&self) -> bool {
        matches!(self, SlideDirection::Left | SlideDirection::Right)
    }
}

/// Which frame the transition animates.
///
/// `In` animates the incoming slide over the outgoing one; `Out` animates the
/// outgoing slide away, exposing the incoming slide underneath.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    In,
    Out,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::In, Direction::Out];

    pub fn id(&self) -> &'static str {
        match self {
            Direction::In => "in",
            Direction::Out => "out",
        }
    }

    pub fn from_id(id: &str) -> Option<Direction> {
        match id.trim().to_ascii_lowercase().as_str() {
            "in" => Some(Direction::In),
            "out" => Some(Direction::Out),
            _ => None,
        }
    }

    /// Easing mode the animator applies for this direction.
    pub fn easing_mode(&self) -> EasingMode {
        match self {
            Direction::In => EasingMode::In,
            Direction::Out => EasingMode::Out,
        }
    }
}

/// The geometric compositing algorithm of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    /// Unconditional replace, no animation.
    Swap,
    Fade,
    Push(SlideDirection),
    Swipe(SlideDirection),
    HorizontalSplitExpand,
    HorizontalSplitCollapse,
    VerticalSplitExpand,
    VerticalSplitCollapse,
    CircularExpand,
    CircularCollapse,
    ZoomIn,
    ZoomOut,
    HorizontalBlinds,
    VerticalBlinds,
}

impl TransitionKind {
    pub const ALL: [TransitionKind; 20] = [
        TransitionKind::Swap,
        TransitionKind::Fade,
        TransitionKind::Push(SlideDirection::Up),
        TransitionKind::Push(SlideDirection::Down),
        TransitionKind::Push(SlideDirection::Left),
        TransitionKind::Push(SlideDirection::Right),
        TransitionKind::Swipe(SlideDirection::Up),
        TransitionKind::Swipe(SlideDirection::Down),
        TransitionKind::Swipe(SlideDirection::Left),
        TransitionKind::Swipe(SlideDirection::Right),
        TransitionKind::HorizontalSplitExpand,
        TransitionKind::HorizontalSplitCollapse,
        TransitionKind::VerticalSplitExpand,
        TransitionKind::VerticalSplitCollapse,
        TransitionKind::CircularExpand,
        TransitionKind::CircularCollapse,
        TransitionKind::ZoomIn,
        TransitionKind::ZoomOut,
        TransitionKind::HorizontalBlinds,
        TransitionKind::VerticalBlinds,
    ];

    /// Stable kebab-case identifier, e.g. `push-left`.
    pub fn id(&self) -> &'static str {
        match self {
            TransitionKind::Swap => "swap",
            TransitionKind::Fade => "fade",
            TransitionKind::Push(SlideDirection::Up) => "push-up",
            TransitionKind::Push(SlideDirection::Down) => "push-down",
            TransitionKind::Push(SlideDirection::Left) => "push-left",
            TransitionKind::Push(SlideDirection::Right) => "push-right",
            TransitionKind::Swipe(SlideDirection::Up) => "swipe-up",
            TransitionKind::Swipe(SlideDirection::Down) => "swipe-down",
            TransitionKind::Swipe(SlideDirection::Left) => "swipe-left",
            TransitionKind::Swipe(SlideDirection::Right) => "swipe-right",
            TransitionKind::HorizontalSplitExpand => "horizontal-split-expand",
            TransitionKind::HorizontalSplitCollapse => "horizontal-split-collapse",
            TransitionKind::VerticalSplitExpand => "vertical-split-expand",
            TransitionKind::VerticalSplitCollapse => "vertical-split-collapse",
            TransitionKind::CircularExpand => "circular-expand",
            TransitionKind::CircularCollapse => "circular-collapse",
            TransitionKind::ZoomIn => "zoom-in",
            TransitionKind::ZoomOut => "zoom-out",
            TransitionKind::HorizontalBlinds => "horizontal-blinds",
            TransitionKind::VerticalBlinds => "vertical-blinds",
        }
    }

    /// Human-readable name for menus and listings.
    pub fn display_name(&self) -> String {
        self.id()
            .split('-')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Look up a kind by identifier. Case, `-`, `_` and spaces are ignored, so
    /// `PushLeft`, `push_left` and `push-left` all resolve to the same kind.
    pub fn from_id(id: &str) -> Option<TransitionKind> {
        let wanted = normalize_id(id);
        if wanted.is_empty() {
            return None;
        }
        Self::ALL
            .into_iter()
            .find(|kind| normalize_id(kind.id()) == wanted)
    }

    /// Like [`TransitionKind::from_id`] but fails closed to `Swap`.
    pub fn resolve(id: &str) -> TransitionKind {
        Self::from_id(id).unwrap_or_else(|| {
            tracing::warn!("unknown transition '{}', falling back to swap", id);
            TransitionKind::Swap
        })
    }

    pub fn is_swap(&self) -> bool {
        matches!(self, TransitionKind::Swap)
    }
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

fn normalize_id(id: &str) -> String {
    id.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Strip count for a blinds transition configured by density (strips per pixel of height).
///
/// Capped at one strip per pixel of `extent`.
pub fn blind_count_for_density(extent: u32, density: f64) -> u32 {
    if !density.is_finite() || density <= 0.0 {
        return DEFAULT_BLIND_COUNT;
    }
    ((extent as f64 * density).ceil() as u32).clamp(1, extent.max(1))
}

/// A fully resolved transition: what to draw, which way, for how long, and how it eases.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionSpec {
    pub kind: TransitionKind,
    pub direction: Direction,
    pub duration_ms: u32,
    pub easing: Easing,
    pub blind_count: u32,
}

impl TransitionSpec {
    /// Negative durations clamp to zero; `Swap` always has zero duration.
    pub fn new(kind: TransitionKind, direction: Direction, duration_ms: i64, easing: Easing) -> Self {
        let duration_ms = if kind.is_swap() {
            0
        } else {
            duration_ms.clamp(0, u32::MAX as i64) as u32
        };
        Self {
            kind,
            direction,
            duration_ms,
            easing,
            blind_count: DEFAULT_BLIND_COUNT,
        }
    }

    pub fn swap() -> Self {
        Self::new(TransitionKind::Swap, Direction::In, 0, Easing::Linear)
    }

    /// Resolve opaque identifiers, substituting `Swap` / `In` / `Linear` for unknown ones.
    pub fn from_ids(kind: &str, direction: &str, duration_ms: i64, easing: &str) -> Self {
        let direction = Direction::from_id(direction).unwrap_or_else(|| {
            tracing::warn!("unknown transition direction '{}', using 'in'", direction);
            Direction::In
        });
        Self::new(
            TransitionKind::resolve(kind),
            direction,
            duration_ms,
            Easing::resolve(easing),
        )
    }

    /// Builder: set the number of blind strips (at least one).
    pub fn with_blind_count(mut self, count: u32) -> Self {
        self.blind_count = count.max(1);
        self
    }

    pub fn duration(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.duration_ms as u64)
    }

    pub fn easing_mode(&self) -> EasingMode {
        self.direction.easing_mode()
    }

    /// Eased progress for a linear time fraction, in this transition's direction.
    pub fn eased(&self, t: f64) -> f64 {
        self.easing.curve(t, self.easing_mode())
    }
}

impl Default for TransitionSpec {
    fn default() -> Self {
        Self::swap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_round_trips_through_its_id() {
        for kind in TransitionKind::ALL {
            assert_eq!(TransitionKind::from_id(kind.id()), Some(kind));
        }
    }

    #[test]
    fn test_id_lookup_ignores_case_and_separators() {
        let expected = Some(TransitionKind::Push(SlideDirection::Left));
        assert_eq!(TransitionKind::from_id("PushLeft"), expected);
        assert_eq!(TransitionKind::from_id("push_left"), expected);
        assert_eq!(TransitionKind::from_id(" Push Left "), expected);
    }

    #[test]
    fn test_unknown_kind_fails_closed_to_swap() {
        assert_eq!(TransitionKind::resolve("cube-rotate"), TransitionKind::Swap);
        assert_eq!(TransitionKind::resolve(""), TransitionKind::Swap);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(TransitionKind::HorizontalSplitExpand.display_name(), "Horizontal Split Expand");
        assert_eq!(TransitionKind::Fade.display_name(), "Fade");
    }

    #[test]
    fn test_negative_duration_clamps_to_zero() {
        let spec = TransitionSpec::new(TransitionKind::Fade, Direction::In, -250, Easing::Linear);
        assert_eq!(spec.duration_ms, 0);
    }

    #[test]
    fn test_swap_forces_zero_duration() {
        let spec = TransitionSpec::new(TransitionKind::Swap, Direction::Out, 900, Easing::Cubic);
        assert_eq!(spec.duration_ms, 0);
    }

    #[test]
    fn test_from_ids_fails_closed() {
        let spec = TransitionSpec::from_ids("spin", "sideways", 400, "wobble");
        assert_eq!(spec.kind, TransitionKind::Swap);
        assert_eq!(spec.direction, Direction::In);
        assert_eq!(spec.easing, Easing::Linear);
        assert_eq!(spec.duration_ms, 0);

        let spec = TransitionSpec::from_ids("zoom_out", "OUT", 400, "bounce");
        assert_eq!(spec.kind, TransitionKind::ZoomOut);
        assert_eq!(spec.direction, Direction::Out);
        assert_eq!(spec.easing, Easing::Bounce);
        assert_eq!(spec.duration_ms, 400);
        assert_eq!(spec.blind_count, DEFAULT_BLIND_COUNT);
    }

    #[test]
    fn test_direction_selects_easing_mode() {
        let spec = TransitionSpec::new(TransitionKind::Fade, Direction::Out, 100, Easing::Quadratic);
        assert!((spec.eased(0.5) - 0.75).abs() < 1e-12);
        let spec = TransitionSpec { direction: Direction::In, ..spec };
        assert!((spec.eased(0.5) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_blind_count_for_density() {
        assert_eq!(blind_count_for_density(1080, 0.01), 11);
        assert_eq!(blind_count_for_density(100, 0.1), 10);
        assert_eq!(blind_count_for_density(100, -1.0), DEFAULT_BLIND_COUNT);
        assert_eq!(blind_count_for_density(0, 0.5), 1);
        assert_eq!(blind_count_for_density(1080, 2.0), 1080);
        assert_eq!(blind_count_for_density(1080, 1e300), 1080);
    }
}
