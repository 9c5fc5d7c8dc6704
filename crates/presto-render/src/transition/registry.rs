//! Lookup of transitions by kind and direction.

use presto_core::{Direction, TransitionKind};
use serde::Serialize;

use super::Transition;

/// Describes one selectable transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitionDescriptor {
    /// Kind identifier, e.g. `circular-expand`.
    pub id: &'static str,
    pub name: String,
    pub direction: Direction,
    /// `false` only for swap, which replaces the frame without animating.
    pub animated: bool,
    #[serde(skip)]
    pub transition: Transition,
}

impl TransitionDescriptor {
    fn new(kind: TransitionKind, direction: Direction) -> Self {
        Self {
            id: kind.id(),
            name: kind.display_name(),
            direction,
            animated: !kind.is_swap(),
            transition: Transition::new(kind, direction),
        }
    }
}

/// Stateless factory for transitions. Every (kind, direction) pair resolves;
/// swap ignores the direction.
pub struct TransitionRegistry;

impl TransitionRegistry {
    pub fn get(kind: TransitionKind, direction: Direction) -> TransitionDescriptor {
        let direction = if kind.is_swap() { Direction::In } else { direction };
        TransitionDescriptor::new(kind, direction)
    }

    /// Look up by kind identifier. Unknown identifiers resolve to swap.
    pub fn lookup(id: &str, direction: Direction) -> TransitionDescriptor {
        Self::get(TransitionKind::resolve(id), direction)
    }

    /// Every distinct transition, swap first.
    pub fn descriptors() -> Vec<TransitionDescriptor> {
        TransitionKind::ALL
            .iter()
            .flat_map(|&kind| {
                let directions: &[Direction] = if kind.is_swap() {
                    &[Direction::In]
                } else {
                    &Direction::ALL
                };
                directions.iter().map(move |&d| TransitionDescriptor::new(kind, d))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_count() {
        // 19 animated kinds in both directions plus swap.
        assert_eq!(TransitionRegistry::descriptors().len(), 39);
    }

    #[test]
    fn test_unknown_id_is_swap() {
        let d = TransitionRegistry::lookup("cube-rotate", Direction::Out);
        assert_eq!(d.transition.kind, TransitionKind::Swap);
        assert_eq!(d.direction, Direction::In);
        assert!(!d.animated);
    }

    #[test]
    fn test_lookup_by_id() {
        let d = TransitionRegistry::lookup("circular-expand", Direction::Out);
        assert_eq!(d.transition, Transition::new(TransitionKind::CircularExpand, Direction::Out));
    }

    #[test]
    fn test_descriptor_serializes_without_transition() {
        let d = TransitionRegistry::get(TransitionKind::Fade, Direction::In);
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["id"], "fade");
        assert!(json.get("transition").is_none());
    }
}
