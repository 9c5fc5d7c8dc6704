//! Offline rendering of a whole transition.

use presto_core::{FrameBuffer, PrestoError, PrestoResult, TransitionSpec};
use rayon::prelude::*;

use crate::surface::Canvas;
use crate::transition::Transition;

/// `frame_count` evenly spaced time samples from 0 to 1 inclusive.
/// A single sample is the end state.
pub fn sample_times(frame_count: usize) -> Vec<f64> {
    match frame_count {
        0 => Vec::new(),
        1 => vec![1.0],
        n => (0..n).map(|i| i as f64 / (n - 1) as f64).collect(),
    }
}

/// Render `frame_count` frames of `spec` between `previous` and `next`.
///
/// Time samples are eased with the spec's easing and direction mode, then
/// rendered in parallel, each onto a fresh transparent canvas the size of
/// `next`.
pub fn render_sequence(
    spec: &TransitionSpec,
    previous: Option<&FrameBuffer>,
    next: &FrameBuffer,
    frame_count: usize,
) -> PrestoResult<Vec<FrameBuffer>> {
    if frame_count == 0 {
        return Err(PrestoError::InvalidArgument("frame count must be at least 1".into()));
    }
    if next.is_empty() {
        return Err(PrestoError::InvalidArgument("next frame is empty".into()));
    }
    if let Some(prev) = previous {
        if prev.dimensions() != next.dimensions() {
            return Err(PrestoError::Render(format!(
                "frame size mismatch: previous is {}x{}, next is {}x{}",
                prev.width, prev.height, next.width, next.height
            )));
        }
    }

    let transition = Transition::from_spec(spec);
    let (width, height) = next.dimensions();
    tracing::debug!(
        kind = spec.kind.id(),
        direction = spec.direction.id(),
        frame_count,
        width,
        height,
        "rendering transition sequence"
    );

    let frames = sample_times(frame_count)
        .into_par_iter()
        .map(|t| {
            let mut canvas = Canvas::new(width, height);
            transition.render(&mut canvas, previous, next, spec.eased(t));
            canvas.into_frame()
        })
        .collect();
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use presto_core::{Color, Direction, Easing, TransitionKind};

    #[test]
    fn test_sample_times() {
        assert!(sample_times(0).is_empty());
        assert_eq!(sample_times(1), vec![1.0]);
        assert_eq!(sample_times(5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_sequence_endpoints() {
        let prev = FrameBuffer::solid(6, 6, &Color::RED);
        let next = FrameBuffer::solid(6, 6, &Color::BLUE);
        let spec = TransitionSpec::new(TransitionKind::Fade, Direction::In, 400, Easing::Cubic);
        let frames = render_sequence(&spec, Some(&prev), &next, 4).unwrap();
        assert_eq!(frames.len(), 4);
        assert_eq!(frames[0], prev);
        assert_eq!(frames[3], next);
    }

    #[test]
    fn test_rejects_bad_input() {
        let next = FrameBuffer::solid(2, 2, &Color::BLUE);
        let spec = TransitionSpec::swap();
        assert!(matches!(
            render_sequence(&spec, None, &next, 0),
            Err(PrestoError::InvalidArgument(_))
        ));
        let prev = FrameBuffer::new(3, 3);
        assert!(matches!(
            render_sequence(&spec, Some(&prev), &next, 2),
            Err(PrestoError::Render(_))
        ));
    }
}
