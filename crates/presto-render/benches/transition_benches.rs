use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use presto_core::{Color, Direction, Easing, FrameBuffer, SlideDirection, TransitionKind, TransitionSpec};
use presto_render::sequence::render_sequence;
use presto_render::surface::Canvas;
use presto_render::transition::Transition;

const WIDTH: u32 = 1280;
const HEIGHT: u32 = 720;

fn slides() -> (FrameBuffer, FrameBuffer) {
    (
        FrameBuffer::solid(WIDTH, HEIGHT, &Color::from_rgba8([32, 64, 128, 255])),
        FrameBuffer::solid(WIDTH, HEIGHT, &Color::from_rgba8([240, 200, 80, 255])),
    )
}

fn bench_single_frame(c: &mut Criterion) {
    let (prev, next) = slides();
    let mut group = c.benchmark_group("presto_transition_frame");
    group.sample_size(20);

    let kinds = [
        TransitionKind::Fade,
        TransitionKind::Push(SlideDirection::Left),
        TransitionKind::Swipe(SlideDirection::Up),
        TransitionKind::HorizontalSplitExpand,
        TransitionKind::CircularExpand,
        TransitionKind::ZoomOut,
        TransitionKind::HorizontalBlinds,
    ];
    for kind in kinds {
        let transition = Transition::new(kind, Direction::In);
        group.bench_with_input(BenchmarkId::from_parameter(kind.id()), &transition, |b, t| {
            let mut canvas = Canvas::new(WIDTH, HEIGHT);
            b.iter(|| t.render(&mut canvas, Some(&prev), &next, black_box(0.42)));
        });
    }
    group.finish();
}

fn bench_sequence(c: &mut Criterion) {
    let (prev, next) = slides();
    let mut group = c.benchmark_group("presto_transition_sequence");
    group.sample_size(10);

    let spec = TransitionSpec::new(TransitionKind::CircularExpand, Direction::In, 500, Easing::Cubic);
    group.bench_function("circular_expand_25_frames", |b| {
        b.iter(|| render_sequence(&spec, Some(&prev), &next, 25).map(|frames| frames.len()))
    });
    group.finish();
}

criterion_group!(benches, bench_single_frame, bench_sequence);
criterion_main!(benches);
