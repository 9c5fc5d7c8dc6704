use std::sync::Arc;

use presto_core::{Color, FrameBuffer, Point2D, Rect};
use presto_render::component::{ClockTime, Component, LiveClock, SolidFill, VideoFeed};
use presto_render::feed::LatestFrame;
use presto_render::layer::{partition_layers, RenderLayer};
use presto_render::presentation::{Background, PresentationRenderer, Slide};
use presto_render::surface::Canvas;

fn fill(id: &str) -> Arc<dyn Component> {
    Arc::new(SolidFill::rect(id, Rect::new(0.0, 0.0, 4.0, 4.0), Color::RED))
}

fn video(id: &str) -> Arc<dyn Component> {
    Arc::new(VideoFeed::new(id, LatestFrame::new(), Rect::new(0.0, 0.0, 4.0, 4.0)))
}

fn clock(id: &str) -> Arc<dyn Component> {
    Arc::new(
        LiveClock::new(id, Point2D::new(2.0, 2.0), 2.0)
            .with_time_source(Arc::new(|| ClockTime::new(12, 0, 0))),
    )
}

fn ids(layer: &RenderLayer) -> Vec<String> {
    layer.components().iter().map(|c| c.id().to_string()).collect()
}

fn flatten(layers: &[RenderLayer]) -> Vec<String> {
    layers.iter().flat_map(ids).collect()
}

#[test]
fn one_dynamic_component_in_the_middle() {
    let components = vec![fill("a"), fill("b"), video("v"), fill("c"), fill("d")];
    let layers = partition_layers(&components);
    assert_eq!(layers.len(), 3);
    assert!(layers[0].is_group());
    assert_eq!(ids(&layers[0]), ["a", "b"]);
    assert!(layers[1].is_item());
    assert_eq!(ids(&layers[1]), ["v"]);
    assert!(layers[2].is_group());
    assert_eq!(ids(&layers[2]), ["c", "d"]);
}

#[test]
fn no_dynamic_components_is_one_group() {
    let components = vec![fill("a"), fill("b"), fill("c")];
    let layers = partition_layers(&components);
    assert_eq!(layers.len(), 1);
    assert!(layers[0].is_group());
}

#[test]
fn all_dynamic_components_are_items() {
    let components = vec![video("v1"), clock("c1"), video("v2")];
    let layers = partition_layers(&components);
    assert_eq!(layers.len(), 3);
    assert!(layers.iter().all(RenderLayer::is_item));
}

#[test]
fn adjacent_dynamic_components_do_not_create_empty_groups() {
    let components = vec![video("v1"), clock("c1"), fill("a"), video("v2")];
    let layers = partition_layers(&components);
    let kinds: Vec<bool> = layers.iter().map(RenderLayer::is_item).collect();
    assert_eq!(kinds, [true, true, false, true]);
}

#[test]
fn concatenated_layers_preserve_z_order() {
    let components = vec![
        fill("a"),
        clock("c1"),
        fill("b"),
        fill("c"),
        video("v1"),
        video("v2"),
        fill("d"),
    ];
    let layers = partition_layers(&components);
    let expected: Vec<String> = components.iter().map(|c| c.id().to_string()).collect();
    assert_eq!(flatten(&layers), expected);
}

#[test]
fn video_layer_updates_between_frames() {
    let feed = LatestFrame::new();
    let slide = Slide::new("live")
        .with_background(Background::Color(Color::BLACK))
        .with_component(SolidFill::rect("title", Rect::new(0.0, 0.0, 4.0, 1.0), Color::WHITE))
        .with_component(VideoFeed::new("cam", feed.clone(), Rect::new(0.0, 2.0, 4.0, 2.0)));
    let mut renderer = PresentationRenderer::new(&slide);
    assert!(renderer.has_dynamic_content());

    feed.publish(FrameBuffer::solid(4, 2, &Color::RED));
    let mut first = Canvas::new(4, 4);
    renderer.render_frame(&mut first, true);
    assert_eq!(first.frame().get_pixel(0, 3), Some([255, 0, 0, 255]));

    feed.publish(FrameBuffer::solid(4, 2, &Color::GREEN));
    let mut second = Canvas::new(4, 4);
    renderer.render_frame(&mut second, true);
    assert_eq!(second.frame().get_pixel(0, 3), Some([0, 255, 0, 255]));
    assert_eq!(second.frame().get_pixel(0, 0), Some([255, 255, 255, 255]));
    assert_eq!(second.frame().get_pixel(0, 1), Some([0, 0, 0, 255]));
}
