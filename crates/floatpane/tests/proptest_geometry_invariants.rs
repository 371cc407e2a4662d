//! Property tests for floating geometry.
//!
//! 1. **Drag stays inside the viewport**: for any pointer path, every
//!    applied frame leaves `0 <= x`, `x + width <= viewport.width` and the
//!    same for `y`.
//! 2. **Resize respects the minimum and the viewport**: for any handle and
//!    pointer path, a floating panel never drops below its minimum size and
//!    never leaves the viewport.
//! 3. **Viewport shrink reconciles**: after any window resize the panel
//!    fits the new viewport, including while a resize is in progress.

use floatpane::{
    EventTarget, ListenerSlot, NodeId, PanelConfig, PanelEngine, PanelEvents, PartialPosition,
    PartialSize, PointerEvent, PointerEventNames, Position, ResizeHandle, Size, Surfaces,
    ToggleOptions,
};
use floatpane_core::testing::RecordingSurface;
use proptest::prelude::*;

const WRAPPER: NodeId = NodeId(1);
const RESIZER: NodeId = NodeId(3);

#[derive(Debug, Clone)]
struct Setup {
    viewport: Size,
    size: Size,
    origin: Position,
    min: Size,
}

fn setup() -> impl Strategy<Value = Setup> {
    (200i32..1600, 200i32..1000)
        .prop_flat_map(|(vw, vh)| {
            (
                Just(Size::new(vw, vh)),
                (1..=vw, 1..=vh),
            )
        })
        .prop_flat_map(|(viewport, (w, h))| {
            (
                Just(viewport),
                Just(Size::new(w, h)),
                (0..=viewport.width - w, 0..=viewport.height - h),
                (0..=w, 0..=h),
            )
        })
        .prop_map(|(viewport, size, (x, y), (mw, mh))| Setup {
            viewport,
            size,
            origin: Position::new(x, y),
            min: Size::new(mw, mh),
        })
}

fn pointer_path() -> impl Strategy<Value = Vec<(i32, i32)>> {
    prop::collection::vec((-3000i32..5000, -3000i32..5000), 1..24)
}

fn handle() -> impl Strategy<Value = ResizeHandle> {
    prop::sample::select(ResizeHandle::ALL.to_vec())
}

fn floating_engine(setup: &Setup) -> PanelEngine<RecordingSurface> {
    let surfaces = Surfaces {
        wrapper: RecordingSurface::new(WRAPPER.0, setup.size, Position::default()),
        overlay: RecordingSurface::new(2, setup.viewport, Position::default()),
        resizer: Some(RecordingSurface::new(RESIZER.0, setup.size, Position::default())),
    };
    let config = PanelConfig {
        min_size: PartialSize::new(setup.min.width, setup.min.height),
        viewport: setup.viewport,
    };
    let mut engine = PanelEngine::new(
        surfaces,
        PointerEventNames::MOUSE,
        config,
        None,
        PanelEvents::new(),
    );
    engine.static_to_fixed(&ToggleOptions {
        size: PartialSize::new(setup.size.width, setup.size.height),
        position: PartialPosition::new(setup.origin.x, setup.origin.y),
        ..ToggleOptions::default()
    });
    engine
}

fn assert_inside(engine: &PanelEngine<RecordingSurface>, viewport: Size) {
    let g = engine.position_and_size();
    let (x, y) = (g.x.unwrap_or(0), g.y.unwrap_or(0));
    let (w, h) = (g.width.unwrap_or(0), g.height.unwrap_or(0));
    assert!(x >= 0 && y >= 0, "origin ({x}, {y}) left the viewport");
    assert!(x + w <= viewport.width, "x {x} + w {w} > {}", viewport.width);
    assert!(y + h <= viewport.height, "y {y} + h {h} > {}", viewport.height);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn drag_never_leaves_viewport(setup in setup(), path in pointer_path()) {
        let mut engine = floating_engine(&setup);
        let grab = PointerEvent::mouse(
            "mousedown",
            EventTarget::node(WRAPPER),
            setup.origin.x,
            setup.origin.y,
        );
        engine.dispatch_pointer(ListenerSlot::Wrapper, &grab);
        prop_assert!(engine.is_dragging());

        for (x, y) in path {
            let mv = PointerEvent::mouse("mousemove", EventTarget::node(WRAPPER), x, y);
            engine.dispatch_pointer(ListenerSlot::Document, &mv);
            engine.on_animation_frame();
            assert_inside(&engine, setup.viewport);
        }
    }

    #[test]
    fn resize_respects_minimum_and_viewport(
        setup in setup(),
        handle in handle(),
        path in pointer_path(),
    ) {
        let mut engine = floating_engine(&setup);
        let down = PointerEvent::mouse(
            "mousedown",
            EventTarget::handle(RESIZER, handle),
            setup.origin.x,
            setup.origin.y,
        );
        engine.dispatch_pointer(ListenerSlot::Resizer, &down);
        prop_assert!(engine.is_resizing());

        for (x, y) in path {
            let mv = PointerEvent::mouse("mousemove", EventTarget::node(RESIZER), x, y);
            engine.dispatch_pointer(ListenerSlot::Document, &mv);
            engine.on_animation_frame();

            let g = engine.position_and_size();
            prop_assert!(g.width.unwrap_or(0) >= setup.min.width);
            prop_assert!(g.height.unwrap_or(0) >= setup.min.height);
            assert_inside(&engine, setup.viewport);
        }
    }

    #[test]
    fn resize_survives_viewport_changes(
        setup in setup(),
        handle in handle(),
        steps in prop::collection::vec(
            ((-3000i32..5000, -3000i32..5000), prop::option::of((1i32..1600, 1i32..1000))),
            1..24,
        ),
    ) {
        let mut engine = floating_engine(&setup);
        let down = PointerEvent::mouse(
            "mousedown",
            EventTarget::handle(RESIZER, handle),
            setup.origin.x,
            setup.origin.y,
        );
        engine.dispatch_pointer(ListenerSlot::Resizer, &down);

        let mut viewport = setup.viewport;
        for ((x, y), resized) in steps {
            let mv = PointerEvent::mouse("mousemove", EventTarget::node(RESIZER), x, y);
            engine.dispatch_pointer(ListenerSlot::Document, &mv);
            if let Some((vw, vh)) = resized {
                // A viewport smaller than the minimum size cannot hold the panel.
                viewport = Size::new(vw.max(setup.min.width), vh.max(setup.min.height));
                engine.dispatch_window_resize(viewport);
            }
            engine.on_animation_frame();
            assert_inside(&engine, viewport);
        }
    }

    #[test]
    fn window_shrink_reconciles(setup in setup(), vw in 1i32..1600, vh in 1i32..1000) {
        let mut engine = floating_engine(&setup);
        let viewport = Size::new(vw, vh);
        engine.dispatch_window_resize(viewport);
        engine.on_animation_frame();
        assert_inside(&engine, viewport);
    }
}
