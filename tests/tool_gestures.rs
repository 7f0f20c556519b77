//! Gesture state machines: drags, polygon building, native text selections,
//! time-axis drags and 3D picks, including aborts and silent discards.

mod test_helpers;

use labelbench::{
    Action, GestureOutcome, Key, Modality, Point, Point3, PointerEvent, Shape, Tool,
};
use test_helpers::*;

#[test]
fn drag_release_commits_a_normalized_box() {
    let mut store = image_store();
    let mut tools = controller();
    tools.select_tool(Tool::CreateBoundingBox, &mut store).unwrap();

    let press = tools.on_pointer(PointerEvent::Press(Point::new(0.10, 0.10)), &mut store);
    assert!(matches!(press, GestureOutcome::Preview(_)));

    let moved = tools.on_pointer(PointerEvent::Move(Point::new(0.30, 0.08)), &mut store);
    let GestureOutcome::Preview(preview) = moved else {
        panic!("drag move should preview, got {moved:?}");
    };
    assert_box(&preview, 0.10, 0.08, 0.20, 0.02);

    let released = tools.on_pointer(PointerEvent::Release(Point::new(0.50, 0.05)), &mut store);
    let GestureOutcome::Committed(id) = released else {
        panic!("release should commit, got {released:?}");
    };

    let region = store.state().region(id).unwrap();
    assert_box(&region.shape, 0.10, 0.05, 0.40, 0.05);
    assert_eq!(region.label, "object");
    assert!(store.state().dirty);
}

#[test]
fn reversed_drag_normalizes_the_corners() {
    let mut store = image_store();
    let mut tools = controller();
    tools.select_tool(Tool::CreateBoundingBox, &mut store).unwrap();

    tools.on_pointer(PointerEvent::Press(Point::new(0.50, 0.40)), &mut store);
    let released = tools.on_pointer(PointerEvent::Release(Point::new(0.10, 0.10)), &mut store);
    let GestureOutcome::Committed(id) = released else {
        panic!("got {released:?}");
    };
    assert_box(&store.state().region(id).unwrap().shape, 0.10, 0.10, 0.40, 0.30);
}

#[test]
fn sub_threshold_release_is_discarded() {
    let mut store = image_store();
    let mut tools = controller();
    tools.select_tool(Tool::CreateBoundingBox, &mut store).unwrap();

    tools.on_pointer(PointerEvent::Press(Point::new(0.20, 0.20)), &mut store);
    let released = tools.on_pointer(PointerEvent::Release(Point::new(0.201, 0.24)), &mut store);

    assert_eq!(released, GestureOutcome::Discarded);
    assert!(store.state().regions.is_empty());
    assert!(!store.state().dirty);
}

#[test]
fn release_without_a_press_is_ignored() {
    let mut store = image_store();
    let mut tools = controller();
    tools.select_tool(Tool::CreateBoundingBox, &mut store).unwrap();

    let released = tools.on_pointer(PointerEvent::Release(Point::new(0.5, 0.5)), &mut store);
    assert_eq!(released, GestureOutcome::Idle);
}

#[test]
fn drag_past_the_content_edge_is_discarded() {
    let mut store = image_store();
    let mut tools = controller();
    tools.select_tool(Tool::CreateBoundingBox, &mut store).unwrap();

    tools.on_pointer(PointerEvent::Press(Point::new(0.80, 0.80)), &mut store);
    let released = tools.on_pointer(PointerEvent::Release(Point::new(1.20, 1.10)), &mut store);

    assert_eq!(released, GestureOutcome::Discarded);
    assert!(store.state().regions.is_empty());
}

#[test]
fn polygon_closes_on_a_click_near_the_first_vertex() {
    let mut store = image_store();
    let mut tools = controller();
    tools.select_tool(Tool::CreatePolygon, &mut store).unwrap();

    for p in [
        Point::new(0.20, 0.20),
        Point::new(0.60, 0.20),
        Point::new(0.40, 0.60),
    ] {
        let out = tools.on_pointer(PointerEvent::Click(p), &mut store);
        assert!(matches!(out, GestureOutcome::Preview(_)));
    }

    // Within the close radius of the first vertex.
    let out = tools.on_pointer(PointerEvent::Click(Point::new(0.205, 0.20)), &mut store);
    let GestureOutcome::Committed(id) = out else {
        panic!("closing click should commit, got {out:?}");
    };
    let Shape::Polygon { points } = &store.state().region(id).unwrap().shape else {
        panic!("expected a polygon");
    };
    assert_eq!(points.len(), 3);
}

#[test]
fn polygon_closes_on_double_click() {
    let mut store = image_store();
    let mut tools = controller();
    tools.select_tool(Tool::CreatePolygon, &mut store).unwrap();

    for p in [
        Point::new(0.2, 0.2),
        Point::new(0.6, 0.2),
        Point::new(0.6, 0.6),
        Point::new(0.2, 0.6),
    ] {
        tools.on_pointer(PointerEvent::Click(p), &mut store);
    }
    let out = tools.on_pointer(PointerEvent::DoubleClick(Point::new(0.2, 0.6)), &mut store);
    assert!(matches!(out, GestureOutcome::Committed(_)));
}

#[test]
fn polygon_closes_on_enter() {
    let mut store = image_store();
    let mut tools = controller();
    tools.select_tool(Tool::CreatePolygon, &mut store).unwrap();

    for p in [Point::new(0.2, 0.2), Point::new(0.6, 0.2), Point::new(0.4, 0.6)] {
        tools.on_pointer(PointerEvent::Click(p), &mut store);
    }
    let out = tools.on_key(Key::Enter, &mut store);
    assert!(matches!(out, GestureOutcome::Committed(_)));
}

#[test]
fn polygon_with_too_few_vertices_is_discarded() {
    let mut store = image_store();
    let mut tools = controller();
    tools.select_tool(Tool::CreatePolygon, &mut store).unwrap();

    tools.on_pointer(PointerEvent::Click(Point::new(0.2, 0.2)), &mut store);
    tools.on_pointer(PointerEvent::Click(Point::new(0.6, 0.2)), &mut store);

    assert_eq!(tools.on_key(Key::Enter, &mut store), GestureOutcome::Discarded);
    assert!(store.state().regions.is_empty());
}

#[test]
fn escape_aborts_an_in_progress_polygon() {
    let mut store = image_store();
    let mut tools = controller();
    tools.select_tool(Tool::CreatePolygon, &mut store).unwrap();

    tools.on_pointer(PointerEvent::Click(Point::new(0.2, 0.2)), &mut store);
    tools.on_pointer(PointerEvent::Click(Point::new(0.6, 0.2)), &mut store);

    assert_eq!(tools.on_key(Key::Escape, &mut store), GestureOutcome::Discarded);
    assert!(store.state().regions.is_empty());

    // A further Escape with nothing pending does nothing.
    assert_eq!(tools.on_key(Key::Escape, &mut store), GestureOutcome::Idle);
}

#[test]
fn tool_switch_discards_the_vertex_buffer() {
    let mut store = image_store();
    let mut tools = controller();
    tools.select_tool(Tool::CreatePolygon, &mut store).unwrap();

    tools.on_pointer(PointerEvent::Click(Point::new(0.2, 0.2)), &mut store);
    tools.on_pointer(PointerEvent::Click(Point::new(0.6, 0.2)), &mut store);
    tools.on_pointer(PointerEvent::Click(Point::new(0.4, 0.6)), &mut store);

    tools.select_tool(Tool::Select, &mut store).unwrap();
    tools.select_tool(Tool::CreatePolygon, &mut store).unwrap();

    assert_eq!(tools.on_key(Key::Enter, &mut store), GestureOutcome::Idle);
    assert!(store.state().regions.is_empty());
}

#[test]
fn rejected_tool_switch_keeps_the_gesture_alive() {
    let mut store = image_store();
    let mut tools = controller();
    tools.select_tool(Tool::CreatePolygon, &mut store).unwrap();

    tools.on_pointer(PointerEvent::Click(Point::new(0.2, 0.2)), &mut store);
    tools.on_pointer(PointerEvent::Click(Point::new(0.6, 0.2)), &mut store);
    tools.on_pointer(PointerEvent::Click(Point::new(0.4, 0.6)), &mut store);

    assert!(tools.select_tool(Tool::CreateTimeRange, &mut store).is_err());
    assert_eq!(store.state().tool, Tool::CreatePolygon);

    let out = tools.on_key(Key::Enter, &mut store);
    assert!(matches!(out, GestureOutcome::Committed(_)));
}

#[test]
fn select_click_picks_the_topmost_region() {
    let mut store = image_store();
    store.dispatch(Action::AddRegion(draft_box(0.1, 0.1, 0.4, 0.4))).unwrap();
    store.dispatch(Action::AddRegion(draft_box(0.2, 0.2, 0.4, 0.4))).unwrap();
    let top = store.state().regions[1].id;

    let mut tools = controller();
    let out = tools.on_pointer(PointerEvent::Click(Point::new(0.3, 0.3)), &mut store);

    assert_eq!(out, GestureOutcome::Selected(Some(top)));
    assert_eq!(store.state().selection, Some(top));
}

#[test]
fn select_click_on_empty_space_clears_the_selection() {
    let mut store = image_store();
    store.dispatch(Action::AddRegion(draft_box(0.1, 0.1, 0.2, 0.2))).unwrap();
    store
        .dispatch(Action::SelectRegion(Some(store.state().regions[0].id)))
        .unwrap();

    let mut tools = controller();
    let out = tools.on_pointer(PointerEvent::Click(Point::new(0.9, 0.9)), &mut store);

    assert_eq!(out, GestureOutcome::Selected(None));
    assert_eq!(store.state().selection, None);
}

#[test]
fn text_selection_commits_a_span() {
    let mut store = open_store(Modality::Text, text_item("doc", "hello world"));
    let mut tools = controller();
    tools.set_label("noun");
    tools.select_tool(Tool::CreateTextSpan, &mut store).unwrap();

    let out = tools.on_text_selection(6, 11, &mut store);
    let GestureOutcome::Committed(id) = out else {
        panic!("got {out:?}");
    };
    assert_eq!(
        store.state().region(id).unwrap().shape,
        Shape::TextSpan { start: 6, end: 11 }
    );

    // Ordered the same regardless of selection direction.
    let out = tools.on_text_selection(5, 0, &mut store);
    let GestureOutcome::Committed(id) = out else {
        panic!("got {out:?}");
    };
    assert_eq!(
        store.state().region(id).unwrap().shape,
        Shape::TextSpan { start: 0, end: 5 }
    );
}

#[test]
fn empty_or_overlong_text_selection_is_discarded() {
    let mut store = open_store(Modality::Text, text_item("doc", "hello world"));
    let mut tools = controller();
    tools.select_tool(Tool::CreateTextSpan, &mut store).unwrap();

    assert_eq!(tools.on_text_selection(4, 4, &mut store), GestureOutcome::Discarded);
    assert_eq!(tools.on_text_selection(6, 40, &mut store), GestureOutcome::Discarded);
    assert!(store.state().regions.is_empty());
}

#[test]
fn offset_click_selects_the_covering_span() {
    let mut store = open_store(Modality::Text, text_item("doc", "hello world"));
    store
        .dispatch(Action::AddRegion(labelbench::RegionDraft::new(
            Shape::TextSpan { start: 6, end: 11 },
            "noun",
        )))
        .unwrap();
    let id = store.state().regions[0].id;

    let mut tools = controller();
    assert_eq!(tools.on_offset_click(7, &mut store), GestureOutcome::Selected(Some(id)));
    assert_eq!(tools.on_offset_click(0, &mut store), GestureOutcome::Selected(None));
}

#[test]
fn time_drag_commits_a_range() {
    let mut store = open_store(Modality::Audio, audio_item("clip", 10_000));
    let mut tools = controller();
    tools.set_label("speech");
    tools.select_tool(Tool::CreateTimeRange, &mut store).unwrap();

    assert!(matches!(tools.on_time_press(1_000, &store), GestureOutcome::Preview(_)));
    assert_eq!(
        tools.on_time_move(2_500),
        GestureOutcome::Preview(Shape::TimeRange { start_ms: 1_000, end_ms: 2_500 })
    );

    let out = tools.on_time_release(3_000, &mut store);
    let GestureOutcome::Committed(id) = out else {
        panic!("got {out:?}");
    };
    assert_eq!(
        store.state().region(id).unwrap().shape,
        Shape::TimeRange { start_ms: 1_000, end_ms: 3_000 }
    );
}

#[test]
fn backwards_time_drag_swaps_the_edges() {
    let mut store = open_store(Modality::Audio, audio_item("clip", 10_000));
    let mut tools = controller();
    tools.select_tool(Tool::CreateTimeRange, &mut store).unwrap();

    tools.on_time_press(5_000, &store);
    let out = tools.on_time_release(2_000, &mut store);
    let GestureOutcome::Committed(id) = out else {
        panic!("got {out:?}");
    };
    assert_eq!(
        store.state().region(id).unwrap().shape,
        Shape::TimeRange { start_ms: 2_000, end_ms: 5_000 }
    );
}

#[test]
fn zero_length_time_drag_is_discarded() {
    let mut store = open_store(Modality::Audio, audio_item("clip", 10_000));
    let mut tools = controller();
    tools.select_tool(Tool::CreateTimeRange, &mut store).unwrap();

    tools.on_time_press(4_000, &store);
    assert_eq!(tools.on_time_release(4_000, &mut store), GestureOutcome::Discarded);
    assert!(store.state().regions.is_empty());
}

#[test]
fn spatial_pick_places_an_anchor_inside_the_unit_cube() {
    let mut store = open_store(Modality::ThreeD, scene_item("scene-0"));
    let mut tools = controller();
    tools.select_tool(Tool::CreateAnchor3d, &mut store).unwrap();

    let out = tools.on_spatial_pick(Point3::new(0.5, 0.5, 0.25), &mut store);
    assert!(matches!(out, GestureOutcome::Committed(_)));

    let out = tools.on_spatial_pick(Point3::new(0.5, 0.5, 1.5), &mut store);
    assert_eq!(out, GestureOutcome::Discarded);
    assert_eq!(store.state().regions.len(), 1);
}

#[test]
fn pointer_events_mean_nothing_to_incompatible_tools() {
    let mut store = open_store(Modality::Text, text_item("doc", "hello world"));
    let mut tools = controller();
    tools.select_tool(Tool::CreateTextSpan, &mut store).unwrap();

    let out = tools.on_pointer(PointerEvent::Press(Point::new(0.1, 0.1)), &mut store);
    assert_eq!(out, GestureOutcome::Idle);
    assert_eq!(tools.on_time_press(100, &store), GestureOutcome::Idle);
}
