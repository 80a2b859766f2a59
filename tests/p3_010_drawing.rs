// P3-010: Drawing boxes with the pointer
// Test: Drive press/move/release through the interaction controller
// Expected: Box added on release with the active class, small drags discarded

use yolo_annotator::controller::{ControllerState, ImageBounds};
use yolo_annotator::{
    AnnotationSet, BoundingBox, ClassTable, Editor, Event, InteractionController, KeyCommand,
    Point, PointerButton, Response,
};

const BOUNDS: ImageBounds = ImageBounds {
    width: 200.0,
    height: 100.0,
};

fn down(x: f64, y: f64) -> Event {
    Event::PointerDown {
        position: Point::new(x, y),
        button: PointerButton::Primary,
    }
}

fn moved(x: f64, y: f64) -> Event {
    Event::PointerMove {
        position: Point::new(x, y),
    }
}

fn up(x: f64, y: f64) -> Event {
    Event::PointerUp {
        position: Point::new(x, y),
        button: PointerButton::Primary,
    }
}

fn drag(
    controller: &mut InteractionController,
    editor: &mut Editor<'_>,
    from: (f64, f64),
    to: (f64, f64),
) -> Response {
    controller.handle(down(from.0, from.1), editor);
    controller.handle(moved(to.0, to.1), editor);
    controller.handle(up(to.0, to.1), editor)
}

#[test]
fn press_move_release_adds_box() {
    let classes = ClassTable::parse("person\ncar\n");
    let mut set = AnnotationSet::default();
    let mut editor = Editor {
        annotations: &mut set,
        classes: &classes,
        bounds: BOUNDS,
        read_only: false,
    };
    let mut controller = InteractionController::new();

    assert_eq!(controller.handle(down(10.0, 10.0), &mut editor), Response::DrawStarted);
    assert!(matches!(controller.state(), ControllerState::Drawing { .. }));

    assert_eq!(
        controller.handle(moved(30.0, 40.0), &mut editor),
        Response::Preview(BoundingBox::new(0, 10.0, 10.0, 30.0, 40.0))
    );
    assert_eq!(controller.handle(up(50.0, 60.0), &mut editor), Response::Added(0));
    assert_eq!(controller.state(), ControllerState::Idle);

    assert_eq!(set.boxes(), [BoundingBox::new(0, 10.0, 10.0, 50.0, 60.0)]);
}

#[test]
fn preview_does_not_touch_the_set() {
    let classes = ClassTable::default();
    let mut set = AnnotationSet::default();
    let mut editor = Editor {
        annotations: &mut set,
        classes: &classes,
        bounds: BOUNDS,
        read_only: false,
    };
    let mut controller = InteractionController::new();

    controller.handle(down(10.0, 10.0), &mut editor);
    controller.handle(moved(80.0, 70.0), &mut editor);

    assert_eq!(
        controller.preview(),
        Some(BoundingBox::new(0, 10.0, 10.0, 80.0, 70.0))
    );
    assert!(editor.annotations.is_empty());
}

#[test]
fn reversed_drag_is_normalized() {
    let classes = ClassTable::default();
    let mut set = AnnotationSet::default();
    let mut editor = Editor {
        annotations: &mut set,
        classes: &classes,
        bounds: BOUNDS,
        read_only: false,
    };
    let mut controller = InteractionController::new();

    drag(&mut controller, &mut editor, (50.0, 60.0), (10.0, 10.0));

    assert_eq!(set.boxes(), [BoundingBox::new(0, 10.0, 10.0, 50.0, 60.0)]);
}

#[test]
fn drag_below_minimum_size_is_discarded() {
    let classes = ClassTable::default();
    let mut set = AnnotationSet::new(10.0);
    let mut editor = Editor {
        annotations: &mut set,
        classes: &classes,
        bounds: BOUNDS,
        read_only: false,
    };
    let mut controller = InteractionController::new();

    let response = drag(&mut controller, &mut editor, (10.0, 10.0), (15.0, 40.0));

    assert_eq!(response, Response::Discarded);
    assert_eq!(controller.state(), ControllerState::Idle);
    assert!(set.is_empty());
}

#[test]
fn press_outside_image_is_ignored() {
    let classes = ClassTable::default();
    let mut set = AnnotationSet::default();
    let mut editor = Editor {
        annotations: &mut set,
        classes: &classes,
        bounds: BOUNDS,
        read_only: false,
    };
    let mut controller = InteractionController::new();

    assert_eq!(controller.handle(down(250.0, 20.0), &mut editor), Response::Ignored);
    assert_eq!(controller.state(), ControllerState::Idle);
    assert_eq!(controller.handle(up(40.0, 40.0), &mut editor), Response::Ignored);
    assert!(set.is_empty());
}

#[test]
fn release_outside_image_is_clamped() {
    let classes = ClassTable::default();
    let mut set = AnnotationSet::default();
    let mut editor = Editor {
        annotations: &mut set,
        classes: &classes,
        bounds: BOUNDS,
        read_only: false,
    };
    let mut controller = InteractionController::new();

    drag(&mut controller, &mut editor, (150.0, 50.0), (400.0, -30.0));

    assert_eq!(set.boxes(), [BoundingBox::new(0, 150.0, 0.0, 200.0, 50.0)]);
}

#[test]
fn move_while_idle_is_ignored() {
    let classes = ClassTable::default();
    let mut set = AnnotationSet::default();
    let mut editor = Editor {
        annotations: &mut set,
        classes: &classes,
        bounds: BOUNDS,
        read_only: false,
    };
    let mut controller = InteractionController::new();

    assert_eq!(controller.handle(moved(30.0, 30.0), &mut editor), Response::Ignored);
    assert_eq!(controller.preview(), None);
}

#[test]
fn cancel_abandons_draw() {
    let classes = ClassTable::default();
    let mut set = AnnotationSet::default();
    let mut editor = Editor {
        annotations: &mut set,
        classes: &classes,
        bounds: BOUNDS,
        read_only: false,
    };
    let mut controller = InteractionController::new();

    controller.handle(down(10.0, 10.0), &mut editor);
    controller.handle(moved(90.0, 90.0), &mut editor);
    assert_eq!(controller.handle(Event::PointerCancel, &mut editor), Response::Discarded);
    assert_eq!(controller.handle(up(90.0, 90.0), &mut editor), Response::Ignored);

    assert!(editor.annotations.is_empty());
    assert_eq!(controller.handle(Event::PointerCancel, &mut editor), Response::Ignored);
}

#[test]
fn active_class_applies_to_later_boxes_only() {
    let classes = ClassTable::parse("person\ncar\n");
    let mut set = AnnotationSet::default();
    let mut editor = Editor {
        annotations: &mut set,
        classes: &classes,
        bounds: BOUNDS,
        read_only: false,
    };
    let mut controller = InteractionController::new();

    drag(&mut controller, &mut editor, (10.0, 10.0), (50.0, 50.0));
    assert_eq!(
        controller.handle(Event::Key(KeyCommand::NextClass), &mut editor),
        Response::ActiveClassChanged(1)
    );
    drag(&mut controller, &mut editor, (100.0, 10.0), (150.0, 50.0));

    assert_eq!(controller.active_class(), 1);
    let ids: Vec<usize> = set.iter().map(|b| b.class_id).collect();
    assert_eq!(ids, [0, 1]);
}
