// P4-020: Annotate, navigate, come back
// Test: Draw on img1 through the controller, page to img2 and back
// Expected: img1.txt holds the normalized box, img2.txt is created empty

mod common;

use std::fs;

use common::{assert_close, create_dataset, label_path, read_label};
use yolo_annotator::codec;
use yolo_annotator::controller::NavRequest;
use yolo_annotator::{
    Event, InteractionController, KeyCommand, Point, PointerButton, Response, Session,
    SessionOptions, Transition,
};

const WIDTH: u32 = 320;
const HEIGHT: u32 = 240;

fn open_pair() -> (tempfile::TempDir, Session) {
    let dir = create_dataset(
        &[("img1.jpg", WIDTH, HEIGHT), ("img2.jpg", WIDTH, HEIGHT)],
        &["person", "car"],
    );
    let session = Session::open(dir.path(), SessionOptions { min_size: 10.0 }).unwrap();
    (dir, session)
}

fn press(controller: &mut InteractionController, session: &mut Session, event: Event) -> Response {
    controller.handle(event, &mut session.editor())
}

/// Route a key through the controller and perform any navigation it asks for.
fn key(
    controller: &mut InteractionController,
    session: &mut Session,
    command: KeyCommand,
) -> Transition {
    match press(controller, session, Event::Key(command)) {
        Response::Navigate(NavRequest::Next) => session.next().unwrap(),
        Response::Navigate(NavRequest::Prev) => session.prev().unwrap(),
        other => panic!("expected navigation, got {other:?}"),
    }
}

#[test]
fn annotate_first_image_then_revisit() {
    let (dir, mut session) = open_pair();
    let mut controller = InteractionController::new();
    assert_eq!(session.classes().names(), ["person", "car"]);

    press(
        &mut controller,
        &mut session,
        Event::PointerDown {
            position: Point::new(10.0, 10.0),
            button: PointerButton::Primary,
        },
    );
    press(
        &mut controller,
        &mut session,
        Event::PointerMove {
            position: Point::new(50.0, 60.0),
        },
    );
    let added = press(
        &mut controller,
        &mut session,
        Event::PointerUp {
            position: Point::new(50.0, 60.0),
            button: PointerButton::Primary,
        },
    );
    assert_eq!(added, Response::Added(0));

    assert_eq!(
        key(&mut controller, &mut session, KeyCommand::NextImage),
        Transition::Moved { from: 0, to: 1 }
    );

    let img1 = read_label(dir.path(), "img1");
    let lines: Vec<&str> = img1.lines().collect();
    assert_eq!(lines.len(), 1);
    let record = codec::parse_record(lines[0]).unwrap();
    let (w, h) = (WIDTH as f64, HEIGHT as f64);
    assert_eq!(record.class_id, 0);
    assert_close(record.x_center, (10.0 + 50.0) / (2.0 * w), 1e-6);
    assert_close(record.y_center, (10.0 + 60.0) / (2.0 * h), 1e-6);
    assert_close(record.width, 40.0 / w, 1e-6);
    assert_close(record.height, 50.0 / h, 1e-6);

    assert_eq!(
        key(&mut controller, &mut session, KeyCommand::PrevImage),
        Transition::Moved { from: 1, to: 0 }
    );

    let img2 = label_path(dir.path(), "img2");
    assert!(img2.exists());
    assert_eq!(fs::metadata(&img2).unwrap().len(), 0);

    let restored = session.annotations().boxes();
    assert_eq!(restored.len(), 1);
    assert_eq!(restored[0].class_id, 0);
    assert_close(restored[0].x_min, 10.0, 1e-3);
    assert_close(restored[0].y_min, 10.0, 1e-3);
    assert_close(restored[0].x_max, 50.0, 1e-3);
    assert_close(restored[0].y_max, 60.0, 1e-3);
}

#[test]
fn quitting_saves_the_image_on_screen() {
    let (dir, mut session) = open_pair();
    let mut controller = InteractionController::new();

    key(&mut controller, &mut session, KeyCommand::NextImage);
    assert_eq!(
        press(&mut controller, &mut session, Event::Key(KeyCommand::Quit)),
        Response::Quit
    );
    session.terminate().unwrap();

    // Leaving img1 and quitting on img2 both write label files, empty or not.
    assert_eq!(read_label(dir.path(), "img1"), "");
    assert_eq!(read_label(dir.path(), "img2"), "");
}

#[test]
fn reclassified_box_is_saved_with_new_class() {
    let (dir, mut session) = open_pair();
    let mut controller = InteractionController::new();

    press(
        &mut controller,
        &mut session,
        Event::PointerDown {
            position: Point::new(100.0, 100.0),
            button: PointerButton::Primary,
        },
    );
    press(
        &mut controller,
        &mut session,
        Event::PointerUp {
            position: Point::new(200.0, 180.0),
            button: PointerButton::Primary,
        },
    );
    let response = press(
        &mut controller,
        &mut session,
        Event::PointerDown {
            position: Point::new(150.0, 150.0),
            button: PointerButton::Tertiary,
        },
    );
    assert_eq!(response, Response::Reclassified { index: 0, class_id: 1 });

    session.save_current().unwrap();

    let text = read_label(dir.path(), "img1");
    assert!(text.starts_with("1 "), "{text:?}");
}
