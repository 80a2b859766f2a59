//! Annotation manipulation callbacks.
//!
//! Handles: delete (right click), reclassify (middle click, wheel)

use super::{dispatch, SharedController, SharedSession};
use crate::AppWindow;
use slint::ComponentHandle;
use yolo_annotator::{Event, Point, PointerButton};

/// Sets up all annotation manipulation callbacks on the UI.
pub fn setup_annotation_callbacks(
    ui: &AppWindow,
    session: SharedSession,
    controller: SharedController,
) {
    setup_delete_at(ui, session.clone(), controller.clone());
    setup_classify_at(ui, session.clone(), controller.clone());
    setup_wheel_classify(ui, session, controller);
}

fn setup_delete_at(ui: &AppWindow, session: SharedSession, controller: SharedController) {
    let ui_weak = ui.as_weak();
    // Right click: remove the topmost box under the cursor.
    ui.on_secondary_click(move |x, y| {
        if let Some(ui) = ui_weak.upgrade() {
            let event = Event::PointerDown {
                position: Point::new(x as f64, y as f64),
                button: PointerButton::Secondary,
            };
            dispatch(&ui, &session, &controller, event);
        }
    });
}

fn setup_classify_at(ui: &AppWindow, session: SharedSession, controller: SharedController) {
    let ui_weak = ui.as_weak();
    ui.on_tertiary_click(move |x, y| {
        if let Some(ui) = ui_weak.upgrade() {
            let event = Event::PointerDown {
                position: Point::new(x as f64, y as f64),
                button: PointerButton::Tertiary,
            };
            dispatch(&ui, &session, &controller, event);
        }
    });
}

fn setup_wheel_classify(ui: &AppWindow, session: SharedSession, controller: SharedController) {
    let ui_weak = ui.as_weak();
    // Scrolling up steps the box to the next class, down to the previous one.
    ui.on_wheel(move |x, y, delta| {
        if let Some(ui) = ui_weak.upgrade() {
            let event = Event::Wheel {
                position: Point::new(x as f64, y as f64),
                delta: delta as f64,
            };
            dispatch(&ui, &session, &controller, event);
        }
    });
}
