//! Drawing callbacks for bbox creation.
//!
//! Handles: pointer_down, pointer_move, pointer_up, pointer_cancel

use super::{dispatch, SharedController, SharedSession};
use crate::AppWindow;
use slint::ComponentHandle;
use yolo_annotator::{Event, Point, PointerButton};

/// Sets up all drawing-related callbacks on the UI.
pub fn setup_drawing_callbacks(
    ui: &AppWindow,
    session: SharedSession,
    controller: SharedController,
) {
    setup_pointer_down(ui, session.clone(), controller.clone());
    setup_pointer_move(ui, session.clone(), controller.clone());
    setup_pointer_up(ui, session.clone(), controller.clone());
    setup_pointer_cancel(ui, session, controller);
}

fn setup_pointer_down(ui: &AppWindow, session: SharedSession, controller: SharedController) {
    let ui_weak = ui.as_weak();
    // Primary press starts a draw when it lands on the image.
    ui.on_pointer_down(move |x, y| {
        if let Some(ui) = ui_weak.upgrade() {
            let event = Event::PointerDown {
                position: Point::new(x as f64, y as f64),
                button: PointerButton::Primary,
            };
            dispatch(&ui, &session, &controller, event);
        }
    });
}

fn setup_pointer_move(ui: &AppWindow, session: SharedSession, controller: SharedController) {
    let ui_weak = ui.as_weak();
    ui.on_pointer_move(move |x, y| {
        if let Some(ui) = ui_weak.upgrade() {
            let event = Event::PointerMove {
                position: Point::new(x as f64, y as f64),
            };
            dispatch(&ui, &session, &controller, event);
        }
    });
}

fn setup_pointer_up(ui: &AppWindow, session: SharedSession, controller: SharedController) {
    let ui_weak = ui.as_weak();
    // Release commits the box; draws below the minimum size vanish silently.
    ui.on_pointer_up(move |x, y| {
        if let Some(ui) = ui_weak.upgrade() {
            let event = Event::PointerUp {
                position: Point::new(x as f64, y as f64),
                button: PointerButton::Primary,
            };
            dispatch(&ui, &session, &controller, event);
        }
    });
}

fn setup_pointer_cancel(ui: &AppWindow, session: SharedSession, controller: SharedController) {
    let ui_weak = ui.as_weak();
    ui.on_pointer_cancel(move || {
        if let Some(ui) = ui_weak.upgrade() {
            dispatch(&ui, &session, &controller, Event::PointerCancel);
        }
    });
}
