//! Callback handlers for the annotator window.
//!
//! - `view` - pushes session state into the window properties
//! - `drawing` - primary-button drag to draw boxes
//! - `annotation` - delete and reclassify gestures on existing boxes
//! - `navigation` - keyboard commands, image paging, save and quit

pub mod annotation;
pub mod drawing;
pub mod navigation;
pub mod view;

use crate::AppWindow;
use slint::ComponentHandle;
use std::cell::RefCell;
use std::rc::Rc;
use yolo_annotator::{Event, InteractionController, KeyCommand, Response, Session};

pub type SharedSession = Rc<RefCell<Session>>;
pub type SharedController = Rc<RefCell<InteractionController>>;

/// Sets up every callback on the window.
pub fn setup_callbacks(ui: &AppWindow, session: SharedSession, controller: SharedController) {
    drawing::setup_drawing_callbacks(ui, session.clone(), controller.clone());
    annotation::setup_annotation_callbacks(ui, session.clone(), controller.clone());
    navigation::setup_navigation_callbacks(ui, session.clone(), controller);
    setup_settings_callbacks(ui, session);
}

fn setup_settings_callbacks(ui: &AppWindow, session: SharedSession) {
    let ui_weak = ui.as_weak();
    ui.on_min_size_changed(move |value| {
        let min_size = value.max(1) as f64;
        session.borrow_mut().set_min_size(min_size);
        log::debug!("Minimum box size set to {min_size}");
        if let Some(ui) = ui_weak.upgrade() {
            view::set_status(&ui, format!("Minimum box size: {min_size} px"));
        }
    });
}

/// Run one event through the controller and reflect the outcome in the window.
pub fn dispatch(
    ui: &AppWindow,
    session: &SharedSession,
    controller: &SharedController,
    event: Event,
) -> Response {
    let response = {
        let mut session = session.borrow_mut();
        let mut editor = session.editor();
        controller.borrow_mut().handle(event, &mut editor)
    };
    if response == Response::Ignored && is_edit_attempt(&event) {
        if let Some(e) = session.borrow().label_error() {
            view::set_status(ui, format!("Read-only image: {e}"));
        }
    }
    apply_response(ui, session, controller, &response);
    response
}

fn is_edit_attempt(event: &Event) -> bool {
    matches!(
        event,
        Event::PointerDown { .. } | Event::Wheel { .. } | Event::Key(KeyCommand::ClearAll)
    )
}

fn apply_response(
    ui: &AppWindow,
    session: &SharedSession,
    controller: &SharedController,
    response: &Response,
) {
    match response {
        Response::Ignored => {}
        Response::DrawStarted | Response::Preview(_) | Response::Discarded => {
            view::refresh_preview(ui, &controller.borrow());
        }
        Response::Added(index) => {
            view::refresh_preview(ui, &controller.borrow());
            let session = session.borrow();
            if let Some(bbox) = session.annotations().boxes().get(*index) {
                let name = session.classes().display_name(bbox.class_id);
                view::set_status(ui, format!("Added {name} box"));
            }
            view::refresh_annotations(ui, &session);
        }
        Response::Removed(bbox) => {
            let session = session.borrow();
            let name = session.classes().display_name(bbox.class_id);
            view::set_status(ui, format!("Deleted {name} box"));
            view::refresh_annotations(ui, &session);
        }
        Response::Reclassified { class_id, .. } => {
            let session = session.borrow();
            let name = session.classes().display_name(*class_id);
            view::set_status(ui, format!("Box reclassified to {name}"));
            view::refresh_annotations(ui, &session);
        }
        Response::ClearPending(count) => {
            view::set_status(ui, format!("Press Delete again to clear {count} boxes"));
        }
        Response::Cleared(count) => {
            view::set_status(ui, format!("Cleared {count} boxes"));
            view::refresh_annotations(ui, &session.borrow());
        }
        Response::ActiveClassChanged(_) => {
            view::refresh_classes(ui, &session.borrow(), &controller.borrow());
        }
        Response::Navigate(request) => {
            navigation::navigate(ui, session, controller, *request);
        }
        Response::SaveRequested => {
            navigation::save(ui, &session.borrow());
        }
        Response::Quit => {
            if let Err(e) = slint::quit_event_loop() {
                log::error!("Failed to stop the event loop: {e}");
            }
        }
    }
}
