//! Keyboard commands and image traversal.
//!
//! Handles: key input, next/prev image, explicit save

use super::{dispatch, view, SharedController, SharedSession};
use crate::AppWindow;
use slint::ComponentHandle;
use yolo_annotator::controller::NavRequest;
use yolo_annotator::{Event, KeyCommand, Session, Transition};

/// Sets up all navigation-related callbacks on the UI.
pub fn setup_navigation_callbacks(
    ui: &AppWindow,
    session: SharedSession,
    controller: SharedController,
) {
    let ui_weak = ui.as_weak();
    ui.on_key_input(move |key| {
        let Some(command) = KeyCommand::from_key_name(key.as_str()) else {
            return false;
        };
        if let Some(ui) = ui_weak.upgrade() {
            dispatch(&ui, &session, &controller, Event::Key(command));
        }
        true
    });
}

/// Page to the neighbouring image. The current labels are saved first; on any
/// failure the window keeps showing the current image.
pub fn navigate(
    ui: &AppWindow,
    session: &SharedSession,
    controller: &SharedController,
    request: NavRequest,
) {
    let result = {
        let mut session = session.borrow_mut();
        match request {
            NavRequest::Next => session.next(),
            NavRequest::Prev => session.prev(),
        }
    };

    match result {
        Ok(Transition::Moved { .. }) => {
            let session = session.borrow();
            let mut controller = controller.borrow_mut();
            controller.reset();
            view::refresh_all(ui, &session, &controller);
            match session.label_error() {
                Some(e) => view::set_status(ui, format!("Read-only image: {e}")),
                None => view::set_status(ui, format!("Loaded {}", session.current_image_name())),
            }
        }
        Ok(Transition::Stayed) => {
            let edge = match request {
                NavRequest::Next => "last",
                NavRequest::Prev => "first",
            };
            view::set_status(ui, format!("Already at the {edge} image"));
        }
        Err(e) => {
            log::error!("Navigation failed: {e}");
            view::set_status(ui, format!("Navigation failed: {e}"));
        }
    }
}

pub fn save(ui: &AppWindow, session: &Session) {
    match session.save_current() {
        Ok(path) => {
            log::info!("Saved {}", path.display());
            view::set_status(ui, format!("Saved {}", path.display()));
            view::refresh_annotations(ui, session);
        }
        Err(e) => {
            log::error!("Save failed: {e}");
            view::set_status(ui, format!("Save failed: {e}"));
        }
    }
}
