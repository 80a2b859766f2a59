//! Window refresh helpers.
//!
//! The window holds no annotation state of its own. After every change the
//! affected models are rebuilt from the session.

use crate::utils::{parse_color, to_slint_image};
use crate::{AnnotationRow, AppWindow, BoxItem, ClassItem};
use slint::{Color, ModelRc, VecModel};
use yolo_annotator::{ClassTable, InteractionController, Session};

fn class_color(classes: &ClassTable, class_id: usize) -> Color {
    parse_color(classes.color(class_id)).unwrap_or(Color::from_rgb_u8(128, 128, 128))
}

/// Push everything: image, boxes, classes, and counters.
pub fn refresh_all(ui: &AppWindow, session: &Session, controller: &InteractionController) {
    refresh_image(ui, session);
    refresh_annotations(ui, session);
    refresh_classes(ui, session, controller);
    refresh_preview(ui, controller);
}

pub fn refresh_image(ui: &AppWindow, session: &Session) {
    let frame = session.frame();
    ui.set_image_source(to_slint_image(&frame.pixels));
    ui.set_image_width(frame.width() as f32);
    ui.set_image_height(frame.height() as f32);
    ui.set_current_image_name(format!("File: {}", session.current_image_name()).into());
    ui.set_image_size_text(format!("Size: {} × {}", frame.width(), frame.height()).into());
    ui.set_dataset_position(format!("{} / {}", session.index() + 1, session.len()).into());
    ui.set_progress_text(format!("Progress: {}%", session.progress_percent()).into());
}

pub fn refresh_annotations(ui: &AppWindow, session: &Session) {
    let classes = session.classes();
    let annotations = session.annotations();
    let frame = session.frame();
    let (w, h) = (frame.width() as f64, frame.height() as f64);

    let boxes: Vec<BoxItem> = annotations
        .iter()
        .map(|b| BoxItem {
            x: b.x_min as f32,
            y: b.y_min as f32,
            width: b.width() as f32,
            height: b.height() as f32,
            label: classes.display_name(b.class_id).into(),
            color: class_color(classes, b.class_id),
        })
        .collect();

    let rows: Vec<AnnotationRow> = annotations
        .iter()
        .enumerate()
        .map(|(i, b)| {
            let cx = (b.x_min + b.x_max) / (2.0 * w);
            let cy = (b.y_min + b.y_max) / (2.0 * h);
            AnnotationRow {
                text: format!(
                    "{}. {} ({cx:.3}, {cy:.3}, {:.3}, {:.3})",
                    i + 1,
                    classes.display_name(b.class_id),
                    b.width() / w,
                    b.height() / h
                )
                .into(),
                color: class_color(classes, b.class_id),
            }
        })
        .collect();

    ui.set_boxes(ModelRc::new(VecModel::from(boxes)));
    ui.set_annotation_rows(ModelRc::new(VecModel::from(rows)));
    ui.set_total_text(
        format!(
            "Annotations: {}   Total: {}",
            annotations.len(),
            session.total_annotations()
        )
        .into(),
    );
}

pub fn refresh_classes(ui: &AppWindow, session: &Session, controller: &InteractionController) {
    let classes = session.classes();
    let active = controller.active_class();

    let items: Vec<ClassItem> = classes
        .names()
        .iter()
        .enumerate()
        .map(|(id, name)| ClassItem {
            name: format!("{id}: {name}").into(),
            color: class_color(classes, id),
            active: id == active,
        })
        .collect();

    ui.set_class_items(ModelRc::new(VecModel::from(items)));
    ui.set_current_class_name(classes.display_name(active).into());
    ui.set_current_class_color(class_color(classes, active));
}

pub fn refresh_preview(ui: &AppWindow, controller: &InteractionController) {
    match controller.preview() {
        Some(preview) => {
            ui.set_show_preview(true);
            ui.set_preview_x(preview.x_min as f32);
            ui.set_preview_y(preview.y_min as f32);
            ui.set_preview_width(preview.width() as f32);
            ui.set_preview_height(preview.height() as f32);
        }
        None => ui.set_show_preview(false),
    }
}

pub fn set_status(ui: &AppWindow, message: impl Into<String>) {
    let message = message.into();
    ui.set_status_text(message.into());
}
