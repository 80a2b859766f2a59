slint::include_modules!();

mod callbacks;
mod utils;

use anyhow::Context;
use clap::Parser;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use yolo_annotator::config;
use yolo_annotator::{InteractionController, Session, SessionOptions};

#[derive(Parser)]
#[command(name = "yolo-annotator")]
#[command(about = "Draw YOLO bounding boxes over a folder of images")]
struct Cli {
    /// Dataset folder holding the images and classes.txt
    #[arg(value_name = "DATASET")]
    dataset: Option<PathBuf>,

    /// Box border thickness in screen pixels
    #[arg(long, value_name = "PX")]
    thickness: Option<u32>,

    /// Smallest accepted box side in image pixels
    #[arg(long, value_name = "PX")]
    min_size: Option<u32>,

    /// Hide the crosshair over the canvas
    #[arg(long)]
    no_crosshair: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut app_config = config::load_config();

    // Fall back to a folder picker when no dataset was given.
    let dataset_dir = match cli.dataset {
        Some(dir) => dir,
        None => {
            let picked = rfd::FileDialog::new()
                .set_title("Select dataset folder")
                .pick_folder();
            match picked {
                Some(dir) => dir,
                None => {
                    log::info!("No dataset selected");
                    return Ok(());
                }
            }
        }
    };

    let thickness = cli.thickness.unwrap_or(app_config.appearance.box_thickness);
    let min_size = cli.min_size.unwrap_or(app_config.annotation.min_box_size);
    let show_crosshair = !cli.no_crosshair && app_config.appearance.show_crosshair;

    let session = Session::open(
        &dataset_dir,
        SessionOptions {
            min_size: min_size as f64,
        },
    )
    .with_context(|| format!("failed to open dataset {}", dataset_dir.display()))?;

    let ui = AppWindow::new()?;
    ui.set_box_thickness(thickness as i32);
    ui.set_min_box_size(min_size as i32);
    ui.set_show_crosshair(show_crosshair);

    let session = Rc::new(RefCell::new(session));
    let controller = Rc::new(RefCell::new(InteractionController::new()));

    callbacks::setup_callbacks(&ui, session.clone(), controller.clone());
    callbacks::view::refresh_all(&ui, &session.borrow(), &controller.borrow());
    match session.borrow().label_error() {
        Some(e) => callbacks::view::set_status(&ui, format!("Read-only image: {e}")),
        None => callbacks::view::set_status(&ui, format!("Opened {}", dataset_dir.display())),
    }

    ui.run()?;

    // Window closed or quit requested: the current image is saved unless read-only.
    if let Err(e) = session.borrow_mut().terminate() {
        log::error!("Failed to save labels on exit: {e}");
    }

    // Thickness and minimum size may have been changed from the window.
    app_config.appearance.box_thickness = ui.get_box_thickness().max(1) as u32;
    app_config.annotation.min_box_size = session.borrow().min_size() as u32;
    config::add_recent_dataset(&mut app_config, dataset_dir.display().to_string());
    if let Err(e) = config::save_config(&app_config) {
        log::warn!("Failed to save settings: {e}");
    }

    Ok(())
}
