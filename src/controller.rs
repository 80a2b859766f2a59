//! Pointer and keyboard handling for the canvas.
//!
//! The controller is an explicit two-state machine. Drawing a box is
//! `Idle -> Drawing -> Idle`; delete and reclassify gestures only apply while
//! idle. Navigation and quit are reported back to the caller, which owns the
//! session. A read-only editor accepts navigation and class keys but no edits.
//! Clearing an image takes two consecutive presses of the clear key.

use crate::classes::ClassTable;
use crate::error::Error;
use crate::state::{AnnotationSet, BoundingBox, Point};

/// Image extent the controller clamps pointer positions to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageBounds {
    pub width: f64,
    pub height: f64,
}

/// Everything one event may touch: the current image's boxes and the class list.
pub struct Editor<'a> {
    pub annotations: &'a mut AnnotationSet,
    pub classes: &'a ClassTable,
    pub bounds: ImageBounds,
    /// Set when the image's labels could not be loaded.
    pub read_only: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControllerState {
    Idle,
    Drawing { anchor: Point, current: Point },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Tertiary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    NextImage,
    PrevImage,
    NextClass,
    PrevClass,
    ClearAll,
    Save,
    Quit,
}

impl KeyCommand {
    /// Map a key name from the UI (`"d"`, `"right"`, `"escape"`, ...) to a command.
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "d" | "right" => Some(KeyCommand::NextImage),
            "a" | "left" => Some(KeyCommand::PrevImage),
            "s" | "down" => Some(KeyCommand::NextClass),
            "w" | "up" => Some(KeyCommand::PrevClass),
            "delete" => Some(KeyCommand::ClearAll),
            "space" | " " => Some(KeyCommand::Save),
            "q" | "escape" => Some(KeyCommand::Quit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    PointerDown { position: Point, button: PointerButton },
    PointerMove { position: Point },
    PointerUp { position: Point, button: PointerButton },
    PointerCancel,
    Wheel { position: Point, delta: f64 },
    Key(KeyCommand),
}

/// Navigation the caller should perform on the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavRequest {
    Next,
    Prev,
}

/// Outcome of one event.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Ignored,
    DrawStarted,
    Preview(BoundingBox),
    Added(usize),
    /// A draw below the minimum size, dropped without creating a box.
    Discarded,
    Removed(BoundingBox),
    Reclassified { index: usize, class_id: usize },
    /// First clear press; a second one removes this many boxes.
    ClearPending(usize),
    Cleared(usize),
    ActiveClassChanged(usize),
    Navigate(NavRequest),
    SaveRequested,
    Quit,
}

impl Response {
    /// Whether the set of boxes changed.
    pub fn mutated(&self) -> bool {
        matches!(
            self,
            Response::Added(_)
                | Response::Removed(_)
                | Response::Reclassified { .. }
                | Response::Cleared(_)
        )
    }
}

#[derive(Debug, Clone)]
pub struct InteractionController {
    state: ControllerState,
    active_class: usize,
    clear_pending: bool,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionController {
    pub fn new() -> Self {
        Self {
            state: ControllerState::Idle,
            active_class: 0,
            clear_pending: false,
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Class id given to newly drawn boxes.
    pub fn active_class(&self) -> usize {
        self.active_class
    }

    /// Rectangle between the anchor and the pointer while drawing.
    pub fn preview(&self) -> Option<BoundingBox> {
        match self.state {
            ControllerState::Drawing { anchor, current } => {
                Some(BoundingBox::from_corners(self.active_class, anchor, current))
            }
            ControllerState::Idle => None,
        }
    }

    /// Abandon any draw in progress, e.g. when the image changes underneath.
    pub fn reset(&mut self) {
        self.state = ControllerState::Idle;
        self.clear_pending = false;
    }

    pub fn handle(&mut self, event: Event, editor: &mut Editor<'_>) -> Response {
        // Pointer motion and releases leave a pending clear armed.
        if matches!(event, Event::PointerDown { .. } | Event::Key(_)) {
            let armed = std::mem::take(&mut self.clear_pending);
            if armed && event == Event::Key(KeyCommand::ClearAll) {
                return self.clear_confirmed(editor);
            }
        }

        match event {
            Event::PointerDown { position, button } => self.pointer_down(position, button, editor),
            Event::PointerMove { position } => self.pointer_move(position, editor.bounds),
            Event::PointerUp { position, button } => self.pointer_up(position, button, editor),
            Event::PointerCancel => {
                if matches!(self.state, ControllerState::Drawing { .. }) {
                    self.state = ControllerState::Idle;
                    Response::Discarded
                } else {
                    Response::Ignored
                }
            }
            Event::Wheel { position, delta } => {
                if delta == 0.0 || editor.read_only {
                    return Response::Ignored;
                }
                let step = if delta > 0.0 { 1 } else { -1 };
                self.reclassify(position, step, editor)
            }
            Event::Key(command) => self.key(command, editor),
        }
    }

    fn pointer_down(
        &mut self,
        position: Point,
        button: PointerButton,
        editor: &mut Editor<'_>,
    ) -> Response {
        if self.state != ControllerState::Idle || editor.read_only {
            return Response::Ignored;
        }

        match button {
            PointerButton::Primary => {
                if !position.is_within(editor.bounds.width, editor.bounds.height) {
                    return Response::Ignored;
                }
                self.state = ControllerState::Drawing {
                    anchor: position,
                    current: position,
                };
                Response::DrawStarted
            }
            PointerButton::Secondary => match editor.annotations.remove_at(position) {
                Some(removed) => Response::Removed(removed),
                None => {
                    log::debug!("No box under ({:.0}, {:.0}) to delete", position.x, position.y);
                    Response::Ignored
                }
            },
            PointerButton::Tertiary => self.reclassify(position, 1, editor),
        }
    }

    fn pointer_move(&mut self, position: Point, bounds: ImageBounds) -> Response {
        let ControllerState::Drawing { anchor, .. } = self.state else {
            return Response::Ignored;
        };
        let current = position.clamped(bounds.width, bounds.height);
        self.state = ControllerState::Drawing { anchor, current };
        Response::Preview(BoundingBox::from_corners(self.active_class, anchor, current))
    }

    fn pointer_up(
        &mut self,
        position: Point,
        button: PointerButton,
        editor: &mut Editor<'_>,
    ) -> Response {
        let ControllerState::Drawing { anchor, .. } = self.state else {
            return Response::Ignored;
        };
        if button != PointerButton::Primary {
            return Response::Ignored;
        }
        self.state = ControllerState::Idle;

        let end = position.clamped(editor.bounds.width, editor.bounds.height);
        let bbox = BoundingBox::from_corners(self.active_class, anchor, end);
        match editor.annotations.add(bbox) {
            Ok(index) => Response::Added(index),
            Err(Error::BelowMinimumSize { width, height, min_size }) => {
                log::debug!("Discarded {width:.1}x{height:.1} draw (minimum {min_size})");
                Response::Discarded
            }
            Err(e) => {
                log::warn!("Draw rejected: {e}");
                Response::Discarded
            }
        }
    }

    fn clear_confirmed(&mut self, editor: &mut Editor<'_>) -> Response {
        if matches!(self.state, ControllerState::Drawing { .. }) || editor.read_only {
            return Response::Ignored;
        }
        Response::Cleared(editor.annotations.clear())
    }

    fn reclassify(&mut self, position: Point, step: isize, editor: &mut Editor<'_>) -> Response {
        if self.state != ControllerState::Idle {
            return Response::Ignored;
        }
        let Some(index) = editor.annotations.topmost_at(position) else {
            return Response::Ignored;
        };
        let current = editor.annotations.boxes()[index].class_id;
        let class_id = editor.classes.cycle(current, step);
        match editor.annotations.reclassify_at(position, class_id) {
            Some(index) => Response::Reclassified { index, class_id },
            None => Response::Ignored,
        }
    }

    fn key(&mut self, command: KeyCommand, editor: &mut Editor<'_>) -> Response {
        match command {
            KeyCommand::NextImage => Response::Navigate(NavRequest::Next),
            KeyCommand::PrevImage => Response::Navigate(NavRequest::Prev),
            KeyCommand::NextClass => {
                self.active_class = editor.classes.cycle(self.active_class, 1);
                Response::ActiveClassChanged(self.active_class)
            }
            KeyCommand::PrevClass => {
                self.active_class = editor.classes.cycle(self.active_class, -1);
                Response::ActiveClassChanged(self.active_class)
            }
            KeyCommand::ClearAll => {
                if matches!(self.state, ControllerState::Drawing { .. })
                    || editor.read_only
                    || editor.annotations.is_empty()
                {
                    return Response::Ignored;
                }
                self.clear_pending = true;
                Response::ClearPending(editor.annotations.len())
            }
            KeyCommand::Save => Response::SaveRequested,
            KeyCommand::Quit => {
                self.state = ControllerState::Idle;
                Response::Quit
            }
        }
    }
}
