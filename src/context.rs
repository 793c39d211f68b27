//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::leptos_dom::helpers::{request_animation_frame, set_timeout_with_handle, TimeoutHandle};
use leptos::prelude::*;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::board::Board;
use crate::commands::HttpStatusSync;
use crate::controller::{BoardController, BoardHandle};
use crate::models::Assignee;
use crate::modal::{DialogState, ModalController, ModalTimers};
use crate::task_form::{FormMode, FormSource, TaskForm};

/// Dialog holding the create/edit task form
pub const TASK_MODAL_ID: &str = "task-modal";

pub type AppBoardController = BoardController<RwSignal<Board>, HttpStatusSync>;

impl BoardHandle for RwSignal<Board> {
    fn update_board<R>(&self, f: impl FnOnce(&mut Board) -> R) -> Option<R> {
        self.try_update(f)
    }
}

type BrowserModals = ModalController<BrowserTimers>;

/// Paint-frame and timeout callbacks from the browser
pub struct BrowserTimers {
    controller: Weak<RefCell<BrowserModals>>,
    version: RwSignal<u32>,
}

impl ModalTimers for BrowserTimers {
    type Handle = Option<TimeoutHandle>;

    fn request_frame(&self, dialog: &str) {
        let controller = self.controller.clone();
        let version = self.version;
        let id = dialog.to_string();
        request_animation_frame(move || {
            let Some(controller) = controller.upgrade() else { return };
            let changed = controller.borrow_mut().frame_ready(&id);
            if changed {
                version.update(|v| *v += 1);
            }
        });
    }

    fn schedule_hide(&self, dialog: &str, delay: Duration) -> Self::Handle {
        let controller = self.controller.clone();
        let version = self.version;
        let id = dialog.to_string();
        let handle = set_timeout_with_handle(
            move || {
                let Some(controller) = controller.upgrade() else { return };
                let changed = controller.borrow_mut().hide_elapsed(&id);
                if changed {
                    version.update(|v| *v += 1);
                }
            },
            delay,
        );
        match handle {
            Ok(h) => Some(h),
            Err(e) => {
                log::warn!("could not schedule hide for {}: {:?}", dialog, e);
                None
            }
        }
    }

    fn cancel(&self, handle: Self::Handle) {
        if let Some(h) = handle {
            h.clear();
        }
    }
}

/// Dialog states for the whole page
#[derive(Clone, Copy)]
pub struct Modals {
    controller: StoredValue<Rc<RefCell<BrowserModals>>, LocalStorage>,
    /// Bumped on every state change to re-render dialogs
    version: RwSignal<u32>,
}

impl Modals {
    pub fn new(ids: &[&str]) -> Self {
        let version = RwSignal::new(0u32);
        let controller = Rc::new_cyclic(|weak| {
            let mut modals = ModalController::new(BrowserTimers {
                controller: weak.clone(),
                version,
            });
            for id in ids {
                modals.register(*id);
            }
            RefCell::new(modals)
        });
        Self {
            controller: StoredValue::new_local(controller),
            version,
        }
    }

    fn apply(&self, f: impl FnOnce(&mut BrowserModals) -> bool) {
        let changed = self.controller.with_value(|c| f(&mut c.borrow_mut()));
        if changed {
            self.version.update(|v| *v += 1);
        }
    }

    /// Reactive dialog state
    pub fn state(&self, id: &str) -> DialogState {
        self.version.track();
        self.controller.with_value(|c| c.borrow().state(id))
    }

    /// Reactive: any dialog not hidden
    pub fn scroll_locked(&self) -> bool {
        self.version.track();
        self.controller.with_value(|c| c.borrow().scroll_locked())
    }

    pub fn open(&self, id: &str) {
        self.apply(|m| m.open(id));
    }

    pub fn close(&self, id: &str) {
        self.apply(|m| m.close(id));
    }

    pub fn close_all_open(&self) {
        self.apply(|m| m.close_all_open() > 0);
    }
}

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    pub board: RwSignal<Board>,
    pub controller: StoredValue<Rc<AppBoardController>, LocalStorage>,
    pub modals: Modals,
    pub task_form: RwSignal<TaskForm>,
    pub assignees: StoredValue<Vec<Assignee>>,
}

impl AppContext {
    /// Prepare the task form and open its dialog
    pub fn open_task_form(&self, mode: FormMode, source: FormSource) {
        let prepared = self.task_form.try_update(|f| f.prepare(mode, &source));
        if prepared != Some(true) {
            log::debug!("task form left unchanged for {} trigger", mode.as_str());
        }
        self.modals.open(TASK_MODAL_ID);
    }

    pub fn assignee_name(&self, id: &str) -> Option<String> {
        self.assignees
            .with_value(|all| all.iter().find(|a| a.id == id).map(|a| a.name.clone()))
    }
}

pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
