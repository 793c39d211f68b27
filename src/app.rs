//! Task Board App
//!
//! Page shell: header, the board columns and the task dialog.

use leptos::ev;
use leptos::prelude::*;
use std::rc::Rc;

use crate::board::Board;
use crate::commands::HttpStatusSync;
use crate::components::{ProfileMenu, TaskBoard, TaskModal};
use crate::config::BoardConfig;
use crate::context::{AppContext, Modals, TASK_MODAL_ID};
use crate::controller::BoardController;
use crate::task_form::{FormMode, FormSource, TaskForm};

#[component]
pub fn App(config: BoardConfig) -> impl IntoView {
    let board = RwSignal::new(Board::from_tasks(config.tasks.clone()));
    let controller = BoardController::new(
        board,
        HttpStatusSync::new(config.api_base()),
        config.project_context(),
    );
    let modals = Modals::new(&[TASK_MODAL_ID]);
    let task_form = RwSignal::new(TaskForm::new(config.form_template(), config.assignees.clone()));

    let ctx = AppContext {
        board,
        controller: StoredValue::new_local(Rc::new(controller)),
        modals,
        task_form,
        assignees: StoredValue::new(config.assignees.clone()),
    };
    provide_context(ctx);

    log::info!(
        "board ready: project {} with {} tasks",
        config.project.id,
        config.tasks.len()
    );

    // Page scroll is locked while any dialog is on screen
    Effect::new(move |_| {
        let overflow = if modals.scroll_locked() { "hidden" } else { "" };
        if let Some(body) = document().body() {
            let _ = body.style().set_property("overflow", overflow);
        }
    });

    let _ = window_event_listener(ev::keydown, move |ev| {
        if ev.key() == "Escape" {
            modals.close_all_open();
        }
    });

    let project_name = config.project.name.clone();
    let csrf_token = config.project.csrf_token.clone();
    let user = config.user.clone();

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1>{project_name}</h1>
                <button
                    type="button"
                    class="btn primary"
                    data-new-task=""
                    on:click=move |_| ctx.open_task_form(FormMode::Create, FormSource::default())
                >
                    "New task"
                </button>
                {user.map(|user| view! { <ProfileMenu user=user /> })}
            </header>
            <main class="main-content">
                <TaskBoard />
            </main>
            <TaskModal csrf_token=csrf_token />
        </div>
    }
}
