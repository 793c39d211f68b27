//! Task Column Component
//!
//! One status column: drop target for cards.

use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::DragEvent;

use crate::components::TaskCard;
use crate::context::use_app_context;
use crate::models::TaskStatus;

/// Cards that take part in the proximity rule
const SIBLING_SELECTOR: &str = ".task-card:not(.dragging)";

#[component]
pub fn TaskColumn(status: TaskStatus) -> impl IntoView {
    let ctx = use_app_context();
    let board = ctx.board;
    let controller = ctx.controller;
    let tasks_ref = NodeRef::<html::Div>::new();

    let drop_ready = move || board.with(|b| b.column(status).is_some_and(|c| c.drop_ready));
    let card_count = move || board.with(|b| b.column(status).map(|c| c.cards.len()).unwrap_or(0));

    let on_dragover = move |ev: DragEvent| {
        dom_dragdrop::accept_move(&ev);
        let before = tasks_ref.get_untracked().and_then(|tasks| {
            let siblings = dom_dragdrop::sibling_midpoints(&tasks, SIBLING_SELECTOR, "data-task-id");
            dom_dragdrop::closest_following(siblings, dom_dragdrop::pointer_y(&ev))
        });
        controller.with_value(|c| c.drag_over(status, before.as_deref()));
    };

    let on_dragleave = move |_: DragEvent| {
        controller.with_value(|c| c.drag_leave(status));
    };

    let on_drop = move |ev: DragEvent| {
        let payload = dom_dragdrop::take_payload(&ev);
        let ctl = controller.get_value();
        if let Some(pending) = ctl.drop_card(payload.as_deref(), status) {
            spawn_local(async move {
                let _ = ctl.sync_move(pending).await;
            });
        }
    };

    view! {
        <section
            class=move || if drop_ready() { "task-column drop-ready" } else { "task-column" }
            data-status=status.as_str()
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:drop=on_drop
        >
            <header class="task-column-header">
                <h3>{status.label()}</h3>
                <span class="task-count">{card_count}</span>
            </header>
            <div class="tasks" node_ref=tasks_ref>
                <For
                    each=move || board.with(|b| b.card_ids(status))
                    key=|id| id.clone()
                    children=move |task_id| view! { <TaskCard task_id=task_id /> }
                />
            </div>
        </section>
    }
}
