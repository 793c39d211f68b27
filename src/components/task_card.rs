//! Task Card Component
//!
//! A draggable card with its status chip and edit trigger.

use leptos::prelude::*;
use web_sys::DragEvent;

use crate::context::use_app_context;
use crate::models::TaskId;
use crate::task_form::{FormMode, FormSource};

#[component]
pub fn TaskCard(task_id: TaskId) -> impl IntoView {
    let ctx = use_app_context();
    let board = ctx.board;
    let controller = ctx.controller;
    let id = StoredValue::new(task_id.clone());
    let card = Memo::new(move |_| id.with_value(|id| board.with(|b| b.card(id).cloned())));

    let dragging = move || card.with(|c| c.as_ref().is_some_and(|c| c.dragging));
    let status = move || card.with(|c| c.as_ref().map(|c| c.status()).unwrap_or_default());
    let confirmed = move || card.with(|c| c.as_ref().map(|c| c.confirmed).unwrap_or_default());
    let title = move || card.with(|c| c.as_ref().map(|c| c.task.title.clone()).unwrap_or_default());
    let description = move || card.with(|c| c.as_ref().map(|c| c.task.description.clone()).unwrap_or_default());
    let due = move || {
        card.with(|c| {
            c.as_ref()
                .and_then(|c| c.task.due_date)
                .map(|d| d.format("%b %-d").to_string())
        })
    };
    let assignee = move || {
        card.with(|c| c.as_ref().map(|c| c.task.assignee().to_string()))
            .and_then(|a| ctx.assignee_name(&a))
    };

    let syncing = move || card.with(|c| c.as_ref().is_some_and(|c| c.syncing));

    let on_dragstart = move |ev: DragEvent| {
        id.with_value(|id| {
            if controller.with_value(|c| c.drag_start(id)) {
                dom_dragdrop::start_move(&ev, id);
            } else {
                ev.prevent_default();
            }
        });
    };

    let on_dragend = move |_: DragEvent| {
        id.with_value(|id| controller.with_value(|c| c.drag_end(id)));
    };

    let on_edit = move |_| {
        let Some(card) = card.get_untracked() else { return };
        // Edit data follows the confirmed status, not the optimistic one
        ctx.open_task_form(FormMode::Edit, FormSource::from_task(&card.task, card.confirmed));
    };

    view! {
        <article
            class=move || match (dragging(), syncing()) {
                (true, _) => "task-card dragging",
                (false, true) => "task-card syncing",
                (false, false) => "task-card",
            }
            draggable=move || if syncing() { "false" } else { "true" }
            data-task-id=task_id
            data-status=move || status().as_str()
            on:dragstart=on_dragstart
            on:dragend=on_dragend
        >
            <header class="task-card-header">
                <h4>{title}</h4>
                <span class="chip subtle">{move || confirmed().label()}</span>
            </header>
            <Show when=move || !description().is_empty()>
                <p class="task-description">{description}</p>
            </Show>
            <footer class="task-meta">
                {move || due().map(|d| view! { <span class="task-due">{d}</span> })}
                {move || assignee().map(|a| view! { <span class="task-assignee">{a}</span> })}
                <button
                    type="button"
                    class="icon-btn"
                    data-edit-task=""
                    data-status=move || confirmed().as_str()
                    on:click=on_edit
                >
                    "Edit"
                </button>
            </footer>
        </article>
    }
}
