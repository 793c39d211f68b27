//! Task Board Component
//!
//! The three status columns.

use leptos::ev;
use leptos::prelude::*;

use crate::components::TaskColumn;
use crate::context::use_app_context;
use crate::models::TaskStatus;

#[component]
pub fn TaskBoard() -> impl IntoView {
    let controller = use_app_context().controller;

    // A card moved into another column is re-created, and the browser may
    // not deliver dragend to the detached node. Mouse events resume
    // only after the gesture, so the first one closes any open session.
    let _ = window_event_listener(ev::mousemove, move |_| {
        controller.with_value(|c| c.abandon_drag());
    });
    let _ = window_event_listener(ev::dragend, move |_| {
        controller.with_value(|c| c.abandon_drag());
    });

    view! {
        <div class="task-board">
            {TaskStatus::ALL
                .into_iter()
                .map(|status| view! { <TaskColumn status=status /> })
                .collect_view()}
        </div>
    }
}
