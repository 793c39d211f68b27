//! Modal Component
//!
//! Dialog shell driven by the page's modal controller.

use leptos::html;
use leptos::prelude::*;

use crate::context::use_app_context;

/// Backdrop + dialog. Clicking the backdrop itself closes it.
#[component]
pub fn Modal(
    #[prop(into)] id: String,
    children: Children,
) -> impl IntoView {
    let modals = use_app_context().modals;
    let backdrop_ref = NodeRef::<html::Div>::new();
    let dialog_id = StoredValue::new(id.clone());
    let state = Memo::new(move |_| dialog_id.with_value(|id| modals.state(id)));

    let on_backdrop = move |ev: web_sys::MouseEvent| {
        let Some(backdrop) = backdrop_ref.get_untracked() else { return };
        let backdrop: &web_sys::EventTarget = backdrop.as_ref();
        // Clicks inside the dialog content bubble up with another target
        if ev.target().as_ref() == Some(backdrop) {
            dialog_id.with_value(|id| modals.close(id));
        }
    };

    view! {
        <div
            id=id
            node_ref=backdrop_ref
            class=move || if state.get().is_shown() { "modal show" } else { "modal" }
            hidden=move || !state.get().is_visible()
            on:click=on_backdrop
        >
            {children()}
        </div>
    }
}
