//! Profile Menu Component
//!
//! Header dropdown for the signed-in user.

use leptos::html;
use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::config::UserInfo;

#[component]
pub fn ProfileMenu(user: UserInfo) -> impl IntoView {
    let (open, set_open) = signal(false);
    let menu_ref = NodeRef::<html::Div>::new();

    // Any click outside the menu closes it
    let _ = window_event_listener(ev::click, move |ev| {
        let Some(menu) = menu_ref.get_untracked() else { return };
        let inside = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Node>().ok())
            .is_some_and(|node| menu.contains(Some(&node)));
        if !inside {
            set_open.set(false);
        }
    });

    view! {
        <div
            class=move || if open.get() { "profile-menu open" } else { "profile-menu" }
            node_ref=menu_ref
        >
            <button
                type="button"
                class="profile-trigger"
                data-menu-toggle=""
                on:click=move |_| set_open.update(|o| *o = !*o)
            >
                {user.name}
            </button>
            <div class="profile-dropdown">
                {user.logout_url.map(|url| view! { <a href=url>"Log out"</a> })}
            </div>
        </div>
    }
}
