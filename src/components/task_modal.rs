//! Task Modal Component
//!
//! Create/edit task form inside the task dialog. Submission is a plain
//! form POST to the action chosen when the form was prepared.

use leptos::prelude::*;

use crate::components::Modal;
use crate::context::{use_app_context, TASK_MODAL_ID};
use crate::models::TaskStatus;

#[component]
pub fn TaskModal(#[prop(into)] csrf_token: String) -> impl IntoView {
    let ctx = use_app_context();
    let form = ctx.task_form;
    let modals = ctx.modals;
    let assignees = ctx.assignees.get_value();

    let close = move |_| modals.close(TASK_MODAL_ID);

    view! {
        <Modal id=TASK_MODAL_ID>
            <div class="modal-dialog" role="dialog">
                <header class="modal-header">
                    <h2 data-task-modal-title="">{move || form.with(|f| f.heading.clone())}</h2>
                    <button type="button" class="modal-close" data-modal-close="" on:click=close>
                        "×"
                    </button>
                </header>
                <form
                    method="post"
                    data-task-form=""
                    action=move || form.with(|f| f.action.clone())
                    data-mode=move || form.with(|f| f.mode.as_str())
                >
                    <input type="hidden" name="csrf_token" value=csrf_token />
                    <label>
                        "Title"
                        <input
                            type="text"
                            name="title"
                            required=true
                            prop:value=move || form.with(|f| f.title.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                form.update(|f| f.title = value);
                            }
                        />
                    </label>
                    <label>
                        "Description"
                        <textarea
                            name="description"
                            prop:value=move || form.with(|f| f.description.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                form.update(|f| f.description = value);
                            }
                        />
                    </label>
                    <label>
                        "Status"
                        <select
                            name="status"
                            prop:value=move || form.with(|f| f.status.as_str())
                            on:change=move |ev| {
                                if let Some(status) = TaskStatus::parse(&event_target_value(&ev)) {
                                    form.update(|f| f.status = status);
                                }
                            }
                        >
                            {TaskStatus::ALL
                                .into_iter()
                                .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                                .collect_view()}
                        </select>
                    </label>
                    <label>
                        "Due date"
                        <input
                            type="date"
                            name="due_date"
                            prop:value=move || form.with(|f| f.due_date.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                form.update(|f| f.due_date = value);
                            }
                        />
                    </label>
                    <label>
                        "Assignee"
                        <select
                            name="assignee_id"
                            prop:value=move || form.with(|f| f.assignee.clone())
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                form.update(|f| f.select_assignee(&value));
                            }
                        >
                            {assignees
                                .into_iter()
                                .map(|a| view! { <option value=a.id>{a.name}</option> })
                                .collect_view()}
                        </select>
                    </label>
                    <footer class="modal-actions">
                        <button type="button" class="btn" data-modal-close="" on:click=close>
                            "Cancel"
                        </button>
                        <button type="submit" class="btn primary">"Save"</button>
                    </footer>
                </form>
            </div>
        </Modal>
    }
}
