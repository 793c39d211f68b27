//! UI Components
//!
//! Leptos components for the board page.

mod modal;
mod profile_menu;
mod task_board;
mod task_card;
mod task_column;
mod task_modal;

pub use modal::Modal;
pub use profile_menu::ProfileMenu;
pub use task_board::TaskBoard;
pub use task_card::TaskCard;
pub use task_column::TaskColumn;
pub use task_modal::TaskModal;
