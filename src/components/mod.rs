//! UI Components
//!
//! Leptos components for the board views.

mod card_view;
mod delete_confirm_button;
mod drop_zone;
mod kanban_board;
mod list_view;
mod new_card_form;
mod notice_bar;

pub use card_view::CardView;
pub use delete_confirm_button::DeleteConfirmButton;
pub use drop_zone::DropZone;
pub use kanban_board::KanbanBoard;
pub use list_view::ListView;
pub use new_card_form::NewCardForm;
pub use notice_bar::NoticeBar;
