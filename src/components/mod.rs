//! UI Components
//!
//! Leptos components for the single page.

mod connection_status;
mod install_card;
mod notification_card;
mod todo_form;
mod todo_list;

pub use connection_status::ConnectionStatus;
pub use install_card::InstallCard;
pub use notification_card::NotificationCard;
pub use todo_form::TodoForm;
pub use todo_list::TodoList;
