//! UI Components
//!
//! Reusable Leptos components.

mod nav_bar;
mod browse_sidebar;
mod item_window;
mod draggable_image;
mod recycle_bin;
mod scoreboard;
mod admin_panel;
mod notice_stack;
mod delete_confirm_button;
mod welcome_dialog;

pub use nav_bar::NavBar;
pub use browse_sidebar::BrowseSidebar;
pub use item_window::ItemWindow;
pub use draggable_image::DraggableImage;
pub use recycle_bin::RecycleBin;
pub use scoreboard::Scoreboard;
pub use admin_panel::AdminPanel;
pub use notice_stack::NoticeStack;
pub use delete_confirm_button::DeleteConfirmButton;
pub use welcome_dialog::WelcomeDialog;
