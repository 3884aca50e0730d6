//! Command implementations

pub mod check;
pub mod init;
pub mod list;
pub mod tui;

pub use check::run_check;
pub use init::run_init;
pub use list::run_list;
pub use tui::run_tui;
