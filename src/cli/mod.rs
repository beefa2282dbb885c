//! CLI commands for Remembrall.
//!
//! Non-interactive commands that run once and print a result:
//! - **Setup**: init
//! - **Sets**: convert, list, search, delete
//!
//! The interactive commands (`add`, `study`, and the bare menu) drive the
//! [`crate::shell::Shell`] instead.

pub mod convert;
pub mod delete;
pub mod init;
pub mod list;
pub mod search;

pub use convert::ConvertCommand;
pub use delete::DeleteCommand;
pub use init::InitCommand;
pub use list::ListCommand;
pub use search::SearchCommand;
