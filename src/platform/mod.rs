//! Browser Platform Wrappers
//!
//! Thin bindings to browser APIs, organized by domain. Errors come back as
//! `String`; callers log them and carry on.

mod config;
mod connectivity;
mod dialog;
mod install;
mod notifications;
mod storage;
mod worker;

pub use config::*;
pub use connectivity::*;
pub use dialog::*;
pub use install::*;
pub use notifications::*;
pub use storage::*;
pub use worker::*;
