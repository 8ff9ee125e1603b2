//! One module per subcommand.  Each exposes an `execute` function that
//! `main` dispatches to.

pub mod add;
#[cfg(feature = "audit-log")]
pub mod audit_cmd;
pub mod completions;
pub mod export;
pub mod generate;
pub mod history;
pub mod import_cmd;
pub mod init;
pub mod list;
pub mod remove;
pub mod section;
pub mod sections;
pub mod settings_cmd;
pub mod show;
pub mod status;
pub mod update;
