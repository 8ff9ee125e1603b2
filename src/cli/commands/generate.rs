//! `passvault generate`: print a strong random password.  Works without
//! a vault.

use crate::cli::{data_dir, Cli};
use crate::config::AppConfig;
use crate::crypto::generate_password;
use crate::errors::Result;

/// Execute the `generate` command.
pub fn execute(cli: &Cli, length: Option<usize>) -> Result<()> {
    let length = match length {
        Some(n) => n,
        None => AppConfig::load(&data_dir(cli))?.generated_password_length,
    };

    let password = generate_password(length)?;
    println!("{}", password.as_str());

    Ok(())
}
