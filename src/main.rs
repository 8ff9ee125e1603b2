use clap::Parser;
use passvault::cli::commands::update::AccountChanges;
use passvault::cli::commands::settings_cmd::SettingsChanges;
use passvault::cli::{Cli, Commands, SectionAction, SettingsAction};

/// Environment variable controlling diagnostic log output (stderr).
const LOG_ENV: &str = "PASSVAULT_LOG";

fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => passvault::cli::commands::init::execute(&cli),
        Commands::Status => passvault::cli::commands::status::execute(&cli),
        Commands::Sections { ref filter } => {
            passvault::cli::commands::sections::execute(&cli, filter.as_deref())
        }
        Commands::Section { ref action } => match action {
            SectionAction::Add { ref name } => {
                passvault::cli::commands::section::execute_add(&cli, name)
            }
            SectionAction::Remove { ref name, force } => {
                passvault::cli::commands::section::execute_remove(&cli, name, *force)
            }
        },
        Commands::List {
            ref section,
            ref filter,
            reveal,
        } => passvault::cli::commands::list::execute(&cli, section, filter.as_deref(), reveal),
        Commands::Add {
            ref section,
            ref kind,
            ref identifier,
            ref secret,
            generate,
        } => passvault::cli::commands::add::execute(
            &cli,
            section,
            kind,
            identifier,
            secret.as_deref(),
            generate,
        ),
        Commands::Update {
            ref section,
            number,
            ref kind,
            ref identifier,
            ref secret,
            generate,
        } => {
            let changes = AccountChanges {
                kind: kind.as_deref(),
                identifier: identifier.as_deref(),
                secret: secret.as_deref(),
                generate,
            };
            passvault::cli::commands::update::execute(&cli, section, number, &changes)
        }
        Commands::Remove {
            ref section,
            number,
            force,
        } => passvault::cli::commands::remove::execute(&cli, section, number, force),
        Commands::Show { ref section, number } => {
            passvault::cli::commands::show::execute(&cli, section, number)
        }
        Commands::History {
            ref section,
            number,
            reveal,
        } => passvault::cli::commands::history::execute(&cli, section, number, reveal),
        Commands::Generate { length } => passvault::cli::commands::generate::execute(&cli, length),
        Commands::Import { ref file } => passvault::cli::commands::import_cmd::execute(&cli, file),
        Commands::Export { ref file } => passvault::cli::commands::export::execute(&cli, file),
        Commands::Settings { ref action } => match action {
            SettingsAction::Show => passvault::cli::commands::settings_cmd::execute_show(&cli),
            SettingsAction::Set {
                ref theme,
                volume,
                music_enabled,
                music_playing,
            } => {
                let changes = SettingsChanges {
                    theme: theme.as_deref(),
                    volume: *volume,
                    music_enabled: *music_enabled,
                    music_playing: *music_playing,
                };
                passvault::cli::commands::settings_cmd::execute_set(&cli, &changes)
            }
        },
        Commands::Audit { last, ref since } => run_audit(&cli, last, since.as_deref()),
        Commands::Completions { ref shell } => passvault::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        passvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// Send diagnostics to stderr, filtered by `PASSVAULT_LOG` (default: warn).
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(feature = "audit-log")]
fn run_audit(cli: &Cli, last: usize, since: Option<&str>) -> passvault::errors::Result<()> {
    passvault::cli::commands::audit_cmd::execute(cli, last, since)
}

#[cfg(not(feature = "audit-log"))]
fn run_audit(_cli: &Cli, _last: usize, _since: Option<&str>) -> passvault::errors::Result<()> {
    Err(passvault::errors::PassVaultError::CommandFailed(
        "audit log support is not compiled in (enable the `audit-log` feature)".into(),
    ))
}
