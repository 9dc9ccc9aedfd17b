//! Command handlers behind the CLI.
//!
//! Each handler builds the collaborators it needs from `AppContext`, runs
//! one user action and prints the outcome. Pipeline failures are printed
//! as a single alert and reflected in the exit code.

mod auth;
mod history;
mod scan;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;

use crate::capture::StoredPermissions;
use crate::cli::{Cli, Command};
use crate::config::AppConfig;
use crate::prompt::{AssumeYes, Prompter, TerminalPrompter};
use crate::storage::{KeyValueStore, SqliteStore};

/// Shared state for one CLI invocation.
pub(crate) struct AppContext {
    pub config: AppConfig,
    pub store: Arc<dyn KeyValueStore>,
}

impl AppContext {
    fn open(config: AppConfig) -> anyhow::Result<Self> {
        let db_path = config.database_path();
        let store = SqliteStore::open(&db_path)
            .with_context(|| format!("Failed to open storage at {:?}", db_path))?;
        Ok(Self {
            config,
            store: Arc::new(store),
        })
    }

    pub fn prompter(assume_yes: bool) -> Arc<dyn Prompter> {
        if assume_yes {
            Arc::new(AssumeYes)
        } else {
            Arc::new(TerminalPrompter)
        }
    }
}

pub(crate) async fn dispatch(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = AppConfig::load(cli.config.as_deref())?.with_env_overrides();
    let ctx = AppContext::open(config)?;

    match cli.command {
        Command::Scan(args) => scan::run_scan(&ctx, args).await,
        Command::History { action } => history::run_history(&ctx, action),
        Command::Auth { action } => auth::run_auth(&ctx, action).await,
        Command::ResetPermissions => {
            StoredPermissions::new(ctx.store.clone(), AppContext::prompter(false)).reset()?;
            println!("Permissions reset.");
            Ok(ExitCode::SUCCESS)
        }
    }
}
