use std::process::ExitCode;

use anyhow::Context;

use super::AppContext;
use crate::auth::{AuthClient, IdentityToolkitClient, SessionVault, SignUpRequest, StoredSession};
use crate::cli::AuthAction;
use crate::prompt::Prompter;

const VAULT_SERVICE: &str = "skinscan-session";

pub(super) async fn run_auth(ctx: &AppContext, action: AuthAction) -> anyhow::Result<ExitCode> {
    let vault = SessionVault::new(VAULT_SERVICE);
    let prompter = AppContext::prompter(false);

    match action {
        AuthAction::Logout => {
            vault.clear()?;
            println!("Logged out.");
            Ok(ExitCode::SUCCESS)
        }
        AuthAction::Status => {
            match vault.load()? {
                Some(session) => println!("Logged in as {}", session.email),
                None => println!("Not logged in."),
            }
            Ok(ExitCode::SUCCESS)
        }
        AuthAction::Login { email } => {
            let client = client(ctx)?;
            let password = ask_password(prompter.as_ref(), "Password:")?;
            let session = client.sign_in(&email, &password).await?;
            vault.save(&StoredSession::from(&session))?;
            println!("Logged in as {}", session.email);
            Ok(ExitCode::SUCCESS)
        }
        AuthAction::Signup { email } => {
            let client = client(ctx)?;
            let request = SignUpRequest {
                email,
                password: ask_password(prompter.as_ref(), "Password:")?,
                confirm_password: ask_password(prompter.as_ref(), "Confirm password:")?,
            };
            let session = client.sign_up(&request).await?;
            vault.save(&StoredSession::from(&session))?;
            println!("Account created! Please check your email.");
            Ok(ExitCode::SUCCESS)
        }
        AuthAction::Reset { email } => {
            client(ctx)?.send_password_reset(&email).await?;
            println!("Password reset email sent.");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn client(ctx: &AppContext) -> anyhow::Result<IdentityToolkitClient> {
    let auth = &ctx.config.auth;
    let api_key = auth.api_key.clone().unwrap_or_default();
    IdentityToolkitClient::new(&auth.endpoint, &api_key).context("Auth is not configured")
}

fn ask_password(prompter: &dyn Prompter, question: &str) -> anyhow::Result<String> {
    prompter
        .ask_secret(question)
        .context("A password is required")
}
