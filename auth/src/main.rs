//! Headless driver for the sign-up and login screens.
//!
//! Each subcommand mounts one screen against the in-memory identity
//! provider, replays the given field values, submits and prints the final
//! view as JSON. Navigation and notices are reported through `tracing`.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io::{self, Write};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context, Result, eyre};
use serde_json::json;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use rdv_auth::IdentityConfig;
use rdv_auth::domain::{LoginField, LoginScreen, SignUpField, SignUpScreen};
use rdv_auth::outbound::{InMemoryIdentityProvider, TracingNavigator, TracingNotifier};

/// `rdv-auth-demo` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "rdv-auth-demo",
    about = "Drive the sign-up and login screens without a UI",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fill in and submit the sign-up form.
    SignUp {
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        password: String,
        #[arg(long, default_value = "")]
        confirm_password: String,
    },
    /// Fill in and submit the login form.
    Login {
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        password: String,
        /// Register the account before signing in.
        #[arg(long)]
        register: bool,
    },
    /// Request a password reset for `email`.
    ForgotPassword {
        #[arg(long, default_value = "")]
        email: String,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let config = IdentityConfig::load()
        .map_err(|err| eyre!("identity configuration is invalid: {err}"))?
        .install()
        .map_err(|err| eyre!("identity configuration could not be installed: {err}"))?;

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build demo runtime")?;
    let output = runtime.block_on(run(cli.command, config));
    writeln!(io::stdout().lock(), "{output}").wrap_err("failed to write view")?;
    Ok(())
}

async fn run(command: Command, config: &IdentityConfig) -> serde_json::Value {
    match command {
        Command::SignUp {
            first_name,
            last_name,
            email,
            password,
            confirm_password,
        } => {
            let screen = SignUpScreen::new(
                Arc::new(InMemoryIdentityProvider::new(config)),
                Arc::new(TracingNavigator),
                Arc::new(TracingNotifier),
            );
            screen.change_field(SignUpField::FirstName, first_name);
            screen.change_field(SignUpField::LastName, last_name);
            screen.change_field(SignUpField::Email, email);
            screen.change_field(SignUpField::Password, password);
            screen.change_field(SignUpField::ConfirmPassword, confirm_password);
            let outcome = screen.submit().await;
            json!({ "outcome": format!("{outcome:?}"), "view": screen.view() })
        }
        Command::Login {
            email,
            password,
            register,
        } => {
            let mut identity = InMemoryIdentityProvider::new(config);
            if register {
                identity = identity.with_account(&email, &password);
            }
            let screen = login_screen(identity);
            screen.change_field(LoginField::Email, email);
            screen.change_field(LoginField::Password, password);
            let outcome = screen.submit().await;
            json!({ "outcome": format!("{outcome:?}"), "view": screen.view() })
        }
        Command::ForgotPassword { email } => {
            let screen = login_screen(InMemoryIdentityProvider::new(config));
            screen.change_field(LoginField::Email, email);
            let outcome = screen.forgot_password().await;
            json!({ "outcome": format!("{outcome:?}"), "view": screen.view() })
        }
    }
}

fn login_screen(identity: InMemoryIdentityProvider) -> LoginScreen {
    LoginScreen::new(
        Arc::new(identity),
        Arc::new(TracingNavigator),
        Arc::new(TracingNotifier),
    )
}
