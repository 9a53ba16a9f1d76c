//! HBnB CLI - a terminal front end for the HBnB places site.
//!
//! Each subcommand fills in one of the site's forms and submits it through
//! the same controller the pages use. The auth token is kept between runs
//! in the cache directory (or the OS keychain with `--keychain`).

mod presenter;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hbnb_core::forms::field;
use hbnb_core::{
    parse_price_filter, ApiClient, Config, CredentialStore, FieldMap, FormId,
    FormSubmissionController, KeychainStore, PlaceCard, TokenFile,
};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use presenter::TerminalPresenter;

/// Keychain account the token is stored under
const KEYCHAIN_ACCOUNT: &str = "token";

#[derive(Parser, Debug)]
#[command(name = "hbnb", author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the HBnB API
    #[arg(long, env = "HBNB_API_URL", global = true)]
    api_url: Option<String>,

    /// Keep the token in the OS keychain instead of the cache directory
    #[arg(long, global = true)]
    keychain: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and store the returned token
    Login {
        #[arg(long)]
        email: Option<String>,
        /// Prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Create an account
    Signup {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    /// Post a review using the stored token
    Review {
        /// Review text
        #[arg(long)]
        text: String,
        /// Rating from 1 to 5
        #[arg(long, default_value = "")]
        rating: String,
    },
    /// Forget the stored token
    Logout,
    /// Show whether a token is stored
    Whoami,
    /// Filter a listing (JSON array of place cards) by maximum price
    Filter {
        /// Listing file
        listing: PathBuf,
        /// Maximum price; omit to show every place
        #[arg(long, default_value = "")]
        max_price: String,
    },
}

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();
    let cli = Cli::parse();

    let mut config = Config::load().context("Failed to load config")?;
    if let Some(url) = cli.api_url.clone() {
        config.api_url = url;
    }

    let store: Arc<dyn CredentialStore> = if cli.keychain {
        Arc::new(KeychainStore::new(KEYCHAIN_ACCOUNT)?)
    } else {
        Arc::new(TokenFile::new(config.cache_dir()?, config.cookie.clone()))
    };
    let transport = Arc::new(
        ApiClient::with_timeout(Duration::from_secs(config.request_timeout_secs))
            .context("Failed to build HTTP client")?,
    );
    let presenter = Arc::new(TerminalPresenter::new());
    let controller =
        FormSubmissionController::new(transport, store, presenter.clone(), config);

    let submitted = match cli.command {
        Command::Login { email, password } => {
            let fields = credential_fields(email, password)?;
            let submitted = submit(&controller, FormId::Login, &fields).await;
            info!(location = ?presenter.location(), "Login flow finished");
            submitted
        }
        Command::Signup { email, password } => {
            let fields = credential_fields(email, password)?;
            submit(&controller, FormId::Signup, &fields).await
        }
        Command::Review { text, rating } => {
            let fields = FieldMap::new()
                .with(field::REVIEW, text)
                .with(field::RATING, rating);
            submit(&controller, FormId::Review, &fields).await
        }
        Command::Logout => {
            controller.logout()?;
            true
        }
        Command::Whoami => {
            if controller.is_logged_in() {
                println!("Logged in");
            } else {
                println!("Not logged in");
            }
            true
        }
        Command::Filter { listing, max_price } => {
            let contents = std::fs::read_to_string(&listing)
                .with_context(|| format!("Failed to read {}", listing.display()))?;
            let mut cards: Vec<PlaceCard> =
                serde_json::from_str(&contents).context("Failed to parse listing")?;
            controller.filter_by_max_price(&mut cards, parse_price_filter(&max_price));
            for card in cards.iter().filter(|c| c.visible) {
                println!("{:<30} ${}", card.name, card.price_value);
            }
            true
        }
    };

    Ok(if submitted {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Submit a form. Failures have already been shown by the presenter, so
/// only the outcome is returned.
async fn submit(controller: &FormSubmissionController, form: FormId, fields: &FieldMap) -> bool {
    match controller.handle_submit(form, fields).await {
        Ok(()) => true,
        Err(e) => {
            debug!(form = %form, error = %e, "Submission failed");
            false
        }
    }
}

/// Email and password fields, prompting for whatever was not given
fn credential_fields(email: Option<String>, password: Option<String>) -> Result<FieldMap> {
    let email = match email {
        Some(email) => email,
        None => prompt_email()?,
    };
    let password = match password {
        Some(password) => password,
        None => rpassword::prompt_password("Password: ")?,
    };
    Ok(FieldMap::new()
        .with(field::EMAIL, email)
        .with(field::PASSWORD, password))
}

fn prompt_email() -> Result<String> {
    print!("Email: ");
    io::stdout().flush()?;

    let mut email = String::new();
    io::stdin().read_line(&mut email)?;
    Ok(email.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_review_command() {
        let cli = Cli::parse_from(["hbnb", "review", "--text", "Lovely", "--rating", "5"]);
        match cli.command {
            Command::Review { text, rating } => {
                assert_eq!(text, "Lovely");
                assert_eq!(rating, "5");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::parse_from([
            "hbnb",
            "filter",
            "places.json",
            "--max-price",
            "100",
            "--keychain",
            "--api-url",
            "https://api.test",
        ]);
        assert!(cli.keychain);
        assert_eq!(cli.api_url.as_deref(), Some("https://api.test"));
        assert!(matches!(cli.command, Command::Filter { .. }));
    }

    #[test]
    fn test_credential_fields_from_args() {
        let fields =
            credential_fields(Some("a@b.com".to_string()), Some("pw".to_string())).unwrap();
        use hbnb_core::FormFieldSource;
        assert_eq!(fields.value(field::EMAIL).as_deref(), Some("a@b.com"));
        assert_eq!(fields.value(field::PASSWORD).as_deref(), Some("pw"));
    }

    #[tokio::test]
    async fn test_failed_submit_reports_failure_without_error() {
        let cache = std::env::temp_dir().join(format!("hbnb-cli-test-{}", std::process::id()));
        let config = Config {
            api_url: "http://127.0.0.1:1".to_string(),
            ..Config::default()
        };
        let controller = FormSubmissionController::new(
            Arc::new(ApiClient::with_timeout(Duration::from_secs(5)).unwrap()),
            Arc::new(TokenFile::new(cache.clone(), config.cookie.clone())),
            Arc::new(TerminalPresenter::new()),
            config,
        );

        // Missing password fails validation before any request
        let fields = FieldMap::new().with(field::EMAIL, "a@b.com");
        assert!(!submit(&controller, FormId::Login, &fields).await);

        let _ = std::fs::remove_dir_all(cache);
    }
}
