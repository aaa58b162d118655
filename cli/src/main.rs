use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use auth_core::{ApiError, AuthSession, ClientConfig, FileTokenStore, DEFAULT_BASE_URL};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "auth-demo", about = "Sign up, log in and fetch your profile from the auth API")]
struct Cli {
    #[arg(long, env = "AUTH_API_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Where the bearer token is kept between runs.
    #[arg(long, env = "AUTH_TOKEN_FILE", default_value = ".auth-token.json")]
    token_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct Credentials {
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account.
    Signup(Credentials),
    /// Log in and store the access token.
    Login(Credentials),
    /// Print the logged-in user's profile.
    Me,
    /// Forget the stored token.
    Logout,
    /// Report whether a token is stored.
    Status,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    tracing::debug!(base_url = %cli.base_url, token_file = %cli.token_file.display(), "starting");
    let store = Arc::new(FileTokenStore::new(cli.token_file));
    let session = AuthSession::connect(ClientConfig::new(&cli.base_url), store);

    match cli.command {
        Command::Signup(creds) => {
            session.signup(&creds.email, &creds.password)?;
            println!("signed up as {}", creds.email);
        }
        Command::Login(creds) => {
            session.login(&creds.email, &creds.password)?;
            println!("logged in as {}", creds.email);
        }
        Command::Me => {
            let profile = session.me()?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        Command::Logout => {
            session.logout();
            println!("logged out");
        }
        Command::Status => {
            let state = if session.is_logged_in() { "present" } else { "absent" };
            println!("token: {state}");
        }
    }
    Ok(())
}
