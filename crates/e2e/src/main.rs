//! Form submission check runner
//!
//! Resolves parameters, starts a browser session against a WebDriver
//! endpoint, runs the check, and reports pass/fail through the exit code:
//! 0 pass, 1 check failure, 2 configuration error.

use std::time::Duration;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use regform_e2e::check::{run_to_completion, FormSubmissionCheck};
use regform_e2e::config;
use regform_e2e::error::{CheckError, CheckResult};
use regform_e2e::session::{SessionConfig, WebDriverSession};
use regform_e2e::Params;

#[derive(Parser, Debug)]
#[command(name = "regform-e2e")]
#[command(about = "End-to-end check of the registration form submission flow")]
struct Args {
    /// URL of the registration form page
    #[arg(long, env = "BASE_URL", default_value = config::DEFAULT_BASE_URL)]
    base_url: String,

    /// Username to register (required)
    #[arg(long, env = "USERNAME")]
    username: Option<String>,

    /// Password to register (required)
    #[arg(long, env = "PASSWORD")]
    password: Option<String>,

    /// WebDriver endpoint (chromedriver)
    #[arg(long, env = "WEBDRIVER_URL", default_value = config::DEFAULT_WEBDRIVER_URL)]
    webdriver_url: String,

    /// Run the browser headless
    #[arg(long, default_value = "true")]
    headless: bool,

    /// Implicit wait applied to every element lookup, in seconds
    #[arg(long, default_value = "10")]
    implicit_wait_secs: u64,

    /// Explicit wait applied at synchronization points, in seconds
    #[arg(long, default_value = "15")]
    explicit_wait_secs: u64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    let args = Args::parse();

    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    match rt.block_on(run(args)) {
        Ok(()) => std::process::exit(0),
        Err(e @ CheckError::MissingParameter { .. }) => {
            error!("{e}");
            std::process::exit(2);
        }
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    }
}

async fn run(args: Args) -> CheckResult<()> {
    // Parameter validation happens before any browser interaction.
    let params = Params::new(args.base_url, args.username, args.password)?;

    let session_config = SessionConfig {
        webdriver_url: args.webdriver_url,
        headless: args.headless,
        implicit_wait: Duration::from_secs(args.implicit_wait_secs),
        ..Default::default()
    };
    let session = WebDriverSession::connect(&session_config).await?;

    let check = FormSubmissionCheck::new(params)
        .with_explicit_wait(Duration::from_secs(args.explicit_wait_secs));

    run_to_completion(session, &check).await
}
