//! Test parameter resolution and fixed inputs
//!
//! Parameters come from the CLI or environment once per run. `username` and
//! `password` are required; resolution fails before any browser interaction
//! when either is missing.

use std::time::Duration;

use crate::error::{CheckError, CheckResult};

/// Registration form served by the target host.
pub const DEFAULT_BASE_URL: &str = "https://otus.home.kartushin.su/form.html";

/// Default WebDriver endpoint (chromedriver).
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";

/// Birth date typed into the form (DD-MM-YYYY).
pub const BIRTH_DATE_INPUT: &str = "15-05-1990";

/// Birth date the results view is expected to echo (YYYY-MM-DD).
pub const BIRTH_DATE_EXPECTED: &str = "1990-05-15";

/// Bound applied to every element lookup.
pub const IMPLICIT_WAIT: Duration = Duration::from_secs(10);

/// Bound applied to explicit synchronization points.
pub const EXPLICIT_WAIT: Duration = Duration::from_secs(15);

/// Polling interval for explicit waits.
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Input parameters for one check run.
#[derive(Debug, Clone)]
pub struct Params {
    pub base_url: String,
    pub username: String,
    pub password: String,
}

impl Params {
    /// Validate and build parameters. Empty and absent values are both
    /// precondition failures, reported with remediation.
    pub fn new(
        base_url: String,
        username: Option<String>,
        password: Option<String>,
    ) -> CheckResult<Self> {
        let username = required(
            "USERNAME",
            "Set the USERNAME environment variable or pass --username",
            username,
        )?;
        let password = required(
            "PASSWORD",
            "Set the PASSWORD environment variable or pass --password",
            password,
        )?;

        Ok(Self {
            base_url,
            username,
            password,
        })
    }

    /// Email derived from the username, computed fresh per run.
    pub fn email(&self) -> String {
        format!("{}@example.com", self.username)
    }
}

fn required(
    name: &'static str,
    hint: &'static str,
    value: Option<String>,
) -> CheckResult<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(CheckError::MissingParameter { name, hint }),
    }
}
