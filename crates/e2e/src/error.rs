//! Error types for the form submission check

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Required parameter {name} is not set. {hint}")]
    MissingParameter {
        name: &'static str,
        hint: &'static str,
    },

    #[error("WebDriver endpoint not ready after {0} attempts. Start chromedriver and retry")]
    WebDriverNotReady(usize),

    #[error("Timed out waiting for {0}")]
    Timeout(String),

    #[error("Element not found: {0}")]
    NotFound(String),

    #[error("Assertion failed: {0}")]
    Assertion(String),

    #[error("Browser session already closed")]
    SessionClosed,

    #[error("WebDriver error: {0}")]
    WebDriver(#[from] thirtyfour::error::WebDriverError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type CheckResult<T> = Result<T, CheckError>;
