//! Browser session management
//!
//! The [`Session`] trait is the browser capability the check runs against:
//! locator-addressed operations plus bounded waits. [`WebDriverSession`]
//! implements it over a live WebDriver endpoint (chromedriver).

use std::time::Duration;

use async_trait::async_trait;
use thirtyfour::prelude::*;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config;
use crate::error::{CheckError, CheckResult};

/// A rule for finding one element on the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locator {
    Tag(&'static str),
    XPath(&'static str),
}

impl Locator {
    fn to_by(self) -> By {
        match self {
            Locator::Tag(tag) => By::Tag(tag),
            Locator::XPath(xpath) => By::XPath(xpath),
        }
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Locator::Tag(tag) => write!(f, "<{tag}>"),
            Locator::XPath(xpath) => write!(f, "{xpath}"),
        }
    }
}

/// Stable locators for the registration form page.
pub mod locators {
    use super::Locator;

    pub const FORM: Locator = Locator::Tag("form");
    pub const USERNAME: Locator = Locator::XPath("//input[@id='username']");
    pub const EMAIL: Locator = Locator::XPath("//input[@id='email']");
    pub const PASSWORD: Locator = Locator::XPath("//input[@id='password']");
    pub const CONFIRM_PASSWORD: Locator = Locator::XPath("//input[@id='confirm_password']");
    pub const BIRTH_DATE: Locator = Locator::XPath("//input[@id='birthdate']");
    pub const LANGUAGE_LEVEL: Locator = Locator::XPath("//select[@id='language_level']");
    pub const SUBMIT: Locator = Locator::XPath("//input[@type='submit']");
    pub const OUTPUT: Locator = Locator::XPath("//div[@id='output']");
}

/// One browser session: navigation, element lookup, input simulation,
/// content retrieval. Implementations own exactly one browser instance.
#[async_trait]
pub trait Session {
    async fn navigate(&mut self, url: &str) -> CheckResult<()>;

    /// Block until an element matching `locator` exists, up to `timeout`.
    async fn wait_present(&mut self, locator: Locator, timeout: Duration) -> CheckResult<()>;

    /// Block until the element is displayed and enabled, up to `timeout`.
    async fn wait_interactable(&mut self, locator: Locator, timeout: Duration) -> CheckResult<()>;

    /// Clear the element and type `text` into it.
    async fn fill(&mut self, locator: Locator, text: &str) -> CheckResult<()>;

    /// Read back the element's current value.
    async fn value(&mut self, locator: Locator) -> CheckResult<String>;

    async fn click(&mut self, locator: Locator) -> CheckResult<()>;

    /// Select the option of a selection control by its visible label.
    async fn select_by_label(&mut self, locator: Locator, label: &str) -> CheckResult<()>;

    /// Select the option of a selection control by zero-based position.
    async fn select_by_index(&mut self, locator: Locator, index: usize) -> CheckResult<()>;

    /// Full rendered page content.
    async fn page_source(&mut self) -> CheckResult<String>;

    /// Release the browser. Further operations fail; a second close is a no-op.
    async fn close(&mut self) -> CheckResult<()>;
}

/// Configuration for connecting to a WebDriver endpoint.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// WebDriver endpoint (chromedriver).
    pub webdriver_url: String,

    /// Run the browser headless.
    pub headless: bool,

    /// Bound applied to every element lookup.
    pub implicit_wait: Duration,

    /// Polling interval for explicit waits.
    pub poll_interval: Duration,

    /// How long to wait for the WebDriver endpoint to become ready.
    pub ready_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            webdriver_url: config::DEFAULT_WEBDRIVER_URL.to_string(),
            headless: true,
            implicit_wait: config::IMPLICIT_WAIT,
            poll_interval: config::POLL_INTERVAL,
            ready_timeout: Duration::from_secs(10),
        }
    }
}

/// Live browser session over the WebDriver protocol.
pub struct WebDriverSession {
    driver: Option<WebDriver>,
    poll_interval: Duration,
}

impl WebDriverSession {
    /// Wait for the WebDriver endpoint, then start a fresh browser instance.
    pub async fn connect(config: &SessionConfig) -> CheckResult<Self> {
        wait_for_ready(&config.webdriver_url, config.ready_timeout).await?;

        let mut caps = DesiredCapabilities::chrome();
        if config.headless {
            caps.set_headless()?;
        }
        caps.set_no_sandbox()?;
        caps.set_disable_dev_shm_usage()?;

        info!("Starting browser session via {}", config.webdriver_url);
        let driver = WebDriver::new(&config.webdriver_url, caps).await?;

        // The browser is live from here; release it before propagating any
        // failure in the remaining setup.
        if let Err(e) = driver.set_implicit_wait_timeout(config.implicit_wait).await {
            warn!("Session setup failed, closing browser: {e}");
            if let Err(quit_err) = driver.quit().await {
                warn!("Failed to close browser after setup error: {quit_err}");
            }
            return Err(e.into());
        }

        Ok(Self {
            driver: Some(driver),
            poll_interval: config.poll_interval,
        })
    }

    fn driver(&self) -> CheckResult<&WebDriver> {
        self.driver.as_ref().ok_or(CheckError::SessionClosed)
    }

    // Lookup bounded by the session's implicit wait.
    async fn find(&self, locator: Locator) -> CheckResult<WebElement> {
        Ok(self.driver()?.find(locator.to_by()).await?)
    }
}

#[async_trait]
impl Session for WebDriverSession {
    async fn navigate(&mut self, url: &str) -> CheckResult<()> {
        info!("Opening page: {url}");
        self.driver()?.goto(url).await?;
        Ok(())
    }

    async fn wait_present(&mut self, locator: Locator, timeout: Duration) -> CheckResult<()> {
        let found = self
            .driver()?
            .query(locator.to_by())
            .wait(timeout, self.poll_interval)
            .exists()
            .await?;
        if found {
            Ok(())
        } else {
            Err(CheckError::Timeout(format!("{locator} to be present")))
        }
    }

    async fn wait_interactable(&mut self, locator: Locator, timeout: Duration) -> CheckResult<()> {
        let found = self
            .driver()?
            .query(locator.to_by())
            .wait(timeout, self.poll_interval)
            .and_displayed()
            .and_enabled()
            .exists()
            .await?;
        if found {
            Ok(())
        } else {
            Err(CheckError::Timeout(format!(
                "{locator} to become interactable"
            )))
        }
    }

    async fn fill(&mut self, locator: Locator, text: &str) -> CheckResult<()> {
        let elem = self.find(locator).await?;
        elem.clear().await?;
        elem.send_keys(text).await?;
        Ok(())
    }

    async fn value(&mut self, locator: Locator) -> CheckResult<String> {
        let elem = self.find(locator).await?;
        Ok(elem.value().await?.unwrap_or_default())
    }

    async fn click(&mut self, locator: Locator) -> CheckResult<()> {
        let elem = self.find(locator).await?;
        elem.click().await?;
        Ok(())
    }

    async fn select_by_label(&mut self, locator: Locator, label: &str) -> CheckResult<()> {
        let select = self.find(locator).await?;
        for option in select.find_all(By::Tag("option")).await? {
            if option.text().await?.trim() == label {
                option.click().await?;
                return Ok(());
            }
        }
        Err(CheckError::NotFound(format!(
            "option labeled {label:?} in {locator}"
        )))
    }

    async fn select_by_index(&mut self, locator: Locator, index: usize) -> CheckResult<()> {
        let select = self.find(locator).await?;
        let options = select.find_all(By::Tag("option")).await?;
        match options.get(index) {
            Some(option) => {
                option.click().await?;
                Ok(())
            }
            None => Err(CheckError::NotFound(format!(
                "option at index {index} in {locator} ({} options present)",
                options.len()
            ))),
        }
    }

    async fn page_source(&mut self) -> CheckResult<String> {
        Ok(self.driver()?.source().await?)
    }

    async fn close(&mut self) -> CheckResult<()> {
        if let Some(driver) = self.driver.take() {
            info!("Closing browser session");
            driver.quit().await?;
        }
        Ok(())
    }
}

/// Poll the WebDriver endpoint's /status route until it responds.
async fn wait_for_ready(webdriver_url: &str, timeout: Duration) -> CheckResult<()> {
    let status_url = format!("{}/status", webdriver_url.trim_end_matches('/'));
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(2))
        .build()?;

    let start = std::time::Instant::now();
    let mut attempts = 0;

    while start.elapsed() < timeout {
        attempts += 1;

        match client.get(&status_url).send().await {
            Ok(resp) if resp.status().is_success() => {
                debug!("WebDriver endpoint ready after {attempts} attempt(s)");
                return Ok(());
            }
            Ok(resp) => {
                warn!("WebDriver status check returned {}", resp.status());
            }
            Err(e) => {
                if attempts == 1 {
                    info!("Waiting for WebDriver endpoint at {status_url}...");
                }
                // Connection refused is expected while the driver is starting
                if !e.is_connect() {
                    warn!("WebDriver status check error: {e}");
                }
            }
        }

        sleep(Duration::from_millis(100)).await;
    }

    Err(CheckError::WebDriverNotReady(attempts))
}
