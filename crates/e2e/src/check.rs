//! The form submission check procedure
//!
//! Drives one browser session through the registration form: fill every
//! field, submit, and assert the results view echoes the submitted values.
//! The sequence is deterministic; the first violated expectation fails the
//! check with a message naming it.

use std::time::Duration;

use tracing::info;

use crate::config::{self, Params};
use crate::error::{CheckError, CheckResult};
use crate::select::{language_level_strategies, select_with_fallback};
use crate::session::{locators, Session};

pub struct FormSubmissionCheck {
    params: Params,
    explicit_wait: Duration,
}

impl FormSubmissionCheck {
    pub fn new(params: Params) -> Self {
        Self {
            params,
            explicit_wait: config::EXPLICIT_WAIT,
        }
    }

    pub fn with_explicit_wait(mut self, explicit_wait: Duration) -> Self {
        self.explicit_wait = explicit_wait;
        self
    }

    /// Run the full fill-submit-verify sequence against `session`.
    ///
    /// The session is left open on return; use [`run_to_completion`] to
    /// guarantee release on every exit path.
    pub async fn run<S: Session + ?Sized>(&self, session: &mut S) -> CheckResult<()> {
        let params = &self.params;
        info!("=== Starting form submission check ===");
        info!("Parameters - username: {}, password: [hidden]", params.username);

        session.navigate(&params.base_url).await?;
        session.wait_present(locators::FORM, self.explicit_wait).await?;
        info!("Form loaded");

        session.fill(locators::USERNAME, &params.username).await?;
        info!("Username entered: {}", params.username);

        let email = params.email();
        session.fill(locators::EMAIL, &email).await?;
        info!("Email entered: {email}");

        session.fill(locators::PASSWORD, &params.password).await?;
        info!("Password entered");

        session.fill(locators::CONFIRM_PASSWORD, &params.password).await?;
        info!("Password confirmation entered");

        // Re-check what was just written; guards against widgets that
        // mutate or mask the value.
        let password_value = session.value(locators::PASSWORD).await?;
        let confirm_value = session.value(locators::CONFIRM_PASSWORD).await?;
        if password_value != confirm_value {
            return Err(CheckError::Assertion(
                "password and confirmation fields do not match after input".into(),
            ));
        }
        info!("Password fields match");

        session.fill(locators::BIRTH_DATE, config::BIRTH_DATE_INPUT).await?;
        info!("Birth date entered: {}", config::BIRTH_DATE_INPUT);

        select_with_fallback(
            session,
            locators::LANGUAGE_LEVEL,
            &language_level_strategies(),
        )
        .await?;

        session
            .wait_interactable(locators::SUBMIT, self.explicit_wait)
            .await?;
        session.click(locators::SUBMIT).await?;
        info!("Form submitted");

        session.wait_present(locators::OUTPUT, self.explicit_wait).await?;
        info!("Results container present");

        let page = session.page_source().await?;
        self.verify_results(&page, &email)?;

        info!("=== Form submission check passed ===");
        Ok(())
    }

    /// Assert the rendered results echo the submitted values. Each expected
    /// value is checked independently so the failure names what is missing.
    fn verify_results(&self, page: &str, email: &str) -> CheckResult<()> {
        if !contains_case_tolerant(page, &self.params.username) {
            return Err(CheckError::Assertion(format!(
                "username {:?} not found in the results page",
                self.params.username
            )));
        }
        info!("Username found in results");

        if !contains_case_tolerant(page, email) {
            return Err(CheckError::Assertion(format!(
                "email {email:?} not found in the results page"
            )));
        }
        info!("Email found in results");

        let variants = birth_date_variants(config::BIRTH_DATE_EXPECTED);
        if !variants.iter().any(|v| page.contains(v.as_str())) {
            return Err(CheckError::Assertion(format!(
                "birth date {} not found in the results page (accepted separators: -, ., /)",
                config::BIRTH_DATE_EXPECTED
            )));
        }
        info!("Birth date found in results: {}", config::BIRTH_DATE_EXPECTED);

        Ok(())
    }
}

/// Run the check, then release the session regardless of outcome. A check
/// failure takes precedence over a close failure in the reported error.
pub async fn run_to_completion<S: Session>(
    mut session: S,
    check: &FormSubmissionCheck,
) -> CheckResult<()> {
    let outcome = check.run(&mut session).await;
    let closed = session.close().await;
    outcome.and(closed)
}

/// Raw text presence, accepting the exact form or the lowercased form.
fn contains_case_tolerant(page: &str, needle: &str) -> bool {
    page.contains(needle) || page.contains(&needle.to_lowercase())
}

/// The expected date in each accepted separator variant.
fn birth_date_variants(expected: &str) -> [String; 3] {
    [
        expected.to_string(),
        expected.replace('-', "."),
        expected.replace('-', "/"),
    ]
}
