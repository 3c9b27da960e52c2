//! Selection-strategy fallback for localized selection controls
//!
//! The language-level control carries differently localized option labels
//! depending on the page variant. Selection is modeled as an ordered list of
//! strategies tried in sequence, short-circuiting on the first success. If
//! every strategy fails, the last error propagates.

use tracing::{debug, info};

use crate::error::{CheckError, CheckResult};
use crate::session::{Locator, Session};

/// One way of picking an option from a selection control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionStrategy {
    /// Match the option's visible label exactly.
    VisibleLabel(&'static str),
    /// Pick the option at a zero-based position.
    Index(usize),
}

impl std::fmt::Display for SelectionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionStrategy::VisibleLabel(label) => write!(f, "label {label:?}"),
            SelectionStrategy::Index(index) => write!(f, "index {index}"),
        }
    }
}

impl SelectionStrategy {
    async fn apply<S: Session + ?Sized>(
        &self,
        session: &mut S,
        locator: Locator,
    ) -> CheckResult<()> {
        match self {
            SelectionStrategy::VisibleLabel(label) => {
                session.select_by_label(locator, label).await
            }
            SelectionStrategy::Index(index) => session.select_by_index(locator, *index).await,
        }
    }
}

/// Fallback order for the language-level control: the English label, the
/// Russian label, then the third option by position.
pub fn language_level_strategies() -> Vec<SelectionStrategy> {
    vec![
        SelectionStrategy::VisibleLabel("Intermediate"),
        SelectionStrategy::VisibleLabel("Средний"),
        SelectionStrategy::Index(2),
    ]
}

/// Try each strategy in order against the control at `locator`. Returns on
/// the first success; if none succeeds, the last failure is returned.
pub async fn select_with_fallback<S: Session + ?Sized>(
    session: &mut S,
    locator: Locator,
    strategies: &[SelectionStrategy],
) -> CheckResult<()> {
    let mut last_err = None;

    for strategy in strategies {
        match strategy.apply(session, locator).await {
            Ok(()) => {
                info!("Selected option in {locator} by {strategy}");
                return Ok(());
            }
            Err(e) => {
                debug!("Selection by {strategy} failed: {e}");
                last_err = Some(e);
            }
        }
    }

    Err(last_err.unwrap_or_else(|| {
        CheckError::NotFound(format!("no selection strategies given for {locator}"))
    }))
}
