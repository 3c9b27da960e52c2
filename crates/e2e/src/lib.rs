//! Registration form submission check
//!
//! A Rust-controlled E2E check that drives a real browser over the WebDriver
//! protocol through a registration form and verifies the submitted values
//! come back in the results view.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                regform-e2e (Rust)                        │
//! ├──────────────────────────────────────────────────────────┤
//! │  FormSubmissionCheck                                     │
//! │    ├── navigate / wait for form                          │
//! │    ├── fill username, email, password x2, birth date     │
//! │    ├── select language level (strategy fallback)         │
//! │    ├── submit / wait for results                         │
//! │    └── verify echoed username, email, birth date         │
//! ├──────────────────────────────────────────────────────────┤
//! │  Session (trait)                                         │
//! │    └── WebDriverSession -> chromedriver -> browser       │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Parameters come from the CLI or environment; `USERNAME` and `PASSWORD`
//! are required and checked before any browser interaction. The session is
//! released on every exit path via [`check::run_to_completion`].

pub mod check;
pub mod config;
pub mod error;
pub mod select;
pub mod session;

pub use check::{run_to_completion, FormSubmissionCheck};
pub use config::Params;
pub use error::{CheckError, CheckResult};
pub use session::{Locator, Session, SessionConfig, WebDriverSession};
