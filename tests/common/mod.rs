//! Shared scenario harness.
//!
//! Each scenario owns one session: the harness launches the browser and
//! opens the page under test. When the scenario body fails, a screenshot
//! named after the scenario is captured into the configured directory
//! before the failure propagates to the test runner.
#![allow(dead_code)]

use std::sync::Once;

use tracing_subscriber::EnvFilter;

use demoqa_e2e::{
    fixtures, BrowserSession, PageHandle, SuiteConfig, SuiteError, SuiteResult,
};

static TRACING: Once = Once::new();

/// Install the tracing subscriber once per test binary. `RUST_LOG` tunes it.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    });
}

/// Suite configuration for this run; falls back to the shared demo account
/// when no credentials are in the environment.
pub fn config() -> SuiteConfig {
    let mut config = SuiteConfig::from_env();
    if config.user_id.is_empty() || config.token.is_empty() {
        let account = fixtures::example_account();
        config = config.with_account(account.user_id, account.token);
    }
    config
}

/// Inline assertion for scenario bodies.
pub fn ensure(condition: bool, message: impl Into<String>) -> SuiteResult<()> {
    if condition {
        Ok(())
    } else {
        Err(SuiteError::assertion(message))
    }
}

/// A browser-backed scenario: session, page, and failure screenshots.
pub struct UiScenario {
    title: String,
    config: SuiteConfig,
    session: BrowserSession,
    page: PageHandle,
}

impl UiScenario {
    /// Launch a session and open `path` under the configured base URL.
    pub async fn open(title: &str, path: &str) -> Self {
        init_tracing();
        let config = config();
        let session = BrowserSession::launch(&config)
            .await
            .expect("browser launch");
        let page = session.open(path).await.expect("open page under test");
        Self {
            title: title.to_string(),
            config,
            session,
            page,
        }
    }

    /// The open page under test.
    pub fn page(&self) -> PageHandle {
        self.page.clone()
    }

    /// The configuration this scenario runs with.
    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// Tear the session down. A failed outcome first captures a screenshot
    /// named by scenario title, then fails the test.
    pub async fn finish(self, outcome: SuiteResult<()>) {
        if let Err(error) = &outcome {
            let shot = self.config.screenshot_dir.join(format!("{}.png", self.title));
            if let Err(capture_error) = self.page.screenshot_to(&shot).await {
                eprintln!("screenshot capture failed: {capture_error}");
            }
            let _ = self.session.close().await;
            panic!("scenario '{}' failed: {error}", self.title);
        }
        self.session.close().await.expect("browser close");
    }
}
