//! Suite configuration.
//!
//! Everything a scenario needs to reach the application under test: base
//! URL, account credentials for the Book Store collection endpoints, and
//! browser launch options. Values come from the environment with sane
//! defaults, and every field has a builder-style override.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::wait::PollOptions;

/// Default target, the public DemoQA deployment.
pub const DEFAULT_BASE_URL: &str = "https://demoqa.com";

/// Suite configuration
#[derive(Debug, Clone)]
pub struct SuiteConfig {
    /// Base URL of the application under test
    pub base_url: String,
    /// Account id owning the book collection
    pub user_id: String,
    /// Bearer token for authenticated Book Store operations
    pub token: String,
    /// Run the browser headless
    pub headless: bool,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Directory failure screenshots are written to
    pub screenshot_dir: PathBuf,
    /// Wait budget applied to element lookups and settle checks
    pub wait: PollOptions,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_id: String::new(),
            token: String::new(),
            headless: true,
            sandbox: true,
            chromium_path: None,
            screenshot_dir: PathBuf::from("test-results/screenshots"),
            wait: PollOptions::default(),
        }
    }
}

impl SuiteConfig {
    /// Build a configuration from the environment.
    ///
    /// Recognized variables: `DEMOQA_BASE_URL`, `DEMOQA_USER_ID`,
    /// `DEMOQA_TOKEN`, `DEMOQA_HEADFUL` (any value disables headless),
    /// `CHROMIUM_PATH`.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = env::var("DEMOQA_BASE_URL") {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        if let Ok(user_id) = env::var("DEMOQA_USER_ID") {
            config.user_id = user_id;
        }
        if let Ok(token) = env::var("DEMOQA_TOKEN") {
            config.token = token;
        }
        if env::var("DEMOQA_HEADFUL").is_ok() {
            config.headless = false;
        }
        if let Ok(path) = env::var("CHROMIUM_PATH") {
            config.chromium_path = Some(path);
        }
        config
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the account credentials
    #[must_use]
    pub fn with_account(mut self, user_id: impl Into<String>, token: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self.token = token.into();
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Set the failure screenshot directory
    #[must_use]
    pub fn with_screenshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.screenshot_dir = dir.into();
        self
    }

    /// Set the wait budget for element lookups and settle checks
    #[must_use]
    pub const fn with_wait(mut self, timeout: Duration, poll_interval: Duration) -> Self {
        self.wait = PollOptions {
            timeout,
            poll_interval,
        };
        self
    }

    /// Absolute URL for a path under the application
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
