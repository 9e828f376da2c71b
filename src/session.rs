//! Browser session control.
//!
//! One [`BrowserSession`] per scenario: it launches chromium over the Chrome
//! DevTools Protocol, pumps the CDP event stream on a background task, and
//! hands out [`PageHandle`]s bound to open tabs. The handle exposes the
//! element primitives the page objects are built from; every lookup
//! auto-waits under the configured poll budget, so callers never race the
//! React rendering on the DemoQA pages.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::dom::SetFileInputFilesParams;
use chromiumoxide::cdp::browser_protocol::page::{
    CaptureScreenshotFormat, CaptureScreenshotParams,
};
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use futures::StreamExt;
use tracing::{debug, info};

use crate::config::SuiteConfig;
use crate::error::{SuiteError, SuiteResult};
use crate::wait::{poll_until, PollOptions};

/// A live browser owned by one scenario.
#[derive(Debug)]
pub struct BrowserSession {
    browser: Browser,
    handle: tokio::task::JoinHandle<()>,
    base_url: String,
    wait: PollOptions,
}

impl BrowserSession {
    /// Launch a browser per the suite configuration.
    pub async fn launch(config: &SuiteConfig) -> SuiteResult<Self> {
        let mut builder = BrowserConfig::builder();

        if !config.headless {
            builder = builder.with_head();
        }
        if !config.sandbox {
            builder = builder.no_sandbox();
        }
        if let Some(ref path) = config.chromium_path {
            builder = builder.chrome_executable(path);
        }

        let cdp_config = builder
            .build()
            .map_err(|message| SuiteError::BrowserLaunch { message })?;

        let (browser, mut handler) =
            Browser::launch(cdp_config)
                .await
                .map_err(|e| SuiteError::BrowserLaunch {
                    message: e.to_string(),
                })?;

        // Pump CDP events until the connection drops
        let handle = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        info!(headless = config.headless, "browser launched");

        Ok(Self {
            browser,
            handle,
            base_url: config.base_url.clone(),
            wait: config.wait,
        })
    }

    /// Open a new tab at a path under the configured base URL.
    pub async fn open(&self, path: &str) -> SuiteResult<PageHandle> {
        let url = format!("{}{}", self.base_url, path);
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| SuiteError::Page {
                message: e.to_string(),
            })?;

        let handle = PageHandle {
            page,
            wait: self.wait,
        };
        handle.goto(&url).await?;
        // The demo site floats an ad banner and footer over the lower
        // controls; stripping them keeps CDP clicks from being intercepted.
        handle.dismiss_overlays().await?;
        Ok(handle)
    }

    /// Close the browser and wait for the event task to drain.
    pub async fn close(mut self) -> SuiteResult<()> {
        self.browser
            .close()
            .await
            .map_err(|e| SuiteError::Page {
                message: e.to_string(),
            })?;
        let _ = self.handle.await;
        Ok(())
    }
}

/// A handle to one open tab.
#[derive(Debug, Clone)]
pub struct PageHandle {
    page: Page,
    wait: PollOptions,
}

impl PageHandle {
    /// Navigate and wait for the load to finish.
    pub async fn goto(&self, url: &str) -> SuiteResult<()> {
        debug!(url, "navigating");
        self.page
            .goto(url)
            .await
            .map_err(|e| SuiteError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        self.page
            .wait_for_navigation()
            .await
            .map_err(|e| SuiteError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    /// Resolve a selector to an element, polling until it appears.
    pub async fn find(&self, selector: &str) -> SuiteResult<Element> {
        let result = poll_until(&self.wait, selector, || async move {
            Ok(self.page.find_element(selector).await.ok())
        })
        .await;
        result.map_err(|_| SuiteError::ElementNotFound {
            selector: selector.to_string(),
        })
    }

    /// Click the first element matching the selector.
    pub async fn click(&self, selector: &str) -> SuiteResult<()> {
        let element = self.find(selector).await?;
        element
            .scroll_into_view()
            .await
            .map_err(|e| SuiteError::Page {
                message: e.to_string(),
            })?;
        element.click().await.map_err(|e| SuiteError::Page {
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Overwrite the element's current value with `text`.
    ///
    /// Focuses the control, selects the existing content, and types over
    /// it so the page sees real key events (direct value writes bypass the
    /// React change handlers on the site under test).
    pub async fn fill(&self, selector: &str, text: &str) -> SuiteResult<()> {
        let element = self.find(selector).await?;
        element.click().await.map_err(|e| SuiteError::Page {
            message: e.to_string(),
        })?;
        element
            .call_js_fn("function() { this.select(); }", false)
            .await
            .map_err(|e| SuiteError::Page {
                message: e.to_string(),
            })?;
        element.type_str(text).await.map_err(|e| SuiteError::Page {
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Type into the element one character at a time.
    ///
    /// Autocomplete widgets re-render their suggestion list per keystroke;
    /// a bulk write outruns them.
    pub async fn type_slowly(
        &self,
        selector: &str,
        text: &str,
        per_char: Duration,
    ) -> SuiteResult<()> {
        let element = self.find(selector).await?;
        element.click().await.map_err(|e| SuiteError::Page {
            message: e.to_string(),
        })?;
        for ch in text.chars() {
            element
                .type_str(ch.to_string())
                .await
                .map_err(|e| SuiteError::Page {
                    message: e.to_string(),
                })?;
            tokio::time::sleep(per_char).await;
        }
        Ok(())
    }

    /// Press a key with the element focused (e.g. "Enter").
    pub async fn press(&self, selector: &str, key: &str) -> SuiteResult<()> {
        let element = self.find(selector).await?;
        element.press_key(key).await.map_err(|e| SuiteError::Page {
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Rendered text of the first matching element.
    pub async fn text(&self, selector: &str) -> SuiteResult<String> {
        let element = self.find(selector).await?;
        let text = element.inner_text().await.map_err(|e| SuiteError::Page {
            message: e.to_string(),
        })?;
        Ok(text.unwrap_or_default())
    }

    /// Current `value` property of a form control.
    pub async fn value(&self, selector: &str) -> SuiteResult<String> {
        self.eval(&format!(
            "(() => {{ const el = document.querySelector({selector:?}); return el ? el.value : ''; }})()"
        ))
        .await
    }

    /// Whether a checkbox/radio control is checked.
    pub async fn checked(&self, selector: &str) -> SuiteResult<bool> {
        self.eval(&format!(
            "(() => {{ const el = document.querySelector({selector:?}); return !!(el && el.checked); }})()"
        ))
        .await
    }

    /// Whether any element matches the selector right now (no waiting).
    pub async fn exists(&self, selector: &str) -> SuiteResult<bool> {
        self.eval(&format!(
            "document.querySelector({selector:?}) !== null"
        ))
        .await
    }

    /// Whether a matching element is currently rendered and visible.
    pub async fn visible(&self, selector: &str) -> SuiteResult<bool> {
        self.eval(&format!(
            "(() => {{ const el = document.querySelector({selector:?}); return !!(el && el.offsetParent !== null); }})()"
        ))
        .await
    }

    /// Number of elements matching the selector.
    pub async fn count(&self, selector: &str) -> SuiteResult<usize> {
        self.eval(&format!(
            "document.querySelectorAll({selector:?}).length"
        ))
        .await
    }

    /// A computed CSS property of the first matching element.
    pub async fn computed_style(&self, selector: &str, property: &str) -> SuiteResult<String> {
        self.eval(&format!(
            "(() => {{ const el = document.querySelector({selector:?}); \
             return el ? getComputedStyle(el).getPropertyValue({property:?}) : ''; }})()"
        ))
        .await
    }

    /// Evaluate a JavaScript expression and decode the result.
    pub async fn eval<T: serde::de::DeserializeOwned>(&self, expression: &str) -> SuiteResult<T> {
        let result = self
            .page
            .evaluate(expression)
            .await
            .map_err(|e| SuiteError::Page {
                message: e.to_string(),
            })?;
        result.into_value().map_err(|e| SuiteError::Page {
            message: e.to_string(),
        })
    }

    /// Attach files to a file input via `DOM.setFileInputFiles`.
    ///
    /// Paths are made absolute first; CDP rejects relative ones.
    pub async fn set_input_files(&self, selector: &str, paths: &[PathBuf]) -> SuiteResult<()> {
        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            let absolute = std::fs::canonicalize(path)?;
            files.push(absolute.to_string_lossy().into_owned());
        }

        let element = self.find(selector).await?;
        let params = SetFileInputFilesParams::builder()
            .files(files)
            .object_id(element.remote_object_id.clone())
            .build()
            .map_err(|message| SuiteError::Input { message })?;
        self.page
            .execute(params)
            .await
            .map_err(|e| SuiteError::Page {
                message: e.to_string(),
            })?;
        Ok(())
    }

    /// Capture a PNG screenshot of the current viewport.
    pub async fn screenshot_png(&self) -> SuiteResult<Vec<u8>> {
        let params = CaptureScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .build();
        let screenshot = self
            .page
            .execute(params)
            .await
            .map_err(|e| SuiteError::Screenshot {
                message: e.to_string(),
            })?;

        use base64::Engine;
        base64::engine::general_purpose::STANDARD
            .decode(&screenshot.data)
            .map_err(|e| SuiteError::Screenshot {
                message: e.to_string(),
            })
    }

    /// Capture a screenshot and write it to `path`, creating parent
    /// directories as needed.
    pub async fn screenshot_to(&self, path: &Path) -> SuiteResult<()> {
        let png = self.screenshot_png().await?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, png).await?;
        info!(path = %path.display(), "screenshot captured");
        Ok(())
    }

    /// Remove the fixed ad banner and footer the demo site overlays on
    /// every page.
    pub async fn dismiss_overlays(&self) -> SuiteResult<()> {
        let _: bool = self
            .eval(
                "(() => { document.querySelectorAll('#fixedban, footer').forEach(el => el.remove()); return true; })()",
            )
            .await?;
        Ok(())
    }

    /// Wait budget in effect for this page.
    #[must_use]
    pub const fn wait(&self) -> &PollOptions {
        &self.wait
    }
}
