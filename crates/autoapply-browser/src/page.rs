//! The [`PageDriver`] capability trait and its CDP-backed implementation.
//!
//! The scraper depends only on this trait, so tests substitute a
//! deterministic fake page for the real Chromium-driven one.

use crate::error::{BrowserError, Result};
use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::page::{CaptureScreenshotFormat, PrintToPdfParams};
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use std::time::Duration;
use tokio::time::Instant;

/// Polling interval for bounded condition waits.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Capabilities the scraper needs from a rendered page.
///
/// Every wait is bounded by an explicit timeout; there is no unbounded
/// blocking operation on this trait.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Navigate to a URL and wait for the document to load.
    async fn goto(&self, url: &str) -> Result<()>;

    /// The page's current URL.
    async fn current_url(&self) -> Result<String>;

    /// Wait until at least one element matches `selector`.
    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<()>;

    /// Number of elements currently matching `selector`. A selector that
    /// matches nothing is a zero count, not an error.
    async fn count(&self, selector: &str) -> Result<usize>;

    /// Click the `index`-th element matching `selector`.
    async fn click_nth(&self, selector: &str, index: usize) -> Result<()>;

    /// Trimmed text of the first element matching `selector`, polling up to
    /// `timeout`. Resolves to `None` if nothing matched in time.
    async fn text_of(&self, selector: &str, timeout: Duration) -> Result<Option<String>>;

    /// Attribute value of the first `descendant` under the `index`-th
    /// element matching `selector`. Both lookups stay on the same element,
    /// so a sibling missing its descendant cannot shift the pairing.
    async fn attr_of_descendant(
        &self,
        selector: &str,
        index: usize,
        descendant: &str,
        attr: &str,
    ) -> Result<Option<String>>;

    /// Trimmed text of the first element matching `selector` whose visible
    /// text contains one of `cues` (case-insensitive). Used for fields whose
    /// markup is too unstable for structural selectors.
    async fn text_matching(
        &self,
        selector: &str,
        cues: &[&str],
        timeout: Duration,
    ) -> Result<Option<String>>;

    /// Fill a form field.
    async fn fill(&self, selector: &str, value: &str) -> Result<()>;

    /// Click the first element matching `selector`.
    async fn click(&self, selector: &str) -> Result<()>;

    /// Uncheck a checkbox if present and checked; absence is tolerated.
    async fn uncheck(&self, selector: &str) -> Result<()>;

    /// Wait until the element is present AND is the topmost interactive
    /// element at its own screen position, so a click cannot land on an
    /// overlay covering it.
    async fn wait_for_clickable(&self, selector: &str, timeout: Duration) -> Result<()>;

    /// Wait until the page URL contains `fragment`.
    async fn wait_for_url_contains(&self, fragment: &str, timeout: Duration) -> Result<()>;

    /// Scroll the given container (or the window if it doesn't match) to its
    /// end, to trigger lazy loading.
    async fn scroll_to_end(&self, selector: &str) -> Result<()>;

    /// Capture a PNG screenshot of the current viewport.
    async fn screenshot(&self) -> Result<Vec<u8>>;
}

/// [`PageDriver`] backed by a chromiumoxide CDP page.
pub struct CdpPage {
    page: Page,
}

impl CdpPage {
    #[must_use]
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// Replace the page's document with the given HTML.
    pub async fn set_content(&self, html: &str) -> Result<()> {
        self.page
            .set_content(html)
            .await
            .map_err(|e| BrowserError::NavigationError(e.to_string()))?;
        Ok(())
    }

    /// Print the current document to PDF.
    pub async fn print_to_pdf(&self) -> Result<Vec<u8>> {
        self.page
            .pdf(PrintToPdfParams::default())
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))
    }

    /// Close the underlying page.
    pub async fn close(self) -> Result<()> {
        self.page
            .close()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        Ok(())
    }

    async fn eval_bool(&self, script: String) -> Result<bool> {
        let result = self
            .page
            .evaluate(script)
            .await
            .map_err(|e| BrowserError::EvaluationError(e.to_string()))?;
        result
            .into_value::<bool>()
            .map_err(|e| BrowserError::EvaluationError(e.to_string()))
    }
}

/// JS string literal for a selector, so arbitrary quotes can't break scripts.
fn js_quote(selector: &str) -> String {
    serde_json::to_string(selector).unwrap_or_else(|_| "\"\"".to_string())
}

#[async_trait]
impl PageDriver for CdpPage {
    async fn goto(&self, url: &str) -> Result<()> {
        self.page
            .goto(url)
            .await
            .map_err(|e| BrowserError::NavigationError(format!("{url}: {e}")))?;
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        let url = self
            .page
            .url()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        url.ok_or_else(|| BrowserError::NavigationError("page has no URL".to_string()))
    }

    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if self.page.find_element(selector).await.is_ok() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(BrowserError::Timeout(format!(
                    "waiting for selector {selector}"
                )));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn count(&self, selector: &str) -> Result<usize> {
        match self.page.find_elements(selector).await {
            Ok(elements) => Ok(elements.len()),
            Err(_) => Ok(0),
        }
    }

    async fn click_nth(&self, selector: &str, index: usize) -> Result<()> {
        let elements = self
            .page
            .find_elements(selector)
            .await
            .map_err(|_| BrowserError::SelectorNotFound(selector.to_string()))?;
        let element = elements
            .get(index)
            .ok_or_else(|| BrowserError::SelectorNotFound(format!("{selector}[{index}]")))?;
        element
            .click()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        Ok(())
    }

    async fn text_of(&self, selector: &str, timeout: Duration) -> Result<Option<String>> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Ok(element) = self.page.find_element(selector).await {
                let text = element
                    .inner_text()
                    .await
                    .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
                return Ok(text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()));
            }
            if Instant::now() >= deadline {
                return Ok(None);
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn attr_of_descendant(
        &self,
        selector: &str,
        index: usize,
        descendant: &str,
        attr: &str,
    ) -> Result<Option<String>> {
        let elements = self
            .page
            .find_elements(selector)
            .await
            .map_err(|_| BrowserError::SelectorNotFound(selector.to_string()))?;
        let Some(element) = elements.get(index) else {
            return Ok(None);
        };
        let Ok(child) = element.find_element(descendant).await else {
            return Ok(None);
        };
        let value = child
            .attribute(attr)
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        Ok(value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()))
    }

    async fn text_matching(
        &self,
        selector: &str,
        cues: &[&str],
        timeout: Duration,
    ) -> Result<Option<String>> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Ok(elements) = self.page.find_elements(selector).await {
                for element in &elements {
                    let Ok(Some(text)) = element.inner_text().await else {
                        continue;
                    };
                    let lower = text.to_lowercase();
                    if cues.iter().any(|cue| lower.contains(&cue.to_lowercase())) {
                        return Ok(Some(text.trim().to_string()));
                    }
                }
            }
            if Instant::now() >= deadline {
                return Ok(None);
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn fill(&self, selector: &str, value: &str) -> Result<()> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|_| BrowserError::SelectorNotFound(selector.to_string()))?;
        element
            .click()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        element
            .type_str(value)
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|_| BrowserError::SelectorNotFound(selector.to_string()))?;
        element
            .click()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        Ok(())
    }

    async fn uncheck(&self, selector: &str) -> Result<()> {
        let script = format!(
            "(() => {{ const el = document.querySelector({sel}); \
             if (el && el.checked) {{ el.click(); }} return true; }})()",
            sel = js_quote(selector)
        );
        self.eval_bool(script).await?;
        Ok(())
    }

    async fn wait_for_clickable(&self, selector: &str, timeout: Duration) -> Result<()> {
        // elementFromPoint at the element's own center must resolve to the
        // element (or a descendant), otherwise an overlay sits on top of it.
        let script = format!(
            "(() => {{ const el = document.querySelector({sel}); \
             if (!el) return false; \
             const r = el.getBoundingClientRect(); \
             if (r.width === 0 || r.height === 0) return false; \
             const hit = document.elementFromPoint(r.x + r.width / 2, r.y + r.height / 2); \
             return hit !== null && (hit === el || el.contains(hit)); }})()",
            sel = js_quote(selector)
        );

        let deadline = Instant::now() + timeout;
        loop {
            if self.eval_bool(script.clone()).await? {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(BrowserError::Timeout(format!(
                    "waiting for {selector} to become clickable"
                )));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn wait_for_url_contains(&self, fragment: &str, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Ok(Some(url)) = self.page.url().await {
                if url.contains(fragment) {
                    return Ok(());
                }
            }
            if Instant::now() >= deadline {
                return Err(BrowserError::Timeout(format!(
                    "waiting for URL containing {fragment}"
                )));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn scroll_to_end(&self, selector: &str) -> Result<()> {
        let script = format!(
            "(() => {{ const el = document.querySelector({sel}); \
             if (el) {{ el.scrollTop = el.scrollHeight; }} \
             else {{ window.scrollBy(0, document.body.scrollHeight); }} \
             return true; }})()",
            sel = js_quote(selector)
        );
        self.eval_bool(script).await?;
        Ok(())
    }

    async fn screenshot(&self) -> Result<Vec<u8>> {
        self.page
            .screenshot(
                ScreenshotParams::builder()
                    .format(CaptureScreenshotFormat::Png)
                    .build(),
            )
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_quote_escapes() {
        assert_eq!(js_quote("div.card"), "\"div.card\"");
        assert_eq!(js_quote("a[href=\"x\"]"), "\"a[href=\\\"x\\\"]\"");
    }

    #[test]
    fn test_driver_is_object_safe() {
        fn takes_dyn(_driver: &dyn PageDriver) {}
        let _ = takes_dyn;
    }
}
