//! Login form automation.

use crate::error::{Result, ScrapeError};
use crate::selectors::LoginSelectors;
use autoapply_browser::{diagnostics, PageDriver};
use autoapply_core::ScraperConfig;
use std::time::Duration;

/// How long to wait for the submit control to become clickable.
const SUBMIT_CLICKABLE_TIMEOUT: Duration = Duration::from_secs(5);

/// Drives the provider's login form to establish an authenticated session.
///
/// Credentials are passed in explicitly via [`ScraperConfig`]; there are no
/// ambient environment reads here. Any missing element or a timeout waiting
/// for the post-login navigation signal is fatal to the session; the
/// scraper assumes credentials are good and does not handle captcha or 2FA.
pub struct SessionAuthenticator<'a> {
    page: &'a dyn PageDriver,
    config: &'a ScraperConfig,
    selectors: &'a LoginSelectors,
}

impl<'a> SessionAuthenticator<'a> {
    #[must_use]
    pub fn new(
        page: &'a dyn PageDriver,
        config: &'a ScraperConfig,
        selectors: &'a LoginSelectors,
    ) -> Self {
        Self {
            page,
            config,
            selectors,
        }
    }

    /// Log in with the configured credentials.
    ///
    /// On failure a diagnostic snapshot is captured before the
    /// [`ScrapeError::Authentication`] propagates.
    pub async fn login(&self) -> Result<()> {
        match self.try_login().await {
            Ok(()) => {
                tracing::info!("Authenticated session established");
                Ok(())
            }
            Err(e) => {
                tracing::error!("Authentication failed: {}", e);
                diagnostics::capture_snapshot(self.page, "auth-failure").await;
                Err(e)
            }
        }
    }

    async fn try_login(&self) -> Result<()> {
        let credentials = &self.config.credentials;
        let (Some(identity), Some(secret)) = (
            credentials.identity.as_deref(),
            credentials.secret.as_deref(),
        ) else {
            // The controller only invokes us when credentials are configured
            return Err(auth_err("credentials not configured"));
        };

        self.page
            .goto(&self.config.login_url)
            .await
            .map_err(|e| auth_err(format!("could not reach login page: {e}")))?;

        self.page
            .fill(&self.selectors.identity_input, identity)
            .await
            .map_err(|e| auth_err(format!("identity field: {e}")))?;

        self.page
            .fill(&self.selectors.secret_input, secret)
            .await
            .map_err(|e| auth_err(format!("secret field: {e}")))?;

        // Persistent sessions would leak auth state into later sessions
        self.page
            .uncheck(&self.selectors.remember_me)
            .await
            .map_err(|e| auth_err(format!("remember-me checkbox: {e}")))?;

        // The form renders a consent overlay on some variants; clicking
        // through it submits the wrong control
        self.page
            .wait_for_clickable(&self.selectors.submit, SUBMIT_CLICKABLE_TIMEOUT)
            .await
            .map_err(|e| auth_err(format!("submit control: {e}")))?;

        self.page
            .click(&self.selectors.submit)
            .await
            .map_err(|e| auth_err(format!("submit click: {e}")))?;

        self.page
            .wait_for_url_contains(
                &self.config.logged_in_url_fragment,
                Duration::from_millis(self.config.login_timeout_ms),
            )
            .await
            .map_err(|_| auth_err("post-login navigation signal never arrived"))?;

        Ok(())
    }
}

fn auth_err(reason: impl Into<String>) -> ScrapeError {
    ScrapeError::Authentication {
        reason: reason.into(),
    }
}
