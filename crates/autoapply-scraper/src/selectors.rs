//! CSS selectors for the scraped site.
//!
//! Selectors are inherently ecosystem-brittle; they are grouped here so a
//! layout change on the provider's side is a one-file fix. The defaults
//! track the provider's job search SPA as last observed.

use serde::{Deserialize, Serialize};

/// Selectors used by the discovery loop and extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingSelectors {
    /// One listing card in the results rail
    pub card: String,
    /// Anchor carrying the listing href, resolved relative to its card
    pub card_link: String,
    /// Scrollable container holding the cards
    pub results_container: String,
    /// Detail pane for the currently selected listing
    pub detail_pane: String,
    /// Title element inside the detail pane
    pub title: String,
    /// Company element inside the detail pane
    pub company: String,
    /// Location element inside the detail pane
    pub location: String,
    /// Description body inside the detail pane
    pub description: String,
    /// Loose selector scanned for cue-matched fields (posted date, salary);
    /// these have the least stable markup, so they are found by visible
    /// text rather than structure
    pub meta_text: String,
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self {
            card: "div.job-card-container".to_string(),
            card_link: "a.job-card-list__title".to_string(),
            results_container: "div.jobs-search-results-list".to_string(),
            detail_pane: "div.jobs-search__job-details".to_string(),
            title: "div.jobs-search__job-details h2".to_string(),
            company: "div.jobs-search__job-details .job-details-jobs-unified-top-card__company-name".to_string(),
            location: "div.jobs-search__job-details .job-details-jobs-unified-top-card__bullet"
                .to_string(),
            description: "div.jobs-search__job-details .jobs-description__content".to_string(),
            meta_text: "div.jobs-search__job-details .job-details-jobs-unified-top-card__job-insight, div.jobs-search__job-details span.tvm__text".to_string(),
        }
    }
}

/// Selectors for the provider's login form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginSelectors {
    pub identity_input: String,
    pub secret_input: String,
    /// Persistent-session checkbox; deselected when present
    pub remember_me: String,
    pub submit: String,
}

impl Default for LoginSelectors {
    fn default() -> Self {
        Self {
            identity_input: "input#username".to_string(),
            secret_input: "input#password".to_string(),
            remember_me: "input#rememberMeOptIn-checkbox".to_string(),
            submit: "button[type=submit]".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_nonempty() {
        let listing = ListingSelectors::default();
        assert!(!listing.card.is_empty());
        assert!(!listing.detail_pane.is_empty());

        let login = LoginSelectors::default();
        assert!(!login.identity_input.is_empty());
        assert!(!login.submit.is_empty());
    }

    #[test]
    fn test_selectors_deserialize_partial() {
        let toml_str = r#"card = "li.custom-card""#;
        let selectors: ListingSelectors = toml::from_str(toml_str).expect("deserialize");
        assert_eq!(selectors.card, "li.custom-card");
        assert_eq!(
            selectors.detail_pane,
            ListingSelectors::default().detail_pane
        );
    }
}
