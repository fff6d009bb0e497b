//! Rendering a tailored resume to PDF.
//!
//! The HTML template is rendered in-process and printed to PDF through
//! headless Chromium, reusing the browser engine the scraper already
//! carries instead of a second PDF toolchain.

use crate::error::Result;
use async_trait::async_trait;
use autoapply_browser::BrowserEngine;
use autoapply_core::{ResumeSection, TailoredResume};

/// Renders a structured resume into a downloadable document.
#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    /// Produce PDF bytes for the given resume.
    async fn render_pdf(&self, resume: &TailoredResume) -> Result<Vec<u8>>;
}

/// [`DocumentRenderer`] that prints an HTML template via headless Chromium.
///
/// Each render acquires and releases its own browser, same scoped-ownership
/// contract as a scrape session.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChromiumPdfRenderer;

#[async_trait]
impl DocumentRenderer for ChromiumPdfRenderer {
    async fn render_pdf(&self, resume: &TailoredResume) -> Result<Vec<u8>> {
        let html = build_html(resume);

        let engine = BrowserEngine::new(true).await?;
        let outcome = async {
            let page = engine.new_page().await?;
            page.set_content(&html).await?;
            page.print_to_pdf().await
        }
        .await;

        if let Err(e) = engine.close().await {
            tracing::warn!("Browser teardown failed after render: {}", e);
        }

        Ok(outcome?)
    }
}

/// Render the resume into a single-page HTML document.
pub fn build_html(resume: &TailoredResume) -> String {
    let mut body = String::new();

    body.push_str(&format!("<h1>{}</h1>\n", escape(&resume.full_name)));
    if let Some(contact) = &resume.contact_line {
        body.push_str(&format!("<p class=\"contact\">{}</p>\n", escape(contact)));
    }
    if let Some(summary) = &resume.summary {
        body.push_str("<h2>Summary</h2>\n");
        body.push_str(&format!("<p>{}</p>\n", escape(summary)));
    }
    if !resume.skills.is_empty() {
        body.push_str("<h2>Skills</h2>\n<p class=\"skills\">");
        let skills: Vec<String> = resume.skills.iter().map(|s| escape(s)).collect();
        body.push_str(&skills.join(" · "));
        body.push_str("</p>\n");
    }
    push_sections(&mut body, "Experience", &resume.experience);
    push_sections(&mut body, "Education", &resume.education);

    format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\">\
         <style>{STYLE}</style></head><body>{body}</body></html>"
    )
}

fn push_sections(body: &mut String, heading: &str, sections: &[ResumeSection]) {
    if sections.is_empty() {
        return;
    }
    body.push_str(&format!("<h2>{heading}</h2>\n"));
    for section in sections {
        body.push_str(&format!("<h3>{}</h3>\n", escape(&section.heading)));
        if let Some(sub) = &section.subheading {
            body.push_str(&format!("<p class=\"sub\">{}</p>\n", escape(sub)));
        }
        if !section.bullets.is_empty() {
            body.push_str("<ul>\n");
            for bullet in &section.bullets {
                body.push_str(&format!("<li>{}</li>\n", escape(bullet)));
            }
            body.push_str("</ul>\n");
        }
    }
}

const STYLE: &str = "body{font-family:Helvetica,Arial,sans-serif;font-size:11pt;\
margin:2.2cm;color:#1a1a1a}h1{font-size:20pt;margin-bottom:0}h2{font-size:13pt;\
border-bottom:1px solid #999;margin-top:1em}h3{font-size:11.5pt;margin-bottom:0}\
p.contact,p.sub{color:#555;margin-top:2px}ul{margin-top:4px}";

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_resume() -> TailoredResume {
        TailoredResume {
            full_name: "Ada Lovelace".to_string(),
            contact_line: Some("ada@example.com".to_string()),
            summary: Some("Engine programmer & analyst".to_string()),
            skills: vec!["Rust".to_string(), "Analysis".to_string()],
            experience: vec![ResumeSection {
                heading: "Analyst".to_string(),
                subheading: Some("Babbage & Co — 1842".to_string()),
                bullets: vec!["Wrote the first program".to_string()],
            }],
            education: vec![],
        }
    }

    #[test]
    fn test_html_contains_fields() {
        let html = build_html(&sample_resume());
        assert!(html.contains("Ada Lovelace"));
        assert!(html.contains("Rust"));
        assert!(html.contains("Wrote the first program"));
        assert!(!html.contains("<h2>Education</h2>"));
    }

    #[test]
    fn test_html_escapes_markup() {
        let mut resume = sample_resume();
        resume.full_name = "<script>alert(1)</script>".to_string();
        let html = build_html(&resume);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_ampersand_escaped_in_subheading() {
        let html = build_html(&sample_resume());
        assert!(html.contains("Babbage &amp; Co"));
    }
}
