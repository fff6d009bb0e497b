use autoapply_browser::{BrowserEngine, PageDriver};
use std::time::Duration;

#[tokio::test]
#[ignore] // Requires Chrome/Chromium installed
async fn test_browser_engine_creation() {
    let engine = BrowserEngine::new(true).await;
    assert!(engine.is_ok(), "Failed to create browser engine");
}

#[tokio::test]
#[ignore] // Requires Chrome/Chromium installed
async fn test_navigation_and_text() {
    let engine = BrowserEngine::new(true).await.unwrap();
    let page = engine.new_page().await.unwrap();

    page.goto("https://example.com").await.unwrap();
    page.wait_for_selector("h1", Duration::from_secs(10))
        .await
        .unwrap();

    let heading = page.text_of("h1", Duration::from_secs(2)).await.unwrap();
    assert!(heading.is_some());

    engine.close().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires Chrome/Chromium installed
async fn test_missing_selector_is_zero_count() {
    let engine = BrowserEngine::new(true).await.unwrap();
    let page = engine.new_page().await.unwrap();

    page.goto("https://example.com").await.unwrap();
    let count = page.count("div.does-not-exist").await.unwrap();
    assert_eq!(count, 0);

    engine.close().await.unwrap();
}
