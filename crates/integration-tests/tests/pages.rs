//! Page rendering, product filter and HTTP stack tests.

#![allow(clippy::unwrap_used)]

use harbor_integration_tests::TestApp;
use reqwest::StatusCode;

#[tokio::test]
async fn test_health() {
    let app = TestApp::spawn().await;
    let (status, body) = app.get_text("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_home_renders_featured_products_with_fade_in() {
    let app = TestApp::spawn().await;
    let (status, body) = app.get_text("/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("class=\"hero-section\""));
    assert!(body.contains("data-reveal-threshold=\"0.1\""));
    assert!(body.contains("data-scrolled-class=\"scrolled\""));
    assert!(body.contains("data-fade-in-class=\"fade-in\""));
    assert!(body.contains("data-visible-class=\"is-visible\""));
    assert!(body.contains("product-card fade-in"));
    assert!(body.contains("Harbor Tee"));
    // Not featured
    assert!(!body.contains("Deckhand Cap"));
}

#[tokio::test]
async fn test_security_headers_and_request_id() {
    let app = TestApp::spawn().await;
    let response = app.client.get(app.url("/")).send().await.unwrap();

    let headers = response.headers();
    assert_eq!(headers["x-frame-options"], "DENY");
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert!(headers.contains_key("content-security-policy"));
    assert!(headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn test_request_id_from_upstream() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(app.url("/health"))
        .header("x-request-id", "edge-7f3a_01")
        .send()
        .await
        .unwrap();
    assert_eq!(response.headers()["x-request-id"], "edge-7f3a_01");

    let response = app
        .client
        .get(app.url("/health"))
        .header("x-request-id", "<img src=x>")
        .send()
        .await
        .unwrap();
    let echoed = response.headers()["x-request-id"].to_str().unwrap();
    assert_ne!(echoed, "<img src=x>");
    assert_eq!(echoed.len(), 36);
}

#[tokio::test]
async fn test_static_assets_are_served() {
    let app = TestApp::spawn().await;
    let (status, body) = app.get_text("/static/js/site.js").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("IntersectionObserver"));
}

#[tokio::test]
async fn test_shop_lists_every_product_with_filter_attributes() {
    let app = TestApp::spawn().await;
    let (status, body) = app.get_text("/shop").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.matches("class=\"product-card").count(), 5);
    assert!(body.contains("data-category=\"tees\" data-collection=\"summer\""));
    assert!(body.contains("name=\"category\" value=\"hoodies\""));
    assert!(body.contains("name=\"collection\" value=\"winter\""));
    assert!(body.contains("5 products"));
}

#[tokio::test]
async fn test_shop_filter_hides_without_dropping() {
    let app = TestApp::spawn().await;
    let (status, body) = app.get_text("/shop/products?category=hoodies").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.matches("class=\"product-card").count(), 5);
    assert_eq!(body.matches(" hidden>").count(), 3);
    assert!(body.contains("2 products"));

    // Catalog order is kept
    let tee = body.find("Harbor Tee").unwrap();
    let hoodie = body.find("Fog Hoodie").unwrap();
    assert!(tee < hoodie);
}

#[tokio::test]
async fn test_shop_filter_combines_dimensions() {
    let app = TestApp::spawn().await;
    let (_, body) = app
        .get_text("/shop/products?category=tees&category=hoodies&collection=winter")
        .await;
    // tide-tee and fog-hoodie
    assert!(body.contains("2 products"));

    let (_, body) = app.get_text("/shop?collection=summer").await;
    assert!(body.contains("name=\"collection\" value=\"summer\" checked"));
    assert!(body.contains("3 products"));
}

#[tokio::test]
async fn test_product_page() {
    let app = TestApp::spawn().await;
    let (status, body) = app.get_text("/products/harbor-tee").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Harbor Tee"));
    assert!(body.contains("$20.00"));
    assert!(body.contains("role=\"radiogroup\""));
    assert!(body.contains("name=\"size\" value=\"xl\""));
    assert!(body.contains("/static/img/harbor-tee.svg"));
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let app = TestApp::spawn().await;
    let (status, _) = app.get_text("/products/no-such-thing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
