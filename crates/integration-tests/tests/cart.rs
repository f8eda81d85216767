//! Cart menu and add-to-cart tests.

#![allow(clippy::unwrap_used)]

use harbor_integration_tests::TestApp;
use reqwest::StatusCode;

#[tokio::test]
async fn test_empty_cart_menu() {
    let app = TestApp::spawn().await;
    let (status, body) = app.get_text("/cart").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Your cart is empty."));
    assert!(body.contains("$0.00"));
    assert!(body.contains("hx-swap-oob=\"true\" hidden>0</span>"));
}

#[tokio::test]
async fn test_add_to_cart_returns_menu_and_trigger() {
    let app = TestApp::spawn().await;
    let response = app.add_to_cart("harbor-tee", "m").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["hx-trigger"], "cart-updated");

    let body = response.text().await.unwrap();
    assert!(body.contains("Harbor Tee"));
    assert!(body.contains("Size: M"));
    assert!(body.contains("<span id=\"cart-total\">$20.00</span>"));
    assert!(body.contains("hx-swap-oob=\"true\">1</span>"));
    assert!(!body.contains("Your cart is empty."));
}

#[tokio::test]
async fn test_cart_persists_across_requests() {
    let app = TestApp::spawn().await;
    app.add_to_cart("harbor-tee", "m").await;
    app.add_to_cart("harbor-tee", "m").await;
    app.add_to_cart("fog-hoodie", "xl").await;

    let (_, body) = app.get_text("/cart").await;
    // Duplicate adds are separate lines
    assert_eq!(body.matches("class=\"cart-line\"").count(), 3);
    assert!(body.contains("<span id=\"cart-total\">$94.50</span>"));
    assert!(body.contains(">3</span>"));

    // Lines keep insertion order
    let tee = body.find("Harbor Tee").unwrap();
    let hoodie = body.find("Fog Hoodie").unwrap();
    assert!(tee < hoodie);
}

#[tokio::test]
async fn test_carts_are_per_visitor() {
    let app = TestApp::spawn().await;
    app.add_to_cart("harbor-tee", "m").await;

    let other = TestApp::bare_client();
    let body = other
        .get(app.url("/cart"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Your cart is empty."));
}

#[tokio::test]
async fn test_posted_price_is_ignored() {
    let app = TestApp::spawn().await;
    let response = app
        .client
        .post(app.url("/cart/add"))
        .form(&[("handle", "harbor-tee"), ("size", "s"), ("price", "0.01")])
        .send()
        .await
        .unwrap();

    let body = response.text().await.unwrap();
    assert!(body.contains("<span id=\"cart-total\">$20.00</span>"));
}

#[tokio::test]
async fn test_add_rejects_bad_input() {
    let app = TestApp::spawn().await;

    let response = app.add_to_cart("harbor-tee", "huge").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Only offered in M
    let response = app.add_to_cart("deckhand-cap", "xl").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.add_to_cart("no-such-thing", "m").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let (_, body) = app.get_text("/cart").await;
    assert!(body.contains("Your cart is empty."));
}
