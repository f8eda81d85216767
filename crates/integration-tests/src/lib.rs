//! End-to-end test harness for the Harbor Threads storefront.
//!
//! Each test spawns the real storefront router on an ephemeral port, wired to
//! a fake order intake endpoint that answers with a chosen status and records
//! every order it receives.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p harbor-integration-tests
//! ```

#![allow(clippy::missing_panics_doc, clippy::unwrap_used, clippy::expect_used)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{Json, Router, http::StatusCode, routing::post};
use harbor_storefront::config::{OrderIntakeConfig, StorefrontConfig};
use harbor_storefront::state::AppState;
use reqwest::Client;
use url::Url;

/// How the fake intake endpoint behaves.
#[derive(Debug, Clone, Copy)]
pub struct IntakeBehavior {
    pub status: StatusCode,
    pub delay: Duration,
}

impl IntakeBehavior {
    #[must_use]
    pub const fn accepting() -> Self {
        Self {
            status: StatusCode::OK,
            delay: Duration::ZERO,
        }
    }

    #[must_use]
    pub const fn failing(status: StatusCode) -> Self {
        Self {
            status,
            delay: Duration::ZERO,
        }
    }

    #[must_use]
    pub const fn slow(delay: Duration) -> Self {
        Self {
            status: StatusCode::OK,
            delay,
        }
    }
}

/// Fake third-party order intake endpoint.
pub struct FakeIntake {
    pub url: String,
    received: Arc<Mutex<Vec<serde_json::Value>>>,
}

impl FakeIntake {
    async fn spawn(behavior: IntakeBehavior) -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&received);

        let app = Router::new().route(
            "/orders",
            post(move |Json(body): Json<serde_json::Value>| {
                let sink = Arc::clone(&sink);
                async move {
                    sink.lock().unwrap().push(body);
                    tokio::time::sleep(behavior.delay).await;
                    (behavior.status, "{}")
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        Self {
            url: format!("http://{addr}/orders"),
            received,
        }
    }

    /// Orders received so far.
    #[must_use]
    pub fn orders(&self) -> Vec<serde_json::Value> {
        self.received.lock().unwrap().clone()
    }
}

/// A running storefront plus a cookie-keeping client.
pub struct TestApp {
    pub base_url: String,
    pub client: Client,
    pub intake: FakeIntake,
}

impl TestApp {
    /// Spawn a storefront whose intake endpoint accepts every order.
    pub async fn spawn() -> Self {
        Self::spawn_with(IntakeBehavior::accepting()).await
    }

    /// Spawn a storefront whose intake endpoint behaves as given.
    pub async fn spawn_with(behavior: IntakeBehavior) -> Self {
        let intake = FakeIntake::spawn(behavior).await;
        let storefront = storefront_dir();

        let config = StorefrontConfig {
            host: [127, 0, 0, 1].into(),
            port: 0,
            base_url: "http://127.0.0.1".to_string(),
            catalog_path: storefront.join("content/catalog.json"),
            static_dir: storefront.join("static"),
            order_intake: OrderIntakeConfig {
                endpoint: Url::parse(&intake.url).unwrap(),
                api_key: None,
            },
            sentry_dsn: None,
            sentry_environment: None,
        };
        let state = AppState::new(config).unwrap();
        let app = harbor_storefront::app(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        Self {
            base_url: format!("http://{addr}"),
            client: Client::builder().cookie_store(true).build().unwrap(),
            intake,
        }
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// A client that does not follow redirects or keep cookies.
    #[must_use]
    pub fn bare_client() -> Client {
        Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap()
    }

    pub async fn get_text(&self, path: &str) -> (reqwest::StatusCode, String) {
        let response = self.client.get(self.url(path)).send().await.unwrap();
        let status = response.status();
        (status, response.text().await.unwrap())
    }

    /// Add a product to this client's cart.
    pub async fn add_to_cart(&self, handle: &str, size: &str) -> reqwest::Response {
        self.client
            .post(self.url("/cart/add"))
            .header("hx-request", "true")
            .form(&[("handle", handle), ("size", size)])
            .send()
            .await
            .unwrap()
    }

    /// Submit the checkout form with a complete set of contact details.
    pub async fn submit_checkout(&self) -> reqwest::Response {
        self.client
            .post(self.url("/checkout"))
            .header("hx-request", "true")
            .form(&[
                ("name", "Ada Lovelace"),
                ("email", "ada@example.com"),
                ("address", "1 Pier Road"),
                ("notes", "Leave at the door"),
            ])
            .send()
            .await
            .unwrap()
    }
}

fn storefront_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../storefront")
}
