use std::sync::Arc;

use astrolink_server::app::create_app;
use astrolink_server::configs::{Description, Logger, Server, Settings, Telescope};
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use tower::ServiceExt;

pub struct MockApp {
    pub router: Router,
}

impl MockApp {
    pub fn new() -> Self {
        let settings = Arc::new(Settings {
            server: Server {
                host: String::from("127.0.0.1"),
                port: 0,
            },
            logger: Logger {
                level: String::from("debug"),
            },
            description: Description {
                server_name: String::from("astrolink test server"),
                manufacturer: String::from("astrolink"),
                manufacturer_version: String::from("0.1.0"),
                location: String::from("test bench"),
            },
            telescope: Telescope {
                device_number: 0,
                name: String::from("Test Telescope"),
                unique_id: Some(String::from("tel-sim-0")),
            },
        });

        Self {
            router: create_app(&settings),
        }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .uri(uri)
            .method(Method::GET)
            .body(Body::empty())
            .unwrap();

        self.send(request).await
    }

    pub async fn put_form(&self, uri: &str, form: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .uri(uri)
            .method(Method::PUT)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();

        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);

        (status, json)
    }
}
