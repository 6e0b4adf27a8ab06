use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use campus_submissions::config::Config;
use campus_submissions::state::AppState;
use campus_submissions::{routes, store, templates};

/// Upload latency used by the test server. Short, but long enough to observe.
pub const UPLOAD_DELAY: Duration = Duration::from_millis(200);

/// A running test server.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    pub content_type: String,
    pub content_disposition: String,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestResponse {
    async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let header = |name: reqwest::header::HeaderName| {
            res.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_string()
        };
        let content_type = header(reqwest::header::CONTENT_TYPE);
        let content_disposition = header(reqwest::header::CONTENT_DISPOSITION);
        let text = res.text().await.expect("Failed to read response body");
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self {
            status,
            content_type,
            content_disposition,
            text,
            body,
        }
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            upload_delay: UPLOAD_DELAY,
            template_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("templates"),
        };
        let tera = templates::load(&config.template_dir).expect("Failed to load templates");

        let state = Arc::new(AppState {
            store: store::create_store(),
            config: Arc::new(config),
            tera: Arc::new(tera),
        });

        let app = routes::router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    /// Posts a urlencoded form. Redirects are followed, as a browser would.
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn upload_files(&self, files: &[(&str, usize)]) -> TestResponse {
        let mut form = reqwest::multipart::Form::new();
        for (name, size) in files {
            let part = reqwest::multipart::Part::bytes(vec![b'x'; *size])
                .file_name(name.to_string())
                .mime_str("application/octet-stream")
                .expect("Failed to set MIME type");
            form = form.part("files", part);
        }

        let res = self
            .client
            .post(self.url("/files"))
            .multipart(form)
            .send()
            .await
            .expect("Failed to send multipart upload request");

        TestResponse::from_response(res).await
    }

    pub async fn login(&self, role: &str, name: &str, email: &str) {
        let res = self
            .post_form(
                "/login",
                &[
                    ("role", role),
                    ("name", name),
                    ("email", email),
                    ("password", "anything"),
                ],
            )
            .await;
        assert_eq!(res.status, 200, "Login failed: {}", res.text);
    }

    pub async fn submissions(&self, query: &str) -> Vec<Value> {
        let res = self.get(&format!("/api/submissions{query}")).await;
        assert_eq!(res.status, 200, "Listing failed: {}", res.text);
        res.body.as_array().cloned().unwrap_or_default()
    }

    /// Attaches files, submits the form as the signed-in student and waits
    /// for the delayed append to land.
    pub async fn submit_and_wait(&self, course: &str, title: &str, files: &[(&str, usize)]) {
        let before = self.submissions("").await.len();
        self.upload_files(files).await;
        let res = self
            .post_form(
                "/submit",
                &[("course", course), ("title", title), ("notes", "")],
            )
            .await;
        assert_eq!(res.status, 200, "Submit failed: {}", res.text);
        self.wait_for_count(before + files.len()).await;
    }

    pub async fn wait_for_count(&self, expected: usize) {
        for _ in 0..300 {
            if self.submissions("").await.len() >= expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("Timed out waiting for {expected} submissions");
    }
}
