//! End-to-end tests against the real compiled binary over TCP.

use std::{
    net::TcpListener as StdTcpListener,
    process::{Child, Command, Stdio},
    time::Duration,
};

use serde_json::{Value, json};
use tempfile::TempDir;

fn pick_free_port() -> u16 {
    // Bind to port 0 to let OS pick a free port.
    // We drop it immediately; slight race risk, but good enough for tests.
    let l = StdTcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    l.local_addr().unwrap().port()
}

struct TestServer {
    _tmp: TempDir,
    port: u16,
    child: Child,
}

impl TestServer {
    fn start() -> Self {
        let tmp = tempfile::tempdir().expect("tempdir");
        let port = pick_free_port();
        let log_file = tmp.path().join("test.log");

        // NOTE: env!("CARGO_BIN_EXE_pantrypal") is provided by Cargo for
        // integration tests and points at the compiled binary.
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_pantrypal"));
        cmd.env("PANTRYPAL_BIND_ADDR", format!("127.0.0.1:{port}"))
            .env("PANTRYPAL_LOG_FILE", log_file.to_string_lossy().to_string())
            .env_remove("PANTRYPAL_LLM_API_KEY") // No LLM in tests (for predictability)
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        let child = cmd.spawn().expect("spawn pantrypal");
        Self {
            _tmp: tmp,
            port,
            child,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{}", self.port, path)
    }

    async fn wait_ready(&self, client: &reqwest::Client) {
        for _ in 0..50 {
            if let Ok(resp) = client.get(self.url("/healthz")).send().await
                && resp.status().is_success()
            {
                return;
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        panic!("server did not become ready");
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[tokio::test]
async fn seeded_server_scores_and_shops_over_http() {
    let server = TestServer::start();
    let client = reqwest::Client::new();
    server.wait_ready(&client).await;

    // Seeded matches: the two fully-stocked sample recipes rank first.
    let matches: Value = client
        .get(server.url("/recipes/matches"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(matches[0]["name"], "Scrambled Eggs");
    assert_eq!(matches[0]["cookable"], true);
    assert_eq!(matches[1]["name"], "Simple Pasta");

    // Plan the burgers, then the shopping list fills in what's missing.
    let burgers_id = matches
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["name"] == "Classic Burgers")
        .unwrap()["id"]
        .clone();
    let resp = client
        .post(server.url("/meal-plan"))
        .json(&json!({"day": "Wednesday", "recipe_id": burgers_id}))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());

    let list: Value = client
        .get(server.url("/shopping-list"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list, json!(["buns", "cheese", "lettuce", "tomato"]));

    // Buying the buns shrinks the list.
    let resp = client
        .post(server.url("/pantry"))
        .json(&json!({"name": "buns"}))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());

    let list: Value = client
        .get(server.url("/shopping-list"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list, json!(["cheese", "lettuce", "tomato"]));
}

#[tokio::test]
async fn generative_routes_fail_politely_without_an_api_key() {
    let server = TestServer::start();
    let client = reqwest::Client::new();
    server.wait_ready(&client).await;

    let resp = client
        .post(server.url("/recipes/generate"))
        .json(&json!({"prompt": "anything"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::BAD_GATEWAY);
    let body = resp.text().await.unwrap();
    assert!(body.contains("not configured"), "unexpected body: {body}");

    // Existing data is untouched by the failure.
    let recipes: Value = client
        .get(server.url("/recipes"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(recipes.as_array().unwrap().len(), 4);
}
