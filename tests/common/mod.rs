use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use reqwest::StatusCode;

static SERVER: OnceLock<TestServer> = OnceLock::new();

/// Integration tests need a reachable PostgreSQL instance. When the
/// environment does not provide one, each test returns early instead of
/// failing the suite.
pub fn database_available() -> bool {
    std::env::var("DATABASE_URL").is_ok()
}

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    #[allow(dead_code)]
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Spawn the already-built binary to keep start fast during tests
        // Assumes debug profile; adjust if you run tests with --release
        let mut cmd = Command::new("target/debug/vidcat-api");
        cmd.env("VIDCAT_API_PORT", port.to_string())
            // Short cooldown so the throttle tests can wait it out
            .env("API_COMMENT_COOLDOWN_SECS", "2")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // Inherit environment so the server sees DATABASE_URL and JWT_SECRET
        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self {
            port,
            base_url,
            child,
        })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK
                    || resp.status() == StatusCode::SERVICE_UNAVAILABLE
                {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!(
            "server did not become ready on {} within {:?}",
            self.base_url,
            timeout
        )
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Unique fixture names so runs never collide on unique constraints.
pub fn unique(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    format!("{}_{}", prefix, nanos)
}

/// An 11-character digit string that passes YouTube-id validation.
#[allow(dead_code)]
pub fn unique_video_id() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    format!("{:011}", nanos % 100_000_000_000)
}

/// Register a fresh user; returns (token, user body).
#[allow(dead_code)]
pub async fn register_user(base_url: &str) -> Result<(String, serde_json::Value)> {
    let client = reqwest::Client::new();
    let username = unique("user");

    let res = client
        .post(format!("{}/auth/register", base_url))
        .json(&serde_json::json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "password": "integration-pw"
        }))
        .send()
        .await?;

    anyhow::ensure!(
        res.status() == StatusCode::CREATED,
        "register failed: {}",
        res.status()
    );

    let body: serde_json::Value = res.json().await?;
    let token = body["token"].as_str().context("token missing")?.to_string();
    Ok((token, body["user"].clone()))
}

/// Bootstrap an admin via the CLI binary, then log in and return the token.
#[allow(dead_code)]
pub async fn ensure_admin_token(base_url: &str) -> Result<String> {
    let username = unique("admin");
    let password = "integration-pw";

    let status = Command::new("target/debug/vidcat")
        .args([
            "create-admin",
            "--username",
            &username,
            "--email",
            &format!("{}@example.com", username),
            "--password",
            password,
        ])
        .status()
        .context("failed to run vidcat create-admin")?;
    anyhow::ensure!(status.success(), "create-admin exited with {}", status);

    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/auth/login", base_url))
        .json(&serde_json::json!({ "username": username, "password": password }))
        .send()
        .await?;
    anyhow::ensure!(res.status().is_success(), "admin login failed: {}", res.status());

    let body: serde_json::Value = res.json().await?;
    let token = body["token"].as_str().context("token missing")?.to_string();
    Ok(token)
}
