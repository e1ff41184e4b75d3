use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn router4g(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("router4g").unwrap();
    for var in [
        "ROUTER4G_ADDRESS",
        "ROUTER4G_USERNAME",
        "ROUTER4G_PASSWORD",
        "ROUTER4G_IP_SOURCE",
        "ROUTER4G_CONFIG",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd.arg("--config").arg(config);
    cmd
}

/// Run a blocking command assertion without stalling the mock server
async fn run_blocking<F>(f: F)
where
    F: FnOnce() + Send + 'static,
{
    tokio::task::spawn_blocking(f).await.unwrap();
}

async fn router_with_status(first_ip: &str, then_ip: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "connected": true, "wan_ip": first_ip, "uptime": 10 })),
        )
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "connected": true, "wan_ip": then_ip, "uptime": 1 })),
        )
        .mount(&server)
        .await;
    for action in ["/connection/disconnect", "/connection/connect", "/restart"] {
        Mock::given(method("POST"))
            .and(path(action))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
    }
    server
}

const FAST: [&str; 8] = [
    "--settle-secs",
    "0",
    "--interval-secs",
    "0",
    "--max-attempts",
    "2",
    "--cycle-pause-secs",
    "0",
];

// ============================================================================
// Help & config
// ============================================================================

#[test]
fn help_describes_tool() {
    let dir = TempDir::new().unwrap();
    router4g(&dir.path().join("config.toml"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Reset and verify the WAN IP"));

    router4g(&dir.path().join("config.toml"))
        .args(["reset", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--method"));
}

#[test]
fn config_set_show_and_path() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");

    router4g(&config)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));

    router4g(&config)
        .args(["config", "set", "address", "192.168.1.1"])
        .assert()
        .success();
    router4g(&config)
        .args(["config", "set", "password", "hunter2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hunter2").not());

    let written = fs::read_to_string(&config).unwrap();
    assert!(written.contains("address = \"192.168.1.1\""));

    router4g(&config)
        .args(["--output", "json", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"address\": \"192.168.1.1\""))
        .stdout(predicate::str::contains("hunter2").not());
}

#[test]
fn config_rejects_unknown_key() {
    let dir = TempDir::new().unwrap();
    router4g(&dir.path().join("config.toml"))
        .args(["config", "set", "colour", "blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn missing_address_is_explained() {
    let dir = TempDir::new().unwrap();
    router4g(&dir.path().join("config.toml"))
        .args(["--password", "pw", "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Router address required"));
}

#[test]
fn unknown_profile_is_rejected() {
    let dir = TempDir::new().unwrap();
    router4g(&dir.path().join("config.toml"))
        .args(["--address", "192.168.1.1", "--password", "pw", "--profile", "mystery", "ip"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported router"));
}

// ============================================================================
// Router commands
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn ip_prints_wan_ip() {
    let server = router_with_status("10.0.0.5", "10.0.0.5").await;
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");
    let address = server.uri();

    run_blocking(move || {
        router4g(&config)
            .args(["--address", &address, "--password", "pw", "--output", "json", "ip"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"ip\":\"10.0.0.5\""));
    })
    .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn status_reads_address_from_config() {
    let server = router_with_status("10.0.0.5", "10.0.0.5").await;
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(
        &config,
        format!("address = \"{}\"\npassword = \"pw\"\n", server.uri()),
    )
    .unwrap();

    run_blocking(move || {
        router4g(&config)
            .args(["--output", "yaml", "status"])
            .assert()
            .success()
            .stdout(predicate::str::contains("is_connected: true"))
            .stdout(predicate::str::contains("current_ip:"))
            .stdout(predicate::str::contains("10.0.0.5"));
    })
    .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn login_with_bad_credentials_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");
    let address = server.uri();

    run_blocking(move || {
        router4g(&config)
            .args(["--address", &address, "--password", "wrong", "login"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("authentication failed"));
    })
    .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn reset_reports_new_ip_and_logs_to_file() {
    let server = router_with_status("10.0.0.5", "10.0.0.9").await;
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");
    let logs = dir.path().join("logs");
    let address = server.uri();

    let log_dir = logs.clone();
    run_blocking(move || {
        router4g(&config)
            .args(["--address", &address, "--password", "pw", "--output", "json"])
            .arg("--log-dir")
            .arg(&log_dir)
            .args(["reset", "--method", "connection"])
            .args(FAST)
            .assert()
            .success()
            .stdout(predicate::str::contains("\"result\": \"success\""))
            .stdout(predicate::str::contains("\"previous_ip\": \"10.0.0.5\""))
            .stdout(predicate::str::contains("\"current_ip\": \"10.0.0.9\""));
    })
    .await;

    let entries: Vec<_> = fs::read_dir(&logs).unwrap().map(|e| e.unwrap().path()).collect();
    assert_eq!(entries.len(), 1);
    let name = entries[0].file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("router_ip_reset_") && name.ends_with(".log"));
    let contents = fs::read_to_string(&entries[0]).unwrap();
    assert!(contents.contains("IP reset succeeded"));
}

#[tokio::test(flavor = "multi_thread")]
async fn reset_with_backoff_succeeds() {
    let server = router_with_status("10.0.0.5", "10.0.0.9").await;
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");
    let address = server.uri();

    run_blocking(move || {
        router4g(&config)
            .args(["--address", &address, "--password", "pw", "--output", "json"])
            .args(["reset", "--method", "restart", "--backoff"])
            .args(FAST)
            .assert()
            .success()
            .stdout(predicate::str::contains("\"method\": \"restart\""))
            .stdout(predicate::str::contains("\"current_ip\": \"10.0.0.9\""));
    })
    .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_reset_exits_non_zero() {
    let server = router_with_status("10.0.0.5", "10.0.0.5").await;
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");
    let address = server.uri();

    run_blocking(move || {
        router4g(&config)
            .args(["--address", &address, "--password", "pw", "--no-color"])
            .args(["reset", "--method", "auto"])
            .args(FAST)
            .assert()
            .failure()
            .stdout(predicate::str::contains("connection_cycle"))
            .stdout(predicate::str::contains("restart"))
            .stderr(predicate::str::contains("IP reset failed: timed out"));
    })
    .await;
}
