use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::JoinHandle;

/// Answer `responses` in order on a local port; returns "METHOD path" per request
fn serve(responses: Vec<(u16, &'static str)>) -> (u16, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let handle = std::thread::spawn(move || {
        let mut seen = Vec::new();
        for (status, body) in responses {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);

            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            let mut parts = request_line.split_whitespace();
            seen.push(format!(
                "{} {}",
                parts.next().unwrap(),
                parts.next().unwrap()
            ));

            let mut content_length = 0;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if line == "\r\n" || line.is_empty() {
                    break;
                }
                if let Some(v) = line.to_lowercase().strip_prefix("content-length:") {
                    content_length = v.trim().parse().unwrap();
                }
            }
            let mut body_buf = vec![0u8; content_length];
            reader.read_exact(&mut body_buf).unwrap();

            let response = format!(
                "HTTP/1.1 {} Test\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let mut stream = reader.into_inner();
            stream.write_all(response.as_bytes()).unwrap();
        }
        seen
    });

    (port, handle)
}

fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// Command with a clean environment and an empty home directory
fn connect_cli(home: &tempfile::TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("kafka-connect-cli");
    cmd.env_clear().env("HOME", home.path()).arg("--host").arg("127.0.0.1");
    cmd
}

#[test]
fn test_no_arguments_is_usage_error() {
    cargo_bin_cmd!("kafka-connect-cli")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_help_lists_commands() {
    cargo_bin_cmd!("kafka-connect-cli")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("delete-all"))
        .stdout(predicate::str::contains("restart-failed"));

    cargo_bin_cmd!("schema-registry-cli")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("set-compatibility"));
}

#[test]
fn test_scale_rejects_non_positive_count_before_any_call() {
    let home = tempfile::tempdir().unwrap();
    connect_cli(&home)
        .args(["--port", &closed_port().to_string()])
        .args(["scale", "--connector", "sink", "--tasks-max", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("must be a positive integer"));
}

#[test]
fn test_update_requires_a_config_source() {
    let home = tempfile::tempdir().unwrap();
    connect_cli(&home)
        .args(["update", "--connector", "sink"])
        .assert()
        .code(1);
}

#[test]
fn test_unreachable_worker_fails() {
    let home = tempfile::tempdir().unwrap();
    connect_cli(&home)
        .args(["--port", &closed_port().to_string(), "list"])
        .assert()
        .code(1);
}

#[test]
fn test_list_with_go_style_flags() {
    let home = tempfile::tempdir().unwrap();
    let (port, server) = serve(vec![(200, r#"["orders-sink","payments"]"#)]);

    connect_cli(&home)
        .args(["-port", &port.to_string(), "-pretty", "list"])
        .assert()
        .success()
        .stdout("[\n    \"orders-sink\",\n    \"payments\"\n]\n");

    assert_eq!(server.join().unwrap(), vec!["GET /connectors/"]);
}

#[test]
fn test_port_from_hosts_file() {
    let home = tempfile::tempdir().unwrap();
    let (port, server) = serve(vec![(200, r#"{"version":"3.7.0","commit":"abc"}"#)]);

    let dir = home.path().join(".kafkacli");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("hosts"), format!("kafka_connect_port={}\n", port)).unwrap();

    connect_cli(&home)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("3.7.0"));

    assert_eq!(server.join().unwrap(), vec!["GET /"]);
}

#[test]
fn test_delete_dumps_config_then_deletes_match() {
    let home = tempfile::tempdir().unwrap();
    let (port, server) = serve(vec![
        (200, r#"["orders-sink","payments"]"#),
        (
            200,
            r#"{"name":"orders-sink","config":{"tasks.max":"2"},"tasks":[]}"#,
        ),
        (204, ""),
    ]);

    connect_cli(&home)
        .args(["--port", &port.to_string(), "delete", "--connector", "^orders"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""deleted":true"#))
        .stderr(predicate::str::contains("Successfully deleted connector orders-sink"));

    assert_eq!(
        server.join().unwrap(),
        vec![
            "GET /connectors/",
            "GET /connectors/orders-sink",
            "DELETE /connectors/orders-sink",
        ]
    );
}

#[test]
fn test_no_match_is_reported() {
    let home = tempfile::tempdir().unwrap();
    let (port, server) = serve(vec![(200, r#"["payments"]"#)]);

    connect_cli(&home)
        .args(["--port", &port.to_string(), "pause", "--connector", "orders"])
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("No matching connector found for 'orders'"));

    server.join().unwrap();
}

#[test]
fn test_error_body_printed_verbatim() {
    let home = tempfile::tempdir().unwrap();
    let body = r#"{"error_code":404,"message":"Connector sink not found"}"#;
    let (port, server) = serve(vec![(404, body)]);

    connect_cli(&home)
        .args(["--port", &port.to_string(), "scale", "--connector", "sink", "--tasks-max", "3"])
        .assert()
        .code(1)
        .stdout(format!("{}\n", body));

    assert_eq!(server.join().unwrap(), vec!["GET /connectors/sink"]);
}

#[test]
fn test_registry_global_compatibility() {
    let home = tempfile::tempdir().unwrap();
    let (port, server) = serve(vec![(200, r#"{"compatibilityLevel":"BACKWARD"}"#)]);

    cargo_bin_cmd!("schema-registry-cli")
        .env_clear()
        .env("HOME", home.path())
        .env("SCHEMA_REGISTRY_HOST", "127.0.0.1")
        .env("SCHEMA_REGISTRY_PORT", port.to_string())
        .arg("global-compatibility")
        .assert()
        .success()
        .stdout("{\"compatibilityLevel\":\"BACKWARD\"}\n");

    assert_eq!(server.join().unwrap(), vec!["GET /config"]);
}

#[test]
fn test_empty_connector_pattern_rejected_without_calls() {
    let home = tempfile::tempdir().unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let port = listener.local_addr().unwrap().port().to_string();

    connect_cli(&home)
        .args(["--port", &port, "delete", "--connector", ""])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("connector"));

    connect_cli(&home)
        .args(["-port", &port, "pause", "-connector="])
        .assert()
        .code(1);

    let err = listener.accept().unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::WouldBlock);
}

#[test]
fn test_zero_timeout_rejected() {
    let home = tempfile::tempdir().unwrap();
    connect_cli(&home)
        .args(["--port", &closed_port().to_string(), "--timeout", "0", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--timeout"));
}
