//! Common test utilities for integration tests

use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary directory for test isolation
#[allow(dead_code)]
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Write `contents` to `config.yaml` inside a fresh temp dir.
///
/// Keep the returned `TempDir` alive for as long as the file is needed.
#[allow(dead_code)]
pub fn write_config(contents: &str) -> (TempDir, PathBuf) {
    let dir = temp_dir();
    let path = dir.path().join("config.yaml");
    let mut file = std::fs::File::create(&path).expect("Failed to create config file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write config file");
    (dir, path)
}

/// Sample document used across tests.
#[allow(dead_code)]
pub const SAMPLE_CONFIG: &str = r"
app:
  name: confkit
  debug: 0
  verbose: 5
  retries: '42'
  mode: fast
  enabled: 'true'
  answer: 'yes'
server:
  hosts: [a, b]
  ports: [8080, 8081]
  http:
    timeout: 30
    headers:
      x-env: prod
      x-team: infra
logger:
  level: info
  console_print: false
";
