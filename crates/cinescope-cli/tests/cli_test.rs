#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use std::path::Path;

use assert_cmd::cargo_bin_cmd;
use predicates::prelude::predicate;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const POPULAR_FIXTURE: &str = include_str!("../../../fixtures/tmdb/movie_popular.json");
const DISCOVER_MOVIE_FIXTURE: &str = include_str!("../../../fixtures/tmdb/discover_movie_id.json");
const DISCOVER_TV_FIXTURE: &str = include_str!("../../../fixtures/tmdb/discover_tv_id.json");
const DETAILS_FIXTURE: &str = include_str!("../../../fixtures/tmdb/movie_details_1022789.json");

/// Writes a config pointing the client at `server`.
fn write_config(dir: &Path, server: &MockServer) {
    let content = format!(
        "[api]\nbase_url = \"{}/3/\"\ntoken_env = \"CINESCOPE_TEST_TOKEN\"\n",
        server.uri()
    );
    std::fs::write(dir.join("config.toml"), content).unwrap();
}

async fn mount_lists(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/3/movie/popular"))
        .respond_with(ResponseTemplate::new(200).set_body_string(POPULAR_FIXTURE))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/3/discover/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DISCOVER_MOVIE_FIXTURE))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/3/discover/tv"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DISCOVER_TV_FIXTURE))
        .mount(server)
        .await;
}

#[test]
fn test_help_lists_subcommands() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinescope");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("browse"))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("details"));
}

#[test]
fn test_search_rejects_empty_query() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinescope");
    cmd.args(["search", "--query", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--query"));
}

#[test]
fn test_details_rejects_unknown_media_type() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinescope");
    cmd.args(["details", "--media-type", "person", "--id", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_browse_rejects_malformed_route() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinescope");
    cmd.args(["browse", "--route", "/detail/person/1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--route"));
}

#[test]
fn test_show_requires_numeric_id() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinescope");
    cmd.args(["show", "--id", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--id"));
}

#[test]
fn test_config_path_uses_dir() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinescope");
    cmd.args(["config", "path", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_refuses_overwrite() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let mut first = cargo_bin_cmd!("cinescope");
    first
        .args(["config", "init", "--dir"])
        .arg(dir.path())
        .assert()
        .success();

    // Act & Assert
    let written = std::fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(written.contains("TMDB_API_TOKEN"));
    assert!(written.contains("carousel_interval_secs = 4"));

    let mut second = cargo_bin_cmd!("cinescope");
    second
        .args(["config", "init", "--dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    let mut forced = cargo_bin_cmd!("cinescope");
    forced
        .args(["config", "init", "--force", "--dir"])
        .arg(dir.path())
        .assert()
        .success();
}

#[tokio::test]
async fn test_popular_lists_movies_with_bearer_token() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/movie/popular"))
        .and(header("Authorization", "Bearer test-token"))
        .and(query_param("language", "en-US"))
        .respond_with(ResponseTemplate::new(200).set_body_string(POPULAR_FIXTURE))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &server);

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinescope");
    cmd.args(["popular", "--dir"])
        .arg(dir.path())
        .env("CINESCOPE_TEST_TOKEN", "test-token")
        .env("RUST_LOG", "info")
        .assert()
        .success()
        .stdout(predicate::str::contains("Inside Out 2"))
        .stdout(predicate::str::contains("Total: 3 records"));
}

#[tokio::test]
async fn test_popular_remote_error_fails() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/movie/popular"))
        .respond_with(ResponseTemplate::new(401).set_body_string(
            r#"{"status_code":7,"status_message":"Invalid API key","success":false}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &server);

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinescope");
    cmd.args(["popular", "--dir"])
        .arg(dir.path())
        .env("RUST_LOG", "info")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to fetch Popular Movies"));
}

#[tokio::test]
async fn test_show_finds_tv_record_across_lists() {
    // Arrange
    let server = MockServer::start().await;
    mount_lists(&server).await;
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &server);

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinescope");
    cmd.args(["show", "--id", "218843", "--dir"])
        .arg(dir.path())
        .env("RUST_LOG", "info")
        .assert()
        .success()
        .stdout(predicate::str::contains("Gadis Kretek"))
        .stdout(predicate::str::contains("/detail/tv/218843"));
}

#[tokio::test]
async fn test_show_unknown_id_fails() {
    // Arrange
    let server = MockServer::start().await;
    mount_lists(&server).await;
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &server);

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinescope");
    cmd.args(["show", "--id", "1", "--dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no record with id 1"));
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    // Arrange
    let server = MockServer::start().await;
    mount_lists(&server).await;
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &server);

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinescope");
    cmd.args(["search", "--query", "INSIDE", "--dir"])
        .arg(dir.path())
        .env("RUST_LOG", "info")
        .assert()
        .success()
        .stdout(predicate::str::contains("1022789\tmovie\tInside Out 2"));
}

#[tokio::test]
async fn test_details_prints_runtime() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/movie/1022789"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DETAILS_FIXTURE))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &server);

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinescope");
    cmd.args(["details", "--media-type", "movie", "--id", "1022789", "--dir"])
        .arg(dir.path())
        .env("RUST_LOG", "info")
        .assert()
        .success()
        .stdout(predicate::str::contains("Runtime: 97min"));
}

#[tokio::test]
async fn test_log_file_receives_output() {
    // Arrange
    let server = MockServer::start().await;
    mount_lists(&server).await;
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &server);
    let log_path = dir.path().join("cinescope.log");

    // Act
    let mut cmd = cargo_bin_cmd!("cinescope");
    cmd.args(["tv", "--dir"])
        .arg(dir.path())
        .arg("--log-file")
        .arg(&log_path)
        .env("RUST_LOG", "info")
        .assert()
        .success();

    // Assert
    let log = std::fs::read_to_string(&log_path).unwrap();
    assert!(log.contains("218843\ttv\tGadis Kretek"));
}
