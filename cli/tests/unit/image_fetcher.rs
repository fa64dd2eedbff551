//! Tests for `DockerImageFetcher` over a scripted command runner.

#![allow(clippy::expect_used)]

use convoy_cli::application::ports::ImageMetadataFetcher;
use convoy_cli::infra::image::DockerImageFetcher;

use crate::mocks::{ScriptedRunner, err_output, ok_output};

const INSPECT: &[u8] = br#"[{
  "Config": {
    "WorkingDir": "/srv",
    "Entrypoint": ["/bin/server"],
    "Cmd": ["--port", "9090"],
    "ExposedPorts": {"9090/tcp": {}, "443/tcp": {}}
  }
}]"#;

#[tokio::test]
async fn test_fetch_inspects_local_image() {
    let runner = ScriptedRunner::new(vec![ok_output(INSPECT)]);
    let fetcher = DockerImageFetcher::new(runner);

    let metadata = fetcher.fetch("org/server:1.0").await.expect("fetch");

    assert_eq!(metadata.working_dir, "/srv");
    assert_eq!(metadata.start_command, vec!["/bin/server", "--port", "9090"]);
    assert_eq!(metadata.ports.exposed, vec![443, 9090]);
    assert_eq!(metadata.ports.monitored, 443);
}

#[tokio::test]
async fn test_fetch_pulls_missing_image_then_inspects_again() {
    let runner = ScriptedRunner::new(vec![
        err_output(b"Error: No such image: redis"),
        ok_output(b"pulled"),
        ok_output(br#"[{"Config":{"Cmd":["redis-server"],"ExposedPorts":{"6379/tcp":{}}}}]"#),
    ]);
    let fetcher = DockerImageFetcher::new(runner);

    let metadata = fetcher.fetch("redis").await.expect("fetch");

    assert_eq!(metadata.start_command, vec!["redis-server"]);
    assert_eq!(metadata.ports.exposed, vec![6379]);
}

#[tokio::test]
async fn test_fetch_reports_pull_failure() {
    let runner = ScriptedRunner::new(vec![
        err_output(b"Error: No such image"),
        err_output(b"pull access denied for org/private"),
    ]);
    let fetcher = DockerImageFetcher::new(runner);

    let err = fetcher.fetch("org/private").await.expect_err("must fail");

    assert!(err.to_string().contains("pull access denied"));
}
