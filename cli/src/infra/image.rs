//! Image metadata infrastructure — reads image config through the docker CLI.

use std::time::Duration;

use anyhow::Result;

use crate::application::ports::{CommandRunner, ImageMetadataFetcher};
use crate::domain::ImageMetadata;

/// Pulling can take a while on slow registries.
pub const PULL_TIMEOUT: Duration = Duration::from_secs(600);

/// Production `ImageMetadataFetcher`: `docker image inspect`, pulling the
/// image first if it is not present locally.
pub struct DockerImageFetcher<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> DockerImageFetcher<R> {
    #[must_use]
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    async fn inspect(&self, image: &str) -> Result<std::process::Output> {
        self.runner.run("docker", &["image", "inspect", image]).await
    }
}

impl<R: CommandRunner> ImageMetadataFetcher for DockerImageFetcher<R> {
    async fn fetch(&self, image: &str) -> Result<ImageMetadata> {
        let mut output = self.inspect(image).await?;
        if !output.status.success() {
            tracing::debug!(image, "image not present locally, pulling");
            let pull = self
                .runner
                .run_with_timeout("docker", &["pull", image], PULL_TIMEOUT)
                .await?;
            anyhow::ensure!(
                pull.status.success(),
                "docker pull {image} failed: {}",
                String::from_utf8_lossy(&pull.stderr).trim()
            );
            output = self.inspect(image).await?;
            anyhow::ensure!(
                output.status.success(),
                "docker image inspect {image} failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        ImageMetadata::from_inspect(&output.stdout)
    }
}
