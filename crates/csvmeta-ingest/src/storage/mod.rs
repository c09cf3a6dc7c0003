//! Object storage access: download an uploaded object and read its size.

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::{error::DisplayErrorContext, Client};
use csvmeta_common::{IngestError, Result};
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument};

pub mod config;

pub use config::StorageConfig;

/// The two object-storage calls the pipeline makes per notification.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stream the object body into `path`, returning the number of bytes written.
    async fn download_to(&self, bucket: &str, key: &str, path: &Path) -> Result<u64>;

    /// Size of the object as reported by the storage layer's headers.
    async fn object_size(&self, bucket: &str, key: &str) -> Result<i64>;
}

#[derive(Clone, Debug)]
pub struct S3ObjectStore {
    client: Client,
}

impl S3ObjectStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from the shared SDK config, applying endpoint overrides.
    pub fn from_sdk_config(sdk_config: &SdkConfig, config: &StorageConfig) -> Self {
        let mut builder =
            aws_sdk_s3::config::Builder::from(sdk_config).force_path_style(config.path_style);

        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        Self::new(Client::from_conf(builder.build()))
    }
}

fn storage_error(
    operation: &str,
    bucket: &str,
    key: &str,
    err: impl std::error::Error,
) -> IngestError {
    IngestError::StorageAccess(format!(
        "{} s3://{}/{}: {}",
        operation,
        bucket,
        key,
        DisplayErrorContext(err)
    ))
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    #[instrument(skip(self))]
    async fn download_to(&self, bucket: &str, key: &str, path: &Path) -> Result<u64> {
        debug!("Downloading s3://{}/{} to {}", bucket, key, path.display());

        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| storage_error("GetObject", bucket, key, e))?;

        let mut body = response.body;
        let mut file = tokio::fs::File::create(path).await?;
        let mut written = 0u64;

        while let Some(chunk) = body
            .try_next()
            .await
            .map_err(|e| storage_error("GetObject body", bucket, key, e))?
        {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        debug!("Downloaded {} bytes from s3://{}/{}", written, bucket, key);

        Ok(written)
    }

    #[instrument(skip(self))]
    async fn object_size(&self, bucket: &str, key: &str) -> Result<i64> {
        let response = self
            .client
            .head_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| storage_error("HeadObject", bucket, key, e))?;

        response.content_length().ok_or_else(|| {
            IngestError::StorageAccess(format!(
                "HeadObject s3://{}/{}: response has no content length",
                bucket, key
            ))
        })
    }
}
