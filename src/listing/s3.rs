//! `ListObjectsV2` adapter.

use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::types::Object;
use chrono::DateTime;
use tracing::debug;

use super::{ListPage, ListingClient};
use crate::config::Config;
use crate::entry::S3File;
use crate::error::{Error, Result};

/// Lists one page per call against S3 or an S3-compatible endpoint.
#[derive(Debug, Clone)]
pub struct S3ListingClient {
    client: aws_sdk_s3::Client,
    page_size: i32,
}

impl S3ListingClient {
    pub fn new(client: aws_sdk_s3::Client, page_size: i32) -> Self {
        Self { client, page_size }
    }

    /// Build the SDK client from `config`.
    pub async fn from_config(config: &Config) -> Self {
        Self::new(config.s3_client().await, config.page_size)
    }
}

#[async_trait]
impl ListingClient for S3ListingClient {
    async fn list_page(
        &self,
        container: &str,
        prefix: &str,
        delimiter: &str,
        page_token: Option<&str>,
    ) -> Result<ListPage> {
        debug!(container, prefix, delimiter, page_token = ?page_token, "ListObjectsV2");

        let result = self
            .client
            .list_objects_v2()
            .bucket(container)
            .prefix(prefix)
            .set_delimiter(Some(delimiter.to_string()).filter(|d| !d.is_empty()))
            .max_keys(self.page_size)
            .set_continuation_token(page_token.map(str::to_string))
            .send()
            .await
            .map_err(|e| {
                Error::Store(format!(
                    "listing s3://{container}/{prefix} failed: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        let bucket = result.name.unwrap_or_else(|| container.to_string());

        let directories = result
            .common_prefixes
            .unwrap_or_default()
            .into_iter()
            .filter_map(|common| common.prefix)
            .collect();

        let files = result
            .contents
            .unwrap_or_default()
            .into_iter()
            .filter_map(|object| to_file(&bucket, object))
            .collect();

        // A truncated page without a token cannot be continued.
        let next_token = if result.is_truncated.unwrap_or_default() {
            result.next_continuation_token
        } else {
            None
        };

        Ok(ListPage {
            directories,
            files,
            next_token,
        })
    }
}

fn to_file(bucket: &str, object: Object) -> Option<S3File> {
    let key = object.key?;
    let last_modified = object
        .last_modified
        .and_then(|t| DateTime::from_timestamp(t.secs(), t.subsec_nanos()));

    Some(S3File {
        container: bucket.to_string(),
        key,
        last_modified,
        size: object.size.unwrap_or(0).max(0) as u64,
        storage_class: object.storage_class.map(|class| class.as_str().to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::primitives::DateTime as SdkDateTime;
    use aws_sdk_s3::types::ObjectStorageClass;

    #[test]
    fn test_to_file() {
        let object = Object::builder()
            .key("logs/2023/error.txt")
            .size(42)
            .last_modified(SdkDateTime::from_secs(1_700_000_000))
            .storage_class(ObjectStorageClass::Standard)
            .build();

        let file = to_file("bucket", object).unwrap();
        assert_eq!(file.path(), "s3://bucket/logs/2023/error.txt");
        assert_eq!(file.size, 42);
        assert_eq!(file.storage_class.as_deref(), Some("STANDARD"));
        assert_eq!(
            file.last_modified.map(|t| t.timestamp()),
            Some(1_700_000_000)
        );
    }

    #[test]
    fn test_to_file_without_key() {
        let object = Object::builder().size(1).build();
        assert!(to_file("bucket", object).is_none());
    }
}
