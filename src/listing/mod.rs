//! The paginated prefix-listing boundary.
//!
//! A [`ListingClient`] answers one page of a delimiter-split listing at a
//! time. [`Pages`] follows continuation tokens over it until the store says
//! the listing is complete.

pub mod memory;
pub mod s3;

use async_trait::async_trait;
use tracing::trace;

use crate::entry::{Entry, S3Directory, S3File};
use crate::error::Result;

pub use memory::MemoryStore;
pub use s3::S3ListingClient;

/// One store response.
#[derive(Debug, Clone, Default)]
pub struct ListPage {
    /// Common prefixes, each ending in the delimiter.
    pub directories: Vec<String>,
    pub files: Vec<S3File>,
    /// Present while the listing is truncated.
    pub next_token: Option<String>,
}

/// A store that can list keys under a prefix, split by a delimiter.
///
/// Implementations report transport and status failures as
/// [`Error::Store`](crate::Error::Store) and do not retry.
#[async_trait]
pub trait ListingClient: Send + Sync {
    async fn list_page(
        &self,
        container: &str,
        prefix: &str,
        delimiter: &str,
        page_token: Option<&str>,
    ) -> Result<ListPage>;
}

#[derive(Clone, Copy, Debug)]
enum Truncation {
    NotYetKnown,
    Truncated,
    NotTruncated,
}

/// Cursor over every page of one `(container, prefix, delimiter)` listing.
pub struct Pages<'a, L: ?Sized> {
    client: &'a L,
    container: &'a str,
    prefix: &'a str,
    delimiter: &'a str,

    next_continuation_token: Option<String>,
    truncated: Truncation,
}

impl<'a, L: ListingClient + ?Sized> Pages<'a, L> {
    pub fn new(client: &'a L, container: &'a str, prefix: &'a str, delimiter: &'a str) -> Self {
        Pages {
            client,
            container,
            prefix,
            delimiter,
            next_continuation_token: None,
            truncated: Truncation::NotYetKnown,
        }
    }

    async fn fetch(&mut self) -> Result<ListPage> {
        let page = self
            .client
            .list_page(
                self.container,
                self.prefix,
                self.delimiter,
                self.next_continuation_token.as_deref(),
            )
            .await?;

        trace!(
            container = self.container,
            prefix = self.prefix,
            directories = page.directories.len(),
            files = page.files.len(),
            truncated = page.next_token.is_some(),
            "Fetched page"
        );

        self.next_continuation_token = page.next_token.clone();
        self.truncated = if self.next_continuation_token.is_some() {
            Truncation::Truncated
        } else {
            Truncation::NotTruncated
        };

        Ok(page)
    }

    /// The next page as entries, directories first, or `None` once exhausted.
    pub async fn next(&mut self) -> Result<Option<Vec<Entry>>> {
        match self.truncated {
            // First call, or the previous page promised more.
            Truncation::NotYetKnown | Truncation::Truncated => {
                let page = self.fetch().await?;
                Ok(Some(self.entries(page)))
            }

            Truncation::NotTruncated => Ok(None),
        }
    }

    fn entries(&self, page: ListPage) -> Vec<Entry> {
        let directories = page.directories.into_iter().map(|prefix| {
            Entry::Directory(S3Directory {
                container: self.container.to_string(),
                prefix,
            })
        });

        directories
            .chain(page.files.into_iter().map(Entry::File))
            .collect()
    }
}
