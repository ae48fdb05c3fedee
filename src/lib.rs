//! List objects and measure disk usage in S3 buckets as if keys formed a
//! directory tree.
//!
//! ```ignore
//! let client = S3ListingClient::from_config(&Config::default()).await;
//!
//! for entry in list(&client, "s3://bucket/logs/*/error.txt", &ListOptions::new()).await? {
//!     println!("{entry}");
//! }
//!
//! let bytes = total_size(&client, "s3://bucket/logs/", &UsageOptions::new().with_recursive(true)).await?;
//! ```

pub mod config;
pub mod entry;
pub mod error;
pub mod format;
pub mod listing;
pub mod logging;
pub mod path;
pub mod traverse;
pub mod usage;
pub mod wildcard;

pub use config::Config;
pub use entry::{Entry, S3Directory, S3File};
pub use error::{Error, Result};
pub use listing::{ListPage, ListingClient, MemoryStore, Pages, S3ListingClient};
pub use traverse::{list, ListOptions};
pub use usage::{total_size, UsageOptions};
pub use wildcard::Wildcard;
