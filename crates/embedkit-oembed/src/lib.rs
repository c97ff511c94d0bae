//! oEmbed discovery and metadata resolution for embedkit.
//!
//! This crate covers the network-facing half of embed rendering:
//! - [`discovery_url`] builds the lookup URI for a public resource URL
//! - [`MetadataResolver`] performs the lookup and turns every failure into `None`
//! - [`Transport`] abstracts the HTTP GET ([`UreqTransport`] in production)
//! - [`MetadataCache`] optionally remembers successful lookups
//!
//! # Example
//!
//! ```no_run
//! use embedkit_oembed::{MetadataResolver, discovery_url};
//!
//! let resolver = MetadataResolver::default();
//! let url = discovery_url(
//!     "http://www.mixcloud.com/oembed/",
//!     "https://www.mixcloud.com/artist/show/",
//! );
//! match resolver.resolve(&url) {
//!     Some(meta) => println!("{}", meta.embed.unwrap_or_default()),
//!     None => println!("no metadata"),
//! }
//! ```

mod cache;
mod consts;
mod endpoint;
mod error;
mod metadata;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod resolver;
mod transport;

pub use cache::{MemoryCache, MetadataCache, NoCache};
pub use consts::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use endpoint::{discovery_url, encode_url_param};
pub use error::TransportError;
pub use metadata::EmbedMetadata;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockTransport;
pub use resolver::MetadataResolver;
pub use transport::{Transport, UreqTransport, create_agent};
