//! # Media store
//!
//! Filesystem store for uploaded images. Accepts a fixed set of image
//! content types, enforces a size ceiling, and files every upload under a
//! generated unguessable name so client file names never reach the disk
//! or the served URL space.
//!
//! ## Example
//!
//! ```rust,no_run
//! # use veranda_media::MediaStore;
//! # async fn demo() -> Result<(), veranda_media::MediaError> {
//! let media = MediaStore::builder()
//!     .root("data/uploads")
//!     .max_bytes(5 * 1024 * 1024)
//!     .open()
//!     .await?;
//!
//! let stored = media.store("image/png", &[0x89, b'P', b'N', b'G']).await?;
//! assert!(stored.url.starts_with("/uploads/"));
//! # Ok(())
//! # }
//! ```

mod builder;
mod engine;
mod error;

pub use crate::builder::MediaBuilder;
pub use crate::engine::{MediaStore, StoredMedia};
pub use crate::error::{MediaError, MediaErrorExt};
