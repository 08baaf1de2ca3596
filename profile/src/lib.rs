//! Durable storage for voice profiles.
//!
//! A profile is a named speaker embedding plus a format version, serialized
//! as MessagePack so the vector round-trips without loss of precision. The
//! store owns the on-disk representation exclusively; in-memory
//! [`VoiceProfile`] values are plain value objects.

mod error;
mod profile;
mod store;

pub use error::ProfileError;
pub use profile::{FORMAT_VERSION, VoiceProfile};
pub use store::{ProfileStore, sanitize_name};
