use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Mode, Room};

/// Error kinds a [`RoomApi`] implementation may report.
///
/// The split is the whole point: the bridge classifies failures with a
/// plain match on this enum instead of downcasting, and only the `Api`
/// kind is ever translated into the opaque communication failure shown
/// to the host.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The service could not be reached or answered with an error.
    /// Recoverable only by the caller trying again later.
    #[error("heating service request failed: {0}")]
    Api(String),

    /// Anything that is not a service-side failure. Carried through to
    /// the host unchanged, never reclassified.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Client for the heating service's room endpoints.
///
/// Implementations own the HTTP/session plumbing; the bridge only sees
/// these three calls and [`RemoteError`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomApi: Send + Sync {
    /// Fetch the current snapshot of a room.
    async fn get_room(&self, id: &str) -> Result<Room, RemoteError>;

    /// Activate an override mode, or clear the override when `mode` is
    /// `None`.
    async fn set_room_mode(&self, id: &str, mode: Option<Mode>) -> Result<(), RemoteError>;

    /// Write a target temperature in whole degrees.
    async fn set_target_temperature(&self, id: &str, degrees: i64) -> Result<(), RemoteError>;
}
