use async_trait::async_trait;
use thiserror::Error;

use crate::{
    models::{HeatingState, Mode, Room, TargetAction},
    remote::{RemoteError, RoomApi},
};

/// Errors surfaced to the host.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The heating service could not complete the request. Deliberately
    /// opaque; the underlying cause is already logged and the host only
    /// needs to know the operation did not finish.
    #[error("communication with the heating service failed")]
    CommunicationFailed,

    /// A failure that is not the service's fault, passed through
    /// verbatim so it surfaces as a hard error instead of masquerading
    /// as a flaky connection.
    #[error(transparent)]
    Internal(anyhow::Error),
}

/// Push channel back into the host, for characteristic values that change
/// as a side effect of a write.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HostLink: Send + Sync {
    /// Update the host's cached target temperature.
    async fn push_target_temperature(&self, degrees: f64);
}

/// Bridges one heating zone between the host's thermostat model and the
/// service's room model.
///
/// Stateless by construction: every operation re-reads or re-writes the
/// service, which stays the single source of truth. Overlapping host
/// calls are therefore safe without locking; the service serializes them.
pub struct RoomThermostat<A, H> {
    api: A,
    host: H,
    room_id: String,
    name: String,
}

impl<A: RoomApi, H: HostLink> RoomThermostat<A, H> {
    pub fn new(api: A, host: H, room_id: String, name: String) -> Self {
        Self {
            api,
            host,
            room_id,
            name,
        }
    }

    /// Target temperature as the host expects it, clamped to the
    /// disabled floor.
    #[tracing::instrument(skip(self), fields(room = %self.name))]
    pub async fn target_temperature(&self) -> Result<f64, BridgeError> {
        let room = self.fetch_room("read the target temperature").await?;
        Ok(room.host_target_temperature())
    }

    /// Currently measured temperature, passed through unclamped.
    #[tracing::instrument(skip(self), fields(room = %self.name))]
    pub async fn current_temperature(&self) -> Result<f64, BridgeError> {
        let room = self.fetch_room("read the current temperature").await?;
        Ok(*room.current_temperature_degrees())
    }

    /// On/off state derived from the room's active mode. Backs both the
    /// target and the current heating-state read.
    #[tracing::instrument(skip(self), fields(room = %self.name))]
    pub async fn heating_state(&self) -> Result<HeatingState, BridgeError> {
        let room = self.fetch_room("read the heating state").await?;
        Ok(HeatingState::from_mode(room.active_mode()))
    }

    /// Apply a requested target temperature.
    ///
    /// Reserved values select a mode instead of a temperature. The mode
    /// call always completes before any temperature call: activating a
    /// mode may itself move the service-side temperature, so the explicit
    /// value has to land last. Values outside the host scale are dropped
    /// with a warning rather than failed, so the host does not treat a
    /// clamped slider as a fault.
    #[tracing::instrument(skip(self), fields(room = %self.name))]
    pub async fn set_target_temperature(&self, degrees: i64) -> Result<(), BridgeError> {
        let Some(action) = TargetAction::from_degrees(degrees) else {
            tracing::warn!(degrees, "Ignoring target temperature outside the supported range");
            return Ok(());
        };

        match action {
            TargetAction::SetMode(mode) => self.send_mode(Some(mode)).await,
            TargetAction::ClearMode => self.send_mode(None).await,
            TargetAction::SetDegrees(value) => {
                self.send_mode(None).await?;
                self.api
                    .set_target_temperature(&self.room_id, value)
                    .await
                    .map_err(|e| surface(e, "set the target temperature"))
            }
        }
    }

    /// Apply a requested on/off state.
    ///
    /// Off maps to the disable-heating override, on clears the override.
    /// After a successful write the resulting target temperature is
    /// pushed back to the host immediately; the mode change moves the
    /// effective temperature and the host must not wait for its next
    /// poll to find out.
    #[tracing::instrument(skip(self), fields(room = %self.name))]
    pub async fn set_heating_state(&self, state: HeatingState) -> Result<(), BridgeError> {
        let mode = match state {
            HeatingState::Off => Some(Mode::DisableHeating),
            HeatingState::Heat => None,
        };
        self.send_mode(mode).await?;

        let degrees = self.target_temperature().await?;
        self.host.push_target_temperature(degrees).await;
        Ok(())
    }

    async fn send_mode(&self, mode: Option<Mode>) -> Result<(), BridgeError> {
        self.api
            .set_room_mode(&self.room_id, mode)
            .await
            .map_err(|e| surface(e, "set the room mode"))
    }

    async fn fetch_room(&self, action: &str) -> Result<Room, BridgeError> {
        self.api
            .get_room(&self.room_id)
            .await
            .map_err(|e| surface(e, action))
    }
}

/// Classify a collaborator failure. Service failures are logged here and
/// replaced by the opaque communication error; anything else passes
/// through untouched.
fn surface(error: RemoteError, action: &str) -> BridgeError {
    match error {
        RemoteError::Api(message) => {
            tracing::error!(
                error = %message,
                "Communication with the heating service failed while trying to {action}"
            );
            BridgeError::CommunicationFailed
        }
        RemoteError::Other(error) => BridgeError::Internal(error),
    }
}
