//! Translates between a smart-home host's thermostat model and a remote
//! heating service's room model.
//!
//! The host thinks in a single integer temperature scale where a few
//! reserved values select an operating mode instead of a temperature; the
//! service thinks in a temperature plus mutually-exclusive mode flags.
//! [`bridge::RoomThermostat`] does the translation in both directions,
//! talking to the service through the [`remote::RoomApi`] trait and
//! pushing derived values back to the host through [`bridge::HostLink`].

pub mod bridge;
pub mod models;
pub mod remote;
pub mod telemetry;

pub use bridge::{BridgeError, HostLink, RoomThermostat};
pub use models::{HeatingState, Mode, ModeFlags, Room, TargetAction};
pub use remote::{RemoteError, RoomApi};
