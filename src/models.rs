use derive_getters::Getters;

/// Lowest value on the host's temperature scale. Also the floor reported
/// back to the host when the service's target drops below it.
pub const HOST_TEMPERATURE_MIN: i64 = 10;

/// Highest value on the host's temperature scale.
pub const HOST_TEMPERATURE_MAX: i64 = 30;

/// On/off heating state as the host understands it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::AsRefStr, strum::EnumString, strum::Display)]
pub enum HeatingState {
    #[strum(serialize = "off")]
    Off,
    #[strum(serialize = "heat")]
    Heat,
}

/// A room's override mode. The `serialize` values are the flag names used
/// in the service's JSON, so command payloads and flag scanning share one
/// vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::AsRefStr, strum::EnumString, strum::Display)]
pub enum Mode {
    #[strum(serialize = "boost")]
    Boost,
    #[strum(serialize = "absence")]
    Absence,
    #[strum(serialize = "frost")]
    Frost,
    #[strum(serialize = "disableHeating")]
    DisableHeating,
    #[strum(serialize = "sleep")]
    Sleep,
    #[strum(serialize = "comfort")]
    Comfort,
}

/// Scan order for the mode flags. Fixed so that a contract-violating
/// response with two flags set cannot flip the observed mode between
/// polls.
const MODE_PRIORITY: [Mode; 6] = [
    Mode::Boost,
    Mode::Absence,
    Mode::Frost,
    Mode::DisableHeating,
    Mode::Sleep,
    Mode::Comfort,
];

impl HeatingState {
    /// Classify an active mode, or the no-override sentinel, as on or off.
    ///
    /// The service exposes no separate actual-vs-requested on/off signal,
    /// so this single classification backs both the target and the
    /// current heating-state reads.
    pub fn from_mode(mode: Option<Mode>) -> Self {
        match mode {
            Some(Mode::DisableHeating | Mode::Frost | Mode::Absence | Mode::Sleep) => Self::Off,
            Some(Mode::Boost | Mode::Comfort) | None => Self::Heat,
        }
    }
}

/// Mode flags as reported by the service. At most one is supposed to be
/// true; all false means no override is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModeFlags {
    pub boost: bool,
    pub absence: bool,
    pub frost: bool,
    pub disable_heating: bool,
    pub sleep: bool,
    pub comfort: bool,
}

impl ModeFlags {
    fn is_set(&self, mode: Mode) -> bool {
        match mode {
            Mode::Boost => self.boost,
            Mode::Absence => self.absence,
            Mode::Frost => self.frost,
            Mode::DisableHeating => self.disable_heating,
            Mode::Sleep => self.sleep,
            Mode::Comfort => self.comfort,
        }
    }

    /// The active override, taking the first set flag in priority order.
    pub fn active(&self) -> Option<Mode> {
        MODE_PRIORITY.into_iter().find(|mode| self.is_set(*mode))
    }

    /// How many flags are set. More than one violates the service's
    /// mutual-exclusion contract.
    pub fn active_count(&self) -> usize {
        MODE_PRIORITY
            .into_iter()
            .filter(|mode| self.is_set(*mode))
            .count()
    }
}

/// Snapshot of one heating zone as reported by the service.
///
/// Fetched fresh for every host read; a snapshot's lifetime is exactly
/// one query and nothing in the bridge caches it.
#[derive(Debug, Clone, serde::Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    id: String,
    name: String,
    current_temperature_degrees: f64,
    target_temperature_degrees: f64,
    mode: ModeFlags,
}

impl Room {
    pub fn new(
        id: String,
        name: String,
        current_temperature_degrees: f64,
        target_temperature_degrees: f64,
        mode: ModeFlags,
    ) -> Self {
        Self {
            id,
            name,
            current_temperature_degrees,
            target_temperature_degrees,
            mode,
        }
    }

    /// The room's active override. Logs when the service reports more
    /// than one flag set, which it promises never to do.
    pub fn active_mode(&self) -> Option<Mode> {
        if self.mode.active_count() > 1 {
            tracing::warn!(
                room = %self.name,
                flags = ?self.mode,
                "Service reported multiple active mode flags, using the highest-priority one"
            );
        }
        self.mode.active()
    }

    /// Target temperature as the host should see it: values below the
    /// disabled floor are reported as the floor itself, everything else
    /// passes through unchanged.
    pub fn host_target_temperature(&self) -> f64 {
        self.target_temperature_degrees
            .max(HOST_TEMPERATURE_MIN as f64)
    }
}

/// What a requested host target temperature means on the service side.
///
/// The host scale is overloaded: 14 to 29 are genuine temperatures, while
/// the values at the edges select a mode. Keeping the mapping as one
/// closed table makes the overloading auditable and adding a slot a
/// one-line change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetAction {
    /// Reserved slot: activate the given override mode.
    SetMode(Mode),
    /// Clear the override and leave the service's own temperature alone.
    ClearMode,
    /// Genuine temperature: clear the override, then write the value.
    SetDegrees(i64),
}

impl TargetAction {
    /// Decode a requested host target temperature. Returns `None` for
    /// anything outside the host scale; callers drop those requests
    /// without failing.
    pub fn from_degrees(degrees: i64) -> Option<Self> {
        match degrees {
            10 => Some(Self::SetMode(Mode::DisableHeating)),
            11 => Some(Self::SetMode(Mode::Frost)),
            12 => Some(Self::SetMode(Mode::Sleep)),
            13 => Some(Self::ClearMode),
            30 => Some(Self::SetMode(Mode::Comfort)),
            14..=29 => Some(Self::SetDegrees(degrees)),
            _ => None,
        }
    }
}
