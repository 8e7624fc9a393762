//! Operation mode of the agent.

/// Current operating mode.
///
/// Only `Normal` and `Combat` are driven by engagement logic; `Emergency`
/// and `Maintenance` are reserved for external triggers.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum OperationMode {
    /// No active threat.
    #[default]
    Normal,
    /// An active threat is being engaged.
    Combat,
    Emergency,
    Maintenance,
}
