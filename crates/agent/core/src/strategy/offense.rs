//! Offensive strategies and the weapon damage table.

use std::collections::HashMap;

use crate::anatomy::{BodyPart, PartKind};
use crate::error::StrategyError;
use crate::threat::Threat;

use super::{StrategyAction, require_kind};

/// Weapons, each mounted on exactly one part category.
///
/// The snake_case name doubles as the weapon identifier exchanged with the
/// decision oracle.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum OffenseAction {
    PlasmaCannon,
    Missile,
    Emp,
    Laser,
}

impl OffenseAction {
    /// Part category the weapon is mounted on.
    pub const fn mount(&self) -> PartKind {
        match self {
            Self::PlasmaCannon => PartKind::Arm,
            Self::Missile | Self::Emp => PartKind::Body,
            Self::Laser => PartKind::Head,
        }
    }

    /// Damage dealt to a threat per hit.
    pub const fn damage(&self) -> f64 {
        match self {
            Self::PlasmaCannon => 25.0,
            Self::Missile => 40.0,
            Self::Emp => 15.0,
            Self::Laser => 30.0,
        }
    }

    /// Looks a weapon up by its identifier.
    pub fn from_weapon(name: &str) -> Option<Self> {
        name.trim().parse().ok()
    }
}

impl StrategyAction for OffenseAction {
    fn name(&self) -> &'static str {
        match self {
            Self::PlasmaCannon => "plasma_cannon",
            Self::Missile => "missile",
            Self::Emp => "emp",
            Self::Laser => "laser",
        }
    }

    fn apply(&self, part: &BodyPart, threat: &Threat) -> Result<(), StrategyError> {
        require_kind(self.name(), part, self.mount())?;

        let verb = match self {
            Self::PlasmaCannon => "Firing plasma cannon",
            Self::Missile => "Launching missiles",
            Self::Emp => "Activating EMP pulse",
            Self::Laser => "Firing laser beam",
        };
        tracing::info!(
            target: "agent::offense",
            part = part.name(),
            threat = %threat.id,
            "{verb}"
        );
        Ok(())
    }
}

/// A prioritized offensive strategy. Lower priority is more urgent.
#[derive(Clone, Debug, PartialEq)]
pub struct OffenseStrategy {
    pub priority: u8,
    pub action: OffenseAction,
    pub description: &'static str,
    pub power_cost: f64,
    /// Effective range in meters.
    pub range: f64,
    /// Usable before full engagement range is reached.
    pub preemptive: bool,
}

impl OffenseStrategy {
    pub fn execute(&self, part: &BodyPart, threat: &Threat) -> Result<(), StrategyError> {
        self.action.apply(part, threat)
    }
}

/// Read-only table of offensive strategies per part category.
#[derive(Clone, Debug)]
pub struct OffenseCatalog {
    strategies: HashMap<PartKind, Vec<OffenseStrategy>>,
    /// Every strategy across categories, by priority.
    by_priority: Vec<OffenseStrategy>,
}

impl OffenseCatalog {
    pub fn new() -> Self {
        let table = [
            OffenseStrategy {
                priority: 1,
                action: OffenseAction::PlasmaCannon,
                description: "Plasma cannon attack",
                power_cost: 75.0,
                range: 50.0,
                preemptive: true,
            },
            OffenseStrategy {
                priority: 2,
                action: OffenseAction::Missile,
                description: "Guided missile launch",
                power_cost: 90.0,
                range: 100.0,
                preemptive: true,
            },
            OffenseStrategy {
                priority: 3,
                action: OffenseAction::Emp,
                description: "EMP pulse",
                power_cost: 85.0,
                range: 30.0,
                preemptive: true,
            },
            OffenseStrategy {
                priority: 4,
                action: OffenseAction::Laser,
                description: "Laser beam attack",
                power_cost: 60.0,
                range: 40.0,
                preemptive: true,
            },
        ];

        let mut strategies: HashMap<PartKind, Vec<OffenseStrategy>> = HashMap::new();
        for strategy in &table {
            strategies
                .entry(strategy.action.mount())
                .or_default()
                .push(strategy.clone());
        }

        let mut by_priority = table.to_vec();
        by_priority.sort_by_key(|s| s.priority);

        Self {
            strategies,
            by_priority,
        }
    }

    /// Strategies registered for the part's category, in priority order.
    pub fn strategies(&self, part: &BodyPart) -> &[OffenseStrategy] {
        self.strategies
            .get(&part.kind())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Strategies for the part that may fire before engagement range.
    pub fn preemptive_strategies(&self, part: &BodyPart) -> Vec<&OffenseStrategy> {
        self.strategies(part)
            .iter()
            .filter(|s| s.preemptive)
            .collect()
    }

    /// Weapon identifiers in priority order.
    pub fn available_weapons(&self) -> Vec<String> {
        self.by_priority
            .iter()
            .map(|s| s.action.name().to_string())
            .collect()
    }

    /// Per-hit damage for a weapon identifier, `None` if unknown.
    pub fn weapon_damage(&self, weapon: &str) -> Option<f64> {
        OffenseAction::from_weapon(weapon).map(|action| action.damage())
    }

    /// The registered strategy for a weapon identifier.
    pub fn strategy_for(&self, weapon: &str) -> Option<&OffenseStrategy> {
        let action = OffenseAction::from_weapon(weapon)?;
        self.by_priority.iter().find(|s| s.action == action)
    }
}

impl Default for OffenseCatalog {
    fn default() -> Self {
        Self::new()
    }
}
