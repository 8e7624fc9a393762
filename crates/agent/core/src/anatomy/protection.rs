//! Armor and shield protection of a body part.

use super::PartKind;

/// Defensive capabilities of a part.
///
/// `armor_rating` and `shield_strength` are percentages in `[0, 100]`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Protection {
    pub armor_rating: f64,
    pub shield_strength: f64,
    pub damage_threshold: f64,
    pub armor_type: String,
    pub active: bool,
}

impl Protection {
    /// Standard protection for a part category.
    pub fn for_kind(kind: PartKind) -> Self {
        match kind {
            PartKind::Head => Self {
                armor_rating: 95.0,
                shield_strength: 90.0,
                damage_threshold: 50.0,
                armor_type: "reinforced-titanium".to_string(),
                active: true,
            },
            PartKind::Body => Self {
                armor_rating: 90.0,
                shield_strength: 85.0,
                damage_threshold: 75.0,
                armor_type: "titanium".to_string(),
                active: true,
            },
            PartKind::Arm | PartKind::Leg => Self {
                armor_rating: 80.0,
                shield_strength: 75.0,
                damage_threshold: 60.0,
                armor_type: "standard-titanium".to_string(),
                active: true,
            },
        }
    }

    /// Damage that gets through this protection.
    ///
    /// ```text
    /// applied = raw × (1 − armor/100) × (1 − shield/100)   when active
    /// applied = raw                                        otherwise
    /// ```
    pub fn mitigate(&self, raw_damage: f64) -> f64 {
        if !self.active {
            return raw_damage;
        }

        let armor = 1.0 - self.armor_rating.clamp(0.0, 100.0) / 100.0;
        let shield = 1.0 - self.shield_strength.clamp(0.0, 100.0) / 100.0;
        raw_damage * armor * shield
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn protection(armor: f64, shield: f64, active: bool) -> Protection {
        Protection {
            armor_rating: armor,
            shield_strength: shield,
            damage_threshold: 0.0,
            armor_type: "test".to_string(),
            active,
        }
    }

    #[test]
    fn inactive_protection_passes_raw_damage() {
        assert_eq!(protection(95.0, 90.0, false).mitigate(40.0), 40.0);
    }

    #[test]
    fn reduction_is_multiplicative() {
        let applied = protection(50.0, 50.0, true).mitigate(100.0);
        assert!((applied - 25.0).abs() < 1e-12);

        let head = Protection::for_kind(PartKind::Head).mitigate(100.0);
        assert!((head - 0.5).abs() < 1e-9);
    }

    #[test]
    fn damage_is_non_increasing_in_armor_and_shield() {
        let raw = 100.0;
        let steps: Vec<f64> = (0..=10).map(|i| i as f64 * 10.0).collect();

        for shield in &steps {
            let mut previous = f64::INFINITY;
            for armor in &steps {
                let applied = protection(*armor, *shield, true).mitigate(raw);
                assert!(applied <= previous);
                assert!(applied <= raw);
                previous = applied;
            }
        }
        for armor in &steps {
            let mut previous = f64::INFINITY;
            for shield in &steps {
                let applied = protection(*armor, *shield, true).mitigate(raw);
                assert!(applied <= previous);
                previous = applied;
            }
        }
    }
}
