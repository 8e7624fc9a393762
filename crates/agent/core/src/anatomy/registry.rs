//! Anatomy registry: the sole owner and mutator of body parts.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};
use std::time::Instant;

use super::{BodyPart, Dimensions, PartKind};
use crate::error::{AnatomyError, Result};

#[derive(Debug, Default)]
struct PartIndex {
    by_name: HashMap<String, Arc<BodyPart>>,
    /// Anatomical order: head, body, arms, legs.
    ordered: Vec<Arc<BodyPart>>,
}

impl PartIndex {
    fn insert(&mut self, part: &Arc<BodyPart>) {
        self.by_name.insert(part.name().to_string(), Arc::clone(part));
        self.ordered.push(Arc::clone(part));
    }
}

/// Fixed set of one head, one body, two arms and two legs.
///
/// The typed fields and the name index are filled together at construction
/// and never change afterwards, so every part is reachable both ways.
#[derive(Debug)]
pub struct Anatomy {
    head: Arc<BodyPart>,
    body: Arc<BodyPart>,
    arms: [Arc<BodyPart>; 2],
    legs: [Arc<BodyPart>; 2],
    index: RwLock<PartIndex>,
}

impl Anatomy {
    /// Builds the standard anatomy.
    pub fn new() -> Result<Self> {
        let head_dims = Dimensions::new(0.3, 0.4, 0.3, 15.0)?;
        let body_dims = Dimensions::new(0.5, 0.8, 0.4, 45.0)?;
        let arm_dims = Dimensions::new(0.2, 0.7, 0.2, 20.0)?;
        let leg_dims = Dimensions::new(0.25, 0.9, 0.25, 25.0)?;

        let part = |kind, name: &str, dims, critical| {
            Arc::new(BodyPart::new(kind, name, dims, critical))
        };

        let head = part(PartKind::Head, "head", head_dims, true);
        let body = part(PartKind::Body, "body", body_dims, true);
        let arms = [
            part(PartKind::Arm, "arm_left", arm_dims, false),
            part(PartKind::Arm, "arm_right", arm_dims, false),
        ];
        let legs = [
            part(PartKind::Leg, "leg_left", leg_dims, true),
            part(PartKind::Leg, "leg_right", leg_dims, true),
        ];

        let mut index = PartIndex::default();
        index.insert(&head);
        index.insert(&body);
        arms.iter().for_each(|arm| index.insert(arm));
        legs.iter().for_each(|leg| index.insert(leg));

        Ok(Self {
            head,
            body,
            arms,
            legs,
            index: RwLock::new(index),
        })
    }

    fn index(&self) -> RwLockReadGuard<'_, PartIndex> {
        self.index.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn head(&self) -> &Arc<BodyPart> {
        &self.head
    }

    pub fn body(&self) -> &Arc<BodyPart> {
        &self.body
    }

    pub fn arms(&self) -> &[Arc<BodyPart>] {
        &self.arms
    }

    pub fn legs(&self) -> &[Arc<BodyPart>] {
        &self.legs
    }

    /// All parts in anatomical order.
    pub fn parts(&self) -> Vec<Arc<BodyPart>> {
        self.index().ordered.clone()
    }

    pub fn get_part(&self, name: &str) -> Result<Arc<BodyPart>> {
        self.index()
            .by_name
            .get(name)
            .cloned()
            .ok_or_else(|| AnatomyError::PartNotFound {
                name: name.to_string(),
            })
    }

    /// Routes raw damage through the named part's protection.
    ///
    /// Returns the health actually removed from the part.
    pub fn update_part(&self, name: &str, damage: f64) -> Result<f64> {
        let part = self.get_part(name)?;
        let applied = part.take_damage(damage);
        tracing::debug!(
            target: "agent::anatomy",
            part = name,
            raw = damage,
            applied,
            remaining = part.health().get(),
            "Damage applied"
        );
        Ok(applied)
    }

    /// Parts flagged critical at design time, in anatomical order.
    pub fn critical_parts(&self) -> Vec<Arc<BodyPart>> {
        self.index()
            .ordered
            .iter()
            .filter(|part| part.is_critical())
            .cloned()
            .collect()
    }

    /// Unknown names are reported as non-critical.
    pub fn is_part_critical(&self, name: &str) -> bool {
        self.index()
            .by_name
            .get(name)
            .is_some_and(|part| part.is_critical())
    }

    /// Applies lazy regeneration to every part.
    pub fn update_all_parts(&self, now: Instant) {
        for part in &self.index().ordered {
            part.health().update(now);
        }
    }

    /// Part name → health percentage, taken under one read of the index.
    pub fn health_status(&self) -> BTreeMap<String, f64> {
        self.index()
            .ordered
            .iter()
            .map(|part| (part.name().to_string(), part.health().percentage()))
            .collect()
    }

    /// Total weight in kilograms.
    pub fn total_weight(&self) -> f64 {
        self.index()
            .ordered
            .iter()
            .map(|part| part.dimensions().weight())
            .sum()
    }
}
