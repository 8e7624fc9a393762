//! Spatial model: locations and movement arithmetic.
//!
//! All operations are pure and return new values; nothing here holds state.

/// A point in 3D space, in meters.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Location {
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: Location) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Returns this location translated by the given deltas.
    pub fn offset(&self, dx: f64, dy: f64, dz: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Advances toward `target` by `speed * delta_secs`, never overshooting.
    ///
    /// A zero or negative step leaves the location unchanged; a step at least
    /// as long as the remaining distance lands exactly on `target`.
    pub fn move_towards(&self, target: Location, speed: f64, delta_secs: f64) -> Self {
        let step = speed * delta_secs;
        if step <= 0.0 {
            return *self;
        }

        let distance = self.distance(target);
        if distance <= step {
            return target;
        }

        let ratio = step / distance;
        Self::new(
            self.x + (target.x - self.x) * ratio,
            self.y + (target.y - self.y) * ratio,
            self.z + (target.z - self.z) * ratio,
        )
    }

    /// Moves directly away from `threat` by `speed * delta_secs`.
    ///
    /// When both points coincide there is no direction to flee along, so the
    /// agent backs off along +X.
    pub fn retreat_from(&self, threat: Location, speed: f64, delta_secs: f64) -> Self {
        let step = speed * delta_secs;
        if step <= 0.0 {
            return *self;
        }

        let distance = self.distance(threat);
        if distance == 0.0 {
            return self.offset(step, 0.0, 0.0);
        }

        let ratio = step / distance;
        Self::new(
            self.x + (self.x - threat.x) * ratio,
            self.y + (self.y - threat.y) * ratio,
            self.z + (self.z - threat.z) * ratio,
        )
    }
}

/// Movement capabilities of the agent.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovementSpeed {
    /// Meters per second.
    pub linear: f64,
    /// Radians per second.
    pub angular: f64,
}

impl Default for MovementSpeed {
    fn default() -> Self {
        Self {
            linear: 5.0,
            angular: std::f64::consts::FRAC_PI_2,
        }
    }
}
