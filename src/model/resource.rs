use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ResourceKind
// ---------------------------------------------------------------------------

/// A gatherable resource. "Empty" slots are modelled as `Option<ResourceSlot>`
/// on the hexagon rather than as a variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Wood,
    Rock,
    Meat,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [ResourceKind::Wood, ResourceKind::Rock, ResourceKind::Meat];

    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Wood => "wood",
            ResourceKind::Rock => "rock",
            ResourceKind::Meat => "meat",
        }
    }

    /// Asset name of the model a minion carries while hauling this resource.
    pub fn package_asset(self) -> &'static str {
        match self {
            ResourceKind::Wood => "wood_package",
            ResourceKind::Rock => "rock_package",
            ResourceKind::Meat => "meat_package",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ResourceLedger
// ---------------------------------------------------------------------------

/// Fixed-field amount per resource kind. Missing means zero, never "undefined".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceLedger {
    pub wood: u32,
    pub rock: u32,
    pub meat: u32,
}

impl ResourceLedger {
    pub const ZERO: ResourceLedger = ResourceLedger {
        wood: 0,
        rock: 0,
        meat: 0,
    };

    pub fn new(wood: u32, rock: u32, meat: u32) -> Self {
        Self { wood, rock, meat }
    }

    /// Ledger holding `amount` of a single kind.
    pub fn of(kind: ResourceKind, amount: u32) -> Self {
        let mut ledger = Self::ZERO;
        *ledger.get_mut(kind) = amount;
        ledger
    }

    pub fn get(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Wood => self.wood,
            ResourceKind::Rock => self.rock,
            ResourceKind::Meat => self.meat,
        }
    }

    pub fn get_mut(&mut self, kind: ResourceKind) -> &mut u32 {
        match kind {
            ResourceKind::Wood => &mut self.wood,
            ResourceKind::Rock => &mut self.rock,
            ResourceKind::Meat => &mut self.meat,
        }
    }

    pub fn add(&mut self, kind: ResourceKind, amount: u32) {
        let slot = self.get_mut(kind);
        *slot = slot.saturating_add(amount);
    }

    /// Withdraw up to `amount`. Returns the amount actually withdrawn,
    /// clamped to what is available; the ledger never goes negative.
    pub fn take(&mut self, kind: ResourceKind, amount: u32) -> u32 {
        let slot = self.get_mut(kind);
        let taken = amount.min(*slot);
        *slot -= taken;
        taken
    }

    /// True if every kind in `self` is at least the amount in `required`.
    pub fn covers(&self, required: &ResourceLedger) -> bool {
        ResourceKind::ALL
            .iter()
            .all(|&kind| self.get(kind) >= required.get(kind))
    }

    /// Per-kind shortfall of `self` against `required`.
    pub fn shortfall(&self, required: &ResourceLedger) -> ResourceLedger {
        let mut missing = ResourceLedger::ZERO;
        for kind in ResourceKind::ALL {
            *missing.get_mut(kind) = required.get(kind).saturating_sub(self.get(kind));
        }
        missing
    }

    pub fn total(&self) -> u32 {
        self.wood.saturating_add(self.rock).saturating_add(self.meat)
    }

    pub fn is_zero(&self) -> bool {
        self.wood == 0 && self.rock == 0 && self.meat == 0
    }

    /// Non-zero entries in `ResourceKind::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, u32)> + '_ {
        ResourceKind::ALL
            .into_iter()
            .map(|kind| (kind, self.get(kind)))
            .filter(|&(_, amount)| amount > 0)
    }
}

impl std::ops::Add for ResourceLedger {
    type Output = ResourceLedger;

    fn add(self, rhs: ResourceLedger) -> ResourceLedger {
        ResourceLedger::new(
            self.wood.saturating_add(rhs.wood),
            self.rock.saturating_add(rhs.rock),
            self.meat.saturating_add(rhs.meat),
        )
    }
}

// ---------------------------------------------------------------------------
// Package
// ---------------------------------------------------------------------------

/// Resources a minion is carrying and has not yet delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub kind: ResourceKind,
    pub amount: u32,
}

impl Package {
    pub fn new(kind: ResourceKind, amount: u32) -> Self {
        Self { kind, amount }
    }
}
