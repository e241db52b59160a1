//! Blood bank records
//!
//! [`BloodUnit`] is the per-group aggregate: its `bags` count is derived from
//! the active [`BloodBag`] records of the same group, and its `status` is a
//! pure function of that count (see [`StockTier::for_count`]).

use crate::domain::entity::Entity;
use crate::domain::ids::EntityId;
use crate::domain::kind::EntityKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// ABO/Rh blood group, the aggregate category key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BloodGroup {
    #[serde(rename = "A+")]
    APos,
    #[serde(rename = "A-")]
    ANeg,
    #[serde(rename = "B+")]
    BPos,
    #[serde(rename = "B-")]
    BNeg,
    #[serde(rename = "AB+")]
    AbPos,
    #[serde(rename = "AB-")]
    AbNeg,
    #[serde(rename = "O+")]
    OPos,
    #[serde(rename = "O-")]
    ONeg,
}

impl BloodGroup {
    pub const ALL: [BloodGroup; 8] = [
        BloodGroup::APos,
        BloodGroup::ANeg,
        BloodGroup::BPos,
        BloodGroup::BNeg,
        BloodGroup::AbPos,
        BloodGroup::AbNeg,
        BloodGroup::OPos,
        BloodGroup::ONeg,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BloodGroup::APos => "A+",
            BloodGroup::ANeg => "A-",
            BloodGroup::BPos => "B+",
            BloodGroup::BNeg => "B-",
            BloodGroup::AbPos => "AB+",
            BloodGroup::AbNeg => "AB-",
            BloodGroup::OPos => "O+",
            BloodGroup::ONeg => "O-",
        }
    }
}

impl fmt::Display for BloodGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BloodGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_uppercase();
        BloodGroup::ALL
            .iter()
            .copied()
            .find(|group| group.as_str() == needle)
            .ok_or_else(|| format!("Unknown blood group: {s}"))
    }
}

/// Stock tier of an aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockTier {
    Adequate,
    Low,
    Critical,
}

impl StockTier {
    /// Highest count still considered critical
    pub const CRITICAL_MAX: u32 = 2;
    /// Highest count still considered low
    pub const LOW_MAX: u32 = 5;

    /// The threshold function: `<= 2` Critical, `<= 5` Low, otherwise Adequate
    ///
    /// # Examples
    ///
    /// ```
    /// use nexus::domain::records::StockTier;
    ///
    /// assert_eq!(StockTier::for_count(5), StockTier::Low);
    /// assert_eq!(StockTier::for_count(6), StockTier::Adequate);
    /// ```
    pub fn for_count(count: u32) -> Self {
        if count <= Self::CRITICAL_MAX {
            StockTier::Critical
        } else if count <= Self::LOW_MAX {
            StockTier::Low
        } else {
            StockTier::Adequate
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockTier::Adequate => "Adequate",
            StockTier::Low => "Low",
            StockTier::Critical => "Critical",
        }
    }
}

impl fmt::Display for StockTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a single bag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BagStatus {
    #[default]
    Available,
    Reserved,
    Used,
    Expired,
    Discarded,
}

impl BagStatus {
    /// Whether a bag in this state still counts towards its group's stock
    pub fn is_active(&self) -> bool {
        matches!(self, BagStatus::Available | BagStatus::Reserved)
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_active()
    }
}

/// Per-group stock aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloodUnit {
    pub id: EntityId,
    pub group: BloodGroup,
    pub bags: u32,
    pub status: StockTier,
}

impl BloodUnit {
    pub fn new(id: EntityId, group: BloodGroup, bags: u32) -> Self {
        Self {
            id,
            group,
            bags,
            status: StockTier::for_count(bags),
        }
    }
}

impl Entity for BloodUnit {
    const KIND: EntityKind = EntityKind::BloodUnits;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }

    // status is never trusted from the wire
    fn normalize(&mut self) {
        self.status = StockTier::for_count(self.bags);
    }
}

fn default_bag_volume() -> f64 {
    450.0
}

/// One collected bag of blood
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloodBag {
    pub id: EntityId,
    pub blood_group: BloodGroup,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub donor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub donor_name: Option<String>,
    pub collection_date: String,
    pub expiry_date: String,
    #[serde(default = "default_bag_volume")]
    pub volume: f64,
    #[serde(default)]
    pub status: BagStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Entity for BloodBag {
    const KIND: EntityKind = EntityKind::BloodBags;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn inventory_key(&self) -> Option<BloodGroup> {
        self.status.is_active().then_some(self.blood_group)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloodDonor {
    pub id: EntityId,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub blood_group: BloodGroup,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_donation_date: Option<String>,
    #[serde(default)]
    pub total_donations: u32,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_conditions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloodRequest {
    pub id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    pub patient_name: String,
    pub blood_group: BloodGroup,
    pub units_required: u32,
    /// Routine, Urgent, Emergency
    pub urgency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor: Option<String>,
    pub status: String,
    pub request_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cross_match_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fulfilled_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fulfilled_units: Option<u32>,
}
