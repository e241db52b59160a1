use crate::domain::ids::EntityId;
use serde::{Deserialize, Serialize};

/// Triage urgency of an admitted patient
///
/// The authority's own default is upper-case, so both spellings are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum UrgencyLevel {
    #[serde(alias = "LOW")]
    Low,
    #[default]
    #[serde(alias = "MEDIUM")]
    Medium,
    #[serde(alias = "HIGH")]
    High,
    #[serde(alias = "CRITICAL")]
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: EntityId,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub admission_date: String,
    pub condition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,
    #[serde(default)]
    pub urgency: UrgencyLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ward: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Clinical or administrative staff member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: EntityId,
    pub name: String,
    pub specialty: String,
    /// Online, Offline, In Surgery, On Break
    pub status: String,
    #[serde(default)]
    pub patients: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaternityPatient {
    pub id: EntityId,
    pub name: String,
    pub weeks_pregnant: u32,
    pub doctor: String,
    /// Ante-natal, Labor, Post-natal
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}

/// Outpatient queue token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueItem {
    pub id: EntityId,
    pub token_number: u32,
    pub patient_name: String,
    pub doctor_name: String,
    pub department: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_time: Option<String>,
}
