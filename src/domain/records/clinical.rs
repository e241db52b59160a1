//! Diagnostic, referral, and research records

use crate::domain::ids::EntityId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LabStatus {
    #[default]
    Pending,
    #[serde(rename = "Sample Collected")]
    SampleCollected,
    Processing,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabRequest {
    pub id: EntityId,
    pub patient_name: String,
    pub test_name: String,
    /// Routine or Urgent
    pub priority: String,
    #[serde(default)]
    pub status: LabStatus,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadiologyRequest {
    pub id: EntityId,
    pub patient_name: String,
    pub modality: String,
    pub body_part: String,
    /// Scheduled, Imaging, Report Ready
    pub status: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Referral {
    pub id: EntityId,
    pub patient_name: String,
    /// Inbound or Outbound
    pub direction: String,
    pub hospital: String,
    pub reason: String,
    pub status: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicalCertificate {
    pub id: EntityId,
    pub patient_name: String,
    #[serde(rename = "type")]
    pub certificate_type: String,
    pub issue_date: String,
    pub doctor: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchTrial {
    pub id: EntityId,
    pub title: String,
    pub phase: String,
    #[serde(default)]
    pub participants: u32,
    pub status: String,
    pub lead_researcher: String,
}
