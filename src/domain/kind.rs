//! Entity kinds known to the synchronizer
//!
//! One variant per remote collection. Each kind carries its endpoint path on
//! the remote authority and the prefix the authority uses when it mints ids.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The entity types mirrored from the remote authority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Patients,
    Appointments,
    Invoices,
    Inventory,
    Ambulances,
    Staff,
    Tasks,
    Beds,
    Notices,
    LabRequests,
    RadiologyRequests,
    Referrals,
    MedicalCertificates,
    ResearchTrials,
    MaternityPatients,
    OpdQueue,
    BloodUnits,
    BloodBags,
    BloodDonors,
    BloodRequests,
}

impl EntityKind {
    /// Every kind, in the order collections are presented to consumers
    pub const ALL: [EntityKind; 20] = [
        EntityKind::Patients,
        EntityKind::Appointments,
        EntityKind::Invoices,
        EntityKind::Inventory,
        EntityKind::Ambulances,
        EntityKind::Staff,
        EntityKind::Tasks,
        EntityKind::Beds,
        EntityKind::Notices,
        EntityKind::LabRequests,
        EntityKind::RadiologyRequests,
        EntityKind::Referrals,
        EntityKind::MedicalCertificates,
        EntityKind::ResearchTrials,
        EntityKind::MaternityPatients,
        EntityKind::OpdQueue,
        EntityKind::BloodUnits,
        EntityKind::BloodBags,
        EntityKind::BloodDonors,
        EntityKind::BloodRequests,
    ];

    /// Stable snake_case name used in logs and configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Patients => "patients",
            EntityKind::Appointments => "appointments",
            EntityKind::Invoices => "invoices",
            EntityKind::Inventory => "inventory",
            EntityKind::Ambulances => "ambulances",
            EntityKind::Staff => "staff",
            EntityKind::Tasks => "tasks",
            EntityKind::Beds => "beds",
            EntityKind::Notices => "notices",
            EntityKind::LabRequests => "lab_requests",
            EntityKind::RadiologyRequests => "radiology_requests",
            EntityKind::Referrals => "referrals",
            EntityKind::MedicalCertificates => "medical_certificates",
            EntityKind::ResearchTrials => "research_trials",
            EntityKind::MaternityPatients => "maternity_patients",
            EntityKind::OpdQueue => "opd_queue",
            EntityKind::BloodUnits => "blood_units",
            EntityKind::BloodBags => "blood_bags",
            EntityKind::BloodDonors => "blood_donors",
            EntityKind::BloodRequests => "blood_requests",
        }
    }

    /// Collection path on the remote authority, relative to the API base
    pub fn endpoint(&self) -> &'static str {
        match self {
            EntityKind::Patients => "/patients",
            EntityKind::Appointments => "/appointments",
            EntityKind::Invoices => "/invoices",
            EntityKind::Inventory => "/inventory",
            EntityKind::Ambulances => "/ambulances",
            EntityKind::Staff => "/staff",
            EntityKind::Tasks => "/tasks",
            EntityKind::Beds => "/beds",
            EntityKind::Notices => "/notices",
            EntityKind::LabRequests => "/lab-requests",
            EntityKind::RadiologyRequests => "/radiology",
            EntityKind::Referrals => "/referrals",
            EntityKind::MedicalCertificates => "/certificates",
            EntityKind::ResearchTrials => "/research-trials",
            EntityKind::MaternityPatients => "/maternity",
            EntityKind::OpdQueue => "/opd-queue",
            EntityKind::BloodUnits => "/blood-units",
            EntityKind::BloodBags => "/blood-bags",
            EntityKind::BloodDonors => "/blood-donors",
            EntityKind::BloodRequests => "/blood-requests",
        }
    }

    /// Prefix the remote authority puts in front of ids it mints
    pub fn id_prefix(&self) -> &'static str {
        match self {
            EntityKind::Patients => "P-",
            EntityKind::Appointments => "APT-",
            EntityKind::Invoices => "INV-",
            EntityKind::Inventory => "ITM-",
            EntityKind::Ambulances => "AMB-",
            EntityKind::Beds => "B-",
            EntityKind::LabRequests => "LAB-",
            EntityKind::RadiologyRequests => "RAD-",
            EntityKind::Referrals => "REF-",
            EntityKind::MedicalCertificates => "MC-",
            EntityKind::OpdQueue => "Q-",
            EntityKind::BloodUnits => "BU-",
            EntityKind::BloodBags => "BB-",
            EntityKind::BloodDonors => "D-",
            EntityKind::BloodRequests => "BR-",
            EntityKind::Staff
            | EntityKind::Tasks
            | EntityKind::Notices
            | EntityKind::ResearchTrials
            | EntityKind::MaternityPatients => "",
        }
    }

    /// Human-readable label, as the remote authority names the collection
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Patients => "Patients",
            EntityKind::Appointments => "Appointments",
            EntityKind::Invoices => "Invoices",
            EntityKind::Inventory => "Inventory",
            EntityKind::Ambulances => "Ambulances",
            EntityKind::Staff => "Staff",
            EntityKind::Tasks => "Tasks",
            EntityKind::Beds => "Beds",
            EntityKind::Notices => "Notices",
            EntityKind::LabRequests => "Lab Requests",
            EntityKind::RadiologyRequests => "Radiology",
            EntityKind::Referrals => "Referrals",
            EntityKind::MedicalCertificates => "Medical Certificates",
            EntityKind::ResearchTrials => "Research Trials",
            EntityKind::MaternityPatients => "Maternity",
            EntityKind::OpdQueue => "OPD Queue",
            EntityKind::BloodUnits => "Blood Units",
            EntityKind::BloodBags => "Blood Bags",
            EntityKind::BloodDonors => "Blood Donors",
            EntityKind::BloodRequests => "Blood Requests",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    /// Accepts the snake_case name or the endpoint path (with or without the
    /// leading slash).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().trim_start_matches('/').to_lowercase();
        EntityKind::ALL
            .iter()
            .copied()
            .find(|kind| {
                kind.as_str() == needle || kind.endpoint().trim_start_matches('/') == needle
            })
            .ok_or_else(|| format!("Unknown entity kind: {s}"))
    }
}
