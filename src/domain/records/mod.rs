//! Typed record schemas, one per entity kind
//!
//! Field names follow the remote authority's snake_case wire form. Optional
//! fields are omitted from serialized output when absent so that a merged
//! patch round-trips through the same shape the authority emits.

use super::entity::Entity;
use super::ids::EntityId;
use super::kind::EntityKind;

/// Implements [`Entity`] for records with a plain `id` field and no derived state
macro_rules! impl_entity {
    ($($record:ty => $kind:ident),+ $(,)?) => {
        $(
            impl Entity for $record {
                const KIND: EntityKind = EntityKind::$kind;

                fn id(&self) -> &EntityId {
                    &self.id
                }

                fn set_id(&mut self, id: EntityId) {
                    self.id = id;
                }
            }
        )+
    };
}

pub mod blood;
pub mod clinical;
pub mod operations;
pub mod people;

pub use blood::{BagStatus, BloodBag, BloodDonor, BloodGroup, BloodRequest, BloodUnit, StockTier};
pub use clinical::{LabRequest, LabStatus, MedicalCertificate, RadiologyRequest, Referral, ResearchTrial};
pub use operations::{
    Ambulance, AmbulanceStatus, Appointment, AppointmentStatus, Bed, BedStatus, InventoryItem,
    Invoice, InvoiceStatus, Notice, Task, TaskPriority, TaskStatus,
};
pub use people::{MaternityPatient, Patient, QueueItem, StaffMember, UrgencyLevel};

impl_entity! {
    Patient => Patients,
    StaffMember => Staff,
    MaternityPatient => MaternityPatients,
    QueueItem => OpdQueue,
    Appointment => Appointments,
    Invoice => Invoices,
    InventoryItem => Inventory,
    Ambulance => Ambulances,
    Task => Tasks,
    Bed => Beds,
    Notice => Notices,
    LabRequest => LabRequests,
    RadiologyRequest => RadiologyRequests,
    Referral => Referrals,
    MedicalCertificate => MedicalCertificates,
    ResearchTrial => ResearchTrials,
    BloodDonor => BloodDonors,
    BloodRequest => BloodRequests,
}
