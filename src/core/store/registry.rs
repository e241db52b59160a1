//! Binding of entity kinds to typed collections
//!
//! The registry is the one place that knows which record type belongs to
//! which [`EntityKind`]. Everything dynamic over kinds (bulk refresh, counts)
//! is generated from it, so adding a kind is a one-line change here.

use super::collection::Collection;
use super::EntityStore;
use crate::domain::records::{
    Ambulance, Appointment, Bed, BloodBag, BloodDonor, BloodRequest, BloodUnit, InventoryItem,
    Invoice, LabRequest, MaternityPatient, MedicalCertificate, Notice, Patient, QueueItem,
    RadiologyRequest, Referral, ResearchTrial, StaffMember, Task,
};
use crate::domain::{decode_all, Entity, EntityKind, Result};
use serde_json::Value;

/// A record type that has a collection in the [`EntityStore`]
pub trait StoredEntity: Entity {
    fn collection(collections: &Collections) -> &Collection<Self>;
    fn collection_mut(collections: &mut Collections) -> &mut Collection<Self>;
}

macro_rules! entity_registry {
    ($($field:ident: $record:ty => $kind:ident),+ $(,)?) => {
        /// One collection per entity kind
        #[derive(Debug, Default)]
        pub struct Collections {
            $($field: Collection<$record>,)+
        }

        $(
            impl StoredEntity for $record {
                fn collection(collections: &Collections) -> &Collection<Self> {
                    &collections.$field
                }

                fn collection_mut(collections: &mut Collections) -> &mut Collection<Self> {
                    &mut collections.$field
                }
            }
        )+

        impl Collections {
            pub(crate) fn len_of(&self, kind: EntityKind) -> usize {
                match kind {
                    $(EntityKind::$kind => self.$field.len(),)+
                }
            }
        }

        impl EntityStore {
            /// Parses a list payload for `kind` and replaces that collection.
            ///
            /// Parsing happens before the collection is touched: a payload
            /// that fails to parse leaves the collection as it was.
            ///
            /// # Returns
            ///
            /// The number of records now in the collection.
            pub fn replace_from_payload(&self, kind: EntityKind, values: Vec<Value>) -> Result<usize> {
                match kind {
                    $(
                        EntityKind::$kind => {
                            let records = decode_all::<$record>(values)?;
                            let count = records.len();
                            self.replace_all(records)?;
                            Ok(count)
                        }
                    )+
                }
            }
        }
    };
}

entity_registry! {
    patients: Patient => Patients,
    appointments: Appointment => Appointments,
    invoices: Invoice => Invoices,
    inventory: InventoryItem => Inventory,
    ambulances: Ambulance => Ambulances,
    staff: StaffMember => Staff,
    tasks: Task => Tasks,
    beds: Bed => Beds,
    notices: Notice => Notices,
    lab_requests: LabRequest => LabRequests,
    radiology_requests: RadiologyRequest => RadiologyRequests,
    referrals: Referral => Referrals,
    medical_certificates: MedicalCertificate => MedicalCertificates,
    research_trials: ResearchTrial => ResearchTrials,
    maternity_patients: MaternityPatient => MaternityPatients,
    opd_queue: QueueItem => OpdQueue,
    blood_units: BloodUnit => BloodUnits,
    blood_bags: BloodBag => BloodBags,
    blood_donors: BloodDonor => BloodDonors,
    blood_requests: BloodRequest => BloodRequests,
}
