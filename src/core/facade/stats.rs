//! Dashboard statistics view

use crate::core::store::EntityStore;
use crate::domain::records::{
    Ambulance, AmbulanceStatus, Appointment, AppointmentStatus, Bed, BedStatus, Invoice,
    InvoiceStatus, LabRequest, LabStatus, Patient,
};
use serde::Serialize;

/// Headline figures shown on the console dashboards
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_patients: usize,
    /// Appointments that are not cancelled
    pub total_appointments: usize,
    /// Sum of paid invoices
    pub total_revenue: f64,
    /// Sum of pending invoices
    pub pending_revenue: f64,
    pub available_beds: usize,
    pub occupied_beds: usize,
    /// Lab requests not yet completed
    pub pending_labs: usize,
    /// Ambulances currently on route
    pub active_ambulances: usize,
}

impl DashboardStats {
    pub fn from_store(store: &EntityStore) -> Self {
        let invoices = store.list::<Invoice>();
        let beds = store.list::<Bed>();

        Self {
            total_patients: store.len::<Patient>(),
            total_appointments: store
                .list::<Appointment>()
                .iter()
                .filter(|a| a.status != AppointmentStatus::Cancelled)
                .count(),
            total_revenue: revenue(&invoices, InvoiceStatus::Paid),
            pending_revenue: revenue(&invoices, InvoiceStatus::Pending),
            available_beds: beds.iter().filter(|b| b.status == BedStatus::Available).count(),
            occupied_beds: beds.iter().filter(|b| b.status == BedStatus::Occupied).count(),
            pending_labs: store
                .list::<LabRequest>()
                .iter()
                .filter(|l| l.status != LabStatus::Completed)
                .count(),
            active_ambulances: store
                .list::<Ambulance>()
                .iter()
                .filter(|a| a.status == AmbulanceStatus::OnRoute)
                .count(),
        }
    }
}

fn revenue(invoices: &[Invoice], status: InvoiceStatus) -> f64 {
    invoices
        .iter()
        .filter(|invoice| invoice.status == status)
        .map(|invoice| invoice.amount)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EntityId;

    fn invoice(id: &str, amount: f64, status: InvoiceStatus) -> Invoice {
        Invoice {
            id: EntityId::new(id).unwrap(),
            patient_name: "Sarah Johnson".to_string(),
            date: "2023-10-25".to_string(),
            amount,
            status,
            items: None,
        }
    }

    #[test]
    fn test_revenue_split_by_status() {
        let store = EntityStore::new();
        store.insert_front(invoice("INV-001", 450.0, InvoiceStatus::Paid)).unwrap();
        store.insert_front(invoice("INV-002", 1250.0, InvoiceStatus::Pending)).unwrap();
        store.insert_front(invoice("INV-003", 120.0, InvoiceStatus::Overdue)).unwrap();

        let stats = DashboardStats::from_store(&store);
        assert_eq!(stats.total_revenue, 450.0);
        assert_eq!(stats.pending_revenue, 1250.0);
    }

    #[test]
    fn test_empty_store() {
        let stats = DashboardStats::from_store(&EntityStore::new());
        assert_eq!(stats, DashboardStats::default());
    }
}
