//! Fixture data for the demo gateway
//!
//! The records mirror what the console API seeds on first start, in its
//! snake_case wire form.

use crate::domain::EntityKind;
use serde_json::{json, Value};

/// Seed records for one collection, in the order the API returns them
pub fn fixtures(kind: EntityKind) -> Vec<Value> {
    match kind {
        EntityKind::Patients => patients(),
        EntityKind::Appointments => appointments(),
        EntityKind::Invoices => invoices(),
        EntityKind::Inventory => inventory(),
        EntityKind::Ambulances => ambulances(),
        EntityKind::Staff => staff(),
        EntityKind::Tasks => tasks(),
        EntityKind::Beds => beds(),
        EntityKind::Notices => notices(),
        EntityKind::LabRequests => lab_requests(),
        EntityKind::RadiologyRequests => radiology(),
        EntityKind::Referrals => referrals(),
        EntityKind::MedicalCertificates => certificates(),
        EntityKind::ResearchTrials => research_trials(),
        EntityKind::MaternityPatients => maternity(),
        EntityKind::OpdQueue => opd_queue(),
        EntityKind::BloodUnits => blood_units(),
        EntityKind::BloodBags => blood_bags(),
        EntityKind::BloodDonors => blood_donors(),
        EntityKind::BloodRequests => blood_requests(),
    }
}

fn patients() -> Vec<Value> {
    vec![
        json!({"id": "P-101", "name": "Sarah Johnson", "age": 34, "gender": "Female", "admission_date": "2023-10-24", "condition": "Migraine", "room_number": "304-A", "urgency": "Medium", "history": "Chronic migraines since 2018.", "phone": "555-0101"}),
        json!({"id": "P-102", "name": "Michael Chen", "age": 58, "gender": "Male", "admission_date": "2023-10-22", "condition": "Cardiac Arrest", "room_number": "ICU-02", "urgency": "Critical", "history": "Hypertension, High Cholesterol.", "phone": "555-0102"}),
        json!({"id": "P-103", "name": "Emily Davis", "age": 24, "gender": "Female", "admission_date": "2023-10-25", "condition": "Fractured Tibia", "room_number": "201-B", "urgency": "Low", "history": "No major history.", "phone": "555-0103"}),
        json!({"id": "P-104", "name": "James Wilson", "age": 45, "gender": "Male", "admission_date": "2023-10-23", "condition": "Pneumonia", "room_number": "305-C", "urgency": "High", "history": "Smoker for 20 years.", "phone": "555-0104"}),
        json!({"id": "P-105", "name": "Anita Patel", "age": 62, "gender": "Female", "admission_date": "2023-10-21", "condition": "Diabetes T2", "room_number": "104-A", "urgency": "Medium", "history": "Insulin dependent.", "phone": "555-0105"}),
    ]
}

fn appointments() -> Vec<Value> {
    vec![
        json!({"id": "1", "patient_name": "Sarah Johnson", "doctor_name": "Dr. Chen", "time": "09:00 AM", "date": "Today", "type": "General Checkup", "status": "Confirmed", "is_online": false}),
        json!({"id": "2", "patient_name": "Mike Ross", "doctor_name": "Dr. Smith", "time": "10:30 AM", "date": "Today", "type": "Tele-Consult", "status": "Pending", "is_online": true}),
        json!({"id": "3", "patient_name": "Emma Watson", "doctor_name": "Dr. Chen", "time": "02:00 PM", "date": "Today", "type": "Follow-up", "status": "Confirmed", "is_online": false}),
        json!({"id": "4", "patient_name": "John Doe", "doctor_name": "Dr. House", "time": "04:15 PM", "date": "Tomorrow", "type": "Neurology", "status": "Cancelled", "is_online": false}),
    ]
}

fn invoices() -> Vec<Value> {
    vec![
        json!({"id": "INV-001", "patient_name": "Sarah Johnson", "date": "2023-10-25", "amount": 450.0, "status": "Paid", "items": ["Consultation", "Blood Test"]}),
        json!({"id": "INV-002", "patient_name": "Michael Chen", "date": "2023-10-24", "amount": 1250.0, "status": "Pending", "items": ["MRI Scan", "Consultation"]}),
        json!({"id": "INV-003", "patient_name": "Emily Davis", "date": "2023-10-20", "amount": 120.0, "status": "Overdue", "items": ["Follow-up"]}),
    ]
}

fn inventory() -> Vec<Value> {
    vec![
        json!({"id": "MED-001", "name": "Paracetamol", "category": "Medicine", "stock": 500, "unit": "Tablets", "last_updated": "2023-10-25", "status": "In Stock"}),
        json!({"id": "MED-002", "name": "Insulin", "category": "Medicine", "stock": 20, "unit": "Vials", "last_updated": "2023-10-24", "status": "Low Stock"}),
        json!({"id": "SUP-001", "name": "Surgical Masks", "category": "Supply", "stock": 1000, "unit": "Pieces", "last_updated": "2023-10-20", "status": "In Stock"}),
        json!({"id": "SUP-002", "name": "Gloves (L)", "category": "Supply", "stock": 0, "unit": "Boxes", "last_updated": "2023-10-22", "status": "Out of Stock"}),
    ]
}

fn ambulances() -> Vec<Value> {
    vec![
        json!({"id": "1", "vehicle_number": "AMB-101", "driver_name": "John Doe", "status": "Available", "location": "Hospital Base", "type": "ALS"}),
        json!({"id": "2", "vehicle_number": "AMB-102", "driver_name": "Mike Smith", "status": "On Route", "location": "Downtown", "type": "BLS"}),
        json!({"id": "3", "vehicle_number": "AMB-103", "driver_name": "Sarah Connor", "status": "Maintenance", "location": "Workshop", "type": "ALS"}),
        json!({"id": "4", "vehicle_number": "AMB-104", "driver_name": "David Lee", "status": "Available", "location": "Station 2", "type": "BLS"}),
    ]
}

fn staff() -> Vec<Value> {
    vec![
        json!({"id": "1", "name": "Dr. Sarah Chen", "specialty": "Cardiology", "status": "Online", "patients": 12, "email": "sarah.chen@nexus.com", "phone": "555-DOC1"}),
        json!({"id": "2", "name": "Dr. Michael Ross", "specialty": "Neurology", "status": "In Surgery", "patients": 8, "email": "m.ross@nexus.com", "phone": "555-DOC2"}),
        json!({"id": "3", "name": "Dr. James Wilson", "specialty": "Oncology", "status": "Offline", "patients": 0, "email": "j.wilson@nexus.com", "phone": "555-DOC3"}),
        json!({"id": "4", "name": "Dr. Emily House", "specialty": "General Surgery", "status": "On Break", "patients": 5, "email": "e.house@nexus.com", "phone": "555-DOC4"}),
        json!({"id": "5", "name": "Dr. Lisa Cuddy", "specialty": "Administration", "status": "Online", "patients": 2, "email": "l.cuddy@nexus.com", "phone": "555-DOC5"}),
        json!({"id": "6", "name": "Dr. Eric Foreman", "specialty": "Neurology", "status": "Online", "patients": 15, "email": "e.foreman@nexus.com", "phone": "555-DOC6"}),
    ]
}

fn tasks() -> Vec<Value> {
    vec![
        json!({"id": "1", "title": "Review MRI Results for Bed 3", "assignee": "Dr. Chen", "priority": "High", "status": "Todo"}),
        json!({"id": "2", "title": "Restock Insulin", "assignee": "Pharmacy", "priority": "Medium", "status": "Todo"}),
        json!({"id": "3", "title": "Prepare Discharge Summary P-101", "assignee": "Nurse Joy", "priority": "Low", "status": "In Progress"}),
        json!({"id": "4", "title": "Sanitize OT-2", "assignee": "Staff A", "priority": "High", "status": "Done"}),
    ]
}

fn beds() -> Vec<Value> {
    (0..12)
        .map(|i| {
            let icu = i < 4;
            let patient_name = match i {
                1 => Some("John Doe"),
                5 => Some("Jane Smith"),
                8 => Some("Bob Jones"),
                _ => None,
            };
            let status = match i {
                1 | 5 | 8 => "Occupied",
                2 => "Cleaning",
                _ => "Available",
            };
            let mut bed = json!({
                "id": format!("B-{}", i + 1),
                "ward": if icu { "ICU" } else { "General Ward A" },
                "number": format!("{}-{}", if icu { "ICU" } else { "G" }, i + 1),
                "status": status,
                "type": if icu { "ICU" } else { "General" },
            });
            if let Some(name) = patient_name {
                bed["patient_name"] = json!(name);
            }
            bed
        })
        .collect()
}

fn notices() -> Vec<Value> {
    vec![
        json!({"id": "1", "title": "System Maintenance", "content": "The server will be down for maintenance on Sunday 2 AM to 4 AM.", "date": "Oct 26", "priority": "Urgent"}),
        json!({"id": "2", "title": "New COVID Protocols", "content": "Please review the updated safety guidelines for the ICU.", "date": "Oct 25", "priority": "Normal"}),
        json!({"id": "3", "title": "Staff Meeting", "content": "General staff meeting on Friday at 3 PM in the Conference Hall.", "date": "Oct 24", "priority": "Normal"}),
    ]
}

fn lab_requests() -> Vec<Value> {
    vec![
        json!({"id": "LAB-001", "patient_name": "Sarah Johnson", "test_name": "Complete Blood Count (CBC)", "priority": "Routine", "status": "Completed", "date": "2023-10-26"}),
        json!({"id": "LAB-002", "patient_name": "Michael Chen", "test_name": "Liver Function Test", "priority": "Urgent", "status": "Processing", "date": "2023-10-26"}),
        json!({"id": "LAB-003", "patient_name": "John Doe", "test_name": "Lipid Profile", "priority": "Routine", "status": "Sample Collected", "date": "2023-10-25"}),
    ]
}

fn radiology() -> Vec<Value> {
    vec![
        json!({"id": "RAD-001", "patient_name": "Anita Patel", "modality": "MRI", "body_part": "Brain", "status": "Report Ready", "date": "2023-10-26"}),
        json!({"id": "RAD-002", "patient_name": "Emily Davis", "modality": "X-Ray", "body_part": "Left Tibia", "status": "Imaging", "date": "2023-10-26"}),
        json!({"id": "RAD-003", "patient_name": "James Wilson", "modality": "CT Scan", "body_part": "Chest", "status": "Scheduled", "date": "2023-10-27"}),
    ]
}

fn referrals() -> Vec<Value> {
    vec![
        json!({"id": "REF-001", "patient_name": "Jane Doe", "direction": "Outbound", "hospital": "City General", "reason": "Advanced Neurology", "status": "Accepted", "date": "2023-10-26"}),
        json!({"id": "REF-002", "patient_name": "Mark Smith", "direction": "Inbound", "hospital": "Rural Clinic A", "reason": "ICU Requirement", "status": "Pending", "date": "2023-10-25"}),
    ]
}

fn certificates() -> Vec<Value> {
    vec![
        json!({"id": "MC-101", "patient_name": "Sarah Johnson", "type": "Sick Leave", "issue_date": "2023-10-26", "doctor": "Dr. Chen", "status": "Issued"}),
        json!({"id": "MC-102", "patient_name": "Michael Chen", "type": "Fitness", "issue_date": "2023-10-25", "doctor": "Dr. Ross", "status": "Draft"}),
    ]
}

fn research_trials() -> Vec<Value> {
    vec![
        json!({"id": "1", "title": "Cardio-X Drug Trial", "phase": "Phase III", "participants": 120, "status": "Active", "lead_researcher": "Dr. S. Chen"}),
        json!({"id": "2", "title": "Diabetes Management Study", "phase": "Phase I", "participants": 15, "status": "Recruiting", "lead_researcher": "Dr. J. Doe"}),
    ]
}

fn maternity() -> Vec<Value> {
    vec![
        json!({"id": "1", "name": "Maria Garcia", "weeks_pregnant": 39, "doctor": "Dr. Cuddy", "status": "Labor", "room": "LDR-01"}),
        json!({"id": "2", "name": "Sarah Lee", "weeks_pregnant": 34, "doctor": "Dr. Cuddy", "status": "Ante-natal", "room": "302"}),
    ]
}

fn opd_queue() -> Vec<Value> {
    vec![
        json!({"id": "1", "token_number": 101, "patient_name": "John Doe", "doctor_name": "Dr. Sarah Chen", "department": "Cardiology", "status": "In Consultation", "wait_time": "0m"}),
        json!({"id": "2", "token_number": 102, "patient_name": "Alice Smith", "doctor_name": "Dr. Sarah Chen", "department": "Cardiology", "status": "Waiting", "wait_time": "15m"}),
        json!({"id": "3", "token_number": 103, "patient_name": "Bob Brown", "doctor_name": "Dr. Sarah Chen", "department": "Cardiology", "status": "Waiting", "wait_time": "30m"}),
    ]
}

fn blood_units() -> Vec<Value> {
    vec![
        json!({"id": "BU-001", "group": "A+", "bags": 12, "status": "Adequate"}),
        json!({"id": "BU-002", "group": "A-", "bags": 3, "status": "Low"}),
        json!({"id": "BU-003", "group": "B+", "bags": 15, "status": "Adequate"}),
        json!({"id": "BU-004", "group": "B-", "bags": 2, "status": "Critical"}),
        json!({"id": "BU-005", "group": "O+", "bags": 20, "status": "Adequate"}),
        json!({"id": "BU-006", "group": "O-", "bags": 4, "status": "Low"}),
        json!({"id": "BU-007", "group": "AB+", "bags": 8, "status": "Adequate"}),
        json!({"id": "BU-008", "group": "AB-", "bags": 1, "status": "Critical"}),
    ]
}

fn blood_bags() -> Vec<Value> {
    vec![
        json!({"id": "BB-001", "blood_group": "A+", "donor_id": "D-001", "donor_name": "John Smith", "collection_date": "2024-01-15", "expiry_date": "2024-02-15", "volume": 450, "status": "Available", "location": "Freezer A-1"}),
        json!({"id": "BB-002", "blood_group": "A+", "donor_id": "D-002", "donor_name": "Mary Johnson", "collection_date": "2024-01-16", "expiry_date": "2024-02-16", "volume": 450, "status": "Available", "location": "Freezer A-1"}),
        json!({"id": "BB-003", "blood_group": "B+", "donor_id": "D-003", "donor_name": "Robert Brown", "collection_date": "2024-01-14", "expiry_date": "2024-02-14", "volume": 450, "status": "Reserved", "location": "Freezer B-1"}),
    ]
}

fn blood_donors() -> Vec<Value> {
    vec![
        json!({"id": "D-001", "name": "John Smith", "age": 32, "gender": "Male", "blood_group": "A+", "contact": "555-0101", "email": "john.smith@email.com", "address": "123 Main St, City", "last_donation_date": "2024-01-15", "total_donations": 5, "status": "Active"}),
        json!({"id": "D-002", "name": "Mary Johnson", "age": 28, "gender": "Female", "blood_group": "A+", "contact": "555-0102", "email": "mary.j@email.com", "address": "456 Oak Ave, Town", "last_donation_date": "2024-01-16", "total_donations": 3, "status": "Active"}),
    ]
}

fn blood_requests() -> Vec<Value> {
    vec![
        json!({"id": "BR-001", "patient_id": "P-102", "patient_name": "Michael Chen", "blood_group": "B-", "units_required": 2, "urgency": "Emergency", "department": "ICU", "doctor": "Dr. Sarah Chen", "status": "Pending", "request_date": "2024-01-20", "required_date": "2024-01-20", "cross_match_status": "Pending"}),
        json!({"id": "BR-002", "patient_id": "P-108", "patient_name": "Lisa Anderson", "blood_group": "A+", "units_required": 1, "urgency": "Routine", "department": "Surgery", "doctor": "Dr. Michael Ross", "status": "Approved", "request_date": "2024-01-19", "required_date": "2024-01-22", "cross_match_status": "Compatible"}),
    ]
}
