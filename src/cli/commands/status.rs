//! Status command implementation
//!
//! Refreshes every collection once and prints per-collection counts, the
//! collections that failed, and the dashboard figures.

use super::connect;
use crate::core::facade::{RefreshReport, Synchronizer};
use crate::domain::EntityKind;
use clap::Args;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Only show these collections (snake_case name or endpoint path)
    #[arg(long = "kind", value_name = "KIND")]
    pub kinds: Vec<String>,

    /// Print the refresh report as JSON
    #[arg(long)]
    pub json: bool,
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Checking remote status");

        let filter = match self.parse_kinds() {
            Ok(kinds) => kinds,
            Err(e) => {
                println!("❌ {e}");
                return Ok(2);
            }
        };

        let (_, sync) = match connect(config_path) {
            Ok(connected) => connected,
            Err(code) => return Ok(code),
        };

        let report = sync.refresh_all().await;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_report(&sync, &report, &filter);
        }

        Ok(exit_code(&report))
    }

    fn parse_kinds(&self) -> Result<Vec<EntityKind>, String> {
        self.kinds.iter().map(|k| k.parse::<EntityKind>()).collect()
    }
}

/// 0 when at least one collection refreshed, 4 when nothing could be fetched
fn exit_code(report: &RefreshReport) -> i32 {
    if report.refreshed.is_empty() && !report.failed.is_empty() {
        4
    } else {
        0
    }
}

fn print_report(sync: &Synchronizer, report: &RefreshReport, filter: &[EntityKind]) {
    println!("📊 Remote Status ({})", sync.gateway().describe());
    println!();
    println!("{:<24} {:<10} {:<40}", "Collection", "Records", "Result");
    println!("{}", "-".repeat(76));

    let shown = |kind: &EntityKind| filter.is_empty() || filter.contains(kind);

    for refreshed in report.refreshed.iter().filter(|r| shown(&r.kind)) {
        println!(
            "{:<24} {:<10} {:<40}",
            refreshed.kind.label(),
            refreshed.records,
            "✅ Refreshed"
        );
    }
    for failure in report.failed.iter().filter(|f| shown(&f.kind)) {
        println!(
            "{:<24} {:<10} ❌ {}",
            failure.kind.label(),
            sync.store().count(failure.kind),
            failure.error
        );
    }

    println!();
    println!(
        "Refreshed {} of {} collections in {} ms",
        report.refreshed.len(),
        EntityKind::ALL.len(),
        report.duration.as_millis()
    );

    let stats = sync.stats();
    println!();
    println!("Dashboard:");
    println!("  Patients: {}", stats.total_patients);
    println!("  Appointments: {}", stats.total_appointments);
    println!("  Revenue: {:.2} (pending {:.2})", stats.total_revenue, stats.pending_revenue);
    println!(
        "  Beds: {} available, {} occupied",
        stats.available_beds, stats.occupied_beds
    );
    println!("  Pending Labs: {}", stats.pending_labs);
    println!("  Active Ambulances: {}", stats.active_ambulances);
    println!();
}
