//! Inventory command implementation
//!
//! Prints the per-group blood unit aggregates after a refresh and, with
//! `--audit`, how far each recorded count is from the active bag records.

use super::connect;
use crate::core::aggregate::InventoryAudit;
use crate::domain::records::BloodUnit;
use crate::domain::EntityKind;
use clap::Args;

/// Arguments for the inventory command
#[derive(Args, Debug)]
pub struct InventoryArgs {
    /// Compare recorded counts with active bag records
    #[arg(long)]
    pub audit: bool,
}

impl InventoryArgs {
    /// Execute the inventory command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(audit = self.audit, "Reading blood inventory");

        let (_, sync) = match connect(config_path) {
            Ok(connected) => connected,
            Err(code) => return Ok(code),
        };

        let report = sync.refresh_all().await;
        let failed: Vec<EntityKind> = report
            .failed_kinds()
            .filter(|kind| matches!(kind, EntityKind::BloodUnits | EntityKind::BloodBags))
            .collect();
        if !failed.is_empty() {
            for failure in report.failed.iter().filter(|f| failed.contains(&f.kind)) {
                println!("❌ Failed to load {}: {}", failure.kind.label(), failure.error);
            }
            return Ok(4);
        }

        print_units(&sync.inventory());

        if self.audit {
            print_audit(&sync.audit_inventory());
        }

        Ok(0)
    }
}

fn print_units(units: &[BloodUnit]) {
    println!("🩸 Blood Inventory");
    println!();
    println!("{:<8} {:<10} {:<8} {:<10}", "Group", "Unit", "Bags", "Status");
    println!("{}", "-".repeat(40));
    for unit in units {
        println!(
            "{:<8} {:<10} {:<8} {:<10}",
            unit.group.as_str(),
            unit.id.as_str(),
            unit.bags,
            unit.status.as_str()
        );
    }
    println!();
}

fn print_audit(audit: &InventoryAudit) {
    if audit.is_consistent() {
        println!("✅ Recorded counts match the active bag records");
        println!();
        return;
    }

    println!("Drift (recorded minus active bag records):");
    for entry in audit.drifted() {
        match (entry.recorded, entry.drift()) {
            (Some(recorded), Some(drift)) => println!(
                "  {:<4} recorded {:<4} active {:<4} drift {:+}",
                entry.group.as_str(),
                recorded,
                entry.active_bags,
                drift
            ),
            _ => println!(
                "  {:<4} no aggregate row, {} active bag(s)",
                entry.group.as_str(),
                entry.active_bags
            ),
        }
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{contents}").unwrap();
        file
    }

    #[tokio::test]
    async fn test_missing_file_is_configuration_error() {
        let args = InventoryArgs { audit: false };
        let code = args.execute("does-not-exist.toml").await.unwrap();
        assert_eq!(code, 2);
    }

    #[tokio::test]
    async fn test_demo_inventory_with_audit() {
        let file = config_file("[gateway]\nmode = \"demo\"");
        let args = InventoryArgs { audit: true };
        let code = args
            .execute(&file.path().to_string_lossy())
            .await
            .unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_unreachable_gateway_is_connection_error() {
        let file = config_file(
            "[gateway]\nmode = \"remote\"\nbase_url = \"http://127.0.0.1:1/api\"\ntimeout_seconds = 2",
        );
        let args = InventoryArgs { audit: false };
        let code = args
            .execute(&file.path().to_string_lossy())
            .await
            .unwrap();
        assert_eq!(code, 4);
    }
}
