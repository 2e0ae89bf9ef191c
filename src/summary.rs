use crate::pipeline::BatchOutcome;
use tabled::{Table, Tabled};

/// Running totals for the whole run, updated once per completed batch and
/// rendered at the end. Owned by the driver; nothing shares it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MigrationSummary {
    pub scanned: u64,
    pub migrated: u64,
    pub vanished: u64,
    pub already_existing: u64,
}

impl MigrationSummary {
    pub fn record_batch(&mut self, outcome: &BatchOutcome) {
        self.scanned += outcome.scanned;
        self.migrated += outcome.migrated;
        self.vanished += outcome.vanished;
        self.already_existing += outcome.already_existing;
    }

    pub fn render_table(&self) -> String {
        #[derive(Tabled)]
        struct Row {
            #[tabled(rename = "Result")]
            result: &'static str,
            #[tabled(rename = "Keys")]
            keys: u64,
        }

        let rows = vec![
            Row {
                result: "Scanned on source",
                keys: self.scanned,
            },
            Row {
                result: "Migrated",
                keys: self.migrated,
            },
            Row {
                result: "Vanished during scan",
                keys: self.vanished,
            },
            Row {
                result: "Already existing on destination",
                keys: self.already_existing,
            },
        ];
        Table::new(rows).to_string()
    }
}
