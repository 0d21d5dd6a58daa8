//! Result of a table-level rules operation.

use super::audit::AuditEvent;
use crate::zones::{Table, Touched};

/// New table state plus what the caller needs to publish it.
#[derive(Clone, Debug)]
pub struct Outcome {
    /// The table after the operation.
    pub table: Table,

    /// Which stores differ from the input snapshot.
    pub touched: Touched,

    /// Audit lines, in the order the relocations happened.
    pub audit: Vec<AuditEvent>,
}

impl Outcome {
    /// Build an outcome, diffing against the snapshot the operation started from.
    #[must_use]
    pub fn diffed(before: &Table, table: Table, audit: Vec<AuditEvent>) -> Self {
        let touched = Touched {
            local: table.local != before.local,
            mirror: table.mirror != before.mirror,
        };
        Self { table, touched, audit }
    }

    /// Did the operation change the opponent mirror?
    #[must_use]
    pub fn mirror_changed(&self) -> bool {
        self.touched.mirror
    }
}
