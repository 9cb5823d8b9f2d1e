//! Helpers shared by the backend-specific schema migrators.

use crate::domain::ports::{MigrationOutcome, SchemaMigrationError};

use super::diesel_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::ColumnNameRow;
use super::pool::PoolError;

pub(crate) const LEGACY_COLUMN: &str = "category";
pub(crate) const CURRENT_COLUMN: &str = "share_number";

/// What the `share_number` upgrade must do, given the live column set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MigrationPlan {
    Nothing,
    RenameLegacy,
    AddColumn,
}

impl MigrationPlan {
    /// Decide from the column names of `swimmers`.
    ///
    /// An existing `share_number` always wins, even alongside a stray
    /// `category`.
    pub(crate) fn from_columns(columns: &[ColumnNameRow]) -> Self {
        let has = |name: &str| {
            columns
                .iter()
                .any(|column| column.column_name.eq_ignore_ascii_case(name))
        };
        if has(CURRENT_COLUMN) {
            Self::Nothing
        } else if has(LEGACY_COLUMN) {
            Self::RenameLegacy
        } else {
            Self::AddColumn
        }
    }

    pub(crate) fn outcome(self, reset_rows: usize) -> MigrationOutcome {
        match self {
            Self::Nothing => MigrationOutcome::AlreadyCurrent,
            Self::RenameLegacy => MigrationOutcome::Renamed {
                reset_rows: u64::try_from(reset_rows).unwrap_or(u64::MAX),
            },
            Self::AddColumn => MigrationOutcome::Added,
        }
    }
}

pub(crate) fn migration_pool_error(error: PoolError) -> SchemaMigrationError {
    map_basic_pool_error(error, SchemaMigrationError::connection)
}

pub(crate) fn migration_diesel_error(error: diesel::result::Error) -> SchemaMigrationError {
    map_basic_diesel_error(
        error,
        SchemaMigrationError::query,
        SchemaMigrationError::connection,
    )
}
