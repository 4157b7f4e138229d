//! Master data lookup errors.

use crate::error::{BattleFault, ErrorSeverity};
use crate::state::{EnemyId, SkillId, SpellId, StatusId};

/// A referenced definition is absent from master data.
///
/// Always fatal: it means master data and compiled effects are out of sync,
/// never a transient condition, so callers must not retry.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MasterDataError {
    #[error("enemy definition {0} not found")]
    EnemyNotFound(EnemyId),

    #[error("skill definition {0} not found")]
    SkillNotFound(SkillId),

    #[error("spell definition {0} not found")]
    SpellNotFound(SpellId),

    #[error("status definition {0} not found")]
    StatusNotFound(StatusId),
}

impl BattleFault for MasterDataError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use MasterDataError::*;
        match self {
            EnemyNotFound(_) => "MASTER_DATA_ENEMY_NOT_FOUND",
            SkillNotFound(_) => "MASTER_DATA_SKILL_NOT_FOUND",
            SpellNotFound(_) => "MASTER_DATA_SPELL_NOT_FOUND",
            StatusNotFound(_) => "MASTER_DATA_STATUS_NOT_FOUND",
        }
    }
}
