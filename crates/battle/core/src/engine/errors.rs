//! Error types for battle execution.

use crate::env::MasterDataError;
use crate::error::{BattleFault, ErrorSeverity};
use crate::state::Side;

/// Errors surfaced while constructing or stepping a battle.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleError {
    #[error(transparent)]
    MasterData(#[from] MasterDataError),

    #[error("battle has already concluded")]
    AlreadyConcluded,

    #[error("{side:?} side has no combatants")]
    EmptySide { side: Side },

    #[error("encounter requests {requested} enemies, at most {max} fit")]
    OversizedEncounter { requested: u64, max: usize },
}

impl BattleFault for BattleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            BattleError::MasterData(inner) => inner.severity(),
            BattleError::AlreadyConcluded
            | BattleError::EmptySide { .. }
            | BattleError::OversizedEncounter { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            BattleError::MasterData(inner) => inner.error_code(),
            BattleError::AlreadyConcluded => "BATTLE_ALREADY_CONCLUDED",
            BattleError::EmptySide { .. } => "BATTLE_EMPTY_SIDE",
            BattleError::OversizedEncounter { .. } => "BATTLE_OVERSIZED_ENCOUNTER",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StatusId;

    #[test]
    fn master_data_errors_stay_fatal() {
        let err = BattleError::from(MasterDataError::StatusNotFound(StatusId(3)));
        assert_eq!(err.severity(), ErrorSeverity::Fatal);
        assert_eq!(err.error_code(), "MASTER_DATA_STATUS_NOT_FOUND");
        assert_eq!(err.to_string(), "status definition status.3 not found");
    }

    #[test]
    fn misuse_is_a_validation_error() {
        let err = BattleError::EmptySide { side: Side::Enemy };
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert_eq!(err.to_string(), "Enemy side has no combatants");
    }
}
