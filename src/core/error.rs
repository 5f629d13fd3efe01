use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Unit not found: {0:?}")]
    UnitNotFound(crate::core::types::UnitId),

    #[error("Effect not found: {0:?}")]
    EffectNotFound(crate::core::types::EffectId),

    #[error("Invalid combatant record: {0}")]
    InvalidRecord(String),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
