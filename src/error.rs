use thiserror::Error;

/// Recoverable outcomes of player commands. None of these abort the
/// simulation; the presentation layer shows the reason and play continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("insufficient funds")]
    InsufficientFunds,
    #[error("technology '{0}' must be unlocked first")]
    MissingTechnology(String),
    #[error("prerequisite '{0}' is not unlocked")]
    UnmetPrerequisite(String),
    #[error("unknown construction '{0}'")]
    UnknownConstruction(String),
    #[error("unknown technology '{0}'")]
    UnknownTechnology(String),
    #[error("technology is already unlocked")]
    AlreadyUnlocked,
    #[error("technology is already being researched")]
    AlreadyResearching,
}
