use crate::types::PlayerId;

/// Errors raised by region lookups.
///
/// Both variants are programming errors on the caller's side: a player must be
/// added exactly once before it can be queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("no region allocated for player {0}")]
    PlayerNotFound(PlayerId),
    #[error("player {0} already has a region")]
    DuplicatePlayer(PlayerId),
}
