//! Game sessions: participants, the per-match state machine, serialized
//! handles and the registry that owns them.

mod error;
mod game;
mod handle;
mod player;
mod registry;

pub use error::SessionError;
pub use game::{GameSession, PendingMove, SessionSnapshot};
pub use handle::SessionHandle;
pub use player::{Player, PlayerKind};
pub use registry::SessionRegistry;
