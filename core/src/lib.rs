pub mod constants;
pub mod death;
pub mod events;
pub mod game;
pub mod hub;
pub mod init;
pub mod level;
pub mod physics;
pub mod player;
pub mod prng;
pub mod snapshot;
pub mod step;
pub mod transcript;
pub mod types;

pub use constants::*;
pub use death::{DeathAnimation, DeathCause, DeathStage, Particle};
pub use events::{DeathEvent, FrameEvents};
pub use game::{Game, GameMode, PlayingState};
pub use hub::{Hub, LevelPortal, PortalKind};
pub use init::*;
pub use level::{LevelCatalog, LevelError, LevelRecord, LevelSession, LevelSource};
pub use player::{Player, PlayerPhase};
pub use prng::*;
pub use snapshot::{ModeView, PlayerView, Snapshot};
pub use step::step;
pub use transcript::{replay, RunInput, RunSummary};
pub use types::*;
