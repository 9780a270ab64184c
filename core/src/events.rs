use serde::{Deserialize, Serialize};

use crate::death::DeathCause;
use crate::types::LevelId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathEvent {
    pub player_num: u8,
    pub cause: DeathCause,
}

/// Things that happened during one frame, for sound and effects to react to.
/// Indexes are player index (0 = player 1).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameEvents {
    pub coins_collected: [u32; 2],
    pub jumped: [bool; 2],
    pub respawned: [bool; 2],
    pub deaths: Vec<DeathEvent>,
    pub level_entered: Option<LevelId>,
    pub level_completed: Option<LevelId>,
    pub returned_to_hub: bool,
    pub all_levels_complete: bool,
    pub exit_requested: bool,
}

impl FrameEvents {
    pub fn total_coins(&self) -> u32 {
        self.coins_collected.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
