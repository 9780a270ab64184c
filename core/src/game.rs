use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::hub::Hub;
use crate::level::{LevelCatalog, LevelSession, LevelSource};
use crate::player::Player;
use crate::prng::Rng;
use crate::types::*;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayingState {
    pub session: LevelSession,
    /// Latches once both players reach the goal with every coin taken.
    pub level_complete: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameMode {
    HubSelect(Hub),
    Playing(PlayingState),
}

/// Whole-program state: the two players, the current mode, and where levels come from.
#[derive(Clone, Debug)]
pub struct Game<S: LevelSource = LevelCatalog> {
    pub config: GameConfig,
    pub levels: S,
    pub mode: GameMode,
    pub players: [Player; 2],
    pub frame: Frame,
    pub rng: Rng,
    pub all_levels_complete: bool,
    pub exit_requested: bool,
}

impl<S: LevelSource> Game<S> {
    /// Starts on the hub with both players at the hub spawns.
    pub fn new(config: GameConfig, levels: S) -> Self {
        let hub = Hub::new(&levels.available(), &config);
        let players = [Player::new(1, hub.spawns[0]), Player::new(2, hub.spawns[1])];
        let rng = Rng::new(config.seed);
        Self {
            config,
            levels,
            mode: GameMode::HubSelect(hub),
            players,
            frame: 0,
            rng,
            all_levels_complete: false,
            exit_requested: false,
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.mode, GameMode::Playing(_))
    }

    pub fn hub(&self) -> Option<&Hub> {
        match &self.mode {
            GameMode::HubSelect(hub) => Some(hub),
            GameMode::Playing(_) => None,
        }
    }

    pub fn session(&self) -> Option<&LevelSession> {
        match &self.mode {
            GameMode::Playing(play) => Some(&play.session),
            GameMode::HubSelect(_) => None,
        }
    }

    pub fn current_level(&self) -> Option<LevelId> {
        self.session().map(|s| s.id)
    }

    pub fn level_complete(&self) -> bool {
        matches!(&self.mode, GameMode::Playing(play) if play.level_complete)
    }

    /// Loads `id` and drops both players at its spawns with no coins.
    pub fn enter_level(&mut self, id: LevelId) {
        let session = self.levels.load(id, &self.config);
        for (i, player) in self.players.iter_mut().enumerate() {
            player.set_spawn(session.spawn_point(i));
            player.reset_to_spawn();
        }
        info!(level = %session.id, name = %session.name, "entering level");
        self.mode = GameMode::Playing(PlayingState {
            session,
            level_complete: false,
        });
    }

    /// Reloads the current level from scratch. After the last level has been
    /// cleared this starts over from the first one. Returns the level loaded.
    pub fn restart(&mut self) -> Option<LevelId> {
        let current = self.current_level()?;
        let id = if self.all_levels_complete {
            self.all_levels_complete = false;
            self.levels.first().unwrap_or(current)
        } else {
            current
        };
        self.enter_level(id);
        Some(id)
    }

    /// Moves on once the current level is complete. Sets
    /// `all_levels_complete` instead when there is nothing after it.
    pub fn next_level(&mut self) -> Option<LevelId> {
        if !self.level_complete() || self.all_levels_complete {
            return None;
        }
        let current = self.current_level()?;
        match self.levels.next_after(current) {
            Some(next) => {
                self.enter_level(next);
                Some(next)
            }
            None => {
                info!("all levels complete");
                self.all_levels_complete = true;
                None
            }
        }
    }

    /// Abandons the level and puts both players back on the hub.
    pub fn return_to_hub(&mut self) {
        let hub = Hub::new(&self.levels.available(), &self.config);
        for (player, spawn) in self.players.iter_mut().zip(hub.spawns) {
            player.set_spawn(spawn);
            player.reset_to_spawn();
        }
        debug!("returned to hub");
        self.mode = GameMode::HubSelect(hub);
    }

    /// Enters the level whose portal both players occupy, if any.
    pub fn try_enter_selected(&mut self) -> Option<LevelId> {
        let GameMode::HubSelect(hub) = &mut self.mode else {
            return None;
        };
        hub.update_portals(&self.players);
        let id = hub.selected_level()?;
        self.enter_level(id);
        Some(id)
    }
}
