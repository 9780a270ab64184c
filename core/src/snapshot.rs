use serde::{Deserialize, Serialize};

use crate::death::{DeathStage, Particle};
use crate::game::{Game, GameMode};
use crate::hub::LevelPortal;
use crate::level::LevelSource;
use crate::player::Player;
use crate::types::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModeView {
    HubSelect,
    Playing,
}

/// Everything a renderer needs to draw one player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub player_num: u8,
    pub rect: Rect,
    pub vel: Vec2,
    pub on_ground: bool,
    pub standing_on_player: bool,
    pub touching_wall: bool,
    pub can_wall_jump: bool,
    pub collected_coins: u32,
    pub eye_direction: i32,
    /// Smiles once the level has no coins left.
    pub happy: bool,
    pub dying: bool,
    pub death_stage: Option<DeathStage>,
    pub flash_timer: i32,
    pub particles: Vec<Particle>,
}

impl PlayerView {
    fn of(player: &Player, happy: bool) -> Self {
        Self {
            player_num: player.player_num,
            rect: player.rect,
            vel: Vec2::new(player.vx, player.vy),
            on_ground: player.on_ground,
            standing_on_player: player.standing_on_player,
            touching_wall: player.touching_wall,
            can_wall_jump: player.can_wall_jump,
            collected_coins: player.collected_coins,
            eye_direction: player.eye_direction,
            happy,
            dying: player.is_dying(),
            death_stage: player.death_stage(),
            flash_timer: player.death().map_or(0, |anim| anim.flash_timer()),
            particles: player.particles().to_vec(),
        }
    }
}

/// Read-only picture of the game after a step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub frame: Frame,
    pub mode: ModeView,
    pub players: Vec<PlayerView>,
    pub platforms: Vec<Platform>,
    pub coins: Vec<Coin>,
    pub spikes: Vec<Spike>,
    pub goal: Option<Goal>,
    pub portals: Vec<LevelPortal>,
    pub level: Option<LevelId>,
    pub level_name: Option<String>,
    pub background: Background,
    pub coins_remaining: u32,
    pub total_coins: u32,
    pub level_complete: bool,
    pub all_levels_complete: bool,
    pub exit_requested: bool,
}

impl<S: LevelSource> Game<S> {
    pub fn snapshot(&self) -> Snapshot {
        let mut snap = Snapshot {
            frame: self.frame,
            mode: ModeView::HubSelect,
            players: Vec::new(),
            platforms: Vec::new(),
            coins: Vec::new(),
            spikes: Vec::new(),
            goal: None,
            portals: Vec::new(),
            level: None,
            level_name: None,
            background: Background::Day,
            coins_remaining: 0,
            total_coins: 0,
            level_complete: false,
            all_levels_complete: self.all_levels_complete,
            exit_requested: self.exit_requested,
        };

        match &self.mode {
            GameMode::HubSelect(hub) => {
                snap.platforms = hub.platforms.clone();
                snap.portals = hub.portals.clone();
            }
            GameMode::Playing(play) => {
                let session = &play.session;
                snap.mode = ModeView::Playing;
                snap.platforms = session.platforms.clone();
                snap.coins = session.coins.clone();
                snap.spikes = session.spikes.clone();
                snap.goal = Some(session.goal.clone());
                snap.level = Some(session.id);
                snap.level_name = Some(session.name.clone());
                snap.background = session.background;
                snap.coins_remaining = session.coins_remaining();
                snap.total_coins = session.total_coins;
                snap.level_complete = play.level_complete;
            }
        }

        let happy = snap.coins.is_empty();
        snap.players = self.players.iter().map(|p| PlayerView::of(p, happy)).collect();
        snap
    }
}
