use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::*;
use crate::death::{DeathAnimation, DeathCause, DeathStage, Particle};
use crate::physics::*;
use crate::prng::Rng;
use crate::types::*;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PlayerPhase {
    Alive,
    Dying(DeathAnimation),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// 1 or 2.
    pub player_num: u8,
    pub rect: Rect,
    pub vx: f64,
    pub vy: f64,
    pub on_ground: bool,
    pub standing_on_player: bool,
    pub touching_wall: bool,
    pub can_wall_jump: bool,
    pub is_jumping: bool,
    /// Wall most recently used to arm a wall jump. Cleared on landing.
    pub last_wall_id: Option<PlatformId>,
    /// -1 or +1, away from the last wall touched.
    pub wall_jump_direction: f64,
    /// Frames left in which horizontal velocity is forced after a wall jump.
    pub bounce_timer: i32,
    pub ignore_wall_contact: bool,
    pub collected_coins: u32,
    pub spawn: Vec2,
    /// -1 looking left, 0 ahead, +1 right.
    pub eye_direction: i32,
    pub phase: PlayerPhase,
}

/// The world a player moves through for one frame.
pub struct Surroundings<'a> {
    pub platforms: &'a [Platform],
    /// The other players, as obstacles.
    pub others: &'a [Player],
    pub coins: &'a mut Vec<Coin>,
    pub config: &'a GameConfig,
}

/// What happened to a player during one update.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlayerFrame {
    pub coins_collected: u32,
    pub died: Option<DeathCause>,
    pub respawned: bool,
    pub jumped: bool,
}

impl Collidable for Player {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn support(&self) -> Support {
        Support::Player
    }
}

impl Player {
    pub fn new(player_num: u8, spawn: Vec2) -> Self {
        Self {
            player_num,
            rect: Rect::new(spawn.x, spawn.y, PLAYER_SIZE, PLAYER_SIZE),
            vx: 0.0,
            vy: 0.0,
            on_ground: false,
            standing_on_player: false,
            touching_wall: false,
            can_wall_jump: false,
            is_jumping: false,
            last_wall_id: None,
            wall_jump_direction: 0.0,
            bounce_timer: 0,
            ignore_wall_contact: false,
            collected_coins: 0,
            spawn,
            eye_direction: 0,
            phase: PlayerPhase::Alive,
        }
    }

    pub fn is_dying(&self) -> bool {
        matches!(self.phase, PlayerPhase::Dying(_))
    }

    pub fn death(&self) -> Option<&DeathAnimation> {
        match &self.phase {
            PlayerPhase::Dying(anim) => Some(anim),
            PlayerPhase::Alive => None,
        }
    }

    pub fn death_stage(&self) -> Option<DeathStage> {
        self.death().map(|anim| anim.stage)
    }

    pub fn particles(&self) -> &[Particle] {
        match self.death() {
            Some(anim) => &anim.particles,
            None => &[],
        }
    }

    /// One frame of movement, or of the death animation while dying.
    pub fn update(
        &mut self,
        input: &PlayerInput,
        world: Surroundings<'_>,
        rng: &mut Rng,
    ) -> PlayerFrame {
        let mut frame = PlayerFrame::default();

        if let PlayerPhase::Dying(anim) = &mut self.phase {
            if anim.advance(&mut self.rect, world.config, rng) {
                self.phase = PlayerPhase::Alive;
                self.rect.width = PLAYER_SIZE;
                self.rect.height = PLAYER_SIZE;
                self.respawn();
                frame.respawned = true;
            }
            return frame;
        }

        // Bounce lock
        let bouncing = self.bounce_timer > 0;
        if bouncing {
            self.bounce_timer -= 1;
            self.vx = self.wall_jump_direction * WALL_BOUNCE_SPEED;
            self.ignore_wall_contact = true;
        } else {
            self.ignore_wall_contact = false;
        }

        // Horizontal intent; held keys cannot cancel a bounce.
        self.eye_direction = if input.left() {
            -1
        } else if input.right() {
            1
        } else {
            0
        };
        if !bouncing {
            self.vx = apply_horizontal_input(self.vx, input);
        }

        // Jump
        let supported = self.on_ground || self.standing_on_player;
        if input.jump() && self.bounce_timer <= 0 && (supported || self.can_wall_jump) {
            self.vy = JUMP_STRENGTH;
            self.is_jumping = true;
            frame.jumped = true;
            if self.can_wall_jump {
                self.vx = self.wall_jump_direction * WALL_BOUNCE_SPEED;
                self.can_wall_jump = false;
                self.bounce_timer = WALL_BOUNCE_FRAMES;
            }
        }

        self.vy = apply_gravity(self.vy);

        // Horizontal move-then-resolve
        self.rect.x += self.vx;
        self.touching_wall = false;
        let mut current_wall = None;
        let ignore = self.ignore_wall_contact;
        let last_wall = self.last_wall_id;
        let mut wall_dir = self.wall_jump_direction;
        let mut touching = false;
        let hit_platform = resolve_horizontal(&mut self.rect, self.vx, world.platforms, |hit| {
            if ignore && hit.wall == last_wall {
                return;
            }
            touching = true;
            wall_dir = hit.away;
            current_wall = hit.wall;
        });
        self.touching_wall = touching;
        self.wall_jump_direction = wall_dir;
        let hit_player = resolve_horizontal(&mut self.rect, self.vx, world.others, |_| {});
        if hit_platform || hit_player {
            self.vx = 0.0;
        }

        // Wall-jump arming
        if self.touching_wall && !self.on_ground && current_wall != self.last_wall_id {
            self.can_wall_jump = true;
            self.last_wall_id = current_wall;
        }

        // Vertical move-then-resolve
        self.rect.y += self.vy;
        self.on_ground = false;
        self.standing_on_player = false;
        let ground = resolve_vertical(&mut self.rect, self.vy, world.platforms);
        if ground.blocked {
            self.vy = 0.0;
        }
        self.on_ground = ground.landed_on_ground;
        let stacked = resolve_vertical(&mut self.rect, self.vy, world.others);
        if stacked.blocked {
            self.vy = 0.0;
        }
        self.standing_on_player = stacked.landed_on_player
            || world.others.iter().any(|other| rests_on(&self.rect, &other.rect));

        // Coins
        let taken = collect_coins(&self.rect, world.coins);
        self.collected_coins += taken;
        frame.coins_collected = taken;

        // Landing clears wall history
        if self.on_ground {
            self.is_jumping = false;
            self.last_wall_id = None;
        }

        if !(self.touching_wall && !self.on_ground) {
            self.can_wall_jump = false;
        }

        if self.rect.top() > world.config.fall_limit() {
            self.start_death(DeathCause::Fell);
            frame.died = Some(DeathCause::Fell);
        }

        frame
    }

    /// Begins the death animation. Does nothing if already dying.
    pub fn start_death(&mut self, cause: DeathCause) {
        if self.is_dying() {
            return;
        }
        debug!(player = self.player_num, ?cause, "player died");
        self.vx = 0.0;
        self.vy = 0.0;
        self.can_wall_jump = false;
        self.touching_wall = false;
        self.on_ground = false;
        self.standing_on_player = false;
        self.bounce_timer = 0;
        self.phase = PlayerPhase::Dying(DeathAnimation::new(cause));
    }

    /// Back to the spawn point at rest. Keeps `collected_coins`.
    pub fn respawn(&mut self) {
        self.rect.x = self.spawn.x;
        self.rect.y = self.spawn.y;
        self.vx = 0.0;
        self.vy = 0.0;
        self.last_wall_id = None;
        self.can_wall_jump = false;
        self.touching_wall = false;
        self.on_ground = false;
        self.standing_on_player = false;
        self.is_jumping = false;
        self.bounce_timer = 0;
        self.ignore_wall_contact = false;
    }

    pub fn set_spawn(&mut self, spawn: Vec2) {
        self.spawn = spawn;
    }

    /// Full reset used on level load and restart: cancels any death,
    /// restores the default size, respawns, and clears coin progress.
    pub fn reset_to_spawn(&mut self) {
        self.phase = PlayerPhase::Alive;
        self.rect.width = PLAYER_SIZE;
        self.rect.height = PLAYER_SIZE;
        self.respawn();
        self.eye_direction = 0;
        self.collected_coins = 0;
    }
}
