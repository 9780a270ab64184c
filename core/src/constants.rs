use crate::types::Color;

// All values are per-frame at 60 Hz unless noted.

// Physics
pub const GRAVITY: f64 = 0.8;
pub const JUMP_STRENGTH: f64 = -15.0;
pub const MOVE_SPEED: f64 = 5.0;
pub const FRICTION: f64 = 0.9;

// Wall jump
pub const WALL_BOUNCE_FRAMES: i32 = 10;
pub const WALL_BOUNCE_SPEED: f64 = MOVE_SPEED * 1.5;

// Max gap between a player's feet and another player's head that still counts as standing on them
pub const STAND_TOLERANCE: f64 = 1.0;

// Player hitbox
pub const PLAYER_SIZE: f64 = 40.0;

// Level objects
pub const COIN_SIZE: f64 = 30.0;
pub const COIN_SPIN_DEGREES: f64 = 2.0;
pub const SPIKE_WIDTH: f64 = 30.0;
pub const SPIKE_HEIGHT: f64 = 15.0;
pub const GOAL_WIDTH: f64 = 60.0;
pub const GOAL_HEIGHT: f64 = 80.0;
pub const PLATFORM_BROWN: Color = [139, 69, 19];

// Hub portals
pub const PORTAL_WIDTH: f64 = 80.0;
pub const PORTAL_HEIGHT: f64 = 100.0;
pub const PORTAL_SPACING: f64 = 90.0;

// Death animation
pub const DEATH_FRAMES: i32 = 90;
/// Death timer value at which the startled pause ends.
pub const STARTLED_UNTIL: i32 = 75;
pub const LEVITATE_RATE: f64 = 0.15;
pub const LEVITATE_MIN_RISE: f64 = 3.0;
pub const LEVITATE_DEADZONE: f64 = 5.0;
pub const LEVITATE_ARRIVED: f64 = 20.0;
pub const GROW_FRAMES: u32 = 30;
pub const GROW_MAX_SCALE: f64 = 3.0;
/// Grow frame on which the scale reaches 2.8x and the player bursts.
pub const GROW_BURST_FRAME: u32 = 27;
pub const FLASH_FRAMES: i32 = 10;

// Explosion particles
pub const PARTICLE_COUNT: usize = 80;
pub const PARTICLE_MIN_SIZE: i32 = 3;
pub const PARTICLE_MAX_SIZE: i32 = 8;
pub const PARTICLE_SPEED: f64 = 10.0;
pub const PARTICLE_MIN_LIFE: i32 = 20;
pub const PARTICLE_MAX_LIFE: i32 = 40;
pub const PARTICLE_GRAVITY: f64 = 0.2;
pub const PARTICLE_FADE_LIFE: i32 = 10;
pub const PARTICLE_SHRINK: f64 = 0.2;
pub const PARTICLE_MIN_RADIUS: f64 = 1.0;
pub const EXPLOSION_COLORS: [Color; 4] = [
    [255, 0, 0],
    [255, 128, 0],
    [255, 255, 0],
    [255, 255, 255],
];

// Screen
pub const SCREEN_WIDTH: f64 = 1280.0;
pub const SCREEN_HEIGHT: f64 = 720.0;

// Tick rate
pub const TICK_RATE: u32 = 60;
