use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::*;

// ── Primitives ──────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

pub type Frame = u32;
pub type Seed = u32;
pub type Color = [u8; 3];

/// Axis-aligned rectangle, top-left origin, y grows downward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn set_left(&mut self, left: f64) {
        self.x = left;
    }

    pub fn set_right(&mut self, right: f64) {
        self.x = right - self.width;
    }

    pub fn set_top(&mut self, top: f64) {
        self.y = top;
    }

    pub fn set_bottom(&mut self, bottom: f64) {
        self.y = bottom - self.height;
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.x = center.x - self.width / 2.0;
        self.y = center.y - self.height / 2.0;
    }

    /// Resizes in place, keeping the current center.
    pub fn resize_about_center(&mut self, width: f64, height: f64) {
        let center = self.center();
        self.width = width;
        self.height = height;
        self.set_center(center);
    }

    /// True when the rectangle has no area (including NaN extents).
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Strict overlap: touching edges do not count, and a degenerate
    /// rectangle never overlaps anything.
    pub fn overlaps(&self, other: &Rect) -> bool {
        if self.is_degenerate() || other.is_degenerate() {
            return false;
        }
        self.spans_overlap_horizontally(other)
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    pub fn spans_overlap_horizontally(&self, other: &Rect) -> bool {
        self.left() < other.right() && other.left() < self.right()
    }
}

// ── Identity ────────────────────────────────────────────────

/// Stable per-level platform handle, assigned in declaration order at load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlatformId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LevelId {
    pub world: u32,
    pub level: u32,
}

impl LevelId {
    pub const fn new(world: u32, level: u32) -> Self {
        Self { world, level }
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.world, self.level)
    }
}

// ── Input ───────────────────────────────────────────────────

/// Per-player button bitmask constants.
pub mod button {
    pub const LEFT: u8 = 1;
    pub const RIGHT: u8 = 2;
    pub const JUMP: u8 = 4;
}

/// Shared command bitmask constants (menu-level keys).
pub mod command {
    pub const CONFIRM: u8 = 1;
    pub const CANCEL: u8 = 2;
    pub const RESTART: u8 = 4;
    pub const NEXT: u8 = 8;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInput {
    pub buttons: u8,
}

impl PlayerInput {
    pub const fn new(buttons: u8) -> Self {
        Self { buttons }
    }

    pub fn left(&self) -> bool {
        self.buttons & button::LEFT != 0
    }

    pub fn right(&self) -> bool {
        self.buttons & button::RIGHT != 0
    }

    pub fn jump(&self) -> bool {
        self.buttons & button::JUMP != 0
    }
}

pub const NULL_INPUT: PlayerInput = PlayerInput { buttons: 0 };

/// Everything polled from the input devices for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameInput {
    pub players: [PlayerInput; 2],
    #[serde(default)]
    pub commands: u8,
}

impl FrameInput {
    pub const IDLE: FrameInput = FrameInput {
        players: [NULL_INPUT; 2],
        commands: 0,
    };

    pub const fn new(p1: u8, p2: u8, commands: u8) -> Self {
        Self {
            players: [PlayerInput::new(p1), PlayerInput::new(p2)],
            commands,
        }
    }

    pub fn has(&self, cmd: u8) -> bool {
        self.commands & cmd != 0
    }
}

// ── Level objects ───────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: PlatformId,
    pub rect: Rect,
    pub color: Color,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub rect: Rect,
    /// Cosmetic spin, degrees.
    pub angle: f64,
}

impl Coin {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            rect: Rect::new(x, y, COIN_SIZE, COIN_SIZE),
            angle: 0.0,
        }
    }

    pub fn spin(&mut self) {
        self.angle = (self.angle + COIN_SPIN_DEGREES) % 360.0;
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Spike {
    pub rect: Rect,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub rect: Rect,
    /// Door and flag goals behave the same; only the door shows `door_open`.
    pub is_door: bool,
    pub door_open: bool,
}

impl Goal {
    pub fn new(x: f64, y: f64, is_door: bool) -> Self {
        Self {
            rect: Rect::new(x, y, GOAL_WIDTH, GOAL_HEIGHT),
            is_door,
            door_open: false,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    #[default]
    Day,
    Night,
}

// ── Config ──────────────────────────────────────────────────

/// Immutable runtime configuration, passed by reference everywhere it is needed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seeds the particle generator.
    pub seed: Seed,
    pub screen_width: f64,
    pub screen_height: f64,
    pub tick_rate: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            tick_rate: TICK_RATE,
        }
    }
}

impl GameConfig {
    /// A player whose top edge passes this line has fallen out of the level.
    pub fn fall_limit(&self) -> f64 {
        self.screen_height
    }

    /// Center height a dying player levitates toward.
    pub fn levitate_target_y(&self) -> f64 {
        (self.screen_height / 3.0).floor()
    }

    /// Wall-clock length of `frames` at the configured tick rate.
    pub fn seconds(&self, frames: Frame) -> f64 {
        if self.tick_rate == 0 {
            return 0.0;
        }
        f64::from(frames) / f64::from(self.tick_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn overlap_is_symmetric() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(9.0, 9.0, 5.0, 5.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn degenerate_rect_never_overlaps() {
        let big = Rect::new(-100.0, -100.0, 400.0, 400.0);
        assert!(!Rect::new(5.0, 5.0, 0.0, 10.0).overlaps(&big));
        assert!(!Rect::new(5.0, 5.0, 10.0, 0.0).overlaps(&big));
        assert!(!Rect::new(5.0, 5.0, -3.0, 10.0).overlaps(&big));
        assert!(!big.overlaps(&Rect::new(5.0, 5.0, f64::NAN, 10.0)));
    }

    #[test]
    fn resize_keeps_center() {
        let mut r = Rect::new(100.0, 100.0, 40.0, 40.0);
        r.resize_about_center(120.0, 120.0);
        assert_eq!(r.center(), Vec2::new(120.0, 120.0));
        assert_eq!(r.x, 60.0);
        assert_eq!(r.width, 120.0);
    }

    #[test]
    fn edge_setters_move_the_rect() {
        let mut r = Rect::new(0.0, 0.0, 40.0, 40.0);
        r.set_right(5.0);
        assert_eq!(r.x, -35.0);
        r.set_bottom(100.0);
        assert_eq!(r.y, 60.0);
    }

    #[test]
    fn coin_angle_wraps() {
        let mut coin = Coin::new(0.0, 0.0);
        coin.angle = 359.0;
        coin.spin();
        assert_eq!(coin.angle, 1.0);
    }

    #[test]
    fn frame_input_commands() {
        let input = FrameInput::new(button::LEFT, button::JUMP, command::CONFIRM | command::NEXT);
        assert!(input.players[0].left());
        assert!(!input.players[0].jump());
        assert!(input.players[1].jump());
        assert!(input.has(command::CONFIRM));
        assert!(input.has(command::NEXT));
        assert!(!input.has(command::CANCEL));
    }

    #[test]
    fn frame_input_commands_default_when_absent() {
        let input: FrameInput =
            serde_json::from_str(r#"{"players":[{"buttons":2},{"buttons":0}]}"#).unwrap();
        assert_eq!(input.commands, 0);
        assert!(input.players[0].right());
    }

    #[test]
    fn config_fills_missing_fields() {
        let config: GameConfig = serde_json::from_str(r#"{"seed":7}"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.screen_height, SCREEN_HEIGHT);
        assert_eq!(config.levitate_target_y(), 240.0);
    }

    #[test]
    fn seconds_follow_tick_rate() {
        let mut config = GameConfig::default();
        assert_eq!(config.seconds(TICK_RATE * 2), 2.0);
        config.tick_rate = 30;
        assert_eq!(config.seconds(45), 1.5);
        config.tick_rate = 0;
        assert_eq!(config.seconds(45), 0.0);
    }

    #[test]
    fn level_id_orders_by_world_then_level() {
        assert!(LevelId::new(1, 9) < LevelId::new(2, 1));
        assert!(LevelId::new(2, 1) < LevelId::new(2, 2));
        assert_eq!(LevelId::new(3, 2).to_string(), "3-2");
    }
}
