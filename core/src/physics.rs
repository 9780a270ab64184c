use crate::constants::*;
use crate::types::*;

/// How a player resting on top of an obstacle is supported.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Support {
    Ground,
    Player,
}

/// Anything a moving player is pushed out of.
pub trait Collidable {
    fn bounds(&self) -> Rect;

    /// Identity used for wall-jump bookkeeping. Obstacles without one
    /// block movement but never count as a wall.
    fn wall_id(&self) -> Option<PlatformId> {
        None
    }

    fn support(&self) -> Support;
}

impl Collidable for Platform {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn wall_id(&self) -> Option<PlatformId> {
        Some(self.id)
    }

    fn support(&self) -> Support {
        Support::Ground
    }
}

/// A side contact made during the horizontal pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallHit {
    pub wall: Option<PlatformId>,
    /// Direction pointing away from the obstacle: -1 after hitting it
    /// while moving right, +1 while moving left.
    pub away: f64,
}

/// Outcome of the vertical pass.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VerticalContact {
    pub blocked: bool,
    pub landed_on_ground: bool,
    pub landed_on_player: bool,
}

/// Velocity after one frame of gravity. No terminal velocity.
pub fn apply_gravity(vy: f64) -> f64 {
    vy + GRAVITY
}

/// Horizontal velocity from held keys: left wins over right, friction when idle.
pub fn apply_horizontal_input(vx: f64, input: &PlayerInput) -> f64 {
    if input.left() {
        -MOVE_SPEED
    } else if input.right() {
        MOVE_SPEED
    } else {
        vx * FRICTION
    }
}

/// Pushes `rect` out of every obstacle it overlaps after moving by `vx`.
///
/// The direction is taken from `vx` before any obstacle is visited, so a
/// rect overlapping two obstacles in one frame is pushed out of both.
/// `on_hit` sees each obstacle that caused a push. Returns whether any
/// obstacle overlapped, in which case the caller zeroes `vx`.
pub fn resolve_horizontal<C: Collidable>(
    rect: &mut Rect,
    vx: f64,
    obstacles: &[C],
    mut on_hit: impl FnMut(WallHit),
) -> bool {
    let mut blocked = false;
    for obstacle in obstacles {
        let bounds = obstacle.bounds();
        if !rect.overlaps(&bounds) {
            continue;
        }
        if vx > 0.0 {
            rect.set_right(bounds.left());
            on_hit(WallHit {
                wall: obstacle.wall_id(),
                away: -1.0,
            });
        } else if vx < 0.0 {
            rect.set_left(bounds.right());
            on_hit(WallHit {
                wall: obstacle.wall_id(),
                away: 1.0,
            });
        }
        blocked = true;
    }
    blocked
}

/// Pushes `rect` out of every obstacle it overlaps after moving by `vy`.
/// Falling lands on the obstacle's top, rising bumps its underside.
pub fn resolve_vertical<C: Collidable>(rect: &mut Rect, vy: f64, obstacles: &[C]) -> VerticalContact {
    let mut contact = VerticalContact::default();
    for obstacle in obstacles {
        let bounds = obstacle.bounds();
        if !rect.overlaps(&bounds) {
            continue;
        }
        if vy > 0.0 {
            rect.set_bottom(bounds.top());
            match obstacle.support() {
                Support::Ground => contact.landed_on_ground = true,
                Support::Player => contact.landed_on_player = true,
            }
        } else if vy < 0.0 {
            rect.set_top(bounds.bottom());
        }
        contact.blocked = true;
    }
    contact
}

/// True when `rect` sits on `below` without overlapping it: feet within
/// `STAND_TOLERANCE` of its top and horizontal spans overlapping.
pub fn rests_on(rect: &Rect, below: &Rect) -> bool {
    !below.is_degenerate()
        && (rect.bottom() - below.top()).abs() <= STAND_TOLERANCE
        && rect.spans_overlap_horizontally(below)
}

/// Removes every coin overlapping `rect`; returns how many were taken.
pub fn collect_coins(rect: &Rect, coins: &mut Vec<Coin>) -> u32 {
    let before = coins.len();
    coins.retain(|coin| !rect.overlaps(&coin.rect));
    (before - coins.len()) as u32
}
