use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::prng::Rng;
use crate::types::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeathCause {
    Spike,
    Fell,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "camelCase")]
pub enum DeathStage {
    /// Frozen with a surprised face.
    Startled,
    /// Drifting toward a fixed height on screen.
    #[serde(rename_all = "camelCase")]
    Levitate { target_center_y: f64 },
    /// Swelling from 1x to 3x; `frames` counts frames spent growing.
    Grow { frames: u32 },
    /// Exploded; only the particles and a fading flash remain.
    #[serde(rename_all = "camelCase")]
    Flash { flash_timer: i32 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f64,
    pub life: i32,
    pub color: Color,
}

impl Particle {
    pub fn spawn(at: Vec2, rng: &mut Rng) -> Self {
        let size = rng.range_i32(PARTICLE_MIN_SIZE, PARTICLE_MAX_SIZE) as f64;
        let vel = Vec2::new(
            rng.range_f64(-PARTICLE_SPEED, PARTICLE_SPEED),
            rng.range_f64(-PARTICLE_SPEED, PARTICLE_SPEED),
        );
        let life = rng.range_i32(PARTICLE_MIN_LIFE, PARTICLE_MAX_LIFE);
        let color = rng
            .pick(&EXPLOSION_COLORS)
            .copied()
            .unwrap_or(EXPLOSION_COLORS[0]);
        Self {
            pos: at,
            vel,
            size,
            life,
            color,
        }
    }

    pub fn update(&mut self) {
        self.vel.y += PARTICLE_GRAVITY;
        self.pos.x += self.vel.x;
        self.pos.y += self.vel.y;
        self.life -= 1;
        if self.life < PARTICLE_FADE_LIFE {
            self.size = (self.size - PARTICLE_SHRINK).max(PARTICLE_MIN_RADIUS);
        }
    }

    pub fn is_expired(&self) -> bool {
        self.life <= 0
    }
}

/// The dying half of a player's lifecycle. Runs instead of physics until
/// `timer` reaches zero, then the owner respawns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeathAnimation {
    pub cause: DeathCause,
    pub stage: DeathStage,
    /// Frames left until respawn.
    pub timer: i32,
    pub particles: Vec<Particle>,
}

impl DeathAnimation {
    pub fn new(cause: DeathCause) -> Self {
        Self {
            cause,
            stage: DeathStage::Startled,
            timer: DEATH_FRAMES,
            particles: Vec::new(),
        }
    }

    /// Advances one frame, moving and resizing `rect` as the stage demands.
    /// Returns true once the timer has run out.
    pub fn advance(&mut self, rect: &mut Rect, config: &GameConfig, rng: &mut Rng) -> bool {
        match self.stage {
            DeathStage::Startled => {
                if self.timer <= STARTLED_UNTIL {
                    self.stage = DeathStage::Levitate {
                        target_center_y: config.levitate_target_y(),
                    };
                }
            }
            DeathStage::Levitate { target_center_y } => {
                let dy = target_center_y - rect.center().y;
                if dy.abs() > LEVITATE_DEADZONE {
                    rect.y += dy.signum() * levitate_step(dy);
                }
                if dy.abs() < LEVITATE_ARRIVED {
                    self.stage = DeathStage::Grow { frames: 0 };
                }
            }
            DeathStage::Grow { frames } => {
                let frames = (frames + 1).min(GROW_FRAMES);
                let side = PLAYER_SIZE * grow_scale(frames);
                rect.resize_about_center(side, side);
                if frames >= GROW_BURST_FRAME {
                    let center = rect.center();
                    self.particles
                        .extend((0..PARTICLE_COUNT).map(|_| Particle::spawn(center, rng)));
                    self.stage = DeathStage::Flash {
                        flash_timer: FLASH_FRAMES,
                    };
                } else {
                    self.stage = DeathStage::Grow { frames };
                }
            }
            DeathStage::Flash { flash_timer } => {
                self.stage = DeathStage::Flash {
                    flash_timer: (flash_timer - 1).max(0),
                };
            }
        }

        for particle in &mut self.particles {
            particle.update();
        }
        self.particles.retain(|p| !p.is_expired());

        self.timer -= 1;
        self.timer <= 0
    }

    /// Flash frames left, zero outside the flash stage.
    pub fn flash_timer(&self) -> i32 {
        match self.stage {
            DeathStage::Flash { flash_timer } => flash_timer,
            _ => 0,
        }
    }
}

/// Distance covered this frame: 15% of the remaining gap, at least
/// `LEVITATE_MIN_RISE` when rising.
fn levitate_step(dy: f64) -> f64 {
    let step = dy.abs() * LEVITATE_RATE;
    if dy < 0.0 {
        step.max(LEVITATE_MIN_RISE)
    } else {
        step
    }
}

fn grow_scale(frames: u32) -> f64 {
    1.0 + (GROW_MAX_SCALE - 1.0) * frames as f64 / GROW_FRAMES as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_rect(x: f64, y: f64) -> Rect {
        Rect::new(x, y, PLAYER_SIZE, PLAYER_SIZE)
    }

    #[test]
    fn startled_lasts_fifteen_frames() {
        let config = GameConfig::default();
        let mut rng = Rng::new(1);
        let mut anim = DeathAnimation::new(DeathCause::Spike);
        let mut rect = player_rect(100.0, 600.0);
        for _ in 0..15 {
            anim.advance(&mut rect, &config, &mut rng);
            assert_eq!(anim.stage, DeathStage::Startled);
        }
        anim.advance(&mut rect, &config, &mut rng);
        assert_eq!(
            anim.stage,
            DeathStage::Levitate {
                target_center_y: 240.0
            }
        );
        assert_eq!(rect.y, 600.0);
    }

    #[test]
    fn levitate_rises_toward_target() {
        let config = GameConfig::default();
        let mut rng = Rng::new(1);
        let mut anim = DeathAnimation::new(DeathCause::Fell);
        anim.stage = DeathStage::Levitate {
            target_center_y: 240.0,
        };
        // Center at 620, gap 380 -> step 57.
        let mut rect = player_rect(100.0, 600.0);
        anim.advance(&mut rect, &config, &mut rng);
        assert!((rect.y - 543.0).abs() < 1e-9);
        assert_eq!(rect.x, 100.0);
    }

    #[test]
    fn levitate_floor_speed_when_close() {
        let config = GameConfig::default();
        let mut rng = Rng::new(1);
        let mut anim = DeathAnimation::new(DeathCause::Fell);
        anim.stage = DeathStage::Levitate {
            target_center_y: 240.0,
        };
        // Gap of 10 would step 1.5, floored to 3.
        let mut rect = player_rect(0.0, 230.0);
        anim.advance(&mut rect, &config, &mut rng);
        assert_eq!(rect.y, 227.0);
        assert_eq!(anim.stage, DeathStage::Grow { frames: 0 });
    }

    #[test]
    fn levitate_at_target_does_not_move() {
        let config = GameConfig::default();
        let mut rng = Rng::new(1);
        let mut anim = DeathAnimation::new(DeathCause::Spike);
        anim.stage = DeathStage::Levitate {
            target_center_y: 240.0,
        };
        let mut rect = player_rect(0.0, 220.0);
        anim.advance(&mut rect, &config, &mut rng);
        assert_eq!(rect.y, 220.0);
        assert!(rect.y.is_finite());
        assert_eq!(anim.stage, DeathStage::Grow { frames: 0 });
    }

    #[test]
    fn grow_scales_about_center_then_bursts() {
        let config = GameConfig::default();
        let mut rng = Rng::new(3);
        let mut anim = DeathAnimation::new(DeathCause::Spike);
        anim.stage = DeathStage::Grow { frames: 0 };
        let mut rect = player_rect(100.0, 220.0);
        let center = rect.center();

        anim.advance(&mut rect, &config, &mut rng);
        assert!(rect.width > PLAYER_SIZE);
        assert!((rect.center().y - center.y).abs() < 1e-9);

        let mut frames = 1;
        while !matches!(anim.stage, DeathStage::Flash { .. }) {
            anim.advance(&mut rect, &config, &mut rng);
            frames += 1;
            assert!(frames <= GROW_FRAMES);
        }
        assert_eq!(frames, GROW_BURST_FRAME);
        assert!(rect.width >= PLAYER_SIZE * 2.79);
        assert_eq!(anim.particles.len(), PARTICLE_COUNT);
        assert_eq!(anim.flash_timer(), FLASH_FRAMES);
        assert!((rect.center().x - center.x).abs() < 1e-9);
        assert!((rect.center().y - center.y).abs() < 1e-9);
    }

    #[test]
    fn particles_stay_in_range_and_expire() {
        let mut rng = Rng::new(11);
        let mut anim = DeathAnimation::new(DeathCause::Spike);
        anim.stage = DeathStage::Flash { flash_timer: 10 };
        anim.particles = (0..PARTICLE_COUNT)
            .map(|_| Particle::spawn(Vec2::new(0.0, 0.0), &mut rng))
            .collect();
        for p in &anim.particles {
            assert!((3.0..=8.0).contains(&p.size));
            assert!((20..=40).contains(&p.life));
            assert!(p.vel.x.abs() <= PARTICLE_SPEED);
            assert!(EXPLOSION_COLORS.contains(&p.color));
        }
        let config = GameConfig::default();
        let mut rect = player_rect(0.0, 0.0);
        for _ in 0..PARTICLE_MAX_LIFE {
            anim.advance(&mut rect, &config, &mut rng);
        }
        assert!(anim.particles.is_empty());
        assert_eq!(anim.flash_timer(), 0);
    }

    #[test]
    fn particle_shrinks_near_end_of_life() {
        let mut p = Particle {
            pos: Vec2::new(0.0, 0.0),
            vel: Vec2::new(1.0, 0.0),
            size: 1.1,
            life: 10,
            color: EXPLOSION_COLORS[0],
        };
        p.update();
        assert_eq!(p.life, 9);
        assert_eq!(p.size, PARTICLE_MIN_RADIUS);
        assert_eq!(p.vel.y, PARTICLE_GRAVITY);
        assert_eq!(p.pos.x, 1.0);
    }

    #[test]
    fn finishes_after_ninety_frames() {
        let config = GameConfig::default();
        let mut rng = Rng::new(5);
        let mut anim = DeathAnimation::new(DeathCause::Fell);
        let mut rect = player_rect(300.0, 760.0);
        for _ in 0..(DEATH_FRAMES - 1) {
            assert!(!anim.advance(&mut rect, &config, &mut rng));
        }
        assert!(anim.advance(&mut rect, &config, &mut rng));
    }
}
