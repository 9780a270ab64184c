use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::player::Player;
use crate::types::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortalKind {
    Door,
    Pipe,
    Portal,
}

/// A level entry point on the hub map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelPortal {
    pub level: LevelId,
    pub kind: PortalKind,
    pub rect: Rect,
    pub both_players_touching: bool,
}

impl LevelPortal {
    /// Places the portal for `level` in its world's area. Worlds without an
    /// area on the map get no portal.
    pub fn for_level(level: LevelId, config: &GameConfig) -> Option<Self> {
        let h = config.screen_height;
        let (base_x, y, kind) = match level.world {
            1 => (120.0, h - 220.0, PortalKind::Door),
            2 => (520.0, h - 380.0, PortalKind::Pipe),
            3 => (920.0, h - 540.0, PortalKind::Portal),
            _ => return None,
        };
        let x = base_x + (level.level as f64 - 1.0) * PORTAL_SPACING;
        Some(Self {
            level,
            kind,
            rect: Rect::new(x, y, PORTAL_WIDTH, PORTAL_HEIGHT),
            both_players_touching: false,
        })
    }
}

/// The level-select map players walk around between levels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hub {
    pub platforms: Vec<Platform>,
    pub portals: Vec<LevelPortal>,
    pub spawns: [Vec2; 2],
}

const WORLD1_COLOR: Color = [139, 69, 19];
const WORLD2_COLOR: Color = [75, 75, 75];
const WORLD3_COLOR: Color = [50, 50, 100];
const BRIDGE_COLOR: Color = [128, 128, 128];
const GRASS_COLOR: Color = [0, 255, 0];
const DARK_COLOR: Color = [50, 50, 50];
const MAGIC_COLOR: Color = [100, 50, 150];

impl Hub {
    pub fn new(levels: &[LevelId], config: &GameConfig) -> Self {
        let h = config.screen_height;
        let layout: [(f64, f64, f64, f64, Color); 14] = [
            // World 1, bottom left
            (50.0, h - 40.0, 300.0, 40.0, WORLD1_COLOR),
            (100.0, h - 120.0, 200.0, 20.0, WORLD1_COLOR),
            // World 2, middle
            (450.0, h - 200.0, 300.0, 40.0, WORLD2_COLOR),
            (500.0, h - 280.0, 200.0, 20.0, WORLD2_COLOR),
            // World 3, top right
            (850.0, h - 360.0, 350.0, 40.0, WORLD3_COLOR),
            (900.0, h - 440.0, 250.0, 20.0, WORLD3_COLOR),
            // Bridges
            (350.0, h - 120.0, 100.0, 20.0, BRIDGE_COLOR),
            (750.0, h - 280.0, 100.0, 20.0, BRIDGE_COLOR),
            // Decoration blocks
            (80.0, h - 60.0, 20.0, 20.0, GRASS_COLOR),
            (280.0, h - 60.0, 20.0, 20.0, GRASS_COLOR),
            (480.0, h - 220.0, 20.0, 20.0, DARK_COLOR),
            (680.0, h - 220.0, 20.0, 20.0, DARK_COLOR),
            (880.0, h - 380.0, 20.0, 20.0, MAGIC_COLOR),
            (1180.0, h - 380.0, 20.0, 20.0, MAGIC_COLOR),
        ];
        let platforms = layout
            .iter()
            .enumerate()
            .map(|(i, &(x, y, width, height, color))| Platform {
                id: PlatformId(i as u32),
                rect: Rect::new(x, y, width, height),
                color,
            })
            .collect();
        let portals = levels
            .iter()
            .filter_map(|id| LevelPortal::for_level(*id, config))
            .collect();

        Self {
            platforms,
            portals,
            spawns: [Vec2::new(150.0, h - 100.0), Vec2::new(200.0, h - 100.0)],
        }
    }

    /// Recomputes which portals both players currently overlap.
    pub fn update_portals(&mut self, players: &[Player]) {
        for portal in &mut self.portals {
            portal.both_players_touching =
                !players.is_empty() && players.iter().all(|p| portal.rect.overlaps(&p.rect));
        }
    }

    /// The first portal both players stand in, if any.
    pub fn selected_level(&self) -> Option<LevelId> {
        self.portals
            .iter()
            .find(|portal| portal.both_players_touching)
            .map(|portal| portal.level)
    }
}
