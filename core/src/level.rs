use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::constants::*;
use crate::types::*;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LevelError {
    #[error("level {0} not found")]
    NotFound(LevelId),

    #[error("level {0} registered twice")]
    Duplicate(LevelId),
}

// ── Level records (on-disk format) ──────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlatformRecord {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_platform_color")]
    pub color: Color,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpikeRecord {
    pub x: f64,
    pub y: f64,
    #[serde(default = "default_spike_width")]
    pub width: f64,
    #[serde(default = "default_spike_height")]
    pub height: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoalRecord {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub is_door: bool,
}

/// One level as written by the level tools.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelRecord {
    #[serde(default = "first_index")]
    pub world: u32,
    #[serde(default = "first_index")]
    pub level: u32,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default, rename = "background_type")]
    pub background: Background,
    #[serde(default)]
    pub platforms: Vec<PlatformRecord>,
    #[serde(default)]
    pub coins: Vec<PointRecord>,
    #[serde(default)]
    pub spikes: Vec<SpikeRecord>,
    #[serde(default)]
    pub goal: Option<GoalRecord>,
    #[serde(default)]
    pub player_spawns: Vec<PointRecord>,
}

fn default_platform_color() -> Color {
    PLATFORM_BROWN
}

fn default_spike_width() -> f64 {
    SPIKE_WIDTH
}

fn default_spike_height() -> f64 {
    SPIKE_HEIGHT
}

fn first_index() -> u32 {
    1
}

fn default_name() -> String {
    "Unnamed Level".to_string()
}

/// Spawn points used when a level omits them.
pub fn default_spawns(config: &GameConfig) -> [Vec2; 2] {
    [
        Vec2::new(100.0, config.screen_height - 100.0),
        Vec2::new(150.0, config.screen_height - 100.0),
    ]
}

/// Goal used when a level omits one: a flag near the bottom-right corner.
pub fn default_goal(config: &GameConfig) -> Goal {
    Goal::new(
        config.screen_width - 100.0,
        config.screen_height - 120.0,
        false,
    )
}

impl LevelRecord {
    pub fn id(&self) -> LevelId {
        LevelId::new(self.world, self.level)
    }

    /// Builds a fresh session. Geometry is taken as-is; platform ids follow
    /// declaration order.
    pub fn to_session(&self, config: &GameConfig) -> LevelSession {
        let platforms = self
            .platforms
            .iter()
            .enumerate()
            .map(|(i, p)| Platform {
                id: PlatformId(i as u32),
                rect: Rect::new(p.x, p.y, p.width, p.height),
                color: p.color,
            })
            .collect();
        let coins: Vec<Coin> = self.coins.iter().map(|c| Coin::new(c.x, c.y)).collect();
        let spikes = self
            .spikes
            .iter()
            .map(|s| Spike {
                rect: Rect::new(s.x, s.y, s.width, s.height),
            })
            .collect();
        let goal = self
            .goal
            .as_ref()
            .map(|g| Goal::new(g.x, g.y, g.is_door))
            .unwrap_or_else(|| default_goal(config));
        let mut spawns = default_spawns(config);
        for (slot, point) in spawns.iter_mut().zip(&self.player_spawns) {
            *slot = Vec2::new(point.x, point.y);
        }

        LevelSession {
            id: self.id(),
            name: self.name.clone(),
            background: self.background,
            platforms,
            total_coins: coins.len() as u32,
            coins,
            spikes,
            goal,
            spawns,
        }
    }
}

// ── Session ─────────────────────────────────────────────────

/// Everything live in the level being played. Replaced wholesale on load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelSession {
    pub id: LevelId,
    pub name: String,
    pub background: Background,
    pub platforms: Vec<Platform>,
    /// Coins still in play; pickup removes entries.
    pub coins: Vec<Coin>,
    pub spikes: Vec<Spike>,
    pub goal: Goal,
    pub spawns: [Vec2; 2],
    pub total_coins: u32,
}

impl LevelSession {
    /// Minimal playable level: floor, one ledge, side walls, one coin.
    pub fn fallback(id: LevelId, config: &GameConfig) -> Self {
        let (w, h) = (config.screen_width, config.screen_height);
        let record = LevelRecord {
            world: id.world,
            level: id.level,
            name: "Fallback Level".to_string(),
            background: Background::Day,
            platforms: vec![
                PlatformRecord {
                    x: 0.0,
                    y: h - 40.0,
                    width: w,
                    height: 40.0,
                    color: PLATFORM_BROWN,
                },
                PlatformRecord {
                    x: 200.0,
                    y: h - 150.0,
                    width: 200.0,
                    height: 20.0,
                    color: PLATFORM_BROWN,
                },
                PlatformRecord {
                    x: 0.0,
                    y: 0.0,
                    width: 20.0,
                    height: h - 40.0,
                    color: PLATFORM_BROWN,
                },
                PlatformRecord {
                    x: w - 20.0,
                    y: 0.0,
                    width: 20.0,
                    height: h - 40.0,
                    color: PLATFORM_BROWN,
                },
            ],
            coins: vec![PointRecord { x: 250.0, y: h - 200.0 }],
            spikes: Vec::new(),
            goal: None,
            player_spawns: Vec::new(),
        };
        record.to_session(config)
    }

    pub fn spawn_point(&self, player_index: usize) -> Vec2 {
        self.spawns[player_index.min(1)]
    }

    pub fn coins_remaining(&self) -> u32 {
        self.coins.len() as u32
    }

    pub fn all_coins_collected(&self) -> bool {
        self.coins.is_empty()
    }
}

// ── Sources ─────────────────────────────────────────────────

/// Supplies level sessions by id. Loading never fails: unknown ids get the
/// fallback level.
pub trait LevelSource {
    /// Every known level, ordered by world then level.
    fn available(&self) -> Vec<LevelId>;

    fn record(&self, id: LevelId) -> Result<&LevelRecord, LevelError>;

    fn load(&self, id: LevelId, config: &GameConfig) -> LevelSession {
        match self.record(id) {
            Ok(record) => {
                debug!(level = %id, name = %record.name, "loading level");
                record.to_session(config)
            }
            Err(err) => {
                warn!(%err, "using fallback level");
                LevelSession::fallback(id, config)
            }
        }
    }

    /// The level after `id` in play order, if any.
    fn next_after(&self, id: LevelId) -> Option<LevelId> {
        self.available().into_iter().find(|other| *other > id)
    }

    fn first(&self) -> Option<LevelId> {
        self.available().into_iter().next()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LevelCatalog {
    levels: BTreeMap<LevelId, LevelRecord>,
}

impl LevelCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: impl IntoIterator<Item = LevelRecord>) -> Result<Self, LevelError> {
        let mut catalog = Self::new();
        for record in records {
            catalog.register(record)?;
        }
        Ok(catalog)
    }

    pub fn register(&mut self, record: LevelRecord) -> Result<(), LevelError> {
        let id = record.id();
        if self.levels.contains_key(&id) {
            return Err(LevelError::Duplicate(id));
        }
        self.levels.insert(id, record);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl LevelSource for LevelCatalog {
    fn available(&self) -> Vec<LevelId> {
        self.levels.keys().copied().collect()
    }

    fn record(&self, id: LevelId) -> Result<&LevelRecord, LevelError> {
        self.levels.get(&id).ok_or(LevelError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(world: u32, level: u32) -> LevelRecord {
        LevelRecord {
            world,
            level,
            name: format!("Test {}-{}", world, level),
            background: Background::Night,
            platforms: vec![PlatformRecord {
                x: 0.0,
                y: 680.0,
                width: 1280.0,
                height: 40.0,
                color: [10, 20, 30],
            }],
            coins: vec![PointRecord { x: 300.0, y: 600.0 }],
            spikes: Vec::new(),
            goal: Some(GoalRecord {
                x: 1100.0,
                y: 600.0,
                is_door: true,
            }),
            player_spawns: vec![
                PointRecord { x: 50.0, y: 620.0 },
                PointRecord { x: 90.0, y: 620.0 },
            ],
        }
    }

    #[test]
    fn parses_level_file_with_defaults() {
        let json = r#"{
            "world": 2, "level": 3, "name": "Spikes",
            "background_type": "night",
            "platforms": [{"x": 0, "y": 680, "width": 1280, "height": 40},
                          {"x": 300, "y": 500, "width": 100, "height": 20, "color": [1, 2, 3]}],
            "coins": [{"x": 320, "y": 450}],
            "spikes": [{"x": 500, "y": 665}, {"x": 600, "y": 665, "width": 90}]
        }"#;
        let rec: LevelRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.id(), LevelId::new(2, 3));
        assert_eq!(rec.background, Background::Night);

        let config = GameConfig::default();
        let s = rec.to_session(&config);
        assert_eq!(s.platforms[0].color, PLATFORM_BROWN);
        assert_eq!(s.platforms[1].color, [1, 2, 3]);
        assert_eq!(s.platforms[1].id, PlatformId(1));
        assert_eq!(s.spikes[0].rect, Rect::new(500.0, 665.0, 30.0, 15.0));
        assert_eq!(s.spikes[1].rect.width, 90.0);
        assert_eq!(s.coins[0].rect, Rect::new(320.0, 450.0, 30.0, 30.0));
        assert_eq!(s.total_coins, 1);
        assert_eq!(s.goal, Goal::new(1180.0, 600.0, false));
        assert_eq!(s.spawns, [Vec2::new(100.0, 620.0), Vec2::new(150.0, 620.0)]);
    }

    #[test]
    fn minimal_level_file() {
        let rec: LevelRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(rec.id(), LevelId::new(1, 1));
        assert_eq!(rec.name, "Unnamed Level");
        assert_eq!(rec.background, Background::Day);
        let s = rec.to_session(&GameConfig::default());
        assert!(s.platforms.is_empty());
        assert!(s.all_coins_collected());
    }

    #[test]
    fn session_uses_declared_goal_and_spawns() {
        let s = record(1, 1).to_session(&GameConfig::default());
        assert!(s.goal.is_door);
        assert!(!s.goal.door_open);
        assert_eq!(s.goal.rect, Rect::new(1100.0, 600.0, GOAL_WIDTH, GOAL_HEIGHT));
        assert_eq!(s.spawn_point(0), Vec2::new(50.0, 620.0));
        assert_eq!(s.spawn_point(1), Vec2::new(90.0, 620.0));
        assert_eq!(s.background, Background::Night);
    }

    #[test]
    fn single_spawn_keeps_default_for_second_player() {
        let mut rec = record(1, 1);
        rec.player_spawns.truncate(1);
        let s = rec.to_session(&GameConfig::default());
        assert_eq!(s.spawn_point(0), Vec2::new(50.0, 620.0));
        assert_eq!(s.spawn_point(1), Vec2::new(150.0, 620.0));
    }

    #[test]
    fn catalog_orders_and_advances() {
        let catalog =
            LevelCatalog::from_records(vec![record(2, 1), record(1, 2), record(1, 1)]).unwrap();
        assert_eq!(
            catalog.available(),
            vec![LevelId::new(1, 1), LevelId::new(1, 2), LevelId::new(2, 1)]
        );
        assert_eq!(catalog.first(), Some(LevelId::new(1, 1)));
        assert_eq!(catalog.next_after(LevelId::new(1, 2)), Some(LevelId::new(2, 1)));
        assert_eq!(catalog.next_after(LevelId::new(2, 1)), None);
    }

    #[test]
    fn duplicate_registration_rejected() {
        let mut catalog = LevelCatalog::new();
        catalog.register(record(1, 1)).unwrap();
        assert_eq!(
            catalog.register(record(1, 1)),
            Err(LevelError::Duplicate(LevelId::new(1, 1)))
        );
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn unknown_level_falls_back() {
        let catalog = LevelCatalog::from_records(vec![record(1, 1)]).unwrap();
        let id = LevelId::new(9, 9);
        assert_eq!(catalog.record(id), Err(LevelError::NotFound(id)));
        let s = catalog.load(id, &GameConfig::default());
        assert_eq!(s.id, id);
        assert_eq!(s.name, "Fallback Level");
        assert_eq!(s.platforms.len(), 4);
        assert_eq!(s.total_coins, 1);
        assert_eq!(s.coins[0].rect.y, 520.0);
    }

    #[test]
    fn loads_fresh_copy_each_time() {
        let catalog = LevelCatalog::from_records(vec![record(1, 1)]).unwrap();
        let config = GameConfig::default();
        let mut first = catalog.load(LevelId::new(1, 1), &config);
        first.coins.clear();
        let second = catalog.load(LevelId::new(1, 1), &config);
        assert_eq!(second.coins.len(), 1);
    }
}
