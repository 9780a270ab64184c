use crate::constants::*;
use crate::game::Game;
use crate::level::{GoalRecord, LevelCatalog, LevelRecord, PlatformRecord, PointRecord, SpikeRecord};
use crate::types::*;

const H: f64 = SCREEN_HEIGHT;
const W: f64 = SCREEN_WIDTH;

pub fn default_config(seed: Seed) -> GameConfig {
    GameConfig {
        seed,
        ..GameConfig::default()
    }
}

/// New game on the hub with the built-in levels.
pub fn create_game(config: GameConfig) -> Game {
    Game::new(config, builtin_catalog())
}

/// Every built-in level, keyed by world and level. The table has no
/// duplicates, so registration cannot fail.
pub fn builtin_catalog() -> LevelCatalog {
    LevelCatalog::from_records(builtin_levels()).unwrap_or_default()
}

fn plat(x: f64, y: f64, width: f64, height: f64) -> PlatformRecord {
    PlatformRecord {
        x,
        y,
        width,
        height,
        color: PLATFORM_BROWN,
    }
}

fn pt(x: f64, y: f64) -> PointRecord {
    PointRecord { x, y }
}

fn spike(x: f64, y: f64, width: f64, height: f64) -> SpikeRecord {
    SpikeRecord {
        x,
        y,
        width,
        height,
    }
}

fn goal(x: f64, y: f64, is_door: bool) -> Option<GoalRecord> {
    Some(GoalRecord { x, y, is_door })
}

fn walls(height: f64) -> [PlatformRecord; 2] {
    [plat(0.0, 0.0, 20.0, height), plat(W - 20.0, 0.0, 20.0, height)]
}

pub fn builtin_levels() -> Vec<LevelRecord> {
    vec![
        spiral_challenge(),
        wall_jump_challenge(),
        maze_master(),
        sky_islands(),
        floating_fortress(),
        ultimate_challenge(),
    ]
}

fn spiral_challenge() -> LevelRecord {
    let mut platforms = vec![
        // Floor
        plat(0.0, H - 40.0, W, 40.0),
        plat(100.0, H - 150.0, 200.0, 20.0),
        plat(400.0, H - 250.0, 200.0, 20.0),
        plat(100.0, H - 350.0, 200.0, 20.0),
        plat(400.0, H - 450.0, 200.0, 20.0),
        plat(100.0, H - 550.0, 200.0, 20.0),
        plat(400.0, H - 650.0, 200.0, 20.0),
        // Top
        plat(100.0, H - 750.0, 800.0, 20.0),
        // Bridges
        plat(300.0, H - 200.0, 50.0, 20.0),
        plat(300.0, H - 400.0, 50.0, 20.0),
        plat(300.0, H - 600.0, 50.0, 20.0),
    ];
    platforms.extend(walls(H - 40.0));

    LevelRecord {
        world: 1,
        level: 3,
        name: "Spiral Challenge".to_string(),
        background: Background::Day,
        platforms,
        coins: vec![
            pt(150.0, H - 200.0),
            pt(450.0, H - 300.0),
            pt(150.0, H - 400.0),
            pt(450.0, H - 500.0),
            pt(150.0, H - 600.0),
            pt(450.0, H - 700.0),
            pt(250.0, H - 800.0),
            pt(550.0, H - 800.0),
        ],
        spikes: Vec::new(),
        goal: goal(700.0, H - 830.0, true),
        player_spawns: vec![pt(50.0, H - 100.0), pt(100.0, H - 100.0)],
    }
}

fn wall_jump_challenge() -> LevelRecord {
    let mut platforms = vec![
        // Floor with gaps
        plat(0.0, H - 40.0, 200.0, 40.0),
        plat(400.0, H - 40.0, 200.0, 40.0),
        plat(800.0, H - 40.0, 200.0, 40.0),
        // Lower
        plat(150.0, H - 150.0, 150.0, 20.0),
        plat(350.0, H - 200.0, 150.0, 20.0),
        plat(550.0, H - 250.0, 150.0, 20.0),
        plat(750.0, H - 300.0, 150.0, 20.0),
        // Vertical walls
        plat(200.0, H - 350.0, 20.0, 150.0),
        plat(400.0, H - 400.0, 20.0, 150.0),
        plat(600.0, H - 450.0, 20.0, 150.0),
        plat(800.0, H - 500.0, 20.0, 150.0),
        // Helpers
        plat(250.0, H - 350.0, 100.0, 20.0),
        plat(450.0, H - 400.0, 100.0, 20.0),
        plat(650.0, H - 450.0, 100.0, 20.0),
        // Upper
        plat(100.0, H - 450.0, 150.0, 20.0),
        plat(300.0, H - 500.0, 150.0, 20.0),
        plat(500.0, H - 550.0, 150.0, 20.0),
        plat(700.0, H - 600.0, 300.0, 20.0),
    ];
    platforms.extend(walls(H - 40.0));

    LevelRecord {
        world: 2,
        level: 2,
        name: "Wall Jump Challenge".to_string(),
        background: Background::Night,
        platforms,
        coins: vec![
            pt(175.0, H - 200.0),
            pt(375.0, H - 250.0),
            pt(575.0, H - 300.0),
            pt(775.0, H - 350.0),
            pt(300.0, H - 400.0),
            pt(500.0, H - 450.0),
            pt(700.0, H - 500.0),
            pt(150.0, H - 500.0),
            pt(350.0, H - 550.0),
            pt(550.0, H - 600.0),
            pt(800.0, H - 650.0),
        ],
        spikes: vec![
            spike(250.0, H - 40.0, 100.0, 15.0),
            spike(650.0, H - 40.0, 100.0, 15.0),
            spike(200.0, H - 165.0, 30.0, 15.0),
            spike(600.0, H - 265.0, 30.0, 15.0),
            spike(350.0, H - 515.0, 30.0, 15.0),
        ],
        goal: goal(850.0, H - 680.0, false),
        player_spawns: vec![pt(50.0, H - 100.0), pt(100.0, H - 100.0)],
    }
}

fn maze_master() -> LevelRecord {
    let mut platforms = vec![
        // Floor with gaps
        plat(0.0, H - 40.0, 150.0, 40.0),
        plat(350.0, H - 40.0, 150.0, 40.0),
        plat(700.0, H - 40.0, 150.0, 40.0),
        // Wall-jump maze
        plat(150.0, H - 200.0, 20.0, 160.0),
        plat(170.0, H - 200.0, 150.0, 20.0),
        plat(500.0, H - 200.0, 20.0, 160.0),
        plat(350.0, H - 200.0, 150.0, 20.0),
        plat(850.0, H - 200.0, 20.0, 160.0),
        plat(700.0, H - 200.0, 150.0, 20.0),
        // Middle
        plat(250.0, H - 350.0, 150.0, 20.0),
        plat(600.0, H - 350.0, 150.0, 20.0),
        plat(400.0, H - 450.0, 200.0, 20.0),
        // Upper
        plat(200.0, H - 550.0, 150.0, 20.0),
        plat(650.0, H - 550.0, 150.0, 20.0),
        plat(350.0, H - 650.0, 300.0, 20.0),
    ];
    platforms.extend(walls(H - 40.0));

    LevelRecord {
        world: 2,
        level: 3,
        name: "Maze Master".to_string(),
        background: Background::Night,
        platforms,
        coins: vec![
            pt(250.0, H - 250.0),
            pt(450.0, H - 250.0),
            pt(750.0, H - 250.0),
            pt(300.0, H - 400.0),
            pt(700.0, H - 400.0),
            pt(500.0, H - 500.0),
            pt(250.0, H - 600.0),
            pt(700.0, H - 600.0),
            pt(500.0, H - 700.0),
        ],
        spikes: vec![
            spike(150.0, H - 40.0, 200.0, 15.0),
            spike(500.0, H - 40.0, 200.0, 15.0),
            spike(400.0, H - 465.0, 50.0, 15.0),
            spike(400.0, H - 665.0, 50.0, 15.0),
        ],
        goal: goal(500.0, H - 700.0, true),
        player_spawns: vec![pt(75.0, H - 100.0), pt(125.0, H - 100.0)],
    }
}

fn sky_islands() -> LevelRecord {
    LevelRecord {
        world: 3,
        level: 1,
        name: "Sky Islands".to_string(),
        background: Background::Day,
        platforms: vec![
            plat(0.0, H - 40.0, W, 40.0),
            plat(200.0, H - 150.0, 200.0, 20.0),
            plat(500.0, H - 250.0, 200.0, 20.0),
            plat(800.0, H - 350.0, 200.0, 20.0),
            plat(300.0, H - 450.0, 200.0, 20.0),
            plat(600.0, H - 550.0, 400.0, 20.0),
        ],
        coins: vec![
            pt(300.0, H - 200.0),
            pt(600.0, H - 300.0),
            pt(900.0, H - 400.0),
            pt(400.0, H - 500.0),
            pt(700.0, H - 600.0),
            pt(900.0, H - 600.0),
        ],
        spikes: vec![
            spike(400.0, H - 165.0, 50.0, 15.0),
            spike(700.0, H - 265.0, 50.0, 15.0),
        ],
        goal: goal(900.0, H - 600.0, false),
        player_spawns: vec![pt(100.0, H - 100.0), pt(150.0, H - 100.0)],
    }
}

fn floating_fortress() -> LevelRecord {
    let mut platforms = vec![
        // Floor with gaps
        plat(0.0, H - 40.0, 300.0, 40.0),
        plat(500.0, H - 40.0, 300.0, 40.0),
        plat(900.0, H - 40.0, 300.0, 40.0),
        // Middle
        plat(200.0, H - 200.0, 150.0, 20.0),
        plat(450.0, H - 300.0, 150.0, 20.0),
        plat(700.0, H - 400.0, 150.0, 20.0),
        // Upper
        plat(300.0, H - 500.0, 200.0, 20.0),
        plat(600.0, H - 600.0, 400.0, 20.0),
    ];
    platforms.extend(walls(H - 40.0));

    LevelRecord {
        world: 3,
        level: 2,
        name: "Floating Fortress".to_string(),
        background: Background::Day,
        platforms,
        coins: vec![
            pt(250.0, H - 250.0),
            pt(500.0, H - 350.0),
            pt(750.0, H - 450.0),
            pt(400.0, H - 550.0),
            pt(700.0, H - 650.0),
            pt(900.0, H - 650.0),
        ],
        spikes: vec![
            spike(300.0, H - 40.0, 200.0, 15.0),
            spike(800.0, H - 40.0, 100.0, 15.0),
            spike(350.0, H - 215.0, 50.0, 15.0),
            spike(600.0, H - 315.0, 50.0, 15.0),
        ],
        goal: goal(900.0, H - 650.0, false),
        player_spawns: vec![pt(100.0, H - 100.0), pt(150.0, H - 100.0)],
    }
}

fn ultimate_challenge() -> LevelRecord {
    let mut platforms = vec![
        // Start
        plat(50.0, H - 40.0, 100.0, 40.0),
        // Floating islands
        plat(250.0, H - 120.0, 80.0, 20.0),
        plat(450.0, H - 180.0, 80.0, 20.0),
        plat(650.0, H - 240.0, 80.0, 20.0),
        plat(850.0, H - 300.0, 80.0, 20.0),
        // Wall-jump section
        plat(100.0, H - 350.0, 20.0, 200.0),
        plat(300.0, H - 350.0, 20.0, 200.0),
        plat(100.0, H - 350.0, 220.0, 20.0),
        // Narrow steps
        plat(400.0, H - 400.0, 40.0, 20.0),
        plat(500.0, H - 450.0, 40.0, 20.0),
        plat(600.0, H - 500.0, 40.0, 20.0),
        plat(700.0, H - 550.0, 40.0, 20.0),
        plat(800.0, H - 600.0, 40.0, 20.0),
        // Zigzag
        plat(700.0, H - 650.0, 150.0, 20.0),
        plat(450.0, H - 700.0, 150.0, 20.0),
        plat(700.0, H - 750.0, 150.0, 20.0),
        plat(450.0, H - 800.0, 150.0, 20.0),
        // Final
        plat(300.0, H - 850.0, 100.0, 20.0),
    ];
    platforms.extend(walls(H));
    platforms.extend([
        // Traps
        plat(200.0, H - 200.0, 100.0, 20.0),
        plat(500.0, H - 300.0, 100.0, 20.0),
        plat(300.0, H - 500.0, 100.0, 20.0),
        plat(900.0, H - 450.0, 100.0, 20.0),
    ]);

    LevelRecord {
        world: 3,
        level: 3,
        name: "Ultimate Challenge".to_string(),
        background: Background::Day,
        platforms,
        coins: vec![
            pt(100.0, H - 100.0),
            pt(280.0, H - 170.0),
            pt(480.0, H - 230.0),
            pt(680.0, H - 290.0),
            pt(200.0, H - 400.0),
            pt(150.0, H - 450.0),
            pt(420.0, H - 450.0),
            pt(520.0, H - 500.0),
            pt(620.0, H - 550.0),
            pt(720.0, H - 600.0),
            pt(750.0, H - 700.0),
            pt(500.0, H - 750.0),
            pt(750.0, H - 800.0),
            pt(350.0, H - 900.0),
        ],
        spikes: vec![
            spike(150.0, H - 40.0, 100.0, 15.0),
            spike(220.0, H - 215.0, 60.0, 15.0),
            spike(520.0, H - 315.0, 60.0, 15.0),
            spike(320.0, H - 515.0, 60.0, 15.0),
            spike(920.0, H - 465.0, 60.0, 15.0),
            spike(440.0, H - 400.0, 60.0, 15.0),
            spike(540.0, H - 450.0, 60.0, 15.0),
            spike(640.0, H - 500.0, 60.0, 15.0),
            spike(740.0, H - 550.0, 60.0, 15.0),
            spike(600.0, H - 665.0, 50.0, 15.0),
            spike(550.0, H - 715.0, 50.0, 15.0),
            spike(600.0, H - 765.0, 50.0, 15.0),
            spike(400.0, H - 850.0, 50.0, 15.0),
        ],
        goal: goal(350.0, H - 900.0, false),
        player_spawns: vec![pt(75.0, H - 100.0), pt(125.0, H - 100.0)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::LevelSource;

    #[test]
    fn builtin_catalog_structure() {
        let catalog = builtin_catalog();
        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog.first(), Some(LevelId::new(1, 3)));
        assert_eq!(
            catalog.next_after(LevelId::new(1, 3)),
            Some(LevelId::new(2, 2))
        );
        assert_eq!(catalog.next_after(LevelId::new(3, 3)), None);
    }

    #[test]
    fn spiral_challenge_session() {
        let session = builtin_catalog().load(LevelId::new(1, 3), &default_config(0));
        assert_eq!(session.name, "Spiral Challenge");
        assert_eq!(session.platforms.len(), 13);
        assert_eq!(session.total_coins, 8);
        assert!(session.goal.is_door);
        assert_eq!(session.goal.rect, Rect::new(700.0, -110.0, 60.0, 80.0));
        assert_eq!(session.spawns[0], Vec2::new(50.0, 620.0));
    }

    #[test]
    fn night_levels() {
        let catalog = builtin_catalog();
        let config = default_config(0);
        let night: Vec<_> = catalog
            .available()
            .into_iter()
            .filter(|id| catalog.load(*id, &config).background == Background::Night)
            .collect();
        assert_eq!(night, vec![LevelId::new(2, 2), LevelId::new(2, 3)]);
    }

    #[test]
    fn new_game_on_hub() {
        let game = create_game(default_config(42));
        assert!(!game.is_playing());
        assert_eq!(game.rng.state(), 42);
        // 1-3, 2-2, 2-3, 3-1, 3-2, 3-3 all sit in worlds with hub areas.
        assert_eq!(game.hub().map(|h| h.portals.len()), Some(6));
        assert_eq!(game.frame, 0);
    }
}
