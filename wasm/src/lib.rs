use serde::{Deserialize, Serialize};
use tandem_core::{
    builtin_catalog, default_config, step, FrameInput, Game, LevelCatalog, LevelId, LevelRecord,
    Player,
};
use wasm_bindgen::prelude::*;

/// Install panic hook so WASM panics show in browser console instead of silently freezing.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

/// Players as exchanged with JS when saving or restoring mid-level.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsPlayers {
    frame: u32,
    players: [Player; 2],
}

fn catalog_from_json(levels_json: &str) -> Result<LevelCatalog, String> {
    let records: Vec<LevelRecord> =
        serde_json::from_str(levels_json).map_err(|err| err.to_string())?;
    LevelCatalog::from_records(records).map_err(|err| err.to_string())
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

#[wasm_bindgen]
pub struct WasmGame {
    inner: Game,
}

#[wasm_bindgen]
impl WasmGame {
    /// Create a game from a JSON array of level records.
    /// Falls back to the built-in levels if the JSON is unusable.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32, levels_json: &str) -> WasmGame {
        let catalog = match catalog_from_json(levels_json) {
            Ok(catalog) if !catalog.is_empty() => catalog,
            Ok(_) => {
                warn("tandem: no levels supplied, using built-in levels");
                builtin_catalog()
            }
            Err(err) => {
                warn(&format!("tandem: bad level JSON ({err}), using built-in levels"));
                builtin_catalog()
            }
        };
        WasmGame {
            inner: Game::new(default_config(seed), catalog),
        }
    }

    /// Create with the built-in levels.
    pub fn new_builtin(seed: u32) -> WasmGame {
        WasmGame {
            inner: Game::new(default_config(seed), builtin_catalog()),
        }
    }

    /// Step the simulation by one frame. Returns that frame's events.
    pub fn step(&mut self, p1_btn: u8, p2_btn: u8, commands: u8) -> JsValue {
        let input = FrameInput::new(p1_btn, p2_btn, commands);
        let events = step(&mut self.inner, &input);
        to_js(&events)
    }

    /// Everything needed to draw the current frame.
    pub fn export_snapshot(&self) -> JsValue {
        to_js(&self.inner.snapshot())
    }

    /// Jump straight into a level, skipping the hub.
    pub fn enter_level(&mut self, world: u32, level: u32) {
        self.inner.enter_level(LevelId::new(world, level));
    }

    pub fn return_to_hub(&mut self) {
        self.inner.return_to_hub();
    }

    pub fn export_players(&self) -> JsValue {
        to_js(&JsPlayers {
            frame: self.inner.frame,
            players: self.inner.players.clone(),
        })
    }

    /// Restore players previously exported. Ignored if the value does not parse.
    pub fn import_players(&mut self, state: JsValue) {
        // JSON.stringify → serde_json handles the tagged death stage reliably
        let json_str = match js_sys::JSON::stringify(&state) {
            Ok(s) => String::from(s),
            Err(_) => return,
        };
        let js: JsPlayers = match serde_json::from_str(&json_str) {
            Ok(js) => js,
            Err(err) => {
                warn(&format!("tandem: ignoring player import ({err})"));
                return;
            }
        };
        self.inner.frame = js.frame;
        self.inner.players = js.players;
    }

    /// Clone the game (for prediction snapshots).
    pub fn clone_game(&self) -> WasmGame {
        WasmGame {
            inner: self.inner.clone(),
        }
    }

    // Quick accessors
    pub fn frame(&self) -> u32 { self.inner.frame }
    pub fn is_playing(&self) -> bool { self.inner.is_playing() }
    pub fn level_complete(&self) -> bool { self.inner.level_complete() }
    pub fn all_levels_complete(&self) -> bool { self.inner.all_levels_complete }
    pub fn exit_requested(&self) -> bool { self.inner.exit_requested }
    pub fn rng_state(&self) -> u32 { self.inner.rng.state() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_from_json_reads_records() {
        let catalog = catalog_from_json(r#"[{"world":1,"level":1},{"world":1,"level":2}]"#).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn catalog_from_json_rejects_duplicates_and_garbage() {
        assert!(catalog_from_json(r#"[{"world":1,"level":1},{"world":1,"level":1}]"#).is_err());
        assert!(catalog_from_json("{").is_err());
    }
}
