use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tandem_core::{LevelCatalog, LevelRecord};
use tracing::{debug, warn};

/// Reads every `*.json` file in `dir` as a level. Files that fail to parse,
/// or that repeat a world/level pair already loaded, are logged and skipped.
pub fn load_dir(dir: &Path) -> Result<LevelCatalog> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("reading level directory {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    let mut catalog = LevelCatalog::new();
    for path in paths {
        let record = match read_record(&path) {
            Ok(record) => record,
            Err(err) => {
                warn!(path = %path.display(), "skipping level: {err:#}");
                continue;
            }
        };
        let id = record.id();
        match catalog.register(record) {
            Ok(()) => debug!(level = %id, path = %path.display(), "loaded level"),
            Err(err) => warn!(path = %path.display(), "skipping level: {err}"),
        }
    }
    Ok(catalog)
}

fn read_record(path: &Path) -> Result<LevelRecord> {
    let text = fs::read_to_string(path).context("reading file")?;
    serde_json::from_str(&text).context("parsing level JSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tandem_core::{LevelId, LevelSource};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("tandem-host-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn loads_valid_levels_and_skips_bad_ones() {
        let dir = scratch_dir("levels");
        fs::write(
            dir.join("world1_level1.json"),
            r#"{"world":1,"level":1,"name":"First","background_type":"night",
                "platforms":[{"x":0,"y":680,"width":1280,"height":40}],
                "coins":[{"x":300,"y":600}]}"#,
        )
        .unwrap();
        fs::write(dir.join("world1_level2.json"), r#"{"world":1,"level":2}"#).unwrap();
        fs::write(dir.join("broken.json"), "{ not json").unwrap();
        fs::write(dir.join("dupe.json"), r#"{"world":1,"level":2,"name":"Again"}"#).unwrap();
        fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let catalog = load_dir(&dir).unwrap();
        assert_eq!(catalog.available(), vec![LevelId::new(1, 1), LevelId::new(1, 2)]);
        let first = catalog.record(LevelId::new(1, 1)).unwrap();
        assert_eq!(first.name, "First");
        assert_eq!(first.coins.len(), 1);
        // Files load in name order: dupe.json claims 1-2 before world1_level2.json.
        assert_eq!(catalog.record(LevelId::new(1, 2)).unwrap().name, "Again");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = std::env::temp_dir().join("tandem-host-does-not-exist-7f3a");
        assert!(load_dir(&dir).is_err());
    }
}
