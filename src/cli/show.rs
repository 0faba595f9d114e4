use std::{fs, path::PathBuf};

use tabled::Table;

use crate::{
    config, error, info,
    types::{PlayHistoryItem, PlayTableRow},
    utils, warning,
};

/// Prints the most recent result artifact as a table.
///
/// Looks for `result-*.json` files in the output directory (or the given
/// override), picks the newest by its timestamp-derived name, and renders
/// one row per collected play.
pub async fn show(output_dir: Option<PathBuf>) {
    let dir = output_dir.unwrap_or_else(config::default_output_dir);

    let latest = match latest_artifact(&dir) {
        Some(path) => path,
        None => error!(
            "No result artifacts found in {}. Run splaycli run first.",
            dir.display()
        ),
    };

    let content = match fs::read_to_string(&latest) {
        Ok(content) => content,
        Err(e) => error!("Failed to read {}: {}", latest.display(), e),
    };

    let items: Vec<PlayHistoryItem> = match serde_json::from_str(&content) {
        Ok(items) => items,
        Err(e) => error!("Failed to parse {}: {}", latest.display(), e),
    };

    if items.is_empty() {
        warning!("Artifact {} contains no plays.", latest.display());
        return;
    }

    let rows: Vec<PlayTableRow> = items
        .iter()
        .map(|item| PlayTableRow {
            played_at: item.played_at.clone(),
            track: item.track["name"].as_str().unwrap_or_default().to_string(),
            artists: utils::track_artists(&item.track),
        })
        .collect();

    info!("{} plays from {}", rows.len(), latest.display());
    println!("{}", Table::new(rows));
}

fn latest_artifact(dir: &PathBuf) -> Option<PathBuf> {
    let entries = fs::read_dir(dir).ok()?;

    entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .map(|name| name.starts_with("result-") && name.ends_with(".json"))
                .unwrap_or(false)
        })
        .max()
}
