#![allow(dead_code)]

use std::path::PathBuf;

use chart_shell::config::{AppConfig, load_config_str};
use tempfile::TempDir;

pub const NOW_MS: i64 = 1_700_000_000_000;

pub struct Workspace {
    _dir: TempDir,        // keep alive for the life of the test
    pub root: PathBuf,    // <tmpdir>
    pub settings: PathBuf, // <tmpdir>/settings.json
}

pub fn workspace() -> Workspace {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path().to_path_buf();
    Workspace {
        settings: root.join("settings.json"),
        root,
        _dir: dir,
    }
}

/// Seeded config with a small hourly initial series.
pub fn config(ws: &Workspace) -> AppConfig {
    let toml = format!(
        r#"
[generator]
seed = 11
now_ms = {NOW_MS}

[session]
initial_days = 3.0
initial_interval = "1h"
initial_period = "4h"

[settings]
path = "{}"
"#,
        ws.settings.display()
    );
    load_config_str(&toml).expect("config")
}
