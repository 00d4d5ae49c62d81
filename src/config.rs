/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory, the current working
/// directory, or `~/.config/kamelkase`, first match wins.
/// Falls back to the built-in level if the file is missing or incomplete.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::entity::Position;
use crate::sim::level::{HazardDef, HazardKind, LevelDef};

const CONFIG_FILE: &str = "config.toml";

// ── Public Config Struct ──

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub level: LevelDef,
    pub timing: TimingConfig,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimingConfig {
    /// 0 = advance one tick per key press (blocking input).
    /// Otherwise a fixed tick; missing input counts as no-op.
    pub tick_rate_ms: u64,
}

impl TimingConfig {
    pub fn fixed_tick(&self) -> Option<Duration> {
        (self.tick_rate_ms > 0).then(|| Duration::from_millis(self.tick_rate_ms))
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        TomlConfig::default().into()
    }
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    level: TomlLevel,
    #[serde(default)]
    timing: TomlTiming,
}

#[derive(Deserialize, Debug)]
struct TomlLevel {
    #[serde(default = "default_width")]
    width: usize,
    #[serde(default = "default_height")]
    height: usize,
    #[serde(default = "default_player")]
    player: [usize; 2],
    #[serde(default = "default_finish")]
    finish: [usize; 2],
    #[serde(default = "default_hazards")]
    hazards: Vec<TomlHazard>,
}

#[derive(Deserialize, Debug)]
struct TomlHazard {
    kind: TomlHazardKind,
    at: [usize; 2],
}

#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum TomlHazardKind {
    Oscillating,
    Waterfall,
}

#[derive(Deserialize, Debug)]
struct TomlTiming {
    #[serde(default = "default_tick_rate")]
    tick_rate_ms: u64,
}

// ── Defaults ──

fn pair(p: Position) -> [usize; 2] { [p.x, p.y] }

fn default_width() -> usize { LevelDef::default().width }
fn default_height() -> usize { LevelDef::default().height }
fn default_player() -> [usize; 2] { pair(LevelDef::default().player) }
fn default_finish() -> [usize; 2] { pair(LevelDef::default().finish) }
fn default_tick_rate() -> u64 { 0 }

fn default_hazards() -> Vec<TomlHazard> {
    LevelDef::default()
        .hazards
        .into_iter()
        .map(|h| TomlHazard {
            kind: match h.kind {
                HazardKind::Oscillating => TomlHazardKind::Oscillating,
                HazardKind::Waterfall => TomlHazardKind::Waterfall,
            },
            at: pair(h.at),
        })
        .collect()
}

impl Default for TomlLevel {
    fn default() -> Self {
        TomlLevel {
            width: default_width(),
            height: default_height(),
            player: default_player(),
            finish: default_finish(),
            hazards: default_hazards(),
        }
    }
}

impl Default for TomlTiming {
    fn default() -> Self {
        TomlTiming { tick_rate_ms: default_tick_rate() }
    }
}

impl From<TomlConfig> for GameConfig {
    fn from(cfg: TomlConfig) -> Self {
        let at = |[x, y]: [usize; 2]| Position::new(x, y);
        GameConfig {
            level: LevelDef {
                width: cfg.level.width,
                height: cfg.level.height,
                player: at(cfg.level.player),
                finish: at(cfg.level.finish),
                hazards: cfg
                    .level
                    .hazards
                    .into_iter()
                    .map(|h| HazardDef {
                        kind: match h.kind {
                            TomlHazardKind::Oscillating => HazardKind::Oscillating,
                            TomlHazardKind::Waterfall => HazardKind::Waterfall,
                        },
                        at: at(h.at),
                    })
                    .collect(),
            },
            timing: TimingConfig { tick_rate_ms: cfg.timing.tick_rate_ms },
        }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        load_toml(&candidate_dirs())
    }

    /// Parse a config document. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<TomlConfig>(text).map(Into::into)
    }
}

/// Candidate directories to search: exe dir + CWD + user config dir (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    // 1. Directory of the running executable
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    // 2. Current working directory
    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    // 3. ~/.config/kamelkase
    if let Ok(home) = std::env::var("HOME") {
        let user = PathBuf::from(&home).join(".config/kamelkase");
        if user.is_dir() && !dirs.iter().any(|d| d == &user) {
            dirs.push(user);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> GameConfig {
    for dir in search_dirs {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            continue;
        }
        match std::fs::read_to_string(&path) {
            Ok(text) => match GameConfig::from_toml_str(&text) {
                Ok(cfg) => {
                    log::info!("loaded {}", path.display());
                    return cfg;
                }
                Err(e) => {
                    log::warn!("{} parse error: {e}", path.display());
                    log::warn!("using default settings");
                    return GameConfig::default();
                }
            },
            Err(e) => {
                log::warn!("could not read {}: {e}", path.display());
            }
        }
    }
    log::debug!("no {CONFIG_FILE} found, using defaults");
    GameConfig::default()
}
