/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::language::Language;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub session: SessionConfig,
    pub frame_ms: u64,
    pub words_dir: PathBuf,
    pub log_file: PathBuf,
    /// Fixed RNG seed for reproducible sessions; `None` = seed from the OS.
    pub seed: Option<u64>,
    pub sound_enabled: bool,
    /// Menu starts on this language.
    pub language: Option<Language>,
}

/// Per-session gameplay constants. Distances are virtual pixels,
/// speeds are pixels per tick, times are milliseconds.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionConfig {
    pub spawn_interval_ms: f64,
    pub flash_ms: f64,
    pub fast_lane_count: usize,
    pub fast_speed_min: f32,
    pub fast_speed_range: f32,
    pub default_speed: f32,
    pub margin_px: f32,
    pub miss_threshold_px: f32,
    /// Angular velocity is drawn from `[-spin_range, spin_range)`.
    pub spin_range: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            spawn_interval_ms: default_spawn_interval(),
            flash_ms: default_flash(),
            fast_lane_count: default_fast_lane_count(),
            fast_speed_min: default_fast_speed_min(),
            fast_speed_range: default_fast_speed_range(),
            default_speed: default_speed(),
            margin_px: default_margin(),
            miss_threshold_px: default_miss_threshold(),
            spin_range: default_spin_range(),
        }
    }
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    session: TomlSession,
    #[serde(default)]
    general: TomlGeneral,
    #[serde(default)]
    sound: TomlSound,
}

#[derive(Deserialize, Debug)]
struct TomlSession {
    #[serde(default = "default_spawn_interval")]
    spawn_interval_ms: f64,
    #[serde(default = "default_flash")]
    flash_ms: f64,
    #[serde(default = "default_fast_lane_count")]
    fast_lane_count: usize,
    #[serde(default = "default_fast_speed_min")]
    fast_speed_min: f32,
    #[serde(default = "default_fast_speed_range")]
    fast_speed_range: f32,
    #[serde(default = "default_speed")]
    default_speed: f32,
    #[serde(default = "default_margin")]
    margin_px: f32,
    #[serde(default = "default_miss_threshold")]
    miss_threshold_px: f32,
    #[serde(default = "default_spin_range")]
    spin_range: f32,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default = "default_frame_ms")]
    frame_ms: u64,
    #[serde(default = "default_words_dir")]
    words_dir: String,
    #[serde(default = "default_log_file")]
    log_file: String,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    language: Option<String>,
}

#[derive(Deserialize, Debug)]
struct TomlSound {
    #[serde(default = "default_sound_enabled")]
    enabled: bool,
}

// ── Defaults ──

fn default_spawn_interval() -> f64 { 2000.0 }
fn default_flash() -> f64 { 150.0 }
fn default_fast_lane_count() -> usize { 10 }
fn default_fast_speed_min() -> f32 { 4.0 }
fn default_fast_speed_range() -> f32 { 2.0 }   // fast lane: [4.0, 6.0)
fn default_speed() -> f32 { 1.5 }
fn default_margin() -> f32 { 10.0 }
fn default_miss_threshold() -> f32 { 20.0 }    // one text row
fn default_spin_range() -> f32 { 0.05 }

/// Slowest allowed fall speed; anything at or below zero never lands.
const MIN_SPEED: f32 = 0.1;

fn default_frame_ms() -> u64 { 16 }            // ~60 fps
fn default_words_dir() -> String { "words".into() }
fn default_log_file() -> String { "code-invaders.log".into() }
fn default_sound_enabled() -> bool { true }

impl Default for TomlSession {
    fn default() -> Self {
        TomlSession {
            spawn_interval_ms: default_spawn_interval(),
            flash_ms: default_flash(),
            fast_lane_count: default_fast_lane_count(),
            fast_speed_min: default_fast_speed_min(),
            fast_speed_range: default_fast_speed_range(),
            default_speed: default_speed(),
            margin_px: default_margin(),
            miss_threshold_px: default_miss_threshold(),
            spin_range: default_spin_range(),
        }
    }
}

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral {
            frame_ms: default_frame_ms(),
            words_dir: default_words_dir(),
            log_file: default_log_file(),
            seed: None,
            language: None,
        }
    }
}

impl Default for TomlSound {
    fn default() -> Self {
        TomlSound { enabled: default_sound_enabled() }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let search_dirs = candidate_dirs();
        let toml_cfg = load_toml(&search_dirs);

        // Words directory: absolute as-is, otherwise the first candidate that exists
        let words_dir_str = &toml_cfg.general.words_dir;
        let words_dir = if PathBuf::from(words_dir_str).is_absolute() {
            PathBuf::from(words_dir_str)
        } else {
            search_dirs.iter()
                .map(|d| d.join(words_dir_str))
                .find(|p| p.is_dir())
                .unwrap_or_else(|| PathBuf::from(words_dir_str))
        };

        Self::from_toml(toml_cfg, words_dir)
    }

    fn from_toml(toml_cfg: TomlConfig, words_dir: PathBuf) -> Self {
        let s = toml_cfg.session;
        let language = toml_cfg.general.language.as_deref().and_then(|id| {
            let lang = Language::from_id(id);
            if lang.is_none() {
                eprintln!("Warning: unknown language \"{id}\" in config.toml");
            }
            lang
        });
        GameConfig {
            session: SessionConfig {
                spawn_interval_ms: s.spawn_interval_ms,
                flash_ms: s.flash_ms,
                fast_lane_count: s.fast_lane_count,
                fast_speed_min: s.fast_speed_min.max(MIN_SPEED),
                fast_speed_range: s.fast_speed_range.max(0.0),
                default_speed: s.default_speed.max(MIN_SPEED),
                margin_px: s.margin_px.max(0.0),
                miss_threshold_px: s.miss_threshold_px,
                spin_range: s.spin_range.abs(),
            },
            frame_ms: toml_cfg.general.frame_ms.max(1),
            words_dir,
            log_file: PathBuf::from(toml_cfg.general.log_file),
            seed: toml_cfg.general.seed,
            sound_enabled: toml_cfg.sound.enabled,
            language,
        }
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
/// Runs before logging is up, so problems go to stderr.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        eprintln!("Warning: config.toml parse error: {e}");
                        eprintln!("Using default settings.");
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    eprintln!("Warning: could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> GameConfig {
        let cfg: TomlConfig = toml::from_str(text).unwrap();
        GameConfig::from_toml(cfg, PathBuf::from("words"))
    }

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = parse("");
        assert_eq!(cfg.session, SessionConfig::default());
        assert_eq!(cfg.frame_ms, 16);
        assert_eq!(cfg.seed, None);
        assert!(cfg.sound_enabled);
        assert_eq!(cfg.log_file, PathBuf::from("code-invaders.log"));
        assert_eq!(cfg.language, None);
    }

    #[test]
    fn language_preselect() {
        assert_eq!(parse("[general]\nlanguage = \"C#\"\n").language, Some(Language::CSharp));
        assert_eq!(parse("[general]\nlanguage = \"Cobol\"\n").language, None);
    }

    #[test]
    fn defaults_match_session_constants() {
        let s = SessionConfig::default();
        assert_eq!(s.spawn_interval_ms, 2000.0);
        assert_eq!(s.flash_ms, 150.0);
        assert_eq!(s.fast_lane_count, 10);
        assert_eq!(s.fast_speed_min, 4.0);
        assert_eq!(s.fast_speed_range, 2.0);
        assert_eq!(s.default_speed, 1.5);
        assert_eq!(s.margin_px, 10.0);
        assert_eq!(s.miss_threshold_px, 20.0);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = parse(
            "[session]\nspawn_interval_ms = 500.0\n\n[general]\nseed = 42\n\n[sound]\nenabled = false\n",
        );
        assert_eq!(cfg.session.spawn_interval_ms, 500.0);
        assert_eq!(cfg.session.flash_ms, 150.0);
        assert_eq!(cfg.seed, Some(42));
        assert!(!cfg.sound_enabled);
    }

    #[test]
    fn nonsense_values_are_sanitised() {
        let cfg = parse("[session]\nfast_speed_range = -3.0\nspin_range = -0.2\n[general]\nframe_ms = 0\n");
        assert_eq!(cfg.session.fast_speed_range, 0.0);
        assert_eq!(cfg.session.spin_range, 0.2);
        assert_eq!(cfg.frame_ms, 1);
    }

    #[test]
    fn fall_speeds_stay_positive() {
        let cfg = parse("[session]\ndefault_speed = 0.0\nfast_speed_min = -4.0\n");
        assert_eq!(cfg.session.default_speed, MIN_SPEED);
        assert_eq!(cfg.session.fast_speed_min, MIN_SPEED);
        assert_eq!(parse("[session]\ndefault_speed = 2.5\n").session.default_speed, 2.5);
    }
}
