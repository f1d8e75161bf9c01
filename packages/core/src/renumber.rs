//! Hierarchical heading renumbering. Each heading level carries its own
//! counter and formatting config; deeper counters reset whenever a
//! shallower heading appears.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use docstitch_numeral::NumeralSystem;
use docstitch_shared::{DocstitchError, Result};

use crate::lines::{FENCE_MARKER, HEADING_RE, INDENTED_CODE_COLUMNS, indent_width, is_blank};

/// Markdown's deepest heading level.
pub const MAX_HEADING_LEVEL: usize = 6;

// ---------------------------------------------------------------------------
// Level configuration
// ---------------------------------------------------------------------------

/// Formatting of the serial produced for one heading level.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LevelConfig {
    /// Text placed before this level's numeral.
    #[serde(default)]
    pub prefix: String,
    /// Text placed after this level's numeral.
    #[serde(default = "default_suffix")]
    pub suffix: String,
    /// Drop the suffix when this level is the last component of a serial.
    #[serde(default = "default_true")]
    pub remove_last_suffix: bool,
    /// Discard the serial accumulated from shallower levels.
    #[serde(default)]
    pub independent: bool,
    /// Numeral system used for this level's counter.
    #[serde(default)]
    pub serial_number_type: NumeralSystem,
    /// Value the counter renders as on its first occurrence.
    #[serde(default = "default_start_index")]
    pub start_index: i64,
}

fn default_suffix() -> String {
    ".".to_string()
}

fn default_true() -> bool {
    true
}

fn default_start_index() -> i64 {
    1
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            suffix: default_suffix(),
            remove_last_suffix: true,
            independent: false,
            serial_number_type: NumeralSystem::default(),
            start_index: default_start_index(),
        }
    }
}

impl LevelConfig {
    /// Load level configs from a JSON array, outermost level first.
    pub fn load(path: &Path) -> Result<Vec<LevelConfig>> {
        let content = fs::read_to_string(path).map_err(|source| DocstitchError::io(path, source))?;
        serde_json::from_str(&content).map_err(|err| {
            DocstitchError::level_config(format!("failed to parse {}: {err}", path.display()))
        })
    }
}

/// Built-in five-level scheme: `1.` / `1.1` / `1.1.1` decimals, then
/// independent `(a)` and `i)` serials.
pub fn default_levels() -> Vec<LevelConfig> {
    vec![
        LevelConfig {
            independent: true,
            ..LevelConfig::default()
        },
        LevelConfig::default(),
        LevelConfig::default(),
        LevelConfig {
            prefix: "(".to_string(),
            suffix: ")".to_string(),
            remove_last_suffix: false,
            independent: true,
            serial_number_type: NumeralSystem::AlphabetLowerCase,
            ..LevelConfig::default()
        },
        LevelConfig {
            suffix: ")".to_string(),
            remove_last_suffix: false,
            independent: true,
            serial_number_type: NumeralSystem::RomanLowerCase,
            ..LevelConfig::default()
        },
    ]
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// What to do with headings that have no level config (or exceed markdown's
/// heading depth).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleStrategy {
    /// Keep the heading as-is, without a serial.
    Normal,
    /// Demote the heading to a blockquote line.
    Cite,
    /// Drop the heading syntax, keeping the bare title text.
    Title,
}

impl TitleStrategy {
    fn render(self, hashes: &str, title: &str) -> String {
        match self {
            Self::Normal => format!("{hashes} {title}\n"),
            Self::Cite => format!("\n> {title}\n"),
            Self::Title => format!("{title}\n"),
        }
    }
}

impl FromStr for TitleStrategy {
    type Err = DocstitchError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "normal" => Ok(Self::Normal),
            "cite" => Ok(Self::Cite),
            "title" => Ok(Self::Title),
            other => Err(DocstitchError::UnknownStrategy {
                name: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for TitleStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Normal => "normal",
            Self::Cite => "cite",
            Self::Title => "title",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Renumbering
// ---------------------------------------------------------------------------

/// Walk the document and prepend a freshly computed serial to every heading
/// outside code. Heading level N uses `configs[N - 1]`; a heading at level N
/// resets the counters of all deeper levels.
pub fn renumber_titles(
    lines: &[String],
    configs: &[LevelConfig],
    unconfigured: TitleStrategy,
    overflow: TitleStrategy,
) -> Result<Vec<String>> {
    let mut counters = vec![0i64; configs.len()];
    let mut out = Vec::with_capacity(lines.len());
    let mut in_fence = false;
    for line in lines {
        if is_blank(line) || indent_width(line) >= INDENTED_CODE_COLUMNS {
            out.push(line.clone());
            continue;
        }
        let stripped = line.trim_start();
        if stripped.starts_with(FENCE_MARKER) {
            in_fence = !in_fence;
            out.push(line.clone());
            continue;
        }
        if in_fence {
            out.push(line.clone());
            continue;
        }
        let Some(caps) = HEADING_RE.captures(stripped) else {
            out.push(line.clone());
            continue;
        };
        let hashes = &caps[1];
        let title = caps[2].trim();
        let level = hashes.len();

        if level > MAX_HEADING_LEVEL {
            out.push(overflow.render(hashes, title));
            continue;
        }
        if level > configs.len() {
            out.push(unconfigured.render(hashes, title));
            continue;
        }

        counters[level - 1] += 1;
        for counter in counters[level..].iter_mut() {
            *counter = 0;
        }

        let serial = build_serial(&counters, configs, level)?;
        debug!(level, serial, title, "renumbered heading");
        out.push(format!("{hashes} {serial} {title}\n"));
    }
    Ok(out)
}

fn build_serial(counters: &[i64], configs: &[LevelConfig], level: usize) -> Result<String> {
    let mut serial = String::new();
    for (i, config) in configs[..level].iter().enumerate() {
        if config.independent {
            serial.clear();
        }
        let value = counters[i] + config.start_index - 1;
        let numeral = config.serial_number_type.convert(value)?;
        serial.push_str(&config.prefix);
        serial.push_str(&numeral);
        if !(i == level - 1 && config.remove_last_suffix) {
            serial.push_str(&config.suffix);
        }
    }
    Ok(serial)
}
