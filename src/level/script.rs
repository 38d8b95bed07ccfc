//! Level script format
//!
//! ```text
//! music/track1.mp3
//! # trigger,width,height,y,kind
//! 100,30,40,210,regular
//! 400,120,20,150,platform
//! 400,200,60,0,lemon
//! ```
//!
//! The first line names the level's audio track. Every later non-comment line
//! is one record. Bad lines never abort a load: they are logged, recorded as
//! diagnostics, and skipped.

use std::fmt;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::sim::ObstacleKind;

/// One obstacle entry, spawned once world distance reaches `trigger`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelRecord {
    pub trigger: f32,
    pub width: f32,
    pub height: f32,
    pub y: f32,
    pub kind: ObstacleKind,
}

/// Problem found on a script line
#[derive(Debug, Clone, PartialEq)]
pub enum LineIssue {
    /// Line dropped: expected five comma-separated fields
    FieldCount { found: usize },
    /// Line dropped: a numeric field did not parse to a finite number
    BadNumber { field: &'static str, value: String },
    /// Line kept as `regular`
    UnknownKind { token: String },
    /// Line kept, but its trigger is lower than the previous record's
    OutOfOrder { trigger: f32, previous: f32 },
}

impl LineIssue {
    /// Whether the line was dropped from the script
    pub fn is_dropped(&self) -> bool {
        matches!(self, LineIssue::FieldCount { .. } | LineIssue::BadNumber { .. })
    }
}

impl fmt::Display for LineIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineIssue::FieldCount { found } => write!(
                f,
                "expected 'trigger,width,height,y,kind' (5 fields), found {found}"
            ),
            LineIssue::BadNumber { field, value } => {
                write!(f, "invalid number for {field}: '{value}'")
            }
            LineIssue::UnknownKind { token } => {
                write!(f, "unknown obstacle kind '{token}', using 'regular'")
            }
            LineIssue::OutOfOrder { trigger, previous } => write!(
                f,
                "trigger {trigger} is below the previous trigger {previous}; it will spawn late"
            ),
        }
    }
}

/// A diagnostic tied to a source line (1-based, the track line is line 1)
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptDiagnostic {
    pub line: usize,
    pub text: String,
    pub issue: LineIssue,
}

impl fmt::Display for ScriptDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {} ({:?})", self.line, self.issue, self.text)
    }
}

/// A parsed level
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelScript {
    /// Audio track reference from the first line (for the audio player)
    pub track: Option<String>,
    pub records: Vec<LevelRecord>,
    pub diagnostics: Vec<ScriptDiagnostic>,
}

const FIELD_NAMES: [&str; 4] = ["trigger", "width", "height", "y"];

impl LevelScript {
    /// A script with no records; the scheduler goes dormant immediately
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse script text. Never fails; see `diagnostics` for skipped lines.
    pub fn parse(text: &str) -> Self {
        let mut script = Self::empty();
        let mut lines = text.lines();

        script.track = lines
            .next()
            .map(str::trim)
            .filter(|track| !track.is_empty())
            .map(str::to_owned);

        for (index, raw) in lines.enumerate() {
            let line_no = index + 2;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match parse_record(line) {
                Ok((record, kind_issue)) => {
                    if let Some(issue) = kind_issue {
                        script.note(line_no, line, issue);
                    }
                    if let Some(previous) = script.records.last()
                        && record.trigger < previous.trigger
                    {
                        let issue = LineIssue::OutOfOrder {
                            trigger: record.trigger,
                            previous: previous.trigger,
                        };
                        script.note(line_no, line, issue);
                    }
                    script.records.push(record);
                }
                Err(issue) => script.note(line_no, line, issue),
            }
        }

        let dropped = script
            .diagnostics
            .iter()
            .filter(|d| d.issue.is_dropped())
            .count();
        log::info!(
            "Parsed level script: {} records, {} lines skipped",
            script.records.len(),
            dropped
        );
        if script.records.is_empty() {
            log::warn!("Level script has no records; no obstacles will spawn");
        }

        script
    }

    /// Read and parse a script file
    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read level script: {}", path.display()))?;
        log::info!("Loading level script {}", path.display());
        Ok(Self::parse(&text))
    }

    /// Read and parse a script file, degrading to an empty script if it
    /// cannot be read
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        match Self::from_path(path) {
            Ok(script) => script,
            Err(err) => {
                log::warn!("{err:#}; continuing with an empty level");
                Self::empty()
            }
        }
    }

    /// Distance at which the level counts as fully travelled: the largest
    /// trigger plus one screen width. Zero for an empty script.
    ///
    /// An out-of-order record spawns no earlier than the largest trigger
    /// before it, so the largest trigger is the last spawn in any file order.
    pub fn final_distance(&self, screen_width: f32) -> f32 {
        if self.records.is_empty() {
            return 0.0;
        }
        self.records
            .iter()
            .map(|record| record.trigger)
            .fold(f32::NEG_INFINITY, f32::max)
            + screen_width
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn note(&mut self, line: usize, text: &str, issue: LineIssue) {
        let diagnostic = ScriptDiagnostic {
            line,
            text: text.to_owned(),
            issue,
        };
        log::warn!("Level script {diagnostic}");
        self.diagnostics.push(diagnostic);
    }
}

/// Parse one record line. An unknown kind is not an error: the record is
/// returned as a solid alongside the issue.
fn parse_record(line: &str) -> Result<(LevelRecord, Option<LineIssue>), LineIssue> {
    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    if parts.len() != 5 {
        return Err(LineIssue::FieldCount { found: parts.len() });
    }

    let mut numbers = [0.0f32; 4];
    for (slot, (field, value)) in numbers.iter_mut().zip(FIELD_NAMES.iter().zip(&parts)) {
        *slot = value
            .parse::<f32>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(|| LineIssue::BadNumber {
                field: *field,
                value: (*value).to_owned(),
            })?;
    }

    let token = parts[4];
    let (kind, issue) = match ObstacleKind::from_token(token) {
        Some(kind) => (kind, None),
        None => (
            ObstacleKind::Solid,
            Some(LineIssue::UnknownKind {
                token: token.to_owned(),
            }),
        ),
    };

    let [trigger, width, height, y] = numbers;
    Ok((
        LevelRecord {
            trigger,
            width,
            height,
            y,
            kind,
        },
        issue,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_script() {
        let script = LevelScript::parse(
            "music/level1.mp3\n\
             # comment\n\
             \n\
             100,30,40,210,regular\n\
             400, 120, 20, 150, Platform\n\
             400,200,60,0,LEMON\n",
        );
        assert_eq!(script.track.as_deref(), Some("music/level1.mp3"));
        assert_eq!(script.len(), 3);
        assert!(script.diagnostics.is_empty());
        assert_eq!(
            script.records[0],
            LevelRecord {
                trigger: 100.0,
                width: 30.0,
                height: 40.0,
                y: 210.0,
                kind: ObstacleKind::Solid,
            }
        );
        assert_eq!(script.records[1].kind, ObstacleKind::Platform);
        assert_eq!(script.records[2].kind, ObstacleKind::TimedHazard);
    }

    #[test]
    fn test_first_line_is_always_the_track() {
        // Even a record-shaped first line is the track reference
        let script = LevelScript::parse("100,30,40,210,regular\n200,30,40,210,regular");
        assert_eq!(script.track.as_deref(), Some("100,30,40,210,regular"));
        assert_eq!(script.len(), 1);
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let script = LevelScript::parse(
            "track\n\
             100,30,40,210\n\
             abc,30,40,210,regular\n\
             200,30,NaN,210,regular\n\
             300,30,40,210,regular\n",
        );
        assert_eq!(script.len(), 1);
        assert_eq!(script.records[0].trigger, 300.0);

        let issues: Vec<_> = script.diagnostics.iter().map(|d| (d.line, &d.issue)).collect();
        assert_eq!(issues.len(), 3);
        assert_eq!(issues[0], (2, &LineIssue::FieldCount { found: 4 }));
        assert_eq!(
            issues[1],
            (
                3,
                &LineIssue::BadNumber {
                    field: "trigger",
                    value: "abc".into()
                }
            )
        );
        assert!(matches!(issues[2].1, LineIssue::BadNumber { field: "height", .. }));
    }

    #[test]
    fn test_unknown_kind_defaults_to_regular() {
        let script = LevelScript::parse("track\n100,30,40,210,spikes\n");
        assert_eq!(script.len(), 1);
        assert_eq!(script.records[0].kind, ObstacleKind::Solid);
        assert_eq!(
            script.diagnostics[0].issue,
            LineIssue::UnknownKind {
                token: "spikes".into()
            }
        );
        assert!(!script.diagnostics[0].issue.is_dropped());
    }

    #[test]
    fn test_out_of_order_is_kept_with_warning() {
        let script = LevelScript::parse("track\n500,30,40,210,regular\n100,30,40,210,regular\n");
        assert_eq!(script.len(), 2);
        assert!(matches!(
            script.diagnostics[0].issue,
            LineIssue::OutOfOrder { trigger, previous } if trigger == 100.0 && previous == 500.0
        ));
    }

    #[test]
    fn test_final_distance() {
        let script = LevelScript::parse("track\n100,30,40,210,regular\n");
        assert_eq!(script.final_distance(800.0), 900.0);
        assert_eq!(LevelScript::empty().final_distance(800.0), 0.0);
        assert_eq!(LevelScript::parse("").track, None);
    }

    #[test]
    fn test_final_distance_uses_largest_trigger() {
        let script = LevelScript::parse(
            "track\n100,30,40,210,regular\n500,30,40,210,regular\n200,30,40,210,regular\n",
        );
        assert_eq!(script.final_distance(800.0), 1300.0);
    }

    #[test]
    fn test_missing_file_degrades_to_empty() {
        let path = std::env::temp_dir().join("dino-dash-no-such-level.txt");
        assert!(LevelScript::from_path(&path).is_err());
        let script = LevelScript::load_or_empty(&path);
        assert!(script.is_empty());
        assert_eq!(script.track, None);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("dino-dash-level-{}.txt", std::process::id()));
        std::fs::write(&path, "bgm.mp3\n50,20,30,220,regular\n").expect("write temp level");
        let script = LevelScript::from_path(&path).expect("readable level");
        let _ = std::fs::remove_file(&path);
        assert_eq!(script.len(), 1);
        assert_eq!(script.track.as_deref(), Some("bgm.mp3"));
    }
}
