//! Control channel
//!
//! An external program (typically the viewer) steers the running simulation
//! by rewriting a small JSON document:
//!
//! ```json
//! {
//!   "windAngle": 90, "windStrength": 20, "windEnabled": true,
//!   "thunderPercentage": 2, "stepsBetweenThunder": 50,
//!   "paused": false, "step": false, "triggerThunder": false
//! }
//! ```
//!
//! The document is a single-slot, last-write-wins mailbox. It may be read
//! while half written, so every failure is recovered locally: an unreadable
//! document keeps the last known settings, an absent or mistyped field keeps
//! its last known value. `step` and `triggerThunder` are edge-triggered
//! requests that the loop clears back to `false` after acting on them.

use crate::physics::WindConditions;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Last known values of the continuous control fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ControlSettings {
    /// Degrees clockwise from north
    pub wind_angle: i32,
    pub wind_strength: i32,
    pub wind_enabled: bool,
    /// Percent of mature trees struck per thunder event (0-100)
    pub thunder_percentage: u32,
    /// Advancing steps between scheduled strikes, 0 disables
    pub steps_between_thunder: u32,
    pub paused: bool,
}

impl ControlSettings {
    /// Wind inputs for the next step
    pub fn wind(&self) -> WindConditions {
        WindConditions {
            enabled: self.wind_enabled,
            angle_degrees: f64::from(self.wind_angle),
            strength: f64::from(self.wind_strength),
        }
    }
}

/// One read of the control document, every field optional
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_angle: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_strength: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thunder_percentage: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps_between_thunder: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paused: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_thunder: Option<bool>,
}

impl ControlDocument {
    /// Complete document for `settings` with both requests cleared
    pub fn from_settings(settings: &ControlSettings) -> Self {
        Self {
            wind_angle: Some(settings.wind_angle),
            wind_strength: Some(settings.wind_strength),
            wind_enabled: Some(settings.wind_enabled),
            thunder_percentage: Some(settings.thunder_percentage),
            steps_between_thunder: Some(settings.steps_between_thunder),
            paused: Some(settings.paused),
            step: Some(false),
            trigger_thunder: Some(false),
        }
    }

    /// Parse a control document leniently
    ///
    /// Returns `None` if the text is not a JSON object. Each field is
    /// extracted on its own: integers accept JSON floats (truncated),
    /// booleans accept numbers (non-zero is true), and a field of any other
    /// type is treated as absent.
    pub fn parse(text: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(text).ok()?;
        let object = value.as_object()?;
        Some(Self {
            wind_angle: int_field(object, "windAngle")
                .map(|v| v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32),
            wind_strength: int_field(object, "windStrength")
                .map(|v| v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32),
            wind_enabled: bool_field(object, "windEnabled"),
            thunder_percentage: int_field(object, "thunderPercentage").map(|v| v.clamp(0, 100) as u32),
            steps_between_thunder: int_field(object, "stepsBetweenThunder")
                .map(|v| v.clamp(0, i64::from(u32::MAX)) as u32),
            paused: bool_field(object, "paused"),
            step: bool_field(object, "step"),
            trigger_thunder: bool_field(object, "triggerThunder"),
        })
    }

    /// Overwrite the fields of `settings` present in this document
    pub fn apply_to(&self, settings: &mut ControlSettings) {
        if let Some(v) = self.wind_angle {
            settings.wind_angle = v;
        }
        if let Some(v) = self.wind_strength {
            settings.wind_strength = v;
        }
        if let Some(v) = self.wind_enabled {
            settings.wind_enabled = v;
        }
        if let Some(v) = self.thunder_percentage {
            settings.thunder_percentage = v.min(100);
        }
        if let Some(v) = self.steps_between_thunder {
            settings.steps_between_thunder = v;
        }
        if let Some(v) = self.paused {
            settings.paused = v;
        }
    }
}

fn int_field(object: &Map<String, Value>, key: &str) -> Option<i64> {
    let value = object.get(key)?;
    value
        .as_i64()
        .or_else(|| value.as_u64().map(|v| v.min(i64::MAX as u64) as i64))
        .or_else(|| value.as_f64().filter(|v| v.is_finite()).map(|v| v as i64))
}

fn bool_field(object: &Map<String, Value>, key: &str) -> Option<bool> {
    let value = object.get(key)?;
    value
        .as_bool()
        .or_else(|| value.as_f64().map(|v| v != 0.0))
}

/// Where control documents come from
pub trait ControlSource {
    /// Read the current document, `None` if missing or unparseable
    fn read(&mut self) -> Option<ControlDocument>;

    /// Reset the requested edge-triggered fields to `false` at the source,
    /// keeping every other field
    fn clear_requests(&mut self, step: bool, trigger_thunder: bool) -> io::Result<()>;
}

/// Control document stored in a JSON file
#[derive(Debug, Clone)]
pub struct FileControlSource {
    path: PathBuf,
}

impl FileControlSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write a complete document for `settings` unless the file already exists
    ///
    /// Returns `true` if a file was written.
    pub fn initialize(&self, settings: &ControlSettings) -> io::Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(&ControlDocument::from_settings(settings))?;
        fs::write(&self.path, text)?;
        Ok(true)
    }
}

impl ControlSource for FileControlSource {
    fn read(&mut self) -> Option<ControlDocument> {
        let text = fs::read_to_string(&self.path).ok()?;
        ControlDocument::parse(&text)
    }

    fn clear_requests(&mut self, step: bool, trigger_thunder: bool) -> io::Result<()> {
        let text = fs::read_to_string(&self.path)?;
        let mut value: Value = serde_json::from_str(&text)?;
        let object = value.as_object_mut().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidData, "control document is not an object")
        })?;
        if step {
            object.insert("step".to_owned(), Value::Bool(false));
        }
        if trigger_thunder {
            object.insert("triggerThunder".to_owned(), Value::Bool(false));
        }
        fs::write(&self.path, serde_json::to_string_pretty(&value)?)
    }
}

/// Result of one poll of the control channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlPoll {
    pub settings: ControlSettings,
    /// `step` went from false to true since the previous read
    pub step_requested: bool,
    /// `triggerThunder` went from false to true since the previous read
    pub thunder_requested: bool,
}

/// Polls a [`ControlSource`] and tracks last known values and request edges
#[derive(Debug)]
pub struct ControlChannel<S> {
    source: S,
    settings: ControlSettings,
    step_flag: bool,
    thunder_flag: bool,
}

impl<S: ControlSource> ControlChannel<S> {
    /// Channel starting from `defaults` until a document is read
    pub fn new(source: S, defaults: ControlSettings) -> Self {
        Self {
            source,
            settings: defaults,
            step_flag: false,
            thunder_flag: false,
        }
    }

    /// Last known settings
    pub fn settings(&self) -> &ControlSettings {
        &self.settings
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Read the source once and merge it into the last known state
    pub fn poll(&mut self) -> ControlPoll {
        let mut step_requested = false;
        let mut thunder_requested = false;

        if let Some(document) = self.source.read() {
            document.apply_to(&mut self.settings);
            if let Some(step) = document.step {
                step_requested = step && !self.step_flag;
                self.step_flag = step;
            }
            if let Some(trigger) = document.trigger_thunder {
                thunder_requested = trigger && !self.thunder_flag;
                self.thunder_flag = trigger;
            }
        } else {
            debug!("Control document unavailable, keeping last known settings");
        }

        ControlPoll {
            settings: self.settings,
            step_requested,
            thunder_requested,
        }
    }

    /// Clear consumed requests at the source
    ///
    /// Edges are still detected against the previous read, so a request
    /// that stays `true` because the clear failed does not fire twice.
    /// Failure is logged and otherwise ignored.
    pub fn consume_requests(&mut self, step: bool, trigger_thunder: bool) {
        if !step && !trigger_thunder {
            return;
        }
        if let Err(err) = self.source.clear_requests(step, trigger_thunder) {
            warn!("Failed to clear control requests: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Source replaying a fixed list of reads
    #[derive(Default)]
    struct ScriptedSource {
        reads: VecDeque<Option<ControlDocument>>,
        clears: Vec<(bool, bool)>,
        fail_clear: bool,
    }

    impl ControlSource for ScriptedSource {
        fn read(&mut self) -> Option<ControlDocument> {
            self.reads.pop_front().flatten()
        }

        fn clear_requests(&mut self, step: bool, trigger_thunder: bool) -> io::Result<()> {
            if self.fail_clear {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
            }
            self.clears.push((step, trigger_thunder));
            Ok(())
        }
    }

    fn step_doc(step: bool) -> Option<ControlDocument> {
        Some(ControlDocument {
            step: Some(step),
            ..ControlDocument::default()
        })
    }

    #[test]
    fn test_parse_full_document() {
        let doc = ControlDocument::parse(
            r#"{"windAngle": 90, "windStrength": 20, "windEnabled": true,
                "thunderPercentage": 3, "stepsBetweenThunder": 40,
                "paused": true, "step": false, "triggerThunder": true}"#,
        )
        .expect("object");
        assert_eq!(doc.wind_angle, Some(90));
        assert_eq!(doc.wind_strength, Some(20));
        assert_eq!(doc.wind_enabled, Some(true));
        assert_eq!(doc.thunder_percentage, Some(3));
        assert_eq!(doc.steps_between_thunder, Some(40));
        assert_eq!(doc.paused, Some(true));
        assert_eq!(doc.step, Some(false));
        assert_eq!(doc.trigger_thunder, Some(true));
    }

    #[test]
    fn test_parse_is_lenient_per_field() {
        let doc = ControlDocument::parse(
            r#"{"windAngle": 45.9, "windStrength": "strong", "thunderPercentage": 250,
                "stepsBetweenThunder": -3, "paused": 1}"#,
        )
        .expect("object");
        assert_eq!(doc.wind_angle, Some(45));
        assert_eq!(doc.wind_strength, None);
        assert_eq!(doc.thunder_percentage, Some(100));
        assert_eq!(doc.steps_between_thunder, Some(0));
        assert_eq!(doc.paused, Some(true));
        assert_eq!(doc.step, None);
    }

    #[test]
    fn test_parse_rejects_non_objects() {
        assert!(ControlDocument::parse("").is_none());
        assert!(ControlDocument::parse(r#"{"windAngle": 9"#).is_none());
        assert!(ControlDocument::parse("[1, 2]").is_none());
    }

    #[test]
    fn test_missing_document_keeps_last_known() {
        let source = ScriptedSource {
            reads: VecDeque::from([
                Some(ControlDocument {
                    wind_strength: Some(30),
                    paused: Some(true),
                    ..ControlDocument::default()
                }),
                None,
                Some(ControlDocument {
                    wind_angle: Some(180),
                    ..ControlDocument::default()
                }),
            ]),
            ..ScriptedSource::default()
        };
        let defaults = ControlSettings {
            wind_angle: 10,
            ..ControlSettings::default()
        };
        let mut channel = ControlChannel::new(source, defaults);

        let first = channel.poll().settings;
        assert_eq!(first.wind_angle, 10);
        assert_eq!(first.wind_strength, 30);
        assert!(first.paused);

        assert_eq!(channel.poll().settings, first);

        let third = channel.poll().settings;
        assert_eq!(third.wind_angle, 180);
        assert_eq!(third.wind_strength, 30);
    }

    #[test]
    fn test_step_is_edge_triggered() {
        let source = ScriptedSource {
            reads: [false, true, true, false, true]
                .into_iter()
                .map(step_doc)
                .collect(),
            ..ScriptedSource::default()
        };
        let mut channel = ControlChannel::new(source, ControlSettings::default());
        let edges: Vec<bool> = (0..5).map(|_| channel.poll().step_requested).collect();
        assert_eq!(edges, vec![false, true, false, false, true]);
    }

    #[test]
    fn test_consume_clears_source_without_refiring() {
        let source = ScriptedSource {
            reads: [true, true, false, true].into_iter().map(step_doc).collect(),
            ..ScriptedSource::default()
        };
        let mut channel = ControlChannel::new(source, ControlSettings::default());
        assert!(channel.poll().step_requested);
        channel.consume_requests(true, false);
        channel.consume_requests(false, false);
        assert_eq!(channel.source().clears, vec![(true, false)]);

        // A stale true (clear not yet observed) is not a new request
        assert!(!channel.poll().step_requested);
        assert!(!channel.poll().step_requested);
        assert!(channel.poll().step_requested);
    }

    #[test]
    fn test_failed_clear_is_not_fatal() {
        let source = ScriptedSource {
            reads: [true, true].into_iter().map(step_doc).collect(),
            fail_clear: true,
            ..ScriptedSource::default()
        };
        let mut channel = ControlChannel::new(source, ControlSettings::default());
        assert!(channel.poll().step_requested);
        channel.consume_requests(true, false);
        assert!(!channel.poll().step_requested);
        assert!(channel.source().clears.is_empty());
    }

    #[test]
    fn test_settings_document_round_trip() {
        let settings = ControlSettings {
            wind_angle: 270,
            wind_strength: 12,
            wind_enabled: true,
            thunder_percentage: 5,
            steps_between_thunder: 30,
            paused: false,
        };
        let text = serde_json::to_string(&ControlDocument::from_settings(&settings)).expect("json");
        assert!(text.contains(r#""stepsBetweenThunder":30"#));
        let mut parsed = ControlSettings::default();
        ControlDocument::parse(&text)
            .expect("object")
            .apply_to(&mut parsed);
        assert_eq!(parsed, settings);
    }
}
