//! Command line arguments
//!
//! The positional arguments follow the order the viewer launches the
//! simulation with. They arrive as plain strings and are parsed leniently:
//! anything non-numeric becomes 0 (or `false`), negative counts become 0.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use wildfire_core::{ControlSettings, InitialIgnition, LoopConfig};

/// Headless wildfire succession simulation
#[derive(Parser, Debug)]
#[command(name = "wildfire-headless", allow_negative_numbers = true)]
#[command(about = "Forest fire cellular automaton streaming frames as NDJSON", long_about = None)]
pub struct Args {
    /// Grid width in cells
    #[arg(default_value = "100")]
    pub width: String,

    /// Grid height in cells
    #[arg(default_value = "100")]
    pub height: String,

    /// Percent of mature trees struck per thunder event (0-100)
    #[arg(default_value = "0")]
    pub thunder_percentage: String,

    /// Steps between scheduled thunder events (0 = never)
    #[arg(default_value = "0")]
    pub steps_between_thunder: String,

    /// Percent of trees burning at start (0-100)
    #[arg(default_value = "1")]
    pub burning_trees_percentage: String,

    /// Percent of grass burning at start (0-100)
    #[arg(default_value = "1")]
    pub burning_grass_percentage: String,

    /// Wind enabled (1/0/true/false)
    #[arg(default_value = "0")]
    pub wind_enabled: String,

    /// Wind angle in degrees (0=North, 90=East)
    #[arg(default_value = "0")]
    pub wind_angle: String,

    /// Wind strength
    #[arg(default_value = "0")]
    pub wind_strength: String,

    /// NDJSON output stream (truncated at start)
    #[arg(long, default_value = "res/simulation_stream.ndjson")]
    pub output: PathBuf,

    /// Control document polled every tick
    #[arg(long, default_value = "res/sim_control.json")]
    pub control: PathBuf,

    /// Random seed (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON file overriding simulation parameters
    #[arg(long)]
    pub params: Option<PathBuf>,

    /// Sleep after an advancing step, in milliseconds
    #[arg(long, default_value_t = 200)]
    pub tick_ms: u64,

    /// Sleep after an idle (paused) tick, in milliseconds
    #[arg(long, default_value_t = 50)]
    pub idle_ms: u64,

    /// Steps between population summaries in the log (0 = never)
    #[arg(long, default_value_t = 25)]
    pub stats_interval: u64,
}

impl Args {
    pub fn width(&self) -> usize {
        parse_count(&self.width) as usize
    }

    pub fn height(&self) -> usize {
        parse_count(&self.height) as usize
    }

    pub fn ignition(&self) -> InitialIgnition {
        InitialIgnition {
            tree_percentage: parse_count(&self.burning_trees_percentage).min(100),
            grass_percentage: parse_count(&self.burning_grass_percentage).min(100),
        }
    }

    /// Initial control settings, running (not paused)
    pub fn control_settings(&self) -> ControlSettings {
        ControlSettings {
            wind_angle: parse_int(&self.wind_angle),
            wind_strength: parse_int(&self.wind_strength),
            wind_enabled: parse_flag(&self.wind_enabled),
            thunder_percentage: parse_count(&self.thunder_percentage).min(100),
            steps_between_thunder: parse_count(&self.steps_between_thunder),
            paused: false,
        }
    }

    pub fn loop_config(&self) -> LoopConfig {
        LoopConfig {
            tick_interval: Duration::from_millis(self.tick_ms),
            idle_interval: Duration::from_millis(self.idle_ms),
            stats_log_interval: self.stats_interval,
        }
    }
}

fn parse_number(text: &str) -> Option<i64> {
    let text = text.trim();
    text.parse::<i64>().ok().or_else(|| {
        text.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(|v| v as i64)
    })
}

/// Non-negative count, 0 when unparseable
pub fn parse_count(text: &str) -> u32 {
    parse_number(text).map_or(0, |v| v.clamp(0, i64::from(u32::MAX)) as u32)
}

/// Signed integer, 0 when unparseable
pub fn parse_int(text: &str) -> i32 {
    parse_number(text).map_or(0, |v| {
        v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    })
}

/// `1`/`true`/`yes`/`on` (any case) or a non-zero number
pub fn parse_flag(text: &str) -> bool {
    let text = text.trim();
    match text.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" => true,
        _ => parse_number(text).is_some_and(|v| v != 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_numbers() {
        assert_eq!(parse_count("42"), 42);
        assert_eq!(parse_count(" 7 "), 7);
        assert_eq!(parse_count("12.9"), 12);
        assert_eq!(parse_count("-5"), 0);
        assert_eq!(parse_count("abc"), 0);
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_int("-90"), -90);
        assert_eq!(parse_int("north"), 0);
    }

    #[test]
    fn test_lenient_flags() {
        assert!(parse_flag("1"));
        assert!(parse_flag("TRUE"));
        assert!(parse_flag("on"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag("maybe"));
    }

    #[test]
    fn test_positional_order() {
        let args = Args::parse_from([
            "wildfire-headless",
            "60",
            "40",
            "5",
            "30",
            "2",
            "3",
            "1",
            "270",
            "18",
        ]);
        assert_eq!(args.width(), 60);
        assert_eq!(args.height(), 40);
        assert_eq!(
            args.ignition(),
            InitialIgnition {
                tree_percentage: 2,
                grass_percentage: 3
            }
        );
        let settings = args.control_settings();
        assert_eq!(settings.thunder_percentage, 5);
        assert_eq!(settings.steps_between_thunder, 30);
        assert!(settings.wind_enabled);
        assert_eq!(settings.wind_angle, 270);
        assert_eq!(settings.wind_strength, 18);
        assert!(!settings.paused);
    }

    #[test]
    fn test_garbage_positionals_do_not_fail() {
        let args = Args::parse_from(["wildfire-headless", "wide", "tall", "x"]);
        assert_eq!(args.width(), 0);
        assert_eq!(args.control_settings().thunder_percentage, 0);
        assert_eq!(args.ignition().tree_percentage, 1);
    }
}
