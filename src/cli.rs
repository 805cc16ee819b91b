//! Command-Line Interface Module
//!
//! Handles argument parsing for the rowspacing application and the command
//! language of interactive mode. Out-of-range numbers are clamped into the
//! calculator's input domain; anything that is not a number is rejected.

use clap::Parser;
use log::warn;
use serde::Deserialize;

use crate::spacing::{self, ALTITUDE_RANGE, PANEL_LENGTH_RANGE, TILT_RANGE};

// ===================== CLI =====================

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Panel length along the tilted surface in meters (1.0 to 2.5)
    #[arg(long, default_value_t = spacing::DEFAULT_PANEL_LENGTH, allow_hyphen_values = true,
          value_parser = parse_panel_length, env = "ROWSPACING_PANEL_LENGTH")]
    pub panel_length: f64,

    /// Panel tilt angle β in whole degrees (0 = flat, up to 60)
    #[arg(long, default_value_t = spacing::DEFAULT_TILT, allow_hyphen_values = true,
          value_parser = parse_tilt, env = "ROWSPACING_TILT")]
    pub tilt: f64,

    /// Minimum (winter solstice noon) solar altitude α in whole degrees (5 to 45)
    #[arg(long, default_value_t = spacing::DEFAULT_ALTITUDE, allow_hyphen_values = true,
          value_parser = parse_altitude, env = "ROWSPACING_SOLAR_ALTITUDE")]
    pub solar_altitude: f64,

    /// Write the diagram as SVG to this path (rewritten on every change)
    #[arg(long, env = "ROWSPACING_SVG")]
    pub svg: Option<std::path::PathBuf>,

    /// Print the full geometry snapshot as JSON instead of the text report
    #[arg(long)]
    pub json: bool,

    /// Skip the step-by-step derivation in the text report
    #[arg(long)]
    pub no_derivation: bool,

    /// Read commands from stdin and recompute after each one
    #[arg(long, conflicts_with = "json")]
    pub interactive: bool,

    /// Show build info from Cargo.lock at time of building
    #[arg(long)]
    pub show_build_info: bool,
}

// Define the structure to match what we serialized in build.rs
#[derive(Debug, Deserialize)]
pub struct DepInfo {
    pub name: String,
    pub version: String,
    pub checksum: Option<String>,
    pub source: Option<String>,
}

// ===================== CLI VALUE PARSERS =====================

fn clamp_logged(name: &str, v: f64, (min, max): (f64, f64)) -> f64 {
    let clamped = v.clamp(min, max);
    if clamped != v {
        warn!("{} {} outside {}..={}, clamped to {}", name, v, min, max, clamped);
    }
    clamped
}

fn parse_number(s: &str) -> Result<f64, String> {
    let v: f64 = s.trim().parse().map_err(|_| format!("Invalid number: {}", s))?;
    if !v.is_finite() {
        return Err(format!("Value must be finite, got {}", s));
    }
    Ok(v)
}

/// Whole degrees; fractional input is truncated
fn parse_degrees(s: &str) -> Result<f64, String> {
    Ok(parse_number(s)?.trunc())
}

pub fn parse_panel_length(s: &str) -> Result<f64, String> {
    Ok(clamp_logged("Panel length", parse_number(s)?, PANEL_LENGTH_RANGE))
}

pub fn parse_tilt(s: &str) -> Result<f64, String> {
    Ok(clamp_logged("Tilt", parse_degrees(s)?, TILT_RANGE))
}

pub fn parse_altitude(s: &str) -> Result<f64, String> {
    Ok(clamp_logged("Solar altitude", parse_degrees(s)?, ALTITUDE_RANGE))
}

// ===================== INTERACTIVE COMMANDS =====================

/// One line of interactive input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    PanelLength(f64),
    Tilt(f64),
    SolarAltitude(f64),
    Show,
    Help,
    Quit,
}

pub const COMMAND_HELP: &str = "\
Commands:
  length <meters>     set panel length (1.0 - 2.5)
  tilt <degrees>      set panel tilt β (0 - 60)
  altitude <degrees>  set solar altitude α (5 - 45)
  show                print the current results again
  help                show this help
  quit                exit";

/// Parse one interactive command line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut words = line.split_whitespace();
    let Some(keyword) = words.next() else {
        return Ok(None);
    };
    let argument = words.next();
    if words.next().is_some() {
        return Err("too many arguments".to_string());
    }

    let value = |parse: fn(&str) -> Result<f64, String>| match argument {
        Some(arg) => parse(arg),
        None => Err(format!("'{}' needs a value", keyword)),
    };
    let no_value = |cmd: Command| match argument {
        Some(_) => Err(format!("'{}' takes no value", keyword)),
        None => Ok(cmd),
    };

    let command = match keyword.to_ascii_lowercase().as_str() {
        "length" | "l" => Command::PanelLength(value(parse_panel_length)?),
        "tilt" | "beta" | "b" => Command::Tilt(value(parse_tilt)?),
        "altitude" | "alpha" | "a" => Command::SolarAltitude(value(parse_altitude)?),
        "show" => no_value(Command::Show)?,
        "help" | "?" => no_value(Command::Help)?,
        "quit" | "exit" | "q" => no_value(Command::Quit)?,
        other => return Err(format!("unknown command '{}'", other)),
    };
    Ok(Some(command))
}

// ===================== TESTS =====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsers_reject_garbage() {
        assert!(parse_panel_length("abc").is_err());
        assert!(parse_tilt("").is_err());
        assert!(parse_altitude("NaN").is_err());
        assert!(parse_altitude("inf").is_err());
    }

    #[test]
    fn test_parsers_clamp_out_of_range() {
        assert_eq!(parse_panel_length("0.4"), Ok(1.0));
        assert_eq!(parse_panel_length("3"), Ok(2.5));
        assert_eq!(parse_tilt("-5"), Ok(0.0));
        assert_eq!(parse_tilt("75"), Ok(60.0));
        assert_eq!(parse_altitude("2"), Ok(5.0));
        assert_eq!(parse_altitude("50"), Ok(45.0));
    }

    #[test]
    fn test_degrees_are_whole() {
        assert_eq!(parse_tilt("24.9"), Ok(24.0));
        assert_eq!(parse_altitude(" 42 "), Ok(42.0));
        assert_eq!(parse_panel_length("1.13"), Ok(1.13));
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["rowspacing"]).unwrap();
        assert_eq!(args.panel_length, 1.13);
        assert_eq!(args.tilt, 24.0);
        assert_eq!(args.solar_altitude, 42.0);
        assert!(args.svg.is_none());
        assert!(!args.json && !args.interactive && !args.no_derivation);
    }

    #[test]
    fn test_args_values() {
        let args = Args::try_parse_from([
            "rowspacing",
            "--panel-length",
            "2",
            "--tilt",
            "45",
            "--solar-altitude",
            "20",
            "--svg",
            "out.svg",
            "--json",
        ])
        .unwrap();
        assert_eq!(args.panel_length, 2.0);
        assert_eq!(args.tilt, 45.0);
        assert_eq!(args.solar_altitude, 20.0);
        assert_eq!(args.svg.as_deref(), Some(std::path::Path::new("out.svg")));
        assert!(args.json);
    }

    #[test]
    fn test_args_interactive_conflicts_with_json() {
        assert!(Args::try_parse_from(["rowspacing", "--interactive", "--json"]).is_err());
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("tilt 30"), Ok(Some(Command::Tilt(30.0))));
        assert_eq!(parse_command("  LENGTH 1.8 "), Ok(Some(Command::PanelLength(1.8))));
        assert_eq!(parse_command("altitude 90"), Ok(Some(Command::SolarAltitude(45.0))));
        assert_eq!(parse_command("show"), Ok(Some(Command::Show)));
        assert_eq!(parse_command("q"), Ok(Some(Command::Quit)));
        assert_eq!(parse_command("   "), Ok(None));
    }

    #[test]
    fn test_parse_command_errors() {
        assert!(parse_command("tilt").is_err());
        assert!(parse_command("tilt x").is_err());
        assert!(parse_command("tilt 10 20").is_err());
        assert!(parse_command("show now").is_err());
        assert!(parse_command("spin 3").is_err());
    }
}
