/*
 *  config.rs
 *
 *  weatherpaint - ink on paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Layered configuration: defaults, YAML file, command line
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use chrono::{DateTime, FixedOffset};
use clap::{ArgAction, Parser, ValueHint};
use dirs_next::home_dir;
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};
use thiserror::Error;

use crate::canvas::Rotation;
use crate::chart::DEFAULT_GRIDLINES;
use crate::dashboard::{PANEL_HEIGHT, PANEL_WIDTH, UpdateFailure};

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_OUTPUT: &str = "weatherpaint.pbm";

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level configuration. Every field is optional so layers can be
/// merged; the accessors supply the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    pub log_level: Option<String>,     // e.g., "info" | "debug"
    pub display: Option<DisplayConfig>,
    pub chart: Option<ChartConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DisplayConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub rotate_deg: Option<u16>,
    pub invert: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ChartConfig {
    /// Gridline budget for the temperature axis
    pub gridlines: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    /// Where the PBM frame is written
    pub path: Option<PathBuf>,
}

impl Config {
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn panel_size(&self) -> (u32, u32) {
        let d = self.display.as_ref();
        (
            d.and_then(|d| d.width).unwrap_or(PANEL_WIDTH),
            d.and_then(|d| d.height).unwrap_or(PANEL_HEIGHT),
        )
    }

    /// Rotation after validation; an unvalidated bad angle falls back to 0.
    pub fn rotation(&self) -> Rotation {
        self.display
            .as_ref()
            .and_then(|d| d.rotate_deg)
            .and_then(|deg| Rotation::try_from(deg).ok())
            .unwrap_or(Rotation::Rotate0)
    }

    pub fn invert(&self) -> bool {
        self.display.as_ref().and_then(|d| d.invert).unwrap_or(false)
    }

    pub fn gridlines(&self) -> u32 {
        self.chart.as_ref().and_then(|c| c.gridlines).unwrap_or(DEFAULT_GRIDLINES)
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .as_ref()
            .and_then(|o| o.path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }
}

fn parse_rfc3339(s: &str) -> Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(s).map_err(|e| format!("{s}: {e}"))
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone)]
#[command(name = "weatherpaint", about = "Render a weather dashboard for a 1-bit e-paper panel")]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    /// Weather record to render (JSON)
    #[arg(long, value_hint = ValueHint::FilePath, required_unless_present = "dump_config")]
    pub weather: Option<PathBuf>,
    /// Render as if it were this instant (RFC 3339), default is now
    #[arg(long, value_parser = parse_rfc3339)]
    pub now: Option<DateTime<FixedOffset>>,
    /// Overlay a failed-update notice
    #[arg(long, value_enum)]
    pub failure: Option<UpdateFailure>,
    /// Frame output file (PBM)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,
    #[arg(long)]
    pub log_level: Option<String>,
    #[arg(long)]
    pub display_width: Option<u32>,
    #[arg(long)]
    pub display_height: Option<u32>,
    #[arg(long)]
    pub display_rotate_deg: Option<u16>,
    #[arg(long, action = ArgAction::Set)]
    pub display_invert: Option<bool>,
    #[arg(long)]
    pub gridlines: Option<u32>,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

/// Public entry point: parse CLI, read YAML, merge, validate.
pub fn load() -> Result<(Cli, Config), ConfigError> {
    let cli = Cli::parse();
    let cfg = load_with(&cli)?;
    Ok((cli, cfg))
}

/// Build the effective configuration for already parsed arguments.
pub fn load_with(cli: &Cli) -> Result<Config, ConfigError> {
    // 1) defaults (from `Default` impl)
    let mut cfg = Config::default();

    // 2) YAML file (explicit path or search)
    if let Some(p) = cli.config.as_ref() {
        if !p.exists() {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
        merge(&mut cfg, read_yaml(p)?);
    } else if let Some(p) = find_config_file() {
        merge(&mut cfg, read_yaml(&p)?);
    }

    // 3) CLI overrides (highest precedence)
    apply_cli_overrides(&mut cfg, cli);

    // 4) Validate
    validate(&cfg)?;
    Ok(cfg)
}

/// Pretty YAML of the effective config.
pub fn dump(cfg: &Config) -> Result<String, ConfigError> {
    Ok(serde_yaml::to_string(cfg)?)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    // XDG-style: ~/.config/weatherpaint/config.yaml
    if let Some(home) = home_dir() {
        let p = home.join(".config/weatherpaint/config.yaml");
        if p.exists() { return Some(p) }
        let p = home.join(".config/weatherpaint.yaml");
        if p.exists() { return Some(p) }
    }
    // project local
    for candidate in &["weatherpaint.yaml", "config.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

pub fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&s)?;
    Ok(cfg)
}

/// Shallow merge `src` into `dst`, Option-by-Option.
fn merge(dst: &mut Config, src: Config) {
    if src.log_level.is_some() { dst.log_level = src.log_level; }
    match (&mut dst.display, src.display) {
        (None, Some(c)) => dst.display = Some(c),
        (Some(d), Some(s)) => merge_display(d, s),
        _ => {}
    }
    match (&mut dst.chart, src.chart) {
        (None, Some(c)) => dst.chart = Some(c),
        (Some(d), Some(s)) => {
            if s.gridlines.is_some() { d.gridlines = s.gridlines; }
        }
        _ => {}
    }
    match (&mut dst.output, src.output) {
        (None, Some(o)) => dst.output = Some(o),
        (Some(d), Some(s)) => {
            if s.path.is_some() { d.path = s.path; }
        }
        _ => {}
    }
}

fn merge_display(dst: &mut DisplayConfig, src: DisplayConfig) {
    if src.width.is_some()      { dst.width = src.width; }
    if src.height.is_some()     { dst.height = src.height; }
    if src.rotate_deg.is_some() { dst.rotate_deg = src.rotate_deg; }
    if src.invert.is_some()     { dst.invert = src.invert; }
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.log_level.is_some() { cfg.log_level = cli.log_level.clone(); }

    let any_display = cli.display_width.is_some()
        || cli.display_height.is_some()
        || cli.display_rotate_deg.is_some()
        || cli.display_invert.is_some();
    if any_display {
        let display = cfg.display.get_or_insert_with(DisplayConfig::default);
        if cli.display_width.is_some()      { display.width = cli.display_width; }
        if cli.display_height.is_some()     { display.height = cli.display_height; }
        if cli.display_rotate_deg.is_some() { display.rotate_deg = cli.display_rotate_deg; }
        if cli.display_invert.is_some()     { display.invert = cli.display_invert; }
    }

    if cli.gridlines.is_some() {
        cfg.chart.get_or_insert_with(ChartConfig::default).gridlines = cli.gridlines;
    }
    if cli.output.is_some() {
        cfg.output.get_or_insert_with(OutputConfig::default).path = cli.output.clone();
    }
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if let Some(display) = cfg.display.as_ref() {
        if display.width == Some(0) || display.height == Some(0) {
            return Err(ConfigError::Validation("display width/height must be > 0".into()));
        }
        if let Some(rot) = display.rotate_deg {
            if Rotation::try_from(rot).is_err() {
                return Err(ConfigError::Validation("display rotate_deg must be 0|90|180|270".into()));
            }
        }
    }
    if cfg.chart.as_ref().and_then(|c| c.gridlines) == Some(0) {
        return Err(ConfigError::Validation("chart gridlines must be >= 1".into()));
    }
    Ok(())
}
