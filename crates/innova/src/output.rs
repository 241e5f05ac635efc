//! Output formatting: table or JSON.
//!
//! Table uses `tabled` with one row per field; JSON serializes the same
//! report via serde.

use std::io::{self, Write};

use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use innova_core::{FanSpeed, Innova, Mode, Transport};

use crate::cli::OutputFormat;
use crate::error::CliError;

// ── Status report ────────────────────────────────────────────────────

/// Everything the CLI shows about a unit. Fields the model lacks are
/// left out rather than reported as zero.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub model: Option<String>,
    pub name: Option<String>,
    pub serial: Option<String>,
    pub uid: Option<String>,
    pub software_version: Option<String>,
    pub ip_address: Option<String>,
    pub power: bool,
    pub mode: String,
    pub target_temperature: f64,
    pub ambient_temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_temperature: Option<f64>,
    pub temperature_step: f64,
    pub min_temperature: f64,
    pub max_temperature: f64,
    pub fan_speed: FanSpeed,
    pub night_mode: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyboard_locked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduling: Option<bool>,
    pub supported_modes: Vec<String>,
    pub supported_fan_speeds: Vec<FanSpeed>,
}

impl StatusReport {
    pub fn from_unit<T: Transport>(unit: &Innova<T>) -> Self {
        let caps = unit.capabilities();
        Self {
            model: unit.model().map(|family| family.to_string()),
            name: unit.name(),
            serial: unit.serial(),
            uid: unit.uid(),
            software_version: unit.software_version(),
            ip_address: unit.ip_address(),
            power: unit.power(),
            mode: unit
                .mode()
                .kind()
                .map_or_else(|| "unknown".to_owned(), |kind| kind.to_string()),
            target_temperature: unit.target_temperature(),
            ambient_temperature: unit.ambient_temperature(),
            water_temperature: caps.water_temp.then(|| unit.water_temperature()),
            temperature_step: unit.temperature_step(),
            min_temperature: unit.min_temperature(),
            max_temperature: unit.max_temperature(),
            fan_speed: unit.fan_speed(),
            night_mode: unit.night_mode(),
            swing: caps.swing.then(|| unit.rotation()),
            keyboard_locked: caps.keyboard_lock.then(|| unit.keyboard_locked()),
            scheduling: caps.scheduling.then(|| unit.scheduling_mode()),
            supported_modes: unit
                .supported_modes()
                .iter()
                .filter_map(Mode::kind)
                .map(|kind| kind.to_string())
                .collect(),
            supported_fan_speeds: unit.supported_fan_speeds(),
        }
    }

    fn rows(&self) -> Vec<Row> {
        let mut rows = Vec::new();
        let mut push = |field: &'static str, value: Option<String>| {
            if let Some(value) = value {
                rows.push(Row { field, value });
            }
        };

        push("Model", self.model.clone());
        push("Name", self.name.clone());
        push("Serial", self.serial.clone());
        push("UID", self.uid.clone());
        push("Firmware", self.software_version.clone());
        push("IP", self.ip_address.clone());
        push("Power", Some(on_off(self.power)));
        push("Mode", Some(self.mode.clone()));
        push("Target", Some(degrees(self.target_temperature)));
        push("Ambient", Some(degrees(self.ambient_temperature)));
        push("Water", self.water_temperature.map(degrees));
        push(
            "Range",
            Some(format!(
                "{} .. {} (step {})",
                degrees(self.min_temperature),
                degrees(self.max_temperature),
                self.temperature_step
            )),
        );
        push("Fan", Some(self.fan_speed.to_string()));
        push("Night mode", Some(on_off(self.night_mode)));
        push("Swing", self.swing.map(on_off));
        push("Keyboard lock", self.keyboard_locked.map(on_off));
        push("Schedule", self.scheduling.map(on_off));
        push("Modes", Some(self.supported_modes.join(", ")));
        push(
            "Fan speeds",
            Some(
                self.supported_fan_speeds
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
        );
        rows
    }
}

#[derive(Tabled)]
struct Row {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

fn on_off(value: bool) -> String {
    let text = if value { "on" } else { "off" };
    text.to_owned()
}

fn degrees(value: f64) -> String {
    format!("{value:.1} °C")
}

// ── Render dispatch ──────────────────────────────────────────────────

pub fn render_status(format: OutputFormat, report: &StatusReport) -> Result<String, CliError> {
    match format {
        OutputFormat::Table => Ok(Table::new(report.rows()).with(Style::rounded()).to_string()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}

/// Print the rendered output to stdout.
pub fn print_output(output: &str) -> Result<(), CliError> {
    if output.is_empty() {
        return Ok(());
    }
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{output}")?;
    Ok(())
}
