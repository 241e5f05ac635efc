//! Command handlers. Every command starts from a fresh status read, so
//! capability checks and the printed report reflect the unit as it is now.

use tracing::debug;

use innova_core::{Capabilities, CoreError, FanSpeed, Innova, ModeKind, Transport};

use crate::cli::{Command, GlobalOpts, Toggle};
use crate::error::CliError;
use crate::output::{self, StatusReport};

pub async fn dispatch<T: Transport>(
    cmd: &Command,
    unit: &Innova<T>,
    global: &GlobalOpts,
    target: &str,
) -> Result<(), CliError> {
    unit.refresh_checked().await.map_err(|e| match e {
        CoreError::StatusUnavailable => CliError::Unreachable {
            target: target.to_owned(),
        },
        other => CliError::from(other),
    })?;
    debug!(model = ?unit.model(), "unit status loaded");

    match *cmd {
        Command::Status => {}
        Command::Power { state } => {
            let ok = if state.is_on() {
                unit.power_on().await
            } else {
                unit.power_off().await
            };
            accepted(ok, &toggled("power", state))?;
        }
        Command::Temperature { value } => {
            validate_temperature(unit, value)?;
            accepted(unit.set_temperature(value).await, &format!("temperature {value}"))?;
        }
        Command::Mode { mode } => {
            let kind = ModeKind::from(mode);
            if unit.supported_modes().iter().all(|m| m.kind() != Some(kind)) {
                return Err(unsupported(unit, &format!("mode {kind}")));
            }
            accepted(unit.set_mode(kind).await, &format!("mode {kind}"))?;
        }
        Command::Fan { speed } => {
            let speed = FanSpeed::from(speed);
            if !unit.supported_fan_speeds().contains(&speed) {
                return Err(unsupported(unit, &format!("fan {speed}")));
            }
            accepted(unit.set_fan_speed(speed).await, &format!("fan {speed}"))?;
        }
        Command::Swing { state } => {
            require(unit, "swing", |c| c.swing)?;
            let ok = if state.is_on() {
                unit.rotation_on().await
            } else {
                unit.rotation_off().await
            };
            accepted(ok, &toggled("swing", state))?;
        }
        Command::Night { state } => {
            let ok = if state.is_on() {
                unit.night_mode_on().await
            } else {
                unit.night_mode_off().await
            };
            accepted(ok, &toggled("night", state))?;
        }
        Command::Lock { state } => {
            require(unit, "lock", |c| c.keyboard_lock)?;
            let ok = if state.is_on() {
                unit.lock_keyboard().await
            } else {
                unit.unlock_keyboard().await
            };
            accepted(ok, &toggled("lock", state))?;
        }
        Command::Schedule { state } => {
            require(unit, "schedule", |c| c.scheduling)?;
            let ok = if state.is_on() {
                unit.scheduling_on().await
            } else {
                unit.scheduling_off().await
            };
            accepted(ok, &toggled("schedule", state))?;
        }
        // Handled before a unit is built.
        Command::Completions(_) => return Ok(()),
    }

    let report = StatusReport::from_unit(unit);
    output::print_output(&output::render_status(global.output, &report)?)
}

// ── Helpers ──────────────────────────────────────────────────────────

fn accepted(ok: bool, operation: &str) -> Result<(), CliError> {
    if ok {
        Ok(())
    } else {
        Err(CliError::Rejected {
            operation: operation.to_owned(),
        })
    }
}

fn toggled(operation: &str, state: Toggle) -> String {
    let suffix = if state.is_on() { "on" } else { "off" };
    format!("{operation} {suffix}")
}

fn require<T: Transport>(
    unit: &Innova<T>,
    operation: &str,
    supported: impl Fn(&Capabilities) -> bool,
) -> Result<(), CliError> {
    if supported(&unit.capabilities()) {
        Ok(())
    } else {
        Err(unsupported(unit, operation))
    }
}

fn unsupported<T: Transport>(unit: &Innova<T>, operation: &str) -> CliError {
    CliError::Unsupported {
        operation: operation.to_owned(),
        model: unit
            .model()
            .map_or_else(|| "unknown".to_owned(), |family| family.to_string()),
    }
}

/// The library accepts any multiple of the step; the CLI also keeps the
/// value inside the unit's range.
fn validate_temperature<T: Transport>(unit: &Innova<T>, value: f64) -> Result<(), CliError> {
    let (min, max) = (unit.min_temperature(), unit.max_temperature());
    if !value.is_finite() || value < min || value > max {
        return Err(CliError::Validation {
            field: "temperature".into(),
            reason: format!("{value} is outside {min} .. {max}"),
        });
    }
    let step = unit.temperature_step();
    let steps = value / step;
    if (steps - steps.round()).abs() > 1e-6 {
        return Err(CliError::Validation {
            field: "temperature".into(),
            reason: format!("{value} is not a multiple of {step}"),
        });
    }
    Ok(())
}
