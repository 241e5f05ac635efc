//! Clap derive structures for the `innova` CLI.
//!
//! Defines the command tree, global flags, and shared value enums.

use clap::{Args, Parser, Subcommand, ValueEnum};

use innova_core::{FanSpeed, ModeKind};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// innova -- control Innova heat pumps from the command line
#[derive(Debug, Parser)]
#[command(
    name = "innova",
    version,
    about = "Control Innova heat pump units from the command line",
    long_about = "Reads and drives Innova 2.0 and AirLeaf heat pumps, either directly\n\
        on the local network (--host) or through the Innova cloud (--serial, --uid).",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Unit hostname or IP address (local mode)
    #[arg(long, short = 'H', env = "INNOVA_HOST", global = true)]
    pub host: Option<String>,

    /// Unit serial number (cloud mode)
    #[arg(long, env = "INNOVA_SERIAL", global = true)]
    pub serial: Option<String>,

    /// Unit MAC address as registered with the cloud (cloud mode)
    #[arg(long, env = "INNOVA_UID", global = true, hide_env = true)]
    pub uid: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "INNOVA_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "INNOVA_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default)
    Table,
    /// Pretty-printed JSON
    Json,
}

// ── Value enums ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn is_on(self) -> bool {
        self == Self::On
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Heat,
    Cool,
    /// Dehumidify
    Dry,
    /// Fan only
    Fan,
    Auto,
}

impl From<ModeArg> for ModeKind {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Heat => ModeKind::Heat,
            ModeArg::Cool => ModeKind::Cool,
            ModeArg::Dry => ModeKind::Dehumidify,
            ModeArg::Fan => ModeKind::FanOnly,
            ModeArg::Auto => ModeKind::Auto,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FanArg {
    Auto,
    Low,
    MediumLow,
    Medium,
    MediumHigh,
    High,
}

impl From<FanArg> for FanSpeed {
    fn from(speed: FanArg) -> Self {
        match speed {
            FanArg::Auto => FanSpeed::Auto,
            FanArg::Low => FanSpeed::Low,
            FanArg::MediumLow => FanSpeed::MediumLow,
            FanArg::Medium => FanSpeed::Medium,
            FanArg::MediumHigh => FanSpeed::MediumHigh,
            FanArg::High => FanSpeed::High,
        }
    }
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the unit's current status
    #[command(alias = "st")]
    Status,

    /// Turn the unit on or off
    Power {
        state: Toggle,
    },

    /// Set the target temperature in degrees Celsius
    #[command(alias = "temp")]
    Temperature {
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },

    /// Select the operating mode
    Mode {
        mode: ModeArg,
    },

    /// Set the fan speed
    Fan {
        speed: FanArg,
    },

    /// Turn louvre swing on or off
    Swing {
        state: Toggle,
    },

    /// Turn night mode on or off
    Night {
        state: Toggle,
    },

    /// Lock or unlock the unit's keyboard
    Lock {
        state: Toggle,
    },

    /// Turn the weekly schedule on or off
    Schedule {
        state: Toggle,
    },

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn mode_aliases_map_to_kinds() {
        assert_eq!(ModeKind::from(ModeArg::Dry), ModeKind::Dehumidify);
        assert_eq!(ModeKind::from(ModeArg::Fan), ModeKind::FanOnly);
        assert_eq!(FanSpeed::from(FanArg::MediumHigh), FanSpeed::MediumHigh);
    }
}
