pub mod catalog;
pub mod check;
pub mod read;
pub mod time;
pub mod write;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::{ArgAction, Parser, Subcommand};
use tagcrawl_common::config::{Config, DEFAULT_PROBE_PORT};
use tagcrawl_common::progress::Interrupt;
use tagcrawl_common::reachability::Prober;
use tagcrawl_core::TagService;
use tagcrawl_core::network::tcp::{SkipProbe, TcpProber};
use tagcrawl_protocols::{DeviceProfile, SimulatedPlc};

#[derive(Parser)]
#[command(name = "tagcrawl", version)]
#[command(about = "Discover, read and write tags on a programmable logic controller.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// JSON profile of the controller to talk to
    #[arg(long, global = true, value_name = "PROFILE")]
    pub device: Option<PathBuf>,

    /// Do not knock on the controller port before connecting
    #[arg(long, global = true)]
    pub skip_probe: bool,

    /// Seconds to wait for the reachability probe
    #[arg(long, global = true, value_name = "SECONDS", default_value = "1", value_parser = parse_seconds)]
    pub probe_timeout: Duration,

    /// TCP port the reachability probe connects to
    #[arg(long, global = true, value_name = "PORT", default_value_t = DEFAULT_PROBE_PORT)]
    pub probe_port: u16,

    /// Seconds allowed for each single tag read
    #[arg(long, global = true, value_name = "SECONDS", default_value = "2", value_parser = parse_seconds)]
    pub tag_timeout: Duration,

    /// More log output, repeat for trace
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Less log output
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check that an address answers and belongs to a controller
    #[command(alias = "c")]
    Check { ip: String },
    /// List every tag on a controller without reading values
    Catalog {
        ip: String,
        /// Write the table to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List every tag on a controller together with its current value
    #[command(alias = "s")]
    Snapshot {
        ip: String,
        /// Write the table to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Read the given tags
    #[command(alias = "r")]
    Read {
        ip: String,
        #[arg(required = true)]
        tags: Vec<String>,
    },
    /// Write values from rows of tag, value and data type separated by tabs
    #[command(alias = "w")]
    Write {
        ip: String,
        /// Table file, '-' or nothing reads stdin
        table: Option<PathBuf>,
    },
    /// Show or set the controller clock
    #[command(alias = "t")]
    Time {
        #[command(subcommand)]
        action: TimeAction,
    },
}

#[derive(Subcommand)]
pub enum TimeAction {
    /// Print the controller clock
    Get { ip: String },
    /// Set the controller clock to this computer's local time
    Set { ip: String },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        Config {
            probe_timeout: self.probe_timeout,
            probe_port: self.probe_port,
            per_tag_timeout: self.tag_timeout,
            ..Config::default()
        }
    }

    /// Wires the driver and prober selected on the command line.
    pub fn service(&self, interrupt: Interrupt) -> anyhow::Result<TagService> {
        let Some(path) = &self.device else {
            bail!("no controller driver is built in, pass --device <PROFILE>");
        };
        let profile: DeviceProfile = DeviceProfile::from_file(path)
            .with_context(|| format!("loading device profile '{}'", path.display()))?;

        let prober: Box<dyn Prober> = if self.skip_probe {
            Box::new(SkipProbe)
        } else {
            Box::new(TcpProber::new(self.probe_port))
        };

        let driver = Arc::new(SimulatedPlc::from_profile(profile));
        Ok(TagService::new(driver, prober, self.config()).with_interrupt(interrupt))
    }
}

fn parse_seconds(raw: &str) -> Result<Duration, String> {
    let seconds: f64 = raw
        .parse()
        .map_err(|_| format!("'{raw}' is not a number of seconds"))?;
    Duration::try_from_secs_f64(seconds).map_err(|_| format!("'{raw}' is not a usable duration"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractional_seconds_are_accepted() {
        assert_eq!(parse_seconds("0.25"), Ok(Duration::from_millis(250)));
        assert_eq!(parse_seconds("3"), Ok(Duration::from_secs(3)));
        assert!(parse_seconds("-1").is_err());
        assert!(parse_seconds("soon").is_err());
    }

    #[test]
    fn global_flags_feed_the_config() {
        let cli = CommandLine::try_parse_from([
            "tagcrawl",
            "read",
            "10.0.0.1",
            "Counter",
            "--tag-timeout",
            "0.5",
            "--probe-port",
            "2222",
        ])
        .unwrap();

        let cfg: Config = cli.config();
        assert_eq!(cfg.per_tag_timeout, Duration::from_millis(500));
        assert_eq!(cfg.probe_port, 2222);
        assert_eq!(cfg.probe_timeout, Duration::from_secs(1));
        assert!(matches!(cli.command, Commands::Read { tags, .. } if tags == vec!["Counter".to_string()]));
    }

    #[test]
    fn a_profile_is_required_to_talk_to_a_controller() {
        let cli = CommandLine::try_parse_from(["tagcrawl", "check", "10.0.0.1"]).unwrap();
        assert!(cli.service(Interrupt::new()).is_err());
    }
}
