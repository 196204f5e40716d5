use chrono::Utc;
use log::{LevelFilter, warn};
use std::path::PathBuf;

pub const EVENTS_JSON_ENV: &str = "EVENTBOARD_EVENTS_JSON";
pub const SEED_ENV: &str = "EVENTBOARD_SEED";
pub const LOG_ENV: &str = "EVENTBOARD_LOG";

#[derive(Debug, Default, Clone, PartialEq)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    pub events_path: Option<PathBuf>,
    /// Order of the non-featured list. Fixed seed = reproducible order.
    pub seed: u64,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct CliArgs {
    pub events_path: Option<PathBuf>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CliAction {
    Run(CliArgs),
    Help,
    Version,
}

impl AppSettings {
    pub fn load() -> Self {
        // Unseeded runs still vary between launches, like the web list did.
        let launch_seed = Utc::now().timestamp_millis().unsigned_abs();
        Self::from_lookup(|key| std::env::var(key).ok(), launch_seed)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>, fallback_seed: u64) -> Self {
        let events_path = lookup(EVENTS_JSON_ENV)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        let seed = match lookup(SEED_ENV) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!("ignoring {SEED_ENV}={raw:?}: not a number");
                fallback_seed
            }),
            None => fallback_seed,
        };
        let log_level = lookup(LOG_ENV).and_then(|s| s.trim().parse().ok());

        Self { full_screen: false, log_level, events_path, seed }
    }

    /// Command-line values win over the environment.
    pub fn apply_cli(&mut self, args: CliArgs) {
        if let Some(path) = args.events_path {
            self.events_path = Some(path);
        }
        if let Some(seed) = args.seed {
            self.seed = seed;
        }
    }
}

pub fn parse_args(args: impl IntoIterator<Item = String>) -> Result<CliAction, String> {
    let mut cli = CliArgs::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(CliAction::Help),
            "-V" | "--version" => return Ok(CliAction::Version),
            "--seed" => {
                let value = args.next().ok_or("--seed needs a value")?;
                let seed = value
                    .parse()
                    .map_err(|_| format!("invalid seed: {value}"))?;
                cli.seed = Some(seed);
            }
            flag if flag.starts_with('-') => return Err(format!("Unknown argument: {flag}")),
            path if cli.events_path.is_none() => cli.events_path = Some(PathBuf::from(path)),
            extra => return Err(format!("Unexpected argument: {extra}")),
        }
    }

    Ok(CliAction::Run(cli))
}

pub fn usage_text() -> &'static str {
    "eventboard - tournament events in your terminal

Usage:
  eventboard [EVENTS_JSON] [--seed N]
  eventboard --help
  eventboard --version

Environment:
  EVENTBOARD_EVENTS_JSON   Path to an events snapshot (array or {\"content\": [...]})
  EVENTBOARD_SEED          Seed for the order of the non-featured list
  EVENTBOARD_LOG           Log level: error, warn, info, debug, trace"
}
