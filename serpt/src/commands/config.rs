//! Config command implementation.
//!
//! Prints the effective configuration as TOML and can write it out as a
//! starting `serpt.toml`.

use std::path::PathBuf;

use crate::commands::traits::Command;
use crate::config::Config;
use crate::error::Result;

/// Arguments for the config command.
#[derive(Debug, Clone, Default)]
pub struct ConfigArgs {
    /// The configuration in effect.
    pub config: Config,
    /// Write the configuration here instead of printing it.
    pub write: Option<PathBuf>,
}

/// Config command handler.
pub struct ConfigCommand {
    args: ConfigArgs,
}

impl Command for ConfigCommand {
    type Args = ConfigArgs;
    type Output = String;

    fn new(args: Self::Args) -> Self {
        Self { args }
    }

    /// Returns the rendered TOML.
    fn execute(&self) -> Result<Self::Output> {
        let rendered = self.args.config.to_toml()?;
        match &self.args.write {
            Some(path) => {
                self.args.config.save_to_path(path)?;
                eprintln!("Wrote configuration to {}", path.display());
            },
            None => print!("{}", rendered),
        }
        Ok(rendered)
    }

    fn name() -> &'static str {
        "config"
    }
}

/// Run the config command.
pub fn run_config(args: ConfigArgs) -> Result<()> {
    tracing::debug!(command = ConfigCommand::name(), "running");
    ConfigCommand::new(args).execute().map(|_| ())
}
