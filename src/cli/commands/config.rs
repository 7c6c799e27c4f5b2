use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigAction;
use sourcelines::config::Config;

pub fn handle(action: ConfigAction, mut config: Config) -> Result<()> {
    match action {
        ConfigAction::Set { key, value } => {
            println!("{} Setting {} = {}",
                "→".bright_green(),
                key.bright_cyan(),
                value.bright_yellow());

            config.set(&key, &value)?;
            println!("{} Configuration updated in {}", "✓".bright_green(), config.path.display());
        }

        ConfigAction::Get { key } => {
            let value = config.get(&key)?;
            println!("{} = {}", key.bright_cyan(), value);
        }

        ConfigAction::List => {
            println!("{}", "Current Configuration:".bright_blue().bold());
            if !config.path.exists() {
                println!("  {} No configuration file found, showing defaults", "ℹ".bright_blue());
            }

            for key in Config::keys() {
                let value = config.get(&key)?;
                println!("  {} = {}", key.bright_cyan(), value.bright_yellow());
            }
        }
    }

    Ok(())
}
