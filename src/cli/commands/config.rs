use crate::config::Config;
use crate::error::Result;

#[derive(clap::Subcommand, Debug)]
pub enum ConfigCommand {
    /// Set a configuration value, e.g. `law.key`
    Set { key: String, value: String },
    /// Get a configuration value
    Get { key: String },
    /// Show the configuration file path
    Path,
}

pub async fn execute(command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            println!("Set {key} = {value}");
        }
        ConfigCommand::Get { key } => {
            let config = Config::load()?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => println!("(not set)"),
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::config_file_path()?.display());
        }
    }
    Ok(())
}
