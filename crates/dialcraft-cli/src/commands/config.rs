//! Configuration inspection.

use std::error::Error;
use std::path::Path;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Print the default config file location
    Path,
}

pub fn run(action: ConfigAction, config_path: Option<&Path>) -> Result<(), Box<dyn Error>> {
    match action {
        ConfigAction::Show => {
            let config = super::load_config(config_path)?;
            print!("{}", config.to_toml_string()?);
        }
        ConfigAction::Path => match super::default_config_path() {
            Some(path) => println!("{}", path.display()),
            None => eprintln!("no config directory on this platform"),
        },
    }
    Ok(())
}
