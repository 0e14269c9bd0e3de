//! Config subcommands handler

use anyhow::Result;

use slotdelta::cli::ConfigAction;
use slotdelta::Config;

pub fn handle(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => handle_show(),
        ConfigAction::Path => handle_path(),
    }
}

/// Show the effective configuration as TOML.
#[cfg(not(tarpaulin_include))]
fn handle_show() -> Result<()> {
    let config = Config::load()?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}

/// Print where the config file is read from, whether or not it exists.
#[cfg(not(tarpaulin_include))]
fn handle_path() -> Result<()> {
    let path = Config::config_path()?;
    println!("{}", path.display());
    Ok(())
}
