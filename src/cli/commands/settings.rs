//! Config inspection command.

use crate::config::{self, Config};

/// Print the active configuration or the config file location
pub fn cmd_config(config: &Config, show_path: bool, init: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if show_path {
        match &path {
            Some(path) => println!("{}", path.display()),
            None => anyhow::bail!("Could not determine config directory"),
        }
        return Ok(());
    }

    if init {
        config::save(config)?;
        if let Some(path) = &path {
            println!("Wrote {}", path.display());
        }
        return Ok(());
    }

    if let Some(path) = &path
        && path.exists()
    {
        println!("# {}", path.display());
    }
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
