//! Config subcommands handler

use anyhow::Result;

use segtype::tui::current_theme;
use segtype::Config;

/// Show the effective configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show(config: &Config) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    let theme = current_theme();
    println!("{}", theme.primary_text(&toml_str));
    Ok(())
}

/// Print where the config file lives (whether or not it exists).
#[cfg(not(tarpaulin_include))]
pub fn handle_path() -> Result<()> {
    println!("{}", Config::config_path()?.display());
    Ok(())
}

/// Write the default config, leaving an existing file untouched.
#[cfg(not(tarpaulin_include))]
pub fn handle_init() -> Result<()> {
    let path = Config::config_path()?;
    let theme = current_theme();
    if path.exists() {
        println!(
            "{}",
            theme.secondary_text(&format!("Config already exists: {}", path.display()))
        );
        return Ok(());
    }

    Config::default().save()?;
    println!(
        "{}",
        theme.accent_text(&format!("Created {}", path.display()))
    );
    Ok(())
}
