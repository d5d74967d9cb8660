use crate::config;
use crate::error::{Error, Result};
use anyhow::Context;
use clap::Subcommand;
use sha2::{Digest, Sha256};
use std::path::Path;
use std::process::Command;

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,

    /// Print the config file location
    Path,

    /// Open the config file in $VISUAL / $EDITOR and validate it on save
    Edit,
}

pub async fn run(command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            let config = config::load()?;
            let content = toml::to_string_pretty(&config)
                .map_err(|e| Error::ConfigError(e.to_string()))?;
            print!("{}", content);
            println!("# effective API url: {}", config.api_url());
            Ok(())
        }
        ConfigCommand::Path => {
            println!("{}", config::config_path()?.display());
            Ok(())
        }
        ConfigCommand::Edit => edit(),
    }
}

/// Priority: VISUAL > EDITOR > vi
fn get_editor() -> String {
    std::env::var("VISUAL")
        .or_else(|_| std::env::var("EDITOR"))
        .unwrap_or_else(|_| "vi".to_string())
}

fn hash_file(path: &Path) -> anyhow::Result<String> {
    let content = std::fs::read(path)
        .with_context(|| format!("Failed to read file for hashing: {}", path.display()))?;
    Ok(hex::encode(Sha256::digest(&content)))
}

fn open_editor(editor: &str, path: &Path) -> Result<()> {
    let status = Command::new(editor)
        .arg(path)
        .status()
        .with_context(|| format!("Failed to run editor: {}", editor))?;

    if !status.success() {
        return Err(Error::ConfigError(format!(
            "Editor exited with error status: {}",
            status
        )));
    }
    Ok(())
}

fn edit() -> Result<()> {
    config::ensure_config_dir().map_err(|e| Error::ConfigError(e.to_string()))?;
    let config_path = config::config_path().map_err(|e| Error::ConfigError(e.to_string()))?;

    if !config_path.exists() {
        config::save_default().map_err(|e| Error::ConfigError(e.to_string()))?;
        println!("Created default config at: {}", config_path.display());
    }

    let hash_before = hash_file(&config_path)?;
    let editor = get_editor();
    open_editor(&editor, &config_path)?;

    if hash_file(&config_path)? == hash_before {
        println!("No changes made to config");
        return Ok(());
    }

    // Keep reopening until the file loads or the user gives up
    loop {
        let Err(e) = config::load() else {
            break;
        };
        eprintln!("\nConfig is invalid: {:#}", e);

        if !std::io::IsTerminal::is_terminal(&std::io::stdin()) {
            return Err(Error::ConfigError(format!(
                "Config is invalid. Please fix manually: {}",
                config_path.display()
            )));
        }

        let answer = crate::cli::prompt("Edit again? [Y/n] ")?;
        if answer.trim().eq_ignore_ascii_case("n") {
            return Err(Error::ConfigError("Config left invalid".to_string()));
        }
        open_editor(&editor, &config_path)?;
    }

    println!("Config saved and validated: {}", config_path.display());
    Ok(())
}
