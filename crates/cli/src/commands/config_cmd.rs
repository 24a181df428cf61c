//! `memoria config` — Configuration management commands.

use std::path::Path;

use memoria_config::{AppConfig, ConfigError};

pub fn validate(loaded: Result<AppConfig, ConfigError>) -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Validating configuration...");

    match loaded {
        Ok(config) => {
            println!("   ✅ Config parsed successfully");

            let mut warnings = Vec::new();
            let a = &config.assistant;

            if a.suggested_prompts.is_empty() {
                warnings.push("No suggested prompts — the chat screen will start without examples");
            }

            if a.latency_min_ms == a.latency_max_ms {
                warnings.push("Latency range is a single value — replies will always take the same time");
            }

            if warnings.is_empty() {
                println!("   ✅ All checks passed");
            } else {
                println!();
                for w in &warnings {
                    println!("   ⚠️  {w}");
                }
            }

            println!();
            println!("   Latency:   {}–{} ms", a.latency_min_ms, a.latency_max_ms);
            println!("   Prompts:   {}", a.suggested_prompts.len());
            println!("   Log level: {}", config.logging.level);
        }
        Err(e) => {
            println!("   ❌ Config error: {e}");
            return Err(e.into());
        }
    }

    Ok(())
}

pub fn show(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let toml_str = toml::to_string_pretty(config)?;
    println!("{toml_str}");
    Ok(())
}

pub fn path(overridden: Option<&Path>) {
    match overridden {
        Some(path) => println!("{}", path.display()),
        None => println!("{}", AppConfig::config_dir().join("config.toml").display()),
    }
}
