use anyhow::{Context, ensure};
use clap::{ArgGroup, Parser, Subcommand};
use inquire::{Confirm, CustomType, Password, PasswordDisplayMode, Text};
use weather_core::{
    Config, ConditionTable, Icon, Location, ProviderId, load_weather,
    provider::{default_provider_from_config, provider_from_config},
};

use crate::format::{self, Layout};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather conditions for a fixed location")]
#[command(group(ArgGroup::new("layout").args(["short", "tiny", "one_line"])))]
#[command(group(ArgGroup::new("freshness").args(["force", "old"])))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Show the raw provider JSON (implies the full layout).
    #[arg(short, long)]
    pub debug: bool,

    /// Show weather icons and the provider's condition codes.
    #[arg(short = 'i', long = "icons")]
    pub show_icons: bool,

    /// Use saved data if it is less than 15 minutes old (default).
    #[arg(short = 'o', long)]
    pub old: bool,

    /// Force a refresh of data from the provider.
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Short output.
    #[arg(short = 's', long)]
    pub short: bool,

    /// Tiny output.
    #[arg(short = 't', long)]
    pub tiny: bool,

    /// Single colored line.
    #[arg(short = '1', long = "one-line")]
    pub one_line: bool,

    /// Provider to query instead of the configured default.
    #[arg(long)]
    pub provider: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure credentials and location for a specific provider.
    Configure {
        /// Provider short name, e.g. "openweather" or "weatherapi".
        provider: String,
    },
}

impl Cli {
    pub fn layout(&self) -> Layout {
        if self.debug {
            Layout::Full
        } else if self.short {
            Layout::Short
        } else if self.tiny {
            Layout::Tiny
        } else if self.one_line {
            Layout::OneLine
        } else {
            Layout::Full
        }
    }

    pub fn prefer_cache(&self) -> bool {
        !self.force
    }

    pub async fn run(self) -> anyhow::Result<()> {
        if let Some(Command::Configure { provider }) = &self.command {
            let id = ProviderId::try_from(provider.as_str())?;
            return configure(id);
        }

        let config = Config::load()?;
        let provider = match &self.provider {
            Some(name) => provider_from_config(ProviderId::try_from(name.as_str())?, &config)?,
            None => default_provider_from_config(&config)?,
        };

        tracing::debug!(provider = %provider.id(), "provider selected");

        if self.show_icons {
            print_icons(provider.conditions());
        }

        let record = load_weather(provider.as_ref(), self.prefer_cache(), self.debug).await?;

        for line in format::render(&record, self.layout()) {
            println!("{line}");
        }

        Ok(())
    }
}

fn configure(id: ProviderId) -> anyhow::Result<()> {
    let mut config = Config::load_from_disk()?;
    let current = config.location.clone();

    let api_key = Password::new(&format!("{id} API key:"))
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    ensure!(!api_key.trim().is_empty(), "API key must not be empty");

    let mut name = Text::new("Location name:");
    if let Some(loc) = &current {
        name = name.with_default(&loc.name);
    }
    let name = name.prompt().context("Failed to read location name")?;

    let latitude = prompt_degrees("Latitude:", current.as_ref().map(|l| l.latitude))?;
    ensure!((-90.0..=90.0).contains(&latitude), "Latitude must be between -90 and 90");
    let longitude = prompt_degrees("Longitude:", current.as_ref().map(|l| l.longitude))?;
    ensure!((-180.0..=180.0).contains(&longitude), "Longitude must be between -180 and 180");

    let postal_code = Text::new("Postal code (optional):")
        .prompt()
        .context("Failed to read postal code")?;

    let make_default = Confirm::new(&format!("Use {id} by default?"))
        .with_default(true)
        .prompt()
        .context("Failed to read confirmation")?;

    config.upsert_provider_api_key(id, api_key.trim().to_string());
    if make_default {
        config.set_default_provider(id);
    }
    config.location = Some(Location {
        name,
        latitude,
        longitude,
        postal_code: Some(postal_code.trim().to_string()).filter(|s| !s.is_empty()),
    });
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn prompt_degrees(message: &str, default: Option<f64>) -> anyhow::Result<f64> {
    let mut prompt =
        CustomType::<f64>::new(message).with_error_message("Please enter decimal degrees");
    if let Some(value) = default {
        prompt = prompt.with_default(value);
    }
    prompt.prompt().with_context(|| format!("Failed to read {message}"))
}

fn print_icons(table: &ConditionTable) {
    println!("Weather icons:");
    for icon in Icon::all() {
        println!("{:<13} = {}", icon.token(), format::colored_icon(*icon));
    }

    println!("\n{} condition codes:", table.provider());
    for c in table.entries() {
        if c.day == c.night {
            println!("id={} [{}] {}", c.code, c.group, c.day);
        } else {
            println!("id={} [{}] Day:({}) Night:({})", c.code, c.group, c.day, c.night);
        }
    }
}
