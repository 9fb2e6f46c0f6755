//! Configuration management.

use clap::Subcommand;

use hafiz_core::review::{GradingScale, SessionMode};
use hafiz_core::Config;

use super::CmdResult;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the full configuration as TOML
    Show,
    /// Print one value
    Get { key: String },
    /// Set one value and save
    Set { key: String, value: String },
    /// Print the configuration file path
    Path,
}

pub fn run(action: ConfigAction) -> CmdResult {
    match action {
        ConfigAction::Show => {
            let config = Config::load()?;
            print!("{}", toml_string(&config)?);
            Ok(())
        }
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            println!("{}", get(&config, &key)?);
            Ok(())
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            set(&mut config, &key, &value)?;
            config.save()?;
            println!("{key} = {}", get(&config, &key)?);
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", Config::path()?.display());
            Ok(())
        }
    }
}

fn toml_string(config: &Config) -> Result<String, Box<dyn std::error::Error>> {
    Ok(toml::to_string_pretty(config)?)
}

fn get(config: &Config, key: &str) -> Result<String, Box<dyn std::error::Error>> {
    let value = match key {
        "api.base_url" => config.api.base_url.clone(),
        "api.timeout_secs" => config.api.timeout_secs.to_string(),
        "review.timer_secs" => config.review.timer_secs.to_string(),
        "review.batch_size" => config.review.batch_size.to_string(),
        "review.mode" => match config.review.mode {
            SessionMode::Quiz => "quiz".into(),
            SessionMode::Plain => "plain".into(),
        },
        "review.scale" => match config.review.scale {
            GradingScale::ThreePoint => "three_point".into(),
            GradingScale::FivePoint => "five_point".into(),
        },
        "review.sound" => config.review.sound.to_string(),
        "stats.heatmap_months" => config.stats.heatmap_months.to_string(),
        _ => return Err(format!("unknown key: {key}").into()),
    };
    Ok(value)
}

fn set(config: &mut Config, key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
    match key {
        "api.base_url" => config.api.base_url = value.to_string(),
        "api.timeout_secs" => config.api.timeout_secs = value.parse()?,
        "review.timer_secs" => config.review.timer_secs = value.parse()?,
        "review.batch_size" => config.review.batch_size = value.parse()?,
        "review.mode" => {
            config.review.mode = match value {
                "quiz" => SessionMode::Quiz,
                "plain" => SessionMode::Plain,
                _ => return Err(format!("mode must be 'quiz' or 'plain', got {value:?}").into()),
            }
        }
        "review.scale" => {
            config.review.scale = match value {
                "three_point" => GradingScale::ThreePoint,
                "five_point" => GradingScale::FivePoint,
                _ => {
                    return Err(format!(
                        "scale must be 'three_point' or 'five_point', got {value:?}"
                    )
                    .into())
                }
            }
        }
        "review.sound" => config.review.sound = value.parse()?,
        "stats.heatmap_months" => config.stats.heatmap_months = value.parse()?,
        _ => return Err(format!("unknown key: {key}").into()),
    }
    Ok(())
}
