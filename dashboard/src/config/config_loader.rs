use std::path::PathBuf;

use anyhow::{Context, Result};
use subcentral::domain::value_objects::locales;
use tracing::warn;

use super::{
    config_model::{DotEnvyConfig, Export, Locale, Storage, UsagePrompt},
    stage::Stage,
};

pub const DEFAULT_FINISH_DELAY_MS: u64 = 2000;

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();
    load_from(|key| std::env::var(key).ok())
}

pub fn load_from<F>(lookup: F) -> Result<DotEnvyConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    let stage = match non_empty("STAGE") {
        Some(raw) => Stage::try_from(raw.as_str()).unwrap_or_else(|err| {
            warn!(error = %err, "config: falling back to local stage");
            Stage::default()
        }),
        None => Stage::default(),
    };

    let storage = Storage {
        data_dir: non_empty("SUBCENTRAL_DATA_DIR").map(PathBuf::from),
    };

    let usage_prompt = UsagePrompt {
        finish_delay_ms: match non_empty("USAGE_PROMPT_FINISH_DELAY_MS") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("USAGE_PROMPT_FINISH_DELAY_MS is invalid: {raw}"))?,
            None => DEFAULT_FINISH_DELAY_MS,
        },
    };

    let default_country = match non_empty("DEFAULT_COUNTRY") {
        Some(raw) => match locales::find_country(raw.trim()) {
            Some(country) => country.code.to_string(),
            None => {
                warn!(country = %raw, "config: unknown DEFAULT_COUNTRY, detecting instead");
                detected_country(&lookup)
            }
        },
        None => detected_country(&lookup),
    };

    let export = Export {
        csv_path: non_empty("EXPORT_CSV_PATH").map(PathBuf::from),
    };

    Ok(DotEnvyConfig {
        stage,
        storage,
        usage_prompt,
        locale: Locale { default_country },
        export,
    })
}

fn detected_country<F>(lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let language = lookup("LANG");
    let time_zone = lookup("TZ");
    locales::detect_country(language.as_deref(), time_zone.as_deref())
        .code
        .to_string()
}
