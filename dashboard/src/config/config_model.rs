use std::path::PathBuf;

use super::stage::Stage;

#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub stage: Stage,
    pub storage: Storage,
    pub usage_prompt: UsagePrompt,
    pub locale: Locale,
    pub export: Export,
}

#[derive(Debug, Clone)]
pub struct Storage {
    /// `None` keeps everything in memory for the lifetime of the process.
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct UsagePrompt {
    pub finish_delay_ms: u64,
}

#[derive(Debug, Clone)]
pub struct Locale {
    pub default_country: String,
}

#[derive(Debug, Clone)]
pub struct Export {
    pub csv_path: Option<PathBuf>,
}
