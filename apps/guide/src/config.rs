use std::{
    fs,
    path::PathBuf,
};

use anyhow::Context;
use calculator::SectorTable;
use serde::Deserialize;
use shared::domain::Section;

pub const CONFIG_FILE: &str = "guide.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SectionConfig {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub database_url: String,
    /// Replacement for the bundled `sectores-cct.json`.
    pub sectors_path: Option<PathBuf>,
    pub base_url: String,
    pub log_filter: String,
    pub sections: Vec<SectionConfig>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: "sqlite://./data/guide.db".into(),
            sectors_path: None,
            base_url: "https://facttic.github.io/guiareforma/".into(),
            log_filter: "info".into(),
            sections: default_sections(),
        }
    }
}

impl Settings {
    pub fn sections(&self) -> Vec<Section> {
        self.sections
            .iter()
            .enumerate()
            .map(|(order, section)| Section::new(section.id.clone(), order, section.title.clone()))
            .collect()
    }

    pub fn sector_table(&self) -> anyhow::Result<SectorTable> {
        let Some(path) = &self.sectors_path else {
            return SectorTable::bundled().context("bundled sector table is invalid");
        };
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read sector table '{}'", path.display()))?;
        SectorTable::from_json(&raw)
            .with_context(|| format!("invalid sector table '{}'", path.display()))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    database_url: Option<String>,
    sectors_path: Option<PathBuf>,
    base_url: Option<String>,
    log: Option<String>,
    sections: Option<Vec<SectionConfig>>,
}

fn default_sections() -> Vec<SectionConfig> {
    [
        ("hero", "La reforma laboral"),
        ("que-cambia", "Qué cambia"),
        ("formulario", "Tus datos"),
        ("indemnizacion", "Indemnización"),
        ("horas-extra", "Horas extra"),
        ("periodo-prueba", "Período de prueba"),
        ("vacaciones", "Vacaciones"),
        ("cuota-sindical", "Cuota sindical"),
        ("resumen", "Tu resumen"),
    ]
    .into_iter()
    .map(|(id, title)| SectionConfig {
        id: id.into(),
        title: title.into(),
    })
    .collect()
}

/// Defaults, then `guide.toml` in the working directory, then environment.
pub fn load_settings() -> anyhow::Result<Settings> {
    let file = match fs::read_to_string(CONFIG_FILE) {
        Ok(raw) => Some(raw),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => None,
        Err(error) => {
            return Err(error).with_context(|| format!("failed to read {CONFIG_FILE}"));
        }
    };
    resolve_settings(file.as_deref(), |key| std::env::var(key).ok())
}

pub fn resolve_settings(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        let file_cfg: FileSettings =
            toml::from_str(raw).with_context(|| format!("invalid {CONFIG_FILE}"))?;
        if let Some(v) = file_cfg.database_url {
            settings.database_url = v;
        }
        if let Some(v) = file_cfg.sectors_path {
            settings.sectors_path = Some(v);
        }
        if let Some(v) = file_cfg.base_url {
            settings.base_url = v;
        }
        if let Some(v) = file_cfg.log {
            settings.log_filter = v;
        }
        if let Some(v) = file_cfg.sections {
            anyhow::ensure!(!v.is_empty(), "{CONFIG_FILE} lists no sections");
            settings.sections = v;
        }
    }

    if let Some(v) = env("GUIDE_DATABASE_URL") {
        settings.database_url = v;
    }
    if let Some(v) = env("APP__DATABASE_URL") {
        settings.database_url = v;
    }
    if let Some(v) = env("GUIDE_SECTORS_PATH") {
        settings.sectors_path = Some(PathBuf::from(v));
    }
    if let Some(v) = env("GUIDE_BASE_URL") {
        settings.base_url = v;
    }
    if let Some(v) = env("GUIDE_LOG") {
        settings.log_filter = v;
    }

    Ok(settings)
}

/// Accepts plain file paths and `sqlite:` shorthands; the store creates
/// the parent directory when it opens the file.
pub fn normalize_database_url(raw_database_url: &str) -> String {
    let raw_database_url = raw_database_url.trim();

    if raw_database_url.is_empty() {
        return Settings::default().database_url;
    }

    if raw_database_url.starts_with("sqlite::memory:")
        || raw_database_url.starts_with("sqlite://")
        || raw_database_url.contains("://")
    {
        return raw_database_url.to_string();
    }

    if let Some(path) = raw_database_url.strip_prefix("sqlite:") {
        let path = path.replace('\\', "/");
        return format!("sqlite://{path}");
    }

    format!("sqlite://{}", raw_database_url.replace('\\', "/"))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
