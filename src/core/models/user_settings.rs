use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::global_constants;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeMode::Dark => write!(f, "Dark"),
            ThemeMode::Light => write!(f, "Light"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum UpscaleFilter {
    #[default]
    Nearest,
    Lanczos3,
}

impl From<UpscaleFilter> for image::imageops::FilterType {
    fn from(filter: UpscaleFilter) -> Self {
        match filter {
            UpscaleFilter::Nearest => image::imageops::FilterType::Nearest,
            UpscaleFilter::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PreprocessSettings {
    pub grayscale: bool,
    pub auto_contrast: bool,
    pub auto_contrast_cutoff_percent: f32,
    pub threshold: u8,
    pub upscale_factor: u32,
    pub upscale_filter: UpscaleFilter,
}

impl Default for PreprocessSettings {
    fn default() -> Self {
        Self {
            grayscale: true,
            auto_contrast: false,
            auto_contrast_cutoff_percent: global_constants::DEFAULT_AUTO_CONTRAST_CUTOFF_PERCENT,
            threshold: global_constants::DEFAULT_THRESHOLD,
            upscale_factor: global_constants::DEFAULT_UPSCALE_FACTOR,
            upscale_filter: UpscaleFilter::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OcrSettings {
    pub language: String,
    pub engine_mode: u8,
    pub page_segmentation_mode: u8,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            language: global_constants::DEFAULT_OCR_LANGUAGE.to_string(),
            engine_mode: global_constants::DEFAULT_OCR_ENGINE_MODE,
            page_segmentation_mode: global_constants::DEFAULT_PAGE_SEGMENTATION_MODE,
        }
    }
}

impl OcrSettings {
    pub fn to_engine_args(&self) -> Vec<String> {
        vec![
            "-l".to_string(),
            self.language.clone(),
            "--oem".to_string(),
            self.engine_mode.to_string(),
            "--psm".to_string(),
            self.page_segmentation_mode.to_string(),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    pub theme_mode: ThemeMode,
    pub engine_path: Option<PathBuf>,
    pub ocr: OcrSettings,
    pub preprocessing: PreprocessSettings,
    pub min_selection_size: u32,
    pub capture_delay_ms: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme_mode: ThemeMode::default(),
            engine_path: None,
            ocr: OcrSettings::default(),
            preprocessing: PreprocessSettings::default(),
            min_selection_size: global_constants::DEFAULT_MIN_SELECTION_SIZE,
            capture_delay_ms: global_constants::DEFAULT_CAPTURE_DELAY_MS,
        }
    }
}

impl AppSettings {
    pub fn load() -> anyhow::Result<Self> {
        let settings_path = Self::get_settings_file_path()?;
        Self::load_from(&settings_path)
    }

    fn load_from(settings_path: &Path) -> anyhow::Result<Self> {
        if !settings_path.exists() {
            log::info!("[SETTINGS] No settings file found, using defaults");
            let default_settings = Self::default();
            default_settings.save_to(settings_path)?;
            return Ok(default_settings);
        }

        let contents = std::fs::read_to_string(settings_path)
            .with_context(|| format!("Failed to read settings from {:?}", settings_path))?;
        let settings: AppSettings = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings in {:?}", settings_path))?;

        log::info!("[SETTINGS] Loaded settings from {:?}", settings_path);
        log::debug!("[SETTINGS] Preprocessing: {:?}", settings.preprocessing);
        log::debug!("[SETTINGS] Engine path override: {:?}", settings.engine_path);

        Ok(settings)
    }

    fn save_to(&self, settings_path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = settings_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {:?}", parent))?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(settings_path, contents)
            .with_context(|| format!("Failed to write settings to {:?}", settings_path))?;

        log::info!("[SETTINGS] Saved settings to {:?}", settings_path);
        Ok(())
    }

    fn get_settings_file_path() -> anyhow::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join(global_constants::APPLICATION_DIR_NAME);

        Ok(config_dir.join(global_constants::SETTINGS_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_mode_default_is_dark() {
        assert_eq!(ThemeMode::default(), ThemeMode::Dark);
    }

    #[test]
    fn test_app_settings_default_values() {
        let settings = AppSettings::default();

        assert_eq!(settings.theme_mode, ThemeMode::Dark);
        assert!(settings.engine_path.is_none());
        assert!(settings.preprocessing.grayscale);
        assert!(!settings.preprocessing.auto_contrast);
        assert_eq!(settings.preprocessing.threshold, 150);
        assert_eq!(settings.preprocessing.upscale_factor, 2);
        assert_eq!(settings.preprocessing.upscale_filter, UpscaleFilter::Nearest);
        assert_eq!(settings.min_selection_size, 5);
        assert_eq!(settings.capture_delay_ms, 200);
    }

    #[test]
    fn test_default_engine_args_match_single_block_english() {
        let args = OcrSettings::default().to_engine_args();

        assert_eq!(args, vec!["-l", "eng", "--oem", "3", "--psm", "6"]);
    }

    #[test]
    fn test_deserialization_fills_missing_fields_with_defaults() {
        let json = r#"{
            "theme_mode": "Light",
            "preprocessing": { "threshold": 120 }
        }"#;

        let settings: AppSettings = serde_json::from_str(json).unwrap();

        assert_eq!(settings.theme_mode, ThemeMode::Light);
        assert_eq!(settings.preprocessing.threshold, 120);
        assert_eq!(settings.preprocessing.upscale_factor, 2);
        assert_eq!(settings.ocr.language, "eng");
    }

    #[test]
    fn test_load_from_missing_file_writes_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let settings_path = temp_dir.path().join("nested").join("settings.json");

        let settings = AppSettings::load_from(&settings_path).unwrap();

        assert_eq!(settings, AppSettings::default());
        assert!(settings_path.exists());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let settings_path = temp_dir.path().join("settings.json");

        let mut original_settings = AppSettings::default();
        original_settings.engine_path = Some(PathBuf::from("/opt/tesseract/bin/tesseract"));
        original_settings.preprocessing.auto_contrast = true;
        original_settings.preprocessing.upscale_filter = UpscaleFilter::Lanczos3;
        original_settings.save_to(&settings_path).unwrap();

        let loaded_settings = AppSettings::load_from(&settings_path).unwrap();

        assert_eq!(loaded_settings, original_settings);
    }

    #[test]
    fn test_load_from_invalid_json_fails_with_context() {
        let temp_dir = tempfile::tempdir().unwrap();
        let settings_path = temp_dir.path().join("settings.json");
        std::fs::write(&settings_path, "{ not json").unwrap();

        let error = AppSettings::load_from(&settings_path).unwrap_err();

        assert!(error.to_string().contains("Failed to parse settings"));
    }
}
