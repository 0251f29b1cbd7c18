use aging_effect::{AgingParams, Preset, codec::DEFAULT_JPEG_QUALITY};
use anyhow::{Context, Result, bail};
use derivative::Derivative;
use log::{debug, warn};
use platform_dirs::AppDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const APP_NAME: &str = "retro-studio";

#[derive(Serialize, Deserialize, Default, Debug, Clone)]
pub struct Config {
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(skip)]
    pub is_first_run: bool,

    /// Preset applied on top of the sliders, by name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,

    #[serde(default)]
    pub output: Output,

    /// Slider positions when a session starts
    #[serde(default)]
    pub sliders: AgingParams,
}

#[derive(Serialize, Deserialize, Debug, Clone, Derivative)]
#[derivative(Default)]
#[serde(default)]
pub struct Output {
    #[derivative(Default(value = "DEFAULT_JPEG_QUALITY"))]
    pub jpeg_quality: u8,

    /// Appended to the input file stem when no output path is given
    #[derivative(Default(value = "\"_retro\".to_string()"))]
    pub suffix: String,
}

impl Config {
    /// Loads the configuration from `path`, or from the platform config
    /// directory when no path is given.
    ///
    /// A missing or unreadable file is replaced by the defaults.
    pub fn init(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => default_config_path()?,
        };

        let mut config = Config {
            config_path,
            ..Default::default()
        };

        config.load().with_context(|| "load config file failed")?;
        debug!("{:?}", config);
        Ok(config)
    }

    /// The configured preset, if any.
    pub fn preset(&self) -> Result<Option<Preset>> {
        match &self.preset {
            Some(name) => Ok(Some(name.parse::<Preset>()?)),
            None => Ok(None),
        }
    }

    fn load(&mut self) -> Result<()> {
        if let Some(dir) = self.config_path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }

        match fs::read_to_string(&self.config_path) {
            Ok(text) => match toml::from_str::<Config>(&text) {
                Ok(mut c) => {
                    c.config_path = self.config_path.clone();
                    c.is_first_run = false;
                    *self = c;

                    Ok(())
                }
                Err(e) => {
                    warn!("{} is not a valid config: {e}", self.config_path.display());
                    self.is_first_run = true;

                    if let Some(bak_file) = &self.config_path.as_os_str().to_str() {
                        _ = fs::copy(&self.config_path, format!("{}.bak", bak_file));
                    }

                    self.save()
                }
            },
            Err(_) => {
                self.is_first_run = true;
                self.save()
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        match toml::to_string_pretty(self) {
            Ok(text) => Ok(fs::write(&self.config_path, text)
                .with_context(|| "save config failed".to_string())?),
            Err(e) => bail!(format!("convert config to toml format failed. {e:?}")),
        }
    }
}

fn default_config_path() -> Result<PathBuf> {
    let app_dirs =
        AppDirs::new(Some(APP_NAME), true).context("no config directory on this platform")?;
    Ok(app_dirs.config_dir.join(format!("{APP_NAME}.toml")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_run_writes_defaults() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested").join("retro-studio.toml");

        let config = Config::init(Some(path.as_path()))?;
        assert!(config.is_first_run);
        assert!(path.exists());
        assert_eq!(config.output.jpeg_quality, 95);
        assert_eq!(config.sliders, AgingParams::default());
        assert!(config.preset()?.is_none());

        let again = Config::init(Some(path.as_path()))?;
        assert!(!again.is_first_run);
        assert_eq!(again.sliders, config.sliders);

        Ok(())
    }

    #[test]
    fn test_partial_file_uses_defaults() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("retro-studio.toml");
        fs::write(
            &path,
            "preset = \"antique\"\n\n[sliders]\nage = 70\ntint = -40\n\n[output]\njpeg_quality = 80\n",
        )?;

        let config = Config::init(Some(path.as_path()))?;
        assert_eq!(config.output.jpeg_quality, 80);
        assert_eq!(config.output.suffix, "_retro");
        assert_eq!(config.sliders, AgingParams::new(70, 0, -40, 0, 15));
        assert_eq!(config.preset()?, Some(Preset::Antique));

        Ok(())
    }

    #[test]
    fn test_corrupt_file_is_backed_up() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("retro-studio.toml");
        fs::write(&path, "sliders = [[[ not toml")?;

        let config = Config::init(Some(path.as_path()))?;
        assert!(config.is_first_run);
        assert_eq!(config.sliders, AgingParams::default());

        let backup = dir.path().join("retro-studio.toml.bak");
        assert_eq!(fs::read_to_string(backup)?, "sliders = [[[ not toml");

        Ok(())
    }

    #[test]
    fn test_unknown_preset_is_an_error() {
        let config = Config {
            preset: Some("daguerreotype".to_string()),
            ..Default::default()
        };
        assert!(config.preset().is_err());
    }
}
