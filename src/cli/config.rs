//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::export::ResourceLayout;

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default output directory
    pub output: Option<PathBuf>,

    /// Resource extensions rewritten to .png
    pub png_extensions: Vec<String>,

    /// Where resource files are placed
    pub resource_layout: Option<ResourceLayout>,

    /// Notebook names never exported
    pub exclude: Vec<String>,
}

impl Config {
    /// Load configuration from `path`, or the default location when `None`.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = path.map_or_else(Self::config_path, Path::to_path_buf);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/quiver-md/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("quiver-md")
            .join("config.toml")
    }

    /// Resolve the output directory, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--output` argument
    /// 2. Config file `output` setting
    /// 3. `<library name>-markdown` next to the library
    pub fn output_dir(&self, cli_output: Option<&PathBuf>, library: &Path) -> PathBuf {
        cli_output
            .cloned()
            .or_else(|| self.output.clone())
            .unwrap_or_else(|| default_output_dir(library))
    }

    /// CLI extensions when given, otherwise the configured ones.
    pub fn png_extensions(&self, cli: &[String]) -> Vec<String> {
        if cli.is_empty() {
            self.png_extensions.clone()
        } else {
            cli.to_vec()
        }
    }

    pub fn resource_layout(&self, cli: Option<ResourceLayout>) -> ResourceLayout {
        cli.or(self.resource_layout).unwrap_or_default()
    }

    /// Configured exclusions plus any given on the command line.
    pub fn exclude(&self, cli: &[String]) -> Vec<String> {
        let mut names = self.exclude.clone();
        names.extend(cli.iter().filter(|n| !self.exclude.contains(n)).cloned());
        names
    }
}

fn default_output_dir(library: &Path) -> PathBuf {
    let stem = library
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "library".to_string());
    library
        .parent()
        .unwrap_or(Path::new("."))
        .join(format!("{stem}-markdown"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn default_config_is_empty() {
        let config = Config::default();
        assert!(config.output.is_none());
        assert!(config.png_extensions.is_empty());
        assert_eq!(config.resource_layout(None), ResourceLayout::Note);
    }

    #[test]
    fn output_dir_prefers_cli_arg() {
        let config = Config {
            output: Some(PathBuf::from("/config/out")),
            ..Config::default()
        };
        let cli = PathBuf::from("/cli/out");
        assert_eq!(
            config.output_dir(Some(&cli), Path::new("lib.qvlibrary")),
            PathBuf::from("/cli/out")
        );
        assert_eq!(
            config.output_dir(None, Path::new("lib.qvlibrary")),
            PathBuf::from("/config/out")
        );
    }

    #[test]
    fn output_dir_defaults_next_to_library() {
        let config = Config::default();
        assert_eq!(
            config.output_dir(None, Path::new("/home/me/Quiver.qvlibrary")),
            PathBuf::from("/home/me/Quiver-markdown")
        );
    }

    #[test]
    fn cli_values_take_precedence() {
        let config = Config {
            png_extensions: vec!["tiff".into()],
            resource_layout: Some(ResourceLayout::Library),
            exclude: vec!["Trash".into()],
            ..Config::default()
        };
        assert_eq!(config.png_extensions(&[]), vec!["tiff"]);
        assert_eq!(config.png_extensions(&["heic".into()]), vec!["heic"]);
        assert_eq!(config.resource_layout(Some(ResourceLayout::Note)), ResourceLayout::Note);
        assert_eq!(
            config.exclude(&["Inbox".into(), "Trash".into()]),
            vec!["Trash", "Inbox"]
        );
    }

    #[test]
    fn loads_toml_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "png_extensions = [\"tiff\"]\nresource_layout = \"library\"\nexclude = [\"Trash\"]\n",
        )
        .unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.png_extensions, vec!["tiff"]);
        assert_eq!(config.resource_layout, Some(ResourceLayout::Library));
        assert_eq!(config.exclude, vec!["Trash"]);
    }

    #[test]
    fn missing_file_yields_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(Some(&dir.path().join("none.toml"))).unwrap();
        assert!(config.exclude.is_empty());
    }

    #[test]
    fn config_path_is_in_config_dir() {
        let path = Config::config_path();
        assert!(path.ends_with("quiver-md/config.toml"));
    }
}
