//! Configuration loading from files and the environment.
//!
//! Sources are layered: built-in defaults, then `tofu.yaml` (if present),
//! then `TOFU_*` environment variables with `__` separating nested keys,
//! e.g. `TOFU_SITE__TITLE` or `TOFU_SERVE__PORT`.

use std::path::{Path, PathBuf};

use super::{Config, ConfigError};
use crate::build::{base_path_from_config, normalize_path, resolve_path};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "tofu.yaml";

/// Prefix of environment variable overrides.
pub const ENV_PREFIX: &str = "TOFU";

impl Config {
    /// Load the config from the command line argument, defaulting to `tofu.yaml`
    pub fn load_from_arg(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config_file = config_file.unwrap_or(Path::new(CONFIG_FILE));
        let config_file = absolute_config_path(config_file)?;
        Self::load_from_file(&config_file)
    }

    /// Load the config from a file path. A missing file is not an error.
    pub(crate) fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(
                config::File::from(path)
                    .format(config::FileFormat::Yaml)
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate_paths(&base_path_from_config(path))?;
        Ok(config)
    }

    /// Check that clearing the output directory cannot delete site
    /// sources: it must not be, or contain, the config directory or the
    /// content, templates or static directories.
    ///
    /// Paths are compared after resolving against `base_path` and folding
    /// `.` and `..` components.
    pub fn validate_paths(&self, base_path: &Path) -> Result<(), ConfigError> {
        if self.paths.output.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "invalid config: 'paths.output' must not be empty".to_string(),
            ));
        }

        let base_path = if base_path.as_os_str().is_empty() {
            Path::new(".")
        } else {
            base_path
        };
        let base_path = std::path::absolute(base_path).map_err(ConfigError::CwdFailure)?;

        let resolve = |path: &Path| normalize_path(&resolve_path(&base_path, path));
        let output = resolve(&self.paths.output);
        let sources = [
            ("the site directory", normalize_path(&base_path)),
            ("'paths.content'", resolve(&self.paths.content)),
            ("'paths.templates'", resolve(&self.paths.templates)),
            ("'paths.static'", resolve(&self.paths.static_dir)),
        ];

        for (name, dir) in sources {
            if dir.starts_with(&output) {
                return Err(ConfigError::Validation(format!(
                    "invalid config: output directory '{}' would overwrite {name} ({})",
                    self.paths.output.display(),
                    dir.display()
                )));
            }
        }
        Ok(())
    }
}

/// Resolve a possibly relative config path against the working directory.
pub fn absolute_config_path(path: &Path) -> Result<PathBuf, ConfigError> {
    if path.is_relative() {
        Ok(std::env::current_dir()
            .map_err(ConfigError::CwdFailure)?
            .join(path))
    } else {
        Ok(path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from_file(&dir.path().join("tofu.yaml")).unwrap();

        assert_eq!(config.site.title, "Tofu's SSG");
        assert_eq!(config.site.base_url, "https://example.com");
        assert_eq!(config.paths.output, PathBuf::from("dist"));
        assert_eq!(config.serve.port, 1337);
        assert_eq!(config.markdown.extensions.len(), 7);
    }

    #[test]
    fn test_file_values_and_extra_site_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tofu.yaml");
        std::fs::write(
            &path,
            r#"
site:
  title: My Blog
  baseUrl: https://blog.example
  tagline: hello
paths:
  output: public
serve:
  port: 8080
"#,
        )
        .unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.site.title, "My Blog");
        assert_eq!(config.site.base_url, "https://blog.example");
        assert_eq!(
            config.site.extra.get("tagline"),
            Some(&serde_json::Value::String("hello".into()))
        );
        assert_eq!(config.site.description, "Static site generator from markdown files for a blog.");
        assert_eq!(config.paths.output, PathBuf::from("public"));
        assert_eq!(config.paths.content, PathBuf::from("content"));
        assert_eq!(config.serve.port, 8080);
    }

    #[test]
    fn test_site_serializes_with_template_keys() {
        let site = serde_json::to_value(&crate::config::SiteConfig::default()).unwrap();
        assert_eq!(site["baseUrl"], "https://example.com");
        assert!(site.get("base_url").is_none());
    }

    fn output_error(output: &str) -> Option<ConfigError> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tofu.yaml");
        std::fs::write(&path, format!("paths:\n  output: \"{output}\"\n")).unwrap();
        Config::load_from_file(&path).err()
    }

    #[test]
    fn test_rejects_output_over_sources() {
        for output in ["content", "./content", "templates/../content", "static", "./templates/"] {
            assert!(
                matches!(output_error(output), Some(ConfigError::Validation(_))),
                "{output} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_output_containing_site_directory() {
        for output in [".", "./", "..", "../..", "dist/..", "/"] {
            assert!(
                matches!(output_error(output), Some(ConfigError::Validation(_))),
                "{output} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_parent_of_sources_by_absolute_path() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        let mut parent = config.clone();
        parent.paths.output = dir.path().to_path_buf();
        assert!(parent.validate_paths(&dir.path().join("site")).is_err());

        let mut content = config;
        content.paths.output = dir.path().join("site/content");
        assert!(content.validate_paths(&dir.path().join("site")).is_err());
    }

    #[test]
    fn test_accepts_separate_output_directories() {
        for output in ["dist", "./public", "content/../dist", "build/site", "content/preview"] {
            assert!(output_error(output).is_none(), "{output} should be accepted");
        }
    }

    #[test]
    fn test_relative_base_path_is_resolved() {
        let mut config = Config::default();
        config.paths.output = PathBuf::from("..");
        assert!(config.validate_paths(Path::new("")).is_err());
        config.paths.output = PathBuf::from("dist");
        assert!(config.validate_paths(Path::new("")).is_ok());
    }
}
