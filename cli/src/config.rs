use eyre::WrapErr;
use local_code_uri_template::{DEFAULT_CODE_URI, DEFAULT_FUNCTIONS};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Config file looked up in the current dir when no explicit path is given
pub(crate) const CONFIG_FILE_NAME: &str = "local-code-uri.toml";

/// Where the deployed template is copied to in the local invocation image
pub(crate) const DEFAULT_TEMPLATE_PATH: &str = "/usr/local/bin/template.yaml";

/// The structure of local-code-uri.toml
///
/// template = "/usr/local/bin/template.yaml"
/// code-uri = "./target/scala-2.13/app.jar"
/// functions = ["FormstackFormDeletionLambda"]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub(crate) struct ConfigFile {
    template: Option<PathBuf>,
    code_uri: Option<String>,
    functions: Option<Vec<String>>,
}

impl ConfigFile {
    /// Read the config file
    ///
    /// An explicitly passed path must exist. Otherwise local-code-uri.toml is read from the
    /// current dir, falling back to an empty config when it's not there.
    pub(crate) fn from_path(path: Option<&Path>) -> eyre::Result<Self> {
        match path {
            Some(path) => Self::read(path, true),
            None => Self::read(Path::new(CONFIG_FILE_NAME), false),
        }
    }

    /// Only a missing optional file falls back to the defaults, any other read error is reported
    fn read(path: &Path, is_required: bool) -> eyre::Result<Self> {
        let toml_string = match fs::read_to_string(path) {
            Ok(toml_string) => toml_string,
            Err(error) if error.kind() == ErrorKind::NotFound && !is_required => {
                log::debug!("No {path:?} found, using defaults");
                return Ok(Self::default());
            }
            Err(error) => {
                return Err(error).wrap_err_with(|| format!("Failed to read config file {path:?}"))
            }
        };

        toml::from_str(&toml_string).wrap_err_with(|| format!("Failed to parse {path:?}"))
    }
}

/// Values passed on the command line, they win over the config file
#[derive(Debug, Clone, Default)]
pub(crate) struct Overrides {
    pub(crate) template: Option<PathBuf>,
    pub(crate) code_uri: Option<String>,
    pub(crate) functions: Vec<String>,
}

/// Resolved configuration: flags, then config file, then built-in defaults
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Config {
    pub(crate) template: PathBuf,
    pub(crate) code_uri: String,
    pub(crate) functions: Vec<String>,
}

impl Config {
    pub(crate) fn load(path: Option<&Path>, overrides: Overrides) -> eyre::Result<Self> {
        let config = Self::resolve(ConfigFile::from_path(path)?, overrides);
        log::debug!("Resolved configuration: {config:?}");
        Ok(config)
    }

    pub(crate) fn resolve(file: ConfigFile, overrides: Overrides) -> Self {
        let functions = if !overrides.functions.is_empty() {
            overrides.functions
        } else {
            file.functions.unwrap_or_else(|| {
                DEFAULT_FUNCTIONS.iter().map(|f| f.to_string()).collect()
            })
        };

        Config {
            template: overrides
                .template
                .or(file.template)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE_PATH)),
            code_uri: overrides
                .code_uri
                .or(file.code_uri)
                .unwrap_or_else(|| DEFAULT_CODE_URI.to_string()),
            functions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults() {
        let config = Config::resolve(ConfigFile::default(), Overrides::default());

        assert_eq!(config.template, PathBuf::from("/usr/local/bin/template.yaml"));
        assert_eq!(config.code_uri, "./target/scala-2.13/app.jar");
        assert_eq!(
            config.functions,
            ["FormstackFormDeletionLambda", "FormstackSubmissionDeletionLambda"]
        );
    }

    #[test]
    fn file_overrides_defaults() {
        let file = config_file("code-uri = \"build/app.zip\"\nfunctions = [\"Api\"]\n");
        let config = Config::load(Some(file.path()), Overrides::default()).unwrap();

        assert_eq!(config.template, PathBuf::from(DEFAULT_TEMPLATE_PATH));
        assert_eq!(config.code_uri, "build/app.zip");
        assert_eq!(config.functions, ["Api"]);
    }

    #[test]
    fn flags_override_file() {
        let file = config_file("template = \"template.yaml\"\ncode-uri = \"build/app.zip\"\n");

        let config = Config::load(
            Some(file.path()),
            Overrides {
                code_uri: Some("target/app.jar".into()),
                functions: vec!["Worker".into()],
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(config.template, PathBuf::from("template.yaml"));
        assert_eq!(config.code_uri, "target/app.jar");
        assert_eq!(config.functions, ["Worker"]);
    }

    #[test]
    fn explicit_config_must_exist() {
        let error = ConfigFile::from_path(Some(Path::new("/nonexistent/local-code-uri.toml")))
            .unwrap_err();

        assert!(error.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn missing_optional_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigFile::read(&dir.path().join(CONFIG_FILE_NAME), false).unwrap();

        assert!(config.functions.is_none());
    }

    #[test]
    fn unreadable_optional_config_is_an_error() {
        // A directory in place of the file can't be read
        let dir = tempfile::tempdir().unwrap();
        let error = ConfigFile::read(dir.path(), false).unwrap_err();

        assert!(error.to_string().contains("Failed to read config file"));
        assert_eq!(error.chain().count(), 2, "{error:#}");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let file = config_file("artifact = \"app.jar\"\n");
        assert!(ConfigFile::from_path(Some(file.path())).is_err());
    }
}
