use crate::commands::SourceArgs;
use crate::config::{Config, Overrides};
use crate::error::Error;
use crate::writer::Writer;
use local_code_uri_template::Template;

pub(crate) trait Runner {
    /// Resolve the configuration for the command
    fn config(&self, source: &SourceArgs, overrides: Overrides) -> Result<Config, Error> {
        Config::load(source.config.as_deref(), Overrides {
            template: source.template.clone(),
            ..overrides
        })
        .map_err(|e| {
            self.error(
                Some("Invalid configuration"),
                Some("Check local-code-uri.toml and the command line flags."),
                Some(e),
            )
        })
    }

    /// Load the template the configuration points to
    fn template(&self, config: &Config) -> Result<Template, Error> {
        log::debug!("Loading template from {:?}", config.template);

        Template::from_path(&config.template).map_err(|e| {
            let description = format!("{e:#}");
            self.error(Some("Failed to load the template"), Some(&description), Some(e))
        })
    }

    /// Run the command
    ///
    /// Returns an error shown to the user in case of failure
    fn run(&mut self) -> Result<(), Error>;

    /// Construct an error shown to the user
    fn error(
        &self,
        title: Option<&str>,
        description: Option<&str>,
        origin: Option<eyre::Report>,
    ) -> Error {
        if let Some(origin) = origin {
            log::error!("{origin:?}");
        }

        if let Some(title) = title {
            Error::new(title, description)
        } else {
            Error::new("Failed to run the command", description)
        }
    }
}

/// Return a runner for a command
pub(crate) trait Runnable {
    fn runner(&self, writer: &Writer) -> impl Runner;
}
