use crate::commands::SourceArgs;
use crate::config::Overrides;
use crate::error::Error;
use crate::runner::{Runnable, Runner};
use crate::writer::Writer;
use local_code_uri_template::Patch;

#[derive(clap::Args, Clone, Debug, Default)]
pub(crate) struct PatchCommand {
    #[command(flatten)]
    source: SourceArgs,

    /// Logical name of a function resource to patch, repeat the flag or separate names with commas
    ///
    /// Defaults to FormstackFormDeletionLambda,FormstackSubmissionDeletionLambda
    #[arg(short, long = "function", value_name = "NAME", value_delimiter = ',')]
    functions: Vec<String>,

    /// Path to the local build artifact [default: ./target/scala-2.13/app.jar]
    #[arg(short, long, value_name = "PATH")]
    code_uri: Option<String>,

    /// Patch every function resource found in the template
    #[arg(short, long, conflicts_with = "functions")]
    all_functions: bool,

    /// Write intrinsic functions in their long form, e.g. "Fn::Sub:" instead of "!Sub"
    #[arg(short, long)]
    long_form: bool,
}

impl Runnable for PatchCommand {
    fn runner(&self, writer: &Writer) -> impl Runner {
        PatchRunner {
            command: self.clone(),
            writer,
        }
    }
}

struct PatchRunner<'a> {
    command: PatchCommand,
    writer: &'a Writer,
}

impl PatchRunner<'_> {
    /// The template with the CodeUri of functions pointed at the local artifact, as YAML
    fn patched_template(&self) -> Result<String, Error> {
        let config = self.config(
            &self.command.source,
            Overrides {
                code_uri: self.command.code_uri.clone(),
                functions: self.command.functions.clone(),
                ..Default::default()
            },
        )?;

        let mut template = self.template(&config)?;

        let functions = if self.command.all_functions {
            template
                .functions()
                .map_err(|e| {
                    let description = format!("{e:#}");
                    self.error(Some("Failed to find functions"), Some(&description), Some(e))
                })?
                .into_iter()
                .map(|function| function.name)
                .collect()
        } else {
            config.functions.clone()
        };

        Patch::new(functions, &config.code_uri)
            .apply(&mut template)
            .map_err(|e| {
                let description = format!("{e:#}");
                self.error(Some("Failed to patch the template"), Some(&description), Some(e))
            })?;

        if self.command.long_form {
            template.into_long_form();
        }

        Ok(template.to_yaml()?)
    }
}

impl Runner for PatchRunner<'_> {
    /// Print the patched template
    ///
    /// Nothing is printed to stdout unless every function is patched.
    fn run(&mut self) -> Result<(), Error> {
        let yaml = self.patched_template()?;
        self.writer.text(&yaml)
    }
}
