use crate::commands::SourceArgs;
use crate::config::Overrides;
use crate::error::Error;
use crate::runner::{Runnable, Runner};
use crate::writer::Writer;
use eyre::WrapErr;
use local_code_uri_template::Function;
use tabled::settings::style::Style;
use tabled::{Table, Tabled};

#[derive(Tabled, Clone)]
struct FunctionRow {
    #[tabled(rename = "Resource")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "CodeUri")]
    code_uri: String,
}

impl From<Function> for FunctionRow {
    fn from(function: Function) -> Self {
        FunctionRow {
            name: function.name,
            kind: function.kind,
            code_uri: function.code_uri.unwrap_or_else(|| "NA".into()),
        }
    }
}

#[derive(clap::Args, Clone, Debug, Default)]
pub(crate) struct ListCommand {
    #[command(flatten)]
    source: SourceArgs,

    /// Print the list as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

impl Runnable for ListCommand {
    fn runner(&self, writer: &Writer) -> impl Runner {
        ListRunner {
            command: self.clone(),
            writer,
        }
    }
}

struct ListRunner<'a> {
    command: ListCommand,
    writer: &'a Writer,
}

impl Runner for ListRunner<'_> {
    /// Prints out function resources of the template with their code location
    fn run(&mut self) -> Result<(), Error> {
        let config = self.config(&self.command.source, Overrides::default())?;
        let template = self.template(&config)?;

        let functions = template.functions().map_err(|e| {
            let description = format!("{e:#}");
            self.error(Some("Failed to find functions"), Some(&description), Some(e))
        })?;

        if self.writer.is_structured() {
            let json = serde_json::to_value(&functions)
                .wrap_err("Failed to serialize the list of functions")?;

            return self.writer.json(json);
        }

        if functions.is_empty() {
            return self.writer.text(&format!(
                "{}\n",
                console::style("No functions found").yellow()
            ));
        }

        let mut table = Table::new(functions.into_iter().map(FunctionRow::from));
        table.with(Style::modern());

        self.writer.text(&format!("{table}\n"))
    }
}
