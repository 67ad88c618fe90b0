pub(crate) mod list;
pub(crate) mod patch;
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Point CodeUri of function resources at the local artifact and print the template
    Patch(patch::PatchCommand),

    /// List function resources of the template and their current code location
    List(list::ListCommand),
}

impl Commands {
    /// Whether the command prints JSON rather than plain text
    pub(crate) fn is_structured(&self) -> bool {
        match self {
            Commands::List(command) => command.json,
            Commands::Patch(_) => false,
        }
    }
}

/// Where to read the template and the config from
#[derive(clap::Args, Clone, Debug, Default)]
pub(crate) struct SourceArgs {
    /// Path to the deployed template [default: /usr/local/bin/template.yaml]
    #[arg(short, long, value_name = "PATH")]
    pub(crate) template: Option<PathBuf>,

    /// Path to the config file [default: ./local-code-uri.toml, if present]
    #[arg(long, value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,
}
