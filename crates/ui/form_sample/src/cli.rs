// src/cli.rs
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "form_sample", version, about = "Configuration-driven form demo")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand)]
pub enum Cmd {
    /// Run the interactive form
    Run {
        /// Schema file (json5 / toml) with a top-level `fields` array
        #[arg(long)]
        schema: Option<PathBuf>,
        /// Title shown in the form frame
        #[arg(long, default_value = "Form sample")]
        title: String,
    },
    /// Print the form as HTML markup
    Html {
        #[arg(long)]
        schema: Option<PathBuf>,
    },
    /// Validate a schema file and list its fields
    Check {
        #[arg(long)]
        schema: Option<PathBuf>,
    },
}

impl Cli {
    pub fn schema_path(&self) -> Option<&Path> {
        match &self.cmd {
            Cmd::Run { schema, .. } | Cmd::Html { schema } | Cmd::Check { schema } => {
                schema.as_deref()
            }
        }
    }

    pub fn title(&self) -> String {
        match &self.cmd {
            Cmd::Run { title, .. } => title.clone(),
            _ => "Form sample".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_accepts_schema_and_title() {
        let cli = Cli::try_parse_from([
            "form_sample",
            "run",
            "--schema",
            "contact.toml",
            "--title",
            "Contact",
        ])
        .unwrap();
        assert_eq!(cli.schema_path(), Some(Path::new("contact.toml")));
        assert_eq!(cli.title(), "Contact");
    }

    #[test]
    fn html_without_schema() {
        let cli = Cli::try_parse_from(["form_sample", "html"]).unwrap();
        assert!(cli.schema_path().is_none());
        assert_eq!(cli.title(), "Form sample");
    }
}
