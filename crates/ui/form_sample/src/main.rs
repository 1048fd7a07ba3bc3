mod action;
mod app;
mod cli;
mod config;
mod errors;
mod logging;
mod sample;
mod tui;
mod ui;

use crate::app::App;
use crate::cli::{Cli, Cmd};
use crate::ui::Palette;

use clap::Parser;
use color_eyre::Result;

pub fn main() -> Result<()> {
    let args = Cli::parse();
    crate::errors::init()?;
    crate::logging::init()?;

    let cfg = config::Config::new()?;
    let schema_path = args.schema_path().or(cfg.schema.as_deref());
    let form = sample::build_form(schema_path, &cfg)?;

    match args.cmd {
        Cmd::Run { .. } => {
            let palette = Palette::with_classes(&cfg.class_styles);
            let mut app = App::new(form, palette, args.title());
            app.run()?;
        }
        Cmd::Html { .. } => {
            print!("{}", form::render_html(&form));
        }
        Cmd::Check { .. } => {
            for field in form.schema().fields() {
                let rules: Vec<&str> = field.validators.iter().map(|r| r.kind()).collect();
                println!(
                    "{:<16} {:<9} {:<24} [{}]",
                    field.property,
                    field.kind,
                    field.label,
                    rules.join(", ")
                );
            }
        }
    }
    Ok(())
}
