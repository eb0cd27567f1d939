//! CLI logic for the Strata metamodel tool.
//!
//! This module contains the core CLI logic: load configuration, assemble the
//! declaration file and write the model report.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fs, io::Write};

use log::info;

use strata::{SchemaAssembler, StrataError, validation::BoundsValidation};

/// Run the Strata CLI application
///
/// Assembles the input declaration file and writes the model report to the
/// output file, or to stdout when no output path is given. `--eager`
/// overrides the configured bounds validation policy.
///
/// # Errors
///
/// Returns `StrataError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Invalid declaration files
/// - Assembly errors (duplicate or undeclared types, bound violations)
pub fn run(args: &Args) -> Result<(), StrataError> {
    info!(
        input_path = args.input,
        output_path:? = args.output;
        "Processing declarations"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if args.eager {
        info!("Bounds validation forced to eager");
        app_config = app_config.with_bounds_validation(BoundsValidation::Eager);
    }

    let source = fs::read_to_string(&args.input)?;

    let assembler = SchemaAssembler::new(app_config);
    let model = assembler.assemble(&source)?;
    let report = assembler.render_report(&model)?;

    match &args.output {
        Some(output) => {
            fs::write(output, report)?;
            info!(output_file = output; "Report written successfully");
        }
        None => std::io::stdout().write_all(report.as_bytes())?,
    }

    Ok(())
}
