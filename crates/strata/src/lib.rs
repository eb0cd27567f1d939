//! Strata - declarative metamodel assembly.
//!
//! Loads metamodel declarations, assembles them in two phases (declare every
//! type, then resolve every cross-type relation) and renders a report of the
//! result. Models can also be declared in code through
//! [`schema::ModelBuilder`].

pub mod config;
pub mod declaration;

mod error;
mod report;

pub use strata_core::{identifier, name, occurs, reference, validation};
pub use strata_schema as schema;

pub use error::StrataError;

use log::{debug, info, trace};

use config::AppConfig;
use declaration::ModelDeclaration;
use schema::{Model, ModelBuilder};

/// Assembler for Strata declaration files.
///
/// # Examples
///
/// ```
/// use strata::{SchemaAssembler, config::AppConfig};
///
/// let source = r#"
///     name = "shop"
///
///     [[types]]
///     name = "Order"
///     [[types.collections]]
///     element = "LineItem"
///     required = true
///
///     [[types]]
///     name = "LineItem"
/// "#;
///
/// let assembler = SchemaAssembler::new(AppConfig::default());
/// let model = assembler.assemble(source).expect("Failed to assemble");
/// let report = assembler.render_report(&model).expect("Failed to render");
/// assert!(report.contains("+ LineItem [1..unbounded]"));
/// ```
#[derive(Debug, Default)]
pub struct SchemaAssembler {
    config: AppConfig,
}

impl SchemaAssembler {
    /// Create a new assembler with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse a declaration file without assembling it.
    ///
    /// # Errors
    ///
    /// Returns `StrataError::Declaration` if the source is not a valid
    /// declaration file.
    pub fn parse(&self, source: &str) -> Result<ModelDeclaration, StrataError> {
        info!("Parsing declarations");
        let declaration: ModelDeclaration = toml::from_str(source)
            .map_err(|err| StrataError::new_declaration_error(err, source))?;
        debug!(model:% = declaration.name(), types = declaration.types().len(); "Declarations parsed");
        Ok(declaration)
    }

    /// Parse and assemble a declaration file.
    ///
    /// # Errors
    ///
    /// Returns `StrataError` for invalid declaration files and for every
    /// assembly failure: duplicate declarations, undeclared types and, with
    /// eager bounds validation, bound violations.
    pub fn assemble(&self, source: &str) -> Result<Model, StrataError> {
        let declaration = self.parse(source)?;
        self.assemble_declaration(&declaration)
    }

    /// Assemble already parsed declarations.
    ///
    /// # Errors
    ///
    /// Returns `StrataError::Schema` for assembly failures.
    pub fn assemble_declaration(&self, declaration: &ModelDeclaration) -> Result<Model, StrataError> {
        let mut builder = ModelBuilder::with_config(
            declaration.name(),
            self.config.assembly().to_assembly_config(),
        );
        declaration.declare(&mut builder)?;

        info!(
            model:% = declaration.name(),
            pending_operations = builder.pending_operations();
            "Assembling model"
        );
        let model = builder.build()?;
        trace!(model:?; "Assembled model");

        Ok(model)
    }

    /// Render a text report of an assembled model.
    ///
    /// # Errors
    ///
    /// Returns `StrataError::Schema` if a collection's bounds are
    /// inconsistent.
    pub fn render_report(&self, model: &Model) -> Result<String, StrataError> {
        info!(model:% = model.name(); "Rendering report");
        Ok(report::render(model, self.config.report())?)
    }
}
