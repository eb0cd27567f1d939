//! Configuration types for Strata model assembly.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from
//! external sources such as a TOML file.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining assembly and report settings.
//! - [`AssemblySection`] - Controls when collection bounds are validated.
//! - [`ReportConfig`] - Controls what the model report shows.
//!
//! # Example
//!
//! ```
//! # use strata::config::AppConfig;
//! let config: AppConfig = toml::from_str(
//!     r#"
//!     [assembly]
//!     bounds_validation = "eager"
//!     "#,
//! ).expect("valid configuration");
//!
//! assert!(config.assembly().bounds_validation().is_eager());
//! assert!(config.report().show_references());
//! ```

use serde::Deserialize;

use strata_core::validation::BoundsValidation;
use strata_schema::AssemblyConfig;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Assembly configuration section.
    #[serde(default)]
    assembly: AssemblySection,

    /// Report configuration section.
    #[serde(default)]
    report: ReportConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(assembly: AssemblySection, report: ReportConfig) -> Self {
        Self { assembly, report }
    }

    /// Returns the assembly configuration.
    pub fn assembly(&self) -> &AssemblySection {
        &self.assembly
    }

    /// Returns the report configuration.
    pub fn report(&self) -> &ReportConfig {
        &self.report
    }

    /// Replaces the configured bounds validation policy.
    pub fn with_bounds_validation(mut self, bounds_validation: BoundsValidation) -> Self {
        self.assembly = AssemblySection::new(bounds_validation);
        self
    }
}

/// Assembly settings.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssemblySection {
    /// When the `min_occurs <= max_occurs` invariant is checked.
    #[serde(default)]
    bounds_validation: BoundsValidation,
}

impl AssemblySection {
    pub fn new(bounds_validation: BoundsValidation) -> Self {
        Self { bounds_validation }
    }

    /// Returns the configured [`BoundsValidation`] policy.
    pub fn bounds_validation(&self) -> BoundsValidation {
        self.bounds_validation
    }

    /// Converts the section into the schema crate's [`AssemblyConfig`].
    pub fn to_assembly_config(&self) -> AssemblyConfig {
        AssemblyConfig::new(self.bounds_validation)
    }
}

/// Settings for [`SchemaAssembler::render_report`](crate::SchemaAssembler::render_report).
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// List reference targets next to reference collections.
    #[serde(default = "default_show_references")]
    show_references: bool,
}

impl ReportConfig {
    pub fn new(show_references: bool) -> Self {
        Self { show_references }
    }

    /// Returns `true` if reference targets are rendered.
    pub fn show_references(&self) -> bool {
        self.show_references
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            show_references: default_show_references(),
        }
    }
}

fn default_show_references() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(
            config.assembly().bounds_validation(),
            BoundsValidation::Lazy
        );
        assert!(config.report().show_references());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert!(!config.assembly().bounds_validation().is_eager());
        assert!(config.report().show_references());
    }

    #[test]
    fn test_full_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [assembly]
            bounds_validation = "eager"

            [report]
            show_references = false
            "#,
        )
        .unwrap();

        assert!(
            config
                .assembly()
                .to_assembly_config()
                .bounds_validation
                .is_eager()
        );
        assert!(!config.report().show_references());
    }

    #[test]
    fn test_with_bounds_validation_keeps_report_settings() {
        let config = AppConfig::new(AssemblySection::default(), ReportConfig::new(false))
            .with_bounds_validation(BoundsValidation::Eager);

        assert!(config.assembly().bounds_validation().is_eager());
        assert!(!config.report().show_references());
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let result: Result<AppConfig, _> = toml::from_str(
            r#"
            [assembly]
            bounds_validation = "sometimes"
            "#,
        );
        assert!(result.is_err());
    }
}
