//! Plain-text report of an assembled model.
//!
//! Rendering reads every collection's occurrence bounds, which is a
//! structural use: a collection with `min_occurs > max_occurs` fails the
//! report even when assembly itself was lazy.

use std::fmt::Write;

use log::debug;

use strata_schema::{ChildElementCollection, ElementType, Model, Result};

use crate::config::ReportConfig;

/// Renders `model` as text, one block per type in declaration order.
pub fn render(model: &Model, config: &ReportConfig) -> Result<String> {
    debug!(model:% = model.name(), types = model.len(); "Rendering model report");

    let mut out = String::new();
    writeln!(out, "model {} ({} types)", model.name(), model.len())
        .expect("Writing to String buffer is infallible");

    for element_type in model.types() {
        out.push('\n');
        render_type(&mut out, model, element_type);
        for collection in element_type.collections() {
            render_collection(&mut out, collection, config)?;
        }
    }

    Ok(out)
}

fn render_type(out: &mut String, model: &Model, element_type: &ElementType) {
    write!(out, "type {}", element_type.name()).expect("Writing to String buffer is infallible");
    if let Some(base) = element_type.base_type() {
        write!(out, " : {base}").expect("Writing to String buffer is infallible");
    }
    if element_type.is_abstract() {
        out.push_str(" (abstract)");
    }
    out.push('\n');

    let extending = model.extending_types(element_type.id());
    if !extending.is_empty() {
        let names: Vec<String> = extending.iter().map(|id| id.to_string()).collect();
        writeln!(out, "  extended by: {}", names.join(", "))
            .expect("Writing to String buffer is infallible");
    }
}

fn render_collection(
    out: &mut String,
    collection: &ChildElementCollection,
    config: &ReportConfig,
) -> Result<()> {
    let (min, max) = collection.occurrence_bounds()?;
    write!(out, "  + {} [{min}..{max}]", collection.element_type())
        .expect("Writing to String buffer is infallible");
    if collection.is_immutable() {
        out.push_str(" immutable");
    }
    if let Some(reference) = collection
        .reference()
        .filter(|_| config.show_references())
    {
        write!(out, " -> {} by {}", reference.target_type(), reference.kind())
            .expect("Writing to String buffer is infallible");
    }
    out.push('\n');
    Ok(())
}
