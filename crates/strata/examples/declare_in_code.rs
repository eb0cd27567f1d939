//! Example: Declaring a metamodel in code
//!
//! This example builds a small process metamodel through the fluent builder
//! API instead of a declaration file. Types are declared in an order where
//! most relations point forward to types that do not exist yet.

use strata::{
    SchemaAssembler,
    identifier::Id,
    occurs::MaxOccurs,
    schema::{ModelBuilder, SchemaError},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Declaring metamodel in code...\n");

    let mut builder = ModelBuilder::new("process");

    // Containers first: their children are declared further down
    let mut definitions = builder.define_type("Definitions");
    definitions.namespace_uri("http://example.org/model");
    definitions
        .child_element_collection("Process")
        .required();
    definitions.build()?;

    let mut process = builder.define_type("Process");
    process.extends_type("BaseElement");
    process.child_element_collection("Task");
    let flows = process
        .child_element_collection("SequenceFlow")
        .max_occurs(MaxOccurs::Bounded(16))
        .immutable()
        .build();
    process.build()?;

    let mut sequence_flow = builder.define_type("SequenceFlow");
    sequence_flow.extends_type("BaseElement");
    sequence_flow
        .child_element("SourceRef")
        .required()
        .with_identifier_reference("Task")?;
    sequence_flow.build()?;

    // Leaf and base types last
    let mut base = builder.define_type("BaseElement");
    base.abstract_type();
    base.build()?;

    for leaf in ["Task", "SourceRef"] {
        let mut leaf_type = builder.define_type(leaf);
        leaf_type.extends_type("BaseElement");
        leaf_type.build()?;
    }

    println!(
        "Declared types; {} operations pending",
        builder.pending_operations()
    );

    let model = builder.build()?;

    let flows = model
        .collection(flows)
        .ok_or_else(|| format!("collection {flows} is missing"))?;
    println!(
        "Process holds up to {} sequence flows",
        flows.max_occurs()
    );

    match flows.ensure_mutable() {
        Err(SchemaError::ImmutableCollection { .. }) => {
            println!("Sequence flows of a process are immutable")
        }
        other => other?,
    }

    println!(
        "Task is referenced by {} collection(s)\n",
        model.incoming_references(Id::new("Task")).len()
    );

    let report = SchemaAssembler::default().render_report(&model)?;
    println!("{report}");

    Ok(())
}
