//! Integration tests for two-phase model assembly.

use strata_core::{identifier::Id, occurs::MaxOccurs, reference::ReferenceKind};
use strata_schema::{ErrorCode, ModelBuilder, SchemaError, TypeUsage};

#[test]
fn test_child_collection_registers_child_type() {
    let mut builder = ModelBuilder::new("scenario");
    let mut parent = builder.define_type("Parent");
    parent.child_element_collection("Child");
    parent.build().expect("Parent declared once");
    builder.define_type("Child").build().expect("Child declared once");

    let model = builder.build().expect("Failed to assemble model");
    let parent = model.get_type(Id::new("Parent")).expect("Parent registered");
    assert!(parent.has_child_element_type(Id::new("Child")));
}

#[test]
fn test_undeclared_child_type_fails_assembly() {
    let mut builder = ModelBuilder::new("scenario");
    let mut parent = builder.define_type("Parent");
    parent.child_element_collection("Ghost");
    parent.build().expect("Parent declared once");

    let err = builder.build().unwrap_err();
    assert_eq!(
        err,
        SchemaError::UndeclaredType {
            owner: Id::new("Parent"),
            missing: Id::new("Ghost"),
            usage: TypeUsage::ChildElement,
        }
    );
    assert_eq!(err.code(), ErrorCode::E201);
    let message = err.to_string();
    assert!(message.contains("Parent") && message.contains("Ghost"), "{message}");
}

#[test]
fn test_second_reference_is_rejected() {
    let mut builder = ModelBuilder::new("scenario");
    let mut parent = builder.define_type("Parent");
    let mut collection = parent.child_element_collection("Child");

    collection
        .with_identifier_reference("Target")
        .expect("first reference is accepted");
    let err = collection
        .with_qualified_name_reference("Target")
        .map(|_| ())
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::E101);
    let reference = collection.descriptor().reference().expect("reference kept");
    assert_eq!(reference.kind(), ReferenceKind::Identifier);
    assert_eq!(reference.target_type(), "Target");
}

#[test]
fn test_second_reference_is_rejected_in_either_order() {
    let mut builder = ModelBuilder::new("scenario");
    let mut parent = builder.define_type("Parent");
    let mut collection = parent.child_element_collection("Child");

    collection
        .with_qualified_name_reference("Target")
        .expect("first reference is accepted");
    assert!(matches!(
        collection.with_identifier_reference("Other").map(|_| ()),
        Err(SchemaError::DuplicateReference {
            existing: ReferenceKind::QualifiedName,
            ..
        })
    ));

    let reference = collection.descriptor().reference().expect("reference kept");
    assert_eq!(reference.kind(), ReferenceKind::QualifiedName);
    assert_eq!(reference.target_type(), "Target");
}

#[test]
fn test_rejected_reference_fails_assembly() {
    let mut builder = ModelBuilder::new("scenario");
    let mut parent = builder.define_type("Parent");
    let mut collection = parent.child_element_collection("Child");
    collection.with_identifier_reference("Target").unwrap();
    let rejected = collection
        .with_identifier_reference("Phantom")
        .map(|_| ())
        .unwrap_err();
    let reference = collection.descriptor().reference().expect("first reference kept");
    assert_eq!(reference.target_type(), "Target");
    parent.build().unwrap();
    builder.define_type("Child").build().unwrap();
    builder.define_type("Target").build().unwrap();
    assert_eq!(builder.pending_operations(), 1);

    let err = builder.build().unwrap_err();
    assert_eq!(err, rejected);
    assert_eq!(err.code(), ErrorCode::E101);
}

#[test]
fn test_ignored_duplicate_type_fails_assembly() {
    let mut builder = ModelBuilder::new("scenario");
    builder.define_type("Task").build().unwrap();

    let mut second = builder.define_type("Task");
    second.child_element_collection("Ghost");
    let _ignored = second.build();

    assert!(!builder.is_declared("Ghost"));
    let err = builder.build().unwrap_err();
    assert_eq!(err, SchemaError::DuplicateType { id: Id::new("Task") });
    assert_eq!(err.code(), ErrorCode::E102);
}

#[test]
fn test_bound_violation_is_lazy() {
    let mut builder = ModelBuilder::new("scenario");
    let mut parent = builder.define_type("Parent");
    let id = parent
        .child_element_collection("Child")
        .min_occurs(5)
        .max_occurs(MaxOccurs::Bounded(2))
        .build();
    parent.build().expect("configuration does not validate bounds");
    builder.define_type("Child").build().unwrap();

    let model = builder.build().expect("lazy mode does not validate bounds");
    let collection = model.collection(id).expect("collection resolvable");

    let err = collection.occurrence_bounds().unwrap_err();
    assert_eq!(err.code(), ErrorCode::E301);
    assert!(err.to_string().contains("5 > 2"), "{err}");
}

#[test]
fn test_reference_to_undeclared_target_fails() {
    let mut builder = ModelBuilder::new("scenario");
    let mut parent = builder.define_type("Parent");
    parent
        .child_element_collection("Child")
        .with_identifier_reference("Nowhere")
        .unwrap();
    parent.build().unwrap();
    builder.define_type("Child").build().unwrap();

    assert_eq!(
        builder.build().unwrap_err(),
        SchemaError::UndeclaredType {
            owner: Id::new("Parent"),
            missing: Id::new("Nowhere"),
            usage: TypeUsage::ReferenceTarget,
        }
    );
}

#[test]
fn test_duplicate_type_declaration() {
    let mut builder = ModelBuilder::new("scenario");
    builder.define_type("Task").build().unwrap();

    let err = builder.define_type("Task").build().unwrap_err();
    assert_eq!(err.code(), ErrorCode::E102);
}

#[test]
fn test_build_handle_sees_later_configuration() {
    let mut builder = ModelBuilder::new("scenario");
    let mut parent = builder.define_type("Parent");
    let mut collection = parent.child_element_collection("Child");

    let first = collection.build();
    collection.immutable().min_occurs(3);
    let second = collection.build();
    assert_eq!(first, second);

    parent.build().unwrap();
    builder.define_type("Child").build().unwrap();
    let model = builder.build().unwrap();

    let descriptor = model.collection(first).expect("handle resolves");
    assert!(descriptor.is_immutable());
    assert_eq!(descriptor.min_occurs(), 3);
    assert_eq!(model.collection(second), Some(descriptor));
}

#[test]
fn test_immutable_collection_rejects_mutation() {
    let mut builder = ModelBuilder::new("scenario");
    let mut parent = builder.define_type("Parent");
    let frozen = parent.child_element_collection("Child").immutable().build();
    let open = parent.child_element_collection("Child").build();
    parent.build().unwrap();
    builder.define_type("Child").build().unwrap();
    let model = builder.build().unwrap();

    let err = model.collection(frozen).unwrap().ensure_mutable().unwrap_err();
    assert_eq!(err.code(), ErrorCode::E302);
    assert!(model.collection(open).unwrap().ensure_mutable().is_ok());
}

mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    /// Declarations as `(type index, child type indices)`, in a shuffled order.
    fn declarations_strategy() -> impl Strategy<Value = Vec<(usize, Vec<usize>)>> {
        (1usize..8)
            .prop_flat_map(|count| {
                prop::collection::vec(prop::collection::vec(0..count, 0..4), count)
            })
            .prop_map(|children| children.into_iter().enumerate().collect::<Vec<_>>())
            .prop_shuffle()
    }

    fn type_name(index: usize) -> String {
        format!("Type{index}")
    }

    fn declare(builder: &mut ModelBuilder, declarations: &[(usize, Vec<usize>)]) {
        for (index, children) in declarations {
            let mut element_type = builder.define_type(type_name(*index).as_str());
            for child in children {
                element_type.child_element_collection(type_name(*child).as_str());
            }
            element_type.build().expect("each type is declared once");
        }
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Every declared child type resolves regardless of declaration order.
    fn check_any_order_assembles(
        declarations: Vec<(usize, Vec<usize>)>,
    ) -> Result<(), TestCaseError> {
        let mut builder = ModelBuilder::new("prop");
        declare(&mut builder, &declarations);

        let model = match builder.build() {
            Ok(model) => model,
            Err(err) => return Err(TestCaseError::fail(format!("assembly failed: {err}"))),
        };

        for element_type in model.types() {
            for collection in element_type.collections() {
                prop_assert!(model.get_type(collection.element_type()).is_some());
                prop_assert!(element_type.has_child_element_type(collection.element_type()));
            }
        }
        Ok(())
    }

    /// A collection of a never-declared type fails assembly naming both types.
    fn check_undeclared_detected(
        declarations: Vec<(usize, Vec<usize>)>,
        owner_pick: prop::sample::Index,
    ) -> Result<(), TestCaseError> {
        let owner_index = declarations[owner_pick.index(declarations.len())].0;
        let owner = type_name(owner_index);

        let mut builder = ModelBuilder::new("prop");
        for (index, children) in &declarations {
            let mut element_type = builder.define_type(type_name(*index).as_str());
            for child in children {
                element_type.child_element_collection(type_name(*child).as_str());
            }
            if *index == owner_index {
                element_type.child_element_collection("Ghost");
            }
            element_type.build().expect("each type is declared once");
        }

        prop_assert_eq!(
            builder.build().unwrap_err(),
            SchemaError::UndeclaredType {
                owner: Id::new(&owner),
                missing: Id::new("Ghost"),
                usage: TypeUsage::ChildElement,
            }
        );
        Ok(())
    }

    /// Setting max before min or min before max yields the same descriptor.
    fn check_bounds_order_independent(min: usize, max: Option<usize>) -> Result<(), TestCaseError> {
        let max = max.map_or(MaxOccurs::Unbounded, MaxOccurs::Bounded);
        let mut builder = ModelBuilder::new("prop");

        let mut parent = builder.define_type("Parent");
        let min_first = parent
            .child_element_collection("Child")
            .min_occurs(min)
            .max_occurs(max)
            .build();
        let max_first = parent
            .child_element_collection("Child")
            .max_occurs(max)
            .min_occurs(min)
            .build();
        parent.build().expect("Parent declared once");
        builder.define_type("Child").build().expect("Child declared once");
        let model = builder.build().expect("lazy mode assembles");

        let min_first = model.collection(min_first).expect("resolvable");
        let max_first = model.collection(max_first).expect("resolvable");
        prop_assert_eq!(min_first.min_occurs(), max_first.min_occurs());
        prop_assert_eq!(min_first.max_occurs(), max_first.max_occurs());
        prop_assert_eq!(min_first.validate().is_ok(), max_first.validate().is_ok());
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn any_order_assembles(declarations in declarations_strategy()) {
            check_any_order_assembles(declarations)?;
        }

        #[test]
        fn undeclared_detected(
            declarations in declarations_strategy(),
            owner_pick in any::<prop::sample::Index>(),
        ) {
            check_undeclared_detected(declarations, owner_pick)?;
        }

        #[test]
        fn bounds_order_independent(min in 0usize..10, max in prop::option::of(0usize..10)) {
            check_bounds_order_independent(min, max)?;
        }
    }
}
