//! # Inheritance Tests
//!
//! Forwarding bindings installed by `inherit`:
//! - live delegation to the base class's current binding
//! - per-name severing on override, re-linking on re-inherit
//! - multi-level chains and cycle detection
//! - interaction with declare / defaults in either order

use classparam::{params, Binding, BindingKind, ParamError, Registry};
use serde_json::json;

fn base_with_timeout() -> Registry {
    let registry = Registry::new();
    registry
        .declare_with_defaults("Base", params! { TIMEOUT => 30 })
        .unwrap();
    registry
}

#[test]
fn derived_tracks_base_until_overridden() {
    let registry = base_with_timeout();
    registry.inherit("Derived", "Base").unwrap();
    let timeout = registry.accessor("Derived", "TIMEOUT").unwrap();

    assert_eq!(timeout.get().unwrap(), json!(30));

    registry.configure("Base", params! { TIMEOUT => 10 }).unwrap();
    assert_eq!(timeout.get().unwrap(), json!(10));

    registry.configure("Derived", params! { TIMEOUT => 5 }).unwrap();
    assert_eq!(timeout.get().unwrap(), json!(5));

    for later in [1, 2, 3] {
        registry.configure("Base", params! { TIMEOUT => later }).unwrap();
        assert_eq!(timeout.get().unwrap(), json!(5));
    }
}

#[test]
fn override_severs_only_that_name() {
    let registry = Registry::new();
    registry
        .declare_with_defaults("Base", params! { TIMEOUT => 30, RETRIES => 3 })
        .unwrap();
    registry.inherit("Derived", "Base").unwrap();

    registry.configure("Derived", params! { TIMEOUT => 5 }).unwrap();
    registry
        .configure("Base", params! { TIMEOUT => 60, RETRIES => 9 })
        .unwrap();

    assert_eq!(registry.get("Derived", "TIMEOUT").unwrap(), json!(5));
    assert_eq!(registry.get("Derived", "RETRIES").unwrap(), json!(9));
    assert_eq!(
        registry.binding_kind("Derived", "TIMEOUT"),
        Some(BindingKind::Constant)
    );
    assert_eq!(
        registry.binding_kind("Derived", "RETRIES"),
        Some(BindingKind::Forwarding)
    );
}

#[test]
fn reinherit_restores_forwarding() {
    let registry = base_with_timeout();
    registry.inherit("Derived", "Base").unwrap();
    registry.configure("Derived", params! { TIMEOUT => 5 }).unwrap();

    registry.inherit("Derived", "Base").unwrap();
    assert_eq!(
        registry.binding_kind("Derived", "TIMEOUT"),
        Some(BindingKind::Forwarding)
    );
    assert_eq!(registry.get("Derived", "TIMEOUT").unwrap(), json!(30));
}

#[test]
fn forwarding_sees_base_function_bindings() {
    let registry = base_with_timeout();
    registry.inherit("Derived", "Base").unwrap();
    registry
        .configure("Base", [("TIMEOUT", Binding::function(|| json!(42)))])
        .unwrap();

    assert_eq!(registry.get("Derived", "TIMEOUT").unwrap(), json!(42));
}

#[test]
fn forwarding_to_unbound_base_reports_base() {
    let registry = Registry::new();
    registry.declare("Base", ["TIMEOUT"]).unwrap();
    registry.inherit("Derived", "Base").unwrap();

    match registry.get("Derived", "TIMEOUT").unwrap_err() {
        ParamError::UninitializedParameter { class, name, .. } => {
            assert_eq!(class.as_str(), "Base");
            assert_eq!(&*name, "TIMEOUT");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn multi_level_chain() {
    let registry = base_with_timeout();
    registry.inherit("Middle", "Base").unwrap();
    registry.inherit("Leaf", "Middle").unwrap();

    assert_eq!(registry.get("Leaf", "TIMEOUT").unwrap(), json!(30));

    registry.configure("Middle", params! { TIMEOUT => 15 }).unwrap();
    assert_eq!(registry.get("Leaf", "TIMEOUT").unwrap(), json!(15));
    assert_eq!(registry.get("Base", "TIMEOUT").unwrap(), json!(30));
}

#[test]
fn inherit_copies_names_present_at_call_time() {
    let registry = base_with_timeout();
    registry.inherit("Derived", "Base").unwrap();
    registry
        .declare_with_defaults("Base", params! { LATER => 1 })
        .unwrap();

    assert!(registry.binding_kind("Derived", "LATER").is_none());
    let err = registry.configure("Derived", params! { LATER => 2 }).unwrap_err();
    assert!(matches!(err, ParamError::UnknownParameter { .. }));
}

#[test]
fn last_call_wins_per_name() {
    let registry = Registry::new();
    registry
        .declare_with_defaults("Base", params! { A => 1, B => 2 })
        .unwrap();

    // defaults before inherit: inherit wins for shared names
    registry
        .declare_with_defaults("Before", params! { A => 100, OWN => 7 })
        .unwrap();
    registry.inherit("Before", "Base").unwrap();
    assert_eq!(registry.get("Before", "A").unwrap(), json!(1));
    assert_eq!(registry.get("Before", "OWN").unwrap(), json!(7));

    // defaults after inherit: defaults win
    registry.inherit("After", "Base").unwrap();
    registry
        .declare_with_defaults("After", params! { A => 100 })
        .unwrap();
    assert_eq!(registry.get("After", "A").unwrap(), json!(100));
    assert_eq!(registry.get("After", "B").unwrap(), json!(2));
}

#[test]
fn declare_after_inherit_is_duplicate() {
    let registry = base_with_timeout();
    registry.inherit("Derived", "Base").unwrap();

    let err = registry.declare("Derived", ["TIMEOUT"]).unwrap_err();
    assert!(matches!(err, ParamError::DuplicateParameter { .. }));
    registry.declare("Derived", ["EXTRA"]).unwrap();
}

#[test]
fn inherit_from_class_without_registry() {
    let registry = Registry::new();
    registry.inherit("Orphan", "Missing").unwrap();

    assert!(registry.has_registry("Orphan"));
    assert!(!registry.has_registry("Missing"));
    assert!(registry.param_names("Orphan").is_empty());
}

#[test]
fn mutual_inheritance_is_cyclic() {
    let registry = Registry::new();
    registry
        .declare_with_defaults("A", params! { X => 1 })
        .unwrap();
    registry.inherit("B", "A").unwrap();
    registry.inherit("A", "B").unwrap();

    let err = registry.get("A", "X").unwrap_err();
    match &err {
        ParamError::CyclicInheritance { chain, .. } => assert_eq!(chain, "A -> B -> A"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("PARAM-005"));

    // an own value on either side breaks the cycle
    registry.configure("B", params! { X => 2 }).unwrap();
    assert_eq!(registry.get("A", "X").unwrap(), json!(2));
}
