//! Permission scope tests.
#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use kova_values::{
    EvalErrorKind, OperatorSetSpec, OverloadRegistry, RecordValue, SharedSet, Value,
    BUILTIN_SET_COUNT,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::scope::{declare_scope, PermissionScope};

fn sets(registry: &OverloadRegistry, count: usize) -> Vec<SharedSet> {
    (0..count)
        .map(|i| {
            registry
                .register(OperatorSetSpec::new(format!("T{i}")))
                .unwrap_or_else(|e| panic!("register T{i}: {e}"))
        })
        .collect()
}

#[test]
fn root_permits_exactly_the_builtins() {
    let root = PermissionScope::root();
    for ordinal in 0..BUILTIN_SET_COUNT {
        assert!(root.permits(ordinal));
    }
    assert!(!root.permits(BUILTIN_SET_COUNT));
    assert!(!root.permits(100));
    assert!(root.enabled_ordinals().is_empty());
}

#[test]
fn child_adds_grants_and_keeps_parent() {
    let registry = OverloadRegistry::new();
    let all = sets(&registry, 3);

    let parent = PermissionScope::root().child(&all[0..1]);
    let child = parent.child(&all[1..2]);

    assert!(parent.permits(all[0].ordinal()));
    assert!(!parent.permits(all[1].ordinal()));

    assert!(child.permits(all[0].ordinal()));
    assert!(child.permits(all[1].ordinal()));
    assert!(!child.permits(all[2].ordinal()));

    // The parent is untouched: scopes are immutable.
    assert!(!parent.permits(all[1].ordinal()));
}

#[test]
fn duplicate_grants_collapse() {
    let registry = OverloadRegistry::new();
    let all = sets(&registry, 1);
    let scope = PermissionScope::root()
        .child(&[all[0].clone(), all[0].clone()])
        .child(&[all[0].clone()]);
    assert_eq!(scope.enabled_ordinals(), &[all[0].ordinal()]);
}

#[test]
fn declare_scope_accepts_set_carriers_only() {
    let registry = OverloadRegistry::new();
    let all = sets(&registry, 1);
    let instance = Value::record(RecordValue::with_operators(all[0].clone()));

    let scope = declare_scope(None, &[instance]).unwrap();
    assert!(scope.permits(all[0].ordinal()));

    let err = declare_scope(None, &[Value::Number(3.0)]).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::NotOverloadable {
            type_name: "Number".to_string(),
        }
    );

    let err = declare_scope(None, &[Value::record(RecordValue::plain())]).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::NotOverloadable {
            type_name: "Record".to_string(),
        }
    );
}

#[test]
fn declare_scope_nests_on_a_parent() {
    let registry = OverloadRegistry::new();
    let all = sets(&registry, 2);
    let first = Value::record(RecordValue::with_operators(all[0].clone()));
    let second = Value::record(RecordValue::with_operators(all[1].clone()));

    let outer = declare_scope(None, &[first]).unwrap();
    let inner = declare_scope(Some(&outer), &[second]).unwrap();

    assert!(inner.permits(all[0].ordinal()));
    assert!(inner.permits(all[1].ordinal()));
    assert!(!outer.permits(all[1].ordinal()));
}

proptest! {
    /// `child(S, G)` permits everything `S` permitted plus exactly `G`;
    /// it never revokes.
    #[test]
    fn child_scope_is_monotonic(
        parent_picks in proptest::collection::vec(0usize..5, 0..5),
        child_picks in proptest::collection::vec(0usize..5, 0..5),
    ) {
        let registry = OverloadRegistry::new();
        let all = sets(&registry, 5);

        let parent_grants: Vec<SharedSet> =
            parent_picks.iter().map(|i| all[*i].clone()).collect();
        let child_grants: Vec<SharedSet> =
            child_picks.iter().map(|i| all[*i].clone()).collect();

        let parent = PermissionScope::root().child(&parent_grants);
        let child = parent.child(&child_grants);

        // Probe every ordinal that exists in this registry.
        for ordinal in 0..(BUILTIN_SET_COUNT + 5) {
            if parent.permits(ordinal) {
                prop_assert!(child.permits(ordinal), "revoked ordinal {ordinal}");
            }
        }
        for set in &child_grants {
            prop_assert!(child.permits(set.ordinal()));
        }
        // Exactly the grants: nothing else became permitted.
        for set in &all {
            let granted = parent_picks.contains(&(set.ordinal() as usize - 3))
                || child_picks.contains(&(set.ordinal() as usize - 3));
            prop_assert_eq!(child.permits(set.ordinal()), granted);
        }
    }
}
