//! Tests for the mimizuku-el crate

use mimizuku_core::TermStore;
use mimizuku_el::loader::{load_ontology, parse_concept, parse_ontology};
use mimizuku_el::{ElError, ElReasoner, Ontology};
use std::collections::HashSet;
use std::path::Path;

fn reasoner_from(text: &str) -> ElReasoner {
    let mut store = TermStore::new();
    let ontology = parse_ontology(&mut store, text).unwrap();
    ElReasoner::new(store, ontology)
}

#[test]
fn test_trivial_self_subsumption() {
    // Empty TBox, just declarations
    let reasoner = reasoner_from("A\nB");

    assert!(reasoner.is_subsumed_by("A", "A").unwrap());
    assert!(reasoner.is_subsumed_by("A", "⊤").unwrap());
    assert!(!reasoner.is_subsumed_by("A", "B").unwrap());
}

#[test]
fn test_direct_gci() {
    let reasoner = reasoner_from("A <= B");

    assert!(reasoner.is_subsumed_by("A", "B").unwrap());
    assert!(!reasoner.is_subsumed_by("B", "A").unwrap());
}

#[test]
fn test_transitive_chain() {
    let mut reasoner = reasoner_from("A <= B\nB <= C");
    reasoner.classify().unwrap();

    let a = reasoner.store().lookup_name("A").unwrap();
    let b = reasoner.store().lookup_name("B").unwrap();
    let c = reasoner.store().lookup_name("C").unwrap();
    let top = reasoner.store().top();

    let subsumers = &reasoner.hierarchy()[&a];
    for id in [a, b, c, top] {
        assert!(subsumers.contains(&id));
    }
}

#[test]
fn test_conjunction_distribution() {
    let reasoner = reasoner_from("A <= and (B C)");

    assert!(reasoner.is_subsumed_by("A", "B").unwrap());
    assert!(reasoner.is_subsumed_by("A", "C").unwrap());
}

#[test]
fn test_existential_propagation() {
    // The derived form ∃r.C must appear in the ontology to be assignable
    let text = "A <= some r.B\nB <= C\nsome r.C";
    let mut store = TermStore::new();
    let ontology = parse_ontology(&mut store, text).unwrap();
    let derived = parse_concept(&mut store, "some r.C").unwrap();
    let reasoner = ElReasoner::new(store, ontology);

    assert!(reasoner.is_subsumed_by("A", derived).unwrap());
}

#[test]
fn test_underived_existential_is_rejected() {
    // Without the declaration, ∃r.C is outside the concept universe
    let text = "A <= some r.B\nB <= C";
    let mut store = TermStore::new();
    let ontology = parse_ontology(&mut store, text).unwrap();
    let derived = parse_concept(&mut store, "some r.C").unwrap();
    let reasoner = ElReasoner::new(store, ontology);

    let err = reasoner.is_subsumed_by("A", derived).unwrap_err();
    assert!(matches!(err, ElError::UnknownConcept(_)));
}

#[test]
fn test_equivalence() {
    let reasoner = reasoner_from("A == B");

    assert!(reasoner.is_subsumed_by("A", "B").unwrap());
    assert!(reasoner.is_subsumed_by("B", "A").unwrap());
}

#[test]
fn test_conjunction_is_commutative_for_subsumption() {
    let text = "A <= and (B C)\nand (C B)";
    let mut store = TermStore::new();
    let ontology = parse_ontology(&mut store, text).unwrap();
    let swapped = parse_concept(&mut store, "and (C B)").unwrap();
    let reasoner = ElReasoner::new(store, ontology);

    // The stored operand order differs, but ⊓-rule 2 derives the swap
    assert!(reasoner.is_subsumed_by("A", swapped).unwrap());
}

#[test]
fn test_cyclic_tbox_classifies() {
    let mut reasoner = reasoner_from("A <= some r.A\nA <= B");
    reasoner.classify().unwrap();

    let a = reasoner.store().lookup_name("A").unwrap();
    let b = reasoner.store().lookup_name("B").unwrap();
    assert!(reasoner.hierarchy()[&a].contains(&b));
}

#[test]
fn test_pancakes_smoke() {
    let path = Path::new(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/data/dutch-pancakes.el"
    ));
    let mut store = TermStore::new();
    let ontology = load_ontology(&mut store, path).unwrap();
    let mut reasoner = ElReasoner::new(store, ontology);

    let subsumers = reasoner.get_subsumers("DutchPancake").unwrap();
    let rendered: HashSet<String> = subsumers
        .iter()
        .map(|&id| reasoner.store().render(id))
        .collect();

    for expected in ["DutchPancake", "Pancake", "Food", "⊤"] {
        assert!(
            rendered.contains(expected),
            "subsumers of DutchPancake should contain {}, got {:?}",
            expected,
            rendered
        );
    }
    assert!(!rendered.contains("PlainPancake"));
}

#[test]
fn test_missing_file_is_a_parse_error() {
    let mut store = TermStore::new();
    let err = load_ontology(&mut store, Path::new("/nonexistent/file.el")).unwrap_err();
    assert!(matches!(err, ElError::ParseError(_)));
}

#[test]
fn test_ontology_serde_round_trip() {
    let mut store = TermStore::new();
    let ontology = parse_ontology(&mut store, "A <= and (B (some r.C))\nD == A").unwrap();

    let json = serde_json::to_string(&ontology).unwrap();
    let decoded: Ontology = serde_json::from_str(&json).unwrap();
    assert_eq!(ontology, decoded);
}

#[test]
fn test_hierarchy_serializes() {
    let mut reasoner = reasoner_from("A <= B\nB <= C");
    reasoner.classify().unwrap();

    let json = serde_json::to_string(reasoner.hierarchy()).unwrap();
    assert!(json.contains('{'));
}
