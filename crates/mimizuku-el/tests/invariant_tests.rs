//! Property tests for the reasoner's quantified invariants

use mimizuku_core::{Axiom, ConceptId, TermStore};
use mimizuku_el::{CompletionModel, ElReasoner, Ontology, TBox};
use proptest::prelude::*;

/// Concept description, interned against a store once the case is fixed
#[derive(Debug, Clone)]
enum ConceptDesc {
    Top,
    Name(u8),
    Conj(Box<ConceptDesc>, Box<ConceptDesc>),
    Exist(u8, Box<ConceptDesc>),
}

#[derive(Debug, Clone)]
enum AxiomDesc {
    Gci(ConceptDesc, ConceptDesc),
    Equiv(ConceptDesc, ConceptDesc),
}

fn concept_strategy() -> impl Strategy<Value = ConceptDesc> {
    let leaf = prop_oneof![
        Just(ConceptDesc::Top),
        (0u8..4).prop_map(ConceptDesc::Name),
    ];
    leaf.prop_recursive(2, 8, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone())
                .prop_map(|(a, b)| ConceptDesc::Conj(Box::new(a), Box::new(b))),
            (0u8..2, inner).prop_map(|(r, c)| ConceptDesc::Exist(r, Box::new(c))),
        ]
    })
}

fn tbox_strategy() -> impl Strategy<Value = Vec<AxiomDesc>> {
    let axiom = prop_oneof![
        (concept_strategy(), concept_strategy()).prop_map(|(a, b)| AxiomDesc::Gci(a, b)),
        (concept_strategy(), concept_strategy()).prop_map(|(a, b)| AxiomDesc::Equiv(a, b)),
    ];
    prop::collection::vec(axiom, 0..6)
}

fn intern(store: &mut TermStore, desc: &ConceptDesc) -> ConceptId {
    match desc {
        ConceptDesc::Top => store.top(),
        ConceptDesc::Name(n) => store.name(&format!("C{}", n)),
        ConceptDesc::Conj(a, b) => {
            let a = intern(store, a);
            let b = intern(store, b);
            store.conj(a, b)
        }
        ConceptDesc::Exist(r, c) => {
            let c = intern(store, c);
            let role = store.role(&format!("r{}", r));
            store.exist(role, c)
        }
    }
}

/// Build a store and ontology; the whole name pool is declared so every
/// query operand resolves.
fn build(axioms: &[AxiomDesc]) -> (TermStore, Ontology) {
    let mut store = TermStore::new();
    let mut ontology = Ontology::new(&store);
    for n in 0..4u8 {
        let id = store.name(&format!("C{}", n));
        ontology.declare(&store, id);
    }
    for desc in axioms {
        let axiom = match desc {
            AxiomDesc::Gci(a, b) => {
                let a = intern(&mut store, a);
                let b = intern(&mut store, b);
                store.gci(a, b)
            }
            AxiomDesc::Equiv(a, b) => {
                let a = intern(&mut store, a);
                let b = intern(&mut store, b);
                Axiom::Equiv(a, b)
            }
        };
        ontology.add_axiom(&store, axiom);
    }
    (store, ontology)
}

proptest! {
    /// Every reachable element keeps its labels inside S, carries ⊤, and
    /// carries its own initial concept.
    #[test]
    fn prop_model_invariants(axioms in tbox_strategy()) {
        let (store, ontology) = build(&axioms);
        let gcis = ontology.tbox.normalize();
        let seed = store.lookup_name("C0").unwrap();

        let mut input = ontology.concepts.clone();
        input.insert(seed);
        let mut model = CompletionModel::new(&store, input, &gcis);
        model.initialize(seed, store.top());
        model.apply_rules().unwrap();

        for individual in model.individuals() {
            prop_assert!(individual.labels.is_subset(model.input_concepts()));
            prop_assert!(individual.labels.contains(&store.top()));
            prop_assert!(individual.labels.contains(&individual.initial_concept));
        }
    }

    /// Normalizing an already-normalized TBox is the identity.
    #[test]
    fn prop_normalization_idempotent(axioms in tbox_strategy()) {
        let (_store, ontology) = build(&axioms);
        let once = ontology.tbox.normalize();
        let again = TBox::new(once.iter().map(|&g| Axiom::Gci(g)).collect()).normalize();
        prop_assert_eq!(&once, &again);
    }

    /// After classification the hierarchy is reflexive, contains ⊤
    /// everywhere, and is transitively closed.
    #[test]
    fn prop_hierarchy_reflexive_and_transitive(axioms in tbox_strategy()) {
        let (store, ontology) = build(&axioms);
        let mut reasoner = ElReasoner::new(store, ontology);
        let hierarchy = reasoner.classify().unwrap().clone();
        let top = reasoner.store().top();

        for name in &reasoner.ontology().concept_names {
            let subsumers = &hierarchy[name];
            prop_assert!(subsumers.contains(name));
            prop_assert!(subsumers.contains(&top));
            for mid in subsumers {
                for upper in &hierarchy[mid] {
                    prop_assert!(subsumers.contains(upper));
                }
            }
        }
    }

    /// Two runs over the same input produce identical hierarchies.
    #[test]
    fn prop_classification_is_deterministic(axioms in tbox_strategy()) {
        let (store_a, ontology_a) = build(&axioms);
        let (store_b, ontology_b) = build(&axioms);

        let mut first = ElReasoner::new(store_a, ontology_a);
        let mut second = ElReasoner::new(store_b, ontology_b);
        prop_assert_eq!(first.classify().unwrap(), second.classify().unwrap());
    }

    /// Both directions of every raw equivalence hold after normalization.
    #[test]
    fn prop_equivalence_soundness(axioms in tbox_strategy()) {
        let (store, ontology) = build(&axioms);
        let equivalences: Vec<(ConceptId, ConceptId)> = ontology
            .tbox
            .axioms()
            .iter()
            .filter_map(|axiom| match *axiom {
                Axiom::Equiv(a, b) => Some((a, b)),
                Axiom::Gci(_) => None,
            })
            .collect();
        let reasoner = ElReasoner::new(store, ontology);

        for (a, b) in equivalences {
            prop_assert!(reasoner.is_subsumed_by(a, b).unwrap());
            prop_assert!(reasoner.is_subsumed_by(b, a).unwrap());
        }
    }
}
