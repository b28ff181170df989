//! オントロジーデータモデル

use crate::tbox::TBox;
use mimizuku_core::{Axiom, Concept, ConceptId, TermStore};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A loaded EL ontology.
///
/// Alongside the TBox it carries the declared concept names and the full
/// syntactic sub-concept universe; the reasoner validates query operands
/// against the universe and uses it as the base of every input-concept set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ontology {
    /// All axioms in the ontology
    pub tbox: TBox,

    /// All declared concept names
    pub concept_names: HashSet<ConceptId>,

    /// All sub-concepts syntactically appearing in the ontology, plus ⊤
    pub concepts: HashSet<ConceptId>,
}

impl Ontology {
    pub fn new(store: &TermStore) -> Self {
        let mut concepts = HashSet::new();
        concepts.insert(store.top());
        Self {
            tbox: TBox::default(),
            concept_names: HashSet::new(),
            concepts,
        }
    }

    /// Add an axiom and fold both sides into the concept universe
    pub fn add_axiom(&mut self, store: &TermStore, axiom: Axiom) {
        let (lhs, rhs) = match axiom {
            Axiom::Gci(gci) => (gci.lhs, gci.rhs),
            Axiom::Equiv(a, b) => (a, b),
        };
        self.declare(store, lhs);
        self.declare(store, rhs);
        self.tbox.push(axiom);
    }

    /// Add a concept (and all its sub-expressions) to the universe
    pub fn declare(&mut self, store: &TermStore, concept: ConceptId) {
        let mut collected = HashSet::new();
        sub_concepts(store, concept, &mut collected);
        for &id in &collected {
            if store.is_name(id) {
                self.concept_names.insert(id);
            }
        }
        self.concepts.extend(collected);
    }
}

/// Collect `root` and every concept below it into `out`
pub fn sub_concepts(store: &TermStore, root: ConceptId, out: &mut HashSet<ConceptId>) {
    if !out.insert(root) {
        return;
    }
    match store.concept(root) {
        Concept::Conj(lhs, rhs) => {
            sub_concepts(store, lhs, out);
            sub_concepts(store, rhs, out);
        }
        Concept::Exist(_, filler) => sub_concepts(store, filler, out),
        Concept::Top | Concept::Name(_) => {}
    }
}
