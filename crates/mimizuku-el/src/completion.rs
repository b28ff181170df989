//! EL 補完アルゴリズム

use crate::ElError;
use mimizuku_core::{Concept, ConceptId, Gci, RoleId, TermStore};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Model element witnessing one input concept.
///
/// Individuals are equal iff their initial concepts are equal; the model
/// arena enforces that by keying on the initial concept, and successor sets
/// hold those keys rather than references.
#[derive(Debug, Clone)]
pub struct Individual {
    /// The concept that seeded this element
    pub initial_concept: ConceptId,
    /// Concepts assigned to this element; always a subset of the input set
    pub labels: HashSet<ConceptId>,
    /// Role successors, keyed by the successor's initial concept
    pub successors: HashMap<RoleId, HashSet<ConceptId>>,
}

impl Individual {
    fn new(initial_concept: ConceptId, top: ConceptId) -> Self {
        let mut labels = HashSet::new();
        labels.insert(initial_concept);
        labels.insert(top);
        Self {
            initial_concept,
            labels,
            successors: HashMap::new(),
        }
    }
}

/// Canonical finite model for one subsumption question.
///
/// Built by exhaustive application of the EL completion rules:
/// - ⊤-rule: every element carries ⊤
/// - ⊓-rule 1: C ⊓ D assigned ⇒ assign C and D
/// - ⊓-rule 2: C and D assigned ⇒ assign C ⊓ D
/// - ∃-rule 1: ∃r.C assigned ⇒ ensure an r-successor with initial concept C,
///   reusing the element witnessing C if one exists
/// - ∃-rule 2: an r-successor carries C ⇒ assign ∃r.C
/// - ⊑-rule: C assigned and C ⊑ D in the TBox ⇒ assign D
///
/// Every assignment is restricted to the frozen input-concept set; that
/// filter is what keeps the model finite.
pub struct CompletionModel<'a> {
    store: &'a TermStore,
    input_concepts: HashSet<ConceptId>,
    gcis: &'a [Gci],
    individuals: Vec<Individual>,
    by_initial: HashMap<ConceptId, usize>,
    initial: Option<usize>,
    subsumer: Option<ConceptId>,
    top: ConceptId,
}

impl<'a> CompletionModel<'a> {
    pub fn new(store: &'a TermStore, input_concepts: HashSet<ConceptId>, gcis: &'a [Gci]) -> Self {
        let top = store.top();
        Self {
            store,
            input_concepts,
            gcis,
            individuals: Vec::new(),
            by_initial: HashMap::new(),
            initial: None,
            subsumer: None,
            top,
        }
    }

    /// Seed the model with the initial element for `subsumee`
    pub fn initialize(&mut self, subsumee: ConceptId, subsumer: ConceptId) {
        self.individuals.clear();
        self.by_initial.clear();
        let d0 = self.ensure_individual(subsumee);
        self.initial = Some(d0);
        self.subsumer = Some(subsumer);
    }

    /// Apply the completion rules to fixed point; answer whether the
    /// subsumer ended up assigned to the initial element.
    pub fn apply_rules(&mut self) -> Result<bool, ElError> {
        let d0 = self.initial.ok_or(ElError::UninitializedModel)?;
        let subsumer = self.subsumer.ok_or(ElError::UninitializedModel)?;

        let mut sweeps = 0usize;
        loop {
            let changed = self.sweep();
            sweeps += 1;
            debug!(
                sweeps,
                individuals = self.individuals.len(),
                initial_labels = self.individuals[d0].labels.len(),
                "completion sweep finished"
            );
            if !changed {
                break;
            }
        }

        Ok(self.individuals[d0].labels.contains(&subsumer))
    }

    /// Label set of the initial element, for reuse by the hierarchy builder
    pub fn initial_labels(&self) -> Result<&HashSet<ConceptId>, ElError> {
        let d0 = self.initial.ok_or(ElError::UninitializedModel)?;
        Ok(&self.individuals[d0].labels)
    }

    /// All elements of the model, in creation order
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// The frozen input-concept set
    pub fn input_concepts(&self) -> &HashSet<ConceptId> {
        &self.input_concepts
    }

    /// One pass over every individual, applying all rules. The change flag
    /// accumulates across rules and individuals; the caller loops until a
    /// whole sweep adds nothing.
    fn sweep(&mut self) -> bool {
        let mut changed = false;

        // Individuals created during this sweep land past `frontier` and
        // join the traversal on the next sweep only; lookups see them
        // immediately through `by_initial`.
        let frontier = self.individuals.len();
        for index in 0..frontier {
            let mut additions = HashSet::new();
            {
                let individual = &self.individuals[index];
                additions.insert(self.top); // ⊤-rule
                self.first_conjunction_rule(individual, &mut additions);
                self.second_conjunction_rule(individual, &mut additions);
                self.second_existential_rule(individual, &mut additions);
                self.gci_rule(individual, &mut additions);
            }

            // ∃-rule 1 adds successors, not labels; collect the wanted
            // witnesses before touching the arena.
            let wanted: Vec<(RoleId, ConceptId)> = self.individuals[index]
                .labels
                .iter()
                .filter_map(|&c| match self.store.concept(c) {
                    Concept::Exist(role, filler) => Some((role, filler)),
                    _ => None,
                })
                .collect();

            for concept in additions {
                changed |= self.individuals[index].labels.insert(concept);
            }
            for (role, filler) in wanted {
                self.ensure_individual(filler);
                changed |= self.individuals[index]
                    .successors
                    .entry(role)
                    .or_default()
                    .insert(filler);
            }
        }

        changed
    }

    /// ⊓-rule 1: C ⊓ D assigned ⇒ assign C and D
    fn first_conjunction_rule(&self, individual: &Individual, out: &mut HashSet<ConceptId>) {
        for &concept in &individual.labels {
            if let Concept::Conj(lhs, rhs) = self.store.concept(concept) {
                self.admit(lhs, out);
                self.admit(rhs, out);
            }
        }
    }

    /// ⊓-rule 2: C and D assigned ⇒ assign C ⊓ D, over all ordered pairs
    /// including C = D
    fn second_conjunction_rule(&self, individual: &Individual, out: &mut HashSet<ConceptId>) {
        for &first in &individual.labels {
            for &second in &individual.labels {
                if let Some(conjunction) = self.store.lookup_conj(first, second) {
                    self.admit(conjunction, out);
                }
            }
        }
    }

    /// ∃-rule 2: an r-successor carries C ⇒ assign ∃r.C
    fn second_existential_rule(&self, individual: &Individual, out: &mut HashSet<ConceptId>) {
        for (&role, successors) in &individual.successors {
            for successor_key in successors {
                let successor = &self.individuals[self.by_initial[successor_key]];
                for &concept in &successor.labels {
                    if let Some(existential) = self.store.lookup_exist(role, concept) {
                        self.admit(existential, out);
                    }
                }
            }
        }
    }

    /// ⊑-rule: C assigned and C ⊑ D in the TBox ⇒ assign D
    fn gci_rule(&self, individual: &Individual, out: &mut HashSet<ConceptId>) {
        for gci in self.gcis {
            if individual.labels.contains(&gci.lhs) {
                self.admit(gci.rhs, out);
            }
        }
    }

    // Every assignment goes through the input-concept filter.
    fn admit(&self, concept: ConceptId, out: &mut HashSet<ConceptId>) {
        if self.input_concepts.contains(&concept) {
            out.insert(concept);
        }
    }

    /// Witness lookup and creation for ∃-rule 1. The index covers both
    /// settled and freshly staged elements, so one filler never gets two
    /// witnesses within a sweep.
    fn ensure_individual(&mut self, initial_concept: ConceptId) -> usize {
        if let Some(&index) = self.by_initial.get(&initial_concept) {
            return index;
        }
        let index = self.individuals.len();
        self.individuals
            .push(Individual::new(initial_concept, self.top));
        self.by_initial.insert(initial_concept, index);
        index
    }
}
