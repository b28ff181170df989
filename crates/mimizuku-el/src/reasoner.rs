//! EL リーナー

use crate::completion::CompletionModel;
use crate::ontology::Ontology;
use crate::ElError;
use mimizuku_core::{ConceptId, Gci, TermStore};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// A query operand: an interned id, or the bare name of a declared concept
#[derive(Debug, Clone, Copy)]
pub enum ConceptRef<'a> {
    Id(ConceptId),
    Named(&'a str),
}

impl From<ConceptId> for ConceptRef<'_> {
    fn from(id: ConceptId) -> Self {
        ConceptRef::Id(id)
    }
}

impl<'a> From<&'a str> for ConceptRef<'a> {
    fn from(name: &'a str) -> Self {
        ConceptRef::Named(name)
    }
}

/// EL reasoner over one loaded ontology.
///
/// Subsumption questions each build a fresh completion model; the hierarchy
/// of named concepts is accumulated across queries and transitively closed.
pub struct ElReasoner {
    store: TermStore,
    ontology: Ontology,
    gcis: Vec<Gci>,
    hierarchy: HashMap<ConceptId, HashSet<ConceptId>>,
    is_classified: bool,
}

impl ElReasoner {
    pub fn new(store: TermStore, ontology: Ontology) -> Self {
        let gcis = ontology.tbox.normalize();
        Self {
            store,
            ontology,
            gcis,
            hierarchy: HashMap::new(),
            is_classified: false,
        }
    }

    pub fn store(&self) -> &TermStore {
        &self.store
    }

    pub fn ontology(&self) -> &Ontology {
        &self.ontology
    }

    /// The normalized TBox driving the ⊑-rule
    pub fn gcis(&self) -> &[Gci] {
        &self.gcis
    }

    /// Decide whether `subsumee` ⊑ `subsumer` holds under the ontology
    pub fn is_subsumed_by<'a>(
        &self,
        subsumee: impl Into<ConceptRef<'a>>,
        subsumer: impl Into<ConceptRef<'a>>,
    ) -> Result<bool, ElError> {
        let subsumee = self.resolve(subsumee.into())?;
        let subsumer = self.resolve(subsumer.into())?;
        info!(
            subsumee = %self.store.render(subsumee),
            subsumer = %self.store.render(subsumer),
            "checking subsumption"
        );

        let (holds, _) = self.run_completion(subsumee, subsumer)?;
        Ok(holds)
    }

    /// All named subsumers of `subsumee`, plus ⊤
    pub fn get_subsumers<'a>(
        &mut self,
        subsumee: impl Into<ConceptRef<'a>>,
    ) -> Result<HashSet<ConceptId>, ElError> {
        let subsumee = self.resolve(subsumee.into())?;
        if !self.is_classified || !self.hierarchy.contains_key(&subsumee) {
            self.fill_all_subsumers(subsumee)?;
        }
        Ok(self.hierarchy[&subsumee].clone())
    }

    /// Compute the full subsumption hierarchy over every declared name
    pub fn classify(&mut self) -> Result<&HashMap<ConceptId, HashSet<ConceptId>>, ElError> {
        info!(names = self.ontology.concept_names.len(), "classifying ontology");

        let names: Vec<ConceptId> = self.ontology.concept_names.iter().copied().collect();
        for name in names {
            if !self.hierarchy.contains_key(&name) {
                self.compute_subsumers(name)?;
            }
        }
        self.complete_hierarchy()?;
        self.is_classified = true;
        Ok(&self.hierarchy)
    }

    /// The hierarchy accumulated so far
    pub fn hierarchy(&self) -> &HashMap<ConceptId, HashSet<ConceptId>> {
        &self.hierarchy
    }

    /// Resolve an operand and reject anything outside the concept universe
    fn resolve(&self, operand: ConceptRef<'_>) -> Result<ConceptId, ElError> {
        let id = match operand {
            ConceptRef::Id(id) => id,
            ConceptRef::Named(name) => {
                if name == "top" || name == "⊤" {
                    self.store.top()
                } else {
                    self.store
                        .lookup_name(name)
                        .ok_or_else(|| ElError::UnknownConcept(name.to_string()))?
                }
            }
        };
        if !self.ontology.concepts.contains(&id) {
            return Err(ElError::UnknownConcept(self.store.render(id)));
        }
        Ok(id)
    }

    /// Build and saturate a fresh model seeded with `subsumee`; return the
    /// answer together with the initial element's full label set.
    fn run_completion(
        &self,
        subsumee: ConceptId,
        subsumer: ConceptId,
    ) -> Result<(bool, HashSet<ConceptId>), ElError> {
        let mut input_concepts = self.ontology.concepts.clone();
        input_concepts.insert(subsumee);
        input_concepts.insert(subsumer);

        let mut model = CompletionModel::new(&self.store, input_concepts, &self.gcis);
        model.initialize(subsumee, subsumer);
        let holds = model.apply_rules()?;
        let labels = model.initial_labels()?.clone();
        Ok((holds, labels))
    }

    /// Pointwise subsumers of one concept: the named labels of the initial
    /// element, plus ⊤
    fn compute_subsumers(&mut self, subsumee: ConceptId) -> Result<(), ElError> {
        debug!(subsumee = %self.store.render(subsumee), "computing subsumers");

        let top = self.store.top();
        let (_, labels) = self.run_completion(subsumee, top)?;

        let entry = self.hierarchy.entry(subsumee).or_default();
        for concept in labels {
            if concept == top || self.store.is_name(concept) {
                entry.insert(concept);
            }
        }
        Ok(())
    }

    /// Saturate H[subsumee] with the subsumers of its subsumers, computing
    /// missing entries on demand, until nothing new appears
    fn fill_all_subsumers(&mut self, subsumee: ConceptId) -> Result<(), ElError> {
        if !self.hierarchy.contains_key(&subsumee) {
            self.compute_subsumers(subsumee)?;
        }

        loop {
            let current: Vec<ConceptId> = self.hierarchy[&subsumee].iter().copied().collect();
            for subsumer in &current {
                if !self.hierarchy.contains_key(subsumer) {
                    self.compute_subsumers(*subsumer)?;
                }
            }

            let mut added: HashSet<ConceptId> = HashSet::new();
            {
                let own = &self.hierarchy[&subsumee];
                for subsumer in &current {
                    added.extend(self.hierarchy[subsumer].difference(own).copied());
                }
            }
            if added.is_empty() {
                return Ok(());
            }
            self.hierarchy.get_mut(&subsumee).unwrap().extend(added);
        }
    }

    /// Transitive-closure pass over every populated hierarchy entry
    fn complete_hierarchy(&mut self) -> Result<(), ElError> {
        let keys: Vec<ConceptId> = self.hierarchy.keys().copied().collect();
        for key in keys {
            self.fill_all_subsumers(key)?;
        }
        Ok(())
    }
}
