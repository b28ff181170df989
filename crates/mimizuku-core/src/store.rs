//! 概念項のインターニングストア

use crate::model::{Axiom, Concept, ConceptId, Gci, NameId, RoleId};
use std::collections::HashMap;

/// Hash-consing store for concepts, roles, and names.
///
/// All concept identity used by the reasoner comes from this store: two
/// structurally equal expressions intern to the same `ConceptId`. The store
/// is an explicit value threaded through the core, not a process-wide pool.
#[derive(Debug, Clone)]
pub struct TermStore {
    concepts: Vec<Concept>,
    concept_ids: HashMap<Concept, ConceptId>,
    names: Vec<String>,
    name_ids: HashMap<String, NameId>,
    roles: Vec<String>,
    role_ids: HashMap<String, RoleId>,
    top: ConceptId,
}

impl TermStore {
    pub fn new() -> Self {
        let mut store = Self {
            concepts: Vec::new(),
            concept_ids: HashMap::new(),
            names: Vec::new(),
            name_ids: HashMap::new(),
            roles: Vec::new(),
            role_ids: HashMap::new(),
            top: ConceptId(0),
        };
        store.top = store.intern(Concept::Top);
        store
    }

    fn intern(&mut self, concept: Concept) -> ConceptId {
        if let Some(&id) = self.concept_ids.get(&concept) {
            return id;
        }
        let id = ConceptId(self.concepts.len() as u32);
        self.concepts.push(concept);
        self.concept_ids.insert(concept, id);
        id
    }

    /// The ⊤ concept
    pub fn top(&self) -> ConceptId {
        self.top
    }

    /// Intern a named concept
    pub fn name(&mut self, name: &str) -> ConceptId {
        let name_id = match self.name_ids.get(name) {
            Some(&id) => id,
            None => {
                let id = NameId(self.names.len() as u32);
                self.names.push(name.to_string());
                self.name_ids.insert(name.to_string(), id);
                id
            }
        };
        self.intern(Concept::Name(name_id))
    }

    /// Intern a role name
    pub fn role(&mut self, name: &str) -> RoleId {
        if let Some(&id) = self.role_ids.get(name) {
            return id;
        }
        let id = RoleId(self.roles.len() as u32);
        self.roles.push(name.to_string());
        self.role_ids.insert(name.to_string(), id);
        id
    }

    /// Intern the binary conjunction lhs ⊓ rhs, in that operand order
    pub fn conj(&mut self, lhs: ConceptId, rhs: ConceptId) -> ConceptId {
        self.intern(Concept::Conj(lhs, rhs))
    }

    /// Intern the existential restriction ∃role.filler
    pub fn exist(&mut self, role: RoleId, filler: ConceptId) -> ConceptId {
        self.intern(Concept::Exist(role, filler))
    }

    /// Build a general concept inclusion axiom lhs ⊑ rhs
    pub fn gci(&self, lhs: ConceptId, rhs: ConceptId) -> Axiom {
        Axiom::Gci(Gci { lhs, rhs })
    }

    /// The expression behind an id
    pub fn concept(&self, id: ConceptId) -> Concept {
        self.concepts[id.0 as usize]
    }

    /// Whether the id denotes a named concept
    pub fn is_name(&self, id: ConceptId) -> bool {
        matches!(self.concept(id), Concept::Name(_))
    }

    /// Resolve a concept name without interning it
    pub fn lookup_name(&self, name: &str) -> Option<ConceptId> {
        let name_id = self.name_ids.get(name)?;
        self.concept_ids.get(&Concept::Name(*name_id)).copied()
    }

    /// Resolve lhs ⊓ rhs without interning it.
    ///
    /// A conjunction never interned cannot be a member of any input-concept
    /// set, so the completion rules use this to test candidates read-only.
    pub fn lookup_conj(&self, lhs: ConceptId, rhs: ConceptId) -> Option<ConceptId> {
        self.concept_ids.get(&Concept::Conj(lhs, rhs)).copied()
    }

    /// Resolve ∃role.filler without interning it
    pub fn lookup_exist(&self, role: RoleId, filler: ConceptId) -> Option<ConceptId> {
        self.concept_ids.get(&Concept::Exist(role, filler)).copied()
    }

    /// Text of a role id
    pub fn role_name(&self, id: RoleId) -> &str {
        &self.roles[id.0 as usize]
    }

    /// Text of a concept name id
    pub fn name_text(&self, id: NameId) -> &str {
        &self.names[id.0 as usize]
    }

    /// Number of interned concepts
    pub fn concept_count(&self) -> usize {
        self.concepts.len()
    }

    /// Render a concept in the loader's surface syntax; ⊤ renders as "⊤"
    pub fn render(&self, id: ConceptId) -> String {
        match self.concept(id) {
            Concept::Top => "⊤".to_string(),
            Concept::Name(name) => self.name_text(name).to_string(),
            Concept::Conj(lhs, rhs) => {
                format!("and ({} {})", self.render_item(lhs), self.render_item(rhs))
            }
            Concept::Exist(role, filler) => {
                format!("some {}.{}", self.role_name(role), self.render_item(filler))
            }
        }
    }

    // Compound sub-expressions are parenthesized so rendered text re-parses.
    fn render_item(&self, id: ConceptId) -> String {
        match self.concept(id) {
            Concept::Top | Concept::Name(_) => self.render(id),
            _ => format!("({})", self.render(id)),
        }
    }
}

impl Default for TermStore {
    fn default() -> Self {
        Self::new()
    }
}
