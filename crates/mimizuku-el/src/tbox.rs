//! TBox 正規化

use mimizuku_core::{Axiom, Gci};
use serde::{Deserialize, Serialize};

/// Terminological box: the axiom set constraining concepts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TBox {
    axioms: Vec<Axiom>,
}

impl TBox {
    pub fn new(axioms: Vec<Axiom>) -> Self {
        Self { axioms }
    }

    pub fn push(&mut self, axiom: Axiom) {
        self.axioms.push(axiom);
    }

    pub fn axioms(&self) -> &[Axiom] {
        &self.axioms
    }

    /// Rewrite every equivalence into its pair of inclusions, to fixed point.
    ///
    /// A ≡ B becomes {A ⊑ B, B ⊑ A}; inclusions are kept verbatim. One pass
    /// eliminates all equivalences; the loop tolerates axiom forms that could
    /// themselves expand into equivalences again. Right-hand conjunctions are
    /// NOT decomposed here; the first conjunction rule of the completion
    /// model covers them.
    pub fn normalize(&self) -> Vec<Gci> {
        let mut pending = self.axioms.clone();
        let mut gcis = Vec::with_capacity(pending.len());

        while !pending.is_empty() {
            let mut next = Vec::new();
            for axiom in pending {
                match axiom {
                    Axiom::Gci(gci) => gcis.push(gci),
                    Axiom::Equiv(a, b) => {
                        next.push(Axiom::Gci(Gci { lhs: a, rhs: b }));
                        next.push(Axiom::Gci(Gci { lhs: b, rhs: a }));
                    }
                }
            }
            pending = next;
        }

        // Set semantics with a stable iteration order for the ⊑-rule.
        gcis.sort_unstable();
        gcis.dedup();
        gcis
    }
}
