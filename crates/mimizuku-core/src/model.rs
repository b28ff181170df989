//! EL 概念・公理のデータモデル

use serde::{Deserialize, Serialize};

/// Identifier of an interned concept expression.
///
/// Structurally equal concepts share one id, so equality and hashing on
/// `ConceptId` decide structural equality of the expressions themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConceptId(pub u32);

/// Identifier of an interned role name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoleId(pub u32);

/// Identifier of an interned concept name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NameId(pub u32);

/// EL concept expression
///
/// Conjunction is kept in the binary form it was entered in; `Conj(a, b)`
/// and `Conj(b, a)` are distinct expressions with distinct ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Concept {
    /// ⊤ (top concept)
    Top,

    /// Named concept
    Name(NameId),

    /// Binary conjunction: C ⊓ D
    Conj(ConceptId, ConceptId),

    /// Existential restriction: ∃r.C
    Exist(RoleId, ConceptId),
}

/// General concept inclusion: lhs ⊑ rhs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Gci {
    pub lhs: ConceptId,
    pub rhs: ConceptId,
}

/// TBox axiom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axiom {
    /// lhs ⊑ rhs
    Gci(Gci),

    /// lhs ≡ rhs
    Equiv(ConceptId, ConceptId),
}
