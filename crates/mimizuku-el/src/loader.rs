//! ELオントロジーローダー
//!
//! 行ベースのテキスト形式を読み込みます:
//! - `#` で始まる行はコメント
//! - `lhs <= rhs` は包含公理、`lhs == rhs` は等価公理
//! - 区切りのない行は概念の宣言
//!
//! 概念の文法: `top` / 概念名 / `and (C D ...)` / `some r.C`

use crate::ontology::Ontology;
use crate::ElError;
use mimizuku_core::{Axiom, ConceptId, TermStore};
use std::path::Path;
use tracing::info;

/// Load an ontology file from disk
pub fn load_ontology(store: &mut TermStore, path: &Path) -> Result<Ontology, ElError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| ElError::ParseError(format!("cannot read {}: {}", path.display(), e)))?;
    parse_ontology(store, &text)
}

/// Parse ontology text, one axiom or declaration per line
pub fn parse_ontology(store: &mut TermStore, text: &str) -> Result<Ontology, ElError> {
    let mut ontology = Ontology::new(store);

    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        parse_line(store, &mut ontology, line).map_err(|err| match err {
            ElError::ParseError(msg) => {
                ElError::ParseError(format!("line {}: {}", index + 1, msg))
            }
            other => other,
        })?;
    }

    info!(
        axioms = ontology.tbox.axioms().len(),
        names = ontology.concept_names.len(),
        concepts = ontology.concepts.len(),
        "ontology loaded"
    );
    Ok(ontology)
}

fn parse_line(store: &mut TermStore, ontology: &mut Ontology, line: &str) -> Result<(), ElError> {
    if let Some(index) = line.find("==") {
        let lhs = parse_concept(store, &line[..index])?;
        let rhs = parse_concept(store, &line[index + 2..])?;
        ontology.add_axiom(store, Axiom::Equiv(lhs, rhs));
    } else if let Some(index) = line.find("<=") {
        let lhs = parse_concept(store, &line[..index])?;
        let rhs = parse_concept(store, &line[index + 2..])?;
        let axiom = store.gci(lhs, rhs);
        ontology.add_axiom(store, axiom);
    } else {
        // A bare concept declares itself into the universe without an axiom.
        let concept = parse_concept(store, line)?;
        ontology.declare(store, concept);
    }
    Ok(())
}

/// Parse a single concept expression
pub fn parse_concept(store: &mut TermStore, input: &str) -> Result<ConceptId, ElError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(ElError::ParseError("empty concept".to_string()));
    }

    if s.starts_with('(') {
        if outer_wrap(s) {
            return parse_concept(store, &s[1..s.len() - 1]);
        }
        return Err(ElError::ParseError(format!("unbalanced brackets in '{}'", s)));
    }

    if s == "top" || s == "⊤" {
        return Ok(store.top());
    }

    if let Some(rest) = keyword(s, "and") {
        return parse_conjunction(store, rest.trim());
    }

    if let Some(rest) = keyword(s, "some") {
        return parse_existential(store, rest.trim());
    }

    // Constructors beyond EL are recognized so they fail loudly.
    for kw in ["or", "not", "only"] {
        if keyword(s, kw).is_some() {
            return Err(ElError::NotInEl(s.to_string()));
        }
    }

    parse_name(store, s)
}

/// `and (C D ...)`; n-ary lists are split into left-nested binary conjunctions
fn parse_conjunction(store: &mut TermStore, rest: &str) -> Result<ConceptId, ElError> {
    let inner = rest
        .strip_prefix('(')
        .and_then(|r| r.strip_suffix(')'))
        .ok_or_else(|| {
            ElError::ParseError(format!("expected bracketed conjunct list, got '{}'", rest))
        })?;

    let items = split_items(inner)?;
    if items.len() < 2 {
        return Err(ElError::ParseError(format!(
            "conjunction needs at least two conjuncts, got {}",
            items.len()
        )));
    }

    let mut ids = Vec::with_capacity(items.len());
    for item in items {
        ids.push(parse_concept(store, item)?);
    }
    let mut acc = store.conj(ids[0], ids[1]);
    for &id in &ids[2..] {
        acc = store.conj(acc, id);
    }
    Ok(acc)
}

/// `some r.C`
fn parse_existential(store: &mut TermStore, rest: &str) -> Result<ConceptId, ElError> {
    let dot = rest
        .find('.')
        .ok_or_else(|| ElError::ParseError(format!("expected 'role.filler', got '{}'", rest)))?;

    let role_name = rest[..dot].trim();
    if role_name.is_empty() || role_name.chars().any(|ch| ch.is_whitespace() || "()=.#".contains(ch))
    {
        return Err(ElError::ParseError(format!("invalid role name '{}'", role_name)));
    }

    let role = store.role(role_name);
    let filler = parse_concept(store, &rest[dot + 1..])?;
    Ok(store.exist(role, filler))
}

fn parse_name(store: &mut TermStore, s: &str) -> Result<ConceptId, ElError> {
    if s.chars().any(|ch| ch.is_whitespace() || "()=.#".contains(ch)) {
        return Err(ElError::ParseError(format!("invalid concept name '{}'", s)));
    }
    Ok(store.name(s))
}

/// `kw` followed by a boundary character (or nothing)
fn keyword<'a>(s: &'a str, kw: &str) -> Option<&'a str> {
    let rest = s.strip_prefix(kw)?;
    match rest.chars().next() {
        None => Some(rest),
        Some(ch) if ch.is_whitespace() || ch == '(' => Some(rest),
        Some(_) => None,
    }
}

/// Whether the bracket opened at byte 0 closes at the final byte
fn outer_wrap(s: &str) -> bool {
    let mut depth = 0usize;
    for (i, ch) in s.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                if depth == 0 {
                    return false;
                }
                depth -= 1;
                if depth == 0 {
                    return i == s.len() - 1;
                }
            }
            _ => {}
        }
    }
    false
}

/// Split a conjunct list on top-level whitespace; bracketed items stay whole
fn split_items(list: &str) -> Result<Vec<&str>, ElError> {
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut start: Option<usize> = None;

    for (i, ch) in list.char_indices() {
        match ch {
            '(' => {
                if start.is_none() {
                    start = Some(i);
                }
                depth += 1;
            }
            ')' => {
                if depth == 0 {
                    return Err(ElError::ParseError(format!(
                        "unbalanced brackets in '{}'",
                        list
                    )));
                }
                depth -= 1;
            }
            ch if ch.is_whitespace() && depth == 0 => {
                if let Some(s0) = start.take() {
                    items.push(&list[s0..i]);
                }
            }
            _ => {
                if start.is_none() {
                    start = Some(i);
                }
            }
        }
    }
    if depth != 0 {
        return Err(ElError::ParseError(format!(
            "unbalanced brackets in '{}'",
            list
        )));
    }
    if let Some(s0) = start {
        items.push(&list[s0..]);
    }
    Ok(items)
}
