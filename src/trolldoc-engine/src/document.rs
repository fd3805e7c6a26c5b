// Copyright 2025 The Trolldoc Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Pipeline assembly: parse the model, apply the lookup tables, build the
//! cross-reference graph, and group equations into regions.

use std::collections::HashMap;

use crate::common::{EquationError, Error, ErrorKind, Result};
use crate::datamodel::{Document, Equation, Region};
use crate::doc_err;
use crate::equation::{anchor, link_identifiers, substitute_parameters};
use crate::lookup::LookupTable;
use crate::troll;

/// Run the whole extraction pipeline over TROLL source text.
///
/// Cross-referencing is inherently two-pass: an equation defined late in the
/// source can be referenced by one defined early, so the complete name set
/// is materialized before any single equation's references are resolved.
/// The second pass only ever rewrites `rendered_expression` and appends to
/// `variables`/`appears_in`; it never removes or reorders equations.
pub fn build_document(
    source: &str,
    params: &LookupTable,
    legends: &LookupTable,
) -> Result<Document> {
    let raw = troll::parse_source(source)?;

    // pass one: the complete name set, with uniqueness enforced
    let mut index: HashMap<String, usize> = HashMap::with_capacity(raw.len());
    for (i, eq) in raw.iter().enumerate() {
        if index.insert(eq.name.as_str().to_owned(), i).is_some() {
            return doc_err!(
                DuplicateVariable,
                format!(
                    "the variable `{}` is defined by more than one equation",
                    eq.name
                )
            );
        }
    }

    let mut equations: Vec<Equation> = Vec::with_capacity(raw.len());
    for eq in &raw {
        let rendered = substitute_parameters(&eq.expression, params)
            .map_err(|err| in_equation(eq.name.as_str(), err))?;
        equations.push(Equation {
            name: eq.name.as_str().to_owned(),
            legend: legends.get(eq.name.as_str()).unwrap_or("").to_owned(),
            raw_expression: eq.expression.clone(),
            rendered_expression: rendered,
            variables: Vec::new(),
            appears_in: Vec::new(),
        });
    }

    // pass two: resolve references now that every equation is known
    for i in 0..equations.len() {
        let expr = equations[i].rendered_expression.clone();
        let mut referenced: Vec<usize> = Vec::new();
        let rendered = link_identifiers(&expr, |ident| {
            let j = *index.get(ident)?;
            if j != i && !referenced.contains(&j) {
                referenced.push(j);
            }
            Some(anchor(ident, j == i))
        })
        .map_err(|err| in_equation(&equations[i].name, err))?;

        let variables: Vec<String> = referenced
            .iter()
            .map(|&j| equations[j].name.clone())
            .collect();
        equations[i].rendered_expression = rendered;
        equations[i].variables = variables;

        let referer = equations[i].name.clone();
        for &j in &referenced {
            equations[j].appears_in.push(referer.clone());
        }
    }

    Ok(Document {
        regions: group_regions(equations),
    })
}

fn in_equation(name: &str, err: EquationError) -> Error {
    Error::new(
        ErrorKind::Parse,
        err.code,
        Some(format!("in equation `{name}`: {err}")),
    )
}

/// Bucket equations into regions by naming-convention prefix, preserving
/// first-seen region order and source order within each region.
///
/// This is a derived projection over the equation sequence: rebuilding it
/// from the same input is deterministic and has no side effects.
fn group_regions(equations: Vec<Equation>) -> Vec<Region> {
    let mut regions: Vec<Region> = Vec::new();
    let mut by_name: HashMap<String, usize> = HashMap::new();

    for eq in equations {
        let key = region_key(&eq.name).to_owned();
        let idx = match by_name.get(&key) {
            Some(&idx) => idx,
            None => {
                by_name.insert(key.clone(), regions.len());
                regions.push(Region {
                    name: key,
                    equations: Vec::new(),
                });
                regions.len() - 1
            }
        };
        regions[idx].equations.push(eq);
    }

    regions
}

/// Grouping key: the name's prefix up to the first `_` or `.`, or the whole
/// name when it has neither. A leading separator yields the empty key.
fn region_key(name: &str) -> &str {
    match name.find(|c| c == '_' || c == '.') {
        Some(idx) => &name[..idx],
        None => name,
    }
}
