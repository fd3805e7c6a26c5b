// Copyright 2025 The Trolldoc Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! The document model handed to renderers.
//!
//! These are plain-data types: no engine internals leak through, and a
//! renderer (HTML, JSON, anything else) only ever reads them.

use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Equation {
    /// Canonical name of the endogenous variable this equation determines.
    pub name: String,
    /// Human-readable label from the legend table; empty when the table has
    /// no entry for `name`.
    pub legend: String,
    /// The defining text exactly as parsed.
    pub raw_expression: String,
    /// `raw_expression` after parameter substitution and cross-reference
    /// anchoring; final markup.
    pub rendered_expression: String,
    /// Names of other equations this expression references, in first-mention
    /// order. Self-references are excluded.
    pub variables: Vec<String>,
    /// Names of the equations whose expressions reference this one, in
    /// source order. Self-references are excluded.
    pub appears_in: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Region {
    pub name: String,
    pub equations: Vec<Equation>,
}

impl Region {
    /// Regions with an empty name are rendered in the equation list but
    /// kept out of the table of contents.
    pub fn in_toc(&self) -> bool {
        !self.name.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    pub regions: Vec<Region>,
}

impl Document {
    /// All equations across regions, in source order.
    pub fn equations(&self) -> impl Iterator<Item = &Equation> {
        self.regions.iter().flat_map(|region| region.equations.iter())
    }

    pub fn equation_count(&self) -> usize {
        self.regions.iter().map(|region| region.equations.len()).sum()
    }

    pub fn get(&self, name: &str) -> Option<&Equation> {
        self.equations().find(|eq| eq.name == name)
    }
}
