// Copyright 2025 The Trolldoc Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::collections::HashMap;
use std::io::Read;

use crate::common::{canonicalize, Error, ErrorCode, ErrorKind, Ident, Result};

/// A flat key/value table loaded from `;`-delimited text.
///
/// Two instances drive the pipeline: parameter values and variable legends.
/// Keys are canonicalized to match equation-name normalization. Tables are
/// hand-edited, so duplicate keys are tolerated (last occurrence wins) and
/// rows with fewer than two fields are skipped.
#[derive(Clone, Debug, Default)]
pub struct LookupTable {
    entries: HashMap<Ident, String>,
}

impl LookupTable {
    pub fn new() -> LookupTable {
        Default::default()
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<LookupTable> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut entries = HashMap::new();
        for record in rdr.records() {
            let record = record.map_err(|err| {
                Error::new(ErrorKind::Import, ErrorCode::BadTable, Some(err.to_string()))
            })?;
            if record.len() < 2 {
                continue;
            }
            let key = canonicalize(&record[0]);
            if key.is_empty() {
                continue;
            }
            entries.insert(key, record[1].trim().to_owned());
        }

        Ok(LookupTable { entries })
    }

    /// Missing keys are not errors; callers apply their own defaults (an
    /// absent legend is the empty string, an absent parameter leaves the
    /// token unchanged).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(|value| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
