// Copyright 2025 The Trolldoc Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

#![forbid(unsafe_code)]

pub mod common;
pub mod datamodel;
mod document;
mod equation;
mod lookup;
mod token;
pub mod troll;

pub use self::common::{canonicalize, Error, ErrorCode, ErrorKind, Ident, Result};
pub use self::datamodel::{Document, Equation, Region};
pub use self::document::build_document;
pub use self::lookup::LookupTable;
