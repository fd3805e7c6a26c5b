// Copyright 2025 The Trolldoc Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::fmt;
use std::{error, result};

/// A canonicalized variable or parameter name.
///
/// Canonical form is trimmed and lower-cased; every name comparison in the
/// engine happens between canonical idents, which is what makes reference
/// matching case-insensitive.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ident(String);

impl Ident {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Ident {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// lets HashMap<Ident, _> be queried with a plain &str
impl std::borrow::Borrow<str> for Ident {
    fn borrow(&self) -> &str {
        &self.0
    }
}

pub fn canonicalize(name: &str) -> Ident {
    Ident(name.trim().to_lowercase())
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NoError, // will never be produced
    UnrecognizedToken,
    UnclosedComment,
    UnterminatedBlock,
    ExpectedDefinition,
    ExpectedEquals,
    EmptyEquation,
    EmptyModel,
    DuplicateVariable,
    BadTable,
    Generic,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ErrorCode::*;
        let name = match self {
            NoError => "no_error",
            UnrecognizedToken => "unrecognized_token",
            UnclosedComment => "unclosed_comment",
            UnterminatedBlock => "unterminated_block",
            ExpectedDefinition => "expected_definition",
            ExpectedEquals => "expected_equals",
            EmptyEquation => "empty_equation",
            EmptyModel => "empty_model",
            DuplicateVariable => "duplicate_variable",
            BadTable => "bad_table",
            Generic => "generic",
        };

        write!(f, "{name}")
    }
}

/// An error at a byte span inside a single expression.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EquationError {
    pub start: u16,
    pub end: u16,
    pub code: ErrorCode,
}

impl fmt::Display for EquationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}:{}", self.start, self.end, self.code)
    }
}

/// Which pipeline stage an error surfaced in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Import,
    Parse,
    Document,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    pub kind: ErrorKind,
    pub code: ErrorCode,
    pub details: Option<String>,
}

impl Error {
    pub fn new(kind: ErrorKind, code: ErrorCode, details: Option<String>) -> Self {
        Error {
            kind,
            code,
            details,
        }
    }

    pub fn get_details(&self) -> Option<String> {
        self.details.clone()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let kind = match self.kind {
            ErrorKind::Import => "ImportError",
            ErrorKind::Parse => "ParseError",
            ErrorKind::Document => "DocumentError",
        };
        match self.details {
            Some(ref details) => write!(f, "{}{{{}: {}}}", kind, self.code, details),
            None => write!(f, "{}{{{}}}", kind, self.code),
        }
    }
}

impl error::Error for Error {}

pub type Result<T> = result::Result<T, Error>;
pub type EquationResult<T> = result::Result<T, EquationError>;

#[macro_export]
macro_rules! parse_err(
    ($code:tt, $str:expr) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(
            ErrorKind::Parse,
            ErrorCode::$code,
            Some($str),
        ))
    }};
    ($code:tt) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(ErrorKind::Parse, ErrorCode::$code, None))
    }};
);

#[macro_export]
macro_rules! doc_err(
    ($code:tt, $str:expr) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(
            ErrorKind::Document,
            ErrorCode::$code,
            Some($str),
        ))
    }};
);

#[test]
fn test_canonicalize() {
    assert_eq!("pib", canonicalize("PIB").as_str());
    assert_eq!("pib.fr", canonicalize("  Pib.FR ").as_str());
    assert_eq!("log_gdp", canonicalize("LOG_GDP").as_str());
    assert_eq!("", canonicalize("   ").as_str());
}

#[test]
fn test_ident_borrow() {
    use std::collections::HashMap;

    let mut map: HashMap<Ident, usize> = HashMap::new();
    map.insert(canonicalize("PIB"), 0);
    assert_eq!(Some(&0), map.get("pib"));
    assert_eq!(None, map.get("PIB"));
}

#[test]
fn test_error_display() {
    let err = Error::new(
        ErrorKind::Parse,
        ErrorCode::ExpectedEquals,
        Some("statement `c: 3` at byte 12 has no `=`".to_owned()),
    );
    assert_eq!(
        "ParseError{expected_equals: statement `c: 3` at byte 12 has no `=`}",
        format!("{err}")
    );

    let err = Error::new(ErrorKind::Document, ErrorCode::DuplicateVariable, None);
    assert_eq!("DocumentError{duplicate_variable}", format!("{err}"));
}

#[test]
fn test_equation_error_display() {
    let err = EquationError {
        start: 3,
        end: 5,
        code: ErrorCode::UnrecognizedToken,
    };
    assert_eq!("3:5:unrecognized_token", format!("{err}"));
}
