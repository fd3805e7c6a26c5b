// Copyright 2025 The Trolldoc Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Token-level rewriting of a single equation's expression text.
//!
//! Both passes work on lexer identifier boundaries, so a parameter or
//! variable name inside a longer identifier never matches.

use crate::common::EquationResult;
use crate::lookup::LookupTable;
use crate::token::{Lexer, Token};

/// Replace parameter-name tokens with their table values.
///
/// Substitution is a single pass over the token stream: spliced-in value
/// text is never re-scanned, so a parameter value that happens to spell
/// another parameter's name stays as-is.
pub(crate) fn substitute_parameters(expr: &str, params: &LookupTable) -> EquationResult<String> {
    rewrite(expr, false, |ident| {
        params.get(ident).map(|value| value.to_owned())
    })
}

/// Rewrite identifier tokens via `resolve`, HTML-escaping all other text.
///
/// This is the cross-reference pass: `resolve` returns anchor markup for
/// identifiers that name an equation. Because the surrounding text is
/// escaped here, the result is final markup ready for the renderer.
pub(crate) fn link_identifiers<F>(expr: &str, resolve: F) -> EquationResult<String>
where
    F: FnMut(&str) -> Option<String>,
{
    rewrite(expr, true, resolve)
}

/// Anchor markup for a variable occurrence. An equation referencing its own
/// name gets a distinguishing class so renderers can style the defined
/// variable differently.
pub(crate) fn anchor(name: &str, is_main: bool) -> String {
    if is_main {
        format!("<a href=\"#{name}\" class=\"main_variable\">{name}</a>")
    } else {
        format!("<a href=\"#{name}\">{name}</a>")
    }
}

fn rewrite<F>(expr: &str, escape_gaps: bool, mut resolve: F) -> EquationResult<String>
where
    F: FnMut(&str) -> Option<String>,
{
    let mut out = String::with_capacity(expr.len());
    let mut last = 0;
    for spanned in Lexer::new(expr) {
        let (start, tok, end) = spanned?;
        if let Token::Ident(ident) = tok {
            if let Some(replacement) = resolve(ident) {
                push_gap(&mut out, &expr[last..start], escape_gaps);
                out.push_str(&replacement);
                last = end;
            }
        }
    }
    push_gap(&mut out, &expr[last..], escape_gaps);
    Ok(out)
}

fn push_gap(out: &mut String, text: &str, escape: bool) {
    if escape {
        for c in text.chars() {
            match c {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                _ => out.push(c),
            }
        }
    } else {
        out.push_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ErrorCode;

    fn params(input: &str) -> LookupTable {
        LookupTable::from_reader(input.as_bytes()).unwrap()
    }

    #[test]
    fn substitutes_whole_tokens_only() {
        let table = params("alpha;0.5\n");
        let out = substitute_parameters("y = alpha * x + alpha2", &table).unwrap();
        assert_eq!("y = 0.5 * x + alpha2", out);
    }

    #[test]
    fn substitutes_every_occurrence() {
        let table = params("alpha;0.5\n");
        let out = substitute_parameters("y = alpha + alpha", &table).unwrap();
        assert_eq!("y = 0.5 + 0.5", out);
    }

    #[test]
    fn substitution_is_not_recursive() {
        // `a` maps to the name of another parameter; the spliced-in text
        // must not be substituted again
        let table = params("a;b\nb;9\n");
        let out = substitute_parameters("q = a", &table).unwrap();
        assert_eq!("q = b", out);
    }

    #[test]
    fn unknown_parameters_pass_through() {
        let table = params("alpha;0.5\n");
        let out = substitute_parameters("y = beta * x", &table).unwrap();
        assert_eq!("y = beta * x", out);
    }

    #[test]
    fn substitution_does_not_escape() {
        let table = params("alpha;0.5\n");
        let out = substitute_parameters("y = alpha * (x <= 3)", &table).unwrap();
        assert_eq!("y = 0.5 * (x <= 3)", out);
    }

    #[test]
    fn links_and_escapes() {
        let out = link_identifiers("y = c + (x <= 3)", |ident| {
            if ident == "c" {
                Some(anchor(ident, false))
            } else {
                None
            }
        })
        .unwrap();
        assert_eq!("y = <a href=\"#c\">c</a> + (x &lt;= 3)", out);
    }

    #[test]
    fn main_anchor_carries_class() {
        assert_eq!(
            "<a href=\"#pib\" class=\"main_variable\">pib</a>",
            anchor("pib", true)
        );
    }

    #[test]
    fn bad_token_aborts_rewrite() {
        let table = params("alpha;0.5\n");
        let err = substitute_parameters("y = alpha $ x", &table).unwrap_err();
        assert_eq!(ErrorCode::UnrecognizedToken, err.code);
    }
}
