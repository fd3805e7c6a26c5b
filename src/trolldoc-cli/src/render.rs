// Copyright 2025 The Trolldoc Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! HTML rendering of the finished document model.
//!
//! The engine hands over a `Document` whose `rendered_expression` fields are
//! already final markup (escaped text plus anchors); everything else is
//! escaped here.

use std::fmt::Write;

use trolldoc_engine::{Document, Equation, Region};

pub fn render_html(document: &Document) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    render_into(document, &mut out).unwrap();
    out
}

fn render_into(document: &Document, out: &mut String) -> std::fmt::Result {
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html lang=\"en\">")?;
    writeln!(out, "<head>")?;
    writeln!(out, "<meta charset=\"utf-8\">")?;
    writeln!(out, "<title>Model documentation</title>")?;
    writeln!(out, "<style>")?;
    writeln!(out, "body {{ font-family: sans-serif; margin: 2em; }}")?;
    writeln!(out, ".equation {{ font-family: monospace; }}")?;
    writeln!(out, ".legend {{ font-style: italic; }}")?;
    writeln!(out, "a.main_variable {{ font-weight: bold; }}")?;
    writeln!(out, "</style>")?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;
    writeln!(out, "<h1>Model documentation</h1>")?;
    writeln!(
        out,
        "<p>{} equations in {} regions.</p>",
        document.equation_count(),
        document.regions.len()
    )?;

    render_toc(document, out)?;

    for region in &document.regions {
        render_region(region, out)?;
    }

    writeln!(out, "</body>")?;
    writeln!(out, "</html>")?;
    Ok(())
}

fn render_toc(document: &Document, out: &mut String) -> std::fmt::Result {
    writeln!(out, "<nav>")?;
    writeln!(out, "<ul class=\"toc\">")?;
    for region in document.regions.iter().filter(|region| region.in_toc()) {
        writeln!(out, "<li>{}", escape(&region.name))?;
        writeln!(out, "<ul>")?;
        for eq in &region.equations {
            writeln!(
                out,
                "<li><a href=\"#{}\">{}</a></li>",
                escape(&eq.name),
                escape(&eq.name)
            )?;
        }
        writeln!(out, "</ul>")?;
        writeln!(out, "</li>")?;
    }
    writeln!(out, "</ul>")?;
    writeln!(out, "</nav>")?;
    Ok(())
}

fn render_region(region: &Region, out: &mut String) -> std::fmt::Result {
    if !region.name.is_empty() {
        writeln!(out, "<h2>{}</h2>", escape(&region.name))?;
    }
    for eq in &region.equations {
        render_equation(eq, out)?;
    }
    Ok(())
}

fn render_equation(eq: &Equation, out: &mut String) -> std::fmt::Result {
    writeln!(out, "<section>")?;
    writeln!(out, "<h3 id=\"{}\">{}</h3>", escape(&eq.name), escape(&eq.name))?;
    if !eq.legend.is_empty() {
        writeln!(out, "<p class=\"legend\">{}</p>", escape(&eq.legend))?;
    }
    // already-final markup from the cross-reference pass
    writeln!(out, "<p class=\"equation\">{}</p>", eq.rendered_expression)?;
    if !eq.appears_in.is_empty() {
        let links: Vec<String> = eq
            .appears_in
            .iter()
            .map(|name| format!("<a href=\"#{}\">{}</a>", escape(name), escape(name)))
            .collect();
        writeln!(out, "<p class=\"appears-in\">appears in: {}</p>", links.join(", "))?;
    }
    writeln!(out, "</section>")?;
    Ok(())
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
