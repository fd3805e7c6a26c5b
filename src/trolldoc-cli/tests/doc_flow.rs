// Copyright 2025 The Trolldoc Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::fs;
use std::process::Command;

use tempfile::TempDir;

const MODEL: &str = "\
// national accounts block
ADDEQ TOP,
PIB: pib = C + I + G,
C: c = ALPHA * PIB;
";

struct Inputs {
    dir: TempDir,
    model: std::path::PathBuf,
    params: std::path::PathBuf,
    legends: std::path::PathBuf,
}

fn write_inputs(model: &str) -> Inputs {
    let dir = TempDir::new().unwrap();
    let model_path = dir.path().join("model.inp");
    fs::write(&model_path, model).unwrap();
    let params = dir.path().join("params.csv");
    fs::write(&params, "ALPHA;0.8\n").unwrap();
    let legends = dir.path().join("legends.csv");
    fs::write(&legends, "pib;Produit interieur brut\nc;Consommation\n").unwrap();
    Inputs {
        dir,
        model: model_path,
        params,
        legends,
    }
}

#[test]
fn generates_linked_html() {
    let inputs = write_inputs(MODEL);
    let output = inputs.dir.path().join("doc.html");

    let status = Command::new(env!("CARGO_BIN_EXE_trolldoc"))
        .arg("--params")
        .arg(&inputs.params)
        .arg("--legends")
        .arg(&inputs.legends)
        .arg("--output")
        .arg(&output)
        .arg(&inputs.model)
        .status()
        .unwrap();
    assert!(status.success());

    let html = fs::read_to_string(&output).unwrap();
    assert!(html.contains("<h3 id=\"pib\">pib</h3>"));
    assert!(html.contains("<a href=\"#pib\">pib</a>"));
    assert!(html.contains("0.8"));
    assert!(html.contains("Produit interieur brut"));
    assert!(html.contains("appears in: <a href=\"#c\">c</a>"));
}

#[test]
fn dumps_document_model_as_json() {
    let inputs = write_inputs(MODEL);
    let output = inputs.dir.path().join("doc.json");

    let status = Command::new(env!("CARGO_BIN_EXE_trolldoc"))
        .arg("--params")
        .arg(&inputs.params)
        .arg("--legends")
        .arg(&inputs.legends)
        .arg("--output")
        .arg(&output)
        .arg("--to-json")
        .arg(&inputs.model)
        .status()
        .unwrap();
    assert!(status.success());

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let regions = json["regions"].as_array().unwrap();
    assert_eq!(2, regions.len());
    assert_eq!("pib", regions[0]["name"]);
    assert_eq!("c", regions[0]["equations"][0]["appears_in"][0]);
}

#[test]
fn runs_without_lookup_tables() {
    let inputs = write_inputs(MODEL);
    let output = inputs.dir.path().join("doc.html");

    let status = Command::new(env!("CARGO_BIN_EXE_trolldoc"))
        .arg("--output")
        .arg(&output)
        .arg(&inputs.model)
        .status()
        .unwrap();
    assert!(status.success());

    let html = fs::read_to_string(&output).unwrap();
    // parameter token passes through untouched on a lookup miss
    assert!(html.contains("alpha"));
}

#[test]
fn malformed_model_fails_with_parse_diagnostic() {
    let inputs = write_inputs("ADDEQ TOP,\nPIB pib = c;\n");
    let output = inputs.dir.path().join("doc.html");

    let result = Command::new(env!("CARGO_BIN_EXE_trolldoc"))
        .arg("--output")
        .arg(&output)
        .arg(&inputs.model)
        .output()
        .unwrap();
    assert!(!result.status.success());

    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("ParseError"));
}

#[test]
fn duplicate_definition_fails_with_document_diagnostic() {
    let inputs = write_inputs("ADDEQ TOP, c: c = 1, C: c = 2;");
    let output = inputs.dir.path().join("doc.html");

    let result = Command::new(env!("CARGO_BIN_EXE_trolldoc"))
        .arg("--output")
        .arg(&output)
        .arg(&inputs.model)
        .output()
        .unwrap();
    assert!(!result.status.success());

    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("DocumentError"));
    assert!(stderr.contains("duplicate_variable"));
}

#[test]
fn missing_table_file_fails_with_import_diagnostic() {
    let inputs = write_inputs(MODEL);
    let output = inputs.dir.path().join("doc.html");

    let result = Command::new(env!("CARGO_BIN_EXE_trolldoc"))
        .arg("--params")
        .arg(inputs.dir.path().join("nope.csv"))
        .arg("--output")
        .arg(&output)
        .arg(&inputs.model)
        .output()
        .unwrap();
    assert!(!result.status.success());

    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("parameter table"));
}
