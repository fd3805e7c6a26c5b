// Copyright 2025 The Trolldoc Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::result::Result as StdResult;

use pico_args::Arguments;

use trolldoc_engine::{build_document, Document, LookupTable};

mod render;

const VERSION: &str = "1.0";
const EXIT_FAILURE: i32 = 1;

macro_rules! die(
    ($($arg:tt)*) => { {
        eprintln!($($arg)*);
        std::process::exit(EXIT_FAILURE)
    } }
);

fn usage() -> ! {
    let argv0 = std::env::args()
        .next()
        .unwrap_or_else(|| "<trolldoc>".to_string());
    die!(
        concat!(
            "trolldoc {}: Generate cross-referenced HTML documentation for TROLL models.\n\
         \n\
         USAGE:\n",
            "    {} [OPTION...] MODEL_PATH\n",
            "\n\
         OPTIONS:\n",
            "    -h, --help       show this message\n",
            "    --params FILE    parameter values table (`name;value` rows)\n",
            "    --legends FILE   variable legends table (`name;legend` rows)\n",
            "    --output FILE    path to write output file\n",
            "    --to-json        output the document model as JSON, not HTML\n",
            "    -v, --verbose    print progress and lookup misses to stderr\n",
        ),
        VERSION,
        argv0
    );
}

#[derive(Clone, Default, Debug)]
struct Args {
    path: Option<String>,
    params: Option<String>,
    legends: Option<String>,
    output: Option<String>,
    is_to_json: bool,
    verbose: bool,
}

fn parse_args() -> StdResult<Args, Box<dyn std::error::Error>> {
    let mut parsed = Arguments::from_env();
    if parsed.contains(["-h", "--help"]) {
        usage();
    }

    let mut args: Args = Default::default();

    args.params = parsed.value_from_str("--params").ok();
    args.legends = parsed.value_from_str("--legends").ok();
    args.output = parsed.value_from_str("--output").ok();
    args.is_to_json = parsed.contains("--to-json");
    args.verbose = parsed.contains(["-v", "--verbose"]);

    let free_arguments = parsed.finish();
    if free_arguments.is_empty() {
        eprintln!("error: model path required");
        usage();
    }

    args.path = free_arguments[0].to_str().map(|s| s.to_owned());

    Ok(args)
}

fn read_model(path: &str) -> std::io::Result<String> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut buf: Vec<u8> = Vec::new();
    reader.read_to_end(&mut buf)?;
    // TROLL inputs are frequently Latin-1; tolerate non-UTF-8 bytes
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn load_table(path: Option<&str>, what: &str, verbose: bool) -> LookupTable {
    let path = match path {
        Some(path) => path,
        None => return LookupTable::new(),
    };
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => die!("{} table '{}' error: {}", what, path, err),
    };
    match LookupTable::from_reader(BufReader::new(file)) {
        Ok(table) => {
            if verbose {
                eprintln!("loaded {} {} entries from {}", table.len(), what, path);
            }
            table
        }
        Err(err) => die!("{} table '{}' error: {}", what, path, err),
    }
}

fn report(document: &Document) {
    eprintln!(
        "{} equations found in {} regions",
        document.equation_count(),
        document.regions.len()
    );
    for eq in document.equations() {
        if eq.legend.is_empty() {
            eprintln!("no legend found for `{}`", eq.name);
        }
        for name in &eq.appears_in {
            eprintln!("`{}` appears in `{}`", eq.name, name);
        }
    }
}

fn main() {
    let args = match parse_args() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("error: {}", err);
            usage();
        }
    };

    let file_path = args.path.unwrap_or_else(|| "/dev/stdin".to_string());
    let source = match read_model(&file_path) {
        Ok(source) => source,
        Err(err) => die!("model '{}' error: {}", file_path, err),
    };

    let params = load_table(args.params.as_deref(), "parameter", args.verbose);
    let legends = load_table(args.legends.as_deref(), "legend", args.verbose);

    let document = match build_document(&source, &params, &legends) {
        Ok(document) => document,
        Err(err) => die!("model '{}' error: {}", file_path, err),
    };

    if args.verbose {
        report(&document);
    }

    let output = if args.is_to_json {
        match serde_json::to_string_pretty(&document) {
            Ok(mut json) => {
                json.push('\n');
                json
            }
            Err(err) => die!("json serialization error: {}", err),
        }
    } else {
        render::render_html(&document)
    };

    let out_path = args.output.unwrap_or_else(|| "/dev/stdout".to_string());
    let mut output_file = match File::create(&out_path) {
        Ok(file) => file,
        Err(err) => die!("output '{}' error: {}", out_path, err),
    };
    if let Err(err) = output_file.write_all(output.as_bytes()) {
        die!("output '{}' error: {}", out_path, err);
    }
}
