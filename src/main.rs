use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::process;

use fountain_script_rust::{generate_fountain, parse_with_conf, Conf, FountainScript};

enum OutputMode {
    Json,
    Fountain,
    Summary,
}

fn print_usage(program: &str) {
    println!("Usage: {} [options] <fountain_file>", program);
    println!();
    println!("Options:");
    println!("  --json               print the parsed document as JSON (default)");
    println!("  --fountain           print the document re-serialized as Fountain");
    println!("  --summary            print a per-kind element count summary");
    println!("  --no-merge-actions   keep adjacent action lines as separate elements");
    println!("  --no-merge-dialogue  keep dialogue continuation lines as separate elements");
}

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage(&args[0]);
        return;
    }

    let mut conf = Conf::default();
    let mut mode = OutputMode::Json;
    let mut file_path: Option<&str> = None;

    for arg in &args[1..] {
        match arg.as_str() {
            "--json" => mode = OutputMode::Json,
            "--fountain" => mode = OutputMode::Fountain,
            "--summary" => mode = OutputMode::Summary,
            "--no-merge-actions" => conf.merge_actions = false,
            "--no-merge-dialogue" => conf.merge_dialogue = false,
            flag if flag.starts_with('-') => {
                eprintln!("Unknown option: {}", flag);
                print_usage(&args[0]);
                process::exit(1);
            }
            path => file_path = Some(path),
        }
    }

    let file_path = match file_path {
        Some(path) => path,
        None => {
            print_usage(&args[0]);
            process::exit(1);
        }
    };

    let content = match fs::read_to_string(file_path) {
        Ok(content) => content,
        Err(error) => {
            eprintln!("Failed to read {}: {}", file_path, error);
            process::exit(1);
        }
    };

    let script = parse_with_conf(&content, conf);

    match mode {
        OutputMode::Json => match serde_json::to_string_pretty(&script) {
            Ok(json) => println!("{}", json),
            Err(error) => {
                eprintln!("Failed to serialize document: {}", error);
                process::exit(1);
            }
        },
        OutputMode::Fountain => print!("{}", generate_fountain(&script)),
        OutputMode::Summary => print_summary(&script),
    }
}

fn print_summary(script: &FountainScript) {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for element in &script.elements {
        *counts.entry(element.kind().to_string()).or_insert(0) += 1;
    }

    println!("title entries: {}", script.headers.len());
    println!("elements: {}", script.elements.len());
    for (kind, count) in counts {
        println!("  {}: {}", kind, count);
    }
}
