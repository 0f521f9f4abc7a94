//! persona report
//!
//! Reads a survey export, summarizes it, and optionally predicts one
//! respondent. Output is a single JSON document on stdout.

use std::path::PathBuf;

use serde_json::json;

use persona::{
    parse, summarize, Classifier, ClassifierConfig, FeatureVector, FeatureVectorBuilder,
    NumericField,
};

/// Command line options
struct Options {
    /// Survey export to read
    input: PathBuf,
    /// Optional classifier config (JSON)
    config_path: Option<PathBuf>,
    /// Overrides `k` from the config
    k: Option<usize>,
    /// `key=value` pairs describing a respondent to classify
    predict: Option<String>,
    /// Run leave-one-out evaluation
    evaluate: bool,
}

fn print_help() {
    println!("persona-report - summarize and classify a personality survey export");
    println!();
    println!("USAGE:");
    println!("    persona-report <CSV> [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <FILE>       Classifier config (JSON)");
    println!("    -k, --k <N>               Number of voting neighbors [default: 5]");
    println!("    -p, --predict <FEATURES>  e.g. time_spent_alone=4,stage_fear=No,...");
    println!("    -e, --evaluate            Report leave-one-out accuracy");
    println!("    -h, --help                Print help information");
}

fn fail(message: &str) -> ! {
    eprintln!("error: {message}");
    std::process::exit(1);
}

fn parse_args() -> Options {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut input = None;
    let mut config_path = None;
    let mut k = None;
    let mut predict = None;
    let mut evaluate = false;

    let mut i = 0;
    while i < args.len() {
        let value = || {
            args.get(i + 1)
                .cloned()
                .unwrap_or_else(|| fail(&format!("{} requires a value", args[i])))
        };
        match args[i].as_str() {
            "--config" | "-c" => {
                config_path = Some(PathBuf::from(value()));
                i += 2;
            }
            "--k" | "-k" => {
                let raw = value();
                k = Some(
                    raw.parse()
                        .unwrap_or_else(|_| fail(&format!("invalid value for k: {raw}"))),
                );
                i += 2;
            }
            "--predict" | "-p" => {
                predict = Some(value());
                i += 2;
            }
            "--evaluate" | "-e" => {
                evaluate = true;
                i += 1;
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            other if other.starts_with('-') => fail(&format!("unknown option: {other}")),
            other => {
                input = Some(PathBuf::from(other));
                i += 1;
            }
        }
    }

    let Some(input) = input else {
        print_help();
        std::process::exit(2);
    };
    Options {
        input,
        config_path,
        k,
        predict,
        evaluate,
    }
}

fn numeric_field(key: &str) -> Option<NumericField> {
    NumericField::ALL.into_iter().find(|f| f.name() == key)
}

fn parse_query(features: &str) -> Result<FeatureVector, String> {
    let mut builder = FeatureVectorBuilder::new();
    for pair in features.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| format!("expected key=value, got '{pair}'"))?;
        let (key, value) = (key.trim(), value.trim());
        builder = match key {
            "stage_fear" => builder.stage_fear(value),
            "drained_after_socializing" => builder.drained_after_socializing(value),
            _ => {
                let field = numeric_field(key).ok_or_else(|| format!("unknown feature '{key}'"))?;
                let number = value
                    .parse()
                    .map_err(|_| format!("'{value}' is not a number for '{key}'"))?;
                builder.numeric(field, number)
            }
        };
    }
    builder.build().map_err(|e| e.to_string())
}

fn load_config(options: &Options) -> Result<ClassifierConfig, String> {
    let mut config = match &options.config_path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            ClassifierConfig::from_json(&json).map_err(|e| e.to_string())?
        }
        None => ClassifierConfig::default(),
    };
    if let Some(k) = options.k {
        config.k = k;
    }
    Ok(config)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = parse_args();
    let text = std::fs::read_to_string(&options.input).unwrap_or_else(|e| {
        fail(&format!("cannot read {}: {e}", options.input.display()))
    });

    let parsed = parse(&text);
    log::info!(
        "loaded {} records from {} ({} rows rejected)",
        parsed.records.len(),
        options.input.display(),
        parsed.errors.len()
    );
    for err in &parsed.errors {
        log::warn!("{err}");
    }

    let config = load_config(&options).unwrap_or_else(|e| fail(&e));
    let classifier = Classifier::new(config).unwrap_or_else(|e| fail(&e.to_string()));

    let summary = match summarize(&parsed.records) {
        Ok(summary) => json!(summary),
        Err(err) => json!({ "error": err.to_string() }),
    };

    let prediction = options.predict.as_deref().map(|features| {
        match parse_query(features)
            .and_then(|q| classifier.classify(&parsed.records, &q).map_err(|e| e.to_string()))
        {
            Ok(result) => json!(result),
            Err(err) => json!({ "error": err }),
        }
    });

    let evaluation = options.evaluate.then(|| match classifier.evaluate(&parsed.records) {
        Ok(eval) => json!(eval),
        Err(err) => json!({ "error": err.to_string() }),
    });

    let report = json!({
        "records": parsed.records.len(),
        "rejected_rows": parsed.errors,
        "summary": summary,
        "prediction": prediction,
        "evaluation": evaluation,
    });

    match serde_json::to_string_pretty(&report) {
        Ok(out) => println!("{out}"),
        Err(e) => fail(&format!("cannot render report: {e}")),
    }
}
