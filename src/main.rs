use log::{error, info};
use recipe_extract::{capture, validate_recipe_with, EngineConfig, ExtractError, ParserRegistry};
use serde_json::json;
use std::env;
use std::fs;

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        error!("{}", err);
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), ExtractError> {
    let args: Vec<String> = env::args().collect();
    let (Some(url), Some(path)) = (args.get(1), args.get(2)) else {
        eprintln!("Usage: recipe-extract <url> <html-file>");
        std::process::exit(2);
    };

    let config = EngineConfig::load()?;
    let registry = ParserRegistry::from_config(&config.sites);

    let html = fs::read_to_string(path)?;
    let mut captured = capture(&registry, &html, url);
    info!("{} captured as {:?}", url, captured.outcome);

    let validation = validate_recipe_with(&mut captured.recipe, &config.validation);

    let output = json!({
        "outcome": captured.outcome,
        "recipe": captured.recipe,
        "validation": validation,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
