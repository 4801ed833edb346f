use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use realm_generator::hierarchy::{Mode, Rank};
use realm_generator::query::resolve_entity_id;
use realm_generator::validate::validate;
use realm_generator::worldmap::{generate_with, GenerateParams, MapVariant};

#[derive(Parser, Debug)]
#[command(name = "realm_generator")]
#[command(about = "Generate hierarchical territory maps for strategy-game worlds")]
struct Args {
    /// Master seed for deterministic generation
    #[arg(short, long, default_value = "9527")]
    seed: i64,

    /// Number of counties partitioning the tile grid
    #[arg(long, default_value = "96")]
    counties: u32,

    /// Number of duchies grouping the counties
    #[arg(long, default_value = "24")]
    duchies: u32,

    /// Number of kingdoms grouping the duchies
    #[arg(long, default_value = "6")]
    kingdoms: u32,

    /// Width of the tile grid
    #[arg(short = 'W', long, default_value = "128")]
    width: u32,

    /// Height of the tile grid
    #[arg(short = 'H', long, default_value = "96")]
    height: u32,

    /// Output file for the JSON payload
    #[arg(short, long, default_value = "worldmap.json")]
    output: PathBuf,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Skip the title/character graph (version 1 payload)
    #[arg(long)]
    minimal: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let params = GenerateParams {
        width: args.width,
        height: args.height,
        county_count: args.counties,
        duchy_count: args.duchies,
        kingdom_count: args.kingdoms,
        variant: if args.minimal {
            MapVariant::Minimal
        } else {
            MapVariant::WithTitles
        },
        ..GenerateParams::default()
    };

    println!("Generating realm map with seed: {}", args.seed);
    println!(
        "Grid: {}x{} tiles, {} counties, {} duchies, {} kingdoms",
        args.width, args.height, args.counties, args.duchies, args.kingdoms
    );

    let data = match generate_with(args.seed, &params) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Generation failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let divergence = data
        .modes
        .de_jure
        .county_to_duchy
        .iter()
        .zip(&data.modes.de_facto.county_to_duchy)
        .filter(|(a, b)| a != b)
        .count();
    println!(
        "Governance drift: {} of {} counties answer to a different duchy de facto",
        divergence, args.counties
    );
    if !data.titles.is_empty() {
        println!(
            "Minted {} titles for {} characters",
            data.titles.len(),
            data.characters.len()
        );
    }
    if let Some(capital) = resolve_entity_id(&data, Mode::DeFacto, Rank::Kingdom, 0) {
        if let Some(name) = data.modes.de_facto.kingdom_names.get(capital as usize) {
            println!("Northwest corner lies in the kingdom of {}", name);
        }
    }

    // Round-trip the payload through the validator before writing; the file
    // must never contain anything the loading layer would reject.
    let payload = match serde_json::to_value(&data) {
        Ok(payload) => payload,
        Err(e) => {
            eprintln!("Serialization failed: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = validate(&payload) {
        eprintln!("Self-validation failed: {}", e);
        return ExitCode::FAILURE;
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&payload)
    } else {
        serde_json::to_string(&payload)
    };
    let json = match json {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Serialization failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = fs::write(&args.output, json) {
        eprintln!("Failed to write {}: {}", args.output.display(), e);
        return ExitCode::FAILURE;
    }
    println!("Wrote payload to: {}", args.output.display());

    ExitCode::SUCCESS
}
