//! # Blower Sizing CLI
//!
//! Terminal front end for `blower_core`.
//!
//! ```text
//! blower_cli calculate --length 6 --width 3 --depth 2 --location "1420 m" \
//!     --pipe-diameter 100 --pipe-length 50 --bends 4
//! blower_cli calculate --input request.json --json
//! blower_cli calculate --input request.json --save quote.json --customer ENQ-0042
//! blower_cli locate "Pretoria, about 28 degrees"
//! blower_cli show quote.json
//! ```

mod logging;
mod quote;
mod render;
mod settings;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use blower_core::calculations::PipeSystem;
use blower_core::{
    comprehensive, location, Application, CalcError, CalculationInputs, DiffuserType, OperationType, PipeMaterial,
    TankArrangement,
};
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "blower_cli")]
#[command(about = "Size blowers for aeration tanks and compare multi-blower configurations")]
#[command(version)]
struct Cli {
    /// Settings file (TOML/JSON/YAML); BLOWER_* environment variables override it
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Size a blower and compare configurations
    Calculate(CalculateArgs),

    /// Resolve free-text location into altitude and temperature
    Locate {
        /// Location description, e.g. "Johannesburg" or "1500 m, 25°C"
        text: String,

        /// Site altitude in m, overrides the text
        #[arg(long)]
        altitude: Option<f64>,

        /// Ambient temperature in °C, overrides the text
        #[arg(long)]
        temperature: Option<f64>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print a saved quote
    Show {
        /// Quote file written by `calculate --save`
        path: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Default)]
struct CalculateArgs {
    /// Read the request from a JSON file instead of flags
    #[arg(short, long, conflicts_with_all = ["length", "width", "depth"])]
    input: Option<PathBuf>,

    /// Tank length (m)
    #[arg(long)]
    length: Option<f64>,

    /// Tank width (m)
    #[arg(long)]
    width: Option<f64>,

    /// Liquid depth (m)
    #[arg(long)]
    depth: Option<f64>,

    /// Number of identical tanks
    #[arg(long, default_value_t = 1)]
    tanks: u32,

    /// parallel or series
    #[arg(long, default_value = "parallel")]
    arrangement: String,

    /// waste_water, fish_hatchery, industrial or other
    #[arg(short, long, default_value = "waste_water")]
    application: String,

    /// Free-text site description
    #[arg(short, long, default_value = "")]
    location: String,

    /// Site altitude (m)
    #[arg(long)]
    altitude: Option<f64>,

    /// Ambient temperature (°C)
    #[arg(long)]
    temperature: Option<f64>,

    /// Pipe inside diameter (mm)
    #[arg(long, requires = "pipe_length")]
    pipe_diameter: Option<f64>,

    /// Pipe length (m)
    #[arg(long, requires = "pipe_diameter")]
    pipe_length: Option<f64>,

    /// Number of 90° bends
    #[arg(long)]
    bends: Option<u32>,

    /// smooth, galvanized, rough or very_rough
    #[arg(long, default_value = "smooth")]
    pipe_material: String,

    /// fine, disc, coarse, tube, jet or custom
    #[arg(long)]
    diffuser: Option<String>,

    /// Diffuser submergence (m), defaults to tank depth
    #[arg(long)]
    diffuser_depth: Option<f64>,

    #[arg(long)]
    safety_factor: Option<f64>,

    #[arg(long)]
    fouling_factor: Option<f64>,

    /// Oxygen demand (kg O₂/hr) for the oxygen-demand airflow model
    #[arg(long)]
    oxygen_demand: Option<f64>,

    /// Vacuum (suction) duty instead of compression
    #[arg(long)]
    vacuum: bool,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    /// Save a quote record to this path
    #[arg(long)]
    save: Option<PathBuf>,

    /// Customer or enquiry reference for the saved quote
    #[arg(long, requires = "save")]
    customer: Option<String>,
}

impl CalculateArgs {
    fn to_inputs(&self) -> Result<CalculationInputs> {
        if let Some(path) = &self.input {
            let contents =
                std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
            return serde_json::from_str(&contents)
                .with_context(|| format!("invalid request JSON in {}", path.display()));
        }

        let (Some(length), Some(width), Some(depth)) = (self.length, self.width, self.depth) else {
            bail!("tank dimensions are required: pass --length, --width and --depth, or --input");
        };

        let pipe = match (self.pipe_diameter, self.pipe_length) {
            (Some(diameter_mm), Some(length_m)) => Some(PipeSystem {
                diameter_mm,
                length_m,
                bends: self.bends,
                material: PipeMaterial::from_str_flexible(&self.pipe_material)?,
            }),
            _ => None,
        };

        Ok(CalculationInputs {
            operation: if self.vacuum {
                OperationType::Vacuum
            } else {
                OperationType::Compression
            },
            tank_length_m: length,
            tank_width_m: width,
            tank_depth_m: depth,
            tank_count: self.tanks,
            tank_arrangement: TankArrangement::from_str_flexible(&self.arrangement)?,
            location_text: self.location.clone(),
            altitude_m: self.altitude,
            temperature_c: self.temperature,
            application: Application::from_str_flexible(&self.application)?,
            pipe,
            diffuser_type: self
                .diffuser
                .as_deref()
                .map(DiffuserType::from_str_flexible)
                .transpose()?,
            diffuser_depth_m: self.diffuser_depth,
            safety_factor: self.safety_factor,
            fouling_factor: self.fouling_factor,
            oxygen_demand_kg_hr: self.oxygen_demand,
            load_profile: None,
        })
    }
}

fn calculate(args: &CalculateArgs, config: Option<&std::path::Path>) -> Result<()> {
    let settings = settings::load(config)?;
    let inputs = args.to_inputs()?;
    let report = comprehensive::run(&inputs, &settings)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", render::report_text(&report));
    }

    if let Some(path) = &args.save {
        let record = quote::QuoteRecord::new(args.customer.clone(), inputs, settings, report);
        quote::save_quote(&record, path)?;
        eprintln!("Quote {} saved to {}", record.id, path.display());
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Calculate(args) => calculate(&args, cli.config.as_deref()),

        Commands::Locate {
            text,
            altitude,
            temperature,
            json,
        } => {
            let resolved = location::resolve(&text, altitude, temperature);
            if json {
                println!("{}", serde_json::to_string_pretty(&resolved)?);
            } else {
                println!("{}", render::location_text(&resolved));
                println!("{}", resolved.explanation);
                if let Some(advisory) = resolved.ambient().advisory() {
                    println!("\n{}", advisory);
                }
            }
            Ok(())
        }

        Commands::Show { path, json } => {
            let record = quote::load_quote(&path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                println!("Quote {} ({})", record.id, record.created.format("%Y-%m-%d %H:%M UTC"));
                if let Some(reference) = &record.customer_reference {
                    println!("Customer reference: {}", reference);
                }
                println!();
                println!("{}", render::report_text(&record.report));
            }
            Ok(())
        }
    }
}

fn main() {
    logging::init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("Error: {:#}", err);
        if let Some(calc_err) = err.downcast_ref::<CalcError>() {
            if let Ok(json) = serde_json::to_string_pretty(calc_err) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
        }
        std::process::exit(1);
    }
}
