use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use eta_core::config::Config;
use eta_core::{normalize_now, predict_minutes, DeliverySummary, LinearPredictor};
use eta_data::{FormInput, FormOptions};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "eta", about = "Food delivery time prediction")]
struct Cli {
    /// Write debug logs to /tmp/eta-debug.log (tail -f to inspect).
    #[arg(long, global = true)]
    debug: bool,

    /// Config file to use instead of ~/.config/eta/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Training dataset; overrides `[data] train_csv`.
    #[arg(long, global = true)]
    train: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Predict the delivery duration of one order.
    Predict(PredictArgs),
    /// Print the selectable values observed in the training data.
    Options,
    /// Serve the HTTP JSON API.
    Serve {
        /// Address to listen on; overrides `[server] bind`.
        #[arg(long)]
        bind: Option<String>,
    },
}

/// Omitted inputs take the defaults derived from the training data.
#[derive(Args)]
struct PredictArgs {
    /// Order date (YYYY-MM-DD); today when omitted.
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Order time (HH:MM); now when omitted.
    #[arg(long)]
    order_time: Option<String>,
    /// Pickup time (HH:MM); 15 minutes from now when omitted.
    #[arg(long)]
    pickup_time: Option<String>,
    #[arg(long)]
    order_type: Option<String>,
    /// Number of deliveries combined together.
    #[arg(long)]
    multiple_deliveries: Option<u32>,
    #[arg(long, allow_hyphen_values = true)]
    restaurant_lat: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    restaurant_lon: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    delivery_lat: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    delivery_lon: Option<String>,
    #[arg(long)]
    age: Option<u32>,
    #[arg(long)]
    rating: Option<f64>,
    #[arg(long)]
    vehicle: Option<String>,
    #[arg(long)]
    vehicle_condition: Option<u32>,
    #[arg(long)]
    city_code: Option<String>,
    /// City type (Urban, Metropolitian, ...).
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    traffic: Option<String>,
    #[arg(long)]
    weather: Option<String>,
    #[arg(long)]
    festival: Option<String>,
    /// Print the record and summary as JSON.
    #[arg(long)]
    json: bool,
}

impl From<PredictArgs> for FormInput {
    fn from(args: PredictArgs) -> Self {
        FormInput {
            order_date: args.date,
            order_time: args.order_time,
            pickup_time: args.pickup_time,
            order_type: args.order_type,
            multiple_deliveries: args.multiple_deliveries,
            restaurant_latitude: args.restaurant_lat,
            restaurant_longitude: args.restaurant_lon,
            delivery_latitude: args.delivery_lat,
            delivery_longitude: args.delivery_lon,
            delivery_person_age: args.age,
            delivery_person_rating: args.rating,
            vehicle: args.vehicle,
            vehicle_condition: args.vehicle_condition,
            city_code: args.city_code,
            city: args.city,
            road_traffic_density: args.traffic,
            weather_conditions: args.weather,
            festival: args.festival,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let serving = matches!(cli.command, Command::Serve { .. });
    init_logging(cli.debug, serving)?;

    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "using built-in config");
            Config::defaults()
        }),
    };
    let train = cli.train.as_deref().unwrap_or(&config.data.train_csv);

    match cli.command {
        Command::Options => {
            let options = load_options(train)?;
            println!("{}", serde_json::to_string_pretty(&options)?);
        }
        Command::Predict(args) => predict(args, train, &config)?,
        Command::Serve { bind } => {
            let options = load_options(train)?;
            let predictor = LinearPredictor::from_path(config.model.model_path())?;
            let state = eta_serve::AppState::new(options, Arc::new(predictor), config.summary);
            let bind = bind.unwrap_or(config.server.bind);
            tokio::runtime::Runtime::new()?.block_on(eta_serve::serve(&bind, Arc::new(state)))?;
        }
    }
    Ok(())
}

fn predict(args: PredictArgs, train: &Path, config: &Config) -> anyhow::Result<()> {
    let json = args.json;
    let options = load_options(train)?;
    let form = options.complete(args.into())?;

    let record = normalize_now(&form)?;
    let predictor = LinearPredictor::from_path(config.model.model_path())?;
    let minutes = predict_minutes(&predictor, &record)?;
    let summary = DeliverySummary::new(&record, minutes, config.summary.bands())?;

    if json {
        let body = serde_json::json!({ "record": record, "summary": summary });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        println!("{}", summary.render(&config.summary));
    }
    Ok(())
}

fn load_options(train: &Path) -> anyhow::Result<FormOptions> {
    eta_data::load_options(train)
        .with_context(|| format!("cannot derive input options from {}", train.display()))
}

fn init_logging(debug: bool, serving: bool) -> anyhow::Result<()> {
    if debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/eta-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("eta debug log started: tail -f /tmp/eta-debug.log");
    } else if serving {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }
    Ok(())
}
