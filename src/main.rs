use std::path::PathBuf;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

use praytimes::api::{self, TimesResponse};
use praytimes::calendar::{events_for_day, submit_paced, JsonLinesSink};
use praytimes::config::Settings;
use praytimes::{
    AsrFactor, HighLatitudeRule, MethodRegistry, Midnight, ParameterOverrides, PrayerTimesEngine,
    Query, Result, TimeFormat,
};

#[derive(Parser)]
#[command(name = "praytimes", version, about = "Islamic prayer times calculator")]
struct Cli {
    /// TOML settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prayer times for one day
    Times {
        #[command(flatten)]
        query: QueryArgs,
        /// Print the JSON response body
        #[arg(long)]
        json: bool,
    },
    /// Prayer times for consecutive days
    Week {
        #[command(flatten)]
        query: QueryArgs,
        #[arg(long, default_value_t = 7)]
        days: u32,
        /// Emit calendar events as JSON lines instead of a table
        #[arg(long)]
        calendar: bool,
        /// Seconds between two calendar events (overrides the config file)
        #[arg(long)]
        pacing_secs: Option<u64>,
    },
    /// List calculation methods
    Methods,
}

#[derive(Args)]
struct QueryArgs {
    /// Latitude in degrees, north positive
    #[arg(long, allow_hyphen_values = true)]
    lat: String,
    /// Longitude in degrees, east positive
    #[arg(long, allow_hyphen_values = true)]
    lng: String,
    /// Hours east of UTC
    #[arg(long, allow_hyphen_values = true)]
    tz: String,
    /// Date as YYYY-MM-DD, today if omitted
    #[arg(long)]
    date: Option<String>,
    #[arg(long)]
    method: Option<String>,
    /// Metres above sea level
    #[arg(long, default_value_t = 0.0)]
    elevation: f64,
    #[arg(long)]
    asr: Option<AsrFactor>,
    #[arg(long)]
    high_lats: Option<HighLatitudeRule>,
    #[arg(long)]
    midnight: Option<Midnight>,
    #[arg(long)]
    format: Option<TimeFormat>,
}

impl QueryArgs {
    fn date(&self) -> Result<NaiveDate> {
        match &self.date {
            Some(date) => Ok(api::parse_date(date)?),
            None => Ok(Local::now().date_naive()),
        }
    }

    fn to_query<'a>(&self, method: &'a str, settings: &Settings) -> Result<Query<'a>> {
        let location = api::parse_location(&self.lat, &self.lng, &self.tz)?;
        Ok(Query::new(
            method,
            location.coordinates.with_elevation(self.elevation),
            self.date()?,
            location.timezone,
        )
        .with_overrides(settings.overrides().merge(&self.overrides()))
        .with_tuning(settings.tuning))
    }

    fn overrides(&self) -> ParameterOverrides {
        ParameterOverrides {
            asr: self.asr,
            high_lats: self.high_lats,
            midnight: self.midnight,
            ..Default::default()
        }
    }
}

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    init_tracing(&settings);
    debug!(config = ?cli.config, "settings loaded");

    let engine = PrayerTimesEngine::new(settings.engine_options());

    match cli.command {
        Commands::Methods => {
            let registry = MethodRegistry::global();
            for name in registry.list() {
                let (method, _) = registry.lookup(name);
                println!("{:<8} {}", name, method.description());
            }
        }
        Commands::Times { query, json } => {
            let method = query.method.clone().unwrap_or_else(|| settings.method.clone());
            let q = query.to_query(&method, &settings)?;

            let computed = engine.compute(&q);
            if json {
                let body = serde_json::to_string_pretty(&TimesResponse::from(&computed))?;
                println!("{body}");
            } else {
                let format = query.format.unwrap_or(settings.format);
                println!("{} ({})", computed.date, computed.method.description());
                for (prayer, time) in computed.times.formatted(format) {
                    println!("{:<9} {}", prayer.name(), time);
                }
            }
        }
        Commands::Week {
            query,
            days,
            calendar,
            pacing_secs,
        } => {
            let method = query.method.clone().unwrap_or_else(|| settings.method.clone());
            let q = query.to_query(&method, &settings)?;

            let computed = engine.compute_days(&q, days);
            if calendar {
                let events: Vec<_> = computed.iter().flat_map(events_for_day).collect();
                let pacing = pacing_secs
                    .map(Duration::from_secs)
                    .unwrap_or_else(|| settings.calendar.pacing());
                let mut sink = JsonLinesSink::new(std::io::stdout().lock());
                let report = submit_paced(&mut sink, &events, pacing);
                for failed in &report.failed {
                    eprintln!("{} {}: {}", failed.start, failed.summary, failed.error);
                }
            } else {
                let format = query.format.unwrap_or(settings.format);
                for day in &computed {
                    let row: Vec<String> = day
                        .times
                        .formatted(format)
                        .into_iter()
                        .map(|(_, t)| t)
                        .collect();
                    println!("{}  {}", day.date, row.join("  "));
                }
            }
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
