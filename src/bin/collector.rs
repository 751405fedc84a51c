use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use steam_predictor::{
    collector::{Collector, FormValues, report},
    config,
    logging::{self, LogFormat},
};

/// Terminal form for the Steam game quality predictor.
#[derive(Parser, Debug)]
#[command(name = "collector", about = "Ask the predictor how a game is likely to be reviewed")]
struct Args {
    /// Base URL of the predictor service
    #[arg(long)]
    url: Option<String>,

    /// Current price in USD
    #[arg(long)]
    price: Option<f64>,

    /// Initial release price in USD
    #[arg(long)]
    initial_price: Option<f64>,

    /// Supported languages, comma separated
    #[arg(long, value_delimiter = ',')]
    languages: Option<Vec<String>>,

    /// Genres, comma separated
    #[arg(long, value_delimiter = ',')]
    genres: Option<Vec<String>>,

    /// Steam tags, comma separated
    #[arg(long, value_delimiter = ',')]
    tags: Option<Vec<String>>,

    /// Prompt for every field on stdin
    #[arg(short, long)]
    interactive: bool,
}

impl Args {
    fn form_values(&self) -> FormValues {
        let defaults = FormValues::default();
        let trimmed = |values: &Option<Vec<String>>, fallback: Vec<String>| -> Vec<String> {
            match values {
                Some(values) => values
                    .iter()
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty())
                    .collect(),
                None => fallback,
            }
        };
        FormValues {
            price: self.price.unwrap_or(defaults.price),
            initial_price: self.initial_price.unwrap_or(defaults.initial_price),
            languages: trimmed(&self.languages, defaults.languages),
            genres: trimmed(&self.genres, defaults.genres),
            tags: trimmed(&self.tags, defaults.tags),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = config::load().await.context("Failed to load configuration")?;
    logging::init("warn", LogFormat::Pretty)?;

    if let Some(url) = &args.url {
        config.collector.predictor_url = url.clone();
    }

    let mut stdout = io::stdout();
    write!(stdout, "{}", report::render_header())?;

    let mut values = args.form_values();
    if args.interactive {
        let stdin = io::stdin();
        values = values.prompt(&mut stdin.lock(), &mut stdout)?;
    }
    values.validate()?;

    let collector = Collector::new(&config.collector)?;
    writeln!(stdout, "\nCalculating...")?;
    let outcome = collector.submit_for_display(&values).await;
    write!(stdout, "\n{}", report::render_prediction(&outcome))?;

    write!(stdout, "{}", report::render_about())?;
    stdout.flush()?;

    Ok(())
}
