use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;

use simplelm::pipeline::DEFAULT_OUT_OF_SAMPLE;

/// Fits a simple linear regression to a two-column table and plots it.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Opts {
    /// Delimited text table with `x` and `y` columns, header optional
    pub input: PathBuf,

    /// Field delimiter
    #[arg(short, long, default_value = ",", value_parser = delimiter)]
    pub delimiter: u8,

    /// Out-of-sample values of the independent variable to predict
    #[arg(
        short = 'p',
        long = "predict",
        value_delimiter = ',',
        allow_negative_numbers = true,
        default_values_t = DEFAULT_OUT_OF_SAMPLE.to_vec()
    )]
    pub out_of_sample: Vec<f64>,

    /// SVG file the plot is written to
    #[arg(long, default_value = "regression.svg", conflicts_with = "no_plot")]
    pub plot: PathBuf,

    /// Skip plotting
    #[arg(long)]
    pub no_plot: bool,

    /// Force the fitted line through the origin
    #[arg(long)]
    pub no_intercept: bool,

    /// Spread of the independent variable at or below which the slope is undefined
    #[arg(long, default_value_t = 0.0)]
    pub variance_threshold: f64,
}

pub fn parse() -> Opts {
    Opts::parse()
}

fn delimiter(value: &str) -> Result<u8> {
    match value.as_bytes() {
        [byte] => Ok(*byte),
        _ if value == "\\t" => Ok(b'\t'),
        _ => Err(anyhow!("expected a single ASCII character")),
    }
}
