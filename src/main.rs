mod logging;
mod opts;

use anyhow::{Context, Result};
use ndarray::Array1;

use simplelm::estimators::linear_regression::LinearRegression;
use simplelm::loader::CsvLoader;
use simplelm::pipeline::Pipeline;
use simplelm::plot::SvgPlotter;
use simplelm::report::ConsoleReporter;

fn main() -> Result<()> {
    let opts = opts::parse();
    logging::init()?;

    let params = LinearRegression::params()
        .fit_intercept(!opts.no_intercept)
        .variance_threshold(opts.variance_threshold);
    let pipeline = Pipeline::new(params)?.out_of_sample(Array1::from(opts.out_of_sample))?;

    let loader = CsvLoader::new(&opts.input).delimiter(opts.delimiter);
    let mut reporter = ConsoleReporter::stdout();
    let plotter = (!opts.no_plot).then(|| SvgPlotter::new(&opts.plot));

    pipeline
        .run(&loader, &mut reporter, &plotter)
        .with_context(|| format!("failed to fit {}", opts.input.display()))?;
    Ok(())
}
