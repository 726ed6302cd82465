use std::io::{self, Write};

use crate::pipeline::{RegressionReport, Reporter};
use crate::Float;

#[cfg(test)]
mod tests;

/// Human-readable report writer
///
/// Writes the coefficients, the fit metrics and the out-of-sample
/// predictions of a regression as plain text, one value per line.
#[derive(Debug)]
pub struct ConsoleReporter<W> {
    writer: W,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        ConsoleReporter::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(writer: W) -> Self {
        ConsoleReporter { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<F: Float, W: Write> Reporter<F> for ConsoleReporter<W> {
    fn report(&mut self, report: &RegressionReport<F>) -> io::Result<()> {
        let (b0, b1) = report.model().coefficients();
        writeln!(self.writer, "B0 = {}, B1 = {}", b0, b1)?;
        writeln!(self.writer, "R2: {}", report.metrics().r2())?;
        writeln!(self.writer, "RMSE: {}", report.metrics().rmse())?;

        if !report.out_of_sample_x().is_empty() {
            writeln!(self.writer, "Predictions:")?;
            for (x, y) in report
                .out_of_sample_x()
                .iter()
                .zip(report.out_of_sample_predictions().iter())
            {
                writeln!(self.writer, "  x = {} -> y = {}", x, y)?;
            }
        }
        self.writer.flush()
    }
}
