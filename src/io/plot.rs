use std::fmt::{Display, Write as _};
use std::io::{self, Write};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::demos::SampledSeries;
use crate::error::HhoResult;

/// Something that renders sampled series as line plots.
pub trait PlotSink<T> {
    fn plot(&mut self, panels: &[SampledSeries<T>]) -> HhoResult<()>;
}

/// Pipes inline data to a persistent gnuplot window, one panel per series.
pub struct GnuplotSink {
    program: String,
}
impl Default for GnuplotSink {
    fn default() -> Self {
        Self::new("gnuplot")
    }
}
impl GnuplotSink {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
    pub fn script<T: Display>(panels: &[SampledSeries<T>]) -> String {
        let mut script = String::new();
        if panels.len() > 1 {
            let _ = writeln!(script, "set multiplot layout {},1", panels.len());
        }
        for panel in panels {
            script.push_str("set grid\n");
            let _ = writeln!(
                script,
                "plot '-' with lines title '{}'",
                panel.title.replace('\'', "''")
            );
            for (x, y) in panel.x.iter().zip(panel.y.iter()) {
                let _ = writeln!(script, "{} {}", x, y);
            }
            script.push_str("e\n");
        }
        if panels.len() > 1 {
            script.push_str("unset multiplot\n");
        }
        script
    }
}
impl<T: Display> PlotSink<T> for GnuplotSink {
    fn plot(&mut self, panels: &[SampledSeries<T>]) -> HhoResult<()> {
        if panels.iter().all(SampledSeries::is_empty) {
            return Ok(());
        }
        let script = Self::script(panels);
        debug!("piping {} bytes to {}", script.len(), self.program);
        let mut child = Command::new(&self.program)
            .arg("-persist")
            .stdin(Stdio::piped())
            .spawn()?;
        {
            let stdin = child
                .stdin
                .as_mut()
                .ok_or_else(|| io::Error::other("gnuplot stdin is not piped"))?;
            stdin.write_all(script.as_bytes())?;
        }
        drop(child.stdin.take());
        let status = child.wait()?;
        if !status.success() {
            return Err(io::Error::other(format!("{} exited with {}", self.program, status)).into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_stacks_panels() {
        let panels = [
            SampledSeries::new("gradient", vec![0.0, 0.5], vec![1.5, 2.0]),
            SampledSeries::new("potential", vec![0.25], vec![-1.0]),
        ];
        assert_eq!(
            GnuplotSink::script(&panels),
            "set multiplot layout 2,1\n\
             set grid\n\
             plot '-' with lines title 'gradient'\n\
             0 1.5\n\
             0.5 2\n\
             e\n\
             set grid\n\
             plot '-' with lines title 'potential'\n\
             0.25 -1\n\
             e\n\
             unset multiplot\n"
        );
    }

    #[test]
    fn test_single_panel_has_no_layout() {
        let panels = [SampledSeries::new("it's", vec![1.0], vec![2.0])];
        assert_eq!(
            GnuplotSink::script(&panels),
            "set grid\nplot '-' with lines title 'it''s'\n1 2\ne\n"
        );
    }

    #[test]
    fn test_empty_series_skip_the_plotter() {
        let mut sink = GnuplotSink::new("surely-not-an-installed-plotter");
        let panels = [SampledSeries::<f64>::new("p", vec![], vec![])];
        assert!(sink.plot(&panels).is_ok());
    }

    #[test]
    fn test_missing_program_is_an_error() {
        let mut sink = GnuplotSink::new("surely-not-an-installed-plotter");
        let panels = [SampledSeries::new("p", vec![0.0], vec![0.0])];
        assert!(sink.plot(&panels).is_err());
    }
}
