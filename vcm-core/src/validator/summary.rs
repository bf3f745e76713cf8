use std::fmt;

use super::{
    CheckResult,
    Outcome,
};

const WIDTH: usize = 70;

#[derive(Debug, Default, Eq, PartialEq)]
pub struct RunSummary {
    pub passed: usize,
    pub mismatched: usize,
    pub errored: usize,
}

impl RunSummary {
    pub fn new(results: &[CheckResult]) -> RunSummary {
        let mut summary = RunSummary::default();
        for res in results {
            match &res.result {
                Ok(Outcome::Pass) => summary.passed += 1,
                Ok(Outcome::Mismatch(_)) => summary.mismatched += 1,
                Err(_) => summary.errored += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.passed + self.mismatched + self.errored
    }

    pub fn is_success(&self) -> bool {
        self.mismatched == 0 && self.errored == 0
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "\nCompatibility matrix results:")?;
        writeln!(f, "{}", "-".repeat(WIDTH))?;
        for (label, count) in [("passed", self.passed), ("mismatched", self.mismatched), ("errored", self.errored)] {
            let right = format!("{count}");
            // two chars for the spaces around the dots
            let mid_width = WIDTH.saturating_sub(label.len()).saturating_sub(right.len()).saturating_sub(2);
            writeln!(f, "{label} {} {right}", ".".repeat(mid_width))?;
        }
        writeln!(f, "{}", "-".repeat(WIDTH))?;
        write!(f, "{} scenarios checked", self.total())
    }
}
