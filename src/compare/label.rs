//! Derived comparison columns, carried as data until they are shown.

use std::fmt::Display;

use kstring::KString;

use crate::family::IsBetter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivedKind {
    /// The difference of the means, positive for improvements
    Delta,
    /// `Delta` divided by the baseline mean
    Relative,
}

impl DerivedKind {
    fn name(self) -> &'static str {
        match self {
            DerivedKind::Delta => "Delta",
            DerivedKind::Relative => "Relative",
        }
    }
}

/// A column computed from the means of the baseline and a candidate
/// run set. Shown as e.g. `Delta(before, after)`, where the first
/// argument is the minuend.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedColumn {
    pub kind: DerivedKind,
    pub better: IsBetter,
    pub baseline: KString,
    pub candidate: KString,
}

impl DerivedColumn {
    /// `None` if either mean is missing.
    pub fn compute(&self, baseline_mean: Option<f64>, candidate_mean: Option<f64>) -> Option<f64> {
        let baseline_mean = baseline_mean?;
        let delta = self.better.delta(baseline_mean, candidate_mean?);
        match self.kind {
            DerivedKind::Delta => Some(delta),
            DerivedKind::Relative => Some(delta / baseline_mean),
        }
    }

    /// (minuend, subtrahend)
    fn operands(&self) -> (&str, &str) {
        match self.better {
            IsBetter::Smaller => (self.baseline.as_str(), self.candidate.as_str()),
            IsBetter::Larger => (self.candidate.as_str(), self.baseline.as_str()),
        }
    }
}

impl Display for DerivedColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (a, b) = self.operands();
        write!(f, "{}({a}, {b})", self.kind.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(kind: DerivedKind, better: IsBetter) -> DerivedColumn {
        DerivedColumn {
            kind,
            better,
            baseline: "before".into(),
            candidate: "after".into(),
        }
    }

    #[test]
    fn t_label_matches_arithmetic() {
        let delta = column(DerivedKind::Delta, IsBetter::Smaller);
        assert_eq!(delta.to_string(), "Delta(before, after)");
        assert_eq!(delta.compute(Some(100.), Some(90.)), Some(100. - 90.));

        let delta = column(DerivedKind::Delta, IsBetter::Larger);
        assert_eq!(delta.to_string(), "Delta(after, before)");
        assert_eq!(delta.compute(Some(100.), Some(90.)), Some(90. - 100.));

        let relative = column(DerivedKind::Relative, IsBetter::Smaller);
        assert_eq!(relative.to_string(), "Relative(before, after)");
        assert_eq!(relative.compute(Some(100.), Some(90.)), Some(0.1));
    }

    #[test]
    fn t_missing_operand() {
        let delta = column(DerivedKind::Delta, IsBetter::Larger);
        assert_eq!(delta.compute(None, Some(1.)), None);
        assert_eq!(delta.compute(Some(1.), None), None);
    }
}
