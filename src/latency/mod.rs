//! GC pause latencies and causes, extracted from the GC logs the
//! benchmark runner keeps per benchmark family.

pub mod extract;
pub mod tables;

/// The benchmark directories with GC logs, in report order. These are
/// directory names under `benchmarks/`, not `Family` names.
pub const LATENCY_FAMILIES: &[&str] = &[
    "BigRamTesterS",
    "CompilerSpeed",
    "dacapo",
    "dacapo_large",
    "dacapo_huge",
    "DelayInducer",
    "jbb2005",
    "optaplanner",
    "pjbb2005",
    "renaissance",
    "rubykon",
    "specjvm2008",
];

const FULL_GC_MARKER: &str = "Pause Full";
const SYSTEM_GC_MARKER: &str = "System.gc()";

/// Which GC pauses to leave out, by cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GcCauseFilter {
    pub exclude_full: bool,
    pub exclude_system_gc: bool,
}

impl GcCauseFilter {
    pub fn admits(&self, cause: &str) -> bool {
        (!self.exclude_full || !cause.contains(FULL_GC_MARKER))
            && (!self.exclude_system_gc || !cause.contains(SYSTEM_GC_MARKER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_filter() {
        let full = "Pause Full (System.gc())";
        let young = "Pause Young (Normal) (G1 Evacuation Pause)";
        let young_system = "Pause Young (Concurrent Start) (System.gc())";

        let none = GcCauseFilter::default();
        assert!(none.admits(full) && none.admits(young) && none.admits(young_system));

        let no_full = GcCauseFilter {
            exclude_full: true,
            exclude_system_gc: false,
        };
        assert!(!no_full.admits(full));
        assert!(no_full.admits(young_system));

        let no_system = GcCauseFilter {
            exclude_full: false,
            exclude_system_gc: true,
        };
        assert!(!no_system.admits(full));
        assert!(!no_system.admits(young_system));
        assert!(no_system.admits(young));
    }
}
