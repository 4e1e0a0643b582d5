//! The ordered list of user expressions and their validity.

use crate::engine::Engine;

/// One non-empty expression slot as last accepted or rejected by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionEntry {
    /// Index of the input slot this entry came from.
    pub slot: usize,
    pub source: String,
    pub valid: bool,
}

/// Per-slot error flags for every input slot, empty ones included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidityReport {
    erroneous: Vec<bool>,
}

impl ValidityReport {
    /// Whether slot `index` should be shown as erroneous. Empty and
    /// out-of-range slots never are.
    pub fn is_erroneous(&self, index: usize) -> bool {
        self.erroneous.get(index).copied().unwrap_or(false)
    }

    pub fn erroneous_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.erroneous
            .iter()
            .enumerate()
            .filter_map(|(i, bad)| bad.then_some(i))
    }

    pub fn all_valid(&self) -> bool {
        !self.erroneous.iter().any(|bad| *bad)
    }

    pub fn len(&self) -> usize {
        self.erroneous.len()
    }

    pub fn is_empty(&self) -> bool {
        self.erroneous.is_empty()
    }
}

type ValidityObserver = Box<dyn FnMut(&ValidityReport)>;

/// Owns the raw input slots and the entries the engine was initialized with.
///
/// Every change replaces the engine session wholesale: `reset` followed by
/// `initialize` with all non-empty slots.
#[derive(Default)]
pub struct ExpressionSet {
    slots: Vec<String>,
    entries: Vec<ExpressionEntry>,
    report: ValidityReport,
    observer: Option<ValidityObserver>,
}

impl std::fmt::Debug for ExpressionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpressionSet")
            .field("slots", &self.slots)
            .field("entries", &self.entries)
            .field("report", &self.report)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

fn is_blank(source: &str) -> bool {
    source.trim().is_empty()
}

impl ExpressionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback invoked with every new validity report.
    pub fn set_observer(&mut self, observer: impl FnMut(&ValidityReport) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    pub fn entries(&self) -> &[ExpressionEntry] {
        &self.entries
    }

    pub fn report(&self) -> &ValidityReport {
        &self.report
    }

    /// Replaces all slots and re-initializes the engine with the non-empty
    /// ones.
    pub fn apply<S: AsRef<str>>(&mut self, slots: &[S], engine: &mut impl Engine) -> &ValidityReport {
        self.slots = slots.iter().map(|s| s.as_ref().to_owned()).collect();
        self.reinitialize(engine)
    }

    /// Re-runs `reset` + `initialize` with the current slots.
    pub fn reinitialize(&mut self, engine: &mut impl Engine) -> &ValidityReport {
        let origins: Vec<usize> = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, source)| !is_blank(source))
            .map(|(i, _)| i)
            .collect();
        let sources: Vec<String> = origins.iter().map(|&i| self.slots[i].clone()).collect();

        engine.reset();
        let accepted = engine.initialize(&sources);
        if accepted.len() != sources.len() {
            tracing::warn!(
                expected = sources.len(),
                got = accepted.len(),
                "engine returned a validity list of the wrong length"
            );
        }

        let mut erroneous = vec![false; self.slots.len()];
        self.entries = origins
            .into_iter()
            .zip(sources)
            .enumerate()
            .map(|(n, (slot, source))| {
                let valid = accepted.get(n).copied().unwrap_or(false);
                erroneous[slot] = !valid;
                ExpressionEntry {
                    slot,
                    source,
                    valid,
                }
            })
            .collect();
        self.report = ValidityReport { erroneous };

        tracing::debug!(
            slots = self.slots.len(),
            entries = self.entries.len(),
            invalid = self.report.erroneous_slots().count(),
            "expressions initialized"
        );

        if let Some(observer) = self.observer.as_mut() {
            observer(&self.report);
        }
        &self.report
    }
}
