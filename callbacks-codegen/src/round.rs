//! One processing round: validate every candidate, then emit.

use crate::codegen::generate;
use crate::codegen::model::AnnotatedType;
use crate::config::CodegenConfig;
use crate::sink::Sink;
use crate::validate::{check_callback, check_field_getters, Candidate};

/// Outcome of a successful round.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Report {
    /// Qualified names of the dispatchers handed to the sink.
    pub generated: Vec<String>,
    /// Dispatchers whose write failed. The failure is logged and the round goes on.
    pub failed: Vec<String>,
}

pub struct Round<'c, S> {
    config: &'c CodegenConfig,
    sink: S,
}

impl<'c, S: Sink> Round<'c, S> {
    pub fn new(config: &'c CodegenConfig, sink: S) -> Self {
        Self { config, sink }
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Validates and emits `candidates` as one round.
    pub fn run(&mut self, candidates: &[Candidate]) -> syn::Result<Report> {
        let targets = check_round(candidates)?;
        Ok(self.emit(&targets))
    }

    /// Hands every validated type to the sink. Write failures are logged and
    /// recorded; they do not stop the remaining types.
    pub fn emit(&mut self, targets: &[AnnotatedType]) -> Report {
        let mut report = Report::default();
        for t in targets {
            let unit = generate(t, &self.config.runtime_crate);
            let name = unit.qualified_name();
            match self.sink.write(&unit) {
                Ok(()) => {
                    tracing::debug!(dispatcher = %name, source = %t.qualified_name(), "emitted callback dispatcher");
                    report.generated.push(name);
                }
                Err(e) => {
                    tracing::error!(dispatcher = %name, error = ?e, "failed to write callback dispatcher; skipping");
                    report.failed.push(name);
                }
            }
        }
        report
    }
}

/// Getter markers are checked first, then callback placement. The first
/// violation ends the round before anything reaches a sink.
pub fn check_round(candidates: &[Candidate]) -> syn::Result<Vec<AnnotatedType>> {
    let mut getters = Vec::with_capacity(candidates.len());
    for c in candidates {
        getters.push(check_field_getters(c)?);
    }
    let mut targets = Vec::new();
    for (c, g) in candidates.iter().zip(getters) {
        if c.callback.is_some() {
            targets.push(check_callback(c, g)?);
        }
    }
    Ok(targets)
}
