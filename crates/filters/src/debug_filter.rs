//! Trace instrumentation for filter evaluation.
//!
//! This module emits structured tracing events for rule registration, path
//! decisions, document loads and merges. All tracing is conditionally
//! compiled behind the `tracing` cargo feature and collapses to no-op inline
//! functions when disabled, so evaluation hot paths carry no cost in default
//! builds.

/// Target name for tracing events.
#[cfg(feature = "tracing")]
const FILTER_TARGET: &str = "treepack::filter";

/// Traces a rule being registered with a path filter set.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_rule_added(root: &str, pattern: &str, is_include: bool) {
    tracing::debug!(
        target: FILTER_TARGET,
        root = %root,
        pattern = %pattern,
        is_include = is_include,
        "rule_added"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_rule_added(_root: &str, _pattern: &str, _is_include: bool) {}

/// Traces the inclusion decision for a path within one filter set.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_decision(path: &str, root: &str, included: bool) {
    tracing::trace!(
        target: FILTER_TARGET,
        path = %path,
        root = %root,
        included = included,
        "filter_decision"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_decision(_path: &str, _root: &str, _included: bool) {}

/// Traces a successfully loaded filter document.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_document_loaded(version: f64, filter_sets: usize) {
    tracing::debug!(
        target: FILTER_TARGET,
        version = version,
        filter_sets = filter_sets,
        "document_loaded"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_document_loaded(_version: f64, _filter_sets: usize) {}

/// Traces a successful merge of filter sets into a workspace filter.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_merge(added: usize) {
    tracing::debug!(target: FILTER_TARGET, added = added, "filter_merged");
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_merge(_added: usize) {}

/// Traces summary statistics for a filtering session.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_summary(evaluated: usize, included: usize, excluded: usize) {
    tracing::info!(
        target: FILTER_TARGET,
        evaluated = evaluated,
        included = included,
        excluded = excluded,
        "filter_summary"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_summary(_evaluated: usize, _included: usize, _excluded: usize) {}

/// Aggregates statistics across a filtering session.
///
/// Callers driving a tree traversal record each decision here and emit one
/// summary event at the end instead of tracing every path individually.
///
/// # Examples
///
/// ```
/// use treepack_filters::debug_filter::EvaluationTracer;
///
/// let mut tracer = EvaluationTracer::new();
/// tracer.record(true);
/// tracer.record(false);
/// tracer.record(true);
/// tracer.summary();
///
/// assert_eq!(tracer.evaluated(), 3);
/// assert_eq!(tracer.included(), 2);
/// assert_eq!(tracer.excluded(), 1);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct EvaluationTracer {
    evaluated: usize,
    included: usize,
    excluded: usize,
}

impl EvaluationTracer {
    /// Creates a tracer with zero counts.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            evaluated: 0,
            included: 0,
            excluded: 0,
        }
    }

    /// Records one inclusion decision.
    pub fn record(&mut self, included: bool) {
        self.evaluated += 1;
        if included {
            self.included += 1;
        } else {
            self.excluded += 1;
        }
    }

    /// Emits a summary trace event with the accumulated statistics.
    pub fn summary(&self) {
        trace_summary(self.evaluated, self.included, self.excluded);
    }

    /// Resets all counters to zero.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Returns the number of recorded decisions.
    #[must_use]
    pub const fn evaluated(&self) -> usize {
        self.evaluated
    }

    /// Returns the number of included decisions.
    #[must_use]
    pub const fn included(&self) -> usize {
        self.included
    }

    /// Returns the number of excluded decisions.
    #[must_use]
    pub const fn excluded(&self) -> usize {
        self.excluded
    }

    /// Returns the ratio of included decisions, or zero before the first
    /// record.
    #[must_use]
    pub fn include_ratio(&self) -> f64 {
        if self.evaluated == 0 {
            0.0
        } else {
            (self.included as f64) / (self.evaluated as f64)
        }
    }
}
