use std::collections::HashMap;
use std::time::Instant;

/// Cross-cutting logger for workflow events.
///
/// Lets the CLI report a run summary while the desktop app and tests
/// stay silent, without changing the orchestration code.
pub trait WorkflowLogger: Send {
    /// Record that the processing stage entered a new state.
    fn state(&mut self, name: &str);

    /// Record how long one service call took.
    fn timing(&mut self, call: &str, duration_ms: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events.
pub struct NullWorkflowLogger;

impl WorkflowLogger for NullWorkflowLogger {
    fn state(&mut self, _name: &str) {}
    fn timing(&mut self, _call: &str, _duration_ms: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// Forwards events to the `log` crate and keeps enough history to print a
/// summary once the run completes.
pub struct SummaryWorkflowLogger {
    states: Vec<String>,
    timings: HashMap<String, Vec<f64>>,
    messages: Vec<String>,
    start_time: Instant,
}

impl SummaryWorkflowLogger {
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            timings: HashMap::new(),
            messages: Vec::new(),
            start_time: Instant::now(),
        }
    }

    /// Returns the formatted summary, or `None` if nothing was recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.states.is_empty() && self.timings.is_empty() && self.messages.is_empty() {
            return None;
        }

        let elapsed_s = self.start_time.elapsed().as_secs_f64();
        let calls: usize = self.timings.values().map(Vec::len).sum();
        let mut lines = vec![format!(
            "Workflow summary ({calls} service calls, {elapsed_s:.1}s total):"
        )];

        if !self.states.is_empty() {
            lines.push(format!("  states: {}", self.states.join(" -> ")));
        }

        let mut names: Vec<_> = self.timings.keys().collect();
        names.sort();
        for name in names {
            let durations = &self.timings[name];
            let total_ms: f64 = durations.iter().sum();
            lines.push(format!("  {name:10}: {total_ms:7.0}ms"));
        }

        if let Some(last) = self.messages.last() {
            lines.push(format!("  last: {last}"));
        }

        Some(lines.join("\n"))
    }

    pub fn states(&self) -> &[String] {
        &self.states
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn timings_for(&self, call: &str) -> Option<&[f64]> {
        self.timings.get(call).map(|v| v.as_slice())
    }
}

impl Default for SummaryWorkflowLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowLogger for SummaryWorkflowLogger {
    fn state(&mut self, name: &str) {
        log::debug!("Processing state: {name}");
        self.states.push(name.to_string());
    }

    fn timing(&mut self, call: &str, duration_ms: f64) {
        self.timings
            .entry(call.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn info(&mut self, message: &str) {
        self.messages.push(message.to_string());
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_logger_all_methods_are_noop() {
        let mut logger = NullWorkflowLogger;
        logger.state("idle");
        logger.timing("extract", 5.0);
        logger.info("hello");
        logger.summary();
    }

    #[test]
    fn test_states_recorded_in_order() {
        let mut logger = SummaryWorkflowLogger::new();
        logger.state("awaiting_extraction");
        logger.state("awaiting_prediction");
        logger.state("terminal");
        assert_eq!(
            logger.states(),
            ["awaiting_extraction", "awaiting_prediction", "terminal"]
        );
    }

    #[test]
    fn test_timing_records_values() {
        let mut logger = SummaryWorkflowLogger::new();
        logger.timing("extract", 120.0);
        logger.timing("predict", 30.0);

        let extract = logger.timings_for("extract").unwrap();
        assert_eq!(extract.len(), 1);
        assert!((extract[0] - 120.0).abs() < f64::EPSILON);
        assert!(logger.timings_for("missing").is_none());
    }

    #[test]
    fn test_summary_lists_states_and_calls() {
        let mut logger = SummaryWorkflowLogger::new();
        logger.state("awaiting_extraction");
        logger.state("terminal");
        logger.timing("extract", 120.0);

        let summary = logger.summary_string().unwrap();
        assert!(summary.contains("Workflow summary (1 service calls"));
        assert!(summary.contains("awaiting_extraction -> terminal"));
        assert!(summary.contains("extract"));
    }

    #[test]
    fn test_empty_summary_returns_none() {
        assert!(SummaryWorkflowLogger::new().summary_string().is_none());
    }

    #[test]
    fn test_info_stores_messages() {
        let mut logger = SummaryWorkflowLogger::new();
        logger.info("hello world");
        assert_eq!(logger.messages(), ["hello world"]);
    }

    #[test]
    fn test_summary_ends_with_last_message() {
        let mut logger = SummaryWorkflowLogger::new();
        logger.state("terminal");
        logger.info("Extracting face mesh from photo.jpg");
        logger.info("Processing abandoned");

        let summary = logger.summary_string().unwrap();
        assert!(summary.ends_with("  last: Processing abandoned"));
    }
}
