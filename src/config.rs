//! Runtime configuration.

/// Tunables for a [`Runtime`](crate::Runtime).
///
/// ```ignore
/// let runtime = Runtime::with_config(
///     RuntimeConfig::default()
///         .with_max_ticks(10)
///         .with_catch_effect_panics(false),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Ticks `run_until_idle` may process before giving up with `UpdateLoop`.
    pub max_ticks: usize,
    /// Diagnostics retained for `take_diagnostics`; oldest are dropped first.
    pub diagnostics_capacity: usize,
    /// Catch panics from effects and cleanups at the slot boundary.
    pub catch_effect_panics: bool,
    /// Report dependency lists that change length between renders.
    pub report_dependency_shape_changes: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            max_ticks: 50,
            diagnostics_capacity: 256,
            catch_effect_panics: true,
            report_dependency_shape_changes: true,
        }
    }
}

impl RuntimeConfig {
    pub fn with_max_ticks(mut self, max_ticks: usize) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    pub fn with_diagnostics_capacity(mut self, capacity: usize) -> Self {
        self.diagnostics_capacity = capacity;
        self
    }

    pub fn with_catch_effect_panics(mut self, catch: bool) -> Self {
        self.catch_effect_panics = catch;
        self
    }

    pub fn with_report_dependency_shape_changes(mut self, report: bool) -> Self {
        self.report_dependency_shape_changes = report;
        self
    }
}
