//! Build context providing stage timing, captured log messages and build statistics
//!
//! Messages are always forwarded to the `log` facade; the context additionally
//! keeps the ones at or above its own threshold so callers can inspect a build
//! after the fact.

use std::collections::HashMap;
use std::time::Duration;
use web_time::Instant;

/// Log level for context messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Warning = 2,
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Info => log::Level::Info,
            LogLevel::Warning => log::Level::Warn,
        }
    }
}

/// Stages of a zone build, used as timer keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildStage {
    /// Whole build, validation included
    Total,
    /// Vertex welding
    Weld,
    /// Node creation and adjacency detection
    Graph,
    /// Connected group flood fill
    Partition,
    /// Rounding, centroids and local id rewrite
    Lower,
}

/// Captured log message
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
}

/// Accumulated time spent in one build stage
#[derive(Debug, Clone, Copy, Default)]
pub struct TimerEntry {
    pub duration: Duration,
    /// Number of completed start/stop pairs
    pub count: usize,
}

/// Counters describing the last completed build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Vertices in the input position buffer
    pub input_vertices: usize,
    /// Vertices left after welding
    pub welded_vertices: usize,
    /// Triangles in the input
    pub input_triangles: usize,
    /// Triangles dropped as degenerate (only with `discard_degenerate`)
    pub discarded_triangles: usize,
    /// Nodes in the finished zone
    pub nodes: usize,
    /// Undirected adjacency links
    pub links: usize,
    /// Connected groups
    pub groups: usize,
}

/// Context for zone builds
#[derive(Debug)]
pub struct BuildContext {
    logs: Vec<LogEntry>,
    active_timers: HashMap<BuildStage, Instant>,
    timers: HashMap<BuildStage, TimerEntry>,
    min_log_level: LogLevel,
    enable_timing: bool,
    max_log_entries: usize,
    stats: Option<BuildStats>,
}

impl Default for BuildContext {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildContext {
    /// Creates a context that keeps info and warning messages and times every stage
    pub fn new() -> Self {
        Self {
            logs: Vec::new(),
            active_timers: HashMap::new(),
            timers: HashMap::new(),
            min_log_level: LogLevel::Info,
            enable_timing: true,
            max_log_entries: 256,
            stats: None,
        }
    }

    /// Sets the minimum level of captured messages
    pub fn set_log_level(&mut self, level: LogLevel) {
        self.min_log_level = level;
    }

    /// Enables or disables stage timing
    pub fn set_timing_enabled(&mut self, enabled: bool) {
        self.enable_timing = enabled;
    }

    /// Sets the maximum number of captured messages; the oldest are dropped first
    pub fn set_max_log_entries(&mut self, max_entries: usize) {
        self.max_log_entries = max_entries;
    }

    pub fn log_debug(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    pub fn log_info(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    pub fn log_warning(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Warning, message);
    }

    fn log(&mut self, level: LogLevel, message: impl Into<String>) {
        let message = message.into();
        log::log!(target: "navzone_build", log::Level::from(level), "{}", message);

        if level >= self.min_log_level {
            self.logs.push(LogEntry { level, message });
            if self.logs.len() > self.max_log_entries {
                self.logs.remove(0);
            }
        }
    }

    /// Starts timing a stage
    pub fn start_timer(&mut self, stage: BuildStage) {
        if self.enable_timing {
            self.active_timers.insert(stage, Instant::now());
        }
    }

    /// Stops timing a stage and adds the elapsed time to its entry
    pub fn stop_timer(&mut self, stage: BuildStage) {
        if let Some(start) = self.active_timers.remove(&stage) {
            let entry = self.timers.entry(stage).or_default();
            entry.duration += start.elapsed();
            entry.count += 1;
        }
    }

    /// Total time recorded for a stage
    pub fn timer_duration(&self, stage: BuildStage) -> Option<Duration> {
        self.timers.get(&stage).map(|entry| entry.duration)
    }

    /// Number of completed timings for a stage
    pub fn timer_count(&self, stage: BuildStage) -> usize {
        self.timers.get(&stage).map_or(0, |entry| entry.count)
    }

    pub fn timers(&self) -> &HashMap<BuildStage, TimerEntry> {
        &self.timers
    }

    pub fn logs(&self) -> &[LogEntry] {
        &self.logs
    }

    pub fn logs_by_level(&self, level: LogLevel) -> Vec<&LogEntry> {
        self.logs.iter().filter(|entry| entry.level == level).collect()
    }

    pub(crate) fn set_stats(&mut self, stats: BuildStats) {
        self.stats = Some(stats);
    }

    /// Statistics of the last successful build run with this context
    pub fn stats(&self) -> Option<&BuildStats> {
        self.stats.as_ref()
    }

    /// Clears logs, timers and statistics
    pub fn reset(&mut self) {
        self.logs.clear();
        self.active_timers.clear();
        self.timers.clear();
        self.stats = None;
    }
}
