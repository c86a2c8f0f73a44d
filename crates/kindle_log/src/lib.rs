//! Stderr logging for the Kindle compiler and evaluator, gated by
//! [`KindleConfig`].

pub use colored;

use kindle_config::{DebugTrace, KindleConfig};

pub fn effective_verbose(config: &KindleConfig) -> u8 {
  if config.quiet {
    return 0;
  }

  if config.debug && config.verbose < 2 {
    return 2;
  }

  config.verbose
}

pub fn log_phase(config: &KindleConfig) -> bool {
  !config.quiet
}

pub fn log_debug(config: &KindleConfig) -> bool {
  effective_verbose(config) >= 2
}

pub fn log_trace(config: &KindleConfig) -> bool {
  effective_verbose(config) >= 3
}

pub fn debug_trace_enabled(
  config: &KindleConfig,
  trace: DebugTrace,
) -> bool {
  !config.quiet && (config.debug || config.debug_trace.contains(&trace))
}

pub fn trace_name(trace: DebugTrace) -> &'static str {
  match trace {
    DebugTrace::Analyzer => "analyzer",
    DebugTrace::Lowering => "lowering",
    DebugTrace::Collect => "collect",
    DebugTrace::Eval => "eval",
  }
}

/// Start of a pipeline step, e.g. `--> Compiling script (3 statements)`.
#[macro_export]
macro_rules! phase_log {
  ($config:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {{
    if $crate::log_phase($config) {
      use $crate::colored::Colorize;
      eprintln!("  {} {}", "-->".bright_blue().bold(), format!($fmt $(, $arg)*));
    }
  }};
}

#[macro_export]
macro_rules! phase_ok {
  ($config:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {{
    if $crate::log_phase($config) {
      use $crate::colored::Colorize;
      eprintln!("{} {}", "-->".bright_green().bold(), format!($fmt $(, $arg)*));
    }
  }};
}

#[macro_export]
macro_rules! phase_warn {
  ($config:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {{
    if $crate::log_phase($config) {
      use $crate::colored::Colorize;
      eprintln!("{} {}", "-->".bright_yellow().bold(), format!($fmt $(, $arg)*));
    }
  }};
}

/// Prints `debug[<trace>]: ...` when `config.debug` is set or the trace was
/// requested individually.
#[macro_export]
macro_rules! trace_dbg {
  ($config:expr, $trace:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {{
    if $crate::debug_trace_enabled($config, $trace) {
      eprintln!("debug[{}]: {}", $crate::trace_name($trace), format!($fmt $(, $arg)*));
    }
  }};
}

#[macro_export]
macro_rules! log_dbg {
  ($config:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {{
    if $crate::log_debug($config) {
      eprintln!("debug: {}", format!($fmt $(, $arg)*));
    }
  }};
}

/// Verbosity 3 and up. Used by the evaluator for per-node output.
#[macro_export]
macro_rules! log_trc {
  ($config:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {{
    if $crate::log_trace($config) {
      eprintln!("trace: {}", format!($fmt $(, $arg)*));
    }
  }};
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn debug_raises_verbosity() {
    let config = KindleConfig::new_basic(true, vec![], false, 0);
    assert_eq!(effective_verbose(&config), 2);
    assert!(log_debug(&config));
    assert!(!log_trace(&config));
  }

  #[test]
  fn quiet_silences_everything() {
    let config = KindleConfig::new_basic(true, vec![DebugTrace::Eval], true, 3);
    assert_eq!(effective_verbose(&config), 0);
    assert!(!log_phase(&config));
    assert!(!log_debug(&config));
    assert!(!debug_trace_enabled(&config, DebugTrace::Eval));
  }

  #[test]
  fn traces_are_selected_individually() {
    let config = KindleConfig::new_basic(false, vec![DebugTrace::Lowering], false, 0);
    assert!(debug_trace_enabled(&config, DebugTrace::Lowering));
    assert!(!debug_trace_enabled(&config, DebugTrace::Analyzer));
    assert_eq!(trace_name(DebugTrace::Lowering), "lowering");
  }
}
