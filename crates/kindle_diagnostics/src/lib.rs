pub mod diagnostic_report;
pub mod message;

use std::fmt::Write;

use colored::*;
use diagnostic_report::{Diagnostic, Severity};
use kindle_type::file::SourceMap;

pub fn render(
  diag: &Diagnostic,
  sm: &SourceMap,
) {
  print!("{}", render_to_string(diag, sm));
}

pub fn render_batch(
  diagnostics: &[Diagnostic],
  sm: &SourceMap,
) {
  for diag in diagnostics {
    render(diag, sm);
  }
}

pub fn render_to_string(
  diag: &Diagnostic,
  sm: &SourceMap,
) -> String {
  let mut out = String::new();

  write_header(&mut out, diag);
  write_body(&mut out, diag, sm);

  for note in &diag.notes {
    let _ = writeln!(out, "  {} {}", "note:".cyan().bold(), note);
  }

  out.push('\n');
  out
}

fn write_header(
  out: &mut String,
  diag: &Diagnostic,
) {
  let message = diag.message.bold();
  let code = diag.error_code.bold();

  let _ = match diag.severity {
    Severity::Error => writeln!(out, "{}[{}]: {}", "Error".red().bold(), code.red().bold(), message),
    Severity::Warning => writeln!(out, "{}[{}]: {}", "Warning".yellow().bold(), code.yellow(), message),
  };
}

fn write_body(
  out: &mut String,
  diag: &Diagnostic,
  sm: &SourceMap,
) {
  let file = sm.get(&diag.primary_span.file);
  let (line, col) = sm.line_col(&diag.primary_span.file, diag.primary_span.start);
  let (end_line, end_col) = sm.line_col(&diag.primary_span.file, diag.primary_span.end);

  let _ = writeln!(
    out,
    "{:2}{} {}:{}:{}",
    "",
    "-->".blue().bold(),
    file.path.display().to_string().bold(),
    line.to_string().bold(),
    col.to_string().bold(),
  );

  let pipe = "|".blue().bold();
  let lines: Vec<&str> = file.text.lines().collect();
  let line_idx = (line as usize).saturating_sub(1);

  let _ = writeln!(out, "{:3}{:3}", "", pipe);
  if let Some(error_line) = lines.get(line_idx) {
    let _ = writeln!(out, "{:3}{:3}{}", line.to_string().blue().bold(), pipe, error_line);

    let span_len = if line == end_line {
      (end_col.saturating_sub(col)).max(1) as usize
    } else {
      error_line.chars().count().saturating_sub(col as usize - 1).max(1)
    };

    let caret = "^".repeat(span_len).red().bold();
    let _ = writeln!(out, "{:3}{:3}{}{}", "", pipe, " ".repeat(col as usize - 1), caret);
  }

  for label in &diag.labels {
    let (label_line, label_col) = sm.line_col(&label.span.file, label.span.start);
    let _ = writeln!(out, "  {} {}", "label:".yellow().bold(), label.message);

    if let Some(label_line_text) = lines.get((label_line as usize).saturating_sub(1)) {
      let _ = writeln!(out, "{:3}{:3}{}", label_line.to_string().blue().bold(), pipe, label_line_text);
      let _ = writeln!(
        out,
        "{:3}{:3}{}{}",
        "",
        pipe,
        " ".repeat(label_col as usize - 1),
        "^".yellow().bold()
      );
    }
  }
}

#[cfg(test)]
mod tests {
  use kindle_type::{BytePosition, span::Span};

  use super::*;
  use crate::message::DiagnosticMessage;

  #[test]
  fn renders_location_and_caret() {
    colored::control::set_override(false);

    let mut sm = SourceMap::new();
    let file = sm.add_script("script", "5?.toString()".to_string());
    let diag = DiagnosticMessage::NullSafeResultNotNullable {
      type_name: "int".to_string(),
      span: Span::new(file, BytePosition(2), BytePosition(13)),
    }
    .report()
    .with_note("receiver has primitive type 'int'".to_string());

    let out = render_to_string(&diag, &sm);

    assert!(out.starts_with("Error[A0040]: Result of null safe operator must be nullable, found 'int'\n"));
    assert!(out.contains("<script>:1:3"));
    assert!(out.contains("  ^^^^^^^^^^^"));
    assert!(out.contains("note: receiver has primitive type 'int'"));
  }

  #[test]
  fn warnings_use_their_own_header() {
    colored::control::set_override(false);

    let mut sm = SourceMap::new();
    let file = sm.add_script("script", "let x = a;".to_string());
    let diag = Diagnostic::warning("A9000", "unused variable 'x'", Span::new(file, BytePosition(4), BytePosition(5)));

    let out = render_to_string(&diag, &sm);

    assert!(out.starts_with("Warning[A9000]: unused variable 'x'\n"));
    assert!(out.contains("<script>:1:5"));
  }
}
