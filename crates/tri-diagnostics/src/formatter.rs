// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Rich terminal formatter for diagnostics.
//!
//! Produces multi-line, color-coded error output:
//!
//! ```text
//! error[E0308]: mismatched types
//!   --> main.tri:1:4
//!     |
//!   1 | if 3 then pass else pass
//!     |    ^ expected `Boolean`, found `Integer`
//! ```

use std::collections::BTreeMap;

use colored::Colorize;

use tri_ast::LineMap;

use crate::{Diagnostic, LabelStyle, Severity};

/// Formats diagnostics for terminal output.
pub struct DiagnosticFormatter<'a> {
    source: &'a str,
    file_name: Option<&'a str>,
    line_map: LineMap,
}

/// A source line with its labels.
struct AnnotatedLine {
    line_num: usize,
    text: String,
    annotations: Vec<Annotation>,
}

struct Annotation {
    col_start: usize,
    col_end: usize,
    style: LabelStyle,
    message: Option<String>,
}

impl<'a> DiagnosticFormatter<'a> {
    pub fn new(source: &'a str) -> Self {
        let line_map = LineMap::new(source);
        Self {
            source,
            file_name: None,
            line_map,
        }
    }

    pub fn with_file_name(mut self, name: &'a str) -> Self {
        self.file_name = Some(name);
        self
    }

    pub fn format(&self, diagnostic: &Diagnostic) -> String {
        let mut out = String::new();

        // Line 1: severity[code]: message
        self.format_header(&mut out, diagnostic);

        let annotated = self.collect_annotated_lines(diagnostic);
        let Some(primary) = diagnostic.primary_span() else {
            self.format_footer(&mut out, diagnostic);
            return out;
        };

        // Line 2: --> file:line:col
        let file = self.file_name.unwrap_or("<source>");
        let (line, col) = self.offset_to_line_col(primary.start);
        out.push_str(&format!("  {} {}:{}:{}\n", "-->".blue(), file, line, col));

        // Calculate gutter width from max line number
        let max_line = annotated.last().map(|a| a.line_num).unwrap_or(1);
        let gutter_width = max_line.to_string().len().max(2);

        let mut prev_line_num: Option<usize> = None;
        for annotated_line in &annotated {
            match prev_line_num {
                // Gap indicator for non-consecutive lines
                Some(prev) if annotated_line.line_num > prev + 1 => {
                    out.push_str(&format!("{} {}\n", " ".repeat(gutter_width), "...".blue()));
                }
                Some(_) => {}
                None => {
                    out.push_str(&format!("{} {}\n", " ".repeat(gutter_width + 1), "|".blue()));
                }
            }

            // Source line: NN | code
            out.push_str(&format!(
                "{:>width$} {} {}\n",
                annotated_line.line_num.to_string().blue().bold(),
                "|".blue(),
                annotated_line.text,
                width = gutter_width + 1,
            ));

            self.format_annotations(&mut out, annotated_line, gutter_width);

            prev_line_num = Some(annotated_line.line_num);
        }

        self.format_footer(&mut out, diagnostic);

        out
    }

    fn format_header(&self, out: &mut String, diagnostic: &Diagnostic) {
        let severity_str = match diagnostic.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
            Severity::Note => "note".blue().bold(),
        };

        if let Some(ref code) = diagnostic.code {
            out.push_str(&format!(
                "{}[{}]: {}\n",
                severity_str,
                code.0.clone().red().bold(),
                diagnostic.message.bold()
            ));
        } else {
            out.push_str(&format!("{}: {}\n", severity_str, diagnostic.message.bold()));
        }
    }

    fn format_footer(&self, out: &mut String, diagnostic: &Diagnostic) {
        let gutter = " ".repeat(3);

        for note in &diagnostic.notes {
            out.push_str(&format!("{} {} {}: {}\n", gutter, "=".cyan(), "note".cyan().bold(), note));
        }

        if let Some(ref help) = diagnostic.help {
            out.push_str(&format!("{} {} {}: {}\n", gutter, "=".cyan(), "help".cyan().bold(), help));
        }
    }

    fn collect_annotated_lines(&self, diagnostic: &Diagnostic) -> Vec<AnnotatedLine> {
        let mut lines_map: BTreeMap<usize, AnnotatedLine> = BTreeMap::new();

        for label in &diagnostic.labels {
            let (line_num, col_start) = self.offset_to_line_col(label.span.start);
            let (end_line, col_end) = self.offset_to_line_col(label.span.end);

            // For multi-line spans, just annotate the start line
            let effective_col_end = if end_line == line_num {
                col_end
            } else {
                self.get_line(line_num).unwrap_or("").chars().count() + 1
            };

            let entry = lines_map.entry(line_num).or_insert_with(|| AnnotatedLine {
                line_num,
                text: self.get_line(line_num).unwrap_or("").to_string(),
                annotations: Vec::new(),
            });

            entry.annotations.push(Annotation {
                col_start,
                col_end: effective_col_end.max(col_start + 1), // At least 1 char wide
                style: label.style,
                message: label.message.clone(),
            });
        }

        lines_map.into_values().collect()
    }

    fn format_annotations(&self, out: &mut String, annotated_line: &AnnotatedLine, gutter_width: usize) {
        // Primary first, then by column
        let mut sorted: Vec<&Annotation> = annotated_line.annotations.iter().collect();
        sorted.sort_by_key(|a| (a.style != LabelStyle::Primary, a.col_start));

        let line_len = annotated_line.text.len() + 10;
        let mut underline = vec![' '; line_len];
        let mut messages: Vec<(usize, LabelStyle, &str)> = Vec::new();

        for ann in &sorted {
            let ch = match ann.style {
                LabelStyle::Primary => '^',
                LabelStyle::Secondary => '-',
            };

            let start = ann.col_start.saturating_sub(1).min(line_len);
            let end = ann.col_end.saturating_sub(1).min(line_len);
            for slot in &mut underline[start..end.max(start)] {
                *slot = ch;
            }

            if let Some(ref msg) = ann.message {
                messages.push((ann.col_start, ann.style, msg));
            }
        }

        let underline_str: String = underline.iter().collect::<String>().trim_end().to_string();
        if underline_str.is_empty() {
            return;
        }
        let colored_underline = color_underline(&underline_str);
        let pipe_prefix = format!("{} {}", " ".repeat(gutter_width + 1), "|".blue());

        if messages.len() <= 1 {
            match messages.first() {
                Some((_, style, msg)) => out.push_str(&format!(
                    "{} {} {}\n",
                    pipe_prefix,
                    colored_underline,
                    styled(msg, *style)
                )),
                None => out.push_str(&format!("{} {}\n", pipe_prefix, colored_underline)),
            }
            return;
        }

        // Multiple annotations: underline first, then one message per line
        out.push_str(&format!("{} {}\n", pipe_prefix, colored_underline));
        for (col, style, msg) in messages.iter().rev() {
            out.push_str(&format!(
                "{} {}{}\n",
                pipe_prefix,
                " ".repeat(col.saturating_sub(1)),
                styled(msg, *style),
            ));
        }
    }

    /// Convert byte offset to (line, col), both 1-based.
    fn offset_to_line_col(&self, offset: usize) -> (usize, usize) {
        let (line, col) = self.line_map.offset_to_line_col(offset);
        (line as usize, col as usize)
    }

    /// Get source line text by 1-based line number.
    fn get_line(&self, line_num: usize) -> Option<&str> {
        self.line_map.line_text(self.source, line_num as u32)
    }
}

fn styled(msg: &str, style: LabelStyle) -> String {
    match style {
        LabelStyle::Primary => msg.red().bold().to_string(),
        LabelStyle::Secondary => msg.blue().to_string(),
    }
}

/// Color the underline characters (^ in red, - in blue).
fn color_underline(s: &str) -> String {
    let mut result = String::new();
    let mut current_char = None;
    let mut run = String::new();

    for ch in s.chars() {
        let kind = match ch {
            '^' | '-' => Some(ch),
            _ => None,
        };

        if kind != current_char && !run.is_empty() {
            result.push_str(&flush_run(&run, current_char));
            run.clear();
        }
        run.push(ch);
        current_char = kind;
    }

    if !run.is_empty() {
        result.push_str(&flush_run(&run, current_char));
    }

    result
}

fn flush_run(run: &str, kind: Option<char>) -> String {
    match kind {
        Some('^') => run.red().bold().to_string(),
        Some('-') => run.blue().to_string(),
        _ => run.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tri_ast::Span;

    fn plain(source: &str, diag: &Diagnostic) -> String {
        colored::control::set_override(false);
        DiagnosticFormatter::new(source).with_file_name("main.tri").format(diag)
    }

    #[test]
    fn single_label() {
        let src = "if 3 then pass else pass";
        let diag = Diagnostic::error("mismatched types")
            .with_code("E0308")
            .with_primary(Span::new(3, 4), "expected `Boolean`, found `Integer`");
        assert_eq!(
            plain(src, &diag),
            "error[E0308]: mismatched types\n  --> main.tri:1:4\n    |\n  1 | if 3 then pass else pass\n    |    ^ expected `Boolean`, found `Integer`\n"
        );
    }

    #[test]
    fn location_is_line_and_column() {
        let src = "let\n  var x Integer;\n  var x Char\nin pass endlet pass";
        let second = src.rfind('x').unwrap();
        let first = src.find('x').unwrap();
        let diag = Diagnostic::error("duplicate declaration: `x`")
            .with_code("E0201")
            .with_primary(Span::new(second, second + 1), "redeclared here")
            .with_secondary(Span::new(first, first + 1), "previously declared here")
            .with_help("rename one of them");
        let out = plain(src, &diag);
        assert!(out.contains("--> main.tri:3:7"), "{out}");
        assert!(out.contains(" 2 |   var x Integer;"));
        assert!(out.contains(" 3 |   var x Char"));
        assert!(out.ends_with("    = help: rename one of them\n"));
    }

    #[test]
    fn no_labels() {
        let diag = Diagnostic::error("could not read input").with_note("check the path");
        assert_eq!(
            plain("", &diag),
            "error: could not read input\n    = note: check the path\n"
        );
    }
}
