use std::io;

use ariadne::{sources, Color, Config, Label, Report, ReportKind};
use rowan::TextSize;

use crate::{binding::BindingKind, unused::Unused};

fn color(kind: BindingKind) -> Color {
    match kind {
        BindingKind::Receiver => Color::Magenta,
        BindingKind::Parameter => Color::Yellow,
        BindingKind::Result => Color::Cyan,
    }
}

/// Converts byte offsets into char offsets, for offsets in ascending order
struct CharOffsets<I> {
    char_bytes: I,
    bytes: usize,
    chars: usize,
}

impl<I: Iterator<Item = usize>> CharOffsets<I> {
    fn advance_to(&mut self, byte: usize) -> usize {
        while self.bytes < byte {
            match self.char_bytes.next() {
                Some(len) => {
                    self.bytes += len;
                    self.chars += 1;
                }
                None => break,
            }
        }
        self.chars
    }
}

/// Print unused bindings of one file as a diagnostic
///
/// assumes results to be sorted by occurrence in file
pub fn print(file: String, content: &str, results: &[Unused]) -> io::Result<()> {
    let Some(first) = results.first() else {
        return Ok(());
    };
    let first_result_range = first.binding.name.ident().text_range();
    let mut builder = Report::build(
        ReportKind::Warning,
        file.clone(),
        first_result_range.start().into(),
    )
    .with_config(Config::default().with_compact(true))
    .with_message("Unused bindings were found.");

    let mut offsets = CharOffsets {
        char_bytes: content.chars().map(|c| usize::from(TextSize::of(c))),
        bytes: 0,
        chars: 0,
    };
    // reverse order to avoid overlapping lanes
    let mut order = results.len();
    for result in results {
        order -= 1;

        let range = result.binding.name.ident().text_range();
        let start_char = offsets.advance_to(range.start().into());
        let end_char = offsets.advance_to(range.end().into());

        builder = builder.with_label(
            Label::new((file.clone(), start_char..end_char))
                .with_message(format!("{} in {}", result, result.scope))
                .with_color(color(result.binding.kind))
                .with_order(order as i32),
        );
    }

    builder.finish().print(sources(vec![(file, content)]))
}

/// 1-based line and column (in chars) of a byte offset
#[cfg(feature = "json-out")]
fn line_column(content: &str, offset: usize) -> (usize, usize) {
    let before = &content[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

/// Unused bindings of one file as a JSON object
#[cfg(feature = "json-out")]
pub fn json(file: &str, content: &str, results: &[Unused]) -> serde_json::Value {
    let results = results
        .iter()
        .map(|result| {
            let range = result.binding.name.ident().text_range();
            let (line, column) = line_column(content, range.start().into());
            let (_, end_column) = line_column(content, range.end().into());
            serde_json::json!({
                "line": line,
                "column": column,
                "endColumn": end_column,
                "name": result.binding.name.as_str(),
                "kind": result.binding.kind.to_string(),
                "scope": result.scope.to_string(),
                "message": result.to_string(),
            })
        })
        .collect::<Vec<_>>();
    serde_json::json!({
        "file": file,
        "results": results,
    })
}
