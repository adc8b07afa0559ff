//! Ordering and rendering of messages.

use std::fmt::{self, Write as _};
use std::path::{Path, PathBuf};

use crate::Message;

/// Stable-sort messages by line, column and rule identifier.
pub fn sort_messages(messages: &mut [Message]) {
    messages.sort_by(|a, b| {
        (a.span.start.line, a.span.start.column, a.rule).cmp(&(
            b.span.start.line,
            b.span.start.column,
            b.rule,
        ))
    });
}

/// The messages of one file.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    pub messages: Vec<Message>,
}

impl FileReport {
    pub fn new(path: impl Into<PathBuf>, mut messages: Vec<Message>) -> Self {
        sort_messages(&mut messages);
        Self {
            path: path.into(),
            messages,
        }
    }

    /// Render as `path:line:column: [rule] message` lines.
    pub fn render(&self) -> String {
        let mut output = String::new();
        for message in &self.messages {
            let _ = writeln!(output, "{}", Line::new(&self.path, message));
        }
        output
    }
}

/// Messages across files, ordered by path.
#[derive(Debug, Clone, Default)]
pub struct Report {
    files: Vec<FileReport>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a report from per-file results in any order.
    pub fn from_files(files: impl IntoIterator<Item = FileReport>) -> Self {
        let mut files: Vec<FileReport> = files.into_iter().collect();
        files.sort_by(|a, b| a.path.cmp(&b.path));
        Self { files }
    }

    pub fn files(&self) -> &[FileReport] {
        &self.files
    }

    /// All messages with their file, in report order.
    pub fn messages(&self) -> impl Iterator<Item = (&Path, &Message)> {
        self.files.iter().flat_map(|file| {
            file.messages
                .iter()
                .map(move |message| (file.path.as_path(), message))
        })
    }

    pub fn violation_count(&self) -> usize {
        self.files.iter().map(|file| file.messages.len()).sum()
    }

    pub fn fixable_count(&self) -> usize {
        self.messages()
            .filter(|(_, message)| message.fix.is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.violation_count() == 0
    }

    pub fn render(&self) -> String {
        self.files.iter().map(FileReport::render).collect()
    }
}

/// One rendered message line.
pub struct Line<'a> {
    path: &'a Path,
    message: &'a Message,
}

impl<'a> Line<'a> {
    pub fn new(path: &'a Path, message: &'a Message) -> Self {
        Self { path, message }
    }
}

impl fmt::Display for Line<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: [{}] {}",
            self.path.display(),
            self.message.span.start,
            self.message.rule,
            self.message.kind.body
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::{Linter, LinterSettings};

    use super::*;

    fn lint(source: &str) -> Vec<Message> {
        Linter::new(LinterSettings::default())
            .unwrap()
            .lint_source(source)
            .messages
    }

    #[test]
    fn test_messages_sorted_by_position_then_rule() {
        let messages = lint("-(void)f{\n}\n");
        let keys: Vec<_> = messages
            .iter()
            .map(|m| (m.span.start.line.get(), m.span.start.column.get(), m.rule))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
        assert!(!messages.is_empty());
    }

    #[test]
    fn test_render_format() {
        let report = Report::from_files([
            FileReport::new("b/Second.m", lint("if(x) {\n}\n")),
            FileReport::new("a/First.m", lint("#include \"Spring.h\"\n")),
        ]);

        let rendered = report.render();
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(
            lines,
            vec![
                "a/First.m:1:1: [import-vs-include] use `#import` for Objective-C header \"Spring.h\"",
                "b/Second.m:1:1: [control-keyword-spacing] expected a single space between `if` and `(`",
            ]
        );
        assert_eq!(report.violation_count(), 2);
        assert_eq!(report.fixable_count(), 1);
    }

    #[test]
    fn test_empty_report() {
        let report = Report::from_files(Vec::new());
        assert!(report.is_empty());
        assert_eq!(report.render(), "");
    }
}
