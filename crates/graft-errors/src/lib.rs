use std::fmt::Display;

pub use annotate_snippets::Renderer;
use annotate_snippets::{Level, Snippet};
pub use text_size::TextRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// A suggested rewrite is available.
    Hint,
    Warning,
    Error,
}

impl Severity {
    fn level(self) -> Level {
        match self {
            Severity::Hint => Level::Help,
            Severity::Warning => Level::Warning,
            Severity::Error => Level::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    severity: Severity,
    message: String,
    range: TextRange,
}

impl Diagnostic {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn error(message: impl Into<String>, range: TextRange) -> Self {
        Self { severity: Severity::Error, message: message.into(), range }
    }

    pub fn hint(message: impl Into<String>, range: TextRange) -> Self {
        Self { severity: Severity::Hint, message: message.into(), range }
    }

    pub fn render<'a>(
        &'a self,
        renderer: &'a Renderer,
        path: &'a str,
        text: &'a str,
    ) -> impl Display + 'a {
        let level = self.severity.level();
        let message = level.title(&self.message).snippet(
            Snippet::source(text)
                .origin(path)
                .annotation(level.span(self.range.into()).label("here"))
                .fold(true),
        );
        renderer.render(message)
    }
}

#[cfg(test)]
mod tests {
    use text_size::TextSize;

    use super::*;

    #[test]
    fn plain_render() {
        let text = "class C {\n    int x = ;\n}\n";
        let range = TextRange::at(TextSize::new(22), TextSize::new(1));
        let diagnostic = Diagnostic::error("expected an expression", range);

        let rendered = diagnostic.render(&Renderer::plain(), "C.cs", text).to_string();
        assert!(rendered.starts_with("error: expected an expression"), "{rendered}");
        assert!(rendered.contains("C.cs:2:13"), "{rendered}");
        assert!(rendered.contains("^ here"), "{rendered}");
    }

    #[test]
    fn severity_order() {
        let range = TextRange::empty(TextSize::new(0));
        let mut diagnostics =
            vec![Diagnostic::hint("b", range), Diagnostic::error("a", range)];
        diagnostics.sort_by_key(|diagnostic| std::cmp::Reverse(diagnostic.severity()));
        assert_eq!(diagnostics[0].message(), "a");
    }
}
