//! Structural pattern matching and trivia-preserving rewrites over
//! [`SyntaxTree`]s.
//!
//! An [`Engine`] owns a [`Registry`] of patterns and builders plus an
//! [`EngineConfig`]. A pass walks a tree, hands every node to the patterns
//! registered for its kind and keeps the matches whose region is free of
//! comments, directives and missing tokens. Applying a match produces a new
//! tree; the old one, and every match computed on it, stays untouched.

mod config;
mod document;
mod error;
mod pass;
mod pattern;
mod registry;
mod rewrite;
pub mod safety;
pub mod unwrap;

use graft_errors::Diagnostic;
use graft_resolve::SemanticResolver;
use graft_syntax::SyntaxTree;

pub use config::EngineConfig;
pub use document::Document;
pub use error::{ConfigError, EngineError};
pub use pass::{Cancellation, Matches, PassOutcome};
pub use pattern::{Capture, Context, HIGHLIGHT, Match, Pattern, PatternId};
pub use registry::Registry;
pub use rewrite::{BuilderId, Edit, Rewrite, RewriteBuilder, TriviaMode, apply_edits};
pub use safety::is_safe;

#[derive(Debug, Clone, Default)]
pub struct Engine {
    registry: Registry,
    config: EngineConfig,
}

impl Engine {
    pub fn new(registry: Registry, config: EngineConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Rewrites `tree` with the builder `builder` offered for `m`'s pattern.
    ///
    /// The gates the pass applied are checked again, since `m` may come from
    /// anywhere.
    pub fn apply_rewrite(
        &self,
        tree: &SyntaxTree,
        m: &Match,
        builder: BuilderId,
        resolver: &dyn SemanticResolver,
    ) -> Result<SyntaxTree, EngineError> {
        if !m.is_from(tree) {
            return Err(EngineError::StaleMatch);
        }
        let Some(rewriter) = self.registry.builder(m.pattern(), builder) else {
            return Err(EngineError::UnknownBuilder { pattern: m.pattern(), builder });
        };

        let root = tree.root();
        let range = m.safety_span();
        if m.anchor().is_missing() || safety::contains_missing(&root, range) {
            return Err(EngineError::MissingSyntax { range });
        }
        if !is_safe(&root, range) {
            return Err(EngineError::UnsafeRegion { range });
        }

        let cx = Context { resolver, config: &self.config };
        let rewrite = rewriter.build(m, &cx).ok_or(EngineError::BuilderDeclined { builder })?;
        let rewritten = apply_edits(tree, &rewrite)?;
        tracing::debug!(
            pattern = %m.pattern(),
            %builder,
            edits = rewrite.edits().len(),
            "applied rewrite"
        );
        Ok(rewritten)
    }

    /// A hint for `m`, titled by the first rewrite its pattern offers.
    ///
    /// The hint covers the [`HIGHLIGHT`] capture when the pattern bound one,
    /// and the anchor otherwise.
    pub fn diagnostic(&self, m: &Match) -> Diagnostic {
        let message = match self.registry.builders_for(m.pattern()).first() {
            Some(builder) => builder.title(m),
            None => m.pattern().to_string(),
        };
        let range = m.span(HIGHLIGHT).unwrap_or_else(|| m.anchor().trimmed_range());
        Diagnostic::hint(message, range)
    }
}

#[cfg(test)]
mod tests;
