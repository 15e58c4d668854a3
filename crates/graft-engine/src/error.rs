use text_size::TextRange;

use crate::{BuilderId, PatternId};

/// Contract violations at the engine's public boundary.
///
/// Unresolvable semantics and unsafe regions found while matching are not
/// errors; they only become one when a caller insists on rewriting anyway.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("match was computed on a different tree")]
    StaleMatch,
    #[error("pattern `{pattern}` offers no rewrite `{builder}`")]
    UnknownBuilder { pattern: PatternId, builder: BuilderId },
    #[error("rewrite `{builder}` declined the match")]
    BuilderDeclined { builder: BuilderId },
    #[error("region {range:?} contains comments or directives")]
    UnsafeRegion { range: TextRange },
    #[error("region {range:?} contains missing syntax")]
    MissingSyntax { range: TextRange },
    #[error("edits overlap at {range:?}")]
    OverlappingEdits { range: TextRange },
    #[error("edit target is not part of the tree being rewritten")]
    InvalidTarget,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid engine configuration: {0}")]
    Toml(#[from] toml::de::Error),
}
