//! Trivia pieces attached to tokens and their classification.

use text_size::TextSize;

/// Kinds of trivia stored alongside tokens.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TriviaPieceKind {
    Whitespace,
    Newline,
    SingleLineComment,
    MultiLineComment,
    /// A preprocessor line such as `#if DEBUG` or `#region Fields`.
    Directive,
    /// Source excluded by an inactive conditional-compilation branch.
    DisabledText,
}

impl TriviaPieceKind {
    /// Whether removing or moving this piece could change what a reader sees
    /// beyond layout.
    pub fn significance(self) -> Significance {
        match self {
            Self::Whitespace | Self::Newline => Significance::Insignificant,
            Self::SingleLineComment
            | Self::MultiLineComment
            | Self::Directive
            | Self::DisabledText => Significance::Significant,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Significance {
    Insignificant,
    Significant,
}

/// Classifies a trivia kind; see [`TriviaPieceKind::significance`].
pub fn classify(kind: TriviaPieceKind) -> Significance {
    kind.significance()
}

/// A trivia fragment with its kind and length.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TriviaPiece {
    pub kind: TriviaPieceKind,
    pub len: TextSize,
}

impl TriviaPiece {
    /// Creates a new trivia piece with the given kind and length.
    pub fn new(kind: TriviaPieceKind, len: TextSize) -> Self {
        Self { kind, len }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_layout_is_insignificant() {
        use TriviaPieceKind::*;

        let insignificant = [Whitespace, Newline];
        let significant = [SingleLineComment, MultiLineComment, Directive, DisabledText];

        for kind in insignificant {
            assert_eq!(classify(kind), Significance::Insignificant, "{kind:?}");
        }
        for kind in significant {
            assert_eq!(classify(kind), Significance::Significant, "{kind:?}");
        }
    }
}
