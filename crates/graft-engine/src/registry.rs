use std::sync::Arc;

use graft_syntax::SyntaxKind;
use rustc_hash::FxHashMap;

use crate::{BuilderId, Pattern, PatternId, RewriteBuilder};

/// Patterns and the rewrites they offer, built once at startup and passed to
/// the engine explicitly.
#[derive(Default, Clone)]
pub struct Registry {
    patterns: Vec<Arc<dyn Pattern>>,
    by_id: FxHashMap<PatternId, usize>,
    by_kind: FxHashMap<SyntaxKind, Vec<usize>>,
    builders: FxHashMap<PatternId, Vec<Arc<dyn RewriteBuilder>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if a pattern with the same id is already registered.
    pub fn register_pattern(&mut self, pattern: Arc<dyn Pattern>) -> bool {
        let id = pattern.id();
        if self.by_id.contains_key(&id) {
            return false;
        }
        let index = self.patterns.len();
        for kind in pattern.kinds().iter() {
            self.by_kind.entry(kind).or_default().push(index);
        }
        self.by_id.insert(id, index);
        self.patterns.push(pattern);
        true
    }

    /// Returns `false` if the pattern already offers a builder with this id.
    pub fn register_builder(&mut self, builder: Arc<dyn RewriteBuilder>) -> bool {
        let builders = self.builders.entry(builder.pattern()).or_default();
        if builders.iter().any(|existing| existing.id() == builder.id()) {
            return false;
        }
        builders.push(builder);
        true
    }

    pub fn patterns(&self) -> impl Iterator<Item = &dyn Pattern> {
        self.patterns.iter().map(|pattern| &**pattern)
    }

    pub fn pattern(&self, id: PatternId) -> Option<&dyn Pattern> {
        self.by_id.get(&id).map(|&index| &*self.patterns[index])
    }

    /// Patterns interested in `kind`, in registration order.
    pub fn patterns_for(&self, kind: SyntaxKind) -> impl Iterator<Item = &dyn Pattern> {
        self.by_kind
            .get(&kind)
            .into_iter()
            .flatten()
            .map(|&index| &*self.patterns[index])
    }

    pub fn is_interesting(&self, kind: SyntaxKind) -> bool {
        self.by_kind.contains_key(&kind)
    }

    /// Rewrites offered for `pattern`, in registration order.
    pub fn builders_for(&self, pattern: PatternId) -> &[Arc<dyn RewriteBuilder>] {
        self.builders.get(&pattern).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn builder(&self, pattern: PatternId, id: BuilderId) -> Option<&dyn RewriteBuilder> {
        self.builders_for(pattern).iter().find(|builder| builder.id() == id).map(|b| &**b)
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("patterns", &self.patterns.iter().map(|p| p.id()).collect::<Vec<_>>())
            .field("builders", &self.builders.values().map(Vec::len).sum::<usize>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use graft_syntax::SyntaxKind::*;
    use graft_syntax::{SyntaxNode, SyntaxSet};

    use super::*;
    use crate::{Context, Match, Rewrite};

    struct Literals;

    impl Pattern for Literals {
        fn id(&self) -> PatternId {
            PatternId("literals")
        }

        fn kinds(&self) -> SyntaxSet {
            SyntaxSet::new([LITERAL, NAME_REF])
        }

        fn find(&self, _: &SyntaxNode, _: &Context<'_>) -> Option<Match> {
            None
        }
    }

    struct Noop(&'static str);

    impl RewriteBuilder for Noop {
        fn id(&self) -> BuilderId {
            BuilderId(self.0)
        }

        fn pattern(&self) -> PatternId {
            PatternId("literals")
        }

        fn title(&self, _: &Match) -> String {
            self.0.to_owned()
        }

        fn build(&self, _: &Match, _: &Context<'_>) -> Option<Rewrite> {
            None
        }
    }

    #[test]
    fn registration_is_idempotent() {
        let mut registry = Registry::new();
        assert!(registry.register_pattern(Arc::new(Literals)));
        assert!(!registry.register_pattern(Arc::new(Literals)));

        assert_eq!(registry.patterns().count(), 1);
        assert_eq!(registry.patterns_for(LITERAL).count(), 1);
        assert_eq!(registry.patterns_for(NAME_REF).count(), 1);
        assert_eq!(registry.patterns_for(BINARY_EXPR).count(), 0);
        assert!(!registry.is_interesting(BINARY_EXPR));
    }

    #[test]
    fn builders_keep_registration_order() {
        let mut registry = Registry::new();
        registry.register_pattern(Arc::new(Literals));
        assert!(registry.register_builder(Arc::new(Noop("second"))));
        assert!(registry.register_builder(Arc::new(Noop("first"))));
        assert!(!registry.register_builder(Arc::new(Noop("second"))));

        let ids: Vec<_> =
            registry.builders_for(PatternId("literals")).iter().map(|b| b.id().0).collect();
        assert_eq!(ids, ["second", "first"]);
        assert!(registry.builder(PatternId("literals"), BuilderId("first")).is_some());
        assert!(registry.builder(PatternId("other"), BuilderId("first")).is_none());
    }
}
