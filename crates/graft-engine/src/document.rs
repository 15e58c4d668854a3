use graft_resolve::SemanticResolver;
use graft_syntax::SyntaxTree;
use parking_lot::{RwLock, RwLockUpgradableReadGuard};

use crate::{BuilderId, Engine, EngineError, Match};

/// The current version of one source file.
///
/// Readers take a cheap clone of the current tree and keep it for as long as
/// they like. Rewrites are serialized; each accepted one swaps the tree in a
/// single assignment.
#[derive(Debug)]
pub struct Document {
    tree: RwLock<SyntaxTree>,
}

impl Document {
    pub fn new(tree: SyntaxTree) -> Self {
        Self { tree: RwLock::new(tree) }
    }

    pub fn tree(&self) -> SyntaxTree {
        self.tree.read().clone()
    }

    /// Applies `m` to the current tree and makes the result current.
    ///
    /// Fails with [`EngineError::StaleMatch`] if `m` was computed on any
    /// other version, including one this document held earlier.
    pub fn apply(
        &self,
        engine: &Engine,
        m: &Match,
        builder: BuilderId,
        resolver: &dyn SemanticResolver,
    ) -> Result<SyntaxTree, EngineError> {
        let current = self.tree.upgradable_read();
        let rewritten = engine.apply_rewrite(&current, m, builder, resolver)?;
        let mut current = RwLockUpgradableReadGuard::upgrade(current);
        *current = rewritten.clone();
        Ok(rewritten)
    }
}
