//! Matching passes over a whole tree.

use std::cmp::Reverse;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use graft_resolve::SemanticResolver;
use graft_syntax::{Preorder, SyntaxNode, SyntaxTree, TextSize, WalkEvent};
use rayon::prelude::*;

use crate::safety::{contains_missing, is_safe};
use crate::{Context, Engine, Match};

/// A cooperative cancellation signal, checked once per visited node.
#[derive(Debug, Clone, Default)]
pub struct Cancellation(Arc<AtomicBool>);

impl Cancellation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Result of [`Engine::run_pass`].
#[derive(Debug, Clone)]
pub struct PassOutcome {
    /// Ordered by start offset, innermost first on ties.
    pub matches: Vec<Match>,
    /// `false` if the pass was cancelled before visiting every node.
    pub completed: bool,
}

struct Found {
    start: TextSize,
    depth: usize,
    node: usize,
    pattern: usize,
    m: Match,
}

impl Engine {
    /// Runs every registered pattern over `tree`.
    ///
    /// Large trees are matched on the rayon pool when the config allows it;
    /// the result is the same either way.
    pub fn run_pass(
        &self,
        tree: &SyntaxTree,
        resolver: &dyn SemanticResolver,
        cancel: &Cancellation,
    ) -> PassOutcome {
        let root = tree.root();
        let cx = Context { resolver, config: &self.config };
        let (candidates, interrupted) = self.candidates(&root, cancel);

        let skipped = AtomicBool::new(interrupted);
        let visit = |(index, node): (usize, &SyntaxNode)| -> Vec<Found> {
            if cancel.is_cancelled() {
                skipped.store(true, Ordering::Relaxed);
                return Vec::new();
            }
            let (start, depth) = (node.trimmed_range().start(), node.depth());
            self.visit(&root, node, &cx)
                .map(|(pattern, m)| Found { start, depth, node: index, pattern, m })
                .collect()
        };

        let parallel =
            self.config.parallel && candidates.len() >= self.config.parallel_threshold;
        let mut found: Vec<Found> = if parallel {
            candidates.par_iter().enumerate().flat_map_iter(visit).collect()
        } else {
            candidates.iter().enumerate().flat_map(visit).collect()
        };
        found.sort_by_key(|f| (f.start, Reverse(f.depth), f.node, f.pattern));

        let completed = !skipped.load(Ordering::Relaxed);
        tracing::debug!(
            nodes = candidates.len(),
            matches = found.len(),
            parallel,
            completed,
            "match pass finished"
        );
        PassOutcome { matches: found.into_iter().map(|f| f.m).collect(), completed }
    }

    /// Nodes some pattern is registered for, and whether cancellation cut the
    /// walk short.
    pub(crate) fn candidates(
        &self,
        root: &SyntaxNode,
        cancel: &Cancellation,
    ) -> (Vec<SyntaxNode>, bool) {
        let mut interrupted = false;
        let candidates = root
            .descendants()
            .take_while(|_| {
                interrupted = cancel.is_cancelled();
                !interrupted
            })
            .filter(|node| self.registry.is_interesting(node.kind()))
            .collect();
        (candidates, interrupted)
    }

    /// Lazy, sequential version of [`Engine::run_pass`] with the same gating
    /// and ordering.
    pub fn matches<'a>(
        &'a self,
        tree: &SyntaxTree,
        resolver: &'a dyn SemanticResolver,
        cancel: &Cancellation,
    ) -> Matches<'a> {
        let root = tree.root();
        Matches {
            engine: self,
            resolver,
            cancel: cancel.clone(),
            walk: root.preorder(),
            root,
            pending: Vec::new(),
            pending_start: None,
            ready: VecDeque::new(),
            state: State::Walking,
        }
    }

    /// Matches of every pattern interested in `node` that pass both gates,
    /// tagged with the pattern's registration rank.
    fn visit<'s>(
        &'s self,
        root: &'s SyntaxNode,
        node: &'s SyntaxNode,
        cx: &'s Context<'_>,
    ) -> impl Iterator<Item = (usize, Match)> + 's {
        self.registry
            .patterns_for(node.kind())
            .enumerate()
            .filter_map(move |(rank, pattern)| Some((rank, pattern.find(node, cx)?)))
            .filter(move |(_, m)| admit(root, m))
    }
}

fn admit(root: &SyntaxNode, m: &Match) -> bool {
    let span = m.safety_span();
    if m.anchor().is_missing() || contains_missing(root, span) {
        tracing::trace!(pattern = %m.pattern(), ?span, "match rejected: missing syntax");
        return false;
    }
    if !is_safe(root, span) {
        tracing::trace!(pattern = %m.pattern(), ?span, "match rejected: significant trivia");
        return false;
    }
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Walking,
    Finished,
    Cancelled,
}

/// Iterator returned by [`Engine::matches`].
///
/// Matches sharing a start offset are buffered until the walk moves past that
/// offset, so they can be yielded innermost first.
pub struct Matches<'a> {
    engine: &'a Engine,
    resolver: &'a dyn SemanticResolver,
    cancel: Cancellation,
    root: SyntaxNode,
    walk: Preorder,
    pending: Vec<(usize, Match)>,
    pending_start: Option<TextSize>,
    ready: VecDeque<Match>,
    state: State,
}

impl Matches<'_> {
    /// Whether the walk ran to the end without being cancelled. `false`
    /// while the iterator is still running.
    pub fn completed(&self) -> bool {
        self.state == State::Finished
    }

    fn flush(&mut self) {
        self.pending.sort_by_key(|&(depth, _)| Reverse(depth));
        self.ready.extend(self.pending.drain(..).map(|(_, m)| m));
    }

    fn advance(&mut self) {
        let engine = self.engine;
        let cx = Context { resolver: self.resolver, config: &engine.config };
        while self.ready.is_empty() {
            if self.cancel.is_cancelled() {
                self.flush();
                self.state = State::Cancelled;
                tracing::debug!("lazy match pass cancelled");
                return;
            }
            let Some(event) = self.walk.next() else {
                self.flush();
                self.state = State::Finished;
                return;
            };
            let WalkEvent::Enter(node) = event else { continue };
            if !engine.registry.is_interesting(node.kind()) {
                continue;
            }

            let start = node.trimmed_range().start();
            if self.pending_start.is_some_and(|pending| pending != start) {
                self.flush();
            }
            self.pending_start = Some(start);
            let depth = node.depth();
            let found: Vec<Match> =
                engine.visit(&self.root, &node, &cx).map(|(_, m)| m).collect();
            self.pending.extend(found.into_iter().map(|m| (depth, m)));
        }
    }
}

impl Iterator for Matches<'_> {
    type Item = Match;

    fn next(&mut self) -> Option<Match> {
        if self.ready.is_empty() && self.state == State::Walking {
            self.advance();
        }
        self.ready.pop_front()
    }
}
