use drop_bomb::DropBomb;
use graft_errors::Diagnostic;
use graft_syntax::{Builder, GreenNode, GreenToken, SyntaxKind};
use graft_tokenizer::Token;
use text_size::TextRange;

pub(crate) struct Parser<'a> {
    text: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    events: Vec<Event>,
    errors: Vec<Diagnostic>,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self {
            text,
            tokens: graft_tokenizer::tokenize(text),
            pos: 0,
            events: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub(crate) fn peek_kind(&self) -> SyntaxKind {
        self.nth(0)
    }

    pub(crate) fn nth(&self, n: usize) -> SyntaxKind {
        self.tokens.get(self.pos + n).map_or(SyntaxKind::EOF, |token| token.kind)
    }

    fn peek_range(&self) -> TextRange {
        match self.tokens.get(self.pos).or_else(|| self.tokens.last()) {
            Some(token) => token.kind_range,
            None => TextRange::empty(0.into()),
        }
    }

    pub(crate) fn advance(&mut self) {
        if let Some(token) = self.tokens.get(self.pos) {
            self.events.push(Event::Token(token.clone()));
            self.pos += 1;
        }
    }

    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.peek_kind() == kind
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes `kind`, or records a zero-width missing token in its place.
    pub(crate) fn expect(&mut self, kind: SyntaxKind) {
        if self.eat(kind) {
            return;
        }

        let message = match kind.static_text() {
            Some(text) => format!("expected `{text}`"),
            None if kind == SyntaxKind::NAME => "expected a name".to_owned(),
            None => format!("expected {kind:?}"),
        };
        let range = TextRange::empty(self.peek_range().start());
        self.errors.push(Diagnostic::error(message, range));
        self.events.push(Event::Missing(kind));
    }

    pub(crate) fn start(&mut self) -> Marker {
        let pos = self.events.len() as u32;
        self.events.push(Event::TOMBSTONE);
        Marker::new(pos)
    }

    pub(crate) fn error(&mut self, message: &str) {
        let range = self.peek_range();
        self.errors.push(Diagnostic::error(message, range));
    }

    /// Wraps the current token in an `ERROR` node.
    pub(crate) fn error_and_bump(&mut self, message: &str) {
        let m = self.start();
        self.error(message);
        self.advance();
        m.complete(self, SyntaxKind::ERROR);
    }

    /// End of the type starting `n` tokens ahead, without consuming anything.
    pub(crate) fn type_end(&self, mut n: usize) -> Option<usize> {
        use SyntaxKind::*;

        if self.nth(n) != NAME {
            return None;
        }
        n += 1;

        if self.nth(n) == LT {
            n += 1;
            loop {
                n = self.type_end(n)?;
                match self.nth(n) {
                    COMMA => n += 1,
                    GT => {
                        n += 1;
                        break;
                    }
                    _ => return None,
                }
            }
        }

        while self.nth(n) == L_BRACKET && self.nth(n + 1) == R_BRACKET {
            n += 2;
        }

        Some(n)
    }

    pub(crate) fn finish(self) -> (GreenNode, Vec<Diagnostic>) {
        let Parser { text, tokens: _, pos: _, mut events, errors } = self;
        let mut builder = Builder::new();
        let mut forward_parents = Vec::new();

        for i in 0..events.len() {
            match std::mem::replace(&mut events[i], Event::TOMBSTONE) {
                Event::Start { kind, forward_parent } => {
                    if kind == SyntaxKind::TOMBSTONE {
                        continue;
                    }

                    forward_parents.push(kind);
                    let mut idx = i;
                    let mut fp = forward_parent;
                    while let Some(fwd) = fp {
                        idx += fwd as usize;

                        fp = match std::mem::replace(&mut events[idx], Event::TOMBSTONE) {
                            Event::Start { kind, forward_parent } => {
                                if kind != SyntaxKind::TOMBSTONE {
                                    forward_parents.push(kind);
                                }
                                forward_parent
                            }
                            _ => unreachable!(),
                        };
                    }

                    for kind in forward_parents.drain(..).rev() {
                        builder.start_node(kind);
                    }
                }
                Event::Finish => {
                    builder.finish_node();
                }
                Event::Token(token) => {
                    builder.token(token.to_green(text));
                }
                Event::Missing(kind) => {
                    builder.token(GreenToken::missing(kind));
                }
            }
        }

        (builder.finish(), errors)
    }
}

enum Event {
    Start { kind: SyntaxKind, forward_parent: Option<u32> },
    Token(Token),
    Missing(SyntaxKind),
    Finish,
}

impl Event {
    const TOMBSTONE: Self = Event::Start { kind: SyntaxKind::TOMBSTONE, forward_parent: None };
}

pub(crate) struct Marker {
    position: u32,
    bomb: DropBomb,
}

impl Marker {
    fn new(pos: u32) -> Marker {
        Marker {
            position: pos,
            bomb: DropBomb::new("Marker must be either completed or abandoned"),
        }
    }

    pub(crate) fn complete(mut self, p: &mut Parser<'_>, kind: SyntaxKind) -> CompletedMarker {
        self.bomb.defuse();

        match &mut p.events[self.position as usize] {
            Event::Start { kind: slot, .. } => {
                *slot = kind;
            }
            _ => unreachable!(),
        }

        p.events.push(Event::Finish);
        CompletedMarker::new(self.position)
    }
}

pub(crate) struct CompletedMarker {
    pos: u32,
}

impl CompletedMarker {
    fn new(pos: u32) -> Self {
        CompletedMarker { pos }
    }

    pub(crate) fn precede(self, p: &mut Parser<'_>) -> Marker {
        let new_pos = p.start();

        match &mut p.events[self.pos as usize] {
            Event::Start { forward_parent, .. } => {
                *forward_parent = Some(new_pos.position - self.pos);
            }
            _ => unreachable!(),
        }

        new_pos
    }
}
