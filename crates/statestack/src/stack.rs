//! The engine: a registry of named prototypes and a live stack of frames.

use crate::error::StackEmptyError;
use crate::registry::{Prototype, Registry};
use crate::state::{Frame, Sequence, State};

/// Stack operations requested from within a [State::fold] hook.
///
/// A folding state may need to change the stack itself, typically to pop
/// its own frame and push a replacement context once it knows what a
/// finished child was.
/// It cannot mutate the stack directly while the engine holds its frame
/// borrowed, so requests are recorded here and applied by the engine, in
/// order, as soon as the hook returns.
/// At that point the folded child is already detached, so the requests only
/// ever observe a consistent stack.
#[derive(Default)]
pub struct Ops {
    requests: Vec<Op>,
}

enum Op {
    Push { name: String, key: String },
    Pop,
}

impl Ops {
    /// Request a push of the state registered under `name`.
    pub fn push<N: Into<String>>(&mut self, name: N) {
        self.push_keyed(name, String::new());
    }

    /// Request a push with the new frame's key seeded to `key`.
    ///
    /// This is how a folding state hands a finished child's key over to the
    /// context that replaces it (for example, the braced name of an
    /// environment).
    pub fn push_keyed<N: Into<String>, K: Into<String>>(&mut self, name: N, key: K) {
        self.requests.push(Op::Push {
            name: name.into(),
            key: key.into(),
        });
    }

    /// Request a pop of the current frame: the requesting state's own
    /// frame, unless an earlier request pushed on top of it.
    pub fn pop(&mut self) {
        self.requests.push(Op::Pop);
    }
}

struct Entry<S, C, R: Sequence<C>> {
    followers: &'static [&'static str],
    frame: Frame<R>,
    state: Box<dyn State<S, C, R>>,
}

/// The state stack engine.
///
/// The engine owns a [Registry] of named prototypes and a stack of live
/// frames, bottom = root context, top = the current context.
/// It is driven one chunk at a time through [advance](StateStack::advance).
///
/// The context value `S` is opaque to the engine and passed by shared
/// reference to every activation predicate and state hook; this is how
/// concrete states reach collaborators such as a configuration store
/// without the engine depending on them.
///
/// ```
/// # use statestack::StateStack;
/// // With no prototypes registered, every push falls back to the built-in
/// // default state, which stores everything it sees.
/// let mut stack: StateStack<(), char, String> = StateStack::new(());
/// stack.push("root");
/// for c in "abc".chars() {
///     stack.advance(c).unwrap();
/// }
/// assert_eq!(stack.len(), 1);
/// assert_eq!(stack.current().unwrap().result, "abc");
/// ```
pub struct StateStack<S, C, R: Sequence<C>> {
    ctx: S,
    states: Registry<S, C, R>,
    stack: Vec<Entry<S, C, R>>,
}

impl<S, C, R: Sequence<C>> StateStack<S, C, R> {
    /// Create an engine over the provided context, with an empty stack and
    /// a fresh registry.
    pub fn new(ctx: S) -> StateStack<S, C, R> {
        StateStack {
            ctx,
            states: Registry::new(),
            stack: Vec::new(),
        }
    }

    /// Register a state prototype. See [Registry::register].
    pub fn register(&mut self, prototype: Prototype<S, C, R>) {
        self.states.register(prototype);
    }

    /// Push the state registered under `name`.
    ///
    /// An unknown name falls back to the `default` prototype; the requested
    /// name is still recorded as the new frame's activation name, so the
    /// caller's error-recovery logic can see what the state was meant to be.
    pub fn push(&mut self, name: &str) {
        self.push_seeded(name, String::new());
    }

    fn push_seeded(&mut self, name: &str, key: String) {
        let prototype = self.states.get(name);
        let (mut frame, state) = prototype.instantiate(name);
        let followers = prototype.followers();
        frame.key = key;
        log::debug!("pushing state '{name}'");
        self.stack.push(Entry {
            followers,
            frame,
            state,
        });
    }

    /// Deliver one chunk to the engine.
    ///
    /// The per-chunk protocol is:
    ///
    /// 1. Evaluate the current frame's follower list in declared order and
    ///    push the first follower whose activation predicate matches the
    ///    chunk. There is at most one auto-push per call.
    /// 2. Deliver the chunk to the (possibly just-pushed) current state; if
    ///    its [consume](State::consume) accepts, append the chunk to that
    ///    frame's result.
    /// 3. If the current frame is now done, pop it.
    ///
    /// Note that after a push in step 1 the chunk that triggered the
    /// activation is handled by the child, not the parent.
    ///
    /// Driving an empty engine fails with [StackEmptyError] without mutating
    /// anything: the root context must be pushed first.
    pub fn advance(&mut self, chunk: C) -> Result<(), StackEmptyError> {
        let followers = match self.stack.last() {
            None => {
                log::error!("cannot advance: the state stack is empty");
                return Err(StackEmptyError);
            }
            Some(entry) => entry.followers,
        };
        for name in followers {
            let prototype = self.states.get(name);
            let current = &self.stack.last().unwrap().frame;
            if prototype.matches(&self.ctx, &chunk, current) {
                self.push(name);
                break;
            }
        }
        // The stack is non-empty: it was checked above and can only have
        // grown since.
        let entry = self.stack.last_mut().unwrap();
        if entry.state.consume(&self.ctx, &chunk, &mut entry.frame) {
            entry.frame.result.append(chunk);
        }
        if entry.frame.done {
            self.pop();
        }
        Ok(())
    }

    /// Pop the current frame and return its result.
    ///
    /// The removed frame is finalized, then folded into the frame beneath it
    /// (if any), and any stack operations the fold requested are applied
    /// before this method returns.
    ///
    /// Popping an empty stack returns [None] and logs a warning rather than
    /// failing; this tolerates trailing pops at end-of-stream.
    pub fn pop(&mut self) -> Option<R> {
        let mut entry = match self.stack.pop() {
            None => {
                log::warn!("nothing to pop: the state stack is empty");
                return None;
            }
            Some(entry) => entry,
        };
        entry.state.finalize(&mut entry.frame);
        log::debug!("state '{}' has finished", entry.frame.activation());
        let mut ops = Ops::default();
        if let Some(parent) = self.stack.last_mut() {
            parent
                .state
                .fold(&self.ctx, &entry.frame, &mut parent.frame, &mut ops);
        }
        self.apply(ops);
        Some(entry.frame.result)
    }

    fn apply(&mut self, ops: Ops) {
        for op in ops.requests {
            match op {
                Op::Push { name, key } => self.push_seeded(&name, key),
                Op::Pop => {
                    self.pop();
                }
            }
        }
    }

    /// The current (top) frame, or [None] if the stack is empty.
    pub fn current(&self) -> Option<&Frame<R>> {
        self.stack.last().map(|entry| &entry.frame)
    }

    /// Number of frames on the stack.
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Return whether the stack has no frames.
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Shared reference to the engine's context.
    pub fn ctx(&self) -> &S {
        &self.ctx
    }

    /// Mutable reference to the engine's context.
    pub fn ctx_mut(&mut self) -> &mut S {
        &mut self.ctx
    }
}
