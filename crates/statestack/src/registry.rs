//! State prototypes and the per-engine registry.

use crate::state::{DefaultState, Frame, Sequence, State};
use std::collections::HashMap;

const DEFAULT: &str = "default";

/// The Rust type of follower activation predicates.
///
/// The predicate decides whether a fresh instance of the prototype's state
/// should be pushed as a child of `current`, given the next input chunk.
/// It is evaluated by the engine on the prototype, before any instance of
/// the state exists, and must be side-effect-free; the shared references
/// enforce this.
pub type CondFn<S, C, R> = fn(ctx: &S, chunk: &C, current: &Frame<R>) -> bool;

/// The Rust type of state constructors.
pub type BuildFn<S, C, R> = fn() -> Box<dyn State<S, C, R>>;

/// A named factory for parser states.
///
/// A prototype combines the state constructor with everything the engine
/// needs to know about the state before instantiating it: the identity it
/// registers under, the ordered follower list, the activation predicate,
/// and an optional documentation string.
///
/// ```
/// # use statestack::{DefaultState, Prototype};
/// let prototype: Prototype<(), char, String> =
///     Prototype::new("comment", || Box::new(DefaultState))
///         .with_followers(&["escape"])
///         .with_cond(|_, chunk, _| *chunk == '%')
///         .with_doc("A comment running to the end of the line.");
/// assert_eq!(prototype.identity(), "comment");
/// ```
pub struct Prototype<S, C, R: Sequence<C>> {
    identity: &'static str,
    followers: &'static [&'static str],
    cond: CondFn<S, C, R>,
    build: BuildFn<S, C, R>,
    doc: Option<&'static str>,
}

impl<S, C, R: Sequence<C>> Prototype<S, C, R> {
    /// Create a prototype with no followers, a never-true activation
    /// predicate, and no documentation.
    pub fn new(identity: &'static str, build: BuildFn<S, C, R>) -> Prototype<S, C, R> {
        Prototype {
            identity,
            followers: &[],
            cond: never,
            build,
            doc: None,
        }
    }

    /// Set the ordered list of follower state names.
    pub fn with_followers(mut self, followers: &'static [&'static str]) -> Prototype<S, C, R> {
        self.followers = followers;
        self
    }

    /// Set the activation predicate.
    pub fn with_cond(mut self, cond: CondFn<S, C, R>) -> Prototype<S, C, R> {
        self.cond = cond;
        self
    }

    /// Set the documentation string for this prototype.
    pub fn with_doc(mut self, doc: &'static str) -> Prototype<S, C, R> {
        self.doc = Some(doc);
        self
    }

    /// The name the prototype registers under.
    #[inline]
    pub fn identity(&self) -> &'static str {
        self.identity
    }

    /// The follower candidates evaluated, in order, while a frame of this
    /// prototype is current.
    #[inline]
    pub fn followers(&self) -> &'static [&'static str] {
        self.followers
    }

    /// The documentation string, if one was set.
    pub fn doc(&self) -> Option<&'static str> {
        self.doc
    }

    /// Evaluate the activation predicate.
    #[inline]
    pub fn matches(&self, ctx: &S, chunk: &C, current: &Frame<R>) -> bool {
        (self.cond)(ctx, chunk, current)
    }

    /// Construct a state instance and its frame for a push under
    /// `activation`.
    pub(crate) fn instantiate(&self, activation: &str) -> (Frame<R>, Box<dyn State<S, C, R>>) {
        (Frame::new(self.identity, activation), (self.build)())
    }
}

fn never<S, C, R>(_: &S, _: &C, _: &Frame<R>) -> bool {
    false
}

/// The set of prototypes known to one engine instance.
///
/// This is a map from identity to prototype with one special entry: the
/// built-in `default` prototype, a [DefaultState] with no followers.
/// The entry can be overwritten by registering a prototype under the
/// `default` identity, but it can never be removed, so lookups always have
/// something to fall back to.
/// The registry is owned by its engine; there is no process-wide table.
pub struct Registry<S, C, R: Sequence<C>> {
    states: HashMap<&'static str, Prototype<S, C, R>>,
}

impl<S, C, R: Sequence<C>> Registry<S, C, R> {
    /// Create a registry holding only the built-in `default` entry.
    pub fn new() -> Registry<S, C, R> {
        let mut states = HashMap::new();
        states.insert(DEFAULT, Prototype::new(DEFAULT, || Box::new(DefaultState)));
        Registry { states }
    }

    /// Add `prototype` under its declared identity.
    ///
    /// Re-registration under an existing name overwrites the previous entry;
    /// this is reported as a warning, never an error.
    pub fn register(&mut self, prototype: Prototype<S, C, R>) {
        let identity = prototype.identity();
        if self.states.insert(identity, prototype).is_some() {
            log::warn!("state '{identity}' is already defined; overwriting it");
        }
    }

    /// Get the prototype registered under `name`, or the `default` prototype
    /// if there is none.
    ///
    /// The lookup miss is reported as a warning so that malformed or
    /// forward-referencing grammar definitions stay diagnosable without
    /// crashing an in-progress parse.
    pub fn get(&self, name: &str) -> &Prototype<S, C, R> {
        if let Some(prototype) = self.states.get(name) {
            return prototype;
        }
        log::warn!("unknown state '{name}'; using the 'default' state");
        // The default entry is inserted at construction and nothing can
        // remove it.
        self.states.get(DEFAULT).unwrap()
    }

    /// Number of registered prototypes, the built-in `default` included.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always false: the `default` entry cannot be removed.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl<S, C, R: Sequence<C>> Default for Registry<S, C, R> {
    fn default() -> Registry<S, C, R> {
        Registry::new()
    }
}
