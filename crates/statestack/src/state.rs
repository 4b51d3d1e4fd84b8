//! The state abstraction: the contract every parser state satisfies.

use crate::stack::Ops;

/// An ordered, append-only container of parse output.
///
/// The engine fixes the result of every state to be a sequence of the
/// input's chunk type.
/// This trait is the capability set the engine needs from such a sequence:
/// start empty, append one chunk, append a finished child sequence, and
/// report the length.
/// Implementations are provided for [Vec] over any cloneable chunk type and
/// for [String] over [char] chunks.
pub trait Sequence<C>: Default {
    /// Append a single chunk at the end.
    fn append(&mut self, chunk: C);

    /// Append a copy of another sequence at the end.
    fn extend_from(&mut self, other: &Self);

    /// Return the number of elements in the sequence.
    fn len(&self) -> usize;

    /// Return whether the sequence is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<C: Clone> Sequence<C> for Vec<C> {
    #[inline]
    fn append(&mut self, chunk: C) {
        self.push(chunk);
    }
    #[inline]
    fn extend_from(&mut self, other: &Self) {
        self.extend_from_slice(other);
    }
    #[inline]
    fn len(&self) -> usize {
        <[C]>::len(self)
    }
}

impl Sequence<char> for String {
    #[inline]
    fn append(&mut self, chunk: char) {
        self.push(chunk);
    }
    #[inline]
    fn extend_from(&mut self, other: &Self) {
        self.push_str(other);
    }
    #[inline]
    fn len(&self) -> usize {
        str::len(self)
    }
}

/// One in-progress parse context on the stack.
///
/// A frame is exclusively owned by the stack slot that holds it; states
/// never hold references to their parents or siblings, and only the engine
/// mediates between them.
/// The engine hands the frame to the owning state's hooks by mutable
/// reference.
/// By convention the result is append-only while the frame is current;
/// the owning state's hooks may rewrite it freely.
pub struct Frame<R> {
    identity: &'static str,
    activation: String,

    /// Scratch field in which a state accumulates the key of the construct
    /// it is parsing, such as a command name or an opening bracket.
    /// A folding parent may branch on the finished child's key.
    pub key: String,

    /// The output accumulated so far.
    pub result: R,

    /// Set to true by the owning state to signal completion; the engine
    /// then finalizes and pops the frame.
    pub done: bool,
}

impl<R: Default> Frame<R> {
    /// Create a frame for a state registered under `identity` and pushed
    /// under `activation`.
    pub fn new<T: Into<String>>(identity: &'static str, activation: T) -> Frame<R> {
        Frame {
            identity,
            activation: activation.into(),
            key: String::new(),
            result: Default::default(),
            done: false,
        }
    }
}

impl<R> Frame<R> {
    /// The name under which the frame's prototype was registered.
    #[inline]
    pub fn identity(&self) -> &'static str {
        self.identity
    }

    /// The name the frame was pushed under.
    ///
    /// This differs from [identity](Frame::identity) when an unknown name
    /// fell back to the `default` prototype; the requested name is kept so
    /// the fallback stays diagnosable downstream.
    #[inline]
    pub fn activation(&self) -> &str {
        &self.activation
    }
}

/// Implementations of this trait are parser states.
///
/// All three hooks have working defaults, so for a state with no behavior of
/// its own the trait can be implemented trivially; [DefaultState] is exactly
/// that.
/// The activation predicate that decides when a state is auto-pushed lives
/// on the state's [Prototype](crate::Prototype), not here: it is evaluated
/// by the engine before any instance of the state exists.
///
/// The type parameters are the engine's: `S` is the caller-supplied context
/// (passed by shared reference to every hook), `C` the chunk type, and `R`
/// the result container.
pub trait State<S, C, R: Sequence<C>> {
    /// Decide whether `chunk` should be stored in the frame's result.
    ///
    /// The default accepts every chunk.
    /// Implementations may update `frame.key` and may set `frame.done` to
    /// signal that this chunk completes the construct.
    /// Returning false means the chunk was observed but not stored.
    fn consume(&mut self, ctx: &S, chunk: &C, frame: &mut Frame<R>) -> bool {
        _ = (ctx, chunk, frame);
        true
    }

    /// Merge a finished child frame into this one.
    ///
    /// Invoked by the engine after the child has been finalized and removed
    /// from the stack.
    /// The default appends the child's result.
    /// Implementations may additionally branch on the child's key and
    /// request stack operations through `ops`; the engine applies the
    /// requests, in order, as soon as this hook returns.
    fn fold(&mut self, ctx: &S, child: &Frame<R>, frame: &mut Frame<R>, ops: &mut Ops) {
        _ = (ctx, ops);
        frame.result.extend_from(&child.result);
    }

    /// Post-process the frame's result before it leaves the stack.
    ///
    /// Invoked exactly once, after the last [consume](State::consume) and
    /// before the parent's [fold](State::fold).
    /// The default does nothing.
    fn finalize(&mut self, frame: &mut Frame<R>) {
        _ = frame;
    }
}

/// The state behind the built-in `default` registry entry.
///
/// It stores every chunk, appends every child, and never completes on its
/// own.
pub struct DefaultState;

impl<S, C, R: Sequence<C>> State<S, C, R> for DefaultState {}
