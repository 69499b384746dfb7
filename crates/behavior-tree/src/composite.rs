//! Composite behavior nodes.
//!
//! Composite nodes control the execution flow of multiple child behaviors:
//! [`Sequence`] (AND logic) and [`Selector`] (OR logic). Both short-circuit,
//! so children after the deciding one are not ticked that frame.

use crate::{Behavior, Status};

/// Executes child behaviors in order until one does not succeed.
///
/// # Semantics
///
/// A `Sequence` node evaluates its children from left to right:
/// - If a child returns `Failure` or `Running`, the sequence **stops
///   immediately** and returns that status
/// - If a child returns `Success`, the sequence **continues** to the next child
/// - If all children return `Success` in the same tick, the sequence returns
///   `Success`
pub struct Sequence<N> {
    children: Vec<N>,
}

impl<N> Sequence<N> {
    /// Creates a new sequence with the given child behaviors.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty. A sequence with no children is
    /// meaningless and likely indicates a programming error.
    pub fn new(children: Vec<N>) -> Self {
        assert!(
            !children.is_empty(),
            "Sequence must have at least one child"
        );
        Self { children }
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Always `false`; construction rejects empty sequences.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<C, N: Behavior<C>> Behavior<C> for Sequence<N> {
    fn tick(&self, ctx: &mut C) -> Status {
        for child in &self.children {
            match child.tick(ctx) {
                Status::Success => continue,
                other => return other,
            }
        }
        Status::Success
    }
}

/// Executes child behaviors in order until one does not fail.
///
/// # Semantics
///
/// A `Selector` node evaluates its children from left to right:
/// - If a child returns `Success` or `Running`, the selector **stops
///   immediately** and returns that status
/// - If a child returns `Failure`, the selector **continues** to the next child
/// - If all children return `Failure`, the selector returns `Failure`
pub struct Selector<N> {
    children: Vec<N>,
}

impl<N> Selector<N> {
    /// Creates a new selector with the given child behaviors.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty. A selector with no children is
    /// meaningless and likely indicates a programming error.
    pub fn new(children: Vec<N>) -> Self {
        assert!(
            !children.is_empty(),
            "Selector must have at least one child"
        );
        Self { children }
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Always `false`; construction rejects empty selectors.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<C, N: Behavior<C>> Behavior<C> for Selector<N> {
    fn tick(&self, ctx: &mut C) -> Status {
        for child in &self.children {
            match child.tick(ctx) {
                Status::Failure => continue,
                other => return other,
            }
        }
        Status::Failure
    }
}
