//! Core behavior trait.
//!
//! This module defines the [`Behavior`] trait, which is the fundamental
//! abstraction for all behavior tree nodes. The trait is generic over a
//! context type `C`, allowing nodes to read world state and drive the actor
//! they are attached to.

use crate::Status;

/// A behavior tree node that can be evaluated against a context.
pub trait Behavior<C>: Send + Sync {
    /// Evaluate this behavior node against the given context.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Mutable reference to the context/blackboard. Nodes read
    ///   world state through it and mutate the ticking actor.
    ///
    /// # Returns
    ///
    /// - `Status::Success` if the behavior succeeded or had nothing to do
    /// - `Status::Failure` if the behavior failed
    /// - `Status::Running` if the behavior acted and its branch must wait
    fn tick(&self, ctx: &mut C) -> Status;
}

/// Blanket implementation for boxed behaviors.
///
/// Covers `Box<dyn Behavior<C>>` as well as higher-ranked trait objects such
/// as `Box<dyn for<'a> Behavior<Ctx<'a>>>`, so composites can hold either.
impl<C, B> Behavior<C> for Box<B>
where
    B: Behavior<C> + ?Sized,
{
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        (**self).tick(ctx)
    }
}
