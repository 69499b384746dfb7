//! Decorator behavior nodes.
//!
//! Decorators wrap a single child behavior and modify its result.

use crate::{Behavior, Status};

/// Inverts the result of its child behavior.
///
/// # Semantics
///
/// - If the child returns `Success`, the inverter returns `Failure`
/// - If the child returns `Failure`, the inverter returns `Success`
/// - If the child returns `Running`, the inverter returns `Running`
pub struct Inverter<N> {
    child: N,
}

impl<N> Inverter<N> {
    /// Creates a new inverter that wraps the given child behavior.
    pub fn new(child: N) -> Self {
        Self { child }
    }
}

impl<C, N: Behavior<C>> Behavior<C> for Inverter<N> {
    fn tick(&self, ctx: &mut C) -> Status {
        self.child.tick(ctx).invert()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestContext {
        value: i32,
    }

    /// Succeeds on positive values, runs on zero, fails otherwise.
    struct Sign;
    impl Behavior<TestContext> for Sign {
        fn tick(&self, ctx: &mut TestContext) -> Status {
            match ctx.value {
                v if v > 0 => Status::Success,
                0 => Status::Running,
                _ => Status::Failure,
            }
        }
    }

    #[test]
    fn inverter_inverts_success() {
        let inverter = Inverter::new(Sign);

        let mut ctx = TestContext { value: 10 };
        assert_eq!(inverter.tick(&mut ctx), Status::Failure);
    }

    #[test]
    fn inverter_inverts_failure() {
        let inverter = Inverter::new(Box::new(Sign) as Box<dyn Behavior<TestContext>>);

        let mut ctx = TestContext { value: -10 };
        assert_eq!(inverter.tick(&mut ctx), Status::Success);
    }

    #[test]
    fn inverter_passes_running_through() {
        let inverter = Inverter::new(Sign);

        let mut ctx = TestContext { value: 0 };
        assert_eq!(inverter.tick(&mut ctx), Status::Running);
    }
}
