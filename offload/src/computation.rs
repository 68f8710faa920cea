/// A CPU-bound computation keyed by a single numeric input.
///
/// Implementations must be safe to move onto a worker thread, since the same
/// instance serves both the offloaded and the inline code paths.
pub trait Computation: Send + Sync + 'static {
    fn compute(&self, n: u32) -> u64;
}

/// Naive doubly-recursive Fibonacci. Deliberately exponential so that moderate
/// inputs (35 and up) keep a core busy for a noticeable amount of time.
#[derive(Debug, Default, Clone, Copy)]
pub struct Fibonacci;

impl Computation for Fibonacci {
    fn compute(&self, n: u32) -> u64 {
        fibonacci(n)
    }
}

fn fibonacci(n: u32) -> u64 {
    if n < 2 {
        return n as u64;
    }
    fibonacci(n - 1) + fibonacci(n - 2)
}
