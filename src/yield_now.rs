//! Cooperative yield point.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Future that returns control to the executor once, then completes.
#[derive(Debug)]
pub struct YieldNow {
    yielded: bool,
}

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if self.yielded {
            Poll::Ready(())
        } else {
            self.yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

/// Yields execution back to the executor, allowing other tasks to run.
#[must_use]
pub const fn yield_now() -> YieldNow {
    YieldNow { yielded: false }
}
