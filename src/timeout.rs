//! Bounds the time spent waiting on the host.
use std::future::Future;
use std::time::Duration;

use failure::Fail;
use futures::future::{select, Either};
use futures::pin_mut;

/// Creates futures that resolve after a given duration.
pub trait Timer {
    type Delay: Future<Output = ()>;

    fn delay(&self, duration: Duration) -> Self::Delay;
}

/// Returned by [with_timeout] when the host did not respond in time.
#[derive(Clone, Copy, PartialEq, Debug, Fail)]
#[fail(display = "no response within {:?}", _0)]
pub struct TimedOut(pub Duration);

/// Awaits the `future`, giving up after `timeout` if one is given.
///
/// Without a `timeout` this simply awaits the `future`, which may never resolve.
pub async fn with_timeout<F, T>(
    future: F,
    timer: &T,
    timeout: Option<Duration>,
) -> Result<F::Output, TimedOut>
where
    F: Future,
    T: Timer + ?Sized,
{
    let duration = match timeout {
        Some(duration) => duration,
        None => return Ok(future.await),
    };

    let delay = timer.delay(duration);

    pin_mut!(future);
    pin_mut!(delay);

    match select(future, delay).await {
        Either::Left((output, _)) => Ok(output),
        Either::Right(((), _)) => Err(TimedOut(duration)),
    }
}
