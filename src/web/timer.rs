use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::channel::oneshot;
use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

use crate::timeout::Timer;
use crate::web::describe;

/// Schedules delays with the window's `setTimeout`.
pub struct WindowTimer {
    window: Window,
}

impl WindowTimer {
    pub fn new(window: Window) -> Self {
        WindowTimer { window }
    }
}

impl Timer for WindowTimer {
    type Delay = Delay;

    fn delay(&self, duration: Duration) -> Delay {
        let (sender, receiver) = oneshot::channel();
        let mut sender = Some(sender);

        let closure = Closure::wrap(Box::new(move || {
            if let Some(sender) = sender.take() {
                // The receiver is gone if the delay was dropped before the callback ran.
                let _ = sender.send(());
            }
        }) as Box<dyn FnMut()>);

        let timeout = duration.as_millis().min(i32::max_value() as u128) as i32;

        let handle = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                timeout,
            );

        let handle = match handle {
            Ok(handle) => Some(handle),
            Err(err) => {
                warn!("could not schedule a timeout: {}", describe(&err));

                None
            }
        };

        Delay {
            window: self.window.clone(),
            handle,
            receiver,
            _closure: closure,
        }
    }
}

/// Resolves when the window's timeout fires; the timeout is cleared if this is dropped earlier.
///
/// A delay whose timeout could not be scheduled never resolves.
pub struct Delay {
    window: Window,
    handle: Option<i32>,
    receiver: oneshot::Receiver<()>,
    // Must outlive the timeout, the callback is invalidated when the closure is dropped.
    _closure: Closure<dyn FnMut()>,
}

impl Future for Delay {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context) -> Poll<()> {
        if self.handle.is_none() {
            return Poll::Pending;
        }

        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(())) => {
                self.handle = None;

                Poll::Ready(())
            }
            Poll::Ready(Err(_)) | Poll::Pending => Poll::Pending,
        }
    }
}

impl Drop for Delay {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.window.clear_timeout_with_handle(handle);
        }
    }
}
