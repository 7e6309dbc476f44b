//! Process-wide Ctrl-C registration
//!
//! The OS-level handler is installed at most once per process; what it does
//! is owned by a replaceable callback slot. Re-registering swaps the
//! callback. The callback's job is to request cooperative unwind (set a
//! flag, close a handle), never to do unbounded work: it runs on the signal
//! delivery thread.

use anyhow::Result;
use parking_lot::Mutex;
use std::sync::Once;

static HANDLER: Mutex<Option<Box<dyn FnMut() + Send>>> = Mutex::new(None);
static INSTALL: Once = Once::new();

/// Registers `handler` to run on Ctrl-C / SIGINT, replacing any previously
/// registered handler.
pub fn on_interrupt<F>(handler: F) -> Result<()>
where
    F: FnMut() + Send + 'static,
{
    *HANDLER.lock() = Some(Box::new(handler));

    let mut install_result = Ok(());
    INSTALL.call_once(|| {
        install_result = ctrlc::set_handler(|| {
            if let Some(h) = HANDLER.lock().as_mut() {
                h();
            }
        });
    });
    install_result?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn registration_replaces_previous_handler() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let f = first.clone();
        on_interrupt(move || {
            f.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
        let s = second.clone();
        on_interrupt(move || {
            s.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

        // Drive the stored callback directly rather than raising a signal,
        // which the test harness would also see.
        if let Some(h) = HANDLER.lock().as_mut() {
            h();
        }
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }
}
