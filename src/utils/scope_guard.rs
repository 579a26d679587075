/// Runs a closure when dropped.
///
/// Used to tie cleanup to a scope so it also happens when the surrounding
/// future is cancelled or unwinds.
#[must_use = "the closure runs as soon as the guard is dropped"]
pub struct ScopeGuard<F: FnOnce()> {
    on_drop: Option<F>,
}

impl<F: FnOnce()> ScopeGuard<F> {
    pub fn new(on_drop: F) -> Self {
        Self { on_drop: Some(on_drop) }
    }
}

impl<F: FnOnce()> Drop for ScopeGuard<F> {
    fn drop(&mut self) {
        if let Some(on_drop) = self.on_drop.take() {
            on_drop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ScopeGuard;
    use std::cell::Cell;

    #[test]
    fn runs_once_on_drop() {
        let runs = Cell::new(0);
        {
            let _guard = ScopeGuard::new(|| runs.set(runs.get() + 1));
            assert_eq!(runs.get(), 0);
        }
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn runs_on_unwind() {
        let runs = std::sync::atomic::AtomicUsize::new(0);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = ScopeGuard::new(|| {
                runs.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            });
            panic!("boom");
        }));
        assert!(result.is_err());
        assert_eq!(runs.load(std::sync::atomic::Ordering::SeqCst), 1);
    }
}
