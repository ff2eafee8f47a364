use std::path::PathBuf;
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use facescan_core::detection::infrastructure::model_resolver::{self, ResolveOptions};
use facescan_core::shared::constants::{CASCADE_MODEL_NAME, CASCADE_MODEL_URL};

/// Resolves the face cascade in the background at startup.
/// Detection workers wait on it instead of resolving again.
pub struct ModelCache {
    result: Mutex<Option<Result<PathBuf, String>>>,
    ready: Condvar,
    progress: Mutex<(u64, u64)>,
}

impl ModelCache {
    /// Create the cache and start resolving the cascade on a helper thread.
    pub fn new() -> Arc<Self> {
        let cache = Arc::new(Self {
            result: Mutex::new(None),
            ready: Condvar::new(),
            progress: Mutex::new((0, 0)),
        });

        let slot = cache.clone();
        thread::spawn(move || {
            slot.resolve_with(ResolveOptions {
                explicit_path: None,
                bundled_dir: bundled_models_dir(),
            })
        });

        cache
    }

    fn resolve_with(self: &Arc<Self>, options: ResolveOptions) {
        let progress_slot = self.clone();
        let result = model_resolver::resolve(
            CASCADE_MODEL_NAME,
            CASCADE_MODEL_URL,
            &options,
            Some(Box::new(move |downloaded, total| {
                *lock(&progress_slot.progress) = (downloaded, total);
            })),
        );
        if let Err(ref e) = result {
            log::error!("Cascade unavailable: {e}");
        }
        self.finish(result.map_err(|e| unavailable_message(&e.to_string())));
    }

    fn finish(&self, result: Result<PathBuf, String>) {
        *lock(&self.result) = Some(result);
        self.ready.notify_all();
    }

    /// Block until the cascade path is known. Calls `on_progress(downloaded, total)`
    /// while a download is in progress.
    pub fn wait_for_cascade(&self, on_progress: &dyn Fn(u64, u64)) -> Result<PathBuf, String> {
        let mut guard = lock(&self.result);
        loop {
            if let Some(ref result) = *guard {
                return result.clone();
            }
            if let Ok(progress) = self.progress.try_lock() {
                let (downloaded, total) = *progress;
                if downloaded > 0 {
                    on_progress(downloaded, total);
                }
            }
            guard = self
                .ready
                .wait_timeout(guard, Duration::from_millis(100))
                .map(|(g, _)| g)
                .unwrap_or_else(|poisoned| poisoned.into_inner().0);
        }
    }
}

/// Resolution runs once per launch, so the user has to restart to try again.
fn unavailable_message(reason: &str) -> String {
    format!(
        "Não foi possível obter o classificador Haar ({reason}). \
         Verifique a conexão com a internet e reinicie o aplicativo."
    )
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn bundled_models_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("models")))
}

#[cfg(test)]
impl ModelCache {
    fn resolved(result: Result<PathBuf, String>) -> Arc<Self> {
        let cache = Arc::new(Self {
            result: Mutex::new(None),
            ready: Condvar::new(),
            progress: Mutex::new((0, 0)),
        });
        cache.finish(result);
        cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wait_returns_resolved_path() {
        let cache = ModelCache::resolved(Ok(PathBuf::from("/models/cascade.xml")));
        let path = cache.wait_for_cascade(&|_, _| {}).unwrap();
        assert_eq!(path, PathBuf::from("/models/cascade.xml"));
    }

    #[test]
    fn test_wait_returns_resolution_error() {
        let cache = ModelCache::resolved(Err("offline".into()));
        assert_eq!(cache.wait_for_cascade(&|_, _| {}).unwrap_err(), "offline");
    }

    #[test]
    fn test_unavailable_message_asks_for_restart() {
        let message = unavailable_message("dns error");
        assert!(message.contains("dns error"));
        assert!(message.contains("reinicie o aplicativo"));
    }

    #[test]
    fn test_failed_resolution_reaches_waiter_with_restart_hint() {
        let cache = Arc::new(ModelCache {
            result: Mutex::new(None),
            ready: Condvar::new(),
            progress: Mutex::new((0, 0)),
        });
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("missing.xml");
        cache.resolve_with(ResolveOptions {
            explicit_path: Some(explicit),
            bundled_dir: None,
        });

        let err = cache.wait_for_cascade(&|_, _| {}).unwrap_err();
        assert!(err.contains("missing.xml"));
        assert!(err.contains("reinicie o aplicativo"));
    }

    #[test]
    fn test_waiter_wakes_when_another_thread_finishes() {
        let cache = Arc::new(ModelCache {
            result: Mutex::new(None),
            ready: Condvar::new(),
            progress: Mutex::new((0, 0)),
        });
        let finisher = cache.clone();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            finisher.finish(Ok(PathBuf::from("late.xml")));
        });
        let path = cache.wait_for_cascade(&|_, _| {}).unwrap();
        handle.join().unwrap();
        assert_eq!(path, PathBuf::from("late.xml"));
    }
}
