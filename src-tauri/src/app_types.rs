use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex, MutexGuard,
};
use tauri::WebviewWindow;

use crate::{platform::Platform, runtime_config::RuntimeConfig, update_notifier::UpdateSession};

fn lock_or_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Holds at most one window handle.
#[derive(Debug)]
pub(crate) struct WindowSlot<W> {
    handle: Mutex<Option<W>>,
}

impl<W: Clone> WindowSlot<W> {
    pub(crate) fn new() -> Self {
        Self {
            handle: Mutex::new(None),
        }
    }

    /// Stores `window`, returning the handle it replaced.
    pub(crate) fn attach(&self, window: W) -> Option<W> {
        lock_or_recover(&self.handle).replace(window)
    }

    pub(crate) fn clear(&self) -> Option<W> {
        lock_or_recover(&self.handle).take()
    }

    pub(crate) fn current(&self) -> Option<W> {
        lock_or_recover(&self.handle).clone()
    }

    pub(crate) fn is_empty(&self) -> bool {
        lock_or_recover(&self.handle).is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ActivateDecision {
    CreateWindow,
    FocusExisting,
}

pub(crate) fn decide_activate<W: Clone>(slot: &WindowSlot<W>) -> ActivateDecision {
    if slot.is_empty() {
        ActivateDecision::CreateWindow
    } else {
        ActivateDecision::FocusExisting
    }
}

pub(crate) struct AppSession {
    pub(crate) config: RuntimeConfig,
    pub(crate) platform: Platform,
    pub(crate) main_window: WindowSlot<WebviewWindow>,
    update_session: Mutex<Option<Arc<UpdateSession>>>,
    first_load_pending: AtomicBool,
}

impl AppSession {
    pub(crate) fn new(config: RuntimeConfig, platform: Platform) -> Self {
        Self {
            config,
            platform,
            main_window: WindowSlot::new(),
            update_session: Mutex::new(None),
            first_load_pending: AtomicBool::new(false),
        }
    }

    /// Marks the next window's first finished page load as pending.
    pub(crate) fn arm_first_load(&self) {
        self.first_load_pending.store(true, Ordering::Release);
    }

    /// True exactly once after each `arm_first_load`.
    pub(crate) fn take_first_load(&self) -> bool {
        self.first_load_pending.swap(false, Ordering::AcqRel)
    }

    pub(crate) fn update_session(&self) -> Option<Arc<UpdateSession>> {
        lock_or_recover(&self.update_session).clone()
    }

    pub(crate) fn replace_update_session(&self, session: Arc<UpdateSession>) {
        *lock_or_recover(&self.update_session) = Some(session);
    }
}
