use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use spotwatch_logging::{sw_debug, sw_info, sw_warn};

use crate::timer::TimerScope;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Danger,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        };
        f.write_str(name)
    }
}

/// Anything that can put a message in front of the user.
pub trait Notifier: Send + Sync {
    fn show(&self, message: &str, severity: Severity);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BannerId(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub id: BannerId,
    pub message: String,
    pub severity: Severity,
}

type BannerList = Arc<Mutex<Vec<Banner>>>;

/// Dismissible banners, newest first, each removed automatically after the TTL.
pub struct TransientNotifier {
    banners: BannerList,
    next_id: AtomicU64,
    ttl: Duration,
    timers: TimerScope,
}

impl TransientNotifier {
    pub fn new(ttl: Duration) -> Self {
        Self {
            banners: Arc::new(Mutex::new(Vec::new())),
            next_id: AtomicU64::new(1),
            ttl,
            timers: TimerScope::new(),
        }
    }

    /// Inserts a banner at the top and schedules its removal.
    ///
    /// Must be called from within a tokio runtime.
    pub fn push(&self, message: &str, severity: Severity) -> BannerId {
        let id = BannerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        lock(&self.banners).insert(
            0,
            Banner {
                id,
                message: message.to_string(),
                severity,
            },
        );

        match severity {
            Severity::Danger | Severity::Warning => sw_warn!("[{}] {}", severity, message),
            Severity::Info | Severity::Success => sw_info!("[{}] {}", severity, message),
        }

        let banners = self.banners.clone();
        self.timers.schedule(self.ttl, move || {
            if remove(&banners, id) {
                sw_debug!("Banner {:?} expired", id);
            }
        });
        id
    }

    /// Removes a banner. Returns `false` if it was already gone.
    pub fn dismiss(&self, id: BannerId) -> bool {
        remove(&self.banners, id)
    }

    pub fn banners(&self) -> Vec<Banner> {
        lock(&self.banners).clone()
    }
}

impl Notifier for TransientNotifier {
    fn show(&self, message: &str, severity: Severity) {
        self.push(message, severity);
    }
}

fn lock(banners: &BannerList) -> std::sync::MutexGuard<'_, Vec<Banner>> {
    banners.lock().unwrap_or_else(PoisonError::into_inner)
}

fn remove(banners: &BannerList, id: BannerId) -> bool {
    let mut banners = lock(banners);
    match banners.iter().position(|banner| banner.id == id) {
        Some(index) => {
            banners.remove(index);
            true
        }
        None => false,
    }
}
