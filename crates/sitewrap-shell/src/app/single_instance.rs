//! Single-instance enforcement.
//!
//! The first process binds a local endpoint under the app data directory
//! and listens on a background thread. A later launch connects instead of
//! binding, pings the primary, and exits; the primary notices the ping on
//! its next event-loop turn and surfaces the main window.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use tracing::{debug, warn};

use sitewrap_common::PlatformError;
use sitewrap_platform::paths;

/// Outcome of instance acquisition.
pub enum Instance {
    /// This process owns the endpoint; keep the guard alive for the
    /// process lifetime.
    Primary(InstanceGuard),
    /// Another instance is already running and has been signalled.
    Secondary,
}

/// Held by the primary instance; polled once per event-loop turn.
pub struct InstanceGuard {
    signalled: Arc<AtomicBool>,
}

impl InstanceGuard {
    /// Whether a second instance pinged since the last poll.
    pub fn take_signal(&self) -> bool {
        self.signalled.swap(false, Ordering::AcqRel)
    }
}

fn endpoint_path() -> Result<PathBuf, PlatformError> {
    Ok(paths::data_dir()?.join("instance.sock"))
}

fn dead_guard() -> InstanceGuard {
    InstanceGuard {
        signalled: Arc::new(AtomicBool::new(false)),
    }
}

/// Bind the endpoint or signal the existing owner.
///
/// Errors degrade to `Primary` with a dead guard: failing to enforce
/// single-instance must never stop the app from starting.
pub fn acquire() -> Instance {
    let path = match endpoint_path() {
        Ok(path) => path,
        Err(e) => {
            warn!("single-instance endpoint unavailable, continuing: {e}");
            return Instance::Primary(dead_guard());
        }
    };
    match imp::acquire(&path) {
        Ok(instance) => instance,
        Err(e) => {
            warn!("single-instance endpoint unavailable, continuing: {e}");
            Instance::Primary(dead_guard())
        }
    }
}

fn spawn_listener<L, S>(listener: L, accept: fn(&L) -> std::io::Result<S>) -> InstanceGuard
where
    L: Send + 'static,
    S: Send + 'static,
{
    let signalled = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&signalled);
    thread::Builder::new()
        .name("instance-listener".into())
        .spawn(move || loop {
            match accept(&listener) {
                Ok(_stream) => {
                    debug!("second instance signalled");
                    flag.store(true, Ordering::Release);
                }
                Err(e) => {
                    warn!("instance listener stopping: {e}");
                    break;
                }
            }
        })
        .ok();
    InstanceGuard { signalled }
}

#[cfg(unix)]
mod imp {
    use std::os::unix::net::{UnixListener, UnixStream};
    use std::path::Path;

    use super::{spawn_listener, Instance};

    pub fn acquire(path: &Path) -> std::io::Result<Instance> {
        if UnixStream::connect(path).is_ok() {
            // Connecting is the whole signal; the primary only counts
            // accepted connections.
            return Ok(Instance::Secondary);
        }

        // Stale socket from a crashed run; nobody answered.
        let _ = std::fs::remove_file(path);
        let listener = UnixListener::bind(path)?;
        Ok(Instance::Primary(spawn_listener(listener, |l| {
            l.accept().map(|(stream, _)| stream)
        })))
    }
}

#[cfg(not(unix))]
mod imp {
    use std::net::{TcpListener, TcpStream};
    use std::path::Path;

    use super::{spawn_listener, Instance};

    /// Loopback TCP stands in for the Unix socket; the bound port is
    /// written beside the data files for later launches to find.
    pub fn acquire(path: &Path) -> std::io::Result<Instance> {
        let port_file = path.with_extension("port");

        if let Ok(raw) = std::fs::read_to_string(&port_file) {
            if let Ok(port) = raw.trim().parse::<u16>() {
                if TcpStream::connect(("127.0.0.1", port)).is_ok() {
                    return Ok(Instance::Secondary);
                }
            }
        }

        let listener = TcpListener::bind(("127.0.0.1", 0))?;
        let port = listener.local_addr()?.port();
        std::fs::write(&port_file, port.to_string())?;
        Ok(Instance::Primary(spawn_listener(listener, |l| {
            l.accept().map(|(stream, _)| stream)
        })))
    }
}
