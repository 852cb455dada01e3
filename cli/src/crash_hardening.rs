//! Keep vault secrets out of core dumps.
//!
//! The stored access code, every code typed on the login keypad and all
//! imported files and notes live unencrypted in process memory for the whole
//! session. A crash dump would write them to disk where any user with access
//! to the dump directory could read them, so dumps are disabled before the
//! store is opened.
//!
//! Set `CALCVAULT_ALLOW_COREDUMPS=1` to keep dumps while debugging a crash.

use anyhow::{Context, Result};
use std::env;
#[cfg(unix)]
use std::io;

const ALLOW_COREDUMPS_ENV: &str = "CALCVAULT_ALLOW_COREDUMPS";

pub fn apply() -> Result<()> {
    if coredumps_allowed_by_override() {
        tracing::warn!(
            env_var = ALLOW_COREDUMPS_ENV,
            "Crash dump hardening disabled by environment override"
        );
        return Ok(());
    }

    apply_platform_hardening().context("failed to apply crash dump hardening")?;
    tracing::info!("Crash dump hardening enabled");
    Ok(())
}

fn coredumps_allowed_by_override() -> bool {
    env::var(ALLOW_COREDUMPS_ENV).is_ok_and(|raw| is_truthy(&raw))
}

fn is_truthy(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}

/// Zero the core size limit everywhere; on Linux also mark the process
/// non-dumpable, which blocks ptrace attach from other same-uid processes.
#[cfg(unix)]
fn apply_platform_hardening() -> Result<()> {
    set_rlimit_core_zero().context("setrlimit(RLIMIT_CORE=0) failed")?;

    #[cfg(target_os = "linux")]
    {
        set_linux_dumpable_zero().context("prctl(PR_SET_DUMPABLE=0) failed")?;
    }

    Ok(())
}

#[cfg(unix)]
fn set_rlimit_core_zero() -> io::Result<()> {
    let limit = libc::rlimit {
        rlim_cur: 0,
        rlim_max: 0,
    };
    // SAFETY: `limit` is a valid rlimit that outlives the call.
    let rc = unsafe { libc::setrlimit(libc::RLIMIT_CORE, &raw const limit) };
    if rc == 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}

#[cfg(target_os = "linux")]
fn set_linux_dumpable_zero() -> io::Result<()> {
    // SAFETY: PR_SET_DUMPABLE takes plain integer arguments.
    let rc = unsafe { libc::prctl(libc::PR_SET_DUMPABLE, 0, 0, 0, 0) };
    if rc == 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}

// No portable equivalent; the vault runs unhardened.
#[cfg(not(unix))]
fn apply_platform_hardening() -> Result<()> {
    Ok(())
}
