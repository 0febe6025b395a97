//! Live OS sampler.
//!
//! - CPU times, in ticks / `_SC_CLK_TCK`:
//!   - Linux: `/proc/stat` aggregate `cpu` line
//!   - macOS: `host_statistics(HOST_CPU_LOAD_INFO)`
//!   - Solaris/illumos: `cpu_stat` kstats summed over all CPUs (`kstat -p`)
//! - Load average: `getloadavg(3)`
//! - Per-core usage: `sysinfo`, keeping the previous refresh as baseline.
//!   Where `sysinfo` sees no CPUs (Solaris) every online CPU counts with 0% usage.

use std::sync::Mutex;

use solaris_exporter_core::error::{ExporterError, Result};
use sysinfo::System;

use super::{CpuSampler, CpuTimes, LoadAverage};

pub struct OsSampler {
    // Baseline for "usage since last call"; shared by concurrent scrapes.
    sys: Mutex<System>,
}

impl OsSampler {
    pub fn new() -> Self {
        let mut sys = System::new();
        sys.refresh_cpu();
        Self {
            sys: Mutex::new(sys),
        }
    }
}

impl Default for OsSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuSampler for OsSampler {
    fn cpu_times(&self) -> Result<CpuTimes> {
        read_cpu_times()
    }

    fn load_average(&self) -> Result<LoadAverage> {
        read_load_average()
    }

    fn per_cpu_usage(&self) -> Result<Vec<f32>> {
        let mut sys = self
            .sys
            .lock()
            .map_err(|_| ExporterError::Internal("cpu usage baseline lock poisoned".into()))?;
        sys.refresh_cpu();
        let usage: Vec<f32> = sys.cpus().iter().map(|c| c.cpu_usage()).collect();
        if !usage.is_empty() {
            return Ok(usage);
        }
        match online_cpus() {
            0 => Err(ExporterError::Collection("no online cpus reported".into())),
            n => Ok(vec![0.0; n]),
        }
    }
}

#[cfg(unix)]
fn online_cpus() -> usize {
    // SAFETY: `sysconf` is thread-safe for this query and has no side effects.
    let n = unsafe { libc::sysconf(libc::_SC_NPROCESSORS_ONLN) };
    usize::try_from(n).unwrap_or(0)
}

#[cfg(not(unix))]
fn online_cpus() -> usize {
    0
}

#[cfg(target_os = "linux")]
fn read_cpu_times() -> Result<CpuTimes> {
    let raw = std::fs::read_to_string("/proc/stat")
        .map_err(|e| ExporterError::Collection(format!("read /proc/stat: {e}")))?;
    parse_proc_stat(&raw, clk_tck())
}

#[cfg(target_os = "macos")]
#[allow(deprecated)] // libc points mach calls at the mach2 crate
fn read_cpu_times() -> Result<CpuTimes> {
    // <mach/host_info.h>
    const HOST_CPU_LOAD_INFO: libc::c_int = 3;
    const HOST_CPU_LOAD_INFO_COUNT: libc::mach_msg_type_number_t = 4;

    let mut ticks = [0 as libc::c_uint; 4];
    let mut count = HOST_CPU_LOAD_INFO_COUNT;
    // SAFETY: HOST_CPU_LOAD_INFO writes `count` 32-bit words into `ticks`,
    // which holds exactly HOST_CPU_LOAD_INFO_COUNT of them.
    let kr = unsafe {
        libc::host_statistics(
            libc::mach_host_self(),
            HOST_CPU_LOAD_INFO,
            ticks.as_mut_ptr().cast(),
            &mut count,
        )
    };
    if kr != libc::KERN_SUCCESS {
        return Err(ExporterError::Collection(format!(
            "host_statistics(HOST_CPU_LOAD_INFO) failed: kern_return {kr}"
        )));
    }
    Ok(cpu_times_from_mach_ticks(ticks, clk_tck()))
}

#[cfg(any(target_os = "solaris", target_os = "illumos"))]
fn read_cpu_times() -> Result<CpuTimes> {
    let out = std::process::Command::new("kstat")
        .args(["-p", "cpu_stat"])
        .output()
        .map_err(|e| ExporterError::Collection(format!("run kstat: {e}")))?;
    if !out.status.success() {
        return Err(ExporterError::Collection(format!(
            "kstat -p cpu_stat exited with {}",
            out.status
        )));
    }
    parse_kstat_cpu_stat(&String::from_utf8_lossy(&out.stdout), clk_tck())
}

#[cfg(not(any(
    target_os = "linux",
    target_os = "macos",
    target_os = "solaris",
    target_os = "illumos"
)))]
fn read_cpu_times() -> Result<CpuTimes> {
    Err(ExporterError::Collection(
        "cumulative cpu times are not supported on this platform".into(),
    ))
}

#[cfg(any(
    target_os = "linux",
    target_os = "macos",
    target_os = "solaris",
    target_os = "illumos"
))]
fn clk_tck() -> f64 {
    // SAFETY: `sysconf` is thread-safe for this query and has no side effects.
    let hz = unsafe { libc::sysconf(libc::_SC_CLK_TCK) };
    if hz > 0 {
        hz as f64
    } else {
        100.0
    }
}

/// Parse the aggregate `cpu` line of `/proc/stat`.
///
/// Field order is `user nice system idle ...`; values are clock ticks.
pub fn parse_proc_stat(raw: &str, ticks_per_sec: f64) -> Result<CpuTimes> {
    let line = raw
        .lines()
        .find_map(|l| l.strip_prefix("cpu "))
        .ok_or_else(|| ExporterError::Collection("/proc/stat has no aggregate cpu line".into()))?;

    let ticks = line
        .split_whitespace()
        .map(|s| s.parse::<u64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| ExporterError::Collection(format!("/proc/stat cpu line: {e}")))?;

    let [user, nice, system, idle, ..] = ticks.as_slice() else {
        return Err(ExporterError::Collection(format!(
            "/proc/stat cpu line has {} fields, need at least 4",
            ticks.len()
        )));
    };

    let secs = |t: &u64| *t as f64 / ticks_per_sec;
    Ok(CpuTimes {
        user: secs(user),
        system: secs(system),
        idle: secs(idle),
        nice: secs(nice),
    })
}

/// Convert a `host_cpu_load_info` tick array to seconds.
///
/// Index order follows `CPU_STATE_USER, CPU_STATE_SYSTEM, CPU_STATE_IDLE, CPU_STATE_NICE`.
pub fn cpu_times_from_mach_ticks(ticks: [u32; 4], ticks_per_sec: f64) -> CpuTimes {
    let secs = |t: u32| f64::from(t) / ticks_per_sec;
    CpuTimes {
        user: secs(ticks[0]),
        system: secs(ticks[1]),
        idle: secs(ticks[2]),
        nice: secs(ticks[3]),
    }
}

/// Sum `kstat -p cpu_stat` output over all CPUs.
///
/// Lines look like `cpu_stat:0:cpu_stat0:user\t123456`; `user`, `kernel` and
/// `idle` are tick counters. Solaris keeps no separate nice time, so `nice`
/// is always 0.
pub fn parse_kstat_cpu_stat(raw: &str, ticks_per_sec: f64) -> Result<CpuTimes> {
    let (mut user, mut kernel, mut idle) = (0u64, 0u64, 0u64);
    let mut cpus = 0usize;

    for line in raw.lines() {
        let Some((key, value)) = line.split_once(char::is_whitespace) else {
            continue;
        };
        let mut parts = key.split(':');
        if parts.next() != Some("cpu_stat") {
            continue;
        }
        let slot = match parts.nth(2) {
            Some("user") => &mut user,
            Some("kernel") => &mut kernel,
            Some("idle") => {
                cpus += 1;
                &mut idle
            }
            _ => continue,
        };
        let ticks: u64 = value.trim().parse().map_err(|e| {
            ExporterError::Collection(format!("kstat {key}: {e}"))
        })?;
        *slot += ticks;
    }

    if cpus == 0 {
        return Err(ExporterError::Collection(
            "kstat output has no cpu_stat idle counters".into(),
        ));
    }

    let secs = |t: u64| t as f64 / ticks_per_sec;
    Ok(CpuTimes {
        user: secs(user),
        system: secs(kernel),
        idle: secs(idle),
        nice: 0.0,
    })
}

#[cfg(unix)]
fn read_load_average() -> Result<LoadAverage> {
    let mut values = [0.0_f64; 3];
    // SAFETY: `getloadavg` writes up to `n` doubles to a valid buffer of that length.
    let n = unsafe { libc::getloadavg(values.as_mut_ptr(), 3) };
    if n < 3 {
        return Err(ExporterError::Collection(format!(
            "getloadavg returned {n} samples"
        )));
    }
    Ok(LoadAverage {
        one: values[0],
        five: values[1],
        fifteen: values[2],
    })
}

#[cfg(not(unix))]
fn read_load_average() -> Result<LoadAverage> {
    Err(ExporterError::Collection(
        "load average is not supported on this platform".into(),
    ))
}
