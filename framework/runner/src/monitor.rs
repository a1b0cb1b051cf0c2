use rate_ramp_core::prelude::DelegatedShutdownListener;
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

/// Monitor the resource usage of the ramp process and report high usage.
///
/// Note that this won't stop the ramp proceeding, it will just log a warning to let the user know
/// that the load generator might not be able to keep up with the target rate, which skews the
/// results of the later generations.
///
/// The CPU usage for the process is collected every [sysinfo::MINIMUM_CPU_UPDATE_INTERVAL] and checked.
/// If it is above 50% with respect to the number of cores then a warning is logged.
pub(crate) fn start_monitor(shutdown_listener: DelegatedShutdownListener) {
    let spawned = std::thread::Builder::new()
        .name("monitor".to_string())
        .spawn(move || {
            let this_process_pid = Pid::from_u32(std::process::id());
            let mut sys = System::new();

            sys.refresh_cpu_all();
            let cpu_count = sys.cpus().len().max(1);

            loop {
                if shutdown_listener.should_shutdown() {
                    log::trace!("Monitor thread shutting down");
                    break;
                }

                sys.refresh_processes_specifics(
                    ProcessesToUpdate::Some(&[this_process_pid]),
                    true,
                    ProcessRefreshKind::nothing().with_cpu(),
                );

                if let Some(process) = sys.process(this_process_pid) {
                    let usage = (process.cpu_usage() / (cpu_count * 100) as f32) * 100.0;
                    if usage > 50.0 {
                        log::warn!("High CPU usage detected. The ramp is using {:.2}% of the CPU, with {} available cores", usage, cpu_count);
                    }
                }

                std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
            }
        });

    if let Err(e) = spawned {
        log::warn!("Failed to start monitor thread: {e:?}");
    }
}
