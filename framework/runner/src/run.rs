use std::sync::Arc;

use rate_ramp_instruments::ReportConfig;

use crate::benchmark::{Benchmark, GenerationResult};
use crate::definition::RampDefinitionBuilder;
use crate::error::RampError;
use crate::monitor::start_monitor;
use crate::orchestrator::RunOrchestrator;
use crate::progress::ProgressReporter;
use crate::shutdown::start_shutdown_listener;

/// Run a ramp to completion, blocking until every generation has run, one fails, or the user
/// presses Ctrl-C.
pub fn run<C, B>(
    definition: RampDefinitionBuilder,
    benchmark: &B,
    client: &C,
) -> Result<Vec<GenerationResult>, RampError>
where
    B: Benchmark<C>,
{
    let definition = definition.build()?;
    let ramp = &definition.ramp;

    log::info!(
        "Running ramp {}: {} to {} req/s in steps of {}, {} generations planned",
        definition.name,
        ramp.lower_bound,
        ramp.upper_bound,
        ramp.step,
        ramp.planned_generations()
    );

    let runtime = tokio::runtime::Runtime::new()?;
    let shutdown_handle = start_shutdown_listener(&runtime);

    let mut report_config = ReportConfig::default().enable_log();
    if !definition.no_progress {
        report_config = report_config.with_collector(Box::new(ProgressReporter::new(
            ramp.planned_generations(),
        )));
    }
    let reporter = Arc::new(report_config.init());

    // The benchmark shares the machine with this process, so warn if the load generator itself is
    // under pressure.
    start_monitor(shutdown_handle.new_listener());

    let orchestrator = RunOrchestrator::new(reporter.clone())
        .with_pause_between_generations(definition.pause_between_generations);
    let root_listener = shutdown_handle.new_listener();
    let outcome = runtime.block_on(orchestrator.run(&root_listener, ramp, benchmark, client));

    reporter.finalize();
    shutdown_handle.shutdown();

    match &outcome {
        Ok(results) => {
            log::info!(
                "Ramp {} completed {} generations",
                definition.name,
                results.len()
            );
        }
        Err(e) if e.is_cancelled() => {
            log::warn!(
                "Ramp {} cancelled after {} generations",
                definition.name,
                e.partial_results().len()
            );
        }
        Err(RampError::Execution {
            results, source, ..
        }) => {
            log::error!(
                "Ramp {} stopped after {} generations: {source:#}",
                definition.name,
                results.len()
            );
        }
        Err(e) => {
            log::error!("Ramp {} failed: {e}", definition.name);
        }
    }

    outcome
}
