//! Multi-Controller Aggregator
//!
//! Orchestrates one polling cycle across a caller-supplied set of
//! controllers: invoke the command runner per controller, evaluate the
//! output, deliver each result to the report sink, and fold everything
//! into one [`AggregateReport`]. One controller failing never aborts the
//! others; a controller that could not be checked counts against the
//! aggregate verdict just like an unhealthy one.

use crate::domain::ports::{
    AggregateReport, CommandRunner, CommandRunnerRef, ControllerFailure, ControllerReport,
    ControllerSpec, ReportSinkRef,
};
use crate::error::Result;
use crate::raid::evaluator;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{info, warn};

/// Default fan-out across controllers.
pub const DEFAULT_CONCURRENCY: usize = 4;

// =============================================================================
// Raid Monitor
// =============================================================================

/// Checks a fleet of RAID controllers and reports the combined verdict
pub struct RaidMonitor {
    runner: CommandRunnerRef,
    sink: ReportSinkRef,
    concurrency: usize,
}

impl RaidMonitor {
    /// Create a monitor with the default fan-out.
    pub fn new(runner: CommandRunnerRef, sink: ReportSinkRef) -> Self {
        Self::with_concurrency(runner, sink, DEFAULT_CONCURRENCY)
    }

    /// Create a monitor checking up to `concurrency` controllers at once.
    pub fn with_concurrency(
        runner: CommandRunnerRef,
        sink: ReportSinkRef,
        concurrency: usize,
    ) -> Self {
        Self {
            runner,
            sink,
            concurrency: concurrency.max(1),
        }
    }

    /// Run one polling cycle over the given controllers.
    ///
    /// Controllers are checked in parallel up to the configured fan-out,
    /// but `reports` and `failures` preserve the caller-supplied order.
    /// Per-controller results reach the sink as each completes; the
    /// aggregate is delivered once at the end.
    pub async fn check_all(&self, specs: &[ControllerSpec]) -> AggregateReport {
        info!("Running RAID check on {} controller(s)", specs.len());

        let outcomes: Vec<(ControllerSpec, Result<ControllerReport>)> =
            stream::iter(specs.iter().copied())
                .map(|spec| {
                    let runner = Arc::clone(&self.runner);
                    let sink = Arc::clone(&self.sink);
                    async move {
                        let outcome = check_one(runner.as_ref(), spec).await;
                        match &outcome {
                            Ok(report) => sink.controller_report(report).await,
                            Err(error) => sink.controller_failed(&spec, error).await,
                        }
                        (spec, outcome)
                    }
                })
                .buffered(self.concurrency)
                .collect()
                .await;

        let mut reports = Vec::new();
        let mut failures = Vec::new();
        for (spec, outcome) in outcomes {
            match outcome {
                Ok(report) => reports.push(report),
                Err(error) => {
                    warn!("Controller {} could not be checked: {}", spec, error);
                    failures.push(ControllerFailure {
                        spec,
                        error: error.to_string(),
                    });
                }
            }
        }

        let any_unhealthy = reports.iter().any(|r| !r.overall_healthy) || !failures.is_empty();
        let aggregate = AggregateReport {
            reports,
            failures,
            any_unhealthy,
        };

        self.sink.aggregate_report(&aggregate).await;
        aggregate
    }
}

/// Check a single controller: invoke, then evaluate. No retries here;
/// retry policy belongs to the command runner.
async fn check_one(runner: &dyn CommandRunner, spec: ControllerSpec) -> Result<ControllerReport> {
    let invocation = runner.invoke(spec).await?;
    evaluator::evaluate(&invocation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{ControllerKind, RawInvocation, ReportSink};
    use crate::error::Error;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    const TW_HEALTHY: &[&str] = &[
        "u0    RAID-5    OK             -       -       64K     931.303   ON     OFF",
        "p0    OK        u0     233.76 GB   490234752     WD-WCANK1111111",
        "p1    OK        u0     233.76 GB   490234752     WD-WCANK2222222",
    ];

    const TW_DEGRADED: &[&str] = &[
        "u0    RAID-5    DEGRADED       -       -       64K     931.303   ON     OFF",
        "p0    OK        u0     233.76 GB   490234752     WD-WCANK1111111",
    ];

    /// Canned per-controller behavior for the mock runner
    enum Canned {
        Lines(&'static [&'static str]),
        DelayedLines(u64, &'static [&'static str]),
        MissingBinary,
        Failed,
    }

    struct MockRunner {
        behaviors: HashMap<ControllerSpec, Canned>,
    }

    #[async_trait]
    impl CommandRunner for MockRunner {
        async fn invoke(&self, spec: ControllerSpec) -> Result<RawInvocation> {
            let lines: &[&str] = match self.behaviors.get(&spec) {
                Some(Canned::Lines(lines)) => lines,
                Some(Canned::DelayedLines(millis, lines)) => {
                    tokio::time::sleep(Duration::from_millis(*millis)).await;
                    lines
                }
                Some(Canned::MissingBinary) => {
                    return Err(Error::BinaryNotFound {
                        tool: "tw_cli".into(),
                    })
                }
                Some(Canned::Failed) => {
                    return Err(Error::Invocation {
                        tool: "tw_cli".into(),
                        reason: "exit status 1".into(),
                    })
                }
                None => &[],
            };

            Ok(RawInvocation {
                spec,
                lines: lines.iter().map(|l| l.to_string()).collect(),
            })
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        reports: Mutex<Vec<ControllerSpec>>,
        failed: Mutex<Vec<ControllerSpec>>,
        aggregates: Mutex<usize>,
    }

    #[async_trait]
    impl ReportSink for RecordingSink {
        async fn controller_report(&self, report: &ControllerReport) {
            self.reports.lock().unwrap().push(report.spec);
        }

        async fn controller_failed(&self, spec: &ControllerSpec, _error: &Error) {
            self.failed.lock().unwrap().push(*spec);
        }

        async fn aggregate_report(&self, _report: &AggregateReport) {
            *self.aggregates.lock().unwrap() += 1;
        }
    }

    fn tw_spec(controller: u32) -> ControllerSpec {
        ControllerSpec::new(ControllerKind::ThreeWare, controller)
    }

    fn monitor(
        behaviors: Vec<(ControllerSpec, Canned)>,
        concurrency: usize,
    ) -> (RaidMonitor, Arc<RecordingSink>) {
        let runner = Arc::new(MockRunner {
            behaviors: behaviors.into_iter().collect(),
        });
        let sink = Arc::new(RecordingSink::default());
        let monitor = RaidMonitor::with_concurrency(runner, sink.clone(), concurrency);
        (monitor, sink)
    }

    #[tokio::test]
    async fn test_all_healthy() {
        let (monitor, sink) = monitor(
            vec![
                (tw_spec(0), Canned::Lines(TW_HEALTHY)),
                (tw_spec(4), Canned::Lines(TW_HEALTHY)),
            ],
            1,
        );

        let aggregate = monitor.check_all(&[tw_spec(0), tw_spec(4)]).await;

        assert!(!aggregate.any_unhealthy);
        assert_eq!(aggregate.reports.len(), 2);
        assert!(aggregate.failures.is_empty());
        assert_eq!(*sink.aggregates.lock().unwrap(), 1);
        assert_eq!(sink.reports.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_one_failure_does_not_abort_siblings() {
        let specs = [tw_spec(0), tw_spec(1), tw_spec(2)];
        let (monitor, sink) = monitor(
            vec![
                (specs[0], Canned::Lines(TW_HEALTHY)),
                (specs[1], Canned::MissingBinary),
                (specs[2], Canned::Lines(TW_HEALTHY)),
            ],
            2,
        );

        let aggregate = monitor.check_all(&specs).await;

        assert!(aggregate.any_unhealthy);
        assert_eq!(aggregate.reports.len(), 2);
        assert_eq!(aggregate.reports[0].spec, specs[0]);
        assert_eq!(aggregate.reports[1].spec, specs[2]);
        assert_eq!(aggregate.failures.len(), 1);
        assert_eq!(aggregate.failures[0].spec, specs[1]);
        assert!(aggregate.failures[0].error.contains("tw_cli"));
        assert_eq!(sink.failed.lock().unwrap().as_slice(), &[specs[1]]);
    }

    #[tokio::test]
    async fn test_unhealthy_report_forces_aggregate_verdict() {
        let (monitor, _sink) = monitor(
            vec![
                (tw_spec(0), Canned::Lines(TW_HEALTHY)),
                (tw_spec(1), Canned::Lines(TW_DEGRADED)),
            ],
            1,
        );

        let aggregate = monitor.check_all(&[tw_spec(0), tw_spec(1)]).await;

        assert!(aggregate.any_unhealthy);
        assert_eq!(aggregate.reports.len(), 2);
        assert!(aggregate.failures.is_empty());
        assert!(aggregate.reports[0].overall_healthy);
        assert!(!aggregate.reports[1].overall_healthy);
    }

    #[tokio::test]
    async fn test_empty_output_recorded_as_failure() {
        let (monitor, sink) = monitor(vec![(tw_spec(0), Canned::Lines(&[]))], 1);

        let aggregate = monitor.check_all(&[tw_spec(0)]).await;

        assert!(aggregate.any_unhealthy);
        assert!(aggregate.reports.is_empty());
        assert_eq!(aggregate.failures.len(), 1);
        assert_eq!(sink.failed.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_invocation_error_recorded_as_failure() {
        let (monitor, _sink) = monitor(vec![(tw_spec(0), Canned::Failed)], 1);

        let aggregate = monitor.check_all(&[tw_spec(0)]).await;

        assert!(aggregate.any_unhealthy);
        assert_eq!(aggregate.failures.len(), 1);
        assert!(aggregate.failures[0].error.contains("exit status 1"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_parallel_execution_preserves_caller_order() {
        // first controller finishes last; the aggregate must still lead
        // with it
        let specs = [tw_spec(0), tw_spec(1), tw_spec(2)];
        let (monitor, _sink) = monitor(
            vec![
                (specs[0], Canned::DelayedLines(300, TW_HEALTHY)),
                (specs[1], Canned::DelayedLines(100, TW_HEALTHY)),
                (specs[2], Canned::DelayedLines(10, TW_HEALTHY)),
            ],
            3,
        );

        let aggregate = monitor.check_all(&specs).await;

        let order: Vec<ControllerSpec> = aggregate.reports.iter().map(|r| r.spec).collect();
        assert_eq!(order, specs);
    }

    #[test]
    fn test_no_controllers_is_a_clean_cycle() {
        let (monitor, sink) = monitor(vec![], 1);

        let aggregate = tokio_test::block_on(monitor.check_all(&[]));

        assert!(!aggregate.any_unhealthy);
        assert!(aggregate.reports.is_empty());
        assert!(aggregate.failures.is_empty());
        assert_eq!(*sink.aggregates.lock().unwrap(), 1);
    }
}
