//! CLI Command Runner
//!
//! Invokes the vendor diagnostic tools (`storcli64` for MegaRAID,
//! `tw_cli` for 3ware) and captures their output for evaluation. A
//! missing binary and a failing invocation map to distinct errors so the
//! caller can tell "could not check" apart from "checked and unhealthy".

use crate::domain::ports::{CommandRunner, ControllerKind, ControllerSpec, RawInvocation};
use crate::error::{Error, Result};
use async_trait::async_trait;
use tracing::debug;

// =============================================================================
// Runner Configuration
// =============================================================================

/// Configuration for the CLI runner
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Path to the storcli binary
    pub storcli_path: String,
    /// Path to the tw_cli binary
    pub tw_cli_path: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            storcli_path: "storcli64".to_string(),
            tw_cli_path: "tw_cli".to_string(),
        }
    }
}

// =============================================================================
// CLI Runner
// =============================================================================

/// Runs vendor diagnostic tools as subprocesses
pub struct CliRunner {
    config: RunnerConfig,
}

impl CliRunner {
    /// Create a runner with the given tool paths
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// Create a runner expecting the vendor tools on PATH
    pub fn default_runner() -> Self {
        Self::new(RunnerConfig::default())
    }

    /// Vendor command line for one controller
    fn command_for(&self, spec: ControllerSpec) -> (&str, Vec<String>) {
        match spec.kind {
            ControllerKind::MegaRaid => (
                self.config.storcli_path.as_str(),
                vec![format!("/c{}", spec.controller), "show".to_string()],
            ),
            ControllerKind::ThreeWare => (
                self.config.tw_cli_path.as_str(),
                vec!["info".to_string(), format!("c{}", spec.controller)],
            ),
        }
    }

    /// Check if the vendor tool for a controller family can be spawned
    pub fn is_available(&self, kind: ControllerKind) -> bool {
        let (tool, probe_arg) = match kind {
            ControllerKind::MegaRaid => (self.config.storcli_path.as_str(), "-v"),
            ControllerKind::ThreeWare => (self.config.tw_cli_path.as_str(), "help"),
        };

        std::process::Command::new(tool)
            .arg(probe_arg)
            .output()
            .is_ok()
    }
}

#[async_trait]
impl CommandRunner for CliRunner {
    async fn invoke(&self, spec: ControllerSpec) -> Result<RawInvocation> {
        let (tool, args) = self.command_for(spec);
        debug!("Invoking {} {} for controller {}", tool, args.join(" "), spec);

        let output = tokio::process::Command::new(tool)
            .args(&args)
            .output()
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => Error::BinaryNotFound {
                    tool: tool.to_string(),
                },
                _ => Error::Io(e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = if stderr.trim().is_empty() {
                output.status.to_string()
            } else {
                stderr.trim().to_string()
            };
            return Err(Error::Invocation {
                tool: tool.to_string(),
                reason,
            });
        }

        let lines = String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(|l| l.to_string())
            .collect();

        Ok(RawInvocation { spec, lines })
    }
}
