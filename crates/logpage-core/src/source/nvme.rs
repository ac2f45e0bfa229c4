use std::process::Command;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{LogPageRequest, LogSource, SourceError};

/// `nvme get-log` invocation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NvmeConfig {
    /// nvme-cli executable.
    pub program: String,
    pub device: String,
    /// Log page identifier, passed as hex.
    pub log_id: u8,
    pub namespace: u32,
    /// Prefix the command with `sudo`.
    pub sudo: bool,
}

impl Default for NvmeConfig {
    fn default() -> Self {
        Self {
            program: "nvme".to_string(),
            device: "/dev/nvme1n1".to_string(),
            log_id: 0xc0,
            namespace: 1,
            sudo: true,
        }
    }
}

/// Fetches a log page by running nvme-cli and capturing its stdout.
///
/// The call blocks until the process exits; there is no timeout.
pub struct NvmeCliSource {
    config: NvmeConfig,
}

impl NvmeCliSource {
    pub fn new(config: NvmeConfig) -> Self {
        Self { config }
    }

    /// Full command line, program first.
    ///
    /// # Examples
    /// ```
    /// use logpage_core::{LogPageRequest, NvmeCliSource, NvmeConfig};
    ///
    /// let source = NvmeCliSource::new(NvmeConfig::default());
    /// let argv = source.command_line(&LogPageRequest { length: 32 });
    /// assert_eq!(
    ///     argv.join(" "),
    ///     "sudo nvme get-log /dev/nvme1n1 -i 0xc0 -l 32 -n 1"
    /// );
    /// ```
    pub fn command_line(&self, request: &LogPageRequest) -> Vec<String> {
        let mut argv = Vec::new();
        if self.config.sudo {
            argv.push("sudo".to_string());
        }
        argv.extend([
            self.config.program.clone(),
            "get-log".to_string(),
            self.config.device.clone(),
            "-i".to_string(),
            format!("{:#x}", self.config.log_id),
            "-l".to_string(),
            request.length.to_string(),
            "-n".to_string(),
            self.config.namespace.to_string(),
        ]);
        argv
    }
}

impl LogSource for NvmeCliSource {
    fn fetch(&mut self, request: &LogPageRequest) -> Result<String, SourceError> {
        let argv = self.command_line(request);
        let (program, args) = argv.split_first().ok_or(SourceError::EmptyOutput)?;
        debug!(command = %argv.join(" "), "running log source");

        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|source| SourceError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(SourceError::CommandFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let text = String::from_utf8(output.stdout)?;
        if text.trim().is_empty() {
            return Err(SourceError::EmptyOutput);
        }
        debug!(bytes = text.len(), "log source returned output");
        Ok(text)
    }

    fn describe(&self) -> String {
        format!(
            "nvme:{} log {:#x} ns {}",
            self.config.device, self.config.log_id, self.config.namespace
        )
    }
}
