//! The optional external symbolic-algebra helper (§6 "External symbolic
//! helper", §5 "no operation blocks on I/O inside the core").
//!
//! When a consumer configures a helper path, the recurrence solver may
//! opportunistically ask it for a closed-form linear solution instead of
//! relying on the internal characteristic-polynomial machinery. The helper
//! is a separate process speaking line-delimited JSON over stdin/stdout; it
//! is invoked with an enforced timeout and its absence, failure, or timeout
//! never stalls or fails the caller — every path falls back to the internal
//! solvers, exactly as specified.

use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostic;

/// Default timeout for a single helper round-trip (§6: "enforced timeout
/// (default 30 s)").
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A request sent to the external helper, one JSON object per line.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HelperRequest {
    /// Ask for a closed-form solution to a subtract-form linear recurrence.
    Linear {
        /// The recurrence written as a human-readable expression, e.g.
        /// `"T(n) = 2*T(n-1) - T(n-2) + 1"`.
        recurrence: String,
    },
    /// Ask for a closed-form solution to a divide-and-conquer recurrence.
    DivideConquer {
        /// The recurrence written as a human-readable expression, e.g.
        /// `"T(n) = 3*T(n/2) + n"`.
        recurrence: String,
    },
    /// Ask the helper to verify a proposed closed form against the
    /// recurrence it was derived from.
    Verify {
        /// The original recurrence.
        recurrence: String,
        /// The candidate closed form to check.
        closed_form: String,
    },
    /// Ask the helper to compare the asymptotic order of two expressions.
    Compare {
        /// The left-hand expression.
        left: String,
        /// The right-hand expression.
        right: String,
    },
}

/// The helper's response to any [`HelperRequest`] (§6: "Response:
/// `{success, closed_form, complexity, verified, error?, ...}`").
#[derive(Debug, Clone, Deserialize)]
pub struct HelperResponse {
    /// Whether the helper was able to answer the request at all.
    pub success: bool,
    /// The closed-form expression, when the helper produced one.
    #[serde(default)]
    pub closed_form: Option<String>,
    /// The rendered big-O/Θ complexity, when the helper produced one.
    #[serde(default)]
    pub complexity: Option<String>,
    /// The outcome of a `Verify` request, when applicable.
    #[serde(default)]
    pub verified: Option<bool>,
    /// An error message, when `success` is `false`.
    #[serde(default)]
    pub error: Option<String>,
}

/// Configuration for an external helper invocation.
#[derive(Debug, Clone)]
pub struct HelperConfig {
    /// Path to the helper executable.
    pub executable: PathBuf,
    /// Round-trip timeout; see [`DEFAULT_TIMEOUT`].
    pub timeout: Duration,
}

impl HelperConfig {
    /// Configure a helper at `executable` with the default timeout.
    #[must_use]
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self { executable: executable.into(), timeout: DEFAULT_TIMEOUT }
    }

    /// Override the round-trip timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Send one request to the helper process at `config.executable`, enforcing
/// `config.timeout`.
///
/// Returns `Ok(None)` (never an error) when the helper is absent, exits
/// non-zero, produces unparsable output, or does not answer within the
/// timeout — every one of those is a fallback signal, not a failure the
/// caller needs to handle specially (§5: "it never stalls the caller").
/// A [`Diagnostic`] is returned alongside describing which case occurred,
/// so the recurrence solver can lower confidence accordingly.
#[must_use]
pub fn query_helper(config: &HelperConfig, request: &HelperRequest) -> (Option<HelperResponse>, Option<Diagnostic>) {
    if !is_executable_path(&config.executable) {
        return (None, None);
    }

    let payload = match serde_json::to_string(request) {
        Ok(line) => line,
        Err(error) => return (None, Some(Diagnostic::structural(format!("could not encode helper request: {error}")))),
    };

    let mut child = match spawn(&config.executable) {
        Ok(child) => child,
        Err(error) => {
            return (
                None,
                Some(Diagnostic::numerical(format!("external symbolic helper failed to start: {error}"))),
            )
        }
    };

    let (tx, rx) = mpsc::channel();
    let stdin = child.stdin.take();
    let stdout = child.stdout.take();

    let worker = thread::spawn(move || {
        let outcome = run_round_trip(stdin, stdout, &payload);
        // The receiver may already be gone if the timeout fired first; that
        // is not an error for this thread, it simply has no one to tell.
        let _ignored_if_timed_out = tx.send(outcome);
    });

    match rx.recv_timeout(config.timeout) {
        Ok(Ok(response)) => {
            let _ = child.kill();
            let _ = child.wait();
            let _ = worker.join();
            (Some(response), None)
        }
        Ok(Err(error)) => {
            let _ = child.kill();
            let _ = child.wait();
            let _ = worker.join();
            (None, Some(Diagnostic::numerical(format!("external symbolic helper returned no usable answer: {error}"))))
        }
        Err(_timed_out) => {
            let _ = child.kill();
            let _ = child.wait();
            (
                None,
                Some(Diagnostic::numerical(format!(
                    "external symbolic helper did not respond within {:?}; falling back to the internal solver",
                    config.timeout
                ))),
            )
        }
    }
}

fn is_executable_path(path: &Path) -> bool {
    path.as_os_str() != ""
}

fn spawn(executable: &Path) -> std::io::Result<Child> {
    Command::new(executable).stdin(Stdio::piped()).stdout(Stdio::piped()).stderr(Stdio::null()).spawn()
}

fn run_round_trip(
    stdin: Option<std::process::ChildStdin>,
    stdout: Option<std::process::ChildStdout>,
    payload: &str,
) -> Result<HelperResponse, String> {
    let mut stdin = stdin.ok_or_else(|| "helper process exposed no stdin".to_owned())?;
    let stdout = stdout.ok_or_else(|| "helper process exposed no stdout".to_owned())?;

    writeln!(stdin, "{payload}").map_err(|error| format!("writing to helper stdin failed: {error}"))?;
    drop(stdin);

    let mut reader = BufReader::new(stdout);
    let mut line = String::new();
    let bytes_read = reader.read_line(&mut line).map_err(|error| format!("reading helper stdout failed: {error}"))?;
    if bytes_read == 0 {
        return Err("helper closed its output without answering".to_owned());
    }

    let response: HelperResponse = serde_json::from_str(line.trim_end()).map_err(|error| format!("could not parse helper response: {error}"))?;
    if response.success {
        Ok(response)
    } else {
        Err(response.error.unwrap_or_else(|| "helper reported failure with no message".to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_helper_path_yields_no_response_and_no_diagnostic() {
        let config = HelperConfig::new("");
        let request = HelperRequest::Linear { recurrence: "T(n) = 2*T(n-1) + 1".to_owned() };
        let (response, diagnostic) = query_helper(&config, &request);
        assert!(response.is_none());
        assert!(diagnostic.is_none());
    }

    #[test]
    fn nonexistent_helper_executable_yields_diagnostic_not_panic() {
        let config = HelperConfig::new("/nonexistent/path/to/a/helper/binary-that-does-not-exist");
        let request = HelperRequest::DivideConquer { recurrence: "T(n) = 2*T(n/2) + n".to_owned() };
        let (response, diagnostic) = query_helper(&config, &request);
        assert!(response.is_none());
        assert!(diagnostic.is_some());
    }

    #[test]
    fn helper_config_default_timeout_is_thirty_seconds() {
        let config = HelperConfig::new("helper");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn helper_config_with_timeout_overrides_default() {
        let config = HelperConfig::new("helper").with_timeout(Duration::from_secs(5));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
