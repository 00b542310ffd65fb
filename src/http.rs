use log::{debug, warn};
use serde_json::Value;

use crate::errors::RustyWarpscriptError;

/// The standard WarpScript execution endpoint.
const EXEC_PATH: &str = "/api/v0/exec";

/// Builds the exec URL for a host and port.
///
/// A host carrying its own scheme, like `https://sandbox.senx.io`, is
/// used as-is and the port is ignored; a bare host gets `http://` and
/// the port.
pub(crate) fn exec_url(host: &str, port: u16) -> String {
    if host.starts_with("http://") || host.starts_with("https://") {
        format!("{}{}", host.trim_end_matches('/'), EXEC_PATH)
    } else {
        format!("http://{}:{}{}", host, port, EXEC_PATH)
    }
}

fn header_value(response: &reqwest::blocking::Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string())
}

/// POSTs a script to the exec endpoint and returns the raw JSON stack.
///
/// One request, one connection: there is no pooling or retrying, an
/// execution is a single round trip.
pub(crate) fn exec_script(url: &str, script: &str) -> Result<Value, RustyWarpscriptError> {
    debug!("sending {} bytes of WarpScript to {}", script.len(), url);

    let client = reqwest::blocking::Client::new();
    let response = client.post(url).body(script.to_string()).send()?;

    let status = response.status();
    if !status.is_success() {
        // Warp 10 reports script failures in these headers
        let line = header_value(&response, "X-Warp10-Error-Line")
            .and_then(|line| line.parse::<u64>().ok());
        let message = header_value(&response, "X-Warp10-Error-Message")
            .unwrap_or_else(|| format!("HTTP status {}", status));
        warn!("execution failed: {}", message);
        return Err(RustyWarpscriptError::ExecError { line, message });
    }

    Ok(response.json()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exec_url() {
        assert_eq!(
            exec_url("127.0.0.1", 8080),
            "http://127.0.0.1:8080/api/v0/exec"
        );
        assert_eq!(
            exec_url("https://sandbox.senx.io", 8080),
            "https://sandbox.senx.io/api/v0/exec"
        );
        assert_eq!(
            exec_url("https://sandbox.senx.io/", 8080),
            "https://sandbox.senx.io/api/v0/exec"
        );
    }
}
