use std::env;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::errors::RustyWarpscriptError;
use crate::http;
use crate::sanitize::sanitize;
use crate::stack::Stack;
use crate::value::ScriptValue;

const HOST_ENV: &str = "WARP10_HOST";
const PORT_ENV: &str = "WARP10_PORT";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

/// Builds WarpScript from host values and runs it on a Warp 10 server.
///
/// The script accumulates across calls and is sent in one go by
/// [`exec`](Warpscript::exec), which clears it for the next round.
///
/// ```rust
/// use rusty_warpscript::{ScriptValue, Warpscript};
///
/// let mut ws = Warpscript::with_endpoint("127.0.0.1", 8080);
/// ws.call(
///     vec![ScriptValue::map(vec![("class", "~.*"), ("end", "2020-01-01")])],
///     "FETCH",
/// );
/// assert_eq!(
///     ws.warpscript(),
///     "{ 'class' '~.*' 'end' '2020-01-01T00:00:00.000000Z' } FETCH\n"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Warpscript {
    host: String,
    port: u16,
    script: String,
}

impl Warpscript {
    /// Creates a handle from the `WARP10_HOST` and `WARP10_PORT`
    /// environment variables, defaulting to `127.0.0.1:8080`.
    pub fn new() -> Self {
        let host = env::var(HOST_ENV).unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = env::var(PORT_ENV)
            .ok()
            .and_then(|port| port.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        Self::with_endpoint(host, port)
    }

    /// Creates a handle for an explicit host and port. The host may
    /// carry an `http://` or `https://` scheme, in which case the port
    /// is ignored.
    pub fn with_endpoint(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            script: String::new(),
        }
    }

    /// The pending script.
    pub fn warpscript(&self) -> &str {
        &self.script
    }

    /// Drops the pending script.
    pub fn reset(&mut self) -> &mut Self {
        self.script.clear();
        self
    }

    /// Appends one value to the script, on its own line.
    pub fn script(&mut self, value: impl Into<ScriptValue>) -> &mut Self {
        self.call(vec![value.into()], "")
    }

    /// Appends a bare WarpScript function call.
    pub fn op(&mut self, fun: &str) -> &mut Self {
        self.call(Vec::new(), fun)
    }

    /// Appends values followed by a function, the usual
    /// "push the arguments, call the word" WarpScript shape.
    pub fn call(&mut self, parameters: Vec<ScriptValue>, fun: &str) -> &mut Self {
        for parameter in parameters {
            self.script.push_str(&sanitize(&parameter));
            self.script.push(' ');
        }
        self.script.push_str(fun);
        self.script.push('\n');
        self
    }

    /// Appends the contents of a WarpScript file.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<&mut Self, RustyWarpscriptError> {
        let contents = fs::read_to_string(path)?;
        self.script.push_str(&contents);
        self.script.push('\n');
        Ok(self)
    }

    /// Like [`load`](Warpscript::load), but first binds values to the
    /// `$name` variables the file refers to, with `STORE`.
    pub fn load_with(
        &mut self,
        path: impl AsRef<Path>,
        parameters: Vec<(&str, ScriptValue)>,
    ) -> Result<&mut Self, RustyWarpscriptError> {
        for (name, value) in parameters {
            self.script
                .push_str(&format!("{} '{}' STORE\n", sanitize(&value), name));
        }
        self.load(path)
    }

    /// Runs the pending script on the server and translates the
    /// response. The script is cleared once it has been executed.
    pub fn exec(&mut self) -> Result<Stack, RustyWarpscriptError> {
        let stack = self.exec_keep()?;
        self.script.clear();
        Ok(stack)
    }

    /// Like [`exec`](Warpscript::exec), but keeps the script around for
    /// another execution.
    pub fn exec_keep(&mut self) -> Result<Stack, RustyWarpscriptError> {
        let url = http::exec_url(&self.host, self.port);
        let response = http::exec_script(&url, &self.script)?;
        Stack::from_json(response)
    }
}

impl Default for Warpscript {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Warpscript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Warp10 requests sent to {}\nscript: \n{}",
            http::exec_url(&self.host, self.port),
            self.script
        )
    }
}
