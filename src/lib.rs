//!
//! A Rust client for [Warp 10](https://warp10.io/)'s WarpScript.
//!
//! ## Features
//!
//! - Build WarpScript programs from plain Rust values, with the quoting and
//!   formatting rules handled for you (strings, durations like `"1h"`, dates,
//!   nested lists and maps, raw `ws:` fragments).
//! - Send scripts to a Warp 10 server over its standard `/api/v0/exec`
//!   endpoint and get the stack back as Rust values.
//! - Geo Time Series come back as [`Gts`] values or flattened into a small
//!   column-oriented [`DataFrame`], labels included.
//! - Also comes with utilities to parse human durations and to map tables
//!   back into lists of GTS for upload.
//!
//! ## Why?
//!
//! Hand-writing WarpScript from another language means hand-escaping strings,
//! converting every date and duration to microseconds, and picking apart the
//! JSON the server answers with. This crate keeps all of that in one place,
//! behind a small typed API.
//!
//! ## Example
//!
//! ```rust
//! use rusty_warpscript::{ScriptValue, Warpscript};
//!
//! let mut ws = Warpscript::with_endpoint("127.0.0.1", 8080);
//! ws.call(
//!     vec![ScriptValue::map(vec![
//!         ("class", "~.*"),
//!         ("end", "2020-01-01"),
//!         ("timespan", "1h"),
//!     ])],
//!     "FETCH",
//! );
//!
//! assert_eq!(
//!     ws.warpscript(),
//!     "{ 'class' '~.*' 'end' '2020-01-01T00:00:00.000000Z' 'timespan' 3600000000 } FETCH\n"
//! );
//!
//! // And with a server running:
//! // let frame = ws.exec()?.into_single()?.to_dataframe();
//! ```

/// Tabular view of GTS results.
pub mod dataframe;
/// Date strings and microsecond conversions.
pub mod datetime;
/// Human duration strings, parsed with nom.
pub mod duration;
mod errors;
/// Geo Time Series: the JSON the server speaks, and the WarpScript to
/// rebuild one.
pub mod gts;
mod http;
/// Host value → WarpScript literal rendering.
pub mod sanitize;
/// The script builder and executor.
pub mod script;
/// Translation of the server's response stack.
pub mod stack;
/// The host value model.
pub mod value;

// Re-exports
pub use dataframe::{Cell, Column, DataFrame};
pub use errors::RustyWarpscriptError;
pub use gts::{read_gts, write_gts, Gts, GtsSample, GtsValue};
pub use sanitize::sanitize;
pub use script::Warpscript;
pub use stack::{desanitize, Stack, StackItem};
pub use value::ScriptValue;
