use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

use crate::errors::RustyWarpscriptError;
use crate::sanitize::{render_double, render_string};

/// The value of a single GTS sample.
///
/// Warp 10 series hold longs, doubles, booleans or strings.
#[derive(Debug, Clone, PartialEq)]
pub enum GtsValue {
    Long(i64),
    Double(f64),
    Bool(bool),
    String(String),
}

/// One sample of a Geo Time Series.
///
/// The timestamp is in microseconds since the Unix epoch, Warp 10's
/// default time unit. The geo components are optional: the server only
/// sends them when the series carries locations or elevations.
#[derive(Debug, Clone, PartialEq)]
pub struct GtsSample {
    pub timestamp: i64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<i64>,
    pub value: GtsValue,
}

impl GtsSample {
    /// Creates a sample without geo components.
    pub fn new(timestamp: i64, value: GtsValue) -> Self {
        Self {
            timestamp,
            latitude: None,
            longitude: None,
            elevation: None,
            value,
        }
    }
}

/// A Geo Time Series, the unit of data in Warp 10.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Gts {
    pub classname: String,
    pub labels: BTreeMap<String, String>,
    pub attributes: BTreeMap<String, String>,
    pub samples: Vec<GtsSample>,
}

impl Gts {
    /// Creates an empty GTS with the given classname.
    pub fn new(classname: impl Into<String>) -> Self {
        Self {
            classname: classname.into(),
            ..Default::default()
        }
    }

    /// Adds a label, consuming and returning the GTS for chaining.
    pub fn with_label(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(name.into(), value.into());
        self
    }

    /// The highest timestamp of the series, if any.
    pub fn last_timestamp(&self) -> Option<i64> {
        self.samples.iter().map(|sample| sample.timestamp).max()
    }

    /// True when at least one sample carries a location or an elevation.
    pub fn has_geo(&self) -> bool {
        self.samples.iter().any(|sample| {
            sample.latitude.is_some() || sample.longitude.is_some() || sample.elevation.is_some()
        })
    }
}

/// Checks whether a JSON value has the shape of a GTS.
///
/// The exec endpoint encodes a GTS as an object with keys among
/// `c`, `l`, `a`, `la` and `v`, where `c`, `l` and `v` are mandatory.
pub fn is_gts(value: &Value) -> bool {
    let object = match value.as_object() {
        Some(object) => object,
        None => return false,
    };
    for key in ["c", "l", "v"] {
        if !object.contains_key(key) {
            return false;
        }
    }
    object
        .keys()
        .all(|key| ["c", "l", "a", "la", "v"].contains(&key.as_str()))
}

/// Checks whether a JSON value is a non-empty list of GTS.
pub fn is_lgts(value: &Value) -> bool {
    match value.as_array() {
        Some(elements) if !elements.is_empty() => elements.iter().all(is_gts),
        _ => false,
    }
}

fn read_string_map(value: Option<&Value>) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    if let Some(Value::Object(entries)) = value {
        for (key, entry) in entries {
            if let Some(entry) = entry.as_str() {
                map.insert(key.clone(), entry.to_string());
            }
        }
    }
    map
}

fn read_gts_value(value: &Value) -> Result<GtsValue, RustyWarpscriptError> {
    match value {
        Value::Bool(b) => Ok(GtsValue::Bool(*b)),
        Value::String(s) => Ok(GtsValue::String(s.clone())),
        Value::Number(number) => {
            if let Some(long) = number.as_i64() {
                Ok(GtsValue::Long(long))
            } else {
                Ok(GtsValue::Double(number.as_f64().unwrap_or(f64::NAN)))
            }
        }
        other => Err(RustyWarpscriptError::NotAGts(format!(
            "unsupported sample value: {}",
            other
        ))),
    }
}

fn read_f64(value: &Value) -> Result<f64, RustyWarpscriptError> {
    value
        .as_f64()
        .ok_or_else(|| RustyWarpscriptError::NotAGts(format!("not a number: {}", value)))
}

/// Reads one row of the `v` array.
///
/// Depending on what the series stores, a row is `[ts, value]`,
/// `[ts, elev, value]`, `[ts, lat, lon, value]` or
/// `[ts, lat, lon, elev, value]`.
fn read_gts_sample(row: &Value) -> Result<GtsSample, RustyWarpscriptError> {
    let row = row
        .as_array()
        .ok_or_else(|| RustyWarpscriptError::NotAGts(format!("not a sample row: {}", row)))?;

    let timestamp = row
        .first()
        .and_then(Value::as_i64)
        .ok_or_else(|| RustyWarpscriptError::NotAGts("missing timestamp".to_string()))?;
    let value = read_gts_value(
        row.last()
            .ok_or_else(|| RustyWarpscriptError::NotAGts("missing sample value".to_string()))?,
    )?;

    let mut sample = GtsSample::new(timestamp, value);
    match row.len() {
        2 => {}
        3 => {
            sample.elevation = row[1].as_i64();
        }
        4 => {
            sample.latitude = Some(read_f64(&row[1])?);
            sample.longitude = Some(read_f64(&row[2])?);
        }
        5 => {
            sample.latitude = Some(read_f64(&row[1])?);
            sample.longitude = Some(read_f64(&row[2])?);
            sample.elevation = row[3].as_i64();
        }
        n => {
            return Err(RustyWarpscriptError::NotAGts(format!(
                "unexpected sample row of {} elements",
                n
            )));
        }
    }
    Ok(sample)
}

/// Reads a GTS from the JSON the exec endpoint returns.
pub fn read_gts(value: &Value) -> Result<Gts, RustyWarpscriptError> {
    if !is_gts(value) {
        return Err(RustyWarpscriptError::NotAGts(format!(
            "keys don't match a GTS: {}",
            value
        )));
    }

    let classname = value["c"].as_str().unwrap_or_default().to_string();
    let labels = read_string_map(value.get("l"));
    let attributes = read_string_map(value.get("a"));

    let rows = value["v"]
        .as_array()
        .ok_or_else(|| RustyWarpscriptError::NotAGts("`v` is not an array".to_string()))?;
    let samples = rows
        .iter()
        .map(read_gts_sample)
        .collect::<Result<Vec<GtsSample>, RustyWarpscriptError>>()?;

    Ok(Gts {
        classname,
        labels,
        attributes,
        samples,
    })
}

fn render_gts_value(value: &GtsValue) -> String {
    match value {
        GtsValue::Long(long) => long.to_string(),
        GtsValue::Double(double) => render_double(*double),
        GtsValue::Bool(true) => "TRUE".to_string(),
        GtsValue::Bool(false) => "FALSE".to_string(),
        GtsValue::String(string) => render_string(string),
    }
}

/// Renders a GTS as the WarpScript that rebuilds it on the server.
///
/// `ADDVALUE` takes `tick lat lon elev value`; absent geo components
/// become `NaN`.
pub fn write_gts(gts: &Gts) -> String {
    let mut script = format!("NEWGTS {} RENAME", render_string(&gts.classname));
    if !gts.labels.is_empty() {
        script.push(' ');
        script.push_str(&render_string_map(&gts.labels));
        script.push_str(" RELABEL");
    }
    if !gts.attributes.is_empty() {
        script.push(' ');
        script.push_str(&render_string_map(&gts.attributes));
        script.push_str(" SETATTRIBUTES");
    }
    for sample in &gts.samples {
        script.push('\n');
        script.push_str(&format!(
            "{} {} {} {} {} ADDVALUE",
            sample.timestamp,
            sample
                .latitude
                .map_or_else(|| "NaN".to_string(), render_double),
            sample
                .longitude
                .map_or_else(|| "NaN".to_string(), render_double),
            sample
                .elevation
                .map_or_else(|| "NaN".to_string(), |elevation| elevation.to_string()),
            render_gts_value(&sample.value),
        ));
    }
    script
}

fn render_string_map(map: &BTreeMap<String, String>) -> String {
    let mut rendered = String::from("{");
    for (key, value) in map {
        rendered.push_str(&format!(" {} {}", render_string(key), render_string(value)));
    }
    rendered.push_str(" }");
    rendered
}

impl fmt::Display for Gts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.classname.is_empty() {
            writeln!(f, "name      : {}", self.classname)?;
        }
        if !self.labels.is_empty() {
            writeln!(f, "labels    :")?;
            for (key, value) in &self.labels {
                writeln!(f, "  {}={}", key, value)?;
            }
        }
        if !self.attributes.is_empty() {
            writeln!(f, "attributes:")?;
            for (key, value) in &self.attributes {
                writeln!(f, "  {}={}", key, value)?;
            }
        }
        if self.samples.is_empty() {
            write!(f, "Empty GTS")
        } else {
            write!(f, "{} samples", self.samples.len())
        }
    }
}
