use crate::datetime::{datetime_to_microseconds, duration_to_microseconds, format_date, parse_date};
use crate::duration::parse_duration;
use crate::gts::write_gts;
use crate::value::ScriptValue;

/// Collections longer than this on one line are spread over several.
const ONE_LINE_LIMIT: usize = 80;

pub(crate) fn render_string(string: &str) -> String {
    format!("'{}'", string)
}

pub(crate) fn render_double(double: f64) -> String {
    if double.is_nan() {
        "NaN".to_string()
    } else if double == f64::INFINITY {
        "Infinity".to_string()
    } else if double == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if double.fract() == 0.0 {
        // WarpScript needs the decimal point to tell a DOUBLE from a LONG
        format!("{:.1}", double)
    } else {
        double.to_string()
    }
}

/// Strings are quoted unless one of three escapes applies, in order:
/// a `ws:` prefix marks a raw WarpScript fragment, a duration becomes
/// microseconds, and a date is normalised to ISO 8601 before quoting.
fn sanitize_string(string: &str) -> String {
    if let Some(fragment) = string.strip_prefix("ws:") {
        return fragment.to_string();
    }
    if let Some(microseconds) = parse_duration(string) {
        if microseconds > 0 {
            return microseconds.to_string();
        }
    }
    if let Some(date_time) = parse_date(string) {
        return render_string(&format_date(date_time));
    }
    render_string(string)
}

fn render_collection(open: &str, close: &str, parts: Vec<String>) -> String {
    if parts.is_empty() {
        return format!("{}{}", open, close);
    }

    let one_line = format!("{} {} {}", open, parts.join(" "), close);
    if one_line.len() <= ONE_LINE_LIMIT {
        return one_line;
    }

    // One element per line, with a one-space indent
    let mut rendered = String::from(open);
    rendered.push('\n');
    for part in parts {
        rendered.push(' ');
        rendered.push_str(&part);
        rendered.push('\n');
    }
    rendered.push_str(close);
    rendered
}

/// Renders a host value as a WarpScript literal.
pub fn sanitize(value: &ScriptValue) -> String {
    match value {
        ScriptValue::Bool(true) => "TRUE".to_string(),
        ScriptValue::Bool(false) => "FALSE".to_string(),
        ScriptValue::Long(long) => long.to_string(),
        ScriptValue::Double(double) => render_double(*double),
        ScriptValue::String(string) => sanitize_string(string),
        ScriptValue::Raw(fragment) => fragment.clone(),
        ScriptValue::Timestamp(date_time) => datetime_to_microseconds(date_time).to_string(),
        ScriptValue::Duration(duration) => duration_to_microseconds(duration)
            .unwrap_or(i64::MAX)
            .to_string(),
        ScriptValue::List(elements) => {
            render_collection("[", "]", elements.iter().map(sanitize).collect())
        }
        ScriptValue::Map(entries) => render_collection(
            "{",
            "}",
            entries
                .iter()
                .map(|(key, value)| format!("{} {}", render_string(key), sanitize(value)))
                .collect(),
        ),
        ScriptValue::Gts(gts) => write_gts(gts),
    }
}
