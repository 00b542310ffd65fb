use serde_json::Value;

use crate::dataframe::DataFrame;
use crate::errors::RustyWarpscriptError;
use crate::gts::{is_gts, is_lgts, read_gts, Gts};

/// One translated element of the server's stack.
#[derive(Debug, Clone, PartialEq)]
pub enum StackItem {
    /// A single Geo Time Series.
    Gts(Gts),
    /// A list of GTS, already flattened to a table.
    Table(DataFrame),
    /// A list holding anything else, translated element by element.
    List(Vec<StackItem>),
    /// Anything the translation doesn't know better about.
    Json(Value),
}

impl StackItem {
    /// The tabular view of the item, when it has one.
    pub fn to_dataframe(&self) -> Option<DataFrame> {
        match self {
            StackItem::Gts(gts) => Some(DataFrame::from_gts(gts)),
            StackItem::Table(frame) => Some(frame.clone()),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            StackItem::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_gts(&self) -> Option<&Gts> {
        match self {
            StackItem::Gts(gts) => Some(gts),
            _ => None,
        }
    }
}

/// Translates one JSON value from the server into a [`StackItem`].
///
/// A list whose elements are all GTS becomes a table, a single GTS
/// stays a GTS, other lists are translated element-wise, and everything
/// else is passed through as JSON.
pub fn desanitize(value: Value) -> StackItem {
    if is_lgts(&value) {
        if let Some(rows) = value.as_array() {
            let series = rows
                .iter()
                .map(read_gts)
                .collect::<Result<Vec<Gts>, RustyWarpscriptError>>();
            if let Ok(series) = series {
                return StackItem::Table(DataFrame::from_lgts(&series));
            }
        }
    }
    if is_gts(&value) {
        if let Ok(gts) = read_gts(&value) {
            return StackItem::Gts(gts);
        }
    }
    if let Value::Array(elements) = value {
        return StackItem::List(elements.into_iter().map(desanitize).collect());
    }
    StackItem::Json(value)
}

/// The translated response of an execution, top of stack first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Stack {
    items: Vec<StackItem>,
}

impl Stack {
    /// Translates the JSON array the exec endpoint returns.
    ///
    /// When the whole stack is a list of GTS it collapses into a single
    /// table, like a fetched list of series does.
    pub fn from_json(response: Value) -> Result<Self, RustyWarpscriptError> {
        if is_lgts(&response) {
            return Ok(Self {
                items: vec![desanitize(response)],
            });
        }
        match response {
            Value::Array(elements) => Ok(Self {
                items: elements.into_iter().map(desanitize).collect(),
            }),
            other => Err(RustyWarpscriptError::ExecError {
                line: None,
                message: format!("expected a JSON array of stack levels, got: {}", other),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[StackItem] {
        &self.items
    }

    /// Removes and returns the top of the stack.
    pub fn pop(&mut self) -> Option<StackItem> {
        if self.items.is_empty() {
            None
        } else {
            Some(self.items.remove(0))
        }
    }

    /// Consumes the stack, expecting exactly one element on it.
    pub fn into_single(mut self) -> Result<StackItem, RustyWarpscriptError> {
        if self.items.len() == 1 {
            Ok(self.items.remove(0))
        } else {
            Err(RustyWarpscriptError::NotSingular(self.items.len()))
        }
    }
}

impl IntoIterator for Stack {
    type Item = StackItem;
    type IntoIter = std::vec::IntoIter<StackItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
