use crate::error::{CombineError, Result};
use serde::Serialize;
use serde_json::{Map, Value};

pub const DESCRIPTIONS_KEY: &str = "descriptions";
pub const ID_KEY: &str = "id";
pub const INTENDED_FOR_KEY: &str = "IntendedFor";

/// A dcm2bids config: shared top-level parameters plus an ordered description list.
///
/// Serializes as a single mapping with the parameters first (in the order they
/// were read) followed by the `descriptions` key.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    #[serde(flatten)]
    pub parameters: Map<String, Value>,
    pub descriptions: Vec<Description>,
}

impl Document {
    pub fn new(parameters: Map<String, Value>, descriptions: Vec<Description>) -> Self {
        Self {
            parameters,
            descriptions,
        }
    }

    /// Build a document from a decoded tree, checking only its shape.
    /// A missing or null `descriptions` field reads as an empty list.
    pub fn from_value(value: Value) -> Result<Self> {
        let mut fields = match value {
            Value::Object(fields) => fields,
            other => {
                return Err(CombineError::InvalidDocument(format!(
                    "expected a mapping at the top level, found {}",
                    kind_of(&other)
                )))
            }
        };

        let descriptions = match fields.shift_remove(DESCRIPTIONS_KEY) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .into_iter()
                .enumerate()
                .map(|(idx, item)| match item {
                    Value::Object(map) => Ok(Description::new(map)),
                    other => Err(CombineError::InvalidDocument(format!(
                        "descriptions[{}] must be a mapping, found {}",
                        idx,
                        kind_of(&other)
                    ))),
                })
                .collect::<Result<Vec<_>>>()?,
            Some(other) => {
                return Err(CombineError::InvalidDocument(format!(
                    "descriptions must be a list, found {}",
                    kind_of(&other)
                )))
            }
        };

        Ok(Self {
            parameters: fields,
            descriptions,
        })
    }

    pub fn to_value(&self) -> Value {
        let mut out = self.parameters.clone();
        out.insert(
            DESCRIPTIONS_KEY.to_string(),
            Value::Array(
                self.descriptions
                    .iter()
                    .map(|d| Value::Object(d.fields().clone()))
                    .collect(),
            ),
        );
        Value::Object(out)
    }
}

/// One acquisition-matching rule. Fields are kept as-is and in their original order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Description(Map<String, Value>);

impl Description {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The description's `id` when it is a string; other shapes are not identifiers.
    pub fn id(&self) -> Option<&str> {
        self.0.get(ID_KEY).and_then(Value::as_str)
    }

    pub fn intended_for(&self) -> Result<Option<IntendedFor>> {
        match self.0.get(INTENDED_FOR_KEY) {
            None => Ok(None),
            Some(value) => IntendedFor::from_value(value),
        }
    }

    /// Replace `IntendedFor` in place, keeping its position among the other fields.
    pub fn set_intended_for(&mut self, intended_for: IntendedFor) {
        self.0
            .insert(INTENDED_FOR_KEY.to_string(), intended_for.into_value());
    }
}

/// A single `IntendedFor` target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    /// Zero-based position in the originating document's description list
    Index(i64),
    /// Opaque description id
    Id(String),
}

impl Reference {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Reference::Id(s.clone())),
            Value::Number(n) => n.as_i64().map(Reference::Index),
            _ => None,
        }
    }

    /// Shift an index by `offset`, failing instead of wrapping past `i64` bounds.
    pub fn offset(self, offset: i64) -> Result<Self> {
        match self {
            Reference::Index(idx) => idx
                .checked_add(offset)
                .map(Reference::Index)
                .ok_or(CombineError::IndexOverflow { index: idx, offset }),
            id @ Reference::Id(_) => Ok(id),
        }
    }

    fn into_value(self) -> Value {
        match self {
            Reference::Index(idx) => Value::from(idx),
            Reference::Id(id) => Value::String(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntendedFor {
    Single(Reference),
    Many(Vec<Reference>),
}

impl IntendedFor {
    /// Tag-check an arbitrary value. `null` is treated as absent.
    pub fn from_value(value: &Value) -> Result<Option<Self>> {
        match value {
            Value::Null => Ok(None),
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    Reference::from_value(item).ok_or_else(|| {
                        CombineError::InvalidIntendedForElement {
                            value: item.clone(),
                        }
                    })
                })
                .collect::<Result<Vec<_>>>()
                .map(|refs| Some(IntendedFor::Many(refs))),
            other => Reference::from_value(other)
                .map(|r| Some(IntendedFor::Single(r)))
                .ok_or_else(|| CombineError::InvalidIntendedFor {
                    value: other.clone(),
                }),
        }
    }

    /// Shift every index by `offset`; ids pass through untouched.
    pub fn offset(self, offset: i64) -> Result<Self> {
        match self {
            IntendedFor::Single(r) => r.offset(offset).map(IntendedFor::Single),
            IntendedFor::Many(refs) => refs
                .into_iter()
                .map(|r| r.offset(offset))
                .collect::<Result<Vec<_>>>()
                .map(IntendedFor::Many),
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            IntendedFor::Single(r) => r.into_value(),
            IntendedFor::Many(refs) => {
                Value::Array(refs.into_iter().map(Reference::into_value).collect())
            }
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
