//! Attribute values.

use toml_edit::{Array, Value};

/// The value of a rule attribute.
///
/// The variant decides how the value is merged into an existing rule:
/// string lists are replaced wholesale (sorted first for
/// [`SortedStrings`](Self::SortedStrings)) and dropped when empty, anything
/// else is replaced verbatim.
#[derive(Debug, Clone)]
pub enum AttrValue {
    /// A set of strings, kept in ascending order.
    SortedStrings(Vec<String>),
    /// A sequence of strings whose order matters.
    UnsortedStrings(Vec<String>),
    /// Any other literal or expression.
    Opaque(Value),
}

impl AttrValue {
    pub fn sorted<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::SortedStrings(items.into_iter().map(Into::into).collect())
    }

    pub fn unsorted<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::UnsortedStrings(items.into_iter().map(Into::into).collect())
    }

    /// Read a document value. String arrays become string lists, sorted or
    /// not depending on `unsorted`; everything else is opaque.
    pub fn from_toml(value: &Value, unsorted: bool) -> Self {
        if let Some(items) = string_items(value) {
            return if unsorted {
                Self::UnsortedStrings(items)
            } else {
                Self::SortedStrings(items)
            };
        }

        let mut value = value.clone();
        value.decor_mut().clear();
        Self::Opaque(value)
    }

    /// The strings of a list value.
    pub fn as_strings(&self) -> Option<&[String]> {
        match self {
            Self::SortedStrings(items) | Self::UnsortedStrings(items) => Some(items),
            Self::Opaque(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Opaque(value) => value.as_str(),
            _ => None,
        }
    }

    /// The value as it should be stored after a merge.
    ///
    /// Sorted lists come back sorted, and empty string lists come back as
    /// `None`: an attribute is removed rather than set to `[]`.
    pub fn normalized(&self) -> Option<Self> {
        match self {
            Self::SortedStrings(items) | Self::UnsortedStrings(items) if items.is_empty() => None,
            Self::SortedStrings(items) => {
                let mut items = items.clone();
                items.sort();
                Some(Self::SortedStrings(items))
            }
            Self::UnsortedStrings(_) | Self::Opaque(_) => Some(self.clone()),
        }
    }

    /// Render as a document value. Lists of more than one string are laid
    /// out one element per line.
    pub fn to_toml(&self) -> Value {
        match self {
            Self::SortedStrings(items) | Self::UnsortedStrings(items) => string_array(items),
            Self::Opaque(value) => value.clone(),
        }
    }
}

fn string_items(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|v| v.as_str().map(str::to_string))
        .collect()
}

fn string_array(items: &[String]) -> Value {
    let mut array: Array = items.iter().map(String::as_str).collect();
    if array.len() > 1 {
        for item in array.iter_mut() {
            item.decor_mut().set_prefix("\n    ");
        }
        array.set_trailing("\n");
        array.set_trailing_comma(true);
    }
    Value::Array(array)
}

fn render(value: &Value) -> String {
    let mut value = value.clone();
    value.decor_mut().clear();
    value.to_string()
}

impl PartialEq for AttrValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::SortedStrings(a), Self::SortedStrings(b)) => a == b,
            (Self::UnsortedStrings(a), Self::UnsortedStrings(b)) => a == b,
            (Self::Opaque(a), Self::Opaque(b)) => render(a) == render(b),
            _ => false,
        }
    }
}

impl From<Value> for AttrValue {
    fn from(value: Value) -> Self {
        Self::Opaque(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Opaque(Value::from(value))
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Opaque(Value::from(value))
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Opaque(Value::from(value))
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        Self::Opaque(Value::from(value))
    }
}
