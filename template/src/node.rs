use crate::intrinsic::Intrinsic;
use serde_yaml::value::TaggedValue;
use serde_yaml::{Number, Value};
use std::fmt::Display;

/// A node of a parsed template
///
/// Mirrors the YAML value tree, except that tagged values are always intrinsic function calls,
/// so that they can be written back in their short form.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Sequence(Vec<Node>),
    Mapping(Mapping),

    /// Short-form intrinsic function call, e.g. `!Ref Bucket`
    Intrinsic(Intrinsic),
}

impl Node {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(string) => Some(string),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Node::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    pub fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            Node::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    pub fn as_intrinsic(&self) -> Option<&Intrinsic> {
        match self {
            Node::Intrinsic(intrinsic) => Some(intrinsic),
            _ => None,
        }
    }

    /// Rewrite all intrinsic calls in the subtree into their long form
    ///
    /// `!Ref Bucket` becomes `{Ref: Bucket}`, `!Sub ...` becomes `{Fn::Sub: ...}`.
    pub fn into_long_form(self) -> Node {
        match self {
            Node::Sequence(items) => {
                Node::Sequence(items.into_iter().map(Node::into_long_form).collect())
            }
            Node::Mapping(mapping) => Node::Mapping(
                mapping
                    .into_iter()
                    .map(|(key, value)| (key.into_long_form(), value.into_long_form()))
                    .collect(),
            ),
            Node::Intrinsic(intrinsic) => intrinsic.into_long_form(),
            scalar => scalar,
        }
    }
}

impl From<&str> for Node {
    fn from(string: &str) -> Self {
        Node::String(string.to_string())
    }
}

impl From<String> for Node {
    fn from(string: String) -> Self {
        Node::String(string)
    }
}

impl From<Intrinsic> for Node {
    fn from(intrinsic: Intrinsic) -> Self {
        Node::Intrinsic(intrinsic)
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Node::Null,
            Value::Bool(bool) => Node::Bool(bool),
            Value::Number(number) => Node::Number(number),
            Value::String(string) => Node::String(string),
            Value::Sequence(items) => Node::Sequence(items.into_iter().map(Node::from).collect()),
            Value::Mapping(mapping) => Node::Mapping(
                mapping
                    .into_iter()
                    .map(|(key, value)| (Node::from(key), Node::from(value)))
                    .collect(),
            ),
            Value::Tagged(tagged) => {
                let TaggedValue { tag, value } = *tagged;

                // Tag displays with the leading "!"
                let name = tag.to_string().trim_start_matches('!').to_string();
                Node::Intrinsic(Intrinsic::new(name, Node::from(value)))
            }
        }
    }
}

/// Compact, flow-style rendering, used to show a value in a single table cell
impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Null => write!(f, "~"),
            Node::Bool(bool) => write!(f, "{bool}"),
            Node::Number(number) => write!(f, "{number}"),
            Node::String(string) => write!(f, "{string}"),
            Node::Sequence(items) => {
                let items = items.iter().map(Node::to_string).collect::<Vec<_>>();
                write!(f, "[{}]", items.join(", "))
            }
            Node::Mapping(mapping) => {
                let entries = mapping
                    .iter()
                    .map(|(key, value)| format!("{key}: {value}"))
                    .collect::<Vec<_>>();

                write!(f, "{{{}}}", entries.join(", "))
            }
            Node::Intrinsic(intrinsic) => write!(f, "!{} {}", intrinsic.name, intrinsic.argument),
        }
    }
}

/// Ordered YAML mapping
///
/// Entries keep the order they were parsed or inserted in, so a patched template is written
/// back with its original layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    entries: Vec<(Node, Node)>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value under a string key
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == Some(key))
            .map(|(_, value)| value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k.as_str() == Some(key))
            .map(|(_, value)| value)
    }

    /// Set the value of a key
    ///
    /// An existing key keeps its position and the previous value is returned,
    /// a new key is appended at the end.
    pub fn insert(&mut self, key: impl Into<Node>, value: Node) -> Option<Node> {
        let key = key.into();

        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Node, &Node)> {
        self.entries.iter().map(|(key, value)| (key, value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(Node, Node)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (Node, Node)>>(iter: I) -> Self {
        Mapping {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Mapping {
    type Item = (Node, Node);
    type IntoIter = std::vec::IntoIter<(Node, Node)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
