use crate::node::{Mapping, Node};

/// Functions whose long form key is the bare name, all others are prefixed with "Fn::"
const BARE_FUNCTIONS: [&str; 2] = ["Ref", "Condition"];

/// CloudFormation intrinsic function call in its short form, e.g. `!GetAtt Table.Arn`
#[derive(Debug, Clone, PartialEq)]
pub struct Intrinsic {
    /// Function name without the leading "!"
    pub name: String,
    pub argument: Box<Node>,
}

impl Intrinsic {
    pub fn new(name: impl Into<String>, argument: Node) -> Self {
        Intrinsic {
            name: name.into(),
            argument: Box::new(argument),
        }
    }

    /// Key of the single-entry mapping used by the long form of the function
    pub fn long_form_key(&self) -> String {
        if BARE_FUNCTIONS.contains(&self.name.as_str()) {
            self.name.clone()
        } else {
            format!("Fn::{}", self.name)
        }
    }

    /// Convert into the equivalent long-form mapping
    ///
    /// The short `!GetAtt Resource.Attribute` string is split into the two element list the
    /// long form expects. Nested calls in the argument are converted too.
    pub fn into_long_form(self) -> Node {
        let key = self.long_form_key();
        let Intrinsic { name, argument } = self;

        let argument = match (name.as_str(), *argument) {
            ("GetAtt", Node::String(path)) => match path.split_once('.') {
                Some((resource, attribute)) => {
                    Node::Sequence(vec![resource.into(), attribute.into()])
                }
                None => Node::String(path),
            },
            (_, argument) => argument.into_long_form(),
        };

        Node::Mapping(Mapping::from_iter([(Node::String(key), argument)]))
    }
}
