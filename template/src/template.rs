use crate::emitter;
use crate::node::{Mapping, Node};
use color_eyre::eyre::{self, eyre, OptionExt, WrapErr};
use serde::Serialize;
use serde_yaml::Value;
use std::path::Path;
use std::str::FromStr;

/// Resource types holding a function whose code location can be pointed at a local artifact
pub const FUNCTION_TYPES: [&str; 2] = ["AWS::Serverless::Function", "AWS::Lambda::Function"];

/// Parsed CloudFormation (or SAM) template
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    root: Node,
}

/// A function resource found in the template
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Function {
    /// Logical name of the resource
    pub name: String,

    /// Resource type, e.g. AWS::Serverless::Function
    #[serde(rename = "type")]
    pub kind: String,

    /// Current code location (CodeUri, or Code for plain Lambda resources)
    pub code_uri: Option<String>,
}

impl FromStr for Template {
    type Err = eyre::Report;

    fn from_str(yaml: &str) -> eyre::Result<Self> {
        let value: Value = serde_yaml::from_str(yaml).wrap_err("Failed to parse template YAML")?;

        Ok(Template { root: value.into() })
    }
}

impl Template {
    /// Read and parse a template file
    pub fn from_path(path: &Path) -> eyre::Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read template {path:?}"))?;

        yaml.parse::<Template>()
            .wrap_err_with(|| format!("Invalid template {path:?}"))
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Serialize back to YAML, with intrinsic functions in their short form
    ///
    /// Strings are quoted whenever a YAML 1.1 reader, such as the one of the SAM CLI, would
    /// take them for something else.
    pub fn to_yaml(&self) -> eyre::Result<String> {
        emitter::to_yaml(&self.root).wrap_err("Failed to serialize the template")
    }

    /// The Resources section
    pub fn resources(&self) -> eyre::Result<&Mapping> {
        self.root
            .as_mapping()
            .ok_or_eyre("Template is not a YAML mapping")?
            .get("Resources")
            .ok_or_eyre("No Resources section in the template")?
            .as_mapping()
            .ok_or_eyre("Resources section is not a mapping")
    }

    fn resources_mut(&mut self) -> eyre::Result<&mut Mapping> {
        self.root
            .as_mapping_mut()
            .ok_or_eyre("Template is not a YAML mapping")?
            .get_mut("Resources")
            .ok_or_eyre("No Resources section in the template")?
            .as_mapping_mut()
            .ok_or_eyre("Resources section is not a mapping")
    }

    /// Properties of a resource
    ///
    /// The error names the lookup step which failed.
    pub fn properties(&self, name: &str) -> eyre::Result<&Mapping> {
        self.resources()?
            .get(name)
            .ok_or_else(|| eyre!("No resource {name:?} in the template"))?
            .as_mapping()
            .ok_or_else(|| eyre!("Resource {name:?} is not a mapping"))?
            .get("Properties")
            .ok_or_else(|| eyre!("Resource {name:?} has no Properties"))?
            .as_mapping()
            .ok_or_else(|| eyre!("Properties of resource {name:?} is not a mapping"))
    }

    pub fn properties_mut(&mut self, name: &str) -> eyre::Result<&mut Mapping> {
        self.resources_mut()?
            .get_mut(name)
            .ok_or_else(|| eyre!("No resource {name:?} in the template"))?
            .as_mapping_mut()
            .ok_or_else(|| eyre!("Resource {name:?} is not a mapping"))?
            .get_mut("Properties")
            .ok_or_else(|| eyre!("Resource {name:?} has no Properties"))?
            .as_mapping_mut()
            .ok_or_else(|| eyre!("Properties of resource {name:?} is not a mapping"))
    }

    /// All function resources, in the order they are defined
    pub fn functions(&self) -> eyre::Result<Vec<Function>> {
        let functions = self
            .resources()?
            .iter()
            .filter_map(|(name, resource)| {
                let resource = resource.as_mapping()?;
                let kind = resource.get("Type")?.as_str()?;

                if !FUNCTION_TYPES.contains(&kind) {
                    return None;
                }

                let code_uri = resource
                    .get("Properties")
                    .and_then(Node::as_mapping)
                    .and_then(|properties| {
                        properties
                            .get("CodeUri")
                            .or_else(|| properties.get("Code"))
                    })
                    .map(Node::to_string);

                Some(Function {
                    name: name.as_str()?.to_string(),
                    kind: kind.to_string(),
                    code_uri,
                })
            })
            .collect();

        Ok(functions)
    }

    /// Rewrite every intrinsic function into its long form
    pub fn into_long_form(&mut self) {
        let root = std::mem::replace(&mut self.root, Node::Null);
        self.root = root.into_long_form();
    }
}
