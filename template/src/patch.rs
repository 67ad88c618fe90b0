use crate::node::Node;
use crate::template::Template;
use color_eyre::eyre;

/// Function resources pointed at the local artifact unless configured otherwise
pub const DEFAULT_FUNCTIONS: [&str; 2] = [
    "FormstackFormDeletionLambda",
    "FormstackSubmissionDeletionLambda",
];

/// Local build artifact used unless configured otherwise
pub const DEFAULT_CODE_URI: &str = "./target/scala-2.13/app.jar";

/// Overwrites the CodeUri of function resources with a local path
///
/// The serverless transform does not accept intrinsic functions in a string CodeUri, so the
/// deployed template carries an S3 location object instead. Replacing it with a plain path
/// lets `sam local invoke` run the function from a local build.
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    /// Logical names of the resources to patch, in order
    pub functions: Vec<String>,

    /// Path written into each CodeUri
    pub code_uri: String,
}

impl Default for Patch {
    fn default() -> Self {
        Patch {
            functions: DEFAULT_FUNCTIONS.iter().map(|f| f.to_string()).collect(),
            code_uri: DEFAULT_CODE_URI.to_string(),
        }
    }
}

impl Patch {
    pub fn new(functions: Vec<String>, code_uri: &str) -> Self {
        Patch {
            functions,
            code_uri: code_uri.to_string(),
        }
    }

    /// Set CodeUri of every listed resource
    ///
    /// All lookups are checked before anything is changed, so on error the template is left
    /// as it was.
    pub fn apply(&self, template: &mut Template) -> eyre::Result<()> {
        for name in &self.functions {
            template.properties(name)?;
        }

        for name in &self.functions {
            let previous = template
                .properties_mut(name)?
                .insert("CodeUri", Node::String(self.code_uri.clone()));

            match previous {
                Some(previous) => log::debug!("{name}: CodeUri {previous} -> {}", self.code_uri),
                None => log::debug!("{name}: CodeUri set to {}", self.code_uri),
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = r#"
Resources:
  FormstackFormDeletionLambda:
    Type: AWS::Serverless::Function
    Properties:
      CodeUri: s3://bucket/key.zip
      Handler: handler
  FormstackSubmissionDeletionLambda:
    Type: AWS::Serverless::Function
    Properties:
      CodeUri:
        Bucket: !Ref ArtifactBucket
        Key: !Sub '${Stage}/app.jar'
"#;

    fn code_uri<'a>(template: &'a Template, name: &str) -> Option<&'a Node> {
        template.properties(name).unwrap().get("CodeUri")
    }

    #[test]
    fn replaces_any_prior_shape() {
        let mut template: Template = TEMPLATE.parse().unwrap();
        Patch::default().apply(&mut template).unwrap();

        for name in DEFAULT_FUNCTIONS {
            assert_eq!(code_uri(&template, name), Some(&Node::from(DEFAULT_CODE_URI)));
        }
    }

    #[test]
    fn keeps_property_order() {
        let mut template: Template = TEMPLATE.parse().unwrap();
        Patch::default().apply(&mut template).unwrap();

        let keys = template
            .properties("FormstackFormDeletionLambda")
            .unwrap()
            .iter()
            .filter_map(|(key, _)| key.as_str())
            .collect::<Vec<_>>();

        assert_eq!(keys, ["CodeUri", "Handler"]);
    }

    #[test]
    fn replaces_intrinsic_code_uri() {
        let mut template: Template = "Resources:\n  Fn:\n    Properties:\n      CodeUri: !Ref Uri"
            .parse()
            .unwrap();

        Patch::new(vec!["Fn".into()], "build/app.zip")
            .apply(&mut template)
            .unwrap();

        assert_eq!(code_uri(&template, "Fn"), Some(&Node::from("build/app.zip")));
    }

    #[test]
    fn adds_missing_code_uri() {
        let mut template: Template = "Resources:\n  Fn:\n    Properties:\n      Handler: main"
            .parse()
            .unwrap();

        Patch::new(vec!["Fn".into()], "build/app.zip")
            .apply(&mut template)
            .unwrap();

        assert_eq!(code_uri(&template, "Fn"), Some(&Node::from("build/app.zip")));
    }

    #[test]
    fn missing_resource_leaves_template_untouched() {
        let original: Template = TEMPLATE.parse().unwrap();
        let mut template = original.clone();

        let error = Patch::new(
            vec!["FormstackFormDeletionLambda".into(), "Missing".into()],
            DEFAULT_CODE_URI,
        )
        .apply(&mut template)
        .unwrap_err();

        assert!(error.to_string().contains("Missing"));
        assert_eq!(template, original);
    }

    #[test]
    fn applying_twice_changes_nothing() {
        let mut once: Template = TEMPLATE.parse().unwrap();
        Patch::default().apply(&mut once).unwrap();

        let mut twice = once.clone();
        Patch::default().apply(&mut twice).unwrap();

        assert_eq!(once, twice);
    }
}
