use local_code_uri_template::{Node, Patch, Template, DEFAULT_CODE_URI, DEFAULT_FUNCTIONS};
use std::path::Path;

fn fixture() -> Template {
    Template::from_path(Path::new(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/template.yaml"
    )))
    .unwrap()
}

fn patched() -> Template {
    let mut template = fixture();
    Patch::default().apply(&mut template).unwrap();
    template
}

#[test]
fn both_functions_point_at_local_artifact() {
    let output: Template = patched().to_yaml().unwrap().parse().unwrap();

    for name in DEFAULT_FUNCTIONS {
        assert_eq!(
            output.properties(name).unwrap().get("CodeUri"),
            Some(&Node::from(DEFAULT_CODE_URI)),
            "{name}"
        );
    }
}

#[test]
fn only_code_uri_changes() {
    let original = fixture();
    let mut restored = patched();

    // Put the old values back, the rest of the tree must already be equal
    for name in DEFAULT_FUNCTIONS {
        let previous = original
            .properties(name)
            .unwrap()
            .get("CodeUri")
            .cloned()
            .unwrap();

        restored
            .properties_mut(name)
            .unwrap()
            .insert("CodeUri", previous);
    }

    assert_eq!(restored, original);
}

#[test]
fn output_is_stable() {
    let first = patched().to_yaml().unwrap();

    let mut again: Template = first.parse().unwrap();
    Patch::default().apply(&mut again).unwrap();

    assert_eq!(again.to_yaml().unwrap(), first);
}

#[test]
fn intrinsic_tags_survive() {
    let yaml = patched().to_yaml().unwrap();

    for tag in ["!Ref", "!Sub", "!GetAtt", "!If", "!Equals", "!Join"] {
        assert!(yaml.contains(tag), "{tag} missing from\n{yaml}");
    }

    let output: Template = yaml.parse().unwrap();
    let table_name = output.properties("FormsTable").unwrap().get("TableName").unwrap();
    let intrinsic = table_name.as_intrinsic().unwrap();

    assert_eq!(intrinsic.name, "Sub");
    assert_eq!(*intrinsic.argument, Node::from("formstack-forms-${Stage}"));
}

#[test]
fn strings_keep_quotes_for_yaml11_readers() {
    let yaml = patched().to_yaml().unwrap();

    for line in [
        "AWSTemplateFormatVersion: '2010-09-09'\n",
        "AllowedValues:\n      - 'yes'\n      - 'no'\n      - 'on'\n      - 'off'\n      - 'Y'\n      - 'N'\n",
        "Default: 'no'\n",
        "ENABLED: 'yes'\n",
        "RETENTION_DAYS: '30'\n",
        "MemorySize: 512\n",
        "CodeUri: ./target/scala-2.13/app.jar\n",
    ] {
        assert!(yaml.contains(line), "{line:?} missing from\n{yaml}");
    }
}

#[test]
fn missing_function_fails_without_output() {
    let mut template: Template = "Resources:\n  FormstackFormDeletionLambda:\n    Properties:\n      CodeUri: s3://bucket/key.zip"
        .parse()
        .unwrap();

    let error = Patch::default().apply(&mut template).unwrap_err();

    assert_eq!(
        error.to_string(),
        "No resource \"FormstackSubmissionDeletionLambda\" in the template"
    );
}

#[test]
fn lists_functions_of_the_fixture() {
    let functions = fixture().functions().unwrap();
    let names = functions.iter().map(|f| f.name.as_str()).collect::<Vec<_>>();

    assert_eq!(names, DEFAULT_FUNCTIONS);
    assert_eq!(functions[1].code_uri.as_deref(), Some("s3://bucket/key.zip"));
}
