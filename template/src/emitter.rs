use crate::node::{Mapping, Node};
use color_eyre::eyre::{self, eyre};

/// Indicators that can't start a plain scalar
const INDICATORS: &[char] = &[
    '-', '?', ':', ',', '[', ']', '{', '}', '#', '&', '*', '!', '|', '>', '\'', '"', '%', '@', '`',
];

/// Words a YAML 1.1 reader (PyYAML, used by the SAM CLI) resolves to null or a boolean
const YAML11_KEYWORDS: &[&str] = &[
    "~", "null", "y", "yes", "n", "no", "true", "false", "on", "off",
];

/// Write a node tree as block-style YAML
///
/// Intrinsic functions keep their short-form tags. Strings are quoted whenever a YAML 1.1 or
/// 1.2 reader could resolve them to anything but a string, e.g. `'no'` or `'2010-09-09'`.
pub(crate) fn to_yaml(root: &Node) -> eyre::Result<String> {
    let mut emitter = Emitter::default();

    match root {
        Node::Mapping(mapping) if !mapping.is_empty() => emitter.mapping(mapping, 0, false)?,
        Node::Sequence(items) if !items.is_empty() => emitter.sequence(items, 0, false)?,
        // Block scalars need content indented past the root
        node => {
            emitter.value(node, 2)?;
            emitter.out.remove(0);
        }
    }

    Ok(emitter.out)
}

#[derive(Default)]
struct Emitter {
    out: String,
}

impl Emitter {
    fn pad(&mut self, indent: usize) {
        self.out.extend(std::iter::repeat(' ').take(indent));
    }

    /// Entries of a block mapping
    ///
    /// With `is_inline` the first entry continues the current line (after "- ").
    fn mapping(&mut self, mapping: &Mapping, indent: usize, is_inline: bool) -> eyre::Result<()> {
        for (i, (key, value)) in mapping.iter().enumerate() {
            if i > 0 || !is_inline {
                self.pad(indent);
            }

            let key = key_text(key)?;
            self.out.push_str(&key);
            self.out.push(':');
            self.value(value, indent + 2)?;
        }

        Ok(())
    }

    fn sequence(&mut self, items: &[Node], indent: usize, is_inline: bool) -> eyre::Result<()> {
        for (i, item) in items.iter().enumerate() {
            if i > 0 || !is_inline {
                self.pad(indent);
            }

            self.out.push('-');

            match item {
                Node::Mapping(mapping) if !mapping.is_empty() => {
                    self.out.push(' ');
                    self.mapping(mapping, indent + 2, true)?;
                }
                Node::Sequence(items) if !items.is_empty() => {
                    self.out.push(' ');
                    self.sequence(items, indent + 2, true)?;
                }
                node => self.value(node, indent + 2)?,
            }
        }

        Ok(())
    }

    /// Value following "key:" or "-", up to and including the line break
    ///
    /// Nested collections go to the next lines at `indent`.
    fn value(&mut self, node: &Node, indent: usize) -> eyre::Result<()> {
        match node {
            Node::Mapping(mapping) if mapping.is_empty() => self.out.push_str(" {}\n"),
            Node::Sequence(items) if items.is_empty() => self.out.push_str(" []\n"),
            Node::Mapping(mapping) => {
                self.out.push('\n');
                self.mapping(mapping, indent, false)?;
            }
            Node::Sequence(items) => {
                self.out.push('\n');
                self.sequence(items, indent, false)?;
            }
            Node::Intrinsic(intrinsic) => {
                if matches!(*intrinsic.argument, Node::Intrinsic(_)) {
                    return Err(eyre!(
                        "Intrinsic function !{} can't take a short-form call as its argument",
                        intrinsic.name
                    ));
                }

                self.out.push_str(" !");
                self.out.push_str(&intrinsic.name);
                self.value(&intrinsic.argument, indent)?;
            }
            Node::String(string) if is_literal(string) => self.literal(string, indent),
            scalar => {
                self.out.push(' ');
                self.out.push_str(&scalar_text(scalar));
                self.out.push('\n');
            }
        }

        Ok(())
    }

    /// Multi-line string as a literal block, with the chomping indicator keeping the trailing line breaks
    fn literal(&mut self, string: &str, indent: usize) {
        let body = string.trim_end_matches('\n');
        let breaks = string.len() - body.len();

        self.out.push_str(match breaks {
            0 => " |-\n",
            1 => " |\n",
            _ => " |+\n",
        });

        for line in body.split('\n') {
            if !line.is_empty() {
                self.pad(indent);
                self.out.push_str(line);
            }

            self.out.push('\n');
        }

        for _ in 1..breaks {
            self.out.push('\n');
        }
    }
}

fn key_text(key: &Node) -> eyre::Result<String> {
    match key {
        Node::Mapping(_) | Node::Sequence(_) | Node::Intrinsic(_) => {
            Err(eyre!("Unsupported mapping key: {key}"))
        }
        Node::String(string) if string.contains('\n') => Ok(double_quoted(string)),
        scalar => Ok(scalar_text(scalar)),
    }
}

fn scalar_text(node: &Node) -> String {
    match node {
        Node::Null => "null".to_string(),
        Node::Bool(bool) => bool.to_string(),
        Node::Number(number) => number.to_string(),
        Node::String(string) if is_plain(string) => string.clone(),
        Node::String(string) if string.chars().any(char::is_control) => double_quoted(string),
        Node::String(string) => format!("'{}'", string.replace('\'', "''")),
        collection => collection.to_string(),
    }
}

fn double_quoted(string: &str) -> String {
    let mut quoted = String::with_capacity(string.len() + 2);
    quoted.push('"');

    for c in string.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            '\r' => quoted.push_str("\\r"),
            c if c.is_control() => quoted.push_str(&format!("\\u{:04X}", c as u32)),
            c => quoted.push(c),
        }
    }

    quoted.push('"');
    quoted
}

/// Whether a multi-line string can be written as a literal block
fn is_literal(string: &str) -> bool {
    string.contains('\n')
        && !string.starts_with([' ', '\n'])
        && !string.chars().any(|c| c.is_control() && c != '\n' && c != '\t')
}

/// Whether a string can be written without quotes and still read back as the same string
fn is_plain(string: &str) -> bool {
    !string.is_empty()
        && !string.starts_with(INDICATORS)
        && !string.starts_with("...")
        && !string.starts_with([' ', '\t'])
        && !string.ends_with([' ', '\t', ':'])
        && !string.contains(": ")
        && !string.contains(" #")
        && !string.chars().any(char::is_control)
        && !resolves_to_non_string(string)
}

/// Whether a YAML 1.1 or 1.2 reader resolves the plain scalar to null, a bool, a number or a date
fn resolves_to_non_string(string: &str) -> bool {
    let lowercase = string.to_ascii_lowercase();

    if YAML11_KEYWORDS.contains(&lowercase.as_str()) || string == "<<" || string == "=" {
        return true;
    }

    // Integers, floats, sexagesimals and dates all start with a digit, after an optional sign
    let unsigned = lowercase.trim_start_matches(['+', '-']);
    let mut chars = unsigned.chars();

    match chars.next() {
        Some(c) if c.is_ascii_digit() => true,
        Some('.') => {
            chars.next().is_some_and(|c| c.is_ascii_digit())
                || unsigned == ".inf"
                || unsigned == ".nan"
        }
        _ => false,
    }
}
