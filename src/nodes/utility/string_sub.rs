//! StringSub node: regex replacement over multi-line text

use std::iter::Peekable;
use std::str::Chars;
use regex::{Regex, RegexBuilder};
use crate::error::{Error, Result};
use crate::nodes::{DataType, NodeCategory, NodeFactory, NodeMetadata, PortDefinition};
use crate::nodes::widgets::InputConfig;
use crate::plugin_interface::{NodeData, NodeOutput};

#[derive(Default)]
pub struct StringSubNode;

impl StringSubNode {
    /// Replace every match of `pattern` in `text`; `^` and `$` match at line boundaries
    ///
    /// `to` is a backslash template: `\1` and `\g<name>` insert groups, `\n`,
    /// `\t` and the other standard escapes insert control characters, and `$`
    /// is literal.
    pub fn sub(text: &str, pattern: &str, to: &str) -> Result<String> {
        let re = RegexBuilder::new(pattern).multi_line(true).build()?;
        let template = Self::expand_template(&re, to)?;
        Ok(re.replace_all(text, template.as_str()).into_owned())
    }

    /// Rewrite a backslash template into `regex` expansion syntax
    pub fn expand_template(re: &Regex, to: &str) -> Result<String> {
        let mut out = String::with_capacity(to.len());
        let mut chars = to.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '\\' {
                push_literal(&mut out, c);
                continue;
            }
            let escape = chars.next().ok_or_else(|| invalid(to, "trailing backslash"))?;
            match escape {
                'g' => {
                    if chars.next() != Some('<') {
                        return Err(invalid(to, "missing < after \\g"));
                    }
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('>') => break,
                            Some(c) => name.push(c),
                            None => return Err(invalid(to, "missing > in group reference")),
                        }
                    }
                    push_group(re, to, &name, &mut out)?;
                }
                '0' => {
                    let digits = take_octal(&mut chars, String::from('0'), 3);
                    push_octal(to, &digits, &mut out)?;
                }
                '1'..='9' => {
                    let mut digits = String::from(escape);
                    if let Some(d) = chars.next_if(char::is_ascii_digit) {
                        digits.push(d);
                    }
                    let octal = digits.len() == 2 && digits.chars().all(|d| d.is_digit(8));
                    if octal && chars.peek().is_some_and(|d| d.is_digit(8)) {
                        let digits = take_octal(&mut chars, digits, 3);
                        push_octal(to, &digits, &mut out)?;
                    } else {
                        push_group(re, to, &digits, &mut out)?;
                    }
                }
                'n' => out.push('\n'),
                't' => out.push('\t'),
                'r' => out.push('\r'),
                'f' => out.push('\u{0c}'),
                'v' => out.push('\u{0b}'),
                'a' => out.push('\u{07}'),
                'b' => out.push('\u{08}'),
                '\\' => out.push('\\'),
                c if c.is_ascii_alphabetic() => {
                    return Err(invalid(to, &format!("bad escape \\{c}")));
                }
                c => {
                    out.push('\\');
                    push_literal(&mut out, c);
                }
            }
        }
        Ok(out)
    }
}

fn invalid(template: &str, reason: &str) -> Error {
    Error::InvalidReplacement {
        template: template.to_string(),
        reason: reason.to_string(),
    }
}

fn push_literal(out: &mut String, c: char) {
    if c == '$' {
        out.push_str("$$");
    } else {
        out.push(c);
    }
}

fn push_group(re: &Regex, template: &str, group: &str, out: &mut String) -> Result<()> {
    let known = match group.parse::<usize>() {
        Ok(index) => index < re.captures_len(),
        Err(_) => re.capture_names().flatten().any(|name| name == group),
    };
    if !known {
        return Err(invalid(template, &format!("unknown group {group:?}")));
    }
    out.push_str("${");
    out.push_str(group);
    out.push('}');
    Ok(())
}

fn take_octal(chars: &mut Peekable<Chars<'_>>, mut digits: String, max: usize) -> String {
    while digits.len() < max {
        match chars.next_if(|d| d.is_digit(8)) {
            Some(d) => digits.push(d),
            None => break,
        }
    }
    digits
}

fn push_octal(template: &str, digits: &str, out: &mut String) -> Result<()> {
    let c = u32::from_str_radix(digits, 8)
        .ok()
        .filter(|&v| v <= 0o377)
        .and_then(char::from_u32)
        .ok_or_else(|| invalid(template, &format!("octal escape \\{digits} out of range")))?;
    push_literal(out, c);
    Ok(())
}

impl NodeFactory for StringSubNode {
    fn metadata() -> NodeMetadata {
        NodeMetadata::new("StringSub", "StringSub", NodeCategory::utils(), "Substitute string.")
            .with_inputs(vec![
                PortDefinition::required("text", DataType::String)
                    .with_description("Text.")
                    .with_widget(InputConfig::new().with_default("").with_multiline(true)),
                PortDefinition::required("pattern", DataType::String)
                    .with_description("Matching regex pattern.")
                    .with_widget(InputConfig::new().with_default("")),
                PortDefinition::required("to", DataType::String)
                    .with_description("Matching text to.")
                    .with_widget(InputConfig::new().with_default("")),
            ])
            .with_outputs(vec![
                PortDefinition::required("STRING", DataType::String).with_description("A text."),
            ])
            .with_tags(vec!["string", "regex"])
    }

    fn execute(inputs: &[NodeData]) -> Result<NodeOutput> {
        let [text, pattern, to] = [0usize, 1, 2].map(|i| inputs.get(i).and_then(NodeData::as_str).unwrap_or(""));
        Ok(NodeOutput::values(vec![NodeData::String(Self::sub(text, pattern, to)?)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_sub_multiline_anchors() {
        let out = StringSubNode::sub("a\nb", "^", "- ").unwrap();
        assert_eq!(out, "- a\n- b");
    }

    #[test]
    fn test_sub_capture_groups() {
        let out = StringSubNode::sub("lora:name:0.5", r"lora:(\w+):([\d.]+)", r"\1=\2").unwrap();
        assert_eq!(out, "name=0.5");

        let out = StringSubNode::sub("ab", "(a)(b)", r"\2\1").unwrap();
        assert_eq!(out, "ba");

        let out = StringSubNode::sub("key=value", r"(?P<k>\w+)=(?P<v>\w+)", r"\g<v>:\g<k> (\g<0>)").unwrap();
        assert_eq!(out, "value:key (key=value)");
    }

    #[test]
    fn test_dollar_is_literal() {
        assert_eq!(StringSubNode::sub("price", "price", "cost $5").unwrap(), "cost $5");
        assert_eq!(StringSubNode::sub("x", "(x)", "$1").unwrap(), "$1");
    }

    #[test]
    fn test_escapes() {
        assert_eq!(StringSubNode::sub("a b", " ", r"\n").unwrap(), "a\nb");
        assert_eq!(StringSubNode::sub("a b", " ", r"\t").unwrap(), "a\tb");
        assert_eq!(StringSubNode::sub("a b", " ", r"\\").unwrap(), "a\\b");
        assert_eq!(StringSubNode::sub("a b", " ", r"\.").unwrap(), "a\\.b");
        assert_eq!(StringSubNode::sub("a b", " ", r"\044").unwrap(), "a$b");
        assert_eq!(StringSubNode::sub("a b", " ", r"\0").unwrap(), "a\0b");
    }

    #[test]
    fn test_invalid_replacement() {
        for to in [r"\2", r"\g<missing>", r"\g<1", r"\q", "\\"] {
            let err = StringSubNode::sub("ab", "(a)b", to).unwrap_err();
            assert!(matches!(err, Error::InvalidReplacement { .. }), "{to:?}");
        }
    }

    #[test]
    fn test_invalid_pattern() {
        let err = StringSubNode::sub("text", "(", "").unwrap_err();
        assert!(matches!(err, Error::InvalidPattern(_)));
    }

    #[test]
    fn test_execute() {
        let inputs = [NodeData::from("a b c"), NodeData::from(r"\s"), NodeData::from("_")];
        let output = StringSubNode::execute(&inputs).unwrap();
        assert_eq!(output.result, vec![NodeData::from("a_b_c")]);
    }
}
