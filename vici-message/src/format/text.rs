use crate::message::{Element, Message};

/// Format a message as indented text in the style of swanctl output.
pub fn format_text(message: &Message) -> String {
    let mut lines = Vec::new();
    push_section(&mut lines, message, 0);
    lines.join("\n")
}

fn push_section(lines: &mut Vec<String>, message: &Message, depth: usize) {
    let indent = "  ".repeat(depth);
    for (key, element) in message {
        match element {
            Element::Value(value) => lines.push(format!("{indent}{key} = {value}")),
            Element::List(items) => lines.push(format!("{indent}{key} = [{}]", items.join(", "))),
            Element::Section(section) if section.is_empty() => {
                lines.push(format!("{indent}{key} {{}}"));
            }
            Element::Section(section) => {
                lines.push(format!("{indent}{key} {{"));
                push_section(lines, section, depth + 1);
                lines.push(format!("{indent}}}"));
            }
        }
    }
}

/// Format element counts of a message, nested sections included.
pub fn format_summary(message: &Message) -> String {
    let mut sections = 0;
    let mut values = 0;
    let mut lists = 0;
    count(message, &mut sections, &mut values, &mut lists);

    format!("sections={sections} values={values} lists={lists}")
}

fn count(message: &Message, sections: &mut usize, values: &mut usize, lists: &mut usize) {
    for (_, element) in message {
        match element {
            Element::Value(_) => *values += 1,
            Element::List(_) => *lists += 1,
            Element::Section(section) => {
                *sections += 1;
                count(section, sections, values, lists);
            }
        }
    }
}
