use crate::OutputFormat;
use crate::commands::resolve::render_element_line;
use crate::util::{CliContext, CliResult, ElementSummary, to_json};
use clap::Args;
use gallery_pilot_core::ui::{UiElement, UiValue, attribute_names};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Clone)]
pub struct DumpArgs {
    #[arg(long = "xml", help = "Write the XML format read by --tree instead of --format.")]
    pub xml: bool,
    #[arg(long = "max-depth", value_name = "N", help = "Limit recursion depth (0 = top level).")]
    pub max_depth: Option<usize>,
    #[arg(long = "output", value_name = "FILE", help = "Write the dump to FILE instead of stdout.")]
    pub output: Option<PathBuf>,
}

#[derive(Serialize, Debug, PartialEq)]
struct NodeSummary {
    #[serde(flatten)]
    element: ElementSummary,
    attributes: BTreeMap<String, UiValue>,
    children: Vec<NodeSummary>,
}

pub fn run(context: &CliContext, args: &DumpArgs, format: OutputFormat) -> CliResult<String> {
    let roots = context.session.root()?.children();
    let rendered = match (args.xml, format) {
        (true, _) => render_xml(&roots, args.max_depth)?,
        (false, OutputFormat::Text) => render_text(&roots, args.max_depth),
        (false, OutputFormat::Json) => {
            let nodes: Vec<NodeSummary> =
                roots.iter().map(|root| summarize(root, 0, args.max_depth)).collect();
            to_json(&nodes)?
        }
    };

    match &args.output {
        Some(path) => {
            fs::write(path, rendered)?;
            Ok(format!("Saved tree dump to {}.", path.display()))
        }
        None => Ok(rendered),
    }
}

fn descend(depth: usize, max_depth: Option<usize>) -> bool {
    max_depth.is_none_or(|max| depth < max)
}

fn summarize(element: &Arc<dyn UiElement>, depth: usize, max_depth: Option<usize>) -> NodeSummary {
    let children = if descend(depth, max_depth) {
        element.children().iter().map(|child| summarize(child, depth + 1, max_depth)).collect()
    } else {
        Vec::new()
    };
    NodeSummary {
        element: ElementSummary::from_element(element.as_ref()),
        attributes: extra_attributes(element.as_ref()),
        children,
    }
}

/// Attributes other than the intrinsic ones already carried by [`ElementSummary`].
fn extra_attributes(element: &dyn UiElement) -> BTreeMap<String, UiValue> {
    element
        .attribute_names()
        .into_iter()
        .filter(|name| !attribute_names::INTRINSIC.contains(&name.as_str()))
        .filter_map(|name| element.attribute(&name).map(|value| (name, value)))
        .collect()
}

fn render_text(roots: &[Arc<dyn UiElement>], max_depth: Option<usize>) -> String {
    let mut output = String::new();
    for root in roots {
        write_text_node(&mut output, root, 0, max_depth);
    }
    output
}

fn write_text_node(
    output: &mut String,
    element: &Arc<dyn UiElement>,
    depth: usize,
    max_depth: Option<usize>,
) {
    let indent = "  ".repeat(depth);
    let summary = ElementSummary::from_element(element.as_ref());
    let _ = writeln!(output, "{indent}{}", render_element_line(&summary));
    for (name, value) in extra_attributes(element.as_ref()) {
        let _ = writeln!(output, "{indent}    @{name} = {value}");
    }
    if descend(depth, max_depth) {
        for child in element.children() {
            write_text_node(output, &child, depth + 1, max_depth);
        }
    }
}

fn render_xml(roots: &[Arc<dyn UiElement>], max_depth: Option<usize>) -> CliResult<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new("tree")))?;
    for root in roots {
        write_xml_node(&mut writer, root, 0, max_depth)?;
    }
    writer.write_event(Event::End(BytesEnd::new("tree")))?;
    let mut xml = String::from_utf8(writer.into_inner())?;
    xml.push('\n');
    Ok(xml)
}

fn write_xml_node(
    writer: &mut Writer<Vec<u8>>,
    element: &Arc<dyn UiElement>,
    depth: usize,
    max_depth: Option<usize>,
) -> CliResult<()> {
    let bounds = element.bounds();
    let bounds = format!("{},{},{},{}", bounds.x(), bounds.y(), bounds.width(), bounds.height());

    let mut start = BytesStart::new("node");
    start.push_attribute(("type", element.type_name()));
    if !element.object_name().is_empty() {
        start.push_attribute(("name", element.object_name()));
    }
    start.push_attribute(("id", element.runtime_id().as_str()));
    start.push_attribute(("bounds", bounds.as_str()));
    if !element.is_visible() {
        start.push_attribute(("visible", "false"));
    }

    let attributes = extra_attributes(element.as_ref());
    let children = if descend(depth, max_depth) { element.children() } else { Vec::new() };
    if attributes.is_empty() && children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for (name, value) in attributes {
        let value = match &value {
            UiValue::String(text) => text.clone(),
            other => other.to_string(),
        };
        let mut attribute = BytesStart::new("attribute");
        attribute.push_attribute(("name", name.as_str()));
        attribute.push_attribute(("value", value.as_str()));
        writer.write_event(Event::Empty(attribute))?;
    }
    for child in &children {
        write_xml_node(writer, child, depth + 1, max_depth)?;
    }
    writer.write_event(Event::End(BytesEnd::new("node")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::context;
    use crate::util::load_tree;
    use gallery_pilot_provider_mock::fixtures::{ToolbarGeneration, ids};
    use rstest::rstest;
    use tempfile::tempdir;

    fn args(xml: bool) -> DumpArgs {
        DumpArgs { xml, max_depth: None, output: None }
    }

    #[rstest]
    fn text_dump_indents_children(context: CliContext) {
        let dump = DumpArgs { max_depth: Some(1), ..args(false) };
        let output = run(&context, &dump, OutputFormat::Text).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].contains(ids::VIEW));
        assert!(lines[1].starts_with("  ") && lines[1].contains(ids::OVERVIEW));
        assert!(!output.contains(ids::TOOLBAR_CANCEL));
        assert!(output.contains("@isOpen = true"));
    }

    #[rstest]
    fn json_dump_nests_children(context: CliContext) {
        let output = run(&context, &args(false), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[0]["runtime_id"], ids::VIEW);
        assert_eq!(value[0]["children"][0]["object_name"], "overview");
    }

    #[rstest]
    fn xml_dump_loads_back(context: CliContext) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tree.xml");
        let dump = DumpArgs { output: Some(path.clone()), ..args(true) };
        let message = run(&context, &dump, OutputFormat::Json).unwrap();
        assert!(message.starts_with("Saved tree dump"));

        let reloaded = load_tree(Some(&path), ToolbarGeneration::Direct).unwrap();
        for id in ids::TOOLBAR_BUTTONS {
            assert!(reloaded.contains(id));
        }
        assert!(reloaded.contains("toolbar-loader-0"));
        let hidden = reloaded.node("album-add-photos-hidden").unwrap();
        assert!(!hidden.is_visible());
        let tab = reloaded.node(ids::ALBUMS_TAB).unwrap();
        assert_eq!(tab.attribute(attribute_names::BUTTON_INDEX), Some(UiValue::Integer(0)));
    }
}
