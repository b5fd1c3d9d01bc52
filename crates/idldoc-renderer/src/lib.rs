//! Markdown rendering for API entities.
//!
//! Flattens an [`Entity`] into one markdown document: overview, an optional
//! auto-generated inheritance diagram, index tables for methods, properties,
//! constants and events, then detail sections per visible member. Enums get
//! only overview plus constants.
//!
//! Rendering is pure string assembly; diagram extraction and underscore
//! escaping of the narrative text happen afterwards, when the caller runs the
//! result through `idldoc_diagrams::preprocess`. The template literals
//! (section headers, table layouts, anchors) are kept byte-identical to the
//! previous generator so the published docs do not churn.
//!
//! The docs this tool ships are written in Chinese, hence the literal section
//! headers and the `是`/`否` flag values.

use idldoc_model::{Entity, EntityKind, Member};
use idldoc_segments::escape_underscores;

/// Render one entity to markdown.
///
/// Returns `None` for [`EntityKind::Unknown`]: unrecognized kinds are
/// skipped, not errors.
#[must_use]
pub fn render_entity(entity: &Entity) -> Option<String> {
    match entity.kind {
        EntityKind::Class => Some(render_class(entity)),
        EntityKind::Enum => Some(render_enum(entity)),
        EntityKind::Unknown => None,
    }
}

fn render_class(entity: &Entity) -> String {
    let mut result = overview(entity);

    if let Some(parent) = &entity.parent {
        result.push_str(&inheritance_diagram(&entity.name, parent));
    }

    result.push_str(&methods_index(entity));
    result.push_str(&properties_index(entity));
    result.push_str(&consts_table(entity));
    result.push_str(&events_table(entity));

    result.push_str(&methods_detail(entity));
    result.push_str(&properties_detail(entity));

    result
}

fn render_enum(entity: &Entity) -> String {
    let mut result = overview(entity);

    if entity.consts.is_some() {
        result.push_str(&consts_table(entity));
    }

    result
}

fn overview(entity: &Entity) -> String {
    format!("## {}\n### 概述\n{}", encode(&entity.name), entity.desc)
}

/// Graphviz snippet drawing the inheritance edge to the parent class.
///
/// Emitted as a fenced block so the preprocess pass extracts it exactly like
/// a hand-written diagram.
fn inheritance_diagram(name: &str, parent: &str) -> String {
    format!("```graphviz\n[default_style]\n{name} -> {parent}[arrowhead = \"empty\"]```\n")
}

/// Cross-reference link to a member's anchor.
fn link(entity: &str, member: &str) -> String {
    format!("<a href=\"#{entity}_{member}\">{}</a>", encode(member))
}

/// Anchor target placed in front of a member's description.
fn anchor(entity: &str, member: &str) -> String {
    format!("<p id=\"{entity}_{member}\">")
}

/// Escape underscores in identifiers and type names placed into templates.
fn encode(s: &str) -> String {
    escape_underscores(s)
}

fn yes_no(v: bool) -> &'static str {
    if v { "是" } else { "否" }
}

fn first_line(s: &str) -> &str {
    s.split('\n').next().unwrap_or("")
}

/// Members sorted by name, byte order ascending. Private members stay in the
/// list; callers filter them where they would be displayed.
fn sorted(members: &[Member]) -> Vec<&Member> {
    let mut refs: Vec<&Member> = members.iter().collect();
    refs.sort_by(|a, b| a.name.cmp(&b.name));
    refs
}

fn methods_index(entity: &Entity) -> String {
    let Some(methods) = &entity.methods else {
        return String::new();
    };

    let mut result = String::new();
    result.push_str("### 函数\n");
    result.push_str(&anchor(&entity.name, "methods"));
    result.push_str("\n\n");
    result.push_str("| 函数名称 | 说明 | \n");
    result.push_str("| -------- | ------------ | \n");

    for method in sorted(methods) {
        if !method.is_private() {
            result.push_str(&format!(
                "| {} | {} |\n",
                link(&entity.name, &method.name),
                first_line(&method.desc)
            ));
        }
    }

    result
}

fn properties_index(entity: &Entity) -> String {
    let Some(properties) = &entity.properties else {
        return String::new();
    };

    let mut result = String::new();
    result.push_str("### 属性\n");
    result.push_str(&anchor(&entity.name, "properties"));
    result.push_str("\n\n");
    result.push_str("| 名属性称 | 类型 | 说明 | \n");
    result.push_str("| -------- | ----- | ------------ | \n");

    for property in sorted(properties) {
        if !property.is_private() {
            result.push_str(&format!(
                "| {} | {} | {} |\n",
                link(&entity.name, &property.name),
                property.type_name,
                first_line(&property.desc)
            ));
        }
    }

    result
}

fn consts_table(entity: &Entity) -> String {
    let Some(consts) = &entity.consts else {
        return String::new();
    };

    let mut result = String::new();
    result.push_str("### 常量\n");
    result.push_str(&anchor(&entity.name, "consts"));
    result.push_str("\n\n");
    result.push_str("| 名称 | 说明 | \n");
    result.push_str("| -------- | ------- | \n");

    for item in consts {
        if !item.is_private() {
            result.push_str(&format!(
                "| {} | {} |\n",
                encode(&item.name),
                encode(item.desc.trim())
            ));
        }
    }

    result
}

fn events_table(entity: &Entity) -> String {
    let Some(events) = &entity.events else {
        return String::new();
    };

    let mut result = String::new();
    result.push_str("### 事件\n");
    result.push_str(&anchor(&entity.name, "events"));
    result.push_str("\n\n");
    result.push_str("| 事件名称 | 类型  | 说明 | \n");
    result.push_str("| -------- | ----- | ------- | \n");

    for event in events {
        if !event.is_private() {
            result.push_str(&format!(
                "| {} | {} | {} |\n",
                encode(&event.name),
                encode(&event.type_name),
                encode(event.desc.trim())
            ));
        }
    }

    result
}

fn methods_detail(entity: &Entity) -> String {
    let Some(methods) = &entity.methods else {
        return String::new();
    };

    sorted(methods)
        .into_iter()
        .filter(|method| !method.is_private())
        .map(|method| method_section(entity, method))
        .collect()
}

fn method_section(entity: &Entity, method: &Member) -> String {
    let mut result = String::new();
    result.push_str(&format!("#### {} 函数\n", encode(&method.name)));
    result.push_str("-----------------------\n\n");
    result.push_str("| 参数 | 类型 | 说明 |\n");
    result.push_str("| -------- | ----- | --------- |\n");

    if let Some(ret) = &method.ret {
        result.push_str(&format!(
            "| 返回值 | {} | {} |\n",
            encode(&ret.type_name),
            encode(&ret.desc)
        ));
    }

    for param in &method.params {
        result.push_str(&format!(
            "| {} | {} | {} |\n",
            encode(&param.name),
            encode(&param.type_name),
            encode(&param.desc)
        ));
    }

    result.push_str(&format!(
        "{}{}\n\n",
        anchor(&entity.name, &method.name),
        method.desc
    ));

    result
}

fn properties_detail(entity: &Entity) -> String {
    let Some(properties) = &entity.properties else {
        return String::new();
    };

    sorted(properties)
        .into_iter()
        .filter(|property| !property.is_private())
        .map(|property| property_section(entity, property))
        .collect()
}

fn property_section(entity: &Entity, property: &Member) -> String {
    let a = &property.annotation;

    let mut result = String::new();
    result.push_str(&format!("#### {} 属性\n", encode(&property.name)));
    result.push_str("-----------------------\n");
    result.push_str(&format!(
        "{}{}\n\n",
        anchor(&entity.name, &property.name),
        property.desc
    ));
    result.push_str(&format!("* 类型：{}\n\n", encode(&property.type_name)));

    result.push_str("| 特性 | 是否支持 |\n");
    result.push_str("| -------- | ----- |\n");
    result.push_str(&format!("| 可直接读取 | {} |\n", yes_no(a.readable)));
    result.push_str(&format!("| 可直接修改 | {} |\n", yes_no(a.writable)));
    result.push_str(&format!("| 可持久化   | {} |\n", yes_no(a.persistent)));
    result.push_str(&format!(
        "| 可脚本化   | {} |\n",
        yes_no(a.scriptable.enabled())
    ));
    result.push_str(&format!("| 可在IDE中设置 | {} |\n", yes_no(a.design)));
    // The XML row reports get_prop as well: XML attributes are applied
    // through the same reflective getter path.
    result.push_str(&format!("| 可在XML中设置 | {} |\n", yes_no(a.get_prop)));
    result.push_str(&format!(
        "| 支通过widget_get_prop读取 | {} |\n",
        yes_no(a.get_prop)
    ));
    result.push_str(&format!(
        "| 支通过widget_set_prop修改 | {} |\n",
        yes_no(a.set_prop)
    ));

    result
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn entity(json: &str) -> Entity {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_unknown_kind_skipped() {
        let e = entity(r#"{"name": "x", "type": "interface", "desc": "d"}"#);
        assert!(render_entity(&e).is_none());
    }

    #[test]
    fn test_class_overview_and_parent_diagram() {
        let e = entity(
            r#"{"name": "button_t", "type": "class", "desc": "A button.\n", "parent": "widget_t"}"#,
        );
        let doc = render_entity(&e).unwrap();

        assert_eq!(
            doc,
            "## button\\_t\n### 概述\nA button.\n\
             ```graphviz\n[default_style]\nbutton_t -> widget_t[arrowhead = \"empty\"]```\n"
        );
    }

    #[test]
    fn test_methods_sorted_and_private_hidden() {
        let e = entity(
            r#"{
                "name": "c",
                "type": "class",
                "desc": "",
                "methods": [
                    {"name": "zeta", "desc": "last\nmore"},
                    {"name": "alpha", "desc": "first"},
                    {"name": "hidden", "desc": "no", "annotation": {"private": true}}
                ]
            }"#,
        );
        let doc = render_entity(&e).unwrap();

        // Index lists alpha before zeta, first line only, private missing.
        let alpha = doc.find("| <a href=\"#c_alpha\">alpha</a> | first |").unwrap();
        let zeta = doc.find("| <a href=\"#c_zeta\">zeta</a> | last |").unwrap();
        assert!(alpha < zeta);
        assert!(!doc.contains("hidden"));

        // Detail sections follow the same order.
        let alpha_detail = doc.find("#### alpha 函数").unwrap();
        let zeta_detail = doc.find("#### zeta 函数").unwrap();
        assert!(alpha_detail < zeta_detail);
    }

    #[test]
    fn test_method_section_tables() {
        let e = entity(
            r#"{
                "name": "c",
                "type": "class",
                "desc": "",
                "methods": [{
                    "name": "do_it",
                    "desc": "Does it.",
                    "return": {"type": "ret_t", "desc": "status"},
                    "params": [{"name": "self", "type": "c_t*", "desc": "object"}]
                }]
            }"#,
        );
        let doc = render_entity(&e).unwrap();

        assert!(doc.contains(
            "#### do\\_it 函数\n-----------------------\n\n\
             | 参数 | 类型 | 说明 |\n\
             | -------- | ----- | --------- |\n\
             | 返回值 | ret\\_t | status |\n\
             | self | c\\_t* | object |\n\
             <p id=\"c_do_it\">Does it.\n\n"
        ));
    }

    #[test]
    fn test_method_without_return_descriptor() {
        let e = entity(
            r#"{"name": "c", "type": "class", "desc": "",
               "methods": [{"name": "m", "desc": "d"}]}"#,
        );
        let doc = render_entity(&e).unwrap();

        assert!(!doc.contains("返回值"));
        assert!(doc.contains("#### m 函数"));
    }

    #[test]
    fn test_property_flags_table() {
        let e = entity(
            r#"{
                "name": "c",
                "type": "class",
                "desc": "",
                "properties": [{
                    "name": "x",
                    "type": "int32_t",
                    "desc": "X.",
                    "annotation": {
                        "readable": true,
                        "persitent": true,
                        "scriptable": "custom",
                        "get_prop": true
                    }
                }]
            }"#,
        );
        let doc = render_entity(&e).unwrap();

        assert!(doc.contains(
            "#### x 属性\n-----------------------\n<p id=\"c_x\">X.\n\n\
             * 类型：int32\\_t\n\n\
             | 特性 | 是否支持 |\n\
             | -------- | ----- |\n\
             | 可直接读取 | 是 |\n\
             | 可直接修改 | 否 |\n\
             | 可持久化   | 是 |\n\
             | 可脚本化   | 是 |\n\
             | 可在IDE中设置 | 否 |\n\
             | 可在XML中设置 | 是 |\n\
             | 支通过widget_get_prop读取 | 是 |\n\
             | 支通过widget_set_prop修改 | 否 |\n"
        ));
    }

    #[test]
    fn test_enum_renders_overview_and_consts_only() {
        let e = entity(
            r#"{
                "name": "align_t",
                "type": "enum",
                "desc": "Alignment.\n",
                "consts": [
                    {"name": "ALIGN_LEFT", "desc": " left \n"},
                    {"name": "ALIGN_RIGHT", "desc": "right"}
                ]
            }"#,
        );
        let doc = render_entity(&e).unwrap();

        assert_eq!(
            doc,
            "## align\\_t\n### 概述\nAlignment.\n\
             ### 常量\n<p id=\"align_t_consts\">\n\n\
             | 名称 | 说明 | \n\
             | -------- | ------- | \n\
             | ALIGN\\_LEFT | left |\n\
             | ALIGN\\_RIGHT | right |\n"
        );
    }

    #[test]
    fn test_events_table() {
        let e = entity(
            r#"{
                "name": "c",
                "type": "class",
                "desc": "",
                "events": [{"name": "EVT_CLICK", "type": "event_t", "desc": "clicked\n"}]
            }"#,
        );
        let doc = render_entity(&e).unwrap();

        assert!(doc.contains(
            "### 事件\n<p id=\"c_events\">\n\n\
             | 事件名称 | 类型  | 说明 | \n\
             | -------- | ----- | ------- | \n\
             | EVT\\_CLICK | event\\_t | clicked |\n"
        ));
    }

    #[test]
    fn test_absent_collections_emit_no_sections() {
        let e = entity(r#"{"name": "c", "type": "class", "desc": "d"}"#);
        let doc = render_entity(&e).unwrap();

        assert_eq!(doc, "## c\n### 概述\nd");
    }

    #[test]
    fn test_empty_collection_still_emits_header() {
        // An empty list is present, so the section header and table header
        // appear with no rows.
        let e = entity(r#"{"name": "c", "type": "class", "desc": "", "methods": []}"#);
        let doc = render_entity(&e).unwrap();

        assert!(doc.contains("### 函数\n<p id=\"c_methods\">\n\n"));
        assert!(doc.contains("| 函数名称 | 说明 | \n| -------- | ------------ | \n"));
    }
}
