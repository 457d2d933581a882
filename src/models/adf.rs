//! Plain-text flattening of issue descriptions.
//!
//! Jira Cloud's v3 API returns rich text as Atlassian Document Format (ADF),
//! a JSON tree of block and inline nodes. Validators work on plain text, so
//! the tree is rendered line by line: every block node ends its line, list
//! items get a `- ` or `1. ` prefix and inline marks are dropped.

use serde_json::Value;

/// Render a description field to plain text.
///
/// Plain strings (older API versions, wiki markup) pass through unchanged.
/// ADF documents are rendered; anything else yields an empty string.
pub fn description_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(_) if value.get("type").and_then(Value::as_str) == Some("doc") => {
            render_document(value)
        }
        _ => String::new(),
    }
}

fn render_document(doc: &Value) -> String {
    let mut out = String::new();
    for node in children(doc) {
        render_block(node, 0, &mut out);
    }
    out.trim_end().to_string()
}

fn children(node: &Value) -> &[Value] {
    node.get("content")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn node_type(node: &Value) -> &str {
    node.get("type").and_then(Value::as_str).unwrap_or("")
}

fn render_block(node: &Value, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);

    match node_type(node) {
        "paragraph" | "heading" => {
            out.push_str(&indent);
            out.push_str(render_inline(node).trim_end());
            out.push('\n');
        }
        "bulletList" => {
            for item in children(node) {
                render_list_item(item, depth, "- ", out);
            }
        }
        "orderedList" => {
            let first = node
                .get("attrs")
                .and_then(|a| a.get("order"))
                .and_then(Value::as_u64)
                .unwrap_or(1);
            for (offset, item) in children(node).iter().enumerate() {
                let marker = format!("{}. ", first + offset as u64);
                render_list_item(item, depth, &marker, out);
            }
        }
        "codeBlock" => {
            for line in render_inline(node).lines() {
                out.push_str(&indent);
                out.push_str(line);
                out.push('\n');
            }
        }
        "blockquote" | "panel" | "expand" | "nestedExpand" | "layoutSection" | "layoutColumn" => {
            for child in children(node) {
                render_block(child, depth, out);
            }
        }
        "rule" => out.push('\n'),
        "text" | "hardBreak" | "mention" | "emoji" | "inlineCard" | "status" | "date" => {
            out.push_str(&indent);
            out.push_str(&render_inline_node(node));
            out.push('\n');
        }
        _ => {
            let text = render_inline(node);
            if !text.trim().is_empty() {
                out.push_str(&indent);
                out.push_str(text.trim_end());
                out.push('\n');
            }
        }
    }
}

fn render_list_item(item: &Value, depth: usize, marker: &str, out: &mut String) {
    let indent = "  ".repeat(depth);
    let mut first_line = true;

    for child in children(item) {
        match node_type(child) {
            "bulletList" | "orderedList" => render_block(child, depth + 1, out),
            _ => {
                let mut block = String::new();
                render_block(child, 0, &mut block);
                for line in block.lines() {
                    out.push_str(&indent);
                    if first_line {
                        out.push_str(marker);
                        first_line = false;
                    } else {
                        out.push_str(&" ".repeat(marker.len()));
                    }
                    out.push_str(line);
                    out.push('\n');
                }
            }
        }
    }

    if first_line {
        out.push_str(&indent);
        out.push_str(marker.trim_end());
        out.push('\n');
    }
}

fn render_inline(node: &Value) -> String {
    children(node).iter().map(render_inline_node).collect()
}

fn render_inline_node(node: &Value) -> String {
    match node_type(node) {
        "text" => node
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        "hardBreak" => "\n".to_string(),
        "mention" | "emoji" | "status" => node
            .get("attrs")
            .and_then(|a| a.get("text").or_else(|| a.get("shortName")))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        "inlineCard" => node
            .get("attrs")
            .and_then(|a| a.get("url"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        _ => render_inline(node),
    }
}
