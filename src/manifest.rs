use std::collections::BTreeMap;

use crate::layout::{Layout, TreeNode};

fn render_children(children: &BTreeMap<String, TreeNode>, output: &mut String, depth: usize) {
    let indent = "  ".repeat(depth);

    for (name, node) in children {
        match node {
            TreeNode::Directory(grandchildren) => {
                output.push_str(&format!("{}- 📁 **{}/**\n", indent, name));
                render_children(grandchildren, output, depth + 1);
            }
            TreeNode::File => {
                output.push_str(&format!("{}- 📄 **{}**\n", indent, name));
            }
        }
    }
}

/// Markdown listing of everything `layout` would create under `root_label`.
pub fn render(layout: &Layout, root_label: &str) -> String {
    let mut output = String::from("# Directory Structure\n\n");
    output.push_str(&format!("- 📁 **{}/**\n", root_label.trim_end_matches('/')));
    render_children(layout.entries(), &mut output, 1);
    output
}
