use std::collections::BTreeMap;

use anyhow::{Context, Result, anyhow, bail};
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use rust_embed::RustEmbed;
use serde::Deserialize;

/// Layout compiled into the binary.
pub const BUILTIN: &str = "order-service.toml";

/// Leaf value marking an empty file in layout documents.
const FILE_MARKER: &str = "file";

#[derive(RustEmbed)]
#[folder = "layouts"]
struct Layouts;

/// A node of the directory skeleton.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TreeNode {
    File,
    Directory(BTreeMap<String, TreeNode>),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NodeKind {
    File,
    Directory,
}

/// Validated skeleton: the root directory's children plus a display name.
#[derive(Clone, Debug)]
pub struct Layout {
    name: String,
    root: BTreeMap<String, TreeNode>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNode {
    Directory(BTreeMap<String, RawNode>),
    Leaf(toml::Value),
}

impl Layout {
    pub fn builtin() -> Result<Self> {
        let file = Layouts::get(BUILTIN)
            .ok_or_else(|| anyhow!("embedded layout `{}` missing", BUILTIN))?;
        let raw = std::str::from_utf8(file.data.as_ref())
            .with_context(|| format!("decoding embedded layout `{}`", BUILTIN))?;
        let name = BUILTIN.trim_end_matches(".toml");
        Self::from_toml_str(name, raw)
    }

    pub fn from_toml_str(name: &str, raw: &str) -> Result<Self> {
        let doc: BTreeMap<String, RawNode> =
            toml::from_str(raw).with_context(|| format!("parsing layout `{}`", name))?;
        let root = convert_children(Utf8Path::new(""), doc)
            .with_context(|| format!("validating layout `{}`", name))?;
        Ok(Self {
            name: name.to_owned(),
            root,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &BTreeMap<String, TreeNode> {
        &self.root
    }

    /// Every node as a path relative to the layout root, parents before children.
    pub fn paths(&self) -> Vec<(Utf8PathBuf, NodeKind)> {
        let mut out = Vec::new();
        collect_paths(Utf8Path::new(""), &self.root, &mut out);
        out
    }

    pub fn file_count(&self) -> usize {
        self.paths()
            .iter()
            .filter(|(_, kind)| *kind == NodeKind::File)
            .count()
    }

    pub fn directory_count(&self) -> usize {
        self.paths()
            .iter()
            .filter(|(_, kind)| *kind == NodeKind::Directory)
            .count()
    }
}

fn collect_paths(
    prefix: &Utf8Path,
    children: &BTreeMap<String, TreeNode>,
    out: &mut Vec<(Utf8PathBuf, NodeKind)>,
) {
    for (name, node) in children {
        let path = prefix.join(name);
        match node {
            TreeNode::File => out.push((path, NodeKind::File)),
            TreeNode::Directory(grandchildren) => {
                out.push((path.clone(), NodeKind::Directory));
                collect_paths(&path, grandchildren, out);
            }
        }
    }
}

fn convert_children(
    prefix: &Utf8Path,
    raw: BTreeMap<String, RawNode>,
) -> Result<BTreeMap<String, TreeNode>> {
    let mut children = BTreeMap::new();
    for (name, node) in raw {
        let path = prefix.join(&name);
        check_name(&name).with_context(|| format!("at `{}`", path))?;
        let node = match node {
            RawNode::Directory(grandchildren) => {
                TreeNode::Directory(convert_children(&path, grandchildren)?)
            }
            RawNode::Leaf(toml::Value::String(marker)) if marker == FILE_MARKER => TreeNode::File,
            RawNode::Leaf(other) => bail!(
                "`{}` must be a table or \"{}\", found {}",
                path,
                FILE_MARKER,
                other.type_str()
            ),
        };
        children.insert(name, node);
    }
    Ok(children)
}

/// Names must stay a single normal segment so joins never leave the base path.
fn check_name(name: &str) -> Result<()> {
    let mut components = Utf8Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Utf8Component::Normal(segment)), None) if segment == name => Ok(()),
        _ => bail!("invalid entry name {:?}", name),
    }
}
