//! Model persistence: a JSON document tree mirroring the site markup.

pub mod codec;
pub mod document;
pub mod error;
pub mod tags;

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::model::{ModelGraph, NodeId};

pub use codec::{decode_node, decode_shape, encode_node, encode_shape};
pub use document::Element;
pub use error::{DecodeError, StoreError};
pub use tags::Tag;

/// Loads a model file and returns the graph with its root node.
pub fn load_model(path: impl AsRef<Path>) -> Result<(ModelGraph, NodeId), StoreError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|err| {
        if err.kind() == ErrorKind::NotFound {
            StoreError::NotFound(path.to_path_buf())
        } else {
            StoreError::Io(err)
        }
    })?;
    let doc: Element = serde_json::from_str(&text)?;
    let mut graph = ModelGraph::new();
    let root = decode_node(&doc, &mut graph)?;
    Ok((graph, root))
}

/// Writes the subtree under `root` as a pretty-printed model file.
pub fn save_model(
    path: impl AsRef<Path>,
    graph: &ModelGraph,
    root: NodeId,
) -> Result<(), StoreError> {
    let doc = encode_node(graph, root);
    let mut json = serde_json::to_string_pretty(&doc)?;
    json.push('\n');
    fs::write(path, json)?;
    Ok(())
}
