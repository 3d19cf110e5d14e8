//! Change notifications from the playlist model to a presentation layer.

use super::node::NodeKey;

/// Pushed by the playlist after each mutation, drained by whoever renders it.
///
/// Keys are plain values: the key carried by an `ItemDeleted` no longer
/// resolves by the time it is read, which is fine for tearing down a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistEvent {
    /// A main song was appended. `parent` is `None` for root-level items.
    ItemAdded {
        parent: Option<NodeKey>,
        item: NodeKey,
    },
    /// One batched notification per subsong batch, so views redraw once
    /// even for tunes with large subsong counts.
    ItemsAdded {
        parent: NodeKey,
        items: Vec<NodeKey>,
    },
    ItemDeleted {
        parent: Option<NodeKey>,
        item: NodeKey,
    },
    Cleared,
    /// Icon or styling changed on one row.
    ItemChanged { item: NodeKey },
    /// Unfold a main song's subsong group.
    ExpandItem { item: NodeKey },
    CollapseItem { item: NodeKey },
}
