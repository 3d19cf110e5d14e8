//! Playlist tree model for a Commodore 64 SID music player.
//!
//! This crate owns the data model behind a player's playlist view: main
//! songs, the subsongs packed into their files, the currently active item,
//! and the navigation queries a playback engine uses to decide what to play
//! next. It holds no reference to any GUI toolkit; presentation layers
//! drain a change event queue instead.

pub mod playlist;

pub use playlist::{
    IconId, ItemAttr, ItemTag, ItemType, NodeKey, Playlist, PlaylistError, PlaylistEvent,
    PlaylistNode, RomRequirement, RomSet,
};
