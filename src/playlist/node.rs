//! Playlist tree entries.

use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};

use super::{
    enums::{IconId, ItemTag, ItemType, RomRequirement, RomSet},
    error::PlaylistError,
};

/// Row color for unplayable tunes missing the BASIC ROM.
pub const UNPLAYABLE_BASIC_COLOR: &str = "#054a80";
/// Row color for unplayable tunes missing any other ROM.
pub const UNPLAYABLE_ROM_COLOR: &str = "#8a5454";
/// Color applied to a main song row while one of its subsongs plays.
pub const ACTIVE_PARENT_COLOR: &str = "#0066cc";

/// Value handle to a node, path-keyed like every other playlist lookup.
///
/// `subsong == 0` addresses the main song itself. Keys survive mutations;
/// whether they still resolve afterwards is the holder's problem.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NodeKey {
    pub filepath: PathBuf,
    pub subsong: usize,
}

impl NodeKey {
    pub fn song(filepath: impl Into<PathBuf>) -> Self {
        Self {
            filepath: filepath.into(),
            subsong: 0,
        }
    }

    /// Key to a subsong. `index` is 1-based.
    pub fn subsong(filepath: impl Into<PathBuf>, index: usize) -> Self {
        Self {
            filepath: filepath.into(),
            subsong: index,
        }
    }
}

/// Row styling the presentation layer applies when drawing a node.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct ItemAttr {
    pub bold: bool,
    /// Hex row color, e.g. `"#8a5454"`. `None` draws the theme default.
    pub color: Option<String>,
    pub strikethrough: bool,
}

/// A playlist tree entry: a main song, or one of its subsongs.
///
/// Main songs own their subsong children; subsongs own nothing and carry
/// their parent's filepath, so the owner is always recoverable by path.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PlaylistNode {
    pub title: String,
    pub filepath: PathBuf,
    pub author: String,
    pub duration: Duration,
    pub item_type: ItemType,
    pub rom_requirement: RomRequirement,
    /// On a main song: 1-based index of the default subsong.
    /// On a subsong: its own 1-based index within the parent.
    default_subsong: usize,
    playable: bool,
    tag: ItemTag,
    icon: IconId,
    attr: ItemAttr,
    children: Vec<PlaylistNode>,
}

impl PlaylistNode {
    pub fn new_song(
        title: impl Into<String>,
        filepath: impl Into<PathBuf>,
        default_subsong: usize,
        duration_millis: u32,
        author: impl Into<String>,
        rom_requirement: RomRequirement,
        playable: bool,
    ) -> Self {
        Self {
            title: title.into(),
            filepath: filepath.into(),
            author: author.into(),
            duration: Duration::from_millis(u64::from(duration_millis)),
            item_type: ItemType::Song,
            rom_requirement,
            default_subsong,
            playable,
            tag: ItemTag::Normal,
            icon: IconId::NoIcon,
            attr: ItemAttr::default(),
            children: vec![],
        }
    }

    /// Subsong entry derived from its parent. `index` is 1-based.
    pub(super) fn new_subsong(parent: &Self, index: usize, duration_millis: u32) -> Self {
        Self {
            title: format!("  {}: Subsong {index}", parent.title),
            filepath: parent.filepath.clone(),
            author: String::new(),
            duration: Duration::from_millis(u64::from(duration_millis)),
            item_type: ItemType::Subsong,
            rom_requirement: parent.rom_requirement,
            default_subsong: index,
            playable: parent.playable,
            tag: ItemTag::Normal,
            icon: IconId::NoIcon,
            attr: ItemAttr::default(),
            children: vec![],
        }
    }

    /// Base capability flag. Ignores tag and ROM availability.
    pub const fn is_playable(&self) -> bool {
        self.playable
    }

    /// Eligible for automatic selection during navigation.
    pub const fn is_auto_playable(&self, roms: RomSet) -> bool {
        self.playable
            && roms.permits(self.rom_requirement)
            && !matches!(self.tag, ItemTag::Blacklisted)
    }

    pub fn subsong_count(&self) -> usize {
        self.children.len()
    }

    /// 1-based subsong lookup. Index 0 is the "effective default" sentinel
    /// resolved by the playlist, never here.
    pub fn subsong(&self, index: usize) -> Option<&Self> {
        if index == 0 {
            return None;
        }
        self.children.get(index - 1)
    }

    pub(super) fn subsong_mut(&mut self, index: usize) -> Option<&mut Self> {
        if index == 0 {
            return None;
        }
        self.children.get_mut(index - 1)
    }

    pub const fn subsongs(&self) -> &Vec<Self> {
        &self.children
    }

    pub(super) fn add_child(&mut self, child: Self) {
        self.children.push(child);
    }

    pub const fn default_subsong(&self) -> usize {
        self.default_subsong
    }

    /// Point a main song at a new default subsong. A nonzero index must
    /// reference an existing child.
    pub fn set_default_subsong(&mut self, index: usize) -> Result<(), PlaylistError> {
        debug_assert_eq!(self.item_type, ItemType::Song);
        if index != 0 && index > self.children.len() {
            return Err(PlaylistError::InvalidIndex);
        }
        self.default_subsong = index;
        Ok(())
    }

    pub const fn tag(&self) -> ItemTag {
        self.tag
    }

    pub(super) fn set_tag(&mut self, tag: ItemTag) {
        self.tag = tag;
    }

    pub const fn icon(&self) -> IconId {
        self.icon
    }

    pub(super) fn set_icon(&mut self, icon: IconId) {
        self.icon = icon;
    }

    pub const fn attr(&self) -> &ItemAttr {
        &self.attr
    }

    pub(super) fn attr_mut(&mut self) -> &mut ItemAttr {
        &mut self.attr
    }

    pub(super) fn reset_attr(&mut self) {
        self.attr = ItemAttr::default();
    }

    /// Strikethrough + ROM color on this node and every subsong under it.
    pub(super) fn mark_unplayable(&mut self, color: &str) {
        self.attr.color = Some(color.to_owned());
        self.attr.strikethrough = true;
        for subnode in &mut self.children {
            subnode.attr.color = Some(color.to_owned());
            subnode.attr.strikethrough = true;
        }
    }

    /// Path-keyed handle to this node.
    pub fn key(&self) -> NodeKey {
        match self.item_type {
            ItemType::Song => NodeKey::song(self.filepath.clone()),
            ItemType::Subsong => NodeKey::subsong(self.filepath.clone(), self.default_subsong),
        }
    }
}
