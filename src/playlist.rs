//! Playlist model: an ordered tree of SID songs and their subsongs.
//!
//! The playlist owns every node, tracks which one is actively playing, and
//! answers the next/previous queries a playback engine drives navigation
//! with. Navigation skips entries that aren't auto-playable and never wraps
//! around playlist or song boundaries; running off an end is reported as
//! `None` and the caller decides whether that means stop or loop.
//!
//! Anything visual travels outward through [`PlaylistEvent`]s; the model
//! holds no reference to a widget.

use itertools::Itertools;
use log::{debug, warn};
use std::path::{Path, PathBuf};

pub use enums::{IconId, ItemTag, ItemType, RomRequirement, RomSet};
pub use error::PlaylistError;
pub use events::PlaylistEvent;
pub use node::{
    ItemAttr, NodeKey, PlaylistNode, ACTIVE_PARENT_COLOR, UNPLAYABLE_BASIC_COLOR,
    UNPLAYABLE_ROM_COLOR,
};

mod enums;
mod error;
mod events;
mod node;

/// The playlist index: ordered main songs, each owning its subsongs.
#[derive(Debug, Default, Clone)]
pub struct Playlist {
    entries: Vec<PlaylistNode>,
    /// Currently playing node, if any. Path-keyed; see [`NodeKey`].
    active: Option<NodeKey>,
    /// Change notifications awaiting the presentation layer.
    events: Vec<PlaylistEvent>,
    /// ROM images installed on the host. Gates auto-playability.
    roms: RomSet,
    /// Start repeats from the tune's default subsong instead of the first.
    repeat_mode_default_subsong: bool,
}

impl Playlist {
    // --- Mutation

    /// Append a main song. The returned reference is valid until the next
    /// mutation; re-resolve through [`Self::get_song`] after that.
    pub fn add_song(
        &mut self,
        title: impl Into<String>,
        filepath: impl Into<PathBuf>,
        default_subsong: usize,
        duration_millis: u32,
        author: impl Into<String>,
        rom_requirement: RomRequirement,
        playable: bool,
    ) -> &PlaylistNode {
        let node = PlaylistNode::new_song(
            title,
            filepath,
            default_subsong,
            duration_millis,
            author,
            rom_requirement,
            playable,
        );
        let item = node.key();
        self.entries.push(node);
        self.events.push(PlaylistEvent::ItemAdded { parent: None, item });
        self.entries.last().expect("unreachable")
    }

    /// Append one subsong child per duration to the song at `filepath`.
    ///
    /// Children are numbered from 1 and inherit path, ROM requirement and
    /// playability from their parent; the one matching the parent's default
    /// subsong gets the indicator icon. Empty input is a no-op that emits
    /// nothing; otherwise a single batched event covers every new child.
    pub fn add_subsongs(
        &mut self,
        filepath: &Path,
        durations_millis: &[u32],
    ) -> Result<(), PlaylistError> {
        if durations_millis.is_empty() {
            return Ok(());
        }
        let Some(song) = self.entries.iter_mut().find(|song| song.filepath == filepath) else {
            return Err(PlaylistError::NotFound {
                filepath: filepath.to_path_buf(),
            });
        };

        let parent = song.key();
        let mut items = Vec::with_capacity(durations_millis.len());
        for (cnt, duration_millis) in durations_millis.iter().enumerate() {
            let index = cnt + 1;
            let mut child = PlaylistNode::new_subsong(song, index, *duration_millis);
            if song.default_subsong() == index {
                child.set_icon(IconId::DefaultSubsongIndicator);
            }
            items.push(child.key());
            song.add_child(child);
        }

        self.events.push(PlaylistEvent::ItemsAdded { parent, items });
        Ok(())
    }

    /// Remove a main song; its subsongs go with it.
    ///
    /// The active-node reference is cleared first when it points into the
    /// removed song. A miss leaves the playlist completely unchanged.
    pub fn remove_song(&mut self, filepath: &Path) -> Result<(), PlaylistError> {
        let Some(position) = self
            .entries
            .iter()
            .position(|song| song.filepath == filepath)
        else {
            warn!("remove_song: {filepath:?} is not in the playlist");
            return Err(PlaylistError::NotFound {
                filepath: filepath.to_path_buf(),
            });
        };

        if self
            .active
            .as_ref()
            .is_some_and(|active| active.filepath == filepath)
        {
            self.active = None;
        }

        let node = self.entries.remove(position);
        self.events.push(PlaylistEvent::ItemDeleted {
            parent: None,
            item: node.key(),
        });
        Ok(())
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.active = None;
        self.entries.clear();
        self.events.push(PlaylistEvent::Cleared);
        debug!("playlist cleared");
    }

    // --- Lookup

    pub const fn get_songs(&self) -> &Vec<PlaylistNode> {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First main song whose path matches exactly.
    pub fn get_song(&self, filepath: &Path) -> Option<&PlaylistNode> {
        self.entries.iter().find(|song| song.filepath == filepath)
    }

    /// Exact 1-based subsong lookup; subsong 0 means "whatever playback
    /// would actually start" and resolves through
    /// [`Self::get_effective_initial_subsong`].
    pub fn get_subsong(&self, filepath: &Path, subsong: usize) -> Option<&PlaylistNode> {
        let song = self.get_song(filepath)?;
        if subsong == 0 {
            return self.get_effective_initial_subsong(song);
        }
        song.subsong(subsong)
    }

    /// Where playback of `song` actually begins.
    ///
    /// A subsongless song stands for itself, if auto-playable. Otherwise
    /// the preferred start (the default subsong under the repeat-default
    /// option, the first subsong else) wins when auto-playable, falling
    /// back to a linear scan for the first auto-playable child.
    pub fn get_effective_initial_subsong<'a>(
        &self,
        song: &'a PlaylistNode,
    ) -> Option<&'a PlaylistNode> {
        debug_assert_eq!(song.item_type, ItemType::Song);

        if song.subsong_count() == 0 {
            if song.is_auto_playable(self.roms) {
                return Some(song);
            }
            return None;
        }

        let preferred_start = if self.repeat_mode_default_subsong {
            song.default_subsong()
        } else {
            1
        };
        if let Some(subsong) = song.subsong(preferred_start) {
            if subsong.is_auto_playable(self.roms) {
                return Some(subsong);
            }
        }

        song.subsongs()
            .iter()
            .find(|subsong| subsong.is_auto_playable(self.roms))
    }

    // --- Navigation

    /// Next auto-playable song after the active one.
    pub fn get_next_song(&self) -> Option<&PlaylistNode> {
        self.get_next_song_from(self.get_active_song()?)
    }

    /// Next auto-playable song after `from`, resolved to the subsong that
    /// would start. `None` at the end of the playlist; never wraps.
    pub fn get_next_song_from(&self, from: &PlaylistNode) -> Option<&PlaylistNode> {
        let position = self
            .entries
            .iter()
            .position(|song| song.filepath == from.filepath)?;
        let next = self.entries.get(position + 1)?;
        if next.is_auto_playable(self.roms) {
            return self.get_effective_initial_subsong(next);
        }
        self.get_next_song_from(next) // Not playable, try the one after it.
    }

    /// Previous auto-playable song before the active one.
    pub fn get_prev_song(&self) -> Option<&PlaylistNode> {
        self.get_prev_song_from(self.get_active_song()?)
    }

    pub fn get_prev_song_from(&self, from: &PlaylistNode) -> Option<&PlaylistNode> {
        let position = self
            .entries
            .iter()
            .position(|song| song.filepath == from.filepath)?;
        if position == 0 {
            return None;
        }
        let prev = &self.entries[position - 1];
        if prev.is_auto_playable(self.roms) {
            return self.get_effective_initial_subsong(prev);
        }
        self.get_prev_song_from(prev)
    }

    /// Next auto-playable subsong within the active song.
    pub fn get_next_subsong(&self) -> Option<&PlaylistNode> {
        self.get_next_subsong_from(self.get_active_song()?)
    }

    /// Strictly intra-song: hitting the last subsong gives `None`, moving
    /// to another song is the caller's explicit choice.
    pub fn get_next_subsong_from(&self, from: &PlaylistNode) -> Option<&PlaylistNode> {
        let song = self.get_song(&from.filepath)?; // Gone if removed meanwhile.
        if from.default_subsong() >= song.subsong_count() {
            return None;
        }
        let next = song.subsong(from.default_subsong() + 1)?;
        if next.is_auto_playable(self.roms) {
            return Some(next);
        }
        self.get_next_subsong_from(next)
    }

    pub fn get_prev_subsong(&self) -> Option<&PlaylistNode> {
        self.get_prev_subsong_from(self.get_active_song()?)
    }

    pub fn get_prev_subsong_from(&self, from: &PlaylistNode) -> Option<&PlaylistNode> {
        if from.default_subsong() <= 1 {
            return None;
        }
        let prev = self.get_subsong(&from.filepath, from.default_subsong() - 1)?;
        if prev.is_auto_playable(self.roms) {
            return Some(prev);
        }
        self.get_prev_subsong_from(prev)
    }

    // --- Active item

    pub fn get_active_song(&self) -> Option<&PlaylistNode> {
        self.get_node(self.active.as_ref()?)
    }

    /// Resolve a key to its node.
    pub fn get_node(&self, key: &NodeKey) -> Option<&PlaylistNode> {
        let song = self.get_song(&key.filepath)?;
        if key.subsong == 0 {
            return Some(song);
        }
        song.subsong(key.subsong)
    }

    fn get_node_mut(&mut self, key: &NodeKey) -> Option<&mut PlaylistNode> {
        let song = self
            .entries
            .iter_mut()
            .find(|song| song.filepath == key.filepath)?;
        if key.subsong == 0 {
            return Some(song);
        }
        song.subsong_mut(key.subsong)
    }

    /// Make `key` the active (playing) item.
    ///
    /// Returns false without touching any state when the node is missing or
    /// not playable. Afterwards exactly one node carries active styling,
    /// plus its parent group when the node is a subsong; the previous
    /// holder is fully cleared first.
    pub fn try_set_active_song(&mut self, key: &NodeKey, autoexpand: bool) -> bool {
        match self.get_node(key) {
            Some(node) if node.is_playable() => {}
            _ => return false,
        }

        // Handle old node
        if let Some(old_key) = self.active.take() {
            if autoexpand && old_key.subsong != 0 {
                self.events.push(PlaylistEvent::CollapseItem {
                    item: NodeKey::song(old_key.filepath.clone()),
                });
            }
            if let Some(old_node) = self.get_node_mut(&old_key) {
                old_node.reset_attr();
            }
            if old_key.subsong != 0 {
                if let Some(parent) = self.get_node_mut(&NodeKey::song(old_key.filepath.clone())) {
                    parent.reset_attr();
                }
            }
        }

        // Highlight new node
        self.active = Some(key.clone());
        if let Some(node) = self.get_node_mut(key) {
            node.attr_mut().bold = true;
        }

        // Also highlight and optionally unfold the parent group
        if key.subsong != 0 {
            let parent_key = NodeKey::song(key.filepath.clone());
            if let Some(parent) = self.get_node_mut(&parent_key) {
                let attr = parent.attr_mut();
                attr.bold = true;
                attr.color = Some(ACTIVE_PARENT_COLOR.to_owned());
            }
            if autoexpand {
                self.events.push(PlaylistEvent::ExpandItem { item: parent_key });
            }
        }

        true
    }

    // --- Tag & styling state

    /// Classify a node and restyle it accordingly.
    ///
    /// Without `force` an unplayable node keeps its tag, so automatic
    /// classification sweeps can't overwrite hard-selected items. `force`
    /// also resets styling attributes; non-forced calls leave them alone to
    /// keep active highlighting intact.
    pub fn set_item_tag(&mut self, key: &NodeKey, tag: ItemTag, force: bool) {
        // Parent's default-subsong index, for the indicator icon below.
        let parent_default = self.get_song(&key.filepath).map(PlaylistNode::default_subsong);

        let Some(node) = self.get_node_mut(key) else {
            warn!("set_item_tag: no node for {key:?}");
            return;
        };
        if !force && !node.is_playable() {
            return;
        }

        node.set_tag(tag);
        if force {
            node.reset_attr();
        }

        match tag {
            ItemTag::Normal => {
                let is_default_subsong = node.item_type == ItemType::Subsong
                    && Some(node.default_subsong()) == parent_default;
                node.set_icon(if is_default_subsong {
                    IconId::DefaultSubsongIndicator
                } else {
                    IconId::NoIcon
                });

                if node.rom_requirement != RomRequirement::None {
                    // Chip icon goes on the main/single song only.
                    if node.item_type == ItemType::Song {
                        node.set_icon(IconId::ChipIcon);
                    }
                    if !node.is_playable() {
                        let color = if node.rom_requirement == RomRequirement::BasicRom {
                            UNPLAYABLE_BASIC_COLOR
                        } else {
                            UNPLAYABLE_ROM_COLOR
                        };
                        node.mark_unplayable(color);
                    }
                }
            }
            ItemTag::ShortDuration => node.set_icon(IconId::SkipShort),
            ItemTag::Blacklisted => node.set_icon(IconId::RemoveSong),
        }

        self.events.push(PlaylistEvent::ItemChanged { item: key.clone() });
    }

    // --- Derived presentation policy

    /// The author column earns its width only when it differentiates:
    /// hidden below 2 entries or when every entry shares one author.
    pub fn should_hide_author_column(&self) -> bool {
        self.entries.len() < 2
            || self
                .entries
                .iter()
                .map(|song| song.author.as_str())
                .all_equal()
    }

    // --- Presentation signals

    /// Ask the view to unfold one song's subsong group.
    pub fn expand_song_node(&mut self, key: &NodeKey) {
        self.events.push(PlaylistEvent::ExpandItem {
            item: NodeKey::song(key.filepath.clone()),
        });
    }

    pub fn expand_all(&mut self) {
        for song in &self.entries {
            self.events.push(PlaylistEvent::ExpandItem { item: song.key() });
        }
    }

    pub fn collapse_all(&mut self) {
        for song in &self.entries {
            self.events
                .push(PlaylistEvent::CollapseItem { item: song.key() });
        }
    }

    // --- Options

    pub const fn get_roms(&self) -> RomSet {
        self.roms
    }

    /// Tell the playlist which C64 ROM images the host has.
    pub fn set_roms(&mut self, roms: RomSet) {
        self.roms = roms;
    }

    pub const fn get_repeat_mode_default_subsong(&self) -> bool {
        self.repeat_mode_default_subsong
    }

    /// Mirror of the app's "repeat mode starts from default subsong" option.
    pub fn set_repeat_mode_default_subsong(&mut self, value: bool) {
        self.repeat_mode_default_subsong = value;
    }

    // --- Events

    /// Pending change notifications, for the presentation layer to drain.
    pub fn get_event_queue(&mut self) -> &mut Vec<PlaylistEvent> {
        &mut self.events
    }
}
