//! Playlist item enums

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::fmt::Display;

/// What kind of tree entry a node is.
#[derive(Serialize_repr, Deserialize_repr, Debug, PartialEq, Eq, Default, Clone, Copy)]
#[repr(u8)]
pub enum ItemType {
    /// Top-level entry. May own subsongs.
    #[default]
    Song = 0,
    /// A numbered section within a main song's file.
    Subsong = 1,
}

/// Mutable classification of a playlist item.
///
/// Only `Blacklisted` gates auto-playability; `ShortDuration` changes
/// iconography and leaves skipping to the caller.
#[derive(Serialize_repr, Deserialize_repr, Debug, PartialEq, Eq, Default, Clone, Copy)]
#[repr(u8)]
pub enum ItemTag {
    #[default]
    Normal = 0,
    /// Runtime below the player's short-song threshold.
    ShortDuration = 1,
    /// Never picked up by automatic navigation.
    Blacklisted = 2,
}

impl TryFrom<u8> for ItemTag {
    type Error = ();

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            x if x == Self::Normal as u8 => Ok(Self::Normal),
            x if x == Self::ShortDuration as u8 => Ok(Self::ShortDuration),
            x if x == Self::Blacklisted as u8 => Ok(Self::Blacklisted),
            _ => Err(()),
        }
    }
}

/// C64 ROM image a tune needs for correct emulation.
#[derive(Serialize_repr, Deserialize_repr, Debug, PartialEq, Eq, Default, Clone, Copy)]
#[repr(u8)]
pub enum RomRequirement {
    /// Self-contained tune.
    #[default]
    None = 0,
    BasicRom = 1,
    KernalRom = 2,
    CharacterRom = 3,
}

impl Display for RomRequirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "No ROM required"),
            Self::BasicRom => write!(f, "BASIC ROM"),
            Self::KernalRom => write!(f, "Kernal ROM"),
            Self::CharacterRom => write!(f, "Character ROM"),
        }
    }
}

impl TryFrom<u8> for RomRequirement {
    type Error = ();

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            x if x == Self::None as u8 => Ok(Self::None),
            x if x == Self::BasicRom as u8 => Ok(Self::BasicRom),
            x if x == Self::KernalRom as u8 => Ok(Self::KernalRom),
            x if x == Self::CharacterRom as u8 => Ok(Self::CharacterRom),
            _ => Err(()),
        }
    }
}

/// Which ROM images the host application has installed.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RomSet {
    pub basic: bool,
    pub kernal: bool,
    pub chargen: bool,
}

impl RomSet {
    /// Can a tune with this requirement play on the host?
    pub const fn permits(self, requirement: RomRequirement) -> bool {
        match requirement {
            RomRequirement::None => true,
            RomRequirement::BasicRom => self.basic,
            RomRequirement::KernalRom => self.kernal,
            RomRequirement::CharacterRom => self.chargen,
        }
    }
}

/// Icons the presentation layer can draw on a playlist row.
#[derive(Serialize_repr, Deserialize_repr, Debug, PartialEq, Eq, Default, Clone, Copy)]
#[repr(u8)]
pub enum IconId {
    #[default]
    NoIcon = 0,
    /// Marks the subsong playback starts from.
    DefaultSubsongIndicator = 1,
    /// The tune needs a ROM image.
    ChipIcon = 2,
    SkipShort = 3,
    RemoveSong = 4,
}
