//! Symbolic level layouts and level packs.
//!
//! This module contains the textual level format consumed by the loader: the symbol vocabulary, a
//! single layout made of symbol rows, and the named pack grouping an ordered list of layouts,
//! including the built-in pack that is always available.

use std::{ffi::OsString, sync::LazyLock};

use color_eyre::eyre::{OptionExt as _, Result};

use crate::grid::Position;

/// File extension used by level pack files.
pub const PACK_EXTENSION: &str = ".pbpack";

/// Cell symbols of the level layout vocabulary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Symbol {
    /// Nothing placed on the cell (`.`).
    Empty,
    /// Starting cell of the agent (`P`).
    AgentStart,
    /// Starting cell of a movable block (`C`).
    MovableStart,
    /// The target cell (`A`).
    Target,
    /// An immovable wall (`#`).
    Immovable,
}

impl Symbol {
    /// Parses a layout character into a symbol, or [`None`] if it is not part of the vocabulary.
    #[must_use]
    pub const fn from_char(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(Self::Empty),
            'P' => Some(Self::AgentStart),
            'C' => Some(Self::MovableStart),
            'A' => Some(Self::Target),
            '#' => Some(Self::Immovable),
            _ => None,
        }
    }
}

/// A single level layout stored as rows of raw symbol text.
///
/// The rows are not validated here; the loader checks dimensions and vocabulary when the layout is
/// turned into a playable state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelLayout {
    /// Layout rows, top to bottom.
    rows: Vec<String>,
}

impl LevelLayout {
    /// Builds a layout from multiline text, one row per line.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            rows: text.lines().map(str::to_owned).collect(),
        }
    }

    /// Returns the layout rows.
    #[must_use]
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Iterates over every cell in row-major order together with its position.
    pub fn cells(&self) -> impl Iterator<Item = (Position, char)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, line)| {
            line.chars()
                .enumerate()
                .map(move |(col, symbol)| (Position::new(col, row), symbol))
        })
    }
}

/// Named, ordered collection of level layouts.
///
/// This structure plays the same role for level packs that a keyed entry plays in an ordered
/// hashmap: the key is shown in the level menu and the layouts are handed to the loader.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelPack {
    /// Display name of the pack.
    ///
    /// For packs read from disk this is the file name without the [`PACK_EXTENSION`].
    pub key: String,
    /// Layouts in play order.
    pub layouts: Vec<LevelLayout>,
}

impl Default for LevelPack {
    fn default() -> Self {
        Self {
            key: "Default".to_owned(),
            layouts: split_layouts(*DEFAULT_PACK),
        }
    }
}

impl LevelPack {
    /// Builds a pack from a file name and its contents.
    ///
    /// Layouts inside the contents are separated by one or more blank lines.
    ///
    /// # Errors
    ///
    /// This function may return errors if:
    /// - The `OsString` cannot be converted to a string slice
    /// - The file name doesn't contain the expected [`PACK_EXTENSION`]
    pub fn new(key: OsString, data: &str) -> Result<Self> {
        let mut file_name = key
            .to_str()
            .ok_or_eyre("failed to convert osstring to string slice")?
            .to_owned();
        file_name.truncate({
            file_name
                .rfind(PACK_EXTENSION)
                .ok_or_eyre("failed to find extension in file name")?
        });

        Ok(Self {
            key: file_name,
            layouts: split_layouts(data),
        })
    }
}

/// Splits pack text into layouts at blank lines.
fn split_layouts(data: &str) -> Vec<LevelLayout> {
    let mut layouts = Vec::new();
    let mut current = Vec::new();

    for line in data.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                layouts.push(LevelLayout {
                    rows: std::mem::take(&mut current),
                });
            }
        } else {
            current.push(line.to_owned());
        }
    }
    if !current.is_empty() {
        layouts.push(LevelLayout { rows: current });
    }

    layouts
}

/// Built-in level pack used when no pack has been chosen.
///
/// Every layout is 10×10 so it matches the default grid.
static DEFAULT_PACK: LazyLock<&str> = LazyLock::new(|| {
    "\
##########
#P.......#
#........#
#..C.....#
#........#
#......A.#
#........#
#........#
#........#
##########

##########
#P...#...#
#.##.#.C.#
#.#..#...#
#.#.C....#
#.#......#
#.####.#.#
#......#A#
#......#.#
##########

##########
##########
###....###
###.##.###
###.C..###
###..P.###
###A...###
##########
##########
##########"
});
