//! File loading and validation utilities for level pack files.

use std::{
    fs::{self, DirEntry},
    path::Path,
};

use color_eyre::eyre::Result;
use log::{info, warn};

use crate::{
    grid::Grid,
    layout::{LevelPack, PACK_EXTENSION},
    loader::LevelLoader,
};

/// Scans a directory for level pack files and loads them.
///
/// This function searches `dir` for files with the [`PACK_EXTENSION`], validates every layout in
/// them against `grid`, and appends the packs that pass to `packs` sorted by key. Files that cannot
/// be read or parsed and packs with an invalid layout are skipped with a warning, so one bad file
/// does not hide the others.
///
/// # Errors
///
/// - [`std::io::Error`] if the directory itself cannot be read
pub(crate) fn fetch_packs(dir: &Path, grid: Grid, packs: &mut Vec<LevelPack>) -> Result<()> {
    let mut found = Vec::new();

    for file in fs::read_dir(dir)? {
        let file = match file {
            Ok(file) if is_pack_file(&file) => file,
            Ok(_) => continue,
            Err(err) => {
                warn!("skipping unreadable entry in {}: {err}", dir.display());
                continue;
            }
        };

        match read_pack(&file) {
            Ok(pack) if validate_pack(&pack, grid) => found.push(pack),
            Ok(_) => {}
            Err(err) => warn!("skipping level pack file {}: {err}", file.path().display()),
        }
    }

    found.sort_by(|left, right| left.key.cmp(&right.key));
    info!("found {} level packs in {}", found.len(), dir.display());
    packs.extend(found);

    Ok(())
}

/// Tells whether a directory entry looks like a level pack file.
fn is_pack_file(file: &DirEntry) -> bool {
    file.file_type().is_ok_and(|kind| !kind.is_dir())
        && file
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(PACK_EXTENSION))
}

/// Reads and parses a single level pack file.
fn read_pack(file: &DirEntry) -> Result<LevelPack> {
    let contents = fs::read_to_string(file.path())?;
    LevelPack::new(file.file_name(), &contents)
}

/// Checks that every layout of a pack loads on the given grid.
///
/// This function runs the loader over the whole pack so a pack that would fail halfway through
/// play is rejected before it is offered to the user.
pub(crate) fn validate_pack(pack: &LevelPack, grid: Grid) -> bool {
    match LevelLoader::new(grid, pack.layouts.clone()).validate_all() {
        Ok(()) => true,
        Err(err) => {
            warn!("skipping level pack {}: {err}", pack.key);
            false
        }
    }
}
