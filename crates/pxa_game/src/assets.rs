//! Named image and sound lookup.
//!
//! Assets are produced offline into three folders under an asset root:
//! `images/<name>.png`, `sounds/<name>.wav` and `music/<name>.wav`. The store
//! scans those folders once at startup. Any image that is missing resolves
//! to a built-in placeholder (fixed size, solid tint) so the simulation never
//! fails on an absent file.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec2;

pub const IMAGES_DIR: &str = "images";
pub const SOUNDS_DIR: &str = "sounds";
pub const MUSIC_DIR: &str = "music";

/// Suffix of the mirrored variant of a player frame.
pub const LEFT_SUFFIX: &str = "_left";

/// Resolves the pixel size of a named image.
pub trait ImageCatalog {
    fn image_size(&self, name: &str) -> Vec2;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placeholder {
    pub size: Vec2,
    /// Linear RGBA multiplied into a white texel.
    pub tint: [f32; 4],
}

pub fn placeholder_for(name: &str) -> Placeholder {
    let base = name.strip_suffix(LEFT_SUFFIX).unwrap_or(name);
    let (w, h, tint) = if base.starts_with("hero") {
        (32.0, 32.0, [0.0, 0.0, 0.8, 1.0])
    } else if base.starts_with("enemy") {
        (30.0, 30.0, [0.8, 0.0, 0.0, 1.0])
    } else if base == "block" {
        (50.0, 50.0, [0.4, 1.0, 0.4, 1.0])
    } else if base == "btn_start" {
        (200.0, 50.0, [0.2, 0.8, 0.2, 1.0])
    } else if base == "btn_sound" {
        (200.0, 50.0, [0.2, 0.2, 0.9, 1.0])
    } else if base == "btn_exit" {
        (200.0, 50.0, [0.9, 0.2, 0.2, 1.0])
    } else {
        (32.0, 32.0, [1.0, 0.0, 1.0, 1.0])
    };
    Placeholder {
        size: Vec2::new(w, h),
        tint,
    }
}

/// Catalog backed only by the placeholder table.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderCatalog;

impl ImageCatalog for PlaceholderCatalog {
    fn image_size(&self, name: &str) -> Vec2 {
        placeholder_for(name).size
    }
}

#[derive(Debug, Clone)]
struct ImageEntry {
    path: PathBuf,
    size: Vec2,
}

#[derive(Debug, Default)]
pub struct AssetStore {
    images: HashMap<String, ImageEntry>,
    sounds: HashMap<String, PathBuf>,
    music: HashMap<String, PathBuf>,
}

impl AssetStore {
    pub fn open(root: &Path) -> Self {
        let mut images = HashMap::new();
        for (name, path) in scan_dir(&root.join(IMAGES_DIR), "png") {
            match image::image_dimensions(&path) {
                Ok((w, h)) => {
                    images.insert(
                        name,
                        ImageEntry {
                            path,
                            size: Vec2::new(w as f32, h as f32),
                        },
                    );
                }
                Err(err) => {
                    log::warn!("Skipping unreadable image '{}': {err}", path.display());
                }
            }
        }
        let sounds: HashMap<_, _> = scan_dir(&root.join(SOUNDS_DIR), "wav").into_iter().collect();
        let music: HashMap<_, _> = scan_dir(&root.join(MUSIC_DIR), "wav").into_iter().collect();

        log::info!(
            "Asset store '{}': {} images, {} sounds, {} music tracks",
            root.display(),
            images.len(),
            sounds.len(),
            music.len()
        );

        Self {
            images,
            sounds,
            music,
        }
    }

    pub fn has_image(&self, name: &str) -> bool {
        self.images.contains_key(name)
    }

    pub fn image_path(&self, name: &str) -> Option<&Path> {
        self.images.get(name).map(|e| e.path.as_path())
    }

    pub fn sound_path(&self, name: &str) -> Option<&Path> {
        self.sounds.get(name).map(PathBuf::as_path)
    }

    pub fn music_path(&self, name: &str) -> Option<&Path> {
        self.music.get(name).map(PathBuf::as_path)
    }

    pub fn sounds(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.sounds.iter().map(|(k, v)| (k.as_str(), v.as_path()))
    }

    pub fn music_tracks(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.music.iter().map(|(k, v)| (k.as_str(), v.as_path()))
    }

    /// Tint to draw `name` with: white for real images, the placeholder
    /// color otherwise.
    pub fn tint_for(&self, name: &str) -> [f32; 4] {
        if self.has_image(name) {
            [1.0, 1.0, 1.0, 1.0]
        } else {
            placeholder_for(name).tint
        }
    }
}

impl ImageCatalog for AssetStore {
    fn image_size(&self, name: &str) -> Vec2 {
        match self.images.get(name) {
            Some(entry) => entry.size,
            None => placeholder_for(name).size,
        }
    }
}

/// `(stem, path)` for every file in `dir` with extension `ext`.
fn scan_dir(dir: &Path, ext: &str) -> Vec<(String, PathBuf)> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            log::warn!("Asset folder '{}' unavailable: {err}", dir.display());
            return Vec::new();
        }
    };

    let mut found = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches_ext = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(ext));
        if !matches_ext {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            found.push((stem.to_string(), path.clone()));
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_root(name_hint: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        let root = std::env::temp_dir().join(format!(
            "pxa_assets_test_{}_{}_{}",
            name_hint,
            std::process::id(),
            nanos
        ));
        fs::create_dir_all(root.join(IMAGES_DIR)).expect("create images dir");
        fs::create_dir_all(root.join(SOUNDS_DIR)).expect("create sounds dir");
        root
    }

    #[test]
    fn placeholder_sizes_match_generated_assets() {
        assert_eq!(placeholder_for("hero_run_2").size, Vec2::new(32.0, 32.0));
        assert_eq!(placeholder_for("hero_idle_1_left").size, Vec2::new(32.0, 32.0));
        assert_eq!(placeholder_for("enemy_1").size, Vec2::new(30.0, 30.0));
        assert_eq!(placeholder_for("block").size, Vec2::new(50.0, 50.0));
        assert_eq!(placeholder_for("btn_exit").size, Vec2::new(200.0, 50.0));
    }

    #[test]
    fn store_reads_real_image_dimensions() {
        let root = temp_root("dims");
        image::RgbaImage::new(20, 10)
            .save(root.join(IMAGES_DIR).join("block.png"))
            .expect("write png");

        let store = AssetStore::open(&root);
        assert!(store.has_image("block"));
        assert_eq!(store.image_size("block"), Vec2::new(20.0, 10.0));
        assert_eq!(store.tint_for("block"), [1.0, 1.0, 1.0, 1.0]);

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn missing_image_falls_back_to_placeholder() {
        let root = temp_root("missing");
        let store = AssetStore::open(&root);
        assert!(!store.has_image("enemy_2"));
        assert_eq!(store.image_size("enemy_2"), Vec2::new(30.0, 30.0));
        assert_eq!(store.tint_for("enemy_2"), placeholder_for("enemy_2").tint);
        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn sounds_are_indexed_by_stem_and_other_files_ignored() {
        let root = temp_root("sounds");
        fs::write(root.join(SOUNDS_DIR).join("jump.wav"), b"RIFF").expect("write wav");
        fs::write(root.join(SOUNDS_DIR).join("notes.txt"), b"x").expect("write txt");

        let store = AssetStore::open(&root);
        assert!(store.sound_path("jump").is_some());
        assert!(store.sound_path("notes").is_none());
        // music/ was never created
        assert!(store.music_path("music").is_none());
        let _ = fs::remove_dir_all(root);
    }
}
