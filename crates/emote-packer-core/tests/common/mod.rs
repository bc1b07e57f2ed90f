#![allow(dead_code)]

use emote_packer_core::config::{CONFIG_DIR_NAME, EmoteConfig};
use image::RgbaImage;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

pub const EMOTES_DIR: &str = "assets/myemotes/textures/font/emotes";

pub fn write_png(path: &Path, w: u32, h: u32) {
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    RgbaImage::new(w, h).save(path).expect("save png");
}

/// Writes a pack directory with a font metadata file and one PNG per emote.
/// A non-emote provider is always included first.
pub fn write_pack(root: &Path, name: &str, emotes: &[(&str, char, u32, u32)]) -> PathBuf {
    let pack = root.join(name);
    let mut providers = vec![json!({
        "type": "bitmap",
        "file": "minecraft:font/ascii.png",
        "ascent": 7,
        "chars": ["abc"]
    })];
    for (emote, glyph, w, h) in emotes {
        providers.push(json!({
            "type": "bitmap",
            "file": format!("myemotes:font/emotes/{emote}.png"),
            "ascent": 7,
            "height": 9,
            "chars": [glyph.to_string()]
        }));
        write_png(&pack.join(EMOTES_DIR).join(format!("{emote}.png")), *w, *h);
    }
    let meta = pack.join("assets/myemotes/font/default.json");
    fs::create_dir_all(meta.parent().expect("parent")).expect("mkdir");
    fs::write(&meta, serde_json::to_string_pretty(&json!({ "providers": providers })).unwrap())
        .expect("write metadata");
    fs::write(pack.join("pack.mcmeta"), "{}").expect("write mcmeta");
    pack
}

/// Creates the config directory with the template; `with_result` controls whether it has `result.txt`.
pub fn write_config_dir(root: &Path, with_result: bool) -> PathBuf {
    let dir = root.join(CONFIG_DIR_NAME);
    let template = dir.join(EmoteConfig::default().symbol_chat_exemple_dir).join("symbols");
    fs::create_dir_all(&template).expect("mkdir");
    fs::write(template.join("readme.md"), "symbol chat").expect("write readme");
    if with_result {
        fs::write(template.join("result.txt"), "placeholder").expect("write result");
    }
    dir
}

/// Catalog used in several tests: one grouped, one wide and one ungrouped emote.
pub fn sample_emotes() -> Vec<(&'static str, char, u32, u32)> {
    vec![
        ("pwgood_a", 'A', 10, 10),
        ("peepoWide", 'B', 32, 10),
        ("xyz", 'C', 10, 10),
    ]
}

pub const SAMPLE_LAYOUT: &str = "pwgood    A         other     C         wide       B ";
