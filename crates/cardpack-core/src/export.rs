//! JSON descriptors emitted alongside the textures: per-item definitions, the
//! card model, and the pack manifest.

use crate::error::Result;
use crate::model::{CANVAS_HEIGHT, CANVAS_WIDTH};
use serde_json::{Value, json};
use std::fs;
use std::path::Path;

/// Item definition pointing at the card model of the same base name.
pub fn item_descriptor(namespace: &str, name: &str) -> Value {
    json!({
        "model": {
            "type": "minecraft:model",
            "model": format!("{namespace}:item/{name}")
        }
    })
}

/// Card model: two opposing quads forming a thin card, with fixed display
/// transforms. Texture slot 0 is the shared back face and slot 1 the item's
/// own front; without a shared back texture both slots (and the particle)
/// point at the item's own texture.
pub fn model_descriptor(namespace: &str, name: &str, has_back: bool) -> Value {
    let front = format!("{namespace}:item/{name}");
    let back = if has_back {
        format!("{namespace}:item/back")
    } else {
        front.clone()
    };
    json!({
        "credit": "Made with Blockbench",
        "texture_size": [CANVAS_WIDTH, CANVAS_HEIGHT],
        "textures": {
            "0": back.clone(),
            "1": front,
            "particle": back
        },
        "elements": [
            {
                "from": [2, 0, 8],
                "to": [16, 18, 8],
                "rotation": {"angle": 0, "axis": "x", "origin": [9, 9, 8]},
                "faces": {
                    "north": {"uv": [16, 16, 0, 0], "rotation": 180, "texture": "#0"},
                    "south": {"uv": [0, 0, 16, 16], "texture": "#1"}
                }
            }
        ],
        "gui_light": "front",
        "display": {
            "thirdperson_righthand": {
                "rotation": [49.5, 0, 0],
                "translation": [0, 1, 1.25],
                "scale": [0.20703, 0.20703, 0.20703]
            },
            "thirdperson_lefthand": {
                "rotation": [49.5, 0, 0],
                "translation": [0, 1, 1.25],
                "scale": [0.20703, 0.20703, 0.20703]
            },
            "firstperson_righthand": {"translation": [-10, 8, -4]},
            "firstperson_lefthand": {"translation": [-10, 8, -4]},
            "ground": {"translation": [0, 1.75, 0], "scale": [0.2, 0.2, 1]},
            "gui": {"translation": [-1, 0, 0]},
            "fixed": {"rotation": [0, 180, 0], "translation": [1.25, -1, 0.5]}
        }
    })
}

/// Pack manifest (`pack.mcmeta`), one per run.
pub fn pack_manifest(pack_format: u32, description: &str) -> Value {
    json!({
        "pack": {
            "pack_format": pack_format,
            "description": description
        }
    })
}

/// Pretty-prints `value` to `path`.
pub fn write_json(path: &Path, value: &Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| crate::error::CardPackError::Encode(e.to_string()))?;
    fs::write(path, text)?;
    Ok(())
}
