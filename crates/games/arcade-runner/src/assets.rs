use serde::Serialize;

/// Sky color behind the level.
pub const BACKGROUND_COLOR: u32 = 0x87ceeb;
/// Tint applied to the player on game over.
pub const GAME_OVER_TINT: u32 = 0xff0000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssetKind {
    Image,
    SpriteSheet { frame_width: u32, frame_height: u32 },
}

/// A texture the renderer must load before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AssetSpec {
    pub key: &'static str,
    pub path: &'static str,
    pub kind: AssetKind,
}

pub const ASSET_MANIFEST: &[AssetSpec] = &[
    AssetSpec {
        key: "tiles",
        path: "Game Assets/Speed Runner/tiles.png",
        kind: AssetKind::Image,
    },
    AssetSpec {
        key: "player",
        path: "Game Assets/Speed Runner/player.png",
        kind: AssetKind::SpriteSheet {
            frame_width: 28,
            frame_height: 64,
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(key: &str) -> Option<AssetKind> {
        ASSET_MANIFEST.iter().find(|a| a.key == key).map(|a| a.kind)
    }

    #[test]
    fn manifest_has_tiles_and_player_sheet() {
        assert_eq!(kind_of("tiles"), Some(AssetKind::Image));
        assert_eq!(
            kind_of("player"),
            Some(AssetKind::SpriteSheet {
                frame_width: 28,
                frame_height: 64
            })
        );
        assert!(kind_of("mole").is_none());
    }

    #[test]
    fn keys_are_unique() {
        for (i, a) in ASSET_MANIFEST.iter().enumerate() {
            assert!(ASSET_MANIFEST[i + 1..].iter().all(|b| b.key != a.key));
        }
    }
}
