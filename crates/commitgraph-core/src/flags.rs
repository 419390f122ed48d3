//! Packed representation of `UploadMeta`
//!
//! Each meta is stored as the upload id plus a single `u32`:
//!
//! ```text
//!  31  30  29  28 ............................ 0
//! [ 0 | A | O |          distance             ]
//! ```
//!
//! `A` is the ancestor-visible flag and `O` the overwritten flag.

use serde::{Deserialize, Serialize};

use crate::models::{UploadId, UploadMeta};

/// Set when the upload was discovered walking towards ancestors
pub const FLAG_ANCESTOR_VISIBLE: u32 = 1 << 30;

/// Set when a closer upload with the same token shadows this one
pub const FLAG_OVERWRITTEN: u32 = 1 << 29;

/// Largest encodable distance; also the mask selecting the distance bits
pub const MAX_DISTANCE: u32 = FLAG_OVERWRITTEN - 1;

/// Packed `UploadMeta`, used at serialization boundaries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackedUploadMeta {
    pub upload_id: UploadId,
    pub flags: u32,
}

impl PackedUploadMeta {
    pub fn distance(&self) -> u32 {
        self.flags & MAX_DISTANCE
    }

    pub fn ancestor_visible(&self) -> bool {
        self.flags & FLAG_ANCESTOR_VISIBLE != 0
    }

    pub fn overwritten(&self) -> bool {
        self.flags & FLAG_OVERWRITTEN != 0
    }
}

impl From<UploadMeta> for PackedUploadMeta {
    fn from(meta: UploadMeta) -> Self {
        if meta.distance > MAX_DISTANCE {
            log::warn!(
                "Distance {} of upload {} exceeds {}, saturating",
                meta.distance,
                meta.upload_id,
                MAX_DISTANCE
            );
        }

        let mut flags = meta.distance.min(MAX_DISTANCE);
        if meta.ancestor_visible {
            flags |= FLAG_ANCESTOR_VISIBLE;
        }
        if meta.overwritten {
            flags |= FLAG_OVERWRITTEN;
        }

        Self {
            upload_id: meta.upload_id,
            flags,
        }
    }
}

impl From<PackedUploadMeta> for UploadMeta {
    fn from(packed: PackedUploadMeta) -> Self {
        Self {
            upload_id: packed.upload_id,
            distance: packed.distance(),
            ancestor_visible: packed.ancestor_visible(),
            overwritten: packed.overwritten(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_layout() {
        assert_eq!(FLAG_ANCESTOR_VISIBLE, 0x4000_0000);
        assert_eq!(FLAG_OVERWRITTEN, 0x2000_0000);
        assert_eq!(MAX_DISTANCE, 0x1FFF_FFFF);
        assert_eq!(MAX_DISTANCE & (FLAG_ANCESTOR_VISIBLE | FLAG_OVERWRITTEN), 0);
    }

    #[test]
    fn test_pack_sets_bits() {
        let meta = UploadMeta {
            upload_id: 7,
            distance: 12,
            ancestor_visible: true,
            overwritten: true,
        };
        let packed = PackedUploadMeta::from(meta);
        assert_eq!(packed.flags, 12 | FLAG_ANCESTOR_VISIBLE | FLAG_OVERWRITTEN);
        assert_eq!(UploadMeta::from(packed), meta);
    }

    #[test]
    fn test_descendant_meta_has_no_flags() {
        let meta = UploadMeta {
            upload_id: 3,
            distance: 4,
            ancestor_visible: false,
            overwritten: false,
        };
        assert_eq!(PackedUploadMeta::from(meta).flags, 4);
    }

    #[test]
    fn test_distance_saturates() {
        let meta = UploadMeta {
            upload_id: 1,
            distance: u32::MAX,
            ancestor_visible: false,
            overwritten: false,
        };
        let packed = PackedUploadMeta::from(meta);
        assert_eq!(packed.distance(), MAX_DISTANCE);
        assert!(!packed.ancestor_visible());
        assert!(!packed.overwritten());
    }
}
