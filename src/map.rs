use crate::gfx::ImageFormat;

/// Index of a data blob inside a loaded map file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DataIndex(pub u32);

/// One image resource declared by a map, in declaration order.
///
/// Version 1 items predate the format field and are always RGBA; later
/// versions carry an explicit pixel format. `external` means the map stores
/// only a name and the pixels live in a file under `mapres/`.
#[derive(Clone, Copy, Debug)]
pub struct MapImageItem {
    pub version: u32,
    pub width: u32,
    pub height: u32,
    pub external: bool,
    pub format: ImageFormat,
    /// Blob holding the resource's NUL-free UTF-8 name.
    pub name: DataIndex,
    /// Blob holding raw pixel data; unused for external resources.
    pub data: DataIndex,
}

impl MapImageItem {
    /// Pixel format of the embedded blob. Version 1 items are assumed RGBA.
    #[inline(always)]
    pub fn source_format(&self) -> ImageFormat {
        if self.version == 1 {
            ImageFormat::Rgba
        } else {
            self.format
        }
    }

    /// External resources and newer-format resources whose pixels are not
    /// plain RGB/RGBA resolve by name from storage instead of the embedded
    /// blob.
    #[inline(always)]
    pub fn loads_from_file(&self) -> bool {
        self.external || (self.version > 1 && !self.format.is_plain_color())
    }
}

/// A map layer as this module needs to see it: its kind and which image
/// resource it references, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapLayer {
    Quads { image: Option<usize> },
    Tiles { image: Option<usize> },
    Other,
}

impl MapLayer {
    #[inline(always)]
    pub fn quad_image(self) -> Option<usize> {
        match self {
            MapLayer::Quads { image } => image,
            _ => None,
        }
    }

    #[inline(always)]
    pub fn tile_image(self) -> Option<usize> {
        match self {
            MapLayer::Tiles { image } => image,
            _ => None,
        }
    }
}

/// Read access to a loaded map's image resources.
///
/// `data` hands out the blob behind a `DataIndex`; the caller releases it
/// with `unload_data` once uploaded so the map can drop its decompressed
/// copy. Out-of-range indices yield `None`.
pub trait MapResources {
    /// Number of image resources the map declares.
    fn image_count(&self) -> usize;

    /// The `i`-th image resource, `i < image_count()`.
    fn image_item(&self, i: usize) -> Option<MapImageItem>;

    fn data(&self, ix: DataIndex) -> Option<&[u8]>;

    fn unload_data(&mut self, ix: DataIndex);
}

/// Resolves an image-name blob to UTF-8, tolerating a trailing NUL as the
/// map format writes one. A missing or garbled name returns `None` and the
/// resource loads as invalid.
pub fn image_name(map: &dyn MapResources, ix: DataIndex) -> Option<String> {
    let raw = map.data(ix)?;
    let raw = match raw.iter().position(|&b| b == 0) {
        Some(end) => &raw[..end],
        None => raw,
    };
    let name = std::str::from_utf8(raw).ok()?;
    if name.is_empty() {
        return None;
    }
    Some(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OneBlob(Vec<u8>);

    impl MapResources for OneBlob {
        fn image_count(&self) -> usize {
            0
        }
        fn image_item(&self, _i: usize) -> Option<MapImageItem> {
            None
        }
        fn data(&self, ix: DataIndex) -> Option<&[u8]> {
            (ix.0 == 0).then_some(self.0.as_slice())
        }
        fn unload_data(&mut self, _ix: DataIndex) {}
    }

    fn item(version: u32, external: bool, format: ImageFormat) -> MapImageItem {
        MapImageItem {
            version,
            width: 64,
            height: 64,
            external,
            format,
            name: DataIndex(0),
            data: DataIndex(1),
        }
    }

    #[test]
    fn version_one_items_are_rgba_regardless_of_format_field() {
        assert_eq!(
            item(1, false, ImageFormat::Alpha).source_format(),
            ImageFormat::Rgba,
            "version 1 predates the format field"
        );
        assert_eq!(
            item(2, false, ImageFormat::Rgb).source_format(),
            ImageFormat::Rgb
        );
    }

    #[test]
    fn file_load_applies_to_external_and_odd_format_items() {
        assert!(item(1, true, ImageFormat::Rgba).loads_from_file());
        assert!(item(2, false, ImageFormat::Alpha).loads_from_file());
        assert!(!item(2, false, ImageFormat::Rgba).loads_from_file());
        // Version 1 items never carry a trusted format, so only the external
        // bit can route them to a file load.
        assert!(!item(1, false, ImageFormat::Alpha).loads_from_file());
    }

    #[test]
    fn image_name_strips_trailing_nul() {
        let map = OneBlob(b"grass_main\0".to_vec());
        assert_eq!(image_name(&map, DataIndex(0)).as_deref(), Some("grass_main"));
    }

    #[test]
    fn image_name_rejects_garbled_or_missing_blobs() {
        let map = OneBlob(vec![0xff, 0xfe, 0x00]);
        assert_eq!(image_name(&map, DataIndex(0)), None, "not UTF-8");
        assert_eq!(image_name(&map, DataIndex(9)), None, "no such blob");
        let empty = OneBlob(b"\0".to_vec());
        assert_eq!(image_name(&empty, DataIndex(0)), None, "empty name");
    }

    #[test]
    fn layer_image_accessors_match_kind() {
        let quads = MapLayer::Quads { image: Some(3) };
        let tiles = MapLayer::Tiles { image: Some(3) };
        assert_eq!(quads.quad_image(), Some(3));
        assert_eq!(quads.tile_image(), None);
        assert_eq!(tiles.tile_image(), Some(3));
        assert_eq!(MapLayer::Other.quad_image(), None);
    }
}
