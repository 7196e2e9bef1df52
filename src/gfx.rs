use bitflags::bitflags;

// --- Texture Handles ---

/// Opaque id for a GPU-resident texture, issued by the backend.
/// Zero is reserved as the invalid sentinel: failed loads return it and it is
/// safe to store and pass back to the renderer (draws as a missing texture).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(u32);

impl TextureHandle {
    pub const INVALID: TextureHandle = TextureHandle(0);

    /// Wraps a backend-issued id. `from_raw(0)` is the invalid handle.
    #[inline(always)]
    pub const fn from_raw(id: u32) -> Self {
        TextureHandle(id)
    }

    #[inline(always)]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline(always)]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl Default for TextureHandle {
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

// --- Pixel Formats ---

/// Pixel format of an image, either as stored in a map resource or as
/// requested for upload. `Auto` asks the backend to detect from the file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    Auto,
    Rgb,
    Rgba,
    Alpha,
}

impl ImageFormat {
    /// Formats the raw-upload path understands without conversion help.
    #[inline(always)]
    pub fn is_plain_color(self) -> bool {
        matches!(self, ImageFormat::Rgb | ImageFormat::Rgba)
    }
}

bitflags! {
    /// Layout hints controlling how a 2D image is sliced for tile/array
    /// sampling. Derived per-resource from which layer kinds reference it.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct LayoutFlags: u32 {
        /// Fixed 256-cell tile array layout.
        const ARRAY_256 = 1 << 0;
        /// Both a 2D view and a tile-array view of the same image.
        const MULTI_DIMENSION = 1 << 1;
    }
}

/// Which storage roots a by-name load may search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageScope {
    /// Search all registered roots.
    All,
    /// User save directory only.
    Save,
}

// --- Backend Seam ---

/// The graphics backend as this module sees it: texture upload and release.
/// Image decoding lives behind `load_texture_file`; both loaders report
/// failure by returning `TextureHandle::INVALID` rather than an error.
pub trait Graphics {
    fn load_texture_file(
        &mut self,
        path: &str,
        scope: StorageScope,
        format: ImageFormat,
        flags: LayoutFlags,
    ) -> TextureHandle;

    fn load_texture_raw(
        &mut self,
        width: u32,
        height: u32,
        src_format: ImageFormat,
        data: &[u8],
        dst_format: ImageFormat,
        flags: LayoutFlags,
    ) -> TextureHandle;

    /// Releases the GPU resource behind `handle`. Invalid handles are a no-op.
    fn unload_texture(&mut self, handle: TextureHandle);
}
