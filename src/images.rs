use crate::client::Client;
use crate::gfx::{Graphics, ImageFormat, LayoutFlags, StorageScope, TextureHandle};
use crate::map::{self, MapImageItem, MapLayer, MapResources};
use crate::ruleset::{self, Ruleset, RulesetClassifier, DEFAULT_PRECEDENCE, DEFAULT_RULESET};
use log::{info, warn};

/// Hard cap on image resources per map, matching the map format's slot limit.
pub const MAX_TEXTURES: usize = 64;

const SEASONAL_TEXTURE_PATH: &str = "mapres/easter.png";

/// Which texture collection a map load targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapContext {
    Game,
    Menu,
}

impl core::fmt::Display for MapContext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Game => write!(f, "game"),
            Self::Menu => write!(f, "menu"),
        }
    }
}

/// Bounded, ordered set of texture handles for one context. The vector's
/// length is the live count; entries are released before being dropped.
#[derive(Default)]
struct TextureCollection {
    textures: Vec<TextureHandle>,
}

impl TextureCollection {
    fn unload(&mut self, gfx: &mut dyn Graphics) {
        for handle in self.textures.drain(..) {
            if handle.is_valid() {
                gfx.unload_texture(handle);
            }
        }
    }

    #[inline(always)]
    fn count(&self) -> usize {
        self.textures.len()
    }

    /// Index access with the index clamped to the last valid slot. An empty
    /// collection has no slot to clamp to and yields the invalid handle.
    fn get_clamped(&self, index: usize) -> TextureHandle {
        match self.textures.len() {
            0 => TextureHandle::INVALID,
            len => self.textures[index.min(len - 1)],
        }
    }
}

/// Manages the map-derived textures of a client: one collection per context,
/// rebuilt on map load, plus two lazily loaded overlay textures. Collaborators
/// (backend, map, session) are passed in per call; the ruleset classifier and
/// precedence policy are fixed at construction.
pub struct MapImages {
    game: TextureCollection,
    menu: TextureCollection,

    seasonal: TextureHandle,
    seasonal_loaded: bool,

    entities: TextureHandle,
    entities_key: Option<&'static str>,

    classifier: Box<dyn RulesetClassifier>,
    precedence: Vec<Ruleset>,
    fallback: Ruleset,
}

impl MapImages {
    pub fn new(classifier: Box<dyn RulesetClassifier>) -> Self {
        Self::with_precedence(classifier, DEFAULT_PRECEDENCE.to_vec(), DEFAULT_RULESET)
    }

    /// Overrides the classification order and ambiguity fallback, for callers
    /// that carry the family policy in configuration.
    pub fn with_precedence(
        classifier: Box<dyn RulesetClassifier>,
        precedence: Vec<Ruleset>,
        fallback: Ruleset,
    ) -> Self {
        Self {
            game: TextureCollection::default(),
            menu: TextureCollection::default(),
            seasonal: TextureHandle::INVALID,
            seasonal_loaded: false,
            entities: TextureHandle::INVALID,
            entities_key: None,
            classifier,
            precedence,
            fallback,
        }
    }

    /// Rebuilds the `context` collection from the map's image resources.
    ///
    /// Previous handles are released first. Each resource gets layout flags
    /// derived from the layers referencing it, then loads either by name from
    /// storage or as an embedded raw upload; a failed load occupies its slot
    /// with the invalid handle and the rebuild continues. A game-context
    /// rebuild primes the seasonal overlay during an active seasonal period.
    pub fn load_map_images(
        &mut self,
        gfx: &mut dyn Graphics,
        map: &mut dyn MapResources,
        layers: &[MapLayer],
        client: &dyn Client,
        context: MapContext,
    ) {
        self.collection_mut(context).unload(gfx);

        let count = map.image_count().min(MAX_TEXTURES);
        let mut textures = Vec::with_capacity(count);
        for i in 0..count {
            let mut found_quad = false;
            let mut found_tile = false;
            for layer in layers {
                if !found_quad && layer.quad_image() == Some(i) {
                    found_quad = true;
                }
                if !found_tile && layer.tile_image() == Some(i) {
                    found_tile = true;
                }
            }
            let flags = if found_tile {
                if found_quad {
                    LayoutFlags::MULTI_DIMENSION
                } else {
                    LayoutFlags::ARRAY_256
                }
            } else {
                LayoutFlags::empty()
            };

            let handle = match map.image_item(i) {
                Some(item) => {
                    if item.loads_from_file() {
                        load_from_storage(gfx, map, &item, flags)
                    } else {
                        upload_embedded(gfx, map, &item, item.source_format(), flags)
                    }
                }
                None => TextureHandle::INVALID,
            };
            textures.push(handle);
        }
        self.collection_mut(context).textures = textures;
        info!("loaded {count} {context} map textures");

        if context == MapContext::Game && client.is_seasonal_time() {
            self.seasonal_texture(gfx);
        }
    }

    /// Reduced rebuild for a background map, always targeting the game
    /// collection: externals load by name, everything else uploads as plain
    /// RGBA. No layout flags, no seasonal priming.
    pub fn load_background(&mut self, gfx: &mut dyn Graphics, map: &mut dyn MapResources) {
        self.game.unload(gfx);

        let count = map.image_count().min(MAX_TEXTURES);
        let mut textures = Vec::with_capacity(count);
        for i in 0..count {
            let handle = match map.image_item(i) {
                Some(item) if item.external => {
                    load_from_storage(gfx, map, &item, LayoutFlags::empty())
                }
                Some(item) => {
                    upload_embedded(gfx, map, &item, ImageFormat::Rgba, LayoutFlags::empty())
                }
                None => TextureHandle::INVALID,
            };
            textures.push(handle);
        }
        self.game.textures = textures;
    }

    /// The seasonal overlay, loaded on first demand. A failed load is logged
    /// once and latched so the miss is not retried every frame.
    pub fn seasonal_texture(&mut self, gfx: &mut dyn Graphics) -> TextureHandle {
        if !self.seasonal_loaded {
            self.seasonal = gfx.load_texture_file(
                SEASONAL_TEXTURE_PATH,
                StorageScope::All,
                ImageFormat::Auto,
                LayoutFlags::ARRAY_256,
            );
            if !self.seasonal.is_valid() {
                warn!("failed to load {SEASONAL_TEXTURE_PATH}");
            }
            self.seasonal_loaded = true;
        }
        self.seasonal
    }

    /// The entities overlay for the current server's ruleset family. Only a
    /// change of the classified asset key triggers a reload; the prior handle
    /// is released first.
    pub fn entities_texture(
        &mut self,
        gfx: &mut dyn Graphics,
        client: &dyn Client,
    ) -> TextureHandle {
        let server = client.server_info();
        let family = ruleset::classify(
            self.classifier.as_ref(),
            &server,
            &self.precedence,
            self.fallback,
        );
        let key = family.asset_key();

        if self.entities_key != Some(key) {
            if self.entities.is_valid() {
                gfx.unload_texture(self.entities);
            }
            let path = format!("editor/entities_clear/{key}.png");
            self.entities = gfx.load_texture_file(
                &path,
                StorageScope::All,
                ImageFormat::Auto,
                LayoutFlags::MULTI_DIMENSION,
            );
            info!("entities overlay for {family}: {path}");
            self.entities_key = Some(key);
        }
        self.entities
    }

    /// Texture at `index` in the collection selected by the session state.
    /// Out-of-range indices clamp to the last valid slot; an empty
    /// collection yields the invalid handle.
    pub fn get(&self, client: &dyn Client, index: usize) -> TextureHandle {
        self.selected(client).get_clamped(index)
    }

    /// Count of the collection selected by the session state.
    pub fn num(&self, client: &dyn Client) -> usize {
        self.selected(client).count()
    }

    /// Releases every live handle and resets the lazy latches. The manager
    /// behaves as freshly constructed afterwards.
    pub fn unload_all(&mut self, gfx: &mut dyn Graphics) {
        self.game.unload(gfx);
        self.menu.unload(gfx);
        if self.seasonal.is_valid() {
            gfx.unload_texture(self.seasonal);
        }
        self.seasonal = TextureHandle::INVALID;
        self.seasonal_loaded = false;
        if self.entities.is_valid() {
            gfx.unload_texture(self.entities);
        }
        self.entities = TextureHandle::INVALID;
        self.entities_key = None;
    }

    fn collection_mut(&mut self, context: MapContext) -> &mut TextureCollection {
        match context {
            MapContext::Game => &mut self.game,
            MapContext::Menu => &mut self.menu,
        }
    }

    fn selected(&self, client: &dyn Client) -> &TextureCollection {
        if client.state().in_session() {
            &self.game
        } else {
            &self.menu
        }
    }
}

/// Resolves the resource's name and loads `mapres/<name>.png` from storage.
/// A missing or garbled name yields the invalid handle for this slot.
fn load_from_storage(
    gfx: &mut dyn Graphics,
    map: &dyn MapResources,
    item: &MapImageItem,
    flags: LayoutFlags,
) -> TextureHandle {
    match map::image_name(map, item.name) {
        Some(name) => gfx.load_texture_file(
            &format!("mapres/{name}.png"),
            StorageScope::All,
            ImageFormat::Auto,
            flags,
        ),
        None => TextureHandle::INVALID,
    }
}

/// Uploads the resource's embedded pixel blob and releases it back to the
/// map accessor.
fn upload_embedded(
    gfx: &mut dyn Graphics,
    map: &mut dyn MapResources,
    item: &MapImageItem,
    src_format: ImageFormat,
    flags: LayoutFlags,
) -> TextureHandle {
    let handle = match map.data(item.data) {
        Some(data) => gfx.load_texture_raw(
            item.width,
            item.height,
            src_format,
            data,
            ImageFormat::Rgba,
            flags,
        ),
        None => TextureHandle::INVALID,
    };
    map.unload_data(item.data);
    handle
}
