//! Map texture set management for a game client.
//!
//! Maps declare image resources, either embedded as raw pixels or referenced
//! by name; this crate uploads them through an injected graphics backend and
//! exposes the resulting handles by index to the renderer. [`MapImages`]
//! owns the per-context collections and the two lazily loaded overlay
//! textures; the map parser, graphics backend, session state, and ruleset
//! heuristics stay behind the trait seams in [`map`], [`gfx`], [`client`],
//! and [`ruleset`].

pub mod client;
pub mod gfx;
pub mod images;
pub mod map;
pub mod ruleset;

pub use client::{Client, ConnState, ServerInfo};
pub use gfx::{Graphics, ImageFormat, LayoutFlags, StorageScope, TextureHandle};
pub use images::{MAX_TEXTURES, MapContext, MapImages};
pub use map::{DataIndex, MapImageItem, MapLayer, MapResources};
pub use ruleset::{DEFAULT_PRECEDENCE, DEFAULT_RULESET, Ruleset, RulesetClassifier};
