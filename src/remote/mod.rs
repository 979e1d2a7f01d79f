//! remote
//!
//! Links into git hosting services.
//!
//! # Architecture
//!
//! The [`RemoteProvider`] trait describes one hosting service: its identity
//! and one URL builder per kind of [`RemoteResource`]. Commands obtain a
//! provider through [`create_provider`] and never import concrete providers.
//!
//! Resolution is side-effect free. The only side effects live in
//! [`copy_links`] and [`open_links`], which resolve a whole batch before
//! touching the clipboard or the browser.
//!
//! # Modules
//!
//! - `encoding`: URL codec applied at the embedding boundary
//! - `resource`: typed link requests
//! - `identity`: domain, path and protocol of a repository
//! - `traits`: the `RemoteProvider` trait and `RemoteError`
//! - `links`: settle-all batch copy / open
//! - `url`: git remote URL parsing
//! - `factory`: provider detection and creation
//! - [`providers`]: one module per hosting service
//! - [`mock`]: deterministic provider for tests

mod encoding;
mod factory;
mod identity;
mod links;
pub mod mock;
pub mod providers;
mod resource;
mod traits;
mod url;

pub use encoding::{decode_url, encode_component, encode_url, encode_url_opt};
pub use factory::{
    create_provider, detect_provider, valid_provider_names, ProviderKind, ProviderOverride,
    ProviderSettings,
};
pub use identity::{IdentityBuilder, ProviderIdentity, DEFAULT_PROTOCOL};
pub use links::{copy_links, open_links, resolve_links};
pub use resource::*;
pub use traits::*;
pub use self::url::{parse_remote_url, ParsedRemote};
