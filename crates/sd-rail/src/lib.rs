//! `sd-rail` — rail graph, path segments, and path search.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`rail`]    | `Rail`, `RailType` speed/acceleration table                 |
//! | [`network`] | `RailNetwork` (position-keyed adjacency), `RailNetworkBuilder` |
//! | [`path`]    | `Anchor`, `PathSegment`, `append_path`                      |
//! | [`finder`]  | `PathFinder` trait, `DijkstraPathFinder`                    |
//! | [`loader`]  | `load_network_csv`, `load_network_reader`                   |
//! | [`error`]   | `RailError`, `RailResult<T>`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod finder;
pub mod loader;
pub mod network;
pub mod path;
pub mod rail;

#[cfg(test)]
mod tests;

pub use error::{RailError, RailResult};
pub use finder::{DijkstraPathFinder, PathFinder};
pub use loader::{load_network_csv, load_network_reader};
pub use network::{RailNetwork, RailNetworkBuilder};
pub use path::{Anchor, PathSegment, append_path};
pub use rail::{Rail, RailType};
