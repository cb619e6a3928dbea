//! Route composition: siding → first platform · main route · last platform → siding.
//!
//! # Success count
//!
//! A composition reports how many legs were found, continuing the count the
//! caller's main route already carries:
//!
//! | Outcome                                   | Path   | Success          |
//! |-------------------------------------------|--------|------------------|
//! | first or last platform missing            | empty  | 0                |
//! | siding → first platform unreachable       | empty  | 1                |
//! | main route empty                          | empty  | main_success + 1 |
//! | last platform → siding unreachable        | empty  | main_success + 1 |
//! | complete                                  | full   | main_success + 2 |
//!
//! An empty path is a normal outcome, not an error; applying it installs the
//! siding's default path.

use sd_core::AnchorId;
use sd_rail::{Anchor, PathFinder, PathSegment, RailNetwork, append_path};

use crate::SidingResult;

/// Everything a composition needs, captured by value so it can move to a
/// background thread.
#[derive(Clone, Debug)]
pub struct RouteRequest {
    pub siding:           Anchor,
    /// The siding's depot generation when the request was taken.
    pub depot_generation: u64,
    pub first_platform:   Option<Anchor>,
    pub last_platform:    Option<Anchor>,
    /// The depot's main route between the first and last platform.
    pub main_path:        Vec<PathSegment>,
    pub main_success:     u32,
}

/// A finished composition, waiting to be applied at a tick boundary.
#[derive(Clone, Debug, PartialEq)]
pub struct Composition {
    pub siding:               AnchorId,
    pub depot_generation:     u64,
    pub path:                 Vec<PathSegment>,
    pub successful_segments:  u32,
}

impl Composition {
    fn empty(request: &RouteRequest, successful_segments: u32) -> Self {
        Self {
            siding: request.siding.id,
            depot_generation: request.depot_generation,
            path: Vec::new(),
            successful_segments,
        }
    }
}

/// Composes a siding's full route with a pluggable [`PathFinder`].
pub struct RouteComposer<'a, F: PathFinder + ?Sized> {
    finder:  &'a F,
    network: &'a RailNetwork,
}

impl<'a, F: PathFinder + ?Sized> RouteComposer<'a, F> {
    pub fn new(finder: &'a F, network: &'a RailNetwork) -> Self {
        Self { finder, network }
    }

    /// Compose the route described by `request`.
    ///
    /// Only invalid segment data from the search is an error.
    pub fn compose(&self, request: &RouteRequest) -> SidingResult<Composition> {
        let (Some(first), Some(last)) = (request.first_platform, request.last_platform) else {
            return Ok(Composition::empty(request, 0));
        };

        let outbound = self.finder.find_path(self.network, &[request.siding, first], 0)?;
        if outbound.is_empty() {
            return Ok(Composition::empty(request, 1));
        }
        if request.main_path.is_empty() {
            return Ok(Composition::empty(request, request.main_success + 1));
        }

        let mut path = outbound;
        append_path(&mut path, &request.main_path);

        let inbound = self.finder.find_path(self.network, &[last, request.siding], request.main_success)?;
        if inbound.is_empty() {
            return Ok(Composition::empty(request, request.main_success + 1));
        }
        append_path(&mut path, &inbound);

        Ok(Composition {
            siding: request.siding.id,
            depot_generation: request.depot_generation,
            path,
            successful_segments: request.main_success + 2,
        })
    }
}
