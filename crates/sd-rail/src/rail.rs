//! Rails and the rail-type lookup table.

use std::fmt;

use crate::{RailError, RailResult};

/// Server ticks per second; converts km/h into blocks per tick.
const TICKS_PER_SECOND: f32 = 20.0;

/// Speed class of a piece of track.
///
/// Ordinary track lets vehicles accelerate up to the type's speed.  Platform,
/// siding, and turn-back track does not: a vehicle crosses it at whatever
/// speed it entered with.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RailType {
    Wooden,
    Stone,
    Iron,
    Obsidian,
    Blaze,
    Quartz,
    Diamond,
    Platform,
    Siding,
    TurnBack,
}

impl RailType {
    pub const ALL: [RailType; 10] = [
        RailType::Wooden,
        RailType::Stone,
        RailType::Iron,
        RailType::Obsidian,
        RailType::Blaze,
        RailType::Quartz,
        RailType::Diamond,
        RailType::Platform,
        RailType::Siding,
        RailType::TurnBack,
    ];

    /// Line speed in km/h.
    pub fn speed_kph(self) -> u32 {
        match self {
            RailType::Wooden   => 20,
            RailType::Stone    => 40,
            RailType::Iron     => 80,
            RailType::Obsidian => 120,
            RailType::Blaze    => 160,
            RailType::Quartz   => 200,
            RailType::Diamond  => 300,
            RailType::Platform => 80,
            RailType::Siding   => 40,
            RailType::TurnBack => 80,
        }
    }

    /// `false` for track where vehicles hold their entry speed.
    pub fn can_accelerate(self) -> bool {
        !matches!(self, RailType::Platform | RailType::Siding | RailType::TurnBack)
    }

    /// Speed ceiling in blocks per tick.
    pub fn max_blocks_per_tick(self) -> f32 {
        self.speed_kph() as f32 / 3.6 / TICKS_PER_SECOND
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RailType::Wooden   => "wooden",
            RailType::Stone    => "stone",
            RailType::Iron     => "iron",
            RailType::Obsidian => "obsidian",
            RailType::Blaze    => "blaze",
            RailType::Quartz   => "quartz",
            RailType::Diamond  => "diamond",
            RailType::Platform => "platform",
            RailType::Siding   => "siding",
            RailType::TurnBack => "turn_back",
        }
    }

    pub fn from_name(name: &str) -> Option<RailType> {
        let name = name.trim();
        RailType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for RailType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Rail ──────────────────────────────────────────────────────────────────────

/// A directed piece of track between two positions.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rail {
    /// Track length in blocks.
    pub length:    f32,
    pub rail_type: RailType,
}

impl Rail {
    /// Construct a rail, rejecting non-positive or non-finite lengths.
    pub fn new(length: f32, rail_type: RailType) -> RailResult<Self> {
        if !(length.is_finite() && length > 0.0) {
            return Err(RailError::InvalidRail(format!(
                "length must be positive and finite, got {length}"
            )));
        }
        Ok(Self { length, rail_type })
    }

    #[inline]
    pub fn can_accelerate(&self) -> bool {
        self.rail_type.can_accelerate()
    }

    #[inline]
    pub fn max_speed(&self) -> f32 {
        self.rail_type.max_blocks_per_tick()
    }

    /// Cruise time across this rail in milli-ticks, used as search cost.
    #[inline]
    pub fn cost(&self) -> u64 {
        (self.length / self.max_speed() * 1000.0).round() as u64
    }
}
