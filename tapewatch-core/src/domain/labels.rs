//! Trend and behavior labels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a value relative to its own moving average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Trend {
    Increase,
    Decrease,
    Stable,
}

impl Trend {
    pub const ALL: [Trend; 3] = [Trend::Increase, Trend::Decrease, Trend::Stable];

    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Increase => "Increase",
            Trend::Decrease => "Decrease",
            Trend::Stable => "Stable",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Market behavior derived from a (price trend, volume trend) pair.
///
/// Serialized as the human-readable label, e.g. `"Buying Pressure"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Behavior {
    #[serde(rename = "Buying Pressure")]
    BuyingPressure,
    #[serde(rename = "Mild Buying")]
    MildBuying,
    #[serde(rename = "Cautious Buying")]
    CautiousBuying,
    #[serde(rename = "Selling Pressure")]
    SellingPressure,
    #[serde(rename = "Mild Selling")]
    MildSelling,
    #[serde(rename = "Cautious Selling")]
    CautiousSelling,
    #[serde(rename = "Volume Spike")]
    VolumeSpike,
    #[serde(rename = "Low Activity")]
    LowActivity,
    #[serde(rename = "Stable Market")]
    StableMarket,
}

impl Behavior {
    /// Canonical ordering, row-major over the price/volume trend table.
    pub const ALL: [Behavior; 9] = [
        Behavior::BuyingPressure,
        Behavior::MildBuying,
        Behavior::CautiousBuying,
        Behavior::SellingPressure,
        Behavior::MildSelling,
        Behavior::CautiousSelling,
        Behavior::VolumeSpike,
        Behavior::LowActivity,
        Behavior::StableMarket,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Behavior::BuyingPressure => "Buying Pressure",
            Behavior::MildBuying => "Mild Buying",
            Behavior::CautiousBuying => "Cautious Buying",
            Behavior::SellingPressure => "Selling Pressure",
            Behavior::MildSelling => "Mild Selling",
            Behavior::CautiousSelling => "Cautious Selling",
            Behavior::VolumeSpike => "Volume Spike",
            Behavior::LowActivity => "Low Activity",
            Behavior::StableMarket => "Stable Market",
        }
    }

    /// Position of this label in [`Behavior::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
