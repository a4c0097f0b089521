//! Behavior mapper: (price trend, volume trend) to a market behavior label.

use crate::domain::{Behavior, Trend};

impl Behavior {
    /// Total mapping over the 3x3 trend space.
    ///
    /// The match is exhaustive over the pair, so a missing combination is a
    /// compile error rather than an "Unknown" label at runtime.
    pub fn from_trends(price: Trend, volume: Trend) -> Behavior {
        match (price, volume) {
            (Trend::Increase, Trend::Increase) => Behavior::BuyingPressure,
            (Trend::Increase, Trend::Decrease) => Behavior::MildBuying,
            (Trend::Increase, Trend::Stable) => Behavior::CautiousBuying,
            (Trend::Decrease, Trend::Increase) => Behavior::SellingPressure,
            (Trend::Decrease, Trend::Decrease) => Behavior::MildSelling,
            (Trend::Decrease, Trend::Stable) => Behavior::CautiousSelling,
            (Trend::Stable, Trend::Increase) => Behavior::VolumeSpike,
            (Trend::Stable, Trend::Decrease) => Behavior::LowActivity,
            (Trend::Stable, Trend::Stable) => Behavior::StableMarket,
        }
    }

    /// Inverse of [`Behavior::from_trends`].
    pub fn trends(&self) -> (Trend, Trend) {
        match self {
            Behavior::BuyingPressure => (Trend::Increase, Trend::Increase),
            Behavior::MildBuying => (Trend::Increase, Trend::Decrease),
            Behavior::CautiousBuying => (Trend::Increase, Trend::Stable),
            Behavior::SellingPressure => (Trend::Decrease, Trend::Increase),
            Behavior::MildSelling => (Trend::Decrease, Trend::Decrease),
            Behavior::CautiousSelling => (Trend::Decrease, Trend::Stable),
            Behavior::VolumeSpike => (Trend::Stable, Trend::Increase),
            Behavior::LowActivity => (Trend::Stable, Trend::Decrease),
            Behavior::StableMarket => (Trend::Stable, Trend::Stable),
        }
    }
}
