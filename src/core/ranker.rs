use crate::core::Coordinate;
use crate::domain::model::{MarketRecord, RankedMatch};

pub const EARTH_RADIUS_MILES: f64 = 3958.8;
pub const DEFAULT_RADIUS_MILES: f64 = 25.0;

/// Great-circle distance in miles between two points, by the haversine formula.
pub fn haversine_miles(from: Coordinate, to: Coordinate) -> f64 {
    let phi1 = from.lat.to_radians();
    let phi2 = to.lat.to_radians();
    let d_phi = (to.lat - from.lat).to_radians();
    let d_lambda = (to.lon - from.lon).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    // Rounding can push a just past 1 for antipodal points.
    let a = a.min(1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_MILES * c
}

/// Rounds to one decimal place by rounding the value scaled to tenths, halves away from
/// zero (12.25 -> 12.3). The scaling happens in binary, so 1.45, stored just below the
/// half, still lands on 14.5 and rounds up to 1.5.
pub fn round_to_tenth(miles: f64) -> f64 {
    (miles * 10.0).round() / 10.0
}

/// Keeps the markets within `radius_miles` of `origin`, nearest first.
///
/// The radius test uses the exact distance and is inclusive. Matches carry the rounded
/// distance and are ordered by it; equal distances keep their load order.
pub fn rank(origin: Coordinate, markets: Vec<MarketRecord>, radius_miles: f64) -> Vec<RankedMatch> {
    let mut matches: Vec<RankedMatch> = markets
        .into_iter()
        .filter_map(|market| {
            let distance = haversine_miles(origin, market.coordinate);
            (distance <= radius_miles).then(|| RankedMatch {
                market,
                distance_miles: round_to_tenth(distance),
            })
        })
        .collect();

    matches.sort_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles));
    matches
}
