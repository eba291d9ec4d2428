//! Zone table and the per-zone congestion simulator
//!
//! The zone labels shown on the map are not independently sensed: each
//! refresh cycle draws them from a weighted distribution keyed by the
//! city-wide label, purely for map variety.

use rand::RngExt;
use serde::Serialize;

use crate::classifier::CongestionLabel;

/// A fixed named geographic point within the covered city.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Zone {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

const fn zone(name: &'static str, latitude: f64, longitude: f64) -> Zone {
    Zone {
        name,
        latitude,
        longitude,
    }
}

/// Complete Ahmedabad zone coverage, fixed for the process lifetime.
pub const ZONES: [Zone; 30] = [
    // west
    zone("SG Highway", 23.0722, 72.5167),
    zone("Science City", 23.0800, 72.4940),
    zone("Thaltej", 23.0590, 72.5070),
    zone("Satellite", 23.0260, 72.5265),
    zone("Bopal", 23.0300, 72.4650),
    zone("Vastrapur", 23.0390, 72.5300),
    zone("Memnagar", 23.0520, 72.5330),
    zone("Gota", 23.0940, 72.5200),
    // central
    zone("CG Road", 23.0350, 72.5600),
    zone("Ashram Road", 23.0422, 72.5714),
    zone("Navrangpura", 23.0380, 72.5630),
    zone("Paldi", 23.0120, 72.5660),
    zone("Ellisbridge", 23.0220, 72.5700),
    zone("Income Tax Circle", 23.0395, 72.5660),
    zone("Lal Darwaja", 23.0265, 72.5830),
    // east
    zone("Maninagar", 22.9967, 72.6040),
    zone("Naroda", 23.0685, 72.6535),
    zone("Odhav", 23.0190, 72.6430),
    zone("Bapunagar", 23.0410, 72.6260),
    zone("Khokhra", 23.0030, 72.6140),
    zone("Vastral", 23.0000, 72.6500),
    // north
    zone("Chandkheda", 23.1070, 72.5800),
    zone("Motera", 23.0920, 72.5970),
    zone("Sabarmati", 23.0750, 72.5880),
    zone("Ranip", 23.0935, 72.5580),
    // south
    zone("Isanpur", 22.9770, 72.6000),
    zone("Vatva", 22.9690, 72.6350),
    zone("Jashoda Nagar", 22.9890, 72.6050),
    // outer connectors
    zone("Sarkhej", 22.9820, 72.4980),
    zone("Sanand Road", 22.9920, 72.4600),
];

/// Simulated congestion reading for one zone, recomputed every cycle.
#[derive(Debug, Clone, Serialize)]
pub struct ZoneReading {
    pub zone: Zone,
    pub label: CongestionLabel,
    pub display_size: u32,
}

/// Assign a weighted-random label to every zone.
///
/// The distribution is keyed by the city-wide label so the map leans toward
/// it without being uniform:
/// High city: 70% High / 30% Medium. Low city: 70% Low / 30% Medium.
/// Medium city: uniform over all three. The generator is injected so tests
/// can seed it; production uses the process RNG.
pub fn simulate(
    city_label: CongestionLabel,
    zones: &[Zone],
    rng: &mut impl RngExt,
) -> Vec<ZoneReading> {
    zones
        .iter()
        .map(|z| {
            let label = draw_zone_label(city_label, rng);
            ZoneReading {
                zone: *z,
                label,
                display_size: label.display_size(),
            }
        })
        .collect()
}

fn draw_zone_label(city_label: CongestionLabel, rng: &mut impl RngExt) -> CongestionLabel {
    match city_label {
        CongestionLabel::High => {
            if rng.random_range(0.0..1.0) < 0.7 {
                CongestionLabel::High
            } else {
                CongestionLabel::Medium
            }
        }
        CongestionLabel::Medium => match rng.random_range(0..3u32) {
            0 => CongestionLabel::Low,
            1 => CongestionLabel::Medium,
            _ => CongestionLabel::High,
        },
        CongestionLabel::Low => {
            if rng.random_range(0.0..1.0) < 0.7 {
                CongestionLabel::Low
            } else {
                CongestionLabel::Medium
            }
        }
    }
}
