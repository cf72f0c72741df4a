//! Map-side reactions to a selection: fly-to targets, the viewport, the overlay.

use crate::domain::order::Order;
use crate::shared::{fmt, Coordinates};
use serde::Serialize;
use std::time::Duration;

pub const FLY_TO_ZOOM: f64 = 12.0;
pub const FLY_TO_DURATION: Duration = Duration::from_millis(1200);

pub const DEFAULT_CENTER: Coordinates = Coordinates::new(42.9, -76.2);
pub const DEFAULT_ZOOM: f64 = 7.0;

/// Animated camera move to a selected order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlyTo {
    pub target: Coordinates,
    pub zoom: f64,
    #[serde(serialize_with = "duration_ms")]
    pub duration: Duration,
}

impl FlyTo {
    /// `None` when either coordinate is exactly zero.
    pub fn towards(target: Coordinates) -> Option<Self> {
        if target.is_unset() {
            return None;
        }
        Some(Self {
            target,
            zoom: FLY_TO_ZOOM,
            duration: FLY_TO_DURATION,
        })
    }
}

fn duration_ms<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

/// Camera state of the map view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapViewport {
    pub center: Coordinates,
    pub zoom: f64,
}

impl Default for MapViewport {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl MapViewport {
    /// Jump to the fly-to destination (the animation is the renderer's concern).
    pub fn apply(&mut self, fly: &FlyTo) {
        self.center = fly.target;
        self.zoom = fly.zoom;
    }
}

/// Corner readout on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum MapOverlay {
    /// A selected order's position and composite rate.
    Selected {
        label: String,
        position: Coordinates,
        rate: f64,
    },
    /// Pointer position while nothing is selected.
    Pointer { position: Coordinates },
    Empty,
}

impl MapOverlay {
    pub fn new(selected: Option<&Order>, pointer: Option<Coordinates>) -> Self {
        match (selected, pointer) {
            (Some(order), _) => MapOverlay::Selected {
                label: order.label(),
                position: order.coordinates(),
                rate: order.composite_tax_rate,
            },
            (None, Some(position)) => MapOverlay::Pointer { position },
            (None, None) => MapOverlay::Empty,
        }
    }

    /// `"40.7128, -74.0060"` style position text, or an em dash.
    pub fn position_text(&self) -> String {
        match self {
            MapOverlay::Selected { position, .. } | MapOverlay::Pointer { position } => format!(
                "{}, {}",
                fmt::coordinate(position.latitude),
                fmt::coordinate(position.longitude)
            ),
            MapOverlay::Empty => "—".to_string(),
        }
    }

    pub fn rate_text(&self) -> Option<String> {
        match self {
            MapOverlay::Selected { rate, .. } => Some(fmt::rate_percent(*rate, 3)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::test_support::order;

    #[test]
    fn test_fly_to_skips_zero_axis() {
        assert!(FlyTo::towards(Coordinates::new(0.0, -74.0)).is_none());
        let fly = FlyTo::towards(Coordinates::new(40.7, -74.0)).unwrap();
        assert_eq!(fly.zoom, 12.0);
        assert_eq!(fly.duration, Duration::from_millis(1200));
    }

    #[test]
    fn test_viewport_defaults_and_apply() {
        let mut vp = MapViewport::default();
        assert_eq!(vp.center, Coordinates::new(42.9, -76.2));
        assert_eq!(vp.zoom, 7.0);
        let fly = FlyTo::towards(Coordinates::new(40.7, -74.0)).unwrap();
        vp.apply(&fly);
        assert_eq!(vp.center, fly.target);
        assert_eq!(vp.zoom, 12.0);
    }

    #[test]
    fn test_overlay_prefers_selection_over_pointer() {
        let o = order(3);
        let pointer = Some(Coordinates::new(41.0, -75.0));
        let overlay = MapOverlay::new(Some(&o), pointer);
        assert!(matches!(overlay, MapOverlay::Selected { .. }));
        assert!(overlay.rate_text().is_some());

        let overlay = MapOverlay::new(None, pointer);
        assert_eq!(overlay, MapOverlay::Pointer { position: Coordinates::new(41.0, -75.0) });
        assert_eq!(overlay.rate_text(), None);
        assert_eq!(MapOverlay::new(None, None).position_text(), "—");
    }
}
