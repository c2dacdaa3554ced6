//! Viewport observation primitive
//!
//! The UI layer owns the actual intersection observer. The controller tells it
//! which elements to watch and receives batches of [`IntersectionRecord`]s back.

use crate::registry::ElementHandle;

/// Options the observer should be created or configured with
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverOptions {
    /// Intersection ratio threshold
    pub threshold: f64,
    /// Root margin (CSS margin syntax)
    pub root_margin: String,
}

/// One intersection observation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionRecord {
    /// Observed element
    pub element: ElementHandle,
    /// Whether the element intersects the root
    pub is_intersecting: bool,
    /// Visible fraction of the element
    pub intersection_ratio: f64,
}

impl IntersectionRecord {
    /// Create a new record
    pub fn new(element: ElementHandle, is_intersecting: bool, intersection_ratio: f64) -> Self {
        Self {
            element,
            is_intersecting,
            intersection_ratio,
        }
    }

    /// Visible under the given threshold
    pub fn is_visible(&self, threshold: f64) -> bool {
        self.is_intersecting && self.intersection_ratio >= threshold
    }
}

/// Intersection observation primitive
pub trait ViewportObserver: Send + Sync {
    /// Start observing an element
    fn observe(&self, element: ElementHandle, options: &ObserverOptions);

    /// Stop observing an element
    fn unobserve(&self, element: ElementHandle);
}

/// Observer that does nothing. For hosts that feed intersections manually.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ViewportObserver for NoopObserver {
    fn observe(&self, _element: ElementHandle, _options: &ObserverOptions) {}

    fn unobserve(&self, _element: ElementHandle) {}
}
