//! DOM DragDrop Utilities
//!
//! HTML5 drag-and-drop helpers for list reordering.
//! Keeps gesture state in a plain value and reads DOM geometry only
//! to decide where a dragged element should land.

use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Element};

/// Data format used for the drag payload
pub const PAYLOAD_FORMAT: &str = "text/plain";

/// One in-progress drag gesture.
///
/// `origin` is the container the item was picked up from and
/// `origin_index` its zero-based position there at drag start.
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession<K, C> {
    pub item: K,
    pub origin: C,
    pub origin_index: usize,
}

impl<K, C> DragSession<K, C> {
    pub fn new(item: K, origin: C, origin_index: usize) -> Self {
        Self { item, origin, origin_index }
    }
}

/// Find the sibling the dragged element should be inserted before.
///
/// Takes `(key, vertical midpoint)` pairs for the non-dragging siblings
/// and returns the key whose midpoint lies strictly below `pointer_y`
/// with the smallest gap. `None` means append at the end.
/// Ties keep the first sibling in iteration order.
pub fn closest_following<K>(
    siblings: impl IntoIterator<Item = (K, f64)>,
    pointer_y: f64,
) -> Option<K> {
    let mut best: Option<(K, f64)> = None;
    for (key, midpoint) in siblings {
        let gap = midpoint - pointer_y;
        if gap <= 0.0 {
            continue;
        }
        match &best {
            Some((_, best_gap)) if gap >= *best_gap => {}
            _ => best = Some((key, gap)),
        }
    }
    best.map(|(key, _)| key)
}

/// Collect `(key, midpoint)` pairs for elements under `container`
/// matching `selector`. Elements without `key_attr` are skipped.
pub fn sibling_midpoints(container: &Element, selector: &str, key_attr: &str) -> Vec<(String, f64)> {
    let Ok(nodes) = container.query_selector_all(selector) else {
        return Vec::new();
    };
    let mut result = Vec::with_capacity(nodes.length() as usize);
    for i in 0..nodes.length() {
        let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let Some(key) = el.get_attribute(key_attr) else {
            continue;
        };
        let rect = el.get_bounding_client_rect();
        result.push((key, rect.top() + rect.height() / 2.0));
    }
    result
}

/// Start a move gesture carrying `payload`
pub fn start_move(ev: &DragEvent, payload: &str) {
    if let Some(dt) = ev.data_transfer() {
        let _ = dt.set_data(PAYLOAD_FORMAT, payload);
        dt.set_effect_allowed("move");
    }
}

/// Accept a move over the current target (dragover)
pub fn accept_move(ev: &DragEvent) {
    ev.prevent_default();
    if let Some(dt) = ev.data_transfer() {
        dt.set_drop_effect("move");
    }
}

/// Take the payload on drop. Empty payloads count as absent.
pub fn take_payload(ev: &DragEvent) -> Option<String> {
    ev.prevent_default();
    ev.data_transfer()
        .and_then(|dt| dt.get_data(PAYLOAD_FORMAT).ok())
        .filter(|p| !p.is_empty())
}

/// Pointer position for the proximity rule
pub fn pointer_y(ev: &DragEvent) -> f64 {
    ev.client_y() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_picks_nearest_sibling_below_pointer() {
        // Cards at midpoints 50, 150, 250
        let siblings = vec![("a", 50.0), ("b", 150.0), ("c", 250.0)];
        assert_eq!(closest_following(siblings.clone(), 0.0), Some("a"));
        assert_eq!(closest_following(siblings.clone(), 100.0), Some("b"));
        assert_eq!(closest_following(siblings.clone(), 200.0), Some("c"));
        assert_eq!(closest_following(siblings, 300.0), None);
    }

    #[test]
    fn test_midpoint_at_pointer_is_not_below() {
        let siblings = vec![("a", 100.0), ("b", 180.0)];
        assert_eq!(closest_following(siblings, 100.0), Some("b"));
    }

    #[test]
    fn test_unordered_siblings() {
        let siblings = vec![("c", 250.0), ("a", 50.0), ("b", 150.0)];
        assert_eq!(closest_following(siblings, 60.0), Some("b"));
    }

    #[test]
    fn test_tie_keeps_first() {
        let siblings = vec![("x", 120.0), ("y", 120.0)];
        assert_eq!(closest_following(siblings, 100.0), Some("x"));
    }

    #[test]
    fn test_empty_column_appends() {
        let siblings: Vec<(&str, f64)> = Vec::new();
        assert_eq!(closest_following(siblings, 10.0), None);
    }

    #[test]
    fn test_session_holds_origin() {
        let session = DragSession::new("t1", "todo", 2);
        assert_eq!(session.item, "t1");
        assert_eq!(session.origin, "todo");
        assert_eq!(session.origin_index, 2);
    }
}
