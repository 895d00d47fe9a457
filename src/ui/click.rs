//! Click-region router: rectangle → action bindings for pointer input.

use crate::geometry::Rect;

type Action<S> = Box<dyn FnMut(&mut S)>;
type Gate<S> = Box<dyn Fn(&S) -> bool>;

/// One registered binding.
pub struct ClickRegion<S> {
    pub rect: Rect,
    gate: Option<Gate<S>>,
    action: Action<S>,
}

impl<S> ClickRegion<S> {
    fn is_live(&self, state: &S) -> bool {
        self.gate.as_ref().is_none_or(|gate| gate(state))
    }
}

/// Ordered list of click regions over a state `S`.
///
/// Regions are never deduplicated or validated; overlapping regions all fire.
pub struct ClickRouter<S> {
    regions: Vec<ClickRegion<S>>,
}

impl<S> Default for ClickRouter<S> {
    fn default() -> Self {
        Self { regions: Vec::new() }
    }
}

impl<S> ClickRouter<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a region that is always live.
    pub fn register(&mut self, rect: Rect, action: impl FnMut(&mut S) + 'static) {
        self.regions.push(ClickRegion { rect, gate: None, action: Box::new(action) });
    }

    /// Append a region that only fires while `gate` holds.
    pub fn register_gated(
        &mut self,
        rect: Rect,
        gate: impl Fn(&S) -> bool + 'static,
        action: impl FnMut(&mut S) + 'static,
    ) {
        self.regions.push(ClickRegion {
            rect,
            gate: Some(Box::new(gate)),
            action: Box::new(action),
        });
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Indices of the live regions containing `point`, in registration order.
    pub fn hits(&self, point: [f32; 2], state: &S) -> Vec<usize> {
        self.regions
            .iter()
            .enumerate()
            .filter(|(_, r)| r.rect.contains(point) && r.is_live(state))
            .map(|(i, _)| i)
            .collect()
    }

    /// Run the action of every live region containing `point`.
    ///
    /// Hits and gates are evaluated against the state as it was before the
    /// first action runs, so an action that changes gated state only affects
    /// later dispatches.
    pub fn dispatch(&mut self, point: [f32; 2], state: &mut S) {
        let hits = self.hits(point, state);
        tracing::trace!(x = point[0], y = point[1], hits = hits.len(), "click dispatch");
        for i in hits {
            (self.regions[i].action)(state);
        }
    }
}
