use tracing::trace;

use super::geometry::{Point, Rect};
use super::target::DropTargetId;

/// A registered drop region.
#[derive(Debug, Clone, PartialEq)]
pub struct Droppable {
    pub id: DropTargetId,
    pub rect: Rect,
    /// Container this region is nested in, e.g. the board holding a clip slot.
    pub parent: Option<DropTargetId>,
}

impl Droppable {
    pub fn new(id: DropTargetId, rect: Rect) -> Self {
        Self {
            id,
            rect,
            parent: None,
        }
    }

    pub fn nested_in(mut self, parent: DropTargetId) -> Self {
        self.parent = Some(parent);
        self
    }
}

/// Single registry of drop regions shared by the history list and the
/// board area.
///
/// 拖放目标注册表（历史列表与面板区域共用）。
#[derive(Debug, Clone, Default)]
pub struct DropTargetRegistry {
    droppables: Vec<Droppable>,
}

impl DropTargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a region, replacing any previous region with the same id.
    pub fn register(&mut self, droppable: Droppable) {
        match self.droppables.iter_mut().find(|d| d.id == droppable.id) {
            Some(existing) => *existing = droppable,
            None => self.droppables.push(droppable),
        }
    }

    pub fn unregister(&mut self, id: &DropTargetId) -> bool {
        let before = self.droppables.len();
        self.droppables.retain(|d| &d.id != id);
        before != self.droppables.len()
    }

    pub fn contains(&self, id: &DropTargetId) -> bool {
        self.droppables.iter().any(|d| &d.id == id)
    }

    pub fn children_of<'a>(&'a self, id: &'a DropTargetId) -> impl Iterator<Item = &'a Droppable> {
        self.droppables
            .iter()
            .filter(move |d| d.parent.as_ref() == Some(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Droppable> {
        self.droppables.iter()
    }

    pub fn len(&self) -> usize {
        self.droppables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.droppables.is_empty()
    }

    pub fn clear(&mut self) {
        self.droppables.clear();
    }
}

/// Picks the single most relevant drop target on every drag-over tick.
///
/// Pointer containment wins over rectangle overlap, containers narrow down to
/// their nearest child, and the last resolved target is kept while the
/// pointer crosses gaps between regions.
#[derive(Debug, Clone, Default)]
pub struct CollisionResolver {
    last_known_good: Option<DropTargetId>,
}

impl CollisionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_known_good(&self) -> Option<&DropTargetId> {
        self.last_known_good.as_ref()
    }

    pub fn reset(&mut self) {
        self.last_known_good = None;
    }

    pub fn resolve(
        &mut self,
        registry: &DropTargetRegistry,
        pointer: Option<Point>,
        dragged: Rect,
    ) -> Option<DropTargetId> {
        let candidate = pointer
            .and_then(|p| pointer_within(registry, p))
            .or_else(|| rect_intersection(registry, dragged));

        match candidate {
            Some(id) => {
                let resolved = narrow_to_child(registry, id, dragged);
                trace!(target_id = %resolved, "drop target resolved");
                self.last_known_good = Some(resolved.clone());
                Some(resolved)
            }
            None => {
                // A target that disappeared mid-drag is stale, not sticky.
                if let Some(last) = &self.last_known_good {
                    if !registry.contains(last) {
                        self.last_known_good = None;
                    }
                }
                self.last_known_good.clone()
            }
        }
    }
}

fn pointer_within(registry: &DropTargetRegistry, pointer: Point) -> Option<DropTargetId> {
    let mut hits: Vec<(&Droppable, f64)> = registry
        .iter()
        .filter(|d| d.rect.contains(pointer))
        .map(|d| (d, pointer.distance_to(d.rect.center())))
        .collect();
    hits.sort_by(|a, b| a.1.total_cmp(&b.1));
    hits.first().map(|(d, _)| d.id.clone())
}

fn rect_intersection(registry: &DropTargetRegistry, dragged: Rect) -> Option<DropTargetId> {
    let mut hits: Vec<(&Droppable, f64)> = registry
        .iter()
        .map(|d| (d, d.rect.intersection_ratio(&dragged)))
        .filter(|(_, ratio)| *ratio > 0.0)
        .collect();
    hits.sort_by(|a, b| b.1.total_cmp(&a.1));
    hits.first().map(|(d, _)| d.id.clone())
}

fn narrow_to_child(registry: &DropTargetRegistry, id: DropTargetId, dragged: Rect) -> DropTargetId {
    let center = dragged.center();
    registry
        .children_of(&id)
        .map(|child| (child, center.distance_to(child.rect.center())))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(child, _)| child.id.clone())
        .unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{BoardId, ItemId};

    fn board(id: &str) -> DropTargetId {
        DropTargetId::Board(BoardId::from(id))
    }

    fn clip(id: &str) -> DropTargetId {
        DropTargetId::ClipSlot(ItemId::from(id))
    }

    fn registry() -> DropTargetRegistry {
        let mut registry = DropTargetRegistry::new();
        registry.register(Droppable::new(
            DropTargetId::PinnedZone,
            Rect::new(0.0, 0.0, 300.0, 100.0),
        ));
        registry.register(Droppable::new(
            DropTargetId::Trash,
            Rect::new(0.0, 500.0, 300.0, 50.0),
        ));
        registry.register(Droppable::new(board("b1"), Rect::new(400.0, 0.0, 300.0, 400.0)));
        registry.register(
            Droppable::new(clip("c1"), Rect::new(410.0, 10.0, 280.0, 40.0)).nested_in(board("b1")),
        );
        registry.register(
            Droppable::new(clip("c2"), Rect::new(410.0, 300.0, 280.0, 40.0))
                .nested_in(board("b1")),
        );
        registry
    }

    fn small_rect_at(x: f64, y: f64) -> Rect {
        Rect::new(x - 5.0, y - 5.0, 10.0, 10.0)
    }

    #[test]
    fn pointer_containment_takes_priority_over_overlap() {
        let registry = registry();
        let mut resolver = CollisionResolver::new();

        // Dragged rect overlaps the trash but the pointer sits in the pinned zone.
        let resolved = resolver.resolve(
            &registry,
            Some(Point::new(50.0, 50.0)),
            Rect::new(0.0, 480.0, 300.0, 60.0),
        );
        assert_eq!(resolved, Some(DropTargetId::PinnedZone));
    }

    #[test]
    fn falls_back_to_rect_intersection_without_pointer_hits() {
        let registry = registry();
        let mut resolver = CollisionResolver::new();

        let resolved = resolver.resolve(
            &registry,
            Some(Point::new(350.0, 520.0)),
            Rect::new(250.0, 500.0, 120.0, 50.0),
        );
        assert_eq!(resolved, Some(DropTargetId::Trash));
    }

    #[test]
    fn keyboard_drags_without_pointer_use_rect_intersection() {
        let registry = registry();
        let mut resolver = CollisionResolver::new();
        let resolved = resolver.resolve(&registry, None, Rect::new(0.0, 0.0, 100.0, 50.0));
        assert_eq!(resolved, Some(DropTargetId::PinnedZone));
    }

    #[test]
    fn container_narrows_to_the_nearest_child() {
        let registry = registry();
        let mut resolver = CollisionResolver::new();

        // Pointer in the board between both clip slots, closer to c2.
        let resolved = resolver.resolve(
            &registry,
            Some(Point::new(550.0, 250.0)),
            small_rect_at(550.0, 250.0),
        );
        assert_eq!(resolved, Some(clip("c2")));
    }

    #[test]
    fn pointer_directly_over_a_child_selects_it() {
        let registry = registry();
        let mut resolver = CollisionResolver::new();

        let resolved = resolver.resolve(
            &registry,
            Some(Point::new(550.0, 30.0)),
            small_rect_at(550.0, 30.0),
        );
        assert_eq!(resolved, Some(clip("c1")));
    }

    #[test]
    fn empty_space_returns_the_last_known_good_target() {
        let registry = registry();
        let mut resolver = CollisionResolver::new();

        let first = resolver.resolve(&registry, Some(Point::new(100.0, 520.0)), small_rect_at(100.0, 520.0));
        assert_eq!(first, Some(DropTargetId::Trash));

        let gap = resolver.resolve(&registry, Some(Point::new(100.0, 300.0)), small_rect_at(100.0, 300.0));
        assert_eq!(gap, Some(DropTargetId::Trash));
    }

    #[test]
    fn nothing_resolved_without_history() {
        let registry = registry();
        let mut resolver = CollisionResolver::new();
        let resolved = resolver.resolve(&registry, Some(Point::new(100.0, 300.0)), small_rect_at(100.0, 300.0));
        assert_eq!(resolved, None);
    }

    #[test]
    fn unregistered_last_target_is_not_returned() {
        let mut registry = registry();
        let mut resolver = CollisionResolver::new();

        resolver.resolve(&registry, Some(Point::new(550.0, 30.0)), small_rect_at(550.0, 30.0));
        registry.unregister(&clip("c1"));

        let resolved = resolver.resolve(&registry, Some(Point::new(350.0, 450.0)), small_rect_at(350.0, 450.0));
        assert_eq!(resolved, None);
        assert_eq!(resolver.last_known_good(), None);
    }

    #[test]
    fn reset_forgets_the_last_target() {
        let registry = registry();
        let mut resolver = CollisionResolver::new();
        resolver.resolve(&registry, Some(Point::new(50.0, 50.0)), small_rect_at(50.0, 50.0));
        resolver.reset();
        assert_eq!(
            resolver.resolve(&registry, Some(Point::new(350.0, 450.0)), small_rect_at(350.0, 450.0)),
            None
        );
    }

    #[test]
    fn register_replaces_regions_with_the_same_id() {
        let mut registry = registry();
        let before = registry.len();
        registry.register(Droppable::new(DropTargetId::Trash, Rect::new(0.0, 0.0, 1.0, 1.0)));
        assert_eq!(registry.len(), before);
    }
}
