//! The layout tree: `Transform` nodes in a slotmap-style arena.
//!
//! Spec §9 flags the source's raw parent/child/sibling pointers as needing
//! re-architecture; we follow the Design Notes' suggested fix directly: an
//! arena (`Vec` of slots) addressed by small integer [`TransformId`]s, with
//! parent/first-child/next-sibling stored as `Option<TransformId>` rather
//! than pointers. Freed slots are pushed onto a free list and reused,
//! giving `Transform::free` real "explicitly freed" semantics without a
//! generational-index dependency the spec doesn't ask for.

use crate::error::{Result, TuiError};
use crate::geometry::{Extent, Offset, Pivot, Rect};

/// Handle to a node in a [`TransformArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TransformId(u32);

/// Alignment bitset. Horizontal bits (`LEFT`/`RIGHT`) and vertical bits
/// (`TOP`/`BOTTOM`) are independent; per axis, neither bit set means
/// centered, one bit set anchors to that edge, both bits set means
/// stretch across the parent (spec §4.4).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Alignment(u8);

impl Alignment {
    /// No anchor bits set (centered on both axes).
    pub const NONE: Alignment = Alignment(0);
    /// Anchor to the parent's left edge.
    pub const LEFT: Alignment = Alignment(1 << 0);
    /// Anchor to the parent's right edge.
    pub const RIGHT: Alignment = Alignment(1 << 1);
    /// Anchor to the parent's top edge.
    pub const TOP: Alignment = Alignment(1 << 2);
    /// Anchor to the parent's bottom edge.
    pub const BOTTOM: Alignment = Alignment(1 << 3);

    /// Union of two alignment bitsets.
    pub const fn union(self, other: Alignment) -> Alignment {
        Alignment(self.0 | other.0)
    }

    /// True if every bit in `other` is set in `self`.
    pub const fn contains(self, other: Alignment) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl std::ops::BitOr for Alignment {
    type Output = Alignment;
    fn bitor(self, rhs: Alignment) -> Alignment {
        self.union(rhs)
    }
}

/// A single layout node: local offset/pivot/extent/alignment, tree links,
/// dirty flag, and the last-resolved global rect.
#[derive(Clone, Debug)]
pub struct Transform {
    /// Offset relative to the anchor computed from `local_alignment`.
    pub local_offset: Offset,
    /// Normalized pivot point within `local_extent`.
    pub local_pivot: Pivot,
    /// Local size (ignored on a stretched axis).
    pub local_extent: Extent,
    /// Anchor/stretch bits, see [`Alignment`].
    pub local_alignment: Alignment,

    parent: Option<TransformId>,
    first_child: Option<TransformId>,
    next_sibling: Option<TransformId>,
    prev_sibling: Option<TransformId>,

    dirty: bool,
    global_rect: Rect,
}

impl Transform {
    fn new() -> Self {
        Self {
            local_offset: Offset::default(),
            local_pivot: Pivot::default(),
            local_extent: Extent::default(),
            local_alignment: Alignment::NONE,
            parent: None,
            first_child: None,
            next_sibling: None,
            prev_sibling: None,
            dirty: true,
            global_rect: Rect::default(),
        }
    }

    /// The transform's parent, if any.
    pub fn parent(&self) -> Option<TransformId> {
        self.parent
    }

    /// The transform's first child, if any.
    pub fn first_child(&self) -> Option<TransformId> {
        self.first_child
    }

    /// The transform's next sibling, if any.
    pub fn next_sibling(&self) -> Option<TransformId> {
        self.next_sibling
    }

    /// Whether this transform needs to be resolved before the next
    /// composite.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The last-resolved global rectangle.
    pub fn global_rect(&self) -> Rect {
        self.global_rect
    }
}

enum Slot {
    Occupied(Transform),
    Free(Option<u32>),
}

/// An arena of [`Transform`] nodes, addressed by [`TransformId`].
pub struct TransformArena {
    slots: Vec<Slot>,
    free_head: Option<u32>,
}

impl TransformArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self { slots: Vec::new(), free_head: None }
    }

    /// Allocate a fresh, unparented transform node.
    pub fn create(&mut self) -> TransformId {
        if let Some(idx) = self.free_head {
            let next_free = match &self.slots[idx as usize] {
                Slot::Free(n) => *n,
                Slot::Occupied(_) => unreachable!("free list pointed at occupied slot"),
            };
            self.free_head = next_free;
            self.slots[idx as usize] = Slot::Occupied(Transform::new());
            TransformId(idx)
        } else {
            let idx = self.slots.len() as u32;
            self.slots.push(Slot::Occupied(Transform::new()));
            TransformId(idx)
        }
    }

    fn get(&self, id: TransformId) -> Result<&Transform> {
        match self.slots.get(id.0 as usize) {
            Some(Slot::Occupied(t)) => Ok(t),
            _ => Err(TuiError::InvalidArgument(format!("stale transform id {:?}", id))),
        }
    }

    fn get_mut(&mut self, id: TransformId) -> Result<&mut Transform> {
        match self.slots.get_mut(id.0 as usize) {
            Some(Slot::Occupied(t)) => Ok(t),
            _ => Err(TuiError::InvalidArgument(format!("stale transform id {:?}", id))),
        }
    }

    /// Borrow a transform by id.
    pub fn transform(&self, id: TransformId) -> Result<&Transform> {
        self.get(id)
    }

    /// Borrow a transform mutably by id. Mutating `local_*` fields directly
    /// does not mark the node dirty — call [`TransformArena::mark_dirty`]
    /// after changing layout-affecting fields.
    pub fn transform_mut(&mut self, id: TransformId) -> Result<&mut Transform> {
        self.get_mut(id)
    }

    /// Detach `id` from its current parent (if any), splicing the sibling
    /// list, then append it as the last child of `new_parent` (or make it
    /// a root if `new_parent` is `None`). Marks `id` and its descendants
    /// dirty.
    pub fn set_parent(&mut self, id: TransformId, new_parent: Option<TransformId>) -> Result<()> {
        self.detach(id)?;
        if let Some(p) = new_parent {
            let mut cursor = self.get(p)?.first_child;
            if cursor.is_none() {
                self.get_mut(p)?.first_child = Some(id);
            } else {
                let mut last = cursor.unwrap();
                loop {
                    let next = self.get(last)?.next_sibling;
                    match next {
                        Some(n) => {
                            cursor = Some(n);
                            last = n;
                        }
                        None => break,
                    }
                }
                self.get_mut(last)?.next_sibling = Some(id);
                self.get_mut(id)?.prev_sibling = Some(last);
            }
            self.get_mut(id)?.parent = Some(p);
            let _ = cursor;
        }
        self.mark_dirty(id)?;
        Ok(())
    }

    /// Remove `id` from its parent's child list (if parented), clearing
    /// its parent link. Does not free the node or touch its children.
    fn detach(&mut self, id: TransformId) -> Result<()> {
        let (parent, prev, next) = {
            let t = self.get(id)?;
            (t.parent, t.prev_sibling, t.next_sibling)
        };
        if let Some(prev) = prev {
            self.get_mut(prev)?.next_sibling = next;
        } else if let Some(p) = parent {
            self.get_mut(p)?.first_child = next;
        }
        if let Some(next) = next {
            self.get_mut(next)?.prev_sibling = prev;
        }
        let t = self.get_mut(id)?;
        t.parent = None;
        t.prev_sibling = None;
        t.next_sibling = None;
        Ok(())
    }

    /// Detach every child of `id` (they become roots), marking each dirty.
    pub fn disconnect_children(&mut self, id: TransformId) -> Result<()> {
        let mut child = self.get(id)?.first_child;
        self.get_mut(id)?.first_child = None;
        while let Some(c) = child {
            let next = self.get(c)?.next_sibling;
            let t = self.get_mut(c)?;
            t.parent = None;
            t.prev_sibling = None;
            t.next_sibling = None;
            self.mark_dirty(c)?;
            child = next;
        }
        Ok(())
    }

    /// Mark `id` dirty, then recursively mark every descendant dirty too
    /// (spec §3 invariant: a transform's dirty ⇒ all descendants dirty
    /// before the next refresh).
    pub fn mark_dirty(&mut self, id: TransformId) -> Result<()> {
        self.get_mut(id)?.dirty = true;
        let children: Vec<TransformId> = self.children(id)?;
        for c in children {
            self.mark_dirty(c)?;
        }
        Ok(())
    }

    /// The children of `id`, left to right.
    pub fn children(&self, id: TransformId) -> Result<Vec<TransformId>> {
        let mut out = Vec::new();
        let mut cur = self.get(id)?.first_child;
        while let Some(c) = cur {
            out.push(c);
            cur = self.get(c)?.next_sibling;
        }
        Ok(out)
    }

    /// Free `id`'s slot for reuse. Callers must have already disconnected
    /// `id` from any parent/children relationships they care about
    /// preserving; this call unlinks it from its parent but leaves any
    /// children parented to a now-invalid id (callers should
    /// `disconnect_children` first if that matters).
    pub fn free(&mut self, id: TransformId) -> Result<()> {
        self.detach(id)?;
        self.slots[id.0 as usize] = Slot::Free(self.free_head);
        self.free_head = Some(id.0);
        Ok(())
    }

    /// Resolve `id`'s global rect given its parent rect (or the window
    /// extent, as a rect at the origin, for a root node) if `id` is dirty,
    /// then always recurse into every child against the (possibly reused)
    /// resolved rect. Clears `id`'s dirty flag.
    ///
    /// The recursion does not stop at a non-dirty node: a node can be
    /// clean while a descendant added after its own last resolve (e.g. a
    /// control created mid-session and parented under an already-resolved
    /// root) is freshly dirty, and that descendant would never be visited
    /// if `resolve` only ever entered through a dirty ancestor.
    pub fn resolve(&mut self, id: TransformId, parent_rect: Rect) -> Result<()> {
        let dirty = self.get(id)?.dirty;
        let global = if dirty {
            let (local_offset, local_pivot, local_extent, alignment) = {
                let t = self.get(id)?;
                (t.local_offset, t.local_pivot, t.local_extent, t.local_alignment)
            };

            let (x, w) = resolve_axis(
                parent_rect.left(),
                parent_rect.extent.w as i32,
                local_offset.x,
                local_extent.w as i32,
                local_pivot.x,
                alignment.contains(Alignment::LEFT),
                alignment.contains(Alignment::RIGHT),
            );
            let (y, h) = resolve_axis(
                parent_rect.top(),
                parent_rect.extent.h as i32,
                local_offset.y,
                local_extent.h as i32,
                local_pivot.y,
                alignment.contains(Alignment::TOP),
                alignment.contains(Alignment::BOTTOM),
            );

            let global = Rect::new(x, y, w.max(0) as u32, h.max(0) as u32);
            let t = self.get_mut(id)?;
            t.global_rect = global;
            t.dirty = false;
            global
        } else {
            self.get(id)?.global_rect
        };

        let children = self.children(id)?;
        for c in children {
            self.resolve(c, global)?;
        }
        Ok(())
    }
}

impl Default for TransformArena {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve one axis per spec §4.4. `anchor_near`/`anchor_far` correspond to
/// left/top and right/bottom respectively.
#[allow(clippy::too_many_arguments)]
fn resolve_axis(
    parent_pos: i32,
    parent_size: i32,
    local_pos: i32,
    local_size: i32,
    pivot: f32,
    anchor_near: bool,
    anchor_far: bool,
) -> (i32, i32) {
    match (anchor_near, anchor_far) {
        (true, true) => {
            // Stretched across the parent.
            let pos = parent_pos + local_pos;
            let size = parent_size - local_size - local_pos;
            (pos, size)
        }
        (true, false) => {
            let pos = parent_pos + local_pos - (pivot * local_size as f32) as i32;
            (pos, local_size)
        }
        (false, true) => {
            let pos = parent_pos + parent_size + local_pos - (pivot * local_size as f32) as i32;
            (pos, local_size)
        }
        (false, false) => {
            let pos = parent_pos + (parent_size + local_size) / 2 + local_pos - (pivot * local_size as f32) as i32;
            (pos, local_size)
        }
    }
}
