//! Arena-backed network of control points and segments.
//!
//! # Data layout
//!
//! Points and segments live in `Vec` arenas indexed by [`PointId`] and
//! [`SegmentId`]; the `(from, to)` pair index is an `FxHashMap` because the
//! engine's hot lookup is "the segment between these two points".  Each point
//! additionally carries the list of its outgoing segments, which is what the
//! routing builder walks when reversing the edge set.
//!
//! Ids are only ever minted by `add_point`/`add_segment`, so accessors index
//! the arenas directly; handing a foreign id to a network panics like any
//! out-of-bounds slice access would.

use rustc_hash::FxHashMap;

use agv_core::{Coord, PointId, SegmentId};

use crate::segment::Segment;
use crate::{NetError, NetResult};

// ── ControlPoint ──────────────────────────────────────────────────────────────

/// A network node.  Admission, handoff, and termination all happen at
/// control points.
#[derive(Debug, Clone, Default)]
pub struct ControlPoint {
    pub pos: Coord,
    /// Admissible as a route endpoint (the destination set of the routing
    /// builder is exactly the points with this flag).
    pub inout: bool,
    pub region: Option<String>,
    pub kind:   Option<String>,
}

impl ControlPoint {
    pub fn new(pos: Coord) -> Self {
        Self { pos, ..Default::default() }
    }

    pub fn entry_exit(mut self) -> Self {
        self.inout = true;
        self
    }
}

// ── Network ───────────────────────────────────────────────────────────────────

/// Container of control points and segments, keyed by compact integer ids.
#[derive(Default, Debug)]
pub struct Network {
    points:   Vec<ControlPoint>,
    names:    Vec<String>,
    name_idx: FxHashMap<String, PointId>,

    segments:  Vec<Segment>,
    pair_idx:  FxHashMap<(PointId, PointId), SegmentId>,
    out_segs:  Vec<Vec<SegmentId>>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Points ────────────────────────────────────────────────────────────

    /// Add a named control point and return its id.
    ///
    /// Errors on a duplicate name or when the 16-bit id space is exhausted.
    pub fn add_point(&mut self, name: impl Into<String>, point: ControlPoint) -> NetResult<PointId> {
        let name = name.into();
        if self.name_idx.contains_key(&name) {
            return Err(NetError::DuplicatePoint(name));
        }
        let id = PointId::try_from(self.points.len())
            .map_err(|_| NetError::TooManyPoints(self.points.len() + 1))?;
        self.points.push(point);
        self.names.push(name.clone());
        self.name_idx.insert(name, id);
        self.out_segs.push(Vec::new());
        Ok(id)
    }

    #[inline]
    pub fn point(&self, id: PointId) -> &ControlPoint {
        &self.points[id.index()]
    }

    #[inline]
    pub fn point_name(&self, id: PointId) -> &str {
        &self.names[id.index()]
    }

    /// Reverse direction of the name↔id mapping.
    pub fn point_id(&self, name: &str) -> Option<PointId> {
        self.name_idx.get(name).copied()
    }

    #[inline]
    pub fn pos(&self, id: PointId) -> Coord {
        self.points[id.index()].pos
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn contains_point(&self, id: PointId) -> bool {
        id.index() < self.points.len()
    }

    /// Ids of all points flagged as entry/exit, in ascending order.
    pub fn entry_exit_points(&self) -> Vec<PointId> {
        (0..self.points.len())
            .filter(|&i| self.points[i].inout)
            .map(|i| PointId(i as u16))
            .collect()
    }

    // ── Segments ──────────────────────────────────────────────────────────

    /// Add a segment, keyed by its `(start, end)` pair.
    ///
    /// Idempotent: if a segment already exists for the pair, the existing
    /// one is retained, the new one is discarded, and the existing id is
    /// returned.
    pub fn add_segment(&mut self, segment: Segment) -> SegmentId {
        let key = (segment.start, segment.end);
        if let Some(&existing) = self.pair_idx.get(&key) {
            return existing;
        }
        let id = SegmentId(self.segments.len() as u32);
        self.out_segs[segment.start.index()].push(id);
        self.pair_idx.insert(key, id);
        self.segments.push(segment);
        id
    }

    #[inline]
    pub fn segment(&self, id: SegmentId) -> &Segment {
        &self.segments[id.index()]
    }

    #[inline]
    pub fn segment_mut(&mut self, id: SegmentId) -> &mut Segment {
        &mut self.segments[id.index()]
    }

    /// The segment id for `(from, to)`, if one exists.
    pub fn segment_between(&self, from: PointId, to: PointId) -> Option<SegmentId> {
        self.pair_idx.get(&(from, to)).copied()
    }

    /// Like [`segment_between`](Self::segment_between) but resolving to the
    /// segment itself, with a no-such-segment error.
    pub fn get_segment(&self, from: PointId, to: PointId) -> NetResult<&Segment> {
        self.segment_between(from, to)
            .map(|id| self.segment(id))
            .ok_or(NetError::NoSuchSegment { from, to })
    }

    pub fn segment_exists(&self, from: PointId, to: PointId) -> bool {
        self.pair_idx.contains_key(&(from, to))
    }

    /// Iterate over all segments with their ids, in insertion order.
    pub fn segments(&self) -> impl Iterator<Item = (SegmentId, &Segment)> {
        self.segments
            .iter()
            .enumerate()
            .map(|(i, s)| (SegmentId(i as u32), s))
    }

    /// Outgoing segments of `point`, in insertion order.
    #[inline]
    pub fn out_segments(&self, point: PointId) -> &[SegmentId] {
        &self.out_segs[point.index()]
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }
}
