use crate::math::Point;

/// Represents an event or edge of a path.
///
/// Events are guaranteed to be contiguous within a subpath: the `from` point
/// of each edge equals the `to` point of the previous one, the first edge
/// starts at the `Begin` position and `End` carries both the last position
/// and the first one (to close the subpath with, if `close` is set).
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PathEvent {
    Begin {
        at: Point,
    },
    Line {
        from: Point,
        to: Point,
    },
    Cubic {
        from: Point,
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    },
    End {
        last: Point,
        first: Point,
        close: bool,
    },
}

impl PathEvent {
    pub fn is_edge(&self) -> bool {
        matches!(
            self,
            PathEvent::Line { .. } | PathEvent::Cubic { .. } | PathEvent::End { close: true, .. }
        )
    }

    pub fn from(&self) -> Point {
        match *self {
            PathEvent::Line { from, .. }
            | PathEvent::Cubic { from, .. }
            | PathEvent::Begin { at: from }
            | PathEvent::End { last: from, .. } => from,
        }
    }

    pub fn to(&self) -> Point {
        match *self {
            PathEvent::Line { to, .. }
            | PathEvent::Cubic { to, .. }
            | PathEvent::Begin { at: to }
            | PathEvent::End { first: to, .. } => to,
        }
    }
}
