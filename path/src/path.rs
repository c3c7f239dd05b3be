//! The default path data structure.

use crate::events::PathEvent;
use crate::math::{point, Point};

/// Path verbs, stored in a separate array from the points.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Verb {
    LineTo,
    CubicTo,
    Begin,
    Close,
    End,
}

/// A simple path data structure.
///
/// `Path` stores the points and verbs of any number of subpaths and can be
/// iterated over as a sequence of [`PathEvent`]s. It is immutable once
/// built: use a [`Builder`] (or [`crate::commands::build_path`]) to create
/// one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    points: Box<[Point]>,
    verbs: Box<[Verb]>,
}

impl Path {
    /// Creates an empty path.
    pub fn new() -> Path {
        Path {
            points: Box::new([]),
            verbs: Box::new([]),
        }
    }

    /// Creates a [`Builder`] for this type of path.
    pub fn builder() -> Builder {
        Builder::new()
    }

    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    /// Iterates over the events of the path.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.points, &self.verbs)
    }
}

impl<'l> IntoIterator for &'l Path {
    type Item = PathEvent;
    type IntoIter = Iter<'l>;

    fn into_iter(self) -> Iter<'l> {
        self.iter()
    }
}

/// Builds a `Path`.
///
/// Subpaths are delimited with matching `begin`/`end` pairs; edges can only
/// be added in between. Misuse is caught with debug assertions; for building
/// from untrusted command sequences see [`crate::commands::build_path`]
/// which reports errors instead.
#[derive(Clone)]
pub struct Builder {
    points: Vec<Point>,
    verbs: Vec<Verb>,
    first: Point,
    in_subpath: bool,
}

impl Builder {
    pub fn new() -> Self {
        Builder {
            points: Vec::new(),
            verbs: Vec::new(),
            first: point(0.0, 0.0),
            in_subpath: false,
        }
    }

    pub fn with_capacity(points: usize, edges: usize) -> Self {
        Builder {
            points: Vec::with_capacity(points),
            verbs: Vec::with_capacity(edges),
            first: point(0.0, 0.0),
            in_subpath: false,
        }
    }

    /// Starts a new subpath at the given position.
    pub fn begin(&mut self, at: Point) {
        debug_assert!(!self.in_subpath);
        self.in_subpath = true;

        self.first = at;
        self.points.push(at);
        self.verbs.push(Verb::Begin);
    }

    /// Ends the current subpath, optionally closing it.
    pub fn end(&mut self, close: bool) {
        debug_assert!(self.in_subpath);
        self.in_subpath = false;

        if close {
            self.points.push(self.first);
        }
        self.verbs.push(if close { Verb::Close } else { Verb::End });
    }

    /// Adds a line segment to the current subpath.
    pub fn line_to(&mut self, to: Point) {
        debug_assert!(self.in_subpath);

        self.points.push(to);
        self.verbs.push(Verb::LineTo);
    }

    /// Adds a cubic bézier segment to the current subpath.
    pub fn cubic_bezier_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        debug_assert!(self.in_subpath);

        self.points.push(ctrl1);
        self.points.push(ctrl2);
        self.points.push(to);
        self.verbs.push(Verb::CubicTo);
    }

    pub fn build(mut self) -> Path {
        if self.in_subpath {
            self.end(false);
        }
        Path {
            points: self.points.into_boxed_slice(),
            verbs: self.verbs.into_boxed_slice(),
        }
    }
}

impl Default for Builder {
    fn default() -> Self {
        Builder::new()
    }
}

/// An iterator of the events of a `Path`.
#[derive(Clone)]
pub struct Iter<'l> {
    points: core::slice::Iter<'l, Point>,
    verbs: core::slice::Iter<'l, Verb>,
    current: Point,
    first: Point,
}

impl<'l> Iter<'l> {
    fn new(points: &'l [Point], verbs: &'l [Verb]) -> Self {
        Iter {
            points: points.iter(),
            verbs: verbs.iter(),
            current: point(0.0, 0.0),
            first: point(0.0, 0.0),
        }
    }

    fn next_point(&mut self) -> Point {
        *self.points.next().unwrap_or(&point(0.0, 0.0))
    }
}

impl<'l> Iterator for Iter<'l> {
    type Item = PathEvent;

    fn next(&mut self) -> Option<PathEvent> {
        match self.verbs.next() {
            Some(&Verb::Begin) => {
                self.current = self.next_point();
                self.first = self.current;
                Some(PathEvent::Begin { at: self.current })
            }
            Some(&Verb::LineTo) => {
                let from = self.current;
                self.current = self.next_point();
                Some(PathEvent::Line {
                    from,
                    to: self.current,
                })
            }
            Some(&Verb::CubicTo) => {
                let from = self.current;
                let ctrl1 = self.next_point();
                let ctrl2 = self.next_point();
                self.current = self.next_point();
                Some(PathEvent::Cubic {
                    from,
                    ctrl1,
                    ctrl2,
                    to: self.current,
                })
            }
            Some(&Verb::Close) => {
                let last = self.current;
                let _ = self.next_point();
                self.current = self.first;
                Some(PathEvent::End {
                    last,
                    first: self.first,
                    close: true,
                })
            }
            Some(&Verb::End) => {
                let last = self.current;
                self.current = self.first;
                Some(PathEvent::End {
                    last,
                    first: self.first,
                    close: false,
                })
            }
            None => None,
        }
    }
}
