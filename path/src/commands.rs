//! Building a [`Path`] from a sequence of drawing commands.
//!
//! This is the state machine between the path-data parser and the path data
//! structure: commands with resolved absolute coordinates come in, finalized
//! subpaths come out. Unlike [`crate::path::Builder`], which expects
//! well-formed input, `build_path` reports out-of-sequence commands as
//! errors.

use crate::math::Point;
use crate::path::Path;

/// A single drawing command with resolved absolute coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    /// Begin a new subpath at the given position.
    MoveTo(Point),
    /// Add a line segment to the given position.
    LineTo(Point),
    /// Add a cubic bézier segment with the given control points and endpoint.
    CurveTo(Point, Point, Point),
    /// Mark the current subpath as closed.
    ///
    /// Closing does not terminate the subpath: segments may still be added
    /// to it, and the subpath ends at the next `MoveTo` or at the end of the
    /// command sequence.
    Close,
}

/// An error while assembling commands into a path.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BuildError {
    /// A `LineTo` or `CurveTo` command was received while no subpath was
    /// open to extend.
    MissingMoveTo,
}

impl core::fmt::Display for BuildError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BuildError::MissingMoveTo => {
                write!(f, "Drawing command without a preceding move-to")
            }
        }
    }
}

impl std::error::Error for BuildError {}

/// Assembles a sequence of drawing commands into a `Path`.
///
/// Each subpath is finalized with the end style accumulated since it was
/// started: closed if a [`Command::Close`] was seen, open otherwise.
pub fn build_path<Cmds>(commands: Cmds) -> Result<Path, BuildError>
where
    Cmds: IntoIterator<Item = Command>,
{
    let mut builder = Path::builder();
    let mut in_subpath = false;
    let mut pending_close = false;

    for command in commands {
        match command {
            Command::MoveTo(to) => {
                if in_subpath {
                    builder.end(pending_close);
                }
                builder.begin(to);
                in_subpath = true;
                pending_close = false;
            }
            Command::LineTo(to) => {
                if !in_subpath {
                    return Err(BuildError::MissingMoveTo);
                }
                builder.line_to(to);
            }
            Command::CurveTo(ctrl1, ctrl2, to) => {
                if !in_subpath {
                    return Err(BuildError::MissingMoveTo);
                }
                builder.cubic_bezier_to(ctrl1, ctrl2, to);
            }
            Command::Close => {
                pending_close = true;
            }
        }
    }

    if in_subpath {
        builder.end(pending_close);
    }

    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::point;
    use crate::PathEvent;

    #[test]
    fn closed_square() {
        let path = build_path(vec![
            Command::MoveTo(point(0.0, 0.0)),
            Command::LineTo(point(10.0, 0.0)),
            Command::LineTo(point(10.0, 10.0)),
            Command::Close,
        ])
        .unwrap();

        let events: Vec<PathEvent> = path.iter().collect();
        assert_eq!(
            events,
            vec![
                PathEvent::Begin {
                    at: point(0.0, 0.0)
                },
                PathEvent::Line {
                    from: point(0.0, 0.0),
                    to: point(10.0, 0.0)
                },
                PathEvent::Line {
                    from: point(10.0, 0.0),
                    to: point(10.0, 10.0)
                },
                PathEvent::End {
                    last: point(10.0, 10.0),
                    first: point(0.0, 0.0),
                    close: true
                },
            ]
        );
    }

    #[test]
    fn close_does_not_terminate() {
        // Segments after a close still belong to the same subpath, which
        // stays marked as closed.
        let path = build_path(vec![
            Command::MoveTo(point(0.0, 0.0)),
            Command::LineTo(point(10.0, 0.0)),
            Command::Close,
            Command::LineTo(point(5.0, 5.0)),
        ])
        .unwrap();

        let events: Vec<PathEvent> = path.iter().collect();
        assert_eq!(events.len(), 4);
        assert!(matches!(events[2], PathEvent::Line { .. }));
        assert!(matches!(events[3], PathEvent::End { close: true, .. }));
    }

    #[test]
    fn move_to_starts_a_new_subpath() {
        let path = build_path(vec![
            Command::MoveTo(point(0.0, 0.0)),
            Command::LineTo(point(1.0, 0.0)),
            Command::MoveTo(point(5.0, 0.0)),
            Command::LineTo(point(6.0, 0.0)),
            Command::Close,
        ])
        .unwrap();

        let closed: Vec<bool> = path
            .iter()
            .filter_map(|evt| match evt {
                PathEvent::End { close, .. } => Some(close),
                _ => None,
            })
            .collect();
        assert_eq!(closed, vec![false, true]);
    }

    #[test]
    fn line_to_without_move_to() {
        assert_eq!(
            build_path(vec![Command::LineTo(point(1.0, 0.0))]),
            Err(BuildError::MissingMoveTo),
        );
        assert_eq!(
            build_path(vec![Command::CurveTo(
                point(1.0, 0.0),
                point(2.0, 0.0),
                point(3.0, 0.0)
            )]),
            Err(BuildError::MissingMoveTo),
        );
    }

    #[test]
    fn lone_close_is_a_no_op() {
        let path = build_path(vec![Command::Close]).unwrap();
        assert!(path.is_empty());
    }
}
