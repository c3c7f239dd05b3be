//! A parser for a whitespace-separated subset of the SVG path-data syntax.
//!
//! # Syntax
//!
//! The input is a sequence of tokens separated by whitespace. A token is
//! either a one-letter command code (case sensitive) or a coordinate pair
//! `x,y` (two comma-separated numbers with no surrounding whitespace):
//!
//! - `M`/`m`: begin a new subpath,
//! - `L`/`l`: line to,
//! - `C`/`c`: cubic bézier to (consumes three coordinate tokens),
//! - `Z`/`z`: close the current subpath,
//! - `V`/`H`: recognized but intentionally unimplemented. The token is
//!   skipped without consuming coordinates and without emitting a command,
//!   so vertical and horizontal shorthand in the input is silently dropped.
//!
//! Uppercase command codes take absolute coordinates, lowercase ones take
//! coordinates relative to the position the pen was at when the command code
//! was read. The mode established by a command code persists across all
//! following coordinate tokens until the next command code. Coordinates are
//! resolved to absolute positions at parse time: the emitted [`Command`]s
//! only carry absolute points.

use crate::path::math::{point, Point};
use crate::path::Command;

use thiserror::Error;

/// An error while tokenizing path data.
#[non_exhaustive]
#[derive(Error, Clone, Debug, PartialEq)]
pub enum ParseError {
    #[error("Token {index}: expected coordinate pair, got {src:?}.")]
    Coordinate { src: String, index: usize },
    #[error("Token {index}: invalid command {command:?}.")]
    Command { command: char, index: usize },
    #[error("Token {index}: coordinate {src:?} before any command.")]
    MissingCommand { src: String, index: usize },
    #[error("Unexpected end of path data while reading a curve.")]
    UnexpectedEnd,
}

#[derive(Copy, Clone, PartialEq)]
enum Mode {
    MoveTo,
    LineTo,
    CurveTo,
}

/// Parses one path-data string into a sequence of drawing commands.
///
/// All coordinates in the output are absolute.
pub fn parse_path_data(src: &str) -> Result<Vec<Command>, ParseError> {
    let mut commands = Vec::new();
    let mut mode = None;
    // Where relative coordinates are resolved from. Captured when a command
    // code is read: (0, 0) for an uppercase code, the current position for a
    // lowercase one.
    let mut origin = point(0.0, 0.0);
    let mut position = point(0.0, 0.0);

    let mut tokens = src.split_whitespace().enumerate();

    while let Some((index, token)) = tokens.next() {
        let mut chars = token.chars();
        let first = match chars.next() {
            Some(c) => c,
            None => continue,
        };

        if first.is_ascii_alphabetic() && chars.next().is_none() {
            match first {
                'M' | 'm' => {
                    mode = Some(Mode::MoveTo);
                    origin = relative_origin(first, position);
                }
                'L' | 'l' => {
                    mode = Some(Mode::LineTo);
                    origin = relative_origin(first, position);
                }
                'C' | 'c' => {
                    mode = Some(Mode::CurveTo);
                    origin = relative_origin(first, position);
                }
                'V' | 'H' => {
                    // Vertical/horizontal shorthand is a known gap, see the
                    // module documentation.
                }
                'Z' | 'z' => {
                    commands.push(Command::Close);
                }
                _ => {
                    return Err(ParseError::Command {
                        command: first,
                        index,
                    });
                }
            }
            continue;
        }

        let mode = match mode {
            Some(mode) => mode,
            None => {
                return Err(ParseError::MissingCommand {
                    src: token.to_string(),
                    index,
                });
            }
        };

        let to = parse_coordinate(token, index, origin)?;
        match mode {
            Mode::MoveTo => {
                commands.push(Command::MoveTo(to));
                position = to;
            }
            Mode::LineTo => {
                commands.push(Command::LineTo(to));
                position = to;
            }
            Mode::CurveTo => {
                // `to` is the first control point; two more coordinate
                // tokens complete the curve.
                let (index2, token2) = tokens.next().ok_or(ParseError::UnexpectedEnd)?;
                let ctrl2 = parse_coordinate(token2, index2, origin)?;
                let (index3, token3) = tokens.next().ok_or(ParseError::UnexpectedEnd)?;
                let end = parse_coordinate(token3, index3, origin)?;
                commands.push(Command::CurveTo(to, ctrl2, end));
                position = end;
            }
        }
    }

    Ok(commands)
}

fn relative_origin(command: char, position: Point) -> Point {
    if command.is_ascii_uppercase() {
        point(0.0, 0.0)
    } else {
        position
    }
}

fn parse_coordinate(token: &str, index: usize, origin: Point) -> Result<Point, ParseError> {
    let error = || ParseError::Coordinate {
        src: token.to_string(),
        index,
    };

    let mut fields = token.split(',');
    let x = fields.next().ok_or_else(error)?;
    let y = fields.next().ok_or_else(error)?;
    if fields.next().is_some() {
        return Err(error());
    }

    let x: f32 = x.parse().map_err(|_| error())?;
    let y: f32 = y.parse().map_err(|_| error())?;

    Ok(point(x, y) + origin.to_vector())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_square() {
        let commands = parse_path_data("M 0,0 L 10,0 L 10,10 Z").unwrap();
        assert_eq!(
            commands,
            vec![
                Command::MoveTo(point(0.0, 0.0)),
                Command::LineTo(point(10.0, 0.0)),
                Command::LineTo(point(10.0, 10.0)),
                Command::Close,
            ]
        );
    }

    #[test]
    fn relative_accumulation() {
        let commands = parse_path_data("m 0,0 l 10,0 l 0,10").unwrap();
        assert_eq!(
            commands,
            vec![
                Command::MoveTo(point(0.0, 0.0)),
                Command::LineTo(point(10.0, 0.0)),
                Command::LineTo(point(10.0, 10.0)),
            ]
        );
    }

    #[test]
    fn mode_switch_mid_stream() {
        let commands = parse_path_data("M 0,0 l 5,5 L 20,20").unwrap();
        assert_eq!(
            commands,
            vec![
                Command::MoveTo(point(0.0, 0.0)),
                Command::LineTo(point(5.0, 5.0)),
                Command::LineTo(point(20.0, 20.0)),
            ]
        );
    }

    #[test]
    fn curve_consumes_three_coordinates() {
        let commands = parse_path_data("M 0,0 C 1,1 2,2 3,3").unwrap();
        assert_eq!(
            commands,
            vec![
                Command::MoveTo(point(0.0, 0.0)),
                Command::CurveTo(point(1.0, 1.0), point(2.0, 2.0), point(3.0, 3.0)),
            ]
        );
    }

    #[test]
    fn two_curves_in_a_row() {
        let commands = parse_path_data("M 0,0 C 1,1 2,2 3,3 4,4 5,5 6,6").unwrap();
        assert_eq!(
            commands,
            vec![
                Command::MoveTo(point(0.0, 0.0)),
                Command::CurveTo(point(1.0, 1.0), point(2.0, 2.0), point(3.0, 3.0)),
                Command::CurveTo(point(4.0, 4.0), point(5.0, 5.0), point(6.0, 6.0)),
            ]
        );
    }

    #[test]
    fn relative_curve_resolves_against_the_current_point() {
        let commands = parse_path_data("M 10,10 c 1,1 2,2 3,3").unwrap();
        assert_eq!(
            commands,
            vec![
                Command::MoveTo(point(10.0, 10.0)),
                Command::CurveTo(point(11.0, 11.0), point(12.0, 12.0), point(13.0, 13.0)),
            ]
        );
    }

    #[test]
    fn vertical_horizontal_are_skipped() {
        // V and H are recognized but unimplemented: no coordinates are
        // consumed, so the pair after them resolves in the previous mode.
        let commands = parse_path_data("M 0,0 L 1,0 V H L 2,0").unwrap();
        assert_eq!(
            commands,
            vec![
                Command::MoveTo(point(0.0, 0.0)),
                Command::LineTo(point(1.0, 0.0)),
                Command::LineTo(point(2.0, 0.0)),
            ]
        );
    }

    #[test]
    fn coordinate_before_any_command() {
        assert!(matches!(
            parse_path_data("1,2 M 0,0"),
            Err(ParseError::MissingCommand { .. })
        ));
    }

    #[test]
    fn malformed_coordinates() {
        assert!(matches!(
            parse_path_data("M 1"),
            Err(ParseError::Coordinate { .. })
        ));
        assert!(matches!(
            parse_path_data("M 1,2,3"),
            Err(ParseError::Coordinate { .. })
        ));
        assert!(matches!(
            parse_path_data("M a,b"),
            Err(ParseError::Coordinate { .. })
        ));
    }

    #[test]
    fn curve_out_of_tokens() {
        assert_eq!(
            parse_path_data("M 0,0 C 1,1 2,2"),
            Err(ParseError::UnexpectedEnd),
        );
    }

    #[test]
    fn unknown_command() {
        assert!(matches!(
            parse_path_data("M 0,0 Q 1,1 2,2"),
            Err(ParseError::Command { command: 'Q', .. })
        ));
    }
}
