use crate::commands::TessellateCmd;
use log::{error, info};
use tessera::math::Point;
use tessera::path::build_path;
use tessera::svg::parse_path_data;
use tessera::tessellation::geometry_builder::{simple_builder, VertexBuffers};
use tessera::tessellation::{FillOptions, FillTessellator, StrokeOptions, StrokeWidener};

use std::io;
use std::io::Write;

#[derive(Debug)]
pub enum TessError {
    Io(io::Error),
    /// Every input line failed to tessellate.
    NoValidPath,
}

impl std::convert::From<io::Error> for TessError {
    fn from(err: io::Error) -> Self {
        TessError::Io(err)
    }
}

/// Runs the whole pipeline on each input line and writes one `x,y x,y x,y`
/// line per triangle.
///
/// A malformed path only affects itself: the error is logged and the
/// remaining paths are still processed.
pub fn tessellate(mut cmd: TessellateCmd) -> Result<(), TessError> {
    let mut any_input = false;
    let mut any_ok = false;

    for (i, line) in cmd.input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        any_input = true;

        let buffers = match tessellate_one(line, &cmd) {
            Ok(buffers) => buffers,
            Err(msg) => {
                error!("path {}: {}", i + 1, msg);
                continue;
            }
        };
        any_ok = true;

        info!(
            "path {}: {} vertices, {} triangles",
            i + 1,
            buffers.vertices.len(),
            buffers.indices.len() / 3
        );

        if cmd.count {
            writeln!(
                &mut *cmd.output,
                "vertices: {} triangles: {}",
                buffers.vertices.len(),
                buffers.indices.len() / 3
            )?;
        } else {
            for triangle in buffers.indices.chunks(3) {
                let a = buffers.vertices[triangle[0] as usize];
                let b = buffers.vertices[triangle[1] as usize];
                let c = buffers.vertices[triangle[2] as usize];
                writeln!(
                    &mut *cmd.output,
                    "{},{} {},{} {},{}",
                    a.x, a.y, b.x, b.y, c.x, c.y
                )?;
            }
        }
    }

    if any_input && !any_ok {
        return Err(TessError::NoValidPath);
    }

    Ok(())
}

fn tessellate_one(src: &str, cmd: &TessellateCmd) -> Result<VertexBuffers<Point, u16>, String> {
    let commands = parse_path_data(src).map_err(|e| e.to_string())?;
    let mut path = build_path(commands).map_err(|e| e.to_string())?;

    if let Some(width) = cmd.stroke {
        let options = StrokeOptions::width(width).with_tolerance(cmd.tolerance);
        path = StrokeWidener::new()
            .widen(&path, &options)
            .map_err(|e| e.to_string())?;
    }

    let mut buffers: VertexBuffers<Point, u16> = VertexBuffers::new();
    let options = FillOptions::tolerance(cmd.tolerance).with_fill_rule(cmd.fill_rule);
    FillTessellator::new()
        .tessellate(&path, &options, &mut simple_builder(&mut buffers))
        .map_err(|e| e.to_string())?;

    Ok(buffers)
}
