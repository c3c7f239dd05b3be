use std::io;
use tessera::path::FillRule;

pub struct TessellateCmd {
    /// One path-data string per line.
    pub input: String,
    pub output: Box<dyn io::Write>,
    /// Stroke width, or `None` to fill the path instead of stroking it.
    pub stroke: Option<f32>,
    pub tolerance: f32,
    pub fill_rule: FillRule,
    pub count: bool,
}
