mod commands;
mod tessellate;

use clap::*;
use commands::TessellateCmd;
use tessera::path::FillRule;

use std::fs::File;
use std::io::prelude::*;
use std::io::{stderr, stdout, Write};

fn main() {
    env_logger::init();

    let matches = App::new("Tessera command-line interface")
        .version("0.1")
        .about("Converts SVG path data to triangle meshes")
        .subcommand(
            SubCommand::with_name("tessellate")
                .about("Tessellates paths, one per input line")
                .arg(
                    Arg::with_name("FILL")
                        .short("f")
                        .long("fill")
                        .help("Fills the paths instead of stroking them"),
                )
                .arg(
                    Arg::with_name("WIDTH")
                        .short("w")
                        .long("width")
                        .help("Sets the stroke width (4 by default)")
                        .value_name("WIDTH")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("EVEN_ODD")
                        .long("even-odd")
                        .help("Uses the even-odd fill rule"),
                )
                .arg(
                    Arg::with_name("TOLERANCE")
                        .short("t")
                        .long("tolerance")
                        .help("Sets the tolerance threshold for flattening (0.25 by default)")
                        .value_name("TOLERANCE")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("COUNT")
                        .short("c")
                        .long("count")
                        .help("Prints the number of triangles and vertices"),
                ),
        )
        .arg(
            Arg::with_name("PATH")
                .value_name("PATH")
                .help("An SVG path")
                .takes_value(true)
                .required(false),
        )
        .arg(
            Arg::with_name("INPUT")
                .help("Sets the input file to use (one path per line)")
                .short("i")
                .long("input")
                .value_name("FILE")
                .takes_value(true)
                .required(false),
        )
        .arg(
            Arg::with_name("OUTPUT")
                .help("Sets the output file to use")
                .value_name("FILE")
                .short("o")
                .long("output")
                .takes_value(true)
                .required(false),
        )
        .get_matches();

    let mut input_buffer = matches.value_of("PATH").unwrap_or("").to_string();

    if let Some(input_file) = matches.value_of("INPUT") {
        if let Ok(mut file) = File::open(input_file) {
            file.read_to_string(&mut input_buffer).unwrap();
        } else {
            writeln!(&mut stderr(), "Cannot open file {}", input_file).unwrap();
            std::process::exit(1);
        }
    }

    let mut output: Box<dyn Write> = Box::new(stdout());

    if let Some(output_file) = matches.value_of("OUTPUT") {
        if let Ok(file) = File::create(output_file) {
            output = Box::new(file);
        }
    }

    if let Some(tess_matches) = matches.subcommand_matches("tessellate") {
        let cmd = TessellateCmd {
            input: input_buffer,
            output,
            stroke: if tess_matches.is_present("FILL") {
                None
            } else {
                Some(get_width(tess_matches))
            },
            tolerance: get_tolerance(tess_matches),
            fill_rule: if tess_matches.is_present("EVEN_ODD") {
                FillRule::EvenOdd
            } else {
                FillRule::NonZero
            },
            count: tess_matches.is_present("COUNT"),
        };

        if let Err(e) = tessellate::tessellate(cmd) {
            writeln!(&mut stderr(), "{:?}", e).unwrap();
            std::process::exit(1);
        }
    }
}

fn get_tolerance(matches: &ArgMatches) -> f32 {
    let default = 0.25;
    if let Some(tolerance_str) = matches.value_of("TOLERANCE") {
        return tolerance_str.parse().unwrap_or(default);
    }
    default
}

fn get_width(matches: &ArgMatches) -> f32 {
    let default = 4.0;
    if let Some(width_str) = matches.value_of("WIDTH") {
        return width_str.parse().unwrap_or(default);
    }
    default
}
