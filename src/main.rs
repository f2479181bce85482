// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use pico_args::Arguments;

const HELP: &str = "\
northarrow creates rotated north-arrow graphics for map rendering.

USAGE:
  northarrow [OPTIONS] --width W --height H <graphic> <out-dir>

  <graphic> is a path relative to the resources directory, a 'file:' URL
  inside of it, or an 'http'/'https' URL.

OPTIONS:
  -h, --help                        Prints help information
  -V, --version                     Prints version information

  -w, --width LENGTH                Sets the output width
                                    [values: 1..4294967295 (inclusive)]
      --height LENGTH               Sets the output height
                                    [values: 1..4294967295 (inclusive)]
  -r, --rotation DEGREES            Sets the clockwise rotation angle
                                    [default: 0]
  --resources-dir DIR               Sets a directory local graphics are loaded from
                                    [default: current directory]
  --dpi DPI                         Sets the resolution used for absolute units
                                    [default: 96] [possible values: 10..4000 (inclusive)]
  --font-size SIZE                  Sets the font size used for 'em' and 'ex' units
                                    [default: 12] [possible values: 1..192 (inclusive)]
  --indent INDENT                   Sets the XML nodes indent
                                    [values: none, 0, 1, 2, 3, 4, tabs] [default: 4]
  --attrs-indent INDENT             Sets the XML attributes indent
                                    [values: none, 0, 1, 2, 3, 4, tabs] [default: none]
  --timeout SECONDS                 Sets the HTTP request timeout
                                    [default: 30]
  --quiet                           Disables warnings

ARGS:
  <graphic>                         Source graphic
  <out-dir>                         Directory the new file will be created in
";

#[derive(Debug)]
struct Args {
    width: u32,
    height: u32,
    rotation: northarrow::Rotation,
    resources_dir: Option<PathBuf>,
    dpi: u32,
    font_size: u32,
    indent: northarrow::Indent,
    attrs_indent: northarrow::Indent,
    timeout: u64,
    quiet: bool,

    graphic: String,
    out_dir: PathBuf,
}

fn collect_args() -> Result<Args, pico_args::Error> {
    let mut input = Arguments::from_env();

    if input.contains(["-h", "--help"]) {
        print!("{}", HELP);
        process::exit(0);
    }

    if input.contains(["-V", "--version"]) {
        println!("{}", env!("CARGO_PKG_VERSION"));
        process::exit(0);
    }

    Ok(Args {
        width: input.value_from_fn(["-w", "--width"], parse_length)?,
        height: input.value_from_fn("--height", parse_length)?,
        rotation: input
            .opt_value_from_fn(["-r", "--rotation"], parse_rotation)?
            .unwrap_or_default(),
        resources_dir: input.opt_value_from_str("--resources-dir")?,
        dpi: input.opt_value_from_fn("--dpi", parse_dpi)?.unwrap_or(96),
        font_size: input
            .opt_value_from_fn("--font-size", parse_font_size)?
            .unwrap_or(12),
        indent: input
            .opt_value_from_fn("--indent", parse_indent)?
            .unwrap_or(northarrow::Indent::Spaces(4)),
        attrs_indent: input
            .opt_value_from_fn("--attrs-indent", parse_indent)?
            .unwrap_or(northarrow::Indent::None),
        timeout: input
            .opt_value_from_fn("--timeout", parse_timeout)?
            .unwrap_or(30),
        quiet: input.contains("--quiet"),

        graphic: input.free_from_str()?,
        out_dir: input.free_from_str()?,
    })
}

fn parse_length(s: &str) -> Result<u32, String> {
    let n: u32 = s.parse().map_err(|_| "invalid length")?;

    if n > 0 {
        Ok(n)
    } else {
        Err("LENGTH cannot be zero".to_string())
    }
}

fn parse_rotation(s: &str) -> Result<northarrow::Rotation, String> {
    let n: f64 = s.parse().map_err(|_| "invalid rotation")?;
    northarrow::Rotation::from_degrees(n).ok_or_else(|| "rotation must be finite".to_string())
}

fn parse_dpi(s: &str) -> Result<u32, String> {
    let n: u32 = s.parse().map_err(|_| "invalid number")?;

    if (10..=4000).contains(&n) {
        Ok(n)
    } else {
        Err("DPI out of bounds".to_string())
    }
}

fn parse_font_size(s: &str) -> Result<u32, String> {
    let n: u32 = s.parse().map_err(|_| "invalid number")?;

    if n > 0 && n <= 192 {
        Ok(n)
    } else {
        Err("font size out of bounds".to_string())
    }
}

fn parse_indent(s: &str) -> Result<northarrow::Indent, String> {
    let indent = match s {
        "none" => northarrow::Indent::None,
        "0" => northarrow::Indent::Spaces(0),
        "1" => northarrow::Indent::Spaces(1),
        "2" => northarrow::Indent::Spaces(2),
        "3" => northarrow::Indent::Spaces(3),
        "4" => northarrow::Indent::Spaces(4),
        "tabs" => northarrow::Indent::Tabs,
        _ => return Err("invalid INDENT value".to_string()),
    };

    Ok(indent)
}

fn parse_timeout(s: &str) -> Result<u64, String> {
    s.parse().map_err(|_| "invalid timeout".to_string())
}

fn main() {
    let args = match collect_args() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: {}.", e);
            process::exit(1);
        }
    };

    if !args.quiet {
        if let Ok(()) = log::set_logger(&LOGGER) {
            log::set_max_level(log::LevelFilter::Warn);
        }
    }

    match process(args) {
        Ok(path) => println!("{}", path.display()),
        Err(e) => {
            eprintln!("Error: {}.", e);
            process::exit(1);
        }
    }
}

fn process(args: Args) -> Result<PathBuf, String> {
    let size = northarrow::Size::new(args.width, args.height)
        .ok_or_else(|| "invalid output size".to_string())?;

    let resources_dir = match args.resources_dir {
        Some(dir) => dir,
        None => std::env::current_dir().map_err(|e| e.to_string())?,
    };

    let opt = northarrow::Options {
        resources_dir: Some(resources_dir),
        dpi: args.dpi as f64,
        font_size: args.font_size as f64,
        write: northarrow::WriteOptions {
            use_single_quote: false,
            indent: args.indent,
            attributes_indent: args.attrs_indent,
        },
        ..northarrow::Options::default()
    };

    let timeout = if args.timeout == 0 {
        None
    } else {
        Some(Duration::from_secs(args.timeout))
    };
    let http = northarrow::ReqwestClient::new(timeout).map_err(|e| e.to_string())?;

    northarrow::create(
        size,
        &args.graphic,
        args.rotation,
        &args.out_dir,
        &opt,
        &http,
    )
    .map_err(|e| e.to_string())
}

/// A simple stderr logger.
static LOGGER: SimpleLogger = SimpleLogger;
struct SimpleLogger;
impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::LevelFilter::Warn
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            let target = if !record.target().is_empty() {
                record.target()
            } else {
                record.module_path().unwrap_or_default()
            };

            let line = record.line().unwrap_or(0);
            let args = record.args();

            match record.level() {
                log::Level::Error => eprintln!("Error (in {}:{}): {}", target, line, args),
                log::Level::Warn => eprintln!("Warning (in {}:{}): {}", target, line, args),
                log::Level::Info => eprintln!("Info (in {}:{}): {}", target, line, args),
                log::Level::Debug => eprintln!("Debug (in {}:{}): {}", target, line, args),
                log::Level::Trace => eprintln!("Trace (in {}:{}): {}", target, line, args),
            }
        }
    }

    fn flush(&self) {}
}
