use clap::{App, Arg, ArgMatches};
use std::fmt::Display;
use std::process;
use std::str::FromStr;
use tilebrot::{Formula, RenderConfig, TileAddress, TileRenderer};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn validate<T>(s: &str) -> Result<(), String>
where
    T: FromStr,
    T::Err: Display,
{
    T::from_str(s).map(|_| ()).map_err(|e| e.to_string())
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const TILE: &str = "tile";
const FORMULA: &str = "formula";
const THREADS: &str = "threads";
const VERBOSE: &str = "verbose";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("tilebrot")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Renders one slippy-map tile of the Mandelbrot set")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file; the format follows the extension"),
        )
        .arg(
            Arg::with_name(TILE)
                .required(false)
                .long(TILE)
                .short("t")
                .takes_value(true)
                .default_value("0/0/0")
                .validator(|s| validate::<TileAddress>(&s))
                .help("Tile address, as zoom/x/y"),
        )
        .arg(
            Arg::with_name(FORMULA)
                .required(false)
                .long(FORMULA)
                .short("f")
                .takes_value(true)
                .default_value("mandelbrot")
                .validator(|s| validate::<Formula>(&s))
                .help("Escape-time formula: mandelbrot or mandelbox"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("j")
                .takes_value(true)
                .default_value("1")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to render with"),
        )
        .arg(
            Arg::with_name(VERBOSE)
                .long(VERBOSE)
                .short("v")
                .help("Log each render at debug level"),
        )
        .get_matches()
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(matches: &ArgMatches) -> Result<(), failure::Error> {
    let address = TileAddress::from_str(matches.value_of(TILE).unwrap_or("0/0/0"))?;
    let formula = Formula::from_str(matches.value_of(FORMULA).unwrap_or("mandelbrot"))?;
    let threads = usize::from_str(matches.value_of(THREADS).unwrap_or("1"))?;
    let output = matches.value_of(OUTPUT).unwrap_or_default();

    let renderer = TileRenderer::new(RenderConfig::with_formula(formula));
    let tile = renderer.render_threaded(&address, threads)?;
    tile.save(output)?;

    info!(tile = %address, %formula, output, "wrote tile");
    Ok(())
}

fn main() {
    let matches = args();
    init_logging(matches.is_present(VERBOSE));

    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        process::exit(1);
    }
}
