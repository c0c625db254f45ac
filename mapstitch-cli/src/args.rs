//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

/// Options left unset fall back to the config file, then to built-in defaults.
#[derive(Debug, Parser)]
#[command(name = "mapstitch", version)]
#[command(about = "Stitch slippy-map tiles into a printable map", long_about = None)]
#[command(allow_negative_numbers = true)]
pub struct Args {
    /// Latitude of the map center in decimal degrees
    pub latitude: f64,

    /// Longitude of the map center in decimal degrees
    pub longitude: f64,

    /// Zoom level [default: 13]
    #[arg(short, long)]
    pub zoom: Option<u8>,

    /// Output size: WIDTHxHEIGHT in pixels or a paper size like a4-landscape [default: 2048x2048]
    #[arg(short, long)]
    pub size: Option<String>,

    /// Tile cache directory [default: cache]
    #[arg(short, long)]
    pub cache: Option<PathBuf>,

    /// Output image; only PNG (.png) and JPEG (.jpg, .jpeg) are supported
    #[arg(short, long, default_value = "map.png")]
    pub output: PathBuf,

    /// Pixels per inch for paper sizes [default: 150]
    #[arg(short = 'r', long)]
    pub ppi: Option<u32>,

    /// Tile provider: osm, satellite, topo, or a URL template with {x}, {y} and {z} [default: osm]
    #[arg(short, long)]
    pub provider: Option<String>,

    /// User-Agent header sent to the tile server
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Number of tiles fetched concurrently [default: 8]
    #[arg(short = 'j', long)]
    pub jobs: Option<usize>,

    /// Also write a PDF next to the image (paper sizes only, needs ImageMagick)
    #[arg(long)]
    pub pdf: bool,

    /// Config file [default: ~/.mapstitch/config.ini]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}
