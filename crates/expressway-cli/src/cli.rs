use clap::{Parser, Subcommand};
use expressway_core::models::Coordinate;
use std::path::PathBuf;

/// Expressway - Edit Vietnam expressway line geometries
#[derive(Parser, Debug)]
#[command(name = "expressway")]
#[command(about = "Edit Vietnam expressway line geometries", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Show the result of an edit without saving it
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// GeoJSON data file to edit directly
    #[arg(long, global = true, value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    /// Go through a running server instead of the data file
    ///
    /// Without a URL the configured server_url is used.
    #[arg(long, global = true, value_name = "URL", num_args = 0..=1)]
    pub server: Option<Option<String>>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all expressways
    List,

    /// Show one expressway and its vertices
    Show(ShowArgs),

    /// Reshape or rename an expressway and save it
    Edit(EditArgs),

    /// Draw a new expressway from a list of points
    Add(AddArgs),

    /// List province names from the boundary layer
    Provinces(ProvincesArgs),

    /// Show the resolved configuration and where each value came from
    Config,
}

#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Expressway id, or name for entries without an id
    pub key: String,
}

#[derive(Parser, Debug)]
pub struct EditArgs {
    /// Expressway id, or name for entries without an id
    pub key: String,

    /// New name
    #[arg(long, value_name = "NAME")]
    pub rename: Option<String>,

    /// Move vertex INDEX to a new position
    #[arg(long = "move", value_name = "INDEX:LON,LAT", value_parser = parse_vertex_move)]
    pub moves: Vec<VertexMove>,

    /// Add a vertex on the segment closest to the point
    #[arg(long = "insert", value_name = "LON,LAT", value_parser = parse_coordinate)]
    pub inserts: Vec<Coordinate>,

    /// Remove vertex INDEX
    #[arg(long = "remove", value_name = "INDEX")]
    pub removes: Vec<usize>,
}

impl EditArgs {
    pub fn has_changes(&self) -> bool {
        self.rename.is_some()
            || !self.moves.is_empty()
            || !self.inserts.is_empty()
            || !self.removes.is_empty()
    }
}

#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Expressway name
    #[arg(long)]
    pub name: String,

    /// Status (operational, planning, construction, ...)
    #[arg(long, default_value = "operational")]
    pub status: String,

    /// Line vertex, in drawing order; give at least two
    #[arg(long = "point", value_name = "LON,LAT", value_parser = parse_coordinate, required = true)]
    pub points: Vec<Coordinate>,
}

#[derive(Parser, Debug)]
pub struct ProvincesArgs {
    /// Province boundaries GeoJSON URL
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,
}

/// A `--move` argument
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexMove {
    pub index: usize,
    pub position: Coordinate,
}

/// Parse `lon,lat`
pub fn parse_coordinate(s: &str) -> Result<Coordinate, String> {
    let (lon, lat) = s
        .split_once(',')
        .ok_or_else(|| format!("expected LON,LAT, got '{}'", s))?;

    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|_| format!("invalid longitude '{}'", lon.trim()))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| format!("invalid latitude '{}'", lat.trim()))?;

    Ok([lon, lat])
}

/// Parse `index:lon,lat`
pub fn parse_vertex_move(s: &str) -> Result<VertexMove, String> {
    let (index, position) = s
        .split_once(':')
        .ok_or_else(|| format!("expected INDEX:LON,LAT, got '{}'", s))?;

    let index: usize = index
        .trim()
        .parse()
        .map_err(|_| format!("invalid vertex index '{}'", index.trim()))?;

    Ok(VertexMove {
        index,
        position: parse_coordinate(position)?,
    })
}
