//! Command-line driver that loads a world file, enters a location and
//! scrolls a viewport through its area, logging every descriptor that is
//! spawned or unspawned on the way.

use std::cell::RefCell;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use maps_handler::{
    init_logging, AttributeRegistry, Bounds, Direction, MapLibrary, MapRepository, MapsHandler,
    ScreenAttributes, SweepReport, WorldDefinition,
};

/// Sweep a viewport across a map area
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// World definition in JSON
    world: PathBuf,

    /// Map to enter
    #[arg(short, long)]
    map: String,

    /// Location to enter; defaults to the first by name
    #[arg(short, long)]
    location: Option<String>,

    /// Travel direction: xInc, xDec, yInc or yDec
    #[arg(short, long, default_value = "xInc")]
    direction: String,

    /// Viewport width in world units
    #[arg(long, default_value_t = 256.0)]
    width: f64,

    /// Viewport height in world units
    #[arg(long, default_value_t = 224.0)]
    height: f64,

    /// Distance travelled per step
    #[arg(long, default_value_t = 8.0)]
    step: f64,

    /// Number of steps to take
    #[arg(long, default_value_t = 32)]
    steps: u32,

    /// Increase logging verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn load_world(path: &Path) -> Result<WorldDefinition> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    WorldDefinition::from_reader(BufReader::new(file))
        .with_context(|| format!("reading world from {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let direction: Direction = args.direction.parse()?;
    let world = load_world(&args.world)?;
    let settings = world.settings.clone();
    let library = MapLibrary::from_world(world)?;
    let location = match args.location {
        Some(location) => location,
        None => library
            .map(&args.map)
            .and_then(|map| map.locations.keys().next().cloned())
            .with_context(|| format!("map {} has no locations", args.map))?,
    };

    let screen = Rc::new(RefCell::new(ScreenAttributes::new()));
    let mut handler = MapsHandler::builder()
        .repository(library)
        .screen(Rc::clone(&screen))
        .settings(settings)
        .on_spawn(|thing| info!("spawn {} at {:?}", thing.title, thing.bounds))
        .on_unspawn(|thing| info!("unspawn {} at {:?}", thing.title, thing.bounds))
        .stretch_add(|command, index, all| {
            info!("stretch {} ({}/{})", command.kind, index + 1, all.len());
        })
        .after_add(|command, index, all| {
            info!("after {} ({}/{})", command.kind, index + 1, all.len());
        })
        .build()?;

    handler.set_map(&args.map, Some(&location))?;
    let (x, y) = handler
        .location_entered()
        .map(|entered| (entered.x, entered.y))
        .unwrap_or_default();
    let mut viewport = Bounds::from_origin(x, y, args.width, args.height);
    info!(
        "entered {location} in area {} with {} descriptors",
        handler.area_name().unwrap_or("?"),
        handler.pre_things().len()
    );

    let mut total = handler.sweep(direction, viewport);
    let (dx, dy) = direction.offset(args.step);
    for _ in 0..args.steps {
        viewport = viewport.translated(dx, dy);
        total += handler.sweep(direction, viewport);
    }

    let SweepReport { spawned, unspawned } = total;
    info!("{spawned} spawned, {unspawned} unspawned, viewport now at {viewport:?}");
    for name in &handler.settings().screen_attributes {
        match screen.attribute(name) {
            Some(value) => info!("screen {name} = {value}"),
            None => warn!("screen {name} was never mirrored"),
        }
    }
    Ok(())
}
