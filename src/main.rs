//! `vantage`: drive the anchor manager over a small demo solar system and
//! log where the observer ends up each tick.

use std::path::PathBuf;
use std::process;
use std::rc::Rc;

use clap::Parser;
use glam::DVec3;
use vantage::anchor::manager::AnchorManager;
use vantage::options::Options;
use vantage::solar::{Body, CircularOrbit, SolarSystem, StillOrbit};
use vantage::time::TimeMgr;
use vantage::util::frame::{self, J2000_JD};

#[derive(Parser)]
#[command(name = "vantage")]
#[command(about = "Simulate an observer anchored in a demo solar system")]
struct Args {
    /// TOML options file
    #[arg(short = 'o', long)]
    options: Option<PathBuf>,

    /// Anchor ini file to load on top of the body anchors
    #[arg(short = 'a', long)]
    anchors: Option<PathBuf>,

    /// Initial anchor (defaults to `anchors.first_anchor` from the options)
    #[arg(short = 'f', long)]
    first: Option<String>,

    /// Number of simulation ticks
    #[arg(short = 't', long, default_value = "10")]
    ticks: u32,

    /// Simulated seconds per tick
    #[arg(short = 's', long, default_value = "60")]
    step_seconds: f64,
}

fn demo_solar_system() -> SolarSystem {
    let system = SolarSystem::new();
    let _sun = system.add_body(Body::new(
        "Sun",
        696_000.0,
        Box::new(StillOrbit { offset: DVec3::ZERO }),
    ));
    let earth = system.add_body(
        Body::new(
            "Earth",
            6371.0,
            Box::new(CircularOrbit {
                radius: 1.000_001,
                period: 365.256_363,
                epoch: J2000_JD,
                phase: 100.464,
                inclination: 0.0,
            }),
        )
        .with_rotation(0.997_269_68, 280.46)
        .with_equatorial_frame(frame::j2000_to_vsop87()),
    );
    let _moon = system.add_body(
        Body::new(
            "Moon",
            1737.4,
            Box::new(CircularOrbit {
                radius: 0.002_569_55,
                period: 27.321_661,
                epoch: J2000_JD,
                phase: 218.316,
                inclination: 5.145,
            }),
        )
        .with_parent(&earth)
        .with_rotation(27.321_661, 38.32),
    );
    system
}

fn fail(context: &str, err: &dyn std::error::Error) -> ! {
    log::error!("{context}: {err}");
    process::exit(1);
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let options = match &args.options {
        Some(path) => Options::load(path)
            .unwrap_or_else(|e| fail(&format!("cannot load {}", path.display()), &e)),
        None => Options::default(),
    };

    let time = Rc::new(TimeMgr::default());
    let system = Rc::new(demo_solar_system());
    system.compute_positions(time.jday());

    let mut manager =
        AnchorManager::new(Rc::clone(&system), Rc::clone(&time), &options);
    for name in ["Sun", "Earth", "Moon"] {
        let Some(body) = system.search_by_english_name(name) else {
            continue;
        };
        if let Err(e) = manager.add_body_anchor(name, &Rc::downgrade(&body)) {
            log::warn!("no anchor for {name}: {e}");
        }
    }
    if let Some(path) = &args.anchors {
        if let Err(e) = manager.load(path) {
            fail(&format!("cannot load anchors from {}", path.display()), &e);
        }
    }

    let first = args
        .first
        .as_deref()
        .unwrap_or(&options.anchors.first_anchor);
    if let Err(e) = manager.init_first_anchor(first) {
        fail("no initial viewpoint", &e);
    }

    for tick in 1..=args.ticks {
        time.advance(args.step_seconds);
        system.compute_positions(time.jday());
        manager.update();
        log::info!(
            "tick {tick}: JD {:.6} on '{}', observer at {}",
            time.jday(),
            manager.current_anchor_name().unwrap_or_default(),
            manager.navigator().heliocentric_position()
        );
    }
}
