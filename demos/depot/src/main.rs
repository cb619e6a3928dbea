//! depot — smallest example for the rust_siding scheduler.
//!
//! Two sidings serve a two-platform line.  The west siding runs a single
//! light-rail vehicle in capacity mode; the east siding runs unlimited
//! minecarts.  The west route is composed on the main thread, the east route
//! on a worker thread; both are applied at the next tick boundary.
//!
//! Pass a JSON `SimConfig` path as the first argument to override the
//! embedded configuration.  `RUST_LOG=debug` shows spawns and removals.

mod network;

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, anyhow};

use sd_core::{AnchorId, DepotId, SimConfig, Tick, VehicleType};
use sd_mobility::ProfileSimulator;
use sd_rail::{DijkstraPathFinder, PathFinder};
use sd_siding::{SidingError, SidingRecord, SidingSnapshot, TickOutcome};
use sd_sim::{YardBuilder, YardObserver};

use network::build_network;

// ── Constants ─────────────────────────────────────────────────────────────────

const DEPOT:            DepotId = DepotId(1);
const SIDING_LENGTH:    f32     = 40.0;
const DEPOT_HOLD_TICKS: f32     = 100.0;

// One in-game day at 20 ticks per second.
const CONFIG_JSON: &str = r#"{
    "total_ticks": 24000,
    "seed": 42,
    "elapsed_ticks_per_step": 1.0,
    "kinematics": { "acceleration": 0.01, "dwell_ticks_per_unit": 10.0 }
}"#;

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct CountingObserver {
    synced:          usize,
    spawned:         usize,
    removed:         usize,
    routes_applied:  usize,
    routes_rejected: usize,
    peak_population: BTreeMap<AnchorId, usize>,
}

impl YardObserver for CountingObserver {
    fn on_route_applied(&mut self, tick: Tick, siding: &SidingRecord) {
        self.routes_applied += 1;
        println!("{tick}: route applied to {} ({} segments)", siding.id(), siding.path().len());
    }

    fn on_route_rejected(&mut self, tick: Tick, siding: AnchorId, error: &SidingError) {
        self.routes_rejected += 1;
        println!("{tick}: route for {siding} rejected: {error}");
    }

    fn on_siding_tick(&mut self, _tick: Tick, siding: &SidingRecord, outcome: &TickOutcome) {
        self.synced += outcome.synced.len();
        self.spawned += usize::from(outcome.spawned.is_some());
        self.removed += outcome.removed.len();
        let peak = self.peak_population.entry(siding.id()).or_default();
        *peak = (*peak).max(siding.population());
    }
}

// ── Config ────────────────────────────────────────────────────────────────────

fn load_config() -> Result<SimConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {path}"))
        }
        None => Ok(serde_json::from_str(CONFIG_JSON)?),
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("=== depot — rust_siding scheduler ===");

    // 1. Config and network.
    let config = load_config()?;
    let (network, stations) = build_network()?;
    println!(
        "Rail network: {} positions, {} rails  |  Ticks: {}  |  Seed: {}",
        network.node_count(),
        network.rail_count(),
        config.total_ticks,
        config.seed,
    );

    // 2. The depot's main routes, one per direction.
    let finder = DijkstraPathFinder;
    let eastbound = finder.find_path(&network, &[stations.central, stations.harbour], 0)?;
    let westbound = finder.find_path(&network, &[stations.harbour, stations.central], 0)?;
    println!("Main routes: {} segments eastbound, {} westbound", eastbound.len(), westbound.len());
    println!();

    // 3. Build the yard.
    let simulator = ProfileSimulator::new(config.kinematics, DEPOT_HOLD_TICKS);
    let mut yard = YardBuilder::new(config, simulator, finder)
        .network(network)
        .siding(stations.west, SIDING_LENGTH)
        .siding(stations.east, SIDING_LENGTH)
        .build()?;

    let west = stations.west.id;
    let east = stations.east.id;

    // 4. Configure the sidings; each setter yields the update peers need.
    let update = yard
        .siding_mut(west)
        .context("west siding")?
        .set_vehicle_mapping("west_line", VehicleType::LightRail);
    log::info!("broadcast {}", serde_json::to_string(&update)?);
    let update = yard.siding_mut(east).context("east siding")?.set_unlimited_spawning(true);
    log::info!("broadcast {}", serde_json::to_string(&update)?);

    yard.set_depot(west, Some(DEPOT))?;
    yard.set_depot(east, Some(DEPOT))?;

    // 5. Routes: west inline, east on a worker thread.
    let legs = yard.request_route(west, Some(stations.central), Some(stations.harbour), eastbound, 1)?;
    println!("West route: {legs} legs found");
    yard.compose_in_background(east, Some(stations.harbour), Some(stations.central), westbound, 1)?
        .join()
        .map_err(|_| anyhow!("composer thread panicked"))?;

    // 6. Run.
    let mut obs = CountingObserver::default();
    let t0 = Instant::now();
    yard.run(&mut obs)?;
    let elapsed = t0.elapsed();

    // 7. Summary.
    println!();
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  routes applied  : {}", obs.routes_applied);
    println!("  routes rejected : {}", obs.routes_rejected);
    println!("  vehicle updates : {}", obs.synced);
    println!("  spawned/removed : {}/{}", obs.spawned, obs.removed);
    println!();

    println!("{:<14} {:<12} {:>5} {:>9} {:>6} {:>6}", "Siding", "Type", "Cars", "Segments", "Live", "Peak");
    println!("{}", "-".repeat(57));
    for siding in yard.sidings() {
        println!(
            "{:<14} {:<12} {:>5} {:>9} {:>6} {:>6}",
            siding.id().to_string(),
            siding.mapping().vehicle_type.as_str(),
            siding.car_count(),
            siding.path().len(),
            siding.population(),
            obs.peak_population.get(&siding.id()).copied().unwrap_or(0),
        );
    }

    // 8. Save.
    let dir = Path::new("output/depot");
    std::fs::create_dir_all(dir)?;
    let snapshots: Vec<SidingSnapshot> = yard.sidings().map(|s| s.snapshot()).collect();
    let path = dir.join("sidings.json");
    std::fs::write(&path, serde_json::to_string_pretty(&snapshots)?)?;
    println!();
    println!("Saved {} siding snapshots to {}", snapshots.len(), path.display());

    Ok(())
}
