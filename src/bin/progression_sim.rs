//! Headless progression simulator - balance sanity without a renderer
//!
//! Drives a seeded player through a kill grind and prints the curve tables,
//! reporting how long each level takes and what the economy looks like.

use clap::Parser;
use rand::Rng;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;

use cadenza::core::Vec3;
use cadenza::inventory::Material;
use cadenza::player::{PlayerEvent, PlayerState};
use cadenza::progression::level_curve;

#[derive(Parser, Debug)]
#[command(name = "progression_sim")]
#[command(about = "Simulate a kill grind and print progression balance tables")]
struct Args {
    /// Number of kills to simulate
    #[arg(long, default_value_t = 2000)]
    kills: u64,

    /// Milliseconds between simulated kills
    #[arg(long, default_value_t = 2500)]
    kill_interval_ms: u64,

    /// Print the level curve table up to this level
    #[arg(long, default_value_t = 100)]
    table_levels: u32,

    /// Random seed for deterministic runs
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn print_curve_table(up_to: u32) {
    println!("level  health    damage   xp_to_advance  enemy_hp_mult");
    let mut level = 1;
    while level <= up_to {
        let stats = level_curve::base_stats_for_level(level);
        println!(
            "{:>5}  {:>8.1}  {:>7.1}  {:>13.1}  {:>13.2}",
            level,
            stats.health,
            stats.damage,
            level_curve::xp_to_advance(level),
            level_curve::enemy_hp_multiplier(level),
        );
        level += if level < 20 { 1 } else { 10 };
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    println!("=== Cadenza Progression Simulator ===\n");
    print_curve_table(args.table_levels);

    let mut player = PlayerState::new(Vec3::default(), args.seed);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut now = 0u64;
    let mut level_reached_at = vec![(1u32, 0u64)];

    for _ in 0..args.kills {
        now += args.kill_interval_ms;
        player.tick(now);

        // Enemies track the player's level with some spread
        let spread = rng.gen_range(0..=4);
        let enemy_level = (player.stats().level + spread).saturating_sub(2).max(1);
        player.register_kill(enemy_level, now);
        player.collect_echoes(u64::from(enemy_level));
        if rng.gen_bool(0.3) {
            player.add_material(Material::CaneFiber, 1);
        }

        for event in player.drain_events() {
            if let PlayerEvent::LeveledUp { level } = event {
                level_reached_at.push((level, now));
            }
        }
    }

    println!("\n=== Grind results ===");
    println!(
        "kills: {}   final level: {}   echoes: {}   tempo rating: {}",
        args.kills,
        player.stats().level,
        player.inventory().echoes(),
        player.tempo().rating().label(),
    );

    println!("\nlevel  reached_after");
    for window in level_reached_at.windows(2) {
        let (level, at) = window[1];
        let (_, prev_at) = window[0];
        println!(
            "{:>5}  +{:>6.1}s  (t={:.1}s)",
            level,
            (at - prev_at) as f64 / 1000.0,
            at as f64 / 1000.0
        );
    }
}
