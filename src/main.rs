use avl_collections::avl_tree::AvlMap;
use avl_collections::Error;
use log::{info, warn, LevelFilter};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::env;
use std::process;

const USAGE: &str = "usage: avl-demo [off|error|warn|info|debug|trace]";

fn height_bound(len: usize) -> f64 {
    1.44 * ((len + 2) as f64).log2() - 0.328
}

fn keys<V>(map: &AvlMap<u32, V>) -> Vec<u32> {
    map.inorder_traversal().map(|(key, _)| *key).collect()
}

fn basic_operations() {
    info!("basic operations");
    let mut map = AvlMap::new();
    for (key, value) in vec![(5, "five"), (3, "three"), (7, "seven"), (2, "two"), (4, "four")] {
        map.put(key, value);
        println!("after inserting {}: height={}, valid={}", key, map.height(), map.is_valid_avl());
    }

    println!("{}", map.visualize());
    println!("size: {}", map.len());
    if let (Ok(min), Ok(max)) = (map.min_key(), map.max_key()) {
        println!("min key: {}, max key: {}", min, max);
    }
    println!("balance factors: {:?}", map.balance_factor_distribution());
    println!("in-order keys: {:?}", keys(&map));
}

fn rotations() {
    info!("rotation cases");
    let cases = [
        ("right-right", [5, 7, 9]),
        ("left-left", [9, 7, 5]),
        ("left-right", [9, 5, 7]),
        ("right-left", [5, 9, 7]),
    ];

    for (name, order) in cases.iter() {
        let mut map = AvlMap::new();
        for &key in order.iter() {
            map.put(key, ());
        }
        let counts = map.rotations();
        println!(
            "{} case {:?}: {} left and {} right rotations",
            name, order, counts.left, counts.right,
        );
        println!("{}", map.visualize());
    }
}

fn balance_maintenance() {
    info!("balance maintenance");
    let mut map = AvlMap::new();
    for key in 0..15 {
        map.put(key, key);
        println!("after {} insertions: height={}, valid={}", key + 1, map.height(), map.is_valid_avl());
    }
    println!("balance factors: {:?}", map.balance_factor_distribution());

    for key in (0..15).step_by(3) {
        if let Err(err) = map.remove(&key) {
            warn!("could not remove {}: {}", key, err);
        }
        println!("after removing {}: height={}, valid={}", key, map.height(), map.is_valid_avl());
    }
    println!("balance factors: {:?}", map.balance_factor_distribution());
}

fn compare_with_bound() {
    info!("height against the worst-case bound");
    for &len in [10, 100, 1000, 10000].iter() {
        let mut map = AvlMap::new();
        for key in 0..len as u32 {
            map.put(key, ());
        }
        let counts = map.rotations();
        println!(
            "{} sequential keys: height={}, bound={:.2}, rotations={}",
            len,
            map.height(),
            height_bound(len),
            counts.left + counts.right,
        );
    }
}

fn visualization() {
    info!("visualization");
    let mut map = AvlMap::new();
    println!("{}", map.visualize());

    for &key in [5, 3, 7, 2, 9].iter() {
        map.put(key, ());
    }
    println!("{}", map.visualize());
}

fn edge_cases() {
    info!("edge cases");
    let empty: AvlMap<u32, ()> = AvlMap::new();
    match empty.min_key() {
        Err(Error::EmptyTree) => println!("min key of an empty tree: {}", Error::EmptyTree),
        other => println!("unexpected min key: {:?}", other),
    }

    let mut rng = StdRng::seed_from_u64(18);
    let mut map = AvlMap::new();
    for _ in 0..1000 {
        let key = rng.gen_range(0..500u32);
        if rng.gen_bool(0.7) {
            map.put(key, key);
        } else if map.remove(&key).is_err() {
            warn!("removal of missing key {} ignored", key);
        }
    }
    println!(
        "random workload: size={}, height={}, valid={}",
        map.len(),
        map.height(),
        map.is_valid_avl(),
    );

    let max_factor = map
        .balance_factor_distribution()
        .into_iter()
        .map(i32::abs)
        .max()
        .unwrap_or(0);
    println!("largest balance factor magnitude: {}", max_factor);
}

fn main() {
    let level = match env::args().nth(1) {
        Some(arg) => match arg.parse::<LevelFilter>() {
            Ok(level) => level,
            Err(_) => {
                eprintln!("{}", USAGE);
                process::exit(2);
            },
        },
        None => LevelFilter::Info,
    };

    if let Err(err) = TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto) {
        eprintln!("failed to initialize logger: {}", err);
    }

    basic_operations();
    rotations();
    balance_maintenance();
    compare_with_bound();
    visualization();
    edge_cases();
}
