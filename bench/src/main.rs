use mostar_core::{Graph, GraphBuilder, MostarConfig, MostarIndexer};
use std::time::Instant;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let vertex_count: i64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(400);

    if mode == "help" || mode == "--help" {
        println!("Usage: mostar-bench [mode] [vertex_count]");
        println!();
        println!("Modes:");
        println!("  all         Run all generators and benchmark each (default)");
        println!("  chain       Path graph (maximal imbalance per edge)");
        println!("  cycle       Ring (index is always zero)");
        println!("  star        One hub, all other vertices leaves");
        println!("  tree        Ternary tree grown level by level");
        println!("  smallworld  Ring lattice with random rewiring");
        println!("  random      Erdos-Renyi uniform random edges");
        println!("  barbell     Two dense clusters joined by a thin bridge");
        println!();
        println!("Default vertex_count: 400");
        return;
    }

    if vertex_count < 2 {
        eprintln!("vertex_count must be at least 2, got {}", vertex_count);
        return;
    }

    println!("mostar-bench");
    println!("============");
    println!();

    let generators: Vec<(&str, fn(i64) -> Graph)> = match mode {
        "chain" => vec![("Chain", gen_chain)],
        "cycle" => vec![("Cycle", gen_cycle)],
        "star" => vec![("Star", gen_star)],
        "tree" => vec![("Ternary tree", gen_tree)],
        "smallworld" => vec![("Small-world (Watts-Strogatz)", gen_small_world)],
        "random" => vec![("Erdos-Renyi random", gen_random)],
        "barbell" => vec![("Barbell (cluster-bridge-cluster)", gen_barbell)],
        "all" => vec![
            ("Chain", gen_chain as fn(i64) -> Graph),
            ("Cycle", gen_cycle),
            ("Star", gen_star),
            ("Ternary tree", gen_tree),
            ("Small-world (Watts-Strogatz)", gen_small_world),
            ("Erdos-Renyi random", gen_random),
            ("Barbell (cluster-bridge-cluster)", gen_barbell),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, generator) in generators {
        run_benchmark(name, generator, vertex_count);
    }
}

fn run_benchmark(name: &str, generator: fn(i64) -> Graph, vertex_count: i64) {
    println!("--- {} ---", name);
    println!("Target: {} vertices", vertex_count);

    let t = Instant::now();
    let graph = generator(vertex_count);
    let gen_time = t.elapsed();
    println!(
        "Generated in {:.1}ms — {} vertices, {} edges, ~{:.1}KB",
        gen_time.as_secs_f64() * 1000.0,
        graph.vertex_count(),
        graph.edge_count(),
        graph.memory_usage() as f64 / 1024.0
    );

    println!();
    println!("{:>10} {:>14} {:>10} {:>12}", "memoize", "index", "bfs", "time");
    println!("{:->10} {:->14} {:->10} {:->12}", "", "", "", "");

    let mut totals = Vec::with_capacity(2);
    for memoize in [false, true] {
        let config = MostarConfig::default().with_memoize(memoize);
        let mut indexer = MostarIndexer::new(&graph, config);

        let t = Instant::now();
        let result = indexer.run(|_| {});
        let elapsed = t.elapsed();

        match result {
            Ok(total) => {
                println!(
                    "{:>10} {:>14} {:>10} {:>10.1}ms",
                    memoize,
                    total,
                    indexer.bfs_runs(),
                    elapsed.as_secs_f64() * 1000.0
                );
                totals.push(total);
            }
            Err(e) => {
                println!("{:>10} failed: {}", memoize, e);
                return;
            }
        }
    }

    if totals.windows(2).any(|w| w[0] != w[1]) {
        println!("MISMATCH: memoized and fresh totals differ: {:?}", totals);
    }
    println!();
}

// ---------------------------------------------------------------------------
// Generators: deterministic, single-threaded, vertices numbered 0..n
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: i64) -> i64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        ((self.0 >> 33) % max as u64) as i64
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Path 0-1-...-(n-1). Index is the sum of |n - 2i| over edges.
fn gen_chain(n: i64) -> Graph {
    Graph::from_edges((0..n - 1).map(|i| (i, i + 1)))
}

/// Ring. Every edge is balanced, so the index is zero.
fn gen_cycle(n: i64) -> Graph {
    Graph::from_edges((0..n).map(|i| (i, (i + 1) % n)))
}

/// Hub 0 with n-1 leaves. Index is (n-1)(n-2).
fn gen_star(n: i64) -> Graph {
    Graph::from_edges((1..n).map(|i| (0, i)))
}

/// Ternary tree: each vertex spawns 3 children until `n` vertices exist.
///
/// Trees have every edge as a bridge, so imbalances are large and the
/// distance vectors are long.
fn gen_tree(n: i64) -> Graph {
    let branching = 3i64;
    let mut builder = GraphBuilder::with_capacity(n as usize);

    let mut next_id: i64 = 1;
    let mut frontier: Vec<i64> = vec![0];

    while next_id < n && !frontier.is_empty() {
        let mut next_frontier = Vec::with_capacity(frontier.len() * branching as usize);
        for &parent in &frontier {
            for _ in 0..branching {
                if next_id >= n {
                    break;
                }
                builder.add_edge(parent, next_id);
                next_frontier.push(next_id);
                next_id += 1;
            }
        }
        frontier = next_frontier;
    }

    builder.build()
}

/// Small-world (Watts-Strogatz): ring lattice + random rewiring.
///
/// Each vertex links to its K nearest neighbors on one side, and each link
/// is rewired to a random vertex with probability p. High clustering with
/// short path lengths.
fn gen_small_world(n: i64) -> Graph {
    let k = 3i64;
    let p = 0.05f64;
    let mut builder = GraphBuilder::with_capacity(n as usize);
    let mut rng = FastRng::new(67890);

    for i in 0..n {
        for j in 1..=k.min(n - 1) {
            let neighbor = (i + j) % n;
            if rng.next_f64() < p {
                let rewired = rng.next(n);
                builder.add_edge(i, if rewired != i { rewired } else { neighbor });
            } else {
                builder.add_edge(i, neighbor);
            }
        }
    }

    builder.build()
}

/// Erdos-Renyi: ~3 uniform random edges per vertex. May be disconnected.
fn gen_random(n: i64) -> Graph {
    let mut builder = GraphBuilder::with_capacity(n as usize);
    let mut rng = FastRng::new(54321);

    for _ in 0..n * 3 {
        let from = rng.next(n);
        let to = rng.next(n);
        if from != to {
            builder.add_edge(from, to);
        }
    }

    builder.build()
}

/// Barbell: two dense clusters joined by a short chain of bridge vertices.
///
/// Bridge edges split the vertex set almost evenly, cluster edges don't.
fn gen_barbell(n: i64) -> Graph {
    let bridge_len = 10i64.min(n / 3).max(1);
    let cluster = ((n - bridge_len) / 2).max(1);
    let mut builder = GraphBuilder::with_capacity(n as usize);
    let mut rng = FastRng::new(99999);

    let mut add_cluster = |builder: &mut GraphBuilder, offset: i64| {
        for i in 0..cluster {
            for _ in 0..5i64.min(cluster - 1) {
                let target = rng.next(cluster);
                if target != i {
                    builder.add_edge(offset + i, offset + target);
                }
            }
        }
    };

    add_cluster(&mut builder, 0);

    // Bridge: last vertex of cluster A through the chain to cluster B
    let mut prev = cluster - 1;
    for i in 0..bridge_len {
        let id = cluster + i;
        builder.add_edge(prev, id);
        prev = id;
    }

    let b_start = cluster + bridge_len;
    builder.add_edge(prev, b_start);
    add_cluster(&mut builder, b_start);

    builder.build()
}
