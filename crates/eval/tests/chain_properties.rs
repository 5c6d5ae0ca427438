//! Properties that hold for every registry and input.
//!
//! Registries are generated from a fixed-seed linear congruential
//! generator so failures reproduce exactly.
//!
//! 1. Chain length never exceeds the depth bound
//! 2. Same arguments, same chain
//! 3. Each step only uses compounds present before it fired
//! 4. No product appears twice
//! 5. Skipped equations never show up in the chain
//! 6. Concurrent runs over one shared registry agree

use std::collections::HashSet;
use std::sync::Arc;

use hmsim_eval::{
    load_registry, simulate, CollectingSink, Environment, Registry, Simulator, MAX_DEPTH,
};

// ──────────────────────────────────────────────
// Test fixtures
// ──────────────────────────────────────────────

struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next() % n
    }
}

const SPECIES: &[&str] = &[
    "As", "Pb", "Hg", "Cd", "Cr", "O2", "H2O", "S", "Cl", "CO2", "AsO2", "PbO", "HgS", "CdCl2",
    "CrO3",
];

fn random_equation(rng: &mut Lcg) -> String {
    match rng.below(10) {
        0 => format!("{} {} {}", pick(rng), pick(rng), pick(rng)),
        1 => format!("{} + {} ->", pick(rng), pick(rng)),
        _ => {
            let arrow = ["->", "→", "=>", "⟶"][rng.below(4) as usize];
            let count = 1 + rng.below(3);
            let lhs: Vec<&str> = (0..count).map(|_| pick(rng)).collect();
            format!("{} {} {}", lhs.join(" + "), arrow, pick(rng))
        }
    }
}

fn pick(rng: &mut Lcg) -> &'static str {
    SPECIES[rng.below(SPECIES.len() as u64) as usize]
}

fn random_registry(seed: u64) -> Registry {
    let mut rng = Lcg(seed);
    let blocks: Vec<serde_json::Value> = (0..1 + rng.below(5))
        .map(|_| {
            let heavy: Vec<String> = (0..rng.below(6)).map(|_| random_equation(&mut rng)).collect();
            let env: Vec<String> = (0..rng.below(6)).map(|_| random_equation(&mut rng)).collect();
            serde_json::json!({
                "metal": pick(&mut rng),
                "reactions_with_heavy_metals": heavy,
                "reactions_with_environment": env,
            })
        })
        .collect();
    load_registry(&serde_json::Value::Array(blocks)).expect("generated registry is well-formed")
}

fn random_inputs(seed: u64) -> Vec<&'static str> {
    let mut rng = Lcg(seed ^ 0x9E37_79B9_7F4A_7C15);
    (0..rng.below(6)).map(|_| pick(&mut rng)).collect()
}

const SEEDS: std::ops::Range<u64> = 0..200;

// ──────────────────────────────────────────────
// Properties
// ──────────────────────────────────────────────

#[test]
fn chain_never_exceeds_depth_bound() {
    for seed in SEEDS {
        let registry = random_registry(seed);
        let chain = simulate(&registry, &random_inputs(seed), &Environment::new());
        assert!(chain.len() <= MAX_DEPTH, "seed {seed}: {} steps", chain.len());
    }
}

#[test]
fn runs_are_deterministic() {
    for seed in SEEDS {
        let registry = random_registry(seed);
        let inputs = random_inputs(seed);
        let env: Environment = [("temperature", 25.0)].into_iter().collect();
        let first = serde_json::to_string(&simulate(&registry, &inputs, &env)).unwrap();
        let second = serde_json::to_string(&simulate(&registry, &inputs, &env)).unwrap();
        assert_eq!(first, second, "seed {seed}");
    }
}

#[test]
fn steps_only_use_compounds_already_present() {
    for seed in SEEDS {
        let registry = random_registry(seed);
        let inputs = random_inputs(seed);
        let report = Simulator::new(&registry).run_detailed(&inputs, &Environment::new());

        let mut present: HashSet<String> = inputs.iter().map(|s| s.to_string()).collect();
        for step in &report.chain {
            let parsed = hmsim_registry::equation::parse(&step.equation).unwrap();
            for reactant in &parsed.reactants {
                assert!(present.contains(reactant), "seed {seed}: {reactant} missing");
            }
            assert!(!present.contains(&step.product), "seed {seed}");
            present.insert(step.product.clone());
        }

        // The working set is the inputs followed by every product.
        let expected: HashSet<String> = present;
        let actual: HashSet<String> = report.working_set.compounds().iter().cloned().collect();
        assert_eq!(actual, expected, "seed {seed}");
        assert_eq!(
            report.working_set.len(),
            inputs.iter().collect::<HashSet<_>>().len() + report.chain.len()
        );
    }
}

#[test]
fn products_are_unique() {
    for seed in SEEDS {
        let registry = random_registry(seed);
        let chain = simulate(&registry, &random_inputs(seed), &Environment::new());
        let mut seen = HashSet::new();
        for product in chain.products() {
            assert!(seen.insert(product), "seed {seed}: {product} repeated");
        }
    }
}

#[test]
fn skipped_equations_never_fire() {
    for seed in SEEDS {
        let registry = random_registry(seed);
        let sink = CollectingSink::new();
        let chain = Simulator::new(&registry)
            .with_sink(&sink)
            .run(&random_inputs(seed), &Environment::new());

        let skipped: HashSet<String> = sink.into_events().into_iter().map(|e| e.equation).collect();
        for step in &chain {
            assert!(!skipped.contains(&step.equation), "seed {seed}");
        }
    }
}

#[test]
fn shared_registry_across_threads() {
    let registry = Arc::new(random_registry(7));
    let inputs = ["As", "Pb", "Hg", "O2", "H2O", "S"];
    let expected = simulate(&registry, &inputs, &Environment::new());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || simulate(&registry, &inputs, &Environment::new()))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
