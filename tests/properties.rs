//! Property-based tests for u-colony.
//!
//! Uses proptest to verify invariants across many random inputs.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use u_colony::aco::{construct_tour, AcoConfig, AntColony, PheromoneMatrix, TransitionPolicy};
use u_colony::distance::DistanceMatrix;
use u_colony::models::Tour;

// ============================================================================
// Strategies
// ============================================================================

/// Random (possibly asymmetric) matrix with 1-8 locations and a zero diagonal.
fn random_matrix() -> impl Strategy<Value = DistanceMatrix> {
    (1usize..9).prop_flat_map(|n| {
        prop::collection::vec(0.0..100.0f64, n * n).prop_map(move |mut data| {
            for i in 0..n {
                data[i * n + i] = 0.0;
            }
            DistanceMatrix::from_data(n, data).unwrap()
        })
    })
}

fn random_config() -> impl Strategy<Value = AcoConfig> {
    (
        1usize..6,
        1usize..8,
        0.0..3.0f64,
        0.0..5.0f64,
        0.01..=1.0f64,
        0.1..1000.0f64,
        any::<u64>(),
    )
        .prop_map(|(agents, iters, alpha, beta, rho, q, seed)| {
            AcoConfig::default()
                .with_agent_count(agents)
                .with_iteration_count(iters)
                .with_alpha(alpha)
                .with_beta(beta)
                .with_evaporation_rate(rho)
                .with_deposit_constant(q)
                .with_seed(seed)
        })
}

// ============================================================================
// Tour Construction Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_constructed_tours_are_closed_permutations(
        dm in random_matrix(),
        depot_pick in any::<usize>(),
        seed in any::<u64>(),
    ) {
        let n = dm.size();
        let depot = depot_pick % n;
        let tau = PheromoneMatrix::new(n, 0.1);
        let policy = TransitionPolicy::new(&tau, &dm, 1.0, 2.0);
        let (tour, length) = construct_tour(&policy, depot, &mut StdRng::seed_from_u64(seed));

        prop_assert!(tour.is_valid(n));
        prop_assert_eq!(tour.path()[0], depot);
        prop_assert_eq!(tour.path()[n], depot);
        prop_assert_eq!(length, tour.length(&dm));
    }

    #[test]
    fn prop_probabilities_form_distribution(
        dm in random_matrix(),
        alpha in 0.0..3.0f64,
        beta in 0.0..5.0f64,
    ) {
        let n = dm.size();
        let candidates: Vec<usize> = (1..n).collect();
        let tau = PheromoneMatrix::new(n, 0.1);
        let p = TransitionPolicy::new(&tau, &dm, alpha, beta).probabilities(0, &candidates);
        prop_assert_eq!(p.len(), candidates.len());
        if !p.is_empty() {
            prop_assert!(p.iter().all(|&x| x >= 0.0));
            prop_assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        }
    }
}

// ============================================================================
// Pheromone Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_pheromone_never_negative(
        n in 2usize..8,
        ops in prop::collection::vec((0.001..=1.0f64, 0.001..1000.0f64, 0.0..50.0f64), 1..20),
    ) {
        let mut tau = PheromoneMatrix::new(n, 0.1);
        let tour = Tour::new((0..n).chain(std::iter::once(0)).collect());
        for (rho, q, length) in ops {
            tau.evaporate(rho);
            tau.deposit(&tour, length, q);
            tau.deposit_symmetric(&tour, length, q);
            prop_assert!(tau.as_slice().iter().all(|&t| t >= 0.0));
        }
    }
}

// ============================================================================
// Colony Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_run_invariants(dm in random_matrix(), config in random_config()) {
        let n = dm.size();
        let iterations = config.iteration_count;
        let mut observed = Vec::new();
        let result = AntColony::new(&dm, config)
            .unwrap()
            .run_with(|s| observed.push(s.best_length));

        prop_assert!(result.best_tour.is_valid(n));
        prop_assert_eq!(result.best_tour.length(&dm), result.best_length);
        prop_assert_eq!(result.convergence.len(), iterations);

        let mut prefix_min = f64::INFINITY;
        for (i, &x) in result.convergence.iter().enumerate() {
            prefix_min = prefix_min.min(x);
            prop_assert_eq!(observed[i], prefix_min);
        }
        prop_assert_eq!(result.best_length, prefix_min);
    }

    #[test]
    fn prop_same_seed_same_result(dm in random_matrix(), config in random_config()) {
        let a = AntColony::new(&dm, config.clone()).unwrap().run();
        let b = AntColony::new(&dm, config.clone()).unwrap().run();
        let c = AntColony::new(&dm, config.with_parallel(true)).unwrap().run();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(&a, &c);
    }

    #[test]
    fn prop_stepping_then_running_matches_a_straight_run(
        dm in random_matrix(),
        config in random_config(),
        manual in 0usize..10,
    ) {
        let iterations = config.iteration_count;
        let mut colony = AntColony::new(&dm, config.clone()).unwrap();
        for _ in 0..manual {
            colony.step();
        }
        let stepped = colony.run();
        prop_assert_eq!(stepped.convergence.len(), iterations.max(manual));
        if manual <= iterations {
            let straight = AntColony::new(&dm, config).unwrap().run();
            prop_assert_eq!(stepped, straight);
        }
    }
}
