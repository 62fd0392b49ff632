//! End-to-end runs of the four exercise workloads through the harness,
//! covering the summation, search and partial-failure scenarios.

use rand::rngs::StdRng;
use rand::SeedableRng;

use parbench::exercises::{fall, grayscale, search, summation};
use parbench::{compare, run_parallel, run_sequential, HarnessConfig, Partition};

#[test]
fn summation_divergence_is_near_zero() {
    let mut rng = StdRng::seed_from_u64(42);
    let batch = summation::generate_vectors(
        summation::DEFAULT_VECTOR_COUNT,
        summation::DEFAULT_VECTOR_LEN,
        &mut rng,
    );

    let seq = run_sequential(&batch, summation::sum_with_padding).unwrap();
    let config = HarnessConfig::new(4);
    let par = run_parallel(&batch, summation::sum_with_padding, &config).unwrap();
    let report = compare(&seq, &par, config.worker_count, summation::total_sum_divergence);

    assert_eq!(report.compared, summation::DEFAULT_VECTOR_COUNT);
    assert!(report.excluded.is_empty());
    assert!(
        report.divergence < summation::TOLERANCE,
        "divergence {} exceeds {}",
        report.divergence,
        summation::TOLERANCE
    );
}

#[test]
fn seeded_search_hits_the_seeded_index_in_both_runs() {
    // 75000 filler values with a single 42 planted at a known index per
    // vector.
    let planted: Vec<usize> = (0..10).map(|i| i * 1000 + 5).collect();
    let batch: Vec<search::SearchTask> = planted
        .iter()
        .enumerate()
        .map(|(id, &at)| {
            let mut haystack = vec![7i32; 75_000];
            haystack[at] = 42;
            search::SearchTask {
                id,
                haystack,
                target: 42,
            }
        })
        .collect();

    let seq = run_sequential(&batch, search::linear_search).unwrap();
    let config = HarnessConfig::new(4).partition(Partition::WorkStealing);
    let par = run_parallel(&batch, search::linear_search, &config).unwrap();

    for (i, &at) in planted.iter().enumerate() {
        let s = seq.value(i).unwrap();
        let p = par.value(i).unwrap();
        assert!(s.found());
        assert_eq!(s.position, Some(at));
        assert_eq!(s, p);
    }

    let report = compare(&seq, &par, config.worker_count, search::found_count_divergence);
    assert_eq!(report.divergence, 0.0);
}

#[test]
fn corrupted_image_is_excluded_from_an_otherwise_valid_comparison() {
    let mut rng = StdRng::seed_from_u64(8);
    let mut batch = grayscale::generate_images(6, 32, 32, &mut rng);
    batch[2].pixels.truncate(10); // no longer matches 32x32 RGB

    let seq = run_sequential(&batch, grayscale::to_grayscale).unwrap();
    let config = HarnessConfig::new(2);
    let par = run_parallel(&batch, grayscale::to_grayscale, &config).unwrap();
    let report = compare(&seq, &par, config.worker_count, grayscale::intensity_divergence);

    assert_eq!(report.excluded_count(), 1);
    assert_eq!(report.excluded[0].0, 2);
    assert_eq!(report.compared, 5);
    assert_eq!(report.divergence, 0.0);
    assert!(report.speedup >= 0.0);
    assert!(report.efficiency.is_finite());
}

#[test]
fn fall_simulation_agrees_under_dynamic_balancing() {
    let mut rng = StdRng::seed_from_u64(13);
    let batch = fall::generate_objects(fall::DEFAULT_OBJECT_COUNT, &mut rng);

    let seq = run_sequential(&batch, fall::simulate_fall).unwrap();
    let config = HarnessConfig::new(4).partition(Partition::Chunked { chunk_size: 1 });
    let par = run_parallel(&batch, fall::simulate_fall, &config).unwrap();
    let report = compare(&seq, &par, config.worker_count, fall::average_outcome_divergence);

    assert!(report.excluded.is_empty());
    assert!(
        report.divergence <= fall::TOLERANCE,
        "divergence {} exceeds {}",
        report.divergence,
        fall::TOLERANCE
    );
    for (s, p) in seq.results.iter().zip(&par.results) {
        assert_eq!(s.outcome, p.outcome);
    }
}

#[test]
fn grayscale_results_are_bitwise_identical_across_runs() {
    let mut rng = StdRng::seed_from_u64(21);
    let batch = grayscale::generate_images(4, 64, 48, &mut rng);

    let seq = run_sequential(&batch, grayscale::to_grayscale).unwrap();
    for strategy in [
        Partition::Contiguous,
        Partition::Chunked { chunk_size: 2 },
        Partition::WorkStealing,
    ] {
        let config = HarnessConfig::new(3).partition(strategy);
        let par = run_parallel(&batch, grayscale::to_grayscale, &config).unwrap();
        for (s, p) in seq.results.iter().zip(&par.results) {
            assert_eq!(s.outcome, p.outcome, "{strategy:?}");
        }
    }
}
