//! Runs the four embarrassingly parallel exercises through the harness and
//! prints each sequential-vs-parallel comparison.
//!
//! Run with: cargo run --release --bin run_benchmarks

use rand::rngs::StdRng;
use rand::SeedableRng;

use parbench::exercises::{fall, grayscale, search, summation};
use parbench::{
    compare, run_parallel, run_sequential, ComparisonReport, HarnessConfig, HarnessError,
    Partition, RunReport,
};

fn main() {
    println!("{}", "=".repeat(72));
    println!("EMBARRASSINGLY PARALLEL BENCHMARKS");
    println!("{}", "=".repeat(72));
    println!("Workers available: {}\n", num_cpus::get());

    if let Err(e) = image_graying() {
        eprintln!("image graying failed: {e}");
    }
    if let Err(e) = vector_summation() {
        eprintln!("vector summation failed: {e}");
    }
    if let Err(e) = vector_search() {
        eprintln!("vector search failed: {e}");
    }
    if let Err(e) = fall_simulation() {
        eprintln!("fall simulation failed: {e}");
    }
}

fn image_graying() -> Result<(), HarnessError> {
    println!("=== Exercise 1: Image Graying ===\n");
    let mut rng = StdRng::seed_from_u64(101);
    let batch = grayscale::generate_images(
        grayscale::DEFAULT_IMAGE_COUNT,
        grayscale::DEFAULT_WIDTH,
        grayscale::DEFAULT_HEIGHT,
        &mut rng,
    );
    println!(
        "{} images of {}x{} pixels",
        batch.len(),
        grayscale::DEFAULT_WIDTH,
        grayscale::DEFAULT_HEIGHT
    );

    let config = HarnessConfig::default();
    let seq = run_sequential(&batch, grayscale::to_grayscale)?;
    let par = run_parallel(&batch, grayscale::to_grayscale, &config)?;
    let report = compare(&seq, &par, config.worker_count, grayscale::intensity_divergence);
    print_comparison(&seq, &par, &report, grayscale::TOLERANCE);
    Ok(())
}

fn vector_summation() -> Result<(), HarnessError> {
    println!("=== Exercise 2: Vector Summation ===\n");
    let mut rng = StdRng::seed_from_u64(202);
    let batch = summation::generate_vectors(
        summation::DEFAULT_VECTOR_COUNT,
        summation::DEFAULT_VECTOR_LEN,
        &mut rng,
    );
    println!(
        "{} vectors of {} elements",
        batch.len(),
        summation::DEFAULT_VECTOR_LEN
    );

    let config = HarnessConfig::default();
    let seq = run_sequential(&batch, summation::sum_with_padding)?;
    let par = run_parallel(&batch, summation::sum_with_padding, &config)?;
    let report = compare(&seq, &par, config.worker_count, summation::total_sum_divergence);
    print_comparison(&seq, &par, &report, summation::TOLERANCE);
    Ok(())
}

fn vector_search() -> Result<(), HarnessError> {
    println!("=== Exercise 3: Vector Search ===\n");
    let mut rng = StdRng::seed_from_u64(303);
    for target in [42, 100, 999] {
        let batch = search::generate_search_tasks(
            search::DEFAULT_VECTOR_COUNT,
            search::DEFAULT_VECTOR_LEN,
            target,
            &mut rng,
        );
        println!(
            "Searching {} in {} vectors of {} elements",
            target,
            batch.len(),
            search::DEFAULT_VECTOR_LEN
        );

        let config = HarnessConfig::default();
        let seq = run_sequential(&batch, search::linear_search)?;
        let par = run_parallel(&batch, search::linear_search, &config)?;
        let found = par
            .results
            .iter()
            .filter(|r| matches!(&r.outcome, Ok(hit) if hit.found()))
            .count();
        println!("Found in {found}/{} vectors", batch.len());
        let report = compare(&seq, &par, config.worker_count, search::found_count_divergence);
        print_comparison(&seq, &par, &report, search::TOLERANCE);
    }
    Ok(())
}

fn fall_simulation() -> Result<(), HarnessError> {
    println!("=== Exercise 4: Free-Fall Simulation ===\n");
    let mut rng = StdRng::seed_from_u64(404);
    let batch = fall::generate_objects(fall::DEFAULT_OBJECT_COUNT, &mut rng);
    println!("{} objects to drop", batch.len());

    // Per-item cost varies with height/mass/drag, so balance dynamically.
    let config = HarnessConfig::default().partition(Partition::Chunked { chunk_size: 1 });
    let seq = run_sequential(&batch, fall::simulate_fall)?;
    let par = run_parallel(&batch, fall::simulate_fall, &config)?;
    for (obj, result) in batch.iter().zip(&par.results) {
        match &result.outcome {
            Ok(outcome) => println!(
                "  object {}: height={:.1}m  fall_time={:.2}s  impact={:.2}m/s",
                obj.id, obj.height, outcome.fall_time, outcome.final_velocity
            ),
            Err(e) => println!("  object {}: {e}", obj.id),
        }
    }
    let report = compare(&seq, &par, config.worker_count, fall::average_outcome_divergence);
    print_comparison(&seq, &par, &report, fall::TOLERANCE);
    Ok(())
}

fn print_comparison<R>(
    seq: &RunReport<R>,
    par: &RunReport<R>,
    report: &ComparisonReport,
    tolerance: f64,
) {
    println!("Sequential: {:?} (avg {:?}/item)", seq.total, seq.average_per_item());
    println!("Parallel:   {:?} (avg {:?}/item)", par.total, par.average_per_item());
    println!("Speedup: {:.2}x", report.speedup);
    println!(
        "Efficiency: {:.1}% over {} workers",
        report.efficiency, report.worker_count
    );
    let verdict = if report.divergence <= tolerance {
        "ok"
    } else {
        "MISMATCH"
    };
    println!("Divergence: {:e} ({verdict})", report.divergence);
    if !report.excluded.is_empty() {
        println!(
            "Excluded {} of {} items:",
            report.excluded_count(),
            report.batch_size
        );
        for (index, error) in &report.excluded {
            println!("  item {index}: {error}");
        }
    }
    println!();
}
