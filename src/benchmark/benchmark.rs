use std::time::Instant;

use crate::simulation::links::collect_links;
use crate::simulation::states::{Entity, Field, NVec2, Region};
use crate::simulation::stepper::step_bounce;

/// Helper to build a deterministic field of size `n` — no rand needed
fn make_field(n: usize, region: Region) -> Field {
    let mut entities = Vec::with_capacity(n);

    for i in 0..n {
        let i_f = i as f64;
        entities.push(Entity {
            x: NVec2::new(
                ((i_f * 0.37).sin() * 0.5 + 0.5) * region.width,
                ((i_f * 0.13).cos() * 0.5 + 0.5) * region.height,
            ),
            v: NVec2::new((i_f * 0.07).sin() * 0.1, (i_f * 0.11).cos() * 0.1),
            radius: 1.0,
            alpha: 0.5,
            rotation: 0.0,
            spin: 0.1,
            scale: 1.0,
        });
    }

    Field {
        entities,
        region,
        frame: 0,
    }
}

/// Time the bounce stepper across a range of entity counts
pub fn bench_step() {
    let ns = [35, 70, 140, 280, 560, 1120];
    let steps = 10_000;
    let region = Region::new(1920.0, 1080.0);

    for n in ns {
        let mut field = make_field(n, region);

        // Warm up
        step_bounce(&mut field);

        let t0 = Instant::now();
        for _ in 0..steps {
            step_bounce(&mut field);
        }
        let per_step = t0.elapsed().as_secs_f64() / steps as f64;

        println!("N = {n:5}, step = {:10.8} s", per_step);
    }
}

/// Time the O(n^2) link pass across a range of entity counts
/// Paste output directly into a spreadsheet to graph
pub fn bench_links() {
    println!("N,links_ms");

    let region = Region::new(1920.0, 1080.0);
    let threshold = 120.0;

    for n in (20..=1120).step_by(20) {
        // Small n: average over more passes to smooth noise
        let passes = if n <= 280 { 200 } else { 20 };

        let field = make_field(n, region);

        // Warm up
        let _ = collect_links(&field.entities, threshold);

        let t0 = Instant::now();
        for _ in 0..passes {
            let _ = collect_links(&field.entities, threshold);
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / passes as f64;

        println!("{},{:.6}", n, ms);
    }
}
