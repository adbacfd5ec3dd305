/*!
 * Engine Benchmarks
 *
 * Compare full simulation cost across dispatch policies and process counts
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sched_sim::parser::{parse_source, render_processes, GrammarVariant};
use sched_sim::scheduler::{Engine, SchedulingPolicy, TimeQuantum};
use sched_sim::{IoCycle, Process};

fn workload(count: u64) -> Vec<Process> {
    (0..count)
        .map(|i| {
            Process::new(format!("P{}", i), i % 17, 1 + (i * 7) % 13)
                .with_io([IoCycle::new(i % 5, 1 + i % 3)])
        })
        .collect()
}

fn bench_policies(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulate");
    let quantum = TimeQuantum::new(3).unwrap();

    for count in [10u64, 100, 500] {
        let processes = workload(count);
        for policy in SchedulingPolicy::ALL {
            group.bench_with_input(
                BenchmarkId::new(policy.as_str(), count),
                &processes,
                |b, processes| {
                    b.iter(|| {
                        let timeline =
                            Engine::with_quantum(processes.clone(), policy, quantum).run();
                        black_box(timeline.len())
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_round_robin_quantum(c: &mut Criterion) {
    let mut group = c.benchmark_group("round_robin_quantum");
    let processes = workload(200);

    for ticks in [1u64, 4, 16] {
        let quantum = TimeQuantum::new(ticks).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(ticks), &quantum, |b, quantum| {
            b.iter(|| {
                Engine::with_quantum(processes.clone(), SchedulingPolicy::RoundRobin, *quantum)
                    .run()
            });
        });
    }

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let source = render_processes(&workload(1000));

    c.bench_function("parse_1000_lines", |b| {
        b.iter(|| parse_source(black_box(&source), GrammarVariant::WithIo).unwrap());
    });
}

criterion_group!(benches, bench_policies, bench_round_robin_quantum, bench_parse);
criterion_main!(benches);
