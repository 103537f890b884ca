// Copyright 2026 the Basic Runtime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use basic_runtime::data::{DataEntry, DataTable};
use basic_runtime::machine::{MachineHandle, MachineRegistry};
use basic_runtime::string::{self, BasicString};
use basic_runtime::try_stack::ExceptionStack;
use basic_runtime::{Limits, PanicOnFatal, Runtime};

/// Entry point for `basic_runtime` wind-tunnel benchmarks.
///
/// Each scenario isolates one hot path that generated programs hit in tight loops.
fn bench_runtime(c: &mut Criterion) {
    bench_concat(c);
    bench_compare(c);
    bench_array_access(c);
    bench_data_read(c);
    bench_machine_event(c);
    bench_try_catch(c);
}

fn bench_concat(c: &mut Criterion) {
    let mut group = c.benchmark_group("string/concat");
    for len in [8_usize, 256, 4096] {
        let a = BasicString::from_vec(vec![b'a'; len]);
        let b = BasicString::from_vec(vec![b'b'; len]);
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |bch, _| {
            bch.iter(|| string::concat(black_box(Some(&a)), black_box(Some(&b))));
        });
    }
    group.finish();
}

fn bench_compare(c: &mut Criterion) {
    let a = BasicString::from_vec(vec![b'x'; 1024]);
    let mut tail = vec![b'x'; 1024];
    tail[1023] = b'y';
    let b = BasicString::from_vec(tail);
    c.bench_function("string/compare_1k_late_mismatch", |bch| {
        bch.iter(|| string::compare(black_box(Some(&a)), black_box(Some(&b))));
    });
}

fn bench_array_access(c: &mut Criterion) {
    let mut rt = Runtime::new(DataTable::default(), Limits::default(), PanicOnFatal);
    let (shape, mut array) = rt.dim_array::<f32>(&[63, 63]);
    let total = shape.total();
    c.bench_function("array/fill_64x64", |bch| {
        bch.iter(|| {
            for i in 0..total {
                rt.array_set(&mut array, i, black_box(1.0));
            }
        });
    });
    c.bench_function("array/linear_index_2d", |bch| {
        bch.iter(|| shape.linear_index(black_box(&[31, 17])));
    });
}

fn bench_data_read(c: &mut Criterion) {
    let entries = (0..256)
        .map(|i| {
            if i % 2 == 0 {
                DataEntry::Int(i)
            } else {
                DataEntry::from("item")
            }
        })
        .collect::<Vec<_>>();
    let mut rt = Runtime::new(DataTable::new(entries), Limits::default(), PanicOnFatal);
    c.bench_function("data/read_256_restore", |bch| {
        bch.iter(|| {
            for _ in 0..128 {
                black_box(rt.read_int());
                black_box(rt.read_string());
            }
            rt.restore();
        });
    });
}

fn build_ring(states: usize) -> (MachineRegistry, MachineHandle) {
    let mut r = MachineRegistry::new(&Limits::default());
    let m = r.create("RING");
    for i in 0..states {
        r.add_state(m, format!("S{i}"));
    }
    for i in 0..states {
        r.add_transition(m, format!("S{i}"), "NEXT", format!("S{}", (i + 1) % states));
    }
    (r, m)
}

fn bench_machine_event(c: &mut Criterion) {
    let (mut r, m) = build_ring(Limits::DEFAULT_MAX_STATES);
    let next = BasicString::from("NEXT");
    c.bench_function("machine/ring16_event", |bch| {
        bch.iter(|| r.event(m, black_box(Some(&next))));
    });
}

fn bench_try_catch(c: &mut Criterion) {
    let mut stack = ExceptionStack::new(&Limits::default());
    let message = BasicString::from("boom");
    c.bench_function("try/complete", |bch| {
        bch.iter(|| stack.try_catch(|_| Ok(black_box(1)), |_, _| Ok(0)));
    });
    c.bench_function("try/throw_and_catch", |bch| {
        bch.iter(|| {
            stack.try_catch(
                |s| Err::<i32, _>(s.throw(black_box(Some(&message)))),
                |_, _| Ok(0),
            )
        });
    });
}

criterion_group!(benches, bench_runtime);
criterion_main!(benches);
