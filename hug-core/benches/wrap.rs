use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hug_core::{wrap_with, AttrFilter, ObjectData, Value};

fn build_target(attr_count: usize) -> ObjectData {
    let mut obj = ObjectData::new();
    for i in 0..attr_count {
        obj.set(format!("attr{}", i), Value::Int(i as i64));
    }
    obj.set(
        "nested",
        ObjectData::from_entries([("inner", Value::Int(0))]),
    );
    obj.set(
        "double",
        Value::function(|_, args, _| match args.first() {
            Some(Value::Int(x)) => Value::Int(x * 2),
            _ => Value::Null,
        }),
    );
    obj
}

fn bench_wrap_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("wrap_construction");
    let filter = AttrFilter::default();

    for attr_count in [4, 32, 256] {
        let target = build_target(attr_count).into_ref();

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}attrs", attr_count)),
            &target,
            |b, target| {
                b.iter(|| black_box(wrap_with(black_box(target.clone()), &filter)));
            },
        );
    }

    group.finish();
}

fn bench_chain_steps(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain_steps");
    let filter = AttrFilter::default();

    let hug = wrap_with(build_target(32).into_ref(), &filter);
    group.bench_function("primitive_read", |b| {
        b.iter(|| black_box(hug.invoke(black_box("attr0"), &[]).unwrap()));
    });
    group.bench_function("primitive_write", |b| {
        b.iter(|| black_box(hug.invoke(black_box("attr0"), &[7.into()]).unwrap()));
    });
    group.bench_function("function_call", |b| {
        b.iter(|| black_box(hug.invoke(black_box("double"), &[21.into()]).unwrap()));
    });
    group.bench_function("descend_and_shrug", |b| {
        b.iter(|| {
            let inner = hug.invoke("nested", &[]).unwrap().into_hug().unwrap();
            black_box(inner.shrug())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_wrap_construction, bench_chain_steps);
criterion_main!(benches);
