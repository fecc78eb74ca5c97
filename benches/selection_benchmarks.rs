use std::time::{Duration, Instant};

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use keyhunt::engine::KeyboardTrainer;
use keyhunt::engine::random::{OsByteSource, OsIntegerSource, SecureRandom};
use keyhunt::keyboard::layout::KeyboardLayout;
use keyhunt::keyboard::model::Keyboard;

fn bench_sources(c: &mut Criterion) {
    let mut int_source = OsIntegerSource;
    c.bench_function("os-integer random_int 0..=51", |b| {
        b.iter(|| int_source.random_int(black_box(0), black_box(51)))
    });

    let mut byte_source = OsByteSource;
    c.bench_function("os-bytes random_int 0..=51", |b| {
        b.iter(|| byte_source.random_int(black_box(0), black_box(51)))
    });
}

fn bench_keydown(c: &mut Criterion) {
    let keyboard = Keyboard::from_layout(&KeyboardLayout::qwerty());
    let mut trainer = KeyboardTrainer::new(
        keyboard,
        Box::new(OsIntegerSource),
        Duration::from_millis(150),
    );
    trainer.start();

    c.bench_function("handle_keydown on target", |b| {
        b.iter(|| {
            let target = trainer
                .highlighted()
                .map(|k| k.id.clone())
                .unwrap_or_default();
            trainer.handle_keydown(black_box(&target), Instant::now())
        })
    });
}

criterion_group!(benches, bench_sources, bench_keydown);
criterion_main!(benches);
