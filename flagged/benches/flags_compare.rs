use criterion::{Criterion, black_box, criterion_group, criterion_main};
use flagged::{BitFlags8, BitFlags64};

// Baseline: the struct-of-bools shape that a generated bitflags type replaces.
#[derive(Clone, Copy, Default)]
struct Permissions {
  read: bool,
  write: bool,
  exec: bool,
}

fn bench_set_then_check(c: &mut Criterion) {
  let mut group = c.benchmark_group("set_then_check");
  group.bench_function("bools_struct", |b| {
    b.iter(|| {
      let mut perms = Permissions::default();
      perms.write = true;
      perms.exec = true;
      black_box(perms.read | perms.write | perms.exec)
    })
  });
  group.bench_function("bitflags8", |b| {
    b.iter(|| {
      let mut flags = BitFlags8::default();
      flags.set(1);
      flags.set(2);
      black_box(flags.any_of(&[0, 1, 2]))
    })
  });
  group.finish();
}

fn bench_toggle_sweep(c: &mut Criterion) {
  c.bench_function("toggle_sweep_64", |b| {
    b.iter(|| {
      let mut flags = BitFlags64::default();
      for idx in 0..64 {
        flags.toggle(black_box(idx));
      }
      black_box(flags.any_set())
    })
  });
}

fn bench_display(c: &mut Criterion) {
  c.bench_function("display_64", |b| {
    let mut flags = BitFlags64::default();
    flags.set_all();
    b.iter(|| black_box(flags.to_string()))
  });
}

criterion_group!(benches, bench_set_then_check, bench_toggle_sweep, bench_display);
criterion_main!(benches);
