//! Pipeline benchmarks:
//! - rule sweep alone on a mid-sized buffer
//! - full transpile including oxc validation
//! - import expansion from a temp directory

use criterion::{Criterion, criterion_group, criterion_main};
use raven_transpile::{FsLoader, SourceUnit, TranspileOptions, Transpiler, rules};
use std::hint::black_box;

const PROGRAM: &str = r#"abbrev {
  log = say
}
tmp Counter {
  closed count = 0
  init(start) {
    self.count = start
  }
  bump() {
    self.count = self.count + 1
    if (self.count == 10) log(@"ten: ${self.count}")
  }
}
fn double(x) = x * 2
val c = new Counter(0)
xlet {
  a = 1
  b = double(a)
}
wait(fn() { c.bump() }, 10)
expose double
"#;

/// `copies` renamed copies of the sample program, concatenated.
fn program(copies: usize) -> String {
    (0..copies)
        .map(|i| PROGRAM.replace("Counter", &format!("Counter{i}")))
        .collect()
}

fn benchmark_rule_sweep(c: &mut Criterion) {
    let source = program(20);
    c.bench_function("rule_sweep", |b| {
        b.iter(|| black_box(rules::rewrite(black_box(&source))));
    });
}

fn benchmark_transpile(c: &mut Criterion) {
    let dir = tempfile::TempDir::new().unwrap();
    let transpiler = Transpiler::new(&FsLoader, TranspileOptions::new().artifact_dir(dir.path()));
    let unit = SourceUnit::new(program(1), dir.path());
    c.bench_function("transpile_single", |b| {
        b.iter(|| black_box(transpiler.transpile(black_box(&unit)).unwrap()));
    });
}

fn benchmark_imports(c: &mut Criterion) {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("lib")).unwrap();
    for i in 0..8 {
        std::fs::write(
            dir.path().join("lib").join(format!("m{i}.rnm")),
            format!("fn f{i}(x) = x + {i}\nexpose f{i}"),
        )
        .unwrap();
    }
    let main: String = (0..8).map(|i| format!("import lib.m{i};\n")).collect();
    let transpiler = Transpiler::new(&FsLoader, TranspileOptions::new().artifact_dir(dir.path()));
    let unit = SourceUnit::new(main, dir.path());
    c.bench_function("transpile_imports", |b| {
        b.iter(|| black_box(transpiler.transpile(black_box(&unit)).unwrap()));
    });
}

criterion_group!(benches, benchmark_rule_sweep, benchmark_transpile, benchmark_imports);
criterion_main!(benches);
