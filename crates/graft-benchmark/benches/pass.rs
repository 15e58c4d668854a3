use std::fmt::Write as _;
use std::hint::black_box;

use codspeed_criterion_compat::{
    BenchmarkId, Criterion, Throughput, criterion_group, criterion_main,
};
use graft_analysis::FixtureResolver;
use graft_engine::{Cancellation, Engine, EngineConfig};

/// A class with `methods` methods, every one of them offering rewrites.
fn generate(methods: usize) -> String {
    let mut text = String::from(
        "class Foo\n{\n}\nclass Widget\n{\n    private List<int> _items;\n    private object Gate;\n",
    );
    for i in 0..methods {
        write!(
            text,
            "
    bool M{i}(IEnumerable<object> all, bool flag)
    {{
        var foos = all.Where(x => x is Foo).Cast<Foo>();
        lock (this)
        {{
            return _items.Count() == 0 || (flag ? true : all.Count() > 0);
        }}
    }}
"
        )
        .unwrap();
    }
    text.push_str("}\n");
    text
}

fn engine(parallel: bool) -> Engine {
    let config = EngineConfig { parallel, ..EngineConfig::default() };
    Engine::new(graft_rules::registry(), config)
}

fn benchmark_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_pass");

    for methods in [10, 200] {
        let text = generate(methods);
        let tree = graft_parse::parse(&text).into_tree();
        group.throughput(Throughput::Bytes(text.len() as u64));

        for parallel in [false, true] {
            let engine = engine(parallel);
            let id = BenchmarkId::new(if parallel { "parallel" } else { "sequential" }, methods);
            group.bench_with_input(id, &tree, |b, tree| {
                b.iter(|| {
                    let outcome = engine.run_pass(tree, &FixtureResolver, &Cancellation::new());
                    black_box(outcome);
                });
            });
        }
    }

    group.finish();
}

fn benchmark_rewrite(c: &mut Criterion) {
    let text = generate(200);
    let tree = graft_parse::parse(&text).into_tree();
    let engine = engine(true);
    let matches = engine.run_pass(&tree, &FixtureResolver, &Cancellation::new()).matches;
    let last = matches.last().unwrap().clone();
    let builder = engine.registry().builders_for(last.pattern())[0].id();

    c.bench_function("apply_rewrite", |b| {
        b.iter(|| {
            let rewritten = engine.apply_rewrite(&tree, &last, builder, &FixtureResolver).unwrap();
            black_box(rewritten);
        });
    });
}

criterion_group!(benches, benchmark_pass, benchmark_rewrite);
criterion_main!(benches);
