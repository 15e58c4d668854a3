use std::hint::black_box;

use codspeed_criterion_compat::{
    BenchmarkId, Criterion, Throughput, criterion_group, criterion_main,
};

fn benchmark_parser(c: &mut Criterion) {
    let files = [
        (
            "Simple",
            r#"
            class C
            {
                int M() { return 42; }
            }
            "#
            .to_owned(),
        ),
        (
            "Medium",
            r#"
            class Widget
            {
                private List<int> _items;
                private readonly object _gate = new object();

                bool IsEmpty() { return _items.Count() == 0; }

                IEnumerable<Foo> Foos(IEnumerable<object> all)
                {
                    return all.Where(x => x is Foo).Cast<Foo>();
                }

                void Update(bool flag)
                {
                    lock (this)
                    {
                        if (flag ? true : IsEmpty()) { return; } else { Update(!flag); }
                    }
                }
            }
            "#
            .to_owned(),
        ),
        (
            "Recovery",
            r#"
            class Broken
            {
                int M( { return 1 + ; }
                private List<int _items
                void N() { lock (this }
            }
            "#
            .to_owned(),
        ),
    ];

    let mut group = c.benchmark_group("Parser Benchmark");

    for (name, text) in &files {
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("parse_code", name), text, |b, text| {
            b.iter(|| {
                let parse = graft_parse::parse(text);
                black_box(parse);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_parser);
criterion_main!(benches);
