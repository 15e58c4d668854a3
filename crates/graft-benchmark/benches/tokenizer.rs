use codspeed_criterion_compat::{
    Criterion, Throughput, black_box, criterion_group, criterion_main,
};

static SOURCE: &str = "
class Widget { private List<int> _items; bool Empty() { return _items.Count() == 0; } }
class Widget { private List<int> _items; bool Empty() { return _items.Count() == 0; } }
class Widget { private List<int> _items; bool Empty() { return _items.Count() == 0; } }
class Widget { private List<int> _items; bool Empty() { return _items.Count() == 0; } }
class Widget { private List<int> _items; bool Empty() { return _items.Count() == 0; } }
class Widget { private List<int> _items; bool Empty() { return _items.Count() == 0; } }
class Widget { private List<int> _items; bool Empty() { return _items.Count() == 0; } }
class Widget { private List<int> _items; bool Empty() { return _items.Count() == 0; } }
class Widget { private List<int> _items; bool Empty() { return _items.Count() == 0; } }
class Widget { private List<int> _items; bool Empty() { return _items.Count() == 0; } }
";

static TRIVIA: &str = "
// It was the year when they finally immanentized the Eschaton
/* It was the year when they finally immanentized the Eschaton */
#region It was the year when they finally immanentized the Eschaton
#endregion
    // It was the year when they finally immanentized the Eschaton
    /* It was the year when they
       finally immanentized the Eschaton */
#if DEBUG
#endif
// It was the year when they finally immanentized the Eschaton
/* It was the year when they finally immanentized the Eschaton */
";

static CANDIDATES: [(&str, &str); 2] = [("declarations", SOURCE), ("trivia", TRIVIA)];

fn iterate(s: &str) {
    let tokens = graft_tokenizer::tokenize(s);
    black_box(tokens);
}

fn bench_iterate(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");

    for (name, source) in CANDIDATES {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(name, &source, |b, &s| b.iter(|| iterate(s)));
    }
}

criterion_group!(benches, bench_iterate);
criterion_main!(benches);
