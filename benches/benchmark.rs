use criterion::{Criterion, criterion_group, criterion_main};
use phyloset::DataSet;
use phyloset::model::{TaxonNamespace, TreeList};
use std::hint::black_box;
use std::rc::Rc;

const REGISTRATION_SIZES: &[(&str, usize, usize)] = &[
    ("10 lists / 2 namespaces", 10, 2),
    ("1k lists / 10 namespaces", 1_000, 10),
    ("10k lists / 100 namespaces", 10_000, 100),
];

const TREE_SIZES: &[(&str, usize)] = &[("caterpillar-n50", 50), ("caterpillar-n500", 500)];

fn register_tree_lists(num_lists: usize, num_namespaces: usize) -> DataSet {
    let namespaces: Vec<_> = (0..num_namespaces)
        .map(|_| Rc::new(TaxonNamespace::new()))
        .collect();
    let mut data_set = DataSet::new();
    for i in 0..num_lists {
        let tree_list = TreeList::new(Rc::clone(&namespaces[i % num_namespaces]));
        data_set.add_tree_list(Rc::new(tree_list));
    }
    data_set
}

/// Builds a caterpillar tree with `num_leaves` leaves into a fresh list.
fn build_caterpillar(num_leaves: usize) -> usize {
    let tree_list = TreeList::new(Rc::new(TaxonNamespace::new()));
    let mut builder = tree_list.new_tree(num_leaves);
    let mut spine = builder.add_leaf("t0", Some(1.0)).unwrap();
    for i in 1..num_leaves - 1 {
        let leaf = builder.add_leaf(&format!("t{i}"), Some(1.0)).unwrap();
        spine = builder.add_internal((spine, leaf), Some(0.5)).unwrap();
    }
    let last = builder
        .add_leaf(&format!("t{}", num_leaves - 1), Some(1.0))
        .unwrap();
    builder.add_root((spine, last)).unwrap();
    tree_list.push(builder.finish().unwrap()).unwrap();
    tree_list.len()
}

fn registration(c: &mut Criterion) {
    for (name, num_lists, num_namespaces) in REGISTRATION_SIZES {
        c.bench_function(name, |b| {
            b.iter(|| register_tree_lists(black_box(*num_lists), *num_namespaces));
        });
    }
}

fn tree_building(c: &mut Criterion) {
    for (name, num_leaves) in TREE_SIZES {
        c.bench_function(name, |b| {
            b.iter(|| build_caterpillar(black_box(*num_leaves)));
        });
    }
}

criterion_group!(regression, registration);
criterion_group! {
    name = reporting;
    config = Criterion::default().sample_size(10);
    targets = tree_building
}
criterion_main!(regression, reporting);
