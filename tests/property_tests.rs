//! Property-based tests for the data set invariants.
//!
//! A pool of namespaces, tree lists and matrices is generated once per case;
//! strategies then pick operations by index into that pool, so the same
//! instance is frequently added more than once.

use proptest::prelude::*;

use phyloset::DataSet;
use phyloset::container::OrderedSet;
use phyloset::model::{CharacterDataType, CharacterMatrix, TaxonNamespace, TreeList};
use std::rc::Rc;

const NUM_NAMESPACES: usize = 4;
const POOL_SIZE: usize = 8;

#[derive(Debug, Clone)]
enum Op {
    AddNamespace(usize),
    AddTreeList(usize),
    AddCharMatrix(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..NUM_NAMESPACES).prop_map(Op::AddNamespace),
        (0..POOL_SIZE).prop_map(Op::AddTreeList),
        (0..POOL_SIZE).prop_map(Op::AddCharMatrix),
    ]
}

struct Pool {
    namespaces: Vec<Rc<TaxonNamespace>>,
    tree_lists: Vec<Rc<TreeList>>,
    char_matrices: Vec<Rc<CharacterMatrix>>,
}

impl Pool {
    fn new() -> Self {
        let namespaces: Vec<_> = (0..NUM_NAMESPACES)
            .map(|_| Rc::new(TaxonNamespace::new()))
            .collect();
        let tree_lists = (0..POOL_SIZE)
            .map(|i| Rc::new(TreeList::new(Rc::clone(&namespaces[i % NUM_NAMESPACES]))))
            .collect();
        let char_matrices = (0..POOL_SIZE)
            .map(|i| {
                let namespace = Rc::clone(&namespaces[(i + 1) % NUM_NAMESPACES]);
                Rc::new(CharacterMatrix::new(namespace, CharacterDataType::Dna))
            })
            .collect();
        Pool {
            namespaces,
            tree_lists,
            char_matrices,
        }
    }

    fn apply(&self, data_set: &mut DataSet, op: &Op) {
        match *op {
            Op::AddNamespace(i) => data_set.add(Rc::clone(&self.namespaces[i])),
            Op::AddTreeList(i) => data_set.add_tree_list(Rc::clone(&self.tree_lists[i])),
            Op::AddCharMatrix(i) => data_set.add_char_matrix(Rc::clone(&self.char_matrices[i])),
        };
    }
}

/// Expected contents of `set`: first occurrences of `picked`, in order.
fn first_occurrences(picked: &[usize]) -> Vec<usize> {
    let mut expected = Vec::new();
    for &i in picked {
        if !expected.contains(&i) {
            expected.push(i);
        }
    }
    expected
}

fn positions<T: phyloset::identity::Identity>(set: &OrderedSet<T>, pool: &[Rc<T>]) -> Vec<usize> {
    set.iter()
        .map(|item| {
            pool.iter()
                .position(|candidate| Rc::ptr_eq(candidate, item))
                .unwrap()
        })
        .collect()
}

proptest! {
    #[test]
    fn namespace_registered_after_every_add_tree_list(
        picks in prop::collection::vec(0..POOL_SIZE, 0..30)
    ) {
        let pool = Pool::new();
        let mut data_set = DataSet::new();
        for i in picks {
            data_set.add_tree_list(Rc::clone(&pool.tree_lists[i]));
            for tree_list in data_set.tree_lists() {
                prop_assert!(data_set.taxon_namespaces().contains(tree_list.taxon_namespace()));
            }
        }
    }

    #[test]
    fn invariant_holds_under_mixed_operations(ops in prop::collection::vec(op(), 0..40)) {
        let pool = Pool::new();
        let mut data_set = DataSet::new();
        for op in &ops {
            pool.apply(&mut data_set, op);
            prop_assert!(data_set.is_consistent());
        }
    }

    #[test]
    fn repeated_adds_keep_size_and_order(
        picks in prop::collection::vec(0..POOL_SIZE, 1..30)
    ) {
        let pool = Pool::new();
        let mut data_set = DataSet::new();
        for &i in &picks {
            data_set.add_char_matrix(Rc::clone(&pool.char_matrices[i]));
        }
        let expected = first_occurrences(&picks);
        prop_assert_eq!(positions(data_set.char_matrices(), &pool.char_matrices), expected.clone());

        // Adding everything again changes nothing
        for &i in &picks {
            prop_assert!(!data_set.add(Rc::clone(&pool.char_matrices[i])));
        }
        prop_assert_eq!(positions(data_set.char_matrices(), &pool.char_matrices), expected);
    }

    #[test]
    fn namespaces_keep_insertion_order(
        picks in prop::collection::vec(0..NUM_NAMESPACES, 1..20)
    ) {
        let pool = Pool::new();
        let data_set = DataSet::from_items(picks.iter().map(|&i| Rc::clone(&pool.namespaces[i])));
        prop_assert_eq!(
            positions(data_set.taxon_namespaces(), &pool.namespaces),
            first_occurrences(&picks)
        );
    }
}
