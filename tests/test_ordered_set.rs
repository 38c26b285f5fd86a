use phyloset::container::OrderedSet;
use phyloset::identity::Identity;
use phyloset::model::{TaxonNamespace, TreeBuilder};
use std::rc::Rc;

fn namespaces(n: usize) -> Vec<Rc<TaxonNamespace>> {
    (0..n)
        .map(|i| Rc::new(TaxonNamespace::new().with_label(format!("ns{i}"))))
        .collect()
}

fn labels(set: &OrderedSet<TaxonNamespace>) -> Vec<String> {
    set.iter()
        .map(|ns| ns.label().unwrap_or_default().to_string())
        .collect()
}

#[test]
fn test_add_keeps_insertion_order() {
    let items = namespaces(3);
    let mut set = OrderedSet::new();
    for item in [&items[2], &items[0], &items[1]] {
        assert!(set.add(Rc::clone(item)));
    }
    assert_eq!(labels(&set), vec!["ns2", "ns0", "ns1"]);
}

#[test]
fn test_add_same_instance_is_noop() {
    let items = namespaces(2);
    let mut set = OrderedSet::new();
    set.add(Rc::clone(&items[0]));
    set.add(Rc::clone(&items[1]));
    assert!(!set.add(Rc::clone(&items[0])));
    assert_eq!(set.len(), 2);
    assert_eq!(labels(&set), vec!["ns0", "ns1"]);
}

#[test]
fn test_membership_is_by_identity_not_content() {
    let first = Rc::new(TaxonNamespace::with_taxa(["Tui"]));
    let twin = Rc::new(TaxonNamespace::with_taxa(["Tui"]));
    let mut set = OrderedSet::new();
    set.add(Rc::clone(&first));

    assert!(set.contains(&first));
    assert!(!set.contains(&twin));
    assert!(set.add(twin));
    assert_eq!(set.len(), 2);
}

#[test]
fn test_contains_id_resolves_namespace_of_tree() {
    let items = namespaces(2);
    let mut set = OrderedSet::new();
    set.add(Rc::clone(&items[0]));

    let mut builder = TreeBuilder::new(Rc::clone(&items[0]), 2);
    let a = builder.add_leaf("Weka", None).unwrap();
    let b = builder.add_leaf("Takahe", None).unwrap();
    builder.add_root((a, b)).unwrap();
    let tree = builder.finish().unwrap();

    assert!(set.contains_id(tree.taxon_namespace_id()));
    assert!(set.contains_id(items[0].instance_id()));
    assert!(!set.contains_id(items[1].instance_id()));
}

#[test]
fn test_remove_shifts_later_items() {
    let items = namespaces(3);
    let mut set: OrderedSet<TaxonNamespace> = items.iter().cloned().collect();

    let removed = set.remove(&items[0]).unwrap();
    assert!(Rc::ptr_eq(&removed, &items[0]));
    assert_eq!(labels(&set), vec!["ns1", "ns2"]);
    assert_eq!(set.position(&items[2]), Some(1));
    assert!(set.remove(&items[0]).is_none());
}

#[test]
fn test_get_and_iterate() {
    let items = namespaces(2);
    let set: OrderedSet<TaxonNamespace> = items.iter().cloned().collect();
    assert!(Rc::ptr_eq(set.get(1).unwrap(), &items[1]));
    assert!(set.get(2).is_none());

    let mut count = 0;
    for _ in &set {
        count += 1;
    }
    assert_eq!(count, 2);
    assert!(!set.is_empty());
    assert!(OrderedSet::<TaxonNamespace>::default().is_empty());
}
