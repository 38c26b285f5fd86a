use phyloset::model::{CharacterDataType, CharacterMatrix, TaxonNamespace, TreeList};
use phyloset::{DataItem, DataSet, DataSetError};
use std::collections::HashSet;
use std::rc::Rc;

fn namespace(label: &str) -> Rc<TaxonNamespace> {
    Rc::new(TaxonNamespace::new().with_label(label))
}

fn tree_list_on(namespace: &Rc<TaxonNamespace>) -> Rc<TreeList> {
    Rc::new(TreeList::new(Rc::clone(namespace)))
}

// ============= Construction =============

#[test]
fn test_new_is_empty() {
    let data_set = DataSet::new();
    assert!(data_set.taxon_namespaces().is_empty());
    assert!(data_set.tree_lists().is_empty());
    assert!(data_set.char_matrices().is_empty());
    assert_eq!(data_set.label(), None);
    assert!(data_set.comments().is_empty());
    assert!(data_set.attached_taxon_namespace().is_none());
}

#[test]
fn test_from_items_dispatches_by_category() {
    let birds = namespace("birds");
    let fish = namespace("fish");
    let trees = tree_list_on(&fish);
    let matrix = Rc::new(CharacterMatrix::new(Rc::clone(&birds), CharacterDataType::Dna));

    let data_set = DataSet::from_items([
        DataItem::from(&birds),
        DataItem::from(&trees),
        DataItem::from(&matrix),
    ]);

    assert_eq!(data_set.taxon_namespaces().len(), 2);
    assert!(Rc::ptr_eq(data_set.taxon_namespaces().get(0).unwrap(), &birds));
    assert!(Rc::ptr_eq(data_set.taxon_namespaces().get(1).unwrap(), &fish));
    assert_eq!(data_set.tree_lists().len(), 1);
    assert_eq!(data_set.char_matrices().len(), 1);
    assert!(data_set.is_consistent());
}

// ============= Registration =============

#[test]
fn test_add_tree_list_registers_namespace_first() {
    let taxa = namespace("ratites");
    let trees = tree_list_on(&taxa);
    let mut data_set = DataSet::new();

    assert!(data_set.add_tree_list(Rc::clone(&trees)));
    assert_eq!(data_set.taxon_namespaces().len(), 1);
    assert!(data_set.taxon_namespaces().contains(&taxa));
    assert!(data_set.tree_lists().contains(&trees));
    assert!(data_set.is_consistent());
}

#[test]
fn test_add_tree_list_keeps_already_registered_namespace_position() {
    let first = namespace("first");
    let second = namespace("second");
    let mut data_set = DataSet::from_items([Rc::clone(&first), Rc::clone(&second)]);

    data_set.add_tree_list(tree_list_on(&first));
    assert_eq!(data_set.taxon_namespaces().len(), 2);
    assert_eq!(data_set.taxon_namespaces().position(&first), Some(0));
}

#[test]
fn test_add_char_matrix_registers_namespace() {
    let taxa = namespace("penguins");
    let matrix = Rc::new(CharacterMatrix::new(Rc::clone(&taxa), CharacterDataType::Protein));
    let mut data_set = DataSet::new();

    assert!(data_set.add(Rc::clone(&matrix)));
    assert!(data_set.taxon_namespaces().contains(&taxa));
    assert!(data_set.char_matrices().contains(&matrix));
}

#[test]
fn test_adding_twice_changes_nothing() {
    let taxa = namespace("moa");
    let trees = tree_list_on(&taxa);
    let matrix = Rc::new(CharacterMatrix::new(Rc::clone(&taxa), CharacterDataType::Dna));
    let mut data_set = DataSet::new();

    assert!(data_set.add(Rc::clone(&taxa)));
    assert!(data_set.add(Rc::clone(&trees)));
    assert!(data_set.add(Rc::clone(&matrix)));
    assert!(!data_set.add(Rc::clone(&taxa)));
    assert!(!data_set.add(Rc::clone(&trees)));
    assert!(!data_set.add(Rc::clone(&matrix)));

    assert_eq!(data_set.taxon_namespaces().len(), 1);
    assert_eq!(data_set.tree_lists().len(), 1);
    assert_eq!(data_set.char_matrices().len(), 1);
}

#[test]
fn test_insertion_order_preserved() {
    let taxa = namespace("taxa");
    let lists: Vec<_> = (0..3)
        .map(|i| Rc::new(TreeList::new(Rc::clone(&taxa)).with_label(format!("list{i}"))))
        .collect();
    let mut data_set = DataSet::new();
    for tree_list in &lists {
        data_set.add_tree_list(Rc::clone(tree_list));
    }

    let labels: Vec<_> = data_set
        .tree_lists()
        .iter()
        .map(|tree_list| tree_list.label().unwrap().to_string())
        .collect();
    assert_eq!(labels, vec!["list0", "list1", "list2"]);
}

// ============= Factories and Attachment =============

#[test]
fn test_new_tree_list_without_namespace_creates_one() {
    let mut data_set = DataSet::new();
    let trees = data_set.new_tree_list(Some("mcmc"), None);

    assert_eq!(trees.label(), Some("mcmc"));
    assert_eq!(data_set.taxon_namespaces().len(), 1);
    assert!(data_set.taxon_namespaces().contains(trees.taxon_namespace()));
}

#[test]
fn test_new_items_use_attached_namespace() {
    let mut data_set = DataSet::new();
    let taxa = namespace("shared");
    data_set.attach_taxon_namespace(Rc::clone(&taxa));
    assert!(data_set.taxon_namespaces().contains(&taxa));

    let trees = data_set.new_tree_list(None, None);
    let matrix = data_set.new_char_matrix(CharacterDataType::Dna, Some("16S"), None);
    assert!(Rc::ptr_eq(trees.taxon_namespace(), &taxa));
    assert!(Rc::ptr_eq(matrix.taxon_namespace(), &taxa));
    assert_eq!(matrix.label(), Some("16S"));
    assert_eq!(data_set.taxon_namespaces().len(), 1);

    let detached = data_set.detach_taxon_namespace().unwrap();
    assert!(Rc::ptr_eq(&detached, &taxa));
    assert!(data_set.taxon_namespaces().contains(&taxa));

    // Explicit namespace wins
    let other = data_set.new_taxon_namespace(Some("other"));
    let trees = data_set.new_tree_list(None, Some(Rc::clone(&other)));
    assert!(Rc::ptr_eq(trees.taxon_namespace(), &other));
    assert_eq!(data_set.taxon_namespaces().len(), 2);
}

#[test]
fn test_filtered_views() {
    let mut data_set = DataSet::new();
    let birds = data_set.new_taxon_namespace(Some("birds"));
    let fish = data_set.new_taxon_namespace(Some("fish"));
    data_set.new_tree_list(Some("b1"), Some(Rc::clone(&birds)));
    data_set.new_tree_list(Some("f1"), Some(Rc::clone(&fish)));
    data_set.new_tree_list(Some("b2"), Some(Rc::clone(&birds)));
    data_set.new_char_matrix(CharacterDataType::Dna, None, Some(Rc::clone(&fish)));

    let bird_lists: Vec<_> = data_set
        .tree_lists_in(&birds)
        .map(|tree_list| tree_list.label().unwrap())
        .collect();
    assert_eq!(bird_lists, vec!["b1", "b2"]);
    assert_eq!(data_set.char_matrices_in(&fish).count(), 1);
    assert_eq!(data_set.char_matrices_in(&birds).count(), 0);
}

// ============= Removal =============

#[test]
fn test_remove_referenced_namespace_fails() {
    let mut data_set = DataSet::new();
    let taxa = data_set.new_taxon_namespace(Some("in use"));
    let trees = data_set.new_tree_list(None, Some(Rc::clone(&taxa)));

    let result = data_set.remove_taxon_namespace(&taxa);
    assert!(matches!(result, Err(DataSetError::TaxonNamespaceInUse { .. })));
    assert!(data_set.taxon_namespaces().contains(&taxa));
    assert!(data_set.is_consistent());

    assert!(data_set.remove_tree_list(&trees));
    assert!(!data_set.remove_tree_list(&trees));
    assert_eq!(data_set.remove_taxon_namespace(&taxa), Ok(true));
    assert_eq!(data_set.remove_taxon_namespace(&taxa), Ok(false));
    assert!(data_set.taxon_namespaces().is_empty());
}

#[test]
fn test_remove_attached_namespace_fails() {
    let mut data_set = DataSet::new();
    let taxa = namespace("attached");
    data_set.attach_taxon_namespace(Rc::clone(&taxa));
    assert!(data_set.remove_taxon_namespace(&taxa).is_err());

    data_set.detach_taxon_namespace();
    assert_eq!(data_set.remove_taxon_namespace(&taxa), Ok(true));
}

#[test]
fn test_remove_char_matrix_keeps_namespace() {
    let mut data_set = DataSet::new();
    let matrix = data_set.new_char_matrix(CharacterDataType::Standard, None, None);
    assert!(data_set.remove_char_matrix(&matrix));
    assert!(data_set.char_matrices().is_empty());
    assert_eq!(data_set.taxon_namespaces().len(), 1);
}

// ============= Identity =============

#[test]
fn test_equality_is_identity() {
    let taxa = namespace("same");
    let first = DataSet::from_items([Rc::clone(&taxa)]);
    let second = DataSet::from_items([Rc::clone(&taxa)]);

    assert_ne!(first, second);
    assert_eq!(first, first);
    assert_ne!(first.id(), second.id());
}

#[test]
fn test_hash_is_stable_under_mutation() {
    let mut data_set = DataSet::new();
    let mut seen = HashSet::new();
    let id = data_set.id();
    seen.insert(id);

    data_set.new_tree_list(None, None);
    data_set.push_comment("mutated");
    assert!(seen.contains(&data_set.id()));
}

#[test]
fn test_data_sets_in_hash_set() {
    let first = DataSet::new();
    let second = DataSet::new();
    let set: HashSet<&DataSet> = [&first, &second, &first].into_iter().collect();
    assert_eq!(set.len(), 2);
}

// ============= Label, Comments, Display =============

#[test]
fn test_label_and_comments() {
    let mut data_set = DataSet::new().with_label("ratites");
    data_set.push_comment("from museum collection");
    data_set.push_comment("second batch");
    assert_eq!(data_set.label(), Some("ratites"));
    assert_eq!(data_set.comments(), ["from museum collection", "second batch"]);

    data_set.set_label(None);
    assert_eq!(data_set.label(), None);
}

#[test]
fn test_display_summary() {
    let mut data_set = DataSet::new().with_label("ratites");
    data_set.new_tree_list(None, None);
    assert_eq!(
        data_set.to_string(),
        "DataSet 'ratites': 1 taxon namespace(s), 1 tree list(s), 0 character matrix(es)"
    );
}
