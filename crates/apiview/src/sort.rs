use jsondoc::{Id, Item, ItemExt, ItemKind, JsonDoc};

/// Children of a module split into the items listed in the module's section
/// and the nested modules that get sections of their own.
#[derive(Debug, Default, PartialEq)]
pub struct SortedChildren<'c> {
    pub non_module: Vec<&'c Item>,
    pub module: Vec<&'c Item>,
}

/// Order sibling items: by kind priority, then by name ignoring case, then by
/// exact name, then by id. Ids missing from the index are dropped, and an id
/// listed twice is kept once.
pub fn sort_children<'c>(doc: &'c JsonDoc, ids: &[Id]) -> SortedChildren<'c> {
    let mut items: Vec<&Item> = ids.iter().filter_map(|id| doc.get(id)).collect();
    items.sort_by_cached_key(|item| sort_key(item));
    items.dedup_by_key(|item| item.id);

    let (module, non_module) = items
        .into_iter()
        .partition(|item| item.kind() == Some(ItemKind::Module));
    SortedChildren { non_module, module }
}

fn sort_key(item: &Item) -> (usize, String, String, Id) {
    // Payloads the model cannot read go after every known kind.
    let priority = item.kind().map_or(ItemKind::ALL.len(), ItemKind::priority);
    let name = item.sort_name();
    (priority, name.to_lowercase(), name.to_string(), item.id)
}

#[cfg(test)]
mod tests {
    use jsondoc::{ItemEnum, Struct, StructKind, Use};

    use super::*;
    use crate::testutils::*;

    fn use_item(id: u32, source: &str) -> Item {
        item(
            id,
            None,
            ItemEnum::Use(Use {
                source: source.to_string(),
                name: source.rsplit("::").next().unwrap_or(source).to_string(),
                id: None,
                is_glob: false,
            }),
        )
    }

    fn unit_struct(id: u32, name: &str) -> Item {
        item(
            id,
            Some(name),
            ItemEnum::Struct(Struct {
                kind: StructKind::Unit,
                generics: Default::default(),
                impls: vec![],
            }),
        )
    }

    fn function(id: u32, name: &str) -> Item {
        item(
            id,
            Some(name),
            ItemEnum::Function(jsondoc::Function {
                sig: Default::default(),
                generics: Default::default(),
                header: Default::default(),
                has_body: true,
            }),
        )
    }

    fn names(items: &[&Item]) -> Vec<String> {
        items.iter().map(|i| i.sort_name().to_string()).collect()
    }

    #[test]
    fn kind_priority_beats_name() {
        let doc = doc(
            &[1, 2, 3],
            vec![function(1, "bar"), unit_struct(2, "Foo"), use_item(3, "zzz")],
            vec![],
        );
        let sorted = sort_children(&doc, &[Id(1), Id(2), Id(3)]);
        assert_eq!(names(&sorted.non_module), ["zzz", "Foo", "bar"]);
        assert!(sorted.module.is_empty());
    }

    #[test]
    fn names_compare_case_insensitively_with_exact_tiebreak() {
        let doc = doc(
            &[],
            vec![
                unit_struct(1, "beta"),
                unit_struct(2, "Alpha"),
                unit_struct(3, "alpha"),
                unit_struct(4, "Beta"),
            ],
            vec![],
        );
        let sorted = sort_children(&doc, &[Id(1), Id(2), Id(3), Id(4)]);
        assert_eq!(names(&sorted.non_module), ["Alpha", "alpha", "Beta", "beta"]);
    }

    #[test]
    fn modules_are_split_out_in_order() {
        let doc = doc(
            &[],
            vec![
                module(1, "zeta", &[]),
                unit_struct(2, "Thing"),
                module(3, "alpha", &[]),
            ],
            vec![],
        );
        let sorted = sort_children(&doc, &[Id(1), Id(2), Id(3)]);
        assert_eq!(names(&sorted.module), ["alpha", "zeta"]);
        assert_eq!(names(&sorted.non_module), ["Thing"]);
    }

    #[test]
    fn sorting_is_idempotent() {
        let doc = doc(
            &[],
            vec![
                unit_struct(1, "b"),
                function(2, "a"),
                use_item(3, "x::y"),
                unit_struct(4, "A"),
            ],
            vec![],
        );
        let once = sort_children(&doc, &[Id(4), Id(2), Id(1), Id(3)]);
        let ids: Vec<Id> = once.non_module.iter().map(|i| i.id).collect();
        let twice = sort_children(&doc, &ids);
        assert_eq!(once, twice);
    }

    #[test]
    fn missing_and_duplicate_ids() {
        let doc = doc(&[], vec![unit_struct(1, "Only")], vec![]);
        let sorted = sort_children(&doc, &[Id(1), Id(77), Id(1)]);
        assert_eq!(names(&sorted.non_module), ["Only"]);
    }
}
