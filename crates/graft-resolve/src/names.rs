use graft_syntax::SyntaxNode;
use heck::ToLowerCamelCase as _;
use rustc_hash::FxHashSet;

use crate::SemanticResolver;

/// `proposed` if no name visible at `position` equals it, otherwise
/// `proposed` followed by the first free number counting from `suffix_start`.
pub fn unique_name(
    proposed: &str,
    position: &SyntaxNode,
    resolver: &dyn SemanticResolver,
    suffix_start: u32,
) -> String {
    unique_name_in(proposed, &resolver.visible_names(position), suffix_start)
}

pub fn unique_name_in(proposed: &str, taken: &FxHashSet<String>, suffix_start: u32) -> String {
    if !taken.contains(proposed) {
        return proposed.to_owned();
    }

    let mut suffix = u64::from(suffix_start);
    loop {
        let candidate = format!("{proposed}{suffix}");
        if !taken.contains(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

/// Lower camel case of `name` behind `prefix`, ignoring leading underscores.
///
/// A name with no word characters is returned unchanged.
pub fn to_camel_case(name: &str, prefix: &str) -> String {
    let camel = name.trim_start_matches('_').to_lower_camel_case();
    if camel.is_empty() { name.to_owned() } else { format!("{prefix}{camel}") }
}

pub fn has_camel_case_form(name: &str, prefix: &str) -> bool {
    to_camel_case(name, prefix) == name
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn taken(names: &[&str]) -> FxHashSet<String> {
        names.iter().map(|&name| name.to_owned()).collect()
    }

    #[test]
    fn free_name_is_kept() {
        assert_eq!(unique_name_in("_lockObject", &taken(&["_other"]), 2), "_lockObject");
    }

    #[test]
    fn numeric_suffix() {
        let names = taken(&["_lockObject", "_lockObject2", "_lockObject3"]);
        assert_eq!(unique_name_in("_lockObject", &names, 2), "_lockObject4");
        assert_eq!(unique_name_in("_lockObject", &taken(&["_lockObject"]), 1), "_lockObject1");
    }

    #[test]
    fn camel_case() {
        let cases = [
            ("MyField", "_myField"),
            ("_myField", "_myField"),
            ("__count", "_count"),
            ("my_field", "_myField"),
            ("URL", "_url"),
            ("x", "_x"),
            ("_", "_"),
        ];
        for (input, expected) in cases {
            assert_eq!(to_camel_case(input, "_"), expected, "input: {input}");
        }
        assert!(has_camel_case_form("_myField", "_"));
        assert!(!has_camel_case_form("myField", "_"));
    }

    proptest! {
        #[test]
        fn suffixed_name_is_free(
            proposed in "[a-z_][a-zA-Z0-9]{0,6}",
            others in proptest::collection::vec(0u32..8, 0..8),
        ) {
            let mut names: FxHashSet<String> =
                others.iter().map(|n| format!("{proposed}{n}")).collect();
            names.insert(proposed.clone());

            let first = unique_name_in(&proposed, &names, 2);
            prop_assert!(!names.contains(&first));
            prop_assert!(first.starts_with(&proposed));
            prop_assert_eq!(first, unique_name_in(&proposed, &names, 2));
        }

        #[test]
        fn camel_case_is_total(name in "\\PC{1,12}") {
            let converted = to_camel_case(&name, "_");
            prop_assert!(!converted.is_empty());
            prop_assert_eq!(&converted, &to_camel_case(&name, "_"));
        }
    }
}
