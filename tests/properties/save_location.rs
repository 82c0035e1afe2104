//! Property tests for save-location path rules.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use proptest::prelude::*;

use stackwright::domain::services::save_location::{
    default_save_directory, is_nested, normalize, validation_failures, NESTED_MESSAGE,
    NOT_EMPTY_MESSAGE,
};

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9_-]{1,12}").unwrap()
}

fn absolute_dir() -> impl Strategy<Value = PathBuf> {
    proptest::collection::vec(segment(), 1..=4)
        .prop_map(|segments| PathBuf::from(format!("/{}", segments.join("/"))))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: normalization never panics and is idempotent.
    #[test]
    fn property_normalize_is_idempotent(s in "[A-Za-z0-9./_-]{0,64}") {
        let once = normalize(Path::new(&s));
        prop_assert_eq!(normalize(&once), once.clone());
    }

    /// PROPERTY: the default directory is a free sibling of the project
    /// directory and is never nested inside it.
    #[test]
    fn property_default_is_free_sibling(project in absolute_dir(), taken in 0usize..5) {
        let name = project.file_name().unwrap().to_string_lossy().into_owned();
        let parent = project.parent().unwrap().to_path_buf();
        let mut occupied: HashSet<PathBuf> = HashSet::new();
        occupied.insert(parent.join(format!("{name}DeploymentProject")));
        for n in 1..taken {
            occupied.insert(parent.join(format!("{name}DeploymentProject{n}")));
        }

        let dir = default_save_directory(&project, |p| occupied.contains(p));

        prop_assert!(!occupied.contains(&dir));
        prop_assert_eq!(dir.parent(), Some(parent.as_path()));
        prop_assert!(!is_nested(&dir, &project));
        let expected = if taken == 0 {
            format!("{name}DeploymentProject1")
        } else {
            format!("{name}DeploymentProject{taken}")
        };
        prop_assert_eq!(dir.file_name().unwrap().to_string_lossy(), expected);
    }

    /// PROPERTY: anything below the project directory is nested, and both
    /// failures are reported together.
    #[test]
    fn property_children_are_nested(project in absolute_dir(), child in proptest::collection::vec(segment(), 0..3)) {
        let mut dir = project.clone();
        for c in &child {
            dir.push(c);
        }

        prop_assert!(is_nested(&dir, &project));
        prop_assert_eq!(
            validation_failures(&dir, false, &project),
            vec![NOT_EMPTY_MESSAGE, NESTED_MESSAGE]
        );
        prop_assert!(validation_failures(&project.with_extension("out"), true, &project).is_empty());
    }
}
