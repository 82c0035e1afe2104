//! Property tests for recommendation ranking.

use proptest::prelude::*;
use serde_json::json;

use stackwright::domain::entities::{ProjectDefinition, Recipe, RecipeCatalog};
use stackwright::domain::services::generate_recommendations;
use stackwright::domain::value_objects::HostCapabilities;

fn recipe(index: usize, name: &str, priority: i32) -> Recipe {
    serde_json::from_value(json!({
        "Id": format!("R{index}"),
        "Version": "1.0.0",
        "Name": name,
        "Priority": priority,
        "Rules": []
    }))
    .unwrap()
}

fn entries() -> impl Strategy<Value = Vec<(String, i32)>> {
    let name = proptest::string::string_regex("[A-Za-z]{1,6}").unwrap();
    proptest::collection::vec((name, -5i32..5), 1..12)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: every applicable recipe appears once, priority descending,
    /// names ascending within a priority.
    #[test]
    fn property_ranking_is_total_and_ordered(entries in entries()) {
        let recipes: Vec<Recipe> = entries
            .iter()
            .enumerate()
            .map(|(i, (name, priority))| recipe(i, name, *priority))
            .collect();
        let catalog = RecipeCatalog::new(recipes);
        let project = ProjectDefinition::for_file("/code/App/App.csproj");

        let recs = generate_recommendations(&project, &HostCapabilities::new(), &catalog).unwrap();

        prop_assert_eq!(recs.len(), entries.len());
        for pair in recs.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a.priority >= b.priority);
            if a.priority == b.priority {
                prop_assert!(a.recipe.name <= b.recipe.name);
            }
        }
    }

    /// PROPERTY: catalog order does not influence the ranking.
    #[test]
    fn property_ranking_ignores_catalog_order(entries in entries()) {
        let build = |order: Vec<usize>| {
            let recipes = order
                .into_iter()
                .map(|i| recipe(i, &entries[i].0, entries[i].1))
                .collect();
            let catalog = RecipeCatalog::new(recipes);
            let project = ProjectDefinition::for_file("/code/App/App.csproj");
            generate_recommendations(&project, &HostCapabilities::new(), &catalog)
                .unwrap()
                .into_iter()
                .map(|r| r.recipe.id.clone())
                .collect::<Vec<_>>()
        };

        let forward = build((0..entries.len()).collect());
        let reversed = build((0..entries.len()).rev().collect());
        prop_assert_eq!(forward, reversed);
    }
}
