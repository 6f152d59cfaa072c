use std::cmp::Ordering;

use catalog::Recipe;
use icu_collator::{Collator, CollatorError, CollatorOptions, Strength};
use tracing::warn;

use crate::recipes::Sort;

thread_local! {
    static COLLATOR: Result<Collator, CollatorError> = root_collator();
}

/// Root locale, secondary strength: case is ignored, accents only break ties.
fn root_collator() -> Result<Collator, CollatorError> {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Secondary);

    Collator::try_new(&Default::default(), options).inspect_err(|e| {
        warn!("Root collator unavailable, sorting by lowercase code points: {e}");
    })
}

/// Case-insensitive, locale-aware name ordering.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    COLLATOR.with(|collator| match collator {
        Ok(collator) => collator.compare(a, b),
        Err(_) => a.to_lowercase().cmp(&b.to_lowercase()),
    })
}

pub fn sort_by_name(recipes: &mut [Recipe], sort: Sort) {
    // stable either way, equal names keep upstream order
    match sort {
        Sort::Asc => recipes.sort_by(|a, b| compare_names(&a.name, &b.name)),
        Sort::Desc => recipes.sort_by(|a, b| compare_names(&b.name, &a.name)),
    }
}

pub fn paginate<T>(items: Vec<T>, page: usize, limit: usize) -> Vec<T> {
    let start = page.saturating_sub(1).saturating_mul(limit);

    items.into_iter().skip(start).take(limit).collect()
}

pub fn total_pages(total: usize, limit: usize) -> usize {
    if limit == 0 {
        return 0;
    }

    total.div_ceil(limit)
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use catalog::Recipe;

    use super::{compare_names, paginate, sort_by_name, total_pages};
    use crate::recipes::Sort;

    fn recipe(id: &str, name: &str) -> Recipe {
        Recipe {
            id: id.to_string(),
            name: name.to_string(),
            thumbnail_url: String::new(),
            category: None,
        }
    }

    fn names(recipes: &[Recipe]) -> Vec<&str> {
        recipes.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(compare_names("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_names("APPLE PIE", "apple pie"), Ordering::Equal);
        assert_eq!(compare_names("Zpasta", "apasta"), Ordering::Greater);
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(compare_names("Pie", "Pie Crust"), Ordering::Less);
        assert_eq!(compare_names("", "a"), Ordering::Less);
    }

    #[test]
    fn test_accents_fold_to_base_letter() {
        assert_eq!(compare_names("Éclair", "Fudge"), Ordering::Less);
        assert_eq!(compare_names("Crème Caramel", "Crepes"), Ordering::Less);
        assert_eq!(
            compare_names("Pouding chômeur", "Pouding chorizo"),
            Ordering::Less
        );
        assert_eq!(compare_names("Crêpes", "crepes"), Ordering::Greater);
    }

    #[test]
    fn test_sort_accented_names() {
        let mut recipes = vec![
            recipe("1", "Fudge"),
            recipe("2", "Éclair"),
            recipe("3", "Crepes"),
            recipe("4", "Crème Caramel"),
        ];

        sort_by_name(&mut recipes, Sort::Asc);
        assert_eq!(names(&recipes), ["Crème Caramel", "Crepes", "Éclair", "Fudge"]);

        sort_by_name(&mut recipes, Sort::Desc);
        assert_eq!(names(&recipes), ["Fudge", "Éclair", "Crepes", "Crème Caramel"]);
    }

    #[test]
    fn test_character_classes() {
        assert_eq!(compare_names("Apple Pie", "Apple-Pie"), Ordering::Less);
        assert_eq!(compare_names("Apple_Pie", "Apple1"), Ordering::Less);
        assert_eq!(compare_names("7 Layer Cake", "Apam balik"), Ordering::Less);
        assert_eq!(compare_names("Beef ~ Stew", "Beef Stew"), Ordering::Less);
    }

    #[test]
    fn test_sort_ascending_and_descending() {
        let mut recipes = vec![
            recipe("1", "Zpasta"),
            recipe("2", "Apasta"),
            recipe("3", "mpasta"),
        ];

        sort_by_name(&mut recipes, Sort::Asc);
        assert_eq!(names(&recipes), ["Apasta", "mpasta", "Zpasta"]);

        sort_by_name(&mut recipes, Sort::Desc);
        assert_eq!(names(&recipes), ["Zpasta", "mpasta", "Apasta"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let mut recipes = vec![recipe("1", "Tart"), recipe("2", "tart"), recipe("3", "Cake")];

        sort_by_name(&mut recipes, Sort::Desc);
        let ids: Vec<_> = recipes.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
    }

    #[test]
    fn test_paginate() {
        let items: Vec<u32> = (1..=7).collect();

        assert_eq!(paginate(items.clone(), 1, 3), [1, 2, 3]);
        assert_eq!(paginate(items.clone(), 3, 3), [7]);
        assert!(paginate(items.clone(), 4, 3).is_empty());
        assert_eq!(paginate(items, 1, 20).len(), 7);
    }

    #[test]
    fn test_paginate_huge_page() {
        assert!(paginate(vec![1, 2, 3], usize::MAX, usize::MAX).is_empty());
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(6, 2), 3);
        assert_eq!(total_pages(7, 2), 4);
        assert_eq!(total_pages(20, 20), 1);
    }
}
