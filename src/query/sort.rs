//! Typed comparator table for project sorting.

use std::cmp::Ordering;

use crate::models::{Project, SortBy, SortField, SortOrder};

type Comparator = fn(&Project, &Project) -> Ordering;

/// The comparator for `field`, in ascending order.
///
/// Text compares with [`locale_cmp`], dates chronologically, numbers
/// arithmetically. `tasks` has no natural order and compares equal.
pub fn comparator(field: SortField) -> Comparator {
    match field {
        SortField::Id => by_id,
        SortField::Name => by_name,
        SortField::Description => by_description,
        SortField::Status => by_status,
        SortField::StartDate => by_start_date,
        SortField::EndDate => by_end_date,
        SortField::Progress => by_progress,
        SortField::Budget => by_budget,
        SortField::Tasks => unordered,
        SortField::CreatedAt => by_created_at,
        SortField::UpdatedAt => by_updated_at,
    }
}

fn by_id(a: &Project, b: &Project) -> Ordering {
    locale_cmp(&a.id.to_string(), &b.id.to_string())
}

fn by_name(a: &Project, b: &Project) -> Ordering {
    locale_cmp(&a.name, &b.name)
}

fn by_description(a: &Project, b: &Project) -> Ordering {
    locale_cmp(&a.description, &b.description)
}

fn by_status(a: &Project, b: &Project) -> Ordering {
    locale_cmp(a.status.as_str(), b.status.as_str())
}

fn by_start_date(a: &Project, b: &Project) -> Ordering {
    a.start_date.cmp(&b.start_date)
}

fn by_end_date(a: &Project, b: &Project) -> Ordering {
    a.end_date.cmp(&b.end_date)
}

fn by_progress(a: &Project, b: &Project) -> Ordering {
    a.progress.cmp(&b.progress)
}

fn by_budget(a: &Project, b: &Project) -> Ordering {
    a.budget.total_cmp(&b.budget)
}

fn by_created_at(a: &Project, b: &Project) -> Ordering {
    a.created_at.cmp(&b.created_at)
}

fn by_updated_at(a: &Project, b: &Project) -> Ordering {
    a.updated_at.cmp(&b.updated_at)
}

fn unordered(_: &Project, _: &Project) -> Ordering {
    Ordering::Equal
}

/// Stable in-place sort. Equal keys keep their relative order in both directions.
pub fn sort_projects(projects: &mut [Project], sort_by: SortBy) {
    let cmp = comparator(sort_by.field);
    match sort_by.order {
        SortOrder::Asc => projects.sort_by(cmp),
        SortOrder::Desc => projects.sort_by(|a, b| cmp(a, b).reverse()),
    }
}

/// Dictionary-style string ordering.
///
/// Case is ignored first; on a case-insensitive tie lowercase sorts before
/// uppercase, so `"apple" < "Apple" < "banana"`.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    folded.then_with(|| {
        a.chars()
            .zip(b.chars())
            .find(|(x, y)| x != y)
            .map(|(x, y)| match (x.is_lowercase(), y.is_lowercase()) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => x.cmp(&y),
            })
            .unwrap_or_else(|| a.len().cmp(&b.len()))
    })
}
