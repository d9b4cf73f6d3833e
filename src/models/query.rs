use super::project::ProjectStatus;
use super::task::TaskPriority;

/// Default number of rows per dashboard page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// A filter that either constrains a value or lets everything through.
///
/// `All` is the sentinel meaning "no constraint applied".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterValue<T> {
    All,
    Only(T),
}

impl<T> Default for FilterValue<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: PartialEq> FilterValue<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl<T> From<Option<T>> for FilterValue<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::All, Self::Only)
    }
}

/// The filter half of the query state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
    pub status: FilterValue<ProjectStatus>,
    /// Case-insensitive substring matched against name and description.
    pub search: String,
    pub priority: FilterValue<TaskPriority>,
    /// Assignee email. Empty means no constraint.
    pub assigned_user: String,
}

/// A partial update to [`Filters`]. `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterPatch {
    pub status: Option<FilterValue<ProjectStatus>>,
    pub search: Option<String>,
    pub priority: Option<FilterValue<TaskPriority>>,
    pub assigned_user: Option<String>,
}

impl Filters {
    pub fn apply(&mut self, patch: FilterPatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(search) = patch.search {
            self.search = search;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(assigned_user) = patch.assigned_user {
            self.assigned_user = assigned_user;
        }
    }
}

/// Page position and the totals derived from the filtered collection.
///
/// `current_page` is 1-based. `page_size` is never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
            total_pages: 0,
            total_items: 0,
        }
    }

    /// Record a new item count and recompute `total_pages`.
    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.total_pages = total_pages(total_items, self.page_size);
    }

    /// Offset of the first row on the current page, or `None` for page 0.
    pub fn offset(&self) -> Option<usize> {
        self.current_page
            .checked_sub(1)
            .and_then(|page| page.checked_mul(self.page_size))
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// `ceil(total_items / page_size)`, with a page size of zero treated as one.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1))
}

/// Project attributes the dashboard can sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Id,
    Name,
    Description,
    Status,
    StartDate,
    EndDate,
    Progress,
    Budget,
    Tasks,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    pub const ALL: [SortField; 11] = [
        Self::Id,
        Self::Name,
        Self::Description,
        Self::Status,
        Self::StartDate,
        Self::EndDate,
        Self::Progress,
        Self::Budget,
        Self::Tasks,
        Self::CreatedAt,
        Self::UpdatedAt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Description => "description",
            Self::Status => "status",
            Self::StartDate => "startDate",
            Self::EndDate => "endDate",
            Self::Progress => "progress",
            Self::Budget => "budget",
            Self::Tasks => "tasks",
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortBy {
    pub field: SortField,
    pub order: SortOrder,
}

impl SortBy {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }
}

impl Default for SortBy {
    fn default() -> Self {
        Self::new(SortField::Name, SortOrder::Asc)
    }
}

/// Everything that shapes the visible dashboard page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryState {
    pub filters: Filters,
    pub pagination: Pagination,
    pub sort_by: SortBy,
}

impl QueryState {
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            pagination: Pagination::new(page_size),
            ..Self::default()
        }
    }
}
