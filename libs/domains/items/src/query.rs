//! Search, filter, sort and pagination over one visibility partition.
//!
//! Raw request parameters are validated once when they are turned into an
//! [`ItemQuery`]; evaluating the query never fails.

use std::cmp::Ordering;

use strum::{Display, EnumString};
use validator::Validate;

use crate::error::{ItemError, ItemResult};
use crate::models::{DeletedItemsParams, Item, ItemPage, ListItemsParams};

pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;

/// Fields a listing can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
pub enum SortField {
    Id,
    Name,
    Description,
    Price,
    InStock,
    IsDeleted,
}

impl SortField {
    /// Ascending comparison of two items on this field.
    ///
    /// Absent descriptions order after present ones, the way PostgreSQL
    /// places NULLs last in an ascending sort.
    pub fn compare(self, a: &Item, b: &Item) -> Ordering {
        match self {
            SortField::Id => a.id.cmp(&b.id),
            SortField::Name => a.name.cmp(&b.name),
            SortField::Description => match (&a.description, &b.description) {
                (Some(x), Some(y)) => x.cmp(y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            SortField::Price => a.price.total_cmp(&b.price),
            SortField::InStock => a.in_stock.cmp(&b.in_stock),
            SortField::IsDeleted => a.is_deleted.cmp(&b.is_deleted),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn compare(&self, a: &Item, b: &Item) -> Ordering {
        let ordering = self.field.compare(a, b);
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Pair up comma-separated `sort_by` and `sort_order` lists.
///
/// Entries are trimmed. A missing or empty direction means ascending. A pair
/// whose field or direction does not parse is dropped without error.
pub fn parse_sort(sort_by: Option<&str>, sort_order: Option<&str>) -> Vec<SortKey> {
    let Some(sort_by) = sort_by else {
        return Vec::new();
    };

    let orders: Vec<&str> = sort_order
        .map(|raw| raw.split(',').map(str::trim).collect())
        .unwrap_or_default();

    sort_by
        .split(',')
        .map(str::trim)
        .enumerate()
        .filter_map(|(index, raw_field)| {
            let field = raw_field.parse::<SortField>().ok()?;
            let direction = match orders.get(index).copied() {
                None | Some("") => SortDirection::Asc,
                Some(raw_direction) => raw_direction.parse::<SortDirection>().ok()?,
            };
            Some(SortKey::new(field, direction))
        })
        .collect()
}

/// Escape LIKE metacharacters so the term matches literally
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// A validated listing request
#[derive(Debug, Clone, PartialEq)]
pub struct ItemQuery {
    pub search: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub in_stock: Option<bool>,
    /// Keys in the order the client listed them; the last one is primary
    pub sort: Vec<SortKey>,
    pub skip: u64,
    pub limit: u64,
}

impl Default for ItemQuery {
    fn default() -> Self {
        Self {
            search: None,
            min_price: None,
            max_price: None,
            in_stock: None,
            sort: Vec::new(),
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl ItemQuery {
    /// Search term plus numeric and boolean filters
    pub fn matches(&self, item: &Item) -> bool {
        if let Some(term) = &self.search {
            let needle = term.to_lowercase();
            let in_name = item.name.to_lowercase().contains(&needle);
            let in_description = item
                .description
                .as_ref()
                .is_some_and(|d| d.to_lowercase().contains(&needle));
            if !in_name && !in_description {
                return false;
            }
        }

        if self.min_price.is_some_and(|min| item.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| item.price > max) {
            return false;
        }
        if self.in_stock.is_some_and(|flag| item.in_stock != flag) {
            return false;
        }
        true
    }

    /// Composite ordering equivalent to one stable pass per key, applied
    /// from the first listed key to the last, with ascending id breaking ties.
    pub fn compare(&self, a: &Item, b: &Item) -> Ordering {
        self.sort
            .iter()
            .rev()
            .fold(Ordering::Equal, |acc, key| {
                acc.then_with(|| key.compare(a, b))
            })
            .then_with(|| a.id.cmp(&b.id))
    }

    /// `%term%` pattern for ILIKE, or None when no search applies
    pub fn search_pattern(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(|term| format!("%{}%", escape_like(term)))
    }

    /// Run the query over an already partitioned collection
    pub fn apply<'a, I>(&self, items: I) -> ItemPage
    where
        I: IntoIterator<Item = &'a Item>,
    {
        let mut matched: Vec<&Item> = items.into_iter().filter(|i| self.matches(i)).collect();
        matched.sort_by(|a, b| self.compare(a, b));

        let total = matched.len() as u64;
        let skip = usize::try_from(self.skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(self.limit).unwrap_or(usize::MAX);

        ItemPage {
            items: matched.into_iter().skip(skip).take(limit).cloned().collect(),
            total,
            skip: self.skip,
            limit: self.limit,
        }
    }
}

impl TryFrom<ListItemsParams> for ItemQuery {
    type Error = ItemError;

    fn try_from(params: ListItemsParams) -> ItemResult<Self> {
        params.validate()?;

        let sort = parse_sort(params.sort_by.as_deref(), params.sort_order.as_deref());

        Ok(Self {
            search: params.search.filter(|s| !s.is_empty()),
            min_price: params.min_price,
            max_price: params.max_price,
            in_stock: params.in_stock,
            sort,
            skip: params.skip,
            limit: params.limit.min(MAX_LIMIT),
        })
    }
}

impl TryFrom<DeletedItemsParams> for ItemQuery {
    type Error = ItemError;

    fn try_from(params: DeletedItemsParams) -> ItemResult<Self> {
        params.validate()?;

        Ok(Self {
            skip: params.skip,
            limit: params.limit.min(MAX_LIMIT),
            ..Default::default()
        })
    }
}
