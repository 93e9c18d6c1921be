//! # Admin table state — sort, filter, page, edit, delete
//!
//! The admin views fetch a whole collection once and then do everything else
//! in memory. [`TableState`] is the per-view state struct (search text, sort
//! column and direction, current page, row being edited, row pending delete)
//! and [`TableState::view`] turns a collection into the rows to render.
//!
//! ## Pipeline
//!
//! `sort → filter → page`, in that order:
//!
//! 1. **Sort** by the row's [`SortKey`] for the chosen field. The sort is
//!    stable and descending order reverses the comparator, so equal keys keep
//!    the order of the underlying array in both directions.
//! 2. **Filter** with a case-insensitive substring match over the row's
//!    searchable text ([`TableRow::haystack`]). An empty query keeps every row.
//! 3. **Page** with a fixed page size: `total_pages = ceil(count / size)`.
//!    The current page is clamped into `1..=total_pages` when rendering, and a
//!    new query resets it to 1.
//!
//! ## Local patching
//!
//! After a successful add/edit/delete the caller patches its array with
//! [`replace_row`] / [`remove_row`] (or a plain `push`) instead of refetching.

use std::cmp::Ordering;

/// Value a row exposes for one sortable column.
#[derive(Clone, Debug, PartialEq)]
pub enum SortKey {
    Int(i64),
    Float(f64),
    Text(String),
    /// Milliseconds since the epoch.
    Time(i64),
}

impl SortKey {
    fn rank(&self) -> u8 {
        match self {
            SortKey::Int(_) | SortKey::Float(_) => 0,
            SortKey::Time(_) => 1,
            SortKey::Text(_) => 2,
        }
    }

    pub fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Int(a), SortKey::Int(b)) => a.cmp(b),
            (SortKey::Float(a), SortKey::Float(b)) => a.total_cmp(b),
            (SortKey::Int(a), SortKey::Float(b)) => (*a as f64).total_cmp(b),
            (SortKey::Float(a), SortKey::Int(b)) => a.total_cmp(&(*b as f64)),
            (SortKey::Time(a), SortKey::Time(b)) => a.cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        }
    }
}

/// A record that can be shown in an admin table.
pub trait TableRow: Clone {
    type Field: Copy + PartialEq + std::fmt::Debug;

    fn id(&self) -> i64;
    fn sort_key(&self, field: Self::Field) -> SortKey;
    /// Text the search box matches against.
    fn haystack(&self) -> Vec<&str>;
}

/// Stable sort by one field.
pub fn sort_rows<R: TableRow>(rows: &[R], field: R::Field, direction: SortDirection) -> Vec<R> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| {
        let ord = a.sort_key(field).compare(&b.sort_key(field));
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    sorted
}

/// Case-insensitive substring filter over each row's haystack.
pub fn filter_rows<R: TableRow>(rows: Vec<R>, query: &str) -> Vec<R> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return rows;
    }
    rows.into_iter()
        .filter(|row| {
            row.haystack()
                .iter()
                .any(|text| text.to_lowercase().contains(&needle))
        })
        .collect()
}

pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// Rows of 1-based `page`; empty when the page is out of range.
pub fn page_slice<R>(rows: &[R], page: usize, page_size: usize) -> &[R] {
    let start = page.saturating_sub(1).saturating_mul(page_size);
    if page == 0 || start >= rows.len() {
        return &[];
    }
    let end = (start + page_size).min(rows.len());
    &rows[start..end]
}

/// Replace the row with the same id. Returns whether one was found.
pub fn replace_row<R: TableRow>(rows: &mut [R], updated: R) -> bool {
    match rows.iter_mut().find(|row| row.id() == updated.id()) {
        Some(row) => {
            *row = updated;
            true
        }
        None => false,
    }
}

/// Remove the row with `id`, returning it.
pub fn remove_row<R: TableRow>(rows: &mut Vec<R>, id: i64) -> Option<R> {
    let index = rows.iter().position(|row| row.id() == id)?;
    Some(rows.remove(index))
}

/// Everything the table renders for the current state.
#[derive(Clone, Debug, PartialEq)]
pub struct TablePage<R> {
    pub rows: Vec<R>,
    /// The page actually shown, after clamping.
    pub page: usize,
    pub total_pages: usize,
    pub filtered_count: usize,
}

impl<R> TablePage<R> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Ephemeral UI state of one admin table.
#[derive(Clone, Debug, PartialEq)]
pub struct TableState<F> {
    pub query: String,
    pub sort_field: F,
    pub direction: SortDirection,
    /// 1-based.
    pub page: usize,
    pub page_size: usize,
    pub editing: Option<i64>,
    pub pending_delete: Option<i64>,
}

impl<F: Copy + PartialEq> TableState<F> {
    pub fn new(sort_field: F, page_size: usize) -> Self {
        Self {
            query: String::new(),
            sort_field,
            direction: SortDirection::Asc,
            page: 1,
            page_size: page_size.max(1),
            editing: None,
            pending_delete: None,
        }
    }

    /// Clicking the current column flips direction; a new column sorts ascending.
    pub fn toggle_sort(&mut self, field: F) {
        if field == self.sort_field {
            self.direction = self.direction.flip();
        } else {
            self.sort_field = field;
            self.direction = SortDirection::Asc;
        }
    }

    /// Direction arrow for a column header, if it is the sorted one.
    pub fn arrow_for(&self, field: F) -> Option<&'static str> {
        (field == self.sort_field).then(|| self.direction.arrow())
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page = 1;
    }

    pub fn go_to(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn begin_edit(&mut self, id: i64) {
        self.editing = Some(id);
    }

    pub fn end_edit(&mut self) {
        self.editing = None;
    }

    pub fn request_delete(&mut self, id: i64) {
        self.pending_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Take the confirmed delete target, clearing the dialog.
    pub fn confirm_delete(&mut self) -> Option<i64> {
        self.pending_delete.take()
    }

    pub fn view<R: TableRow<Field = F>>(&self, rows: &[R]) -> TablePage<R> {
        let sorted = sort_rows(rows, self.sort_field, self.direction);
        let filtered = filter_rows(sorted, &self.query);
        let total_pages = total_pages(filtered.len(), self.page_size);
        let page = self.page.clamp(1, total_pages.max(1));
        TablePage {
            rows: page_slice(&filtered, page, self.page_size).to_vec(),
            page,
            total_pages,
            filtered_count: filtered.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        id: i64,
        name: String,
        score: i64,
    }

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum Field {
        Id,
        Name,
        Score,
    }

    impl TableRow for Row {
        type Field = Field;

        fn id(&self) -> i64 {
            self.id
        }

        fn sort_key(&self, field: Field) -> SortKey {
            match field {
                Field::Id => SortKey::Int(self.id),
                Field::Name => SortKey::Text(self.name.clone()),
                Field::Score => SortKey::Int(self.score),
            }
        }

        fn haystack(&self) -> Vec<&str> {
            vec![&self.name]
        }
    }

    fn row(id: i64, name: &str, score: i64) -> Row {
        Row {
            id,
            name: name.to_string(),
            score,
        }
    }

    fn rows(n: i64) -> Vec<Row> {
        (1..=n).map(|i| row(i, &format!("row {i}"), i % 3)).collect()
    }

    #[test]
    fn test_toggle_sort() {
        let mut state = TableState::new(Field::Id, 10);
        state.toggle_sort(Field::Id);
        assert_eq!(state.direction, SortDirection::Desc);
        state.toggle_sort(Field::Name);
        assert_eq!(state.sort_field, Field::Name);
        assert_eq!(state.direction, SortDirection::Asc);
        assert_eq!(state.arrow_for(Field::Name), Some("↑"));
        assert_eq!(state.arrow_for(Field::Id), None);
    }

    #[test]
    fn test_ties_keep_insertion_order_both_ways() {
        let data = vec![row(1, "a", 1), row(2, "b", 0), row(3, "c", 1), row(4, "d", 0)];
        let asc = sort_rows(&data, Field::Score, SortDirection::Asc);
        assert_eq!(asc.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2, 4, 1, 3]);
        let desc = sort_rows(&data, Field::Score, SortDirection::Desc);
        assert_eq!(desc.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 3, 2, 4]);
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let data = vec![row(1, "The Matrix", 0), row(2, "Alien", 0)];
        let found = filter_rows(data.clone(), "  matRIX ");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 1);
        assert_eq!(filter_rows(data, "").len(), 2);
    }

    #[test]
    fn test_no_match_shows_zero_rows_for_any_sort() {
        let data = rows(25);
        for field in [Field::Id, Field::Name, Field::Score] {
            let mut state = TableState::new(field, 10);
            state.set_query("zzz-not-there");
            let page = state.view(&data);
            assert!(page.is_empty());
            assert_eq!(page.filtered_count, 0);
            assert_eq!(page.total_pages, 0);
            assert_eq!(page.page, 1);
        }
    }

    #[test]
    fn test_query_change_resets_page() {
        let data = rows(25);
        let mut state = TableState::new(Field::Id, 10);
        state.go_to(3);
        assert_eq!(state.view(&data).rows.len(), 5);

        state.set_query("row 1");
        assert_eq!(state.page, 1);
        let page = state.view(&data);
        // "row 1", "row 10".."row 19"
        assert_eq!(page.filtered_count, 11);
        assert_eq!(page.rows.len(), 10);
        assert!(page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn test_out_of_range_page_is_clamped() {
        let mut data = rows(11);
        let mut state = TableState::new(Field::Id, 10);
        state.go_to(2);
        assert_eq!(state.view(&data).rows, vec![row(11, "row 11", 2)]);

        remove_row(&mut data, 11);
        let page = state.view(&data);
        assert_eq!(page.page, 1);
        assert_eq!(page.rows.len(), 10);
    }

    #[test]
    fn test_delete_cancel_and_confirm() {
        let mut data = rows(5);
        let before = data.clone();
        let mut state = TableState::new(Field::Id, 10);

        state.request_delete(3);
        state.cancel_delete();
        assert_eq!(state.confirm_delete(), None);
        assert_eq!(data, before);

        state.request_delete(3);
        let target = state.confirm_delete().unwrap();
        let removed = remove_row(&mut data, target).unwrap();
        assert_eq!(removed.id, 3);
        assert_eq!(data.len(), 4);
        assert!(data.iter().all(|r| r.id != 3));
        assert!(state.pending_delete.is_none());
    }

    #[test]
    fn test_replace_row_patches_in_place() {
        let mut data = rows(3);
        assert!(replace_row(&mut data, row(2, "edited", 9)));
        assert_eq!(data[1].name, "edited");
        assert!(!replace_row(&mut data, row(99, "ghost", 0)));
        assert_eq!(data.len(), 3);
    }

    #[test]
    fn test_page_slice_bounds() {
        let data: Vec<i32> = (0..5).collect();
        assert_eq!(page_slice(&data, 1, 2), &[0, 1]);
        assert_eq!(page_slice(&data, 3, 2), &[4]);
        assert!(page_slice(&data, 4, 2).is_empty());
        assert!(page_slice(&data, 0, 2).is_empty());
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
    }

    fn arb_rows() -> impl Strategy<Value = Vec<Row>> {
        prop::collection::vec(("[a-zA-Z ]{0,8}", -50i64..50), 0..40).prop_map(|items| {
            items
                .into_iter()
                .enumerate()
                .map(|(i, (name, score))| row(i as i64, &name, score))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_desc_reverses_asc_without_ties(ids in prop::collection::hash_set(-1000i64..1000, 0..40)) {
            let data: Vec<Row> = ids.into_iter().map(|id| row(id, "x", 0)).collect();
            let asc = sort_rows(&data, Field::Id, SortDirection::Asc);
            let mut desc = sort_rows(&asc, Field::Id, SortDirection::Desc);
            desc.reverse();
            prop_assert_eq!(asc, desc);
        }

        #[test]
        fn prop_filter_is_idempotent(data in arb_rows(), query in "[a-z ]{0,3}") {
            let once = filter_rows(data, &query);
            let twice = filter_rows(once.clone(), &query);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_pages_partition_filtered(data in arb_rows(), query in "[a-z]{0,2}", size in 1usize..12) {
            let mut state = TableState::new(Field::Name, size);
            state.set_query(query);
            let first = state.view(&data);
            let expected = filter_rows(sort_rows(&data, Field::Name, SortDirection::Asc), &state.query);

            let mut union = Vec::new();
            for page in 1..=first.total_pages {
                state.go_to(page);
                let view = state.view(&data);
                prop_assert!(view.rows.len() <= size);
                prop_assert_eq!(view.page, page);
                union.extend(view.rows);
            }
            prop_assert_eq!(union, expected);
        }
    }
}
