//! Query construction for list endpoints
//!
//! Every list endpoint accepts the same `page`, `pageSize`, `filter`, `sort`
//! and `order` parameters. `QuerySpec` holds them and owns the single
//! serialization routine, so key order and escaping are defined once.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Largest page the API will return.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Page size used by the custom query commands when none is given.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Characters escaped inside a query value.
///
/// `=`, `,` and `.` stay verbatim because filter expressions are built from
/// them, and `%` stays verbatim so already-escaped input is not escaped twice.
const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'>')
    .add(b'`');

/// Sort order for list requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending order (A-Z, 0-9, oldest first)
    Asc,
    /// Descending order (Z-A, 9-0, newest first)
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Filter, sort and pagination parameters for one list request.
///
/// ```ignore
/// let query = QuerySpec::new()
///     .page_size(1000)
///     .filter("driverId=1")
///     .scoped_filter("race.year=2023");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    pub page: u32,
    pub page_size: Option<u32>,
    pub filter: Option<String>,
    pub sort: Option<String>,
    pub order: Option<SortOrder>,
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: None,
            filter: None,
            sort: None,
            order: None,
        }
    }
}

impl QuerySpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a query from form-style inputs.
    ///
    /// `filter_expr` is passed through untouched; `extra_scoped_filters` are
    /// appended to it with commas in the order given. Range checks on `page`
    /// and `page_size` are the caller's job.
    pub fn build(
        page: u32,
        page_size: u32,
        sort_column: Option<&str>,
        order: Option<SortOrder>,
        filter_expr: Option<&str>,
        extra_scoped_filters: &[String],
    ) -> Self {
        let mut query = Self::new().page(page).page_size(page_size);

        if let Some(expr) = filter_expr {
            query = query.filter(expr);
        }
        for clause in extra_scoped_filters {
            query = query.scoped_filter(clause);
        }
        if let Some(column) = sort_column {
            query = query.sort_by(column);
        }
        if let Some(order) = order {
            query = query.order(order);
        }

        query
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Replace the filter expression. Blank input clears it.
    pub fn filter(mut self, expr: impl Into<String>) -> Self {
        let expr = expr.into();
        self.filter = if expr.trim().is_empty() {
            None
        } else {
            Some(expr)
        };
        self
    }

    /// Append one clause to the filter expression, comma separated.
    pub fn scoped_filter(mut self, clause: impl AsRef<str>) -> Self {
        let clause = clause.as_ref();
        if clause.trim().is_empty() {
            return self;
        }
        self.filter = Some(match self.filter.take() {
            Some(existing) => format!("{},{}", existing, clause),
            None => clause.to_string(),
        });
        self
    }

    /// Set the sort column. Blank input clears it.
    pub fn sort_by(mut self, column: impl Into<String>) -> Self {
        let column = column.into();
        self.sort = if column.trim().is_empty() {
            None
        } else {
            Some(column)
        };
        self
    }

    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Query parameters in wire order: page, pageSize, filter, sort, order.
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("page", self.page.to_string())];

        if let Some(size) = self.page_size {
            params.push(("pageSize", size.to_string()));
        }
        if let Some(ref filter) = self.filter {
            params.push(("filter", filter.clone()));
        }
        if let Some(ref sort) = self.sort {
            params.push(("sort", sort.clone()));
        }
        if let Some(order) = self.order {
            params.push(("order", order.as_str().to_string()));
        }

        params
    }

    /// Serialize to a `key=value&...` string with escaped values.
    pub fn to_query_string(&self) -> String {
        encode_params(&self.to_query_params())
    }
}

/// Join `(key, value)` pairs into a query string, escaping each value.
pub fn encode_params(params: &[(&str, String)]) -> String {
    params
        .iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(k, v)| format!("{}={}", k, utf8_percent_encode(v, QUERY_VALUE)))
        .collect::<Vec<_>>()
        .join("&")
}
