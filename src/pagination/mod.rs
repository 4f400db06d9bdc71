//! Page-number pagination with a client-selectable page size.
//!
//! Clients pick a page with `?page=N` (or `?page=last`) and a page size with
//! `?limit=N`. The page size is capped at [`MAX_PAGE_SIZE`]; anything that is
//! not a positive integer falls back to the configured default.
//!
//! Example URLs:
//! - `http://api.example.org/api/users/?page=4`
//! - `http://api.example.org/api/users/?page=4&limit=100`

use std::collections::BTreeMap;
use std::num::IntErrorKind;

use log::debug;
use serde::Serialize;
use url::{form_urlencoded, Url};

use crate::constants::{
    CODE_INVALID_PAGE, DEFAULT_PAGE_SIZE, ERR_INVALID_PAGE, LAST_PAGE_STRINGS, MAX_PAGE_SIZE,
    PAGE_QUERY_PARAM, PAGE_SIZE_QUERY_PARAM,
};
use crate::errors::ApiError;
use crate::models::PaginatedResponse;

/// Raw pagination parameters taken from a query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageParams {
    pub page: Option<String>,
    pub page_size: Option<String>,
}

/// The resolved page for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// 1-based page number
    pub number: u64,
    pub page_size: u64,
    pub num_pages: u64,
    /// Total number of items across all pages
    pub count: u64,
}

impl PageWindow {
    /// Number of items to skip before this page.
    pub fn offset(&self) -> u64 {
        (self.number - 1) * self.page_size
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }
}

/// Page number pagination policy.
#[derive(Debug, Clone)]
pub struct PageNumberPagination {
    /// Page size used when the client does not pick one
    pub page_size: u64,
    pub page_query_param: &'static str,
    pub page_size_query_param: &'static str,
    pub max_page_size: u64,
    pub last_page_strings: &'static [&'static str],
}

impl Default for PageNumberPagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PageNumberPagination {
    /// Policy with the given default page size, `page`/`limit` parameters
    /// and the global page size ceiling.
    pub fn new(page_size: u64) -> Self {
        Self {
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
            page_query_param: PAGE_QUERY_PARAM,
            page_size_query_param: PAGE_SIZE_QUERY_PARAM,
            max_page_size: MAX_PAGE_SIZE,
            last_page_strings: &LAST_PAGE_STRINGS,
        }
    }

    /// Pick the pagination parameters out of a raw query string.
    ///
    /// When a parameter is repeated the last value wins.
    pub fn params(&self, query: &str) -> PageParams {
        let mut params = PageParams::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if key == self.page_query_param {
                params.page = Some(value.into_owned());
            } else if key == self.page_size_query_param {
                params.page_size = Some(value.into_owned());
            }
        }
        params
    }

    /// Effective page size for a raw `limit` value.
    pub fn page_size_for(&self, raw: Option<&str>) -> u64 {
        let Some(raw) = raw else {
            return self.page_size;
        };
        match raw.trim().parse::<u64>() {
            Ok(0) => self.page_size,
            Ok(size) => size.min(self.max_page_size),
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => self.max_page_size,
            Err(_) => {
                debug!("Ignoring invalid page size {:?}", raw);
                self.page_size
            }
        }
    }

    /// Resolve the requested page against the total item count.
    pub fn window(&self, params: &PageParams, count: u64) -> Result<PageWindow, ApiError> {
        let page_size = self.page_size_for(params.page_size.as_deref());
        // An empty result set still has one (empty) page.
        let num_pages = count.div_ceil(page_size).max(1);
        let number = self.page_number(params.page.as_deref(), num_pages)?;

        Ok(PageWindow {
            number,
            page_size,
            num_pages,
            count,
        })
    }

    fn page_number(&self, raw: Option<&str>, num_pages: u64) -> Result<u64, ApiError> {
        let raw = match raw.map(str::trim) {
            None | Some("") => return Ok(1),
            Some(raw) => raw,
        };
        if self.last_page_strings.contains(&raw) {
            return Ok(num_pages);
        }
        match raw.parse::<u64>() {
            Ok(number) if (1..=num_pages).contains(&number) => Ok(number),
            _ => {
                debug!("Rejecting page {:?} of {}", raw, num_pages);
                Err(ApiError::not_found(CODE_INVALID_PAGE, ERR_INVALID_PAGE))
            }
        }
    }

    /// Wrap one page of results with the total count and neighbour links.
    pub fn response<T: Serialize>(
        &self,
        window: &PageWindow,
        results: Vec<T>,
        request_url: &Url,
    ) -> PaginatedResponse<T> {
        let next = window.has_next().then(|| {
            replace_query_param(
                request_url,
                self.page_query_param,
                &(window.number + 1).to_string(),
            )
        });
        let previous = window.has_previous().then(|| {
            if window.number == 2 {
                remove_query_param(request_url, self.page_query_param)
            } else {
                replace_query_param(
                    request_url,
                    self.page_query_param,
                    &(window.number - 1).to_string(),
                )
            }
        });

        PaginatedResponse {
            count: window.count,
            next,
            previous,
            results,
        }
    }
}

fn query_map(url: &Url) -> BTreeMap<String, Vec<String>> {
    let mut pairs: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (key, value) in url.query_pairs() {
        pairs
            .entry(key.into_owned())
            .or_default()
            .push(value.into_owned());
    }
    pairs
}

fn with_query(url: &Url, pairs: BTreeMap<String, Vec<String>>) -> String {
    let mut url = url.clone();
    url.set_fragment(None);
    if pairs.is_empty() {
        url.set_query(None);
    } else {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, values) in &pairs {
            for value in values {
                serializer.append_pair(key, value);
            }
        }
        url.set_query(Some(&serializer.finish()));
    }
    url.to_string()
}

/// `url` with `key` set to the single value `value`; keys come out sorted.
fn replace_query_param(url: &Url, key: &str, value: &str) -> String {
    let mut pairs = query_map(url);
    pairs.insert(key.to_string(), vec![value.to_string()]);
    with_query(url, pairs)
}

/// `url` without `key`; keys come out sorted.
fn remove_query_param(url: &Url, key: &str) -> String {
    let mut pairs = query_map(url);
    pairs.remove(key);
    with_query(url, pairs)
}
