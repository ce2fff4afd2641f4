//! Fixed-size paging over an already filtered, already ordered collection.
//!
//! The page token comes straight from the query string, so anything goes:
//! garbage resolves to the first page, out-of-range numbers clamp to the
//! last page, and an empty collection still yields one (empty) page.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PER_PAGE: usize = 3;

#[derive(Serialize, Deserialize, Debug)]
pub struct Page<T> {
    pub number: usize,
    pub num_pages: usize,
    pub count: usize,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }
}

pub fn paginate<T>(items: Vec<T>, per_page: usize, token: Option<&str>) -> Page<T> {
    let per_page = per_page.max(1);
    let count = items.len();
    let num_pages = std::cmp::max(1, (count + per_page - 1) / per_page);

    let requested = token.map(str::trim).and_then(|t| t.parse::<i64>().ok());
    let number = match requested {
        // Missing or non-numeric tokens mean the first page.
        None => 1,
        // Out-of-range numbers, below as well as above, clamp to the last
        // page.
        Some(n) if n < 1 => num_pages,
        Some(n) if n as usize > num_pages => num_pages,
        Some(n) => n as usize,
    };

    let items = items
        .into_iter()
        .skip((number - 1) * per_page)
        .take(per_page)
        .collect();
    Page {
        number,
        num_pages,
        count,
        items,
    }
}
