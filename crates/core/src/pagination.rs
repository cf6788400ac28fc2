//! Offset pagination.
//!
//! A [`PageRequest`] selects a zero-based page of fixed size, a [`Page`] is
//! the slice returned by the store together with its totals, and a
//! [`PageWindow`] decides which page links a listing renders.
//!
//! Totals are computed at query time and are only consistent as of that
//! query; concurrent writes may shift page boundaries between requests.

use std::ops::RangeInclusive;

use serde::Serialize;
use thiserror::Error;

/// Errors constructing a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// Page size must be at least one.
    #[error("page size must be greater than zero")]
    ZeroSize,

    /// The page starts beyond the largest addressable offset.
    #[error("page {page} of size {size} is out of range")]
    OffsetOutOfRange { page: u32, size: u32 },
}

/// Largest offset a page may start at (fits a signed 64-bit SQL bind).
pub const MAX_OFFSET: u64 = i64::MAX.unsigned_abs();

/// Which page of results to fetch: zero-based index plus page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    /// Create a page request.
    ///
    /// # Errors
    ///
    /// Returns `PageRequestError::ZeroSize` if `size` is zero, or
    /// `PageRequestError::OffsetOutOfRange` if the page would start beyond
    /// [`MAX_OFFSET`].
    pub const fn new(page: u32, size: u32) -> Result<Self, PageRequestError> {
        if size == 0 {
            return Err(PageRequestError::ZeroSize);
        }
        if page as u64 * size as u64 > MAX_OFFSET {
            return Err(PageRequestError::OffsetOutOfRange { page, size });
        }
        Ok(Self { page, size })
    }

    /// Zero-based page index.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of elements on the page.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Number of elements preceding this page. Never exceeds [`MAX_OFFSET`].
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.page as u64 * self.size as u64
    }
}

/// A page request, or "everything in one page".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pageable {
    Paged(PageRequest),
    Unpaged,
}

/// One page of results plus the totals it was cut from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    content: Vec<T>,
    number: u32,
    size: u32,
    total_elements: u64,
    total_pages: u32,
}

impl<T> Page<T> {
    /// Build a page for `request` out of `total_elements` matches.
    #[must_use]
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        let total_pages = total_elements.div_ceil(u64::from(request.size()));
        Self {
            content,
            number: request.page(),
            size: request.size(),
            total_elements,
            total_pages: u32::try_from(total_pages).unwrap_or(u32::MAX),
        }
    }

    /// Build the single page returned for [`Pageable::Unpaged`].
    ///
    /// An unpaged result always reports exactly one page, even when empty.
    #[must_use]
    pub fn unpaged(content: Vec<T>) -> Self {
        let len = content.len();
        Self {
            content,
            number: 0,
            size: u32::try_from(len).unwrap_or(u32::MAX),
            total_elements: len as u64,
            total_pages: 1,
        }
    }

    /// Elements on this page.
    #[must_use]
    pub fn content(&self) -> &[T] {
        &self.content
    }

    /// Consume the page, returning its elements.
    #[must_use]
    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    /// Zero-based index of this page.
    #[must_use]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Requested page size.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Total matches across all pages.
    #[must_use]
    pub const fn total_elements(&self) -> u64 {
        self.total_elements
    }

    /// Total number of pages.
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Returns true if a page follows this one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.number.saturating_add(1) < self.total_pages
    }

    /// Returns true if a page precedes this one.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.number > 0
    }
}

/// The page links a listing renders.
///
/// `page_numbers` lists every page (1-based, for "jump to page" links) while
/// `start_page..=end_page` is the bounded window of zero-based indices shown
/// as direct links, centred on the requested page where possible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub page_numbers: Vec<u32>,
    pub start_page: u32,
    pub end_page: u32,
}

impl PageWindow {
    /// Number of direct page links in the window.
    pub const SIZE: u32 = 5;

    /// Compute the window for `requested_page` out of `total_pages`.
    ///
    /// The requested page is not checked against `total_pages`. A request past
    /// the end yields `start_page > end_page`, an empty window.
    ///
    /// ```rust
    /// # use brewery_core::PageWindow;
    /// let window = PageWindow::compute(10, 6);
    /// assert_eq!((window.start_page, window.end_page), (4, 8));
    /// ```
    #[must_use]
    pub fn compute(total_pages: u32, requested_page: u32) -> Self {
        let start_page = requested_page.saturating_sub(Self::SIZE / 2);
        let end_page = total_pages
            .saturating_sub(1)
            .min(start_page.saturating_add(Self::SIZE - 1));

        Self {
            page_numbers: (1..=total_pages).collect(),
            start_page,
            end_page,
        }
    }

    /// Zero-based indices to render as direct links.
    #[must_use]
    pub const fn visible_pages(&self) -> RangeInclusive<u32> {
        self.start_page..=self.end_page
    }
}
