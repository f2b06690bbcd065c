//! Page-window primitives shared by the gateway and its providers.
//!
//! Two concerns live here:
//!
//! - [`PageBounds`] turns caller-supplied `page` / `pageSize` values into a
//!   [`PageRequest`] that is always safe to forward to a provider.
//! - [`Paginated`] is the wire shape of one page of results, with the derived
//!   `totalPages`, `hasNext`, and `hasPrevious` fields.
//!
//! ```
//! use pagination::{PageBounds, Paginated};
//!
//! let request = PageBounds::default().normalize(0, 500);
//! assert_eq!(request.page(), 1);
//! assert_eq!(request.page_size(), 100);
//!
//! let page = Paginated::new(vec!["a", "b"], 42, request);
//! assert_eq!(page.total_pages, 1);
//! assert!(!page.has_next);
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

const DEFAULT_MIN_PAGE_SIZE: u32 = 1;
const DEFAULT_MAX_PAGE_SIZE: u32 = 100;
const DEFAULT_PAGE_SIZE: u32 = 10;

/// Errors raised when constructing [`PageBounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageBoundsError {
    /// The minimum page size is zero.
    #[error("minimum page size must be at least 1")]
    ZeroMinimum,
    /// The minimum exceeds the maximum.
    #[error("minimum page size {min} exceeds maximum page size {max}")]
    Inverted {
        /// Configured minimum.
        min: u32,
        /// Configured maximum.
        max: u32,
    },
    /// The default page size falls outside `[min, max]`.
    #[error("default page size {default} must lie within [{min}, {max}]")]
    DefaultOutOfRange {
        /// Configured default.
        default: u32,
        /// Configured minimum.
        min: u32,
        /// Configured maximum.
        max: u32,
    },
}

/// Inclusive page-size band plus the size used when callers omit one.
///
/// ## Invariants
/// - `1 <= min <= default <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    min: u32,
    max: u32,
    default: u32,
}

impl Default for PageBounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_PAGE_SIZE,
            max: DEFAULT_MAX_PAGE_SIZE,
            default: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageBounds {
    /// Validate and construct a page-size band.
    ///
    /// # Errors
    /// Returns [`PageBoundsError`] when the band is empty, inverted, or the
    /// default lies outside it.
    pub fn new(min: u32, max: u32, default: u32) -> Result<Self, PageBoundsError> {
        if min == 0 {
            return Err(PageBoundsError::ZeroMinimum);
        }
        if min > max {
            return Err(PageBoundsError::Inverted { min, max });
        }
        if !(min..=max).contains(&default) {
            return Err(PageBoundsError::DefaultOutOfRange { default, min, max });
        }
        Ok(Self { min, max, default })
    }

    /// Smallest page size handed to providers.
    #[must_use]
    pub const fn min(&self) -> u32 {
        self.min
    }

    /// Largest page size handed to providers.
    #[must_use]
    pub const fn max(&self) -> u32 {
        self.max
    }

    /// Page size substituted for non-positive requests.
    #[must_use]
    pub const fn default_page_size(&self) -> u32 {
        self.default
    }

    /// Normalise raw caller input into a provider-safe request.
    ///
    /// Pages below one become page one. Non-positive page sizes take the
    /// default; everything else is clamped into `[min, max]`.
    #[must_use]
    pub fn normalize(&self, page: i64, page_size: i64) -> PageRequest {
        let page = u32::try_from(page.max(1)).unwrap_or(u32::MAX);
        let page_size = if page_size <= 0 {
            self.default
        } else {
            u32::try_from(page_size)
                .unwrap_or(u32::MAX)
                .clamp(self.min, self.max)
        };
        PageRequest { page, page_size }
    }
}

/// A normalised page window: 1-based page number and a bounded size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Number of items per page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }
}

/// One page of results in the shared wire format.
///
/// ## Invariants (when built with [`Paginated::new`])
/// - `total_pages = ceil(total / page_size)` when `page_size > 0`, else `0`.
/// - `has_next = page < total_pages`.
/// - `has_previous = page > 1`.
///
/// Decoding from a provider keeps whatever values the provider sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    rename_all = "camelCase",
    bound(deserialize = "T: Deserialize<'de>")
)]
pub struct Paginated<T> {
    /// Total number of items across all pages.
    pub total: u64,
    /// 1-based page number of this slice.
    pub page: u32,
    /// Requested number of items per page.
    pub page_size: u32,
    /// Number of pages available.
    pub total_pages: u64,
    /// Whether a later page exists.
    pub has_next: bool,
    /// Whether an earlier page exists.
    pub has_previous: bool,
    /// Items on this page, in provider order.
    #[serde(default = "Vec::new", deserialize_with = "null_as_empty")]
    pub data: Vec<T>,
}

impl<T> Paginated<T> {
    /// Build a page and derive its navigation fields.
    #[must_use]
    pub fn new(data: Vec<T>, total: u64, request: PageRequest) -> Self {
        let PageRequest { page, page_size } = request;
        let total_pages = if page_size == 0 {
            0
        } else {
            total.div_ceil(u64::from(page_size))
        };
        Self {
            total,
            page,
            page_size,
            total_pages,
            has_next: u64::from(page) < total_pages,
            has_previous: page > 1,
            data,
        }
    }

    /// An empty first page for the given request.
    #[must_use]
    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), 0, request)
    }
}

/// Decode a JSON sequence, treating `null` as empty.
///
/// Providers written in languages with nil slices send `null` for empty
/// lists. Pair with `#[serde(default)]` to also accept a missing field.
///
/// # Errors
/// Propagates the deserializer's error for anything other than a sequence or
/// `null`.
pub fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}
