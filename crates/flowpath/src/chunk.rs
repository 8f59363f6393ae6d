// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::{Error, Result};

/// Splits a sequence into consecutive groups of `size` elements.
///
/// Every group holds exactly `size` elements except the last one, which holds the
/// remainder. An empty sequence produces no groups.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `size` is zero.
///
/// # Examples
///
/// ```
/// let groups = flowpath::chunk(vec![1, 2, 3, 4, 5, 6, 7, 8], 3)?;
///
/// assert_eq!(groups, vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8]]);
/// # Ok::<(), flowpath::Error>(())
/// ```
pub fn chunk<T>(items: impl IntoIterator<Item = T>, size: usize) -> Result<Vec<Vec<T>>> {
    if size == 0 {
        return Err(Error::invalid_argument("size", "chunk size must be at least 1"));
    }

    let mut groups = Vec::new();
    let mut current = Vec::with_capacity(size);

    for item in items {
        current.push(item);

        if current.len() == size {
            groups.push(std::mem::replace(&mut current, Vec::with_capacity(size)));
        }
    }

    if !current.is_empty() {
        groups.push(current);
    }

    Ok(groups)
}
