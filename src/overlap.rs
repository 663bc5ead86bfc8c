//! Overlap Indicators
//!
//! - HL2: midpoint of high and low

use crate::error::Result;
use crate::series::{Category, Series};
use crate::validation::{get_offset, ArgValue};

/// HL2 (High-Low Midpoint)
///
/// # Formula
/// HL2 = 0.5 × (High + Low)
///
/// # Arguments
/// * `high` - High prices
/// * `low` - Low prices
/// * `offset` - Positions to shift the result; anything but an integer means 0
///
/// # Returns
/// Series named `HL2` in the `overlap` category, aligned on the union of
/// both indices. Positions present on only one side are NaN.
///
/// # Example
/// ```
/// use ta_utils::{hl2, Series};
/// let high = Series::new(vec![10.0, 12.0]);
/// let low = Series::new(vec![8.0, 9.0]);
/// let mid = hl2(&high, &low, None::<i64>).unwrap();
/// assert_eq!(mid.values(), &[9.0, 10.5]);
/// assert_eq!(mid.name(), Some("HL2"));
/// ```
pub fn hl2(high: &Series, low: &Series, offset: impl Into<ArgValue>) -> Result<Series> {
    let offset = get_offset(offset);

    let mut result = high.zip_with(low, |h, l| 0.5 * (h + l))?;
    if offset != 0 {
        result = result.shift(offset);
    }

    Ok(result.with_name("HL2").with_category(Category::Overlap))
}
