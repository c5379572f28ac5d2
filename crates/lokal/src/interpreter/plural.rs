//! Plural category resolution.
//!
//! Counts are classified as singular or not. Languages with richer plural
//! rules can still address any count with exact `=N` branches.

use crate::parser::PluralCategory;

/// Get the plural category for an offset-adjusted count.
///
/// ```
/// use lokal::interpreter::plural_category;
/// use lokal::parser::PluralCategory;
///
/// assert_eq!(plural_category(1.0), PluralCategory::One);
/// assert_eq!(plural_category(0.0), PluralCategory::Other);
/// assert_eq!(plural_category(2.0), PluralCategory::Other);
/// ```
pub fn plural_category(count: f64) -> PluralCategory {
    if count == 1.0 {
        PluralCategory::One
    } else {
        PluralCategory::Other
    }
}
