/// The aggregate value of a split row: one optional value per slot.
///
/// Equality compares `left` and `right` only. `center` is deliberately left out, so two values
/// that differ only in the center slot compare equal. Code that needs to detect a center-only
/// change must compare the fields directly (the split row's dirty tracking does).
#[derive(Clone, Debug)]
pub struct TriValue<L, C, R> {
    pub left: Option<L>,
    pub center: Option<C>,
    pub right: Option<R>,
}

impl<L, C, R> TriValue<L, C, R> {
    pub fn new(left: Option<L>, center: Option<C>, right: Option<R>) -> Self {
        Self {
            left,
            center,
            right,
        }
    }
}

impl<L, C, R> Default for TriValue<L, C, R> {
    fn default() -> Self {
        Self {
            left: None,
            center: None,
            right: None,
        }
    }
}

impl<L: PartialEq, C, R: PartialEq> PartialEq for TriValue<L, C, R> {
    fn eq(&self, other: &Self) -> bool {
        self.left == other.left && self.right == other.right
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_center() {
        let a = TriValue::new(Some(1), Some("x"), Some(true));
        let b = TriValue::new(Some(1), Some("y"), Some(true));
        assert_eq!(a, b);
        assert_ne!(a.center, b.center);
    }

    #[test]
    fn equality_compares_left_and_right() {
        let a = TriValue::new(Some(1), Some("x"), Some(true));
        assert_ne!(a, TriValue::new(Some(2), Some("x"), Some(true)));
        assert_ne!(a, TriValue::new(Some(1), Some("x"), None));
        assert_eq!(
            TriValue::<i32, &str, bool>::default(),
            TriValue::new(None, Some("only center"), None)
        );
    }
}
