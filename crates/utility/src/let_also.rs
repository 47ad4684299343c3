/// Kotlin-style scope function. Applies `f` to an owned value, which keeps
/// transformation chains readable where a temporary binding would be noise.
pub trait LetAlso {
    fn let_owned<R, F>(self, f: F) -> R
    where
        Self: Sized,
        F: FnOnce(Self) -> R,
    {
        f(self)
    }
}

impl<T> LetAlso for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn let_owned_applies_the_closure() {
        let doubled = 21.let_owned(|value| value * 2);

        assert_eq!(doubled, 42);
    }

    #[test]
    fn let_owned_can_change_the_type() {
        let rendered = 42.let_owned(|value| format!("{}", value));

        assert_eq!(rendered, "42");
    }
}
