/// The span argument of [`TextOperation::delete`](crate::TextOperation::delete).
///
/// A deletion can be described either by how many characters it removes or
/// by the removed string itself. Integer spans of either sign contribute
/// their magnitude; string spans contribute their character count.
pub trait OpLength {
    fn length(&self) -> usize;
}

impl OpLength for usize {
    fn length(&self) -> usize {
        *self
    }
}

impl OpLength for i32 {
    fn length(&self) -> usize {
        usize::try_from(self.unsigned_abs()).unwrap_or(usize::MAX)
    }
}

impl OpLength for i64 {
    fn length(&self) -> usize {
        usize::try_from(self.unsigned_abs()).unwrap_or(usize::MAX)
    }
}

impl OpLength for &str {
    fn length(&self) -> usize {
        self.chars().count()
    }
}

impl OpLength for String {
    fn length(&self) -> usize {
        self.chars().count()
    }
}
