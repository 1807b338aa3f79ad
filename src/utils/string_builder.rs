use std::str::Chars;

/// Assembles the output of an operation in order, based on a source string
/// and a series of insertions, deletions and copies applied to it. Every
/// source character is visited exactly once, and all counts are character
/// counts, so the builder is safe to use with any UTF-8 text.
pub(crate) struct StringBuilder<'a> {
    source: Chars<'a>,
    buffer: String,
}

impl<'a> StringBuilder<'a> {
    /// `capacity` is a character-count hint for the finished buffer.
    pub(crate) fn new(source: &'a str, capacity: usize) -> StringBuilder<'a> {
        StringBuilder {
            source: source.chars(),
            buffer: String::with_capacity(capacity),
        }
    }

    /// Append a string that has no counterpart in the source.
    pub(crate) fn insert(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    /// Copy the next `count` characters of the source to the buffer.
    pub(crate) fn retain(&mut self, count: usize) {
        self.buffer.extend(self.source.by_ref().take(count));
    }

    /// Skip the next `count` characters of the source.
    pub(crate) fn delete(&mut self, count: usize) {
        if count == 0 {
            return;
        }

        self.source.by_ref().nth(count - 1);
    }

    pub(crate) fn build(self) -> String {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_string_builder() {
        let mut builder = StringBuilder::new("aaa bbb ccc", 15);

        builder.insert("ddd");
        builder.delete(3);
        builder.retain(8);
        builder.insert(" eee");

        assert_eq!(builder.build(), "ddd bbb ccc eee");
    }

    #[test]
    fn test_empty_source() {
        let mut builder = StringBuilder::new("", 4);

        builder.insert("test");

        assert_eq!(builder.build(), "test");
    }

    #[test]
    fn test_counts_are_characters_not_bytes() {
        let mut builder = StringBuilder::new("こんにちは", 7);

        builder.retain(3);
        builder.insert("世界, ");
        builder.delete(2);

        assert_eq!(builder.build(), "こんに世界, ");
    }
}
