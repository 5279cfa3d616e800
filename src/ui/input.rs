// Single-line text field state for the forms

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    masked: bool,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn masked() -> Self {
        TextInput { value: String::new(), masked: true }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn push(&mut self, c: char) {
        self.value.push(c);
    }

    pub fn pop(&mut self) {
        self.value.pop();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    pub fn toggle_mask(&mut self) {
        self.masked = !self.masked;
    }

    pub fn is_masked(&self) -> bool {
        self.masked
    }

    /// What the field shows: bullets when masked
    pub fn display(&self) -> String {
        if self.masked {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_and_backspace() {
        let mut input = TextInput::new();
        for c in "42,5".chars() {
            input.push(c);
        }
        input.pop();
        assert_eq!(input.value(), "42,");
    }

    #[test]
    fn test_masked_display() {
        let mut input = TextInput::masked();
        for c in "secret".chars() {
            input.push(c);
        }
        assert_eq!(input.display(), "••••••");
        input.toggle_mask();
        assert_eq!(input.display(), "secret");
    }
}
