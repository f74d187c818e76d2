/// An enum representing the color of a node in a red black tree. Empty links are black.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    pub fn flip(self) -> Color {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }

    pub fn is_red(self) -> bool {
        self == Color::Red
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn test_flip() {
        assert_eq!(Color::Red.flip(), Color::Black);
        assert_eq!(Color::Black.flip(), Color::Red);
    }
}
