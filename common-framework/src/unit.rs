use std::fmt::Debug;

/// One element of an input stream: a character, a byte or a token.
pub trait StreamUnit: Clone + Debug + PartialEq + Send + Sync + 'static {
    /// Whether this unit ends a line.
    fn is_newline(&self) -> bool {
        false
    }

    /// Renders a run of units for error messages.
    fn render(units: &[Self]) -> String {
        units
            .iter()
            .map(|unit| format!("{:?}", unit))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl StreamUnit for char {
    fn is_newline(&self) -> bool {
        *self == '\n'
    }

    fn render(units: &[Self]) -> String {
        units.iter().collect()
    }
}

impl StreamUnit for u8 {
    fn is_newline(&self) -> bool {
        *self == b'\n'
    }

    fn render(units: &[Self]) -> String {
        String::from_utf8_lossy(units).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_chars() {
        assert_eq!(char::render(&['a', 'b']), "ab");
        assert!('\n'.is_newline());
        assert!(!'a'.is_newline());
    }

    #[test]
    fn test_render_bytes() {
        assert_eq!(u8::render(b"xy"), "xy");
        assert!(b'\n'.is_newline());
    }
}
