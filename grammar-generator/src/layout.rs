use crate::schema::FieldInfo;
use std::ops::Range;

/// The joined annotation text of a type and the column range of each field.
///
/// Fragments are joined with a single space and line breaks are flattened, so
/// every position of the text lies on line 1 and a column identifies exactly
/// one field.
#[derive(Debug, Clone, Default)]
pub(crate) struct Layout {
    text: String,
    /// Half-open 1-based column ranges, ordered and disjoint.
    ranges: Vec<(Range<usize>, usize)>,
}

impl Layout {
    pub fn new(fields: &[FieldInfo]) -> Self {
        let mut layout = Layout::default();
        let mut width = 0;
        for (index, field) in fields.iter().enumerate() {
            let fragment: String = field
                .annotation
                .chars()
                .map(|c| if matches!(c, '\n' | '\r' | '\t') { ' ' } else { c })
                .collect();
            if fragment.trim().is_empty() {
                continue;
            }
            if !layout.text.is_empty() {
                layout.text.push(' ');
                width += 1;
            }
            let start = width + 1;
            width += fragment.chars().count();
            layout.text.push_str(&fragment);
            layout.ranges.push((start..width + 1, index));
        }
        layout
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The index of the field whose fragment covers `column`.
    pub fn field_at(&self, column: usize) -> Option<usize> {
        let position = self.ranges.partition_point(|(range, _)| range.end <= column);
        self.ranges
            .get(position)
            .filter(|(range, _)| range.contains(&column))
            .map(|(_, field)| *field)
    }
}
