/// A node of a parsed grammar annotation.
///
/// Columns are 1-based positions in the joined annotation text of the type
/// the grammar belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarNode {
    /// `'text'`
    Literal(String),
    /// `regex('pattern')`
    Regex(String),
    /// `token('Type')`, `token('Type:value')` or `token('Type', 'value')`
    Token { kind: String, value: Option<String> },
    /// `.`: the parser of the enclosing field's type.
    Infer { column: usize },
    /// A bare identifier naming a provided parser or registered type.
    Reference(String),
    /// `$x`: the match of `x` is stored in the field covering `column`.
    Capture { column: usize, child: Box<GrammarNode> },
    Seq(Vec<GrammarNode>),
    /// `a | b`, tried in order.
    Any(Vec<GrammarNode>),
    /// `x*`, `x+`, `x{m,n}`, `x{m,}`
    Range {
        min: usize,
        max: Option<usize>,
        child: Box<GrammarNode>,
    },
    /// `x?`
    Maybe(Box<GrammarNode>),
    /// `look(x)`
    Look(Box<GrammarNode>),
}

impl GrammarNode {
    /// Applies a repetition suffix. A capture marker stays outermost so that
    /// it receives the whole repetition.
    pub(crate) fn repeat(self, suffix: Suffix) -> GrammarNode {
        match self {
            GrammarNode::Capture { column, child } => GrammarNode::Capture {
                column,
                child: Box::new(child.wrap(suffix)),
            },
            node => node.wrap(suffix),
        }
    }

    fn wrap(self, suffix: Suffix) -> GrammarNode {
        match suffix {
            Suffix::Maybe => GrammarNode::Maybe(Box::new(self)),
            Suffix::Range(min, max) => GrammarNode::Range {
                min,
                max,
                child: Box::new(self),
            },
        }
    }
}

/// A repetition suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Suffix {
    Maybe,
    Range(usize, Option<usize>),
}
