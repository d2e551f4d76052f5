use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// The untyped result of a generated parser.
///
/// Terminals yield `Text`, sequences and repetitions yield `List`, `?` yields
/// `Maybe`, a `$` marker wraps its match in `Capture`, and a compiled grammar
/// type yields its instance as a `Node`.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Unit,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    List(Vec<Value>),
    Maybe(Option<Box<Value>>),
    Capture {
        /// Index of the destination field in its type's schema.
        field: usize,
        /// Column of the `$` marker in the type's grammar.
        column: usize,
        value: Box<Value>,
    },
    Node(Node),
}

impl Value {
    /// Wraps an instance of a grammar type.
    pub fn node<T: Any + Send + Sync>(type_name: &'static str, value: T) -> Self {
        Value::Node(Node {
            type_name,
            inner: Arc::new(value),
        })
    }

    /// A short description used in binding errors.
    pub fn describe(&self) -> String {
        match self {
            Value::Unit => "nothing".to_string(),
            Value::Text(text) => format!("text {:?}", text),
            Value::Int(n) => format!("integer {}", n),
            Value::Float(n) => format!("float {}", n),
            Value::Bool(b) => format!("bool {}", b),
            Value::List(items) => format!("list of {} values", items.len()),
            Value::Maybe(None) => "absent value".to_string(),
            Value::Maybe(Some(inner)) => inner.describe(),
            Value::Capture { value, .. } => value.describe(),
            Value::Node(node) => format!("`{}`", node.type_name),
        }
    }

    /// Concatenated text of every terminal in the value, if it has no nodes.
    pub fn text(&self) -> Option<String> {
        match self {
            Value::Unit | Value::Maybe(None) => Some(String::new()),
            Value::Text(text) => Some(text.clone()),
            Value::Int(n) => Some(n.to_string()),
            Value::Float(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::List(items) => items.iter().map(Value::text).collect(),
            Value::Maybe(Some(inner)) => inner.text(),
            Value::Capture { value, .. } => value.text(),
            Value::Node(_) => None,
        }
    }

    /// Removes every capture marker, keeping the captured values in place.
    pub fn strip_captures(self) -> Value {
        match self {
            Value::Capture { value, .. } => value.strip_captures(),
            Value::List(items) => Value::List(items.into_iter().map(Value::strip_captures).collect()),
            Value::Maybe(inner) => Value::Maybe(inner.map(|inner| Box::new(inner.strip_captures()))),
            other => other,
        }
    }

    /// Whether a capture for `field` occurs anywhere inside the value.
    pub fn captures_field(&self, field: usize) -> bool {
        match self {
            Value::Capture { field: target, value, .. } => *target == field || value.captures_field(field),
            Value::List(items) => items.iter().any(|item| item.captures_field(field)),
            Value::Maybe(Some(inner)) => inner.captures_field(field),
            _ => false,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }
}

/// An instance of a grammar type behind a type-erased handle.
#[derive(Clone)]
pub struct Node {
    type_name: &'static str,
    inner: Arc<dyn Any + Send + Sync>,
}

impl Node {
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Extracts the instance, cloning it only if the node is shared.
    pub fn take<T: Any + Clone + Send + Sync>(self) -> Result<T, Node> {
        let type_name = self.type_name;
        match Arc::downcast::<T>(self.inner) {
            Ok(inner) => Ok(Arc::try_unwrap(inner).unwrap_or_else(|shared| (*shared).clone())),
            Err(inner) => Err(Node { type_name, inner }),
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.type_name)
    }
}
