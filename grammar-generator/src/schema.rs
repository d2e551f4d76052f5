use crate::error::BindError;
use crate::value::Value;
use common_framework::{FatalError, OriginRange};
use std::any::{type_name, TypeId};
use std::fmt;
use std::sync::Arc;

/// A type whose parser is compiled from per-field grammar annotations.
///
/// Usually derived:
///
/// ```
/// use grammar_generator::Grammar;
///
/// #[derive(Debug, Default, Clone, Grammar)]
/// struct Person {
///     #[grammar("'person' $regex('[a-zA-Z]+')")]
///     name: String,
///     #[grammar("$regex('[0-9]+')")]
///     age: u32,
/// }
/// ```
pub trait Grammar: Default + Clone + Send + Sync + 'static {
    /// The name used in error messages and for named references.
    fn name() -> &'static str {
        let full = type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }

    /// Declares the annotated fields in declaration order.
    fn describe(schema: &mut Schema<Self>);
}

type Assign<T> = Box<dyn Fn(&mut T, Value) -> Result<(), BindError> + Send + Sync>;

struct FieldDecl<T> {
    name: &'static str,
    annotation: String,
    inferred: Option<TypeInfo>,
    assign: Assign<T>,
}

/// The field declarations of a grammar type.
pub struct Schema<T> {
    type_name: &'static str,
    fields: Vec<FieldDecl<T>>,
    origin: Option<fn(&mut T) -> &mut OriginRange>,
}

impl<T: Grammar> Schema<T> {
    fn new() -> Self {
        Self {
            type_name: T::name(),
            fields: Vec::new(),
            origin: None,
        }
    }

    /// Declares a field matched by `annotation`.
    pub fn field<F: FieldValue>(
        &mut self,
        name: &'static str,
        annotation: impl Into<String>,
        access: fn(&mut T) -> &mut F,
    ) -> &mut Self {
        self.fields.push(FieldDecl {
            name,
            annotation: annotation.into(),
            inferred: F::inferred(),
            assign: Box::new(move |target: &mut T, value: Value| access(target).assign(value)),
        });
        self
    }

    /// Declares the field receiving the source range of each match.
    pub fn origin_range(&mut self, access: fn(&mut T) -> &mut OriginRange) -> &mut Self {
        self.origin = Some(access);
        self
    }
}

/// What the compiler needs to know about a field.
#[derive(Debug, Clone)]
pub(crate) struct FieldInfo {
    pub name: &'static str,
    pub annotation: String,
    pub inferred: Option<TypeInfo>,
}

/// A schema with the destination type erased.
pub(crate) trait DynSchema: Send + Sync {
    fn type_name(&self) -> &'static str;

    fn fields(&self) -> Vec<FieldInfo>;

    /// Builds an instance from `(field index, value)` pairs.
    fn instantiate(&self, bindings: Vec<(usize, Value)>, range: OriginRange) -> Result<Value, FatalError>;
}

impl<T: Grammar> DynSchema for Schema<T> {
    fn type_name(&self) -> &'static str {
        self.type_name
    }

    fn fields(&self) -> Vec<FieldInfo> {
        self.fields
            .iter()
            .map(|field| FieldInfo {
                name: field.name,
                annotation: field.annotation.clone(),
                inferred: field.inferred,
            })
            .collect()
    }

    fn instantiate(&self, bindings: Vec<(usize, Value)>, range: OriginRange) -> Result<Value, FatalError> {
        let mut target = T::default();
        for (index, value) in bindings {
            let Some(field) = self.fields.get(index) else {
                continue;
            };
            (field.assign)(&mut target, value).map_err(|err| FatalError::Bind {
                origin: range.start.clone(),
                field: format!("{}.{}", self.type_name, field.name),
                message: err.message().to_string(),
            })?;
        }
        if let Some(origin) = self.origin {
            *origin(&mut target) = range;
        }
        Ok(Value::node(self.type_name, target))
    }
}

/// Identifies a grammar type and how to obtain its schema.
#[derive(Clone, Copy)]
pub struct TypeInfo {
    pub(crate) id: TypeId,
    pub(crate) name: &'static str,
    pub(crate) schema: fn() -> Arc<dyn DynSchema>,
}

impl TypeInfo {
    pub fn of<T: Grammar>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: T::name(),
            schema: schema_of::<T>,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeInfo({})", self.name)
    }
}

fn schema_of<T: Grammar>() -> Arc<dyn DynSchema> {
    let mut schema = Schema::<T>::new();
    T::describe(&mut schema);
    Arc::new(schema)
}

/// Conversion of captured values into field types.
pub trait FieldValue: Sized + Send + Sync + 'static {
    fn from_value(value: Value) -> Result<Self, BindError>;

    /// Stores a captured value in the field. Collections append.
    fn assign(&mut self, value: Value) -> Result<(), BindError> {
        *self = Self::from_value(value)?;
        Ok(())
    }

    /// The grammar type whose parser `.` stands for in this field.
    fn inferred() -> Option<TypeInfo> {
        None
    }
}

/// Extracts a grammar type instance from a captured value.
pub fn from_node<T: Grammar>(value: Value) -> Result<T, BindError> {
    match value {
        Value::Node(node) => node
            .take::<T>()
            .map_err(|node| BindError::new(format!("cannot convert `{}` to `{}`", node.type_name(), T::name()))),
        Value::Maybe(Some(inner)) => from_node(*inner),
        Value::Capture { value, .. } => from_node(*value),
        other => Err(BindError::new(format!(
            "cannot convert {} to `{}`",
            other.describe(),
            T::name()
        ))),
    }
}

fn unconvertible(value: &Value, target: &str) -> BindError {
    BindError::new(format!("cannot convert {} to {}", value.describe(), target))
}

impl FieldValue for String {
    fn from_value(value: Value) -> Result<Self, BindError> {
        value.text().ok_or_else(|| unconvertible(&value, "a string"))
    }
}

macro_rules! integer_field {
    ($($ty:ty),+) => {
        $(
            impl FieldValue for $ty {
                fn from_value(value: Value) -> Result<Self, BindError> {
                    match &value {
                        Value::Int(n) => <$ty>::try_from(*n).map_err(|_| unconvertible(&value, stringify!($ty))),
                        Value::Text(text) => text.trim().parse().map_err(|_| unconvertible(&value, stringify!($ty))),
                        Value::Maybe(Some(inner)) => Self::from_value((**inner).clone()),
                        _ => Err(unconvertible(&value, stringify!($ty))),
                    }
                }
            }
        )+
    };
}

integer_field!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! float_field {
    ($($ty:ty),+) => {
        $(
            impl FieldValue for $ty {
                fn from_value(value: Value) -> Result<Self, BindError> {
                    match &value {
                        Value::Float(n) => Ok(*n as $ty),
                        Value::Int(n) => Ok(*n as $ty),
                        Value::Text(text) => text.trim().parse().map_err(|_| unconvertible(&value, stringify!($ty))),
                        Value::Maybe(Some(inner)) => Self::from_value((**inner).clone()),
                        _ => Err(unconvertible(&value, stringify!($ty))),
                    }
                }
            }
        )+
    };
}

float_field!(f32, f64);

impl FieldValue for bool {
    /// Presence flags: `$x?` sets the field to whether `x` matched.
    fn from_value(value: Value) -> Result<Self, BindError> {
        match &value {
            Value::Maybe(inner) => Ok(inner.is_some()),
            Value::Bool(b) => Ok(*b),
            Value::Text(text) => match text.as_str() {
                "true" | "1" => Ok(true),
                "false" | "0" => Ok(false),
                _ => Err(unconvertible(&value, "bool")),
            },
            _ => Err(unconvertible(&value, "bool")),
        }
    }
}

impl FieldValue for () {
    fn from_value(_: Value) -> Result<Self, BindError> {
        Ok(())
    }
}

impl FieldValue for Value {
    fn from_value(value: Value) -> Result<Self, BindError> {
        Ok(value.strip_captures())
    }
}

impl<F: FieldValue> FieldValue for Vec<F> {
    fn from_value(value: Value) -> Result<Self, BindError> {
        let mut items = Vec::new();
        items.assign(value)?;
        Ok(items)
    }

    fn assign(&mut self, value: Value) -> Result<(), BindError> {
        match value {
            Value::List(items) => {
                for item in items {
                    self.push(F::from_value(item)?);
                }
            }
            Value::Maybe(None) => {}
            Value::Maybe(Some(inner)) => self.assign(*inner)?,
            other => self.push(F::from_value(other)?),
        }
        Ok(())
    }

    fn inferred() -> Option<TypeInfo> {
        F::inferred()
    }
}

impl<F: FieldValue> FieldValue for Option<F> {
    fn from_value(value: Value) -> Result<Self, BindError> {
        match value {
            Value::Maybe(None) => Ok(None),
            Value::Maybe(Some(inner)) => F::from_value(*inner).map(Some),
            other => F::from_value(other).map(Some),
        }
    }

    fn assign(&mut self, value: Value) -> Result<(), BindError> {
        if !matches!(value, Value::Maybe(None)) {
            *self = Self::from_value(value)?;
        }
        Ok(())
    }

    fn inferred() -> Option<TypeInfo> {
        F::inferred()
    }
}

impl<F: FieldValue> FieldValue for Box<F> {
    fn from_value(value: Value) -> Result<Self, BindError> {
        F::from_value(value).map(Box::new)
    }

    fn inferred() -> Option<TypeInfo> {
        F::inferred()
    }
}
