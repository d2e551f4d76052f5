use crate::binder::bindings;
use crate::error::GrammarError;
use crate::grammar::{parse_annotation, GrammarNode};
use crate::layout::Layout;
use crate::options::{BuildOptions, Provided};
use crate::schema::{from_node, FieldInfo, Grammar, TypeInfo};
use crate::terminals::Terminals;
use crate::value::Value;
use common_framework::{FatalError, ParseError, TextToken};
use parser_framework::{any, look, maybe, named, range, seq, skip, Parser};
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

/// Compiled type parsers, addressed by index.
type Arena<U> = RwLock<Vec<Option<Parser<U, Value>>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entry {
    InProgress(usize),
    Complete(usize),
}

#[derive(Default)]
struct State {
    cache: HashMap<TypeId, Entry>,
    /// Types entered by the running compilation, dropped again if it fails.
    started: Vec<TypeId>,
}

/// The fields and column layout of the type being compiled.
struct Scope<'a> {
    type_name: &'static str,
    fields: &'a [FieldInfo],
    layout: &'a Layout,
}

impl Scope<'_> {
    fn field_at(&self, column: usize) -> Result<(usize, &FieldInfo), GrammarError> {
        self.layout
            .field_at(column)
            .and_then(|index| self.fields.get(index).map(|field| (index, field)))
            .ok_or_else(|| GrammarError::Unmapped {
                type_name: self.type_name.to_string(),
                column,
            })
    }
}

/// A grammar compiler session.
///
/// Each grammar type is compiled at most once per generator. Compilation is
/// serialized by a lock held for the whole request; a type referenced while
/// it is still being compiled, as in recursive grammars, gets a forward
/// reference into the arena. Parsers returned by [`Generator::build`] keep
/// the arena alive, so they stay usable after the generator is dropped.
///
/// ```
/// use grammar_generator::{BuildOptions, Generator, Grammar};
/// use parser_framework::{parse, predefined, ParseConfig, ReaderContext};
///
/// #[derive(Debug, Default, Clone, Grammar)]
/// struct List {
///     #[grammar("'[' $regex('[0-9]+')* ']'")]
///     items: Vec<u32>,
/// }
///
/// let options = BuildOptions::new().with_skip(predefined::whitespace().discard());
/// let parser = Generator::new(options).build::<List>().unwrap();
/// let mut ctx = ReaderContext::from_str("<string>", "[ 1 2 3 ]");
/// let list = parse(&mut ctx, &parser, ParseConfig::default()).unwrap();
/// assert_eq!(list.items, [1, 2, 3]);
/// ```
pub struct Generator<U: Terminals> {
    options: BuildOptions<U>,
    arena: Arc<Arena<U>>,
    state: Mutex<State>,
}

impl<U: Terminals> Generator<U> {
    pub fn new(options: BuildOptions<U>) -> Self {
        Self {
            options,
            arena: Arc::new(RwLock::new(Vec::new())),
            state: Mutex::new(State::default()),
        }
    }

    /// Compiles `T` and every type its grammar refers to.
    ///
    /// The skip parsers of the options are active while the returned parser
    /// runs.
    pub fn build<T: Grammar>(&self) -> Result<Parser<U, T>, GrammarError> {
        let index = self.compile_root(TypeInfo::of::<T>())?;
        let arena = Arc::clone(&self.arena);
        let parser = Parser::new(move |ctx| {
            let root = lookup(&arena, index).ok_or_else(|| unresolved(T::name()))?;
            let value = root.parse(ctx)?;
            from_node::<T>(value).map_err(|err| ParseError::from(FatalError::Other(err.to_string())))
        });
        Ok(self
            .options
            .skips
            .iter()
            .fold(parser, |parser, skipper| skip(skipper.clone(), parser)))
    }

    /// Number of types compiled so far.
    pub fn compiled(&self) -> usize {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state
            .cache
            .values()
            .filter(|entry| matches!(entry, Entry::Complete(_)))
            .count()
    }

    fn compile_root(&self, info: TypeInfo) -> Result<usize, GrammarError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.started.clear();
        match self.compile_type(&mut state, info) {
            Ok((index, _)) => Ok(index),
            Err(err) => {
                for id in std::mem::take(&mut state.started) {
                    state.cache.remove(&id);
                }
                Err(err)
            }
        }
    }

    fn compile_type(&self, state: &mut State, info: TypeInfo) -> Result<(usize, Parser<U, Value>), GrammarError> {
        match state.cache.get(&info.id).copied() {
            Some(Entry::Complete(index)) => {
                if let Some(parser) = lookup(&self.arena, index) {
                    return Ok((index, parser));
                }
            }
            Some(Entry::InProgress(index)) => {
                log::debug!("forward reference to `{}`", info.name);
                return Ok((index, self.forward(index, info.name)));
            }
            None => {}
        }

        let schema = (info.schema)();
        let fields = schema.fields();
        let layout = Layout::new(&fields);
        let node = parse_annotation(info.name, layout.text())?;
        log::debug!("grammar of `{}`: {:?}", info.name, node);

        let index = {
            let mut arena = self.arena.write().unwrap_or_else(PoisonError::into_inner);
            arena.push(None);
            arena.len() - 1
        };
        state.cache.insert(info.id, Entry::InProgress(index));
        state.started.push(info.id);

        let scope = Scope {
            type_name: info.name,
            fields: &fields,
            layout: &layout,
        };
        let tree = self.compile_node(state, &scope, &node)?;
        let parser = named(
            info.name,
            tree.map_detailed(move |value, range| {
                schema
                    .instantiate(bindings(value), range)
                    .map_err(ParseError::from)
            }),
        );

        if let Some(slot) = self
            .arena
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_mut(index)
        {
            *slot = Some(parser.clone());
        }
        state.cache.insert(info.id, Entry::Complete(index));
        Ok((index, parser))
    }

    fn compile_node(&self, state: &mut State, scope: &Scope<'_>, node: &GrammarNode) -> Result<Parser<U, Value>, GrammarError> {
        let parser = match node {
            GrammarNode::Literal(text) => U::literal(text)?,
            GrammarNode::Regex(pattern) => U::pattern(pattern)?,
            GrammarNode::Token { kind, value } => U::token(kind, value.as_deref())?,
            GrammarNode::Infer { column } => {
                let (_, field) = scope.field_at(*column)?;
                let info = field.inferred.ok_or_else(|| GrammarError::NotInferable {
                    type_name: scope.type_name.to_string(),
                    field: field.name.to_string(),
                })?;
                self.compile_type(state, info)?.1
            }
            GrammarNode::Reference(name) => match self.options.provided.get(name) {
                Some(Provided::Parser(parser)) => parser.clone(),
                Some(Provided::Type(info)) => self.compile_type(state, *info)?.1,
                None => {
                    return Err(GrammarError::UnknownReference {
                        type_name: scope.type_name.to_string(),
                        name: name.clone(),
                    })
                }
            },
            GrammarNode::Capture { column, child } => {
                let (field, _) = scope.field_at(*column)?;
                let column = *column;
                self.compile_node(state, scope, child)?.map(move |value| Value::Capture {
                    field,
                    column,
                    value: Box::new(value),
                })
            }
            GrammarNode::Seq(children) => seq(self.compile_all(state, scope, children)?).map(Value::List),
            GrammarNode::Any(children) => any(self.compile_all(state, scope, children)?),
            GrammarNode::Range { min, max, child } => {
                range(*min, *max, self.compile_node(state, scope, child)?).map(Value::List)
            }
            GrammarNode::Maybe(child) => {
                maybe(self.compile_node(state, scope, child)?).map(|value| Value::Maybe(value.map(Box::new)))
            }
            GrammarNode::Look(child) => look(self.compile_node(state, scope, child)?),
        };
        Ok(parser)
    }

    fn compile_all(&self, state: &mut State, scope: &Scope<'_>, nodes: &[GrammarNode]) -> Result<Vec<Parser<U, Value>>, GrammarError> {
        nodes
            .iter()
            .map(|node| self.compile_node(state, scope, node))
            .collect()
    }

    /// A parser that runs the arena entry `index` once it is filled.
    fn forward(&self, index: usize, name: &'static str) -> Parser<U, Value> {
        let arena = Arc::downgrade(&self.arena);
        Parser::new(move |ctx| {
            let target = arena
                .upgrade()
                .and_then(|arena| lookup(&arena, index))
                .ok_or_else(|| unresolved(name))?;
            target.parse(ctx)
        })
    }
}

fn lookup<U>(arena: &Arena<U>, index: usize) -> Option<Parser<U, Value>> {
    arena
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(index)
        .cloned()
        .flatten()
}

fn unresolved(name: &str) -> ParseError {
    FatalError::UnresolvedReference(name.to_string()).into()
}

/// Compiles a parser for a character grammar.
pub fn build_parser<T: Grammar>(options: BuildOptions<char>) -> Result<Parser<char, T>, GrammarError> {
    Generator::new(options).build::<T>()
}

/// Compiles a parser for a grammar over [`TextToken`]s.
pub fn build_token_parser<T: Grammar>(options: BuildOptions<TextToken>) -> Result<Parser<TextToken, T>, GrammarError> {
    Generator::new(options).build::<T>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BindError;
    use crate::schema::{FieldValue, Schema};
    use parser_framework::{parse, predefined, ParseConfig, ReaderContext};

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Word {
        text: String,
    }

    impl Grammar for Word {
        fn describe(schema: &mut Schema<Self>) {
            schema.field("text", "$regex('[a-z]+')", |word| &mut word.text);
        }
    }

    impl FieldValue for Word {
        fn from_value(value: Value) -> Result<Self, BindError> {
            from_node(value)
        }

        fn inferred() -> Option<TypeInfo> {
            Some(TypeInfo::of::<Self>())
        }
    }

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Pair {
        left: Word,
        right: Word,
    }

    impl Grammar for Pair {
        fn describe(schema: &mut Schema<Self>) {
            schema
                .field("left", "$.", |pair| &mut pair.left)
                .field("right", "'=' $.", |pair| &mut pair.right);
        }
    }

    #[derive(Debug, Default, Clone)]
    struct Broken {
        word: Word,
    }

    impl Grammar for Broken {
        fn describe(schema: &mut Schema<Self>) {
            schema.field("word", "$. missing", |broken| &mut broken.word);
        }
    }

    fn generator() -> Generator<char> {
        Generator::new(BuildOptions::new().with_skip(predefined::whitespace().discard()))
    }

    #[test]
    fn test_types_compile_once() {
        let generator = generator();
        let parser = generator.build::<Pair>().unwrap();
        assert_eq!(generator.compiled(), 2);
        generator.build::<Pair>().unwrap();
        generator.build::<Word>().unwrap();
        assert_eq!(generator.compiled(), 2);

        let mut ctx = ReaderContext::from_str("<pair>", "a = b");
        let pair = parse(&mut ctx, &parser, ParseConfig::default()).unwrap();
        assert_eq!(pair.left.text, "a");
        assert_eq!(pair.right.text, "b");
    }

    #[test]
    fn test_failed_compilation_is_rolled_back() {
        let generator = generator();
        let err = generator.build::<Broken>().unwrap_err();
        assert!(matches!(err, GrammarError::UnknownReference { ref name, .. } if name == "missing"));
        assert_eq!(generator.compiled(), 0);
        generator.build::<Word>().unwrap();
        assert_eq!(generator.compiled(), 1);
    }

    #[test]
    fn test_parser_outlives_generator() {
        let parser = generator().build::<Pair>().unwrap();
        let mut ctx = ReaderContext::from_str("<pair>", "x=y");
        assert!(parse(&mut ctx, &parser, ParseConfig::default()).is_ok());
    }
}
