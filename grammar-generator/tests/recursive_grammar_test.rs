use common_framework::ParseResult;
use grammar_generator::{build_parser, BuildOptions, Generator, Grammar, Value};
use parser_framework::{parse, predefined, ParseConfig, Parser, ReaderContext};

#[derive(Debug, Default, Clone, PartialEq, Grammar)]
struct Dir {
    #[grammar("'Dir' '{' $.* '}'")]
    entries: Vec<DirEntry>,
}

#[derive(Debug, Default, Clone, PartialEq, Grammar)]
struct DirEntry {
    #[grammar("'Entry' '{' $StrParser")]
    name: String,
    #[grammar("$regex('[0-9]+')")]
    id: u32,
    #[grammar("$.? '}'")]
    sub_dir: Option<Box<Dir>>,
}

fn dir_options() -> BuildOptions<char> {
    BuildOptions::new()
        .with_parser("StrParser", predefined::double_quoted_string().map(Value::Text))
        .unwrap()
        .with_skip(predefined::whitespace().discard())
}

fn run<T: 'static>(parser: &Parser<char, T>, input: &str) -> ParseResult<T> {
    let mut ctx = ReaderContext::from_str("<test>", input);
    parse(&mut ctx, parser, ParseConfig::default())
}

fn entry(name: &str, id: u32, sub_dir: Option<Dir>) -> DirEntry {
    DirEntry {
        name: name.to_string(),
        id,
        sub_dir: sub_dir.map(Box::new),
    }
}

#[test]
fn test_recursive_grammar() {
    let parser = build_parser::<Dir>(dir_options()).unwrap();
    let dir = run(&parser, r#"Dir { Entry { "Name1" 1 } Entry { "Name2" 2 Dir { } } }"#).unwrap();
    assert_eq!(
        dir,
        Dir {
            entries: vec![entry("Name1", 1, None), entry("Name2", 2, Some(Dir::default()))],
        }
    );
}

#[test]
fn test_deep_nesting() {
    let parser = build_parser::<Dir>(dir_options()).unwrap();
    let mut input = String::from("Dir { }");
    for depth in (0..4).rev() {
        input = format!(r#"Dir {{ Entry {{ "level{}" {} {} }} }}"#, depth, depth, input);
    }

    let mut dir = run(&parser, &input).unwrap();
    for depth in 0..4 {
        assert_eq!(dir.entries.len(), 1);
        let entry = dir.entries.remove(0);
        assert_eq!(entry.name, format!("level{}", depth));
        assert_eq!(entry.id, depth);
        dir = *entry.sub_dir.unwrap();
    }
    assert!(dir.entries.is_empty());
}

#[test]
fn test_unclosed_entry_is_hard() {
    let parser = build_parser::<Dir>(dir_options()).unwrap();
    let err = run(&parser, r#"Dir { Entry { "Name1" 1 }"#).unwrap_err();
    assert!(err.is_hard());
    assert!(err.to_string().contains("expected `}` but got `EOF`"));
}

#[test]
fn test_both_types_compile_once_per_generator() {
    let generator = Generator::new(dir_options());
    let dirs = generator.build::<Dir>().unwrap();
    let entries = generator.build::<DirEntry>().unwrap();
    assert_eq!(generator.compiled(), 2);

    let entry = run(&entries, r#"Entry { "solo" 7 }"#).unwrap();
    assert_eq!(entry.id, 7);
    assert!(run(&dirs, "Dir { }").is_ok());
}

#[test]
fn test_concurrent_builds_share_one_compilation() {
    let generator = Generator::new(dir_options());
    let input = r#"Dir { Entry { "a" 1 Dir { Entry { "b" 2 } } } }"#;
    std::thread::scope(|scope| {
        let workers: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    let parser = generator.build::<Dir>().unwrap();
                    run(&parser, input).unwrap()
                })
            })
            .collect();
        for worker in workers {
            let dir = worker.join().unwrap();
            assert_eq!(dir.entries[0].name, "a");
        }
    });
    assert_eq!(generator.compiled(), 2);
}

#[derive(Debug, Default, Clone, PartialEq, Grammar)]
struct Coord {
    #[grammar("$Number")]
    value: i64,
}

#[derive(Debug, Default, Clone, PartialEq, Grammar)]
struct Point {
    #[grammar("'(' $Coord ','")]
    x: Coord,
    #[grammar("$Coord ')'")]
    y: Coord,
}

#[test]
fn test_registered_types_and_parsers() {
    let options = BuildOptions::new()
        .with_type::<Coord>()
        .unwrap()
        .with_parser("Number", predefined::int().map(Value::Int))
        .unwrap()
        .with_skip(predefined::whitespace().discard());
    let parser = build_parser::<Point>(options).unwrap();
    let point = run(&parser, "( -3 , 14 )").unwrap();
    assert_eq!(point.x.value, -3);
    assert_eq!(point.y.value, 14);
}
