//! Property-based tests for the tokenizer, the sequencer and the arranger

use proptest::prelude::*;
use tidycxx::{arrange_source, ArrangerOptions, CommentToken, IncludeSequencer, Tokenizer};

fn sequencer() -> IncludeSequencer {
    let mut sequencer = IncludeSequencer::new();
    let root = sequencer.add_root();
    let component_a = root.insert("componentA", true);
    let sub_a0 = component_a.insert("subA0", true);
    sub_a0.insert("subA0a", false);
    sub_a0.insert("subA0b", true);
    component_a.insert("subA1", false).insert("subA1a", true);
    root.insert("componentB", false);
    sequencer.add_root().insert("external", true);
    sequencer
}

/// Reassemble the source text from the tokens of every fed line.
fn reassemble(tokens: &[CommentToken]) -> String {
    let mut text = String::new();
    for token in tokens {
        match token {
            CommentToken::Code(code) => text.push_str(code),
            CommentToken::LineComment(comment) => {
                text.push_str("//");
                text.push_str(comment);
            }
            CommentToken::BlockComment(comment) => {
                text.push_str("/*");
                text.push_str(comment);
                text.push_str("*/");
            }
            CommentToken::EndOfLine => text.push('\n'),
        }
    }
    text
}

fn path_strategy() -> impl Strategy<Value = String> {
    let segment = prop_oneof![
        Just("componentA".to_string()),
        Just("componentB".to_string()),
        Just("external".to_string()),
        Just("subA0".to_string()),
        Just("subA0a".to_string()),
        Just("subA0b".to_string()),
        Just("subA1".to_string()),
        Just("subA1a".to_string()),
        "[a-z]{1,6}(\\.H)?",
    ];
    prop::collection::vec(segment, 1..5).prop_map(|segments| segments.join("/"))
}

fn source_line_strategy() -> impl Strategy<Value = String> {
    let comment = prop_oneof![Just("why"), Just("for cout"), Just("base"), Just("io")];
    prop_oneof![
        path_strategy().prop_map(|path| format!("#include <{path}>")),
        path_strategy().prop_map(|path| format!("#include \"{path}\"")),
        (path_strategy(), comment.clone())
            .prop_map(|(path, comment)| format!("#include <{path}> // {comment}")),
        Just("#include \"mom.H\"".to_string()),
        Just(String::new()),
        comment.clone().prop_map(|comment| format!("// {comment}")),
        comment.prop_map(|comment| format!("/* {comment} */")),
        Just("int main();".to_string()),
        Just("namespace n {}".to_string()),
    ]
}

fn terminated_line_strategy() -> impl Strategy<Value = String> {
    let text = prop_oneof![
        Just(String::new()),
        Just("// why".to_string()),
        Just("/* base */".to_string()),
        Just("int main();".to_string()),
        Just("  namespace n {} // io".to_string()),
    ];
    let ending = prop_oneof![Just("\n"), Just("\r\n")];
    (text, ending).prop_map(|(text, ending)| format!("{text}{ending}"))
}

proptest! {
    #[test]
    fn test_tokens_reassemble_source(lines in prop::collection::vec("[a-z /*]{0,12}", 1..8)) {
        let mut tokenizer = Tokenizer::new();
        let mut tokens = Vec::new();
        let mut expected = String::new();
        for line in &lines {
            tokens.extend(tokenizer.feed(line));
            expected.push_str(line);
            expected.push('\n');
        }
        if tokenizer.is_in_block_comment() {
            tokens.extend(tokenizer.feed("*/"));
            expected.push_str("*/\n");
        }

        prop_assert!(!tokenizer.is_in_block_comment());
        prop_assert_eq!(reassemble(&tokens), expected);
    }

    #[test]
    fn test_group_key_is_prefix_of_sort_key(path in path_strategy()) {
        let sequencer = sequencer();
        let sort_key = sequencer.sort_key(&path);
        let group_key = sequencer.group_key(&path);

        prop_assert!(sort_key.positions().starts_with(group_key.positions()));
        prop_assert!(group_key.depth() >= 1);
    }

    #[test]
    fn test_non_descendable_node_is_one_group(
        a in "[a-z]{1,4}(/[a-z]{1,4}){0,3}",
        b in "[a-z]{1,4}(/[a-z]{1,4}){0,3}",
    ) {
        let sequencer = sequencer();
        let (a, b) = (format!("componentA/subA1/{a}"), format!("componentA/subA1/{b}"));

        prop_assert_eq!(sequencer.group_key(&a), sequencer.group_key(&b));
    }

    #[test]
    fn test_sort_key_order_matches_rendering(a in path_strategy(), b in path_strategy()) {
        let sequencer = sequencer();
        let (key_a, key_b) = (sequencer.sort_key(&a), sequencer.sort_key(&b));

        prop_assert_eq!(key_a.cmp(&key_b), key_a.to_string().cmp(&key_b.to_string()));
        prop_assert_eq!(key_a.cmp(&key_b), key_b.cmp(&key_a).reverse());
    }

    #[test]
    fn test_unknown_paths_sort_last(known in path_strategy(), unknown in "[0-9]{1,4}/[a-z]{1,4}") {
        let sequencer = sequencer();

        prop_assert_eq!(sequencer.sort_key(&unknown), sequencer.unknown_key());
        prop_assert!(sequencer.sort_key(&known) <= sequencer.unknown_key());
    }

    #[test]
    fn test_arranging_is_idempotent(lines in prop::collection::vec(source_line_strategy(), 0..14)) {
        let source: String = lines.iter().map(|line| format!("{line}\n")).collect();
        let options = ArrangerOptions::default().with_source_name("prjA/mom.C");

        let once = arrange_source(&source, options.clone(), sequencer()).unwrap();
        let twice = arrange_source(&once, options, sequencer()).unwrap();
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn test_code_lines_survive(lines in prop::collection::vec(source_line_strategy(), 0..14)) {
        let source: String = lines.iter().map(|line| format!("{line}\n")).collect();
        let output = arrange_source(&source, ArrangerOptions::default(), sequencer()).unwrap();

        let code = |text: &str| {
            text.lines()
                .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with("//") && !line.starts_with("/*"))
                .map(str::to_string)
                .collect::<Vec<_>>()
        };
        prop_assert_eq!(code(&output), code(&source));
    }

    #[test]
    fn test_text_without_includes_is_kept_byte_for_byte(
        lines in prop::collection::vec(terminated_line_strategy(), 0..10),
        last in prop_oneof![Just(""), Just("int last;"), Just("// last")],
    ) {
        let source = format!("{}{last}", lines.concat());
        let output = arrange_source(&source, ArrangerOptions::default(), sequencer()).unwrap();

        prop_assert_eq!(output, source);
    }
}
