use super::*;
use pretty_assertions::assert_eq;

// === Built-in table ===

#[test]
fn c_table_is_valid() {
    let table = Table::new(C_TABLE).unwrap();
    assert_eq!(table, Table::c_language());
    assert_eq!(table.len(), 9);
}

#[test]
fn c_table_labels_in_priority_order() {
    let labels: Vec<_> = Table::c_language().iter().map(|(_, d)| d.name).collect();
    assert_eq!(
        labels,
        vec![
            "macro",
            "cxx_comment",
            "c_comment",
            "operator",
            "delimiter",
            "char_literal",
            "string_literal",
            "number_literal",
            "identifier",
        ]
    );
}

#[test]
fn comments_outrank_operator() {
    let table = Table::c_language();
    let cxx = table.id_of("cxx_comment").unwrap();
    let c = table.id_of("c_comment").unwrap();
    let op = table.id_of("operator").unwrap();
    assert!(cxx < op);
    assert!(c < op);
}

#[test]
fn lookahead_follows_start() {
    let table = Table::c_language();
    let lookahead = |name| table.get(table.id_of(name).unwrap()).unwrap().lookahead();
    assert_eq!(lookahead("cxx_comment"), Lookahead::Fixed2);
    assert_eq!(lookahead("c_comment"), Lookahead::Fixed2);
    assert_eq!(lookahead("macro"), Lookahead::Current);
    assert_eq!(lookahead("identifier"), Lookahead::Current);
}

#[test]
fn name_of_foreign_id() {
    let table = Table::c_language();
    assert_eq!(table.name(DescriptorId(200)), "?");
    assert_eq!(table.name(DescriptorId(0)), "macro");
    assert_eq!(table.id_of("nonexistent"), None);
}

// === Validation ===

const WORD: Descriptor = Descriptor::new("word", Start::Any, Shape::Word);

#[test]
fn empty_table_rejected() {
    assert_eq!(Table::new(&[]), Err(TableError::Empty));
}

#[test]
fn missing_wildcard_rejected() {
    let table = [Descriptor::new(
        "op",
        Start::OneOf(ByteSet::from_bytes(b"+")),
        Shape::CharInSet,
    )];
    assert_eq!(Table::new(&table), Err(TableError::MissingWildcard));
}

#[test]
fn wildcard_must_be_last() {
    let table = [
        WORD,
        Descriptor::new("op", Start::OneOf(ByteSet::from_bytes(b"+")), Shape::ExactChar),
    ];
    assert_eq!(
        Table::new(&table),
        Err(TableError::WildcardNotLast {
            index: 0,
            name: "word"
        })
    );
}

#[test]
fn second_wildcard_rejected() {
    let table = [WORD, WORD];
    assert_eq!(
        Table::new(&table),
        Err(TableError::WildcardNotLast {
            index: 0,
            name: "word"
        })
    );
}

#[test]
fn empty_start_set_rejected() {
    let table = [
        Descriptor::new("never", Start::OneOf(ByteSet::EMPTY), Shape::ExactChar),
        WORD,
    ];
    assert_eq!(
        Table::new(&table),
        Err(TableError::EmptyStartSet {
            index: 0,
            name: "never"
        })
    );
}

#[test]
fn marked_span_needs_prefix() {
    let table = [
        Descriptor::new(
            "block",
            Start::OneOf(ByteSet::from_bytes(b"/")),
            Shape::Marked { close: *b"*/" },
        ),
        WORD,
    ];
    assert!(matches!(
        Table::new(&table),
        Err(TableError::IncompatibleStart { index: 0, .. })
    ));
}

#[test]
fn char_run_cannot_use_prefix() {
    let table = [
        Descriptor::new("run", Start::Prefix(*b"<<"), Shape::CharInSet),
        WORD,
    ];
    assert!(matches!(
        Table::new(&table),
        Err(TableError::IncompatibleStart { index: 0, .. })
    ));
}

#[test]
fn quoted_wildcard_rejected_before_position_check() {
    let table = [Descriptor::new(
        "quoted",
        Start::Any,
        Shape::Quoted { escape: None },
    )];
    assert!(matches!(
        Table::new(&table),
        Err(TableError::IncompatibleStart { index: 0, .. })
    ));
}

#[test]
fn error_messages_name_the_descriptor() {
    let err = TableError::WildcardNotLast {
        index: 2,
        name: "ident",
    };
    assert_eq!(
        err.to_string(),
        "wildcard descriptor `ident` at index 2 must be the last entry"
    );
}
