use serde::{Deserialize, Serialize};
use serde_inibean::{
    from_optional_str, from_str, to_document, to_string, to_string_documented,
    to_string_with_options, CommentMarker, Dialect, Documentation, Documented, Error, TypeDoc,
};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
enum Level {
    Low,
    High,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
struct Inner {
    f1: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Everything {
    f1: Option<String>,
    f2: Option<String>,
    f3: f64,
    f4: Option<i32>,
    f5: u128,
    f6: Vec<u8>,
    f7: Vec<i64>,
    f8: BTreeMap<Level, Option<i16>>,
    f9: Vec<Option<Inner>>,
}

fn everything() -> Everything {
    let mut f8 = BTreeMap::new();
    f8.insert(Level::Low, Some(7));
    f8.insert(Level::High, None);

    Everything {
        f1: Some(String::new()),
        f2: Some(" #tricky; \"value\" with \\ and = ".to_string()),
        f3: 0.123_456_789_012_345_68,
        f4: None,
        f5: 0x1234_5678_9abc_def0_1234_5678_9abc_def0,
        f6: vec![0, 255, 16],
        f7: vec![3, 1, 4, 1, 5],
        f8,
        f9: vec![
            Some(Inner {
                f1: Some("bob 0".to_string()),
            }),
            Some(Inner {
                f1: Some("bob 1".to_string()),
            }),
            Some(Inner {
                f1: Some("bob 2".to_string()),
            }),
            None,
        ],
    }
}

#[test]
fn test_round_trip() {
    let original = everything();
    let ini = to_string(&original).unwrap();
    println!("Everything INI:\n{}", ini);

    let back: Everything = from_str(&ini).unwrap();
    assert_eq!(original, back);
}

#[test]
fn test_round_trip_layout() {
    let ini = to_string(&everything()).unwrap();

    assert!(ini.starts_with("f1 = \n"));
    assert!(!ini.contains("f4"));
    assert!(ini.contains("f7 = 3\nf7 = 1\nf7 = 4\nf7 = 1\nf7 = 5\n"));
    assert!(ini.contains("[f8]\nLow = 7\nHigh\n"));
    assert!(ini.ends_with("[f9]\nf1 = bob 2\n\n[f9]\n"));
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct DocumentedInner {
    f1: String,
}

impl Documented for DocumentedInner {
    fn documentation() -> TypeDoc {
        TypeDoc::new("DocumentedInner")
            .comment("inner class")
            .property("f1", "on getter")
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct DocumentedOuter {
    f1: String,
    f2: String,
    f3: DocumentedInner,
    f4: DocumentedInner,
}

impl Documented for DocumentedOuter {
    fn documentation() -> TypeDoc {
        TypeDoc::new("DocumentedOuter")
            .comment("document me")
            .property("f1", "something")
            .property("f2", "something else")
            .property("f3", "on f3")
            .include::<DocumentedInner>()
    }
}

fn documented() -> DocumentedOuter {
    DocumentedOuter {
        f1: "a".to_string(),
        f2: String::new(),
        f3: DocumentedInner {
            f1: "bob".to_string(),
        },
        f4: DocumentedInner {
            f1: "bob".to_string(),
        },
    }
}

#[test]
fn test_documentation() {
    let ini = to_string_documented(&documented()).unwrap();

    assert_eq!(
        ini,
        "#document me\n\
         #something\n\
         f1 = a\n\
         #something else\n\
         f2 = \n\
         \n\
         #on f3\n\
         [f3]\n\
         #on getter\n\
         f1 = bob\n\
         \n\
         #inner class\n\
         [f4]\n\
         #on getter\n\
         f1 = bob\n"
    );

    // comments are ignored on the way back
    let back: DocumentedOuter = from_str(&ini).unwrap();
    assert_eq!(back, documented());
}

#[test]
fn test_documentation_with_dialect() {
    let docs = Documentation::of::<DocumentedOuter>();
    let dialect = Dialect::compact().with_comment_marker(CommentMarker::Semicolon);
    let ini = to_string_with_options(&documented(), &docs, &dialect).unwrap();

    assert!(ini.starts_with(";document me\n;something\nf1 = a\n"));
    assert!(ini.contains("f2 = \n;on f3\n[f3]\n"));
}

#[test]
fn test_undocumented_types_write_no_comments() {
    let ini = to_string(&documented()).unwrap();
    assert!(!ini.contains('#'));
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Counter {
    count: u32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Settings {
    port: Option<u16>,
    env: Option<BTreeMap<String, String>>,
    counter: Option<Counter>,
}

#[test]
fn test_cardinality_enforcement() {
    let result: Result<Settings, Error> = from_str("port = 80\nport = 81\n");
    match result {
        Err(Error::ShapeMismatch {
            property, found, ..
        }) => {
            assert_eq!(property, "port");
            assert_eq!(found, "2 values");
        }
        other => panic!("expected a shape mismatch, got {:?}", other),
    }

    let result: Result<Settings, Error> = from_str("[env]\nA = 1\n[env]\nB = 2\n");
    assert!(matches!(result, Err(Error::ShapeMismatch { .. })));

    let result: Result<Settings, Error> = from_str("[counter]\ncount = 1\n[counter]\ncount = 2\n");
    assert!(matches!(result, Err(Error::ShapeMismatch { .. })));
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Tagged {
    tags: Option<Vec<String>>,
    labels: BTreeSet<String>,
}

#[test]
fn test_empty_vs_absent() {
    let empty = Tagged {
        tags: Some(vec![]),
        labels: BTreeSet::new(),
    };
    let ini = to_string(&empty).unwrap();
    assert_eq!(ini, "tag\nlabel\n");
    assert_eq!(from_str::<Tagged>(&ini).unwrap(), empty);

    let absent = Tagged {
        tags: None,
        labels: BTreeSet::new(),
    };
    let ini = to_string(&absent).unwrap();
    assert_eq!(ini, "label\n");
    assert_eq!(from_str::<Tagged>(&ini).unwrap(), absent);
}

#[test]
fn test_empty_string_is_not_absent() {
    let settings: Inner = from_str("f1 = \n").unwrap();
    assert_eq!(settings.f1, Some(String::new()));

    let settings: Inner = from_str("").unwrap();
    assert_eq!(settings.f1, None);
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Dog {
    name: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Kennel {
    dogs: Vec<Dog>,
}

#[derive(Deserialize, Debug, PartialEq)]
struct SingleDog {
    dog: Option<Dog>,
}

#[test]
fn test_section_name_reconciliation() {
    let kennel: Kennel = from_str("[dog]\nname = rex\n\n[dog]\nname = fido\n").unwrap();
    assert_eq!(
        kennel.dogs,
        vec![
            Dog {
                name: "rex".to_string()
            },
            Dog {
                name: "fido".to_string()
            }
        ]
    );

    // the exact name also works
    let kennel: Kennel = from_str("[dogs]\nname = rex\n").unwrap();
    assert_eq!(kennel.dogs.len(), 1);

    // `dogs` is not a singular or plural form of `dog`
    let result: Result<SingleDog, Error> = from_str("[dogs]\nname = rex\n");
    assert!(matches!(result, Err(Error::UnmappedSection { section }) if section == "dogs"));

    let single: SingleDog = from_str("[dog]\nname = rex\n").unwrap();
    assert_eq!(single.dog.map(|d| d.name), Some("rex".to_string()));
}

#[test]
fn test_absent_text() {
    assert_eq!(from_optional_str::<Kennel>(None).unwrap(), None);
    assert_eq!(
        from_optional_str::<Kennel>(Some("dog\n")).unwrap(),
        Some(Kennel { dogs: vec![] })
    );
}

#[test]
fn test_unsupported_structures() {
    #[derive(Serialize)]
    struct MapOfStructs {
        dogs: BTreeMap<String, Dog>,
    }

    let mut dogs = BTreeMap::new();
    dogs.insert(
        "rex".to_string(),
        Dog {
            name: "rex".to_string(),
        },
    );
    assert!(matches!(
        to_string(&MapOfStructs { dogs }),
        Err(Error::UnsupportedStructure(_))
    ));

    #[derive(Deserialize, Debug)]
    struct ReadMapOfStructs {
        #[allow(dead_code)]
        dogs: BTreeMap<String, Dog>,
    }

    assert!(matches!(
        from_str::<ReadMapOfStructs>("[dogs]\nrex = x\n"),
        Err(Error::UnsupportedStructure(_))
    ));

    #[derive(Serialize)]
    struct Nested {
        kennel: Kennel,
    }

    let nested = Nested {
        kennel: Kennel { dogs: vec![] },
    };
    // an empty list nested in a section is a plain key
    assert!(to_string(&nested).is_ok());

    let nested = Nested {
        kennel: Kennel {
            dogs: vec![Dog {
                name: "rex".to_string(),
            }],
        },
    };
    assert!(matches!(
        to_string(&nested),
        Err(Error::UnsupportedStructure(_))
    ));

    #[derive(Serialize)]
    struct ListOfLists {
        grid: Vec<Vec<u8>>,
    }

    assert!(matches!(
        to_string(&ListOfLists {
            grid: vec![vec![1]]
        }),
        Err(Error::UnsupportedStructure(_))
    ));
}

#[test]
fn test_data_carrying_variants() {
    #[derive(Serialize)]
    enum Shape {
        Circle(f64),
    }

    #[derive(Serialize)]
    struct Drawing {
        shape: Shape,
    }

    assert!(matches!(
        to_string(&Drawing {
            shape: Shape::Circle(1.0)
        }),
        Err(Error::UnrecognizedPropertyKind(_))
    ));

    #[derive(Serialize)]
    struct Unit {
        u: (),
        n: i32,
    }

    assert!(matches!(
        to_string(&Unit { u: (), n: 1 }),
        Err(Error::UnrecognizedPropertyKind(_))
    ));
}

#[test]
fn test_names_ending_in_s() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Statuses {
        statuses: Vec<String>,
        aliases: Vec<String>,
        buses: Vec<Dog>,
        gas: String,
    }

    let statuses = Statuses {
        statuses: vec!["ok".to_string()],
        aliases: vec!["a".to_string(), "b".to_string()],
        buses: vec![Dog {
            name: "rex".to_string(),
        }],
        gas: "argon".to_string(),
    };

    let ini = to_string(&statuses).unwrap();
    assert_eq!(
        ini,
        "status = ok\nalias = a\nalias = b\ngas = argon\n\n[bus]\nname = rex\n"
    );
    assert_eq!(from_str::<Statuses>(&ini).unwrap(), statuses);
}

#[test]
fn test_ambiguous_empty_element_reads_as_none() {
    let original = vec![
        Some(Inner { f1: None }),
        Some(Inner {
            f1: Some("x".to_string()),
        }),
    ];

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Holder {
        items: Vec<Option<Inner>>,
    }

    let ini = to_string(&Holder {
        items: original.clone(),
    })
    .unwrap();
    assert_eq!(ini, "[item]\n\n[item]\nf1 = x\n");

    let back: Holder = from_str(&ini).unwrap();
    assert_eq!(back.items[0], None);
    assert_eq!(back.items[1], original[1]);
}

#[test]
fn test_to_document() {
    let doc = to_document(&everything(), &Documentation::new()).unwrap();
    assert_eq!(doc.get_all("f9").len(), 4);
    assert_eq!(doc.global().get_all("f7").map(<[String]>::len), Some(5));
    assert_eq!(doc.to_string(), to_string(&everything()).unwrap());
}
