#![allow(clippy::panic_in_result_fn)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::indexing_slicing)]

use proptest::collection::vec;
use proptest::prelude::*;
use twiml::buffer::Fragment;
use twiml::names::{camel_case, pascal_case};
use twiml::{build, Attributes, Builder, Result as TwimlResult, Verb};

/// A randomly shaped composition
#[derive(Debug, Clone)]
enum Node {
    Text(String),
    Leaf(String),
    Scope(String, Vec<Node>),
}

fn ident_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,6}(_[a-z]{1,6}){0,2}"
}

fn text_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ,.]{1,20}"
}

fn node_strategy() -> impl Strategy<Value = Node> {
    let leaf = prop_oneof![
        text_strategy().prop_map(Node::Text),
        ident_strategy().prop_map(Node::Leaf),
    ];
    leaf.prop_recursive(5, 48, 4, |inner| {
        (ident_strategy(), vec(inner, 0..4)).prop_map(|(tag, children)| Node::Scope(tag, children))
    })
}

fn compose(b: &mut Builder, nodes: &[Node]) -> TwimlResult<()> {
    for node in nodes {
        match node {
            Node::Text(text) => b.text(text),
            Node::Leaf(tag) => b.leaf(tag, Attributes::new())?,
            Node::Scope(tag, children) => b.tag(tag, Attributes::new(), |b| compose(b, children))?,
        }
    }
    Ok(())
}

/// Tag names in open/close order, leaving out self-closing tags and text
fn tag_events(fragments: &[Fragment]) -> Vec<(bool, String)> {
    fragments
        .iter()
        .map(Fragment::as_str)
        .filter(|f| f.starts_with('<') && !f.starts_with("<?") && !f.ends_with("/>"))
        .map(|f| {
            let closing = f.starts_with("</");
            let name = f
                .trim_start_matches("</")
                .trim_start_matches('<')
                .trim_end_matches('>')
                .split(' ')
                .next()
                .unwrap_or_default()
                .to_string();
            (closing, name)
        })
        .collect()
}

proptest! {
    #[test]
    fn test_nesting_is_balanced(nodes in vec(node_strategy(), 0..6)) {
        let mut fragments = Vec::new();
        build(|b| {
            compose(b, &nodes)?;
            fragments = b.fragments().to_vec();
            Ok(())
        }).unwrap();

        let mut stack = Vec::new();
        for (closing, name) in tag_events(&fragments) {
            if closing {
                prop_assert_eq!(stack.pop(), Some(name));
            } else {
                stack.push(name);
            }
        }
        // only the root is still open at the snapshot
        prop_assert_eq!(stack, vec!["Response".to_string()]);
    }

    #[test]
    fn test_attribute_order_matches_insertion(keys in vec(ident_strategy(), 1..8)) {
        let mut attrs = Attributes::new();
        let mut expected = Vec::new();
        for (i, key) in keys.iter().enumerate() {
            if attrs.insert(key.clone(), i64::try_from(i).unwrap()).is_none() {
                expected.push(camel_case(key).to_string());
            }
        }

        let doc = build(|b| b.verb(Verb::Play, attrs)).unwrap();
        let xml = doc.xml();
        let positions: Vec<usize> = expected
            .iter()
            .map(|key| xml.find(&format!(" {key}=\"")).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_children_stay_between_parent_tags(texts in vec(text_strategy(), 0..10)) {
        let doc = build(|b| {
            b.nest(Verb::Gather, Attributes::new(), |b| {
                for text in &texts {
                    b.verb(Verb::Say, text.as_str())?;
                }
                Ok(())
            })
        }).unwrap();

        let children: String = texts.iter().map(|t| format!("<Say>{t}</Say>")).collect();
        let expected = format!("<Response><Gather>{children}</Gather></Response>");
        prop_assert!(doc.xml().ends_with(&expected));
    }

    #[test]
    fn test_options_pair_with_markup(labels in vec(text_strategy(), 1..12)) {
        let doc = build(|b| {
            for (i, label) in labels.iter().enumerate() {
                b.option(i.to_string(), label, Attributes::new().with("label", label), Attributes::new())?;
            }
            Ok(())
        }).unwrap();

        prop_assert_eq!(doc.options().len(), labels.len());
        let mut cursor = 0;
        for (i, (option, label)) in doc.options().iter().zip(&labels).enumerate() {
            prop_assert_eq!(&option.key, &i.to_string());
            let say = format!("<Say>{label}</Say>");
            let found = doc.xml()[cursor..].find(&say);
            prop_assert!(found.is_some());
            cursor += found.unwrap() + say.len();
        }
    }

    #[test]
    fn test_casing_rules(words in vec("[a-z]{1,8}", 1..5)) {
        let ident = words.join("_");
        let pascal = pascal_case(&ident);
        let camel = camel_case(&ident);

        prop_assert!(!pascal.contains('_'));
        prop_assert!(pascal.starts_with(|c: char| c.is_ascii_uppercase()));
        prop_assert!(camel.starts_with(|c: char| c.is_ascii_lowercase()));
        prop_assert_eq!(pascal.to_lowercase(), camel.to_lowercase());
        prop_assert_eq!(pascal.len(), ident.len() - (words.len() - 1));
    }
}
