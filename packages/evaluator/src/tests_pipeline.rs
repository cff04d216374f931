/// Async pipeline tests: query resolution, caching, the catch boundary,
/// deferred expansion and stale renders.
use crate::config::ParserConfig;
use crate::error::PipelineError;
use crate::pipeline::{MarkupParser, RenderSlot, GENERIC_ERROR_MESSAGE};
use crate::vdom::VNode;
use codex_common::{DocumentRecord, DocumentType, Metadata, StaticLookup};
use codex_parser::ParseError;
use std::time::Duration;

const KEY: &str = "notes";
const GOBLIN: &str = "5f2b9c1e8a4d3b2c1a0f9e8d";
const WOLF: &str = "5f2b9c1e8a4d3b2c1a0f9e8e";
const MISSING: &str = "000000000000000000000000";

fn goblin() -> DocumentRecord {
    DocumentRecord::new(GOBLIN, DocumentType::Creature)
        .with_field("name", "Goblin")
        .with_field("size", "Small")
        .with_field("description", "The $name cackles. \\roll[6,type:damage]")
}

fn wolf() -> DocumentRecord {
    DocumentRecord::new(WOLF, DocumentType::Creature).with_field("name", "Wolf")
}

fn parser() -> MarkupParser<StaticLookup> {
    MarkupParser::new(StaticLookup::with_records([goblin(), wolf()]))
}

fn error_message(node: Option<VNode>) -> String {
    match node {
        Some(VNode::Error { message }) => message,
        other => panic!("expected an error node, got {:?}", other),
    }
}

#[tokio::test]
async fn test_hello_world() {
    let parser = parser();
    let mut metadata = Metadata::new().with_variable(KEY, "name", "World");

    let node = parser
        .render("\\bold{Hello $name}", KEY, &mut metadata)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(node.children()[0].tag(), Some("strong"));
    assert_eq!(node.text_content(), "Hello World");
    assert_eq!(parser.lookup().calls(), 0);
}

#[tokio::test]
async fn test_queries_fetched_once_in_one_batch() {
    let parser = parser();
    let mut metadata = Metadata::new();
    let source = format!(
        "\\linkTitle[{g}] and \\linkContent[{g}] meet \\linkTitle[{w}]",
        g = GOBLIN,
        w = WOLF
    );

    let node = parser.render(&source, KEY, &mut metadata).await.unwrap().unwrap();

    assert_eq!(parser.lookup().calls(), 1);
    assert_eq!(
        parser.lookup().requests(),
        vec![vec![GOBLIN.to_string(), WOLF.to_string()]]
    );
    assert!(node.text_content().contains("Wolf"));
    assert_eq!(metadata.query(GOBLIN), Some(&goblin()));
}

#[tokio::test]
async fn test_cache_is_shared_across_parses() {
    let parser = parser();
    let source = format!("\\linkTitle[{}]", GOBLIN);

    for _ in 0..2 {
        let mut metadata = Metadata::new();
        let node = parser.render(&source, KEY, &mut metadata).await.unwrap().unwrap();
        assert_eq!(node.text_content(), "Goblin");
    }

    assert_eq!(parser.lookup().calls(), 1);
    assert_eq!(parser.cache().len().await, 1);
}

#[tokio::test]
async fn test_missing_documents_are_negatively_cached() {
    let parser = parser();
    let source = format!("\\linkContent[{}]", MISSING);

    for _ in 0..2 {
        let node = parser
            .render(&source, KEY, &mut Metadata::new())
            .await
            .unwrap()
            .unwrap();
        assert!(node.children()[0].has_class("link-error"));
    }
    assert_eq!(parser.lookup().calls(), 1);
}

#[tokio::test]
async fn test_malformed_ids_are_never_fetched() {
    let parser = parser();
    let node = parser
        .render("\\linkTitle[goblin]", KEY, &mut Metadata::new())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(parser.lookup().calls(), 0);
    assert!(node.children()[0].has_class("link-error"));
}

#[tokio::test(start_paused = true)]
async fn test_cache_entries_go_stale_after_ttl() {
    let config = ParserConfig {
        cache_ttl_secs: Some(60),
        ..ParserConfig::default()
    };
    let parser = MarkupParser::with_config(StaticLookup::with_records([goblin()]), config);
    let source = format!("\\linkTitle[{}]", GOBLIN);

    parser.render(&source, KEY, &mut Metadata::new()).await.unwrap();
    tokio::time::advance(Duration::from_secs(30)).await;
    parser.render(&source, KEY, &mut Metadata::new()).await.unwrap();
    assert_eq!(parser.lookup().calls(), 1);

    tokio::time::advance(Duration::from_secs(31)).await;
    parser.render(&source, KEY, &mut Metadata::new()).await.unwrap();
    assert_eq!(parser.lookup().calls(), 2);
}

#[tokio::test]
async fn test_invalidate_forces_refetch() {
    let parser = parser();
    let source = format!("\\linkTitle[{}]", GOBLIN);

    parser.render(&source, KEY, &mut Metadata::new()).await.unwrap();
    assert!(parser.cache().invalidate(GOBLIN).await);
    parser.render(&source, KEY, &mut Metadata::new()).await.unwrap();

    assert_eq!(parser.lookup().calls(), 2);
}

#[tokio::test]
async fn test_failure_payload_is_a_parse_error() {
    let parser = MarkupParser::new(StaticLookup::refusing("database offline"));
    let source = format!("\\linkTitle[{}]", GOBLIN);

    let err = parser.parse(&source, KEY, &mut Metadata::new()).await.unwrap_err();
    assert_eq!(
        err.as_parse_error(),
        Some(&ParseError::MetadataFetch {
            ids: vec![GOBLIN.to_string()],
            message: "database offline".to_string(),
        })
    );

    let node = parser.render(&source, KEY, &mut Metadata::new()).await.unwrap();
    assert_eq!(
        error_message(node),
        format!("Failed to fetch metadata for ids [{}]: database offline", GOBLIN)
    );
}

#[tokio::test]
async fn test_parse_errors_render_inline() {
    let parser = parser();
    let node = parser
        .render("\\bold{$undefinedVar}", KEY, &mut Metadata::new())
        .await
        .unwrap();
    assert_eq!(error_message(node), "Unset variable 'undefinedVar'");

    let node = parser
        .render("\\table{ \\bold{x} }", KEY, &mut Metadata::new())
        .await
        .unwrap();
    assert!(error_message(node).contains("'bold'"));

    let node = parser.render("\\sparkle{x}", KEY, &mut Metadata::new()).await.unwrap();
    assert_eq!(error_message(node), "Unknown command 'sparkle'");
}

#[tokio::test]
async fn test_transport_failure_in_production_renders_generic_error() {
    let parser = MarkupParser::new(StaticLookup::broken("connection reset"));
    let source = format!("\\linkTitle[{}]", GOBLIN);

    let node = parser.render(&source, KEY, &mut Metadata::new()).await.unwrap();
    assert_eq!(error_message(node), GENERIC_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_transport_failure_in_dev_mode_is_surfaced() {
    let parser = MarkupParser::with_config(StaticLookup::broken("connection reset"), ParserConfig::dev());
    let source = format!("\\linkTitle[{}]", GOBLIN);

    let err = parser.render(&source, KEY, &mut Metadata::new()).await.unwrap_err();
    assert!(matches!(err, PipelineError::Unexpected(_)));
    assert!(err.to_string().contains("connection reset"));
}

#[tokio::test]
async fn test_expand_toggle_content() {
    let parser = parser();
    let mut metadata = Metadata::new();

    let node = parser
        .render(
            "\\set{hit}{\\roll[dice:6,num:2,mod:3]}\\set{hp}{7}\\toggle[hit,alt:hp]",
            KEY,
            &mut metadata,
        )
        .await
        .unwrap()
        .unwrap();
    let toggle = &node.children()[0];

    let content = parser
        .expand_deferred(&toggle.children()[0], &mut metadata)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(content.text_content(), "2d6 + 3 ");

    let alt = parser
        .expand_deferred(&toggle.children()[1], &mut metadata)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(alt.text_content(), "7");
}

#[tokio::test]
async fn test_expand_linked_description_uses_document_fields() {
    let parser = parser();
    let mut metadata = Metadata::new();
    let node = parser
        .render(&format!("\\linkContent[{}]", GOBLIN), KEY, &mut metadata)
        .await
        .unwrap()
        .unwrap();

    let deferred = node
        .find(&|n| matches!(n, VNode::Deferred { .. }))
        .expect("description should be deferred")
        .clone();
    let description = parser
        .expand_deferred(&deferred, &mut metadata)
        .await
        .unwrap()
        .unwrap();

    assert!(description.text_content().starts_with("The Goblin cackles. 1d6"));
    assert!(description.find(&|n| n.has_class("roll-damage")).is_some());
}

#[tokio::test]
async fn test_expand_passes_through_plain_nodes() {
    let parser = parser();
    let text = VNode::text("already rendered");
    assert_eq!(
        parser.expand_deferred(&text, &mut Metadata::new()).await.unwrap(),
        Some(text)
    );
}

#[tokio::test]
async fn test_render_into_slot() {
    let parser = parser();
    let slot = RenderSlot::new();

    let stale = slot.begin();
    assert!(parser
        .render_into(&slot, "\\bold{fresh}", KEY, &mut Metadata::new())
        .await
        .unwrap());
    assert!(!slot.commit(stale, Some(VNode::text("stale"))));
    assert_eq!(slot.current().map(|n| n.text_content()), Some("fresh".to_string()));
}
