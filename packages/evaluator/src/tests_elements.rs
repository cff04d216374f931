/// Element rendering through the synchronous half of the pipeline: parse,
/// validate and build, with query results placed in the metadata by hand.
use crate::builder::ComponentBuilder;
use crate::validator::validate_tree;
use crate::vdom::VNode;
use codex_common::{DocumentRecord, DocumentType, Metadata};
use codex_parser::{ParseError, ParseResult};

const KEY: &str = "description";
const GOBLIN: &str = "5f2b9c1e8a4d3b2c1a0f9e8d";
const FIREBALL: &str = "64a1c2d3e4f5a6b7c8d9e0f1";

fn render_with(source: &str, metadata: &mut Metadata) -> ParseResult<VNode> {
    let mut root = codex_parser::parse(source, KEY, metadata)?;
    validate_tree(&mut root)?;
    let built = ComponentBuilder::new(metadata, KEY).build(&root, None)?;
    Ok(built.expect("root always renders"))
}

fn render(source: &str) -> ParseResult<VNode> {
    render_with(source, &mut Metadata::new())
}

/// The single element the markup renders to, below the root wrapper
fn render_one(source: &str) -> VNode {
    let root = render(source).expect("Failed to render");
    assert_eq!(root.children().len(), 1, "expected one element in {:?}", root);
    root.children()[0].clone()
}

fn with_goblin() -> Metadata {
    let mut metadata = Metadata::new();
    metadata.queries.insert(
        GOBLIN.to_string(),
        DocumentRecord::new(GOBLIN, DocumentType::Creature)
            .with_field("name", "Goblin")
            .with_field("size", "Small")
            .with_field("challenge", 0.25)
            .with_field("description", "The $name cackles."),
    );
    metadata
}

#[test]
fn test_hello_world() {
    let mut metadata = Metadata::new().with_variable(KEY, "name", "World");
    let root = render_with("\\bold{Hello $name}", &mut metadata).unwrap();

    assert_eq!(root.tag(), Some("div"));
    assert!(root.has_class("markup"));
    let bold = &root.children()[0];
    assert_eq!(bold.tag(), Some("strong"));
    assert_eq!(bold.text_content(), "Hello World");
}

#[test]
fn test_set_renders_nothing() {
    let root = render("\\set{hp}{7}HP: $hp").unwrap();
    assert_eq!(root.children(), &[VNode::text("HP: 7")]);
}

#[test]
fn test_set_value_is_not_parsed() {
    let mut metadata = Metadata::new();
    let root = render_with("\\set{x}{a {b} c} shown", &mut metadata).unwrap();
    assert_eq!(root.children(), &[VNode::text(" shown")]);
    assert_eq!(metadata.resolve_variable(KEY, "x"), Some("a {b} c".to_string()));

    let root = render("\\set{path}{C:\\Users\\me} done").unwrap();
    assert_eq!(root.text_content(), " done");
}

#[test]
fn test_second_body_is_rejected() {
    assert_eq!(render("\\bold{a}{b}").unwrap_err(), ParseError::UnexpectedContentStart);
}

#[test]
fn test_roll_text() {
    let roll = render_one("\\roll[dice:6,num:2,mod:3]");
    assert!(roll.has_class("roll"));
    assert!(roll.has_class("roll-general"));
    assert_eq!(roll.text_content(), "2d6 + 3 ");
    assert_eq!(roll.attr("data-crit-range"), Some("20"));
}

#[test]
fn test_roll_default_key_and_modifier_mode() {
    assert_eq!(render_one("\\roll[12]").text_content(), "1d12 ");
    assert_eq!(render_one("\\roll[mod:-2,type:attack]").text_content(), "-2");
    assert!(render_one("\\roll[mod:4,type:attack]").has_class("roll-attack"));
}

#[test]
fn test_roll_description_becomes_title() {
    let roll = render_one("\\roll[8,desc:Greataxe]");
    assert_eq!(roll.attr("title"), Some("Greataxe"));
}

#[test]
fn test_option_errors() {
    assert_eq!(
        render("\\roll[sides:6]").unwrap_err(),
        ParseError::invalid_option_key("roll", "sides")
    );
    assert!(matches!(
        render("\\roll[6,dice:8]").unwrap_err(),
        ParseError::DuplicateOption { .. }
    ));
    assert!(matches!(
        render("\\row[tight]{x}").unwrap_err(),
        ParseError::MissingDefaultKey { .. }
    ));
    assert_eq!(
        render("\\header[5]{Too small}").unwrap_err().to_string(),
        "Invalid value '5' for option 'size' of element 'header': must be between 1 and 4"
    );
    assert_eq!(
        render("\\save[type:dex]").unwrap_err(),
        ParseError::missing_option("save", "value")
    );
}

#[test]
fn test_header_uses_alias_and_size() {
    let header = render_one("\\h[2]{Actions}");
    assert_eq!(header.tag(), Some("h2"));
    assert_eq!(header.text_content(), "Actions");
    assert_eq!(render_one("\\header{Traits}").tag(), Some("h1"));
}

#[test]
fn test_align_directions() {
    let align = render_one("\\align[hc]{x}");
    assert_eq!(align.style("flex-direction"), Some("row"));
    assert_eq!(align.style("justify-content"), Some("center"));

    let align = render_one("\\align[vh,weight:2]{x}");
    assert_eq!(align.style("flex-direction"), Some("column"));
    assert_eq!(align.style("flex-wrap"), Some("wrap"));
    assert_eq!(align.style("flex"), Some("2"));

    for bad in ["\\align[hh]{x}", "\\align[hx]{x}", "\\align[direction:]{x}"] {
        assert!(
            matches!(render(bad), Err(ParseError::InvalidOptionValue { .. })),
            "{} should be rejected",
            bad
        );
    }
}

#[test]
fn test_layout_elements() {
    let boxed = render_one("\\box{x}");
    assert_eq!(boxed.style("border"), Some("1px solid currentColor"));
    assert_eq!(render_one("\\box[false]{x}").style("border"), None);

    assert_eq!(render_one("\\line[3]").style("border-top-width"), Some("3px"));
    assert!(render("\\line[0]").is_err());

    let margin = render_one("\\margin[4,left:0.5]{x}");
    assert_eq!(margin.style("margin"), Some("4px"));
    assert_eq!(margin.style("margin-left"), Some("0.5px"));
    assert!(render("\\margin[-1]{x}").is_err());

    assert!(render_one("\\block{x}").has_class("block"));
    assert_eq!(render_one("\\row{x}").style("flex-direction"), Some("row"));
}

#[test]
fn test_media_elements() {
    let icon = render_one("\\icon[crossed-swords,size:1.5,tooltip:Melee]");
    assert!(icon.has_class("icon-crossed-swords"));
    assert_eq!(icon.style("font-size"), Some("1.5em"));
    assert_eq!(icon.attr("title"), Some("Melee"));
    assert!(render("\\icon[two words]").is_err());

    let image = render_one("\\image[href:/maps/cave.png,width:320,border:true]");
    assert_eq!(image.tag(), Some("img"));
    assert_eq!(image.attr("src"), Some("/maps/cave.png"));
    assert_eq!(image.style("width"), Some("320px"));
    assert!(image.style("border").is_some());
    assert!(render("\\image[href:/a.png,height:0]").is_err());
}

#[test]
fn test_save_text() {
    let save = render_one("\\save[15,type:dex,tooltip:Half on success]");
    assert_eq!(save.text_content(), "DC 15 DEX");
    assert_eq!(save.attr("title"), Some("Half on success"));
    assert!(render("\\save[15,type:luck]").is_err());
}

#[test]
fn test_link() {
    let link = render_one("\\link[href:https://example.com,newTab:true]{rules}");
    assert_eq!(link.tag(), Some("a"));
    assert_eq!(link.attr("href"), Some("https://example.com"));
    assert_eq!(link.attr("target"), Some("_blank"));
    assert_eq!(link.text_content(), "rules");
}

#[test]
fn test_table_layout() {
    let table = render_one("\\table[columns:2]{\\th{Name}\\th{HP}\\td{Goblin}\\td{7}\\td{Orc}\\td[2]{15}}");
    assert_eq!(table.tag(), Some("table"));

    let head = &table.children()[0];
    assert_eq!(head.tag(), Some("thead"));
    assert_eq!(head.children()[0].children().len(), 2);

    let body = &table.children()[1];
    assert_eq!(body.children().len(), 2);
    assert_eq!(body.children()[1].text_content(), "Orc15");
    assert_eq!(body.children()[1].children()[1].attr("colspan"), Some("2"));
}

#[test]
fn test_table_columns_default_to_header_count() {
    let table = render_one("\\table{\\th{A}\\th{B}\\th{C} \\td{1}\\td{2}\\td{3}\\td{4}}");
    let body = &table.children()[1];
    assert_eq!(body.children().len(), 2);
    assert_eq!(body.children()[0].children().len(), 3);
    assert_eq!(body.children()[1].children().len(), 1);
}

#[test]
fn test_table_rejects_bold() {
    let err = render("\\table{ \\bold{x} }").unwrap_err();
    assert_eq!(
        err,
        ParseError::InvalidTableContent {
            found: "bold".to_string()
        }
    );
    assert!(err.to_string().contains("bold"));
}

#[test]
fn test_cell_outside_table() {
    assert!(matches!(
        render("\\td{lost}").unwrap_err(),
        ParseError::MisplacedElement { element, parent } if element == "tableCell" && parent == "root"
    ));
}

#[test]
fn test_toggle_defers_both_faces() {
    let toggle = render_one("\\set{short}{Bites.}\\set{long}{\\bold{Bite.} \\roll[6]}\\toggle[short,alt:long]");
    assert!(toggle.has_class("toggle"));
    assert_eq!(toggle.attr("data-state"), Some("content"));
    assert_eq!(
        toggle.children(),
        &[
            VNode::deferred("Bites.", KEY),
            VNode::deferred("\\bold{Bite.} \\roll[6]", KEY),
        ]
    );
}

#[test]
fn test_toggle_requires_content_and_bound_variables() {
    assert_eq!(
        render("\\toggle[alt:x]").unwrap_err(),
        ParseError::missing_option("toggle", "content")
    );
    assert_eq!(render("\\toggle[nowhere]").unwrap_err(), ParseError::unset_variable("nowhere"));
}

#[test]
fn test_link_title_uses_record_name() {
    let mut metadata = with_goblin();
    let root = render_with(&format!("\\linkTitle[{}]", GOBLIN), &mut metadata).unwrap();
    let anchor = &root.children()[0];
    assert!(anchor.has_class("link-title"));
    assert_eq!(anchor.attr("href"), Some(format!("/document/{}", GOBLIN).as_str()));
    assert_eq!(anchor.text_content(), "Goblin");
}

#[test]
fn test_link_content_renders_creature_summary() {
    let mut metadata = with_goblin();
    let root = render_with(&format!("\\linkContent[{},border:true]", GOBLIN), &mut metadata).unwrap();
    let content = &root.children()[0];

    assert!(content.has_class("link-content-creature"));
    assert!(content.style("border").is_some());
    assert!(content.text_content().contains("Size: Small"));
    assert!(content.text_content().contains("Challenge: 0.25"));

    let description = content
        .find(&|n| matches!(n, VNode::Deferred { .. }))
        .expect("description should be deferred");
    assert_eq!(
        description,
        &VNode::deferred("The $name cackles.", format!("{}.description", GOBLIN)).with_document(GOBLIN)
    );
}

#[test]
fn test_unresolvable_link_content_renders_placeholder() {
    let root = render(&format!("\\linkContent[{}]", FIREBALL)).unwrap();
    let placeholder = &root.children()[0];
    assert!(placeholder.has_class("link-error"));
    assert_eq!(placeholder.attr("data-file-id"), Some(FIREBALL));
    assert!(!placeholder.is_error());
}

#[test]
fn test_link_content_with_unknown_document_type() {
    let mut metadata = Metadata::new();
    let mut record = DocumentRecord::new(FIREBALL, DocumentType::Spell);
    record.doc_type = "scroll".to_string();
    metadata.queries.insert(FIREBALL.to_string(), record);

    let root = render_with(&format!("\\linkContent[{}]", FIREBALL), &mut metadata).unwrap();
    assert!(root.children()[0].has_class("link-error"));
    assert!(root.text_content().contains("scroll"));
}
