use super::RenderProps;
use crate::options::OptionReader;
use crate::query::Queries;
use crate::vdom::VNode;
use codex_parser::{ParseNode, ParseResult};

const ABILITIES: [&str; 6] = ["str", "dex", "con", "int", "wis", "cha"];

pub fn validate(node: &ParseNode) -> ParseResult<Queries> {
    let options = OptionReader::new(node);
    options.required("value")?;
    options.int_at_least("value", 0)?;
    options.one_of("type", &ABILITIES)?;
    Ok(Queries::new())
}

pub fn render(props: RenderProps<'_>) -> ParseResult<Option<VNode>> {
    let options = props.options();
    options.required("value")?;
    let dc = options.int_at_least("value", 0)?.unwrap_or(0);
    let ability = options.one_of("type", &ABILITIES)?;

    let mut text = format!("DC {}", dc);
    let mut node = VNode::element("span").with_class("save");
    if let Some(ability) = ability {
        text.push(' ');
        text.push_str(&ability.to_uppercase());
        node = node.with_attr("data-type", ability);
    }
    if let Some(tooltip) = options.str("tooltip") {
        node = node.with_attr("title", tooltip);
    }

    Ok(Some(node.with_child(VNode::text(text))))
}
