use super::RenderProps;
use crate::options::OptionReader;
use crate::query::Queries;
use crate::vdom::VNode;
use codex_parser::{ParseNode, ParseResult};

const MODES: [&str; 2] = ["dice", "mod"];
const ROLL_TYPES: [&str; 4] = ["general", "attack", "damage", "save"];

const DEFAULT_DICE: i64 = 20;
const DEFAULT_CRIT_RANGE: i64 = 20;

/// Whether a roll shows its dice or only the modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollMode {
    Dice,
    Mod,
}

/// A validated `\roll`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roll {
    pub dice: i64,
    pub num: i64,
    pub modifier: i64,
    pub mode: RollMode,
    pub roll_type: String,
    pub crit_range: i64,
    pub desc: Option<String>,
}

impl Roll {
    pub fn from_node(node: &ParseNode) -> ParseResult<Self> {
        let options = OptionReader::new(node);
        let dice = options.int_at_least("dice", 1)?;
        let num = options.int_at_least("num", 1)?;
        let modifier = options.int("mod")?.unwrap_or(0);

        // without an explicit mode, a roll with no dice is a bare modifier
        let mode = match options.one_of("mode", &MODES)? {
            Some("dice") => RollMode::Dice,
            Some(_) => RollMode::Mod,
            None if dice.is_some() || num.is_some() => RollMode::Dice,
            None => RollMode::Mod,
        };

        Ok(Self {
            dice: dice.unwrap_or(DEFAULT_DICE),
            num: num.unwrap_or(1),
            modifier,
            mode,
            roll_type: options
                .one_of("type", &ROLL_TYPES)?
                .unwrap_or("general")
                .to_string(),
            crit_range: options
                .int_at_least("critRange", 1)?
                .unwrap_or(DEFAULT_CRIT_RANGE),
            desc: options.str("desc").map(str::to_string),
        })
    }

    /// Human-readable roll, e.g. `2d6 + 3 ` or `+3`
    pub fn text(&self) -> String {
        match self.mode {
            RollMode::Dice => {
                let mut text = format!("{}d{} ", self.num, self.dice);
                if self.modifier > 0 {
                    text.push_str(&format!("+ {} ", self.modifier));
                } else if self.modifier < 0 {
                    text.push_str(&format!("- {} ", self.modifier.unsigned_abs()));
                }
                text
            }
            RollMode::Mod => format!("{:+}", self.modifier),
        }
    }
}

pub fn validate(node: &ParseNode) -> ParseResult<Queries> {
    Roll::from_node(node)?;
    Ok(Queries::new())
}

pub fn render(props: RenderProps<'_>) -> ParseResult<Option<VNode>> {
    let roll = Roll::from_node(props.node)?;

    let mut node = VNode::element("span")
        .with_class("roll")
        .with_class(format!("roll-{}", roll.roll_type))
        .with_attr("data-dice", roll.dice.to_string())
        .with_attr("data-num", roll.num.to_string())
        .with_attr("data-mod", roll.modifier.to_string())
        .with_attr("data-crit-range", roll.crit_range.to_string())
        .with_attr(
            "data-mode",
            match roll.mode {
                RollMode::Dice => "dice",
                RollMode::Mod => "mod",
            },
        );
    if let Some(desc) = &roll.desc {
        node = node.with_attr("title", desc.clone());
    }

    Ok(Some(node.with_child(VNode::text(roll.text()))))
}
