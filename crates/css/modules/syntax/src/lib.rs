//! CSS Syntax Module Level 3 — Parsing stylesheets into a mutable document tree.
//! Spec: <https://www.w3.org/TR/css-syntax-3/>
//!
//! Rules, at-rules (with and without blocks), nested rules and declarations are kept
//! with their raw prelude/value text so later passes can rewrite them textually.
use css_tree::{Document, NodeId, NodeKind, TreeError};
use cssparser::AtRuleParser as CssAtRuleParser;
use cssparser::CowRcStr;
use cssparser::DeclarationParser as CssDeclarationParser;
use cssparser::ParseError;
use cssparser::Parser;
use cssparser::ParserInput;
use cssparser::ParserState;
use cssparser::QualifiedRuleParser as CssQualifiedRuleParser;
use cssparser::RuleBodyItemParser as CssRuleBodyItemParser;
use cssparser::RuleBodyParser as CssRuleBodyParser;
use cssparser::StyleSheetParser;
use cssparser::Token;
use log::{debug, error};

/// Owned parse result, attached to the arena once the whole sheet is read.
#[derive(Clone, Debug, PartialEq, Eq)]
enum ParsedItem {
    Declaration {
        prop: String,
        value: String,
        important: bool,
        line: u32,
    },
    Rule {
        selector: String,
        line: u32,
        body: Vec<ParsedItem>,
    },
    AtRule {
        name: String,
        params: String,
        after_name: String,
        line: u32,
        body: Option<Vec<ParsedItem>>,
    },
    Comment {
        text: String,
        line: u32,
    },
}

/// Parse `!important` at the end of a value, returning (`value_without_important`, `important_flag`).
///
/// Whitespace may follow the `!` and the keyword is ASCII case-insensitive.
fn split_important_tail(value: &str) -> (String, bool) {
    let trimmed = value.trim();
    if let Some((prefix, flag)) = trimmed.rsplit_once('!') {
        if flag.trim_start().eq_ignore_ascii_case("important") {
            return (prefix.trim_end().to_owned(), true);
        }
    }
    (trimmed.to_owned(), false)
}

/// Property names are ASCII case-insensitive, custom properties (`--name`) are not.
fn normalize_property(name: &str) -> String {
    if name.starts_with("--") {
        name.to_owned()
    } else {
        name.to_ascii_lowercase()
    }
}

/// Consume whitespace and comments ahead of the next item, recording the comments.
///
/// The parser is rewound to the first other token so the item parsers see it.
fn take_comments(input: &mut Parser<'_, '_>, out: &mut Vec<ParsedItem>) {
    loop {
        let state = input.state();
        match input.next_including_whitespace_and_comments() {
            Ok(Token::WhiteSpace(_)) => {}
            Ok(Token::Comment(text)) => out.push(ParsedItem::Comment {
                text: (*text).to_owned(),
                line: line_of(&state),
            }),
            _ => {
                input.reset(&state);
                return;
            }
        }
    }
}

/// Consume the rest of `input` and return its raw text.
fn raw_slice<'i>(input: &mut Parser<'i, '_>) -> &'i str {
    let start = input.position();
    while input.next_including_whitespace_and_comments().is_ok() {}
    input.slice_from(start)
}

/// Consume the rest of `input` and return its raw, trimmed text.
fn raw_remainder(input: &mut Parser<'_, '_>) -> String {
    raw_slice(input).trim().to_owned()
}

/// 1-based line of the token that started an item.
fn line_of(state: &ParserState) -> u32 {
    state.source_location().line + 1
}

/// Parser for every kind of item: declarations, qualified rules and at-rules.
struct ItemParser;

impl ItemParser {
    /// Parse a `{}` body that may mix declarations, nested rules and at-rules.
    fn parse_body(&mut self, input: &mut Parser<'_, '_>) -> Vec<ParsedItem> {
        let mut out = Vec::new();
        let mut items = CssRuleBodyParser::new(input, self);
        loop {
            take_comments(items.input, &mut out);
            match items.next() {
                Some(Ok(parsed)) => out.push(parsed),
                Some(Err((err, slice))) => debug!("skipping unparsable item {slice:?}: {err:?}"),
                None => break,
            }
        }
        out
    }
}

impl<'i> CssDeclarationParser<'i> for ItemParser {
    type Declaration = ParsedItem;
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
        declaration_start: &ParserState,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let raw = raw_remainder(input);
        let (value, important) = split_important_tail(&raw);
        Ok(ParsedItem::Declaration {
            prop: normalize_property(&name),
            value,
            important,
            line: line_of(declaration_start),
        })
    }
}

impl<'i> CssAtRuleParser<'i> for ItemParser {
    /// Lowercased name, whitespace after the name, trimmed prelude.
    type Prelude = (String, String, String);
    type AtRule = ParsedItem;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        let raw = raw_slice(input);
        let params = raw.trim_start();
        let after_name = raw.get(..raw.len() - params.len()).unwrap_or_default();
        Ok((
            name.to_ascii_lowercase(),
            after_name.to_owned(),
            params.trim_end().to_owned(),
        ))
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::AtRule, ParseError<'i, Self::Error>> {
        let (name, after_name, params) = prelude;
        Ok(ParsedItem::AtRule {
            name,
            params,
            after_name,
            line: line_of(start),
            body: Some(self.parse_body(input)),
        })
    }

    fn rule_without_block(
        &mut self,
        prelude: Self::Prelude,
        start: &ParserState,
    ) -> Result<Self::AtRule, ()> {
        let (name, after_name, params) = prelude;
        Ok(ParsedItem::AtRule {
            name,
            params,
            after_name,
            line: line_of(start),
            body: None,
        })
    }
}

impl<'i> CssQualifiedRuleParser<'i> for ItemParser {
    type Prelude = String; // raw selector/prelude
    type QualifiedRule = ParsedItem;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Ok(raw_remainder(input))
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        Ok(ParsedItem::Rule {
            selector: prelude,
            line: line_of(start),
            body: self.parse_body(input),
        })
    }
}

impl CssRuleBodyItemParser<'_, ParsedItem, ()> for ItemParser {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        true
    }
}

/// Attach a parsed item (and its body) as the last child of `parent`.
fn attach(doc: &mut Document, parent: NodeId, item: ParsedItem) -> Result<(), TreeError> {
    match item {
        ParsedItem::Declaration {
            prop,
            value,
            important,
            line,
        } => {
            let id = doc.create_at(
                NodeKind::Declaration {
                    prop,
                    value,
                    important,
                },
                Some(line),
            );
            doc.append_child(parent, id)
        }
        ParsedItem::Rule {
            selector,
            line,
            body,
        } => {
            let id = doc.create_at(NodeKind::Rule { selector }, Some(line));
            doc.append_child(parent, id)?;
            body.into_iter()
                .try_for_each(|child| attach(doc, id, child))
        }
        ParsedItem::AtRule {
            name,
            params,
            after_name,
            line,
            body,
        } => {
            let id = doc.create_at(
                NodeKind::AtRule {
                    name,
                    params,
                    after_name,
                    has_block: body.is_some(),
                },
                Some(line),
            );
            doc.append_child(parent, id)?;
            body.into_iter()
                .flatten()
                .try_for_each(|child| attach(doc, id, child))
        }
        ParsedItem::Comment { text, line } => {
            let id = doc.create_at(NodeKind::Comment { text }, Some(line));
            doc.append_child(parent, id)
        }
    }
}

/// Parse a full stylesheet into a [`Document`] using cssparser.
///
/// Items cssparser cannot make sense of are skipped (and logged at debug level),
/// matching how browsers recover from invalid CSS.
pub fn parse_stylesheet(css: &str) -> Document {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut top = ItemParser;
    let mut doc = Document::new();
    let root = doc.root();
    let mut rules = StyleSheetParser::new(&mut parser, &mut top);
    let mut comments = Vec::new();
    loop {
        take_comments(rules.input, &mut comments);
        for comment in comments.drain(..) {
            attach_top_level(&mut doc, root, comment);
        }
        match rules.next() {
            Some(Ok(parsed)) => attach_top_level(&mut doc, root, parsed),
            Some(Err((err, slice))) => debug!("skipping unparsable rule {slice:?}: {err:?}"),
            None => break,
        }
    }
    doc
}

fn attach_top_level(doc: &mut Document, root: NodeId, item: ParsedItem) {
    if let Err(err) = attach(doc, root, item) {
        error!("failed to attach parsed item: {err}");
    }
}
