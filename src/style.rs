//! Inline `style` attribute handling.
//!
//! Regions are positioned by rewriting single declarations of their inline
//! style, so the attribute is parsed into an ordered declaration list with
//! cssparser and serialized back after each edit.

use std::fmt;

use cssparser::{
    AtRuleParser, DeclarationParser, ParseError, Parser, ParserInput, QualifiedRuleParser,
    RuleBodyItemParser, RuleBodyParser, Token,
};

/// An ordered list of `property: value` declarations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InlineStyle {
    declarations: Vec<(String, String)>,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a style attribute. Malformed declarations are skipped.
    pub fn parse(css: &str) -> Self {
        let mut input = ParserInput::new(css);
        let mut parser = Parser::new(&mut input);
        let mut declarations = Vec::new();

        let mut decl_parser = InlineDeclarationParser {
            declarations: &mut declarations,
        };
        for result in RuleBodyParser::new(&mut parser, &mut decl_parser) {
            // Lenient like browsers
            let _ = result;
        }

        Self { declarations }
    }

    /// Set a declaration, replacing an existing one in place.
    pub fn set(&mut self, property: &str, value: impl Into<String>) {
        let property = property.to_ascii_lowercase();
        let value = value.into();
        match self.declarations.iter_mut().find(|(p, _)| *p == property) {
            Some(existing) => existing.1 = value,
            None => self.declarations.push((property, value)),
        }
    }

    /// Set a pixel length.
    pub fn set_px(&mut self, property: &str, value: f64) {
        self.set(property, px(value));
    }

    pub fn remove(&mut self, property: &str) -> Option<String> {
        let index = self
            .declarations
            .iter()
            .position(|(p, _)| p.eq_ignore_ascii_case(property))?;
        Some(self.declarations.remove(index).1)
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(p, _)| p.eq_ignore_ascii_case(property))
            .map(|(_, v)| v.as_str())
    }

    /// Read a declaration as a pixel length. Unitless zero counts as `0px`.
    pub fn px(&self, property: &str) -> Option<f64> {
        parse_px(self.get(property)?)
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations
            .iter()
            .map(|(p, v)| (p.as_str(), v.as_str()))
    }
}

impl fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (property, value)) in self.declarations.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{property}: {value};")?;
        }
        Ok(())
    }
}

/// Format a pixel value the way browsers serialize lengths (`95px`, `52.5px`).
pub fn px(value: f64) -> String {
    format!("{value}px")
}

/// Parse a single pixel length such as `12px`, `-3.5px` or `0`.
pub fn parse_px(value: &str) -> Option<f64> {
    let mut input = ParserInput::new(value);
    let mut parser = Parser::new(&mut input);
    let length = match parser.next().ok()? {
        Token::Dimension { value, unit, .. } if unit.eq_ignore_ascii_case("px") => *value,
        Token::Number { value, .. } if *value == 0.0 => 0.0,
        _ => return None,
    };
    parser.expect_exhausted().ok()?;
    Some(f64::from(length))
}

/// Style of the mask region: a spotlight whose box-shadow dims everything
/// outside it.
pub fn mask_style(mask_color: &str, animate: bool) -> InlineStyle {
    let mut style = InlineStyle::new();
    style.set("position", "absolute");
    style.set("z-index", "99998");
    style.set("border-radius", "4px");
    style.set("box-shadow", format!("0 0 0 9999px {mask_color}"));
    set_transition(&mut style, animate);
    style
}

/// Style of the panel region.
pub fn panel_style(animate: bool) -> InlineStyle {
    let mut style = InlineStyle::new();
    style.set("position", "absolute");
    style.set("z-index", "100000");
    set_transition(&mut style, animate);
    style
}

/// Style of the transparent layer catching dismiss clicks.
pub fn layer_style() -> InlineStyle {
    let mut style = InlineStyle::new();
    style.set("position", "fixed");
    style.set("top", "0");
    style.set("right", "0");
    style.set("bottom", "0");
    style.set("left", "0");
    style.set("z-index", "99999");
    style.set("cursor", "pointer");
    style
}

/// Add or drop the position transition.
pub fn set_transition(style: &mut InlineStyle, animate: bool) {
    if animate {
        style.set("transition", "all .3s");
    } else {
        style.remove("transition");
    }
}

struct InlineDeclarationParser<'a> {
    declarations: &'a mut Vec<(String, String)>,
}

impl<'i> AtRuleParser<'i> for InlineDeclarationParser<'_> {
    type Prelude = ();
    type AtRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        _name: cssparser::CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Err(input.new_custom_error(()))
    }

    fn parse_block<'t>(
        &mut self,
        _prelude: Self::Prelude,
        _start: &cssparser::ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::AtRule, ParseError<'i, Self::Error>> {
        Err(input.new_custom_error(()))
    }
}

impl<'i> QualifiedRuleParser<'i> for InlineDeclarationParser<'_> {
    type Prelude = ();
    type QualifiedRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Err(input.new_custom_error(()))
    }

    fn parse_block<'t>(
        &mut self,
        _prelude: Self::Prelude,
        _start: &cssparser::ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        Err(input.new_custom_error(()))
    }
}

impl<'i> DeclarationParser<'i> for InlineDeclarationParser<'_> {
    type Declaration = ();
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: cssparser::CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
        _start: &cssparser::ParserState,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let start = input.position();
        while input.next().is_ok() {}
        let value = input.slice_from(start).trim();
        if value.is_empty() {
            return Err(input.new_custom_error(()));
        }

        let property = name.to_ascii_lowercase();
        match self.declarations.iter_mut().find(|(p, _)| *p == property) {
            Some(existing) => existing.1 = value.to_string(),
            None => self.declarations.push((property, value.to_string())),
        }
        Ok(())
    }
}

impl<'i> RuleBodyItemParser<'i, (), ()> for InlineDeclarationParser<'_> {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        false
    }
}
