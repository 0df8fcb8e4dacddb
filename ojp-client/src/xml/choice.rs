//! Decoding of OJP "choice" groups into Rust enums.
//!
//! A choice group is a set of mutually exclusive tags. Candidates are
//! probed in the order they are registered, which mirrors schema precedence
//! at each call site. The first tag found wins; if a later candidate is also
//! present it is ignored (and logged), and if none is present decoding fails
//! with [`DecodeError::SchemaMismatch`]. There is no default variant.

use tracing::debug;

use super::{DecodeError, Element};

/// Where candidate tags are looked for.
#[derive(Debug, Clone, Copy)]
enum Probe {
    /// Among the children of the node.
    Children,
    /// The node's own name is the discriminator.
    Itself,
}

/// An in-progress choice decode.
///
/// # Examples
///
/// ```
/// use ojp_client::xml::{parse_document, Choice};
///
/// #[derive(Debug, PartialEq)]
/// enum Shape {
///     Circle(f64),
///     Square(f64),
/// }
///
/// let node = parse_document(b"<Shape><siri:Square>2.5</siri:Square></Shape>").unwrap();
///
/// let shape = Choice::new(&node, "ShapeChoice")
///     .variant("Circle", |el| Ok(Shape::Circle(el.text().parse().unwrap_or_default())))
///     .variant("Square", |el| Ok(Shape::Square(el.text().parse().unwrap_or_default())))
///     .finish()
///     .unwrap();
///
/// assert_eq!(shape, Shape::Square(2.5));
/// ```
#[must_use = "a choice does nothing until `finish` is called"]
pub struct Choice<'a, T> {
    node: &'a Element,
    context: &'static str,
    probe: Probe,
    matched: Option<(&'static str, Result<T, DecodeError>)>,
}

impl<'a, T> Choice<'a, T> {
    /// Start a choice over the children of `node`.
    ///
    /// `context` names the choice group in error messages.
    pub fn new(node: &'a Element, context: &'static str) -> Self {
        Self {
            node,
            context,
            probe: Probe::Children,
            matched: None,
        }
    }

    /// Start a choice discriminated by the name of `element` itself.
    ///
    /// Used for lists whose items are each one of several element kinds,
    /// e.g. the children of `Situations`.
    pub fn tagged(element: &'a Element, context: &'static str) -> Self {
        Self {
            node: element,
            context,
            probe: Probe::Itself,
            matched: None,
        }
    }

    /// Register a candidate.
    ///
    /// `decode` receives the matching element: the child named `tag`, or the
    /// node itself for [`Choice::tagged`]. It only runs if no earlier
    /// candidate matched.
    pub fn variant<F>(mut self, tag: &'static str, decode: F) -> Self
    where
        F: FnOnce(&'a Element) -> Result<T, DecodeError>,
    {
        let Some(found) = self.find(tag) else {
            return self;
        };

        match &self.matched {
            None => self.matched = Some((tag, decode(found))),
            Some((winner, _)) => {
                debug!(
                    context = self.context,
                    winner = *winner,
                    shadowed = tag,
                    "ambiguous choice, keeping first candidate"
                );
            }
        }
        self
    }

    /// Finish the choice, yielding the decoded variant.
    pub fn finish(self) -> Result<T, DecodeError> {
        match self.matched {
            Some((_, result)) => result,
            None => Err(DecodeError::SchemaMismatch {
                context: self.context,
            }),
        }
    }

    fn find(&self, tag: &str) -> Option<&'a Element> {
        match self.probe {
            Probe::Children => self.node.child(tag),
            Probe::Itself => self.node.is(tag).then_some(self.node),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse_document;

    #[derive(Debug, PartialEq)]
    enum Kind {
        A(String),
        B(String),
    }

    fn decode(xml: &str) -> Result<Kind, DecodeError> {
        let node = parse_document(xml.as_bytes()).unwrap();
        Choice::new(&node, "KindChoice")
            .variant("A", |el| Ok(Kind::A(el.text().to_string())))
            .variant("B", |el| Ok(Kind::B(el.text().to_string())))
            .finish()
    }

    #[test]
    fn picks_present_candidate() {
        assert_eq!(decode("<n><B>b</B></n>").unwrap(), Kind::B("b".into()));
        assert_eq!(decode("<n><x:A>a</x:A></n>").unwrap(), Kind::A("a".into()));
    }

    #[test]
    fn first_registered_wins_when_both_present() {
        // Document order does not matter, registration order does.
        assert_eq!(
            decode("<n><B>b</B><A>a</A></n>").unwrap(),
            Kind::A("a".into())
        );
    }

    #[test]
    fn no_candidate_is_schema_mismatch() {
        let err = decode("<n><C>c</C></n>").unwrap_err();
        assert_eq!(
            err,
            DecodeError::SchemaMismatch {
                context: "KindChoice"
            }
        );
    }

    #[test]
    fn later_decoder_not_run_after_match() {
        let node = parse_document(b"<n><A/><B/></n>").unwrap();
        let result: Result<u8, _> = Choice::new(&node, "Ctx")
            .variant("A", |_| Ok(1))
            .variant("B", |_| panic!("shadowed candidate must not be decoded"))
            .finish();
        assert_eq!(result.unwrap(), 1);
    }

    #[test]
    fn decoder_error_propagates() {
        let node = parse_document(b"<n><A/></n>").unwrap();
        let result: Result<u8, _> = Choice::new(&node, "Ctx")
            .variant("A", |_| {
                Err(DecodeError::InvalidValue {
                    element: "A",
                    value: String::new(),
                })
            })
            .variant("B", |_| Ok(2))
            .finish();
        assert!(matches!(result, Err(DecodeError::InvalidValue { .. })));
    }

    #[test]
    fn tagged_matches_own_name() {
        let node = parse_document(b"<siri:RoadSituation/>").unwrap();
        let result: Result<&str, _> = Choice::tagged(&node, "SituationTypeChoice")
            .variant("PtSituation", |_| Ok("pt"))
            .variant("RoadSituation", |_| Ok("road"))
            .finish();
        assert_eq!(result.unwrap(), "road");

        let node = parse_document(b"<Other/>").unwrap();
        let result: Result<&str, _> = Choice::tagged(&node, "SituationTypeChoice")
            .variant("PtSituation", |_| Ok("pt"))
            .finish();
        assert!(result.unwrap_err().is_schema_mismatch());
    }
}
