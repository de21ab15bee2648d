//! Runtime-registered message types.

use super::MessageKind;
use crate::error::MessageParseError;
use crate::line::ParsedLine;

/// A message type supplied by the application.
///
/// A registered instance acts as a prototype: the factory asks it whether
/// it claims a line, then parses into a fresh instance from [`create`].
/// Custom types are consulted before any built-in family.
///
/// [`create`]: CustomMessage::create
pub trait CustomMessage: MessageKind + Send + Sync {
    /// Whether this type claims the line.
    fn can_parse(&self, line: &ParsedLine) -> bool;

    /// A blank instance to parse into.
    fn create(&self) -> Box<dyn CustomMessage>;

    /// Populate this instance from a claimed line.
    fn parse(&mut self, line: &ParsedLine) -> Result<(), MessageParseError>;

    /// Clone behind the trait object.
    fn clone_box(&self) -> Box<dyn CustomMessage>;
}
