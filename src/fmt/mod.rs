//! Canonical method-name rendering.
//!
//! Reparsing the rendered name yields an equal descriptor. Ignored prefixes
//! are dropped, default directions are written out and `Equal` is only
//! written when negated.

use std::fmt::{Result, Write};

use crate::ast::{Condition, Operator, Projection, ProjectionKind, PropertyPath, QueryDescriptor};
use crate::lexer::tokens::FIRST;

#[cfg(test)]
mod tests;

pub struct Formatter {
    buffer: String,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    pub fn format(mut self, query: &QueryDescriptor) -> std::result::Result<String, std::fmt::Error> {
        self.visit_query(query)?;
        Ok(self.buffer)
    }

    fn visit_query(&mut self, query: &QueryDescriptor) -> Result {
        let action = query.action();
        write!(self.buffer, "{}", action.keyword())?;

        match query.projection() {
            Some(projection) => self.format_projection(projection)?,
            None if query.criteria().is_empty()
                && (action.is_bulk_mutation() || action.accepts_all()) =>
            {
                write!(self.buffer, "All")?
            }
            None => {}
        }

        if !query.criteria().is_empty() {
            write!(self.buffer, "By")?;
            for item in query.criteria() {
                if let Some(connective) = item.connective {
                    write!(self.buffer, "{}", connective.keyword())?;
                }
                self.format_condition(&item.condition)?;
            }
        }

        if !query.ordering().is_empty() {
            write!(self.buffer, "OrderBy")?;
            for item in query.ordering() {
                self.format_path(&item.property)?;
                write!(self.buffer, "{}", item.direction.keyword())?;
            }
        }
        Ok(())
    }

    fn format_projection(&mut self, projection: &Projection) -> Result {
        match projection.kind {
            ProjectionKind::First => {
                write!(self.buffer, "{}{}", FIRST, projection.count.unwrap_or(1))?;
                if projection.distinct {
                    write!(self.buffer, "Distinct")?;
                }
            }
            ProjectionKind::Property => {}
            kind => {
                if let Some(keyword) = kind.keyword() {
                    write!(self.buffer, "{}", keyword)?;
                }
            }
        }
        if let Some(property) = &projection.property {
            self.format_path(property)?;
        }
        Ok(())
    }

    fn format_condition(&mut self, condition: &Condition) -> Result {
        self.format_path(&condition.property)?;
        if condition.negated {
            write!(self.buffer, "Not")?;
        }
        if condition.ignore_case {
            write!(self.buffer, "IgnoreCase")?;
        }
        if condition.negated || condition.operator != Operator::Equal {
            write!(self.buffer, "{}", condition.operator.keyword())?;
        }
        Ok(())
    }

    /// Segments with their first letter capitalized, joined by `_`.
    fn format_path(&mut self, path: &PropertyPath) -> Result {
        for (i, segment) in path.segments().iter().enumerate() {
            if i > 0 {
                self.buffer.push('_');
            }
            let mut chars = segment.chars();
            if let Some(first) = chars.next() {
                self.buffer.push(first.to_ascii_uppercase());
                self.buffer.push_str(chars.as_str());
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for QueryDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result {
        f.write_str(&Formatter::new().format(self)?)
    }
}
