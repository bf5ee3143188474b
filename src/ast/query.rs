use serde::Serialize;

use crate::ast::{Action, Connective, Direction, Operator, ProjectionKind, PropertyPath};

/// Result-shaping clause between the action and the criteria.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Projection {
    pub kind: ProjectionKind,
    /// Row limit; only set for [`ProjectionKind::First`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    pub distinct: bool,
    /// Projected or aggregated property.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<PropertyPath>,
}

impl Projection {
    pub fn first(count: u32) -> Self {
        Self {
            kind: ProjectionKind::First,
            count: Some(count),
            distinct: false,
            property: None,
        }
    }

    pub fn distinct() -> Self {
        Self {
            kind: ProjectionKind::Distinct,
            count: None,
            distinct: true,
            property: None,
        }
    }

    pub fn property(property: PropertyPath) -> Self {
        Self {
            kind: ProjectionKind::Property,
            count: None,
            distinct: false,
            property: Some(property),
        }
    }

    /// `Max`, `Min`, `Sum` or `Avg` over `property`.
    pub fn aggregate(kind: ProjectionKind, property: PropertyPath) -> Self {
        Self {
            kind,
            count: None,
            distinct: false,
            property: Some(property),
        }
    }

    pub fn with_distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    pub fn with_property(mut self, property: PropertyPath) -> Self {
        self.property = Some(property);
        self
    }
}

/// One comparison test of the criteria list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Condition {
    pub property: PropertyPath,
    pub operator: Operator,
    pub negated: bool,
    pub ignore_case: bool,
}

impl Condition {
    /// An `EQUAL` condition without modifiers.
    pub fn new(property: PropertyPath) -> Self {
        Self {
            property,
            operator: Operator::Equal,
            negated: false,
            ignore_case: false,
        }
    }

    pub fn with_operator(mut self, operator: Operator) -> Self {
        self.operator = operator;
        self
    }

    pub fn negated(mut self) -> Self {
        self.negated = true;
        self
    }

    pub fn ignore_case(mut self) -> Self {
        self.ignore_case = true;
        self
    }
}

/// A condition together with the connective joining it to the previous item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CriteriaItem {
    /// `None` only for the first item.
    pub connective: Option<Connective>,
    pub condition: Condition,
}

impl CriteriaItem {
    pub fn new(connective: Option<Connective>, condition: Condition) -> Self {
        Self {
            connective,
            condition,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderItem {
    pub property: PropertyPath,
    pub direction: Direction,
}

impl OrderItem {
    pub fn new(property: PropertyPath, direction: Direction) -> Self {
        Self {
            property,
            direction,
        }
    }
}

/// Query description derived from a method name.
///
/// Only the parser constructs descriptors, which keeps the bulk-mutation
/// invariant intact: an `Update` or `Delete` descriptor never has ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryDescriptor {
    action: Action,
    #[serde(skip_serializing_if = "Option::is_none")]
    projection: Option<Projection>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    criteria: Vec<CriteriaItem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    ordering: Vec<OrderItem>,
}

impl QueryDescriptor {
    pub(crate) fn new(
        action: Action,
        projection: Option<Projection>,
        criteria: Vec<CriteriaItem>,
        ordering: Vec<OrderItem>,
    ) -> Self {
        Self {
            action,
            projection,
            criteria,
            ordering,
        }
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn projection(&self) -> Option<&Projection> {
        self.projection.as_ref()
    }

    pub fn criteria(&self) -> &[CriteriaItem] {
        &self.criteria
    }

    pub fn ordering(&self) -> &[OrderItem] {
        &self.ordering
    }

    pub fn is_bulk_mutation(&self) -> bool {
        self.action.is_bulk_mutation()
    }

    /// Iterate the conditions in left-to-right (parameter binding) order.
    pub fn conditions(&self) -> impl Iterator<Item = &Condition> {
        self.criteria.iter().map(|item| &item.condition)
    }

    /// Total number of method parameters the criteria bind.
    pub fn parameter_count(&self) -> usize {
        self.conditions()
            .map(|condition| condition.operator.parameter_count())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(name: &str) -> PropertyPath {
        PropertyPath::new([name]).unwrap()
    }

    #[test]
    fn test_parameter_count_follows_operators() {
        let query = QueryDescriptor::new(
            Action::Find,
            None,
            vec![
                CriteriaItem::new(None, Condition::new(path("name"))),
                CriteriaItem::new(
                    Some(Connective::And),
                    Condition::new(path("age")).with_operator(Operator::Between),
                ),
                CriteriaItem::new(
                    Some(Connective::Or),
                    Condition::new(path("email")).with_operator(Operator::Null),
                ),
            ],
            vec![],
        );
        assert_eq!(query.parameter_count(), 3);
        assert_eq!(query.conditions().count(), 3);
    }

    #[test]
    fn test_serialize_skips_absent_clauses() {
        let query = QueryDescriptor::new(Action::Delete, None, vec![], vec![]);
        let json = serde_json::to_string(&query).unwrap();
        assert_eq!(json, r#"{"action":"DELETE"}"#);
    }
}
