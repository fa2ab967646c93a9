//! IAM policy documents and template expressions.

use std::collections::BTreeMap;

use serde::Serialize;

const POLICY_VERSION: &str = "2012-10-17";

/// A template value: a literal or one of the intrinsic functions the stack
/// needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Expr {
    Literal(String),
    Sub {
        #[serde(rename = "Fn::Sub")]
        template: String,
    },
    Ref {
        #[serde(rename = "Ref")]
        logical_id: String,
    },
    GetAtt {
        #[serde(rename = "Fn::GetAtt")]
        target: (String, String),
    },
}

impl Expr {
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    /// `Fn::Sub`, e.g. `arn:aws:geo-routes:${AWS::Region}::provider/default`.
    pub fn sub(template: impl Into<String>) -> Self {
        Self::Sub {
            template: template.into(),
        }
    }

    pub fn reference(logical_id: impl Into<String>) -> Self {
        Self::Ref {
            logical_id: logical_id.into(),
        }
    }

    pub fn get_att(logical_id: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::GetAtt {
            target: (logical_id.into(), attribute.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Effect {
    Allow,
    Deny,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Principal {
    Federated(String),
    Service(String),
}

/// `{ operator: { key: value } }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Condition(BTreeMap<String, BTreeMap<String, Expr>>);

impl Condition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, operator: &str, key: &str, value: Expr) -> Self {
        self.0
            .entry(operator.to_string())
            .or_default()
            .insert(key.to_string(), value);
        self
    }

    pub fn get(&self, operator: &str, key: &str) -> Option<&Expr> {
        self.0.get(operator).and_then(|entries| entries.get(key))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Statement {
    pub effect: Effect,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal: Option<Principal>,
    pub action: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub resource: Vec<Expr>,
    #[serde(skip_serializing_if = "Condition::is_empty")]
    pub condition: Condition,
}

impl Statement {
    pub fn allow(actions: &[&str]) -> Self {
        Self {
            effect: Effect::Allow,
            principal: None,
            action: actions.iter().map(|a| a.to_string()).collect(),
            resource: Vec::new(),
            condition: Condition::new(),
        }
    }

    pub fn on(mut self, resource: Expr) -> Self {
        self.resource.push(resource);
        self
    }

    pub fn for_principal(mut self, principal: Principal) -> Self {
        self.principal = Some(principal);
        self
    }

    pub fn when(mut self, condition: Condition) -> Self {
        self.condition = condition;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    pub version: String,
    pub statement: Vec<Statement>,
}

impl PolicyDocument {
    pub fn new(statement: Vec<Statement>) -> Self {
        Self {
            version: POLICY_VERSION.to_string(),
            statement,
        }
    }
}
