//! Resource declarations and template synthesis.

use std::collections::BTreeMap;

use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::policy::{Condition, Effect, Expr, PolicyDocument, Principal, Statement};

pub const DEFAULT_API_KEY_NAME: &str = "ExampleKey";
pub const API_KEY_NAME_CONTEXT: &str = "apiKeyName";

pub const MAP_ACTIONS: [&str; 2] = ["geo-maps:GetStaticMap", "geo-maps:GetTile"];
pub const ROUTE_ACTION: &str = "geo-routes:CalculateRoutes";
const ASSUME_ROLE_ACTION: &str = "sts:AssumeRoleWithWebIdentity";
const COGNITO_PRINCIPAL: &str = "cognito-identity.amazonaws.com";
const AUD_KEY: &str = "cognito-identity.amazonaws.com:aud";
const AMR_KEY: &str = "cognito-identity.amazonaws.com:amr";

const MAPS_PROVIDER_ARN: &str = "arn:aws:geo-maps:${AWS::Region}::provider/default";
const ROUTES_PROVIDER_ARN: &str = "arn:aws:geo-routes:${AWS::Region}::provider/default";

const API_KEY_ID: &str = "ApiKey";
const IDENTITY_POOL_ID: &str = "CognitoIdPool";
const ROLE_ID: &str = "LocationServiceUnAuthRole";
const ROLE_ATTACHMENT_ID: &str = "CognitoIdPoolRoleAttachment";

#[derive(Error, Debug)]
pub enum StackError {
    #[error("API key must allow exactly {expected:?}, found {found:?}")]
    KeyActions {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("API key resources must be the default maps provider, found {0:?}")]
    KeyResources(Vec<Expr>),

    #[error("identity pool must disable the classic flow and allow unauthenticated identities")]
    IdentityPoolFlow,

    #[error("role trust policy is not restricted to unauthenticated pool identities: {0}")]
    Trust(&'static str),

    #[error("role must carry exactly one Allow of geo-routes:CalculateRoutes on the default routes provider: {0}")]
    RolePolicy(String),

    #[error("invalid context entry {0:?}, expected key=value")]
    Context(String),

    #[error("failed to render template: {0}")]
    Render(#[from] serde_json::Error),
}

/// Deployment-time values, the equivalent of `--context key=value`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackContext {
    values: BTreeMap<String, String>,
}

impl StackContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Parse `key=value` entries.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, StackError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut context = Self::new();
        for pair in pairs {
            let pair = pair.as_ref();
            match pair.split_once('=') {
                Some((key, value)) if !key.trim().is_empty() => {
                    context = context.with(key.trim(), value.trim());
                }
                _ => return Err(StackError::Context(pair.to_string())),
            }
        }
        Ok(context)
    }
}

/// Non-expiring key for static maps and tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKey {
    pub key_name: String,
    pub allow_actions: Vec<String>,
    pub allow_resources: Vec<Expr>,
    pub no_expiry: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityPool {
    pub allow_classic_flow: bool,
    pub allow_unauthenticated_identities: bool,
}

/// Role assumable through web-identity federation, with inline policies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FederatedRole {
    pub assume_role_policy: PolicyDocument,
    pub policies: BTreeMap<String, PolicyDocument>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub logical_id: &'static str,
    pub description: &'static str,
    pub value: Expr,
}

/// The full declaration for one named stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stack {
    pub name: String,
    pub api_key: ApiKey,
    pub identity_pool: IdentityPool,
    pub unauthenticated_role: FederatedRole,
}

impl Stack {
    pub fn new(name: impl Into<String>, context: &StackContext) -> Self {
        let key_name = context
            .get(API_KEY_NAME_CONTEXT)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_API_KEY_NAME)
            .to_string();

        let api_key = ApiKey {
            key_name,
            allow_actions: MAP_ACTIONS.iter().map(|a| a.to_string()).collect(),
            allow_resources: vec![Expr::sub(MAPS_PROVIDER_ARN)],
            no_expiry: true,
        };

        let identity_pool = IdentityPool {
            allow_classic_flow: false,
            allow_unauthenticated_identities: true,
        };

        let trust = Statement::allow(&[ASSUME_ROLE_ACTION])
            .for_principal(Principal::Federated(COGNITO_PRINCIPAL.to_string()))
            .when(
                Condition::new()
                    .with("StringEquals", AUD_KEY, Expr::reference(IDENTITY_POOL_ID))
                    .with(
                        "ForAnyValue:StringLike",
                        AMR_KEY,
                        Expr::literal("unauthenticated"),
                    ),
            );

        let route_policy = PolicyDocument::new(vec![
            Statement::allow(&[ROUTE_ACTION]).on(Expr::sub(ROUTES_PROVIDER_ARN))
        ]);

        let unauthenticated_role = FederatedRole {
            assume_role_policy: PolicyDocument::new(vec![trust]),
            policies: BTreeMap::from([("policy".to_string(), route_policy)]),
        };

        Self {
            name: name.into(),
            api_key,
            identity_pool,
            unauthenticated_role,
        }
    }

    pub fn outputs(&self) -> Vec<Output> {
        vec![
            Output {
                logical_id: "OutputApiKeyName",
                description: "Location Service API Key Name",
                value: Expr::literal(self.api_key.key_name.clone()),
            },
            Output {
                logical_id: "OutputIdentityPoolId",
                description: "Cognito Identity Pool ID",
                value: Expr::reference(IDENTITY_POOL_ID),
            },
        ]
    }

    /// Reject any declaration granting more than map/tile retrieval on the
    /// key or route calculation on the role.
    pub fn verify_least_privilege(&self) -> Result<(), StackError> {
        let mut expected: Vec<String> = MAP_ACTIONS.iter().map(|a| a.to_string()).collect();
        let mut found = self.api_key.allow_actions.clone();
        expected.sort();
        found.sort();
        if expected != found {
            return Err(StackError::KeyActions { expected, found });
        }
        if self.api_key.allow_resources != [Expr::sub(MAPS_PROVIDER_ARN)] {
            return Err(StackError::KeyResources(self.api_key.allow_resources.clone()));
        }

        if self.identity_pool.allow_classic_flow
            || !self.identity_pool.allow_unauthenticated_identities
        {
            return Err(StackError::IdentityPoolFlow);
        }

        self.verify_trust()?;
        self.verify_role_policy()
    }

    fn verify_trust(&self) -> Result<(), StackError> {
        let [trust] = self.unauthenticated_role.assume_role_policy.statement.as_slice() else {
            return Err(StackError::Trust("expected a single trust statement"));
        };
        if trust.effect != Effect::Allow || trust.action != [ASSUME_ROLE_ACTION] {
            return Err(StackError::Trust("trust must only allow web-identity assumption"));
        }
        if trust.principal != Some(Principal::Federated(COGNITO_PRINCIPAL.to_string())) {
            return Err(StackError::Trust("principal must be the Cognito identity service"));
        }
        if trust.condition.get("StringEquals", AUD_KEY) != Some(&Expr::reference(IDENTITY_POOL_ID))
        {
            return Err(StackError::Trust("audience must be this identity pool"));
        }
        if trust.condition.get("ForAnyValue:StringLike", AMR_KEY)
            != Some(&Expr::literal("unauthenticated"))
        {
            return Err(StackError::Trust("only unauthenticated identities may assume the role"));
        }
        Ok(())
    }

    fn verify_role_policy(&self) -> Result<(), StackError> {
        let statements: Vec<&Statement> = self
            .unauthenticated_role
            .policies
            .values()
            .flat_map(|document| document.statement.iter())
            .collect();

        let [statement] = statements.as_slice() else {
            return Err(StackError::RolePolicy(format!(
                "found {} statements",
                statements.len()
            )));
        };
        if statement.effect != Effect::Allow || statement.principal.is_some() {
            return Err(StackError::RolePolicy("statement must be a plain Allow".to_string()));
        }
        if statement.action != [ROUTE_ACTION] {
            return Err(StackError::RolePolicy(format!("actions {:?}", statement.action)));
        }
        if statement.resource != [Expr::sub(ROUTES_PROVIDER_ARN)] {
            return Err(StackError::RolePolicy(format!(
                "resources {:?}",
                statement.resource
            )));
        }
        Ok(())
    }

    /// Render the CloudFormation template. Deterministic for a given
    /// declaration; fails if the declaration is over-privileged.
    pub fn synthesize(&self) -> Result<Value, StackError> {
        self.verify_least_privilege()?;

        let role_policies = self
            .unauthenticated_role
            .policies
            .iter()
            .map(|(name, document)| {
                Ok(json!({
                    "PolicyName": name,
                    "PolicyDocument": serde_json::to_value(document)?,
                }))
            })
            .collect::<Result<Vec<Value>, serde_json::Error>>()?;

        let mut resources = Map::new();
        resources.insert(
            API_KEY_ID.to_string(),
            json!({
                "Type": "AWS::Location::APIKey",
                "Properties": {
                    "KeyName": self.api_key.key_name,
                    "NoExpiry": self.api_key.no_expiry,
                    "Restrictions": {
                        "AllowActions": self.api_key.allow_actions,
                        "AllowResources": serde_json::to_value(&self.api_key.allow_resources)?,
                    },
                },
            }),
        );
        resources.insert(
            IDENTITY_POOL_ID.to_string(),
            json!({
                "Type": "AWS::Cognito::IdentityPool",
                "Properties": {
                    "AllowClassicFlow": self.identity_pool.allow_classic_flow,
                    "AllowUnauthenticatedIdentities": self.identity_pool.allow_unauthenticated_identities,
                },
            }),
        );
        resources.insert(
            ROLE_ID.to_string(),
            json!({
                "Type": "AWS::IAM::Role",
                "Properties": {
                    "AssumeRolePolicyDocument":
                        serde_json::to_value(&self.unauthenticated_role.assume_role_policy)?,
                    "Policies": role_policies,
                },
            }),
        );
        resources.insert(
            ROLE_ATTACHMENT_ID.to_string(),
            json!({
                "Type": "AWS::Cognito::IdentityPoolRoleAttachment",
                "Properties": {
                    "IdentityPoolId": serde_json::to_value(Expr::reference(IDENTITY_POOL_ID))?,
                    "Roles": {
                        "unauthenticated": serde_json::to_value(Expr::get_att(ROLE_ID, "Arn"))?,
                    },
                },
            }),
        );

        let mut outputs = Map::new();
        for output in self.outputs() {
            outputs.insert(
                output.logical_id.to_string(),
                json!({
                    "Description": output.description,
                    "Value": serde_json::to_value(&output.value)?,
                }),
            );
        }

        tracing::debug!(stack = %self.name, resources = resources.len(), "synthesized template");

        Ok(json!({
            "AWSTemplateFormatVersion": "2010-09-09",
            "Description": format!(
                "{}: Location Service map key, anonymous identity pool and route calculation role",
                self.name
            ),
            "Resources": resources,
            "Outputs": outputs,
        }))
    }

    /// Pretty-printed template.
    pub fn to_template_string(&self) -> Result<String, StackError> {
        Ok(serde_json::to_string_pretty(&self.synthesize()?)?)
    }
}
