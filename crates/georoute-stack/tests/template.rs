use georoute_stack::{Stack, StackContext, API_KEY_NAME_CONTEXT};
use serde_json::{json, Value};

fn template(context: &StackContext) -> Value {
    Stack::new("GeoRouteDemoStack", context)
        .synthesize()
        .expect("default stack should synthesize")
}

#[test]
fn declares_four_resources() {
    let template = template(&StackContext::new());
    let resources = template["Resources"].as_object().unwrap();

    let mut types: Vec<&str> = resources
        .values()
        .map(|resource| resource["Type"].as_str().unwrap())
        .collect();
    types.sort();
    assert_eq!(
        types,
        [
            "AWS::Cognito::IdentityPool",
            "AWS::Cognito::IdentityPoolRoleAttachment",
            "AWS::IAM::Role",
            "AWS::Location::APIKey",
        ]
    );
}

#[test]
fn api_key_is_restricted_to_maps() {
    let template = template(&StackContext::new());
    let key = &template["Resources"]["ApiKey"]["Properties"];

    assert_eq!(key["KeyName"], "ExampleKey");
    assert_eq!(key["NoExpiry"], true);
    assert_eq!(
        key["Restrictions"],
        json!({
            "AllowActions": ["geo-maps:GetStaticMap", "geo-maps:GetTile"],
            "AllowResources": [
                { "Fn::Sub": "arn:aws:geo-maps:${AWS::Region}::provider/default" }
            ],
        })
    );
}

#[test]
fn identity_pool_is_anonymous_enhanced_flow() {
    let template = template(&StackContext::new());
    assert_eq!(
        template["Resources"]["CognitoIdPool"]["Properties"],
        json!({ "AllowClassicFlow": false, "AllowUnauthenticatedIdentities": true })
    );
}

#[test]
fn role_only_calculates_routes() {
    let template = template(&StackContext::new());
    let role = &template["Resources"]["LocationServiceUnAuthRole"]["Properties"];

    assert_eq!(
        role["AssumeRolePolicyDocument"],
        json!({
            "Version": "2012-10-17",
            "Statement": [{
                "Effect": "Allow",
                "Principal": { "Federated": "cognito-identity.amazonaws.com" },
                "Action": ["sts:AssumeRoleWithWebIdentity"],
                "Condition": {
                    "ForAnyValue:StringLike": {
                        "cognito-identity.amazonaws.com:amr": "unauthenticated"
                    },
                    "StringEquals": {
                        "cognito-identity.amazonaws.com:aud": { "Ref": "CognitoIdPool" }
                    }
                }
            }]
        })
    );
    assert_eq!(
        role["Policies"],
        json!([{
            "PolicyName": "policy",
            "PolicyDocument": {
                "Version": "2012-10-17",
                "Statement": [{
                    "Effect": "Allow",
                    "Action": ["geo-routes:CalculateRoutes"],
                    "Resource": [
                        { "Fn::Sub": "arn:aws:geo-routes:${AWS::Region}::provider/default" }
                    ]
                }]
            }
        }])
    );
}

#[test]
fn attachment_binds_unauthenticated_role() {
    let template = template(&StackContext::new());
    assert_eq!(
        template["Resources"]["CognitoIdPoolRoleAttachment"]["Properties"],
        json!({
            "IdentityPoolId": { "Ref": "CognitoIdPool" },
            "Roles": { "unauthenticated": { "Fn::GetAtt": ["LocationServiceUnAuthRole", "Arn"] } }
        })
    );
}

#[test]
fn outputs_follow_context() {
    let context = StackContext::new().with(API_KEY_NAME_CONTEXT, "FleetKey");
    let template = template(&context);

    assert_eq!(
        template["Outputs"],
        json!({
            "OutputApiKeyName": {
                "Description": "Location Service API Key Name",
                "Value": "FleetKey"
            },
            "OutputIdentityPoolId": {
                "Description": "Cognito Identity Pool ID",
                "Value": { "Ref": "CognitoIdPool" }
            }
        })
    );
}

#[test]
fn synthesis_is_deterministic() {
    let first = Stack::new("GeoRouteDemoStack", &StackContext::new())
        .to_template_string()
        .unwrap();
    let second = Stack::new("GeoRouteDemoStack", &StackContext::new())
        .to_template_string()
        .unwrap();
    assert_eq!(first, second);
}
