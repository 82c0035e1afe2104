use super::*;
use std::sync::Mutex;

use serde_json::{json, Value};

use crate::domain::entities::{
    AwsContext, OptionSettingItem, OrchestratorSession, ProjectDefinition, Recipe,
    Recommendation,
};
use crate::domain::ports::{
    PickRequest, PickResponse, RemoteResource, ResourceQueryError, TypeHintContext, TypeHintError,
    TypeHintResponse,
};
use crate::domain::value_objects::{HostCapabilities, OptionSettingValueType, ResourceSelection};

struct StaticQuery(Result<Vec<RemoteResource>, ResourceQueryError>);

impl ResourceQueryService for StaticQuery {
    fn list(
        &self,
        _kind: ResourceKind,
        _aws: &AwsContext,
    ) -> Result<Vec<RemoteResource>, ResourceQueryError> {
        self.0.clone()
    }
}

/// Answers with a fixed response and records what it was shown
struct ScriptedPicker {
    response: PickResponse,
    seen: Mutex<Vec<(Option<ResourceSelection>, String, usize)>>,
}

impl ScriptedPicker {
    fn new(response: PickResponse) -> Arc<Self> {
        Arc::new(Self {
            response,
            seen: Mutex::new(Vec::new()),
        })
    }
}

impl ResourcePicker for ScriptedPicker {
    fn pick(&self, request: &PickRequest<'_>) -> Result<PickResponse, TypeHintError> {
        self.seen.lock().unwrap().push((
            request.current.cloned(),
            request.suggested_name.clone(),
            request.candidates.len(),
        ));
        Ok(self.response.clone())
    }
}

fn clusters() -> Arc<StaticQuery> {
    Arc::new(StaticQuery(Ok(vec![RemoteResource {
        id: "arn:cluster/foo".into(),
        name: "foo".into(),
    }])))
}

fn run(
    registry: &TypeHintRegistry,
    hint: &str,
    setting: OptionSettingItem,
    current: Option<Value>,
) -> Result<TypeHintResponse, TypeHintError> {
    let recipe: Recipe = serde_json::from_value(json!({
        "Id": "AspNetAppEcsFargate", "Version": "1.0.0", "Name": "ECS"
    }))
    .unwrap();
    let rec = Recommendation::new(Arc::new(recipe));
    let session = OrchestratorSession::new(
        ProjectDefinition::for_file("/code/App/App.csproj"),
        HostCapabilities::new(),
    )
    .with_application_name("web");
    let ctx = TypeHintContext {
        recommendation: &rec,
        setting: &setting,
        session: &session,
        current: current.as_ref(),
    };
    registry.get(hint).unwrap().execute(&ctx)
}

fn cluster_setting() -> OptionSettingItem {
    OptionSettingItem::new("ClusterName", OptionSettingValueType::Object).with_type_hint("ECSCluster")
}

#[test]
fn registers_all_builtin_hints() {
    let registry = default_type_hints(clusters(), ScriptedPicker::new(PickResponse::default()));
    let mut hints: Vec<&str> = registry.hints().collect();
    hints.sort_unstable();
    assert_eq!(
        hints,
        vec!["BeanstalkApplication", "EC2KeyPair", "ECSCluster", "IAMRole", "Vpc"]
    );
}

#[test]
fn existing_cluster_with_blank_new_name_is_kept() {
    let picker = ScriptedPicker::new(PickResponse {
        create_new: false,
        existing: Some("arn:cluster/foo".into()),
        new_name: Some(String::new()),
    });
    let registry = default_type_hints(clusters(), picker);

    let response = run(&registry, "ECSCluster", cluster_setting(), None).unwrap();
    assert_eq!(
        response,
        TypeHintResponse::Selection(ResourceSelection::Existing("arn:cluster/foo".into()))
    );
}

#[test]
fn current_value_is_preselected() {
    let picker = ScriptedPicker::new(PickResponse {
        create_new: true,
        existing: None,
        new_name: Some("prior-cluster".into()),
    });
    let registry = default_type_hints(clusters(), picker.clone());
    let prior = json!({ "CreateNew": true, "NewName": "prior-cluster" });

    run(&registry, "ECSCluster", cluster_setting(), Some(prior)).unwrap();

    let seen = picker.seen.lock().unwrap();
    assert_eq!(
        seen[0],
        (
            Some(ResourceSelection::CreateNew("prior-cluster".into())),
            "prior-cluster".to_string(),
            1
        )
    );
}

#[test]
fn new_name_defaults_to_stack_name() {
    let picker = ScriptedPicker::new(PickResponse {
        create_new: true,
        existing: None,
        new_name: Some("web".into()),
    });
    let registry = default_type_hints(clusters(), picker.clone());
    run(&registry, "ECSCluster", cluster_setting(), None).unwrap();
    assert_eq!(picker.seen.lock().unwrap()[0].1, "web");
}

#[test]
fn empty_choice_requires_allow_empty() {
    let registry = default_type_hints(clusters(), ScriptedPicker::new(PickResponse::default()));
    let err = run(&registry, "ECSCluster", cluster_setting(), None).unwrap_err();
    assert!(matches!(err, TypeHintError::InvalidSelection(_)));

    let response = run(
        &registry,
        "ECSCluster",
        cluster_setting().allowing_empty(),
        None,
    )
    .unwrap();
    assert_eq!(response.into_value(), Value::Null);
}

#[test]
fn select_existing_stores_the_id() {
    let picker = ScriptedPicker::new(PickResponse {
        create_new: false,
        existing: Some("vpc-0abc".into()),
        new_name: None,
    });
    let registry = default_type_hints(clusters(), picker);
    let setting = OptionSettingItem::new("VpcId", OptionSettingValueType::String).with_type_hint("Vpc");

    let response = run(&registry, "Vpc", setting, None).unwrap();
    assert_eq!(response.into_value(), json!("vpc-0abc"));
}

#[test]
fn select_existing_refuses_creation() {
    let picker = ScriptedPicker::new(PickResponse {
        create_new: true,
        existing: None,
        new_name: Some("new-vpc".into()),
    });
    let registry = default_type_hints(clusters(), picker);
    let setting = OptionSettingItem::new("VpcId", OptionSettingValueType::String).with_type_hint("Vpc");

    assert!(matches!(
        run(&registry, "Vpc", setting, None).unwrap_err(),
        TypeHintError::InvalidSelection(_)
    ));
}

#[test]
fn query_failures_propagate() {
    let query = Arc::new(StaticQuery(Err(ResourceQueryError::Denied(
        "ecs:ListClusters".into(),
    ))));
    let registry = default_type_hints(query, ScriptedPicker::new(PickResponse::default()));
    let err = run(&registry, "ECSCluster", cluster_setting(), None).unwrap_err();
    assert!(matches!(err, TypeHintError::Query(ResourceQueryError::Denied(_))));
}
